// SYNOID Growl SFX - Dependency Check
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Probes the external tools before a render. The result is advisory:
// the stage errors themselves stay authoritative.

use crate::config::VoiceConfig;
use crate::process::{run, Echo, Invocation, RunOptions};
use tracing::{debug, info};

/// Invocations that should succeed when the toolchain is installed.
pub fn dependency_probes(cfg: &VoiceConfig) -> Vec<Invocation> {
    let mut probes = vec![Invocation::new(cfg.ffmpeg.clone()).arg("-version")];
    if let Some(tts) = Invocation::from_launcher(&cfg.tts_command) {
        probes.push(tts.arg("--help"));
    }
    probes
}

async fn probe_ok(inv: &Invocation, opts: &RunOptions) -> bool {
    match run(inv, opts).await {
        Ok(_) => true,
        Err(e) => {
            debug!("[HEALTH] `{}` unusable: {}", inv.program, e);
            false
        }
    }
}

/// Returns the command lines of tools that could not be run.
///
/// Each check is bounded by the configured timeout; a tool that hangs
/// counts as missing.
pub async fn check_dependencies(cfg: &VoiceConfig) -> Vec<String> {
    let opts = RunOptions {
        echo: Echo::Silent,
        ..cfg.run_options()
    };
    let mut missing = Vec::new();
    for inv in dependency_probes(cfg) {
        if probe_ok(&inv, &opts).await {
            info!("[HEALTH] ✅ {}", inv);
        } else {
            missing.push(inv.to_string());
        }
    }
    missing
}
