// SYNOID Growl SFX - Peak Level Reporter
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use crate::config::VoiceConfig;
use crate::error::PipelineResult;
use crate::process::{run, Invocation};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{info, warn};

fn max_volume_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"max_volume:\s*([-\d.]+)\s*dB").expect("static regex"))
}

/// Extract `max_volume` (dBFS) from ffmpeg `volumedetect` output.
/// Returns `None` when the token is absent or unparseable.
pub fn parse_max_volume(text: &str) -> Option<f64> {
    max_volume_re()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

pub fn volumedetect_invocation(cfg: &VoiceConfig, path: &Path) -> Invocation {
    Invocation::new(cfg.ffmpeg.clone())
        .args(["-hide_banner", "-nostats", "-i"])
        .path_arg(path)
        .args(["-af", "volumedetect", "-f", "null", "-"])
}

/// Measure the peak of `path`. A missing measurement is `Ok(None)`.
pub async fn measure_peak(cfg: &VoiceConfig, path: &Path) -> PipelineResult<Option<f64>> {
    let text = run(&volumedetect_invocation(cfg, path), &cfg.run_options()).await?;
    let peak = parse_max_volume(&text);
    match peak {
        Some(db) => info!("[PEAK] {:?}: {:.2} dB", path, db),
        None => warn!("[PEAK] max_volume not found in volumedetect output"),
    }
    Ok(peak)
}
