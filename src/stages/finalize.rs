// SYNOID Growl SFX - Finalizer (fixed length + tail fade)
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Pads with silence, trims to exactly `target_secs`, then fades the last
// `fade_secs` so the "GAN!" ends short instead of ringing out.

use crate::config::VoiceConfig;
use crate::error::PipelineResult;
use crate::process::{run, Invocation};
use std::path::Path;
use tracing::{debug, info};

/// Trailing silence appended before trimming, in seconds.
const PAD_SECS: u32 = 3;

/// Seconds as ffmpeg sees them, always with a fractional part (`2.0`, `1.78`).
pub fn fmt_secs(secs: f64) -> String {
    format!("{:?}", secs)
}

/// Fade start so the fade ends exactly at `target`; clamped to 0.
pub fn fade_start(target: f64, fade: f64) -> f64 {
    (target - fade).max(0.0)
}

pub fn finalize_chain(target: f64, fade: f64) -> String {
    format!(
        "apad=pad_dur={},atrim=0:{},afade=t=out:st={}:d={}",
        PAD_SECS,
        fmt_secs(target),
        fmt_secs(fade_start(target, fade)),
        fmt_secs(fade)
    )
}

pub fn finalize_invocation(cfg: &VoiceConfig, input: &Path, output: &Path) -> Invocation {
    Invocation::new(cfg.ffmpeg.clone())
        .args(["-y", "-i"])
        .path_arg(input)
        .arg("-af")
        .arg(finalize_chain(cfg.target_secs, cfg.fade_secs))
        .arg("-t")
        .arg(fmt_secs(cfg.target_secs))
        .arg("-b:a")
        .arg(cfg.bitrate.clone())
        .path_arg(output)
}

/// Encode the final clip at `output`.
pub async fn finalize(cfg: &VoiceConfig, input: &Path, output: &Path) -> PipelineResult<()> {
    info!(
        "[FINAL] {:?} -> {:?} ({}s, fade {}s)",
        input, output, cfg.target_secs, cfg.fade_secs
    );
    run(&finalize_invocation(cfg, input, output), &cfg.run_options()).await?;
    Ok(())
}

/// Best-effort removal of intermediates. Errors are ignored.
pub async fn remove_temporaries(paths: &[&Path]) {
    for path in paths {
        match tokio::fs::remove_file(path).await {
            Ok(()) => debug!("[FINAL] Removed {:?}", path),
            Err(e) => debug!("[FINAL] Could not remove {:?}: {}", path, e),
        }
    }
}
