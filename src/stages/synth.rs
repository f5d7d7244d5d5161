// SYNOID Growl SFX - Speech Synthesis (edge-tts)
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use crate::config::VoiceConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::process::{run, Invocation};
use std::path::Path;
use tracing::info;

/// Build the edge-tts command line.
///
/// Adjustments use the `--flag=value` form so negative values such as
/// `-5%` are not parsed as options.
pub fn tts_invocation(cfg: &VoiceConfig, output: &Path) -> PipelineResult<Invocation> {
    let inv = Invocation::from_launcher(&cfg.tts_command)
        .ok_or_else(|| PipelineError::InvalidConfig("tts_command is empty".into()))?;
    Ok(inv
        .args(["-v", cfg.voice.as_str(), "-t", cfg.text.as_str()])
        .arg(format!("--rate={}", cfg.rate))
        .arg(format!("--pitch={}", cfg.pitch))
        .arg(format!("--volume={}", cfg.volume))
        .arg(format!("--write-media={}", output.to_string_lossy())))
}

/// Synthesize the base take to `output`.
pub async fn synthesize(cfg: &VoiceConfig, output: &Path) -> PipelineResult<()> {
    info!("[TTS] Generating base voice ({}): \"{}\" -> {:?}", cfg.voice, cfg.text, output);
    run(&tts_invocation(cfg, output)?, &cfg.run_options()).await?;
    Ok(())
}
