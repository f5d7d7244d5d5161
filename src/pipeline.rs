// SYNOID Growl SFX - Render Pipeline
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// synthesize -> monsterize -> finalize -> cleanup -> peak report.
// Strictly sequential; the first failing stage aborts the render.

use crate::config::VoiceConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::probe::probe_file;
use crate::stages::{apply_fx, finalize, measure_peak, remove_temporaries, synthesize};
use crate::stages::finalize::fmt_secs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Encoder rounding allowed between target and decoded duration.
pub const DURATION_TOLERANCE_SECS: f64 = 0.05;

/// Outcome of a successful render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderReport {
    pub output: PathBuf,
    pub target_secs: f64,
    /// `None` when volumedetect gave no parseable `max_volume`.
    pub peak_db: Option<f64>,
    /// Decoded duration, filled by [`verify_output`].
    pub measured_secs: Option<f64>,
}

impl RenderReport {
    /// The confirmation line printed on success.
    pub fn summary(&self) -> String {
        match self.peak_db {
            Some(peak) => format!(
                "✅ Done: {} (≈ {}s, peak {:.2} dB)",
                self.output.display(),
                fmt_secs(self.target_secs),
                peak
            ),
            None => format!(
                "✅ Done: {} (≈ {}s)",
                self.output.display(),
                fmt_secs(self.target_secs)
            ),
        }
    }
}

/// Run the whole pipeline for `cfg`.
pub async fn render(cfg: &VoiceConfig) -> PipelineResult<RenderReport> {
    cfg.validate()?;
    let paths = cfg.paths();

    tokio::fs::create_dir_all(&cfg.out_dir)
        .await
        .map_err(|e| PipelineError::io(&cfg.out_dir, e))?;

    // 1) base voice
    synthesize(cfg, &paths.tts).await?;
    // 2) growl
    apply_fx(cfg, &paths.tts, &paths.fx).await?;
    // 3) fixed length + tail fade
    finalize(cfg, &paths.fx, &paths.final_out).await?;

    remove_temporaries(&paths.temporaries()).await;

    let peak_db = measure_peak(cfg, &paths.final_out).await?;
    info!("[PIPELINE] Rendered {:?}", paths.final_out);

    Ok(RenderReport {
        output: paths.final_out,
        target_secs: cfg.target_secs,
        peak_db,
        measured_secs: None,
    })
}

/// Decode the rendered file and record its real duration. A duration
/// outside tolerance is logged, not treated as failure.
pub fn verify_output(report: &mut RenderReport) -> anyhow::Result<()> {
    let probe = probe_file(&report.output)?;
    let measured = probe.duration_secs();
    report.measured_secs = Some(measured);

    let drift = (measured - report.target_secs).abs();
    if drift > DURATION_TOLERANCE_SECS {
        warn!(
            "[VERIFY] {:?} is {:.3}s, expected {}s (off by {:.3}s)",
            report.output,
            measured,
            fmt_secs(report.target_secs),
            drift
        );
    } else {
        info!("[VERIFY] {:?} is {:.3}s", report.output, measured);
    }
    Ok(())
}
