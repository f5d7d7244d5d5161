// SYNOID Growl SFX - Configuration
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// All render parameters live in `VoiceConfig`. The defaults are the tuned
// "Logan" growl and must stay verbatim; presets and env vars only layer
// on top of them.

use crate::error::{PipelineError, PipelineResult};
use crate::process::{Echo, RunOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_VOICE: &str = "ja-JP-KeitaNeural";
/// Long drawn-out "LO", a short pause, then a clipped "GAN!".
pub const DEFAULT_TEXT: &str = "ローォォォ…ガン！";
pub const DEFAULT_RATE: &str = "-5%";
pub const DEFAULT_PITCH: &str = "-10Hz";
pub const DEFAULT_VOLUME: &str = "+40%";
/// Smaller = deeper. Usable range is roughly 0.60..0.72.
pub const DEFAULT_PITCH_DOWN: f64 = 0.68;
pub const DEFAULT_TARGET_SECS: f64 = 2.0;
pub const DEFAULT_FADE_SECS: f64 = 0.22;
pub const DEFAULT_OUT_DIR: &str = "public/sfx";

/// Env var naming the Python interpreter used for `-m edge_tts`.
pub const ENV_PYTHON: &str = "GROWL_PYTHON";
/// Env var replacing the whole TTS launcher (whitespace separated).
pub const ENV_TTS_COMMAND: &str = "GROWL_TTS_COMMAND";
pub const ENV_FFMPEG: &str = "GROWL_FFMPEG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    pub voice: String,
    pub text: String,
    pub rate: String,
    pub pitch: String,
    pub volume: String,
    pub pitch_down: f64,
    pub target_secs: f64,
    pub fade_secs: f64,
    pub out_dir: PathBuf,
    pub tts_file: String,
    pub fx_file: String,
    pub final_file: String,
    pub sample_rate: u32,
    pub channels: u32,
    pub bitrate: String,
    /// Launcher prefix for the TTS engine; synthesis flags are appended.
    pub tts_command: Vec<String>,
    pub ffmpeg: String,
    /// Per-process limit. `None` waits forever.
    pub timeout_secs: Option<u64>,
    /// Where command lines are echoed; set at runtime, never from a preset.
    #[serde(skip)]
    pub echo: Echo,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            voice: DEFAULT_VOICE.to_string(),
            text: DEFAULT_TEXT.to_string(),
            rate: DEFAULT_RATE.to_string(),
            pitch: DEFAULT_PITCH.to_string(),
            volume: DEFAULT_VOLUME.to_string(),
            pitch_down: DEFAULT_PITCH_DOWN,
            target_secs: DEFAULT_TARGET_SECS,
            fade_secs: DEFAULT_FADE_SECS,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            tts_file: "_logan_tts.mp3".to_string(),
            fx_file: "_logan_fx.wav".to_string(),
            final_file: "voice_logan.mp3".to_string(),
            sample_rate: 44100,
            channels: 2,
            bitrate: "192k".to_string(),
            tts_command: edge_tts_launcher("python3"),
            ffmpeg: "ffmpeg".to_string(),
            timeout_secs: None,
            echo: Echo::Stdout,
        }
    }
}

/// Resolved locations of the three pipeline files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub tts: PathBuf,
    pub fx: PathBuf,
    pub final_out: PathBuf,
}

impl OutputPaths {
    /// The intermediates removed after a successful finalize.
    pub fn temporaries(&self) -> [&Path; 2] {
        [&self.tts, &self.fx]
    }
}

fn edge_tts_launcher(python: &str) -> Vec<String> {
    vec![python.to_string(), "-m".to_string(), "edge_tts".to_string()]
}

impl VoiceConfig {
    /// Load a JSON preset. Missing fields keep their defaults.
    pub fn from_preset(path: &Path) -> PipelineResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| PipelineError::config_file(path, e))?;
        let cfg: Self =
            serde_json::from_str(&raw).map_err(|e| PipelineError::config_file(path, e))?;
        info!("[CONFIG] Loaded preset {:?}", path);
        Ok(cfg)
    }

    /// Apply `GROWL_*` overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(python) = lookup(ENV_PYTHON).filter(|v| !v.trim().is_empty()) {
            debug!("[CONFIG] {}={}", ENV_PYTHON, python);
            self.tts_command = edge_tts_launcher(python.trim());
        }
        if let Some(cmd) = lookup(ENV_TTS_COMMAND) {
            let parts: Vec<String> = cmd.split_whitespace().map(str::to_string).collect();
            if !parts.is_empty() {
                debug!("[CONFIG] {}={}", ENV_TTS_COMMAND, cmd);
                self.tts_command = parts;
            }
        }
        if let Some(ffmpeg) = lookup(ENV_FFMPEG).filter(|v| !v.trim().is_empty()) {
            debug!("[CONFIG] {}={}", ENV_FFMPEG, ffmpeg);
            self.ffmpeg = ffmpeg.trim().to_string();
        }
    }

    pub fn validate(&self) -> PipelineResult<()> {
        if !(self.target_secs.is_finite() && self.target_secs > 0.0) {
            return Err(PipelineError::InvalidConfig(format!(
                "target_secs must be finite and > 0 (got {})",
                self.target_secs
            )));
        }
        if !(self.fade_secs.is_finite() && self.fade_secs >= 0.0) {
            return Err(PipelineError::InvalidConfig(format!(
                "fade_secs must be finite and >= 0 (got {})",
                self.fade_secs
            )));
        }
        if !(self.pitch_down > 0.0 && self.pitch_down <= 1.0) {
            return Err(PipelineError::InvalidConfig(format!(
                "pitch_down must be in (0, 1] (got {})",
                self.pitch_down
            )));
        }
        if self.tts_command.is_empty() {
            return Err(PipelineError::InvalidConfig("tts_command is empty".into()));
        }
        if self.sample_rate == 0 || self.channels == 0 {
            return Err(PipelineError::InvalidConfig(
                "sample_rate and channels must be non-zero".into(),
            ));
        }
        Ok(())
    }

    pub fn paths(&self) -> OutputPaths {
        OutputPaths {
            tts: self.out_dir.join(&self.tts_file),
            fx: self.out_dir.join(&self.fx_file),
            final_out: self.out_dir.join(&self.final_file),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            timeout: self.timeout(),
            echo: self.echo,
        }
    }
}
