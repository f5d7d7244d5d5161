// SYNOID Growl SFX
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Renders the stylized "LO...GAN!" monster voice: edge-tts for the base
// take, an ffmpeg filter chain for the growl, then a fixed-length trim
// with a tail fade.

pub mod config;
pub mod error;
pub mod health;
pub mod pipeline;
pub mod probe;
pub mod process;
pub mod stages;

pub use config::VoiceConfig;
pub use error::{PipelineError, PipelineResult};
pub use pipeline::{render, RenderReport};
