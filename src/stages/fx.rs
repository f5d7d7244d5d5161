// SYNOID Growl SFX - Monsterization Filter Chain
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Turns the clean TTS take into a low, rough, growling voice:
// - asetrate + atempo: big pitch drop while keeping the length
// - bass / equalizer: low-end weight, remove boxiness and harshness
// - acrusher: throat grit
// - compand + acompressor: dense, in-your-face roar
// - tremolo: light throat flutter
// - alimiter: clip guard
//
// All values are hand-tuned. Keep them as-is.

use crate::config::VoiceConfig;
use crate::error::PipelineResult;
use crate::process::{run, Invocation};
use std::fmt;
use std::path::Path;
use tracing::info;

/// One named ffmpeg audio filter with ordered `key=value` options.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    name: &'static str,
    options: Vec<(&'static str, String)>,
    /// Single positional argument (`asetrate=44100*0.68`, `atempo=1.47059`).
    positional: Option<String>,
}

impl Filter {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            options: Vec::new(),
            positional: None,
        }
    }

    pub fn with_value(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            options: Vec::new(),
            positional: Some(value.into()),
        }
    }

    pub fn opt(mut self, key: &'static str, value: impl ToString) -> Self {
        self.options.push((key, value.to_string()));
        self
    }

    pub fn name(&self) -> &str {
        self.name
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)?;
        let mut sep = '=';
        if let Some(value) = &self.positional {
            write!(f, "{}{}", sep, value)?;
            sep = ':';
        }
        for (key, value) in &self.options {
            write!(f, "{}{}={}", sep, key, value)?;
            sep = ':';
        }
        Ok(())
    }
}

/// Ordered, comma-joined filter graph passed to `-af`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterChain {
    filters: Vec<Filter>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.filters.iter().map(Filter::name).collect()
    }
}

impl fmt::Display for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, filter) in self.filters.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", filter)?;
        }
        Ok(())
    }
}

/// The fixed growl chain for a given pitch-down factor.
///
/// `asetrate` drops pitch and slows playback by `pitch_down`; `atempo`
/// speeds it back up by `1 / pitch_down` so the length is roughly kept.
pub fn monster_chain(pitch_down: f64) -> FilterChain {
    FilterChain::new()
        // cleanup
        .then(Filter::new("highpass").opt("f", 70))
        .then(Filter::new("lowpass").opt("f", 6500))
        // pitch down, duration kept
        .then(Filter::with_value("asetrate", format!("44100*{}", pitch_down)))
        .then(Filter::with_value("atempo", format!("{:.5}", 1.0 / pitch_down)))
        // weight, less "human box" and harshness
        .then(Filter::new("bass").opt("g", 8).opt("f", 120).opt("w", 0.6))
        .then(Filter::new("equalizer").opt("f", 350).opt("t", "q").opt("w", 1.2).opt("g", -3))
        .then(Filter::new("equalizer").opt("f", 2500).opt("t", "q").opt("w", 1.1).opt("g", -4))
        // grit
        .then(Filter::new("acrusher").opt("bits", 9).opt("mix", 0.28))
        // density
        .then(
            Filter::new("compand")
                .opt("attacks", 0.005)
                .opt("decays", 0.12)
                .opt("points", "-80/-80|-35/-18|-20/-10|0/-6"),
        )
        .then(
            Filter::new("acompressor")
                .opt("threshold", "-20dB")
                .opt("ratio", 8)
                .opt("attack", 6)
                .opt("release", 90)
                .opt("knee", 4)
                .opt("makeup", "6dB"),
        )
        .then(Filter::new("tremolo").opt("f", 18).opt("d", 0.35))
        .then(Filter::new("alimiter").opt("limit", 0.92))
}

pub fn fx_invocation(cfg: &VoiceConfig, input: &Path, output: &Path) -> Invocation {
    Invocation::new(cfg.ffmpeg.clone())
        .args(["-y", "-i"])
        .path_arg(input)
        .arg("-af")
        .arg(monster_chain(cfg.pitch_down).to_string())
        .arg("-ar")
        .arg(cfg.sample_rate.to_string())
        .arg("-ac")
        .arg(cfg.channels.to_string())
        .path_arg(output)
}

/// Render the growl into an uncompressed WAV at `output`.
pub async fn apply_fx(cfg: &VoiceConfig, input: &Path, output: &Path) -> PipelineResult<()> {
    info!(
        "[FX] Monsterizing {:?} -> {:?} (pitch_down {})",
        input, output, cfg.pitch_down
    );
    run(&fx_invocation(cfg, input, output), &cfg.run_options()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const DEFAULT_CHAIN: &str = "highpass=f=70,lowpass=f=6500,\
asetrate=44100*0.68,atempo=1.47059,\
bass=g=8:f=120:w=0.6,\
equalizer=f=350:t=q:w=1.2:g=-3,\
equalizer=f=2500:t=q:w=1.1:g=-4,\
acrusher=bits=9:mix=0.28,\
compand=attacks=0.005:decays=0.12:points=-80/-80|-35/-18|-20/-10|0/-6,\
acompressor=threshold=-20dB:ratio=8:attack=6:release=90:knee=4:makeup=6dB,\
tremolo=f=18:d=0.35,\
alimiter=limit=0.92";

    #[test]
    fn test_default_chain_is_verbatim() {
        assert_eq!(monster_chain(0.68).to_string(), DEFAULT_CHAIN);
    }

    #[test]
    fn test_chain_order() {
        let chain = monster_chain(0.68);
        assert_eq!(chain.len(), 12);
        assert_eq!(
            chain.names(),
            vec![
                "highpass", "lowpass", "asetrate", "atempo", "bass", "equalizer", "equalizer",
                "acrusher", "compand", "acompressor", "tremolo", "alimiter"
            ]
        );
    }

    #[test]
    fn test_deeper_pitch_rescales_tempo() {
        let chain = monster_chain(0.62).to_string();
        assert!(chain.contains("asetrate=44100*0.62,atempo=1.61290,"));
    }

    #[test]
    fn test_fx_invocation_args() {
        let cfg = VoiceConfig::default();
        let inv = fx_invocation(&cfg, &PathBuf::from("a.mp3"), &PathBuf::from("b.wav"));
        assert_eq!(inv.program, "ffmpeg");
        assert_eq!(
            inv.args,
            vec!["-y", "-i", "a.mp3", "-af", DEFAULT_CHAIN, "-ar", "44100", "-ac", "2", "b.wav"]
        );
    }

    #[test]
    fn test_empty_chain_renders_empty() {
        let chain = FilterChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.to_string(), "");
    }
}
