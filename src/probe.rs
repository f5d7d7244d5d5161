// SYNOID Growl SFX - Output Probe
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Decodes a rendered clip in-process so the real duration and the tail
// envelope can be checked without another ffmpeg round trip.

use anyhow::{Context, Result};
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::debug;

/// Decoded clip, downmixed to mono.
#[derive(Debug, Clone)]
pub struct AudioProbe {
    pub sample_rate: u32,
    pub samples: Vec<f32>,
}

impl AudioProbe {
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    fn index_at(&self, secs: f64) -> usize {
        let idx = (secs.max(0.0) * self.sample_rate as f64).round() as usize;
        idx.min(self.samples.len())
    }

    /// RMS amplitude over `[start, end)` seconds. Empty ranges are 0.
    pub fn rms(&self, start: f64, end: f64) -> f32 {
        let (a, b) = (self.index_at(start), self.index_at(end));
        if b <= a {
            return 0.0;
        }
        let window = &self.samples[a..b];
        let sum_sq: f64 = window.iter().map(|&s| (s as f64).powi(2)).sum();
        (sum_sq / window.len() as f64).sqrt() as f32
    }

    /// RMS of `windows` equal slices covering the last `fade_secs`.
    pub fn fade_envelope(&self, fade_secs: f64, windows: usize) -> Vec<f32> {
        if windows == 0 {
            return Vec::new();
        }
        let end = self.duration_secs();
        let start = (end - fade_secs).max(0.0);
        let step = (end - start) / windows as f64;
        (0..windows)
            .map(|i| {
                let a = start + step * i as f64;
                self.rms(a, a + step)
            })
            .collect()
    }
}

/// Decode `path` (mp3, wav, ...) to mono f32.
pub fn probe_file(path: &Path) -> Result<AudioProbe> {
    let src = std::fs::File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    let mss = MediaSourceStream::new(Box::new(src), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    // Gapless so encoder delay/padding is not counted as duration.
    let fmt_opts = FormatOptions {
        enable_gapless: true,
        ..Default::default()
    };
    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &fmt_opts, &MetadataOptions::default())
        .with_context(|| format!("Unrecognized audio format: {:?}", path))?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| anyhow::anyhow!("No supported audio tracks in {:?}", path))?;
    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate.unwrap_or(0);

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| anyhow::anyhow!("Unsupported codec: {}", e))?;

    let mut samples = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(e.into()),
        };
        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(e)) => {
                debug!("[PROBE] Skipping corrupt packet: {}", e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let spec = *decoded.spec();
        sample_rate = spec.rate;
        let channels = spec.channels.count().max(1);
        let mut buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
        buf.copy_interleaved_ref(decoded);
        samples.extend(
            buf.samples()
                .chunks(channels)
                .map(|frame| frame.iter().sum::<f32>() / channels as f32),
        );
    }

    debug!(
        "[PROBE] {:?}: {} samples @ {} Hz",
        path,
        samples.len(),
        sample_rate
    );
    Ok(AudioProbe {
        sample_rate,
        samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_down(sample_rate: u32, secs: f64) -> AudioProbe {
        let n = (sample_rate as f64 * secs) as usize;
        let samples = (0..n)
            .map(|i| {
                let t = i as f64 / sample_rate as f64;
                let env = 1.0 - i as f64 / n as f64;
                (env * (2.0 * std::f64::consts::PI * 220.0 * t).sin()) as f32
            })
            .collect();
        AudioProbe {
            sample_rate,
            samples,
        }
    }

    #[test]
    fn test_duration() {
        let probe = AudioProbe {
            sample_rate: 44100,
            samples: vec![0.0; 88200],
        };
        assert!((probe.duration_secs() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_rms_of_silence_and_empty_range() {
        let probe = AudioProbe {
            sample_rate: 8000,
            samples: vec![0.0; 8000],
        };
        assert_eq!(probe.rms(0.0, 1.0), 0.0);
        assert_eq!(probe.rms(0.5, 0.5), 0.0);
        assert_eq!(probe.rms(2.0, 3.0), 0.0);
    }

    #[test]
    fn test_fade_envelope_decreases_on_ramp() {
        let probe = ramp_down(44100, 1.0);
        let env = probe.fade_envelope(0.5, 5);
        assert_eq!(env.len(), 5);
        for pair in env.windows(2) {
            assert!(pair[1] < pair[0], "envelope not decreasing: {:?}", env);
        }
    }

    #[test]
    fn test_probe_reads_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 22050,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for i in 0..22050 {
            let v = ((i as f32 * 0.05).sin() * 8000.0) as i16;
            writer.write_sample(v).unwrap();
            writer.write_sample(v).unwrap();
        }
        writer.finalize().unwrap();

        let probe = probe_file(&path).unwrap();
        assert_eq!(probe.sample_rate, 22050);
        assert!((probe.duration_secs() - 1.0).abs() < 0.01);
        assert!(probe.rms(0.0, 1.0) > 0.1);
    }

    #[test]
    fn test_probe_missing_file() {
        assert!(probe_file(Path::new("/nonexistent/growl.mp3")).is_err());
    }
}
