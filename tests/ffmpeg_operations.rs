use growl_sfx::config::VoiceConfig;
use growl_sfx::pipeline::DURATION_TOLERANCE_SECS;
use growl_sfx::probe::probe_file;
use growl_sfx::stages::{apply_fx, finalize, measure_peak};
use std::path::Path;
use std::process::Command;

/// ffmpeg on PATH with an mp3 encoder; otherwise these tests are skipped.
fn ffmpeg_with_mp3() -> bool {
    match Command::new("ffmpeg").args(["-hide_banner", "-encoders"]).output() {
        Ok(out) if out.status.success() => {
            let text = String::from_utf8_lossy(&out.stdout);
            if text.contains("libmp3lame") {
                true
            } else {
                eprintln!("ffmpeg has no libmp3lame encoder; skipping");
                false
            }
        }
        _ => {
            eprintln!("ffmpeg not found; skipping");
            false
        }
    }
}

/// Write a mono 16-bit sine to `path`.
fn write_tone(path: &Path, secs: f64) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 44100,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    let n = (44100.0 * secs) as usize;
    for i in 0..n {
        let t = i as f64 / 44100.0;
        let v = (2.0 * std::f64::consts::PI * 160.0 * t).sin() * 12000.0;
        writer.write_sample(v as i16).unwrap();
    }
    writer.finalize().unwrap();
}

fn config_in(dir: &Path) -> VoiceConfig {
    VoiceConfig {
        out_dir: dir.to_path_buf(),
        ..VoiceConfig::default()
    }
}

#[tokio::test]
async fn test_short_take_is_padded_to_target() {
    if !ffmpeg_with_mp3() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_in(dir.path());
    let paths = cfg.paths();
    let take = dir.path().join("take.wav");
    write_tone(&take, 1.0);

    apply_fx(&cfg, &take, &paths.fx).await.expect("fx stage failed");
    assert!(paths.fx.exists());

    finalize(&cfg, &paths.fx, &paths.final_out)
        .await
        .expect("finalize stage failed");

    let probe = probe_file(&paths.final_out).expect("final file should decode");
    let duration = probe.duration_secs();
    assert!(
        (duration - 2.0).abs() <= DURATION_TOLERANCE_SECS,
        "Duration should be 2.0s +/- {}s, got {}",
        DURATION_TOLERANCE_SECS,
        duration
    );
    // The take ends around 1s; the rest is padding.
    assert!(probe.rms(0.2, 0.8) > 0.01);
    assert!(probe.rms(1.3, 1.7) < 0.01, "padding should be silent");
}

#[tokio::test]
async fn test_long_take_is_trimmed_and_faded() {
    if !ffmpeg_with_mp3() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_in(dir.path());
    let paths = cfg.paths();
    let take = dir.path().join("take.wav");
    write_tone(&take, 3.0);

    apply_fx(&cfg, &take, &paths.fx).await.unwrap();
    finalize(&cfg, &paths.fx, &paths.final_out).await.unwrap();

    let probe = probe_file(&paths.final_out).unwrap();
    let duration = probe.duration_secs();
    assert!(
        (duration - 2.0).abs() <= DURATION_TOLERANCE_SECS,
        "got {}s",
        duration
    );

    let before_fade = probe.rms(1.45, 1.75);
    // One window per tremolo period (18 Hz) so the flutter averages out.
    let envelope = probe.fade_envelope(cfg.fade_secs, 4);
    assert!(before_fade > 0.05, "expected signal before fade, got {}", before_fade);
    for pair in envelope.windows(2) {
        assert!(pair[1] < pair[0], "fade not decreasing: {:?}", envelope);
    }
    assert!(envelope[3] < before_fade * 0.5);
}

#[tokio::test]
async fn test_peak_is_measured_on_final_file() {
    if !ffmpeg_with_mp3() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_in(dir.path());
    let paths = cfg.paths();
    let take = dir.path().join("take.wav");
    write_tone(&take, 1.5);

    apply_fx(&cfg, &take, &paths.fx).await.unwrap();
    finalize(&cfg, &paths.fx, &paths.final_out).await.unwrap();

    let peak = measure_peak(&cfg, &paths.final_out).await.unwrap();
    let peak = peak.expect("volumedetect should report max_volume");
    // alimiter caps at 0.92 (about -0.7 dBFS) before mp3 encoding.
    assert!(peak < 1.0, "peak too hot: {}", peak);
    assert!(peak > -30.0, "peak suspiciously quiet: {}", peak);
}

#[tokio::test]
async fn test_fx_on_missing_input_fails_with_output() {
    if !ffmpeg_with_mp3() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_in(dir.path());
    let paths = cfg.paths();

    let err = apply_fx(&cfg, &dir.path().join("nope.mp3"), &paths.fx)
        .await
        .unwrap_err();
    let output = err.captured_output().expect("ffmpeg output should be captured");
    assert!(output.contains("nope.mp3"));
    assert!(!paths.fx.exists());
}
