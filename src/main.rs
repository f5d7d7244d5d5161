// SYNOID Growl SFX - Main Entry Point
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use anyhow::Context;
use clap::Parser;
use dotenv::dotenv;
use growl_sfx::config::VoiceConfig;
use growl_sfx::process::Echo;
use growl_sfx::{health, pipeline};
use std::path::PathBuf;
use tracing::{info, warn};

/// Render the monster "LO...GAN!" voice effect.
///
/// With no arguments, renders the tuned default to public/sfx/voice_logan.mp3.
#[derive(Parser)]
#[command(name = "growl-sfx")]
#[command(about = "Monster voice SFX renderer (edge-tts + ffmpeg)", long_about = None)]
struct Cli {
    /// JSON preset overriding the built-in parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Final clip length in seconds
    #[arg(long)]
    target_secs: Option<f64>,

    /// Tail fade-out length in seconds
    #[arg(long)]
    fade_secs: Option<f64>,

    /// Kill any external tool running longer than this
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Decode the result and log its measured duration
    #[arg(long)]
    verify: bool,

    /// Print the render report as JSON
    #[arg(long)]
    json: bool,

    /// Only check that ffmpeg and edge-tts can be launched
    #[arg(long)]
    check: bool,
}

fn build_config(args: &Cli) -> anyhow::Result<VoiceConfig> {
    let mut cfg = match &args.config {
        Some(path) => VoiceConfig::from_preset(path)?,
        None => VoiceConfig::default(),
    };
    cfg.apply_env();

    if let Some(dir) = &args.out_dir {
        cfg.out_dir = dir.clone();
    }
    if let Some(secs) = args.target_secs {
        cfg.target_secs = secs;
    }
    if let Some(secs) = args.fade_secs {
        cfg.fade_secs = secs;
    }
    if args.timeout_secs.is_some() {
        cfg.timeout_secs = args.timeout_secs;
    }
    if args.json {
        // stdout carries only the report
        cfg.echo = Echo::Stderr;
    }
    cfg.validate()?;
    Ok(cfg)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info,symphonia=error");
    }
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    let cfg = build_config(&args).context("Invalid configuration")?;

    let missing = health::check_dependencies(&cfg).await;
    if args.check {
        if missing.is_empty() {
            println!("✅ All external tools available");
            return Ok(());
        }
        anyhow::bail!("Missing external tools: {}", missing.join(", "));
    }
    if !missing.is_empty() {
        warn!("⚠️ Could not launch: {:?}. The render will probably fail.", missing);
    }

    info!("--- GROWL SFX: {} -> {:?} ---", cfg.voice, cfg.paths().final_out);

    let mut report = pipeline::render(&cfg).await.context("Render failed")?;

    if args.verify {
        pipeline::verify_output(&mut report).context("Failed to verify rendered output")?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.summary());
    }
    Ok(())
}
