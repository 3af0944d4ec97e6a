//! Voice-driven motion commands
//!
//! Speech → ASR → command grammar → slot-filling dialogue → confirmation → simulated
//! motion. The accumulated command log is printed when the user says "exit".

use anyhow::{bail, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use intent_parser::init as init_intent_parser;
use voice_dialogue::{DialogueConfig, Listener, Prompter, Session};
use voice_local::plugin::{new_asr_backend, new_capture_backend, new_tts_backend};
use voice_local::plugin::{AsrBackendKind, CaptureKind};
use voice_local::{AsrStreamConfig, TtsConfig};

#[derive(Parser)]
#[command(name = "voice-drive")]
#[command(about = "Drive a simulated robot with spoken commands")]
struct Args {
    /// Speech recognizer: console (typed lines), script, vosk, whisper_cpp
    #[arg(long, default_value = "console")]
    asr: AsrBackendKind,

    /// Audio capture: silent or mic
    #[arg(long, default_value = "silent")]
    capture: CaptureKind,

    /// Utterances for the script recognizer, separated by ';'
    #[arg(long)]
    script: Option<String>,

    /// JSON config file (created with defaults if missing)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seconds recorded per utterance
    #[arg(long)]
    capture_seconds: Option<u64>,

    /// Give up on a question after this many answers
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Keep the latest recording as a WAV file
    #[cfg(feature = "audio")]
    #[arg(long)]
    save_audio: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();

    let args = Args::parse();
    let config = load_config(&args)?;

    if args.dump_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    info!("🎤 Starting voice-drive");
    init_intent_parser();

    let script = args.script.as_deref().map(split_script).unwrap_or_default();
    if args.asr == AsrBackendKind::Script && script.is_empty() {
        bail!("--asr script needs --script \"utterance; utterance; ...\"");
    }

    let asr = new_asr_backend(
        args.asr,
        AsrStreamConfig {
            language: Some("en".to_string()),
            sample_rate_hz: config.sample_rate_hz,
        },
        script,
    )?;
    let capture = new_capture_backend(args.capture, config.sample_rate_hz)?;
    let tts = new_tts_backend(TtsConfig {
        voice: None,
        rate_wpm: config.tts_rate_wpm,
    });

    let listener = Listener::new(capture, asr, Duration::from_secs(config.capture_seconds));
    #[cfg(feature = "audio")]
    let listener = match &args.save_audio {
        Some(path) => listener.with_audio_dump(path),
        None => listener,
    };

    let prompter = Prompter::new(tts, listener)?;
    let session = Session::new(config, prompter)?;
    let log = session.run().await?;

    let mut stdout = io::stdout().lock();
    log.write_summary(&mut stdout)?;
    stdout.flush()?;

    info!(entries = log.len(), "✅ session finished");
    Ok(())
}

fn load_config(args: &Args) -> Result<DialogueConfig> {
    let mut config = match &args.config {
        Some(path) => DialogueConfig::load(path)?,
        None => DialogueConfig::default(),
    };
    if let Some(secs) = args.capture_seconds {
        config.capture_seconds = secs;
    }
    if let Some(max) = args.max_attempts {
        config.max_attempts = Some(max);
    }
    config.validate()?;
    Ok(config)
}

fn split_script(script: &str) -> Vec<String> {
    script.split(';').map(|s| s.trim().to_string()).collect()
}

fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_script_keeps_silence() {
        assert_eq!(
            split_script("move back; fifty ;;exit"),
            vec!["move back", "fifty", "", "exit"]
        );
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from([
            "voice-drive",
            "--asr",
            "script",
            "--script",
            "exit",
            "--max-attempts",
            "3",
        ]);
        assert_eq!(args.asr, AsrBackendKind::Script);
        assert_eq!(args.capture, CaptureKind::Silent);
        let config = load_config(&args).unwrap();
        assert_eq!(config.max_attempts, Some(3));
    }
}
