//! Bobber Sentinel - auto fishing bot
//!
//! Casts, watches the bobber until it dips, clicks it, and repeats.
//! Stop it by closing the process.

use anyhow::{Context, Result};

use bobber_sentinel::screen_reader::{DebugOverlay, Detector, TracingOverlay};
use bobber_sentinel::utils::path::{get_data_dir, get_log_dir, get_settings_path};
use bobber_sentinel::{CycleConfig, EnigoInjector, FishingBot, ScreenService, Settings, SystemClock};

/// Log filter configuration:
/// - Sets default level to 'info'
/// - Keeps this crate at 'info' unless RUST_LOG says otherwise
const LOG_FILTER: &str = "info,bobber_sentinel=info";

fn init_logging() {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let log_dir = get_log_dir();
    let _ = std::fs::create_dir_all(&log_dir);
    let log_file_path = log_dir.join("debug.log");
    let file_result = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(LOG_FILTER));

    match file_result {
        Ok(file) => {
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .with_span_events(FmtSpan::CLOSE);

            let stdout_layer = tracing_subscriber::fmt::layer().with_span_events(FmtSpan::CLOSE);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(file_layer)
                .with(stdout_layer)
                .init();

            tracing::info!("[INIT] Logging initialized, file: {:?}", log_file_path);
        }
        Err(e) => {
            // Fallback: stdout-only logging with same filter
            tracing_subscriber::fmt().with_env_filter(env_filter).init();
            eprintln!(
                "[INIT] Failed to create debug log file at {:?}: {}",
                log_file_path, e
            );
        }
    }
}

fn load_settings() -> Result<Settings> {
    let path = get_settings_path();
    let settings = Settings::load(&path)?;
    settings
        .validate()
        .with_context(|| format!("invalid settings in {:?}", path))?;
    Ok(settings)
}

#[cfg(feature = "vision")]
fn build_detector(settings: &Settings) -> Result<Box<dyn Detector>> {
    let path = settings.resolved_template_path();
    let detector = bobber_sentinel::screen_reader::TemplateDetector::new(&path, settings.match_threshold)
        .context("failed to load bobber template")?;
    Ok(Box::new(detector))
}

#[cfg(not(feature = "vision"))]
fn build_detector(_settings: &Settings) -> Result<Box<dyn Detector>> {
    anyhow::bail!("built without the `vision` feature; no bobber detector available")
}

fn build_overlay(settings: &Settings) -> Box<dyn DebugOverlay> {
    #[cfg(feature = "vision")]
    if settings.show_overlay {
        return Box::new(bobber_sentinel::screen_reader::OpenCvOverlay::new());
    }

    #[cfg(not(feature = "vision"))]
    if settings.show_overlay {
        tracing::warn!("[INIT] show_overlay needs the `vision` feature; logging frames instead");
    }

    Box::new(TracingOverlay::new())
}

fn run() -> Result<()> {
    let settings = load_settings()?;
    tracing::info!("[INIT] Data dir: {:?}", get_data_dir());
    let evaluator = settings.motion_evaluator();
    tracing::info!(
        "[INIT] Target window '{}', cast key '{}', bite at >{}x mean after {} samples",
        settings.window_title,
        settings.cast_key,
        evaluator.threshold_multiplier(),
        evaluator.min_samples()
    );

    let frames = ScreenService::new(
        settings.window_title.clone(),
        settings.window_lookup_retries,
        settings.window_lookup_delay(),
    );
    let detector = build_detector(&settings)?;
    let input = EnigoInjector::new(settings.key_hold()).context("failed to set up input")?;
    let overlay = build_overlay(&settings);

    let mut bot = FishingBot::new(
        frames,
        detector,
        input,
        overlay,
        SystemClock,
        CycleConfig::from(&settings),
        evaluator,
    );

    let result = bot.run(None);
    tracing::info!("[STATS] {}", bot.stats().to_json());
    result.context("fishing stopped")?;
    Ok(())
}

fn main() {
    init_logging();

    println!("Bobber Sentinel {}", env!("CARGO_PKG_VERSION"));
    println!("================================");

    if let Err(e) = run() {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}
