//! Binary entry point for `howdy-hub-bot`.
//!
//! This module provides the command-line interface for howdy-hub-bot with options
//! for a local configuration file and logging verbosity. It is also the single place
//! where a failed run is reported back to the workflow.

use std::process::ExitCode;

use clap::Parser;
use howdy_hub_bot::base::{actions, config::Config, types::Void};
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::{Protocol, WithExportConfig};
use tracing::error;
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt};

/// Howdy-hub-bot – welcomes, labels, assigns and auto-closes issues and pull requests.
///
/// Inside a workflow, inputs come from `INPUT_*` variables and the triggering event from
/// the `GITHUB_*` runner context. Outside one, the same keys can be given in a TOML file.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Read configuration from a TOML file as well (optional).
    ///
    /// Keys match the environment names in lowercase, e.g. `repo_token`,
    /// `github_event_name`, `github_event_path`, `github_repository`.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
    /// Increase log verbosity (-v, -vv, etc.).
    ///
    /// Use multiple times to increase verbosity:
    /// - No flag: INFO level
    /// - -v: DEBUG level
    /// - -vv or more: TRACE level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Main entry point for the howdy-hub-bot binary.
///
/// Any error from setup or handling is reported once, as a failed step.
#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Run failed: {err:#}");
            actions::set_failed(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Void {
    init_tracing(args.verbose)?;

    let config = Config::load(args.config.as_deref())?;

    howdy_hub_bot::start(config).await
}

/// Sets up logging based on verbosity, with OTLP export when an endpoint is configured.
fn init_tracing(verbose: u8) -> Void {
    // Construct the level filter.

    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let level_filter = tracing_subscriber::filter::LevelFilter::from_level(level);

    // Prepare the log layer.

    let stdout = tracing_subscriber::fmt::layer()
        .without_time()
        .with_ansi(true)
        .with_level(true)
        .with_file(false)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::NONE);

    // Prepare the otlp layer; runners rarely have a collector, so only when asked for.

    let otel = if std::env::var_os("OTEL_EXPORTER_OTLP_ENDPOINT").is_some() {
        let exporter = opentelemetry_otlp::SpanExporter::builder().with_http().with_protocol(Protocol::HttpBinary).build()?;
        let tracer = opentelemetry_sdk::trace::SdkTracerProvider::builder().with_simple_exporter(exporter).build().tracer("howdy-hub-bot");

        Some(tracing_opentelemetry::layer().with_tracer(tracer))
    } else {
        None
    };

    tracing_subscriber::registry().with(otel).with(level_filter).with(stdout).init();

    Ok(())
}
