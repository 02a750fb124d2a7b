//! # floorplan-render
//!
//! Renders a floor plan layout file to a PNG or JPEG snapshot.

use clap::Parser;
use plan_cli::{CliArgs, RenderJob};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured tracing with optional JSON format.
///
/// Set `RUST_LOG` to control log levels (default: info,plan_renderer=debug).
/// Set `RUST_LOG_FORMAT=json` for JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,plan_renderer=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let print_report = args.report;
    let job = RenderJob::from(args);

    tracing::debug!(
        "Surface {}x{} @{}x, format {}",
        job.width,
        job.height,
        job.device_pixel_ratio,
        job.format.mime_type()
    );

    let summary = plan_cli::run(&job)?;
    if print_report {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}
