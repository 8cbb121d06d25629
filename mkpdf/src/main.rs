//! Create a PDF and store it in the file given on the command line.

mod config;
mod scene;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{CliArgs, RenderConfig};

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    let config = RenderConfig::try_from(args)?;
    let bytes = scene::write_file(&config)?;
    info!(
        path = %config.output.display(),
        bytes,
        ellipses = config.ellipse_count,
        "pdf written"
    );
    Ok(())
}
