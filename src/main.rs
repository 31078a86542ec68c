use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod build;
mod commands;
mod config;

/// Build static HTML pages from a directory of markdown documents
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Input directory containing markdown files [default: input]
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output directory for generated HTML files [default: output]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Template file to use for HTML generation [default: base.html]
    #[arg(short, long)]
    template: Option<String>,

    /// Directory templates are loaded from [default: templates]
    #[arg(long)]
    template_dir: Option<PathBuf>,

    /// Serve the output directory for live preview after building
    #[arg(short, long, default_value = "false")]
    preview: bool,

    /// Port for the preview server [default: 8000]
    #[arg(long)]
    port: Option<u16>,

    /// The path to the configuration file [default: quire.yaml, if present]
    #[arg(short, long = "config")]
    config_file: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    init_tracing();
    let args = Args::parse();

    let config = commands::build::resolve_config(&args)?;
    let result = commands::build::run(&config).await?;

    if config.preview.enabled {
        commands::serve::run(&result.output_dir, config.preview.port).await?;
    }

    Ok(())
}
