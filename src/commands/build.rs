use crate::{
    Args,
    build::{BuildResult, Builder},
    config::SiteConfig,
};

/// Resolve the site config from the config file and command line flags.
///
/// Flags win over the config file, which wins over built-in defaults.
pub fn resolve_config(args: &Args) -> Result<SiteConfig, anyhow::Error> {
    let mut config = SiteConfig::load_from_arg(args.config_file.as_deref())?;

    if let Some(input) = &args.input {
        config.input = input.clone();
    }
    if let Some(output) = &args.output {
        config.output = output.clone();
    }
    if let Some(template) = &args.template {
        config.template = template.clone();
    }
    if let Some(template_dir) = &args.template_dir {
        config.template_dir = template_dir.clone();
    }
    if let Some(port) = args.port {
        config.preview.port = port;
    }
    config.preview.enabled |= args.preview;

    Ok(config)
}

pub async fn run(config: &SiteConfig) -> Result<BuildResult, anyhow::Error> {
    let builder = Builder::new(config.clone());
    let result = builder.build()?;

    let report = &result.report;
    if report.is_empty() {
        println!("No markdown documents found in {}", config.input.display());
    }
    for (source, output) in report.written() {
        tracing::debug!(
            source = %source.display(),
            output = %output.display(),
            "page written"
        );
    }
    for (source, stage, error) in report.failures() {
        eprintln!("Skipped {} ({stage}): {error}", source.display());
    }

    let display_output = result
        .output_dir
        .canonicalize()
        .unwrap_or(result.output_dir.clone());
    println!(
        "Built {} page(s) to {} ({} skipped)",
        report.written_count(),
        display_output.display(),
        report.failed_count()
    );

    Ok(result)
}
