use anyhow::{Context, Result};
use clap::Parser;
use palletqr::cli::Cli;
use palletqr::{BatchGenerator, Error, GenerationRequest};

fn main() -> Result<()> {
    // Logs go to stderr; stdout is reserved for the summary and previews.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let request = match GenerationRequest::resolve(&cli) {
        Ok(request) => request,
        Err(err @ Error::MissingArguments(_)) => Cli::missing_arguments_error(err).exit(),
        Err(err) => return Err(err).context("failed to resolve generation request"),
    };

    let summary = BatchGenerator::new()
        .with_preview(cli.preview)
        .run(&request)
        .with_context(|| format!("failed to generate QR codes in {}", request.outdir.display()))?;

    println!("{}", summary.report()?);

    Ok(())
}
