//! figma-svg-dl - command-line entry point

mod cli;

use clap::Parser;
use cli::Cli;
use figma_svg_dl::{Event, export_components};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let quiet = cli.quiet;
    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => return fail(&e),
    };
    let output_dir = config.output_dir.clone();

    let progress = move |event: &Event| {
        if quiet {
            return;
        }
        match event {
            Event::Downloaded {
                path,
                completed,
                total,
            } => eprintln!("Downloaded {completed} of {total}: {}", path.display()),
            Event::Optimized {
                path,
                completed,
                total,
            } => eprintln!("Optimized {completed} of {total}: {}", path.display()),
        }
    };

    match export_components(config, Some(&progress)).await {
        Ok(summary) if summary.is_empty() => {
            if !quiet {
                println!("No exportable components found");
            }
            ExitCode::SUCCESS
        }
        Ok(summary) => {
            if !quiet {
                println!(
                    "Exported {} components to {}",
                    summary.written.len(),
                    output_dir.display()
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

fn fail(error: &figma_svg_dl::Error) -> ExitCode {
    tracing::debug!(code = error.error_code(), "export failed");
    eprintln!("error: {error}");
    ExitCode::from(u8::try_from(error.exit_code()).unwrap_or(1))
}
