use aimtp::cli::{Cli, OutputFormat};
use aimtp::{AimCalculator, AimConfig, MovementInput};
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = match &args.config {
        Some(path) => AimConfig::from_file(path)?,
        None => AimConfig::default(),
    };
    let calculator = AimCalculator::new(config)?;

    let input = MovementInput::from_file(&args.input)?;
    tracing::debug!(
        movements = input.movements.len(),
        clock_rate = input.clock_rate,
        "loaded movement input"
    );

    let attributes = calculator
        .calculate_from(&input.movements, &input.tap_strain, input.clock_rate)
        .context("Aim attribute calculation failed")?;

    if let Some(path) = &args.graph_output {
        std::fs::write(path, &attributes.graph_text)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    match args.format {
        OutputFormat::Text => print!("{}", attributes.to_report_string()),
        OutputFormat::Json => println!("{}", attributes.to_json()?),
    }

    Ok(())
}
