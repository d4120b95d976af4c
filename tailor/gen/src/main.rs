//! Tailor Code Generator
//!
//! Generates Go `Publicize` methods from tailor designs.

use std::path::Path;

use clap::Parser;
use colored::Colorize;
use tailor_definitions::define_cellar;
use tailor_gen::errors::GeneratorError;
use tailor_gen::output::{OUTPUT_FILE, generate_and_write, publicizable_types};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Tailor code generator - turns designs into Go publicize code
#[derive(Parser, Debug)]
#[command(name = "tailor-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Design to generate code for (e.g., "cellar")
    #[arg(short, long)]
    design: String,

    /// Output directory for generated code
    #[arg(short, long, default_value = "gen/app")]
    output: String,

    /// Go package name of the generated file
    #[arg(short, long, default_value = "app")]
    package: String,

    /// Print generated code without writing files
    #[arg(long)]
    dry_run: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Initialize tracing from RUST_LOG, or from the verbosity flags when unset.
fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,tailor_gen=info,tailor_define=info".to_string(),
            2 => "info,tailor_gen=debug,tailor_define=debug".to_string(),
            _ => "debug,tailor_gen=trace,tailor_define=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_file(verbose >= 3)
                .with_line_number(verbose >= 3)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<(), GeneratorError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    tracing::info!(design = %cli.design, output = %cli.output, dry_run = cli.dry_run, "tailor-gen starting");

    let root = match cli.design.as_str() {
        "cellar" => define_cellar()?,
        other => {
            return Err(GeneratorError::ConfigError(format!(
                "Unknown design: '{}'. Available designs: cellar",
                other
            )));
        }
    };

    let types = publicizable_types(&root.types);
    tracing::debug!(types = types.len(), resources = root.resources.len(), "design evaluated");

    let output_dir = Path::new(&cli.output);
    generate_and_write(&root, &cli.package, output_dir, cli.dry_run)?;

    if !cli.dry_run {
        eprintln!(
            "{} generated {} publicize methods in {}",
            "✓".green().bold(),
            types.len(),
            output_dir.join(OUTPUT_FILE).display()
        );
    }

    Ok(())
}
