use anyhow::Result;
use clap::Parser;
use labelcheck::config::{self, Profile};
use labelcheck::verify::Verifier;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "labelcheck")]
#[command(about = "GitHub label standardization compliance checker", long_about = None)]
#[command(version)]
struct Cli {
    /// Run the reduced check set with heuristic table parsing
    #[arg(long)]
    quick: bool,

    /// Path to a TOML file overriding the built-in configuration
    /// (default: labelcheck.toml in the working directory, if present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let profile = if cli.quick {
        Profile::Quick
    } else {
        Profile::Full
    };
    let config = config::load(profile, cli.config.as_deref())?;

    let mut verifier = Verifier::new(config, profile);
    if !verifier.run() {
        std::process::exit(1);
    }
    Ok(())
}
