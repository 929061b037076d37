//! defgen - Generate the L-SMASH module-definition file
//!
//! This tool scans `lsmash.h` for exported functions and codec-type
//! constants and writes `lsmash.def` next to it for the Windows DLL build.

use anyhow::{bail, Context, Result};
use clap::Parser;
use defgen_core::generate::{DEFAULT_DEF_NAME, DEFAULT_HEADER_NAME};
use defgen_core::{Generator, GeneratorConfig};
use std::path::{Path, PathBuf};
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

/// Generate lsmash.def from lsmash.h
#[derive(Parser, Debug)]
#[command(name = "defgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Directory containing the header; the definition file is written here too
    directory: PathBuf,

    /// Header file name inside the directory
    #[arg(long = "header", default_value = DEFAULT_HEADER_NAME)]
    header_name: String,

    /// Definition file name inside the directory
    #[arg(long = "output", default_value = DEFAULT_DEF_NAME)]
    def_name: String,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig::new()
            .header_name(&self.header_name)
            .def_name(&self.def_name)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    check_directory(&cli.directory)?;

    let generator = Generator::with_config(cli.generator_config());
    debug!("Using {:?}", generator.config());

    let report = generator.run_in_dir(&cli.directory).with_context(|| {
        format!(
            "Failed to generate {} in {}",
            cli.def_name,
            cli.directory.display()
        )
    })?;

    info!(
        "Summary: {} functions, {} codec types, {} static symbols written to {}",
        report.stats.function_count,
        report.stats.codec_type_count,
        report.stats.static_count,
        report.def_path.display()
    );

    Ok(())
}

fn check_directory(directory: &Path) -> Result<()> {
    if !directory.exists() {
        bail!("Directory does not exist: {}", directory.display());
    }
    if !directory.is_dir() {
        bail!("Path is not a directory: {}", directory.display());
    }
    Ok(())
}
