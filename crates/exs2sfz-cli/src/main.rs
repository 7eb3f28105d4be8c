//! exs2sfz CLI - The `exs2sfz` command.
//!
//! Converts EXS24 instrument records and SFZ files into SFZ text.
//!
//! # Architecture
//!
//! The binary only reads inputs, writes outputs and reports. All translation
//! happens in the **exs2sfz** library crate.

mod convert;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use exs2sfz::ConverterConfig;
use std::path::PathBuf;

/// exs2sfz - Sampler Instrument Converter
#[derive(Parser, Debug)]
#[command(name = "exs2sfz")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert EXS24 and SFZ instruments to SFZ", long_about = None)]
struct Args {
    /// TOML file with converter settings
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert EXS24 records (JSON) to SFZ
    Exs {
        /// JSON file with the zone, group and sample records
        #[arg(value_name = "RECORDS")]
        records: PathBuf,

        /// SFZ file to write
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Directory written in front of every sample file name
        #[arg(value_name = "SAMPLE_DIR")]
        sample_directory: Option<String>,
    },

    /// Read an SFZ file and write it back in normalized form
    Sfz {
        /// SFZ file to read
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// SFZ file to write
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },

    /// Print the effective settings as TOML
    Config,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let config = match &args.config {
        Some(path) => ConverterConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => ConverterConfig::default(),
    };

    match args.command {
        Commands::Exs {
            records,
            output,
            sample_directory,
        } => convert::convert_exs(&config, &records, &output, sample_directory),
        Commands::Sfz { input, output } => convert::convert_sfz(&config, &input, &output),
        Commands::Config => {
            print!("{}", convert::render_config(&config)?);
            Ok(())
        }
    }
}
