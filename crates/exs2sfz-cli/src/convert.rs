//! Conversion commands.

use anyhow::{Context, Result};
use exs2sfz::{
    export_sfz, import_exs24, import_sfz, parse_sfz_file, ConverterConfig, Exs24Instrument,
    Import,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Convert EXS24 records to an SFZ file.
///
/// A sample directory given on the command line replaces the configured one.
pub fn convert_exs(
    config: &ConverterConfig,
    records: &Path,
    output: &Path,
    sample_directory: Option<String>,
) -> Result<()> {
    log::info!("Input:  {}", records.display());
    log::info!("Output: {}", output.display());

    let instrument = Exs24Instrument::load_json(records)
        .with_context(|| format!("Failed to read EXS24 records: {}", records.display()))?;

    let mut options = config.import_options(Some(output_dir(output)?));
    if sample_directory.is_some() {
        options.sample_path = sample_directory;
    }

    let import = import_exs24(&instrument, &options);
    write_sfz(config, import, output)
}

/// Read an SFZ file, import it and write it back out.
pub fn convert_sfz(config: &ConverterConfig, input: &Path, output: &Path) -> Result<()> {
    log::info!("Input:  {}", input.display());
    log::info!("Output: {}", output.display());

    let sfz = parse_sfz_file(input)
        .with_context(|| format!("Failed to parse SFZ file: {}", input.display()))?;
    log::info!("{}", sfz.info());

    write_sfz(config, import_sfz(&sfz), output)
}

/// The effective settings as TOML text.
pub fn render_config(config: &ConverterConfig) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize config")
}

fn write_sfz(config: &ConverterConfig, import: Import, output: &Path) -> Result<()> {
    for diagnostic in &import.diagnostics {
        log::warn!("{}", diagnostic);
    }

    let text = export_sfz(&import.tree, &config.export_options());
    fs::write(output, text)
        .with_context(|| format!("Failed to write SFZ file: {}", output.display()))?;

    log::info!("Wrote {} ({})", output.display(), import.tree.info());
    Ok(())
}

/// Absolute directory the output file will be written to.
fn output_dir(output: &Path) -> Result<PathBuf> {
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let absolute = std::path::absolute(dir)
        .with_context(|| format!("Could not resolve output directory: {}", dir.display()))?;
    Ok(absolute)
}
