//! SFZ text reader.
//!
//! Reads SFZ source into the global/group/region hierarchy that the SFZ
//! importer translates.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

mod parse;
mod types;

pub use types::{SfzFile, SfzGroup, SfzSection, SfzSectionType};

/// Parse an SFZ file from a string
pub fn parse_sfz_str(content: &str) -> Result<SfzFile> {
    parse::parse_sfz(content)
}

/// Parse an SFZ file from a file path
pub fn parse_sfz_file<P: AsRef<Path>>(path: P) -> Result<SfzFile> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    let mut sfz = parse_sfz_str(&content)?;

    let absolute_path = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    sfz.source_file = Some(absolute_path);
    Ok(sfz)
}
