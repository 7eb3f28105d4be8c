//! Converter settings file
//!
//! Settings are stored in TOML format; every key is optional:
//!
//! ```toml
//! # Directory written in front of every sample file name
//! sample_path = "Samples"
//!
//! # First line of every exported SFZ file
//! header_comment = "// SFZ file created with exs2sfz"
//!
//! # Zones with a higher group index are skipped
//! max_group_index = 100
//! ```

use crate::error::{Error, Result};
use crate::exs24::{ImportOptions, DEFAULT_MAX_GROUP_INDEX};
use crate::sfz::{ExportOptions, DEFAULT_HEADER_COMMENT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Base directory for sample paths (optional)
    pub sample_path: Option<String>,
    /// Comment line written at the top of exported SFZ files
    pub header_comment: String,
    /// Highest group index accepted from EXS24 zones
    pub max_group_index: i32,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            sample_path: None,
            header_comment: DEFAULT_HEADER_COMMENT.to_string(),
            max_group_index: DEFAULT_MAX_GROUP_INDEX,
        }
    }
}

impl ConverterConfig {
    /// Decode settings from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Options for [`import_exs24`](crate::import_exs24) writing next to `output_dir`
    pub fn import_options(&self, output_dir: Option<PathBuf>) -> ImportOptions {
        ImportOptions {
            sample_path: self.sample_path.clone(),
            output_dir,
            max_group_index: self.max_group_index,
        }
    }

    /// Options for [`export_sfz`](crate::export_sfz)
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            header_comment: self.header_comment.clone(),
        }
    }
}
