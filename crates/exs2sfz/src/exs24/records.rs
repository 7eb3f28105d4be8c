//! EXS24 records as produced by an EXS24 file reader.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One key/velocity mapping of a sample into a group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Exs24Zone {
    pub name: String,
    /// Index into the group list; `-1` means the zone has no group.
    pub group_index: i32,
    /// Index into the sample list.
    pub sample_index: i32,
    /// Root key.
    pub key: i32,
    pub key_low: i32,
    pub key_high: i32,
    /// Whether the sample follows the played key.
    pub pitch: bool,
    pub velocity_range_on: bool,
    pub lo_vel: i32,
    pub hi_vel: i32,
    /// Semitones.
    pub coarse_tuning: i32,
    /// Cents.
    pub fine_tuning: i32,
    pub pan: i32,
    /// Decibels.
    pub volume: i32,
    pub sample_start: i64,
    /// One past the last played frame; `0` means the end of the file.
    pub sample_end: i64,
    pub loop_enabled: bool,
    pub loop_start: i64,
    /// One past the last looped frame.
    pub loop_end: i64,
    pub loop_crossfade: i64,
    pub loop_equal_power: bool,
}

impl Default for Exs24Zone {
    fn default() -> Self {
        Self {
            name: String::new(),
            group_index: -1,
            sample_index: 0,
            key: 60,
            key_low: 0,
            key_high: 127,
            pitch: true,
            velocity_range_on: false,
            lo_vel: 0,
            hi_vel: 127,
            coarse_tuning: 0,
            fine_tuning: 0,
            pan: 0,
            volume: 0,
            sample_start: 0,
            sample_end: 0,
            loop_enabled: false,
            loop_start: 0,
            loop_end: 0,
            loop_crossfade: 0,
            loop_equal_power: false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Exs24Group {
    pub name: String,
    pub pan: i32,
    /// Decibels.
    pub volume: i32,
    /// Round-robin position; `0` when the group is not part of a sequence.
    pub seq_number: i32,
}

impl Exs24Group {
    /// Stand-in for a group a zone refers to but the file does not define.
    pub fn placeholder(index: i32) -> Self {
        Self {
            name: format!("Couldn't find group index {}", index),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Exs24Sample {
    pub file_name: String,
    /// Directory the sample was recorded at when the EXS24 file was saved.
    pub file_path: String,
}

/// Everything an EXS24 file describes that the converter uses.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Exs24Instrument {
    pub zones: Vec<Exs24Zone>,
    pub groups: Vec<Exs24Group>,
    pub samples: Vec<Exs24Sample>,
}

impl Exs24Instrument {
    /// Decode records from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load records from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Get a human-readable info string.
    pub fn info(&self) -> String {
        format!(
            "EXS24: {} zones, {} groups, {} samples",
            self.zones.len(),
            self.groups.len(),
            self.samples.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let instrument = Exs24Instrument::from_json_str(
            r#"{
                "zones": [{ "name": "C4", "group_index": 0, "key": 48 }],
                "groups": [{ "name": "Main", "seq_number": 1 }],
                "samples": [{ "file_name": "C4.aif", "file_path": "/Samples" }]
            }"#,
        )
        .unwrap();

        let zone = &instrument.zones[0];
        assert_eq!(zone.key, 48);
        assert!(zone.pitch);
        assert_eq!(zone.key_high, 127);
        assert_eq!(instrument.groups[0].seq_number, 1);
        assert_eq!(instrument.info(), "EXS24: 1 zones, 1 groups, 1 samples");
    }

    #[test]
    fn test_malformed_json() {
        let err = Exs24Instrument::from_json_str("{ zones: ").unwrap_err();
        assert!(matches!(err, Error::Records(_)));
    }

    #[test]
    fn test_placeholder_group() {
        let group = Exs24Group::placeholder(3);
        assert_eq!(group.name, "Couldn't find group index 3");
        assert_eq!(group.seq_number, 0);
    }
}
