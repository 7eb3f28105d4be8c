//! EXS24 instrument import.
//!
//! Reading the binary EXS24 format is left to an external reader; this module
//! consumes the zone, group and sample records it produces, either built in
//! code or decoded from JSON.

mod importer;
mod records;

pub use importer::{import_exs24, ImportOptions, DEFAULT_MAX_GROUP_INDEX};
pub use records::{Exs24Group, Exs24Instrument, Exs24Sample, Exs24Zone};
