//! SFZ ↔ preset tree translation.

mod export;
mod import;
pub mod opcodes;

pub use export::{export_sfz, ExportOptions, DEFAULT_HEADER_COMMENT, EMPTY_INSTRUMENT_COMMENT};
pub use import::import_sfz;
