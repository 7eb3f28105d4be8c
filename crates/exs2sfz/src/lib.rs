//! Sampler instrument conversion for EXS24 and SFZ.
//!
//! This crate converts instruments through a DecentSampler-shaped preset tree:
//! - EXS24 zone/group/sample records are imported into a tree
//! - SFZ text is parsed and imported into a tree
//! - Any tree is exported as SFZ text
//!
//! # Architecture
//!
//! Importers and the exporter never fail. Problems inside an instrument are
//! skipped and returned as [`Diagnostic`]s next to the tree; only reading
//! files and decoding inputs produce an [`Error`].
//!
//! # Example
//!
//! ```
//! use exs2sfz::{export_sfz, import_sfz, parse_sfz_str, ExportOptions};
//!
//! let sfz = parse_sfz_str("<group> group_label=Keys\n<region> sample=C4.wav key=60\n")?;
//! let import = import_sfz(&sfz);
//! assert!(import.is_clean());
//!
//! let text = export_sfz(&import.tree, &ExportOptions::default());
//! assert!(text.contains("<region>sample=C4.wav pitch_keycenter=60 lokey=60 hikey=60 "));
//! # Ok::<(), exs2sfz::Error>(())
//! ```

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod exs24;
pub mod parser;
pub mod path_utils;
pub mod properties;
pub mod sfz;
pub mod tree;
pub mod units;

pub use config::ConverterConfig;
pub use diagnostics::{Diagnostic, HeaderLevel, Import};
pub use error::{Error, Result};
pub use exs24::{import_exs24, Exs24Group, Exs24Instrument, Exs24Sample, Exs24Zone, ImportOptions};
pub use parser::{parse_sfz_file, parse_sfz_str, SfzFile};
pub use sfz::{export_sfz, import_sfz, ExportOptions};
pub use tree::{NodeKind, PresetNode, PresetTree, PropertyValue};
