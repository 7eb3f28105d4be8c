//! Non-fatal findings reported while importing an instrument.

use crate::tree::PresetTree;
use std::fmt;
use thiserror::Error;

/// Scope an SFZ opcode or preset property applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeaderLevel {
    Global,
    Group,
    Region,
}

impl HeaderLevel {
    /// The SFZ header this level is written under when named in messages.
    pub fn header_str(&self) -> &'static str {
        match self {
            Self::Global => "<global>",
            Self::Group => "<group>",
            Self::Region => "<region>",
        }
    }
}

impl fmt::Display for HeaderLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header_str())
    }
}

/// Something in the source instrument that was skipped during import.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum Diagnostic {
    /// A zone referenced a group index beyond the supported range.
    #[error("zone {zone} has group index {index}, which is beyond the supported range; zone skipped")]
    GroupIndexOutOfRange { zone: usize, index: i32 },

    /// An SFZ opcode with no preset tree equivalent.
    #[error("{level} opcode {opcode} not supported")]
    UnsupportedOpcode { level: HeaderLevel, opcode: String },
}

/// Result of an import pass: the tree plus whatever was skipped.
#[derive(Clone, Debug, Default)]
pub struct Import {
    pub tree: PresetTree,
    pub diagnostics: Vec<Diagnostic>,
}

impl Import {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
