use std::path::PathBuf;

/// A parsed SFZ document, reduced to the three levels the converter maps.
///
/// ```text
/// <control> / <global>   -> global
/// <group>                -> groups[n].header
/// <region>               -> groups[n].regions[m]
/// ```
///
/// Opcodes are kept per level exactly as written. No inheritance is applied:
/// a region only carries the opcodes declared under its own `<region>` header.
#[derive(Debug, Clone, PartialEq)]
pub struct SfzFile {
    /// Instrument-wide opcodes from `<control>` and `<global>` sections.
    pub global: SfzSection,

    /// Groups in declaration order, each with its regions.
    pub groups: Vec<SfzGroup>,

    /// Source file path if loaded from disk
    pub source_file: Option<PathBuf>,
}

impl SfzFile {
    /// Creates a new empty SFZ document
    pub fn new() -> Self {
        Self {
            global: SfzSection::new(SfzSectionType::Global),
            groups: Vec::new(),
            source_file: None,
        }
    }

    /// Total number of regions across all groups
    pub fn num_regions(&self) -> usize {
        self.groups.iter().map(|g| g.regions.len()).sum()
    }

    /// Get a human-readable info string.
    pub fn info(&self) -> String {
        format!(
            "SFZ: {} global opcodes, {} groups, {} regions",
            self.global.len(),
            self.groups.len(),
            self.num_regions()
        )
    }
}

impl Default for SfzFile {
    fn default() -> Self {
        Self::new()
    }
}

/// A `<group>` section together with the `<region>` sections that follow it.
#[derive(Debug, Clone, PartialEq)]
pub struct SfzGroup {
    pub header: SfzSection,
    pub regions: Vec<SfzSection>,
}

impl SfzGroup {
    pub fn new() -> Self {
        Self {
            header: SfzSection::new(SfzSectionType::Group),
            regions: Vec::new(),
        }
    }
}

impl Default for SfzGroup {
    fn default() -> Self {
        Self::new()
    }
}

/// Types of SFZ sections
///
/// Sections are delimited by angle brackets, like `<region>`, and contain
/// opcode=value pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SfzSectionType {
    /// Settings that apply to all regions
    Global,

    /// Instrument-level controls such as `default_path`
    Control,

    /// Intermediate level between global and group
    Master,

    /// Settings for a related collection of regions
    Group,

    /// A single sample mapping
    Region,

    /// A response curve definition
    Curve,

    /// Effect settings
    Effect,
}

impl SfzSectionType {
    /// Returns the section type for a header name (without angle brackets)
    pub fn from_header(header: &str) -> Option<Self> {
        match header.to_lowercase().as_str() {
            "global" => Some(Self::Global),
            "control" => Some(Self::Control),
            "master" => Some(Self::Master),
            "group" => Some(Self::Group),
            "region" => Some(Self::Region),
            "curve" => Some(Self::Curve),
            "effect" => Some(Self::Effect),
            _ => None,
        }
    }

    /// Returns the section header string as written in an SFZ file
    pub fn header_str(&self) -> &'static str {
        match self {
            Self::Global => "<global>",
            Self::Control => "<control>",
            Self::Master => "<master>",
            Self::Group => "<group>",
            Self::Region => "<region>",
            Self::Curve => "<curve>",
            Self::Effect => "<effect>",
        }
    }
}

/// A section's opcodes in declaration order.
///
/// Redefining an opcode within one section replaces its value but keeps the
/// position of the first definition.
#[derive(Debug, Clone, PartialEq)]
pub struct SfzSection {
    /// The type of section (global, region, etc.)
    pub section_type: SfzSectionType,

    opcodes: Vec<(String, String)>,
}

impl SfzSection {
    /// Creates a new section with no opcodes
    pub fn new(section_type: SfzSectionType) -> Self {
        Self {
            section_type,
            opcodes: Vec::new(),
        }
    }

    /// Adds an opcode to this section
    pub fn add_opcode(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.opcodes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.opcodes.push((name, value)),
        }
    }

    /// Gets an opcode value as a string slice if it exists
    pub fn get_opcode_str(&self, name: &str) -> Option<&str> {
        self.opcodes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Opcodes in declaration order
    pub fn opcodes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.opcodes.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.opcodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opcodes.is_empty()
    }
}
