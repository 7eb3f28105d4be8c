//! Preset tree: the DecentSampler-shaped pivot between formats.
//!
//! Every conversion builds one [`PresetTree`] in an importer and hands it,
//! read-only, to an exporter. The layout is always
//!
//! ```text
//! DecentSampler
//! └── groups          (instrument-wide properties)
//!     └── group       (per group properties)
//!         └── sample  (per zone / region properties)
//! ```

use crate::units::parse_leading_f64;
use std::fmt;

/// Kinds of node that can appear in a preset tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Root of a DecentSampler preset.
    DecentSampler,
    /// Container for all groups; holds instrument-wide properties.
    Groups,
    /// A group of samples.
    Group,
    /// A single sample mapping.
    Sample,
    /// Effects chain container.
    Effects,
    /// A single effect.
    Effect,
    /// User interface description.
    Ui,
}

impl NodeKind {
    /// Tag name as written in a `.dspreset` document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DecentSampler => "DecentSampler",
            Self::Groups => "groups",
            Self::Group => "group",
            Self::Sample => "sample",
            Self::Effects => "effects",
            Self::Effect => "effect",
            Self::Ui => "ui",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed scalar stored on a node.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl PropertyValue {
    /// Type a raw text value: integers and plain decimals become numbers,
    /// everything else stays a string.
    pub fn infer(raw: &str) -> Self {
        let raw = raw.trim();
        if let Ok(i) = raw.parse::<i64>() {
            return Self::Int(i);
        }
        let looks_numeric = !raw.is_empty()
            && raw.bytes().any(|b| b.is_ascii_digit())
            && raw
                .bytes()
                .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'));
        if looks_numeric {
            if let Ok(f) = raw.parse::<f64>() {
                return Self::Float(f);
            }
        }
        Self::Str(raw.to_string())
    }

    /// Numeric view of the value. Strings are read best-effort.
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Int(i) => *i as f64,
            Self::Float(f) => *f,
            Self::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Str(s) => parse_leading_f64(s),
        }
    }

    /// Truthiness as DecentSampler reads boolean attributes.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Str(s) => matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "on" | "1"),
            other => other.as_f64() != 0.0,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(v) => write!(f, "{}", v),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<i32> for PropertyValue {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

/// A node with ordered, uniquely named properties and ordered children.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetNode {
    kind: NodeKind,
    properties: Vec<(String, PropertyValue)>,
    children: Vec<PresetNode>,
}

impl PresetNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn has_kind(&self, kind: NodeKind) -> bool {
        self.kind == kind
    }

    /// Set a property. An existing property keeps its position.
    pub fn set(&mut self, name: &str, value: impl Into<PropertyValue>) {
        let value = value.into();
        match self.properties.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => *slot = value,
            None => self.properties.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<PropertyValue> {
        let pos = self.properties.iter().position(|(n, _)| n == name)?;
        Some(self.properties.remove(pos).1)
    }

    /// Properties in insertion order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.properties.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn num_properties(&self) -> usize {
        self.properties.len()
    }

    pub fn append_child(&mut self, child: PresetNode) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[PresetNode] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [PresetNode] {
        &mut self.children
    }

    /// First child of the given kind.
    pub fn child(&self, kind: NodeKind) -> Option<&PresetNode> {
        self.children.iter().find(|c| c.kind == kind)
    }
}

/// A complete preset, rooted at a `DecentSampler` node.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetTree {
    root: PresetNode,
}

impl PresetTree {
    /// An empty preset without a `groups` node.
    pub fn new() -> Self {
        Self {
            root: PresetNode::new(NodeKind::DecentSampler),
        }
    }

    /// A preset holding the given `groups` node.
    pub fn with_groups(groups: PresetNode) -> Self {
        let mut tree = Self::new();
        tree.root.append_child(groups);
        tree
    }

    pub fn root(&self) -> &PresetNode {
        &self.root
    }


    pub fn groups(&self) -> Option<&PresetNode> {
        self.root.child(NodeKind::Groups)
    }


    /// All `group` nodes under `groups`.
    pub fn group_nodes(&self) -> impl Iterator<Item = &PresetNode> {
        self.groups()
            .into_iter()
            .flat_map(|g| g.children().iter())
            .filter(|c| c.has_kind(NodeKind::Group))
    }

    /// Get a human-readable info string.
    pub fn info(&self) -> String {
        let groups = self.group_nodes().count();
        let samples: usize = self
            .group_nodes()
            .map(|g| {
                g.children()
                    .iter()
                    .filter(|c| c.has_kind(NodeKind::Sample))
                    .count()
            })
            .sum();
        format!("Preset: {} groups, {} samples", groups, samples)
    }
}

impl Default for PresetTree {
    fn default() -> Self {
        Self::new()
    }
}
