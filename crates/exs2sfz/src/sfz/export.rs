//! Preset tree → SFZ text.

use crate::diagnostics::HeaderLevel;
use crate::parser::SfzSectionType;
use crate::properties as prop;
use crate::sfz::opcodes::{export_rules, ExportRule, OpcodeRule};
use crate::tree::{NodeKind, PresetNode, PresetTree, PropertyValue};
use crate::units::{format_decimal, linear_or_db_to_db, tuning_to_tune, velocity_track_percent};

pub const DEFAULT_HEADER_COMMENT: &str = "// SFZ file created with exs2sfz";

/// Written instead of any sections when the tree has no `groups` node.
pub const EMPTY_INSTRUMENT_COMMENT: &str = "// Converted EXS file was empty. ";

/// Decimal places used for exported decibel values.
const DB_PLACES: usize = 4;

#[derive(Clone, Debug, PartialEq)]
pub struct ExportOptions {
    /// First line of the output; should be an SFZ comment.
    pub header_comment: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            header_comment: DEFAULT_HEADER_COMMENT.to_string(),
        }
    }
}

/// Render a preset tree as SFZ text.
///
/// Instrument-wide properties go under `<control>`, then every `group` node
/// becomes a `<group>` line followed by one `<region>` line per `sample`
/// child. Nodes of other kinds are skipped.
pub fn export_sfz(tree: &PresetTree, options: &ExportOptions) -> String {
    let mut sfz = format!("{}\n\n", options.header_comment);

    let Some(groups) = tree.groups() else {
        sfz.push_str(EMPTY_INSTRUMENT_COMMENT);
        return sfz;
    };

    sfz.push('\n');
    sfz.push_str(SfzSectionType::Control.header_str());
    sfz.push('\n');
    write_opcodes(&mut sfz, groups, HeaderLevel::Global);
    sfz.push('\n');

    for group in groups.children().iter().filter(|c| c.has_kind(NodeKind::Group)) {
        sfz.push_str(SfzSectionType::Group.header_str());
        write_opcodes(&mut sfz, group, HeaderLevel::Group);
        sfz.push('\n');

        for sample in group.children().iter().filter(|c| c.has_kind(NodeKind::Sample)) {
            sfz.push_str(SfzSectionType::Region.header_str());
            write_opcodes(&mut sfz, sample, HeaderLevel::Region);
            sfz.push('\n');
        }
    }

    sfz
}

fn write_opcodes(sfz: &mut String, node: &PresetNode, level: HeaderLevel) {
    for rule in export_rules(level) {
        let Some(value) = node.get(rule.property) else {
            continue;
        };
        if let Some(text) = opcode_value(rule, value) {
            sfz.push_str(&format!("{}={} ", rule.opcode, text));
        }
    }
}

/// The opcode value for a stored property, or `None` when it is omitted.
fn opcode_value(rule: &OpcodeRule, value: &PropertyValue) -> Option<String> {
    match rule.export {
        ExportRule::Skip => None,
        ExportRule::Passthrough => Some(value.to_string()),
        ExportRule::OmitDefault(default) => {
            if value.as_f64() == default {
                None
            } else {
                Some(value.to_string())
            }
        }
        ExportRule::Percent => velocity_track_percent(value.as_f64()).map(|p| p.to_string()),
        ExportRule::TaggedVoiceGroup => {
            let tags = value.to_string();
            if tags.contains(prop::VOICE_GROUP_PREFIX) {
                Some(tags.replace(prop::VOICE_GROUP_PREFIX, ""))
            } else {
                None
            }
        }
        ExportRule::VoiceGroup => Some(value.to_string().replace(prop::VOICE_GROUP_PREFIX, "")),
        ExportRule::LoopContinuous => value.is_truthy().then(|| "loop_continuous".to_string()),
        ExportRule::Tune => Some(tuning_to_tune(value.as_f64()).to_string()),
        ExportRule::Decibels => Some(format_decimal(
            linear_or_db_to_db(&value.to_string()),
            DB_PLACES,
        )),
    }
}
