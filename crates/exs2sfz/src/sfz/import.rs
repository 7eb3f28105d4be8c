//! SFZ hierarchy → preset tree.

use crate::diagnostics::{Diagnostic, HeaderLevel, Import};
use crate::parser::{SfzFile, SfzSection};
use crate::properties as prop;
use crate::sfz::opcodes::{import_rule, ImportRule, OpcodeRule, KEY_PROPERTIES};
use crate::tree::{NodeKind, PresetNode, PresetTree, PropertyValue};
use crate::units::{
    db_string, parse_leading_f64, parse_leading_i64, tune_to_tuning, velocity_track_fraction,
};

/// Translate a parsed SFZ document into a preset tree.
///
/// Global opcodes land on the `groups` node, each `<group>` becomes a `group`
/// node and each `<region>` a `sample` node inside it, in declaration order.
/// Opcodes without a translation are reported and otherwise ignored.
pub fn import_sfz(sfz: &SfzFile) -> Import {
    let mut diagnostics = Vec::new();
    let mut groups = PresetNode::new(NodeKind::Groups);

    translate_section(&sfz.global, &mut groups, HeaderLevel::Global, &mut diagnostics);

    for group in &sfz.groups {
        let mut ds_group = PresetNode::new(NodeKind::Group);
        translate_section(&group.header, &mut ds_group, HeaderLevel::Group, &mut diagnostics);

        for region in &group.regions {
            let mut ds_sample = PresetNode::new(NodeKind::Sample);
            translate_section(region, &mut ds_sample, HeaderLevel::Region, &mut diagnostics);
            ds_group.append_child(ds_sample);
        }
        groups.append_child(ds_group);
    }

    let tree = PresetTree::with_groups(groups);
    log::info!(
        "Imported SFZ: {} ({} unsupported opcodes)",
        tree.info(),
        diagnostics.len()
    );

    Import { tree, diagnostics }
}

fn translate_section(
    section: &SfzSection,
    node: &mut PresetNode,
    level: HeaderLevel,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for (opcode, value) in section.opcodes() {
        match import_rule(opcode, level) {
            Some(rule) => apply_rule(rule, value, node),
            None => {
                log::debug!("{} opcode {} not supported.", level, opcode);
                diagnostics.push(Diagnostic::UnsupportedOpcode {
                    level,
                    opcode: opcode.to_string(),
                });
            }
        }
    }
}

fn apply_rule(rule: &OpcodeRule, value: &str, node: &mut PresetNode) {
    match rule.import {
        ImportRule::Passthrough => node.set(rule.property, PropertyValue::infer(value)),
        ImportRule::Text => node.set(rule.property, value),
        ImportRule::Percent => node.set(
            rule.property,
            velocity_track_fraction(parse_leading_f64(value)),
        ),
        ImportRule::VoiceGroup => node.set(
            rule.property,
            format!("{}{}", prop::VOICE_GROUP_PREFIX, value),
        ),
        ImportRule::LoopContinuous => {
            if value == "loop_continuous" {
                node.set(rule.property, true);
            }
        }
        ImportRule::KeyFanOut => {
            let key = PropertyValue::infer(value);
            for property in KEY_PROPERTIES {
                node.set(property, key.clone());
            }
        }
        ImportRule::Sequence => {
            node.set(rule.property, PropertyValue::infer(value));
            node.set(prop::SEQ_MODE, prop::ROUND_ROBIN);
        }
        ImportRule::Tune => node.set(rule.property, tune_to_tuning(parse_leading_i64(value))),
        ImportRule::Decibels => node.set(rule.property, db_string(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_sfz_str;

    fn import(content: &str) -> Import {
        import_sfz(&parse_sfz_str(content).expect("valid SFZ"))
    }

    #[test]
    fn test_levels_map_to_nodes() {
        let result = import(
            "<control> ampeg_release=0.7\n\
             <group> group_label=Hits seq_position=2\n\
             <region> sample=hit1.wav key=36\n\
             <region> sample=hit2.wav key=38\n",
        );
        assert!(result.is_clean());

        let groups = result.tree.groups().unwrap();
        assert_eq!(groups.get(prop::RELEASE), Some(&PropertyValue::Float(0.7)));

        let group = &groups.children()[0];
        assert_eq!(group.get(prop::NAME), Some(&PropertyValue::Str("Hits".into())));
        assert_eq!(group.get(prop::SEQ_POSITION), Some(&PropertyValue::Int(2)));
        assert_eq!(group.get(prop::SEQ_MODE), Some(&PropertyValue::Str("round_robin".into())));

        let samples = group.children();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].get(prop::PATH), Some(&PropertyValue::Str("hit1.wav".into())));
        for property in KEY_PROPERTIES {
            assert_eq!(samples[1].get(property), Some(&PropertyValue::Int(38)));
        }
    }

    #[test]
    fn test_value_transforms() {
        let result = import(
            "<group>\n<region> amp_veltrack=80 tune=-25 volume=-6 group=3 off_by=4 \
             loop_mode=loop_continuous trigger=release offset=100\n",
        );
        let sample = &result.tree.groups().unwrap().children()[0].children()[0];

        assert_eq!(sample.get(prop::AMP_VEL_TRACK), Some(&PropertyValue::Float(0.8)));
        assert_eq!(sample.get(prop::TUNING), Some(&PropertyValue::Float(-0.25)));
        assert_eq!(sample.get(prop::VOLUME), Some(&PropertyValue::Str("-6dB".into())));
        assert_eq!(sample.get(prop::TAGS), Some(&PropertyValue::Str("voice-group-3".into())));
        assert_eq!(
            sample.get(prop::SILENCED_BY_TAGS),
            Some(&PropertyValue::Str("voice-group-4".into()))
        );
        assert_eq!(sample.get(prop::LOOP_ENABLED), Some(&PropertyValue::Bool(true)));
        assert_eq!(sample.get(prop::TRIGGER), Some(&PropertyValue::Str("release".into())));
        assert_eq!(sample.get(prop::START), Some(&PropertyValue::Int(100)));
    }

    #[test]
    fn test_other_loop_modes_are_dropped() {
        let result = import("<group>\n<region> loop_mode=one_shot\n");
        let sample = &result.tree.groups().unwrap().children()[0].children()[0];
        assert!(!sample.has(prop::LOOP_ENABLED));
        assert!(result.is_clean());
    }

    #[test]
    fn test_unknown_opcode_is_reported_per_level() {
        let result = import("<global> foo_bar=1\n<group> group_label=A\n<region> foo_bar=1 key=60\n");

        let sample = &result.tree.groups().unwrap().children()[0].children()[0];
        assert!(!sample.has("foo_bar"));
        assert_eq!(sample.num_properties(), 3);
        assert_eq!(
            result.diagnostics,
            vec![
                Diagnostic::UnsupportedOpcode {
                    level: HeaderLevel::Global,
                    opcode: "foo_bar".into()
                },
                Diagnostic::UnsupportedOpcode {
                    level: HeaderLevel::Region,
                    opcode: "foo_bar".into()
                },
            ]
        );
        assert_eq!(
            result.diagnostics[1].to_string(),
            "<region> opcode foo_bar not supported"
        );
    }

    #[test]
    fn test_group_label_outside_group_is_unsupported() {
        let result = import("<group>\n<region> group_label=Nope\n");
        let sample = &result.tree.groups().unwrap().children()[0].children()[0];
        assert!(!sample.has(prop::NAME));
        assert_eq!(result.diagnostics.len(), 1);
    }

    #[test]
    fn test_empty_group_is_kept() {
        let result = import("<group> group_label=Empty\n");
        assert_eq!(result.tree.group_nodes().count(), 1);
    }
}
