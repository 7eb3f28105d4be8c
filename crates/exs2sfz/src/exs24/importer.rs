//! EXS24 records → preset tree.

use crate::diagnostics::{Diagnostic, Import};
use crate::exs24::records::{Exs24Group, Exs24Instrument, Exs24Sample, Exs24Zone};
use crate::path_utils::{join_sample_path, normalize_base_path, relative_path_from, to_forward_slashes};
use crate::properties as prop;
use crate::tree::{NodeKind, PresetNode, PresetTree};
use crate::units::{db_string, exs_tuning};
use std::path::{Path, PathBuf};

/// Highest group index a zone may reference by default.
pub const DEFAULT_MAX_GROUP_INDEX: i32 = 100;

#[derive(Clone, Debug, PartialEq)]
pub struct ImportOptions {
    /// Directory the samples will live in, written in front of each file
    /// name. When unset, paths are made relative to `output_dir`.
    pub sample_path: Option<String>,
    /// Directory the converted instrument is written to.
    pub output_dir: Option<PathBuf>,
    /// Zones referencing a higher group index are skipped.
    pub max_group_index: i32,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            sample_path: None,
            output_dir: None,
            max_group_index: DEFAULT_MAX_GROUP_INDEX,
        }
    }
}

/// Build a preset tree from EXS24 records.
///
/// Zones are grouped by their group index. Slot `-1` collects zones without a
/// group into an unnamed group. Group indices that point past the end of the
/// group list get placeholder groups; indices above
/// [`ImportOptions::max_group_index`] are skipped and reported. Groups that end
/// up without samples are left out.
pub fn import_exs24(instrument: &Exs24Instrument, options: &ImportOptions) -> Import {
    let base_path = options
        .sample_path
        .as_deref()
        .map(normalize_base_path)
        .filter(|p| !p.is_empty());

    let mut diagnostics = Vec::new();
    let groups = reconcile_groups(instrument, options.max_group_index, &mut diagnostics);
    let ungrouped = Exs24Group::default();

    let mut groups_node = PresetNode::new(NodeKind::Groups);
    let mut highest_sequence_number = 0;

    for slot in -1..groups.len() as i32 {
        let group = if slot >= 0 {
            &groups[slot as usize]
        } else {
            &ungrouped
        };

        let mut group_node = group_node(group);
        if group.seq_number != 0 {
            highest_sequence_number = highest_sequence_number.max(group.seq_number);
        }

        let zones = instrument
            .zones
            .iter()
            .filter(|z| z.group_index == slot && z.group_index <= options.max_group_index);
        for zone in zones {
            let sample = usize::try_from(zone.sample_index)
                .ok()
                .and_then(|i| instrument.samples.get(i));
            let Some(sample) = sample else {
                log::debug!(
                    "Zone '{}' references missing sample {}; skipped",
                    zone.name,
                    zone.sample_index
                );
                continue;
            };
            let path = sample_path(sample, base_path.as_deref(), options.output_dir.as_deref());
            group_node.append_child(sample_node(zone, path));
        }

        if !group_node.children().is_empty() {
            groups_node.append_child(group_node);
        }
    }

    apply_sequence_lengths(&mut groups_node, highest_sequence_number);

    let tree = PresetTree::with_groups(groups_node);
    log::info!("Imported {}: {}", instrument.info(), tree.info());

    Import { tree, diagnostics }
}

/// Extend the group list so every in-range zone refers to an existing group.
fn reconcile_groups(
    instrument: &Exs24Instrument,
    max_group_index: i32,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<Exs24Group> {
    let mut groups = instrument.groups.clone();

    for (zone_number, zone) in instrument.zones.iter().enumerate() {
        if zone.group_index < 0 {
            continue;
        }
        if zone.group_index > max_group_index {
            log::warn!(
                "Zone {} has group index {}, greater than {}. This converter may not support this file.",
                zone_number,
                zone.group_index,
                max_group_index
            );
            diagnostics.push(Diagnostic::GroupIndexOutOfRange {
                zone: zone_number,
                index: zone.group_index,
            });
            continue;
        }
        while zone.group_index as usize >= groups.len() {
            groups.push(Exs24Group::placeholder(zone.group_index));
        }
    }

    groups
}

fn group_node(group: &Exs24Group) -> PresetNode {
    let mut node = PresetNode::new(NodeKind::Group);
    if !group.name.is_empty() {
        node.set(prop::NAME, group.name.as_str());
    }
    if group.pan != 0 {
        node.set(prop::PAN, group.pan);
    }
    if group.volume != 0 {
        node.set(prop::VOLUME, db_string(group.volume));
    }
    if group.seq_number != 0 {
        node.set(prop::SEQ_POSITION, group.seq_number);
    }
    node
}

fn sample_path(sample: &Exs24Sample, base_path: Option<&str>, output_dir: Option<&Path>) -> String {
    if let Some(base) = base_path {
        return join_sample_path(base, &sample.file_name);
    }

    let file = Path::new(&to_forward_slashes(&sample.file_path)).join(to_forward_slashes(&sample.file_name));
    match output_dir {
        Some(dir) => relative_path_from(&file, dir),
        None => to_forward_slashes(&file.to_string_lossy()),
    }
}

fn sample_node(zone: &Exs24Zone, path: String) -> PresetNode {
    let mut node = PresetNode::new(NodeKind::Sample);
    node.set(prop::PATH, path);
    node.set(prop::NAME, zone.name.as_str());
    if !zone.pitch {
        node.set(prop::PITCH_KEY_TRACK, 0);
    }
    node.set(prop::ROOT_NOTE, zone.key);
    node.set(prop::LO_NOTE, zone.key_low);
    node.set(prop::HI_NOTE, zone.key_high);
    node.set(prop::LO_VEL, if zone.velocity_range_on { zone.lo_vel } else { 0 });
    node.set(prop::HI_VEL, if zone.velocity_range_on { zone.hi_vel } else { 127 });

    let tuning = exs_tuning(zone.coarse_tuning, zone.fine_tuning);
    if tuning != 0.0 {
        node.set(prop::TUNING, tuning);
    }
    if zone.pan != 0 {
        node.set(prop::PAN, zone.pan);
    }
    if zone.volume != 0 {
        node.set(prop::VOLUME, db_string(zone.volume));
    }
    if zone.sample_start != 0 {
        node.set(prop::START, zone.sample_start);
    }
    // EXS24 end points are exclusive, the preset stores the last frame
    if zone.sample_end != 0 {
        node.set(prop::END, zone.sample_end - 1);
    }

    if zone.loop_enabled {
        node.set(prop::LOOP_ENABLED, true);
        node.set(prop::LOOP_START, zone.loop_start);
        node.set(prop::LOOP_END, zone.loop_end - 1);
        if zone.loop_crossfade != 0 {
            node.set(prop::LOOP_CROSSFADE, zone.loop_crossfade);
        }
        node.set(
            prop::LOOP_CROSSFADE_MODE,
            if zone.loop_equal_power {
                prop::CROSSFADE_EQUAL_POWER
            } else {
                prop::CROSSFADE_LINEAR
            },
        );
    }

    node
}

/// Give every sequenced group and sample the same length and round-robin mode.
///
/// The length is the highest group sequence number, also for sample-level
/// positions.
fn apply_sequence_lengths(groups: &mut PresetNode, seq_length: i32) {
    for group in groups.children_mut() {
        mark_round_robin(group, seq_length);
        for sample in group.children_mut() {
            mark_round_robin(sample, seq_length);
        }
    }
}

fn mark_round_robin(node: &mut PresetNode, seq_length: i32) {
    if node.has(prop::SEQ_POSITION) {
        node.set(prop::SEQ_LENGTH, seq_length);
        node.set(prop::SEQ_MODE, prop::ROUND_ROBIN);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::PropertyValue;

    fn zone(group_index: i32, sample_index: i32) -> Exs24Zone {
        Exs24Zone {
            name: format!("zone {}", group_index),
            group_index,
            sample_index,
            ..Exs24Zone::default()
        }
    }

    fn samples(count: usize) -> Vec<Exs24Sample> {
        (0..count)
            .map(|i| Exs24Sample {
                file_name: format!("S{}.wav", i),
                file_path: "/lib/Samples".to_string(),
            })
            .collect()
    }

    fn with_base_path() -> ImportOptions {
        ImportOptions {
            sample_path: Some("Samples\\".to_string()),
            ..ImportOptions::default()
        }
    }

    fn group_names(import: &Import) -> Vec<String> {
        import
            .tree
            .group_nodes()
            .map(|g| g.get(prop::NAME).map(|n| n.to_string()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_ungrouped_and_negative_zones() {
        let instrument = Exs24Instrument {
            zones: vec![zone(-1, 0), zone(-5, 0)],
            samples: samples(1),
            ..Exs24Instrument::default()
        };
        let import = import_exs24(&instrument, &with_base_path());

        let groups: Vec<_> = import.tree.group_nodes().collect();
        assert_eq!(groups.len(), 1);
        assert!(!groups[0].has(prop::NAME));
        assert_eq!(groups[0].children().len(), 1);
        assert_eq!(
            groups[0].children()[0].get(prop::NAME),
            Some(&PropertyValue::Str("zone -1".into()))
        );
        assert!(import.is_clean());
    }

    #[test]
    fn test_out_of_range_group_index_is_skipped() {
        let instrument = Exs24Instrument {
            zones: vec![zone(0, 0), zone(101, 0)],
            groups: vec![Exs24Group {
                name: "Main".into(),
                ..Exs24Group::default()
            }],
            samples: samples(1),
        };
        let import = import_exs24(&instrument, &with_base_path());

        assert_eq!(group_names(&import), vec!["Main"]);
        assert_eq!(
            import.diagnostics,
            vec![Diagnostic::GroupIndexOutOfRange { zone: 1, index: 101 }]
        );
    }

    #[test]
    fn test_placeholder_groups_fill_gaps() {
        let instrument = Exs24Instrument {
            zones: vec![zone(0, 0), zone(3, 0)],
            samples: samples(1),
            ..Exs24Instrument::default()
        };
        let import = import_exs24(&instrument, &with_base_path());

        // empty placeholders 0..2 are dropped with no samples, 0 and 3 remain
        assert_eq!(
            group_names(&import),
            vec!["Couldn't find group index 0", "Couldn't find group index 3"]
        );
    }

    #[test]
    fn test_reconcile_adds_placeholders_up_to_highest_index() {
        let instrument = Exs24Instrument {
            zones: vec![zone(2, 0), zone(4, 0), zone(-1, 0), zone(150, 0)],
            groups: vec![Exs24Group {
                name: "Defined".into(),
                ..Exs24Group::default()
            }],
            samples: samples(1),
        };
        let mut diagnostics = Vec::new();
        let groups = reconcile_groups(&instrument, DEFAULT_MAX_GROUP_INDEX, &mut diagnostics);

        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(groups.len(), 5);
        assert_eq!(
            names,
            vec![
                "Defined",
                "Couldn't find group index 2",
                "Couldn't find group index 2",
                "Couldn't find group index 4",
                "Couldn't find group index 4",
            ]
        );
        assert_eq!(
            diagnostics,
            vec![Diagnostic::GroupIndexOutOfRange { zone: 3, index: 150 }]
        );
    }

    #[test]
    fn test_empty_groups_are_dropped() {
        let instrument = Exs24Instrument {
            zones: vec![zone(1, 0), zone(0, 7)],
            groups: vec![
                Exs24Group {
                    name: "Missing Sample".into(),
                    ..Exs24Group::default()
                },
                Exs24Group {
                    name: "Keys".into(),
                    ..Exs24Group::default()
                },
            ],
            samples: samples(1),
        };
        let import = import_exs24(&instrument, &with_base_path());
        assert_eq!(group_names(&import), vec!["Keys"]);
    }

    #[test]
    fn test_sequence_lengths_are_shared() {
        let group = |seq_number| Exs24Group {
            seq_number,
            ..Exs24Group::default()
        };
        let instrument = Exs24Instrument {
            zones: vec![zone(0, 0), zone(2, 1)],
            groups: vec![group(1), group(0), group(2)],
            samples: samples(2),
        };
        let import = import_exs24(&instrument, &with_base_path());

        let groups: Vec<_> = import.tree.group_nodes().collect();
        assert_eq!(groups.len(), 2);
        for (g, position) in groups.iter().zip([1, 2]) {
            assert_eq!(g.get(prop::SEQ_POSITION), Some(&PropertyValue::Int(position)));
            assert_eq!(g.get(prop::SEQ_LENGTH), Some(&PropertyValue::Int(2)));
            assert_eq!(
                g.get(prop::SEQ_MODE),
                Some(&PropertyValue::Str("round_robin".into()))
            );
        }
    }

    #[test]
    fn test_sample_properties() {
        let instrument = Exs24Instrument {
            zones: vec![Exs24Zone {
                name: "Pad C3".into(),
                group_index: 0,
                key: 48,
                key_low: 40,
                key_high: 55,
                pitch: false,
                coarse_tuning: -1,
                fine_tuning: 50,
                pan: -20,
                volume: -6,
                sample_start: 10,
                sample_end: 100,
                loop_enabled: true,
                loop_start: 20,
                loop_end: 50,
                loop_crossfade: 5,
                loop_equal_power: true,
                ..Exs24Zone::default()
            }],
            groups: vec![Exs24Group {
                name: "Pads".into(),
                pan: 10,
                volume: -3,
                seq_number: 0,
            }],
            samples: samples(1),
        };
        let import = import_exs24(&instrument, &with_base_path());

        let group = import.tree.group_nodes().next().unwrap();
        assert_eq!(group.get(prop::PAN), Some(&PropertyValue::Int(10)));
        assert_eq!(group.get(prop::VOLUME), Some(&PropertyValue::Str("-3dB".into())));
        assert!(!group.has(prop::SEQ_POSITION));

        let sample = &group.children()[0];
        use PropertyValue::{Bool, Float, Int, Str};
        let expected: Vec<(&str, PropertyValue)> = vec![
            (prop::PATH, Str("Samples/S0.wav".into())),
            (prop::NAME, Str("Pad C3".into())),
            (prop::PITCH_KEY_TRACK, Int(0)),
            (prop::ROOT_NOTE, Int(48)),
            (prop::LO_NOTE, Int(40)),
            (prop::HI_NOTE, Int(55)),
            (prop::LO_VEL, Int(0)),
            (prop::HI_VEL, Int(127)),
            (prop::TUNING, Float(-0.5)),
            (prop::PAN, Int(-20)),
            (prop::VOLUME, Str("-6dB".into())),
            (prop::START, Int(10)),
            (prop::END, Int(99)),
            (prop::LOOP_ENABLED, Bool(true)),
            (prop::LOOP_START, Int(20)),
            (prop::LOOP_END, Int(49)),
            (prop::LOOP_CROSSFADE, Int(5)),
            (prop::LOOP_CROSSFADE_MODE, Str("equal_power".into())),
        ];
        let actual: Vec<(&str, PropertyValue)> =
            sample.properties().map(|(n, v)| (n, v.clone())).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_defaults_are_not_written() {
        let instrument = Exs24Instrument {
            zones: vec![Exs24Zone {
                velocity_range_on: true,
                lo_vel: 30,
                hi_vel: 90,
                ..zone(0, 0)
            }],
            samples: samples(1),
            ..Exs24Instrument::default()
        };
        let import = import_exs24(&instrument, &with_base_path());
        let sample = &import.tree.group_nodes().next().unwrap().children()[0];

        assert_eq!(sample.get(prop::LO_VEL), Some(&PropertyValue::Int(30)));
        assert_eq!(sample.get(prop::HI_VEL), Some(&PropertyValue::Int(90)));
        for absent in [
            prop::PITCH_KEY_TRACK,
            prop::TUNING,
            prop::PAN,
            prop::VOLUME,
            prop::START,
            prop::END,
            prop::LOOP_ENABLED,
            prop::LOOP_CROSSFADE_MODE,
        ] {
            assert!(!sample.has(absent), "{} should not be set", absent);
        }
    }

    #[test]
    fn test_paths_relative_to_output_dir() {
        let instrument = Exs24Instrument {
            zones: vec![zone(0, 0)],
            samples: samples(1),
            ..Exs24Instrument::default()
        };
        let options = ImportOptions {
            output_dir: Some(PathBuf::from("/lib/Converted")),
            ..ImportOptions::default()
        };
        let import = import_exs24(&instrument, &options);
        let sample = &import.tree.group_nodes().next().unwrap().children()[0];
        assert_eq!(
            sample.get(prop::PATH),
            Some(&PropertyValue::Str("../Samples/S0.wav".into()))
        );
    }

    #[test]
    fn test_empty_base_path_falls_back_to_relative() {
        let instrument = Exs24Instrument {
            zones: vec![zone(0, 0)],
            samples: samples(1),
            ..Exs24Instrument::default()
        };
        let options = ImportOptions {
            sample_path: Some("/".to_string()),
            output_dir: Some(PathBuf::from("/lib")),
            ..ImportOptions::default()
        };
        let import = import_exs24(&instrument, &options);
        let sample = &import.tree.group_nodes().next().unwrap().children()[0];
        assert_eq!(
            sample.get(prop::PATH),
            Some(&PropertyValue::Str("Samples/S0.wav".into()))
        );
    }

    #[test]
    fn test_no_zones_gives_empty_groups_node() {
        let import = import_exs24(&Exs24Instrument::default(), &ImportOptions::default());
        assert!(import.tree.groups().is_some());
        assert_eq!(import.tree.group_nodes().count(), 0);
    }
}
