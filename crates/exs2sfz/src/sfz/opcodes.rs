//! The SFZ opcode ↔ preset property table.
//!
//! One static table drives both directions. Import looks rules up by opcode
//! name; export walks the table in order, so the table order is the order
//! opcodes appear in written SFZ.

use crate::diagnostics::HeaderLevel;
use crate::properties as prop;

/// Header levels a rule applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    Any,
    GroupOnly,
}

impl Scope {
    pub fn applies_to(&self, level: HeaderLevel) -> bool {
        match self {
            Self::Any => true,
            Self::GroupOnly => level == HeaderLevel::Group,
        }
    }
}

/// How an opcode value becomes a property.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportRule {
    /// Numeric text becomes a number, anything else stays text.
    Passthrough,
    /// Stored verbatim as text.
    Text,
    /// Percentage to fraction.
    Percent,
    /// Voice group number to a `voice-group-` tag.
    VoiceGroup,
    /// `loop_continuous` enables looping; other modes are dropped.
    LoopContinuous,
    /// One key sets root, low and high note.
    KeyFanOut,
    /// Sequence field; also sets `seqMode=round_robin`.
    Sequence,
    /// Cents to semitones.
    Tune,
    /// Decibel number to a `"<v>dB"` string.
    Decibels,
}

/// How a property becomes an opcode value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ExportRule {
    /// Not written; the property is exported by another rule.
    Skip,
    Passthrough,
    /// Omitted when the numeric value equals the SFZ default.
    OmitDefault(f64),
    /// Fraction to percentage, only for fractions in `[0, 1)`.
    Percent,
    /// Written only when the tag carries the voice group prefix.
    TaggedVoiceGroup,
    /// Voice group prefix stripped.
    VoiceGroup,
    /// A truthy flag becomes `loop_continuous`.
    LoopContinuous,
    /// Semitones to cents.
    Tune,
    /// Linear or `dB` gain string to a decibel number.
    Decibels,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OpcodeRule {
    pub opcode: &'static str,
    pub property: &'static str,
    pub scope: Scope,
    pub import: ImportRule,
    pub export: ExportRule,
}

const fn rule(
    opcode: &'static str,
    property: &'static str,
    import: ImportRule,
    export: ExportRule,
) -> OpcodeRule {
    OpcodeRule {
        opcode,
        property,
        scope: Scope::Any,
        import,
        export,
    }
}

/// Properties set by a single `key` opcode.
pub const KEY_PROPERTIES: [&str; 3] = [prop::ROOT_NOTE, prop::LO_NOTE, prop::HI_NOTE];

pub static OPCODE_TABLE: &[OpcodeRule] = &[
    OpcodeRule {
        opcode: "group_label",
        property: prop::NAME,
        scope: Scope::GroupOnly,
        import: ImportRule::Text,
        export: ExportRule::Passthrough,
    },
    rule("sample", prop::PATH, ImportRule::Text, ExportRule::Passthrough),
    rule("pitch_keycenter", prop::ROOT_NOTE, ImportRule::Passthrough, ExportRule::Passthrough),
    rule("key", prop::ROOT_NOTE, ImportRule::KeyFanOut, ExportRule::Skip),
    rule("lokey", prop::LO_NOTE, ImportRule::Passthrough, ExportRule::Passthrough),
    rule("hikey", prop::HI_NOTE, ImportRule::Passthrough, ExportRule::Passthrough),
    rule("lovel", prop::LO_VEL, ImportRule::Passthrough, ExportRule::OmitDefault(0.0)),
    rule("hivel", prop::HI_VEL, ImportRule::Passthrough, ExportRule::OmitDefault(127.0)),
    rule("offset", prop::START, ImportRule::Passthrough, ExportRule::OmitDefault(0.0)),
    rule("end", prop::END, ImportRule::Passthrough, ExportRule::Passthrough),
    rule("loop_mode", prop::LOOP_ENABLED, ImportRule::LoopContinuous, ExportRule::LoopContinuous),
    rule("loop_start", prop::LOOP_START, ImportRule::Passthrough, ExportRule::Passthrough),
    rule("loop_end", prop::LOOP_END, ImportRule::Passthrough, ExportRule::Passthrough),
    rule("amp_veltrack", prop::AMP_VEL_TRACK, ImportRule::Percent, ExportRule::Percent),
    rule("ampeg_attack", prop::ATTACK, ImportRule::Passthrough, ExportRule::Passthrough),
    rule("ampeg_release", prop::RELEASE, ImportRule::Passthrough, ExportRule::Passthrough),
    rule("ampeg_sustain", prop::SUSTAIN, ImportRule::Passthrough, ExportRule::Passthrough),
    rule("ampeg_decay", prop::DECAY, ImportRule::Passthrough, ExportRule::Passthrough),
    rule("seq_position", prop::SEQ_POSITION, ImportRule::Sequence, ExportRule::Passthrough),
    rule("seq_length", prop::SEQ_LENGTH, ImportRule::Sequence, ExportRule::Passthrough),
    rule("group", prop::TAGS, ImportRule::VoiceGroup, ExportRule::TaggedVoiceGroup),
    rule("off_by", prop::SILENCED_BY_TAGS, ImportRule::VoiceGroup, ExportRule::VoiceGroup),
    rule("off_mode", prop::SILENCING_MODE, ImportRule::Text, ExportRule::Passthrough),
    rule("sw_previous", prop::PREVIOUS_NOTE, ImportRule::Passthrough, ExportRule::Passthrough),
    rule("trigger", prop::TRIGGER, ImportRule::Text, ExportRule::Passthrough),
    rule("tune", prop::TUNING, ImportRule::Tune, ExportRule::Tune),
    rule("volume", prop::VOLUME, ImportRule::Decibels, ExportRule::Decibels),
];

/// The rule translating `opcode` at `level`, if the opcode is supported there.
pub fn import_rule(opcode: &str, level: HeaderLevel) -> Option<&'static OpcodeRule> {
    OPCODE_TABLE
        .iter()
        .find(|r| r.opcode == opcode && r.scope.applies_to(level))
}

/// Rules that write opcodes at `level`, in output order.
pub fn export_rules(level: HeaderLevel) -> impl Iterator<Item = &'static OpcodeRule> {
    OPCODE_TABLE
        .iter()
        .filter(move |r| r.export != ExportRule::Skip && r.scope.applies_to(level))
}
