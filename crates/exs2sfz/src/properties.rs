//! Property names used on preset tree nodes.

pub const NAME: &str = "name";
pub const PATH: &str = "path";
pub const PAN: &str = "pan";
pub const VOLUME: &str = "volume";
pub const TUNING: &str = "tuning";

pub const ROOT_NOTE: &str = "rootNote";
pub const LO_NOTE: &str = "loNote";
pub const HI_NOTE: &str = "hiNote";
pub const LO_VEL: &str = "loVel";
pub const HI_VEL: &str = "hiVel";
pub const PITCH_KEY_TRACK: &str = "pitchKeyTrack";
pub const PREVIOUS_NOTE: &str = "previousNote";
pub const TRIGGER: &str = "trigger";

pub const START: &str = "start";
pub const END: &str = "end";
pub const LOOP_ENABLED: &str = "loopEnabled";
pub const LOOP_START: &str = "loopStart";
pub const LOOP_END: &str = "loopEnd";
pub const LOOP_CROSSFADE: &str = "loopCrossfade";
pub const LOOP_CROSSFADE_MODE: &str = "loopCrossfadeMode";

pub const AMP_VEL_TRACK: &str = "ampVelTrack";
pub const ATTACK: &str = "attack";
pub const DECAY: &str = "decay";
pub const SUSTAIN: &str = "sustain";
pub const RELEASE: &str = "release";

pub const SEQ_POSITION: &str = "seqPosition";
pub const SEQ_LENGTH: &str = "seqLength";
pub const SEQ_MODE: &str = "seqMode";

pub const TAGS: &str = "tags";
pub const SILENCED_BY_TAGS: &str = "silencedByTags";
pub const SILENCING_MODE: &str = "silencingMode";

/// `seqMode` value for round-robin cycling.
pub const ROUND_ROBIN: &str = "round_robin";

/// Prefix that turns an SFZ voice group number into a DecentSampler tag.
pub const VOICE_GROUP_PREFIX: &str = "voice-group-";

/// `loopCrossfadeMode` values.
pub const CROSSFADE_EQUAL_POWER: &str = "equal_power";
pub const CROSSFADE_LINEAR: &str = "linear";
