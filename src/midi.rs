//! MIDI wire patterns
//!
//! Hardware-level binding descriptors attached to console objects: the pattern
//! types a sender or receiver may carry, the numeric fields they use, and the
//! coarse sender/receiver kinds used to classify objects.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse kind of a MIDI sender attached to an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SenderKind {
    Button,
    Label,
    Enclosure,
    Manual,
}

impl SenderKind {
    /// All sender kinds
    pub fn all() -> &'static [SenderKind] {
        &[
            SenderKind::Button,
            SenderKind::Label,
            SenderKind::Enclosure,
            SenderKind::Manual,
        ]
    }
}

/// Coarse kind of a MIDI receiver attached to an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReceiverKind {
    Drawstop,
    Button,
    Setter,
    Enclosure,
    Manual,
}

impl ReceiverKind {
    /// All receiver kinds
    pub fn all() -> &'static [ReceiverKind] {
        &[
            ReceiverKind::Drawstop,
            ReceiverKind::Button,
            ReceiverKind::Setter,
            ReceiverKind::Enclosure,
            ReceiverKind::Manual,
        ]
    }
}

/// Pattern types a sender can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SenderPatternType {
    None,
    /// Note On with `high_value`, then the off side with `low_value`
    Note,
    /// Note On without velocity information (manuals and ranks)
    NoteNoVelocity,
    NoteOn,
    NoteOff,
    /// Control Change on `key`, `high_value` for on and `low_value` for off
    Ctrl,
    CtrlOn,
    CtrlOff,
    Rpn,
    RpnOn,
    RpnOff,
    Nrpn,
    NrpnOn,
    NrpnOff,
    /// RPN `key` with the parameter number switching between low and high value
    RpnRange,
    NrpnRange,
    /// Program change, bank in bits 7.. and program in bits 0..7
    PgmRange,
    PgmOn,
    PgmOff,
    RodgersStopChange,
    /// Element name on a 16 character display
    HwNameString,
    /// Element name on a 32 character LCD with color
    HwNameLcd,
    /// Element value on a 16 character display
    HwString,
    /// Element value on a 32 character LCD with color
    HwLcd,
}

impl SenderPatternType {
    pub const ALL: [SenderPatternType; 24] = [
        SenderPatternType::None,
        SenderPatternType::Note,
        SenderPatternType::NoteNoVelocity,
        SenderPatternType::NoteOn,
        SenderPatternType::NoteOff,
        SenderPatternType::Ctrl,
        SenderPatternType::CtrlOn,
        SenderPatternType::CtrlOff,
        SenderPatternType::Rpn,
        SenderPatternType::RpnOn,
        SenderPatternType::RpnOff,
        SenderPatternType::Nrpn,
        SenderPatternType::NrpnOn,
        SenderPatternType::NrpnOff,
        SenderPatternType::RpnRange,
        SenderPatternType::NrpnRange,
        SenderPatternType::PgmRange,
        SenderPatternType::PgmOn,
        SenderPatternType::PgmOff,
        SenderPatternType::RodgersStopChange,
        SenderPatternType::HwNameString,
        SenderPatternType::HwNameLcd,
        SenderPatternType::HwString,
        SenderPatternType::HwLcd,
    ];

    /// Whether this pattern drives a hardware display rather than a MIDI message
    pub fn is_display(&self) -> bool {
        matches!(
            self,
            SenderPatternType::HwNameString
                | SenderPatternType::HwNameLcd
                | SenderPatternType::HwString
                | SenderPatternType::HwLcd
        )
    }
}

/// Pattern types a receiver can match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReceiverPatternType {
    None,
    Note,
    NoteNoVelocity,
    NoteShortOctave,
    /// Key press without the manual's key map applied
    NoteNormal,
    NoteOn,
    NoteOff,
    NoteOnOff,
    NoteFixedOn,
    NoteFixedOff,
    CtrlChange,
    CtrlChangeFixed,
    CtrlChangeOn,
    CtrlChangeOff,
    CtrlChangeOnOff,
    CtrlChangeFixedOn,
    CtrlChangeFixedOff,
    CtrlChangeFixedOnOff,
    /// One bit (`key`) of controller `low_value`
    CtrlBit,
    PgmChange,
    PgmRange,
    Rpn,
    RpnOn,
    RpnOff,
    RpnOnOff,
    RpnRange,
    Nrpn,
    NrpnOn,
    NrpnOff,
    NrpnOnOff,
    NrpnRange,
    SysexJohannus9,
    SysexJohannus11,
    SysexViscount,
    SysexViscountToggle,
    SysexRodgersStopChange,
    SysexAhlbornGalanti,
    SysexAhlbornGalantiToggle,
}

impl ReceiverPatternType {
    pub const ALL: [ReceiverPatternType; 38] = [
        ReceiverPatternType::None,
        ReceiverPatternType::Note,
        ReceiverPatternType::NoteNoVelocity,
        ReceiverPatternType::NoteShortOctave,
        ReceiverPatternType::NoteNormal,
        ReceiverPatternType::NoteOn,
        ReceiverPatternType::NoteOff,
        ReceiverPatternType::NoteOnOff,
        ReceiverPatternType::NoteFixedOn,
        ReceiverPatternType::NoteFixedOff,
        ReceiverPatternType::CtrlChange,
        ReceiverPatternType::CtrlChangeFixed,
        ReceiverPatternType::CtrlChangeOn,
        ReceiverPatternType::CtrlChangeOff,
        ReceiverPatternType::CtrlChangeOnOff,
        ReceiverPatternType::CtrlChangeFixedOn,
        ReceiverPatternType::CtrlChangeFixedOff,
        ReceiverPatternType::CtrlChangeFixedOnOff,
        ReceiverPatternType::CtrlBit,
        ReceiverPatternType::PgmChange,
        ReceiverPatternType::PgmRange,
        ReceiverPatternType::Rpn,
        ReceiverPatternType::RpnOn,
        ReceiverPatternType::RpnOff,
        ReceiverPatternType::RpnOnOff,
        ReceiverPatternType::RpnRange,
        ReceiverPatternType::Nrpn,
        ReceiverPatternType::NrpnOn,
        ReceiverPatternType::NrpnOff,
        ReceiverPatternType::NrpnOnOff,
        ReceiverPatternType::NrpnRange,
        ReceiverPatternType::SysexJohannus9,
        ReceiverPatternType::SysexJohannus11,
        ReceiverPatternType::SysexViscount,
        ReceiverPatternType::SysexViscountToggle,
        ReceiverPatternType::SysexRodgersStopChange,
        ReceiverPatternType::SysexAhlbornGalanti,
        ReceiverPatternType::SysexAhlbornGalantiToggle,
    ];
}

impl SenderKind {
    /// Name as written in an organ description
    pub fn name(&self) -> &'static str {
        match self {
            SenderKind::Button => "button",
            SenderKind::Label => "label",
            SenderKind::Enclosure => "enclosure",
            SenderKind::Manual => "manual",
        }
    }
}

impl fmt::Display for SenderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ReceiverKind {
    /// Name as written in an organ description
    pub fn name(&self) -> &'static str {
        match self {
            ReceiverKind::Drawstop => "drawstop",
            ReceiverKind::Button => "button",
            ReceiverKind::Setter => "setter",
            ReceiverKind::Enclosure => "enclosure",
            ReceiverKind::Manual => "manual",
        }
    }
}

impl fmt::Display for ReceiverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl SenderPatternType {
    /// Name as written in an organ description
    pub fn name(&self) -> &'static str {
        match self {
            SenderPatternType::None => "none",
            SenderPatternType::Note => "note",
            SenderPatternType::NoteNoVelocity => "note-no-velocity",
            SenderPatternType::NoteOn => "note-on",
            SenderPatternType::NoteOff => "note-off",
            SenderPatternType::Ctrl => "ctrl",
            SenderPatternType::CtrlOn => "ctrl-on",
            SenderPatternType::CtrlOff => "ctrl-off",
            SenderPatternType::Rpn => "rpn",
            SenderPatternType::RpnOn => "rpn-on",
            SenderPatternType::RpnOff => "rpn-off",
            SenderPatternType::Nrpn => "nrpn",
            SenderPatternType::NrpnOn => "nrpn-on",
            SenderPatternType::NrpnOff => "nrpn-off",
            SenderPatternType::RpnRange => "rpn-range",
            SenderPatternType::NrpnRange => "nrpn-range",
            SenderPatternType::PgmRange => "pgm-range",
            SenderPatternType::PgmOn => "pgm-on",
            SenderPatternType::PgmOff => "pgm-off",
            SenderPatternType::RodgersStopChange => "rodgers-stop-change",
            SenderPatternType::HwNameString => "hw-name-string",
            SenderPatternType::HwNameLcd => "hw-name-lcd",
            SenderPatternType::HwString => "hw-string",
            SenderPatternType::HwLcd => "hw-lcd",
        }
    }
}

impl fmt::Display for SenderPatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ReceiverPatternType {
    /// Name as written in an organ description
    pub fn name(&self) -> &'static str {
        match self {
            ReceiverPatternType::None => "none",
            ReceiverPatternType::Note => "note",
            ReceiverPatternType::NoteNoVelocity => "note-no-velocity",
            ReceiverPatternType::NoteShortOctave => "note-short-octave",
            ReceiverPatternType::NoteNormal => "note-normal",
            ReceiverPatternType::NoteOn => "note-on",
            ReceiverPatternType::NoteOff => "note-off",
            ReceiverPatternType::NoteOnOff => "note-on-off",
            ReceiverPatternType::NoteFixedOn => "note-fixed-on",
            ReceiverPatternType::NoteFixedOff => "note-fixed-off",
            ReceiverPatternType::CtrlChange => "ctrl-change",
            ReceiverPatternType::CtrlChangeFixed => "ctrl-change-fixed",
            ReceiverPatternType::CtrlChangeOn => "ctrl-change-on",
            ReceiverPatternType::CtrlChangeOff => "ctrl-change-off",
            ReceiverPatternType::CtrlChangeOnOff => "ctrl-change-on-off",
            ReceiverPatternType::CtrlChangeFixedOn => "ctrl-change-fixed-on",
            ReceiverPatternType::CtrlChangeFixedOff => "ctrl-change-fixed-off",
            ReceiverPatternType::CtrlChangeFixedOnOff => "ctrl-change-fixed-on-off",
            ReceiverPatternType::CtrlBit => "ctrl-bit",
            ReceiverPatternType::PgmChange => "pgm-change",
            ReceiverPatternType::PgmRange => "pgm-range",
            ReceiverPatternType::Rpn => "rpn",
            ReceiverPatternType::RpnOn => "rpn-on",
            ReceiverPatternType::RpnOff => "rpn-off",
            ReceiverPatternType::RpnOnOff => "rpn-on-off",
            ReceiverPatternType::RpnRange => "rpn-range",
            ReceiverPatternType::Nrpn => "nrpn",
            ReceiverPatternType::NrpnOn => "nrpn-on",
            ReceiverPatternType::NrpnOff => "nrpn-off",
            ReceiverPatternType::NrpnOnOff => "nrpn-on-off",
            ReceiverPatternType::NrpnRange => "nrpn-range",
            ReceiverPatternType::SysexJohannus9 => "sysex-johannus9",
            ReceiverPatternType::SysexJohannus11 => "sysex-johannus11",
            ReceiverPatternType::SysexViscount => "sysex-viscount",
            ReceiverPatternType::SysexViscountToggle => "sysex-viscount-toggle",
            ReceiverPatternType::SysexRodgersStopChange => "sysex-rodgers-stop-change",
            ReceiverPatternType::SysexAhlbornGalanti => "sysex-ahlborn-galanti",
            ReceiverPatternType::SysexAhlbornGalantiToggle => "sysex-ahlborn-galanti-toggle",
        }
    }
}

impl fmt::Display for ReceiverPatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One sender pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderPattern {
    #[serde(rename = "type")]
    pub pattern_type: SenderPatternType,
    #[serde(default)]
    pub device_id: u32,
    #[serde(default = "default_channel")]
    pub channel: i32,
    #[serde(default)]
    pub key: i32,
    #[serde(default)]
    pub low_value: i32,
    #[serde(default = "default_high_value")]
    pub high_value: i32,
    /// First addressed character (display patterns)
    #[serde(default)]
    pub start: i32,
    /// Number of addressed characters (display patterns)
    #[serde(default = "default_length")]
    pub length: i32,
    /// Send an explicit note off instead of a key-press pair
    #[serde(default)]
    pub use_note_off: bool,
}

impl SenderPattern {
    pub fn new(pattern_type: SenderPatternType) -> Self {
        Self {
            pattern_type,
            device_id: 0,
            channel: default_channel(),
            key: 0,
            low_value: 0,
            high_value: default_high_value(),
            start: 0,
            length: default_length(),
            use_note_off: false,
        }
    }
}

/// One receiver pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiverPattern {
    #[serde(rename = "type")]
    pub pattern_type: ReceiverPatternType,
    #[serde(default)]
    pub device_id: u32,
    #[serde(default = "default_channel")]
    pub channel: i32,
    #[serde(default)]
    pub key: i32,
    #[serde(default)]
    pub low_key: i32,
    #[serde(default = "default_high_key")]
    pub high_key: i32,
    #[serde(default)]
    pub low_value: i32,
    #[serde(default = "default_high_value")]
    pub high_value: i32,
    /// Milliseconds
    #[serde(default)]
    pub debounce_time: u32,
}

impl ReceiverPattern {
    pub fn new(pattern_type: ReceiverPatternType) -> Self {
        Self {
            pattern_type,
            device_id: 0,
            channel: default_channel(),
            key: 0,
            low_key: 0,
            high_key: default_high_key(),
            low_value: 0,
            high_value: default_high_value(),
            debounce_time: 0,
        }
    }
}

/// A sender attached to an object: its kind and ordered patterns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderBinding {
    pub kind: SenderKind,
    #[serde(default)]
    pub events: Vec<SenderPattern>,
}

/// A receiver attached to an object: its kind and ordered patterns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiverBinding {
    pub kind: ReceiverKind,
    #[serde(default)]
    pub events: Vec<ReceiverPattern>,
}

/// Split a 14-bit program value into (bank, program)
pub fn split_program(value: i32) -> (i32, i32) {
    (value >> 7, value & 0x7F)
}

fn default_channel() -> i32 {
    1
}

fn default_high_value() -> i32 {
    127
}

fn default_high_key() -> i32 {
    127
}

fn default_length() -> i32 {
    16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_program() {
        assert_eq!(split_program(0), (0, 0));
        assert_eq!(split_program(5), (0, 5));
        assert_eq!(split_program((3 << 7) | 17), (3, 17));
    }

    #[test]
    fn test_pattern_type_display_is_kebab_case() {
        assert_eq!(SenderPatternType::RpnRange.to_string(), "rpn-range");
        assert_eq!(SenderPatternType::HwNameLcd.to_string(), "hw-name-lcd");
        assert_eq!(
            ReceiverPatternType::SysexJohannus11.to_string(),
            "sysex-johannus11"
        );
        assert_eq!(ReceiverKind::Drawstop.to_string(), "drawstop");
    }

    #[test]
    fn test_names_match_description_keywords() {
        for pattern_type in SenderPatternType::ALL {
            let parsed: SenderPatternType = serde_yaml::from_str(pattern_type.name()).expect("sender keyword");
            assert_eq!(parsed, pattern_type);
        }
        for pattern_type in ReceiverPatternType::ALL {
            let parsed: ReceiverPatternType = serde_yaml::from_str(pattern_type.name()).expect("receiver keyword");
            assert_eq!(parsed, pattern_type);
        }
        for kind in SenderKind::all() {
            assert_eq!(serde_yaml::from_str::<SenderKind>(kind.name()).ok(), Some(*kind));
        }
        for kind in ReceiverKind::all() {
            assert_eq!(serde_yaml::from_str::<ReceiverKind>(kind.name()).ok(), Some(*kind));
        }
    }

    #[test]
    fn test_all_lists_are_distinct() {
        let senders: std::collections::HashSet<_> = SenderPatternType::ALL.iter().collect();
        assert_eq!(senders.len(), SenderPatternType::ALL.len());
        let receivers: std::collections::HashSet<_> = ReceiverPatternType::ALL.iter().collect();
        assert_eq!(receivers.len(), ReceiverPatternType::ALL.len());
    }

    #[test]
    fn test_pattern_defaults_from_yaml() {
        let pattern: SenderPattern = serde_yaml::from_str("type: ctrl\nkey: 7\n").unwrap();
        assert_eq!(pattern.pattern_type, SenderPatternType::Ctrl);
        assert_eq!(pattern.key, 7);
        assert_eq!(pattern.channel, 1);
        assert_eq!(pattern.high_value, 127);
        assert!(!pattern.use_note_off);

        let pattern: ReceiverPattern =
            serde_yaml::from_str("type: sysex-rodgers-stop-change\nkey: 2\nlow_value: 9\n")
                .unwrap();
        assert_eq!(pattern.pattern_type, ReceiverPatternType::SysexRodgersStopChange);
        assert_eq!(pattern.low_value, 9);
        assert_eq!(pattern.debounce_time, 0);
    }
}
