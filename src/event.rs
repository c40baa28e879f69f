//! Canonical MIDI event records
//!
//! A [`MidiEvent`] is the vendor-neutral description of one binding, send side,
//! receive side or both after merging. The meaning of `low`, `high`, `number`,
//! `min` and `max` depends on the event type:
//!
//! | type            | low/high        | number     | min/max            |
//! |-----------------|-----------------|------------|--------------------|
//! | Note            | key             | transpose  | velocity           |
//! | Control Change  |                 | controller | value              |
//! | Program Change  | bank            |            | program            |
//! | (N)RPN          | key (ranges)    | parameter  | value              |
//! | LCD SysEx       | character range | element id | color / capacity   |
//! | CC bitfield     |                 | controller | bit                |
//! | Rodgers SysEx   |                 | device     | stop               |
//! | other SysEx     | bank (Johannus) | data       | bank (Johannus 11) |

use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire message family of a canonical event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    #[default]
    Unknown,
    NoteOff,
    NoteOn,
    NoteOnNoVelocity,
    ControlChange,
    ProgramChange,
    Rpn,
    Nrpn,
    LcdSysex,
    ContentControlChangeBitfield,
    AhlbornGalantiSysex,
    Johannus9BytesSysex,
    Johannus11BytesSysex,
    RodgersStopChangeSysex,
    ViscountSysex,
}

impl EventType {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            EventType::Unknown => "Unknown",
            EventType::NoteOff => "8x Note Off",
            EventType::NoteOn => "9x Note On",
            EventType::NoteOnNoVelocity => "9x Note On No Velocity",
            EventType::ControlChange => "Bx Control Change",
            EventType::ProgramChange => "Cx Program Change",
            EventType::Rpn => "RPN",
            EventType::Nrpn => "NRPN",
            EventType::LcdSysex => "LCD SysEx",
            EventType::ContentControlChangeBitfield => "Content Control Change Bitfield",
            EventType::AhlbornGalantiSysex => "Ahlborn Galanti SysEx",
            EventType::Johannus9BytesSysex => "Johannus 9 bytes SysEx",
            EventType::Johannus11BytesSysex => "Johannus 11 bytes SysEx",
            EventType::RodgersStopChangeSysex => "Rodgers Stop Change SysEx",
            EventType::ViscountSysex => "Viscount SysEx",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a binding does on the receive or send side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Function {
    /// No binding on this side
    #[default]
    None,
    Unknown,
    /// Manual, rank
    KeyPress,
    /// Manual
    KeyPressShortOctave,
    /// Manual
    KeyPressNoMap,
    /// Manual, rank
    DivisionKeyPress,
    On,
    Off,
    Toggle,
    /// Enclosure, display
    Value,
    /// Display
    Name,
    /// Bitfield and Rodgers stop change
    OnOff,
}

impl Function {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Function::None => "No",
            Function::Unknown => "Unknown",
            Function::KeyPress => "Key Press",
            Function::KeyPressShortOctave => "Key Press Short Octave",
            Function::KeyPressNoMap => "Key Press No Map",
            Function::DivisionKeyPress => "Division Key Press",
            Function::On => "On",
            Function::Off => "Off",
            Function::Toggle => "Toggle",
            Function::Value => "Value",
            Function::Name => "Name",
            Function::OnOff => "On/Off",
        }
    }

    pub fn is_none(&self) -> bool {
        *self == Function::None
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One canonical MIDI binding
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MidiEvent {
    pub device_id: u32,
    pub channel: i32,
    pub event_type: EventType,
    pub low: i32,
    pub high: i32,
    pub number: i32,
    pub min: i32,
    pub max: i32,
    /// Receive side only
    pub debounce_time: u32,
    pub receive_function: Function,
    pub send_function: Function,
}

impl MidiEvent {
    /// A send-side event routed to `device_id`/`channel`
    pub fn send(device_id: u32, channel: i32, function: Function, event_type: EventType) -> Self {
        Self {
            device_id,
            channel,
            event_type,
            send_function: function,
            ..Default::default()
        }
    }

    /// A receive-side event routed from `device_id`/`channel`
    pub fn receive(
        device_id: u32,
        channel: i32,
        debounce_time: u32,
        function: Function,
        event_type: EventType,
    ) -> Self {
        Self {
            device_id,
            channel,
            event_type,
            debounce_time,
            receive_function: function,
            ..Default::default()
        }
    }

    pub fn with_low_and_high(mut self, value: i32) -> Self {
        self.low = value;
        self.high = value;
        self
    }

    pub fn with_range(mut self, low: i32, high: i32) -> Self {
        self.low = low;
        self.high = high;
        self
    }

    pub fn with_number(mut self, number: i32) -> Self {
        self.number = number;
        self
    }

    pub fn with_min_and_max(mut self, value: i32) -> Self {
        self.min = value;
        self.max = value;
        self
    }

    pub fn with_bounds(mut self, min: i32, max: i32) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_min(mut self, min: i32) -> Self {
        self.min = min;
        self
    }

    pub fn with_max(mut self, max: i32) -> Self {
        self.max = max;
        self
    }

    /// Whether `other` describes the same wire message (functions and debounce excluded)
    pub fn same_message(&self, other: &MidiEvent) -> bool {
        self.device_id == other.device_id
            && self.channel == other.channel
            && self.event_type == other.event_type
            && self.low == other.low
            && self.high == other.high
            && self.number == other.number
            && self.min == other.min
            && self.max == other.max
    }

    /// Device column text
    pub fn device_name(&self) -> String {
        self.device_id.to_string()
    }

    /// "receive/send" with "-" for a side without binding
    pub fn function_label(&self) -> String {
        let side = |function: Function| {
            if function.is_none() {
                "-"
            } else {
                function.name()
            }
        };
        format!("{}/{}", side(self.receive_function), side(self.send_function))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_label() {
        let event = MidiEvent::send(0, 1, Function::On, EventType::NoteOn);
        assert_eq!(event.function_label(), "-/On");

        let mut event = MidiEvent::receive(0, 1, 0, Function::OnOff, EventType::ViscountSysex);
        assert_eq!(event.function_label(), "On/Off/-");
        event.send_function = Function::Value;
        assert_eq!(event.function_label(), "On/Off/Value");
    }

    #[test]
    fn test_same_message_ignores_functions() {
        let send = MidiEvent::send(1, 2, Function::On, EventType::ControlChange)
            .with_number(7)
            .with_min_and_max(127);
        let receive = MidiEvent::receive(1, 2, 30, Function::Toggle, EventType::ControlChange)
            .with_number(7)
            .with_min_and_max(127);
        assert!(send.same_message(&receive));
        assert!(!send.same_message(&receive.clone().with_max(100)));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(EventType::NoteOff.to_string(), "8x Note Off");
        assert_eq!(EventType::Johannus11BytesSysex.name(), "Johannus 11 bytes SysEx");
        assert_eq!(Function::KeyPressNoMap.to_string(), "Key Press No Map");
    }
}
