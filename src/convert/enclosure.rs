//! Enclosure rules: one continuous value binding per pattern

use super::display::{self, Display};
use super::Translated;
use crate::event::{EventType, Function, MidiEvent};
use crate::midi::{split_program, ReceiverPattern, ReceiverPatternType, SenderPattern, SenderPatternType};

/// Controller/parameter in `number`, value range in `min..=max`
fn value(event: MidiEvent, key: i32, low_value: i32, high_value: i32) -> MidiEvent {
    event.with_number(key).with_bounds(low_value, high_value)
}

/// Banks in `low..=high`, programs in `min..=max`
fn program_range(event: MidiEvent, low_value: i32, high_value: i32) -> MidiEvent {
    let (low_bank, low_program) = split_program(low_value);
    let (high_bank, high_program) = split_program(high_value);
    event
        .with_range(low_bank, high_bank)
        .with_bounds(low_program, high_program)
}

pub(super) fn send(p: &SenderPattern) -> Translated {
    use SenderPatternType as S;

    let event = |event_type| MidiEvent::send(p.device_id, p.channel, Function::Value, event_type);
    match p.pattern_type {
        S::None => Translated::none(),
        S::Ctrl => Translated::one(value(event(EventType::ControlChange), p.key, p.low_value, p.high_value)),
        S::Rpn => Translated::one(value(event(EventType::Rpn), p.key, p.low_value, p.high_value)),
        S::Nrpn => Translated::one(value(event(EventType::Nrpn), p.key, p.low_value, p.high_value)),
        S::PgmRange => Translated::one(program_range(
            event(EventType::ProgramChange),
            p.low_value,
            p.high_value,
        )),
        S::HwNameString => Translated::one(display::event(p, Display::NameString)),
        S::HwNameLcd => Translated::one(display::event(p, Display::NameLcd)),
        S::HwString => Translated::one(display::event(p, Display::ValueString)),
        S::HwLcd => Translated::one(display::event(p, Display::ValueLcd)),
        S::Note
        | S::NoteNoVelocity
        | S::NoteOn
        | S::NoteOff
        | S::CtrlOn
        | S::CtrlOff
        | S::RpnOn
        | S::RpnOff
        | S::NrpnOn
        | S::NrpnOff
        | S::RpnRange
        | S::NrpnRange
        | S::PgmOn
        | S::PgmOff
        | S::RodgersStopChange => Translated::Unsupported,
    }
}

pub(super) fn receive(p: &ReceiverPattern) -> Translated {
    use ReceiverPatternType as R;

    let event = |event_type| {
        MidiEvent::receive(p.device_id, p.channel, p.debounce_time, Function::Value, event_type)
    };
    match p.pattern_type {
        R::None => Translated::none(),
        R::CtrlChange => Translated::one(value(event(EventType::ControlChange), p.key, p.low_value, p.high_value)),
        R::Rpn => Translated::one(value(event(EventType::Rpn), p.key, p.low_value, p.high_value)),
        R::Nrpn => Translated::one(value(event(EventType::Nrpn), p.key, p.low_value, p.high_value)),
        R::PgmRange => Translated::one(program_range(
            event(EventType::ProgramChange),
            p.low_value,
            p.high_value,
        )),
        R::Note
        | R::NoteNoVelocity
        | R::NoteShortOctave
        | R::NoteNormal
        | R::NoteOn
        | R::NoteOff
        | R::NoteOnOff
        | R::NoteFixedOn
        | R::NoteFixedOff
        | R::CtrlChangeFixed
        | R::CtrlChangeOn
        | R::CtrlChangeOff
        | R::CtrlChangeOnOff
        | R::CtrlChangeFixedOn
        | R::CtrlChangeFixedOff
        | R::CtrlChangeFixedOnOff
        | R::CtrlBit
        | R::PgmChange
        | R::RpnOn
        | R::RpnOff
        | R::RpnOnOff
        | R::RpnRange
        | R::NrpnOn
        | R::NrpnOff
        | R::NrpnOnOff
        | R::NrpnRange
        | R::SysexJohannus9
        | R::SysexJohannus11
        | R::SysexViscount
        | R::SysexViscountToggle
        | R::SysexRodgersStopChange
        | R::SysexAhlbornGalanti
        | R::SysexAhlbornGalantiToggle => Translated::Unsupported,
    }
}
