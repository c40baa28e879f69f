//! Manual and rank rules: key presses

use super::display::{self, Display};
use super::Translated;
use crate::event::{EventType, Function, MidiEvent};
use crate::midi::{split_program, ReceiverPattern, ReceiverPatternType, SenderPattern, SenderPatternType};

fn note_type(pattern_type: SenderPatternType) -> EventType {
    if pattern_type == SenderPatternType::NoteNoVelocity {
        EventType::NoteOnNoVelocity
    } else {
        EventType::NoteOn
    }
}

/// Explicit note off: an On record with the key velocity, then a NoteOff
fn note_with_off(p: &SenderPattern) -> Translated {
    let on = MidiEvent::send(p.device_id, p.channel, Function::On, note_type(p.pattern_type))
        .with_max(p.high_value);
    let off = MidiEvent::send(p.device_id, p.channel, Function::Off, EventType::NoteOff).with_max(0);
    Translated::pair(on, off)
}

fn key_press(p: &SenderPattern, function: Function) -> Translated {
    Translated::one(
        MidiEvent::send(p.device_id, p.channel, function, note_type(p.pattern_type))
            .with_bounds(p.low_value, p.high_value),
    )
}

pub(super) fn send(p: &SenderPattern) -> Translated {
    use SenderPatternType as S;

    match p.pattern_type {
        S::None => Translated::none(),
        S::Note | S::NoteNoVelocity if p.use_note_off => note_with_off(p),
        S::Note | S::NoteNoVelocity => key_press(p, Function::KeyPress),
        S::HwNameString => Translated::one(display::event(p, Display::NameString)),
        S::HwNameLcd => Translated::one(display::event(p, Display::NameLcd)),
        S::NoteOn
        | S::NoteOff
        | S::Ctrl
        | S::CtrlOn
        | S::CtrlOff
        | S::Rpn
        | S::RpnOn
        | S::RpnOff
        | S::Nrpn
        | S::NrpnOn
        | S::NrpnOff
        | S::RpnRange
        | S::NrpnRange
        | S::PgmRange
        | S::PgmOn
        | S::PgmOff
        | S::RodgersStopChange
        | S::HwString
        | S::HwLcd => Translated::Unsupported,
    }
}

/// Division level patterns never pair with a note off
pub(super) fn division_send(p: &SenderPattern) -> Translated {
    use SenderPatternType as S;

    match p.pattern_type {
        S::None => Translated::none(),
        S::Note | S::NoteNoVelocity => key_press(p, Function::DivisionKeyPress),
        S::HwNameString => Translated::one(display::event(p, Display::NameString)),
        S::HwNameLcd => Translated::one(display::event(p, Display::NameLcd)),
        S::NoteOn
        | S::NoteOff
        | S::Ctrl
        | S::CtrlOn
        | S::CtrlOff
        | S::Rpn
        | S::RpnOn
        | S::RpnOff
        | S::Nrpn
        | S::NrpnOn
        | S::NrpnOff
        | S::RpnRange
        | S::NrpnRange
        | S::PgmRange
        | S::PgmOn
        | S::PgmOff
        | S::RodgersStopChange
        | S::HwString
        | S::HwLcd => Translated::Unsupported,
    }
}

/// Transpose in `number`, key range in `low..=high`, velocity range in `min..=max`
fn received_key(p: &ReceiverPattern, function: Function, event_type: EventType) -> Translated {
    Translated::one(
        MidiEvent::receive(p.device_id, p.channel, p.debounce_time, function, event_type)
            .with_number(p.key)
            .with_range(p.low_key, p.high_key)
            .with_bounds(p.low_value, p.high_value),
    )
}

pub(super) fn receive(p: &ReceiverPattern) -> Translated {
    use ReceiverPatternType as R;

    match p.pattern_type {
        R::None => Translated::none(),
        R::Note => received_key(p, Function::KeyPress, EventType::NoteOn),
        R::NoteNoVelocity => received_key(p, Function::KeyPress, EventType::NoteOnNoVelocity),
        R::NoteShortOctave => received_key(p, Function::KeyPressShortOctave, EventType::NoteOn),
        R::NoteNormal => received_key(p, Function::KeyPressNoMap, EventType::NoteOn),
        // legacy stop-style binding on a manual
        R::PgmChange => {
            let (bank, program) = split_program(p.key);
            Translated::one(
                MidiEvent::receive(
                    p.device_id,
                    p.channel,
                    p.debounce_time,
                    Function::Toggle,
                    EventType::ProgramChange,
                )
                .with_low_and_high(bank)
                .with_min_and_max(program),
            )
        }
        R::NoteOn
        | R::NoteOff
        | R::NoteOnOff
        | R::NoteFixedOn
        | R::NoteFixedOff
        | R::CtrlChange
        | R::CtrlChangeFixed
        | R::CtrlChangeOn
        | R::CtrlChangeOff
        | R::CtrlChangeOnOff
        | R::CtrlChangeFixedOn
        | R::CtrlChangeFixedOff
        | R::CtrlChangeFixedOnOff
        | R::CtrlBit
        | R::PgmRange
        | R::Rpn
        | R::RpnOn
        | R::RpnOff
        | R::RpnOnOff
        | R::RpnRange
        | R::Nrpn
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
