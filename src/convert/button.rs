//! Button rules: drawstops, pistons, setters

use super::display::{self, Display};
use super::Translated;
use crate::event::{EventType, Function, MidiEvent};
use crate::midi::{split_program, ReceiverPattern, ReceiverPatternType, SenderPattern, SenderPatternType};

const VALUE_MAX: i32 = 127;

fn send_event(p: &SenderPattern, function: Function, event_type: EventType) -> MidiEvent {
    MidiEvent::send(p.device_id, p.channel, function, event_type)
}

fn note_on(p: &SenderPattern) -> MidiEvent {
    send_event(p, Function::On, EventType::NoteOn)
        .with_low_and_high(p.key)
        .with_min_and_max(p.high_value)
}

/// A zero velocity off without explicit note off request goes out as 8x,
/// anything else as 9x with the off velocity
fn note_off(p: &SenderPattern) -> MidiEvent {
    off_velocity(p, !p.use_note_off && p.low_value == 0)
}

/// The standalone note off pattern is 8x whenever its velocity is zero
fn standalone_note_off(p: &SenderPattern) -> MidiEvent {
    off_velocity(p, p.low_value == 0)
}

fn off_velocity(p: &SenderPattern, as_note_off: bool) -> MidiEvent {
    let event = send_event(p, Function::Off, EventType::NoteOff).with_low_and_high(p.key);
    if as_note_off {
        event.with_min_and_max(0)
    } else {
        MidiEvent {
            event_type: EventType::NoteOn,
            ..event
        }
        .with_min_and_max(p.low_value)
    }
}

fn value_on(p: &SenderPattern, event_type: EventType) -> MidiEvent {
    send_event(p, Function::On, event_type)
        .with_number(p.key)
        .with_min_and_max(p.high_value)
}

fn value_off(p: &SenderPattern, event_type: EventType) -> MidiEvent {
    send_event(p, Function::Off, event_type)
        .with_number(p.key)
        .with_min_and_max(p.low_value)
}

fn range_on(p: &SenderPattern, event_type: EventType) -> MidiEvent {
    send_event(p, Function::On, event_type)
        .with_number(p.high_value)
        .with_low_and_high(p.key)
}

fn range_off(p: &SenderPattern, event_type: EventType) -> MidiEvent {
    send_event(p, Function::Off, event_type)
        .with_number(p.low_value)
        .with_low_and_high(p.key)
}

fn program(event: MidiEvent, value: i32) -> MidiEvent {
    let (bank, program) = split_program(value);
    event.with_low_and_high(bank).with_min_and_max(program)
}

pub(super) fn send(p: &SenderPattern) -> Translated {
    use EventType as E;
    use SenderPatternType as S;

    match p.pattern_type {
        S::None => Translated::none(),
        S::Note => Translated::pair(note_on(p), note_off(p)),
        S::NoteOn => Translated::one(note_on(p)),
        S::NoteOff => Translated::one(standalone_note_off(p)),
        S::Ctrl => Translated::pair(value_on(p, E::ControlChange), value_off(p, E::ControlChange)),
        S::CtrlOn => Translated::one(value_on(p, E::ControlChange)),
        S::CtrlOff => Translated::one(value_off(p, E::ControlChange)),
        S::Rpn => Translated::pair(value_on(p, E::Rpn), value_off(p, E::Rpn)),
        S::RpnOn => Translated::one(value_on(p, E::Rpn)),
        S::RpnOff => Translated::one(value_off(p, E::Rpn)),
        S::Nrpn => Translated::pair(value_on(p, E::Nrpn), value_off(p, E::Nrpn)),
        S::NrpnOn => Translated::one(value_on(p, E::Nrpn)),
        S::NrpnOff => Translated::one(value_off(p, E::Nrpn)),
        S::RpnRange => Translated::pair(range_on(p, E::Rpn), range_off(p, E::Rpn)),
        S::NrpnRange => Translated::pair(range_on(p, E::Nrpn), range_off(p, E::Nrpn)),
        S::PgmRange => Translated::pair(
            program(send_event(p, Function::On, E::ProgramChange), p.high_value),
            program(send_event(p, Function::Off, E::ProgramChange), p.low_value),
        ),
        S::PgmOn => Translated::one(program(send_event(p, Function::On, E::ProgramChange), p.key)),
        S::PgmOff => Translated::one(program(send_event(p, Function::Off, E::ProgramChange), p.key)),
        // device in number, stop in min
        S::RodgersStopChange => Translated::one(
            send_event(p, Function::OnOff, E::RodgersStopChangeSysex)
                .with_number(p.key)
                .with_min(p.low_value),
        ),
        S::HwNameString => Translated::one(display::event(p, Display::NameString)),
        S::HwNameLcd => Translated::one(display::event(p, Display::NameLcd)),
        S::HwString => Translated::one(display::event(p, Display::ValueString)),
        S::HwLcd => Translated::one(display::event(p, Display::ValueLcd)),
        S::NoteNoVelocity => Translated::Unsupported,
    }
}

fn receive_event(p: &ReceiverPattern, function: Function, event_type: EventType) -> MidiEvent {
    MidiEvent::receive(p.device_id, p.channel, p.debounce_time, function, event_type)
}

/// Velocities from `high_value` up
fn note_on_half(p: &ReceiverPattern, function: Function) -> MidiEvent {
    receive_event(p, function, EventType::NoteOn)
        .with_low_and_high(p.key)
        .with_bounds(p.high_value, VALUE_MAX)
}

/// Velocities up to `low_value`
fn note_off_half(p: &ReceiverPattern, function: Function) -> MidiEvent {
    receive_event(p, function, EventType::NoteOn)
        .with_low_and_high(p.key)
        .with_bounds(0, p.low_value)
}

fn note_fixed(p: &ReceiverPattern, value: i32) -> MidiEvent {
    receive_event(p, Function::Toggle, EventType::NoteOn)
        .with_low_and_high(p.key)
        .with_min_and_max(value)
}

fn value_on_half(p: &ReceiverPattern, function: Function, event_type: EventType) -> MidiEvent {
    receive_event(p, function, event_type)
        .with_number(p.key)
        .with_bounds(p.high_value, VALUE_MAX)
}

fn value_off_half(p: &ReceiverPattern, function: Function, event_type: EventType) -> MidiEvent {
    receive_event(p, function, event_type)
        .with_number(p.key)
        .with_bounds(0, p.low_value)
}

fn fixed_on(p: &ReceiverPattern, function: Function) -> MidiEvent {
    receive_event(p, function, EventType::ControlChange)
        .with_number(p.key)
        .with_min_and_max(p.high_value)
}

fn fixed_off(p: &ReceiverPattern, function: Function) -> MidiEvent {
    receive_event(p, function, EventType::ControlChange)
        .with_number(p.key)
        .with_min_and_max(p.low_value)
}

fn range_half(p: &ReceiverPattern, function: Function, event_type: EventType, number: i32) -> MidiEvent {
    receive_event(p, function, event_type)
        .with_number(number)
        .with_low_and_high(p.key)
}

fn sysex(p: &ReceiverPattern, function: Function, event_type: EventType, data: i32) -> MidiEvent {
    receive_event(p, function, event_type).with_number(data)
}

fn received_program(p: &ReceiverPattern, function: Function, value: i32) -> MidiEvent {
    program(receive_event(p, function, EventType::ProgramChange), value)
}

pub(super) fn receive(p: &ReceiverPattern) -> Translated {
    use EventType as E;
    use Function as F;
    use ReceiverPatternType as R;

    match p.pattern_type {
        R::None => Translated::none(),
        R::Note => Translated::pair(note_on_half(p, F::On), note_off_half(p, F::Off)),
        R::NoteOn => Translated::one(note_on_half(p, F::Toggle)),
        R::NoteOff => Translated::one(note_off_half(p, F::Toggle)),
        R::NoteOnOff => Translated::pair(note_on_half(p, F::Toggle), note_off_half(p, F::Toggle)),
        R::NoteFixedOn => Translated::one(note_fixed(p, p.high_value)),
        R::NoteFixedOff => Translated::one(note_fixed(p, p.low_value)),
        R::CtrlChange => Translated::pair(
            value_on_half(p, F::On, E::ControlChange),
            value_off_half(p, F::Off, E::ControlChange),
        ),
        R::CtrlChangeOn => Translated::one(value_on_half(p, F::Toggle, E::ControlChange)),
        R::CtrlChangeOff => Translated::one(value_off_half(p, F::Toggle, E::ControlChange)),
        R::CtrlChangeOnOff => Translated::pair(
            value_on_half(p, F::Toggle, E::ControlChange),
            value_off_half(p, F::Toggle, E::ControlChange),
        ),
        R::CtrlChangeFixed => Translated::pair(fixed_on(p, F::On), fixed_off(p, F::Off)),
        R::CtrlChangeFixedOn => Translated::one(fixed_on(p, F::Toggle)),
        R::CtrlChangeFixedOff => Translated::one(fixed_off(p, F::Toggle)),
        R::CtrlChangeFixedOnOff => Translated::pair(fixed_on(p, F::Toggle), fixed_off(p, F::Toggle)),
        // controller in number, bit in min
        R::CtrlBit => Translated::one(
            receive_event(p, F::OnOff, E::ContentControlChangeBitfield)
                .with_number(p.low_value)
                .with_min(p.key),
        ),
        R::PgmChange => Translated::one(received_program(p, F::Toggle, p.key)),
        R::PgmRange => Translated::pair(
            received_program(p, F::On, p.high_value),
            received_program(p, F::Off, p.low_value),
        ),
        R::Rpn => Translated::pair(value_on_half(p, F::On, E::Rpn), value_off_half(p, F::Off, E::Rpn)),
        R::RpnOn => Translated::one(value_on_half(p, F::Toggle, E::Rpn)),
        R::RpnOff => Translated::one(value_off_half(p, F::Toggle, E::Rpn)),
        R::RpnOnOff => Translated::pair(
            value_on_half(p, F::Toggle, E::Rpn),
            value_off_half(p, F::Toggle, E::Rpn),
        ),
        R::RpnRange => Translated::pair(
            range_half(p, F::On, E::Rpn, p.high_value),
            range_half(p, F::Off, E::Rpn, p.low_value),
        ),
        R::Nrpn => Translated::pair(value_on_half(p, F::On, E::Nrpn), value_off_half(p, F::Off, E::Nrpn)),
        R::NrpnOn => Translated::one(value_on_half(p, F::Toggle, E::Nrpn)),
        R::NrpnOff => Translated::one(value_off_half(p, F::Toggle, E::Nrpn)),
        R::NrpnOnOff => Translated::pair(
            value_on_half(p, F::Toggle, E::Nrpn),
            value_off_half(p, F::Toggle, E::Nrpn),
        ),
        R::NrpnRange => Translated::pair(
            range_half(p, F::On, E::Nrpn, p.high_value),
            range_half(p, F::Off, E::Nrpn, p.low_value),
        ),
        R::SysexJohannus9 => Translated::one(sysex(p, F::Toggle, E::Johannus9BytesSysex, p.key)),
        // lower bank in min, upper bank in max
        R::SysexJohannus11 => Translated::one(
            receive_event(p, F::Toggle, E::Johannus11BytesSysex).with_bounds(p.low_value, p.high_value),
        ),
        R::SysexViscount => Translated::pair(
            sysex(p, F::On, E::ViscountSysex, p.high_value),
            sysex(p, F::Off, E::ViscountSysex, p.low_value),
        ),
        R::SysexViscountToggle => Translated::one(sysex(p, F::Toggle, E::ViscountSysex, p.low_value)),
        R::SysexRodgersStopChange => Translated::one(
            sysex(p, F::OnOff, E::RodgersStopChangeSysex, p.key).with_min(p.low_value),
        ),
        R::SysexAhlbornGalanti => Translated::pair(
            sysex(p, F::On, E::AhlbornGalantiSysex, p.high_value),
            sysex(p, F::Off, E::AhlbornGalantiSysex, p.low_value),
        ),
        R::SysexAhlbornGalantiToggle => Translated::pair(
            sysex(p, F::Toggle, E::AhlbornGalantiSysex, p.high_value),
            sysex(p, F::Toggle, E::AhlbornGalantiSysex, p.low_value),
        ),
        R::NoteNoVelocity | R::NoteShortOctave | R::NoteNormal => Translated::Unsupported,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(translated: Translated) -> Vec<MidiEvent> {
        match translated {
            Translated::Events(events) => events,
            Translated::Unsupported => panic!("pattern was not translated"),
        }
    }

    fn sender(pattern_type: SenderPatternType, key: i32, low: i32, high: i32) -> SenderPattern {
        let mut pattern = SenderPattern::new(pattern_type);
        pattern.device_id = 1;
        pattern.channel = 1;
        pattern.key = key;
        pattern.low_value = low;
        pattern.high_value = high;
        pattern
    }

    fn receiver(pattern_type: ReceiverPatternType, key: i32, low: i32, high: i32) -> ReceiverPattern {
        let mut pattern = ReceiverPattern::new(pattern_type);
        pattern.device_id = 1;
        pattern.channel = 1;
        pattern.key = key;
        pattern.low_value = low;
        pattern.high_value = high;
        pattern.debounce_time = 20;
        pattern
    }

    #[test]
    fn test_rpn_range_decomposes_into_on_and_off() {
        let events = events(send(&sender(SenderPatternType::RpnRange, 5, 10, 20)));
        assert_eq!(events.len(), 2);

        let on = &events[0];
        assert_eq!(on.event_type, EventType::Rpn);
        assert_eq!(on.send_function, Function::On);
        assert_eq!(on.number, 20);
        assert_eq!((on.low, on.high), (5, 5));

        let off = &events[1];
        assert_eq!(off.event_type, EventType::Rpn);
        assert_eq!(off.send_function, Function::Off);
        assert_eq!(off.number, 10);
        assert_eq!((off.low, off.high), (5, 5));
    }

    #[test]
    fn test_note_off_velocity_ambiguity() {
        let events = events(send(&sender(SenderPatternType::Note, 60, 0, 100)));
        let (on, off) = (&events[0], &events[1]);
        assert_eq!(on.event_type, EventType::NoteOn);
        assert_eq!(on.send_function, Function::On);
        assert_eq!((on.min, on.max), (100, 100));
        assert_eq!(off.send_function, Function::Off);
        assert_eq!(off.event_type, EventType::NoteOff);
        assert_eq!((off.min, off.max), (0, 0));
        assert_eq!((off.low, off.high), (60, 60));

        let events = events_with_velocity(40);
        let off = &events[1];
        assert_eq!(off.event_type, EventType::NoteOn);
        assert_eq!((off.min, off.max), (40, 40));
    }

    fn events_with_velocity(low: i32) -> Vec<MidiEvent> {
        events(send(&sender(SenderPatternType::Note, 60, low, 100)))
    }

    #[test]
    fn test_standalone_note_off_ignores_note_off_flag() {
        let mut pattern = sender(SenderPatternType::NoteOff, 60, 0, 100);
        pattern.use_note_off = true;
        let silent = events(send(&pattern));
        assert_eq!(silent.len(), 1);
        assert_eq!(silent[0].event_type, EventType::NoteOff);
        assert_eq!((silent[0].min, silent[0].max), (0, 0));

        pattern.low_value = 40;
        let voiced = events(send(&pattern));
        assert_eq!(voiced[0].event_type, EventType::NoteOn);
        assert_eq!((voiced[0].min, voiced[0].max), (40, 40));
    }

    #[test]
    fn test_note_pair_with_note_off_flag_keeps_note_on_type() {
        let mut pattern = sender(SenderPatternType::Note, 60, 0, 100);
        pattern.use_note_off = true;
        let pair = events(send(&pattern));
        assert_eq!(pair[1].event_type, EventType::NoteOn);
        assert_eq!((pair[1].min, pair[1].max), (0, 0));
    }

    #[test]
    fn test_program_range_splits_bank_and_program() {
        let high = (2 << 7) | 9;
        let events = events(send(&sender(SenderPatternType::PgmRange, 0, 4, high)));
        assert_eq!(events[0].event_type, EventType::ProgramChange);
        assert_eq!((events[0].low, events[0].high, events[0].min), (2, 2, 9));
        assert_eq!((events[1].low, events[1].min, events[1].max), (0, 4, 4));
        assert_eq!(events[1].send_function, Function::Off);
    }

    #[test]
    fn test_on_off_suffixes_give_single_event() {
        let on = events(send(&sender(SenderPatternType::NrpnOn, 300, 0, 64)));
        assert_eq!(on.len(), 1);
        assert_eq!((on[0].send_function, on[0].number, on[0].min), (Function::On, 300, 64));

        let off = events(send(&sender(SenderPatternType::CtrlOff, 7, 3, 64)));
        assert_eq!(off.len(), 1);
        assert_eq!((off[0].send_function, off[0].number, off[0].max), (Function::Off, 7, 3));
    }

    #[test]
    fn test_received_note_velocity_windows() {
        let events = events(receive(&receiver(ReceiverPatternType::Note, 36, 0, 1)));
        assert_eq!(events[0].receive_function, Function::On);
        assert_eq!((events[0].min, events[0].max), (1, 127));
        assert_eq!(events[1].receive_function, Function::Off);
        assert_eq!(events[1].event_type, EventType::NoteOn);
        assert_eq!((events[1].min, events[1].max), (0, 0));
        assert!(events.iter().all(|e| e.debounce_time == 20));
    }

    #[test]
    fn test_vendor_sysex_layouts() {
        let j11 = events(receive(&receiver(ReceiverPatternType::SysexJohannus11, 0, 3, 5)));
        assert_eq!(j11[0].event_type, EventType::Johannus11BytesSysex);
        assert_eq!((j11[0].min, j11[0].max), (3, 5));

        let rodgers = events(receive(&receiver(ReceiverPatternType::SysexRodgersStopChange, 2, 17, 0)));
        assert_eq!(rodgers[0].event_type, EventType::RodgersStopChangeSysex);
        assert_eq!(rodgers[0].receive_function, Function::OnOff);
        assert_eq!((rodgers[0].number, rodgers[0].min), (2, 17));

        let bit = events(receive(&receiver(ReceiverPatternType::CtrlBit, 3, 80, 0)));
        assert_eq!(bit[0].event_type, EventType::ContentControlChangeBitfield);
        assert_eq!((bit[0].number, bit[0].min), (80, 3));

        let toggle = events(receive(&receiver(ReceiverPatternType::SysexAhlbornGalantiToggle, 0, 11, 12)));
        assert_eq!(toggle.len(), 2);
        assert_eq!((toggle[0].number, toggle[1].number), (12, 11));
        assert!(toggle.iter().all(|e| e.receive_function == Function::Toggle));

        let viscount = events(receive(&receiver(ReceiverPatternType::SysexViscountToggle, 0, 7, 8)));
        assert_eq!(viscount.len(), 1);
        assert_eq!(viscount[0].number, 7);
    }

    #[test]
    fn test_key_press_receivers_are_not_button_patterns() {
        assert_eq!(
            receive(&receiver(ReceiverPatternType::NoteShortOctave, 0, 0, 0)),
            Translated::Unsupported
        );
        assert_eq!(
            send(&sender(SenderPatternType::NoteNoVelocity, 0, 0, 0)),
            Translated::Unsupported
        );
    }
}
