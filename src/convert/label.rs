//! Label rules: display text only

use super::display::{self, Display};
use super::Translated;
use crate::midi::{ReceiverPattern, ReceiverPatternType, SenderPattern, SenderPatternType};

pub(super) fn send(p: &SenderPattern) -> Translated {
    use SenderPatternType as S;

    match p.pattern_type {
        S::None => Translated::none(),
        S::HwNameString => Translated::one(display::event(p, Display::NameString)),
        S::HwNameLcd => Translated::one(display::event(p, Display::NameLcd)),
        S::HwString => Translated::one(display::event(p, Display::ValueString)),
        S::HwLcd => Translated::one(display::event(p, Display::ValueLcd)),
        S::Note
        | S::NoteNoVelocity
        | S::NoteOn
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
        | S::RodgersStopChange => Translated::Unsupported,
    }
}

/// Labels never receive
pub(super) fn receive(p: &ReceiverPattern) -> Translated {
    use ReceiverPatternType as R;

    match p.pattern_type {
        R::None => Translated::none(),
        R::Note
        | R::NoteNoVelocity
        | R::NoteShortOctave
        | R::NoteNormal
        | R::NoteOn
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
        | R::PgmChange
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
