//! Wire pattern translation
//!
//! Converts the raw sender/receiver patterns of a console object into canonical
//! [`MidiEvent`]s. The role of the object picks the rule set:
//!
//! - buttons: on/off pairs, toggles and vendor sysex dialects
//! - labels: display text only
//! - enclosures: one value binding per pattern
//! - manuals and ranks: key presses, explicit note offs, division key presses
//!
//! Every role translator matches its pattern types exhaustively. A pattern type
//! without rule for the role is not an error; it is recorded in
//! [`Translation::skipped`] and logged at debug level.

mod button;
mod display;
mod enclosure;
mod keys;
mod label;
pub mod merge;

use crate::classify::ObjectType;
use crate::event::MidiEvent;
use crate::midi::{ReceiverPattern, ReceiverPatternType, SenderPattern, SenderPatternType};
use crate::model::MidiConfigurable;
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

pub use merge::merge_events;

/// Conversion errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    /// Canonical events cannot be written back as wire patterns
    #[error("writing events back to a {object_type} object is not supported")]
    ReverseUnsupported { object_type: ObjectType },
}

/// Which binding list a pattern came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Send,
    Receive,
    DivisionSend,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Send => write!(f, "send"),
            Side::Receive => write!(f, "receive"),
            Side::DivisionSend => write!(f, "division send"),
        }
    }
}

/// Pattern type of a skipped pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkippedType {
    Sender(SenderPatternType),
    Receiver(ReceiverPatternType),
}

impl fmt::Display for SkippedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkippedType::Sender(t) => write!(f, "{}", t),
            SkippedType::Receiver(t) => write!(f, "{}", t),
        }
    }
}

/// A pattern the object's role has no translation for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SkippedPattern {
    pub side: Side,
    /// Position in its binding list
    pub index: usize,
    pub pattern_type: SkippedType,
}

impl fmt::Display for SkippedPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{} ({})", self.side, self.index, self.pattern_type)
    }
}

/// Result of translating one pattern
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Translated {
    /// Zero, one or two events; zero only for the `None` pattern type
    Events(Vec<MidiEvent>),
    Unsupported,
}

impl Translated {
    pub(crate) fn none() -> Self {
        Translated::Events(Vec::new())
    }

    pub(crate) fn one(event: MidiEvent) -> Self {
        Translated::Events(vec![event])
    }

    pub(crate) fn pair(first: MidiEvent, second: MidiEvent) -> Self {
        Translated::Events(vec![first, second])
    }
}

/// Send and receive events of one object, before merging
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Translation {
    pub send: Vec<MidiEvent>,
    pub receive: Vec<MidiEvent>,
    pub skipped: Vec<SkippedPattern>,
}

impl Translation {
    /// Merge into the final ordered event list
    pub fn merged(self) -> Vec<MidiEvent> {
        merge_events(self.send, self.receive)
    }

    fn add_senders(
        &mut self,
        side: Side,
        patterns: &[SenderPattern],
        rule: impl Fn(&SenderPattern) -> Translated,
    ) {
        for (index, pattern) in patterns.iter().enumerate() {
            match rule(pattern) {
                Translated::Events(events) => self.send.extend(events),
                Translated::Unsupported => self.skipped.push(SkippedPattern {
                    side,
                    index,
                    pattern_type: SkippedType::Sender(pattern.pattern_type),
                }),
            }
        }
    }

    fn add_receivers(
        &mut self,
        patterns: &[ReceiverPattern],
        rule: impl Fn(&ReceiverPattern) -> Translated,
    ) {
        for (index, pattern) in patterns.iter().enumerate() {
            match rule(pattern) {
                Translated::Events(events) => self.receive.extend(events),
                Translated::Unsupported => self.skipped.push(SkippedPattern {
                    side: Side::Receive,
                    index,
                    pattern_type: SkippedType::Receiver(pattern.pattern_type),
                }),
            }
        }
    }
}

/// Translate the bindings of `object` according to its role
pub fn translate_object(object: &dyn MidiConfigurable, object_type: ObjectType) -> Translation {
    let senders = object.sender().map(|s| s.events.as_slice()).unwrap_or_default();
    let receivers = object.receiver().map(|r| r.events.as_slice()).unwrap_or_default();
    let division_senders = object
        .division_sender()
        .map(|s| s.events.as_slice())
        .unwrap_or_default();

    let mut translation = Translation::default();
    match object_type {
        ObjectType::Unknown => {}
        ObjectType::Button => {
            translation.add_senders(Side::Send, senders, button::send);
            translation.add_receivers(receivers, button::receive);
        }
        ObjectType::Label => {
            translation.add_senders(Side::Send, senders, label::send);
            translation.add_receivers(receivers, label::receive);
        }
        ObjectType::Enclosure => {
            translation.add_senders(Side::Send, senders, enclosure::send);
            translation.add_receivers(receivers, enclosure::receive);
        }
        ObjectType::Manual | ObjectType::Rank => {
            translation.add_senders(Side::Send, senders, keys::send);
            translation.add_senders(Side::DivisionSend, division_senders, keys::division_send);
            translation.add_receivers(receivers, keys::receive);
        }
    }

    for skipped in &translation.skipped {
        debug!(
            "No {} translation for {} pattern of '{}'",
            object_type,
            skipped,
            object.id()
        );
    }

    translation
}

/// Translate and merge the bindings of `object`
pub fn events_from_object(object: &dyn MidiConfigurable, object_type: ObjectType) -> Vec<MidiEvent> {
    translate_object(object, object_type).merged()
}

/// Write canonical events back to an object as wire patterns
///
/// Reverse translation is not available; this always reports
/// [`ConvertError::ReverseUnsupported`] and leaves the object untouched.
pub fn events_to_object(
    object: &mut dyn MidiConfigurable,
    object_type: ObjectType,
    events: &[MidiEvent],
) -> Result<(), ConvertError> {
    warn!(
        "Cannot write {} events back to '{}' ({})",
        events.len(),
        object.id(),
        object_type
    );
    Err(ConvertError::ReverseUnsupported { object_type })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventType, Function};
    use crate::midi::{ReceiverBinding, ReceiverKind, SenderBinding, SenderKind};
    use crate::model::ConsoleObject;

    fn object_with(
        sender: Vec<SenderPattern>,
        receiver: Vec<ReceiverPattern>,
        division: Vec<SenderPattern>,
    ) -> ConsoleObject {
        ConsoleObject::new("obj", "Object", "Test")
            .with_sender(SenderBinding {
                kind: SenderKind::Button,
                events: sender,
            })
            .with_receiver(ReceiverBinding {
                kind: ReceiverKind::Button,
                events: receiver,
            })
            .with_division_sender(SenderBinding {
                kind: SenderKind::Manual,
                events: division,
            })
    }

    fn roles() -> [ObjectType; 5] {
        [
            ObjectType::Button,
            ObjectType::Label,
            ObjectType::Enclosure,
            ObjectType::Manual,
            ObjectType::Rank,
        ]
    }

    #[test]
    fn test_every_sender_pattern_is_translated_or_skipped() {
        for role in roles() {
            for pattern_type in SenderPatternType::ALL {
                let object = object_with(vec![SenderPattern::new(pattern_type)], vec![], vec![]);
                let translation = translate_object(&object, role);
                let produced = translation.send.len();
                let skipped = translation.skipped.len();

                assert!(translation.receive.is_empty());
                if pattern_type == SenderPatternType::None {
                    assert_eq!((produced, skipped), (0, 0), "{role} {pattern_type}");
                } else {
                    assert!(
                        (1..=2).contains(&produced) ^ (skipped == 1),
                        "{role} {pattern_type}: {produced} events, {skipped} skipped"
                    );
                }
            }
        }
    }

    #[test]
    fn test_every_receiver_pattern_is_translated_or_skipped() {
        for role in roles() {
            for pattern_type in ReceiverPatternType::ALL {
                let object = object_with(vec![], vec![ReceiverPattern::new(pattern_type)], vec![]);
                let translation = translate_object(&object, role);
                let produced = translation.receive.len();
                let skipped = translation.skipped.len();

                assert!(translation.send.is_empty());
                if pattern_type == ReceiverPatternType::None {
                    assert_eq!((produced, skipped), (0, 0), "{role} {pattern_type}");
                } else {
                    assert!(
                        (1..=2).contains(&produced) ^ (skipped == 1),
                        "{role} {pattern_type}: {produced} events, {skipped} skipped"
                    );
                }
            }
        }
    }

    #[test]
    fn test_division_senders_only_used_by_keyboards() {
        let division = vec![SenderPattern::new(SenderPatternType::Note)];
        let object = object_with(vec![], vec![], division);

        let manual = translate_object(&object, ObjectType::Manual);
        assert_eq!(manual.send.len(), 1);
        assert_eq!(manual.send[0].send_function, Function::DivisionKeyPress);

        let button = translate_object(&object, ObjectType::Button);
        assert!(button.send.is_empty());
        assert!(button.skipped.is_empty());
    }

    #[test]
    fn test_unknown_role_translates_nothing() {
        let object = object_with(
            vec![SenderPattern::new(SenderPatternType::Note)],
            vec![ReceiverPattern::new(ReceiverPatternType::Note)],
            vec![],
        );
        assert_eq!(translate_object(&object, ObjectType::Unknown), Translation::default());
    }

    #[test]
    fn test_skipped_pattern_records_position() {
        let object = object_with(
            vec![
                SenderPattern::new(SenderPatternType::Ctrl),
                SenderPattern::new(SenderPatternType::NoteNoVelocity),
            ],
            vec![],
            vec![],
        );
        let translation = translate_object(&object, ObjectType::Button);
        assert_eq!(translation.send.len(), 2);
        assert_eq!(
            translation.skipped,
            vec![SkippedPattern {
                side: Side::Send,
                index: 1,
                pattern_type: SkippedType::Sender(SenderPatternType::NoteNoVelocity),
            }]
        );
        assert_eq!(
            translation.skipped[0].to_string(),
            "send #1 (note-no-velocity)"
        );
    }

    #[test]
    fn test_button_send_and_receive_merge() {
        let mut send = SenderPattern::new(SenderPatternType::CtrlOn);
        send.key = 7;
        send.high_value = 127;
        let mut receive = ReceiverPattern::new(ReceiverPatternType::CtrlChangeFixedOn);
        receive.key = 7;
        receive.high_value = 127;
        receive.debounce_time = 5;

        let object = object_with(vec![send], vec![receive], vec![]);
        let events = events_from_object(&object, ObjectType::Button);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, EventType::ControlChange);
        assert_eq!(events[0].send_function, Function::On);
        assert_eq!(events[0].receive_function, Function::Toggle);
        assert_eq!(events[0].debounce_time, 5);
    }

    #[test]
    fn test_reverse_translation_is_reported_unsupported() {
        let mut object = ConsoleObject::new("sw", "Swell", "Enclosure");
        let before = object.clone();
        let result = events_to_object(&mut object, ObjectType::Enclosure, &[]);
        assert_eq!(
            result,
            Err(ConvertError::ReverseUnsupported {
                object_type: ObjectType::Enclosure
            })
        );
        assert_eq!(object, before);
    }
}
