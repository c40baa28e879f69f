//! Object role classification
//!
//! The role of a console object follows from the kinds of its sender and
//! receiver alone. The role selects the translation rules for its patterns.

use crate::midi::{ReceiverKind, SenderKind};
use crate::model::MidiConfigurable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical role of a console object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    Button,
    Label,
    Enclosure,
    Manual,
    Rank,
    Unknown,
}

impl ObjectType {
    pub fn all() -> &'static [ObjectType] {
        &[
            ObjectType::Button,
            ObjectType::Label,
            ObjectType::Enclosure,
            ObjectType::Manual,
            ObjectType::Rank,
            ObjectType::Unknown,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Button => "Button",
            ObjectType::Label => "Label",
            ObjectType::Enclosure => "Enclosure",
            ObjectType::Manual => "Manual",
            ObjectType::Rank => "Rank",
            ObjectType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify from binding kinds
///
/// `_division_sender` is accepted so callers can pass the full binding shape;
/// it never changes the outcome.
pub fn classify(
    sender: Option<SenderKind>,
    receiver: Option<ReceiverKind>,
    _division_sender: Option<SenderKind>,
) -> ObjectType {
    match (sender, receiver) {
        (
            Some(SenderKind::Button),
            Some(ReceiverKind::Drawstop | ReceiverKind::Button | ReceiverKind::Setter),
        ) => ObjectType::Button,
        (Some(SenderKind::Label), None) => ObjectType::Label,
        (Some(SenderKind::Enclosure), Some(ReceiverKind::Enclosure)) => ObjectType::Enclosure,
        (Some(SenderKind::Manual), Some(ReceiverKind::Manual)) => ObjectType::Manual,
        (Some(SenderKind::Manual), None) => ObjectType::Rank,
        _ => ObjectType::Unknown,
    }
}

/// Classify a configurable object
pub fn classify_object(object: &dyn MidiConfigurable) -> ObjectType {
    classify(
        object.sender().map(|s| s.kind),
        object.receiver().map(|r| r.kind),
        object.division_sender().map(|s| s.kind),
    )
}
