//! Console model consumed by the binding engine
//!
//! Configurable objects are seen through [`MidiConfigurable`]. Divisions and
//! panels only refer to objects by identity.

use crate::midi::{ReceiverBinding, SenderBinding};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a configurable console object
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Read-only access to an object carrying MIDI bindings
pub trait MidiConfigurable: fmt::Debug + Send + Sync {
    fn id(&self) -> &ObjectId;

    /// Name shown to the user
    fn midi_name(&self) -> &str;

    /// Object category, e.g. "Drawstop" or "Manual"
    fn midi_type(&self) -> &str;

    /// Section of the organ definition file
    fn odf_section(&self) -> &str;

    fn receiver(&self) -> Option<&ReceiverBinding>;

    fn sender(&self) -> Option<&SenderBinding>;

    /// Sender for key presses of the object's whole division
    fn division_sender(&self) -> Option<&SenderBinding> {
        None
    }
}

/// Plain configurable object loaded from an organ description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleObject {
    pub id: ObjectId,
    pub name: String,
    #[serde(rename = "type")]
    pub object_type: String,
    #[serde(default)]
    pub odf_section: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<ReceiverBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<SenderBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub division_sender: Option<SenderBinding>,
}

impl ConsoleObject {
    pub fn new(id: impl Into<String>, name: impl Into<String>, object_type: impl Into<String>) -> Self {
        Self {
            id: ObjectId::new(id),
            name: name.into(),
            object_type: object_type.into(),
            odf_section: String::new(),
            receiver: None,
            sender: None,
            division_sender: None,
        }
    }

    pub fn with_sender(mut self, sender: SenderBinding) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn with_receiver(mut self, receiver: ReceiverBinding) -> Self {
        self.receiver = Some(receiver);
        self
    }

    pub fn with_division_sender(mut self, sender: SenderBinding) -> Self {
        self.division_sender = Some(sender);
        self
    }
}

impl MidiConfigurable for ConsoleObject {
    fn id(&self) -> &ObjectId {
        &self.id
    }

    fn midi_name(&self) -> &str {
        &self.name
    }

    fn midi_type(&self) -> &str {
        &self.object_type
    }

    fn odf_section(&self) -> &str {
        &self.odf_section
    }

    fn receiver(&self) -> Option<&ReceiverBinding> {
        self.receiver.as_ref()
    }

    fn sender(&self) -> Option<&SenderBinding> {
        self.sender.as_ref()
    }

    fn division_sender(&self) -> Option<&SenderBinding> {
        self.division_sender.as_ref()
    }
}

/// A manual or pedal and the objects it owns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Division {
    pub name: String,
    /// The division's own configurable object (its keyboard)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<ObjectId>,
    pub couplers: Vec<ObjectId>,
    pub divisionals: Vec<ObjectId>,
    pub stops: Vec<ObjectId>,
    pub switches: Vec<ObjectId>,
    pub tremulants: Vec<ObjectId>,
}

impl Division {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Every object associated with this division, its own object first
    pub fn members(&self) -> impl Iterator<Item = &ObjectId> {
        self.object
            .iter()
            .chain(&self.couplers)
            .chain(&self.divisionals)
            .chain(&self.stops)
            .chain(&self.switches)
            .chain(&self.tremulants)
    }
}

/// A display surface hosting console controls
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Panel {
    pub name: String,
    pub controls: Vec<ObjectId>,
}

impl Panel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            controls: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_division_members_order() {
        let division = Division {
            name: "Great".to_string(),
            object: Some("great".into()),
            couplers: vec!["gt-sw".into()],
            divisionals: vec!["gt-d1".into()],
            stops: vec!["gt-p8".into(), "gt-o4".into()],
            switches: vec![],
            tremulants: vec!["gt-trem".into()],
        };
        let ids: Vec<&str> = division.members().map(ObjectId::as_str).collect();
        assert_eq!(ids, vec!["great", "gt-sw", "gt-d1", "gt-p8", "gt-o4", "gt-trem"]);
    }

    #[test]
    fn test_console_object_accessors() {
        let object = ConsoleObject::new("p8", "Principal 8'", "Drawstop");
        assert_eq!(object.id().as_str(), "p8");
        assert_eq!(object.midi_name(), "Principal 8'");
        assert!(object.sender().is_none());
        assert!(object.division_sender().is_none());
    }
}
