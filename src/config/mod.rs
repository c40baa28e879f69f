//! Organ description
//!
//! Handles loading, validating and hot-reloading of the YAML file describing
//! the console objects of an organ, its divisions and its panels.

pub mod watcher;

use crate::midi::{ReceiverPattern, SenderPattern};
use crate::model::{ConsoleObject, Division, MidiConfigurable, ObjectId, Panel};
use crate::tree::GroupBy;
use crate::wrapper::ObjectCollection;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::fs;

pub use watcher::DescriptionWatcher;

/// Root of an organ description
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct OrganConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub divisions: Vec<Division>,
    #[serde(default)]
    pub panels: Vec<Panel>,
    pub objects: Vec<ConsoleObject>,
}

/// Presentation defaults
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ViewConfig {
    #[serde(default)]
    pub group_by: GroupBy,
}

impl OrganConfig {
    /// Load an organ description from file with validation
    pub async fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read organ description: {}", path))?;

        Self::parse(&contents).with_context(|| format!("Invalid organ description: {}", path))
    }

    /// Parse and validate YAML text
    pub fn parse(contents: &str) -> Result<Self> {
        let config: OrganConfig =
            serde_yaml::from_str(contents).context("Failed to parse YAML organ description")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate identities, references and pattern fields
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for object in &self.objects {
            if object.id.as_str().is_empty() {
                anyhow::bail!("Object '{}' has an empty id", object.name);
            }
            if !ids.insert(&object.id) {
                anyhow::bail!("Duplicate object id '{}'", object.id);
            }
            validate_object(object).with_context(|| format!("Invalid object '{}'", object.id))?;
        }

        for (idx, division) in self.divisions.iter().enumerate() {
            if division.name.is_empty() {
                anyhow::bail!("Division {} name cannot be empty", idx);
            }
            for member in division.members() {
                if !ids.contains(member) {
                    anyhow::bail!(
                        "Division '{}' refers to unknown object '{}'",
                        division.name,
                        member
                    );
                }
            }
        }

        for (idx, panel) in self.panels.iter().enumerate() {
            if panel.name.is_empty() {
                anyhow::bail!("Panel {} name cannot be empty", idx);
            }
            for control in &panel.controls {
                if !ids.contains(control) {
                    anyhow::bail!("Panel '{}' refers to unknown object '{}'", panel.name, control);
                }
            }
        }

        Ok(())
    }

    /// Look up an object by id
    pub fn object(&self, id: &ObjectId) -> Option<&ConsoleObject> {
        self.objects.iter().find(|object| &object.id == id)
    }

    /// Classify, translate and associate every object of the description
    pub fn build_collection(&self) -> ObjectCollection {
        let objects = self
            .objects
            .iter()
            .map(|object| Arc::new(object.clone()) as Arc<dyn MidiConfigurable>)
            .collect();
        ObjectCollection::collect(objects, self.divisions.clone(), self.panels.clone())
    }
}

fn validate_object(object: &ConsoleObject) -> Result<()> {
    for sender in [&object.sender, &object.division_sender].into_iter().flatten() {
        for (idx, pattern) in sender.events.iter().enumerate() {
            validate_sender(pattern)
                .with_context(|| format!("Invalid {} sender pattern #{}", sender.kind, idx))?;
        }
    }

    if let Some(receiver) = &object.receiver {
        for (idx, pattern) in receiver.events.iter().enumerate() {
            validate_receiver(pattern)
                .with_context(|| format!("Invalid {} receiver pattern #{}", receiver.kind, idx))?;
        }
    }

    Ok(())
}

fn validate_channel(channel: i32) -> Result<()> {
    if !(-1..=16).contains(&channel) {
        anyhow::bail!("MIDI channel {} is invalid (must be -1..16)", channel);
    }
    Ok(())
}

fn validate_non_negative(fields: &[(&str, i32)]) -> Result<()> {
    for (name, value) in fields {
        if *value < 0 {
            anyhow::bail!("{} cannot be negative (got {})", name, value);
        }
    }
    Ok(())
}

fn validate_sender(pattern: &SenderPattern) -> Result<()> {
    validate_channel(pattern.channel)?;
    validate_non_negative(&[
        ("key", pattern.key),
        ("low_value", pattern.low_value),
        ("high_value", pattern.high_value),
        ("start", pattern.start),
    ])?;
    if pattern.length < 1 {
        anyhow::bail!("Display length {} is invalid (must be at least 1)", pattern.length);
    }
    if pattern.start.checked_add(pattern.length - 1).is_none() {
        anyhow::bail!(
            "Display range starting at {} with length {} is out of range",
            pattern.start,
            pattern.length
        );
    }
    Ok(())
}

/// `key` is a transpose for key press patterns and may be negative
fn validate_receiver(pattern: &ReceiverPattern) -> Result<()> {
    validate_channel(pattern.channel)?;
    validate_non_negative(&[
        ("low_key", pattern.low_key),
        ("high_key", pattern.high_key),
        ("low_value", pattern.low_value),
        ("high_value", pattern.high_value),
    ])
}
