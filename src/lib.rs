//! Organ MIDI bindings
//!
//! Classifies the console objects of a virtual pipe organ, translates their raw
//! MIDI sender and receiver patterns into canonical [`MidiEvent`]s, merges the
//! two directions, and groups the result by panel and division.

pub mod classify;
pub mod cli;
pub mod config;
pub mod convert;
pub mod event;
pub mod export;
pub mod midi;
pub mod model;
pub mod tree;
pub mod wrapper;

pub use classify::ObjectType;
pub use config::OrganConfig;
pub use event::{EventType, Function, MidiEvent};
pub use model::{ConsoleObject, Division, MidiConfigurable, ObjectId, Panel};
pub use tree::{Column, ColumnValue, Forest, GroupBy, NodeId, NodeKind};
pub use wrapper::{ObjectCollection, ObjectWrapper};
