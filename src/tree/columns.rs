//! Table columns of the binding tree

use serde::Serialize;
use std::fmt;

/// Column of the binding table, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    Type,
    Division,
    Panel,
    OdfSection,
    ReceiveFunction,
    SendFunction,
    MidiDevice,
    MidiChannel,
    MidiEventType,
    Low,
    High,
    Number,
    Min,
    Max,
    DebounceTime,
}

impl Column {
    pub const ALL: [Column; 16] = [
        Column::Name,
        Column::Type,
        Column::Division,
        Column::Panel,
        Column::OdfSection,
        Column::ReceiveFunction,
        Column::SendFunction,
        Column::MidiDevice,
        Column::MidiChannel,
        Column::MidiEventType,
        Column::Low,
        Column::High,
        Column::Number,
        Column::Min,
        Column::Max,
        Column::DebounceTime,
    ];

    pub fn from_index(index: usize) -> Option<Column> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn title(self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Type => "Type",
            Column::Division => "Division",
            Column::Panel => "Panel",
            Column::OdfSection => "ODF Section",
            Column::ReceiveFunction => "Receive",
            Column::SendFunction => "Send",
            Column::MidiDevice => "Device",
            Column::MidiChannel => "Ch.",
            Column::MidiEventType => "Event",
            Column::Low => "Low",
            Column::High => "High",
            Column::Number => "No.",
            Column::Min => "Min",
            Column::Max => "Max",
            Column::DebounceTime => "Deb.",
        }
    }

    /// Integer columns, right aligned when printed
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Column::MidiChannel
                | Column::Low
                | Column::High
                | Column::Number
                | Column::Min
                | Column::Max
                | Column::DebounceTime
        )
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Cell content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ColumnValue {
    Text(String),
    Int(i64),
}

impl ColumnValue {
    pub fn text(value: impl Into<String>) -> Self {
        ColumnValue::Text(value.into())
    }

    pub fn int(value: impl Into<i64>) -> Self {
        ColumnValue::Int(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ColumnValue::Text(text) => Some(text),
            ColumnValue::Int(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ColumnValue::Int(value) => Some(*value),
            ColumnValue::Text(_) => None,
        }
    }
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnValue::Text(text) => f.write_str(text),
            ColumnValue::Int(value) => write!(f, "{}", value),
        }
    }
}
