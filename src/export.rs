//! Table export of a binding tree
//!
//! Flattens a [`Forest`] depth first, with every object expanded to its events,
//! and writes the rows as CSV or JSON.

use crate::tree::{Column, ColumnValue, Forest, NodeId, NodeKind};
use serde_json::{Map, Value};
use std::io::Write;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV output failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which node a row shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Group,
    Object,
    Event,
}

impl RowKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RowKind::Group => "group",
            RowKind::Object => "object",
            RowKind::Event => "event",
        }
    }
}

/// One flattened node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Nesting level, 0 for roots
    pub depth: usize,
    pub kind: RowKind,
    /// One cell per [`Column::ALL`] entry
    pub cells: Vec<Option<ColumnValue>>,
}

impl Row {
    pub fn cell(&self, column: Column) -> Option<&ColumnValue> {
        self.cells.get(column.index()).and_then(Option::as_ref)
    }
}

/// Flatten the forest depth first, expanding every object
pub fn rows(forest: &mut Forest<'_>) -> Vec<Row> {
    let mut rows = Vec::new();
    let roots = forest.roots().to_vec();
    for root in roots {
        push_rows(forest, root, 0, &mut rows);
    }
    debug!("Flattened {} rows", rows.len());
    rows
}

fn push_rows(forest: &mut Forest<'_>, id: NodeId, depth: usize, rows: &mut Vec<Row>) {
    let kind = match forest.kind(id) {
        NodeKind::Group { .. } => RowKind::Group,
        NodeKind::Object { .. } => RowKind::Object,
        NodeKind::Event { .. } => RowKind::Event,
    };
    rows.push(Row {
        depth,
        kind,
        cells: Column::ALL.iter().map(|column| forest.value(id, *column)).collect(),
    });

    let children = forest.children(id).to_vec();
    for child in children {
        push_rows(forest, child, depth + 1, rows);
    }
}

/// Write rows as CSV, headed by the column titles
pub fn write_csv<W: Write>(rows: &[Row], writer: W) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(Column::ALL.iter().map(|column| column.title()))?;
    for row in rows {
        csv.write_record(row.cells.iter().map(|cell| match cell {
            Some(value) => value.to_string(),
            None => String::new(),
        }))?;
    }
    csv.flush()?;
    Ok(())
}

/// Write rows as a JSON array; empty cells are left out
pub fn write_json<W: Write>(rows: &[Row], writer: W) -> Result<(), ExportError> {
    let records: Vec<Value> = rows.iter().map(json_record).collect();
    serde_json::to_writer_pretty(writer, &records)?;
    Ok(())
}

fn json_record(row: &Row) -> Value {
    let mut record = Map::new();
    record.insert("depth".to_string(), Value::from(row.depth));
    record.insert("kind".to_string(), Value::from(row.kind.as_str()));
    for (column, cell) in Column::ALL.iter().zip(&row.cells) {
        let value = match cell {
            Some(ColumnValue::Text(text)) => Value::from(text.as_str()),
            Some(ColumnValue::Int(number)) => Value::from(*number),
            None => continue,
        };
        record.insert(column.title().to_string(), value);
    }
    Value::Object(record)
}
