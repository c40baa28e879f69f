//! Presentation tree of wrapped objects
//!
//! A [`Forest`] borrows an [`ObjectCollection`] and arranges its wrappers under
//! group nodes according to a [`GroupBy`] mode. Nodes live in an arena and are
//! addressed by [`NodeId`]. Group children are built with the forest; the event
//! children of an object node are built on first access and cached.
//!
//! Regrouping means building a new forest.

mod columns;


pub use columns::{Column, ColumnValue};

use crate::wrapper::{DivisionId, ObjectCollection, ObjectWrapper, PanelId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Bucket name for objects on no panel
pub const NO_PANEL: &str = "No Panel";
/// Bucket name for objects outside every division
pub const NO_DIVISION: &str = "Organ";

/// How object nodes are grouped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GroupBy {
    /// Flat list of objects
    None,
    Panel,
    Division,
    /// Panels, then divisions inside each panel
    #[default]
    PanelThenDivision,
}

impl FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as clap::ValueEnum>::from_str(s, true)
            .map_err(|_| format!("unknown grouping '{}' (none, panel, division, panel-then-division)", s))
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GroupBy::None => "none",
            GroupBy::Panel => "panel",
            GroupBy::Division => "division",
            GroupBy::PanelThenDivision => "panel-then-division",
        };
        f.write_str(name)
    }
}

/// Arena handle of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a node shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Group { name: String },
    /// Index into the collection's wrappers
    Object { wrapper: usize },
    /// One merged event of a wrapper
    Event { wrapper: usize, event: usize },
}

#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    /// `None` until the children of an object node are first requested
    children: Option<Vec<NodeId>>,
}

impl Node {
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Restriction of a bucket along one grouping axis
#[derive(Debug, Clone, Copy)]
enum Scope<T> {
    Any,
    /// `None` is the "no panel" / "no division" bucket
    Only(Option<T>),
}

/// Grouped node tree over an object collection
#[derive(Debug)]
pub struct Forest<'a> {
    collection: &'a ObjectCollection,
    group_by: GroupBy,
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl<'a> Forest<'a> {
    pub fn build(collection: &'a ObjectCollection, group_by: GroupBy) -> Self {
        let mut forest = Self {
            collection,
            group_by,
            nodes: Vec::new(),
            roots: Vec::new(),
        };

        let roots: Vec<NodeId> = match group_by {
            GroupBy::None => (0..collection.len())
                .map(|wrapper| forest.push(NodeKind::Object { wrapper }, None, None))
                .collect(),
            GroupBy::Panel => forest
                .panel_buckets()
                .into_iter()
                .filter_map(|(name, panel)| forest.object_group(name, None, Scope::Only(panel), Scope::Any))
                .collect(),
            GroupBy::Division => forest
                .division_buckets()
                .into_iter()
                .filter_map(|(name, division)| {
                    forest.object_group(name, None, Scope::Any, Scope::Only(division))
                })
                .collect(),
            GroupBy::PanelThenDivision => {
                let mut roots = Vec::new();
                for (panel_name, panel) in forest.panel_buckets() {
                    if forest.matching(Scope::Only(panel), Scope::Any).is_empty() {
                        continue;
                    }
                    let group = forest.push(NodeKind::Group { name: panel_name }, None, Some(Vec::new()));
                    let divisions: Vec<NodeId> = forest
                        .division_buckets()
                        .into_iter()
                        .filter_map(|(name, division)| {
                            forest.object_group(name, Some(group), Scope::Only(panel), Scope::Only(division))
                        })
                        .collect();
                    forest.nodes[group.0].children = Some(divisions);
                    roots.push(group);
                }
                roots
            }
        };
        forest.roots = roots;

        debug!(
            "Built {} tree: {} roots, {} nodes",
            group_by,
            forest.roots.len(),
            forest.nodes.len()
        );
        forest
    }

    pub fn collection(&self) -> &'a ObjectCollection {
        self.collection
    }

    pub fn group_by(&self) -> GroupBy {
        self.group_by
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Checked lookup
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Children of a node, building the event nodes of an object on first call
    pub fn children(&mut self, id: NodeId) -> &[NodeId] {
        if self.nodes[id.0].children.is_none() {
            let built = self.event_nodes(id);
            self.nodes[id.0].children = Some(built);
        }
        self.nodes[id.0].children.as_deref().unwrap_or_default()
    }

    /// Children already built, without expanding
    pub fn built_children(&self, id: NodeId) -> Option<&[NodeId]> {
        self.nodes[id.0].children.as_deref()
    }

    /// Whether the node can have children
    pub fn is_container(&self, id: NodeId) -> bool {
        let node = &self.nodes[id.0];
        match &node.kind {
            NodeKind::Group { .. } => node.children.as_ref().is_some_and(|c| !c.is_empty()),
            NodeKind::Object { wrapper } => self.collection.wrappers()[*wrapper].has_events(),
            NodeKind::Event { .. } => false,
        }
    }

    /// Whether the node fills columns beyond the name
    pub fn has_container_columns(&self, id: NodeId) -> bool {
        !matches!(self.nodes[id.0].kind, NodeKind::Group { .. })
    }

    /// The wrapper an object or event node shows
    pub fn wrapper(&self, id: NodeId) -> Option<&'a ObjectWrapper> {
        match self.nodes[id.0].kind {
            NodeKind::Group { .. } => None,
            NodeKind::Object { wrapper } | NodeKind::Event { wrapper, .. } => {
                self.collection.wrappers().get(wrapper)
            }
        }
    }

    pub fn name(&self, id: NodeId) -> String {
        match self.value(id, Column::Name) {
            Some(value) => value.to_string(),
            None => String::new(),
        }
    }

    pub fn value_at(&self, id: NodeId, index: usize) -> Option<ColumnValue> {
        Column::from_index(index).and_then(|column| self.value(id, column))
    }

    /// Cell content of a node; `None` for an empty cell
    pub fn value(&self, id: NodeId, column: Column) -> Option<ColumnValue> {
        let collection = self.collection;
        match &self.nodes[id.0].kind {
            NodeKind::Group { name } => match column {
                Column::Name => Some(ColumnValue::text(name.as_str())),
                _ => None,
            },
            NodeKind::Object { wrapper } => {
                let wrapper = &collection.wrappers()[*wrapper];
                match column {
                    Column::Name => Some(ColumnValue::text(wrapper.name())),
                    Column::Type => Some(ColumnValue::text(wrapper.midi_type())),
                    Column::Division => Some(ColumnValue::text(collection.division_name_of(wrapper))),
                    Column::Panel => Some(ColumnValue::text(collection.panel_names_of(wrapper))),
                    Column::OdfSection => Some(ColumnValue::text(wrapper.odf_section())),
                    _ => None,
                }
            }
            NodeKind::Event { wrapper, event } => {
                let event = &collection.wrappers()[*wrapper].events()[*event];
                match column {
                    Column::Name => Some(ColumnValue::text(event.function_label())),
                    Column::Type | Column::Division | Column::Panel | Column::OdfSection => None,
                    Column::ReceiveFunction => (!event.receive_function.is_none())
                        .then(|| ColumnValue::text(event.receive_function.name())),
                    Column::SendFunction => (!event.send_function.is_none())
                        .then(|| ColumnValue::text(event.send_function.name())),
                    Column::MidiDevice => Some(ColumnValue::text(event.device_name())),
                    Column::MidiChannel => Some(ColumnValue::int(event.channel)),
                    Column::MidiEventType => Some(ColumnValue::text(event.event_type.name())),
                    Column::Low => Some(ColumnValue::int(event.low)),
                    Column::High => Some(ColumnValue::int(event.high)),
                    Column::Number => Some(ColumnValue::int(event.number)),
                    Column::Min => Some(ColumnValue::int(event.min)),
                    Column::Max => Some(ColumnValue::int(event.max)),
                    Column::DebounceTime => Some(ColumnValue::int(event.debounce_time)),
                }
            }
        }
    }

    fn push(&mut self, kind: NodeKind, parent: Option<NodeId>, children: Option<Vec<NodeId>>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent,
            children,
        });
        id
    }

    fn event_nodes(&mut self, id: NodeId) -> Vec<NodeId> {
        let wrapper = match self.nodes[id.0].kind {
            NodeKind::Object { wrapper } => wrapper,
            NodeKind::Group { .. } | NodeKind::Event { .. } => return Vec::new(),
        };
        let count = self.collection.wrappers()[wrapper].events().len();
        (0..count)
            .map(|event| self.push(NodeKind::Event { wrapper, event }, Some(id), Some(Vec::new())))
            .collect()
    }

    fn panel_buckets(&self) -> Vec<(String, Option<PanelId>)> {
        self.collection
            .panel_ids()
            .map(|p| (self.collection.panel_name(p).to_string(), Some(p)))
            .chain(std::iter::once((NO_PANEL.to_string(), None)))
            .collect()
    }

    fn division_buckets(&self) -> Vec<(String, Option<DivisionId>)> {
        self.collection
            .division_ids()
            .map(|d| (self.collection.division_name(d).to_string(), Some(d)))
            .chain(std::iter::once((NO_DIVISION.to_string(), None)))
            .collect()
    }

    fn matching(&self, panel: Scope<PanelId>, division: Scope<DivisionId>) -> Vec<usize> {
        self.collection
            .wrappers()
            .iter()
            .enumerate()
            .filter(|(_, wrapper)| {
                let on_panel = match panel {
                    Scope::Any => true,
                    Scope::Only(Some(p)) => wrapper.is_on_panel(p),
                    Scope::Only(None) => wrapper.is_not_on_any_panel(),
                };
                let in_division = match division {
                    Scope::Any => true,
                    Scope::Only(d) => wrapper.is_division(d),
                };
                on_panel && in_division
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// A group of the matching object nodes, or nothing for an empty bucket
    fn object_group(
        &mut self,
        name: String,
        parent: Option<NodeId>,
        panel: Scope<PanelId>,
        division: Scope<DivisionId>,
    ) -> Option<NodeId> {
        let members = self.matching(panel, division);
        if members.is_empty() {
            return None;
        }
        let group = self.push(NodeKind::Group { name }, parent, Some(Vec::new()));
        let objects = members
            .into_iter()
            .map(|wrapper| self.push(NodeKind::Object { wrapper }, Some(group), None))
            .collect();
        self.nodes[group.0].children = Some(objects);
        Some(group)
    }
}
