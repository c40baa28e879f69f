//! Object wrappers and the association pass
//!
//! [`ObjectCollection::collect`] classifies and translates every configurable
//! object once, then associates the resulting wrappers with their division and
//! the panels showing them.

use crate::classify::{classify_object, ObjectType};
use crate::convert::{translate_object, SkippedPattern};
use crate::event::MidiEvent;
use crate::model::{Division, MidiConfigurable, ObjectId, Panel};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Position of a division in its collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DivisionId(pub usize);

/// Position of a panel in its collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(pub usize);

/// One configurable object with its role, memberships and merged events
#[derive(Debug, Clone)]
pub struct ObjectWrapper {
    object: Arc<dyn MidiConfigurable>,
    object_type: ObjectType,
    division: Option<DivisionId>,
    panels: Vec<PanelId>,
    events: Vec<MidiEvent>,
    skipped: Vec<SkippedPattern>,
}

impl ObjectWrapper {
    /// Classify and translate `object`; no memberships yet
    pub fn new(object: Arc<dyn MidiConfigurable>) -> Self {
        let object_type = classify_object(object.as_ref());
        let translation = translate_object(object.as_ref(), object_type);
        let skipped = translation.skipped.clone();
        let events = translation.merged();

        Self {
            object,
            object_type,
            division: None,
            panels: Vec::new(),
            events,
            skipped,
        }
    }

    pub fn object(&self) -> &dyn MidiConfigurable {
        self.object.as_ref()
    }

    pub fn id(&self) -> &ObjectId {
        self.object.id()
    }

    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    pub fn name(&self) -> &str {
        self.object.midi_name()
    }

    pub fn midi_type(&self) -> &str {
        self.object.midi_type()
    }

    pub fn odf_section(&self) -> &str {
        self.object.odf_section()
    }

    pub fn division(&self) -> Option<DivisionId> {
        self.division
    }

    /// Compare against a division handle, `None` meaning "no division"
    pub fn is_division(&self, division: Option<DivisionId>) -> bool {
        self.division == division
    }

    pub fn panels(&self) -> &[PanelId] {
        &self.panels
    }

    pub fn is_on_panel(&self, panel: PanelId) -> bool {
        self.panels.contains(&panel)
    }

    pub fn is_not_on_any_panel(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn events(&self) -> &[MidiEvent] {
        &self.events
    }

    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Patterns the role had no translation for
    pub fn skipped(&self) -> &[SkippedPattern] {
        &self.skipped
    }

    fn set_division(&mut self, division: DivisionId) {
        self.division = Some(division);
    }

    fn add_panel(&mut self, panel: PanelId) {
        if !self.is_on_panel(panel) {
            self.panels.push(panel);
        }
    }
}

/// All wrappers of an organ with the divisions and panels they refer to
#[derive(Debug, Clone, Default)]
pub struct ObjectCollection {
    wrappers: Vec<ObjectWrapper>,
    divisions: Vec<Division>,
    panels: Vec<Panel>,
}

impl ObjectCollection {
    /// Wrap every object, then associate divisions and panels
    ///
    /// An object listed by several divisions belongs to the last one. A
    /// reference to an unknown object id is ignored.
    pub fn collect(
        objects: Vec<Arc<dyn MidiConfigurable>>,
        divisions: Vec<Division>,
        panels: Vec<Panel>,
    ) -> Self {
        let mut wrappers: Vec<ObjectWrapper> = objects.into_iter().map(ObjectWrapper::new).collect();

        let index: HashMap<ObjectId, usize> = wrappers
            .iter()
            .enumerate()
            .map(|(i, wrapper)| (wrapper.id().clone(), i))
            .collect();

        for (d, division) in divisions.iter().enumerate() {
            for member in division.members() {
                match index.get(member) {
                    Some(&i) => wrappers[i].set_division(DivisionId(d)),
                    None => debug!("Division '{}' lists unknown object '{}'", division.name, member),
                }
            }
        }

        for (p, panel) in panels.iter().enumerate() {
            for control in &panel.controls {
                match index.get(control) {
                    Some(&i) => wrappers[i].add_panel(PanelId(p)),
                    None => debug!("Panel '{}' shows unknown object '{}'", panel.name, control),
                }
            }
        }

        let skipped: usize = wrappers.iter().map(|w| w.skipped.len()).sum();
        info!(
            "Collected {} objects ({} divisions, {} panels, {} skipped patterns)",
            wrappers.len(),
            divisions.len(),
            panels.len(),
            skipped
        );

        Self {
            wrappers,
            divisions,
            panels,
        }
    }

    pub fn wrappers(&self) -> &[ObjectWrapper] {
        &self.wrappers
    }

    pub fn wrapper(&self, index: usize) -> Option<&ObjectWrapper> {
        self.wrappers.get(index)
    }

    pub fn find(&self, id: &ObjectId) -> Option<&ObjectWrapper> {
        self.wrappers.iter().find(|w| w.id() == id)
    }

    pub fn divisions(&self) -> &[Division] {
        &self.divisions
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn division_ids(&self) -> impl Iterator<Item = DivisionId> {
        (0..self.divisions.len()).map(DivisionId)
    }

    pub fn panel_ids(&self) -> impl Iterator<Item = PanelId> {
        (0..self.panels.len()).map(PanelId)
    }

    pub fn division_name(&self, division: DivisionId) -> &str {
        &self.divisions[division.0].name
    }

    pub fn panel_name(&self, panel: PanelId) -> &str {
        &self.panels[panel.0].name
    }

    /// Division name of a wrapper, empty without division
    pub fn division_name_of(&self, wrapper: &ObjectWrapper) -> &str {
        wrapper
            .division
            .map(|d| self.division_name(d))
            .unwrap_or_default()
    }

    /// Panel names of a wrapper joined by ", "
    pub fn panel_names_of(&self, wrapper: &ObjectWrapper) -> String {
        wrapper
            .panels
            .iter()
            .map(|p| self.panel_name(*p))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn len(&self) -> usize {
        self.wrappers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wrappers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::midi::{
        ReceiverBinding, ReceiverKind, ReceiverPattern, ReceiverPatternType, SenderBinding, SenderKind,
        SenderPattern, SenderPatternType,
    };
    use crate::model::ConsoleObject;

    fn drawstop(id: &str) -> Arc<dyn MidiConfigurable> {
        Arc::new(
            ConsoleObject::new(id, id.to_uppercase(), "Drawstop")
                .with_sender(SenderBinding {
                    kind: SenderKind::Button,
                    events: vec![SenderPattern::new(SenderPatternType::Note)],
                })
                .with_receiver(ReceiverBinding {
                    kind: ReceiverKind::Drawstop,
                    events: vec![ReceiverPattern::new(ReceiverPatternType::NoteNoVelocity)],
                }),
        )
    }

    fn bare(id: &str) -> Arc<dyn MidiConfigurable> {
        Arc::new(ConsoleObject::new(id, id, "Switch"))
    }

    fn ids(list: &[&str]) -> Vec<ObjectId> {
        list.iter().map(|id| ObjectId::from(*id)).collect()
    }

    #[test]
    fn test_wrapper_classifies_and_translates() {
        let wrapper = ObjectWrapper::new(drawstop("p8"));
        assert_eq!(wrapper.object_type(), ObjectType::Button);
        assert_eq!(wrapper.name(), "P8");
        assert_eq!(wrapper.midi_type(), "Drawstop");
        assert_eq!(wrapper.events().len(), 2);
        assert!(wrapper.has_events());
        assert_eq!(wrapper.skipped().len(), 1);
        assert!(wrapper.is_not_on_any_panel());
        assert!(wrapper.is_division(None));
    }

    #[test]
    fn test_division_membership_from_every_category() {
        let mut great = Division::new("Great");
        great.object = Some("great".into());
        great.couplers = ids(&["coupler"]);
        great.divisionals = ids(&["divisional"]);
        great.stops = ids(&["stop"]);
        great.switches = ids(&["switch"]);
        great.tremulants = ids(&["tremulant"]);

        let names = ["great", "coupler", "divisional", "stop", "switch", "tremulant", "loose"];
        let objects = names.iter().map(|id| bare(id)).collect();
        let collection = ObjectCollection::collect(objects, vec![great], vec![]);

        for wrapper in collection.wrappers() {
            if wrapper.id().as_str() == "loose" {
                assert_eq!(wrapper.division(), None);
                assert_eq!(collection.division_name_of(wrapper), "");
            } else {
                assert_eq!(wrapper.division(), Some(DivisionId(0)));
                assert_eq!(collection.division_name_of(wrapper), "Great");
            }
        }
    }

    #[test]
    fn test_last_division_wins() {
        let mut great = Division::new("Great");
        great.stops = ids(&["shared"]);
        let mut swell = Division::new("Swell");
        swell.couplers = ids(&["shared"]);

        let collection = ObjectCollection::collect(vec![bare("shared")], vec![great, swell], vec![]);
        assert!(collection.wrappers()[0].is_division(Some(DivisionId(1))));
    }

    #[test]
    fn test_panel_membership_is_deduplicated() {
        let mut main = Panel::new("Main");
        main.controls = ids(&["a", "a", "b"]);
        let mut side = Panel::new("Side");
        side.controls = ids(&["a", "ghost"]);

        let collection = ObjectCollection::collect(vec![bare("a"), bare("b"), bare("c")], vec![], vec![main, side]);
        let a = collection.find(&"a".into()).map(|w| w.panels().to_vec());
        assert_eq!(a, Some(vec![PanelId(0), PanelId(1)]));

        let wrapper = &collection.wrappers()[0];
        assert!(wrapper.is_on_panel(PanelId(1)));
        assert_eq!(collection.panel_names_of(wrapper), "Main, Side");
        assert!(collection.wrappers()[2].is_not_on_any_panel());
        assert_eq!(collection.panel_names_of(&collection.wrappers()[2]), "");
    }
}
