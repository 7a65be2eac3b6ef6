//! Event tree model.
//!
//! Events are a closed set of kinds. Each kind exposes zero or more condition
//! lists, zero or more action lists and, optionally, sub-events. Traversals
//! never match on the kind directly: they go through
//! [`Event::instruction_lists_mut`] and [`Event::sub_events_mut`], so adding a
//! kind only touches this module.
//!
//! Every event carries an [`EventId`] that is unique within the process. Ids
//! are not serialized; deserialized and cloned events receive fresh ids.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::instruction::Instruction;

// ============================================================================
// Identity
// ============================================================================

/// Process-unique identifier of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EventId(pub u64);

impl EventId {
    /// Allocate a fresh id.
    pub fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        EventId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "evt_{}", self.0)
    }
}

/// Which kind of instruction list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    Conditions,
    Actions,
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListKind::Conditions => f.write_str("conditions"),
            ListKind::Actions => f.write_str("actions"),
        }
    }
}

// ============================================================================
// Event Kinds
// ============================================================================

/// Conditions, actions and sub-events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardEvent {
    #[serde(default)]
    pub conditions: Vec<Instruction>,
    #[serde(default)]
    pub actions: Vec<Instruction>,
    #[serde(default)]
    pub sub_events: Vec<Event>,
}

/// Repeats while `while_conditions` hold, then filters with `conditions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WhileEvent {
    #[serde(default)]
    pub while_conditions: Vec<Instruction>,
    #[serde(default)]
    pub conditions: Vec<Instruction>,
    #[serde(default)]
    pub actions: Vec<Instruction>,
    #[serde(default)]
    pub sub_events: Vec<Event>,
}

/// Runs `actions` when the conditions hold and `otherwise_actions` when not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BranchEvent {
    #[serde(default)]
    pub conditions: Vec<Instruction>,
    #[serde(default)]
    pub actions: Vec<Instruction>,
    #[serde(default)]
    pub otherwise_actions: Vec<Instruction>,
    #[serde(default)]
    pub sub_events: Vec<Event>,
}

/// A named folder of events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupEvent {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sub_events: Vec<Event>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentEvent {
    #[serde(default)]
    pub text: String,
}

/// The closed set of event kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    Standard(StandardEvent),
    While(WhileEvent),
    Branch(BranchEvent),
    Group(GroupEvent),
    Comment(CommentEvent),
}

// ============================================================================
// Event
// ============================================================================

/// One node of the event tree.
#[derive(Debug)]
pub struct Event {
    id: EventId,
    needs_layout_update: bool,
    pub kind: EventKind,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Event {
            id: EventId::next(),
            needs_layout_update: false,
            kind,
        }
    }

    /// A standard event with the given conditions and actions.
    pub fn standard(conditions: Vec<Instruction>, actions: Vec<Instruction>) -> Self {
        Event::new(EventKind::Standard(StandardEvent {
            conditions,
            actions,
            sub_events: Vec::new(),
        }))
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Event::new(EventKind::Comment(CommentEvent { text: text.into() }))
    }

    pub fn group(name: impl Into<String>, sub_events: Vec<Event>) -> Self {
        Event::new(EventKind::Group(GroupEvent {
            name: name.into(),
            sub_events,
        }))
    }

    /// Attach sub-events. Has no effect on kinds without sub-events.
    pub fn with_sub_events(mut self, events: Vec<Event>) -> Self {
        if let Some(sub_events) = self.sub_events_mut() {
            *sub_events = events;
        }
        self
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    /// Whether a refactoring changed this event since the flag was cleared.
    ///
    /// Editors use it to drop cached rendering sizes.
    pub fn needs_layout_update(&self) -> bool {
        self.needs_layout_update
    }

    pub fn mark_needs_layout_update(&mut self) {
        self.needs_layout_update = true;
    }

    pub fn clear_needs_layout_update(&mut self) {
        self.needs_layout_update = false;
    }

    /// All instruction lists of the given kind, in display order.
    pub fn instruction_lists(&self, kind: ListKind) -> Vec<&Vec<Instruction>> {
        match (&self.kind, kind) {
            (EventKind::Standard(e), ListKind::Conditions) => vec![&e.conditions],
            (EventKind::Standard(e), ListKind::Actions) => vec![&e.actions],
            (EventKind::While(e), ListKind::Conditions) => {
                vec![&e.while_conditions, &e.conditions]
            }
            (EventKind::While(e), ListKind::Actions) => vec![&e.actions],
            (EventKind::Branch(e), ListKind::Conditions) => vec![&e.conditions],
            (EventKind::Branch(e), ListKind::Actions) => {
                vec![&e.actions, &e.otherwise_actions]
            }
            (EventKind::Group(_), _) | (EventKind::Comment(_), _) => Vec::new(),
        }
    }

    /// Mutable counterpart of [`Event::instruction_lists`].
    pub fn instruction_lists_mut(&mut self, kind: ListKind) -> Vec<&mut Vec<Instruction>> {
        match (&mut self.kind, kind) {
            (EventKind::Standard(e), ListKind::Conditions) => vec![&mut e.conditions],
            (EventKind::Standard(e), ListKind::Actions) => vec![&mut e.actions],
            (EventKind::While(e), ListKind::Conditions) => {
                vec![&mut e.while_conditions, &mut e.conditions]
            }
            (EventKind::While(e), ListKind::Actions) => vec![&mut e.actions],
            (EventKind::Branch(e), ListKind::Conditions) => vec![&mut e.conditions],
            (EventKind::Branch(e), ListKind::Actions) => {
                vec![&mut e.actions, &mut e.otherwise_actions]
            }
            (EventKind::Group(_), _) | (EventKind::Comment(_), _) => Vec::new(),
        }
    }

    pub fn condition_lists(&self) -> Vec<&Vec<Instruction>> {
        self.instruction_lists(ListKind::Conditions)
    }

    pub fn action_lists(&self) -> Vec<&Vec<Instruction>> {
        self.instruction_lists(ListKind::Actions)
    }

    pub fn can_have_sub_events(&self) -> bool {
        self.sub_events().is_some()
    }

    pub fn sub_events(&self) -> Option<&Vec<Event>> {
        match &self.kind {
            EventKind::Standard(e) => Some(&e.sub_events),
            EventKind::While(e) => Some(&e.sub_events),
            EventKind::Branch(e) => Some(&e.sub_events),
            EventKind::Group(e) => Some(&e.sub_events),
            EventKind::Comment(_) => None,
        }
    }

    pub fn sub_events_mut(&mut self) -> Option<&mut Vec<Event>> {
        match &mut self.kind {
            EventKind::Standard(e) => Some(&mut e.sub_events),
            EventKind::While(e) => Some(&mut e.sub_events),
            EventKind::Branch(e) => Some(&mut e.sub_events),
            EventKind::Group(e) => Some(&mut e.sub_events),
            EventKind::Comment(_) => None,
        }
    }
}

impl From<EventKind> for Event {
    fn from(kind: EventKind) -> Self {
        Event::new(kind)
    }
}

impl Clone for Event {
    fn clone(&self) -> Self {
        Event {
            id: EventId::next(),
            needs_layout_update: self.needs_layout_update,
            kind: self.kind.clone(),
        }
    }
}

/// Events compare by content; ids are identity, not content.
impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Serialize for Event {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.kind.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Event {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        EventKind::deserialize(deserializer).map(Event::new)
    }
}

// ============================================================================
// Lookup
// ============================================================================

/// Find an event anywhere in `events` by id.
pub fn find_event(events: &[Event], id: EventId) -> Option<&Event> {
    for event in events {
        if event.id == id {
            return Some(event);
        }
        if let Some(found) = event.sub_events().and_then(|sub| find_event(sub, id)) {
            return Some(found);
        }
    }
    None
}

/// Mutable counterpart of [`find_event`].
pub fn find_event_mut(events: &mut [Event], id: EventId) -> Option<&mut Event> {
    for event in events {
        if event.id == id {
            return Some(event);
        }
        if let Some(found) = event
            .sub_events_mut()
            .and_then(|sub| find_event_mut(sub, id))
        {
            return Some(found);
        }
    }
    None
}

/// Count events in the tree, sub-events included.
pub fn count_events(events: &[Event]) -> usize {
    events
        .iter()
        .map(|e| 1 + e.sub_events().map_or(0, |sub| count_events(sub)))
        .sum()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn action(type_name: &str) -> Instruction {
        Instruction::new(type_name)
    }

    #[test]
    fn ids_are_unique_and_fresh_on_clone() {
        let event = Event::standard(vec![], vec![action("A")]);
        let copy = event.clone();
        assert_ne!(event.id(), copy.id());
        assert_eq!(event, copy);
    }

    #[test]
    fn list_shapes_per_kind() {
        let while_event = Event::new(EventKind::While(WhileEvent::default()));
        assert_eq!(while_event.condition_lists().len(), 2);
        assert_eq!(while_event.action_lists().len(), 1);

        let branch = Event::new(EventKind::Branch(BranchEvent::default()));
        assert_eq!(branch.condition_lists().len(), 1);
        assert_eq!(branch.action_lists().len(), 2);

        let comment = Event::comment("note");
        assert!(comment.condition_lists().is_empty());
        assert!(!comment.can_have_sub_events());

        let group = Event::group("Folder", vec![]);
        assert!(group.action_lists().is_empty());
        assert!(group.can_have_sub_events());
    }

    #[test]
    fn find_nested_event() {
        let inner = Event::standard(vec![], vec![action("Inner")]);
        let inner_id = inner.id();
        let mut events = vec![
            Event::comment("top"),
            Event::group("G", vec![Event::standard(vec![], vec![]).with_sub_events(vec![inner])]),
        ];

        assert!(find_event(&events, inner_id).is_some());
        find_event_mut(&mut events, inner_id)
            .unwrap()
            .mark_needs_layout_update();
        assert!(find_event(&events, inner_id).unwrap().needs_layout_update());
        assert!(find_event(&events, EventId(u64::MAX)).is_none());
        assert_eq!(count_events(&events), 4);
    }

    #[test]
    fn serde_round_trip_keeps_content() {
        let event = Event::standard(
            vec![Instruction::with_parameters("PosX", ["Player", "<", "10"])],
            vec![action("Delete")],
        )
        .with_sub_events(vec![Event::comment("nested")]);

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "standard");
        assert_eq!(json["sub_events"][0]["type"], "comment");

        let back: Event = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
        assert_ne!(back.id(), event.id());
    }
}
