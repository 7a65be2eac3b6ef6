//! Read-only text search over an event tree.

use serde::{Deserialize, Serialize};
use tracing::debug;

use evrefactor_core::event::find_event;
use evrefactor_core::{Event, EventId, Instruction, ListKind, TextMatcher};

use super::options::{SearchScope, TextSearchOptions};
use crate::error::RefactorResult;

/// The list an event was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "event", rename_all = "snake_case")]
pub enum ListOwner {
    /// The top-level event list.
    Root,
    /// The sub-events of the given event.
    SubEventsOf(EventId),
}

/// Locates an event whose instructions matched a search.
///
/// A result stays valid only while the tree keeps the same shape. Resolving a
/// stale result (the event was moved or deleted) yields `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsSearchResult {
    pub event: EventId,
    pub owner: ListOwner,
    pub index: usize,
    pub list_kind: ListKind,
}

impl EventsSearchResult {
    /// The located event in `events`, if it is still where it was found.
    pub fn resolve<'e>(&self, events: &'e [Event]) -> Option<&'e Event> {
        let list = match self.owner {
            ListOwner::Root => events,
            ListOwner::SubEventsOf(parent) => find_event(events, parent)?.sub_events()?.as_slice(),
        };
        list.get(self.index)
            .filter(|event| event.id() == self.event)
    }
}

/// Find the events whose conditions or actions have a parameter containing
/// `needle`.
///
/// Each event contributes at most one result per list kind in
/// `options.scope`. Results are in tree order, parents before sub-events. An
/// empty needle finds nothing.
pub fn search_in_events(
    events: &[Event],
    needle: &str,
    options: &TextSearchOptions,
) -> RefactorResult<Vec<EventsSearchResult>> {
    debug!(needle, match_case = options.match_case, "searching events");
    let matcher = TextMatcher::new(needle, options.match_case)?;
    let mut results = Vec::new();
    search_list(events, ListOwner::Root, &matcher, options.scope, &mut results);
    debug!(results = results.len(), "search finished");
    Ok(results)
}

fn search_list(
    events: &[Event],
    owner: ListOwner,
    matcher: &TextMatcher,
    scope: SearchScope,
    results: &mut Vec<EventsSearchResult>,
) {
    for (index, event) in events.iter().enumerate() {
        for list_kind in [ListKind::Conditions, ListKind::Actions] {
            if !scope.includes(list_kind) {
                continue;
            }
            if event
                .instruction_lists(list_kind)
                .iter()
                .any(|list| instructions_match(list, matcher))
            {
                results.push(EventsSearchResult {
                    event: event.id(),
                    owner,
                    index,
                    list_kind,
                });
            }
        }

        if let Some(sub_events) = event.sub_events() {
            search_list(
                sub_events,
                ListOwner::SubEventsOf(event.id()),
                matcher,
                scope,
                results,
            );
        }
    }
}

fn instructions_match(instructions: &[Instruction], matcher: &TextMatcher) -> bool {
    instructions.iter().any(|instruction| {
        instruction
            .parameters
            .iter()
            .any(|parameter| matcher.is_match(parameter.plain_string()))
            || instructions_match(&instruction.sub_instructions, matcher)
    })
}
