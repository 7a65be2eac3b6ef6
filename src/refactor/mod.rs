//! Tree-wide refactoring of events.
//!
//! | Operation | Touches | Uses metadata |
//! |-----------|---------|---------------|
//! | [`rename_object_in_events`] | object parameters, call receivers in expressions | yes |
//! | [`remove_object_in_events`] | deletes instructions referring to an object | yes |
//! | [`replace_string_in_events`] | raw parameter text | no |
//! | [`search_in_events`] | nothing (read-only) | no |
//!
//! The three mutating operations share one walker: each event's condition and
//! action lists are visited, then each kept instruction's sub-instructions,
//! then the event's sub-events. Events whose own lists changed are marked as
//! needing a layout update.

mod options;
mod remove;
mod rename;
mod replace;
mod search;
mod walker;

pub use options::{SearchScope, TextSearchOptions};
pub use remove::remove_object_in_events;
pub use rename::rename_object_in_events;
pub use replace::replace_string_in_events;
pub use search::{search_in_events, EventsSearchResult, ListOwner};
