//! evrefactor: refactoring and validation engine for event-based visual logic.
//!
//! When an object, group or variable is renamed or deleted in the editor, the
//! engine rewrites every reference to it across the events of a project,
//! including references inside textual expressions such as
//! `Player.X() + Enemy.Variable(Speed)`.
//!
//! The model and the expression parser live in their own crates and are
//! re-exported here:
//! - [`evrefactor_core`]: expressions, instructions, events, metadata, project
//!   model and scoped lookup
//! - [`evrefactor_expr`]: the expression parser and its visitors
//!
//! This crate adds the operations built on them:
//! - [`refactor`]: rename, remove, replace and search across an event tree
//! - [`validator`]: per-parameter semantic validation
//! - [`switcher`]: moving variable instructions between their typed siblings
//! - [`project_refactor`]: layout and project level entry points

pub use evrefactor_core;
pub use evrefactor_expr;

pub mod error;
pub mod project_refactor;
pub mod refactor;
pub mod switcher;
pub mod validator;

pub use error::{ErrorCode, RefactorError, RefactorResult};
pub use refactor::{
    remove_object_in_events, rename_object_in_events, replace_string_in_events,
    search_in_events, EventsSearchResult, ListOwner, SearchScope, TextSearchOptions,
};
pub use validator::InstructionValidator;
