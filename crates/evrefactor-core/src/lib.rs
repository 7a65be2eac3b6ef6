//! Core infrastructure for evrefactor.
//!
//! This crate provides the data the refactoring engine works on:
//! - Expression and instruction model (parameter text, cached call trees)
//! - Event tree with per-kind condition/action lists
//! - Declarative instruction/expression metadata and the provider trait
//! - Project model: objects, behaviors, groups, variables, resources, layouts
//! - Scoped containers for shadowed object lookup and group expansion
//! - Variables changesets applied across object groups
//! - Error types and text matching utilities

pub mod changeset;
pub mod error;
pub mod event;
pub mod expression;
pub mod instruction;
pub mod metadata;
pub mod project;
pub mod scope;
pub mod text;

pub use changeset::VariablesChangeset;
pub use error::{CoreError, CoreResult, NameKind};
pub use event::{Event, EventId, EventKind, ListKind};
pub use expression::{CallKind, Expression, ExpressionError, ExpressionKind, ExpressionNode};
pub use instruction::Instruction;
pub use metadata::{
    ExpressionMetadata, InstructionMetadata, MetadataProvider, ParameterMetadata, Platform,
};
pub use project::{
    Behavior, Layout, Object, ObjectGroup, ObjectsContainer, Project, Resource,
    ResourcesContainer, Variable, VariableType, VariablesContainer,
};
pub use scope::{ObjectsContainersList, VariablePresence};
pub use text::TextMatcher;
