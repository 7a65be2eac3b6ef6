//! Error types for the core model.
//!
//! Lookups that can legitimately miss (a dangling group member, a removed
//! behavior) return `Option` or empty values instead of errors. `CoreError`
//! is reserved for operations the caller asked for and that cannot proceed:
//! inserting a name that is already taken, or building an invalid pattern.

use std::fmt;

use thiserror::Error;

/// The kind of named entity an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Object,
    Group,
    Behavior,
    Variable,
    Layout,
    Resource,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NameKind::Object => "object",
            NameKind::Group => "group",
            NameKind::Behavior => "behavior",
            NameKind::Variable => "variable",
            NameKind::Layout => "layout",
            NameKind::Resource => "resource",
        };
        f.write_str(label)
    }
}

/// Errors raised by core model operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A name is already used in the target namespace.
    #[error("{kind} '{name}' already exists")]
    DuplicateName { kind: NameKind, name: String },

    /// A named entity required by the operation does not exist.
    #[error("{kind} '{name}' not found")]
    NotFound { kind: NameKind, name: String },

    /// A search needle could not be compiled into a matcher.
    #[error("invalid search pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl CoreError {
    /// Create a duplicate name error.
    pub fn duplicate(kind: NameKind, name: impl Into<String>) -> Self {
        CoreError::DuplicateName {
            kind,
            name: name.into(),
        }
    }

    /// Create a not found error.
    pub fn not_found(kind: NameKind, name: impl Into<String>) -> Self {
        CoreError::NotFound {
            kind,
            name: name.into(),
        }
    }
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_entity() {
        let err = CoreError::duplicate(NameKind::Object, "Player");
        assert_eq!(err.to_string(), "object 'Player' already exists");

        let err = CoreError::not_found(NameKind::Group, "Enemies");
        assert_eq!(err.to_string(), "group 'Enemies' not found");
    }
}
