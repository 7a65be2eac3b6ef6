//! Instruction parameters.
//!
//! An [`Expression`] is the raw text of one instruction parameter together with
//! a lazily built call tree. The tree is produced by whatever parser the caller
//! supplies to [`Expression::call_tree`] and is cached on the expression.
//!
//! ## Invalidation
//!
//! The cached tree belongs to the text it was built from. Every mutator that
//! replaces the text ([`Expression::set_plain_string`], assignment of a new
//! `Expression`) drops the tree, so a tree built from superseded text is never
//! reachable. The tree also depends on the scope the parser resolved object
//! types against; callers that change object types call
//! [`Expression::clear_call_tree`].

use std::borrow::Cow;
use std::cell::OnceCell;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Expression Kinds
// ============================================================================

/// The grammar a parameter is parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpressionKind {
    /// Arithmetic over numbers and number-returning calls.
    Number,
    /// `+`-joined string literals and string-returning calls.
    String,
    /// A variable path: `name`, `name.child`, `name[index]`.
    Variable,
}

impl ExpressionKind {
    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpressionKind::Number => "number",
            ExpressionKind::String => "string",
            ExpressionKind::Variable => "variable",
        }
    }
}

impl fmt::Display for ExpressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Parse Errors
// ============================================================================

/// A parse failure: a message and the byte position it was detected at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (at byte {position})")]
pub struct ExpressionError {
    pub message: String,
    pub position: usize,
}

impl ExpressionError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        ExpressionError {
            message: message.into(),
            position,
        }
    }

    /// Shift the position by the offset of the enclosing text.
    pub fn offset_by(mut self, offset: usize) -> Self {
        self.position += offset;
        self
    }
}

// ============================================================================
// Call Tree
// ============================================================================

/// How a call was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    /// `Function(args)`, or a string literal (nameless call).
    Static,
    /// `Object.Function(args)`; parameter 0 is the receiver.
    Object,
    /// `Object.Behavior::Function(args)`; parameter 0 is the receiver,
    /// parameter 1 the behavior name.
    Behavior,
}

/// One element of a parsed expression, in source order.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionNode {
    /// Literal text between calls (numbers, operators, spacing).
    Constant(String),
    /// A recognized call with its completed parameter list.
    Call {
        kind: CallKind,
        name: String,
        parameters: Vec<Expression>,
    },
}

impl ExpressionNode {
    /// The receiver of an object or behavior call.
    pub fn receiver(&self) -> Option<&str> {
        match self {
            ExpressionNode::Call {
                kind: CallKind::Object | CallKind::Behavior,
                parameters,
                ..
            } => parameters.first().map(Expression::plain_string),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct CallTree {
    kind: ExpressionKind,
    result: Result<Vec<ExpressionNode>, ExpressionError>,
}

// ============================================================================
// Expression
// ============================================================================

/// The text of one instruction parameter.
///
/// Equality and serialization only consider the text.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Expression {
    plain: String,
    tree: OnceCell<CallTree>,
}

impl Expression {
    pub fn new(text: impl Into<String>) -> Self {
        Expression {
            plain: text.into(),
            tree: OnceCell::new(),
        }
    }

    pub fn plain_string(&self) -> &str {
        &self.plain
    }

    pub fn is_empty(&self) -> bool {
        self.plain.is_empty()
    }

    /// Replace the text, dropping any cached call tree.
    pub fn set_plain_string(&mut self, text: impl Into<String>) {
        self.plain = text.into();
        self.tree = OnceCell::new();
    }

    /// Drop the cached call tree without touching the text.
    pub fn clear_call_tree(&mut self) {
        self.tree = OnceCell::new();
    }

    /// Whether a call tree is currently cached.
    pub fn has_call_tree(&self) -> bool {
        self.tree.get().is_some()
    }

    /// Get the call tree for `kind`, building it with `build` on first use.
    ///
    /// Only one tree is cached; asking for a different kind than the cached one
    /// builds an uncached tree.
    pub fn call_tree<F>(
        &self,
        kind: ExpressionKind,
        build: F,
    ) -> Result<Cow<'_, [ExpressionNode]>, ExpressionError>
    where
        F: FnOnce(&str) -> Result<Vec<ExpressionNode>, ExpressionError>,
    {
        if let Some(cached) = self.tree.get() {
            if cached.kind != kind {
                return build(&self.plain).map(Cow::Owned);
            }
            return cached
                .result
                .as_deref()
                .map(Cow::Borrowed)
                .map_err(Clone::clone);
        }

        let cached = self.tree.get_or_init(|| CallTree {
            kind,
            result: build(&self.plain),
        });
        cached
            .result
            .as_deref()
            .map(Cow::Borrowed)
            .map_err(Clone::clone)
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Expression").field(&self.plain).finish()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plain)
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.plain == other.plain
    }
}

impl Eq for Expression {}

impl From<String> for Expression {
    fn from(text: String) -> Self {
        Expression::new(text)
    }
}

impl From<&str> for Expression {
    fn from(text: &str) -> Self {
        Expression::new(text)
    }
}

impl From<Expression> for String {
    fn from(expression: Expression) -> Self {
        expression.plain
    }
}

// ============================================================================
// Tests
// ============================================================================
