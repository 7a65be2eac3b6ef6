//! Error types and error codes for evrefactor.
//!
//! `RefactorError` is the single error type returned by the refactoring entry
//! points. Errors from the model (`CoreError`) and from the expression parser
//! (`ExpressionError`) are bridged into it with `From`, and `ErrorCode` gives
//! each variant a stable integer an editor host can report.
//!
//! ## Error Code Mapping
//!
//! - `2`: Invalid arguments (empty names, name collisions, bad patterns)
//! - `3`: Resolution errors (layout, object or group not found)
//! - `5`: Invalid expression (parameter text that does not parse)
//!
//! Most refactoring operations never fail: dangling references are absent
//! results and unparsable parameters are left untouched. Errors are reserved
//! for requests that cannot be carried out at all.

use std::fmt;

use thiserror::Error;

use evrefactor_core::{CoreError, ExpressionError};

// ============================================================================
// Error Codes
// ============================================================================

/// Stable error codes for `RefactorError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorCode {
    /// The caller passed something unusable.
    InvalidArguments = 2,
    /// A named entity the operation needs does not exist.
    ResolutionError = 3,
    /// Parameter text failed to parse.
    InvalidExpression = 5,
}

impl ErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// Unified error type for the refactoring engine.
#[derive(Debug, Error)]
pub enum RefactorError {
    /// Invalid arguments from the caller.
    #[error("invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// An error from the project model.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Parameter text that does not parse as its declared kind.
    #[error("invalid expression: {0}")]
    Expression(#[from] ExpressionError),
}

impl RefactorError {
    /// Create an invalid arguments error.
    pub fn invalid_args(message: impl Into<String>) -> Self {
        RefactorError::InvalidArguments {
            message: message.into(),
        }
    }

    /// The stable code for this error.
    pub fn code(&self) -> ErrorCode {
        ErrorCode::from(self)
    }
}

impl From<&RefactorError> for ErrorCode {
    fn from(err: &RefactorError) -> Self {
        match err {
            RefactorError::InvalidArguments { .. } => ErrorCode::InvalidArguments,
            RefactorError::Core(core) => match core {
                CoreError::NotFound { .. } => ErrorCode::ResolutionError,
                CoreError::DuplicateName { .. } | CoreError::InvalidPattern { .. } => {
                    ErrorCode::InvalidArguments
                }
            },
            RefactorError::Expression(_) => ErrorCode::InvalidExpression,
        }
    }
}

/// Result type for refactoring operations.
pub type RefactorResult<T> = Result<T, RefactorError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use evrefactor_core::NameKind;

    mod error_codes {
        use super::*;

        #[test]
        fn numeric_values_are_stable() {
            assert_eq!(ErrorCode::InvalidArguments.code(), 2);
            assert_eq!(ErrorCode::ResolutionError.code(), 3);
            assert_eq!(ErrorCode::InvalidExpression.code(), 5);
            assert_eq!(ErrorCode::ResolutionError.to_string(), "3");
        }

        #[test]
        fn core_errors_map_by_variant() {
            let missing: RefactorError = CoreError::not_found(NameKind::Layout, "Level1").into();
            assert_eq!(missing.code(), ErrorCode::ResolutionError);

            let taken: RefactorError = CoreError::duplicate(NameKind::Object, "Player").into();
            assert_eq!(taken.code(), ErrorCode::InvalidArguments);
        }

        #[test]
        fn expression_errors_map_to_invalid_expression() {
            let err: RefactorError = ExpressionError::new("empty math expression", 0).into();
            assert_eq!(err.code(), ErrorCode::InvalidExpression);
        }
    }

    mod messages {
        use super::*;

        #[test]
        fn core_messages_pass_through() {
            let err: RefactorError = CoreError::not_found(NameKind::Layout, "Level1").into();
            assert_eq!(err.to_string(), "layout 'Level1' not found");
        }

        #[test]
        fn invalid_args_message() {
            let err = RefactorError::invalid_args("object name is empty");
            assert_eq!(err.to_string(), "invalid arguments: object name is empty");
            assert_eq!(err.code(), ErrorCode::InvalidArguments);
        }

        #[test]
        fn expression_message_carries_position() {
            let err: RefactorError = ExpressionError::new("invalid math expression", 4).into();
            assert_eq!(
                err.to_string(),
                "invalid expression: invalid math expression (at byte 4)"
            );
        }
    }
}
