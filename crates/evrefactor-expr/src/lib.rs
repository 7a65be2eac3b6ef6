// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Expression parsing for event parameters.
//!
//! Parameters of conditions and actions are small textual expressions:
//!
//! ```text
//! Player.X() + Random(10) * 2                 number expression
//! "Score: " + ToString(Variable(score))       string expression
//! inventory[Player.Variable(slot)].count      variable expression
//! ```
//!
//! The [`ExpressionParser`] does not build a tree by itself. It walks the text
//! once and reports what it finds to a [`ParserCallbacks`] implementation, in
//! source order: literal spans, static calls, object calls and behavior calls.
//! Arguments that are themselves expressions are handed to the callbacks as
//! sub-expressions, and the callbacks decide how to recurse (usually with a
//! fresh instance of themselves). This keeps each use case in its own small
//! visitor:
//!
//! - [`ObjectRenamer`] rebuilds the text with an object renamed
//! - [`ObjectFinder`] reports whether an object is referenced anywhere
//! - [`ExpressionChecker`] only validates
//! - [`CallTreeBuilder`] records the calls for the cached call tree
//!
//! # Usage
//!
//! ```ignore
//! use evrefactor_expr::{ExpressionParser, ObjectRenamer, ParseContext};
//!
//! let ctx = ParseContext::new(&platform, &containers);
//! let mut renamer = ObjectRenamer::new("Player", "Hero");
//! ExpressionParser::new("Player.X() + 1").parse_number(&ctx, &mut renamer)?;
//! assert_eq!(renamer.output(), "Hero.X() + 1");
//! ```

pub mod callbacks;
pub mod parser;
mod syntax;
pub mod visitor;

pub use callbacks::{ParseContext, ParserCallbacks};
pub use evrefactor_core::expression::ExpressionError;
pub use parser::ExpressionParser;
pub use visitor::{parse_call_tree, CallTreeBuilder, ExpressionChecker, ObjectFinder, ObjectRenamer};
