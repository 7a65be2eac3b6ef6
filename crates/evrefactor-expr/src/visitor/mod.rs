// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Callback implementations.
//!
//! | Visitor | Purpose |
//! |---------|---------|
//! | [`ObjectRenamer`] | Rebuild the text with an object renamed |
//! | [`ObjectFinder`] | Report whether an object is called anywhere |
//! | [`ExpressionChecker`] | Validate only |
//! | [`CallTreeBuilder`] | Record constants and calls as [`ExpressionNode`](evrefactor_core::ExpressionNode)s |

mod checker;
mod finder;
mod rename;
mod tree;

pub use checker::ExpressionChecker;
pub use finder::ObjectFinder;
pub use rename::ObjectRenamer;
pub use tree::{parse_call_tree, CallTreeBuilder};
