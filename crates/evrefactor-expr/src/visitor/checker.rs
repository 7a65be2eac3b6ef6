// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use evrefactor_core::{Expression, ExpressionMetadata};

use crate::callbacks::ParserCallbacks;

/// Ignores everything; a parse with it only reports whether the text is valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionChecker;

impl ParserCallbacks for ExpressionChecker {
    fn on_constant_token(&mut self, _text: &str) {}

    fn on_static_function(&mut self, _: &str, _: &[Expression], _: &ExpressionMetadata) {}

    fn on_object_function(&mut self, _: &str, _: &[Expression], _: &ExpressionMetadata) {}

    fn on_object_behavior_function(
        &mut self,
        _: &str,
        _: &[Expression],
        _: &ExpressionMetadata,
    ) {
    }
}
