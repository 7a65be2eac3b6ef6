// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! The callback protocol between the parser and its visitors.

use evrefactor_core::{
    Expression, ExpressionError, ExpressionMetadata, MetadataProvider, ObjectsContainersList,
};

use crate::parser::ExpressionParser;
use crate::visitor::ExpressionChecker;

/// Everything a parse needs besides the text: where to find expression
/// metadata, and the scope object names resolve in.
#[derive(Clone, Copy)]
pub struct ParseContext<'a> {
    pub platform: &'a dyn MetadataProvider,
    pub containers: &'a ObjectsContainersList<'a>,
}

impl<'a> ParseContext<'a> {
    pub fn new(
        platform: &'a dyn MetadataProvider,
        containers: &'a ObjectsContainersList<'a>,
    ) -> Self {
        ParseContext {
            platform,
            containers,
        }
    }
}

/// Receives the pieces of an expression in source order.
///
/// Parameter lists passed to the function callbacks are complete: code-only
/// slots hold empty expressions and omitted optional arguments hold their
/// default values. Sub-expression arguments have already been passed through
/// [`on_sub_math_expression`](Self::on_sub_math_expression) or
/// [`on_sub_text_expression`](Self::on_sub_text_expression), so they carry
/// whatever text those callbacks left in them.
pub trait ParserCallbacks {
    /// Literal text between calls: numbers, operators, spacing, variable paths.
    fn on_constant_token(&mut self, text: &str);

    /// A call without receiver.
    ///
    /// A string literal is reported as a nameless call whose only parameter is
    /// the literal's unescaped content.
    fn on_static_function(
        &mut self,
        name: &str,
        parameters: &[Expression],
        metadata: &ExpressionMetadata,
    );

    /// `Object.Function(...)`; `parameters[0]` is the object name.
    fn on_object_function(
        &mut self,
        name: &str,
        parameters: &[Expression],
        metadata: &ExpressionMetadata,
    );

    /// `Object.Behavior::Function(...)`; `parameters[0]` is the object name and
    /// `parameters[1]` the behavior name.
    fn on_object_behavior_function(
        &mut self,
        name: &str,
        parameters: &[Expression],
        metadata: &ExpressionMetadata,
    );

    /// A number-typed argument. The default only validates it.
    fn on_sub_math_expression(
        &mut self,
        ctx: &ParseContext<'_>,
        expression: &mut Expression,
    ) -> Result<(), ExpressionError> {
        ExpressionParser::new(expression.plain_string()).parse_number(ctx, &mut ExpressionChecker)
    }

    /// A string-typed argument. The default only validates it.
    fn on_sub_text_expression(
        &mut self,
        ctx: &ParseContext<'_>,
        expression: &mut Expression,
    ) -> Result<(), ExpressionError> {
        ExpressionParser::new(expression.plain_string()).parse_string(ctx, &mut ExpressionChecker)
    }
}
