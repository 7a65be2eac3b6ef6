// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! ObjectRenamer: rebuild an expression with one object renamed.
//!
//! The renamer writes every piece it receives back out, substituting the
//! receiver of object and behavior calls when it equals the old name. Number
//! and string arguments are rebuilt by a nested renamer, so a receiver buried
//! in `Max(Player.X(), ToNumber(Player.String()))` is renamed as well.
//!
//! Code-only parameters are never written back. Omitted optional arguments
//! come back with their default value, so `Random()` is rebuilt as
//! `Random(0)` when the first parameter is optional. Callers that only want
//! to touch text that actually mentions the old name check
//! [`ObjectRenamer::renamed`] before using the output.

use evrefactor_core::{Expression, ExpressionError, ExpressionMetadata};

use crate::callbacks::{ParseContext, ParserCallbacks};
use crate::parser::ExpressionParser;
use crate::syntax;

/// Rebuilds an expression, renaming call receivers named `old` to `new`.
#[derive(Debug, Clone)]
pub struct ObjectRenamer {
    old: String,
    new: String,
    output: String,
    renamed: bool,
}

impl ObjectRenamer {
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        ObjectRenamer {
            old: old.into(),
            new: new.into(),
            output: String::new(),
            renamed: false,
        }
    }

    /// The text rebuilt so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Whether a receiver was substituted, here or in a nested expression.
    pub fn renamed(&self) -> bool {
        self.renamed
    }

    pub fn into_output(self) -> String {
        self.output
    }

    fn nested(&self) -> Self {
        ObjectRenamer::new(self.old.clone(), self.new.clone())
    }

    fn write_receiver(&mut self, receiver: &str) {
        let name = if receiver == self.old {
            self.renamed = true;
            self.new.as_str()
        } else {
            receiver
        };
        self.output.push_str(&syntax::encode_object_name(name));
    }

    fn write_arguments(
        &mut self,
        parameters: &[Expression],
        metadata: &ExpressionMetadata,
        skip: usize,
    ) {
        let arguments: Vec<&str> = parameters
            .iter()
            .enumerate()
            .skip(skip)
            .filter(|(index, _)| !metadata.is_code_only(*index))
            .map(|(_, parameter)| parameter.plain_string())
            .collect();
        self.output.push('(');
        self.output.push_str(&arguments.join(","));
        self.output.push(')');
    }
}

impl ParserCallbacks for ObjectRenamer {
    fn on_constant_token(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn on_static_function(
        &mut self,
        name: &str,
        parameters: &[Expression],
        metadata: &ExpressionMetadata,
    ) {
        if name.is_empty() {
            if let Some(literal) = parameters.first() {
                self.output.push_str(&syntax::quote(literal.plain_string()));
            }
            return;
        }
        self.output.push_str(name);
        self.write_arguments(parameters, metadata, 0);
    }

    fn on_object_function(
        &mut self,
        name: &str,
        parameters: &[Expression],
        metadata: &ExpressionMetadata,
    ) {
        let Some(receiver) = parameters.first() else {
            return;
        };
        self.write_receiver(receiver.plain_string());
        self.output.push('.');
        self.output.push_str(name);
        self.write_arguments(parameters, metadata, 1);
    }

    fn on_object_behavior_function(
        &mut self,
        name: &str,
        parameters: &[Expression],
        metadata: &ExpressionMetadata,
    ) {
        let [receiver, behavior, ..] = parameters else {
            return;
        };
        self.write_receiver(receiver.plain_string());
        self.output.push('.');
        self.output.push_str(behavior.plain_string());
        self.output.push_str("::");
        self.output.push_str(name);
        self.write_arguments(parameters, metadata, 2);
    }

    fn on_sub_math_expression(
        &mut self,
        ctx: &ParseContext<'_>,
        expression: &mut Expression,
    ) -> Result<(), ExpressionError> {
        let mut renamer = self.nested();
        ExpressionParser::new(expression.plain_string()).parse_number(ctx, &mut renamer)?;
        self.renamed |= renamer.renamed;
        expression.set_plain_string(renamer.into_output());
        Ok(())
    }

    fn on_sub_text_expression(
        &mut self,
        ctx: &ParseContext<'_>,
        expression: &mut Expression,
    ) -> Result<(), ExpressionError> {
        let mut renamer = self.nested();
        ExpressionParser::new(expression.plain_string()).parse_string(ctx, &mut renamer)?;
        self.renamed |= renamer.renamed;
        expression.set_plain_string(renamer.into_output());
        Ok(())
    }
}
