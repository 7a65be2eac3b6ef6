// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! ObjectFinder: detect calls on an object.

use evrefactor_core::{Expression, ExpressionError, ExpressionMetadata};

use crate::callbacks::{ParseContext, ParserCallbacks};
use crate::parser::ExpressionParser;

/// Records whether any object or behavior call, at any depth, has `name` as
/// its receiver.
#[derive(Debug, Clone)]
pub struct ObjectFinder {
    name: String,
    found: bool,
}

impl ObjectFinder {
    pub fn new(name: impl Into<String>) -> Self {
        ObjectFinder {
            name: name.into(),
            found: false,
        }
    }

    pub fn found(&self) -> bool {
        self.found
    }

    fn check_receiver(&mut self, parameters: &[Expression]) {
        if parameters
            .first()
            .is_some_and(|receiver| receiver.plain_string() == self.name)
        {
            self.found = true;
        }
    }
}

impl ParserCallbacks for ObjectFinder {
    fn on_constant_token(&mut self, _text: &str) {}

    fn on_static_function(&mut self, _: &str, _: &[Expression], _: &ExpressionMetadata) {}

    fn on_object_function(&mut self, _: &str, parameters: &[Expression], _: &ExpressionMetadata) {
        self.check_receiver(parameters);
    }

    fn on_object_behavior_function(
        &mut self,
        _: &str,
        parameters: &[Expression],
        _: &ExpressionMetadata,
    ) {
        self.check_receiver(parameters);
    }

    fn on_sub_math_expression(
        &mut self,
        ctx: &ParseContext<'_>,
        expression: &mut Expression,
    ) -> Result<(), ExpressionError> {
        let mut finder = ObjectFinder::new(self.name.clone());
        ExpressionParser::new(expression.plain_string()).parse_number(ctx, &mut finder)?;
        self.found |= finder.found;
        Ok(())
    }

    fn on_sub_text_expression(
        &mut self,
        ctx: &ParseContext<'_>,
        expression: &mut Expression,
    ) -> Result<(), ExpressionError> {
        let mut finder = ObjectFinder::new(self.name.clone());
        ExpressionParser::new(expression.plain_string()).parse_string(ctx, &mut finder)?;
        self.found |= finder.found;
        Ok(())
    }
}
