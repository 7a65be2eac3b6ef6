// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Call tree construction and caching.

use std::borrow::Cow;

use evrefactor_core::{
    CallKind, Expression, ExpressionError, ExpressionKind, ExpressionMetadata, ExpressionNode,
};

use crate::callbacks::{ParseContext, ParserCallbacks};
use crate::parser::ExpressionParser;

/// Records the top level of an expression as [`ExpressionNode`]s.
///
/// Arguments are kept as text in the call nodes; they are not expanded.
#[derive(Debug, Clone, Default)]
pub struct CallTreeBuilder {
    nodes: Vec<ExpressionNode>,
}

impl CallTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_nodes(self) -> Vec<ExpressionNode> {
        self.nodes
    }

    fn push_call(&mut self, kind: CallKind, name: &str, parameters: &[Expression]) {
        self.nodes.push(ExpressionNode::Call {
            kind,
            name: name.to_string(),
            parameters: parameters.to_vec(),
        });
    }
}

impl ParserCallbacks for CallTreeBuilder {
    fn on_constant_token(&mut self, text: &str) {
        self.nodes.push(ExpressionNode::Constant(text.to_string()));
    }

    fn on_static_function(
        &mut self,
        name: &str,
        parameters: &[Expression],
        _: &ExpressionMetadata,
    ) {
        self.push_call(CallKind::Static, name, parameters);
    }

    fn on_object_function(
        &mut self,
        name: &str,
        parameters: &[Expression],
        _: &ExpressionMetadata,
    ) {
        self.push_call(CallKind::Object, name, parameters);
    }

    fn on_object_behavior_function(
        &mut self,
        name: &str,
        parameters: &[Expression],
        _: &ExpressionMetadata,
    ) {
        self.push_call(CallKind::Behavior, name, parameters);
    }
}

/// The call tree of `expression` parsed as `kind`, built on first use and
/// cached on the expression.
pub fn parse_call_tree<'e>(
    expression: &'e Expression,
    kind: ExpressionKind,
    ctx: &ParseContext<'_>,
) -> Result<Cow<'e, [ExpressionNode]>, ExpressionError> {
    expression.call_tree(kind, |text| {
        let mut builder = CallTreeBuilder::new();
        ExpressionParser::new(text).parse(kind, ctx, &mut builder)?;
        Ok(builder.into_nodes())
    })
}
