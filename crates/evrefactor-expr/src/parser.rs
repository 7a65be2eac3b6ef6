// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! The callback-driven expression parser.
//!
//! # Number expressions
//!
//! The text is scanned left to right. Every recognized call is reported to the
//! callbacks and replaced by `0` in an arithmetic skeleton; everything else is
//! literal text. Once the scan is done the skeleton must be well-formed
//! arithmetic, so `Player.X() * 2` is valid and `Player.X() * foo` is not.
//!
//! # String expressions
//!
//! A `+`-joined sequence of quoted literals and string-returning calls.
//!
//! # Variable expressions
//!
//! A root name followed by `.child` and `[index]` accessors. An index starting
//! with a quote is a string sub-expression, any other index a number one.
//!
//! # Calls
//!
//! Arguments are matched against the call's metadata: the number of written
//! arguments must lie between the required and the maximum count, code-only
//! slots are then filled with empty expressions and omitted optional arguments
//! take their default value. Number and string arguments are passed to the
//! sub-expression callbacks, whose errors abort the parse.

use evrefactor_core::{CallKind, Expression, ExpressionError, ExpressionKind, ExpressionMetadata};
use tracing::trace;

use crate::callbacks::{ParseContext, ParserCallbacks};
use crate::syntax::{self, CallHead};

/// Parses one expression text, reporting its pieces to callbacks.
#[derive(Debug, Clone, Copy)]
pub struct ExpressionParser<'t> {
    text: &'t str,
}

/// A call resolved against metadata, with its parameters prepared.
struct PreparedCall<'m> {
    kind: CallKind,
    name: String,
    metadata: &'m ExpressionMetadata,
    parameters: Vec<Expression>,
    /// Byte offset just past the closing parenthesis.
    end: usize,
}

impl<'t> ExpressionParser<'t> {
    pub fn new(text: &'t str) -> Self {
        ExpressionParser { text }
    }

    /// Parse as the given kind.
    pub fn parse(
        &self,
        kind: ExpressionKind,
        ctx: &ParseContext<'_>,
        callbacks: &mut dyn ParserCallbacks,
    ) -> Result<(), ExpressionError> {
        let result = match kind {
            ExpressionKind::Number => self.parse_number(ctx, callbacks),
            ExpressionKind::String => self.parse_string(ctx, callbacks),
            ExpressionKind::Variable => self.parse_variable(ctx, callbacks),
        };
        if let Err(err) = &result {
            trace!(%kind, text = self.text, error = %err, "expression rejected");
        }
        result
    }

    pub fn parse_number(
        &self,
        ctx: &ParseContext<'_>,
        callbacks: &mut dyn ParserCallbacks,
    ) -> Result<(), ExpressionError> {
        let text = self.text;
        let mut constant = String::new();
        // Arithmetic skeleton, with the source position of each of its bytes.
        let mut skeleton = String::new();
        let mut origins = Vec::new();
        let mut pos = 0;

        while let Some(c) = text[pos..].chars().next() {
            if !syntax::is_name_char(c) {
                constant.push(c);
                skeleton.push(c);
                origins.resize(origins.len() + c.len_utf8(), pos);
                pos += c.len_utf8();
                continue;
            }

            let mut rest = &text[pos..];
            if let Ok(head) = syntax::call_head(&mut rest) {
                let call = self.prepare_call(ExpressionKind::Number, ctx, callbacks, head, pos)?;
                flush_constant(&mut constant, callbacks);
                emit_call(&call, callbacks);
                skeleton.push('0');
                origins.push(pos);
                pos = call.end;
                continue;
            }

            let mut rest = &text[pos..];
            let word = syntax::name(&mut rest).unwrap_or(&text[pos..pos + c.len_utf8()]);
            constant.push_str(word);
            skeleton.push_str(word);
            origins.resize(origins.len() + word.len(), pos);
            pos += word.len();
        }
        flush_constant(&mut constant, callbacks);

        syntax::check_arithmetic(&skeleton).map_err(|(message, at)| {
            ExpressionError::new(message, origins.get(at).copied().unwrap_or(text.len()))
        })
    }

    pub fn parse_string(
        &self,
        ctx: &ParseContext<'_>,
        callbacks: &mut dyn ParserCallbacks,
    ) -> Result<(), ExpressionError> {
        let text = self.text;
        if text.trim().is_empty() {
            return Err(ExpressionError::new(
                "empty text expression: enter a quoted text or a function",
                0,
            ));
        }

        let mut constant = String::new();
        let mut pos = 0;
        let mut expect_item = true;

        loop {
            let spaces = text[pos..].len() - text[pos..].trim_start().len();
            constant.push_str(&text[pos..pos + spaces]);
            pos += spaces;

            let Some(c) = text[pos..].chars().next() else {
                break;
            };

            if !expect_item {
                if c != '+' {
                    return Err(ExpressionError::new("missing '+' between texts", pos));
                }
                constant.push('+');
                pos += 1;
                expect_item = true;
                continue;
            }

            if c == '"' {
                let mut rest = &text[pos..];
                let literal = syntax::quoted(&mut rest)
                    .map_err(|_| ExpressionError::new("quotes not closed", pos))?;
                flush_constant(&mut constant, callbacks);
                callbacks.on_static_function(
                    "",
                    &[Expression::new(syntax::unquote(literal))],
                    &ExpressionMetadata::default(),
                );
                pos += literal.len();
            } else {
                let mut rest = &text[pos..];
                let head = syntax::call_head(&mut rest).map_err(|_| {
                    ExpressionError::new("expected a quoted text or a function", pos)
                })?;
                let call = self.prepare_call(ExpressionKind::String, ctx, callbacks, head, pos)?;
                flush_constant(&mut constant, callbacks);
                emit_call(&call, callbacks);
                pos = call.end;
            }
            expect_item = false;
        }

        if expect_item {
            return Err(ExpressionError::new("text or function expected after '+'", pos));
        }
        flush_constant(&mut constant, callbacks);
        Ok(())
    }

    pub fn parse_variable(
        &self,
        ctx: &ParseContext<'_>,
        callbacks: &mut dyn ParserCallbacks,
    ) -> Result<(), ExpressionError> {
        let text = self.text;
        let mut rest = text;
        let root = syntax::name(&mut rest)
            .map_err(|_| ExpressionError::new("expected a variable name", 0))?;
        let mut path = root.to_string();

        while let Some(c) = rest.chars().next() {
            let pos = text.len() - rest.len();
            match c {
                '.' => {
                    rest = &rest[1..];
                    let child = syntax::name(&mut rest).map_err(|_| {
                        ExpressionError::new("expected a child variable name", pos + 1)
                    })?;
                    path.push('.');
                    path.push_str(child);
                }
                '[' => {
                    let index = syntax::index_accessor(&mut rest)
                        .map_err(|_| ExpressionError::new("bracket not closed", pos))?;
                    let mut expression = Expression::new(index);
                    let result = if index.trim_start().starts_with('"') {
                        callbacks.on_sub_text_expression(ctx, &mut expression)
                    } else {
                        callbacks.on_sub_math_expression(ctx, &mut expression)
                    };
                    result.map_err(|err| err.offset_by(pos + 1))?;
                    path.push('[');
                    path.push_str(expression.plain_string());
                    path.push(']');
                }
                _ => {
                    return Err(ExpressionError::new(
                        format!("unexpected '{c}' in variable name"),
                        pos,
                    ))
                }
            }
        }

        callbacks.on_constant_token(&path);
        Ok(())
    }

    /// Resolve the call starting at `start` and prepare its parameters.
    fn prepare_call<'m>(
        &self,
        kind: ExpressionKind,
        ctx: &ParseContext<'m>,
        callbacks: &mut dyn ParserCallbacks,
        head: CallHead<'_>,
        start: usize,
    ) -> Result<PreparedCall<'m>, ExpressionError> {
        let (call_kind, name, metadata, mut parameters) = resolve(kind, ctx, head, start)?;
        let leading = parameters.len();

        let list_start = start
            + head.receiver.map_or(0, |receiver| receiver.len() + 1)
            + head.member.len();
        let mut rest = &self.text[list_start..];
        let arguments = syntax::argument_list(&mut rest)
            .map_err(|_| ExpressionError::new("parenthesis not closed", list_start))?;
        let end = self.text.len() - rest.len();

        let mut positions = vec![start; leading];
        let mut offset = list_start + 1;
        for argument in arguments {
            positions.push(offset);
            offset += argument.len() + 1;
            parameters.push(Expression::new(argument));
        }

        let (min, max) = (metadata.min_arguments(), metadata.max_arguments());
        if parameters.len() < min || parameters.len() > max {
            return Err(ExpressionError::new(
                format!(
                    "wrong number of parameters for '{}': expected {min} to {max}, got {}",
                    head.member,
                    parameters.len()
                ),
                start,
            ));
        }

        let (mut parameters, positions) =
            complete_parameters(metadata, parameters, positions, start);
        for (index, info) in metadata.parameters.iter().enumerate() {
            if info.code_only {
                continue;
            }
            let parameter = &mut parameters[index];
            let result = match info.expression_kind() {
                Some(ExpressionKind::Number) => {
                    if info.optional && parameter.is_empty() {
                        parameter.set_plain_string(default_or(&info.default_value, "0"));
                    }
                    callbacks.on_sub_math_expression(ctx, parameter)
                }
                Some(ExpressionKind::String) => {
                    if info.optional && parameter.is_empty() {
                        parameter.set_plain_string(default_or(&info.default_value, "\"\""));
                    }
                    callbacks.on_sub_text_expression(ctx, parameter)
                }
                Some(ExpressionKind::Variable) | None => Ok(()),
            };
            result.map_err(|err| err.offset_by(positions[index]))?;
        }

        Ok(PreparedCall {
            kind: call_kind,
            name,
            metadata,
            parameters,
            end,
        })
    }
}

/// Find the metadata of a call head. Returns the call kind, the function name,
/// the metadata and the leading parameters (receiver, behavior).
fn resolve<'m>(
    kind: ExpressionKind,
    ctx: &ParseContext<'m>,
    head: CallHead<'_>,
    start: usize,
) -> Result<(CallKind, String, &'m ExpressionMetadata, Vec<Expression>), ExpressionError> {
    let unknown = || {
        ExpressionError::new(
            format!("unknown {kind} function '{}'", head.member),
            start,
        )
    };

    let Some(receiver) = head.receiver else {
        let metadata = ctx
            .platform
            .expression_metadata(kind, head.member)
            .ok_or_else(unknown)?;
        return Ok((CallKind::Static, head.member.to_string(), metadata, Vec::new()));
    };

    let object = syntax::decode_object_name(receiver);
    match head.member.split_once("::") {
        Some((behavior, function)) => {
            let behavior_type = ctx
                .containers
                .type_of_behavior_in_object_or_group(&object, behavior);
            let metadata = ctx
                .platform
                .behavior_expression_metadata(kind, &behavior_type, function)
                .ok_or_else(unknown)?;
            if !ctx
                .containers
                .behaviors_of_object(&object)
                .iter()
                .any(|b| b == behavior)
            {
                return Err(ExpressionError::new(
                    format!("'{object}' has no behavior named '{behavior}'"),
                    start,
                ));
            }
            Ok((
                CallKind::Behavior,
                function.to_string(),
                metadata,
                vec![Expression::new(object), Expression::new(behavior)],
            ))
        }
        None => {
            let object_type = ctx.containers.type_of_object(&object);
            let metadata = ctx
                .platform
                .object_expression_metadata(kind, &object_type, head.member)
                .ok_or_else(unknown)?;
            Ok((
                CallKind::Object,
                head.member.to_string(),
                metadata,
                vec![Expression::new(object)],
            ))
        }
    }
}

/// Insert empty expressions at code-only slots and pad to the declared count.
fn complete_parameters(
    metadata: &ExpressionMetadata,
    written: Vec<Expression>,
    written_positions: Vec<usize>,
    call_start: usize,
) -> (Vec<Expression>, Vec<usize>) {
    let mut written = written.into_iter().zip(written_positions);
    let mut parameters = Vec::with_capacity(metadata.parameters.len());
    let mut positions = Vec::with_capacity(metadata.parameters.len());
    for info in &metadata.parameters {
        let (parameter, position) = if info.code_only {
            (Expression::default(), call_start)
        } else {
            written
                .next()
                .unwrap_or_else(|| (Expression::default(), call_start))
        };
        parameters.push(parameter);
        positions.push(position);
    }
    for (parameter, position) in written {
        parameters.push(parameter);
        positions.push(position);
    }
    (parameters, positions)
}

fn default_or<'a>(default_value: &'a str, fallback: &'a str) -> &'a str {
    if default_value.is_empty() {
        fallback
    } else {
        default_value
    }
}

fn flush_constant(constant: &mut String, callbacks: &mut dyn ParserCallbacks) {
    if !constant.is_empty() {
        callbacks.on_constant_token(constant);
        constant.clear();
    }
}

fn emit_call(call: &PreparedCall<'_>, callbacks: &mut dyn ParserCallbacks) {
    match call.kind {
        CallKind::Static => {
            callbacks.on_static_function(&call.name, &call.parameters, call.metadata)
        }
        CallKind::Object => {
            callbacks.on_object_function(&call.name, &call.parameters, call.metadata)
        }
        CallKind::Behavior => {
            callbacks.on_object_behavior_function(&call.name, &call.parameters, call.metadata)
        }
    }
}
