//! Per-parameter semantic validation.
//!
//! The editor calls [`InstructionValidator::is_parameter_valid`] for the
//! parameter being edited, usually on every keystroke. Checks are dispatched
//! on the parameter's declared type:
//!
//! | Type | Valid when |
//! |------|------------|
//! | `layer` | empty, or a valid string expression |
//! | number, string, variable | the text parses as that kind |
//! | `objectvar` of a typed variable instruction | also: the object declares the root variable |
//! | object | the name resolves, has the required type, and carries the required behaviors |
//! | resource | the resource exists |
//! | anything else | always |
//!
//! Expressions are parsed afresh against the validator's scope on every call;
//! the call tree cached on a parameter is not consulted.

use evrefactor_core::{
    Expression, ExpressionKind, Instruction, InstructionMetadata, MetadataProvider,
    ObjectsContainersList, ResourcesContainer, VariablePresence,
};
use evrefactor_expr::{ExpressionChecker, ExpressionParser, ParseContext};

use crate::error::RefactorResult;
use crate::switcher;

/// The name of the root variable of a variable path: the text before the
/// first `.` or `[`.
///
/// ```
/// use evrefactor::validator::root_variable_name;
///
/// assert_eq!(root_variable_name("Inventory.Sword[0]"), "Inventory");
/// assert_eq!(root_variable_name("Scores[1].Best"), "Scores");
/// assert_eq!(root_variable_name("Lives"), "Lives");
/// ```
pub fn root_variable_name(name: &str) -> &str {
    name.find(['.', '[']).map_or(name, |end| &name[..end])
}

/// Checks parameter values against their metadata in one scope.
#[derive(Clone, Copy)]
pub struct InstructionValidator<'a> {
    ctx: ParseContext<'a>,
    resources: &'a ResourcesContainer,
}

impl<'a> InstructionValidator<'a> {
    pub fn new(
        platform: &'a dyn MetadataProvider,
        containers: &'a ObjectsContainersList<'a>,
        resources: &'a ResourcesContainer,
    ) -> Self {
        InstructionValidator {
            ctx: ParseContext::new(platform, containers),
            resources,
        }
    }

    /// Whether `value` is acceptable as parameter `index` of `instruction`.
    ///
    /// `value` is the candidate text; it may differ from what the instruction
    /// currently holds at `index`. Parameters the metadata does not declare
    /// are always valid.
    pub fn is_parameter_valid(
        &self,
        instruction: &Instruction,
        metadata: &InstructionMetadata,
        index: usize,
        value: &str,
    ) -> bool {
        let Some(parameter) = metadata.parameter(index) else {
            return true;
        };
        let type_name = parameter.normalized_type();

        if type_name == "layer" && value.is_empty() {
            return true;
        }

        if let Some(kind) = parameter.expression_kind() {
            if self.check_text(kind, value).is_err() {
                return false;
            }
            if type_name == "objectvar" && switcher::is_switchable(&instruction.type_name) {
                return self.ctx.containers.variable_presence(
                    instruction.parameter_text(0),
                    root_variable_name(value),
                ) != VariablePresence::Undeclared;
            }
            return true;
        }

        if parameter.is_object() {
            return self.is_object_valid(instruction, metadata, index, value);
        }

        if parameter.is_resource() {
            return self.resources.has_resource_named(value);
        }

        true
    }

    /// Parse `expression` as `kind`, reporting the first error.
    pub fn check_expression(
        &self,
        kind: ExpressionKind,
        expression: &Expression,
    ) -> RefactorResult<()> {
        self.check_text(kind, expression.plain_string())
    }

    fn check_text(&self, kind: ExpressionKind, text: &str) -> RefactorResult<()> {
        ExpressionParser::new(text).parse(kind, &self.ctx, &mut ExpressionChecker)?;
        Ok(())
    }

    fn is_object_valid(
        &self,
        instruction: &Instruction,
        metadata: &InstructionMetadata,
        index: usize,
        value: &str,
    ) -> bool {
        let containers = self.ctx.containers;
        if !containers.has_object_or_group_named(value) {
            return false;
        }

        let required_type = metadata
            .parameter(index)
            .map_or("", |parameter| parameter.extra_info.as_str());
        if !required_type.is_empty() && containers.type_of_object(value) != required_type {
            return false;
        }

        metadata
            .parameters
            .iter()
            .enumerate()
            .skip(index + 1)
            .take_while(|(_, parameter)| !parameter.is_object())
            .filter(|(_, parameter)| parameter.is_behavior() && !parameter.extra_info.is_empty())
            .all(|(behavior_index, parameter)| {
                containers.type_of_behavior_in_object_or_group(
                    value,
                    instruction.parameter_text(behavior_index),
                ) == parameter.extra_info
            })
    }
}
