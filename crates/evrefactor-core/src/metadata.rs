//! Declarative instruction and expression metadata.
//!
//! Metadata tells the engine what each parameter of an instruction or
//! expression is: an object name, a number expression, a behavior name, a
//! resource, and so on. The engine never hardcodes instruction types; it asks
//! a [`MetadataProvider`] and dispatches on the parameter types it returns.
//!
//! ## Parameter Types
//!
//! | Category | Type tags |
//! |----------|-----------|
//! | Object | `object`, `objectPtr`, `objectList`, `objectListOrEmptyIfJustDeclared`, `objectListOrEmptyWithoutPicking` |
//! | Number expression | `number`, `expression` (legacy), `camera`, `forceMultiplier` |
//! | String expression | `string`, `layer`, `color`, `file`, `joyaxis`, `sceneName`, ... |
//! | Variable expression | `scenevar`, `globalvar`, `objectvar` |
//! | Behavior | `behavior` |
//! | Resource | `imageResource`, `audioResource`, `fontResource`, ... |

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::event::ListKind;
use crate::expression::ExpressionKind;

// ============================================================================
// Parameter Type Classification
// ============================================================================

const OBJECT_TYPES: &[&str] = &[
    "object",
    "objectPtr",
    "objectList",
    "objectListOrEmptyIfJustDeclared",
    "objectListOrEmptyWithoutPicking",
];

const NUMBER_TYPES: &[&str] = &["number", "expression", "camera", "forceMultiplier"];

const STRING_TYPES: &[&str] = &[
    "string",
    "layer",
    "color",
    "file",
    "joyaxis",
    "stringWithSelector",
    "sceneName",
    "externalLayoutName",
    "layerEffectName",
    "layerEffectParameterName",
    "objectEffectName",
    "objectEffectParameterName",
    "objectPointName",
    "objectAnimationName",
    "functionParameterName",
];

const VARIABLE_TYPES: &[&str] = &["scenevar", "globalvar", "objectvar"];

const RESOURCE_TYPES: &[&str] = &[
    "imageResource",
    "audioResource",
    "fontResource",
    "videoResource",
    "jsonResource",
    "bitmapFontResource",
    "tilemapResource",
    "tilesetResource",
    "model3DResource",
];

/// Whether a parameter type names an object or group.
pub fn is_object_type(type_name: &str) -> bool {
    OBJECT_TYPES.contains(&type_name)
}

/// Whether a parameter type names a behavior of the preceding object.
pub fn is_behavior_type(type_name: &str) -> bool {
    type_name == "behavior"
}

/// Whether a parameter type names a project resource.
pub fn is_resource_type(type_name: &str) -> bool {
    RESOURCE_TYPES.contains(&type_name)
}

/// The expression grammar a parameter type is parsed with, if any.
pub fn expression_kind_of(type_name: &str) -> Option<ExpressionKind> {
    if NUMBER_TYPES.contains(&type_name) {
        Some(ExpressionKind::Number)
    } else if STRING_TYPES.contains(&type_name) {
        Some(ExpressionKind::String)
    } else if VARIABLE_TYPES.contains(&type_name) {
        Some(ExpressionKind::Variable)
    } else {
        None
    }
}

/// Normalize legacy type tags (`expression` is the old name of `number`).
pub fn normalize_type(type_name: &str) -> &str {
    if type_name == "expression" {
        "number"
    } else {
        type_name
    }
}

// ============================================================================
// Parameter Metadata
// ============================================================================

/// Schema of one parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterMetadata {
    #[serde(rename = "type")]
    pub type_name: String,
    /// Type-specific detail: the required object type for object parameters,
    /// the required behavior type for behavior parameters.
    #[serde(default)]
    pub extra_info: String,
    #[serde(default)]
    pub optional: bool,
    /// Filled in by the engine; never written by the user.
    #[serde(default)]
    pub code_only: bool,
    #[serde(default)]
    pub default_value: String,
    #[serde(default)]
    pub description: String,
}

impl ParameterMetadata {
    pub fn new(type_name: impl Into<String>) -> Self {
        ParameterMetadata {
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    pub fn with_extra_info(mut self, extra_info: impl Into<String>) -> Self {
        self.extra_info = extra_info.into();
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.optional = true;
        self.default_value = default_value.into();
        self
    }

    pub fn code_only(mut self) -> Self {
        self.code_only = true;
        self
    }

    pub fn is_object(&self) -> bool {
        is_object_type(&self.type_name)
    }

    pub fn is_behavior(&self) -> bool {
        is_behavior_type(&self.type_name)
    }

    pub fn is_resource(&self) -> bool {
        is_resource_type(&self.type_name)
    }

    pub fn expression_kind(&self) -> Option<ExpressionKind> {
        expression_kind_of(&self.type_name)
    }

    pub fn normalized_type(&self) -> &str {
        normalize_type(&self.type_name)
    }
}

// ============================================================================
// Instruction / Expression Metadata
// ============================================================================

/// Schema of a condition or action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstructionMetadata {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterMetadata>,
}

impl InstructionMetadata {
    pub fn new(full_name: impl Into<String>) -> Self {
        InstructionMetadata {
            full_name: full_name.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: ParameterMetadata) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn parameter(&self, index: usize) -> Option<&ParameterMetadata> {
        self.parameters.get(index)
    }
}

/// Schema of an expression function.
///
/// For object expressions parameter 0 is the object; for behavior expressions
/// parameter 0 is the object and parameter 1 the behavior.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpressionMetadata {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterMetadata>,
}

impl ExpressionMetadata {
    pub fn new(full_name: impl Into<String>) -> Self {
        ExpressionMetadata {
            full_name: full_name.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: ParameterMetadata) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Number of arguments a call must write out.
    pub fn min_arguments(&self) -> usize {
        self.parameters
            .iter()
            .filter(|p| !p.optional && !p.code_only)
            .count()
    }

    /// Number of arguments a call may write out.
    pub fn max_arguments(&self) -> usize {
        self.parameters.iter().filter(|p| !p.code_only).count()
    }

    /// Whether parameter `index` is filled in by the engine.
    pub fn is_code_only(&self, index: usize) -> bool {
        self.parameters.get(index).is_some_and(|p| p.code_only)
    }
}

// ============================================================================
// Provider
// ============================================================================

/// Read-only access to instruction and expression schemas.
pub trait MetadataProvider {
    fn action_metadata(&self, type_name: &str) -> Option<&InstructionMetadata>;

    fn condition_metadata(&self, type_name: &str) -> Option<&InstructionMetadata>;

    /// Free function expressions (`Random(10)`, `ToString(1)`).
    fn expression_metadata(&self, kind: ExpressionKind, name: &str)
        -> Option<&ExpressionMetadata>;

    /// Expressions called on an object of the given type.
    fn object_expression_metadata(
        &self,
        kind: ExpressionKind,
        object_type: &str,
        name: &str,
    ) -> Option<&ExpressionMetadata>;

    /// Expressions called on a behavior of the given type.
    fn behavior_expression_metadata(
        &self,
        kind: ExpressionKind,
        behavior_type: &str,
        name: &str,
    ) -> Option<&ExpressionMetadata>;

    /// Metadata of an instruction found in a list of the given kind.
    fn instruction_metadata(
        &self,
        list: ListKind,
        type_name: &str,
    ) -> Option<&InstructionMetadata> {
        match list {
            ListKind::Conditions => self.condition_metadata(type_name),
            ListKind::Actions => self.action_metadata(type_name),
        }
    }
}

type ExpressionTable = BTreeMap<String, ExpressionMetadata>;

/// In-memory metadata registry.
///
/// Object expressions registered for the empty type `""` belong to the base
/// object and are available on every object type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Platform {
    #[serde(default)]
    actions: BTreeMap<String, InstructionMetadata>,
    #[serde(default)]
    conditions: BTreeMap<String, InstructionMetadata>,
    #[serde(default)]
    expressions: HashMap<ExpressionKind, ExpressionTable>,
    #[serde(default)]
    object_expressions: HashMap<ExpressionKind, BTreeMap<String, ExpressionTable>>,
    #[serde(default)]
    behavior_expressions: HashMap<ExpressionKind, BTreeMap<String, ExpressionTable>>,
}

impl Platform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_action(
        &mut self,
        type_name: impl Into<String>,
        metadata: InstructionMetadata,
    ) -> &mut Self {
        self.actions.insert(type_name.into(), metadata);
        self
    }

    pub fn add_condition(
        &mut self,
        type_name: impl Into<String>,
        metadata: InstructionMetadata,
    ) -> &mut Self {
        self.conditions.insert(type_name.into(), metadata);
        self
    }

    pub fn add_expression(
        &mut self,
        kind: ExpressionKind,
        name: impl Into<String>,
        metadata: ExpressionMetadata,
    ) -> &mut Self {
        self.expressions
            .entry(kind)
            .or_default()
            .insert(name.into(), metadata);
        self
    }

    pub fn add_object_expression(
        &mut self,
        kind: ExpressionKind,
        object_type: impl Into<String>,
        name: impl Into<String>,
        metadata: ExpressionMetadata,
    ) -> &mut Self {
        self.object_expressions
            .entry(kind)
            .or_default()
            .entry(object_type.into())
            .or_default()
            .insert(name.into(), metadata);
        self
    }

    pub fn add_behavior_expression(
        &mut self,
        kind: ExpressionKind,
        behavior_type: impl Into<String>,
        name: impl Into<String>,
        metadata: ExpressionMetadata,
    ) -> &mut Self {
        self.behavior_expressions
            .entry(kind)
            .or_default()
            .entry(behavior_type.into())
            .or_default()
            .insert(name.into(), metadata);
        self
    }
}

impl MetadataProvider for Platform {
    fn action_metadata(&self, type_name: &str) -> Option<&InstructionMetadata> {
        self.actions.get(type_name)
    }

    fn condition_metadata(&self, type_name: &str) -> Option<&InstructionMetadata> {
        self.conditions.get(type_name)
    }

    fn expression_metadata(
        &self,
        kind: ExpressionKind,
        name: &str,
    ) -> Option<&ExpressionMetadata> {
        self.expressions.get(&kind)?.get(name)
    }

    fn object_expression_metadata(
        &self,
        kind: ExpressionKind,
        object_type: &str,
        name: &str,
    ) -> Option<&ExpressionMetadata> {
        let by_type = self.object_expressions.get(&kind)?;
        by_type
            .get(object_type)
            .and_then(|table| table.get(name))
            .or_else(|| by_type.get("").and_then(|table| table.get(name)))
    }

    fn behavior_expression_metadata(
        &self,
        kind: ExpressionKind,
        behavior_type: &str,
        name: &str,
    ) -> Option<&ExpressionMetadata> {
        self.behavior_expressions
            .get(&kind)?
            .get(behavior_type)?
            .get(name)
    }
}

// ============================================================================
// Tests
// ============================================================================
