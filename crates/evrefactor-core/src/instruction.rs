//! Conditions and actions.

use serde::{Deserialize, Serialize};

use crate::expression::Expression;

/// A single condition or action call with its parameters.
///
/// While the user is editing, `parameters` may hold fewer entries than the
/// metadata declares; [`Instruction::parameter_text`] reads missing entries
/// as empty text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// Instruction type identifier, resolved through the metadata provider.
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub parameters: Vec<Expression>,
    /// Nested instructions (condition groups such as "or"/"and").
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_instructions: Vec<Instruction>,
    #[serde(default)]
    pub inverted: bool,
}

impl Instruction {
    pub fn new(type_name: impl Into<String>) -> Self {
        Instruction {
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    /// Build an instruction with the given parameter texts.
    pub fn with_parameters<I, S>(type_name: impl Into<String>, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Instruction {
            type_name: type_name.into(),
            parameters: parameters
                .into_iter()
                .map(|p| Expression::new(p.into()))
                .collect(),
            ..Default::default()
        }
    }

    pub fn with_sub_instructions(mut self, sub_instructions: Vec<Instruction>) -> Self {
        self.sub_instructions = sub_instructions;
        self
    }

    pub fn inverted(mut self) -> Self {
        self.inverted = true;
        self
    }

    pub fn parameter(&self, index: usize) -> Option<&Expression> {
        self.parameters.get(index)
    }

    /// Text of the parameter at `index`, or `""` if it is not set yet.
    pub fn parameter_text(&self, index: usize) -> &str {
        self.parameters
            .get(index)
            .map(Expression::plain_string)
            .unwrap_or("")
    }

    /// Set the parameter at `index`, padding with empty parameters if needed.
    pub fn set_parameter(&mut self, index: usize, value: impl Into<Expression>) {
        if index >= self.parameters.len() {
            self.parameters.resize_with(index + 1, Expression::default);
        }
        self.parameters[index] = value.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameters_read_as_empty() {
        let instruction = Instruction::with_parameters("Create", ["", "Player"]);
        assert_eq!(instruction.parameter_text(1), "Player");
        assert_eq!(instruction.parameter_text(5), "");
        assert!(instruction.parameter(5).is_none());
    }

    #[test]
    fn set_parameter_pads() {
        let mut instruction = Instruction::new("MettreX");
        instruction.set_parameter(2, "10");
        assert_eq!(instruction.parameters.len(), 3);
        assert_eq!(instruction.parameter_text(0), "");
        assert_eq!(instruction.parameter_text(2), "10");
    }

    #[test]
    fn serde_shape() {
        let instruction = Instruction::with_parameters("PosX", ["Player", "<", "10"]).inverted();
        let json = serde_json::to_value(&instruction).unwrap();
        assert_eq!(json["type"], "PosX");
        assert_eq!(json["parameters"][0], "Player");
        assert_eq!(json["inverted"], true);
        assert!(json.get("sub_instructions").is_none());
    }
}
