//! Switching variable instructions between their typed siblings.
//!
//! Variable getters, setters and pushes exist in one flavor per value type.
//! When the user changes a variable's type, the editor moves every instruction
//! on it to the matching sibling; only the type tag changes, parameters stay.
//!
//! | Family | Number | String | Boolean |
//! |--------|--------|--------|---------|
//! | Variable getter | `NumberVariable` | `StringVariable` | `BooleanVariable` |
//! | Variable setter | `SetNumberVariable` | `SetStringVariable` | `SetBooleanVariable` |
//! | Variable push | `PushNumber` | `PushString` | `PushBoolean` |
//! | Object variable getter | `NumberObjectVariable` | `StringObjectVariable` | `BooleanObjectVariable` |
//! | Object variable setter | `SetNumberObjectVariable` | `SetStringObjectVariable` | `SetBooleanObjectVariable` |
//! | Object variable push | `ObjectVariablePushNumber` | `ObjectVariablePushString` | `ObjectVariablePushBool` |

use tracing::trace;

use evrefactor_core::{Instruction, VariableType};

struct Family {
    number: &'static str,
    string: &'static str,
    boolean: &'static str,
}

impl Family {
    fn member(&self, value_type: VariableType) -> Option<&'static str> {
        match value_type {
            VariableType::Number => Some(self.number),
            VariableType::String => Some(self.string),
            VariableType::Boolean => Some(self.boolean),
            VariableType::Structure | VariableType::Array => None,
        }
    }

    fn value_type_of(&self, id: &str) -> Option<VariableType> {
        if id == self.number {
            Some(VariableType::Number)
        } else if id == self.string {
            Some(VariableType::String)
        } else if id == self.boolean {
            Some(VariableType::Boolean)
        } else {
            None
        }
    }
}

const FAMILIES: &[Family] = &[
    Family {
        number: "NumberVariable",
        string: "StringVariable",
        boolean: "BooleanVariable",
    },
    Family {
        number: "SetNumberVariable",
        string: "SetStringVariable",
        boolean: "SetBooleanVariable",
    },
    Family {
        number: "PushNumber",
        string: "PushString",
        boolean: "PushBoolean",
    },
    Family {
        number: "NumberObjectVariable",
        string: "StringObjectVariable",
        boolean: "BooleanObjectVariable",
    },
    Family {
        number: "SetNumberObjectVariable",
        string: "SetStringObjectVariable",
        boolean: "SetBooleanObjectVariable",
    },
    Family {
        number: "ObjectVariablePushNumber",
        string: "ObjectVariablePushString",
        boolean: "ObjectVariablePushBool",
    },
];

fn family_of(id: &str) -> Option<(&'static Family, VariableType)> {
    FAMILIES
        .iter()
        .find_map(|family| family.value_type_of(id).map(|value_type| (family, value_type)))
}

/// Whether `id` belongs to one of the typed variable families.
pub fn is_switchable(id: &str) -> bool {
    family_of(id).is_some()
}

/// The Number member of the family `id` belongs to.
pub fn family_identifier_of(id: &str) -> Option<&'static str> {
    family_of(id).map(|(family, _)| family.number)
}

/// The value type `id` operates on.
pub fn value_type_of(id: &str) -> Option<VariableType> {
    family_of(id).map(|(_, value_type)| value_type)
}

/// Retarget `instruction` to the sibling for `value_type`.
///
/// Instructions outside the families, and structure or array value types,
/// leave the instruction untouched. Returns true if the type tag changed.
pub fn switch_to(instruction: &mut Instruction, value_type: VariableType) -> bool {
    let Some((family, _)) = family_of(&instruction.type_name) else {
        return false;
    };
    let Some(target) = family.member(value_type) else {
        return false;
    };
    if instruction.type_name == target {
        return false;
    }
    trace!(from = %instruction.type_name, to = target, "instruction switched");
    instruction.type_name = target.to_string();
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    mod lookup {
        use super::*;

        #[test]
        fn every_member_is_switchable() {
            for family in FAMILIES {
                for id in [family.number, family.string, family.boolean] {
                    assert!(is_switchable(id), "{id}");
                    assert_eq!(family_identifier_of(id), Some(family.number));
                }
            }
        }

        #[test]
        fn value_types() {
            assert_eq!(value_type_of("SetStringVariable"), Some(VariableType::String));
            assert_eq!(value_type_of("ObjectVariablePushBool"), Some(VariableType::Boolean));
            assert_eq!(value_type_of("PushNumber"), Some(VariableType::Number));
        }

        #[test]
        fn unrelated_instructions() {
            assert!(!is_switchable("Create"));
            assert_eq!(family_identifier_of("Create"), None);
            assert_eq!(value_type_of("Create"), None);
            assert!(!is_switchable("ObjectVariablePushBoolean"));
        }
    }

    mod switching {
        use super::*;

        #[test]
        fn only_the_type_tag_changes() {
            let mut instruction = Instruction::with_parameters(
                "SetNumberObjectVariable",
                ["Player", "Score", "=", "1"],
            )
            .inverted();
            assert!(switch_to(&mut instruction, VariableType::String));
            assert_eq!(instruction.type_name, "SetStringObjectVariable");
            assert_eq!(instruction.parameter_text(1), "Score");
            assert_eq!(instruction.parameters.len(), 4);
            assert!(instruction.inverted);
        }

        #[test]
        fn push_family_uses_short_boolean_name() {
            let mut instruction = Instruction::new("ObjectVariablePushString");
            assert!(switch_to(&mut instruction, VariableType::Boolean));
            assert_eq!(instruction.type_name, "ObjectVariablePushBool");
        }

        #[test]
        fn structure_and_array_are_ignored() {
            let mut instruction = Instruction::new("NumberVariable");
            assert!(!switch_to(&mut instruction, VariableType::Structure));
            assert!(!switch_to(&mut instruction, VariableType::Array));
            assert_eq!(instruction.type_name, "NumberVariable");
        }

        #[test]
        fn same_type_is_a_no_op() {
            let mut instruction = Instruction::new("StringVariable");
            assert!(!switch_to(&mut instruction, VariableType::String));
        }

        #[test]
        fn unknown_instruction_is_untouched() {
            let mut instruction = Instruction::new("Create");
            assert!(!switch_to(&mut instruction, VariableType::Number));
            assert_eq!(instruction.type_name, "Create");
        }
    }
}
