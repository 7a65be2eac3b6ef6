//! Parameter validation against the fixture project.
//!
//! # Running These Tests
//!
//! ```bash
//! cargo nextest run -p evrefactor validation
//! ```

mod support;

use evrefactor::validator::root_variable_name;
use evrefactor::{ErrorCode, InstructionValidator};
use evrefactor_core::{
    Expression, ExpressionKind, Instruction, ListKind, MetadataProvider, Object,
    ObjectsContainersList, Project,
};

use support::{call, platform, project, LAYOUT, PHYSICS};

/// Run `f` with a validator over layout "Level1" of the fixture project.
fn with_validator<R>(f: impl FnOnce(&InstructionValidator<'_>, &dyn MetadataProvider) -> R) -> R {
    let platform = platform();
    let project = project(Vec::new());
    let layout = project.layout(LAYOUT).unwrap();
    let scope = ObjectsContainersList::for_project_and_layout(&project.objects, &layout.objects);
    let validator = InstructionValidator::new(&platform, &scope, &project.resources);
    f(&validator, &platform)
}

fn valid(list: ListKind, instruction: &Instruction, index: usize, value: &str) -> bool {
    with_validator(|validator, platform| {
        let metadata = platform
            .instruction_metadata(list, &instruction.type_name)
            .unwrap();
        validator.is_parameter_valid(instruction, metadata, index, value)
    })
}

fn valid_action(instruction: &Instruction, index: usize, value: &str) -> bool {
    valid(ListKind::Actions, instruction, index, value)
}

// ============================================================================
// Objects
// ============================================================================

mod objects {
    use super::*;

    #[test]
    fn names_must_resolve_in_scope() {
        let set_x = call("MettreX", ["", "=", "0"]);
        assert!(valid_action(&set_x, 0, "Player"));
        assert!(valid_action(&set_x, 0, "Hud"));
        assert!(valid_action(&set_x, 0, "Actors"));
        assert!(valid_action(&set_x, 0, "Nobody"));
        assert!(!valid_action(&set_x, 0, "Ghost"));
        assert!(!valid_action(&set_x, 0, ""));
    }

    #[test]
    fn required_type_uses_the_common_type_of_groups() {
        let animate = call("SetAnimation", ["", "=", "1"]);
        assert!(valid_action(&animate, 0, "Coin"));
        assert!(valid_action(&animate, 0, "Actors"));
        assert!(!valid_action(&animate, 0, "Label"));
        assert!(!valid_action(&animate, 0, "Mixed"));
        assert!(!valid_action(&animate, 0, "Nobody"));
    }

    #[test]
    fn following_behavior_parameters_must_be_satisfied() {
        let jump = call("SetJumpSpeed", ["", "PlatformerObject", "=", "600"]);
        assert!(valid_action(&jump, 0, "Player"));
        assert!(valid_action(&jump, 0, "Actors"));
        assert!(!valid_action(&jump, 0, "Coin"));
        assert!(!valid_action(&jump, 0, "Mixed"));

        let wrong_behavior = call("SetJumpSpeed", ["", "Physics", "=", "600"]);
        assert!(!valid_action(&wrong_behavior, 0, "Player"));
    }

    #[test]
    fn behavior_scan_stops_at_the_next_object_parameter() {
        let collision = call("Physics2::Collision", ["", "PlatformerObject", "", "Body"]);
        let conditions = ListKind::Conditions;

        // Player has no "Body"; only the second object is checked against it.
        assert!(valid(conditions, &collision, 0, "Player"));
        assert!(valid(conditions, &collision, 0, "Actors"));
        assert!(!valid(conditions, &collision, 0, "Coin"));

        assert!(!valid(conditions, &collision, 2, "Player"));
        assert!(!valid(conditions, &collision, 2, "Crate"));
    }

    #[test]
    fn second_object_behaviors_are_checked() {
        let platform = platform();
        let mut project = project(Vec::new());
        project
            .layout_mut(LAYOUT)
            .unwrap()
            .objects
            .insert_object(Object::new("Crate", "Sprite").with_behavior("Body", PHYSICS))
            .unwrap();
        let layout = project.layout(LAYOUT).unwrap();
        let scope =
            ObjectsContainersList::for_project_and_layout(&project.objects, &layout.objects);
        let validator = InstructionValidator::new(&platform, &scope, &project.resources);
        let metadata = platform
            .instruction_metadata(ListKind::Conditions, "Physics2::Collision")
            .unwrap();

        let collision = call("Physics2::Collision", ["", "PlatformerObject", "", "Body"]);
        assert!(validator.is_parameter_valid(&collision, metadata, 2, "Crate"));
        assert!(!validator.is_parameter_valid(&collision, metadata, 0, "Crate"));
    }

    #[test]
    fn conditions_use_condition_metadata() {
        let jumping = call("IsJumping", ["", "PlatformerObject"]);
        assert!(valid(ListKind::Conditions, &jumping, 0, "Enemy"));
        assert!(!valid(ListKind::Conditions, &jumping, 0, "Label"));
    }
}

// ============================================================================
// Expressions
// ============================================================================

mod expressions {
    use super::*;

    #[test]
    fn number_parameters_must_parse() {
        let set_x = call("MettreX", ["Player", "=", ""]);
        assert!(valid_action(&set_x, 2, "Player.X() + Random(10)"));
        assert!(valid_action(&set_x, 2, "Coin.Animation() * 2"));
        assert!(!valid_action(&set_x, 2, "Label.Animation()"));
        assert!(!valid_action(&set_x, 2, "Player.X() +"));
        assert!(!valid_action(&set_x, 2, ""));
    }

    #[test]
    fn string_parameters_must_parse() {
        let text = call("TextObject::String", ["Label", "=", ""]);
        assert!(valid_action(&text, 2, "\"Score: \" + ToString(Player.X())"));
        assert!(!valid_action(&text, 2, "Score"));
        assert!(!valid_action(&text, 2, ""));
    }

    #[test]
    fn empty_layer_is_valid() {
        let create = call("Create", ["", "Coin", "0", "0", ""]);
        assert!(valid_action(&create, 4, ""));
        assert!(valid_action(&create, 4, "\"Background\""));
        assert!(!valid_action(&create, 4, "Background"));
    }

    #[test]
    fn revalidation_follows_scope_changes() {
        let platform = platform();
        let mut project = project(Vec::new());
        let set_x = call("MettreX", ["Player", "=", "Ghost.Animation()"]);
        let metadata = platform
            .instruction_metadata(ListKind::Actions, "MettreX")
            .unwrap();
        let check = |project: &Project| {
            let layout = project.layout(LAYOUT).unwrap();
            let scope =
                ObjectsContainersList::for_project_and_layout(&project.objects, &layout.objects);
            InstructionValidator::new(&platform, &scope, &project.resources).is_parameter_valid(
                &set_x,
                metadata,
                2,
                "Ghost.Animation()",
            )
        };

        assert!(!check(&project));

        let objects = &mut project.layout_mut(LAYOUT).unwrap().objects;
        objects.insert_object(Object::new("Ghost", "Sprite")).unwrap();
        assert!(check(&project));

        let objects = &mut project.layout_mut(LAYOUT).unwrap().objects;
        objects.object_mut("Ghost").unwrap().object_type = "TextObject::Text".to_string();
        assert!(!check(&project));

        assert!(!set_x.parameters[2].has_call_tree());
    }

    #[test]
    fn check_expression_reports_the_parse_error() {
        with_validator(|validator, _| {
            let err = validator
                .check_expression(ExpressionKind::Number, &Expression::new("1 +"))
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidExpression);

            assert!(validator
                .check_expression(ExpressionKind::String, &Expression::new("\"ok\""))
                .is_ok());
        });
    }
}

// ============================================================================
// Variables
// ============================================================================

mod variables {
    use super::*;

    #[test]
    fn typed_object_variable_instructions_need_a_declared_root() {
        let set_var = call("SetNumberObjectVariable", ["Player", "", "=", "1"]);
        assert!(valid_action(&set_var, 1, "Health"));
        assert!(valid_action(&set_var, 1, "Inventory.Sword"));
        assert!(valid_action(&set_var, 1, "Inventory[\"Sword\"]"));
        assert!(!valid_action(&set_var, 1, "Mana"));
        assert!(!valid_action(&set_var, 1, "Health["));
    }

    #[test]
    fn groups_are_not_checked_for_variables() {
        let set_var = call("SetNumberObjectVariable", ["Actors", "", "=", "1"]);
        assert!(valid_action(&set_var, 1, "Mana"));
    }

    #[test]
    fn other_instructions_only_need_a_valid_path() {
        let legacy = call("ModVarObjet", ["Player", "", "=", "1"]);
        assert!(valid_action(&legacy, 1, "Mana"));
        assert!(!valid_action(&legacy, 1, "Mana."));

        let scene_var = call("SetNumberVariable", ["", "=", "1"]);
        assert!(valid_action(&scene_var, 0, "Score[Player.X()]"));
    }

    #[test]
    fn root_names() {
        assert_eq!(root_variable_name("Inventory.Sword[0]"), "Inventory");
        assert_eq!(root_variable_name("Scores[1].Best"), "Scores");
        assert_eq!(root_variable_name("Lives"), "Lives");
        assert_eq!(root_variable_name(""), "");
    }
}

// ============================================================================
// Resources And Other Types
// ============================================================================

mod other_types {
    use super::*;

    #[test]
    fn resources_must_exist() {
        let play = call("PlaySound", ["", ""]);
        assert!(valid_action(&play, 1, "jump.wav"));
        assert!(!valid_action(&play, 1, "land.wav"));
    }

    #[test]
    fn unchecked_types_and_undeclared_parameters_are_valid() {
        let set_x = call("MettreX", ["Player", "", "0"]);
        assert!(valid_action(&set_x, 1, "anything"));
        assert!(valid_action(&set_x, 9, "anything"));
    }
}
