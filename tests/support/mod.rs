//! Shared fixtures for integration tests.
//!
//! The platform declares a handful of instructions and expressions modelled on
//! a typical 2D game extension set; the project has one layout, "Level1",
//! with sprites, a text object, groups and a platformer behavior.

#![allow(dead_code)]

use evrefactor_core::{
    Event, ExpressionKind, ExpressionMetadata, Instruction, InstructionMetadata, Layout, Object,
    ObjectGroup, ObjectsContainer, ParameterMetadata, Platform, Project, Resource, Variable,
    VariablesContainer,
};

pub const PLATFORMER: &str = "PlatformBehavior::PlatformerObjectBehavior";
pub const PHYSICS: &str = "Physics2::Physics2Behavior";
pub const LAYOUT: &str = "Level1";

// ============================================================================
// Platform
// ============================================================================

fn number() -> ParameterMetadata {
    ParameterMetadata::new("expression")
}

fn instruction(full_name: &str, parameters: &[ParameterMetadata]) -> InstructionMetadata {
    parameters
        .iter()
        .cloned()
        .fold(InstructionMetadata::new(full_name), InstructionMetadata::with_parameter)
}

pub fn platform() -> Platform {
    let mut platform = Platform::new();

    platform
        .add_action(
            "Create",
            instruction(
                "Create an object",
                &[
                    ParameterMetadata::new("currentScene").code_only(),
                    ParameterMetadata::new("objectListOrEmptyIfJustDeclared"),
                    number(),
                    number(),
                    ParameterMetadata::new("layer").with_default("\"\""),
                ],
            ),
        )
        .add_action(
            "MettreX",
            instruction(
                "X position",
                &[
                    ParameterMetadata::new("object"),
                    ParameterMetadata::new("operator"),
                    number(),
                ],
            ),
        )
        .add_action(
            "SetAnimation",
            instruction(
                "Change the animation",
                &[
                    ParameterMetadata::new("object").with_extra_info("Sprite"),
                    ParameterMetadata::new("operator"),
                    number(),
                ],
            ),
        )
        .add_action(
            "SetJumpSpeed",
            instruction(
                "Jump speed",
                &[
                    ParameterMetadata::new("object"),
                    ParameterMetadata::new("behavior").with_extra_info(PLATFORMER),
                    ParameterMetadata::new("operator"),
                    number(),
                ],
            ),
        )
        .add_action(
            "TextObject::String",
            instruction(
                "Change the text",
                &[
                    ParameterMetadata::new("object").with_extra_info("TextObject::Text"),
                    ParameterMetadata::new("operator"),
                    ParameterMetadata::new("string"),
                ],
            ),
        )
        .add_action(
            "SetNumberObjectVariable",
            instruction(
                "Change an object variable",
                &[
                    ParameterMetadata::new("objectPtr"),
                    ParameterMetadata::new("objectvar"),
                    ParameterMetadata::new("operator"),
                    number(),
                ],
            ),
        )
        .add_action(
            "ModVarObjet",
            instruction(
                "Change an object variable (legacy)",
                &[
                    ParameterMetadata::new("objectPtr"),
                    ParameterMetadata::new("objectvar"),
                    ParameterMetadata::new("operator"),
                    number(),
                ],
            ),
        )
        .add_action(
            "SetNumberVariable",
            instruction(
                "Change a scene variable",
                &[
                    ParameterMetadata::new("scenevar"),
                    ParameterMetadata::new("operator"),
                    number(),
                ],
            ),
        )
        .add_action(
            "PlaySound",
            instruction(
                "Play a sound",
                &[
                    ParameterMetadata::new("currentScene").code_only(),
                    ParameterMetadata::new("audioResource"),
                ],
            ),
        );

    platform
        .add_condition(
            "PosX",
            instruction(
                "Compare X position",
                &[
                    ParameterMetadata::new("object"),
                    ParameterMetadata::new("relationalOperator"),
                    number(),
                ],
            ),
        )
        .add_condition(
            "IsJumping",
            instruction(
                "Is jumping",
                &[
                    ParameterMetadata::new("object"),
                    ParameterMetadata::new("behavior").with_extra_info(PLATFORMER),
                ],
            ),
        )
        .add_condition(
            "Physics2::Collision",
            instruction(
                "Collision",
                &[
                    ParameterMetadata::new("object"),
                    ParameterMetadata::new("behavior").with_extra_info(PLATFORMER),
                    ParameterMetadata::new("object"),
                    ParameterMetadata::new("behavior").with_extra_info(PHYSICS),
                ],
            ),
        )
        .add_condition("Or", instruction("Or", &[]))
        .add_condition(
            "NumberVariable",
            instruction(
                "Compare a scene variable",
                &[
                    ParameterMetadata::new("scenevar"),
                    ParameterMetadata::new("relationalOperator"),
                    number(),
                ],
            ),
        );

    platform
        .add_expression(
            ExpressionKind::Number,
            "Random",
            ExpressionMetadata::new("Random integer")
                .with_parameter(ParameterMetadata::new("currentScene").code_only())
                .with_parameter(number()),
        )
        .add_expression(
            ExpressionKind::Number,
            "Max",
            ExpressionMetadata::new("Maximum")
                .with_parameter(number())
                .with_parameter(number()),
        )
        .add_expression(
            ExpressionKind::String,
            "ToString",
            ExpressionMetadata::new("Number to text").with_parameter(number()),
        )
        .add_object_expression(
            ExpressionKind::Number,
            "",
            "X",
            ExpressionMetadata::new("X position").with_parameter(ParameterMetadata::new("object")),
        )
        .add_object_expression(
            ExpressionKind::String,
            "",
            "ObjectName",
            ExpressionMetadata::new("Object name").with_parameter(ParameterMetadata::new("object")),
        )
        .add_object_expression(
            ExpressionKind::Number,
            "Sprite",
            "Animation",
            ExpressionMetadata::new("Animation")
                .with_parameter(ParameterMetadata::new("object").with_extra_info("Sprite")),
        )
        .add_behavior_expression(
            ExpressionKind::Number,
            PLATFORMER,
            "JumpSpeed",
            ExpressionMetadata::new("Jump speed")
                .with_parameter(ParameterMetadata::new("object"))
                .with_parameter(ParameterMetadata::new("behavior").with_extra_info(PLATFORMER)),
        );

    platform
}

// ============================================================================
// Project
// ============================================================================

pub fn scene_objects() -> ObjectsContainer {
    let mut inventory = VariablesContainer::new();
    inventory.insert("Sword", Variable::Number(1.0));

    let mut scene = ObjectsContainer::new();
    scene
        .insert_object(
            Object::new("Player", "Sprite")
                .with_behavior("PlatformerObject", PLATFORMER)
                .with_variable("Health", Variable::Number(100.0))
                .with_variable("Inventory", Variable::Structure(inventory)),
        )
        .unwrap();
    scene
        .insert_object(Object::new("Enemy", "Sprite").with_behavior("PlatformerObject", PLATFORMER))
        .unwrap();
    scene.insert_object(Object::new("Coin", "Sprite")).unwrap();
    scene
        .insert_object(Object::new("Label", "TextObject::Text"))
        .unwrap();
    scene
        .insert_group(ObjectGroup::new("Actors", ["Player", "Enemy"]))
        .unwrap();
    scene
        .insert_group(ObjectGroup::new("Mixed", ["Player", "Label"]))
        .unwrap();
    scene
        .insert_group(ObjectGroup::new("Nobody", Vec::<String>::new()))
        .unwrap();
    scene
}

pub fn global_objects() -> ObjectsContainer {
    let mut globals = ObjectsContainer::new();
    globals
        .insert_object(Object::new("Hud", "TextObject::Text"))
        .unwrap();
    globals
        .insert_group(ObjectGroup::new("Everything", ["Hud", "Player"]))
        .unwrap();
    globals
}

/// A project whose "Level1" layout holds `events`.
pub fn project(events: Vec<Event>) -> Project {
    let mut project = Project::new("Game");
    project.objects = global_objects();
    project
        .resources
        .insert(Resource::new("jump.wav", "audio"))
        .unwrap();
    project
        .insert_layout(
            Layout::new(LAYOUT)
                .with_objects(scene_objects())
                .with_events(events),
        )
        .unwrap();
    project
}

// ============================================================================
// Instructions
// ============================================================================

pub fn call<const N: usize>(type_name: &str, parameters: [&str; N]) -> Instruction {
    Instruction::with_parameters(type_name, parameters)
}

/// Parameter texts of every instruction in `list`, in order.
pub fn parameter_texts(list: &[Instruction]) -> Vec<Vec<String>> {
    list.iter()
        .map(|instruction| {
            instruction
                .parameters
                .iter()
                .map(|parameter| parameter.plain_string().to_string())
                .collect()
        })
        .collect()
}

/// Type names of every instruction in `list`, in order.
pub fn type_names(list: &[Instruction]) -> Vec<&str> {
    list.iter()
        .map(|instruction| instruction.type_name.as_str())
        .collect()
}
