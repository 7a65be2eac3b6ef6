//! Scoped object lookup across nested containers.
//!
//! An [`ObjectsContainersList`] is a borrowed, ordered view over several
//! [`ObjectsContainer`]s, innermost first. Lookups scan inner to outer and stop
//! at the first container that declares the name, so a layout object shadows
//! a global object or group with the same name.
//!
//! Groups are resolved through the same view: a group's members are expanded
//! against the whole list and members that no longer name an object are
//! skipped. Type queries on a group report the type shared by every existing
//! member, or `""` when members disagree or none exist.

use crate::project::{Object, ObjectGroup, ObjectsContainer, Variable};

/// Whether an object declares a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariablePresence {
    Declared,
    Undeclared,
    /// The name is a group; variables are not checked across members.
    Unresolved,
}

enum Resolved<'a> {
    Object(&'a Object),
    Group(&'a ObjectGroup),
}

/// Ordered inner→outer view over object namespaces.
#[derive(Debug, Clone)]
pub struct ObjectsContainersList<'a> {
    containers: Vec<&'a ObjectsContainer>,
}

impl<'a> ObjectsContainersList<'a> {
    /// The usual two-level scope: layout objects shadow project objects.
    pub fn for_project_and_layout(
        project: &'a ObjectsContainer,
        layout: &'a ObjectsContainer,
    ) -> Self {
        ObjectsContainersList {
            containers: vec![layout, project],
        }
    }

    /// Build a view from containers listed innermost first.
    pub fn from_containers(containers: Vec<&'a ObjectsContainer>) -> Self {
        ObjectsContainersList { containers }
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// The `(project, layout)` containers of a two-level list.
    ///
    /// # Panics
    ///
    /// Panics if the list does not hold exactly two containers.
    pub fn project_and_layout(&self) -> (&'a ObjectsContainer, &'a ObjectsContainer) {
        assert_eq!(
            self.containers.len(),
            2,
            "project_and_layout requires a project and layout scope"
        );
        (self.containers[1], self.containers[0])
    }

    pub fn has_object_or_group_named(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// The object with this name, if it resolves to an object (not a group).
    pub fn object(&self, name: &str) -> Option<&'a Object> {
        match self.resolve(name)? {
            Resolved::Object(object) => Some(object),
            Resolved::Group(_) => None,
        }
    }

    /// The group with this name, if it resolves to a group.
    pub fn group(&self, name: &str) -> Option<&'a ObjectGroup> {
        match self.resolve(name)? {
            Resolved::Group(group) => Some(group),
            Resolved::Object(_) => None,
        }
    }

    /// Object names designated by `name`: itself for an object, the existing
    /// members for a group, nothing for an unknown name.
    pub fn expand_object_name(&self, name: &str) -> Vec<String> {
        self.objects_designated_by(name)
            .into_iter()
            .map(|object| object.name.clone())
            .collect()
    }

    /// Declared type of an object, or the type shared by every member of a group.
    pub fn type_of_object(&self, name: &str) -> String {
        common_value(
            self.objects_designated_by(name)
                .into_iter()
                .map(|object| Some(object.object_type.as_str())),
        )
    }

    /// Type of the behavior called `behavior` on an object, or the type shared
    /// by that behavior on every member of a group.
    pub fn type_of_behavior_in_object_or_group(&self, name: &str, behavior: &str) -> String {
        common_value(self.objects_designated_by(name).into_iter().map(|object| {
            object
                .behavior(behavior)
                .map(|b| b.behavior_type.as_str())
        }))
    }

    /// Behavior names of an object, or those shared by every member of a group.
    pub fn behaviors_of_object(&self, name: &str) -> Vec<String> {
        let objects = self.objects_designated_by(name);
        let Some((first, rest)) = objects.split_first() else {
            return Vec::new();
        };
        first
            .behaviors
            .iter()
            .filter(|b| rest.iter().all(|o| o.has_behavior_named(&b.name)))
            .map(|b| b.name.clone())
            .collect()
    }

    /// Whether `name` is an object declaring `variable`. Groups report `false`.
    pub fn has_object_or_group_with_variable_named(&self, name: &str, variable: &str) -> bool {
        self.variable_presence(name, variable) == VariablePresence::Declared
    }

    /// The variable `variable` of object `name`. Groups report `None`.
    pub fn object_or_group_variable(&self, name: &str, variable: &str) -> Option<&'a Variable> {
        self.object(name)?.variables.get(variable)
    }

    pub fn variable_presence(&self, name: &str, variable: &str) -> VariablePresence {
        match self.resolve(name) {
            Some(Resolved::Object(object)) if object.variables.has(variable) => {
                VariablePresence::Declared
            }
            Some(Resolved::Group(_)) => VariablePresence::Unresolved,
            _ => VariablePresence::Undeclared,
        }
    }

    fn resolve(&self, name: &str) -> Option<Resolved<'a>> {
        self.containers.iter().find_map(|container| {
            if let Some(object) = container.object(name) {
                Some(Resolved::Object(object))
            } else {
                container.group(name).map(Resolved::Group)
            }
        })
    }

    fn objects_designated_by(&self, name: &str) -> Vec<&'a Object> {
        match self.resolve(name) {
            Some(Resolved::Object(object)) => vec![object],
            Some(Resolved::Group(group)) => group
                .members
                .iter()
                .filter_map(|member| self.object(member))
                .collect(),
            None => Vec::new(),
        }
    }
}

/// The single value every item agrees on, or `""`. Any `None` or an empty
/// sequence also yields `""`.
fn common_value<'s>(mut values: impl Iterator<Item = Option<&'s str>>) -> String {
    let Some(Some(first)) = values.next() else {
        return String::new();
    };
    if values.all(|value| value == Some(first)) {
        first.to_string()
    } else {
        String::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
