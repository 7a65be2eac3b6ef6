//! Project model: objects, groups, variables, resources and layouts.
//!
//! Only the parts of a project that refactoring reads or rewrites are modeled.
//! A [`Project`] owns global objects and resources plus its layouts; each
//! [`Layout`] owns its own objects and its event tree.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, NameKind};
use crate::event::Event;

// ============================================================================
// Variables
// ============================================================================

/// Value type of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    Number,
    String,
    Boolean,
    Structure,
    Array,
}

/// A typed variable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Variable {
    Number(f64),
    String(String),
    Boolean(bool),
    Structure(VariablesContainer),
    Array(Vec<Variable>),
}

impl Default for Variable {
    fn default() -> Self {
        Variable::Number(0.0)
    }
}

impl Variable {
    pub fn variable_type(&self) -> VariableType {
        match self {
            Variable::Number(_) => VariableType::Number,
            Variable::String(_) => VariableType::String,
            Variable::Boolean(_) => VariableType::Boolean,
            Variable::Structure(_) => VariableType::Structure,
            Variable::Array(_) => VariableType::Array,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct NamedVariable {
    name: String,
    value: Variable,
}

/// Ordered, name-unique list of variables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariablesContainer {
    variables: Vec<NamedVariable>,
}

impl VariablesContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn has(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.position(name).map(|i| &self.variables[i].value)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Variable> {
        let index = self.position(name)?;
        Some(&mut self.variables[index].value)
    }

    /// Insert a variable, replacing the value of an existing one in place.
    pub fn insert(&mut self, name: impl Into<String>, value: Variable) {
        let name = name.into();
        match self.position(&name) {
            Some(index) => self.variables[index].value = value,
            None => self.variables.push(NamedVariable { name, value }),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Variable> {
        let index = self.position(name)?;
        Some(self.variables.remove(index).value)
    }

    /// Rename a variable, keeping its position.
    ///
    /// Returns `false` when `old` does not exist or `new` is already taken.
    pub fn rename(&mut self, old: &str, new: &str) -> bool {
        if old == new {
            return self.has(old);
        }
        if self.has(new) {
            return false;
        }
        match self.position(old) {
            Some(index) => {
                self.variables[index].name = new.to_string();
                true
            }
            None => false,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(|v| v.name.as_str())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.variables.iter().position(|v| v.name == name)
    }
}

// ============================================================================
// Objects and Groups
// ============================================================================

/// A behavior attached to an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Behavior {
    pub name: String,
    #[serde(rename = "type")]
    pub behavior_type: String,
}

impl Behavior {
    pub fn new(name: impl Into<String>, behavior_type: impl Into<String>) -> Self {
        Behavior {
            name: name.into(),
            behavior_type: behavior_type.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Object {
    pub name: String,
    #[serde(rename = "type")]
    pub object_type: String,
    #[serde(default)]
    pub behaviors: Vec<Behavior>,
    #[serde(default)]
    pub variables: VariablesContainer,
}

impl Object {
    pub fn new(name: impl Into<String>, object_type: impl Into<String>) -> Self {
        Object {
            name: name.into(),
            object_type: object_type.into(),
            behaviors: Vec::new(),
            variables: VariablesContainer::new(),
        }
    }

    pub fn with_behavior(
        mut self,
        name: impl Into<String>,
        behavior_type: impl Into<String>,
    ) -> Self {
        self.behaviors.push(Behavior::new(name, behavior_type));
        self
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: Variable) -> Self {
        self.variables.insert(name, value);
        self
    }

    pub fn behavior(&self, name: &str) -> Option<&Behavior> {
        self.behaviors.iter().find(|b| b.name == name)
    }

    pub fn has_behavior_named(&self, name: &str) -> bool {
        self.behavior(name).is_some()
    }
}

/// A named set of object names. Members may name objects that no longer exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectGroup {
    pub name: String,
    #[serde(default)]
    pub members: Vec<String>,
}

impl ObjectGroup {
    pub fn new<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ObjectGroup {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    pub fn find(&self, object: &str) -> bool {
        self.members.iter().any(|m| m == object)
    }

    pub fn add_object(&mut self, object: impl Into<String>) {
        let object = object.into();
        if !self.find(&object) {
            self.members.push(object);
        }
    }

    /// Returns whether the object was a member.
    pub fn remove_object(&mut self, object: &str) -> bool {
        let before = self.members.len();
        self.members.retain(|m| m != object);
        self.members.len() != before
    }

    /// Returns whether the object was a member.
    pub fn rename_object(&mut self, old: &str, new: &str) -> bool {
        let mut renamed = false;
        for member in self.members.iter_mut().filter(|m| m.as_str() == old) {
            *member = new.to_string();
            renamed = true;
        }
        renamed
    }
}

/// One namespace of objects and groups.
///
/// Names are unique across objects and groups of the same container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectsContainer {
    #[serde(default)]
    pub objects: Vec<Object>,
    #[serde(default)]
    pub groups: Vec<ObjectGroup>,
}

impl ObjectsContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_object_named(&self, name: &str) -> bool {
        self.object(name).is_some()
    }

    pub fn has_group_named(&self, name: &str) -> bool {
        self.group(name).is_some()
    }

    pub fn object(&self, name: &str) -> Option<&Object> {
        self.objects.iter().find(|o| o.name == name)
    }

    pub fn object_mut(&mut self, name: &str) -> Option<&mut Object> {
        self.objects.iter_mut().find(|o| o.name == name)
    }

    pub fn group(&self, name: &str) -> Option<&ObjectGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn group_mut(&mut self, name: &str) -> Option<&mut ObjectGroup> {
        self.groups.iter_mut().find(|g| g.name == name)
    }

    pub fn insert_object(&mut self, object: Object) -> CoreResult<&mut Object> {
        self.ensure_free(NameKind::Object, &object.name)?;
        self.objects.push(object);
        let index = self.objects.len() - 1;
        Ok(&mut self.objects[index])
    }

    pub fn insert_group(&mut self, group: ObjectGroup) -> CoreResult<&mut ObjectGroup> {
        self.ensure_free(NameKind::Group, &group.name)?;
        self.groups.push(group);
        let index = self.groups.len() - 1;
        Ok(&mut self.groups[index])
    }

    pub fn remove_object(&mut self, name: &str) -> Option<Object> {
        let index = self.objects.iter().position(|o| o.name == name)?;
        Some(self.objects.remove(index))
    }

    pub fn remove_group(&mut self, name: &str) -> Option<ObjectGroup> {
        let index = self.groups.iter().position(|g| g.name == name)?;
        Some(self.groups.remove(index))
    }

    fn ensure_free(&self, kind: NameKind, name: &str) -> CoreResult<()> {
        if self.has_object_named(name) || self.has_group_named(name) {
            return Err(CoreError::duplicate(kind, name));
        }
        Ok(())
    }
}

// ============================================================================
// Resources
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    /// Resource kind, e.g. `image` or `audio`.
    pub kind: String,
    #[serde(default)]
    pub file: String,
}

impl Resource {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Resource {
            name: name.into(),
            kind: kind.into(),
            file: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourcesContainer {
    resources: Vec<Resource>,
}

impl ResourcesContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_resource_named(&self, name: &str) -> bool {
        self.resources.iter().any(|r| r.name == name)
    }

    pub fn insert(&mut self, resource: Resource) -> CoreResult<()> {
        if self.has_resource_named(&resource.name) {
            return Err(CoreError::duplicate(NameKind::Resource, resource.name));
        }
        self.resources.push(resource);
        Ok(())
    }
}

// ============================================================================
// Layouts and Projects
// ============================================================================

/// A scene: its own objects plus its event tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub name: String,
    #[serde(default)]
    pub objects: ObjectsContainer,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Layout {
    pub fn new(name: impl Into<String>) -> Self {
        Layout {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_objects(mut self, objects: ObjectsContainer) -> Self {
        self.objects = objects;
        self
    }

    pub fn with_events(mut self, events: Vec<Event>) -> Self {
        self.events = events;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    /// Global objects, visible from every layout unless shadowed.
    #[serde(default)]
    pub objects: ObjectsContainer,
    #[serde(default)]
    pub resources: ResourcesContainer,
    #[serde(default)]
    pub layouts: Vec<Layout>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Project {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn layout(&self, name: &str) -> Option<&Layout> {
        self.layouts.iter().find(|l| l.name == name)
    }

    pub fn layout_mut(&mut self, name: &str) -> Option<&mut Layout> {
        self.layouts.iter_mut().find(|l| l.name == name)
    }

    pub fn insert_layout(&mut self, layout: Layout) -> CoreResult<&mut Layout> {
        if self.layout(&layout.name).is_some() {
            return Err(CoreError::duplicate(NameKind::Layout, layout.name));
        }
        self.layouts.push(layout);
        let index = self.layouts.len() - 1;
        Ok(&mut self.layouts[index])
    }
}

// ============================================================================
// Tests
// ============================================================================
