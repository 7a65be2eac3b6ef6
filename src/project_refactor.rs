//! Layout and project level refactorings.
//!
//! These entry points combine the events refactorings with the bookkeeping an
//! editor needs after an object or group is renamed or deleted: group
//! memberships are kept in sync, and a global rename or removal is carried to
//! every layout that does not shadow the name with its own object or group.
//!
//! Call the removal functions before the object is taken out of its
//! container: expressions calling functions specific to its type only parse
//! while the object still resolves.

use tracing::info;

use evrefactor_core::{
    CoreError, Layout, MetadataProvider, NameKind, ObjectsContainer, ObjectsContainersList,
    Project, VariablesChangeset, VariablesContainer,
};

use crate::error::{RefactorError, RefactorResult};
use crate::refactor::{remove_object_in_events, rename_object_in_events};

// ============================================================================
// Rename
// ============================================================================

/// Rename `old` to `new` in the events of layout `layout_name` and, when an
/// object (not a group) is renamed, in the layout's groups.
///
/// The object or group may already carry its new name: expressions are parsed
/// in a scope where it is visible under both names.
///
/// Returns true if any event or group changed.
pub fn object_or_group_renamed_in_layout(
    platform: &dyn MetadataProvider,
    project: &mut Project,
    layout_name: &str,
    old: &str,
    new: &str,
    is_group: bool,
) -> RefactorResult<bool> {
    check_names(old, new)?;
    let Project {
        objects: globals,
        layouts,
        ..
    } = project;
    let layout = find_layout(layouts, layout_name)?;
    info!(layout = layout_name, old, new, is_group, "object or group renamed in layout");
    rename_in_layout(platform, globals, layout, old, new, is_group)
}

/// Rename the global object or group `old` to `new` in every layout that does
/// not declare its own `old`, and in the project's groups.
pub fn global_object_or_group_renamed(
    platform: &dyn MetadataProvider,
    project: &mut Project,
    old: &str,
    new: &str,
    is_group: bool,
) -> RefactorResult<bool> {
    check_names(old, new)?;
    info!(old, new, is_group, "global object or group renamed");
    let Project {
        objects: globals,
        layouts,
        ..
    } = project;

    let mut changed = false;
    for layout in layouts.iter_mut() {
        if shadows(&layout.objects, old) {
            info!(layout = %layout.name, name = old, "layout shadows global name, skipped");
            continue;
        }
        changed |= rename_in_layout(platform, globals, layout, old, new, is_group)?;
    }
    if !is_group {
        changed |= rename_in_groups(globals, old, new);
    }
    Ok(changed)
}

fn rename_in_layout(
    platform: &dyn MetadataProvider,
    globals: &ObjectsContainer,
    layout: &mut Layout,
    old: &str,
    new: &str,
    is_group: bool,
) -> RefactorResult<bool> {
    let Layout {
        objects, events, ..
    } = layout;

    let mut changed = {
        let scope = ObjectsContainersList::for_project_and_layout(globals, objects);
        let alias = alias_container(&scope, old, new)?;
        let scope = ObjectsContainersList::from_containers(vec![&alias, &*objects, globals]);
        rename_object_in_events(platform, &scope, events, old, new)
    };
    if !is_group {
        changed |= rename_in_groups(objects, old, new);
    }
    Ok(changed)
}

/// A container declaring `old` as a copy of `new` when only `new` resolves.
fn alias_container(
    scope: &ObjectsContainersList<'_>,
    old: &str,
    new: &str,
) -> RefactorResult<ObjectsContainer> {
    let mut alias = ObjectsContainer::new();
    if scope.has_object_or_group_named(old) {
        return Ok(alias);
    }
    if let Some(object) = scope.object(new) {
        let mut object = object.clone();
        object.name = old.to_string();
        alias.insert_object(object)?;
    } else if let Some(group) = scope.group(new) {
        let mut group = group.clone();
        group.name = old.to_string();
        alias.insert_group(group)?;
    }
    Ok(alias)
}

fn rename_in_groups(container: &mut ObjectsContainer, old: &str, new: &str) -> bool {
    let mut changed = false;
    for group in container.groups.iter_mut() {
        changed |= group.rename_object(old, new);
    }
    changed
}

// ============================================================================
// Remove
// ============================================================================

/// Handle the removal of `name` from layout `layout_name`.
///
/// With `remove_events_and_groups`, instructions referring to it are deleted
/// from the layout's events and, for an object, it is taken out of the
/// layout's groups. Without it nothing is touched.
pub fn object_or_group_removed_in_layout(
    platform: &dyn MetadataProvider,
    project: &mut Project,
    layout_name: &str,
    name: &str,
    is_group: bool,
    remove_events_and_groups: bool,
) -> RefactorResult<bool> {
    check_name(name)?;
    let Project {
        objects: globals,
        layouts,
        ..
    } = project;
    let layout = find_layout(layouts, layout_name)?;
    info!(layout = layout_name, name, is_group, "object or group removed from layout");
    if !remove_events_and_groups {
        return Ok(false);
    }
    Ok(remove_in_layout(platform, globals, layout, name, is_group))
}

/// Handle the removal of the global object or group `name` from every layout
/// that does not declare its own `name`, and from the project's groups.
pub fn global_object_or_group_removed(
    platform: &dyn MetadataProvider,
    project: &mut Project,
    name: &str,
    is_group: bool,
    remove_events_and_groups: bool,
) -> RefactorResult<bool> {
    check_name(name)?;
    info!(name, is_group, "global object or group removed");
    if !remove_events_and_groups {
        return Ok(false);
    }
    let Project {
        objects: globals,
        layouts,
        ..
    } = project;

    let mut changed = false;
    for layout in layouts.iter_mut() {
        if shadows(&layout.objects, name) {
            info!(layout = %layout.name, name, "layout shadows global name, skipped");
            continue;
        }
        changed |= remove_in_layout(platform, globals, layout, name, is_group);
    }
    if !is_group {
        changed |= remove_from_groups(globals, name);
    }
    Ok(changed)
}

fn remove_in_layout(
    platform: &dyn MetadataProvider,
    globals: &ObjectsContainer,
    layout: &mut Layout,
    name: &str,
    is_group: bool,
) -> bool {
    let Layout {
        objects, events, ..
    } = layout;

    let mut changed = {
        let scope = ObjectsContainersList::for_project_and_layout(globals, objects);
        remove_object_in_events(platform, &scope, events, name)
    };
    if !is_group {
        changed |= remove_from_groups(objects, name);
    }
    changed
}

fn remove_from_groups(container: &mut ObjectsContainer, name: &str) -> bool {
    let mut changed = false;
    for group in container.groups.iter_mut() {
        changed |= group.remove_object(name);
    }
    changed
}

// ============================================================================
// Group Variables
// ============================================================================

/// Apply `changeset` to the variables of every member of `group_name`.
///
/// The group is looked up in the layout, then in the project. Members are
/// resolved the same way; members that no longer exist are skipped. Added and
/// value-changed variables are copied from `group_variables`.
///
/// Returns true if any member's variables changed.
pub fn apply_changeset_to_group(
    project: &mut Project,
    layout_name: &str,
    group_name: &str,
    group_variables: &VariablesContainer,
    changeset: &VariablesChangeset,
) -> RefactorResult<bool> {
    let Project {
        objects: globals,
        layouts,
        ..
    } = project;
    let layout = find_layout(layouts, layout_name)?;

    let members = layout
        .objects
        .group(group_name)
        .or_else(|| globals.group(group_name))
        .map(|group| group.members.clone())
        .ok_or_else(|| CoreError::not_found(NameKind::Group, group_name))?;

    info!(
        layout = layout_name,
        group = group_name,
        members = members.len(),
        "applying variables changeset to group"
    );
    let mut changed = false;
    for member in &members {
        let object = match layout.objects.object_mut(member) {
            Some(object) => Some(object),
            None => globals.object_mut(member),
        };
        if let Some(object) = object {
            changed |= changeset.apply_to(&mut object.variables, group_variables);
        }
    }
    Ok(changed)
}

// ============================================================================
// Helpers
// ============================================================================

fn find_layout<'p>(layouts: &'p mut [Layout], name: &str) -> RefactorResult<&'p mut Layout> {
    layouts
        .iter_mut()
        .find(|layout| layout.name == name)
        .ok_or_else(|| CoreError::not_found(NameKind::Layout, name).into())
}

fn shadows(container: &ObjectsContainer, name: &str) -> bool {
    container.has_object_named(name) || container.has_group_named(name)
}

fn check_name(name: &str) -> RefactorResult<()> {
    if name.is_empty() {
        return Err(RefactorError::invalid_args("object or group name is empty"));
    }
    Ok(())
}

fn check_names(old: &str, new: &str) -> RefactorResult<()> {
    check_name(old)?;
    check_name(new)
}
