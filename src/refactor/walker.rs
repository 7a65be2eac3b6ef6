//! The instruction walker shared by the mutating refactorings.
//!
//! A worker decides, instruction by instruction, whether to keep it (and
//! whether it changed) or to remove it. Removal compacts the list in place
//! with `retain_mut`, so the instruction that moves into a vacated slot is
//! still visited. Kept instructions have their sub-instructions walked after
//! the worker has seen them; removed ones do not.

use evrefactor_core::{Event, Instruction, ListKind};

/// What to do with a visited instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Visit {
    Keep { changed: bool },
    Remove,
}

impl Visit {
    pub(crate) fn unchanged() -> Self {
        Visit::Keep { changed: false }
    }
}

pub(crate) trait InstructionWorker {
    /// Whether lists of `kind` are walked at all.
    fn visits(&self, _kind: ListKind) -> bool {
        true
    }

    fn visit(&mut self, kind: ListKind, instruction: &mut Instruction) -> Visit;
}

/// Counters reported in the refactoring logs.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct WalkStats {
    pub events: usize,
    pub changed: usize,
    pub removed: usize,
}

/// Walk `events` and their sub-events. Returns true if anything changed.
///
/// An event whose own lists changed is marked as needing a layout update.
pub(crate) fn walk_events<W: InstructionWorker>(
    events: &mut [Event],
    worker: &mut W,
    stats: &mut WalkStats,
) -> bool {
    let mut any_changed = false;
    for event in events.iter_mut() {
        stats.events += 1;

        let mut changed = false;
        for kind in [ListKind::Conditions, ListKind::Actions] {
            if !worker.visits(kind) {
                continue;
            }
            for list in event.instruction_lists_mut(kind) {
                changed |= walk_instructions(list, kind, worker, stats);
            }
        }
        if changed {
            event.mark_needs_layout_update();
            any_changed = true;
        }

        if let Some(sub_events) = event.sub_events_mut() {
            any_changed |= walk_events(sub_events, worker, stats);
        }
    }
    any_changed
}

fn walk_instructions<W: InstructionWorker>(
    list: &mut Vec<Instruction>,
    kind: ListKind,
    worker: &mut W,
    stats: &mut WalkStats,
) -> bool {
    let mut changed = false;
    list.retain_mut(|instruction| match worker.visit(kind, instruction) {
        Visit::Remove => {
            stats.removed += 1;
            changed = true;
            false
        }
        Visit::Keep { changed: visited } => {
            if visited {
                stats.changed += 1;
                changed = true;
            }
            changed |= walk_instructions(&mut instruction.sub_instructions, kind, worker, stats);
            true
        }
    });
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Removes instructions of one type, counts the rest.
    struct DropType {
        type_name: &'static str,
        seen: Vec<String>,
    }

    impl InstructionWorker for DropType {
        fn visit(&mut self, _kind: ListKind, instruction: &mut Instruction) -> Visit {
            self.seen.push(instruction.type_name.clone());
            if instruction.type_name == self.type_name {
                Visit::Remove
            } else {
                Visit::unchanged()
            }
        }
    }

    fn drop_type(type_name: &'static str) -> DropType {
        DropType {
            type_name,
            seen: Vec::new(),
        }
    }

    #[test]
    fn adjacent_removals_are_not_skipped() {
        let mut events = vec![Event::standard(
            vec![],
            vec![
                Instruction::new("Delete"),
                Instruction::new("Delete"),
                Instruction::new("Keep"),
                Instruction::new("Delete"),
            ],
        )];
        let mut worker = drop_type("Delete");
        let mut stats = WalkStats::default();

        assert!(walk_events(&mut events, &mut worker, &mut stats));
        assert_eq!(stats.removed, 3);
        assert_eq!(events[0].action_lists()[0].len(), 1);
        assert_eq!(worker.seen, ["Delete", "Delete", "Keep", "Delete"]);
    }

    #[test]
    fn removed_instructions_are_not_descended() {
        let parent =
            Instruction::new("Delete").with_sub_instructions(vec![Instruction::new("Inner")]);
        let mut events = vec![Event::standard(vec![parent], vec![])];
        let mut worker = drop_type("Delete");
        let mut stats = WalkStats::default();

        walk_events(&mut events, &mut worker, &mut stats);
        assert_eq!(worker.seen, ["Delete"]);
    }

    #[test]
    fn only_events_with_own_changes_are_marked() {
        let child = Event::standard(vec![], vec![Instruction::new("Delete")]);
        let mut events = vec![Event::standard(vec![], vec![]).with_sub_events(vec![child])];
        let mut worker = drop_type("Delete");
        let mut stats = WalkStats::default();

        assert!(walk_events(&mut events, &mut worker, &mut stats));
        assert!(!events[0].needs_layout_update());
        assert!(events[0].sub_events().unwrap()[0].needs_layout_update());
        assert_eq!(stats.events, 2);
    }
}
