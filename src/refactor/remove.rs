//! Remove every instruction that refers to an object or group.

use tracing::debug;

use evrefactor_core::{Event, Instruction, ListKind, MetadataProvider, ObjectsContainersList};
use evrefactor_expr::{ExpressionParser, ObjectFinder, ParseContext};

use super::walker::{walk_events, InstructionWorker, Visit, WalkStats};

struct RemoveWorker<'a> {
    ctx: ParseContext<'a>,
    name: &'a str,
}

impl RemoveWorker<'_> {
    fn refers_to_object(&self, kind: ListKind, instruction: &Instruction) -> bool {
        let Some(metadata) = self.ctx.platform.instruction_metadata(kind, &instruction.type_name)
        else {
            return false;
        };

        metadata
            .parameters
            .iter()
            .zip(&instruction.parameters)
            .enumerate()
            .any(|(index, (parameter, expression))| {
                if parameter.is_object() {
                    return expression.plain_string() == self.name;
                }
                let Some(expression_kind) = parameter.expression_kind() else {
                    return false;
                };
                let mut finder = ObjectFinder::new(self.name);
                match ExpressionParser::new(expression.plain_string()).parse(
                    expression_kind,
                    &self.ctx,
                    &mut finder,
                ) {
                    Ok(()) => finder.found(),
                    Err(err) => {
                        debug!(
                            instruction = %instruction.type_name,
                            index,
                            error = %err,
                            "parameter does not parse, not searched"
                        );
                        false
                    }
                }
            })
    }
}

impl InstructionWorker for RemoveWorker<'_> {
    fn visit(&mut self, kind: ListKind, instruction: &mut Instruction) -> Visit {
        if self.refers_to_object(kind, instruction) {
            Visit::Remove
        } else {
            Visit::unchanged()
        }
    }
}

/// Remove from `events` every instruction that refers to the object or group
/// `name`, either as an object parameter or as a call receiver inside an
/// expression parameter.
///
/// Instructions that are kept have their sub-instructions scanned the same
/// way. Returns true if anything was removed.
pub fn remove_object_in_events(
    platform: &dyn MetadataProvider,
    containers: &ObjectsContainersList<'_>,
    events: &mut [Event],
    name: &str,
) -> bool {
    debug!(name, "removing object from events");
    let mut worker = RemoveWorker {
        ctx: ParseContext::new(platform, containers),
        name,
    };
    let mut stats = WalkStats::default();
    let removed = walk_events(events, &mut worker, &mut stats);
    debug!(
        events = stats.events,
        instructions_removed = stats.removed,
        "remove finished"
    );
    removed
}
