//! Rename an object or group in every instruction of an event tree.

use tracing::{debug, trace};

use evrefactor_core::{Event, Instruction, ListKind, MetadataProvider, ObjectsContainersList};
use evrefactor_expr::{ExpressionParser, ObjectRenamer, ParseContext};

use super::walker::{walk_events, InstructionWorker, Visit, WalkStats};

struct RenameWorker<'a> {
    ctx: ParseContext<'a>,
    old: &'a str,
    new: &'a str,
}

impl InstructionWorker for RenameWorker<'_> {
    fn visit(&mut self, kind: ListKind, instruction: &mut Instruction) -> Visit {
        let Some(metadata) = self.ctx.platform.instruction_metadata(kind, &instruction.type_name)
        else {
            return Visit::unchanged();
        };

        let mut changed = false;
        for (index, (parameter, expression)) in metadata
            .parameters
            .iter()
            .zip(instruction.parameters.iter_mut())
            .enumerate()
        {
            if parameter.is_object() {
                if expression.plain_string() == self.old {
                    trace!(instruction = %instruction.type_name, index, "object parameter renamed");
                    expression.set_plain_string(self.new);
                    changed = true;
                }
                continue;
            }

            let Some(expression_kind) = parameter.expression_kind() else {
                continue;
            };
            let mut renamer = ObjectRenamer::new(self.old, self.new);
            match ExpressionParser::new(expression.plain_string()).parse(
                expression_kind,
                &self.ctx,
                &mut renamer,
            ) {
                Ok(()) => {
                    if renamer.renamed() && renamer.output() != expression.plain_string() {
                        trace!(
                            instruction = %instruction.type_name,
                            index,
                            from = expression.plain_string(),
                            to = renamer.output(),
                            "expression rewritten"
                        );
                        expression.set_plain_string(renamer.into_output());
                        changed = true;
                    }
                }
                Err(err) => {
                    debug!(
                        instruction = %instruction.type_name,
                        index,
                        error = %err,
                        "parameter does not parse, left untouched"
                    );
                }
            }
        }
        Visit::Keep { changed }
    }
}

/// Rename the object or group `old` to `new` in `events`.
///
/// Object parameters equal to `old` are replaced. Number, string and variable
/// parameters are reparsed and rebuilt with `old` replaced as a call receiver;
/// parameters that do not mention `old`, or do not parse, are left as they
/// are. `containers` is the scope expressions resolve object types in, so it
/// must still know the object as `old`.
///
/// Returns true if any instruction changed.
pub fn rename_object_in_events(
    platform: &dyn MetadataProvider,
    containers: &ObjectsContainersList<'_>,
    events: &mut [Event],
    old: &str,
    new: &str,
) -> bool {
    debug!(old, new, "renaming object in events");
    let mut worker = RenameWorker {
        ctx: ParseContext::new(platform, containers),
        old,
        new,
    };
    let mut stats = WalkStats::default();
    let changed = walk_events(events, &mut worker, &mut stats);
    debug!(
        events = stats.events,
        instructions_changed = stats.changed,
        "rename finished"
    );
    changed
}
