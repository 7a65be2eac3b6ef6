//! Plain text replacement in instruction parameters.

use std::borrow::Cow;

use tracing::{debug, trace};

use evrefactor_core::{Event, Instruction, ListKind, TextMatcher};

use super::options::{SearchScope, TextSearchOptions};
use super::walker::{walk_events, InstructionWorker, Visit, WalkStats};
use crate::error::RefactorResult;

struct ReplaceWorker<'a> {
    matcher: TextMatcher,
    replacement: &'a str,
    scope: SearchScope,
}

impl InstructionWorker for ReplaceWorker<'_> {
    fn visits(&self, kind: ListKind) -> bool {
        self.scope.includes(kind)
    }

    fn visit(&mut self, _kind: ListKind, instruction: &mut Instruction) -> Visit {
        let mut changed = false;
        for (index, expression) in instruction.parameters.iter_mut().enumerate() {
            let replaced = match self
                .matcher
                .replace_all(expression.plain_string(), self.replacement)
            {
                Cow::Borrowed(_) => continue,
                Cow::Owned(replaced) => replaced,
            };
            if replaced != expression.plain_string() {
                trace!(
                    instruction = %instruction.type_name,
                    index,
                    to = replaced.as_str(),
                    "parameter text replaced"
                );
                expression.set_plain_string(replaced);
                changed = true;
            }
        }
        Visit::Keep { changed }
    }
}

/// Replace every occurrence of `old` by `new` in the parameters of the
/// instructions of `events`, whatever the parameter types.
///
/// Matching ignores case unless `options.match_case` is set, and only the list
/// kinds in `options.scope` are touched. An empty `old` replaces nothing.
///
/// Returns true if any parameter changed.
pub fn replace_string_in_events(
    events: &mut [Event],
    old: &str,
    new: &str,
    options: &TextSearchOptions,
) -> RefactorResult<bool> {
    debug!(old, new, match_case = options.match_case, "replacing text in events");
    let mut worker = ReplaceWorker {
        matcher: TextMatcher::new(old, options.match_case)?,
        replacement: new,
        scope: options.scope,
    };
    let mut stats = WalkStats::default();
    let changed = walk_events(events, &mut worker, &mut stats);
    debug!(
        events = stats.events,
        instructions_changed = stats.changed,
        "replace finished"
    );
    Ok(changed)
}
