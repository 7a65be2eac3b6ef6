//! Options for text replacement and search.

use serde::{Deserialize, Serialize};

use evrefactor_core::ListKind;

/// Which instruction lists a text operation looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchScope {
    pub in_conditions: bool,
    pub in_actions: bool,
}

impl Default for SearchScope {
    fn default() -> Self {
        SearchScope {
            in_conditions: true,
            in_actions: true,
        }
    }
}

impl SearchScope {
    pub fn conditions_only() -> Self {
        SearchScope {
            in_conditions: true,
            in_actions: false,
        }
    }

    pub fn actions_only() -> Self {
        SearchScope {
            in_conditions: false,
            in_actions: true,
        }
    }

    /// Whether lists of `kind` are included.
    pub fn includes(&self, kind: ListKind) -> bool {
        match kind {
            ListKind::Conditions => self.in_conditions,
            ListKind::Actions => self.in_actions,
        }
    }
}

/// Options for [`replace_string_in_events`](super::replace_string_in_events)
/// and [`search_in_events`](super::search_in_events).
///
/// The default searches both list kinds, ignoring case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSearchOptions {
    pub match_case: bool,
    pub scope: SearchScope,
}

impl TextSearchOptions {
    /// Create case-sensitive options.
    pub fn case_sensitive() -> Self {
        TextSearchOptions {
            match_case: true,
            ..Default::default()
        }
    }

    pub fn with_match_case(mut self, match_case: bool) -> Self {
        self.match_case = match_case;
        self
    }

    pub fn with_scope(mut self, scope: SearchScope) -> Self {
        self.scope = scope;
        self
    }
}
