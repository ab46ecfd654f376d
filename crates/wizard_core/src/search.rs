/// Message shown when a lookup fails without a usable error message.
pub const LOOKUP_FALLBACK_ERROR: &str = "Failed to fetch suggestions";

/// Monotonic sequence number identifying the newest query.
pub type Generation = u64;

/// A lookup scheduled for a specific query generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    pub generation: Generation,
    pub query: String,
}

/// What the caller should do after the query changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Schedule a remote lookup for this ticket.
    Lookup(LookupTicket),
    /// The query is blank; suggestions were cleared and nothing should run.
    Cleared,
}

/// Autocomplete state for one suggestion field.
///
/// Every query change bumps `generation`. Lookups remember the generation they
/// were issued for, and results are only applied while that generation is
/// still current, so a slow response can never overwrite a newer query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState<T> {
    query: String,
    suggestions: Vec<T>,
    loading: bool,
    error: Option<String>,
    open: bool,
    selected: Option<T>,
    generation: Generation,
}

impl<T> Default for SearchState<T> {
    fn default() -> Self {
        Self {
            query: String::new(),
            suggestions: Vec::new(),
            loading: false,
            error: None,
            open: false,
            selected: None,
            generation: 0,
        }
    }
}

impl<T: Clone> SearchState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn suggestions(&self) -> &[T] {
        &self.suggestions
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected(&self) -> Option<&T> {
        self.selected.as_ref()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Whether the suggestion panel is visible: it was opened by typing and
    /// there is something to show or a lookup is running.
    pub fn is_open(&self) -> bool {
        self.open && (self.loading || !self.suggestions.is_empty())
    }

    pub fn set_query(&mut self, text: impl Into<String>) -> QueryOutcome {
        self.query = text.into();
        self.selected = None;
        self.open = true;
        self.generation += 1;

        if self.query.trim().is_empty() {
            self.suggestions.clear();
            self.loading = false;
            return QueryOutcome::Cleared;
        }

        QueryOutcome::Lookup(LookupTicket {
            generation: self.generation,
            query: self.query.clone(),
        })
    }

    /// Marks the ticket's lookup as started. Returns false for a stale ticket,
    /// in which case no remote call should be made.
    pub fn begin_lookup(&mut self, ticket: &LookupTicket) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.loading = true;
        self.error = None;
        true
    }

    /// Applies a lookup outcome. Returns false if the result was discarded
    /// because a newer query superseded it.
    pub fn finish_lookup(&mut self, ticket: &LookupTicket, result: Result<Vec<T>, String>) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        match result {
            Ok(items) => {
                self.suggestions = items;
            }
            Err(message) => {
                let message = if message.trim().is_empty() {
                    LOOKUP_FALLBACK_ERROR.to_string()
                } else {
                    message
                };
                self.error = Some(message);
                self.suggestions.clear();
            }
        }
        self.loading = false;
        true
    }

    pub fn select(&mut self, item: T, display: String) {
        self.selected = Some(item);
        self.query = display;
        self.open = false;
        self.suggestions.clear();
        self.loading = false;
        self.generation += 1;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Reconciles the query with an externally owned value. The selection is
    /// kept only when `text` still equals the selected item's display text.
    pub fn sync_external_value<F>(&mut self, text: &str, display: F) -> bool
    where
        F: Fn(&T) -> String,
    {
        self.query = text.to_string();
        let keep = self
            .selected
            .as_ref()
            .is_some_and(|item| display(item) == text);
        if !keep {
            self.selected = None;
        }
        keep
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.suggestions.clear();
        self.selected = None;
        self.open = false;
        self.loading = false;
        self.error = None;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket_of(outcome: QueryOutcome) -> LookupTicket {
        match outcome {
            QueryOutcome::Lookup(ticket) => ticket,
            QueryOutcome::Cleared => panic!("expected a lookup"),
        }
    }

    #[test]
    fn blank_query_clears_without_lookup() {
        let mut state: SearchState<String> = SearchState::new();
        let ticket = ticket_of(state.set_query("En"));
        state.begin_lookup(&ticket);
        state.finish_lookup(&ticket, Ok(vec!["Engineering".into()]));

        assert_eq!(state.set_query("   "), QueryOutcome::Cleared);
        assert!(state.suggestions().is_empty());
        assert!(!state.is_loading());
        assert!(!state.is_open());
    }

    #[test]
    fn stale_ticket_is_rejected_at_start_and_finish() {
        let mut state: SearchState<String> = SearchState::new();
        let first = ticket_of(state.set_query("E"));
        state.begin_lookup(&first);
        let second = ticket_of(state.set_query("Eng"));

        assert!(state.begin_lookup(&second));
        assert!(state.finish_lookup(&second, Ok(vec!["Engineering".into()])));
        assert!(!state.finish_lookup(&first, Ok(vec!["Executive".into()])));
        assert!(!state.begin_lookup(&first));

        assert_eq!(state.suggestions(), ["Engineering".to_string()]);
        assert!(!state.is_loading());
    }

    #[test]
    fn failure_uses_message_or_fallback() {
        let mut state: SearchState<String> = SearchState::new();
        let ticket = ticket_of(state.set_query("x"));
        state.begin_lookup(&ticket);
        state.finish_lookup(&ticket, Err("HTTP error! status: 500".into()));
        assert_eq!(state.error(), Some("HTTP error! status: 500"));

        let ticket = ticket_of(state.set_query("xy"));
        assert!(state.begin_lookup(&ticket));
        assert_eq!(state.error(), None);
        state.finish_lookup(&ticket, Err(String::new()));
        assert_eq!(state.error(), Some(LOOKUP_FALLBACK_ERROR));
        assert!(state.suggestions().is_empty());
    }

    #[test]
    fn selection_survives_matching_sync_only() {
        let mut state: SearchState<String> = SearchState::new();
        state.set_query("Lon");
        state.select("London".to_string(), "London".to_string());
        assert_eq!(state.query(), "London");
        assert!(!state.is_open());

        assert!(state.sync_external_value("London", |s| s.clone()));
        assert_eq!(state.selected(), Some(&"London".to_string()));

        assert!(!state.sync_external_value("Lond", |s| s.clone()));
        assert_eq!(state.selected(), None);
        assert_eq!(state.query(), "Lond");
    }
}
