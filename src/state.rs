use crate::search::SearchResult;

/// Message shown when the user submits an empty or whitespace-only name.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a name to search";

/// Fallback shown when a failed search carries no message of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Which main view the UI should draw for the current session state.
///
/// Exactly one variant applies at any time; the error banner is separate
/// and renders in addition to the main view whenever [`SearchSession::error`]
/// is set (an empty-name error can sit on top of a previous result list).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// A search is in flight.
    Loading,
    /// The last search returned at least one result.
    Results,
    /// The last search finished cleanly but returned nothing.
    NoResults,
    /// Nothing has been searched yet; show the intro prompt.
    Help,
    /// The last search failed; the banner carries the story, the main
    /// area stays empty.
    Blank,
}

/// The single shared state record driving all rendering decisions.
///
/// Mutation is funneled through a fixed set of transitions: `set_query`
/// on every keystroke, `begin_search` at submit time, and exactly one of
/// `finish_success` / `finish_failure` when the provider settles. The
/// single-in-flight guarantee lives here (`begin_search` refuses while
/// loading) rather than only in the key-handler gate.
#[derive(Debug, Default)]
pub struct SearchSession {
    query: String,
    results: Vec<SearchResult>,
    is_loading: bool,
    error: Option<String>,
    has_searched: bool,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_searched(&self) -> bool {
        self.has_searched
    }

    /// Record the current input text. Editing dismisses a visible error.
    pub fn set_query(&mut self, raw: &str) {
        self.query = raw.to_string();
        if self.error.is_some() {
            self.error = None;
        }
    }

    /// Start a new search over the current query.
    ///
    /// Returns the trimmed query to hand to the provider, or `None` when
    /// no search may start: either one is already in flight (no state is
    /// touched) or the trimmed query is empty (the inline error is set,
    /// everything else stays as-is).
    pub fn begin_search(&mut self) -> Option<String> {
        if self.is_loading {
            tracing::debug!("ignoring search request while one is in flight");
            return None;
        }

        let trimmed = self.query.trim();
        if trimmed.is_empty() {
            self.error = Some(EMPTY_QUERY_MESSAGE.to_string());
            return None;
        }

        self.results.clear();
        self.error = None;
        self.is_loading = true;
        self.has_searched = true;
        Some(trimmed.to_string())
    }

    /// Commit a successful outcome.
    pub fn finish_success(&mut self, results: Vec<SearchResult>) {
        tracing::debug!(count = results.len(), "search completed");
        self.results = results;
        self.is_loading = false;
    }

    /// Commit a failed outcome. An empty message falls back to the
    /// generic one so the banner never renders blank.
    pub fn finish_failure(&mut self, message: &str) {
        tracing::debug!(message = %message, "search failed");
        let message = if message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE
        } else {
            message
        };
        self.error = Some(message.to_string());
        self.results.clear();
        self.is_loading = false;
    }

    /// Whether a submit should currently do anything.
    pub fn can_submit(&self) -> bool {
        !self.is_loading && !self.query.trim().is_empty()
    }

    /// Pure projection of the session onto the main view.
    pub fn view(&self) -> View {
        if self.is_loading {
            View::Loading
        } else if !self.results.is_empty() {
            View::Results
        } else if self.error.is_none() && self.has_searched {
            View::NoResults
        } else if !self.has_searched {
            View::Help
        } else {
            View::Blank
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(title: &str) -> SearchResult {
        SearchResult {
            title: title.to_string(),
            url: format!("https://example.com/{title}"),
            snippet: None,
        }
    }

    #[test]
    fn starts_idle_with_help_view() {
        let session = SearchSession::new();
        assert_eq!(session.view(), View::Help);
        assert!(!session.has_searched());
        assert!(session.error().is_none());
    }

    #[test]
    fn editing_clears_error() {
        let mut session = SearchSession::new();
        session.begin_search();
        assert_eq!(session.error(), Some(EMPTY_QUERY_MESSAGE));

        session.set_query("J");
        assert!(session.error().is_none());
        assert_eq!(session.query(), "J");
    }

    #[test]
    fn begin_search_while_loading_is_refused() {
        let mut session = SearchSession::new();
        session.set_query("Ada Lovelace");
        assert!(session.begin_search().is_some());
        assert!(session.is_loading());

        session.set_query("Someone Else");
        assert!(session.begin_search().is_none());
        assert!(session.is_loading());
    }

    #[test]
    fn loading_implies_no_results_and_no_error() {
        let mut session = SearchSession::new();
        session.set_query("Ada Lovelace");
        session.begin_search();
        session.finish_success(vec![result("a"), result("b")]);

        // Second search must clear the previous outcome at loading entry.
        session.set_query("Grace Hopper");
        session.begin_search();
        assert!(session.is_loading());
        assert!(session.results().is_empty());
        assert!(session.error().is_none());
        assert_eq!(session.view(), View::Loading);
    }

    #[test]
    fn failure_sets_error_and_keeps_results_empty() {
        let mut session = SearchSession::new();
        session.set_query("Ada Lovelace");
        session.begin_search();
        session.finish_failure("Search service is unavailable");

        assert_eq!(session.error(), Some("Search service is unavailable"));
        assert!(session.results().is_empty());
        assert!(!session.is_loading());
        assert_eq!(session.view(), View::Blank);
    }

    #[test]
    fn blank_failure_message_falls_back_to_generic() {
        let mut session = SearchSession::new();
        session.set_query("Ada Lovelace");
        session.begin_search();
        session.finish_failure("   ");
        assert_eq!(session.error(), Some(GENERIC_FAILURE_MESSAGE));
    }

    #[test]
    fn has_searched_is_monotone() {
        let mut session = SearchSession::new();
        session.set_query("Ada Lovelace");
        session.begin_search();
        assert!(session.has_searched());

        session.finish_failure("down");
        session.set_query("");
        session.begin_search();
        session.set_query("Grace Hopper");
        session.begin_search();
        session.finish_success(Vec::new());
        assert!(session.has_searched());
    }

    #[test]
    fn empty_outcome_shows_no_results_view() {
        let mut session = SearchSession::new();
        session.set_query("Nobody Anywhere");
        session.begin_search();
        session.finish_success(Vec::new());
        assert_eq!(session.view(), View::NoResults);
    }

    #[test]
    fn empty_query_error_can_coexist_with_old_results() {
        let mut session = SearchSession::new();
        session.set_query("Ada Lovelace");
        session.begin_search();
        session.finish_success(vec![result("a")]);

        session.set_query("   ");
        session.begin_search();
        // The previous list stays visible under the banner.
        assert_eq!(session.view(), View::Results);
        assert_eq!(session.error(), Some(EMPTY_QUERY_MESSAGE));
        assert_eq!(session.results().len(), 1);
        assert!(!session.is_loading());
    }
}
