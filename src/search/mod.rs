pub mod providers;

/// Search provider abstraction - the TUI only ever talks to this trait,
/// so tests can plug in deterministic implementations.
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Look up a person by name.
    ///
    /// `query` is expected to be trimmed and non-empty; the orchestrator
    /// validates before calling. Returns the results in ranked order.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError>;
}

/// One fabricated link record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Page title
    pub title: String,
    /// Page URL
    pub url: String,
    /// Snippet/description of the page content, when the site has one
    pub snippet: Option<String>,
}

/// Search-related errors
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The only failure a search may surface: the (simulated) service
    /// is down. The message is shown to the user verbatim.
    #[error("{0}")]
    ServiceUnavailable(String),
}
