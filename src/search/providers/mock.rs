use crate::config::SearchTuning;
use crate::search::{SearchError, SearchProvider, SearchResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use std::time::Duration;

/// Simulated people-search provider
///
/// Fabricates plausible profile links for a name by filling five fixed
/// site templates, then returns a random-length prefix of 3-5 of them
/// after a randomized delay. A small fraction of searches fail with
/// `ServiceUnavailable` to exercise the error path. Delay window and
/// failure rate come from `SearchTuning`; the RNG is seedable so tests
/// run deterministically.
pub struct MockPeopleProvider {
    tuning: SearchTuning,
    rng: Mutex<StdRng>,
}

impl MockPeopleProvider {
    /// Create a provider with an entropy-seeded RNG
    pub fn new(tuning: SearchTuning) -> Self {
        Self::with_rng(tuning, StdRng::from_entropy())
    }

    /// Create a provider with a fixed seed (deterministic draws)
    pub fn with_seed(tuning: SearchTuning, seed: u64) -> Self {
        Self::with_rng(tuning, StdRng::seed_from_u64(seed))
    }

    fn with_rng(tuning: SearchTuning, rng: StdRng) -> Self {
        let tuning = tuning.normalized();
        Self {
            tuning,
            rng: Mutex::new(rng),
        }
    }

    /// The full ordered candidate set for a query, before slicing.
    ///
    /// Order is fixed: encyclopedia, professional network, two social
    /// networks, filmography site.
    pub fn candidates(query: &str) -> Vec<SearchResult> {
        let wiki = join_words(query, "_");
        let kebab = join_words(&query.to_lowercase(), "-");
        let handle = join_words(&query.to_lowercase(), "");
        let plus = join_words(&query.to_lowercase(), "+");

        vec![
            SearchResult {
                title: format!("{query} - Wikipedia"),
                url: format!("https://en.wikipedia.org/wiki/{wiki}"),
                snippet: Some(format!(
                    "{query} may refer to several notable people. \
                     Read the full article on Wikipedia."
                )),
            },
            SearchResult {
                title: format!("{query} | LinkedIn"),
                url: format!("https://www.linkedin.com/in/{kebab}"),
                snippet: Some(format!(
                    "View {query}'s profile on LinkedIn, the world's \
                     largest professional community."
                )),
            },
            SearchResult {
                title: format!("{query} | Facebook"),
                url: format!("https://www.facebook.com/{handle}"),
                snippet: Some(format!(
                    "{query} is on Facebook. Join Facebook to connect \
                     with {query} and others you may know."
                )),
            },
            SearchResult {
                title: format!("{query} (@{handle}) / X"),
                url: format!("https://twitter.com/{handle}"),
                snippet: Some(format!("The latest posts from @{handle}.")),
            },
            SearchResult {
                title: format!("{query} - IMDb"),
                url: format!("https://www.imdb.com/find/?q={plus}"),
                snippet: None,
            },
        ]
    }
}

/// Normalize whitespace runs and join the words with a separator.
fn join_words(text: &str, sep: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(sep)
}

#[async_trait::async_trait]
impl SearchProvider for MockPeopleProvider {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        // Draws happen in a fixed order (delay, failure, count) so a
        // seeded provider replays identically. The lock is released
        // before the await point.
        let (delay_ms, failed, count) = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            (
                rng.gen_range(self.tuning.min_delay_ms..=self.tuning.max_delay_ms),
                rng.gen_bool(self.tuning.failure_rate),
                rng.gen_range(3..=5usize),
            )
        };

        tracing::debug!(query = %query, delay_ms, "simulating search");
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;

        if failed {
            tracing::warn!(query = %query, "simulated service outage");
            return Err(SearchError::ServiceUnavailable(
                "Search service is temporarily unavailable. Please try again.".to_string(),
            ));
        }

        let mut results = Self::candidates(query);
        results.truncate(count);

        tracing::debug!(query = %query, result_count = results.len(), "search completed");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant_tuning(failure_rate: f64) -> SearchTuning {
        SearchTuning {
            min_delay_ms: 0,
            max_delay_ms: 0,
            failure_rate,
        }
    }

    #[test]
    fn candidates_follow_site_transforms() {
        let candidates = MockPeopleProvider::candidates("John Smith");
        assert_eq!(candidates.len(), 5);

        assert_eq!(candidates[0].url, "https://en.wikipedia.org/wiki/John_Smith");
        assert_eq!(candidates[1].url, "https://www.linkedin.com/in/john-smith");
        assert_eq!(candidates[2].url, "https://www.facebook.com/johnsmith");
        assert_eq!(candidates[3].url, "https://twitter.com/johnsmith");
        assert_eq!(candidates[4].url, "https://www.imdb.com/find/?q=john+smith");

        for candidate in &candidates {
            assert!(candidate.title.contains("John Smith"));
        }
        // The filmography entry is the one without a snippet.
        assert!(candidates[4].snippet.is_none());
        assert!(candidates[..4].iter().all(|c| c.snippet.is_some()));
    }

    #[test]
    fn candidates_collapse_whitespace_runs() {
        let candidates = MockPeopleProvider::candidates("Mary  Jane Watson");
        assert_eq!(
            candidates[0].url,
            "https://en.wikipedia.org/wiki/Mary_Jane_Watson"
        );
        assert_eq!(
            candidates[1].url,
            "https://www.linkedin.com/in/mary-jane-watson"
        );
    }

    #[tokio::test]
    async fn returns_prefix_of_three_to_five_results() {
        for seed in 0..32 {
            let provider = MockPeopleProvider::with_seed(instant_tuning(0.0), seed);
            let results = provider.search("John Smith").await.unwrap();

            assert!((3..=5).contains(&results.len()), "got {}", results.len());
            let full = MockPeopleProvider::candidates("John Smith");
            assert_eq!(results[..], full[..results.len()]);
        }
    }

    #[tokio::test]
    async fn always_failing_provider_reports_outage() {
        let provider = MockPeopleProvider::with_seed(instant_tuning(1.0), 1);
        let err = provider.search("John Smith").await.unwrap_err();
        let SearchError::ServiceUnavailable(message) = err;
        assert!(!message.trim().is_empty());
    }

    #[tokio::test]
    async fn same_seed_replays_identically() {
        let a = MockPeopleProvider::with_seed(instant_tuning(0.1), 42)
            .search("Ada Lovelace")
            .await;
        let b = MockPeopleProvider::with_seed(instant_tuning(0.1), 42)
            .search("Ada Lovelace")
            .await;

        match (a, b) {
            (Ok(a), Ok(b)) => assert_eq!(a, b),
            (Err(SearchError::ServiceUnavailable(a)), Err(SearchError::ServiceUnavailable(b))) => {
                assert_eq!(a, b)
            }
            (a, b) => panic!("seed replay diverged: {a:?} vs {b:?}"),
        }
    }

    #[test]
    fn out_of_range_tuning_is_normalized() {
        let provider = MockPeopleProvider::with_seed(
            SearchTuning {
                min_delay_ms: 500,
                max_delay_ms: 100,
                failure_rate: 7.0,
            },
            0,
        );
        assert!(provider.tuning.max_delay_ms >= provider.tuning.min_delay_ms);
        assert!((0.0..=1.0).contains(&provider.tuning.failure_rate));
    }
}
