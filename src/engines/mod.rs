pub mod extract;
pub mod google;

use async_trait::async_trait;

use crate::core::SearchError;

/// A search engine backend: one query in, the ranked result links out.
///
/// `GoogleClient` is the only implementation today; other engines slot in
/// behind this trait without touching the matcher or the orchestrator.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Fetch one results page for `term` and return the raw ranked links in
    /// the order the engine presented them. `max_results` is a hint passed
    /// to the engine, not a cap applied afterwards.
    async fn search(&self, term: &str, max_results: usize) -> Result<Vec<String>, SearchError>;
}
