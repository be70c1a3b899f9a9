use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use rand::Rng;
use tracing::{debug, info};
use url::Url;

use super::extract::extract_result_links;
use super::SearchEngine;
use crate::core::SearchError;
use crate::features::antibot;

/// Google results-page client.
///
/// Presents a legacy text-browser fingerprint so Google serves the plain
/// anchor-based markup instead of the scripted one. Stateless across calls;
/// the User-Agent is fixed at construction time.
pub struct GoogleClient {
    http: reqwest::Client,
    base_url: Url,
    user_agent: String,
}

impl GoogleClient {
    /// Client against the canonical Google host, User-Agent drawn from the
    /// process random source.
    pub fn new(http: reqwest::Client) -> Self {
        let mut rng = rand::rng();
        Self::with_rng(http, default_base_url(), &mut rng)
    }

    /// Client with an explicit base address (local test servers, mirrors).
    pub fn with_base_url(http: reqwest::Client, base_url: Url) -> Self {
        let mut rng = rand::rng();
        Self::with_rng(http, base_url, &mut rng)
    }

    /// Fully injected construction; tests seed `rng` to pin the User-Agent.
    pub fn with_rng<R: Rng + ?Sized>(http: reqwest::Client, base_url: Url, rng: &mut R) -> Self {
        let user_agent = antibot::lynx_user_agent(rng);
        debug!(%user_agent, "constructed search client");
        Self {
            http,
            base_url,
            user_agent,
        }
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn query_url(&self, term: &str, max_results: usize) -> Result<Url, SearchError> {
        let encoded = utf8_percent_encode(term, NON_ALPHANUMERIC).to_string();
        self.base_url
            .join(&format!("search?num={}&q={}", max_results, encoded))
            .map_err(|e| SearchError::Validation(format!("unusable search term: {}", e)))
    }
}

fn default_base_url() -> Url {
    Url::parse("https://www.google.com/").expect("canonical base address parses")
}

#[async_trait]
impl SearchEngine for GoogleClient {
    async fn search(&self, term: &str, max_results: usize) -> Result<Vec<String>, SearchError> {
        let url = self.query_url(term, max_results)?;
        info!(%term, "fetching results page");

        let response = self
            .http
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .header(reqwest::header::ACCEPT, "*/*")
            .header(reqwest::header::COOKIE, antibot::CONSENT_COOKIE)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let links = extract_result_links(&body)?;
        info!(count = links.len(), "extracted ranked result links");
        Ok(links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn client() -> GoogleClient {
        let mut rng = StdRng::seed_from_u64(3);
        GoogleClient::with_rng(reqwest::Client::new(), default_base_url(), &mut rng)
    }

    #[test]
    fn query_url_escapes_the_term() {
        let url = client().query_url("rust + web", 100).unwrap();
        assert_eq!(url.host_str(), Some("www.google.com"));
        assert_eq!(url.path(), "/search");
        let query = url.query().unwrap();
        assert!(query.starts_with("num=100&q="));
        assert!(!query.contains(' '));
        assert!(query.contains("rust%20%2B%20web"));
    }

    #[test]
    fn user_agent_is_fixed_per_instance() {
        let c = client();
        assert_eq!(c.user_agent(), c.user_agent());
        assert!(c.user_agent().starts_with("Lynx/"));
    }
}
