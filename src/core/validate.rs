use std::sync::LazyLock;

use regex::Regex;

use super::error::SearchError;
use super::types::SearchRequest;

const MAX_TERM_LEN: usize = 500;
const MAX_TARGET_LEN: usize = 1000;

static TERM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\s\-_\+\.]+$").expect("term pattern is valid"));

/// Check request shape before anything touches the network.
pub fn validate_request(request: &SearchRequest) -> Result<(), SearchError> {
    validate_term(&request.search_term)?;
    validate_target_url(&request.target_url)
}

pub fn validate_term(term: &str) -> Result<(), SearchError> {
    if term.trim().is_empty() {
        return Err(SearchError::Validation("search term is required".into()));
    }
    if term.len() > MAX_TERM_LEN {
        return Err(SearchError::Validation(format!(
            "search term cannot exceed {} characters",
            MAX_TERM_LEN
        )));
    }
    if !TERM_RE.is_match(term) {
        return Err(SearchError::Validation(
            "search term contains invalid characters".into(),
        ));
    }
    Ok(())
}

pub fn validate_target_url(target_url: &str) -> Result<(), SearchError> {
    if target_url.trim().is_empty() {
        return Err(SearchError::Validation("target URL is required".into()));
    }
    if target_url.len() > MAX_TARGET_LEN {
        return Err(SearchError::Validation(format!(
            "target URL cannot exceed {} characters",
            MAX_TARGET_LEN
        )));
    }

    let mut cleaned = target_url.trim();
    for scheme in ["http://", "https://"] {
        if let Some(stripped) = cleaned.strip_prefix(scheme) {
            cleaned = stripped;
            break;
        }
    }
    let cleaned = cleaned.strip_prefix("www.").unwrap_or(cleaned);

    let plausible = cleaned.contains('.')
        && !cleaned.contains(' ')
        && cleaned.len() > 3
        && !cleaned.starts_with('.')
        && !cleaned.ends_with('.');

    if !plausible {
        return Err(SearchError::Validation("target URL format is invalid".into()));
    }
    Ok(())
}
