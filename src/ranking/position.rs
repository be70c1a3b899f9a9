use tracing::debug;

use super::domain::normalize;

/// Every 1-based rank at which the target's domain appears in the ranked
/// result list. Full scan — the same domain can legitimately occupy several
/// positions (sitelinks, duplicate listings) and all of them are reported,
/// in ascending order.
pub fn find_positions(results: &[String], target_url: &str) -> Vec<u32> {
    let target = normalize(target_url);
    if target.is_empty() {
        return Vec::new();
    }

    let mut positions = Vec::new();
    for (idx, result) in results.iter().enumerate() {
        if normalize(result) == target {
            let rank = (idx + 1) as u32;
            debug!(rank, result = %result, "target domain matched");
            positions.push(rank);
        }
    }
    positions
}

/// Single-pair comparison using the same normalization as the list scan.
/// URLs that normalize to the empty domain never match, even each other.
pub fn is_match(result_url: &str, target_url: &str) -> bool {
    let result = normalize(result_url);
    let target = normalize(target_url);
    !result.is_empty() && result == target
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrapped(dest: &str) -> String {
        format!("/url?q={}&sa=U", dest)
    }

    #[test]
    fn reports_every_matching_rank_in_order() {
        let results = vec![
            wrapped("https://example.com/a"),
            wrapped("https://other.org/"),
            wrapped("https://www.example.com/b"),
            wrapped("https://unrelated.net/"),
        ];
        assert_eq!(find_positions(&results, "example.com"), vec![1, 3]);
    }

    #[test]
    fn empty_result_list_yields_empty_positions() {
        assert_eq!(find_positions(&[], "example.com"), Vec::<u32>::new());
    }

    #[test]
    fn no_match_yields_empty_positions() {
        let results = vec![wrapped("https://other.org/")];
        assert_eq!(find_positions(&results, "example.com"), Vec::<u32>::new());
    }

    #[test]
    fn undecodable_target_matches_nothing() {
        // "/url?sa=U" normalizes to the empty domain, as does an entry with
        // no destination — empty must never match empty.
        let results = vec![wrapped(""), "/url?sa=U".to_string()];
        assert_eq!(find_positions(&results, "/url?sa=U"), Vec::<u32>::new());
    }

    #[test]
    fn multi_part_suffix_targets_match_their_subdomains() {
        let results = vec![wrapped("https://news.bbc.co.uk/story")];
        assert_eq!(find_positions(&results, "bbc.co.uk"), vec![1]);
    }

    #[test]
    fn is_match_compares_case_insensitively() {
        assert!(is_match(
            "/url?q=https://www.Example.com/page",
            "EXAMPLE.com"
        ));
        assert!(!is_match("/url?q=https://example.com", "other.org"));
        assert!(!is_match("", ""));
    }
}
