use url::Url;

/// Two-label country-code suffixes that need a third label to form a
/// registrable domain (`news.bbc.co.uk` -> `bbc.co.uk`, not `co.uk`).
pub const MULTI_PART_SUFFIXES: &[&str] = &[
    "co.uk", "gov.uk", "ac.uk", "org.uk", "com.au", "net.au", "org.au",
];

/// Reduce a raw URL to its canonical registrable domain, lowercased.
///
/// Accepts full URLs, bare hosts, and Google redirect-wrapper hrefs
/// (`/url?q=https://…`). Anything that cannot be decoded degrades to the
/// empty string rather than erroring; an empty canonical domain never
/// matches anything downstream.
pub fn normalize(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    let effective = if is_redirect_wrapper(raw) {
        match unwrap_redirect(raw) {
            Some(dest) => dest,
            None => return String::new(),
        }
    } else {
        raw.to_string()
    };

    registrable_domain(&host_of(&effective))
}

fn is_redirect_wrapper(raw: &str) -> bool {
    raw.starts_with("/url?") || {
        // Absolute form of the same wrapper, e.g. https://www.google.com/url?q=…
        matches!(Url::parse(raw), Ok(u) if u.path() == "/url" && u.query().is_some())
    }
}

/// Pull the `q` destination out of a redirect-wrapper href.
fn unwrap_redirect(href: &str) -> Option<String> {
    let url = if href.starts_with("/url?") {
        Url::parse(&format!("https://www.google.com{}", href)).ok()?
    } else {
        Url::parse(href).ok()?
    };

    for (k, v) in url.query_pairs() {
        if k == "q" && !v.is_empty() {
            return Some(v.to_string());
        }
    }
    None
}

/// Everything before the first `/`, `?` or `#`, with the scheme and a
/// leading `www.` label stripped, lowercased.
fn host_of(url: &str) -> String {
    let mut rest = url;
    for scheme in ["http://", "https://"] {
        if let Some(stripped) = rest.strip_prefix(scheme) {
            rest = stripped;
            break;
        }
    }
    let rest = rest.strip_prefix("www.").unwrap_or(rest);
    let host = rest.split(['/', '?', '#']).next().unwrap_or("");
    host.to_ascii_lowercase()
}

fn registrable_domain(host: &str) -> String {
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 {
        return host.to_string();
    }

    let last_two = format!(
        "{}.{}",
        labels[labels.len() - 2],
        labels[labels.len() - 1]
    );

    if labels.len() >= 3 && MULTI_PART_SUFFIXES.contains(&last_two.as_str()) {
        format!("{}.{}", labels[labels.len() - 3], last_two)
    } else {
        last_two
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_scheme_www_and_path() {
        assert_eq!(normalize("https://www.Example.com/page"), "example.com");
        assert_eq!(normalize("http://example.com"), "example.com");
        assert_eq!(normalize("example.com"), "example.com");
        assert_eq!(normalize("https://example.com?utm=1"), "example.com");
        assert_eq!(normalize("example.com#frag"), "example.com");
    }

    #[test]
    fn subdomains_collapse_to_registrable_domain() {
        assert_eq!(normalize("https://blog.example.com/post/1"), "example.com");
    }

    #[test]
    fn multi_part_suffixes_keep_three_labels() {
        assert_eq!(normalize("https://news.bbc.co.uk/story"), "bbc.co.uk");
        assert_eq!(normalize("https://shop.example.com.au"), "example.com.au");
        // Not misapplied to plain two-label hosts.
        assert_eq!(normalize("https://bbc.com"), "bbc.com");
        // Bare suffix stays as-is (only two labels).
        assert_eq!(normalize("co.uk"), "co.uk");
    }

    #[test]
    fn unwraps_google_redirect_hrefs() {
        assert_eq!(
            normalize("/url?q=https://example.com/x&sa=U&ved=abc"),
            "example.com"
        );
        assert_eq!(
            normalize("https://www.google.com/url?q=https%3A%2F%2Fexample.co.uk%2Fpage"),
            "example.co.uk"
        );
    }

    #[test]
    fn wrapper_without_destination_degrades_to_empty() {
        assert_eq!(normalize("/url?sa=U&ved=abc"), "");
        assert_eq!(normalize("/url?q="), "");
    }

    #[test]
    fn blank_and_degenerate_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("localhost"), "localhost");
    }

    #[test]
    fn idempotent_on_canonical_output() {
        for input in [
            "https://www.example.com/page",
            "https://news.bbc.co.uk/story",
            "/url?q=https://example.com/x",
            "sub.domain.example.org",
        ] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {}", input);
        }
    }
}
