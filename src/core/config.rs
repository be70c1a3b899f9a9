use std::env;

/// Runtime configuration, resolved from environment variables with defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen port: `--port` flag > `RANKWATCH_PORT` > `PORT` > 5000.
    pub port: u16,
    /// SQLite connection string for the history store.
    pub database_url: String,
    /// Overall outbound request timeout, seconds.
    pub http_timeout_secs: u64,
    pub http_connect_timeout_secs: u64,
    /// Search engine base address. Overridable for local test servers.
    pub engine_base_url: String,
    /// Result-count hint sent with each query (`num=` parameter).
    pub max_results: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: port_from_args(env::args())
                .or_else(|| env_parse("RANKWATCH_PORT"))
                .or_else(|| env_parse("PORT"))
                .unwrap_or(5000),
            database_url: env::var("DATABASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| "sqlite://rankwatch.db".to_string()),
            http_timeout_secs: env_parse("HTTP_TIMEOUT_SECS").unwrap_or(30),
            http_connect_timeout_secs: env_parse("HTTP_CONNECT_TIMEOUT_SECS").unwrap_or(10),
            engine_base_url: env::var("ENGINE_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| "https://www.google.com/".to_string()),
            max_results: env_parse("MAX_RESULTS").unwrap_or(100),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Pull a `--port <n>` / `--port=<n>` override out of the argument list.
fn port_from_args<I: Iterator<Item = String>>(mut args: I) -> Option<u16> {
    while let Some(a) = args.next() {
        if a == "--port" {
            if let Some(p) = args.next().and_then(|v| v.parse().ok()) {
                return Some(p);
            }
        } else if let Some(rest) = a.strip_prefix("--port=") {
            if let Ok(p) = rest.parse() {
                return Some(p);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn port_flag_in_both_spellings() {
        assert_eq!(port_from_args(args(&["rankwatch", "--port", "8080"])), Some(8080));
        assert_eq!(port_from_args(args(&["rankwatch", "--port=9090"])), Some(9090));
    }

    #[test]
    fn missing_or_unparsable_port_flag_is_ignored() {
        assert_eq!(port_from_args(args(&["rankwatch"])), None);
        assert_eq!(port_from_args(args(&["rankwatch", "--port"])), None);
        assert_eq!(port_from_args(args(&["rankwatch", "--port", "loud"])), None);
        assert_eq!(port_from_args(args(&["rankwatch", "--port=loud"])), None);
    }
}
