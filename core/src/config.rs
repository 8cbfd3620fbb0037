//! Dispatcher configuration.

/// Environment variable consulted by `DispatcherConfig::from_env`.
pub const BASE_URL_ENV: &str = "FETCH_BASE_URL";

/// Endpoint used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://db.ygoprodeck.com/api/v7/cardinfo.php";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Fixed prefix every request path is appended to.
    pub base_url: String,
}

impl DispatcherConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Read `FETCH_BASE_URL`, falling back to the default endpoint when it is
    /// unset or blank.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(BASE_URL_ENV)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self { base_url }
    }
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_overrides_default() {
        let config = DispatcherConfig::from_lookup(|_| Some(" http://localhost:3000 ".to_string()));
        assert_eq!(config.base_url, "http://localhost:3000");
    }

    #[test]
    fn blank_or_missing_uses_default() {
        assert_eq!(DispatcherConfig::from_lookup(|_| None), DispatcherConfig::default());
        assert_eq!(
            DispatcherConfig::from_lookup(|_| Some("  ".to_string())).base_url,
            DEFAULT_BASE_URL
        );
    }
}
