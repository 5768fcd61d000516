//! Portal configuration types.
//!
//! Selector strings and the status whitelist are configuration injected at
//! construction time so tests (and a markup change upstream) touch one place.

use serde::{Deserialize, Serialize};

/// Default portal host.
pub const DEFAULT_BASE_URL: &str = "https://va.mite.gov.it";

/// Search endpoint path on the portal.
pub const DEFAULT_SEARCH_PATH: &str = "/it-IT/Ricerca/ViaLibera";

/// The procedure stages the portal is known to publish. Rows with any other
/// status text are dropped from search results.
pub fn default_valid_statuses() -> Vec<String> {
    [
        "Valutazione preliminare",
        "Verifica di Ottemperanza",
        "Valutazione Impatto Ambientale",
        "Valutazione Impatto Ambientale (PNIEC-PNRR)",
        "Verifica di Assoggettabilità a VIA",
        "Provvedimento Unico in materia Ambientale (PNIEC-PNRR)",
        "Definizione contenuti SIA (PNIEC-PNRR)",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Portal scraping configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Portal origin, scheme and host.
    pub base_url: String,
    /// Path of the search endpoint.
    pub search_path: String,
    /// User agent configuration.
    /// - None: default browser-like user agent
    /// - "impersonate": rotate through real browser user agents
    /// - any other string: used verbatim
    pub user_agent: Option<String>,
    /// Politeness delay between portal requests, in milliseconds.
    pub request_delay_ms: u64,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Status whitelist applied to search rows.
    pub valid_statuses: Vec<String>,
    pub selectors: SelectorConfig,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            search_path: DEFAULT_SEARCH_PATH.to_string(),
            user_agent: None,
            request_delay_ms: 1000,
            timeout_secs: 30,
            valid_statuses: default_valid_statuses(),
            selectors: SelectorConfig::default(),
        }
    }
}

impl PortalConfig {
    /// A config suitable for tests: local base URL, zero delay.
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_delay_ms: 0,
            ..Self::default()
        }
    }
}

/// CSS selectors the portal markup is scraped with.
///
/// Inherently brittle: these mirror the portal's current table classes and
/// anchor titles, and silently match nothing if the markup changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Rows of the search results table (header row included).
    pub search_rows: String,
    /// Element carrying the "Pagina N di M" label.
    pub pagination_label: String,
    /// The documentation table on a procedure page.
    pub documentation_table: String,
    /// Download anchor inside a documentation row.
    pub download_anchor: String,
    /// Href substring that marks a documentation-section link.
    pub documentation_link_marker: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            search_rows: ".ElencoViaVasRicerca tr".to_string(),
            pagination_label: ".pagination .etichettaRicerca".to_string(),
            documentation_table: "table.Documentazione".to_string(),
            download_anchor: r#"a[title="Scarica il documento"]"#.to_string(),
            documentation_link_marker: "/it-IT/Oggetti/Documentazione/".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_statuses_count() {
        assert_eq!(default_valid_statuses().len(), 7);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = PortalConfig::default();
        let toml = toml::to_string(&config).unwrap();
        let back: PortalConfig = toml::from_str(&toml).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: PortalConfig = toml::from_str("base_url = \"http://localhost:9\"").unwrap();
        assert_eq!(config.base_url, "http://localhost:9");
        assert_eq!(config.search_path, DEFAULT_SEARCH_PATH);
        assert_eq!(config.valid_statuses.len(), 7);
    }
}
