use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "warn,xhr_core=info,xhr=info";

/// Settings read from an optional `xhr.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XhrConfig {
    /// Base that relative and missing URLs resolve against, like a page's
    /// origin.
    pub origin: Option<String>,
    /// `tracing` filter directives.
    pub log_filter: Option<String>,
}

impl XhrConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg: XhrConfig =
            toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
        Ok(cfg)
    }

    /// Flags given on the command line win over the file.
    pub fn merge_origin(mut self, origin: Option<String>) -> Self {
        if origin.is_some() {
            self.origin = origin;
        }
        self
    }

    pub fn origin_url(&self) -> Result<Option<Url>> {
        self.origin
            .as_deref()
            .map(|o| Url::parse(o).with_context(|| format!("invalid origin {o:?}")))
            .transpose()
    }

    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_values() {
        let cfg = XhrConfig::default();
        assert!(cfg.origin.is_none());
        assert_eq!(cfg.log_filter(), DEFAULT_LOG_FILTER);
        assert!(cfg.origin_url().unwrap().is_none());
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            origin = "http://127.0.0.1:3000/app/"
            log_filter = "debug"
        "#;
        let cfg: XhrConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.log_filter(), "debug");
        let origin = cfg.origin_url().unwrap().unwrap();
        assert_eq!(origin.as_str(), "http://127.0.0.1:3000/app/");
    }

    #[test]
    fn config_toml_partial_uses_defaults() {
        let cfg: XhrConfig = toml::from_str(r#"origin = "http://h""#).unwrap();
        assert!(cfg.log_filter.is_none());
        assert_eq!(cfg.log_filter(), DEFAULT_LOG_FILTER);
    }

    #[test]
    fn flag_overrides_file_origin() {
        let cfg = XhrConfig {
            origin: Some("http://file".to_string()),
            log_filter: None,
        };
        let cfg = cfg.merge_origin(Some("http://flag".to_string()));
        assert_eq!(cfg.origin.as_deref(), Some("http://flag"));
        let cfg = cfg.merge_origin(None);
        assert_eq!(cfg.origin.as_deref(), Some("http://flag"));
    }

    #[test]
    fn invalid_origin_is_an_error() {
        let cfg = XhrConfig {
            origin: Some("not a url".to_string()),
            log_filter: None,
        };
        assert!(cfg.origin_url().is_err());
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"origin = "http://localhost:8080""#).unwrap();
        let cfg = XhrConfig::load(file.path()).unwrap();
        assert_eq!(cfg.origin.as_deref(), Some("http://localhost:8080"));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = XhrConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }
}
