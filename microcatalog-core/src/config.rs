use crate::error::{CatalogError, Result};
use figment::{Figment, providers::{Env, Format, Yaml}};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Top-level console configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub teams: TeamsConfig,
}

/// Catalog backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Root the `api/...` resource paths are joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token sent with every request (optional).
    pub token: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

/// Team selector settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamsConfig {
    /// Page size for the team lookup. Unset = whole list in one request.
    pub page_size: Option<u32>,
}

// ── Defaults ──────────────────────────────────────────────────

fn default_base_url() -> String { "http://localhost:8080/".into() }
fn default_timeout() -> u64 { 10_000 }

// ── Impls ─────────────────────────────────────────────────────

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            teams: TeamsConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_ms: default_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl ConsoleConfig {
    /// Load configuration from YAML file + env overrides.
    ///
    /// Env keys nest on `__`, e.g. `MICROCATALOG_API__BASE_URL`.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading console config");
        Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("MICROCATALOG_").split("__"))
            .extract()
            .map_err(|e| CatalogError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    // ── Default values ────────────────────────────────────────────

    #[test]
    fn default_api_config_has_expected_values() {
        let cfg = ApiConfig::default();
        assert_eq!(cfg.base_url, "http://localhost:8080/");
        assert!(cfg.token.is_none());
        assert_eq!(cfg.timeout_ms, 10_000);
        assert_eq!(cfg.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn default_teams_config_is_unpaged() {
        assert!(TeamsConfig::default().page_size.is_none());
    }

    // ── ConsoleConfig::load() ─────────────────────────────────────
    //
    // Every test that loads runs inside a figment Jail so env overrides set by
    // one test never leak into another.

    #[test]
    fn load_from_valid_yaml_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "console.yaml",
                "api:\n  base_url: \"https://catalog.internal/\"\n  token: \"s3cret\"\nteams:\n  page_size: 50\n",
            )?;
            let cfg = ConsoleConfig::load(Path::new("console.yaml")).expect("config loads");
            assert_eq!(cfg.api.base_url, "https://catalog.internal/");
            assert_eq!(cfg.api.token.as_deref(), Some("s3cret"));
            assert_eq!(cfg.teams.page_size, Some(50));
            // Defaults still apply for unspecified fields
            assert_eq!(cfg.api.timeout_ms, 10_000);
            Ok(())
        });
    }

    #[test]
    fn load_missing_file_yields_defaults() {
        Jail::expect_with(|_| {
            let cfg = ConsoleConfig::load(Path::new("absent.yaml")).expect("config loads");
            assert_eq!(cfg.api.base_url, "http://localhost:8080/");
            assert!(cfg.teams.page_size.is_none());
            Ok(())
        });
    }

    #[test]
    fn load_with_wrong_type_is_config_error() {
        Jail::expect_with(|jail| {
            jail.create_file("console.yaml", "api:\n  timeout_ms: soon\n")?;
            let err = ConsoleConfig::load(Path::new("console.yaml")).unwrap_err();
            assert!(matches!(err, CatalogError::Config(_)));
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("console.yaml", "api:\n  base_url: \"http://file/\"\n  timeout_ms: 500\n")?;
            jail.set_env("MICROCATALOG_API__BASE_URL", "http://env/");
            jail.set_env("MICROCATALOG_API__TOKEN", "from-env");

            let cfg = ConsoleConfig::load(Path::new("console.yaml")).expect("config loads");
            assert_eq!(cfg.api.base_url, "http://env/");
            assert_eq!(cfg.api.token.as_deref(), Some("from-env"));
            assert_eq!(cfg.api.timeout_ms, 500);
            Ok(())
        });
    }
}
