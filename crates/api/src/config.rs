//! Service configuration.
//!
//! Settings are layered: built-in defaults, then an optional config file,
//! then `EXTGATE_` environment variables (`EXTGATE_SERVER__LISTEN=...`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use extgate_engine::encode::ResponseMeta;
use extgate_engine::redirect::RedirectTargets;
use extgate_engine::{DEFAULT_MAX_BODY_SIZE, EngineSettings};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub updates: UpdateSettings,
    pub catalog: CatalogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub listen: String,
    /// Omaha bodies of this many bytes or more are rejected.
    pub max_body_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpdateSettings {
    pub protocol: String,
    pub server_tag: String,
    pub codebase: String,
    pub omaha_redirect: String,
    pub legacy_redirect: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// JSON file to load extensions from. The built-in list is used when unset.
    pub file: Option<PathBuf>,
    pub refresh_interval_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:8192".to_string(),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

impl Default for UpdateSettings {
    fn default() -> Self {
        let engine = EngineSettings::default();
        Self {
            protocol: engine.meta.protocol,
            server_tag: engine.meta.server,
            codebase: engine.codebase,
            omaha_redirect: engine.redirect.omaha,
            legacy_redirect: engine.redirect.legacy,
        }
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            file: None,
            refresh_interval_secs: 600,
        }
    }
}

impl Settings {
    /// Load settings from `path` (if given) and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder
            .add_source(
                Environment::with_prefix("EXTGATE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.catalog.refresh_interval_secs)
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            meta: ResponseMeta {
                protocol: self.updates.protocol.clone(),
                server: self.updates.server_tag.clone(),
            },
            codebase: self.updates.codebase.clone(),
            redirect: RedirectTargets {
                omaha: self.updates.omaha_redirect.clone(),
                legacy: self.updates.legacy_redirect.clone(),
            },
            max_body_size: self.server.max_body_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_engine() {
        let settings = Settings::default();
        let engine = settings.engine_settings();

        assert_eq!(settings.server.listen, "0.0.0.0:8192");
        assert_eq!(engine.max_body_size, 11 * 1024 * 1024);
        assert_eq!(engine.meta, ResponseMeta::default());
        assert_eq!(engine.redirect, RedirectTargets::default());
        assert_eq!(settings.refresh_interval(), Duration::from_secs(600));
        assert!(settings.catalog.file.is_none());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("extgate.toml");
        fs::write(
            &path,
            r#"
[server]
listen = "127.0.0.1:9000"

[updates]
server_tag = "staging"
codebase = "https://cdn.example.com/release"

[catalog]
file = "/etc/extgate/catalog.json"
refresh_interval_secs = 30
"#,
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();

        assert_eq!(settings.server.listen, "127.0.0.1:9000");
        assert_eq!(settings.server.max_body_size, DEFAULT_MAX_BODY_SIZE);
        assert_eq!(settings.updates.server_tag, "staging");
        assert_eq!(settings.updates.protocol, "3.1");
        assert_eq!(
            settings.catalog.file.as_deref(),
            Some(Path::new("/etc/extgate/catalog.json"))
        );
        assert_eq!(settings.refresh_interval(), Duration::from_secs(30));
        assert_eq!(
            settings.engine_settings().codebase,
            "https://cdn.example.com/release"
        );
    }

    #[test]
    fn test_environment_overrides_defaults() {
        // No other test reads this key, so setting it cannot race with them
        unsafe {
            std::env::set_var(
                "EXTGATE_UPDATES__OMAHA_REDIRECT",
                "https://upstream.example.com/update2",
            );
        }
        let settings = Settings::load(None);
        unsafe {
            std::env::remove_var("EXTGATE_UPDATES__OMAHA_REDIRECT");
        }

        let settings = settings.unwrap();
        assert_eq!(
            settings.updates.omaha_redirect,
            "https://upstream.example.com/update2"
        );
        assert_eq!(
            settings.updates.legacy_redirect,
            RedirectTargets::default().legacy
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(Settings::load(Some(&temp_dir.path().join("missing.toml"))).is_err());
    }
}
