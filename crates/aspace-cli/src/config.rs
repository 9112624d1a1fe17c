//! Run configuration.
//!
//! Values come from three layers, highest precedence first:
//!
//! 1. command-line flags and their environment fallbacks
//! 2. an optional TOML file (`--config`)
//! 3. built-in defaults
//!
//! ```toml
//! [aspace]
//! base_url = "http://localhost:8089"
//! repository = 2
//! username = "batch"
//!
//! [handle]
//! prefix = "2345.2"
//! resolver_base = "http://hdl.handle.net"
//! iiif_host = "library.bc.edu"
//!
//! [output]
//! dir = "."
//! ```
//!
//! Passwords are never read from the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use aspace_client::ClientConfig;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8089";
pub const DEFAULT_REPOSITORY: u32 = 2;
pub const DEFAULT_RESOLVER_BASE: &str = "http://hdl.handle.net";
pub const DEFAULT_IIIF_HOST: &str = "library.bc.edu";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("missing {field}: pass {flag} or set {env}")]
    Missing {
        field: &'static str,
        flag: &'static str,
        env: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Parsed contents of the TOML file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub aspace: AspaceSection,
    pub handle: HandleSection,
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct AspaceSection {
    pub base_url: Option<String>,
    pub repository: Option<u32>,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct HandleSection {
    pub prefix: Option<String>,
    pub resolver_base: Option<String>,
    pub iiif_host: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    pub dir: Option<PathBuf>,
}

/// Load a config file.
pub fn load_config(path: &Path) -> Result<FileConfig> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

pub fn parse_config(text: &str) -> std::result::Result<FileConfig, toml::de::Error> {
    toml::from_str(text)
}

/// Load the file when one is given, otherwise start from defaults.
pub fn load_optional(path: Option<&Path>) -> Result<FileConfig> {
    path.map_or_else(|| Ok(FileConfig::default()), load_config)
}

/// Flag and environment values for the `dao` subcommand.
#[derive(Debug, Clone, Default)]
pub struct DaoOverrides {
    pub base_url: Option<String>,
    pub repository: Option<u32>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub handle_prefix: Option<String>,
    pub resolver_base: Option<String>,
    pub output_dir: Option<PathBuf>,
}

/// Fully resolved settings for a `dao` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaoSettings {
    pub client: ClientConfig,
    pub handle_prefix: String,
    pub resolver_base: String,
    pub output_dir: PathBuf,
}

/// Flag and environment values for the `handles` subcommand.
#[derive(Debug, Clone, Default)]
pub struct HandleOverrides {
    pub prefix: Option<String>,
    pub password: Option<String>,
    pub iiif_host: Option<String>,
    pub output_dir: Option<PathBuf>,
}

/// Fully resolved settings for a `handles` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandleSettings {
    pub prefix: String,
    pub password: String,
    pub iiif_host: String,
    pub output_dir: PathBuf,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required(
    value: Option<String>,
    field: &'static str,
    flag: &'static str,
    env: &'static str,
) -> Result<String> {
    non_empty(value).ok_or(ConfigError::Missing { field, flag, env })
}

fn output_dir(flag: Option<PathBuf>, file: &FileConfig) -> PathBuf {
    flag.or_else(|| file.output.dir.clone())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn resolve_dao_settings(overrides: DaoOverrides, file: &FileConfig) -> Result<DaoSettings> {
    let username = required(
        overrides.username.or_else(|| file.aspace.username.clone()),
        "username",
        "--username",
        "ASPACE_USERNAME",
    )?;
    let password = required(
        overrides.password,
        "password",
        "--password",
        "ASPACE_PASSWORD",
    )?;
    let handle_prefix = required(
        overrides.handle_prefix.or_else(|| file.handle.prefix.clone()),
        "handle prefix",
        "--handle-prefix",
        "HANDLE_PREFIX",
    )?;
    let client = ClientConfig {
        base_url: non_empty(overrides.base_url)
            .or_else(|| file.aspace.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        repository: overrides
            .repository
            .or(file.aspace.repository)
            .unwrap_or(DEFAULT_REPOSITORY),
        username,
        password,
    };
    Ok(DaoSettings {
        client,
        handle_prefix,
        resolver_base: non_empty(overrides.resolver_base)
            .or_else(|| file.handle.resolver_base.clone())
            .unwrap_or_else(|| DEFAULT_RESOLVER_BASE.to_string()),
        output_dir: output_dir(overrides.output_dir, file),
    })
}

pub fn resolve_handle_settings(
    overrides: HandleOverrides,
    file: &FileConfig,
) -> Result<HandleSettings> {
    Ok(HandleSettings {
        prefix: required(
            overrides.prefix.or_else(|| file.handle.prefix.clone()),
            "handle prefix",
            "--handle-prefix",
            "HANDLE_PREFIX",
        )?,
        password: required(
            overrides.password,
            "handle password",
            "--handle-password",
            "HANDLE_PASSWORD",
        )?,
        iiif_host: non_empty(overrides.iiif_host)
            .or_else(|| file.handle.iiif_host.clone())
            .unwrap_or_else(|| DEFAULT_IIIF_HOST.to_string()),
        output_dir: output_dir(overrides.output_dir, file),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dao_overrides() -> DaoOverrides {
        DaoOverrides {
            username: Some("batch".to_string()),
            password: Some("secret".to_string()),
            handle_prefix: Some("2345.2".to_string()),
            ..DaoOverrides::default()
        }
    }

    #[test]
    fn parses_all_sections() {
        let config = parse_config(
            r#"
            [aspace]
            base_url = "https://aspace.example.edu/api"
            repository = 4
            username = "loader"

            [handle]
            prefix = "2345.2"
            iiif_host = "iiif.example.edu"

            [output]
            dir = "/tmp/runs"
            "#,
        )
        .unwrap();
        assert_eq!(config.aspace.repository, Some(4));
        assert_eq!(config.handle.iiif_host.as_deref(), Some("iiif.example.edu"));
        assert_eq!(config.output.dir, Some(PathBuf::from("/tmp/runs")));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(parse_config("[aspace]\npassword = \"x\"\n").is_err());
    }

    #[test]
    fn defaults_fill_missing_values() {
        let settings = resolve_dao_settings(dao_overrides(), &FileConfig::default()).unwrap();
        assert_eq!(settings.client.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.client.repository, DEFAULT_REPOSITORY);
        assert_eq!(settings.resolver_base, DEFAULT_RESOLVER_BASE);
        assert_eq!(settings.output_dir, PathBuf::from("."));
    }

    #[test]
    fn flags_beat_file_values() {
        let file = parse_config(
            "[aspace]\nbase_url = \"http://file\"\nrepository = 7\nusername = \"file-user\"\n",
        )
        .unwrap();
        let overrides = DaoOverrides {
            base_url: Some("http://flag".to_string()),
            ..dao_overrides()
        };
        let settings = resolve_dao_settings(overrides, &file).unwrap();
        assert_eq!(settings.client.base_url, "http://flag");
        assert_eq!(settings.client.repository, 7);
        assert_eq!(settings.client.username, "batch");
    }

    #[test]
    fn missing_password_is_reported() {
        let overrides = DaoOverrides {
            password: None,
            ..dao_overrides()
        };
        let error = resolve_dao_settings(overrides, &FileConfig::default()).unwrap_err();
        assert!(error.to_string().contains("ASPACE_PASSWORD"));
    }

    #[test]
    fn handle_settings_default_iiif_host() {
        let settings = resolve_handle_settings(
            HandleOverrides {
                prefix: Some("2345.2".to_string()),
                password: Some("pw".to_string()),
                ..HandleOverrides::default()
            },
            &FileConfig::default(),
        )
        .unwrap();
        assert_eq!(settings.iiif_host, DEFAULT_IIIF_HOST);
    }

    #[test]
    fn blank_handle_password_is_missing() {
        let result = resolve_handle_settings(
            HandleOverrides {
                prefix: Some("2345.2".to_string()),
                password: Some("  ".to_string()),
                ..HandleOverrides::default()
            },
            &FileConfig::default(),
        );
        assert!(matches!(
            result,
            Err(ConfigError::Missing {
                env: "HANDLE_PASSWORD",
                ..
            })
        ));
    }
}
