use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use cwsink::OutputConfig;
use serde::Deserialize;

use crate::utils::file::expand_path;

use super::cli::CliConfig;
use super::constants::{
    APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_METRIC_BATCH_SIZE, DEFAULT_TIMEOUT_SECS,
};

/// Sample configuration printed by `cwsink sample-config`
pub const SAMPLE_CONFIG: &str = r#"{
  "output": {
    "namespace": "InfluxData/Telegraf",
    "write_statistics": false,
    "high_resolution_metrics": false
  },
  "client": {
    "endpoint_url": "http://localhost:4566",
    "timeout_secs": 30,
    "dry_run": false
  },
  "input": {
    "path": null,
    "metric_batch_size": 1000
  }
}
"#;

// =============================================================================
// File Config (all fields optional, merged across files)
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct OutputFileConfig {
    pub namespace: Option<String>,
    pub high_resolution_metrics: Option<bool>,
    pub write_statistics: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ClientFileConfig {
    pub endpoint_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub dry_run: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InputFileConfig {
    pub path: Option<String>,
    pub metric_batch_size: Option<usize>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub output: Option<OutputFileConfig>,
    pub client: Option<ClientFileConfig>,
    pub input: Option<InputFileConfig>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if let Some(output) = other.output {
            let current = self.output.get_or_insert_with(OutputFileConfig::default);
            if output.namespace.is_some() {
                tracing::trace!(namespace = ?output.namespace, "Merging output.namespace");
                current.namespace = output.namespace;
            }
            if output.high_resolution_metrics.is_some() {
                current.high_resolution_metrics = output.high_resolution_metrics;
            }
            if output.write_statistics.is_some() {
                current.write_statistics = output.write_statistics;
            }
        }

        if let Some(client) = other.client {
            let current = self.client.get_or_insert_with(ClientFileConfig::default);
            if client.endpoint_url.is_some() {
                tracing::trace!(endpoint_url = ?client.endpoint_url, "Merging client.endpoint_url");
                current.endpoint_url = client.endpoint_url;
            }
            if client.timeout_secs.is_some() {
                current.timeout_secs = client.timeout_secs;
            }
            if client.dry_run.is_some() {
                current.dry_run = client.dry_run;
            }
        }

        if let Some(input) = other.input {
            let current = self.input.get_or_insert_with(InputFileConfig::default);
            if input.path.is_some() {
                current.path = input.path;
            }
            if input.metric_batch_size.is_some() {
                current.metric_batch_size = input.metric_batch_size;
            }
        }
    }
}

// =============================================================================
// Resolved Config
// =============================================================================

/// Transport client settings
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Emulator or signing proxy; optional only in dry-run mode
    pub endpoint_url: Option<String>,
    pub timeout: Duration,
    pub dry_run: bool,
}

/// Metric input settings
#[derive(Debug, Clone)]
pub struct InputConfig {
    /// `None` reads from stdin
    pub path: Option<PathBuf>,
    pub metric_batch_size: usize,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub output: OutputConfig,
    pub client: ClientConfig,
    pub input: InputConfig,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.cwsink/cwsink.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        if let Some(profile_path) = get_profile_config_path()
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_path(&path.to_string_lossy());
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        let config = Self::resolve(cli, file_config);
        config.validate()?;
        Ok(config)
    }

    /// Layer defaults -> file config -> CLI/env overrides
    fn resolve(cli: &CliConfig, file_config: FileConfig) -> Self {
        let file_output = file_config.output.unwrap_or_default();
        let file_client = file_config.client.unwrap_or_default();
        let file_input = file_config.input.unwrap_or_default();

        let output = OutputConfig {
            namespace: cli
                .namespace
                .clone()
                .or(file_output.namespace)
                .unwrap_or_default(),
            high_resolution_metrics: cli
                .high_resolution_metrics
                .or(file_output.high_resolution_metrics)
                .unwrap_or(false),
            write_statistics: cli
                .write_statistics
                .or(file_output.write_statistics)
                .unwrap_or(false),
        };

        let client = ClientConfig {
            endpoint_url: cli.endpoint_url.clone().or(file_client.endpoint_url),
            timeout: Duration::from_secs(
                cli.timeout_secs
                    .or(file_client.timeout_secs)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            dry_run: cli.dry_run || file_client.dry_run.unwrap_or(false),
        };

        let input = InputConfig {
            path: cli
                .input
                .clone()
                .or_else(|| file_input.path.map(|p| expand_path(&p))),
            metric_batch_size: cli
                .metric_batch_size
                .or(file_input.metric_batch_size)
                .unwrap_or(DEFAULT_METRIC_BATCH_SIZE),
        };

        Self {
            output,
            client,
            input,
        }
    }

    fn validate(&self) -> Result<()> {
        self.output
            .validate()
            .context("Configuration error: output.namespace is required")?;

        if self.input.metric_batch_size == 0 {
            anyhow::bail!("Configuration error: input.metric_batch_size must be greater than 0");
        }

        if self.client.timeout.is_zero() {
            anyhow::bail!("Configuration error: client.timeout_secs must be greater than 0");
        }

        if !self.client.dry_run {
            let Some(endpoint) = &self.client.endpoint_url else {
                anyhow::bail!(
                    "Configuration error: client.endpoint_url is required unless dry_run is set"
                );
            };
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                anyhow::bail!(
                    "Configuration error: client.endpoint_url must be an http(s) URL, got '{}'",
                    endpoint
                );
            }
        }

        Ok(())
    }
}

/// Get the profile config path (~/.cwsink/cwsink.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_file_config_parse_full() {
        let json = r#"{
            "output": { "namespace": "App", "write_statistics": true },
            "client": { "endpoint_url": "http://localhost:4566", "timeout_secs": 5 },
            "input": { "metric_batch_size": 10 }
        }"#;
        let config: FileConfig = serde_json::from_str(json).unwrap();

        let output = config.output.as_ref().unwrap();
        assert_eq!(output.namespace, Some("App".to_string()));
        assert_eq!(output.write_statistics, Some(true));
        assert!(output.high_resolution_metrics.is_none());
        let client = config.client.as_ref().unwrap();
        assert_eq!(client.endpoint_url.as_deref(), Some("http://localhost:4566"));
        assert_eq!(client.timeout_secs, Some(5));
        assert_eq!(config.input.as_ref().unwrap().metric_batch_size, Some(10));
    }

    #[test]
    fn test_file_config_parse_empty() {
        let config: FileConfig = serde_json::from_str("{}").unwrap();
        assert!(config.output.is_none());
        assert!(config.client.is_none());
        assert!(config.input.is_none());
    }

    #[test]
    fn test_file_config_parse_extra_fields() {
        let json = r#"{ "output": { "namespace": "App" }, "namespcae": "typo" }"#;
        let config: FileConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.extra.get("namespcae").unwrap(), "typo");
    }

    #[test]
    fn test_sample_config_parses_cleanly() {
        let config: FileConfig = serde_json::from_str(SAMPLE_CONFIG).unwrap();
        assert!(config.extra.as_object().is_none_or(|m| m.is_empty()));
        assert_eq!(
            config.output.unwrap().namespace,
            Some("InfluxData/Telegraf".to_string())
        );
    }

    #[test]
    fn test_file_config_merge() {
        let mut base: FileConfig = serde_json::from_str(
            r#"{ "output": { "namespace": "Base", "write_statistics": true },
                 "client": { "timeout_secs": 10 } }"#,
        )
        .unwrap();
        let overlay: FileConfig = serde_json::from_str(
            r#"{ "output": { "namespace": "Overlay" }, "input": { "metric_batch_size": 5 } }"#,
        )
        .unwrap();

        base.merge(overlay);

        let output = base.output.as_ref().unwrap();
        assert_eq!(output.namespace, Some("Overlay".to_string()));
        assert_eq!(output.write_statistics, Some(true));
        assert_eq!(base.client.as_ref().unwrap().timeout_secs, Some(10));
        assert_eq!(base.input.as_ref().unwrap().metric_batch_size, Some(5));
    }

    #[test]
    fn test_resolve_defaults() {
        let cli = CliConfig {
            namespace: Some("App".to_string()),
            ..Default::default()
        };
        let config = AppConfig::resolve(&cli, FileConfig::default());

        assert_eq!(config.output, OutputConfig::new("App"));
        assert!(config.client.endpoint_url.is_none());
        assert_eq!(config.client.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(!config.client.dry_run);
        assert!(config.input.path.is_none());
        assert_eq!(config.input.metric_batch_size, DEFAULT_METRIC_BATCH_SIZE);
    }

    #[test]
    fn test_validate_requires_endpoint_unless_dry_run() {
        let cli = CliConfig {
            namespace: Some("App".to_string()),
            ..Default::default()
        };
        let config = AppConfig::resolve(&cli, FileConfig::default());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("client.endpoint_url is required"));

        let cli = CliConfig {
            namespace: Some("App".to_string()),
            dry_run: true,
            ..Default::default()
        };
        let config = AppConfig::resolve(&cli, FileConfig::default());
        assert!(config.validate().is_ok());

        let cli = CliConfig {
            namespace: Some("App".to_string()),
            endpoint_url: Some("http://localhost:4566".to_string()),
            ..Default::default()
        };
        let config = AppConfig::resolve(&cli, FileConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_resolve_cli_overrides_file() {
        let file_config: FileConfig = serde_json::from_str(
            r#"{ "output": { "namespace": "File", "high_resolution_metrics": true },
                 "client": { "endpoint_url": "http://file:4566" } }"#,
        )
        .unwrap();
        let cli = CliConfig {
            namespace: Some("Cli".to_string()),
            high_resolution_metrics: Some(false),
            endpoint_url: Some("http://cli:4566".to_string()),
            ..Default::default()
        };

        let config = AppConfig::resolve(&cli, file_config);

        assert_eq!(config.output.namespace, "Cli");
        assert!(!config.output.high_resolution_metrics);
        assert_eq!(config.client.endpoint_url.as_deref(), Some("http://cli:4566"));
    }

    #[test]
    fn test_validate_requires_namespace() {
        let config = AppConfig::resolve(&CliConfig::default(), FileConfig::default());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_batch_size() {
        let cli = CliConfig {
            namespace: Some("App".to_string()),
            metric_batch_size: Some(0),
            ..Default::default()
        };
        let config = AppConfig::resolve(&cli, FileConfig::default());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_http_endpoint() {
        let cli = CliConfig {
            namespace: Some("App".to_string()),
            endpoint_url: Some("localhost:4566".to_string()),
            ..Default::default()
        };
        let config = AppConfig::resolve(&cli, FileConfig::default());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_cli_config_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "output": {{ "namespace": "FromFile", "write_statistics": true }},
                 "client": {{ "endpoint_url": "http://localhost:4566" }} }}"#
        )
        .unwrap();

        let cli = CliConfig {
            config: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let config = AppConfig::load(&cli).unwrap();

        assert_eq!(config.output.namespace, "FromFile");
        assert!(config.output.write_statistics);
    }

    #[test]
    fn test_load_missing_config_path() {
        let cli = CliConfig {
            config: Some(PathBuf::from("/nonexistent/cwsink.json")),
            ..Default::default()
        };
        assert!(AppConfig::load(&cli).is_err());
    }
}
