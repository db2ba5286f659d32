use crate::models::BridgeConfig;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// File name of the bridge configuration inside the config directory
pub const CONFIG_FILE_NAME: &str = "dialog-bridge.yaml";

/// Prefix for environment overrides, e.g. `DIALOG_BRIDGE__BRIDGE__QUEUE_CAPACITY=32`
pub const ENV_PREFIX: &str = "DIALOG_BRIDGE";

/// Configuration manager for loading and saving `dialog-bridge.yaml`.
///
/// Loading layers, lowest precedence first:
/// - built-in defaults
/// - the YAML file, if present
/// - `DIALOG_BRIDGE__*` environment variables
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    config_path: Utf8PathBuf,
    env_prefix: String,
}

impl ConfigManager {
    /// Create a new ConfigManager with the specified configuration directory.
    ///
    /// The directory is created if it doesn't exist.
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            config_path: config_dir.join(CONFIG_FILE_NAME),
            config_dir,
            env_prefix: ENV_PREFIX.to_string(),
        })
    }

    /// Read environment overrides from `<prefix>__*` instead of [`ENV_PREFIX`]
    pub fn with_env_prefix(self, prefix: impl Into<String>) -> Self {
        Self {
            env_prefix: prefix.into(),
            ..self
        }
    }

    pub fn env_prefix(&self) -> &str {
        &self.env_prefix
    }

    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    pub fn config_path(&self) -> &Utf8Path {
        &self.config_path
    }

    /// Load the bridge configuration.
    ///
    /// # Returns
    /// The layered BridgeConfig; defaults when neither file nor overrides exist
    pub fn load_config(&self) -> Result<BridgeConfig> {
        if !self.config_path.exists() {
            tracing::warn!(
                "Config file not found at {}, using defaults",
                self.config_path
            );
        }

        let settings = config::Config::builder()
            .add_source(
                config::File::new(self.config_path.as_str(), config::FileFormat::Yaml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(&self.env_prefix)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read config: {}", self.config_path))?;

        let config: BridgeConfig = settings
            .try_deserialize()
            .with_context(|| format!("Failed to parse config: {}", self.config_path))?;

        tracing::info!("Loaded config from {}", self.config_path);
        Ok(config)
    }

    /// Save the bridge configuration file.
    pub fn save_config(&self, config: &BridgeConfig) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(config).context("Failed to serialize config to YAML")?;

        fs::write(&self.config_path, yaml_string)
            .with_context(|| format!("Failed to write config: {}", self.config_path))?;

        tracing::info!("Saved config to {}", self.config_path);
        Ok(())
    }
}
