use serde::{Deserialize, Serialize};

/// Top-level configuration from `dialog-bridge.yaml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub bridge: BridgeSettings,
    pub logging: LoggingSettings,
}

/// What to do with buttons beyond the three presentable slots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonOverflowPolicy {
    /// Keep the first three buttons and log a warning
    #[default]
    Truncate,
    /// Fail the request with a platform failure
    Reject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeSettings {
    /// Capacity of the affine executor's job queue
    pub queue_capacity: usize,

    /// Thread name used by the dedicated UI thread executor
    pub ui_thread_name: String,

    pub button_overflow: ButtonOverflowPolicy,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            queue_capacity: 100,
            ui_thread_name: "dialog-ui".to_string(),
            button_overflow: ButtonOverflowPolicy::Truncate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub directory: String,
    pub prefix: String,
    pub debug: bool,
    pub console: bool,
    /// Write the file log as JSON lines
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: "logs".to_string(),
            prefix: "dialog-bridge".to_string(),
            debug: false,
            console: true,
            json: false,
        }
    }
}
