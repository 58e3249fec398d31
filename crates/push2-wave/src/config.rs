//! Configuration management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Substring identifying the MIDI input endpoint (case-insensitive)
    #[serde(default = "default_input_port")]
    pub input_port: String,

    /// Animation frame rate in Hz
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,

    /// Canvas configuration
    #[serde(default)]
    pub canvas: CanvasConfig,
}

/// Canvas configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Canvas width
    #[serde(default = "default_width")]
    pub width: u32,

    /// Canvas height
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

// Default value functions
fn default_input_port() -> String {
    "ableton push 2".to_string()
}

fn default_frame_rate() -> u32 {
    60
}

fn default_width() -> u32 {
    push2_hw::DISPLAY_WIDTH as u32
}

fn default_height() -> u32 {
    push2_hw::DISPLAY_HEIGHT as u32
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read configuration file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse configuration")?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_port: default_input_port(),
            frame_rate: default_frame_rate(),
            canvas: CanvasConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.input_port, "ableton push 2");
        assert_eq!(config.frame_rate, 60);
        assert_eq!(config.canvas.width, 960);
        assert_eq!(config.canvas.height, 160);
    }

    #[test]
    fn test_partial_toml() {
        let config: Config = toml::from_str("input_port = \"push 2 live port\"").unwrap();
        assert_eq!(config.input_port, "push 2 live port");
        assert_eq!(config.frame_rate, 60);
    }
}
