//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.algoplot.toml` files.

use crate::chart::{
    ChartBuilder, DEFAULT_HEIGHT, DEFAULT_TITLE, DEFAULT_WIDTH, DEFAULT_X_LABEL, DEFAULT_Y_LABEL,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name.
pub const CONFIG_FILE: &str = ".algoplot.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Chart settings.
    #[serde(default)]
    pub chart: ChartConfig,

    /// Input handling settings.
    #[serde(default)]
    pub input: InputConfig,
}

/// Chart appearance and output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Chart title.
    #[serde(default = "default_title")]
    pub title: String,

    /// X axis label.
    #[serde(default = "default_x_label")]
    pub x_label: String,

    /// Y axis label.
    #[serde(default = "default_y_label")]
    pub y_label: String,

    /// Output image path.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Image width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Image height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,

    /// Logarithmic y axis.
    #[serde(default)]
    pub log_y: bool,

    /// Draw grid lines.
    #[serde(default = "default_true")]
    pub grid: bool,

    /// Open the chart after saving. Unset means "when a display is available".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show: Option<bool>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            x_label: default_x_label(),
            y_label: default_y_label(),
            output: default_output(),
            width: default_width(),
            height: default_height(),
            log_y: false,
            grid: true,
            show: None,
        }
    }
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_x_label() -> String {
    DEFAULT_X_LABEL.to_string()
}

fn default_y_label() -> String {
    DEFAULT_Y_LABEL.to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("compare_algos_plot.svg")
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

fn default_true() -> bool {
    true
}

/// Source reading settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    /// Skip unreadable sources instead of aborting.
    #[serde(default)]
    pub skip_unreadable: bool,
}

impl ChartConfig {
    /// A chart builder carrying these settings.
    pub fn builder(&self) -> ChartBuilder {
        ChartBuilder::new()
            .title(self.title.clone())
            .x_label(self.x_label.clone())
            .y_label(self.y_label.clone())
            .size(self.width, self.height)
            .log_y(self.log_y)
            .grid(self.grid)
    }
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    fn validate(&self) -> Result<()> {
        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(crate::error::AlgoPlotError::Config(
                "chart width and height must be at least 1 pixel".to_string(),
            )
            .into());
        }
        Ok(())
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref output) = args.output {
            self.chart.output = output.clone();
        }
        if let Some(ref title) = args.title {
            self.chart.title = title.clone();
        }
        if let Some(ref x_label) = args.x_label {
            self.chart.x_label = x_label.clone();
        }
        if let Some(ref y_label) = args.y_label {
            self.chart.y_label = y_label.clone();
        }
        if let Some(width) = args.width {
            self.chart.width = width;
        }
        if let Some(height) = args.height {
            self.chart.height = height;
        }

        // Flags only ever switch behaviour on
        if args.log_y {
            self.chart.log_y = true;
        }
        if args.skip_unreadable {
            self.input.skip_unreadable = true;
        }

        if args.show {
            self.chart.show = Some(true);
        } else if args.no_show {
            self.chart.show = Some(false);
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.chart.title, DEFAULT_TITLE);
        assert_eq!(config.chart.output, PathBuf::from("compare_algos_plot.svg"));
        assert!(config.chart.grid);
        assert!(config.chart.show.is_none());
        assert!(!config.input.skip_unreadable);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[chart]
title = "DP vs Backtracking"
output = "out/chart.svg"
log_y = true
show = false

[input]
skip_unreadable = true
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.chart.title, "DP vs Backtracking");
        assert_eq!(config.chart.output, PathBuf::from("out/chart.svg"));
        assert!(config.chart.log_y);
        assert_eq!(config.chart.show, Some(false));
        assert_eq!(config.chart.x_label, DEFAULT_X_LABEL);
        assert_eq!(config.chart.width, DEFAULT_WIDTH);
        assert!(config.input.skip_unreadable);
    }

    #[test]
    fn test_load_rejects_zero_width() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[chart]\nwidth = 0\n").unwrap();

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_merge_with_args() {
        let mut config = Config::default();
        config.chart.title = "From file".to_string();
        config.chart.show = Some(true);

        let args = Args::try_parse_from([
            "algoplot",
            "a.txt",
            "-o",
            "cli.svg",
            "--log-y",
            "--no-show",
        ])
        .unwrap();
        config.merge_with_args(&args);

        assert_eq!(config.chart.output, PathBuf::from("cli.svg"));
        assert_eq!(config.chart.title, "From file");
        assert!(config.chart.log_y);
        assert_eq!(config.chart.show, Some(false));
    }

    #[test]
    fn test_builder_from_config() {
        let mut config = ChartConfig::default();
        config.title = "T".to_string();
        config.grid = false;

        let chart = config.builder().build();
        assert_eq!(chart.title, "T");
        assert!(!chart.grid);
        assert_eq!(chart.width, DEFAULT_WIDTH);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[chart]"));
        assert!(toml_str.contains("[input]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.chart.title, DEFAULT_TITLE);
    }
}
