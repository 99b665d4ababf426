use crate::layout::{DEFAULT_THRESHOLD_PERCENT, LayoutMode};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub scan: Scan,
    #[serde(default)]
    pub output: Output,
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw).with_context(|| "parsing TOML")?;
        Ok(cfg)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub mode: LayoutMode,
    /// Double-sided when strictly more than this share (in whole percent) of
    /// the files carry a left/right indicator.
    pub double_sided_threshold_percent: usize,
}
impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mode: LayoutMode::Auto,
            double_sided_threshold_percent: DEFAULT_THRESHOLD_PERCENT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scan {
    pub extensions: Vec<String>,
    pub recursive: bool,
    pub follow_links: bool,
}
impl Default for Scan {
    fn default() -> Self {
        Self {
            extensions: ["jpg", "jpeg", "png", "tif", "tiff", "bmp"]
                .into_iter()
                .map(String::from)
                .collect(),
            recursive: false,
            follow_links: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Lines,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Output {
    pub format: OutputFormat,
    pub write_list_file: bool,
    pub list_filename: String,
}
impl Default for Output {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            write_list_file: false,
            list_filename: "page-order.txt".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            json: false,
            write_to_file: false,
            file_path: "".into(),
        }
    }
}
