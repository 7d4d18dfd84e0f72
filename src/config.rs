// Configuration for pdf-wordviz: toml file + environment overrides
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{Result, VizError};

pub const CONFIG_FILE_NAME: &str = "wordviz.toml";
pub const ENV_ADDR: &str = "WORDVIZ_ADDR";
pub const ENV_FONT: &str = "WORDVIZ_FONT";

// Fonts tried when no font_path is configured
pub const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct VizConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub cloud: CloudConfig,
    #[serde(default)]
    pub chart: ChartConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
    #[serde(default = "default_max_upload")]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { addr: default_addr(), max_upload_bytes: default_max_upload() }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { preview_chars: default_preview_chars() }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CloudConfig {
    #[serde(default = "default_cloud_width")]
    pub width: u32,
    #[serde(default = "default_cloud_height")]
    pub height: u32,
    #[serde(default = "default_max_words")]
    pub max_words: usize,
    #[serde(default = "default_background")]
    pub background: String,
    /// 0.0 = size by rank only, 1.0 = size strictly proportional to count
    #[serde(default = "default_relative_scaling")]
    pub relative_scaling: f32,
    #[serde(default = "default_min_font")]
    pub min_font_size: f32,
    #[serde(default = "default_font_step")]
    pub font_step: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            width: default_cloud_width(),
            height: default_cloud_height(),
            max_words: default_max_words(),
            background: default_background(),
            relative_scaling: default_relative_scaling(),
            min_font_size: default_min_font(),
            font_step: default_font_step(),
            font_path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChartConfig {
    #[serde(default = "default_chart_width")]
    pub width: u32,
    #[serde(default = "default_chart_height")]
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self { width: default_chart_width(), height: default_chart_height() }
    }
}

fn default_addr() -> String { "127.0.0.1:8501".to_string() }
fn default_max_upload() -> usize { 50 * 1024 * 1024 }
fn default_preview_chars() -> usize { 1500 }
fn default_cloud_width() -> u32 { 800 }
fn default_cloud_height() -> u32 { 400 }
fn default_max_words() -> usize { 200 }
fn default_background() -> String { "white".to_string() }
fn default_relative_scaling() -> f32 { 0.5 }
fn default_min_font() -> f32 { 4.0 }
fn default_font_step() -> f32 { 1.0 }
fn default_chart_width() -> u32 { 900 }
fn default_chart_height() -> u32 { 450 }

impl VizConfig {
    /// Load from an explicit file, else the first config file found, else defaults.
    /// Environment overrides are applied last.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::candidate_paths().into_iter().find(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => {
                    log::debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)
            .map_err(|e| VizError::Config(format!("{}: {}", path.display(), e)))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| VizError::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| VizError::Config(e.to_string()))
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("pdf-wordviz").join("config.toml"));
        }
        paths
    }

    fn apply_env(&mut self) {
        if let Ok(addr) = env::var(ENV_ADDR) {
            self.server.addr = addr;
        }
        if let Ok(font) = env::var(ENV_FONT) {
            self.cloud.font_path = Some(PathBuf::from(font));
        }
    }

    pub fn validate(&self) -> Result<()> {
        let cloud = &self.cloud;
        if cloud.width == 0 || cloud.height == 0 {
            return Err(VizError::Config("cloud width and height must be positive".into()));
        }
        if !(0.0..=1.0).contains(&cloud.relative_scaling) {
            return Err(VizError::Config("cloud.relative_scaling must be within 0..=1".into()));
        }
        if cloud.min_font_size <= 0.0 || cloud.font_step <= 0.0 {
            return Err(VizError::Config("cloud font sizes must be positive".into()));
        }
        if self.chart.width < 200 || self.chart.height < 150 {
            return Err(VizError::Config("chart must be at least 200x150".into()));
        }
        Ok(())
    }
}
