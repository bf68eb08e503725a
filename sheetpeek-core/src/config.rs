//! Configuration for the inspector and the generate smoke test

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file looked up in the current directory
pub const DEFAULT_CONFIG_FILE: &str = "sheetpeek.toml";

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Workbooks to inspect when none are given on the command line
    #[serde(default)]
    pub files: Vec<PathBuf>,
    /// Directory that relative file paths are resolved against
    #[serde(default)]
    pub base_dir: Option<PathBuf>,
    #[serde(default)]
    pub preview: PreviewConfig,
    #[serde(default)]
    pub generate: GenerateConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Validate value ranges
    pub fn validate(&self) -> Result<()> {
        self.preview.validate()?;
        if self.generate.host.is_empty() {
            anyhow::bail!("Configuration error: generate.host must not be empty");
        }
        if !self.generate.path.starts_with('/') {
            anyhow::bail!(
                "Configuration error: generate.path '{}' must start with '/'",
                self.generate.path
            );
        }
        Ok(())
    }

    /// Resolve the files to inspect: explicit ones win over the configured list
    pub fn resolve_files(&self, explicit: &[PathBuf]) -> Vec<PathBuf> {
        let files = if explicit.is_empty() {
            &self.files
        } else {
            explicit
        };

        files
            .iter()
            .map(|file| match &self.base_dir {
                Some(dir) => dir.join(file),
                None => file.clone(),
            })
            .collect()
    }
}

/// Size of the header and sample windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Rows shown as headers, starting at row 1
    pub header_rows: u32,
    /// Rows shown as sample data, right after the headers
    pub sample_rows: u32,
    /// Columns scanned per row, starting at column 1
    pub max_columns: u32,
    /// Characters kept before the ellipsis
    pub max_text_chars: usize,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            header_rows: 3,
            sample_rows: 4,
            max_columns: 10,
            max_text_chars: 30,
        }
    }
}

impl PreviewConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_columns == 0 {
            anyhow::bail!("Configuration error: preview.max_columns must be at least 1");
        }
        if self.max_text_chars == 0 {
            anyhow::bail!("Configuration error: preview.max_text_chars must be at least 1");
        }
        if self.sample_rows == 0 {
            anyhow::bail!("Configuration error: preview.sample_rows must be at least 1");
        }
        if self.header_rows.checked_add(self.sample_rows).is_none() {
            anyhow::bail!(
                "Configuration error: preview.header_rows + preview.sample_rows exceeds {}",
                u32::MAX
            );
        }
        Ok(())
    }

    /// First row of the sample window (1-based)
    pub fn first_sample_row(&self) -> u32 {
        self.header_rows.saturating_add(1)
    }

    /// Last row of the sample window (1-based), before clamping to the sheet
    pub fn last_sample_row(&self) -> u32 {
        self.header_rows.saturating_add(self.sample_rows)
    }
}

/// Endpoint of the generative-text API used by the smoke test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    pub host: String,
    pub port: u16,
    pub path: String,
    pub model: String,
    pub prompt: String,
    /// Request timeout; `None` waits indefinitely
    pub timeout_secs: Option<u64>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 11434,
            path: "/api/generate".to_string(),
            model: "llama3".to_string(),
            prompt: "Why is the sky blue?".to_string(),
            timeout_secs: None,
        }
    }
}
