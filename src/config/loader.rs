//! Configuration File Loading
//!
//! Handles loading and saving pipeline configuration files from the usual
//! locations, in TOML or JSON, with a fallback to defaults.

use super::PipelineConfig;
use crate::error::{Error, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "QUILL_CONFIG";

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
}

impl ConfigFormat {
    /// Pick a format from a file extension, defaulting to TOML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }

    fn name(self) -> &'static str {
        match self {
            ConfigFormat::Toml => "TOML",
            ConfigFormat::Json => "JSON",
        }
    }
}

/// Configuration file loader
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Candidate files, in order of preference
    search_paths: Vec<PathBuf>,
    /// Path of the file that was loaded, if any
    current_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader with the default search paths
    pub fn new() -> Self {
        Self {
            search_paths: Self::default_search_paths(),
            current_path: None,
        }
    }

    /// Create a loader that only looks at `paths`
    pub fn with_search_paths(paths: Vec<PathBuf>) -> Self {
        Self {
            search_paths: paths,
            current_path: None,
        }
    }

    /// Load configuration from the default locations, falling back to defaults
    pub fn load() -> PipelineConfig {
        let mut loader = Self::new();
        match loader.find_and_load() {
            Ok(Some(config)) => config,
            Ok(None) => {
                debug!("No configuration file found, using defaults");
                PipelineConfig::default()
            }
            Err(e) => {
                warn!("Failed to load configuration: {}. Using defaults", e);
                PipelineConfig::default()
            }
        }
    }

    /// Try each search path in turn; the first readable, valid file wins
    pub fn find_and_load(&mut self) -> Result<Option<PipelineConfig>> {
        let mut last_error = None;

        for path in &self.search_paths {
            if !path.is_file() {
                continue;
            }
            match Self::load_from_path(path) {
                Ok(config) => {
                    info!("Configuration loaded from {}", path.display());
                    self.current_path = Some(path.clone());
                    return Ok(Some(config));
                }
                Err(e) => {
                    // Keep searching, report the failure if nothing else loads
                    warn!("Skipping config {}: {}", path.display(), e);
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) => Err(e),
            None => Ok(None),
        }
    }

    /// Load and validate a specific configuration file
    pub fn load_from_path(path: &Path) -> Result<PipelineConfig> {
        let content = fs::read_to_string(path).map_err(|e| Error::ConfigLoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config = Self::parse(&content, ConfigFormat::from_path(path))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration text in the given format
    pub fn parse(content: &str, format: ConfigFormat) -> Result<PipelineConfig> {
        let parsed = match format {
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        };

        parsed.map_err(|reason| Error::ConfigParseFailed {
            format: format.name().to_string(),
            reason,
        })
    }

    /// Save configuration, choosing the format from the extension
    pub fn save_to_path(config: &PipelineConfig, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let format = ConfigFormat::from_path(path);
        let content = match format {
            ConfigFormat::Toml => toml::to_string_pretty(config).map_err(|e| e.to_string()),
            ConfigFormat::Json => serde_json::to_string_pretty(config).map_err(|e| e.to_string()),
        }
        .map_err(|reason| Error::ConfigSerializationFailed {
            format: format.name().to_string(),
            reason,
        })?;

        fs::write(path, content)?;
        Ok(())
    }

    /// Default search paths: `$QUILL_CONFIG`, the user config dir, then the
    /// working directory
    fn default_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(explicit) = env::var(CONFIG_ENV_VAR) {
            if !explicit.trim().is_empty() {
                paths.push(PathBuf::from(explicit));
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("quill").join("config.toml"));
            paths.push(config_dir.join("quill").join("config.json"));
        }

        paths.push(PathBuf::from("quill.toml"));
        paths.push(PathBuf::from("quill.json"));

        paths
    }

    /// The file the last successful load came from
    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    /// List all search paths
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
