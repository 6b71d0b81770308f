//! Configuration file support for xtask
//!
//! Reads `xtask.toml` from the project root. Every key is optional; a missing
//! file means the stock vcpkg + CMake layout.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "xtask.toml";

pub const DEFAULT_SETPOINT: f64 = 55.0;
pub const DEFAULT_CRITICAL: f64 = 90.0;

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct XtaskConfig {
    #[serde(default)]
    pub build: BuildSettings,

    #[serde(default)]
    pub run: RunDefaults,

    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildSettings {
    /// Build directory, relative to the project root.
    #[serde(default = "default_build_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_generator")]
    pub generator: String,

    #[serde(default = "default_test_runner")]
    pub test_runner: String,

    /// Executable name produced by the CMake project.
    #[serde(default = "default_artifact")]
    pub artifact: String,
}

impl Default for BuildSettings {
    fn default() -> Self {
        BuildSettings {
            dir: default_build_dir(),
            generator: default_generator(),
            test_runner: default_test_runner(),
            artifact: default_artifact(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunDefaults {
    #[serde(default = "default_setpoint")]
    pub setpoint: f64,

    #[serde(default = "default_critical")]
    pub critical: f64,
}

impl Default for RunDefaults {
    fn default() -> Self {
        RunDefaults {
            setpoint: DEFAULT_SETPOINT,
            critical: DEFAULT_CRITICAL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
        }
    }
}

fn default_build_dir() -> PathBuf {
    PathBuf::from("build")
}
fn default_generator() -> String {
    "cmake".to_string()
}
fn default_test_runner() -> String {
    "ctest".to_string()
}
fn default_artifact() -> String {
    crate::artifact::DEFAULT_ARTIFACT.to_string()
}
fn default_setpoint() -> f64 {
    DEFAULT_SETPOINT
}
fn default_critical() -> f64 {
    DEFAULT_CRITICAL
}
fn default_log_level() -> String {
    "info".to_string()
}

impl XtaskConfig {
    /// Load `xtask.toml` from `root` (or use defaults if it doesn't exist)
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = root.join(CONFIG_FILE);

        if !config_path.exists() {
            return Ok(XtaskConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;
        log::debug!("loaded {}", config_path.display());

        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
