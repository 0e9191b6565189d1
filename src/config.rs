//! Analyzer configuration
//!
//! Loaded from TOML. Every field has a default, so an empty file (or no file)
//! yields the standard weight profile and scan options.
//!
//! ```toml
//! [weights]
//! alpha = 0.25
//! beta = 0.15
//! gamma = 0.25
//! delta = 0.35
//!
//! [scan]
//! exclude_tests = true
//! respect_gitignore = true
//! extensions = ["java"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{IpiError, Result};
use crate::scoring::Weights;

/// Config file picked up from the scanned root when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "ipi.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Skip directories whose path contains "test"
    pub exclude_tests: bool,
    pub respect_gitignore: bool,
    pub extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude_tests: true,
            respect_gitignore: true,
            extensions: vec!["java".to_string()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub weights: Weights,
    pub scan: ScanConfig,
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| IpiError::Config {
            message: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(IpiError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text).map_err(|e| match e {
            IpiError::Config { message } => IpiError::Config {
                message: format!("{}: {}", path.display(), message),
            },
            other => other,
        })
    }

    /// Resolve the effective config: explicit path, else `ipi.toml` under
    /// `root`, else defaults.
    pub fn discover(explicit: Option<&Path>, root: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading config");
            return Self::load(path);
        }
        let candidate: Option<PathBuf> = root.map(|r| r.join(DEFAULT_CONFIG_FILE));
        match candidate {
            Some(path) if path.is_file() => {
                debug!(path = %path.display(), "loading project config");
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Apply per-weight overrides from the command line
    pub fn with_weight_overrides(
        mut self,
        alpha: Option<f64>,
        beta: Option<f64>,
        gamma: Option<f64>,
        delta: Option<f64>,
    ) -> Self {
        if let Some(v) = alpha {
            self.weights.alpha = v;
        }
        if let Some(v) = beta {
            self.weights.beta = v;
        }
        if let Some(v) = gamma {
            self.weights.gamma = v;
        }
        if let Some(v) = delta {
            self.weights.delta = v;
        }
        if !self.weights.is_normalized() {
            warn!(
                sum = self.weights.sum(),
                "IPI weights do not sum to 1; scores are not bounded by [0, 1]"
            );
        }
        self
    }
}
