//! Configuration management.

use anyhow::{Context, Result};
use clap::ValueEnum;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;
use crate::scan::{ReportFormat, ResolverKind};

/// Host list read when neither flag nor config names one.
pub const DEFAULT_INPUT: &str = "ip.txt";

/// Report written when neither flag nor config names one.
pub const DEFAULT_OUTPUT: &str = "res.txt";

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// AbuseIPDB API key.
    pub api_key: Option<String>,

    /// Default host list path.
    pub input: Option<String>,

    /// Default report path.
    pub output: Option<String>,

    /// Default resolver backend.
    pub resolver: Option<ResolverKind>,

    /// Default report file format.
    pub report_format: Option<ReportFormat>,

    /// Default output format for check/resolve/report.
    pub output_format: Option<OutputFormat>,

    /// Continue past failed checks by default.
    #[serde(default)]
    pub keep_going: bool,

    /// Client-side throttle, requests per minute.
    pub rate_limit: Option<u32>,
}

impl Config {
    /// Get the default config file path.
    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "abusescan", "abusescan")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from `path`; a missing file means defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Set a key from its string form, as given to `config set`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api_key" | "key" => self.api_key = Some(value.trim().to_string()),
            "input" => self.input = Some(value.to_string()),
            "output" => self.output = Some(value.to_string()),
            "resolver" => {
                self.resolver = Some(
                    <ResolverKind as ValueEnum>::from_str(value, true)
                        .map_err(|e| anyhow::anyhow!("invalid resolver {value:?}: {e}"))?,
                );
            }
            "report_format" | "format" => {
                self.report_format = Some(
                    <ReportFormat as ValueEnum>::from_str(value, true)
                        .map_err(|e| anyhow::anyhow!("invalid report format {value:?}: {e}"))?,
                );
            }
            "output_format" => self.output_format = Some(OutputFormat::parse(value)?),
            "keep_going" => self.keep_going = value.parse()?,
            "rate_limit" => self.rate_limit = Some(value.parse()?),
            _ => {
                anyhow::bail!(
                    "Unknown config key: {}\n\n\
                     Available keys:\n  \
                     api_key        - Your AbuseIPDB API key\n  \
                     input          - Host list path (default ip.txt)\n  \
                     output         - Report path (default res.txt)\n  \
                     resolver       - system or dns\n  \
                     report_format  - text or jsonl\n  \
                     output_format  - pretty/json/csv/yaml\n  \
                     keep_going     - Continue past failed checks (true/false)\n  \
                     rate_limit     - Requests per minute",
                    key
                );
            }
        }
        Ok(())
    }
}

/// Expand `~` and environment variables in a path taken from flags or config.
pub fn expand_path(raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw).with_context(|| format!("cannot expand path {raw}"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}
