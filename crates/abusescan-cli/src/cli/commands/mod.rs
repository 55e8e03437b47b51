//! Command implementations.

pub mod check;
pub mod config;
pub mod report;
pub mod resolve;
pub mod scan;

use abusescan::{AbuseIpDbClient, RateLimit};
use anyhow::{Context as _, Result};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use crate::config::Config;
use crate::output::OutputFormat;
use crate::scan::ResolverKind;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// API key from the flag, env or config file
    pub api_key: Option<String>,

    /// API base URL override
    pub api_url: Option<String>,

    /// Loaded configuration
    pub config: Config,

    /// Where the configuration was loaded from
    pub config_path: PathBuf,
}

impl Context {
    /// Get the API key, asking for it on stdin when none was configured.
    pub fn api_key(&self) -> Result<String> {
        if let Some(key) = self.api_key.as_deref().map(str::trim) {
            if !key.is_empty() {
                return Ok(key.to_string());
            }
        }

        let key = prompt_api_key()?;
        if key.is_empty() {
            anyhow::bail!(
                "API key required.\n\n\
                 Set it with one of:\n  \
                 1. --api-key <KEY>\n  \
                 2. ABUSEIPDB_API_KEY environment variable\n  \
                 3. abusescan config set api_key <KEY>\n\n\
                 Get your key at: https://www.abuseipdb.com/account/api"
            );
        }
        Ok(key)
    }

    /// Create an AbuseIPDB client, throttled to `rate_limit` requests per minute.
    pub fn client(&self, rate_limit: Option<u32>) -> Result<AbuseIpDbClient> {
        let mut builder = AbuseIpDbClient::builder(self.api_key()?);

        if let Some(url) = &self.api_url {
            builder = builder.base_url(url);
        }
        if let Some(limit) = rate_limit {
            let limit = RateLimit::per_minute(limit)
                .context("--rate-limit must be at least 1 request per minute")?;
            builder = builder.rate_limit(limit);
        }

        Ok(builder.build()?)
    }

    /// Resolver backend: flag, then config, then the system resolver.
    pub fn resolver(&self, flag: Option<ResolverKind>) -> ResolverKind {
        flag.or(self.config.resolver).unwrap_or_default()
    }

    /// Output format: flag, then config, then pretty.
    pub fn output_format(&self, flag: Option<OutputFormat>) -> OutputFormat {
        flag.or(self.config.output_format).unwrap_or_default()
    }
}

/// Read the key interactively. The prompt echoes the key.
fn prompt_api_key() -> Result<String> {
    if io::stdin().is_terminal() {
        let key: String = dialoguer::Input::new()
            .with_prompt("Insert your API Key")
            .allow_empty(true)
            .interact_text()?;
        return Ok(key.trim().to_string());
    }

    print!("Insert your API Key: ");
    io::stdout().flush()?;

    let mut key = String::new();
    io::stdin()
        .lock()
        .read_line(&mut key)
        .context("failed to read API key from stdin")?;
    Ok(key.trim().to_string())
}
