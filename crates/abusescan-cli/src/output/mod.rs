//! Output formatting for the one-off commands.

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::{self, Stdout};

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored text and tables
    #[default]
    #[value(alias = "table")]
    Pretty,
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// YAML output
    #[value(alias = "yml")]
    Yaml,
}

impl OutputFormat {
    /// Print `value` as JSON or YAML. Returns false for the other formats,
    /// which every command renders itself.
    pub fn print_structured<T: Serialize>(self, value: &T) -> Result<bool> {
        match self {
            Self::Json => println!("{}", serde_json::to_string_pretty(value)?),
            Self::Yaml => print!("{}", serde_yaml::to_string(value)?),
            Self::Pretty | Self::Csv => return Ok(false),
        }
        Ok(true)
    }

    /// Parse a format name as given in the config file or on the command line.
    pub fn parse(name: &str) -> Result<Self> {
        <Self as ValueEnum>::from_str(name, true).map_err(|_| {
            anyhow::anyhow!(
                "Unknown output format: {name}\n\
                 Valid formats: pretty, json, csv, yaml"
            )
        })
    }
}

/// CSV writer on stdout.
pub fn csv_stdout() -> csv::Writer<Stdout> {
    csv::Writer::from_writer(io::stdout())
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_possible_value() {
            Some(value) => f.write_str(value.get_name()),
            None => Ok(()),
        }
    }
}
