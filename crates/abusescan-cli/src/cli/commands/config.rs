//! `abusescan config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::{Config, DEFAULT_INPUT, DEFAULT_OUTPUT};

pub fn execute(ctx: Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => {
            show_config(&ctx.config);
            Ok(())
        }
        ConfigCommands::Set { key, value } => set_config(ctx, &key, &value),
        ConfigCommands::Path => {
            println!("{}", ctx.config_path.display());
            Ok(())
        }
    }
}

fn show_config(config: &Config) {
    println!("{}", "Current Configuration:".bold());
    println!();

    let unset = || "(not set)".dimmed().to_string();

    println!(
        "  {} {}",
        "api_key:".bold(),
        config.api_key.as_deref().map_or_else(unset, mask_key)
    );
    println!(
        "  {} {}",
        "input:".bold(),
        config.input.as_deref().unwrap_or(DEFAULT_INPUT)
    );
    println!(
        "  {} {}",
        "output:".bold(),
        config.output.as_deref().unwrap_or(DEFAULT_OUTPUT)
    );
    println!(
        "  {} {}",
        "resolver:".bold(),
        config.resolver.unwrap_or_default()
    );
    println!(
        "  {} {}",
        "report_format:".bold(),
        config.report_format.unwrap_or_default()
    );
    println!(
        "  {} {}",
        "output_format:".bold(),
        config.output_format.unwrap_or_default()
    );
    println!("  {} {}", "keep_going:".bold(), config.keep_going);
    println!(
        "  {} {}",
        "rate_limit:".bold(),
        config
            .rate_limit
            .map_or_else(unset, |n| format!("{n}/min"))
    );
}

fn set_config(ctx: Context, key: &str, value: &str) -> Result<()> {
    let mut config = ctx.config;
    config.set(key, value)?;
    config.save_to(&ctx.config_path)?;

    let shown = if matches!(key, "api_key" | "key") {
        mask_key(value.trim())
    } else {
        value.to_string()
    };
    println!("{} {} set to {}.", "Success:".green().bold(), key, shown.cyan());

    Ok(())
}

/// Show only the ends of a key.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "****".to_string()
    }
}
