//! `abusescan check` - Resolve and check a single host.

use abusescan::ReputationRecord;
use anyhow::{Context as _, Result};
use chrono::Utc;
use colored::{ColoredString, Colorize};
use serde::Serialize;
use tracing::debug;

use super::Context;
use crate::cli::args::CheckArgs;
use crate::output::{self, OutputFormat};

#[derive(Serialize)]
struct CheckRow<'a> {
    target: &'a str,
    ip: &'a str,
    score: u8,
    total_reports: u32,
    distinct_users: u32,
    country: &'a str,
    isp: &'a str,
    last_reported_at: &'a str,
}

pub async fn execute(ctx: Context, args: CheckArgs) -> Result<()> {
    let format = ctx.output_format(args.output_format);
    let resolver = ctx.resolver(args.resolver).build()?;
    let client = ctx.client(ctx.config.rate_limit)?;

    let ip = resolver
        .resolve_ipv4(&args.target)
        .await
        .with_context(|| format!("Element {} could not have been evaluated", args.target))?;
    debug!(host = %args.target, %ip, "resolved");

    let record = client.check().address(ip).await?;

    if format.print_structured(&record)? {
        return Ok(());
    }

    match format {
        OutputFormat::Csv => {
            let mut out = output::csv_stdout();
            out.serialize(CheckRow {
                target: &args.target,
                ip: &record.ip_address,
                score: record.abuse_confidence_score,
                total_reports: record.total_reports,
                distinct_users: record.num_distinct_users,
                country: record.country_code.as_deref().unwrap_or(""),
                isp: record.isp.as_deref().unwrap_or(""),
                last_reported_at: record.last_reported_at.as_deref().unwrap_or(""),
            })?;
            out.flush()?;
        }
        _ => print_record_pretty(&args.target, &record),
    }

    Ok(())
}

fn print_record_pretty(target: &str, record: &ReputationRecord) {
    // Header
    if target == record.ip_address {
        println!("{} {}", "Host:".bold(), record.ip_address.cyan().bold());
    } else {
        println!(
            "{} {} ({})",
            "Host:".bold(),
            target.cyan().bold(),
            record.ip_address
        );
    }
    println!();

    println!(
        "  {} {}",
        "Confidence:".bold(),
        score_label(record.abuse_confidence_score)
    );
    println!(
        "  {} {} from {} distinct users",
        "Reports:".bold(),
        record.total_reports,
        record.num_distinct_users
    );

    if let Some(last) = record.last_reported() {
        let days = (Utc::now() - last.with_timezone(&Utc)).num_days();
        println!(
            "  {} {} ({} days ago)",
            "Last reported:".bold(),
            last.format("%Y-%m-%d %H:%M:%S %:z"),
            days
        );
    }

    if let Some(country) = &record.country_code {
        println!("  {} {}", "Country:".bold(), country);
    }
    if let Some(isp) = &record.isp {
        println!("  {} {}", "ISP:".bold(), isp);
    }
    if let Some(usage) = &record.usage_type {
        println!("  {} {}", "Usage:".bold(), usage);
    }
    if let Some(domain) = &record.domain {
        println!("  {} {}", "Domain:".bold(), domain);
    }
    if !record.hostnames.is_empty() {
        println!("  {} {}", "Hostnames:".bold(), record.hostnames.join(", "));
    }
    if record.whitelisted() {
        println!("  {} {}", "Whitelisted:".bold(), "yes".green());
    }
    if !record.is_public {
        println!("  {}", "Not a public address.".dimmed());
    }

    println!();
    if record.has_abuse() {
        println!("{}", "Reported abuse: this host would be written to the report.".red());
    } else {
        println!("{}", "No reported abuse.".green());
    }
}

fn score_label(score: u8) -> ColoredString {
    let label = format!("{score}%");
    match score {
        0 => label.green(),
        1..=24 => label.yellow(),
        25..=74 => label.truecolor(255, 140, 0),
        _ => label.red().bold(),
    }
}
