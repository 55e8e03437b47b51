//! `abusescan report` - Read back a report file.

use anyhow::Result;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use super::Context;
use crate::cli::args::ReportArgs;
use crate::config::expand_path;
use crate::output::{self, OutputFormat};
use crate::scan::{read_report, ReportEntry};

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "Input")]
    input: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Score")]
    score: u8,
    #[tabled(rename = "Reports")]
    reports: u32,
    #[tabled(rename = "Users")]
    users: u32,
    #[tabled(rename = "Country")]
    country: String,
    #[tabled(rename = "Last reported")]
    last_reported: String,
}

impl From<&ReportEntry> for EntryRow {
    fn from(entry: &ReportEntry) -> Self {
        let record = &entry.record;
        Self {
            input: entry.input.clone(),
            ip: record.ip_address.clone(),
            score: record.abuse_confidence_score,
            reports: record.total_reports,
            users: record.num_distinct_users,
            country: record.country_code.clone().unwrap_or_default(),
            last_reported: record
                .last_reported()
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

pub fn execute(ctx: &Context, args: &ReportArgs) -> Result<()> {
    let format = ctx.output_format(args.output_format);
    let entries = read_report(expand_path(&args.file)?)?;

    if format.print_structured(&entries)? {
        return Ok(());
    }

    match format {
        OutputFormat::Csv => {
            let mut out = output::csv_stdout();
            out.write_record(["input", "ip", "score", "total_reports", "distinct_users"])?;
            for entry in &entries {
                let record = &entry.record;
                out.write_record([
                    entry.input.clone(),
                    record.ip_address.clone(),
                    record.abuse_confidence_score.to_string(),
                    record.total_reports.to_string(),
                    record.num_distinct_users.to_string(),
                ])?;
            }
            out.flush()?;
        }
        _ => {
            if entries.is_empty() {
                println!("{}", "No entries in report.".green());
                return Ok(());
            }

            let rows: Vec<EntryRow> = entries.iter().map(EntryRow::from).collect();
            println!("{} {}", "Report:".bold(), args.file.cyan());
            println!("{}", Table::new(rows).with(Style::rounded()));
            println!("{} flagged hosts", entries.len().to_string().red().bold());
        }
    }

    Ok(())
}
