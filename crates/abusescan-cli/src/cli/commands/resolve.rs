//! `abusescan resolve` - Show the address each target would be checked as.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use super::Context;
use crate::cli::args::ResolveArgs;
use crate::output::{self, OutputFormat};

#[derive(Debug, Serialize, Tabled)]
struct Resolution {
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "IPv4")]
    ip: String,
    #[tabled(rename = "Error")]
    #[serde(skip_serializing_if = "String::is_empty")]
    error: String,
}

pub async fn execute(ctx: Context, args: ResolveArgs) -> Result<()> {
    let format = ctx.output_format(args.output_format);
    let resolver = ctx.resolver(args.resolver).build()?;

    let mut rows = Vec::with_capacity(args.targets.len());
    for target in args.targets {
        let row = match resolver.resolve_ipv4(&target).await {
            Ok(ip) => Resolution {
                target,
                ip: ip.to_string(),
                error: String::new(),
            },
            Err(e) => Resolution {
                target,
                ip: String::new(),
                error: e.to_string(),
            },
        };
        rows.push(row);
    }

    if format.print_structured(&rows)? {
        return Ok(());
    }

    match format {
        OutputFormat::Csv => {
            let mut out = output::csv_stdout();
            out.write_record(["target", "ip", "error"])?;
            for row in &rows {
                out.write_record([
                    row.target.as_str(),
                    row.ip.as_str(),
                    row.error.as_str(),
                ])?;
            }
            out.flush()?;
        }
        _ => {
            println!(
                "{} ({} resolver)",
                "Resolved addresses:".bold(),
                resolver.name()
            );
            println!("{}", Table::new(&rows).with(Style::rounded()));

            let failed = rows.iter().filter(|r| r.ip.is_empty()).count();
            if failed > 0 {
                println!(
                    "{}",
                    format!("{failed} target(s) would be skipped by a scan.").yellow()
                );
            }
        }
    }

    Ok(())
}
