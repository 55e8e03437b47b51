//! `abusescan scan` - Check every host in a list.

use abusescan::ReputationLookup;
use anyhow::{Context as _, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::info;

use super::Context;
use crate::cli::args::ScanArgs;
use crate::config::{expand_path, DEFAULT_INPUT, DEFAULT_OUTPUT};
use crate::scan::{HostList, ReportWriter, ScanOptions, Scanner};

pub async fn execute(ctx: Context, args: ScanArgs) -> Result<()> {
    let config = &ctx.config;

    let input = args
        .input
        .or_else(|| config.input.clone())
        .unwrap_or_else(|| DEFAULT_INPUT.to_string());
    let output = args
        .output
        .or_else(|| config.output.clone())
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
    let format = args.format.or(config.report_format).unwrap_or_default();
    let options = ScanOptions {
        keep_going: args.keep_going || config.keep_going,
    };

    let client = ctx.client(args.rate_limit.or(config.rate_limit))?;
    let resolver = ctx.resolver(args.resolver).build()?;

    println!("Reading a list of IPs or domains in file {}.", input.cyan());
    println!("Each element must be in a separate line.");

    let input_path = expand_path(&input)?;
    let output_path = expand_path(&output)?;

    let hosts = HostList::open(&input_path)
        .with_context(|| format!("failed to open host list {}", input_path.display()))?;
    let mut report = ReportWriter::create(&output_path, format)
        .with_context(|| format!("failed to create report {}", output_path.display()))?;

    info!(
        input = %input_path.display(),
        output = %output_path.display(),
        resolver = resolver.name(),
        keep_going = options.keep_going,
        "scan started"
    );

    let lookup: &dyn ReputationLookup = &client;
    let progress = spinner()?;
    let result = Scanner::new(&*resolver, lookup, options)
        .with_progress(progress.clone())
        .run(hosts, &mut report)
        .await;
    progress.finish_and_clear();

    let summary = result?;
    info!(?summary, "scan finished");
    summary.print(&output);

    Ok(())
}

fn spinner() -> Result<ProgressBar> {
    if !console::Term::stderr().is_term() {
        return Ok(ProgressBar::hidden());
    }

    let bar = ProgressBar::new_spinner();
    bar.set_style(ProgressStyle::with_template("{spinner:.cyan} [{elapsed}] {pos} checked  {msg}")?);
    bar.enable_steady_tick(Duration::from_millis(120));
    Ok(bar)
}
