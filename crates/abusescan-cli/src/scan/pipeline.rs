//! The sequential scan loop.
//!
//! Each host is resolved, checked and filtered to completion before the next
//! line is read. Resolution failures skip the line. Check failures abort the
//! run unless `keep_going` is set; a rejected API key always aborts.

use abusescan::{Resolve, ReputationLookup};
use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::ProgressBar;
use std::io::{self, Write};
use tracing::{debug, warn};

use super::report::ReportWriter;
use super::summary::ScanSummary;

/// Knobs for a scan run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    /// Report failed checks and continue instead of aborting
    pub keep_going: bool,
}

/// Drives hosts through resolver, lookup and report writer.
pub struct Scanner<'a, R: ?Sized, L: ?Sized> {
    resolver: &'a R,
    lookup: &'a L,
    options: ScanOptions,
    progress: ProgressBar,
}

impl<'a, R, L> Scanner<'a, R, L>
where
    R: Resolve + ?Sized,
    L: ReputationLookup + ?Sized,
{
    pub fn new(resolver: &'a R, lookup: &'a L, options: ScanOptions) -> Self {
        Self {
            resolver,
            lookup,
            options,
            progress: ProgressBar::hidden(),
        }
    }

    /// Report progress on `bar` instead of staying silent.
    #[must_use]
    pub fn with_progress(mut self, bar: ProgressBar) -> Self {
        self.progress = bar;
        self
    }

    /// Run every host through the pipeline.
    ///
    /// On an aborting error the report is flushed before the error is
    /// returned, so entries written so far survive.
    pub async fn run<I, W>(&self, hosts: I, report: &mut ReportWriter<W>) -> Result<ScanSummary>
    where
        I: IntoIterator<Item = io::Result<String>>,
        W: Write,
    {
        let mut summary = ScanSummary::default();

        for host in hosts {
            let host = match host {
                Ok(host) => host,
                Err(e) => {
                    report.flush().context("failed to write report")?;
                    return Err(e).context("failed to read host list");
                }
            };

            summary.processed += 1;
            self.progress.set_message(host.clone());

            let ip = match self.resolver.resolve_ipv4(&host).await {
                Ok(ip) => ip,
                Err(e) => {
                    debug!(
                        host = %host,
                        resolver = self.resolver.name(),
                        error = %e,
                        "resolution failed"
                    );
                    self.note(format!("Element {host} could not have been evaluated.").yellow());
                    summary.skipped += 1;
                    self.progress.inc(1);
                    continue;
                }
            };

            match self.lookup.lookup(ip).await {
                Ok(record) => {
                    debug!(
                        host = %host,
                        %ip,
                        score = record.abuse_confidence_score,
                        reports = record.total_reports,
                        "checked"
                    );
                    if report.record(&host, &record).context("failed to write report")? {
                        summary.flagged += 1;
                    } else {
                        summary.clean += 1;
                    }
                }
                Err(e) if self.options.keep_going && !e.is_auth_error() => {
                    warn!(host = %host, %ip, error = %e, "check failed, continuing");
                    self.note(format!("Element {host} ({ip}) could not be checked: {e}").red());
                    summary.failed += 1;
                }
                Err(e) => {
                    report.flush().context("failed to write report")?;
                    return Err(e).with_context(|| {
                        format!(
                            "checking {host} ({ip}) failed, aborting after {} processed",
                            plural(summary.processed - 1, "host", "hosts")
                        )
                    });
                }
            }

            self.progress.inc(1);
        }

        report.flush().context("failed to write report")?;
        Ok(summary)
    }

    fn note(&self, line: impl std::fmt::Display) {
        self.progress.suspend(|| println!("{line}"));
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    format!("{n} {}", if n == 1 { one } else { many })
}
