//! End-of-run counters.

use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

/// What happened to each line of the host list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// Lines read from the host list
    pub processed: usize,
    /// Hosts with reported abuse, written to the report
    pub flagged: usize,
    /// Hosts checked with no abuse signal
    pub clean: usize,
    /// Hosts that could not be resolved to IPv4
    pub skipped: usize,
    /// Hosts whose check failed (only with `--keep-going`)
    pub failed: usize,
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Outcome")]
    outcome: &'static str,
    #[tabled(rename = "Hosts")]
    count: usize,
}

impl ScanSummary {
    /// Every processed line ended up in exactly one bucket.
    pub const fn is_balanced(&self) -> bool {
        self.flagged + self.clean + self.skipped + self.failed == self.processed
    }

    /// Print the summary table.
    pub fn print(&self, report_path: &str) {
        let rows = [
            SummaryRow { outcome: "processed", count: self.processed },
            SummaryRow { outcome: "flagged", count: self.flagged },
            SummaryRow { outcome: "clean", count: self.clean },
            SummaryRow { outcome: "skipped", count: self.skipped },
            SummaryRow { outcome: "failed", count: self.failed },
        ];

        println!();
        println!("{}", "Scan summary:".bold().underline());
        println!("{}", Table::new(rows).with(Style::rounded()));

        if self.flagged > 0 {
            println!(
                "{} {} written to {}",
                self.flagged.to_string().red().bold(),
                if self.flagged == 1 { "entry" } else { "entries" },
                report_path.cyan()
            );
        } else {
            println!("{}", "No reported abuse found.".green());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced() {
        let summary = ScanSummary {
            processed: 6,
            flagged: 2,
            clean: 2,
            skipped: 1,
            failed: 1,
        };
        assert!(summary.is_balanced());
        assert!(ScanSummary::default().is_balanced());

        let off = ScanSummary {
            processed: 3,
            ..summary
        };
        assert!(!off.is_balanced());
    }
}
