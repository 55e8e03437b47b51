//! Report file: one block per flagged host.
//!
//! The text format is `<input line> --> <record dump>` followed by a blank
//! line. The JSON-lines format writes one `{"input": ..., "record": ...}`
//! object per line instead.

use abusescan::{AbuseError, ReputationRecord};
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Separator between the input line and the record dump.
pub const ENTRY_SEPARATOR: &str = " --> ";

/// Report file format.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// `<host> --> {...}` blocks separated by blank lines
    #[default]
    Text,
    /// One JSON object per line
    Jsonl,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Jsonl => write!(f, "jsonl"),
        }
    }
}

/// One flagged host as stored in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// The line from the host list, as read
    pub input: String,
    /// What AbuseIPDB said about its address
    pub record: ReputationRecord,
}

impl FromStr for ReportEntry {
    type Err = AbuseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (input, dump) = s.split_once(ENTRY_SEPARATOR).ok_or_else(|| {
            AbuseError::Parse(format!("missing '{}' in {s:?}", ENTRY_SEPARATOR.trim()))
        })?;

        Ok(Self {
            input: input.to_string(),
            record: dump.parse()?,
        })
    }
}

/// Writes flagged records to the report sink.
pub struct ReportWriter<W: Write> {
    out: BufWriter<W>,
    format: ReportFormat,
    written: usize,
}

impl ReportWriter<File> {
    /// Create (or truncate) the report file.
    pub fn create(path: impl AsRef<Path>, format: ReportFormat) -> io::Result<Self> {
        Ok(Self::new(File::create(path)?, format))
    }
}

impl<W: Write> ReportWriter<W> {
    /// Write reports to any sink.
    pub fn new(out: W, format: ReportFormat) -> Self {
        Self {
            out: BufWriter::new(out),
            format,
            written: 0,
        }
    }

    /// Write `record` for `input` if it carries any abuse signal.
    ///
    /// Returns whether an entry was written.
    pub fn record(&mut self, input: &str, record: &ReputationRecord) -> io::Result<bool> {
        if !record.has_abuse() {
            return Ok(false);
        }

        match self.format {
            ReportFormat::Text => {
                write!(self.out, "{input}{ENTRY_SEPARATOR}{record}\n\n")?;
            }
            ReportFormat::Jsonl => {
                let entry = ReportEntryRef { input, record };
                serde_json::to_writer(&mut self.out, &entry)?;
                self.out.write_all(b"\n")?;
            }
        }

        self.written += 1;
        Ok(true)
    }

    /// Number of entries written so far.
    pub const fn written(&self) -> usize {
        self.written
    }

    /// Flush buffered entries to the sink.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Flush and hand back the sink.
    pub fn into_inner(self) -> io::Result<W> {
        self.out.into_inner().map_err(io::IntoInnerError::into_error)
    }
}

#[derive(Serialize)]
struct ReportEntryRef<'a> {
    input: &'a str,
    record: &'a ReputationRecord,
}

/// Parse report contents in either format.
///
/// Lines starting with `{` are JSON-lines entries, anything else non-blank
/// is a text entry.
pub fn parse_report(contents: &str) -> Result<Vec<ReportEntry>> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            let line = line.trim();
            let entry: Result<ReportEntry, AbuseError> = if line.starts_with('{') {
                serde_json::from_str(line).map_err(AbuseError::from)
            } else {
                line.parse()
            };
            entry.with_context(|| format!("line {}", n + 1))
        })
        .collect()
}

/// Read every entry of a report file.
pub fn read_report(path: impl AsRef<Path>) -> Result<Vec<ReportEntry>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read report {}", path.display()))?;
    parse_report(&contents).with_context(|| format!("malformed report {}", path.display()))
}
