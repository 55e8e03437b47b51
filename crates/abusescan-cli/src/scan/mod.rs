//! The scan pipeline: read line, resolve, check, filter, write.

pub mod input;
pub mod pipeline;
pub mod report;
pub mod resolver;
pub mod summary;

pub use input::HostList;
pub use pipeline::{ScanOptions, Scanner};
pub use report::{read_report, ReportEntry, ReportFormat, ReportWriter};
pub use resolver::ResolverKind;
pub use summary::ScanSummary;
