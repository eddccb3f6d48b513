pub mod report_builder;
pub mod output;

pub use report_builder::{assemble_chain, QueryError, ReportBuilder, ScanSettings};
pub use output::{render_summary, write_report, OutputError};
