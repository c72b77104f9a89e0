pub mod config;
pub mod detection;
pub mod error;
pub mod input;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod viewer;

// Re-export commonly used types
pub use config::{Config, ConfigError};
pub use detection::{aggregate_reader, analyze_logs, Aggregates, FailureTally, IpUserSet};
pub use error::AnalyzerError;
pub use input::parse_log_line;
pub use models::{IpRow, LogEvent, UserIpRow};
pub use output::{ip_rows, user_ip_rows, write_ip_report, write_user_ip_report};
pub use pipeline::{run, RunOutcome};
pub use viewer::{load_report, ReportStatus, ReportTable, ViewerError};
