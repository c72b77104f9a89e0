//! Single-pass aggregation of FAIL events
//!
//! Builds both aggregates from one forward pass over the log. Only lines
//! whose `status` is exactly `FAIL` are counted; missing `user`/`ip` fields
//! fall back to `unknown`.

use std::io::BufRead;
use std::path::Path;

use super::{FailureTally, IpUserSet};
use crate::error::AnalyzerError;
use crate::input::{for_each_event, LogFile};
use crate::models::LogEvent;

/// Counters collected during the pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateStats {
    /// Lines read, blank ones included
    pub lines_read: usize,
    /// Lines with `status=FAIL`
    pub failures: usize,
    /// Lines that carried no `key=value` token
    pub unparsed_lines: usize,
}

/// Output of one aggregation run
#[derive(Debug, Clone, Default)]
pub struct Aggregates {
    pub failures: FailureTally,
    pub ip_users: IpUserSet,
    pub stats: AggregateStats,
}

impl Aggregates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one parsed line into the aggregates
    pub fn observe(&mut self, event: &LogEvent) {
        if event.is_empty() {
            self.stats.unparsed_lines += 1;
        }
        if !event.is_failure() {
            return;
        }

        let user = event.user();
        let ip = event.ip();
        self.failures.record(user, ip);
        self.ip_users.record(ip, user);
        self.stats.failures += 1;
    }

    /// Combine aggregates built from disjoint parts of the same log
    pub fn merge(&mut self, other: Aggregates) {
        self.failures.merge(other.failures);
        self.ip_users.merge(other.ip_users);
        self.stats.lines_read += other.stats.lines_read;
        self.stats.failures += other.stats.failures;
        self.stats.unparsed_lines += other.stats.unparsed_lines;
    }
}

/// Aggregate any buffered reader
pub fn aggregate_reader<R: BufRead>(reader: R) -> std::io::Result<Aggregates> {
    let mut aggregates = Aggregates::new();
    let mut line_no = 0usize;

    let lines_read = for_each_event(reader, |event| {
        line_no += 1;
        if event.is_empty() {
            log::debug!("Line {} has no key=value fields, skipping", line_no);
        }
        aggregates.observe(&event);
    })?;
    aggregates.stats.lines_read = lines_read;

    Ok(aggregates)
}

/// Aggregate the log file at `path`
///
/// Fails without returning partial aggregates if the file cannot be opened
/// or read to the end.
pub fn analyze_logs<P: AsRef<Path>>(path: P) -> Result<Aggregates, AnalyzerError> {
    let log_file = LogFile::open(path)?;
    log::info!("Analyzing log file: {:?}", log_file.path());

    let (file_path, reader) = log_file.into_parts();
    let aggregates = aggregate_reader(reader)
        .map_err(|source| AnalyzerError::InputRead {
            path: file_path,
            source,
        })?;

    log::info!(
        "Read {} line(s): {} FAIL event(s), {} (user, ip) pair(s), {} IP(s)",
        aggregates.stats.lines_read,
        aggregates.stats.failures,
        aggregates.failures.len(),
        aggregates.ip_users.len()
    );
    if aggregates.stats.unparsed_lines > 0 {
        log::debug!(
            "{} line(s) had no key=value fields",
            aggregates.stats.unparsed_lines
        );
    }

    Ok(aggregates)
}
