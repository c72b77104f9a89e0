//! Parser for space-delimited `key=value` log lines
//!
//! Example: `2026-01-01 10:01:11 user=alex ip=10.0.0.5 status=FAIL`

use crate::models::LogEvent;

/// Parse one raw line into its `key=value` fields
///
/// Tokens without `=` are ignored and only the first `=` of a token splits
/// it, so `msg=a=b` yields `msg` -> `a=b`. Never fails; a blank or
/// unrecognisable line gives an empty event.
pub fn parse_log_line(line: &str) -> LogEvent {
    let mut event = LogEvent::new();

    for token in line.split_whitespace() {
        if let Some((key, value)) = token.split_once('=') {
            event.insert(key, value);
        }
    }

    event
}
