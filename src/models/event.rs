use std::collections::HashMap;

/// Status value that marks a failed login
pub const FAIL_STATUS: &str = "FAIL";

/// Placeholder for a missing `user` or `ip` field
pub const UNKNOWN_FIELD: &str = "unknown";

/// Fields parsed from a single log line
///
/// Values are kept as strings. A key repeated on the same line keeps its
/// last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogEvent {
    fields: HashMap<String, String>,
}

impl LogEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.fields.insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True only for an exact, case-sensitive `status=FAIL`
    pub fn is_failure(&self) -> bool {
        self.get("status") == Some(FAIL_STATUS)
    }

    pub fn user(&self) -> &str {
        self.get("user").unwrap_or(UNKNOWN_FIELD)
    }

    pub fn ip(&self) -> &str {
        self.get("ip").unwrap_or(UNKNOWN_FIELD)
    }
}
