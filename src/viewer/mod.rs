//! Loader and renderer for generated reports
//!
//! The viewer is lenient where the analyzer is strict: a report that does
//! not exist yet is a normal state (`ReportStatus::Missing`), not an error.
//! Tables are read generically by header, so either report layout works.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::models::report::yes_no;

/// Column holding the `YES`/`NO` verdict in both reports
pub const SUSPICIOUS_COLUMN: &str = "Suspicious";

/// Errors that can occur while loading a report
#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Failed to open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed CSV in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} has no '{column}' column", .path.display())]
    MissingColumn { path: PathBuf, column: String },
}

/// Result of trying to load one report
#[derive(Debug)]
pub enum ReportStatus {
    Loaded(ReportTable),
    Missing(PathBuf),
}

/// Total and suspicious row counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total: usize,
    pub suspicious: usize,
}

/// A report read back from disk
#[derive(Debug, Clone)]
pub struct ReportTable {
    path: PathBuf,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    suspicious_index: usize,
}

/// Try to open and parse a report
///
/// The open itself decides whether the file is missing; there is no
/// separate existence check.
pub fn load_report<P: AsRef<Path>>(path: P) -> Result<ReportStatus, ViewerError> {
    let path = path.as_ref();
    match File::open(path) {
        Ok(file) => read_report(file, path).map(ReportStatus::Loaded),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("Report not found: {:?}", path);
            Ok(ReportStatus::Missing(path.to_path_buf()))
        }
        Err(source) => Err(ViewerError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Parse a report from any reader; `path` is used for messages only
pub fn read_report<R: Read, P: AsRef<Path>>(reader: R, path: P) -> Result<ReportTable, ViewerError> {
    let path = path.as_ref().to_path_buf();
    let csv_error = |source| ViewerError::Csv {
        path: path.clone(),
        source,
    };

    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(str::to_string)
        .collect();

    let suspicious_index = headers
        .iter()
        .position(|h| h == SUSPICIOUS_COLUMN)
        .ok_or_else(|| ViewerError::MissingColumn {
            path: path.clone(),
            column: SUSPICIOUS_COLUMN.to_string(),
        })?;

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(csv_error)?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    log::debug!("Loaded {} row(s) from {:?}", rows.len(), path);

    Ok(ReportTable {
        path,
        headers,
        rows,
        suspicious_index,
    })
}

impl ReportTable {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    fn is_suspicious(&self, row: &[String]) -> bool {
        row.get(self.suspicious_index).map(String::as_str) == Some(yes_no::YES)
    }

    /// Rows whose `Suspicious` column is exactly `YES`
    pub fn suspicious_rows(&self) -> Vec<&Vec<String>> {
        self.rows.iter().filter(|row| self.is_suspicious(row)).collect()
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            total: self.rows.len(),
            suspicious: self.suspicious_rows().len(),
        }
    }

    /// Render the header plus `rows` as a left-aligned text table
    pub fn render<'a, I>(&self, rows: I) -> String
    where
        I: IntoIterator<Item = &'a Vec<String>>,
    {
        let rows: Vec<&Vec<String>> = rows.into_iter().collect();

        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(i) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }

        let format_line = |cells: &[String]| -> String {
            let padded: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(i, width)| {
                    let cell = cells.get(i).map(String::as_str).unwrap_or("");
                    format!("{:<width$}", cell, width = width)
                })
                .collect();
            padded.join(" | ").trim_end().to_string()
        };

        let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

        let mut out = String::new();
        out.push_str(&format_line(self.headers.as_slice()));
        out.push('\n');
        out.push_str(&separator.join("-+-"));
        out.push('\n');
        for row in rows {
            out.push_str(&format_line(row.as_slice()));
            out.push('\n');
        }
        out
    }
}
