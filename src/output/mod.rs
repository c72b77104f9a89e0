//! Report building and CSV serialization
//!
//! Row building is pure: an aggregate plus a threshold in, rows out. Writing
//! is a separate step so either report can fail without touching the other.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::detection::{FailureTally, IpUserSet};
use crate::error::AnalyzerError;
use crate::models::report::{IP_HEADER, USER_IP_HEADER, USER_LIST_DELIMITER};
use crate::models::{IpRow, UserIpRow};

/// Build one row per (user, ip) pair, in the tally's first-seen order
pub fn user_ip_rows(tally: &FailureTally, threshold: usize) -> Vec<UserIpRow> {
    tally
        .iter()
        .map(|((user, ip), count)| UserIpRow {
            user: user.clone(),
            ip: ip.clone(),
            failed_attempts: count,
            suspicious: count >= threshold,
        })
        .collect()
}

/// Build one row per IP, in lexicographic IP order
pub fn ip_rows(ip_users: &IpUserSet, user_threshold: usize) -> Vec<IpRow> {
    ip_users
        .iter()
        .map(|(ip, users)| {
            // BTreeSet iterates sorted
            let names: Vec<&str> = users.iter().map(String::as_str).collect();
            IpRow {
                ip: ip.clone(),
                unique_user_count: users.len(),
                users: names.join(USER_LIST_DELIMITER),
                suspicious: users.len() >= user_threshold,
            }
        })
        .collect()
}

/// Serialize rows as CSV with the given header into any writer
pub fn write_rows<W: Write, T: Serialize>(
    writer: W,
    header: &[&str],
    rows: &[T],
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(header)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn write_report_file<T: Serialize>(
    path: &Path,
    header: &[&str],
    rows: &[T],
) -> Result<(), AnalyzerError> {
    let file = File::create(path).map_err(|source| AnalyzerError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })?;

    write_rows(file, header, rows).map_err(|source| AnalyzerError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

/// Build and write the user+IP report, returning the rows written
pub fn write_user_ip_report<P: AsRef<Path>>(
    path: P,
    tally: &FailureTally,
    threshold: usize,
) -> Result<Vec<UserIpRow>, AnalyzerError> {
    let path = path.as_ref();
    let rows = user_ip_rows(tally, threshold);
    write_report_file(path, &USER_IP_HEADER, &rows)?;

    log::info!(
        "Wrote {} (user, ip) row(s) to {:?}, {} suspicious",
        rows.len(),
        path,
        rows.iter().filter(|r| r.suspicious).count()
    );
    Ok(rows)
}

/// Build and write the IP report, returning the rows written
pub fn write_ip_report<P: AsRef<Path>>(
    path: P,
    ip_users: &IpUserSet,
    user_threshold: usize,
) -> Result<Vec<IpRow>, AnalyzerError> {
    let path = path.as_ref();
    let rows = ip_rows(ip_users, user_threshold);
    write_report_file(path, &IP_HEADER, &rows)?;

    log::info!(
        "Wrote {} IP row(s) to {:?}, {} suspicious",
        rows.len(),
        path,
        rows.iter().filter(|r| r.suspicious).count()
    );
    Ok(rows)
}
