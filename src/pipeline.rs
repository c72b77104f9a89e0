//! One analyzer run: aggregate the log, then write the reports

use std::path::PathBuf;

use crate::config::Config;
use crate::detection::{analyze_logs, AggregateStats};
use crate::error::AnalyzerError;
use crate::output::{write_ip_report, write_user_ip_report};

/// A report that was written successfully
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReport {
    pub path: PathBuf,
    pub rows: usize,
    pub suspicious: usize,
}

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub stats: AggregateStats,
    pub user_ip_report: WrittenReport,
    /// `None` in single-report mode
    pub ip_report: Option<WrittenReport>,
}

/// Aggregate `config.input` and write the configured reports
///
/// The input is read in full before anything is written, so a missing or
/// unreadable log leaves no output behind. The IP report is only attempted
/// after the user+IP report succeeded.
pub fn run(config: &Config) -> Result<RunOutcome, AnalyzerError> {
    config.validate()?;

    let aggregates = analyze_logs(&config.input.file_path)?;

    let rows = write_user_ip_report(
        &config.output.report_path,
        &aggregates.failures,
        config.detection.user_ip_threshold,
    )?;
    let user_ip_report = WrittenReport {
        path: config.output.report_path.clone(),
        rows: rows.len(),
        suspicious: rows.iter().filter(|r| r.suspicious).count(),
    };

    let ip_report = match config.output.ip_report_target() {
        Some(path) => {
            let rows = write_ip_report(
                path,
                &aggregates.ip_users,
                config.detection.ip_user_threshold,
            )?;
            Some(WrittenReport {
                path: path.to_path_buf(),
                rows: rows.len(),
                suspicious: rows.iter().filter(|r| r.suspicious).count(),
            })
        }
        None => {
            log::info!("IP report disabled, skipping");
            None
        }
    };

    Ok(RunOutcome {
        stats: aggregates.stats,
        user_ip_report,
        ip_report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    const SCENARIO: &str = "\
2026-01-01 10:01:11 user=alex ip=10.0.0.5 status=FAIL
2026-01-01 10:01:30 user=alex ip=10.0.0.5 status=FAIL
2026-01-01 10:02:05 user=alex ip=10.0.0.5 status=SUCCESS
2026-01-01 12:00:01 user=john ip=10.0.0.9 status=FAIL
2026-01-01 12:00:10 user=rita ip=10.0.0.9 status=FAIL
";

    fn config_in(dir: &Path) -> Config {
        let mut config = Config::default();
        config.input.file_path = dir.join("auth.log");
        config.output.report_path = dir.join("report.csv");
        config.output.ip_report_path = dir.join("ip_suspicious.csv");
        config.detection.user_ip_threshold = 2;
        config.detection.ip_user_threshold = 2;
        config
    }

    #[test]
    fn test_scenario_reports() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::write(&config.input.file_path, SCENARIO).unwrap();

        let outcome = run(&config).unwrap();

        assert_eq!(outcome.user_ip_report.rows, 3);
        assert_eq!(outcome.user_ip_report.suspicious, 1);
        let ip_report = outcome.ip_report.unwrap();
        assert_eq!(ip_report.rows, 2);
        assert_eq!(ip_report.suspicious, 1);

        assert_eq!(
            std::fs::read_to_string(dir.path().join("report.csv")).unwrap(),
            "User,IP,Failed Attempts,Suspicious\n\
             alex,10.0.0.5,2,YES\n\
             john,10.0.0.9,1,NO\n\
             rita,10.0.0.9,1,NO\n"
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("ip_suspicious.csv")).unwrap(),
            "IP,Unique Users Targeted,Users,Suspicious\n\
             10.0.0.5,1,alex,NO\n\
             10.0.0.9,2,john;rita,YES\n"
        );
    }

    #[test]
    fn test_missing_input_writes_nothing() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());

        let result = run(&config);

        assert!(matches!(result, Err(AnalyzerError::InputNotFound { .. })));
        assert!(!config.output.report_path.exists());
        assert!(!dir.path().join("ip_suspicious.csv").exists());
    }

    #[test]
    fn test_single_report_mode() {
        let dir = tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.output.ip_report = false;
        std::fs::write(&config.input.file_path, SCENARIO).unwrap();

        let outcome = run(&config).unwrap();

        assert!(outcome.ip_report.is_none());
        assert!(config.output.report_path.exists());
        assert!(!dir.path().join("ip_suspicious.csv").exists());
    }

    #[test]
    fn test_unwritable_ip_report_is_an_error() {
        let dir = tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.output.ip_report_path = dir.path().join("missing").join("ip.csv");
        std::fs::write(&config.input.file_path, SCENARIO).unwrap();

        let result = run(&config);

        assert!(matches!(result, Err(AnalyzerError::OutputWrite { .. })));
    }
}
