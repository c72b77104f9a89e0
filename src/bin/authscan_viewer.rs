use std::path::{Path, PathBuf};
use serde::Serialize;
use structopt::StructOpt;

use authscan::config::{Config, ConfigError};
use authscan::viewer::{load_report, ReportStatus, ReportSummary, ReportTable};

/// Terminal viewer for reports written by `authscan`
#[derive(StructOpt, Debug)]
#[structopt(name = "authscan_viewer", about = "Display failed-login reports")]
struct Opts {
    /// Take report paths from the [output] section of a config file
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// User+IP report [default: output/report.csv]
    #[structopt(short, long)]
    report: Option<PathBuf>,

    /// IP report [default: output/ip_suspicious.csv]
    #[structopt(long)]
    ip_report: Option<PathBuf>,

    /// Output format: "console" or "json"
    #[structopt(short, long, default_value = "console")]
    format: String,
}

/// How one report fared, for the JSON summary
#[derive(Debug, Serialize)]
struct ReportOverview {
    path: PathBuf,
    status: &'static str,
    #[serde(flatten)]
    summary: Option<ReportSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct Overview {
    user_ip: ReportOverview,
    ip: ReportOverview,
}

impl Opts {
    /// Defaults, then the config file, then explicit flags
    fn report_paths(&self) -> Result<(PathBuf, PathBuf), ConfigError> {
        let output = match &self.config {
            Some(path) => Config::from_file(path)?.output,
            None => Config::default().output,
        };

        let report = self.report.clone().unwrap_or(output.report_path);
        let ip_report = self.ip_report.clone().unwrap_or(output.ip_report_path);
        Ok((report, ip_report))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let opts = Opts::from_args();
    let (report_path, ip_report_path) = opts.report_paths()?;

    match opts.format.to_lowercase().as_str() {
        "json" => {
            let overview = Overview {
                user_ip: overview(&report_path),
                ip: overview(&ip_report_path),
            };
            println!("{}", serde_json::to_string_pretty(&overview)?);
        }
        _ => {
            let users = show_report("User + IP Failed Login Report", "Suspicious rows", &report_path);
            println!();
            let ips = show_report("IP Multi-User Attack Report", "Suspicious IPs", &ip_report_path);

            println!();
            println!("Quick Summary");
            println!("=============");
            if let Some(summary) = users {
                println!("Total (user,ip) rows: {}", summary.total);
                println!("Suspicious (user,ip) rows: {}", summary.suspicious);
            }
            if let Some(summary) = ips {
                println!("Total IP rows: {}", summary.total);
                println!("Suspicious IP rows: {}", summary.suspicious);
            }
        }
    }

    Ok(())
}

/// Load a report, printing a warning instead of failing
fn try_load(path: &Path) -> Option<ReportTable> {
    match load_report(path) {
        Ok(ReportStatus::Loaded(table)) => Some(table),
        Ok(ReportStatus::Missing(path)) => {
            println!("WARNING: File not found: {}", path.display());
            None
        }
        Err(e) => {
            println!("WARNING: {}", e);
            None
        }
    }
}

fn show_report(title: &str, suspicious_title: &str, path: &Path) -> Option<ReportSummary> {
    println!("{}", title);
    println!("{}", "=".repeat(title.len()));

    let table = try_load(path)?;
    print!("{}", table.render(table.rows()));
    println!();
    println!("{}", suspicious_title);
    print!("{}", table.render(table.suspicious_rows()));

    Some(table.summary())
}

fn overview(path: &Path) -> ReportOverview {
    match load_report(path) {
        Ok(ReportStatus::Loaded(table)) => ReportOverview {
            path: path.to_path_buf(),
            status: "loaded",
            summary: Some(table.summary()),
            error: None,
        },
        Ok(ReportStatus::Missing(_)) => ReportOverview {
            path: path.to_path_buf(),
            status: "missing",
            summary: None,
            error: None,
        },
        Err(e) => ReportOverview {
            path: path.to_path_buf(),
            status: "error",
            summary: None,
            error: Some(e.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(args: &[&str]) -> Opts {
        Opts::from_iter_safe(std::iter::once("authscan_viewer").chain(args.iter().copied()))
            .unwrap()
    }

    fn write_config(dir: &Path) -> PathBuf {
        let path = dir.join("authscan.toml");
        std::fs::write(
            &path,
            "[output]\nreport_path = \"cfg/report.csv\"\nip_report_path = \"cfg/ip.csv\"\n",
        )
        .unwrap();
        path
    }

    #[test]
    fn test_default_paths() {
        let (report, ip_report) = opts(&[]).report_paths().unwrap();
        assert_eq!(report, PathBuf::from("output/report.csv"));
        assert_eq!(ip_report, PathBuf::from("output/ip_suspicious.csv"));
    }

    #[test]
    fn test_config_supplies_paths() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path());

        let (report, ip_report) = opts(&["--config", config.to_str().unwrap()])
            .report_paths()
            .unwrap();
        assert_eq!(report, PathBuf::from("cfg/report.csv"));
        assert_eq!(ip_report, PathBuf::from("cfg/ip.csv"));
    }

    #[test]
    fn test_explicit_flags_win_over_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path());

        let (report, ip_report) = opts(&[
            "--config", config.to_str().unwrap(),
            "--report", "mine.csv",
        ])
        .report_paths()
        .unwrap();
        assert_eq!(report, PathBuf::from("mine.csv"));
        assert_eq!(ip_report, PathBuf::from("cfg/ip.csv"));

        let (_, ip_report) = opts(&["--config", config.to_str().unwrap(), "--ip-report", "ip2.csv"])
            .report_paths()
            .unwrap();
        assert_eq!(ip_report, PathBuf::from("ip2.csv"));
    }
}
