use std::path::PathBuf;
use structopt::StructOpt;

use authscan::config::Config;
use authscan::error::AnalyzerError;
use authscan::pipeline;

/// Failed-login analyzer for key=value authentication logs
#[derive(StructOpt, Debug)]
#[structopt(name = "authscan", about = "Flag suspicious user/IP pairs and multi-user IPs")]
struct Opts {
    /// Load settings from a TOML file; flags below override it
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// Path to the authentication log [default: data/auth.log]
    #[structopt(short, long)]
    input: Option<PathBuf>,

    /// User+IP report path [default: output/report.csv]
    #[structopt(short, long)]
    output: Option<PathBuf>,

    /// Failed attempts per (user, ip) that mark the pair suspicious [default: 3]
    #[structopt(short, long)]
    threshold: Option<usize>,

    /// IP report path [default: output/ip_suspicious.csv]
    #[structopt(long)]
    ip_output: Option<PathBuf>,

    /// Distinct users per IP that mark the IP suspicious [default: 2]
    #[structopt(long)]
    ip_user_threshold: Option<usize>,

    /// Only write the user+IP report; wins over --ip-output
    #[structopt(long)]
    no_ip_report: bool,

    /// Write the effective configuration to this path and exit
    #[structopt(long)]
    write_config: Option<PathBuf>,
}

impl Opts {
    /// Defaults, then the config file, then explicit flags
    fn effective_config(&self) -> Result<Config, AnalyzerError> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(input) = &self.input {
            config.input.file_path = input.clone();
        }
        if let Some(output) = &self.output {
            config.output.report_path = output.clone();
        }
        if let Some(threshold) = self.threshold {
            config.detection.user_ip_threshold = threshold;
        }
        if let Some(ip_output) = &self.ip_output {
            config.output.ip_report_path = ip_output.clone();
        }
        if let Some(threshold) = self.ip_user_threshold {
            config.detection.ip_user_threshold = threshold;
        }
        if self.no_ip_report {
            config.output.ip_report = false;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let opts = Opts::from_args();

    if let Err(e) = run(&opts) {
        eprintln!("{}", error_message(&e));
        std::process::exit(1);
    }
}

/// The single line printed to stderr for a fatal error
fn error_message(e: &AnalyzerError) -> String {
    format!("Error: {}", e)
}

fn run(opts: &Opts) -> Result<(), AnalyzerError> {
    let config = opts.effective_config()?;

    if let Some(path) = &opts.write_config {
        config.to_file(path)?;
        println!("Configuration written to: {}", path.display());
        return Ok(());
    }

    let outcome = pipeline::run(&config)?;

    println!("Report generated at {}", outcome.user_ip_report.path.display());
    if let Some(ip_report) = &outcome.ip_report {
        println!("IP report generated at {}", ip_report.path.display());
    }

    let mut summary = format!(
        "{} FAIL event(s) in {} line(s); {} of {} (user, ip) pair(s) suspicious",
        outcome.stats.failures,
        outcome.stats.lines_read,
        outcome.user_ip_report.suspicious,
        outcome.user_ip_report.rows
    );
    if let Some(ip_report) = &outcome.ip_report {
        summary.push_str(&format!(
            "; {} of {} IP(s) suspicious",
            ip_report.suspicious, ip_report.rows
        ));
    }
    println!("{}", summary);

    Ok(())
}
