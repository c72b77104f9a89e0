use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading or saving configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration for an analyzer run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Input source configuration
    #[serde(default)]
    pub input: InputConfig,
    /// Suspicion thresholds
    #[serde(default)]
    pub detection: DetectionConfig,
    /// Report destinations
    #[serde(default)]
    pub output: OutputConfig,
}

/// Input source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Path to the authentication log
    pub file_path: PathBuf,
}

/// Suspicion thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Failed attempts per (user, ip) at or above which the pair is suspicious
    pub user_ip_threshold: usize,
    /// Distinct users per IP at or above which the IP is suspicious
    pub ip_user_threshold: usize,
}

/// Report destinations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// User+IP report path
    pub report_path: PathBuf,
    /// IP report path
    pub ip_report_path: PathBuf,
    /// Write the IP report; `false` runs in single-report mode
    pub ip_report: bool,
}

impl OutputConfig {
    /// Where the IP report goes, or `None` in single-report mode
    pub fn ip_report_target(&self) -> Option<&Path> {
        if self.ip_report {
            Some(self.ip_report_path.as_path())
        } else {
            None
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            file_path: PathBuf::from("data/auth.log"),
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        DetectionConfig {
            user_ip_threshold: 3,
            ip_user_threshold: 2,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            report_path: PathBuf::from("output/report.csv"),
            ip_report_path: PathBuf::from("output/ip_suspicious.csv"),
            ip_report: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input: InputConfig::default(),
            detection: DetectionConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Check thresholds and report paths for obvious mistakes
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.detection.user_ip_threshold == 0 {
            return Err(ConfigError::Invalid(
                "user_ip_threshold must be at least 1".to_string(),
            ));
        }
        if self.detection.ip_user_threshold == 0 {
            return Err(ConfigError::Invalid(
                "ip_user_threshold must be at least 1".to_string(),
            ));
        }
        if self.output.ip_report_target() == Some(self.output.report_path.as_path()) {
            return Err(ConfigError::Invalid(format!(
                "report_path and ip_report_path both point to {}",
                self.output.report_path.display()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_match_cli_surface() {
        let config = Config::default();
        assert_eq!(config.input.file_path, PathBuf::from("data/auth.log"));
        assert_eq!(config.detection.user_ip_threshold, 3);
        assert_eq!(config.detection.ip_user_threshold, 2);
        assert_eq!(config.output.report_path, PathBuf::from("output/report.csv"));
        assert_eq!(
            config.output.ip_report_target(),
            Some(Path::new("output/ip_suspicious.csv"))
        );
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("authscan.toml");

        let mut config = Config::default();
        config.detection.user_ip_threshold = 5;
        config.output.ip_report = false;
        config.to_file(&path).unwrap();

        assert_eq!(Config::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(
            &path,
            "[detection]\nuser_ip_threshold = 2\nip_user_threshold = 4\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.detection.ip_user_threshold, 4);
        assert_eq!(config.input, InputConfig::default());
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let mut config = Config::default();
        config.detection.user_ip_threshold = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_same_report_paths_rejected() {
        let mut config = Config::default();
        config.output.ip_report_path = config.output.report_path.clone();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        // Only matters while the IP report is written
        config.output.ip_report = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_section_with_one_threshold_keeps_the_other() {
        let config: Config = toml::from_str("[detection]\nuser_ip_threshold = 5\n").unwrap();
        assert_eq!(config.detection.user_ip_threshold, 5);
        assert_eq!(config.detection.ip_user_threshold, 2);
    }

    #[test]
    fn test_output_section_without_ip_path_keeps_ip_report() {
        let config: Config = toml::from_str("[output]\nreport_path = \"r.csv\"\n").unwrap();
        assert_eq!(config.output.report_path, PathBuf::from("r.csv"));
        assert!(config.output.ip_report);
        assert_eq!(
            config.output.ip_report_target(),
            Some(Path::new("output/ip_suspicious.csv"))
        );
    }

    #[test]
    fn test_ip_report_disabled_explicitly() {
        let config: Config = toml::from_str("[output]\nip_report = false\n").unwrap();
        assert!(config.output.ip_report_target().is_none());
        assert_eq!(config.output.report_path, PathBuf::from("output/report.csv"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let result = Config::from_file(dir.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
