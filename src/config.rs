// Scan configuration for sqlprobe
// One explicit struct handed to the coordinator instead of ambient globals

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ScanError;

/// Settings for a whole scan run
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Maximum number of targets probed at the same time
    pub concurrency: usize,
    /// Per-request timeout
    pub timeout: Duration,
    pub proxy: Option<String>,
    pub verbose: bool,
    /// Write results/summary.txt as well as per-host files
    pub summary: bool,
    pub output_dir: PathBuf,
    /// Elapsed seconds at which a silent response counts as `unknown-time`
    pub time_threshold_secs: f64,
    /// Extra delay over baseline that fires a `time` payload
    pub time_delay_secs: f64,
    /// Upper bound for the ORDER BY column probe
    pub max_column_probe: usize,
    /// Headers added to every target
    pub extra_headers: HashMap<String, String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            concurrency: 10,
            timeout: Duration::from_secs(5),
            proxy: None,
            verbose: false,
            summary: false,
            output_dir: PathBuf::from("results"),
            time_threshold_secs: 3.0,
            time_delay_secs: 3.0,
            max_column_probe: 10,
            extra_headers: HashMap::new(),
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.concurrency == 0 {
            return Err(ScanError::Config("concurrency must be at least 1".to_string()));
        }

        if self.timeout.is_zero() {
            return Err(ScanError::Config("timeout must be greater than zero".to_string()));
        }

        if let Some(proxy) = &self.proxy {
            url::Url::parse(proxy)
                .map_err(|e| ScanError::Config(format!("invalid proxy URL '{}': {}", proxy, e)))?;
        }

        if self.time_threshold_secs < 0.0 || self.time_delay_secs < 0.0 {
            return Err(ScanError::Config("time thresholds cannot be negative".to_string()));
        }

        Ok(())
    }

    /// The subset each request prober needs
    pub fn probe_settings(&self) -> ProbeSettings {
        ProbeSettings {
            verbose: self.verbose,
            time_threshold_secs: self.time_threshold_secs,
            time_delay_secs: self.time_delay_secs,
            max_column_probe: self.max_column_probe,
        }
    }
}

/// Per-target probing knobs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeSettings {
    pub verbose: bool,
    pub time_threshold_secs: f64,
    pub time_delay_secs: f64,
    pub max_column_probe: usize,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        ScanConfig::default().probe_settings()
    }
}

/// Parse a `Name: value` header argument
pub fn parse_header(raw: &str) -> Result<(String, String), ScanError> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| ScanError::Config(format!("header '{}' is not in 'Name: value' form", raw)))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(ScanError::Config(format!("header '{}' has an empty name", raw)));
    }
    Ok((name.to_string(), value.trim().to_string()))
}
