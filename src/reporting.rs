// Reporting and output for sqlprobe
// Per-host text reports, the run summary, plus CSV and JSON exports

use chrono::Local;
use log::info;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ScanError;
use crate::models::Finding;

/// Host part of a finding's URL, `unknown` when there is none
pub fn finding_host(finding: &Finding) -> String {
    Url::parse(&finding.url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Fixed five-line text block for one finding
pub fn format_finding(finding: &Finding) -> String {
    let lines = [
        format!("[+] URL: {}", finding.url),
        format!("[+] DBMS: {}", finding.dbms),
        format!("[+] Injection: {}", finding.injection_type),
        format!("[+] username: {}", finding.username.as_deref().unwrap_or("None")),
        format!("[+] password: {}", finding.password.as_deref().unwrap_or("None")),
    ];
    lines.join("\n")
}

/// Write `<dir>/<hostname>.txt`, replacing whatever an earlier finding for
/// the same host left there.
pub fn write_result(dir: &Path, finding: &Finding) -> Result<PathBuf, ScanError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.txt", finding_host(finding)));
    fs::write(&path, format_finding(finding))?;
    info!("Result written: {}", path.display());
    Ok(path)
}

/// Write every finding's block, blank-line separated, to `<dir>/summary.txt`.
/// Nothing is written for an empty scan.
pub fn write_summary(dir: &Path, findings: &[Finding]) -> Result<Option<PathBuf>, ScanError> {
    if findings.is_empty() {
        return Ok(None);
    }

    fs::create_dir_all(dir)?;
    let path = dir.join("summary.txt");
    let blocks: Vec<String> = findings.iter().map(format_finding).collect();
    fs::write(&path, blocks.join("\n\n"))?;
    info!("Summary written: {}", path.display());
    Ok(Some(path))
}

/// Escape CSV field to prevent formula injection attacks
/// Cells starting with =, +, -, @, or tab are prefixed with single quote
fn escape_csv_field(field: &str) -> String {
    let Some(first_char) = field.chars().next() else {
        return String::new();
    };
    let needs_escaping = matches!(first_char, '=' | '+' | '-' | '@' | '\t');

    if needs_escaping {
        format!("\"'{}\"", field.replace('"', "\"\""))
    } else if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

pub fn export_csv(dir: &Path, findings: &[Finding]) -> Result<PathBuf, ScanError> {
    fs::create_dir_all(dir)?;
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("sqlprobe_report_{}.csv", timestamp));
    let mut file = File::create(&path)?;

    writeln!(file, "URL,DBMS,Injection,Username,Password")?;
    for finding in findings {
        writeln!(
            file,
            "{},{},{},{},{}",
            escape_csv_field(&finding.url),
            escape_csv_field(finding.dbms.as_str()),
            escape_csv_field(&finding.injection_type),
            escape_csv_field(finding.username.as_deref().unwrap_or("")),
            escape_csv_field(finding.password.as_deref().unwrap_or(""))
        )?;
    }

    info!("CSV report written: {}", path.display());
    Ok(path)
}

pub fn export_json(dir: &Path, findings: &[Finding]) -> Result<PathBuf, ScanError> {
    fs::create_dir_all(dir)?;
    let path = dir.join("findings.json");
    fs::write(&path, serde_json::to_string_pretty(findings)?)?;
    info!("JSON report written: {}", path.display());
    Ok(path)
}
