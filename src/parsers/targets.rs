// Target list parser for sqlprobe
// One request descriptor per line:
//   http://host/page?id=1                 GET
//   post:http://host/login|user=a&pass=b  form POST
//   json:http://host/api|{"id": 1}        JSON POST

use serde_json::Value;
use std::collections::HashMap;
use url::Url;

use crate::error::ScanError;
use crate::models::{Target, TargetParser};

/// Parses target files; `headers` are attached to every target it produces.
#[derive(Debug, Default)]
pub struct TargetListParser {
    pub headers: HashMap<String, String>,
}

impl TargetListParser {
    pub fn with_headers(headers: HashMap<String, String>) -> Self {
        Self { headers }
    }

    /// Parse target-list text. Blank lines and `#` comments are skipped.
    pub fn parse_str(&self, content: &str) -> Result<Vec<Target>, ScanError> {
        let mut targets = Vec::new();
        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let target = parse_target_line(line, idx + 1)?;
            targets.push(target.with_headers(self.headers.clone()));
        }
        Ok(targets)
    }
}

impl TargetParser for TargetListParser {
    fn parse(&self, file_path: &str) -> Result<Vec<Target>, ScanError> {
        let content = std::fs::read_to_string(file_path)?;
        self.parse_str(&content)
    }
}

/// Parse one non-blank line. `line_no` is 1-based and only used in errors.
pub fn parse_target_line(line: &str, line_no: usize) -> Result<Target, ScanError> {
    let fail = |reason: String| ScanError::TargetParse { line: line_no, reason };

    if let Some(rest) = line.strip_prefix("post:") {
        let (url, body) = rest
            .split_once('|')
            .ok_or_else(|| fail("post target needs 'url|k=v&k2=v2'".to_string()))?;
        let url = check_url(url.trim()).map_err(fail)?;
        let fields: Vec<(String, String)> = url::form_urlencoded::parse(body.trim().as_bytes())
            .into_owned()
            .collect();
        return Ok(Target::form(url, fields));
    }

    if let Some(rest) = line.strip_prefix("json:") {
        let (url, body) = rest
            .split_once('|')
            .ok_or_else(|| fail("json target needs 'url|{...}'".to_string()))?;
        let url = check_url(url.trim()).map_err(fail)?;
        let json: Value = serde_json::from_str(body.trim())
            .map_err(|e| fail(format!("invalid JSON body: {}", e)))?;
        if !json.is_object() {
            return Err(fail("JSON body must be an object".to_string()));
        }
        return Ok(Target::json(url, json));
    }

    let url = check_url(line).map_err(fail)?;
    Ok(Target::get(url))
}

fn check_url(raw: &str) -> Result<String, String> {
    let url = Url::parse(raw).map_err(|e| format!("invalid URL '{}': {}", raw, e))?;
    match url.scheme() {
        "http" | "https" => Ok(raw.to_string()),
        other => Err(format!("unsupported scheme '{}' in '{}'", other, raw)),
    }
}
