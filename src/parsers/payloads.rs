// Payload catalog loader for sqlprobe
// JSON object of injection-type label -> list of payload strings

use serde_json::{Map, Value};

use crate::error::ScanError;
use crate::models::PayloadCatalog;

/// Load a catalog from disk. Key order in the file is the probing order.
pub fn load_payloads(file_path: &str) -> Result<PayloadCatalog, ScanError> {
    let data = std::fs::read_to_string(file_path)?;
    parse_payloads(&data)
}

pub fn parse_payloads(data: &str) -> Result<PayloadCatalog, ScanError> {
    let root: Map<String, Value> = serde_json::from_str(data)?;

    let mut entries = Vec::with_capacity(root.len());
    for (label, value) in root {
        let list = value
            .as_array()
            .ok_or_else(|| ScanError::PayloadParse(format!("'{}' must map to an array of strings", label)))?;

        let payloads = list
            .iter()
            .map(|p| {
                p.as_str().map(str::to_string).ok_or_else(|| {
                    ScanError::PayloadParse(format!("'{}' contains a non-string payload: {}", label, p))
                })
            })
            .collect::<Result<Vec<String>, ScanError>>()?;

        entries.push((label, payloads));
    }

    Ok(PayloadCatalog::new(entries))
}
