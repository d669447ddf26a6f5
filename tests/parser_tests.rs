/// Integration tests for the target list and payload catalog loaders
use sqlprobe::models::{Method, TargetParser};
use sqlprobe::parsers::{load_payloads, TargetListParser};
use sqlprobe::ScanError;
use std::collections::HashMap;
use std::fs;

#[test]
fn test_target_file_mixed_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("targets.txt");
    fs::write(
        &path,
        "# DVWA lab\n\
         http://10.0.0.5/vulnerabilities/sqli/?id=1&Submit=Submit\n\
         \n\
         post:http://10.0.0.5/login.php|username=admin&password=password&Login=Login\n\
         json:http://10.0.0.5/api/users|{\"id\": \"1\", \"fields\": \"name\"}\n",
    )
    .unwrap();

    let mut headers = HashMap::new();
    headers.insert("User-Agent".to_string(), "sqlprobe".to_string());
    let targets = TargetListParser::with_headers(headers)
        .parse(path.to_str().unwrap())
        .unwrap();

    assert_eq!(targets.len(), 3);

    assert_eq!(targets[0].method, Method::GET);
    assert!(targets[0].body.is_none() && targets[0].json.is_none());

    assert_eq!(targets[1].method, Method::POST);
    assert_eq!(targets[1].url, "http://10.0.0.5/login.php");
    assert_eq!(targets[1].body.as_ref().unwrap()[0], ("username".to_string(), "admin".to_string()));

    assert_eq!(targets[2].method, Method::POST);
    assert!(targets[2].is_json());

    for target in &targets {
        assert_eq!(target.headers.get("User-Agent").map(String::as_str), Some("sqlprobe"));
    }
}

#[test]
fn test_missing_target_file_is_io_error() {
    let result = TargetListParser::default().parse("/definitely/not/here/targets.txt");
    assert!(matches!(result, Err(ScanError::Io(_))));
}

#[test]
fn test_payload_file_roundtrip_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("payloads.json");
    fs::write(
        &path,
        r#"{
            "error": ["'", "\""],
            "boolean": ["' OR '1'='1", "' AND '1'='2"],
            "time": ["' AND SLEEP(5)-- ", "'; SELECT pg_sleep(5)-- "]
        }"#,
    )
    .unwrap();

    let catalog = load_payloads(path.to_str().unwrap()).unwrap();
    let labels: Vec<&str> = catalog.iter().map(|(label, _)| label).collect();
    assert_eq!(labels, vec!["error", "boolean", "time"]);
    assert_eq!(catalog.total_payloads(), 6);
}

#[test]
fn test_missing_payload_file_is_error() {
    assert!(load_payloads("/definitely/not/here/payloads.json").is_err());
}

#[test]
fn test_shipped_time_payloads_fit_default_timeout() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/payloads.json");
    let catalog = load_payloads(path).unwrap();
    let config = sqlprobe::ScanConfig::default();
    let last_number = regex::Regex::new(r"(\d+)\D*$").unwrap();

    let (_, time_payloads) = catalog.iter().find(|(label, _)| *label == "time").unwrap();
    assert!(!time_payloads.is_empty());
    for payload in time_payloads {
        let sleep: f64 = last_number.captures(payload).unwrap()[1].parse().unwrap();
        assert!(sleep > config.time_delay_secs, "{} would not trigger", payload);
        assert!(sleep < config.timeout.as_secs_f64(), "{} would time out", payload);
    }
}
