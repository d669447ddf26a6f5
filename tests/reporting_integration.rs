/// Result writer tests: per-host files, summary, CSV and JSON exports
use sqlprobe::models::{Dbms, Finding};
use sqlprobe::reporting::{export_csv, export_json, write_result, write_summary};
use std::fs;

fn finding(url: &str, dbms: Dbms, injection_type: &str) -> Finding {
    Finding {
        url: url.to_string(),
        dbms,
        injection_type: injection_type.to_string(),
        username: None,
        password: None,
    }
}

#[test]
fn test_shared_hostname_last_write_wins() {
    let dir = tempfile::tempdir().unwrap();
    let results = dir.path().join("results");

    let first = finding("http://shop.local/item.php?id=1", Dbms::MySql, "error");
    let second = finding("http://shop.local/search.php?q=a", Dbms::Unknown, "boolean");

    let path_a = write_result(&results, &first).unwrap();
    let path_b = write_result(&results, &second).unwrap();
    assert_eq!(path_a, path_b);
    assert_eq!(path_b, results.join("shop.local.txt"));

    let content = fs::read_to_string(&path_b).unwrap();
    assert!(content.contains("search.php?q=a"));
    assert!(content.contains("[+] Injection: boolean"));
    assert!(!content.contains("item.php"), "first finding should be overwritten");
}

#[test]
fn test_summary_blocks_separated_by_blank_line() {
    let dir = tempfile::tempdir().unwrap();
    let findings = vec![
        finding("http://a.local/x?id=1", Dbms::MySql, "error"),
        finding("http://b.local/y?id=2", Dbms::UnknownTime, "time"),
    ];

    let path = write_summary(dir.path(), &findings).unwrap().unwrap();
    assert_eq!(path, dir.path().join("summary.txt"));

    let content = fs::read_to_string(&path).unwrap();
    let blocks: Vec<&str> = content.split("\n\n").collect();
    assert_eq!(blocks.len(), 2);
    assert!(blocks[0].starts_with("[+] URL: http://a.local/x?id=1"));
    assert!(blocks[1].contains("[+] DBMS: unknown-time"));
    assert!(!content.ends_with('\n'));
}

#[test]
fn test_summary_overwritten_per_run() {
    let dir = tempfile::tempdir().unwrap();

    write_summary(dir.path(), &[finding("http://old.local/?id=1", Dbms::MySql, "error")]).unwrap();
    write_summary(dir.path(), &[finding("http://new.local/?id=1", Dbms::Oracle, "error")]).unwrap();

    let content = fs::read_to_string(dir.path().join("summary.txt")).unwrap();
    assert!(content.contains("new.local"));
    assert!(!content.contains("old.local"));
}

#[test]
fn test_empty_summary_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let results = dir.path().join("results");

    assert_eq!(write_summary(&results, &[]).unwrap(), None);
    assert!(!results.exists());
}

#[test]
fn test_csv_export_creates_timestamped_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut f = finding("http://a.local/x?id=1", Dbms::PostgreSql, "boolean");
    f.username = Some("admin".to_string());
    f.password = Some("=HYPERLINK(\"http://evil\")".to_string());

    let path = export_csv(dir.path(), &[f]).unwrap();
    let name = path.file_name().unwrap().to_str().unwrap().to_string();
    assert!(name.starts_with("sqlprobe_report_"));
    assert!(name.ends_with(".csv"));

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("URL,DBMS,Injection,Username,Password\n"));
    assert!(content.contains("http://a.local/x?id=1,postgresql,boolean,admin,"));
    assert!(content.contains("\"'=HYPERLINK(\"\"http://evil\"\")\""), "formula cell must be escaped");
}

#[test]
fn test_json_export() {
    let dir = tempfile::tempdir().unwrap();
    let findings = vec![finding("http://a.local/x?id=1", Dbms::UnknownTime, "time")];

    let path = export_json(dir.path(), &findings).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();

    assert_eq!(parsed[0]["url"], "http://a.local/x?id=1");
    assert_eq!(parsed[0]["dbms"], "unknown-time");
    assert_eq!(parsed[0]["type"], "time");
    assert!(parsed[0]["username"].is_null());
}
