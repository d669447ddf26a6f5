// Main CLI entry point for sqlprobe
// Uses clap for argument parsing

use clap::{Arg, ArgAction, Command};
use env_logger::Env;
use log::{error, warn};
use sqlprobe::auth::{AuthStrategy, CombinedAuth, CookieAuth, StaticTokenAuth};
use sqlprobe::config::{parse_header, ScanConfig};
use sqlprobe::engine::AttackEngine;
use sqlprobe::models::TargetParser;
use sqlprobe::parsers::{load_payloads, TargetListParser};
use sqlprobe::reporting::{export_csv, export_json, write_result, write_summary};
use sqlprobe::scan::run_scan_with_engine;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

const BANNER: &str = r#"
  sqlprobe - SQL injection probe
  Use only on systems you have permission to test!
"#;

fn cli() -> Command {
    Command::new("sqlprobe")
        .version(clap::crate_version!())
        .author("Jake Abendroth")
        .about("Probe a list of URLs for SQL injection with baseline/payload response comparison")
        .after_help("EXAMPLES:\n  sqlprobe --targets targets.txt --payloads payloads.json --summary\n  sqlprobe -t targets.txt -c 20 --timeout 10 --proxy http://127.0.0.1:8080 --cookie 'PHPSESSID=abc'\n\nTARGET FILE LINES:\n  http://host/item.php?id=1\n  post:http://host/login.php|username=a&password=b\n  json:http://host/api/login|{\"username\": \"a\"}\n\nTime-based payloads must sleep for less than --timeout, or the request\ntimes out and the payload is skipped.")
        .arg(Arg::new("targets")
            .short('t')
            .long("targets")
            .required(true)
            .num_args(1)
            .help("Path to the target list file"))
        .arg(Arg::new("payloads")
            .short('p')
            .long("payloads")
            .num_args(1)
            .default_value("payloads.json")
            .help("Path to the payload catalog (JSON object of type -> payloads)"))
        .arg(Arg::new("concurrency")
            .short('c')
            .long("concurrency")
            .num_args(1)
            .default_value("10")
            .value_parser(clap::value_parser!(usize))
            .help("Maximum number of targets probed at once"))
        .arg(Arg::new("timeout")
            .long("timeout")
            .num_args(1)
            .default_value("5")
            .value_parser(clap::value_parser!(u64))
            .help("Per-request timeout in seconds"))
        .arg(Arg::new("proxy")
            .long("proxy")
            .num_args(1)
            .help("HTTP proxy URL for all requests"))
        .arg(Arg::new("summary")
            .long("summary")
            .action(ArgAction::SetTrue)
            .help("Also write results/summary.txt"))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .action(ArgAction::SetTrue)
            .help("Log every payload attempt"))
        .arg(Arg::new("output_dir")
            .short('o')
            .long("output-dir")
            .num_args(1)
            .default_value("results")
            .help("Directory for result files"))
        .arg(Arg::new("header")
            .short('H')
            .long("header")
            .num_args(1)
            .action(ArgAction::Append)
            .help("Extra request header 'Name: value' (repeatable)"))
        .arg(Arg::new("auth_token")
            .long("auth-token")
            .num_args(1)
            .help("Bearer token sent with every request"))
        .arg(Arg::new("cookie")
            .long("cookie")
            .num_args(1)
            .help("Cookie header sent with every request"))
        .arg(Arg::new("csv_report")
            .long("csv-report")
            .action(ArgAction::SetTrue)
            .help("Also export findings as CSV"))
        .arg(Arg::new("json_report")
            .long("json-report")
            .action(ArgAction::SetTrue)
            .help("Also export findings as JSON"))
}

fn build_config(matches: &clap::ArgMatches) -> Result<ScanConfig, sqlprobe::ScanError> {
    let mut extra_headers = HashMap::new();
    if let Some(raw_headers) = matches.get_many::<String>("header") {
        for raw in raw_headers {
            let (name, value) = parse_header(raw)?;
            extra_headers.insert(name, value);
        }
    }

    let config = ScanConfig {
        concurrency: matches.get_one::<usize>("concurrency").copied().unwrap_or(10),
        timeout: Duration::from_secs(matches.get_one::<u64>("timeout").copied().unwrap_or(5)),
        proxy: matches.get_one::<String>("proxy").cloned(),
        verbose: matches.get_flag("verbose"),
        summary: matches.get_flag("summary"),
        output_dir: matches
            .get_one::<String>("output_dir")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("results")),
        extra_headers,
        ..ScanConfig::default()
    };
    config.validate()?;
    Ok(config)
}

fn build_auth(matches: &clap::ArgMatches) -> Option<Box<dyn AuthStrategy + Send + Sync>> {
    let mut strategies: Vec<Box<dyn AuthStrategy + Send + Sync>> = Vec::new();
    if let Some(token) = matches.get_one::<String>("auth_token") {
        strategies.push(Box::new(StaticTokenAuth { token: token.clone() }));
    }
    if let Some(cookie) = matches.get_one::<String>("cookie") {
        strategies.push(Box::new(CookieAuth { cookie: cookie.clone() }));
    }

    match strategies.len() {
        0 => None,
        1 => strategies.pop(),
        _ => Some(Box::new(CombinedAuth { strategies })),
    }
}

#[tokio::main]
async fn main() {
    let matches = cli().get_matches();

    let default_filter = if matches.get_flag("verbose") { "info,sqlprobe=debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    println!("{}", BANNER);

    let config = build_config(&matches).unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(1);
    });

    let targets_path = matches.get_one::<String>("targets").expect("targets is required");
    let payloads_path = matches.get_one::<String>("payloads").expect("payloads has a default");

    let targets = TargetListParser::with_headers(config.extra_headers.clone())
        .parse(targets_path)
        .unwrap_or_else(|e| {
            eprintln!("Failed to load targets from {}: {}", targets_path, e);
            std::process::exit(1);
        });
    let catalog = load_payloads(payloads_path).unwrap_or_else(|e| {
        eprintln!("Failed to load payloads from {}: {}", payloads_path, e);
        std::process::exit(1);
    });

    if targets.is_empty() {
        warn!("No targets in {}", targets_path);
    }
    if catalog.total_payloads() == 0 {
        warn!("Payload catalog {} has no payloads", payloads_path);
    }

    let mut engine = AttackEngine::new(&config).unwrap_or_else(|e| {
        eprintln!("Failed to build HTTP client: {}", e);
        std::process::exit(1);
    });
    if let Some(auth) = build_auth(&matches) {
        engine = engine.with_auth(auth);
    }

    let findings = run_scan_with_engine(Arc::new(engine), targets, Arc::new(catalog), &config).await;

    for finding in &findings {
        println!("[+] {} {} ({})", finding.injection_type, finding.url, finding.dbms);
        if let Err(e) = write_result(&config.output_dir, finding) {
            error!("Failed to write result for {}: {}", finding.url, e);
        }
    }

    if config.summary {
        if let Err(e) = write_summary(&config.output_dir, &findings) {
            error!("Failed to write summary: {}", e);
        }
    }
    if matches.get_flag("csv_report") {
        if let Err(e) = export_csv(&config.output_dir, &findings) {
            error!("Failed to write CSV report: {}", e);
        }
    }
    if matches.get_flag("json_report") {
        if let Err(e) = export_json(&config.output_dir, &findings) {
            error!("Failed to write JSON report: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults() {
        let matches = cli().try_get_matches_from(["sqlprobe", "--targets", "t.txt"]).unwrap();
        let config = build_config(&matches).unwrap();
        assert_eq!(config.concurrency, 10);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.output_dir, PathBuf::from("results"));
        assert!(config.proxy.is_none());
        assert_eq!(matches.get_one::<String>("payloads").unwrap(), "payloads.json");
        assert!(build_auth(&matches).is_none());
    }

    #[test]
    fn cli_headers_and_flags() {
        let matches = cli()
            .try_get_matches_from([
                "sqlprobe", "-t", "t.txt", "-c", "3", "--timeout", "9", "--summary",
                "-H", "X-One: 1", "-H", "X-Two: 2", "--cookie", "sid=1", "--auth-token", "tok",
            ])
            .unwrap();
        let config = build_config(&matches).unwrap();
        assert_eq!(config.concurrency, 3);
        assert_eq!(config.timeout, Duration::from_secs(9));
        assert!(config.summary);
        assert_eq!(config.extra_headers.get("X-Two").map(String::as_str), Some("2"));
        assert!(build_auth(&matches).is_some());
    }

    #[test]
    fn cli_rejects_zero_concurrency() {
        let matches = cli().try_get_matches_from(["sqlprobe", "-t", "t.txt", "-c", "0"]).unwrap();
        assert!(build_config(&matches).is_err());
    }

    #[test]
    fn cli_requires_targets() {
        assert!(cli().try_get_matches_from(["sqlprobe"]).is_err());
    }
}
