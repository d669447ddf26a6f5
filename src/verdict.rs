// Verdict engine for sqlprobe
// Fingerprints the DBMS behind a response and decides whether a payload fired

use crate::models::{Dbms, InjectionType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Vulnerable,
    Clean,
}

/// Length and latency of one response, the inputs the trigger rules compare.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseSample {
    pub body_len: usize,
    pub elapsed_secs: f64,
}

const MYSQL_MARKERS: &[&str] = &["mysql", "you have an error in your sql syntax"];
const POSTGRES_MARKERS: &[&str] = &["syntax error at or near", "pg_sleep", "pgsql"];
const ORACLE_MARKERS: &[&str] = &["oracle", "ora-"];
const MSSQL_MARKERS: &[&str] = &["microsoft sql", "incorrect syntax near"];

/// Guess the DBMS from response text and request latency.
///
/// Rules are checked in a fixed order and the first hit wins:
/// MySQL, PostgreSQL, Oracle, MSSQL, then a slow response
/// (`elapsed_secs >= threshold_secs`) gives `unknown-time`.
/// Matching is a case-insensitive substring search.
pub fn fingerprint_dbms(body: &str, elapsed_secs: f64, threshold_secs: f64) -> Dbms {
    let text = body.to_lowercase();
    let contains_any = |markers: &[&str]| markers.iter().any(|m| text.contains(m));

    if contains_any(MYSQL_MARKERS) {
        Dbms::MySql
    } else if contains_any(POSTGRES_MARKERS) {
        Dbms::PostgreSql
    } else if contains_any(ORACLE_MARKERS) {
        Dbms::Oracle
    } else if contains_any(MSSQL_MARKERS) {
        Dbms::MsSql
    } else if elapsed_secs >= threshold_secs {
        Dbms::UnknownTime
    } else {
        Dbms::Unknown
    }
}

/// Decide whether a mutated response satisfies its injection type's trigger.
///
/// - boolean: body length differs from the baseline
/// - time: latency exceeds the baseline by more than `time_delay_secs`
/// - error: the fingerprint is anything but `unknown`
///
/// Unrecognized injection types never trigger.
pub fn decide_verdict(
    injection_type: &InjectionType,
    baseline: ResponseSample,
    observed: ResponseSample,
    dbms: Dbms,
    time_delay_secs: f64,
) -> Verdict {
    let fired = match injection_type {
        InjectionType::Boolean => observed.body_len != baseline.body_len,
        InjectionType::Time => observed.elapsed_secs - baseline.elapsed_secs > time_delay_secs,
        InjectionType::Error => dbms != Dbms::Unknown,
        InjectionType::Other(_) => false,
    };

    if fired {
        Verdict::Vulnerable
    } else {
        Verdict::Clean
    }
}
