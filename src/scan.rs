// Scan coordinator for sqlprobe
// Fans probers out over all targets under a fixed concurrency cap

use log::{error, info};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::ScanConfig;
use crate::engine::AttackEngine;
use crate::error::ScanError;
use crate::models::{Finding, PayloadCatalog, Target};
use crate::prober::probe_target;

/// Probe every target and return the findings in completion order.
///
/// Only configuration and client setup can fail; per-target failures just
/// mean no finding.
pub async fn run_scan(
    targets: Vec<Target>,
    catalog: PayloadCatalog,
    config: &ScanConfig,
) -> Result<Vec<Finding>, ScanError> {
    config.validate()?;
    let engine = AttackEngine::new(config)?;
    Ok(run_scan_with_engine(Arc::new(engine), targets, Arc::new(catalog), config).await)
}

/// Same as [`run_scan`] with a prebuilt engine, e.g. one carrying auth.
///
/// At most `config.concurrency` probers are in flight. Findings come back
/// through the join set, so nothing is shared mutably between tasks.
/// Every task runs to completion; a panicking task is logged and dropped.
pub async fn run_scan_with_engine(
    engine: Arc<AttackEngine>,
    targets: Vec<Target>,
    catalog: Arc<PayloadCatalog>,
    config: &ScanConfig,
) -> Vec<Finding> {
    let semaphore = Arc::new(Semaphore::new(config.concurrency.max(1)));
    let settings = config.probe_settings();

    info!(
        "Starting scan on {} targets (concurrency={}, payloads={})",
        targets.len(),
        config.concurrency,
        catalog.total_payloads()
    );

    let mut tasks = JoinSet::new();
    for target in targets {
        let engine = engine.clone();
        let catalog = catalog.clone();
        let semaphore = semaphore.clone();

        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok()?;
            probe_target(&engine, &target, &catalog, settings).await
        });
    }

    let mut findings = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Some(finding)) => findings.push(finding),
            Ok(None) => {}
            Err(e) => error!("Probe task failed: {}", e),
        }
    }

    info!("Scan complete: {} finding(s)", findings.len());
    findings
}
