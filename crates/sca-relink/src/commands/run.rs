use std::time::Instant;

use anyhow::Result;
use sca_relink::AppConfig;
use sca_relink::executor::execute;
use sca_relink::prompt::StdinConfirm;
use sca_relink::reconcile::{LegacyIndex, read_linked_projects, reconcile};
use veracode_client::VeracodeClient;

use crate::commands::credentials;
use crate::output::{print_tally, print_timings};

pub async fn run(client: &VeracodeClient, cfg: &AppConfig) -> Result<()> {
    let settings = &cfg.run;
    tracing::info!(
        action = %settings.action,
        live = settings.live,
        account_id = %settings.account_id,
        "======== beginning sca-relink run ========"
    );
    credentials::check(client).await?;

    let started = Instant::now();
    let linked = read_linked_projects(&cfg.files.linked_projects)?;
    let index = LegacyIndex::load(&cfg.files.legacy_apps)?;
    let reconciliation = reconcile(linked, &index);
    let reconcile_elapsed = started.elapsed();
    tracing::info!(
        "There are {} application profiles with a legacy id",
        reconciliation.records.len()
    );

    let started = Instant::now();
    let tally = execute(client, &mut StdinConfirm, settings, &reconciliation.records).await;
    let api_elapsed = started.elapsed();

    tracing::info!(
        matched = tally.matched,
        wrong_account = tally.wrong_account,
        not_found = tally.not_found,
        lookup_failed = tally.lookup_failed,
        linked = tally.linked,
        unlinked = tally.unlinked,
        skipped = tally.skipped,
        failed = tally.failed,
        "Run summary"
    );
    print_tally(&tally, settings.action, settings.live);
    print_timings(reconcile_elapsed, api_elapsed);
    tracing::info!("======== ending sca-relink run ========");
    Ok(())
}
