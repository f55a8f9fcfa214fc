//! Per-record lookup, confirmation and link/unlink.

use serde::Serialize;

use crate::config::{Action, RunSettings};
use crate::logging::Sanitized;
use crate::model::{ApplicationProfile, ReconciledRecord};
use crate::platform::ScaPlatform;
use crate::prompt::{Answer, Confirm};

/// Outcome counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub matched: usize,
    pub wrong_account: usize,
    pub not_found: usize,
    pub lookup_failed: usize,
    pub linked: usize,
    pub unlinked: usize,
    pub skipped: usize,
    pub attempted: usize,
    pub failed: usize,
}

fn question(action: Action, record: &ReconciledRecord, profile: &ApplicationProfile) -> String {
    let (verb, preposition) = match action {
        Action::Link => ("link", "to"),
        Action::Unlink => ("unlink", "from"),
    };
    format!(
        "About to {verb} SCA project {} {preposition} application {} ({}). Are you sure?",
        Sanitized(&record.project_name),
        Sanitized(&profile.name),
        profile.guid
    )
}

/// Apply `settings.action` to every reconciled record.
///
/// Records owned by another account never reach the API. Unless the run is
/// live and the operator agreed, a record is counted as skipped. Failures are
/// logged and counted; they never stop the run.
pub async fn execute<P, C>(
    platform: &P,
    confirm: &mut C,
    settings: &RunSettings,
    records: &[ReconciledRecord],
) -> Tally
where
    P: ScaPlatform + ?Sized,
    C: Confirm + ?Sized,
{
    let mut tally = Tally {
        matched: records.len(),
        ..Tally::default()
    };
    let mut ask = !settings.assume_yes;

    for record in records {
        let app = Sanitized(&record.app_name);

        if record.legacy_account_id != settings.account_id {
            tracing::warn!(
                %app,
                account = %Sanitized(&record.legacy_account_id),
                expected = %settings.account_id,
                "Application belongs to another account; skipped"
            );
            tally.wrong_account += 1;
            continue;
        }

        let legacy_id: u64 = match record.legacy_app_id.trim().parse() {
            Ok(id) => id,
            Err(_) => {
                tracing::error!(%app, legacy_id = %Sanitized(&record.legacy_app_id), "Legacy id is not numeric");
                tally.lookup_failed += 1;
                continue;
            }
        };

        let profiles = match platform.find_by_legacy_id(legacy_id).await {
            Ok(profiles) => profiles,
            Err(e) => {
                tracing::error!(%app, legacy_id, error = %e, "Application lookup failed");
                tally.lookup_failed += 1;
                continue;
            }
        };

        let profile = match profiles.as_slice() {
            [] => {
                tracing::warn!(%app, legacy_id, "No application profile for legacy id");
                tally.not_found += 1;
                continue;
            }
            [only] => only,
            [first, ..] => {
                tracing::warn!(
                    %app,
                    legacy_id,
                    count = profiles.len(),
                    guid = %first.guid,
                    "Several application profiles share this legacy id; using the first"
                );
                first
            }
        };
        tracing::info!(%app, legacy_id, guid = %profile.guid, "Resolved application profile");
        if let Some(owner) = &profile.account_id
            && *owner != record.legacy_account_id
        {
            tracing::debug!(
                %app,
                profile_account = %owner,
                inventory_account = %Sanitized(&record.legacy_account_id),
                "Profile account differs from legacy inventory"
            );
        }

        let answer = if ask {
            let prompt = question(settings.action, record, profile);
            tracing::info!("{prompt}");
            let answer = confirm.ask(&prompt);
            tracing::info!(?answer, "Operator answered");
            if answer == Answer::All {
                ask = false;
            }
            answer
        } else {
            Answer::All
        };

        if !(settings.live && answer.proceeds()) {
            tracing::info!(
                project = %Sanitized(&record.project_name),
                live = settings.live,
                "Skipping {} of SCA project",
                settings.action
            );
            tally.skipped += 1;
            continue;
        }

        tally.attempted += 1;
        let result = match settings.action {
            Action::Link => platform.link_project(&profile.guid, &record.project_guid).await,
            Action::Unlink => {
                platform
                    .unlink_project(&profile.guid, &record.project_guid)
                    .await
            }
        };
        match result {
            Ok(()) => {
                tracing::info!(
                    project = %Sanitized(&record.project_name),
                    project_guid = %Sanitized(&record.project_guid),
                    application = %Sanitized(&profile.name),
                    "SCA project {}ed",
                    settings.action
                );
                match settings.action {
                    Action::Link => tally.linked += 1,
                    Action::Unlink => tally.unlinked += 1,
                }
            }
            Err(e) => {
                tracing::error!(
                    project_guid = %Sanitized(&record.project_guid),
                    app_guid = %profile.guid,
                    error = %e,
                    "Failed to {} SCA project",
                    settings.action
                );
                tally.failed += 1;
            }
        }
    }

    tally
}
