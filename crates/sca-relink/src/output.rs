use std::time::Duration;

use colored::Colorize;
use sca_relink::model::ReconciledRecord;
use sca_relink::{Action, Tally};
use tabled::builder::Builder;
use tabled::settings::Style;
use veracode_client::Application;

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_warning(msg: &str) {
    println!("{} {}", "!".yellow(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

pub fn print_tally(tally: &Tally, action: Action, live: bool) {
    println!("{}", tally_table(tally, action));

    if !live {
        print_warning("Trial mode: no link/unlink calls were made (use --live)");
    }
}

fn tally_table(tally: &Tally, action: Action) -> String {
    let (done_label, done) = match action {
        Action::Link => ("Linked", tally.linked),
        Action::Unlink => ("Unlinked", tally.unlinked),
    };

    let mut builder = Builder::default();
    builder.push_record(["Outcome", "Count"]);
    builder.push_record(["Matched legacy id".to_string(), tally.matched.to_string()]);
    builder.push_record(["Wrong account".to_string(), tally.wrong_account.to_string()]);
    builder.push_record(["Not found".to_string(), tally.not_found.to_string()]);
    builder.push_record(["Lookup failed".to_string(), tally.lookup_failed.to_string()]);
    builder.push_record(["Attempted".to_string(), tally.attempted.to_string()]);
    builder.push_record([done_label.to_string(), done.to_string()]);
    builder.push_record(["Failed".to_string(), tally.failed.to_string()]);
    builder.push_record(["Skipped".to_string(), tally.skipped.to_string()]);
    builder.build().with(Style::rounded()).to_string()
}

/// Prints both elapsed times and records them in the log.
pub fn print_timings(reconcile: Duration, api: Duration) {
    let reconcile_secs = reconcile.as_secs_f64();
    let api_secs = api.as_secs_f64();
    tracing::info!(
        "Reconciliation took {reconcile_secs:.3} s; API calls took {api_secs:.3} s ({:.2} min)",
        api_secs / 60.0
    );
    println!("{}: {:.3} s", "Reconciliation".cyan(), reconcile_secs);
    println!(
        "{}: {:.3} s ({:.2} min)",
        "API calls".cyan(),
        api_secs,
        api_secs / 60.0
    );
}

pub fn print_records(records: &[ReconciledRecord]) {
    if records.is_empty() {
        println!("No linked projects matched the legacy inventory.");
        return;
    }
    let mut builder = Builder::default();
    builder.push_record(["Application", "Project", "Project GUID", "Legacy ID", "Account"]);
    for r in records {
        builder.push_record([
            r.app_name.as_str(),
            r.project_name.as_str(),
            r.project_guid.as_str(),
            r.legacy_app_id.as_str(),
            r.legacy_account_id.as_str(),
        ]);
    }
    println!("{}", builder.build().with(Style::rounded()));
}

pub fn print_applications(apps: &[Application]) {
    if apps.is_empty() {
        println!("No matches were found.");
        return;
    }
    let mut builder = Builder::default();
    builder.push_record(["#", "Name", "GUID", "Legacy ID"]);
    for (idx, app) in apps.iter().enumerate() {
        builder.push_record([
            (idx + 1).to_string(),
            app.profile.name.clone(),
            app.guid.clone(),
            app.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into()),
        ]);
    }
    println!("{}", builder.build().with(Style::rounded()));
}
