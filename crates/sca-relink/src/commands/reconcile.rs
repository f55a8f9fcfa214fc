use std::path::Path;

use anyhow::Result;
use sca_relink::config::FileSettings;
use sca_relink::reconcile::{LegacyIndex, read_linked_projects, reconcile as join, write_reconciled};

use crate::output::{print_records, print_success};

pub fn reconcile(files: &FileSettings, output: Option<&Path>) -> Result<()> {
    let linked = read_linked_projects(&files.linked_projects)?;
    let index = LegacyIndex::load(&files.legacy_apps)?;
    let result = join(linked, &index);
    tracing::info!(
        matched = result.records.len(),
        "There are {} application profiles with a legacy id",
        result.records.len()
    );

    match output {
        Some(path) => {
            write_reconciled(path, &result.records)?;
            print_success(&format!(
                "Wrote {} records to {}",
                result.records.len(),
                path.display()
            ));
        }
        None => print_records(&result.records),
    }
    Ok(())
}
