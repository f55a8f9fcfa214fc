//! Join of the linked-projects export against the legacy inventory.
//!
//! Names are compared exactly (case-sensitive). When the legacy inventory
//! lists a name more than once, the first row wins. Linked projects whose
//! application is absent from the inventory are not carried forward.

use std::collections::HashMap;
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use serde::de::DeserializeOwned;

use crate::error::{RelinkError, Result};
use crate::logging::Sanitized;
use crate::model::{LegacyAppRecord, LinkedProjectRecord, ReconciledRecord};

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let csv_err = |source| RelinkError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(csv_err)?;
    reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, _>>()
        .map_err(csv_err)
}

pub fn read_linked_projects(path: &Path) -> Result<Vec<LinkedProjectRecord>> {
    let records = read_records(path)?;
    tracing::debug!(path = %path.display(), count = records.len(), "Read linked projects");
    Ok(records)
}

/// Legacy inventory keyed by application name.
#[derive(Debug, Default)]
pub struct LegacyIndex {
    by_name: HashMap<String, LegacyAppRecord>,
}

impl LegacyIndex {
    pub fn load(path: &Path) -> Result<Self> {
        let rows: Vec<LegacyAppRecord> = read_records(path)?;
        tracing::debug!(path = %path.display(), count = rows.len(), "Read legacy applications");
        Ok(Self::from_records(rows))
    }

    pub fn from_records(rows: impl IntoIterator<Item = LegacyAppRecord>) -> Self {
        let mut by_name = HashMap::new();
        for row in rows {
            by_name.entry(row.app_name.clone()).or_insert(row);
        }
        Self { by_name }
    }

    pub fn get(&self, app_name: &str) -> Option<&LegacyAppRecord> {
        self.by_name.get(app_name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct Reconciliation {
    /// Matched records, in input order.
    pub records: Vec<ReconciledRecord>,
    /// Names of linked projects' applications with no legacy row.
    pub unmatched: Vec<String>,
}

pub fn reconcile(linked: Vec<LinkedProjectRecord>, index: &LegacyIndex) -> Reconciliation {
    let mut out = Reconciliation::default();
    for record in linked {
        match index.get(&record.app_name) {
            Some(legacy) => {
                tracing::debug!(
                    app = %Sanitized(&record.app_name),
                    legacy_id = %Sanitized(&legacy.legacy_app_id),
                    "Matched application name"
                );
                out.records.push(ReconciledRecord::new(record, legacy));
            }
            None => {
                tracing::debug!(app = %Sanitized(&record.app_name), "No legacy application");
                out.unmatched.push(record.app_name);
            }
        }
    }
    out
}

/// Write reconciled records as CSV.
pub fn write_reconciled(path: &Path, records: &[ReconciledRecord]) -> Result<()> {
    let csv_err = |source| RelinkError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = WriterBuilder::new().from_path(path).map_err(csv_err)?;
    for record in records {
        writer.serialize(record).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| RelinkError::Io {
        path: path.to_path_buf(),
        source,
    })
}
