use serde::{Deserialize, Serialize};

/// Row of the linked-projects export: an application and one SCA project
/// currently linked to it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LinkedProjectRecord {
    pub app_name: String,
    pub project_guid: String,
    pub project_name: String,
}

/// Row of the legacy inventory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LegacyAppRecord {
    #[serde(rename = "APP_NAME")]
    pub app_name: String,
    #[serde(rename = "APP_ID")]
    pub legacy_app_id: String,
    #[serde(rename = "ACCOUNT_ID")]
    pub account_id: String,
}

/// A linked project that found its legacy application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciledRecord {
    pub app_name: String,
    pub project_guid: String,
    pub project_name: String,
    pub legacy_app_id: String,
    pub legacy_account_id: String,
}

impl ReconciledRecord {
    pub fn new(linked: LinkedProjectRecord, legacy: &LegacyAppRecord) -> Self {
        Self {
            app_name: linked.app_name,
            project_guid: linked.project_guid,
            project_name: linked.project_name,
            legacy_app_id: legacy.legacy_app_id.clone(),
            legacy_account_id: legacy.account_id.clone(),
        }
    }
}

/// Current application profile resolved from a legacy id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationProfile {
    pub guid: String,
    pub name: String,
    pub account_id: Option<String>,
}

impl From<veracode_client::Application> for ApplicationProfile {
    fn from(app: veracode_client::Application) -> Self {
        Self {
            guid: app.guid,
            name: app.profile.name,
            account_id: app.oid.map(|oid| oid.to_string()),
        }
    }
}
