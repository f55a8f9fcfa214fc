use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::error::{ClientError, Result};

const EXPIRATION_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond][offset_hour sign:mandatory][offset_minute]"
);

/// Introspection of the API key in use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialInfo {
    pub api_id: String,
    pub expiration_ts: String,
}

impl CredentialInfo {
    pub fn expires_at(&self) -> Result<OffsetDateTime> {
        OffsetDateTime::parse(&self.expiration_ts, EXPIRATION_FORMAT).map_err(|e| {
            ClientError::Timestamp {
                value: self.expiration_ts.clone(),
                reason: e.to_string(),
            }
        })
    }

    pub fn days_remaining(&self, now: OffsetDateTime) -> Result<i64> {
        Ok((self.expires_at()? - now).whole_days())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationProfileInfo {
    pub name: String,
}

/// An application profile as returned by `/appsec/v1/applications`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub guid: String,
    /// Legacy numeric id.
    #[serde(default)]
    pub id: Option<u64>,
    /// Owning organization (account) id.
    #[serde(default)]
    pub oid: Option<u64>,
    pub profile: ApplicationProfileInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApplicationPage {
    #[serde(rename = "_embedded")]
    pub embedded: Option<EmbeddedApplications>,
    #[serde(default)]
    pub page: Option<PageInfo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EmbeddedApplications {
    #[serde(default)]
    pub applications: Vec<Application>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PageInfo {
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub total_pages: u32,
}

impl ApplicationPage {
    pub fn into_applications(self) -> Vec<Application> {
        self.embedded.map(|e| e.applications).unwrap_or_default()
    }

    pub fn has_next(&self) -> bool {
        self.page
            .as_ref()
            .is_some_and(|p| p.number + 1 < p.total_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn parses_expiration_timestamp() {
        let info = CredentialInfo {
            api_id: "abc".into(),
            expiration_ts: "2026-10-25T12:00:00.000+0000".into(),
        };
        assert_eq!(info.expires_at().unwrap(), datetime!(2026-10-25 12:00:00 UTC));
        assert_eq!(
            info.days_remaining(datetime!(2026-10-19 12:00:00 UTC)).unwrap(),
            6
        );
    }

    #[test]
    fn rejects_malformed_expiration() {
        let info = CredentialInfo {
            api_id: "abc".into(),
            expiration_ts: "next tuesday".into(),
        };
        assert!(matches!(
            info.expires_at(),
            Err(ClientError::Timestamp { .. })
        ));
    }

    #[test]
    fn missing_embedded_block_is_empty() {
        let page: ApplicationPage =
            serde_json::from_str(r#"{"page":{"number":0,"size":50,"total_elements":0,"total_pages":0}}"#)
                .unwrap();
        assert!(!page.has_next());
        assert!(page.into_applications().is_empty());
    }

    #[test]
    fn page_info_drives_pagination() {
        let page: ApplicationPage = serde_json::from_str(
            r#"{"_embedded":{"applications":[{"guid":"g","profile":{"name":"A"}}]},
                "page":{"number":0,"total_pages":2}}"#,
        )
        .unwrap();
        assert!(page.has_next());
        let apps = page.into_applications();
        assert_eq!(apps[0].guid, "g");
        assert_eq!(apps[0].oid, None);
    }
}
