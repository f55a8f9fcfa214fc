use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use url::Url;

use crate::credentials::ApiCredentials;
use crate::error::{ClientError, Result};
use crate::signing;
use crate::types::{Application, ApplicationPage, CredentialInfo};

const PAGE_SIZE: u32 = 100;

pub struct VeracodeClient {
    http: reqwest::Client,
    base_url: Url,
    creds: ApiCredentials,
}

impl VeracodeClient {
    /// Client for the region implied by the credentials.
    pub fn new(creds: ApiCredentials, timeout: Duration) -> Result<Self> {
        let base_url = creds.region().base_url();
        Self::with_base_url(base_url, creds, timeout)
    }

    pub fn with_base_url(base_url: &str, creds: ApiCredentials, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("veracode-client/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url,
            creds,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let mut url = self.base_url.join(path)?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    async fn send(&self, method: Method, url: Url) -> Result<String> {
        let auth = signing::authorization_header(&self.creds, method.as_str(), &url)?;
        tracing::debug!(%method, %url, "Veracode API request");
        let resp = self
            .http
            .request(method, url)
            .header("Authorization", auth)
            .header("Accept", "application/json")
            .send()
            .await?;
        handle_response(resp).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let body = self.send(Method::GET, url).await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    pub async fn api_credentials(&self) -> Result<CredentialInfo> {
        let url = self.url("api/authn/v2/api_credentials", &[])?;
        self.get_json(url).await
    }

    /// Application profiles carrying the given legacy numeric id.
    pub async fn applications_by_legacy_id(&self, legacy_id: u64) -> Result<Vec<Application>> {
        let url = self.url(
            "appsec/v1/applications",
            &[("legacy_id", legacy_id.to_string())],
        )?;
        let page: ApplicationPage = self.get_json(url).await?;
        Ok(page.into_applications())
    }

    /// Application profiles whose name matches `name`, across all pages.
    pub async fn applications_by_name(&self, name: &str) -> Result<Vec<Application>> {
        let mut apps = Vec::new();
        let mut page_number = 0u32;
        loop {
            let url = self.url(
                "appsec/v1/applications",
                &[
                    ("name", name.to_string()),
                    ("page", page_number.to_string()),
                    ("size", PAGE_SIZE.to_string()),
                ],
            )?;
            let page: ApplicationPage = self.get_json(url).await?;
            let more = page.has_next();
            apps.extend(page.into_applications());
            if !more {
                break;
            }
            page_number += 1;
        }
        Ok(apps)
    }

    pub async fn link_project(&self, app_guid: &str, project_guid: &str) -> Result<()> {
        let url = self.project_url(app_guid, project_guid)?;
        self.send(Method::PUT, url).await?;
        Ok(())
    }

    pub async fn unlink_project(&self, app_guid: &str, project_guid: &str) -> Result<()> {
        let url = self.project_url(app_guid, project_guid)?;
        self.send(Method::DELETE, url).await?;
        Ok(())
    }

    fn project_url(&self, app_guid: &str, project_guid: &str) -> Result<Url> {
        self.url(
            &format!("srcclr/v3/applications/{app_guid}/projects/{project_guid}"),
            &[],
        )
    }
}

async fn handle_response(resp: reqwest::Response) -> Result<String> {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();

    if !status.is_success() {
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(body)
}
