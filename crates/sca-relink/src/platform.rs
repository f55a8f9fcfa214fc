use async_trait::async_trait;
use veracode_client::{ClientError, VeracodeClient};

use crate::model::ApplicationProfile;

/// The vendor operations the executor depends on.
#[async_trait]
pub trait ScaPlatform {
    async fn find_by_legacy_id(&self, legacy_id: u64) -> Result<Vec<ApplicationProfile>, ClientError>;

    async fn link_project(&self, app_guid: &str, project_guid: &str) -> Result<(), ClientError>;

    async fn unlink_project(&self, app_guid: &str, project_guid: &str) -> Result<(), ClientError>;
}

#[async_trait]
impl ScaPlatform for VeracodeClient {
    async fn find_by_legacy_id(&self, legacy_id: u64) -> Result<Vec<ApplicationProfile>, ClientError> {
        let apps = self.applications_by_legacy_id(legacy_id).await?;
        Ok(apps.into_iter().map(ApplicationProfile::from).collect())
    }

    async fn link_project(&self, app_guid: &str, project_guid: &str) -> Result<(), ClientError> {
        VeracodeClient::link_project(self, app_guid, project_guid).await
    }

    async fn unlink_project(&self, app_guid: &str, project_guid: &str) -> Result<(), ClientError> {
        VeracodeClient::unlink_project(self, app_guid, project_guid).await
    }
}
