use anyhow::Result;
use veracode_client::VeracodeClient;

use crate::output::print_applications;

pub async fn find(client: &VeracodeClient, name: &str) -> Result<()> {
    let apps = client.applications_by_name(name).await?;
    tracing::debug!(name, count = apps.len(), "Application search");
    print_applications(&apps);
    Ok(())
}
