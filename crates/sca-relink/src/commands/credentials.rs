use anyhow::{Context, Result};
use colored::Colorize;
use time::OffsetDateTime;
use veracode_client::{CredentialInfo, VeracodeClient};

use crate::output::print_warning;

const EXPIRY_WARNING_DAYS: i64 = 7;

/// Fetch credential details and log a warning when they expire within a week.
pub async fn check(client: &VeracodeClient) -> Result<(CredentialInfo, i64)> {
    let info = client
        .api_credentials()
        .await
        .context("Failed to read API credential details")?;
    let days = info.days_remaining(OffsetDateTime::now_utc())?;
    if days < EXPIRY_WARNING_DAYS {
        tracing::warn!(expires = %info.expiration_ts, days, "These API credentials expire soon");
    } else {
        tracing::info!(expires = %info.expiration_ts, "API credentials are valid");
    }
    Ok((info, days))
}

pub async fn show(client: &VeracodeClient) -> Result<()> {
    let (info, days) = check(client).await?;
    println!("{}: {}", "API id".cyan(), info.api_id);
    println!("{}: {}", "Endpoint".cyan(), client.base_url());
    println!("{}: {} ({days} days)", "Expires".cyan(), info.expiration_ts);
    if days < EXPIRY_WARNING_DAYS {
        print_warning("Renew these credentials soon");
    }
    Ok(())
}
