use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/115.0 Safari/537.36";
const TIMEOUT: Duration = Duration::from_secs(20);

/// Fetch the source page body. Transport errors, timeouts and non-2xx
/// statuses all collapse to None; the caller decides whether to halt.
pub fn fetch_page(url: &str) -> Option<String> {
    match try_fetch(url) {
        Ok(body) => Some(body),
        Err(e) => {
            warn!("Error fetching web page: {e:#}");
            None
        }
    }
}

fn try_fetch(url: &str) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(TIMEOUT)
        .build()?;

    info!("Fetching source page: {}", url);
    let body = client
        .get(url)
        .send()?
        .error_for_status()?
        .text()
        .with_context(|| format!("Failed to read response body from {url}"))?;
    Ok(body)
}
