// src/capture.rs
use log::info;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::engine::{PacketRecord, TrafficEngine};

const FETCH_TIMEOUT: Duration = Duration::from_secs(3);

/// Why a forced capture produced no record. In every case the engine is
/// left untouched.
#[derive(Debug)]
pub enum CaptureError {
    /// No target URL was supplied.
    EmptyTarget,
    /// The target could not be parsed as a URL.
    InvalidUrl(String),
    /// The target was unreachable or the request failed.
    Fetch(reqwest::Error),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::EmptyTarget => write!(f, "capture target URL is required"),
            CaptureError::InvalidUrl(url) => write!(f, "invalid capture target URL: {}", url),
            CaptureError::Fetch(e) => write!(f, "capture fetch failed: {}", e),
        }
    }
}

impl std::error::Error for CaptureError {}

impl From<reqwest::Error> for CaptureError {
    fn from(e: reqwest::Error) -> Self {
        CaptureError::Fetch(e)
    }
}

fn port_from_url(url: &reqwest::Url) -> u16 {
    url.port().unwrap_or(if url.scheme() == "https" { 443 } else { 80 })
}

/// Fetches an arbitrary URL and records the response summary as a forced
/// packet, bypassing the active gate. The source label is fixed to
/// `external-server`; the port is taken from the URL.
pub async fn capture_url(
    engine: &Arc<TrafficEngine>,
    target_url: &str,
) -> Result<PacketRecord, CaptureError> {
    let target_url = target_url.trim();
    if target_url.is_empty() {
        return Err(CaptureError::EmptyTarget);
    }
    let url = reqwest::Url::parse(target_url)
        .map_err(|_| CaptureError::InvalidUrl(target_url.to_string()))?;

    let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
    let resp = client.get(url.clone()).send().await?;
    let status = resp.status().as_u16();
    let size = resp.bytes().await?.len();

    let payload = format!("URL {} response {} | size {}", target_url, status, size);
    info!("[CAPTURE] {} code={} size={}", target_url, status, size);

    // submit with force=true always records, so the unwrap cannot fire.
    let record = engine
        .submit("external-server", port_from_url(&url), &payload, true)
        .unwrap_or_else(|| unreachable!("forced submit always records"));
    Ok(record)
}
