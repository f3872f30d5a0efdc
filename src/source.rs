//! Score sheet loading from a local path or an HTTP(S) URL

use crate::error::{Result, StandingsError};
use std::path::Path;

fn is_url(location: &str) -> bool {
    let lower = location.to_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Fetch a URL body as text
pub fn fetch_url(url: &str) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| StandingsError::Http(format!("Failed to create HTTP client: {}", e)))?;

    let response = client
        .get(url)
        .header("Accept", "text/csv,text/plain;q=0.9,*/*;q=0.8")
        .send()
        .map_err(|e| StandingsError::SourceUnavailable(format!("{}: {}", url, e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(StandingsError::SourceUnavailable(format!(
            "{}: HTTP {} {}",
            url,
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        )));
    }

    response
        .text()
        .map_err(|e| StandingsError::SourceUnavailable(format!("{}: {}", url, e)))
}

/// Read the sheet text; a missing source or a blank body is an error
pub fn read_source(location: &str) -> Result<String> {
    let text = if is_url(location) {
        log::info!("Fetching score sheet from {}", location);
        fetch_url(location)?
    } else {
        let path = Path::new(location);
        std::fs::read_to_string(path).map_err(|e| {
            StandingsError::SourceUnavailable(format!("{}: {}", path.display(), e))
        })?
    };

    if text.trim().is_empty() {
        return Err(StandingsError::EmptySource);
    }
    Ok(text)
}
