//! Remote manifest retrieval.

use std::time::Duration;

use reqwest::StatusCode;

use super::ManifestError;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("safekubectl/", env!("CARGO_PKG_VERSION"));

pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Download `url` once the user has agreed to it.
pub fn fetch_url(url: &str, confirm: &mut dyn FnMut(&str) -> bool) -> Result<String, ManifestError> {
    if !confirm(url) {
        return Err(ManifestError::Declined {
            url: url.to_string(),
        });
    }

    let fetch_err = |source: reqwest::Error| ManifestError::Fetch {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(fetch_err)?;

    tracing::debug!(url, "fetching remote manifest");
    let response = client.get(url).send().map_err(fetch_err)?;
    let status = response.status();
    if status != StatusCode::OK {
        return Err(ManifestError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    response.text().map_err(fetch_err)
}
