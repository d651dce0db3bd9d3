use std::path::PathBuf;

use log::debug;
use rocket::tokio::fs;
use serde_json::Value;
use url::Url;

/// Location of the profile data document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Remote(Url),
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// Read (or GET) the profile data and parse it as JSON.
/// The document is not validated; any JSON value is accepted.
pub async fn load(source: &DataSource) -> Result<Value, String> {
    debug!("Loading profile data from {}", source);
    let body = match source {
        DataSource::File(path) => fs::read_to_string(path)
            .await
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?,
        DataSource::Remote(url) => fetch(url).await?,
    };
    serde_json::from_str(&body).map_err(|e| format!("invalid JSON in {}: {}", source, e))
}

async fn fetch(url: &Url) -> Result<String, String> {
    let resp = reqwest::get(url.clone())
        .await
        .map_err(|e| format!("request to {} failed: {}", url, e))?;
    let resp = resp
        .error_for_status()
        .map_err(|e| format!("request to {} failed: {}", url, e))?;
    resp.text()
        .await
        .map_err(|e| format!("failed to read body from {}: {}", url, e))
}
