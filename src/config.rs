use std::path::{Path, PathBuf};

use rocket::figment::Figment;
use serde::Deserialize;
use url::Url;

use crate::data::DataSource;

/// Site settings, read from Rocket's figment (`Rocket.toml` and `ROCKET_*`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory holding the HTML pages and static assets.
    pub site_root: PathBuf,
    /// Profile data location, relative to `site_root`.
    pub data_path: String,
    /// When set, profile data is fetched from this URL instead of `data_path`.
    pub data_url: Option<String>,
    /// Lifetime of the theme cookie.
    pub theme_cookie_days: i64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            site_root: PathBuf::from("website"),
            data_path: "data/data.json".to_string(),
            data_url: None,
            theme_cookie_days: 365,
        }
    }
}

impl SiteConfig {
    pub fn from_figment(figment: &Figment) -> Result<Self, String> {
        figment
            .extract::<SiteConfig>()
            .map_err(|e| format!("invalid site configuration: {}", e))
    }

    /// Where profile data comes from. Fails on an unparsable `data_url`.
    pub fn data_source(&self) -> Result<DataSource, String> {
        match self.data_url.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Url::parse(raw)
                .map(DataSource::Remote)
                .map_err(|e| format!("invalid data_url {:?}: {}", raw, e)),
            _ => Ok(DataSource::File(self.site_root.join(&self.data_path))),
        }
    }

    pub fn page_path(&self, relative: &Path) -> PathBuf {
        self.site_root.join(relative)
    }
}
