use log::{error, info, warn};
use std::fs;
use std::path::Path;
use std::process;

use crate::config::SiteConfig;
use crate::data::DataSource;
use crate::dom::{Document, Selector};
use crate::sidebar::NAV_ENTRIES;
use crate::toggle::SIDEBAR_ID;

/// Outcome of the boot check.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BootReport {
    pub warnings: u32,
    pub errors: u32,
}

/// Run all boot checks. Call this before Rocket launches.
/// Aborts the process if the site cannot be served at all.
pub fn run(config: &SiteConfig) {
    info!("Folio boot check starting...");

    let report = check(config);

    // ── Summary ─────────────────────────────────────────
    if report.errors > 0 {
        error!(
            "Boot check FAILED: {} error(s), {} warning(s). Aborting.",
            report.errors, report.warnings
        );
        process::exit(1);
    }

    if report.warnings > 0 {
        warn!(
            "Boot check passed with {} warning(s). Some pages may not render.",
            report.warnings
        );
    } else {
        info!("Boot check passed. All systems go.");
    }
}

/// Validate the site root, profile data and navigation pages.
/// Creates the site root when missing.
pub fn check(config: &SiteConfig) -> BootReport {
    let mut report = BootReport::default();
    let root = config.site_root.as_path();

    // ── 1. Site root ───────────────────────────────────
    if !root.exists() {
        match fs::create_dir_all(root) {
            Ok(_) => info!("  Created site root: {}", root.display()),
            Err(e) => {
                error!("  FAILED to create site root {}: {}", root.display(), e);
                report.errors += 1;
                return report;
            }
        }
    } else if !root.is_dir() {
        error!("  Site root is not a directory: {}", root.display());
        report.errors += 1;
        return report;
    }

    // ── 2. Profile data ────────────────────────────────
    match config.data_source() {
        Ok(DataSource::File(path)) => {
            if !path.exists() {
                warn!("  Missing profile data: {} (pages will be served uninitialized)", path.display());
                report.warnings += 1;
            }
        }
        Ok(DataSource::Remote(url)) => info!("  Profile data will be fetched from {}", url),
        Err(e) => {
            error!("  {}", e);
            report.errors += 1;
        }
    }

    // ── 3. Navigation pages ────────────────────────────
    for entry in NAV_ENTRIES.iter() {
        let page = root.join(entry.href);
        match fs::read_to_string(&page) {
            Ok(html) => {
                if !Document::parse(html).exists(Selector::Id(SIDEBAR_ID)) {
                    warn!("  {} has no #{} container (will 500)", entry.href, SIDEBAR_ID);
                    report.warnings += 1;
                }
            }
            Err(_) => {
                warn!("  Missing page for navigation entry '{}': {}", entry.label, page.display());
                report.warnings += 1;
            }
        }
    }

    // ── 4. Rocket.toml exists ──────────────────────────
    if !Path::new("Rocket.toml").exists() {
        warn!("  Rocket.toml not found — using default config");
        report.warnings += 1;
    }

    report
}
