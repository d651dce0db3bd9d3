use std::path::PathBuf;

use log::{debug, error};
use rocket::http::uri::fmt::Path;
use rocket::http::uri::Segments;
use rocket::http::{CookieJar, Status};
use rocket::request::FromSegments;
use rocket::response::content::RawHtml;
use rocket::tokio::fs;
use rocket::State;

use crate::config::SiteConfig;
use crate::data;
use crate::page::{self, PageContext};
use crate::sidebar;
use crate::storage::CookieStorage;
use crate::toggle::SidebarState;

/// A request path naming an `.html` file. Anything else forwards to the
/// static file server.
pub struct PagePath(pub PathBuf);

impl<'r> FromSegments<'r> for PagePath {
    type Error = &'static str;

    fn from_segments(segments: Segments<'r, Path>) -> Result<Self, Self::Error> {
        let path = segments.to_path_buf(false).map_err(|_| "invalid path")?;
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("html") => Ok(PagePath(path)),
            _ => Err("not an html page"),
        }
    }
}

// ── Pages ──────────────────────────────────────────────

#[get("/?<sidebar>")]
pub async fn index(
    config: &State<SiteConfig>,
    cookies: &CookieJar<'_>,
    sidebar: Option<String>,
) -> Result<RawHtml<String>, Status> {
    serve_page(config, cookies, PathBuf::from("index.html"), "/", sidebar.as_deref()).await
}

#[get("/<page..>?<sidebar>")]
pub async fn site_page(
    config: &State<SiteConfig>,
    cookies: &CookieJar<'_>,
    page: PagePath,
    sidebar: Option<String>,
) -> Result<RawHtml<String>, Status> {
    let request_path = format!(
        "/{}",
        page.0
            .iter()
            .map(|c| c.to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    );
    serve_page(config, cookies, page.0, &request_path, sidebar.as_deref()).await
}

async fn serve_page(
    config: &SiteConfig,
    cookies: &CookieJar<'_>,
    relative: PathBuf,
    request_path: &str,
    sidebar_state: Option<&str>,
) -> Result<RawHtml<String>, Status> {
    let file = config.page_path(&relative);
    let html = match fs::read_to_string(&file).await {
        Ok(html) => html,
        Err(e) => {
            debug!("No page at {}: {}", file.display(), e);
            return Err(Status::NotFound);
        }
    };

    let source = config.data_source().map_err(|e| {
        error!("{}", e);
        Status::InternalServerError
    })?;

    // Without data the page is served as stored, uninitialized.
    let data = match data::load(&source).await {
        Ok(data) => data,
        Err(e) => {
            error!("Serving {} uninitialized: {}", request_path, e);
            return Ok(RawHtml(html));
        }
    };

    let file_name = relative.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let active_page = sidebar::active_page_for(file_name);
    let storage = CookieStorage::new(cookies, config.theme_cookie_days);
    let ctx = PageContext {
        path: request_path,
        sidebar: SidebarState::from_query(sidebar_state),
        storage: &storage,
    };

    page::init_page(&html, &data, &active_page, &ctx)
        .map(RawHtml)
        .map_err(|e| {
            error!("Failed to initialize {}: {}", request_path, e);
            Status::InternalServerError
        })
}
