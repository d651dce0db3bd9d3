use log::info;
use rocket::form::Form;
use rocket::http::uri::Origin;
use rocket::http::CookieJar;
use rocket::response::Redirect;
use rocket::State;

use crate::config::SiteConfig;
use crate::storage::{CookieStorage, Storage};
use crate::toggle::{persist_effects, ThemeState, THEME_KEY};

#[derive(FromForm)]
pub struct ThemeForm {
    pub return_to: Option<String>,
}

// ── Theme toggle ───────────────────────────────────────

#[post("/theme", data = "<form>")]
pub fn toggle_theme(config: &State<SiteConfig>, cookies: &CookieJar<'_>, form: Form<ThemeForm>) -> Redirect {
    let storage = CookieStorage::new(cookies, config.theme_cookie_days);
    let current = ThemeState::from_stored(storage.get_item(THEME_KEY).as_deref());
    let (next, effects) = current.click();
    persist_effects(&storage, &effects);
    info!("Theme switched from {} to {}", current.as_str(), next.as_str());

    Redirect::to(safe_return_path(form.return_to.as_deref()))
}

/// Only local absolute paths that parse as an origin URI are followed;
/// everything else goes home.
pub fn safe_return_path(return_to: Option<&str>) -> String {
    match return_to {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && Origin::parse(path).is_ok() =>
        {
            path.to_string()
        }
        _ => "/".to_string(),
    }
}
