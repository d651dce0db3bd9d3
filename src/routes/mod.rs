pub mod pages;
pub mod theme;

// ── Route Registration ────────────────────────────────

pub fn routes() -> Vec<rocket::Route> {
    routes![pages::index, pages::site_page, theme::toggle_theme]
}
