use serde_json::Value;

use crate::dom::{html_escape, Document, Selector};
use crate::sidebar::{build_sidebar, TOGGLE_BUTTON_ID};
use crate::storage::Storage;
use crate::template::render_template;
use crate::toggle::{apply_effects, SidebarState, ThemeState, SIDEBAR_ID, THEME_BUTTON_ID, THEME_KEY};

const SIDEBAR_FORM_ID: &str = "toggle-sidebar-form";
const THEME_FORM_ID: &str = "theme-toggle-form";

/// Endpoint that flips the stored theme.
pub const THEME_ENDPOINT: &str = "/theme";

/// Per-request inputs for page setup.
pub struct PageContext<'a> {
    /// Request path the page was served from, e.g. `/projects.html`.
    pub path: &'a str,
    pub sidebar: SidebarState,
    pub storage: &'a dyn Storage,
}

impl PageContext<'_> {
    /// URL that reproduces the current view.
    pub fn location(&self) -> String {
        match self.sidebar {
            SidebarState::Expanded => self.path.to_string(),
            SidebarState::Collapsed => format!("{}?sidebar={}", self.path, self.sidebar.as_str()),
        }
    }
}

/// Fill a page with the sidebar and profile data, then set up both toggles.
/// Fails when the page has no sidebar container.
pub fn init_page(html: &str, data: &Value, active_page: &str, ctx: &PageContext<'_>) -> Result<String, String> {
    let mut doc = Document::parse(html);

    let sidebar_html = render_template(&build_sidebar(active_page), data);
    if !doc.set_inner_html(Selector::Id(SIDEBAR_ID), &sidebar_html) {
        return Err(format!("page {} has no #{} container", ctx.path, SIDEBAR_ID));
    }

    let main = doc
        .inner_html(Selector::Tag("main"))
        .map(|inner| render_template(inner, data));
    if let Some(rendered) = main {
        doc.set_inner_html(Selector::Tag("main"), &rendered);
    }

    setup_sidebar_toggle(&mut doc, ctx);
    setup_theme_toggle(&mut doc, ctx);

    Ok(doc.into_html())
}

fn setup_sidebar_toggle(doc: &mut Document, ctx: &PageContext<'_>) {
    if !doc.exists(Selector::Id(TOGGLE_BUTTON_ID)) {
        return;
    }

    // The page starts expanded; replay the click that got the visitor here.
    let mut state = SidebarState::default();
    if state != ctx.sidebar {
        let (next, effects) = state.click();
        apply_effects(doc, ctx.storage, &effects);
        state = next;
    }

    let (next, _) = state.click();
    let form = format!(
        r#"<form id="{id}" method="get" action="{action}" hidden><input type="hidden" name="sidebar" value="{value}"></form>"#,
        id = SIDEBAR_FORM_ID,
        action = html_escape(ctx.path),
        value = next.as_str(),
    );
    wire_button(doc, TOGGLE_BUTTON_ID, SIDEBAR_FORM_ID, &form);
}

fn setup_theme_toggle(doc: &mut Document, ctx: &PageContext<'_>) {
    if !doc.exists(Selector::Id(THEME_BUTTON_ID)) {
        return;
    }

    let stored = ctx.storage.get_item(THEME_KEY);
    let (_, effects) = ThemeState::setup(stored.as_deref());
    apply_effects(doc, ctx.storage, &effects);

    let form = format!(
        r#"<form id="{id}" method="post" action="{action}" hidden><input type="hidden" name="return_to" value="{back}"></form>"#,
        id = THEME_FORM_ID,
        action = THEME_ENDPOINT,
        back = html_escape(&ctx.location()),
    );
    wire_button(doc, THEME_BUTTON_ID, THEME_FORM_ID, &form);
}

/// Make a button submit a hidden form appended to the body.
fn wire_button(doc: &mut Document, button_id: &str, form_id: &str, form: &str) {
    let button = Selector::Id(button_id);
    doc.set_attribute(button, "type", "submit");
    doc.set_attribute(button, "form", form_id);
    doc.append_to_body(form);
}
