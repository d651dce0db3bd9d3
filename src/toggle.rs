use crate::dom::{Document, Selector};
use crate::sidebar::TOGGLE_BUTTON_ID;
use crate::storage::Storage;

/// Storage key holding the theme.
pub const THEME_KEY: &str = "theme";

/// Id of the theme button provided by the host page.
pub const THEME_BUTTON_ID: &str = "theme-toggle";

/// Id of the sidebar container provided by the host page.
pub const SIDEBAR_ID: &str = "sidebar";

/// Elements a toggle can touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The `<html>` element.
    Root,
    Sidebar,
    Main,
    /// The icon inside the sidebar collapse button.
    SidebarToggleIcon,
}

impl Target {
    pub fn selector(self) -> Selector<'static> {
        match self {
            Target::Root => Selector::Tag("html"),
            Target::Sidebar => Selector::Id(SIDEBAR_ID),
            Target::Main => Selector::Tag("main"),
            Target::SidebarToggleIcon => Selector::Within { id: TOGGLE_BUTTON_ID, tag: "i" },
        }
    }
}

/// Side effect produced by a transition, applied later by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ToggleClass { target: Target, class: &'static str },
    SetClass { target: Target, class: &'static str, on: bool },
    Persist { key: &'static str, value: &'static str },
}

// ── Sidebar ────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SidebarState {
    #[default]
    Expanded,
    Collapsed,
}

impl SidebarState {
    pub fn as_str(self) -> &'static str {
        match self {
            SidebarState::Expanded => "expanded",
            SidebarState::Collapsed => "collapsed",
        }
    }

    /// Parse a query value. Anything but "collapsed" is the default state.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("collapsed") => SidebarState::Collapsed,
            _ => SidebarState::Expanded,
        }
    }

    pub fn click(self) -> (SidebarState, Vec<Effect>) {
        let next = match self {
            SidebarState::Expanded => SidebarState::Collapsed,
            SidebarState::Collapsed => SidebarState::Expanded,
        };
        let effects = vec![
            Effect::ToggleClass { target: Target::Sidebar, class: "collapsed" },
            Effect::ToggleClass { target: Target::Main, class: "expanded" },
            Effect::ToggleClass { target: Target::SidebarToggleIcon, class: "fa-chevron-left" },
            Effect::ToggleClass { target: Target::SidebarToggleIcon, class: "fa-chevron-right" },
        ];
        (next, effects)
    }
}

// ── Theme ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeState {
    #[default]
    Dark,
    Light,
}

impl ThemeState {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeState::Dark => "dark",
            ThemeState::Light => "light",
        }
    }

    /// Missing or empty means dark; any value other than "dark" means light.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            None | Some("") | Some("dark") => ThemeState::Dark,
            Some(_) => ThemeState::Light,
        }
    }

    /// Initial state and the effects that display it. Never persists.
    pub fn setup(stored: Option<&str>) -> (ThemeState, Vec<Effect>) {
        let state = ThemeState::from_stored(stored);
        let effects = vec![Effect::SetClass {
            target: Target::Root,
            class: "dark",
            on: state == ThemeState::Dark,
        }];
        (state, effects)
    }

    pub fn click(self) -> (ThemeState, Vec<Effect>) {
        let next = match self {
            ThemeState::Dark => ThemeState::Light,
            ThemeState::Light => ThemeState::Dark,
        };
        let effects = vec![
            Effect::ToggleClass { target: Target::Root, class: "dark" },
            Effect::Persist { key: THEME_KEY, value: next.as_str() },
        ];
        (next, effects)
    }
}

/// Apply effects to a document and storage. Class effects on missing
/// elements do nothing.
pub fn apply_effects(doc: &mut Document, storage: &dyn Storage, effects: &[Effect]) {
    for effect in effects {
        match effect {
            Effect::ToggleClass { target, class } => {
                doc.toggle_class(target.selector(), class, None);
            }
            Effect::SetClass { target, class, on } => {
                doc.toggle_class(target.selector(), class, Some(*on));
            }
            Effect::Persist { .. } => {}
        }
    }
    persist_effects(storage, effects);
}

/// Apply only the storage writes, for callers with no document at hand.
pub fn persist_effects(storage: &dyn Storage, effects: &[Effect]) {
    for effect in effects {
        if let Effect::Persist { key, value } = effect {
            storage.set_item(key, value);
        }
    }
}
