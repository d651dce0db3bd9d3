/// One link in the sidebar navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEntry {
    pub href: &'static str,
    pub icon: &'static str,
    pub label: &'static str,
    pub page: &'static str,
}

/// Site pages in sidebar order.
pub static NAV_ENTRIES: [NavEntry; 7] = [
    NavEntry { href: "index.html", icon: "fa-home", label: "Summary", page: "summary" },
    NavEntry { href: "projects.html", icon: "fa-code", label: "Projects", page: "projects" },
    NavEntry { href: "education.html", icon: "fa-graduation-cap", label: "Education", page: "education" },
    NavEntry { href: "skills.html", icon: "fa-cogs", label: "Skills", page: "skills" },
    NavEntry { href: "languages.html", icon: "fa-language", label: "Languages", page: "languages" },
    NavEntry { href: "certifications.html", icon: "fa-certificate", label: "Certifications", page: "certifications" },
    NavEntry { href: "experience.html", icon: "fa-briefcase", label: "Experience", page: "experience" },
];

pub const AVATAR_URL: &str = "https://avatars.githubusercontent.com/u/181269757?v=4";

/// Id of the collapse button inside the sidebar fragment.
pub const TOGGLE_BUTTON_ID: &str = "toggle-sidebar";

/// Look up the navigation entry linking to `file_name` (e.g. "projects.html").
pub fn entry_for_href(file_name: &str) -> Option<&'static NavEntry> {
    NAV_ENTRIES.iter().find(|e| e.href == file_name)
}

/// Active-page value for a requested file: the matching entry's `page`,
/// otherwise the file stem, which marks nothing.
pub fn active_page_for(file_name: &str) -> String {
    match entry_for_href(file_name) {
        Some(entry) => entry.page.to_string(),
        None => file_name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(file_name)
            .to_string(),
    }
}

/// Build the sidebar markup. Placeholders are left for the template renderer.
pub fn build_sidebar(active_page: &str) -> String {
    let contact_icons = r#"
    <div class="contact-icons flex justify-center gap-4 text-xl my-4">
      <a href="mailto:{{contact.email}}" title="{{contact.email}}"><i class="fas fa-envelope"></i></a>
      <a href="https://{{contact.linkedin}}" target="_blank" title="LinkedIn"><i class="fab fa-linkedin"></i></a>
      <a href="https://{{contact.github}}" target="_blank" title="GitHub"><i class="fab fa-github"></i></a>
      <span title="{{location}}"><i class="fas fa-map-marker-alt"></i></span>
    </div>
  "#;

    let nav_html: String = NAV_ENTRIES.iter().map(|entry| build_nav_link(entry, active_page)).collect();

    format!(
        r#"
    <div class="sidebar-header flex flex-col items-center text-center">
        <img
            src="{avatar}"
            alt="abstract profile avatar"
            class="w-24 h-24 rounded-full object-cover border-2 border-gray-200 dark:border-gray-700"
        >
        <h2 class="text-2xl font-medium mt-4">
            {{{{name}}}}
        </h2>
        <p class="text-gray-600 dark:text-gray-400 text-sm break-words">
            {{{{title}}}}
        </p>
    </div>

    {contact_icons}
    <nav class="mt-6 flex flex-col space-y-2">
      {nav_html}
    </nav>
    <div class="mt-auto pt-6 flex justify-between items-center">
      <button id="{toggle_id}" class="text-gray-500 hover:text-black dark:hover:text-white">
        <i class="fas fa-chevron-left"></i>
      </button>
    </div>
  "#,
        avatar = AVATAR_URL,
        contact_icons = contact_icons,
        nav_html = nav_html,
        toggle_id = TOGGLE_BUTTON_ID,
    )
}

fn build_nav_link(entry: &NavEntry, active_page: &str) -> String {
    let active = if entry.page == active_page { "active" } else { "" };
    format!(
        r#"
    <a href="{href}" class="nav-link {active}">
      <i class="fas {icon} w-6"></i>
      <span class="nav-label">{label}</span>
    </a>
  "#,
        href = entry.href,
        active = active,
        icon = entry.icon,
        label = entry.label,
    )
}
