//! Minimal in-place editing of an HTML document string.
//!
//! Elements are located by scanning tags, not by building a tree. Every edit
//! re-locates its target, so a `Selector` stays valid across edits that
//! shift offsets.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Elements that never have a closing tag.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
    /// Element whose `id` attribute equals the value.
    Id(&'a str),
    /// First element with the tag name.
    Tag(&'a str),
    /// First `tag` element inside the element with `id`.
    Within { id: &'a str, tag: &'a str },
}

/// Byte ranges of one element's start tag and end tag.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Located {
    open: Range<usize>,
    close: Range<usize>,
}

impl Located {
    fn inner(&self) -> Range<usize> {
        self.open.end..self.close.start
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    html: String,
}

impl Document {
    pub fn parse(html: impl Into<String>) -> Self {
        Document { html: html.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }

    pub fn exists(&self, selector: Selector<'_>) -> bool {
        self.locate(selector).is_some()
    }

    pub fn inner_html(&self, selector: Selector<'_>) -> Option<&str> {
        let loc = self.locate(selector)?;
        Some(&self.html[loc.inner()])
    }

    /// Replace an element's children. Returns `false` when the element is missing.
    pub fn set_inner_html(&mut self, selector: Selector<'_>, markup: &str) -> bool {
        match self.locate(selector) {
            Some(loc) => {
                self.html.replace_range(loc.inner(), markup);
                true
            }
            None => false,
        }
    }

    pub fn attribute(&self, selector: Selector<'_>, name: &str) -> Option<String> {
        let loc = self.locate(selector)?;
        read_attr(&self.html[loc.open], name)
    }

    /// Set (or add) an attribute on the element's start tag.
    pub fn set_attribute(&mut self, selector: Selector<'_>, name: &str, value: &str) -> bool {
        let Some(loc) = self.locate(selector) else {
            return false;
        };
        let tag = write_attr(&self.html[loc.open.clone()], name, value);
        self.html.replace_range(loc.open, &tag);
        true
    }

    pub fn has_class(&self, selector: Selector<'_>, class: &str) -> bool {
        self.attribute(selector, "class")
            .map(|v| v.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Toggle a class, or force it on/off with `force`.
    /// Returns whether the class is present afterwards, or `None` if the
    /// element is missing.
    pub fn toggle_class(&mut self, selector: Selector<'_>, class: &str, force: Option<bool>) -> Option<bool> {
        let loc = self.locate(selector)?;
        let current = read_attr(&self.html[loc.open.clone()], "class").unwrap_or_default();
        let mut classes: Vec<&str> = current.split_whitespace().collect();
        let present = classes.contains(&class);
        let wanted = force.unwrap_or(!present);
        if wanted == present {
            return Some(present);
        }

        if wanted {
            classes.push(class);
        } else {
            classes.retain(|c| *c != class);
        }

        let tag = write_attr(&self.html[loc.open.clone()], "class", &classes.join(" "));
        self.html.replace_range(loc.open, &tag);
        Some(wanted)
    }

    /// Insert markup just before `</body>`, or at the end when there is none.
    pub fn append_to_body(&mut self, markup: &str) {
        let at = self
            .html
            .to_ascii_lowercase()
            .rfind("</body")
            .unwrap_or(self.html.len());
        self.html.insert_str(at, markup);
    }

    fn locate(&self, selector: Selector<'_>) -> Option<Located> {
        match selector {
            Selector::Id(id) => locate_by_id(&self.html, id, 0..self.html.len()),
            Selector::Tag(tag) => locate_by_tag(&self.html, tag, 0..self.html.len()),
            Selector::Within { id, tag } => {
                let parent = locate_by_id(&self.html, id, 0..self.html.len())?;
                locate_by_tag(&self.html, tag, parent.inner())
            }
        }
    }
}

/// Any start or end tag. Group 1 is `/` for end tags, group 2 the name.
static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9-]*)(?:\s[^>]*)?/?>").expect("tag pattern is valid")
});

/// A quoted attribute inside a start tag. Group 1 is the name, 2 or 3 the value.
static ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("attribute pattern is valid")
});

/// Start and end tags in `html[within]`, as (is_end, name, absolute range).
fn tags(html: &str, within: Range<usize>) -> impl Iterator<Item = (bool, &str, Range<usize>)> {
    let offset = within.start;
    TAG.captures_iter(&html[within]).filter_map(move |caps| {
        let whole = caps.get(0)?;
        let is_end = caps.get(1).map(|c| !c.as_str().is_empty()).unwrap_or(false);
        let name = caps.get(2)?.as_str();
        Some((is_end, name, (offset + whole.start())..(offset + whole.end())))
    })
}

fn locate_by_id(html: &str, id: &str, within: Range<usize>) -> Option<Located> {
    let limit = within.end;
    let (name, open) = tags(html, within)
        .find(|(is_end, _, range)| !is_end && read_attr(&html[range.clone()], "id").as_deref() == Some(id))
        .map(|(_, name, range)| (name.to_ascii_lowercase(), range))?;
    close_for(html, &name, open, limit)
}

fn locate_by_tag(html: &str, tag: &str, within: Range<usize>) -> Option<Located> {
    let limit = within.end;
    let open = tags(html, within)
        .find(|(is_end, name, _)| !is_end && name.eq_ignore_ascii_case(tag))
        .map(|(_, _, range)| range)?;
    close_for(html, &tag.to_ascii_lowercase(), open, limit)
}

/// Find the end tag matching the start tag at `open`, honouring nesting of
/// same-named elements.
fn close_for(html: &str, tag: &str, open: Range<usize>, limit: usize) -> Option<Located> {
    if VOID_TAGS.contains(&tag) || html[open.clone()].ends_with("/>") {
        let end = open.end;
        return Some(Located { open, close: end..end });
    }

    let mut depth = 1usize;
    for (is_end, name, range) in tags(html, open.end..limit) {
        if !name.eq_ignore_ascii_case(tag) {
            continue;
        }
        if is_end {
            depth -= 1;
            if depth == 0 {
                return Some(Located { open, close: range });
            }
        } else if !html[range].ends_with("/>") {
            depth += 1;
        }
    }
    None
}

/// The quoted attribute `name` in a start tag: its whole range and value.
fn find_attr(start_tag: &str, name: &str) -> Option<(Range<usize>, String)> {
    ATTR.captures_iter(start_tag).find_map(|caps| {
        if !caps.get(1)?.as_str().eq_ignore_ascii_case(name) {
            return None;
        }
        let value = caps.get(2).or_else(|| caps.get(3))?.as_str().to_string();
        Some((caps.get(0)?.range(), value))
    })
}

fn read_attr(start_tag: &str, name: &str) -> Option<String> {
    find_attr(start_tag, name).map(|(_, value)| value)
}

fn write_attr(start_tag: &str, name: &str, value: &str) -> String {
    let attr = format!(" {}=\"{}\"", name, html_escape(value));
    let mut tag = start_tag.to_string();
    if let Some((range, _)) = find_attr(start_tag, name) {
        tag.replace_range(range, &attr);
        return tag;
    }
    let at = if start_tag.ends_with("/>") {
        start_tag.len() - 2
    } else {
        start_tag.len() - 1
    };
    tag.insert_str(at, &attr);
    tag
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
