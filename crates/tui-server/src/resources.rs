//! Resource URIs served by `tui-builder`.

use crate::docs::{self, css};

const WIDGETS: &str = "tui://widgets/";
const CONTAINERS: &str = "tui://containers/";
const CSS_PROPERTIES: &str = "tui://css/properties";
const CSS_SELECTORS: &str = "tui://css/selectors";
const CSS_VARIABLES: &str = "tui://css/variables";
const LAYOUT_PATTERNS: &str = "tui://patterns/layouts";

/// A listed resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    /// Resource URI
    pub uri: String,
    /// Display name
    pub name: String,
    /// Summary shown to clients
    pub description: String,
}

impl ResourceEntry {
    fn new(uri: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Every concrete resource, reference pages first.
#[must_use]
pub fn entries() -> Vec<ResourceEntry> {
    let mut entries = vec![
        ResourceEntry::new(CSS_PROPERTIES, "CSS Properties", "Supported CSS properties with values and examples"),
        ResourceEntry::new(CSS_SELECTORS, "CSS Selectors", "Selector forms for styling and queries"),
        ResourceEntry::new(CSS_VARIABLES, "CSS Variables", "Theme color variables"),
        ResourceEntry::new(LAYOUT_PATTERNS, "Layout Patterns", "Runnable layout recipes"),
    ];
    entries.extend(docs::widgets().values().map(|doc| {
        ResourceEntry::new(format!("{WIDGETS}{}", doc.name), doc.name, doc.description)
    }));
    entries.extend(docs::containers().values().map(|doc| {
        ResourceEntry::new(format!("{CONTAINERS}{}", doc.name), doc.name, doc.description)
    }));
    entries
}

/// Markdown text for `uri`, or `None` if the URI is not served.
///
/// Unknown component names under the widget and container prefixes still
/// resolve, to a notice listing the available names.
///
/// # Examples
///
/// ```
/// use tui_server::resources::read;
///
/// assert!(read("tui://widgets/Button").unwrap().starts_with("# Button"));
/// assert!(read("tui://widgets/Nope").unwrap().contains("not found"));
/// assert!(read("tui://elsewhere").is_none());
/// ```
#[must_use]
pub fn read(uri: &str) -> Option<String> {
    if let Some(name) = uri.strip_prefix(WIDGETS) {
        return Some(docs::widget_page(name));
    }
    if let Some(name) = uri.strip_prefix(CONTAINERS) {
        return Some(docs::container_page(name));
    }

    let page = match uri {
        CSS_PROPERTIES => css::properties_page(),
        CSS_SELECTORS => css::selectors_page(),
        CSS_VARIABLES => css::variables_page(),
        LAYOUT_PATTERNS => docs::layouts_page(),
        _ => return None,
    };
    Some(page.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_entry_is_readable() {
        for entry in entries() {
            let text = read(&entry.uri).unwrap();
            assert!(!text.contains("not found"), "{}", entry.uri);
        }
    }

    #[test]
    fn test_entries_are_unique() {
        let entries = entries();
        let mut uris: Vec<_> = entries.iter().map(|e| e.uri.as_str()).collect();
        uris.sort_unstable();
        uris.dedup();
        assert_eq!(uris.len(), entries.len());
    }

    #[test]
    fn test_reference_pages() {
        assert!(read("tui://css/properties").unwrap().starts_with("# CSS Properties"));
        assert!(read("tui://css/selectors").unwrap().starts_with("# CSS Selectors"));
        assert!(read("tui://css/variables").unwrap().contains("$primary"));
        assert!(read("tui://patterns/layouts").unwrap().contains("## Sidebar Layout"));
    }

    #[test]
    fn test_unknown_component_pages() {
        let text = read("tui://containers/Box").unwrap();
        assert!(text.starts_with("Container 'Box' not found."));
    }

    #[test]
    fn test_unknown_uris() {
        assert!(read("tui://css/colors").is_none());
        assert!(read("config://cargo").is_none());
    }
}
