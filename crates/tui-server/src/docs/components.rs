//! Widget and container reference.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::LazyLock;

/// Reference entry for one widget or container type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentDoc {
    /// Type name as written in `type = "..."`
    pub name: &'static str,
    /// One-line summary
    pub description: &'static str,
    /// Complete application source using the component
    pub example: &'static str,
    /// Fields the component reads from its node
    pub properties: &'static [&'static str],
    /// Action hooks the component fires
    pub events: &'static [&'static str],
}

const WIDGET_DOCS: &[ComponentDoc] = &[
    ComponentDoc {
        name: "Static",
        description: "Displays a block of static text.",
        example: r#"[[app]]
class = "Greeting"

[[app.widgets]]
type = "Static"
id = "greeting"
text = "Hello World!"
"#,
        properties: &["text"],
        events: &[],
    },
    ComponentDoc {
        name: "Label",
        description: "A single line of text, typically next to an input.",
        example: r#"[[app]]
class = "Labelled"

[[app.widgets]]
type = "Label"
text = "Username:"
"#,
        properties: &["text"],
        events: &[],
    },
    ComponentDoc {
        name: "Button",
        description: "A clickable button that runs an action when pressed.",
        example: r#"[[app]]
class = "Clicker"

[[app.widgets]]
type = "Button"
id = "go"
text = "Click Me"
variant = "primary"
on_press = "notify('Button clicked!')"
"#,
        properties: &["text", "variant", "disabled"],
        events: &["on_press"],
    },
    ComponentDoc {
        name: "Input",
        description: "A single line text field. Printable keys edit its value.",
        example: r#"[[app]]
class = "Echo"

[[app.widgets]]
type = "Input"
id = "entry"
placeholder = "Enter text..."
on_submit = "notify('Submitted')"
"#,
        properties: &["value", "placeholder", "disabled"],
        events: &["on_submit"],
    },
    ComponentDoc {
        name: "Header",
        description: "Title bar docked to the top of the screen.",
        example: r#"[[app]]
class = "Titled"
title = "Inbox"
sub_title = "3 unread"

[[app.widgets]]
type = "Header"
"#,
        properties: &[],
        events: &[],
    },
    ComponentDoc {
        name: "Footer",
        description: "Key binding bar docked to the bottom of the screen.",
        example: r#"[[app]]
class = "WithFooter"

[[app.bindings]]
key = "q"
action = "quit"
description = "Quit"

[[app.widgets]]
type = "Footer"
"#,
        properties: &[],
        events: &[],
    },
    ComponentDoc {
        name: "Checkbox",
        description: "A labelled check box toggled with enter or space.",
        example: r#"[[app]]
class = "Terms"

[[app.widgets]]
type = "Checkbox"
id = "agree"
text = "I agree"
"#,
        properties: &["text", "checked", "disabled"],
        events: &["on_press"],
    },
    ComponentDoc {
        name: "Switch",
        description: "An on/off toggle switch.",
        example: r#"[[app]]
class = "Settings"

[[app.widgets]]
type = "Switch"
id = "dark-mode"
checked = true
"#,
        properties: &["checked", "disabled"],
        events: &["on_press"],
    },
    ComponentDoc {
        name: "ProgressBar",
        description: "Shows task progress as a percentage of its total.",
        example: r#"[[app]]
class = "Download"

[[app.widgets]]
type = "ProgressBar"
id = "progress"
progress = 25.0
total = 100.0
"#,
        properties: &["progress", "total"],
        events: &[],
    },
    ComponentDoc {
        name: "Digits",
        description: "Large digit display; works with increment and decrement.",
        example: r#"[[app]]
class = "Counter"

[[app.widgets]]
type = "Digits"
id = "count"
text = "0"

[[app.widgets]]
type = "Button"
text = "+1"
on_press = "increment('#count')"
"#,
        properties: &["text"],
        events: &[],
    },
    ComponentDoc {
        name: "Markdown",
        description: "Renders Markdown text.",
        example: r#"[[app]]
class = "Readme"

[[app.widgets]]
type = "Markdown"
text = """
# Title

Some *emphasis*.
"""
"#,
        properties: &["text"],
        events: &[],
    },
    ComponentDoc {
        name: "Log",
        description: "An append-only list of lines.",
        example: r#"[[app]]
class = "Events"

[[app.widgets]]
type = "Log"
id = "log"
items = ["started"]

[[app.widgets]]
type = "Button"
text = "Tick"
on_press = "append_text('#log', 'tick')"
"#,
        properties: &["items"],
        events: &[],
    },
    ComponentDoc {
        name: "Rule",
        description: "A horizontal divider.",
        example: r#"[[app]]
class = "Divided"

[[app.widgets]]
type = "Static"
text = "Above"

[[app.widgets]]
type = "Rule"

[[app.widgets]]
type = "Static"
text = "Below"
"#,
        properties: &[],
        events: &[],
    },
    ComponentDoc {
        name: "Placeholder",
        description: "Stands in for a widget while designing a layout.",
        example: r#"[[app]]
class = "Draft"

[[app.widgets]]
type = "Placeholder"
id = "chart"
"#,
        properties: &["id"],
        events: &[],
    },
    ComponentDoc {
        name: "ListView",
        description: "A vertical list of items.",
        example: r#"[[app]]
class = "Menu"

[[app.widgets]]
type = "ListView"
id = "menu"
items = ["Open", "Save", "Close"]
"#,
        properties: &["items"],
        events: &[],
    },
];

const CONTAINER_DOCS: &[ComponentDoc] = &[
    ComponentDoc {
        name: "Container",
        description: "A generic container for grouping widgets.",
        example: r#"[[app]]
class = "Grouped"

[[app.widgets]]
type = "Container"
id = "group"

[[app.widgets.children]]
type = "Static"
text = "Item 1"

[[app.widgets.children]]
type = "Static"
text = "Item 2"
"#,
        properties: &["id", "classes", "hidden"],
        events: &[],
    },
    ComponentDoc {
        name: "Horizontal",
        description: "Arranges children side by side.",
        example: r#"[[app]]
class = "Toolbar"

[[app.widgets]]
type = "Horizontal"

[[app.widgets.children]]
type = "Button"
text = "Left"

[[app.widgets.children]]
type = "Button"
text = "Right"
"#,
        properties: &["id", "classes", "hidden"],
        events: &[],
    },
    ComponentDoc {
        name: "Vertical",
        description: "Stacks children top to bottom.",
        example: r#"[[app]]
class = "Stacked"

[[app.widgets]]
type = "Vertical"

[[app.widgets.children]]
type = "Static"
text = "Top"

[[app.widgets.children]]
type = "Static"
text = "Bottom"
"#,
        properties: &["id", "classes", "hidden"],
        events: &[],
    },
    ComponentDoc {
        name: "Grid",
        description: "Arranges children in a grid sized by CSS.",
        example: r#"[[app]]
class = "Cells"
css = """
Grid {
    grid-size: 2 2;
    grid-gutter: 1;
}
"""

[[app.widgets]]
type = "Grid"

[[app.widgets.children]]
type = "Static"
text = "Cell 1"

[[app.widgets.children]]
type = "Static"
text = "Cell 2"
"#,
        properties: &["id", "classes", "hidden"],
        events: &[],
    },
    ComponentDoc {
        name: "Center",
        description: "Centers its children horizontally.",
        example: r#"[[app]]
class = "Centered"

[[app.widgets]]
type = "Center"

[[app.widgets.children]]
type = "Label"
text = "In the middle"
"#,
        properties: &["id", "classes", "hidden"],
        events: &[],
    },
    ComponentDoc {
        name: "Middle",
        description: "Centers its children vertically.",
        example: r#"[[app]]
class = "Aligned"

[[app.widgets]]
type = "Middle"

[[app.widgets.children]]
type = "Label"
text = "Halfway down"
"#,
        properties: &["id", "classes", "hidden"],
        events: &[],
    },
    ComponentDoc {
        name: "ScrollableContainer",
        description: "A container that scrolls in both directions.",
        example: r#"[[app]]
class = "Scrolling"

[[app.widgets]]
type = "ScrollableContainer"

[[app.widgets.children]]
type = "Log"
items = ["Line 1", "Line 2", "Line 3"]
"#,
        properties: &["id", "classes", "hidden"],
        events: &[],
    },
    ComponentDoc {
        name: "VerticalScroll",
        description: "A container that scrolls vertically.",
        example: r#"[[app]]
class = "Feed"

[[app.widgets]]
type = "VerticalScroll"

[[app.widgets.children]]
type = "Static"
text = "Post 1"

[[app.widgets.children]]
type = "Static"
text = "Post 2"
"#,
        properties: &["id", "classes", "hidden"],
        events: &[],
    },
    ComponentDoc {
        name: "HorizontalScroll",
        description: "A container that scrolls horizontally.",
        example: r#"[[app]]
class = "Carousel"

[[app.widgets]]
type = "HorizontalScroll"

[[app.widgets.children]]
type = "Static"
text = "Slide 1"

[[app.widgets.children]]
type = "Static"
text = "Slide 2"
"#,
        properties: &["id", "classes", "hidden"],
        events: &[],
    },
];

static WIDGETS: LazyLock<BTreeMap<&'static str, ComponentDoc>> =
    LazyLock::new(|| WIDGET_DOCS.iter().map(|doc| (doc.name, *doc)).collect());

static CONTAINERS: LazyLock<BTreeMap<&'static str, ComponentDoc>> =
    LazyLock::new(|| CONTAINER_DOCS.iter().map(|doc| (doc.name, *doc)).collect());

/// Widget reference keyed by type name.
#[must_use]
pub fn widgets() -> &'static BTreeMap<&'static str, ComponentDoc> {
    &WIDGETS
}

/// Container reference keyed by type name.
#[must_use]
pub fn containers() -> &'static BTreeMap<&'static str, ComponentDoc> {
    &CONTAINERS
}

/// Looks up a widget or container by exact type name.
#[must_use]
pub fn find(name: &str) -> Option<&'static ComponentDoc> {
    WIDGETS.get(name).or_else(|| CONTAINERS.get(name))
}

/// Markdown page for one widget, or a not-found notice listing the
/// available names.
#[must_use]
pub fn widget_page(name: &str) -> String {
    WIDGETS.get(name).map_or_else(
        || not_found("Widget", name, &WIDGETS),
        |doc| page(doc, true),
    )
}

/// Markdown page for one container, or a not-found notice listing the
/// available names.
#[must_use]
pub fn container_page(name: &str) -> String {
    CONTAINERS.get(name).map_or_else(
        || not_found("Container", name, &CONTAINERS),
        |doc| page(doc, false),
    )
}

fn page(doc: &ComponentDoc, with_events: bool) -> String {
    let mut out = format!(
        "# {}\n\n{}\n\n## Example\n\n```toml\n{}```\n",
        doc.name, doc.description, doc.example
    );
    if with_events {
        let _ = write!(
            out,
            "\n## Properties\n{}\n\n## Events\n{}\n",
            doc.properties.join(", "),
            doc.events.join(", ")
        );
    }
    out
}

fn not_found(kind: &str, name: &str, registry: &BTreeMap<&'static str, ComponentDoc>) -> String {
    let available: Vec<_> = registry.keys().copied().collect();
    format!(
        "{kind} '{name}' not found. Available: {}",
        available.join(", ")
    )
}
