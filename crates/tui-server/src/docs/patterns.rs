//! Layout patterns as complete application sources.

use std::fmt::Write as _;
use std::sync::LazyLock;

/// A named layout recipe.
#[derive(Debug, Clone, Copy)]
pub struct LayoutPattern {
    /// Pattern name
    pub name: &'static str,
    /// When to use it
    pub description: &'static str,
    /// Runnable application source
    pub source: &'static str,
}

const LAYOUTS: &[LayoutPattern] = &[
    LayoutPattern {
        name: "Sidebar Layout",
        description: "A fixed-width sidebar next to the main content area.",
        source: r##"[[app]]
class = "SidebarApp"
css = """
#sidebar {
    width: 30;
    background: $surface;
    border-right: solid $primary;
    padding: 1;
}
#main {
    padding: 1 2;
}
"""

[[app.widgets]]
type = "Horizontal"

[[app.widgets.children]]
type = "Static"
id = "sidebar"
text = "Sidebar"

[[app.widgets.children]]
type = "Static"
id = "main"
text = "Main Content"
"##,
    },
    LayoutPattern {
        name: "Header/Content/Footer",
        description: "The classic structure: title bar, content and key bar.",
        source: r##"[[app]]
class = "StandardApp"
title = "Standard"

[[app.bindings]]
key = "q"
action = "quit"
description = "Quit"

[[app.widgets]]
type = "Header"

[[app.widgets]]
type = "Container"
id = "content"

[[app.widgets.children]]
type = "Static"
text = "Main Content"

[[app.widgets]]
type = "Footer"
"##,
    },
    LayoutPattern {
        name: "Card Grid",
        description: "A grid of card-style widgets.",
        source: r##"[[app]]
class = "CardGridApp"
css = """
Grid {
    grid-size: 3;
    grid-gutter: 1;
    padding: 1;
}
.card {
    background: $surface;
    border: solid $primary;
    padding: 1;
    height: 10;
}
"""

[[app.widgets]]
type = "Grid"

[[app.widgets.children]]
type = "Static"
classes = ["card"]
text = "Card 1"

[[app.widgets.children]]
type = "Static"
classes = ["card"]
text = "Card 2"

[[app.widgets.children]]
type = "Static"
classes = ["card"]
text = "Card 3"
"##,
    },
    LayoutPattern {
        name: "Modal Dialog",
        description: "A modal screen pushed over the main content.",
        source: r##"[[screen]]
class = "ConfirmDialog"
modal = true
css = """
ConfirmDialog {
    align: center middle;
}
#dialog {
    background: $surface;
    border: solid $primary;
    width: 50;
}
"""

[[screen.bindings]]
key = "escape"
action = "dismiss"
description = "Close"

[[screen.widgets]]
type = "Vertical"
id = "dialog"

[[screen.widgets.children]]
type = "Static"
text = "Are you sure?"

[[screen.widgets.children]]
type = "Button"
id = "yes"
text = "Yes"
variant = "primary"
on_press = "dismiss"

[[screen.widgets.children]]
type = "Button"
id = "no"
text = "No"
on_press = "dismiss"

[[app]]
class = "ModalApp"

[[app.widgets]]
type = "Button"
id = "delete"
text = "Delete"
on_press = "push_screen('ConfirmDialog')"
"##,
    },
    LayoutPattern {
        name: "Tabbed Interface",
        description: "Buttons switch between content panes by showing one and hiding the rest.",
        source: r##"[[app]]
class = "TabbedApp"

[[app.widgets]]
type = "Horizontal"
id = "tabs"

[[app.widgets.children]]
type = "Button"
id = "home-tab"
text = "Home"
on_press = "show('#home')"

[[app.widgets.children]]
type = "Button"
id = "settings-tab"
text = "Settings"
on_press = "hide('#home')"

[[app.widgets]]
type = "Static"
id = "home"
text = "Home content"
"##,
    },
    LayoutPattern {
        name: "Form Layout",
        description: "Labelled inputs with a submit button.",
        source: r##"[[app]]
class = "FormApp"
css = """
Vertical {
    padding: 1 2;
}
Label {
    margin-top: 1;
}
Input {
    margin-bottom: 1;
}
"""

[[app.widgets]]
type = "Vertical"

[[app.widgets.children]]
type = "Label"
text = "Username:"

[[app.widgets.children]]
type = "Input"
id = "username"
placeholder = "Enter username"

[[app.widgets.children]]
type = "Label"
text = "Password:"

[[app.widgets.children]]
type = "Input"
id = "password"
placeholder = "Enter password"

[[app.widgets.children]]
type = "Button"
id = "submit"
text = "Submit"
variant = "primary"
on_press = "notify('Submitted')"
"##,
    },
];

static LAYOUTS_PAGE: LazyLock<String> = LazyLock::new(|| {
    let mut out = String::from("# Layout Patterns\n\n");
    for pattern in LAYOUTS {
        let _ = writeln!(
            out,
            "## {}\n{}\n\n```toml\n{}```\n",
            pattern.name, pattern.description, pattern.source
        );
    }
    out
});

/// All layout patterns.
#[must_use]
pub const fn layouts() -> &'static [LayoutPattern] {
    LAYOUTS
}

/// Markdown page with every layout pattern.
#[must_use]
pub fn layouts_page() -> &'static str {
    &LAYOUTS_PAGE
}
