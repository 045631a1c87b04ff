//! CSS reference pages: properties, selectors and theme variables.

use std::fmt::Write as _;
use std::sync::LazyLock;

/// A documented CSS property.
#[derive(Debug, Clone, Copy)]
pub struct PropertyDoc {
    /// Property name
    pub name: &'static str,
    /// What it controls
    pub description: &'static str,
    /// Accepted value forms
    pub values: &'static [&'static str],
    /// Example declaration
    pub example: &'static str,
}

/// A documented selector form.
#[derive(Debug, Clone, Copy)]
pub struct SelectorDoc {
    /// Heading, e.g. `Type`
    pub name: &'static str,
    /// What it matches
    pub description: &'static str,
    /// Syntax sketch
    pub syntax: &'static str,
    /// Example rule
    pub example: &'static str,
}

/// A documented theme variable.
#[derive(Debug, Clone, Copy)]
pub struct VariableDoc {
    /// Variable name including `$`
    pub name: &'static str,
    /// What the color represents
    pub description: &'static str,
    /// Typical usage
    pub usage: &'static str,
}

const PROPERTIES: &[PropertyDoc] = &[
    PropertyDoc {
        name: "background",
        description: "Sets the background color of the widget.",
        values: &["color", "$variable", "transparent"],
        example: "background: $surface;",
    },
    PropertyDoc {
        name: "color",
        description: "Sets the text color.",
        values: &["color", "$variable", "auto"],
        example: "color: $text;",
    },
    PropertyDoc {
        name: "padding",
        description: "Space between the widget's border and its content.",
        values: &["integer", "integer integer", "integer integer integer integer"],
        example: "padding: 1 2;",
    },
    PropertyDoc {
        name: "margin",
        description: "Space outside the widget's border.",
        values: &["integer", "integer integer", "integer integer integer integer"],
        example: "margin: 1;",
    },
    PropertyDoc {
        name: "width",
        description: "Sets the width of the widget.",
        values: &["integer", "percentage", "auto", "fr"],
        example: "width: 100%;",
    },
    PropertyDoc {
        name: "height",
        description: "Sets the height of the widget.",
        values: &["integer", "percentage", "auto", "fr"],
        example: "height: auto;",
    },
    PropertyDoc {
        name: "border",
        description: "Draws a border around the widget.",
        values: &["none", "solid", "double", "dashed", "heavy", "wide", "tall"],
        example: "border: solid $primary;",
    },
    PropertyDoc {
        name: "layout",
        description: "How children are arranged.",
        values: &["vertical", "horizontal", "grid"],
        example: "layout: horizontal;",
    },
    PropertyDoc {
        name: "align",
        description: "Aligns children within the widget.",
        values: &["left", "center", "right", "top", "middle", "bottom"],
        example: "align: center middle;",
    },
    PropertyDoc {
        name: "display",
        description: "Whether the widget takes part in layout.",
        values: &["block", "none"],
        example: "display: none;",
    },
    PropertyDoc {
        name: "dock",
        description: "Fixes the widget to an edge of its container.",
        values: &["top", "bottom", "left", "right"],
        example: "dock: top;",
    },
    PropertyDoc {
        name: "visibility",
        description: "Hides the widget while keeping its space.",
        values: &["visible", "hidden"],
        example: "visibility: hidden;",
    },
    PropertyDoc {
        name: "overflow",
        description: "Scrolling behavior when content does not fit.",
        values: &["auto", "hidden", "scroll"],
        example: "overflow: auto;",
    },
    PropertyDoc {
        name: "text-align",
        description: "Horizontal alignment of text.",
        values: &["left", "center", "right", "justify"],
        example: "text-align: center;",
    },
    PropertyDoc {
        name: "text-style",
        description: "Text decoration.",
        values: &["bold", "italic", "underline", "strike", "reverse"],
        example: "text-style: bold italic;",
    },
];

const SELECTORS: &[SelectorDoc] = &[
    SelectorDoc {
        name: "Type",
        description: "Matches widgets by type name.",
        syntax: "WidgetType",
        example: "Button { background: $primary; }",
    },
    SelectorDoc {
        name: "Id",
        description: "Matches the widget with the given id.",
        syntax: "#widget-id",
        example: "#save { border: solid green; }",
    },
    SelectorDoc {
        name: "Class",
        description: "Matches widgets carrying a class.",
        syntax: ".class-name",
        example: ".highlighted { background: yellow; }",
    },
    SelectorDoc {
        name: "Pseudo-Class",
        description: "Matches widgets in a state. Styling only; queries reject it.",
        syntax: ":state",
        example: "Button:focus { background: $primary-lighten-1; }",
    },
    SelectorDoc {
        name: "Descendant",
        description: "Matches widgets nested anywhere inside another.",
        syntax: "Parent Child",
        example: "Container Button { margin: 1; }",
    },
    SelectorDoc {
        name: "Child",
        description: "Matches direct children only. Styling only; queries reject it.",
        syntax: "Parent > Child",
        example: "Container > Button { padding: 1; }",
    },
];

const VARIABLES: &[VariableDoc] = &[
    VariableDoc {
        name: "$primary",
        description: "Primary theme color.",
        usage: "Buttons, accents, important elements.",
    },
    VariableDoc {
        name: "$secondary",
        description: "Secondary theme color.",
        usage: "Less prominent elements.",
    },
    VariableDoc {
        name: "$surface",
        description: "Surface color.",
        usage: "Container backgrounds, cards.",
    },
    VariableDoc {
        name: "$background",
        description: "Main background color.",
        usage: "Screen background.",
    },
    VariableDoc {
        name: "$text",
        description: "Primary text color.",
        usage: "Body text, labels.",
    },
    VariableDoc {
        name: "$text-muted",
        description: "Muted text color.",
        usage: "Hints, placeholders, disabled text.",
    },
    VariableDoc {
        name: "$error",
        description: "Error state color.",
        usage: "Error messages, validation failures.",
    },
    VariableDoc {
        name: "$warning",
        description: "Warning state color.",
        usage: "Warnings, caution states.",
    },
    VariableDoc {
        name: "$success",
        description: "Success state color.",
        usage: "Confirmations.",
    },
];

static PROPERTIES_PAGE: LazyLock<String> = LazyLock::new(|| {
    let mut out = String::from("# CSS Properties\n\n");
    for property in PROPERTIES {
        let _ = writeln!(
            out,
            "## {}\n{}\nValues: {}\nExample: `{}`\n",
            property.name,
            property.description,
            property.values.join(", "),
            property.example
        );
    }
    out
});

static SELECTORS_PAGE: LazyLock<String> = LazyLock::new(|| {
    let mut out = String::from("# CSS Selectors\n\n");
    for selector in SELECTORS {
        let _ = writeln!(
            out,
            "## {} Selector\n{}\nSyntax: `{}`\nExample: `{}`\n",
            selector.name, selector.description, selector.syntax, selector.example
        );
    }
    out
});

static VARIABLES_PAGE: LazyLock<String> = LazyLock::new(|| {
    let mut out = String::from("# CSS Variables (Theme Colors)\n\n");
    for variable in VARIABLES {
        let _ = writeln!(
            out,
            "## {}\n{}\nUsage: {}\n",
            variable.name, variable.description, variable.usage
        );
    }
    out
});

/// Documented properties.
#[must_use]
pub const fn properties() -> &'static [PropertyDoc] {
    PROPERTIES
}

/// Documented selector forms.
#[must_use]
pub const fn selectors() -> &'static [SelectorDoc] {
    SELECTORS
}

/// Documented theme variables.
#[must_use]
pub const fn variables() -> &'static [VariableDoc] {
    VARIABLES
}

/// Markdown page listing every documented property.
#[must_use]
pub fn properties_page() -> &'static str {
    &PROPERTIES_PAGE
}

/// Markdown page listing the selector forms.
#[must_use]
pub fn selectors_page() -> &'static str {
    &SELECTORS_PAGE
}

/// Markdown page listing the theme variables.
#[must_use]
pub fn variables_page() -> &'static str {
    &VARIABLES_PAGE
}
