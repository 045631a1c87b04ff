//! Static checks for CSS and application sources.
//!
//! All checks are textual: nothing is parsed into a document or executed.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tui_core::ValidationResult;

/// Properties understood by the framework's CSS dialect.
pub const CSS_PROPERTIES: [&str; 86] = [
    "align",
    "align-horizontal",
    "align-vertical",
    "background",
    "border",
    "border-bottom",
    "border-left",
    "border-right",
    "border-top",
    "border-subtitle-align",
    "border-subtitle-background",
    "border-subtitle-color",
    "border-subtitle-style",
    "border-title-align",
    "border-title-background",
    "border-title-color",
    "border-title-style",
    "box-sizing",
    "color",
    "column-span",
    "constrain",
    "content-align",
    "content-align-horizontal",
    "content-align-vertical",
    "display",
    "dock",
    "grid-columns",
    "grid-gutter",
    "grid-rows",
    "grid-size",
    "height",
    "hatch",
    "keyline",
    "layer",
    "layers",
    "layout",
    "link-background",
    "link-background-hover",
    "link-color",
    "link-color-hover",
    "link-style",
    "link-style-hover",
    "margin",
    "margin-bottom",
    "margin-left",
    "margin-right",
    "margin-top",
    "max-height",
    "max-width",
    "min-height",
    "min-width",
    "offset",
    "offset-x",
    "offset-y",
    "opacity",
    "outline",
    "outline-bottom",
    "outline-left",
    "outline-right",
    "outline-top",
    "overflow",
    "overflow-x",
    "overflow-y",
    "padding",
    "padding-bottom",
    "padding-left",
    "padding-right",
    "padding-top",
    "row-span",
    "scrollbar-background",
    "scrollbar-background-active",
    "scrollbar-background-hover",
    "scrollbar-color",
    "scrollbar-color-active",
    "scrollbar-color-hover",
    "scrollbar-corner-color",
    "scrollbar-gutter",
    "scrollbar-size",
    "scrollbar-size-horizontal",
    "scrollbar-size-vertical",
    "text-align",
    "text-opacity",
    "text-style",
    "tint",
    "visibility",
    "width",
];

static KNOWN_PROPERTIES: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| CSS_PROPERTIES.into_iter().collect());

static PROPERTY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-zA-Z-]+)\s*:").expect("valid regex"));
static CLASS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^\s*class\s*=\s*"(\w+)""#).expect("valid regex"));
static COMPOSITION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*\[\[(?:\w+\.)*(?:widgets|children)\]\]").expect("valid regex")
});
static BINDINGS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:\[\[(?:\w+\.)*bindings\]\]|bindings\s*=\s*\[)").expect("valid regex")
});

/// Checks CSS text for balanced braces and unknown properties.
///
/// Blank input is valid. Unbalanced braces are the only error and stop the
/// check. Unknown properties only produce warnings.
///
/// # Examples
///
/// ```
/// use tui_server::validate::validate_css;
///
/// let result = validate_css("Screen { colour: red; }");
/// assert!(result.valid);
/// assert_eq!(result.warnings, ["Unknown CSS property: colour"]);
///
/// let result = validate_css("Screen { color: red;");
/// assert_eq!(result.errors, ["Unbalanced braces: 1 opening, 0 closing"]);
/// ```
#[must_use]
pub fn validate_css(css: &str) -> ValidationResult {
    let mut result = ValidationResult::default();
    if css.trim().is_empty() {
        return result;
    }

    let open = css.matches('{').count();
    let close = css.matches('}').count();
    if open != close {
        result.error(format!(
            "Unbalanced braces: {open} opening, {close} closing"
        ));
        return result;
    }

    for capture in PROPERTY_REGEX.captures_iter(css) {
        let name = capture[1].to_lowercase();
        if !KNOWN_PROPERTIES.contains(name.as_str()) {
            result.warn(format!("Unknown CSS property: {name}"));
        }
    }

    result
}

/// Checks a widget declaration for a class name, a description and a
/// composition.
///
/// # Examples
///
/// ```
/// use tui_server::validate::lint_widget;
///
/// let source = "[[widget]]\nclass = \"Banner\"\ndescription = \"Top banner.\"\n\n[[widget.children]]\ntype = \"Label\"\n";
/// let result = lint_widget(source);
/// assert!(result.valid);
/// assert!(result.warnings.is_empty());
/// ```
#[must_use]
pub fn lint_widget(source: &str) -> ValidationResult {
    let mut result = ValidationResult::default();

    let Some(capture) = CLASS_REGEX.captures(source) else {
        result.error("No class definition found");
        return result;
    };
    let class = &capture[1];

    let described = Regex::new(&format!(
        r#"(?m)^\s*class\s*=\s*"{}"\s*\n\s*description\s*="#,
        regex::escape(class)
    ))
    .is_ok_and(|pattern| pattern.is_match(source));
    if !described {
        result.warn(format!("Class '{class}' is missing a description"));
    }

    if !COMPOSITION_REGEX.is_match(source) {
        result.warn(format!("Widget '{class}' doesn't compose any child widgets"));
    }

    result
}

/// Checks that a source declares keyboard bindings.
#[must_use]
pub fn check_accessibility(source: &str) -> ValidationResult {
    let mut result = ValidationResult::default();
    if !BINDINGS_REGEX.is_match(source) {
        result.warn("No keyboard bindings defined. Consider adding bindings for accessibility.");
    }
    result
}
