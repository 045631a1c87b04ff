//! Source generation from Handlebars templates.
//!
//! Every generated document parses as an application source. Generated apps
//! load and run in the harness as they are.
//!
//! # Examples
//!
//! ```
//! use tui_server::generate::Generator;
//!
//! let generator = Generator::new().unwrap();
//! let source = generator.app("todo_app", false, true).unwrap();
//! assert!(source.contains("class = \"TodoApp\""));
//! assert!(source.contains("id = \"sidebar\""));
//! ```

use handlebars::Handlebars;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use tui_core::{Error, Result};
use tui_harness::widget::WidgetKind;

const SETTINGS_SCREEN: &str = "SettingsScreen";

static APP_CLASS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\[\[app\]\][^\[]*?\bclass\s*=\s*"(\w+)""#).expect("valid regex")
});

#[derive(Serialize)]
struct WidgetContext<'a> {
    class_name: &'a str,
    base: &'a str,
    with_css: bool,
    with_bindings: bool,
}

#[derive(Serialize)]
struct ScreenContext<'a> {
    class_name: &'a str,
    modal: bool,
    with_header_footer: bool,
}

#[derive(Serialize)]
struct AppContext<'a> {
    class_name: &'a str,
    settings_class: &'a str,
    with_screens: bool,
    with_sidebar: bool,
}

#[derive(Serialize)]
struct TestCasesContext<'a> {
    class_name: &'a str,
    file_name: &'a str,
}

/// Renders application sources and test scaffolds.
#[derive(Debug)]
pub struct Generator<'a> {
    handlebars: Handlebars<'a>,
}

impl Generator<'_> {
    /// Creates a generator with the built-in templates registered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if a built-in template fails to
    /// compile.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        for (name, template) in [
            ("widget", include_str!("../templates/widget.toml.hbs")),
            ("screen", include_str!("../templates/screen.toml.hbs")),
            ("app", include_str!("../templates/app.toml.hbs")),
            ("test_cases", include_str!("../templates/test_cases.rs.hbs")),
        ] {
            handlebars
                .register_template_string(name, template)
                .map_err(|e| Error::TemplateError {
                    message: format!("failed to register '{name}' template: {e}"),
                })?;
        }

        Ok(Self { handlebars })
    }

    /// Renders a custom widget declaration extending `widget_type`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an unusable name or an unknown
    /// base type, and [`Error::TemplateError`] if rendering fails.
    pub fn widget(
        &self,
        name: &str,
        widget_type: &str,
        with_css: bool,
        with_bindings: bool,
    ) -> Result<String> {
        let class_name = to_class_name(name)?;
        match WidgetKind::from_name(widget_type) {
            Some(kind) if kind != WidgetKind::Screen => {}
            _ => {
                return Err(Error::InvalidArgument(format!(
                    "unknown widget type '{widget_type}'"
                )));
            }
        }

        self.render(
            "widget",
            &WidgetContext {
                class_name: &class_name,
                base: widget_type,
                with_css,
                with_bindings,
            },
        )
    }

    /// Renders a screen declaration. Modal screens never get a header or
    /// footer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an unusable name and
    /// [`Error::TemplateError`] if rendering fails.
    pub fn screen(&self, name: &str, modal: bool, with_header_footer: bool) -> Result<String> {
        let class_name = to_class_name(name)?;
        self.render(
            "screen",
            &ScreenContext {
                class_name: &class_name,
                modal,
                with_header_footer: with_header_footer && !modal,
            },
        )
    }

    /// Renders a complete application.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an unusable name and
    /// [`Error::TemplateError`] if rendering fails.
    pub fn app(&self, name: &str, with_screens: bool, with_sidebar: bool) -> Result<String> {
        let class_name = to_class_name(name)?;
        self.render(
            "app",
            &AppContext {
                class_name: &class_name,
                settings_class: SETTINGS_SCREEN,
                with_screens,
                with_sidebar,
            },
        )
    }

    /// Renders an integration test file that drives the application
    /// declared in `source`. Falls back to the class name `App` when no
    /// application is declared.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if rendering fails.
    pub fn test_cases(&self, source: &str) -> Result<String> {
        let class_name = app_class_name(source).unwrap_or("App");
        let file_name = format!("{}.toml", snake_case(class_name));
        self.render(
            "test_cases",
            &TestCasesContext {
                class_name,
                file_name: &file_name,
            },
        )
    }

    fn render<T: Serialize>(&self, template: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template, context)
            .map_err(|e| Error::TemplateError {
                message: format!("failed to render '{template}': {e}"),
            })
    }
}

/// Converts a name to a type name.
///
/// Names that start with an uppercase letter and contain no underscore are
/// kept. Anything else is split on non-alphanumeric characters and each
/// word is capitalized.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the result is empty or does not
/// start with a letter.
///
/// # Examples
///
/// ```
/// use tui_server::generate::to_class_name;
///
/// assert_eq!(to_class_name("my_app").unwrap(), "MyApp");
/// assert_eq!(to_class_name("StatusBar").unwrap(), "StatusBar");
/// assert!(to_class_name("__").is_err());
/// ```
pub fn to_class_name(name: &str) -> Result<String> {
    let keep = name.chars().next().is_some_and(char::is_uppercase)
        && name.chars().all(char::is_alphanumeric);

    let class_name = if keep {
        name.to_string()
    } else {
        name.split(|c: char| !c.is_alphanumeric())
            .map(|word| {
                let mut chars = word.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
                })
            })
            .collect()
    };

    if class_name.chars().next().is_some_and(char::is_alphabetic) {
        Ok(class_name)
    } else {
        Err(Error::InvalidArgument(format!(
            "'{name}' cannot be turned into a class name"
        )))
    }
}

/// First application type declared in `source`.
#[must_use]
pub fn app_class_name(source: &str) -> Option<&str> {
    APP_CLASS_REGEX
        .captures(source)
        .and_then(|capture| capture.get(1))
        .map(|m| m.as_str())
}

fn snake_case(class_name: &str) -> String {
    let mut out = String::with_capacity(class_name.len() + 4);
    for (i, c) in class_name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{check_accessibility, lint_widget, validate_css};
    use tui_harness::document::AppDocument;

    fn generator() -> Generator<'static> {
        Generator::new().unwrap()
    }

    #[test]
    fn test_class_names() {
        assert_eq!(to_class_name("my_app").unwrap(), "MyApp");
        assert_eq!(to_class_name("status bar").unwrap(), "StatusBar");
        assert_eq!(to_class_name("TodoApp").unwrap(), "TodoApp");
        assert_eq!(to_class_name("todo").unwrap(), "Todo");
        assert_eq!(to_class_name("Todo_app").unwrap(), "TodoApp");
        assert_eq!(to_class_name("myHTTP_app").unwrap(), "MyhttpApp");
    }

    #[test]
    fn test_unusable_names_rejected() {
        for name in ["", "___", "1st_app", "-"] {
            assert!(
                matches!(to_class_name(name), Err(Error::InvalidArgument(_))),
                "{name:?}"
            );
        }
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(snake_case("TodoApp"), "todo_app");
        assert_eq!(snake_case("App"), "app");
    }

    #[test]
    fn test_widget_declaration() {
        let source = generator().widget("status_bar", "Label", true, true).unwrap();
        let document = AppDocument::parse(&source).unwrap();
        let decl = document.find_widget("StatusBar").unwrap();
        assert_eq!(decl.base, "Label");
        assert_eq!(decl.bindings.len(), 1);
        assert!(decl.css.as_deref().unwrap().contains("StatusBar {"));

        assert!(lint_widget(&source).warnings.is_empty());
        assert!(check_accessibility(&source).warnings.is_empty());
        assert!(validate_css(decl.css.as_deref().unwrap()).warnings.is_empty());
    }

    #[test]
    fn test_widget_without_extras() {
        let source = generator().widget("Plain", "Static", false, false).unwrap();
        let document = AppDocument::parse(&source).unwrap();
        let decl = document.find_widget("Plain").unwrap();
        assert!(decl.css.is_none());
        assert!(decl.bindings.is_empty());
        assert_eq!(check_accessibility(&source).warnings.len(), 1);
    }

    #[test]
    fn test_widget_unknown_base_rejected() {
        for base in ["DataGrid", "Screen"] {
            let err = generator().widget("Thing", base, true, false).unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)));
        }
    }

    #[test]
    fn test_screen_variants() {
        let source = generator().screen("settings_screen", false, true).unwrap();
        let document = AppDocument::parse(&source).unwrap();
        let screen = document.find_screen("SettingsScreen").unwrap();
        assert!(!screen.modal);
        let kinds: Vec<_> = screen.widgets.iter().map(|w| w.kind.as_str()).collect();
        assert_eq!(kinds, ["Header", "Static", "Footer"]);

        let source = generator().screen("Confirm", true, true).unwrap();
        let document = AppDocument::parse(&source).unwrap();
        let screen = document.find_screen("Confirm").unwrap();
        assert!(screen.modal);
        let kinds: Vec<_> = screen.widgets.iter().map(|w| w.kind.as_str()).collect();
        assert_eq!(kinds, ["Static"]);
        assert_eq!(screen.bindings[0].action, "dismiss");
    }

    #[test]
    fn test_app_variants_parse() {
        let generator = generator();
        for with_screens in [false, true] {
            for with_sidebar in [false, true] {
                let source = generator.app("demo", with_screens, with_sidebar).unwrap();
                let document = AppDocument::parse(&source)
                    .unwrap_or_else(|e| panic!("{with_screens}/{with_sidebar}: {e}\n{source}"));
                let app = document.find_app("Demo").unwrap();
                assert_eq!(app.bindings.len(), if with_screens { 3 } else { 2 });
                assert_eq!(document.screen.len(), usize::from(with_screens));
                assert!(validate_css(app.css.as_deref().unwrap()).warnings.is_empty());
                assert_eq!(
                    source.contains("layout: horizontal"),
                    with_sidebar,
                    "{source}"
                );
            }
        }
    }

    #[test]
    fn test_test_cases_use_app_class() {
        let generator = generator();
        let app = generator.app("todo_app", false, false).unwrap();
        let tests = generator.test_cases(&app).unwrap();
        assert!(tests.starts_with("//! Tests for TodoApp."));
        assert!(tests.contains("include_str!(\"../todo_app.toml\")"));
        assert!(tests.contains("with_entry(\"TodoApp\")"));
        assert!(tests.contains("fn test_keyboard_navigation()"));
    }

    #[test]
    fn test_test_cases_default_class() {
        let tests = generator().test_cases("[[widget]]\nclass = \"Lonely\"\n").unwrap();
        assert!(tests.contains("with_entry(\"App\")"));
        assert!(tests.contains("../app.toml"));
    }
}
