//! End-to-end tests: generated sources run in the harness and pass the
//! server's own checks.

use tui_core::SessionAction;
use tui_harness::session::{Harness, SessionOptions, drive_session};
use tui_server::docs;
use tui_server::generate::Generator;
use tui_server::resources;
use tui_server::validate::{check_accessibility, lint_widget, validate_css};

fn generator() -> Generator<'static> {
    Generator::new().unwrap()
}

#[test]
fn test_every_app_variant_runs() {
    let generator = generator();
    let harness = Harness::default();

    for with_screens in [false, true] {
        for with_sidebar in [false, true] {
            let source = generator.app("inventory", with_screens, with_sidebar).unwrap();

            let result = harness.run_app_pilot(&source);
            assert!(result.success, "{with_screens}/{with_sidebar}: {:?}", result.error);
            assert!(result.output.contains("Main Content"));
            assert_eq!(result.output.contains("Sidebar"), with_sidebar);

            assert!(lint_widget(&source).valid);
            assert!(check_accessibility(&source).warnings.is_empty());
        }
    }
}

#[test]
fn test_generated_app_quits() {
    let source = generator().app("quitter", false, false).unwrap();
    let harness = Harness::default();

    let before = harness.run_app_pilot(&source);
    let after = harness.simulate_keys(&source, &["q", "d"]);
    assert!(after.success, "{:?}", after.error);
    assert_eq!(before.output, after.output);
}

#[test]
fn test_settings_screen_round_trip() {
    let source = generator().app("my_app", true, false).unwrap();
    let options = SessionOptions::default().with_entry("MyApp");

    let home = drive_session(&source, &[], &options);
    let back = drive_session(
        &source,
        &[
            SessionAction::press(["s"]),
            SessionAction::click("#back"),
        ],
        &options,
    );
    assert!(back.success, "{:?}", back.error);
    assert_eq!(home.output, back.output);

    let escaped = drive_session(&source, &[SessionAction::press(["s", "escape"])], &options);
    assert_eq!(home.output, escaped.output);
}

#[test]
fn test_generated_widget_used_by_app() {
    let generator = generator();
    let widget = generator.widget("greeting", "Static", true, true).unwrap();
    let source = format!(
        "{widget}\n[[app]]\nclass = \"Host\"\n\n[[app.widgets]]\ntype = \"Greeting\"\nid = \"hello\"\n"
    );

    let result = Harness::default().run_app_pilot(&source);
    assert!(result.success, "{:?}", result.error);
    assert!(result.output.contains("Content here"));
}

#[test]
fn test_generated_screen_pushed_by_app() {
    let screen = generator().screen("about_screen", true, false).unwrap();
    let source = format!(
        "{screen}\n[[app]]\nclass = \"Host\"\n\n[[app.bindings]]\nkey = \"a\"\naction = \"push_screen('AboutScreen')\"\n\n[[app.widgets]]\ntype = \"Static\"\ntext = \"home\"\n"
    );

    let harness = Harness::default();
    let opened = harness.simulate_keys(&source, &["a"]);
    assert!(opened.success, "{:?}", opened.error);
    assert!(!opened.output.contains("home"));

    let closed = harness.simulate_keys(&source, &["a", "escape"]);
    assert_eq!(closed.output, "home");
}

#[test]
fn test_reference_examples_are_clean() {
    for doc in docs::widgets().values().chain(docs::containers().values()) {
        let result = Harness::default().run_app_pilot(doc.example);
        assert!(result.success, "{}: {:?}", doc.name, result.error);
    }

    for pattern in docs::patterns::layouts() {
        let document = tui_harness::document::AppDocument::parse(pattern.source).unwrap();
        for app in &document.app {
            if let Some(css) = app.css.as_deref() {
                assert!(validate_css(css).warnings.is_empty(), "{}", pattern.name);
            }
        }
    }
}

#[test]
fn test_every_listed_resource_has_markdown() {
    for entry in resources::entries() {
        let text = resources::read(&entry.uri).unwrap();
        assert!(text.starts_with('#'), "{}", entry.uri);
    }
}
