//! Integration tests for the session-driving operations.

use std::time::Duration;
use tui_core::{EMPTY_RENDER_PLACEHOLDER, SessionAction, SessionResult};
use tui_harness::layout::Size;
use tui_harness::session::{Harness, SessionOptions, drive_session, drive_session_async};

const TODO_APP: &str = r#"
[[app]]
class = "TodoApp"
title = "Todo"
description = "Collects todo items."

[[app.bindings]]
key = "ctrl+l"
action = "clear('#items')"
description = "Clear"

[[app.widgets]]
type = "Header"

[[app.widgets]]
type = "Input"
id = "new"
placeholder = "What needs doing?"
on_submit = "append_text('#items', 'item')"

[[app.widgets]]
type = "Log"
id = "items"

[[app.widgets]]
type = "Horizontal"

[[app.widgets.children]]
type = "Button"
id = "done"
text = "Done"
variant = "success"
on_press = "set_text('#status', 'All done')"

[[app.widgets.children]]
type = "Button"
id = "quit"
text = "Quit"
on_press = "quit"

[[app.widgets]]
type = "Label"
id = "status"
text = "0 items"

[[app.widgets]]
type = "Footer"
"#;

fn run(source: &str, actions: &[SessionAction]) -> SessionResult {
    drive_session(source, actions, &SessionOptions::default())
}

#[test]
fn test_syntax_error_reported_without_running() {
    for source in ["[[app]\nclass = \"A\"", "class = ", "[[app]]\nclass = 42\n"] {
        let result = run(source, &[SessionAction::press(["enter"])]);
        assert!(!result.success);
        assert!(result.output.is_empty());
        let error = result.error.unwrap();
        assert!(error.starts_with("Syntax error"), "unexpected error: {error}");
    }
}

#[test]
fn test_single_app_renders_text() {
    let result = run(TODO_APP, &[]);
    assert!(result.success, "{:?}", result.error);
    assert!(result.error.is_none());
    assert_eq!(
        result.output,
        "Todo\nWhat needs doing?\nDone\nQuit\n0 items\nctrl+l Clear"
    );
}

#[test]
fn test_click_on_missing_widget_fails() {
    let result = run(TODO_APP, &[SessionAction::click("#nonexistent")]);
    assert!(!result.success);
    let error = result.error.unwrap();
    assert!(error.contains("Click failed"), "unexpected error: {error}");
    assert!(error.contains("#nonexistent"));
}

#[test]
fn test_click_with_bad_selector_fails() {
    let result = run(TODO_APP, &[SessionAction::click("Button > Label")]);
    assert!(result.error.unwrap().starts_with("Click failed: Invalid selector"));
}

#[test]
fn test_actions_apply_in_order() {
    let actions = [
        SessionAction::press(["h", "i", "enter"]),
        SessionAction::press(["enter"]),
        SessionAction::click("#done"),
    ];
    let result = run(TODO_APP, &actions);
    assert!(result.success, "{:?}", result.error);
    assert_eq!(
        result.output,
        "Todo\nhi\nitem\nitem\nDone\nQuit\nAll done\nctrl+l Clear"
    );
}

#[test]
fn test_binding_runs_action() {
    let filled = run(TODO_APP, &[SessionAction::press(["enter", "enter"])]);
    assert!(filled.output.contains("item\nitem"));

    let cleared = run(TODO_APP, &[SessionAction::press(["enter", "enter", "ctrl+l"])]);
    assert!(cleared.success);
    assert_eq!(cleared.output, run(TODO_APP, &[]).output);
}

#[test]
fn test_input_after_quit_is_ignored() {
    let actions = [
        SessionAction::click("#quit"),
        SessionAction::click("#done"),
    ];
    let result = run(TODO_APP, &actions);
    assert!(result.success);
    assert!(result.output.contains("0 items"));
    assert!(!result.output.contains("All done"));
}

#[test]
fn test_app_without_text_uses_placeholder() {
    let source = "[[app]]\nclass = \"Blank\"\n\n[[app.widgets]]\ntype = \"Rule\"\n";
    let result = run(source, &[]);
    assert!(result.success);
    assert_eq!(result.output, EMPTY_RENDER_PLACEHOLDER);
}

#[test]
fn test_missing_app_class() {
    let result = run("[[widget]]\nclass = \"Orphan\"\n", &[]);
    assert_eq!(result.error.as_deref(), Some("No App class found"));
}

#[test]
fn test_entry_point_selection() {
    let source = r#"
[[app]]
class = "First"

[[app.widgets]]
type = "Static"
text = "first"

[[app]]
class = "Second"

[[app.widgets]]
type = "Static"
text = "second"
"#;

    let ambiguous = run(source, &[]);
    assert!(ambiguous.error.unwrap().contains("First, Second"));

    let options = SessionOptions::default().with_entry("Second");
    let chosen = drive_session(source, &[], &options);
    assert_eq!(chosen.output, "second");

    let options = SessionOptions::default().with_entry("Third");
    let missing = drive_session(source, &[], &options);
    assert_eq!(missing.error.as_deref(), Some("Class Third not found"));
}

#[test]
fn test_invalid_app_reported() {
    let source = "[[app]]\nclass = \"A\"\n\n[[app.widgets]]\ntype = \"Sparkline\"\n";
    let result = run(source, &[]);
    assert!(!result.success);
    assert!(result.error.unwrap().contains("Unknown widget type 'Sparkline'"));
}

#[test]
fn test_small_terminal_makes_widgets_unclickable() {
    let options = SessionOptions {
        size: Size::new(80, 5),
        ..SessionOptions::default()
    };
    let result = drive_session(TODO_APP, &[SessionAction::click("#done")], &options);
    assert!(!result.success);
    assert!(result.error.unwrap().contains("outside the 80x5 terminal"));
}

fn keypad_app(css: &str) -> String {
    let mut source = format!(
        "[[app]]\nclass = \"Keypad\"\ncss = \"{css}\"\n\n\
         [[app.widgets]]\ntype = \"Static\"\nid = \"out\"\ntext = \"none\"\n\n\
         [[app.widgets]]\ntype = \"Grid\"\nid = \"keys\"\n"
    );
    for i in 0..12 {
        source.push_str(&format!(
            "\n[[app.widgets.children]]\ntype = \"Button\"\nid = \"b{i}\"\n\
             text = \"{i}\"\non_press = \"set_text('#out', 'b{i}')\"\n"
        ));
    }
    source
}

#[test]
fn test_grid_cells_share_rows() {
    let result = run(&keypad_app("Grid { grid-size: 4; }"), &[SessionAction::click("#b11")]);
    assert!(result.success, "{:?}", result.error);
    assert!(result.output.starts_with("b11\n0\n1\n"));
    assert!(result.output.ends_with("\n11"));

    let by_id = run(&keypad_app("#keys { grid-size: 3 4; }"), &[SessionAction::click("#b11")]);
    assert!(by_id.success, "{:?}", by_id.error);
}

#[test]
fn test_grid_without_size_stacks_cells() {
    let result = run(&keypad_app(""), &[SessionAction::click("#b11")]);
    assert!(!result.success);
    assert!(
        result
            .error
            .unwrap()
            .contains("widget lies outside the 80x24 terminal")
    );
}

#[test]
fn test_press_needs_a_key() {
    let result = run(TODO_APP, &[SessionAction::Press { keys: Vec::new() }]);
    assert!(!result.success);
    assert!(result.output.is_empty());
    assert_eq!(
        result.error.as_deref(),
        Some("Invalid action 'press': at least one key is required")
    );
}

#[test]
fn test_runtime_errors_fail_the_session() {
    let source = r#"
[[app]]
class = "Broken"

[[app.bindings]]
key = "x"
action = "set_text('#ghost', 'boo')"

[[app.widgets]]
type = "Static"
text = "here"
"#;
    let result = run(source, &[SessionAction::press(["x"])]);
    assert_eq!(result.error.as_deref(), Some("No nodes match '#ghost'"));
}

#[test]
fn test_harness_convenience_operations() {
    let harness = Harness::new(SessionOptions {
        timeout: Duration::from_secs(10),
        ..SessionOptions::default()
    });

    let pilot = harness.run_app_pilot(TODO_APP);
    let snapshot = harness.take_snapshot(TODO_APP);
    assert_eq!(pilot, snapshot);

    let keys = harness.simulate_keys(TODO_APP, &["o", "k"]);
    assert!(keys.output.contains("\nok\n"));

    let click = harness.simulate_click(TODO_APP, "#done");
    assert!(click.output.contains("All done"));
}

#[test]
fn test_same_result_with_and_without_runtime() {
    let actions = [SessionAction::press(["a", "enter"])];
    let plain = run(TODO_APP, &actions);

    let nested = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(async { run(TODO_APP, &actions) });

    assert!(plain.success);
    assert_eq!(plain, nested);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_spawn_blocking_inside_runtime() {
    let result = tokio::task::spawn_blocking(|| run(TODO_APP, &[SessionAction::click("#done")]))
        .await
        .unwrap();
    assert!(result.output.contains("All done"));
}

#[tokio::test]
async fn test_async_and_sync_entry_points_agree() {
    let actions = [SessionAction::press(["tab", "tab", "enter"])];
    let from_async = drive_session_async(TODO_APP, &actions, &SessionOptions::default()).await;
    let from_sync = run(TODO_APP, &actions);
    assert_eq!(from_async, from_sync);
}

#[test]
fn test_concurrent_sessions_are_independent() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let key = i.to_string();
                run(TODO_APP, &[SessionAction::press([key.as_str()])])
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let result = handle.join().unwrap();
        assert!(result.output.contains(&format!("\n{i}\n")));
    }
}
