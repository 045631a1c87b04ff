//! Application runtime.
//!
//! An [`App`] is instantiated from one `[[app]]` declaration of an
//! [`AppDocument`]. Loading composes the default screen, expands custom
//! widgets and parses every action string, so a broken document fails
//! before any input is delivered.
//!
//! The runtime is a plain state machine: [`App::press`], [`App::click`] and
//! [`App::run_action`] mutate it synchronously. [`crate::pilot`] wraps it in
//! an event loop.

use crate::action::Action;
use crate::document::{AppDecl, AppDocument, BindingDecl, WidgetNode};
use crate::layout::{self, GridSize, Size};
use crate::selector::Selector;
use crate::widget::{Binding, Chrome, NodeId, Widget, WidgetKind, WidgetTree};
use std::collections::HashMap;
use tracing::debug;
use tui_core::{Error, Result};

/// One screen: a widget tree with its own bindings and focus.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    class: String,
    modal: bool,
    tree: WidgetTree,
    bindings: Vec<Binding>,
    focused: Option<NodeId>,
}

impl Screen {
    /// Screen class name; `Screen` for the default screen.
    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Whether app bindings are suspended while this screen is active.
    #[must_use]
    pub const fn is_modal(&self) -> bool {
        self.modal
    }

    /// The widget tree.
    #[must_use]
    pub const fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    /// Focused widget, if any.
    #[must_use]
    pub const fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    fn cycle_focus(&mut self, forward: bool) {
        let chain = self.tree.focus_chain();
        if chain.is_empty() {
            self.focused = None;
            return;
        }

        let len = chain.len();
        let current = self
            .focused
            .and_then(|node| chain.iter().position(|&n| n == node));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };
        self.focused = Some(chain[next]);
    }

    /// Drops focus from a widget that can no longer hold it.
    fn settle_focus(&mut self) {
        if let Some(node) = self.focused {
            if !self.tree.get(node).can_focus() || !self.tree.is_displayed(node) {
                self.focused = None;
            }
        }
    }
}

/// A running application.
#[derive(Debug, Clone)]
pub struct App {
    class: String,
    title: String,
    sub_title: Option<String>,
    bindings: Vec<Binding>,
    base: Screen,
    stack: Vec<Screen>,
    screens: HashMap<String, Screen>,
    size: Size,
    dark: bool,
    running: bool,
    bells: usize,
    notifications: Vec<String>,
}

impl App {
    /// Instantiates the application declared by `entry`.
    ///
    /// Every screen declared in the document is composed up front so that
    /// `push_screen` only clones a ready tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidApp`] for unknown widget types, recursive
    /// custom widgets, duplicate ids or undeclared screens, and
    /// [`Error::InvalidAction`] / [`Error::InvalidSelector`] for malformed
    /// action strings.
    pub fn load(document: &AppDocument, entry: &AppDecl, size: Size) -> Result<Self> {
        let stylesheets = document
            .widget
            .iter()
            .filter_map(|decl| decl.css.as_deref())
            .chain(entry.css.as_deref())
            .chain(document.screen.iter().filter_map(|decl| decl.css.as_deref()));
        let composer = Composer {
            document,
            grid_sizes: stylesheets.flat_map(layout::grid_sizes).collect(),
        };

        let base = composer.screen("Screen", false, &[], &entry.widgets)?;
        let screens = document
            .screen
            .iter()
            .map(|decl| {
                composer
                    .screen(&decl.class, decl.modal, &decl.bindings, &decl.widgets)
                    .map(|screen| (decl.class.clone(), screen))
            })
            .collect::<Result<HashMap<_, _>>>()?;

        debug!(
            app = %entry.class,
            widgets = base.tree.len(),
            screens = screens.len(),
            "application composed"
        );

        Ok(Self {
            class: entry.class.clone(),
            title: entry.title.clone().unwrap_or_else(|| entry.class.clone()),
            sub_title: entry.sub_title.clone(),
            bindings: composer.bindings(&entry.bindings)?,
            base,
            stack: Vec::new(),
            screens,
            size,
            dark: true,
            running: true,
            bells: 0,
            notifications: Vec::new(),
        })
    }

    /// Application class name.
    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    /// `false` once `quit` has run.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the dark theme is active.
    #[must_use]
    pub const fn is_dark(&self) -> bool {
        self.dark
    }

    /// Number of times the bell rang.
    #[must_use]
    pub const fn bell_count(&self) -> usize {
        self.bells
    }

    /// Notifications posted so far, oldest first.
    #[must_use]
    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    /// Virtual terminal size.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Number of screens on the stack, default screen included.
    #[must_use]
    pub fn screen_depth(&self) -> usize {
        self.stack.len() + 1
    }

    /// The active screen.
    #[must_use]
    pub fn screen(&self) -> &Screen {
        self.stack.last().unwrap_or(&self.base)
    }

    fn screen_mut(&mut self) -> &mut Screen {
        match self.stack.last_mut() {
            Some(screen) => screen,
            None => &mut self.base,
        }
    }

    /// The focused widget of the active screen.
    #[must_use]
    pub fn focused(&self) -> Option<&Widget> {
        let screen = self.screen();
        screen.focused.map(|node| screen.tree.get(node))
    }

    /// Looks up a widget of the active screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector is malformed or matches nothing.
    pub fn query_one(&self, selector: &str) -> Result<&Widget> {
        let tree = &self.screen().tree;
        tree.query_one(selector).map(|node| tree.get(node))
    }

    /// Delivers one key press.
    ///
    /// Dispatch order: a focused input edits its value, a focused button or
    /// toggle activates on `enter`/`space`, then bindings of the focused
    /// widget and its ancestors, of the screen and of the app are searched.
    /// `tab`, `shift+tab` and `ctrl+q` have default meanings. Keys arriving
    /// after `quit` are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the bound action fails.
    pub fn press(&mut self, key: &str) -> Result<()> {
        if !self.running {
            debug!(key, "application exited, key ignored");
            return Ok(());
        }
        debug!(key, screen = %self.screen().class, "press");

        let screen = self.screen_mut();
        if let Some(node) = screen.focused {
            let widget = screen.tree.get_mut(node);
            if widget.kind == WidgetKind::Input {
                if let Some(edit) = Edit::from_key(key) {
                    edit.apply(&mut widget.value);
                    return Ok(());
                }
                if key == "enter" {
                    return match widget.on_submit.clone() {
                        Some(action) => self.run_action(&action),
                        None => Ok(()),
                    };
                }
            } else if widget.kind.is_activatable() && matches!(key, "enter" | "space") {
                return self.activate(node);
            }
        }

        if let Some(action) = self.binding_for(key).map(|b| b.action.clone()) {
            return self.run_action(&action);
        }

        match key {
            "tab" => self.run_action(&Action::FocusNext),
            "shift+tab" => self.run_action(&Action::FocusPrevious),
            "ctrl+q" => self.run_action(&Action::Quit),
            _ => {
                debug!(key, "unbound key");
                Ok(())
            }
        }
    }

    /// Clicks the first widget matching `selector`.
    ///
    /// Focusable widgets take focus; buttons and toggles activate. Clicks
    /// arriving after `quit` are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector is malformed, matches nothing, or
    /// the widget is hidden or outside the terminal.
    pub fn click(&mut self, selector: &str) -> Result<()> {
        if !self.running {
            debug!(selector, "application exited, click ignored");
            return Ok(());
        }
        debug!(selector, screen = %self.screen().class, "click");

        let size = self.size;
        let screen = self.screen_mut();
        let node = screen.tree.query_one(selector)?;

        let not_clickable = |reason: String| Error::NotClickable {
            selector: selector.to_string(),
            reason,
        };
        if !screen.tree.is_displayed(node) {
            return Err(not_clickable("widget is not displayed".to_string()));
        }
        let on_screen = layout::arrange(&screen.tree, size)
            .get(&node)
            .is_some_and(|region| region.is_visible_in(size));
        if !on_screen {
            return Err(not_clickable(format!(
                "widget lies outside the {size} terminal"
            )));
        }

        let widget = screen.tree.get(node);
        if widget.disabled {
            return Ok(());
        }
        if widget.can_focus() {
            screen.focused = Some(node);
        }
        if widget.kind.is_activatable() {
            return self.activate(node);
        }
        Ok(())
    }

    fn activate(&mut self, node: NodeId) -> Result<()> {
        let widget = self.screen_mut().tree.get_mut(node);
        if widget.disabled {
            return Ok(());
        }
        if matches!(widget.kind, WidgetKind::Checkbox | WidgetKind::Switch) {
            widget.checked = !widget.checked;
        }
        match widget.on_press.clone() {
            Some(action) => self.run_action(&action),
            None => Ok(()),
        }
    }

    /// Bindings in lookup order: focused widget and its ancestors, the
    /// active screen, then the app unless the screen is modal.
    fn binding_chain(&self) -> Vec<&Binding> {
        let screen = self.screen();
        let mut chain = Vec::new();

        if let Some(node) = screen.focused {
            for owner in std::iter::once(node).chain(screen.tree.ancestors(node)) {
                chain.extend(&screen.tree.get(owner).bindings);
            }
        }
        chain.extend(&screen.bindings);
        if !screen.modal {
            chain.extend(&self.bindings);
        }
        chain
    }

    fn binding_for(&self, key: &str) -> Option<&Binding> {
        self.binding_chain().into_iter().find(|b| b.key == key)
    }

    /// Runs one action against the active screen.
    ///
    /// # Errors
    ///
    /// Returns an error if a selector matches nothing, the target cannot
    /// perform the action, or the last screen would be popped.
    pub fn run_action(&mut self, action: &Action) -> Result<()> {
        debug!(action = %action, "run action");
        let name = action.name();

        match action {
            Action::Quit => self.running = false,
            Action::ToggleDark => self.dark = !self.dark,
            Action::Bell => self.bells += 1,
            Action::FocusNext => self.screen_mut().cycle_focus(true),
            Action::FocusPrevious => self.screen_mut().cycle_focus(false),
            Action::Focus(selector) => {
                let screen = self.screen_mut();
                let node = screen.tree.query_one(selector)?;
                if screen.tree.get(node).can_focus() && screen.tree.is_displayed(node) {
                    screen.focused = Some(node);
                }
            }
            Action::PushScreen(class) => {
                let screen = self
                    .screens
                    .get(class)
                    .cloned()
                    .ok_or_else(|| Error::InvalidApp {
                        message: format!("Screen '{class}' is not declared"),
                    })?;
                self.stack.push(screen);
            }
            Action::PopScreen | Action::Dismiss => {
                if self.stack.pop().is_none() {
                    return Err(Error::InvalidAction {
                        action: name.to_string(),
                        reason: "cannot pop the last screen".to_string(),
                    });
                }
            }
            Action::Notify(message) => self.notifications.push(message.clone()),
            Action::SetText { selector, text } => {
                self.update(selector, |w| {
                    set_text(w, text);
                    Ok(())
                })?;
            }
            Action::AppendText { selector, text } => {
                self.update(selector, |w| {
                    append_text(w, text);
                    Ok(())
                })?;
            }
            Action::Clear(selector) => {
                self.update(selector, |w| {
                    clear(w);
                    Ok(())
                })?;
            }
            Action::Increment(selector) => self.update(selector, |w| step(w, 1, name))?,
            Action::Decrement(selector) => self.update(selector, |w| step(w, -1, name))?,
            Action::Toggle(selector) => self.update(selector, |w| match w.kind {
                WidgetKind::Checkbox | WidgetKind::Switch => {
                    w.checked = !w.checked;
                    Ok(())
                }
                kind => Err(Error::InvalidAction {
                    action: name.to_string(),
                    reason: format!("{kind} cannot be toggled"),
                }),
            })?,
            Action::Show(selector) => self.update(selector, |w| {
                w.hidden = false;
                Ok(())
            })?,
            Action::Hide(selector) => self.update(selector, |w| {
                w.hidden = true;
                Ok(())
            })?,
            Action::AddClass { selector, class } => self.update(selector, |w| {
                if !w.has_class(class) {
                    w.classes.push(class.clone());
                }
                Ok(())
            })?,
            Action::RemoveClass { selector, class } => self.update(selector, |w| {
                w.classes.retain(|c| c != class);
                Ok(())
            })?,
            Action::ToggleClass { selector, class } => self.update(selector, |w| {
                if w.has_class(class) {
                    w.classes.retain(|c| c != class);
                } else {
                    w.classes.push(class.clone());
                }
                Ok(())
            })?,
        }

        Ok(())
    }

    /// Applies `change` to every widget of the active screen matching
    /// `selector`.
    fn update(
        &mut self,
        selector: &str,
        mut change: impl FnMut(&mut Widget) -> Result<()>,
    ) -> Result<()> {
        let screen = self.screen_mut();
        for node in screen.tree.query_all(selector)? {
            change(screen.tree.get_mut(node))?;
        }
        screen.settle_focus();
        Ok(())
    }

    fn chrome(&self) -> Chrome {
        let mut seen = Vec::new();
        let mut footer = Vec::new();
        for binding in self.binding_chain() {
            if seen.contains(&binding.key.as_str()) {
                continue;
            }
            seen.push(binding.key.as_str());
            if let (true, Some(description)) = (binding.show, &binding.description) {
                footer.push(format!("{} {description}", binding.key));
            }
        }

        Chrome {
            title: self.title.clone(),
            sub_title: self.sub_title.clone(),
            footer: footer.join("  "),
        }
    }

    /// Text of every displayed widget of the active screen in depth-first
    /// order, followed by notifications, joined by newlines.
    ///
    /// Returns `None` if nothing renders text.
    #[must_use]
    pub fn text_content(&self) -> Option<String> {
        let chrome = self.chrome();
        let tree = &self.screen().tree;

        let parts: Vec<String> = tree
            .walk_displayed()
            .into_iter()
            .filter_map(|node| tree.get(node).content(&chrome))
            .chain(self.notifications.iter().cloned())
            .collect();

        (!parts.is_empty()).then(|| parts.join("\n"))
    }
}

/// An edit a focused input applies for a key.
enum Edit {
    Insert(char),
    Backspace,
}

impl Edit {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "space" => Some(Self::Insert(' ')),
            "backspace" => Some(Self::Backspace),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_control() => Some(Self::Insert(c)),
                    _ => None,
                }
            }
        }
    }

    fn apply(self, value: &mut String) {
        match self {
            Self::Insert(c) => value.push(c),
            Self::Backspace => {
                value.pop();
            }
        }
    }
}

fn set_text(widget: &mut Widget, text: &str) {
    match widget.kind {
        WidgetKind::Input => text.clone_into(&mut widget.value),
        WidgetKind::Log | WidgetKind::ListView => {
            widget.items = text.lines().map(str::to_string).collect();
        }
        _ => text.clone_into(&mut widget.text),
    }
}

fn append_text(widget: &mut Widget, text: &str) {
    match widget.kind {
        WidgetKind::Input => widget.value.push_str(text),
        WidgetKind::Log | WidgetKind::ListView => widget.items.push(text.to_string()),
        _ => widget.text.push_str(text),
    }
}

fn clear(widget: &mut Widget) {
    match widget.kind {
        WidgetKind::Input => widget.value.clear(),
        WidgetKind::Log | WidgetKind::ListView => widget.items.clear(),
        WidgetKind::ProgressBar => widget.progress = 0.0,
        _ => widget.text.clear(),
    }
}

fn step(widget: &mut Widget, delta: i32, action: &str) -> Result<()> {
    if widget.kind == WidgetKind::ProgressBar {
        let next = (widget.progress + f64::from(delta)).max(0.0);
        widget.progress = widget.total.map_or(next, |total| next.min(total));
        return Ok(());
    }

    let current = widget.text.trim();
    let value = if current.is_empty() {
        0
    } else {
        current.parse::<i64>().map_err(|_| Error::InvalidAction {
            action: action.to_string(),
            reason: format!("'{current}' is not a number"),
        })?
    };
    widget.text = value.saturating_add(i64::from(delta)).to_string();
    Ok(())
}

/// Builds screens from document declarations.
struct Composer<'a> {
    document: &'a AppDocument,
    grid_sizes: Vec<GridSize>,
}

impl Composer<'_> {
    fn screen(
        &self,
        class: &str,
        modal: bool,
        bindings: &[BindingDecl],
        widgets: &[WidgetNode],
    ) -> Result<Screen> {
        let mut root = Widget::new(WidgetKind::Screen);
        class.clone_into(&mut root.type_name);

        let mut tree = WidgetTree::new(root);
        let top = tree.root();
        let mut expanding = Vec::new();
        for node in widgets {
            self.compose(&mut tree, top, node, &mut expanding)?;
        }
        layout::apply_grid_sizes(&mut tree, &self.grid_sizes);

        let mut screen = Screen {
            class: class.to_string(),
            modal,
            tree,
            bindings: self.bindings(bindings)?,
            focused: None,
        };
        screen.cycle_focus(true);
        Ok(screen)
    }

    fn compose(
        &self,
        tree: &mut WidgetTree,
        parent: NodeId,
        node: &WidgetNode,
        expanding: &mut Vec<String>,
    ) -> Result<()> {
        let invalid = |message: String| Error::InvalidApp { message };

        let (mut widget, decl) = if let Some(kind) = WidgetKind::from_name(&node.kind) {
            (Widget::new(kind), None)
        } else if let Some(decl) = self.document.find_widget(&node.kind) {
            if expanding.contains(&decl.class) {
                return Err(invalid(format!("Widget '{}' composes itself", decl.class)));
            }
            let kind = WidgetKind::from_name(&decl.base).ok_or_else(|| {
                invalid(format!(
                    "Widget '{}' extends unknown widget '{}'",
                    decl.class, decl.base
                ))
            })?;
            let mut widget = Widget::new(kind);
            widget.type_name.clone_from(&decl.class);
            widget.text = decl.text.clone().unwrap_or_default();
            widget.bindings = self.bindings(&decl.bindings)?;
            (widget, Some(decl))
        } else {
            return Err(invalid(format!("Unknown widget type '{}'", node.kind)));
        };

        if let Some(id) = &node.id {
            if tree.find_by_id(id).is_some() {
                return Err(invalid(format!("Duplicate widget id '{id}'")));
            }
        }

        widget.id.clone_from(&node.id);
        widget.classes.clone_from(&node.classes);
        if let Some(text) = &node.text {
            widget.text.clone_from(text);
        }
        widget.placeholder.clone_from(&node.placeholder);
        widget.value = node.value.clone().unwrap_or_default();
        widget.checked = node.checked;
        widget.progress = node.progress.unwrap_or(0.0);
        widget.total = node.total;
        widget.items.clone_from(&node.items);
        widget.variant.clone_from(&node.variant);
        widget.hidden = node.hidden;
        widget.disabled = node.disabled;
        widget.on_press = node.on_press.as_deref().map(|a| self.action(a)).transpose()?;
        widget.on_submit = node.on_submit.as_deref().map(|a| self.action(a)).transpose()?;

        let id = tree.insert(parent, widget);

        if let Some(decl) = decl {
            expanding.push(decl.class.clone());
            for child in &decl.children {
                self.compose(tree, id, child, expanding)?;
            }
            expanding.pop();
        }
        for child in &node.children {
            self.compose(tree, id, child, expanding)?;
        }
        Ok(())
    }

    fn bindings(&self, decls: &[BindingDecl]) -> Result<Vec<Binding>> {
        decls
            .iter()
            .map(|decl| {
                Ok(Binding {
                    key: decl.key.clone(),
                    action: self.action(&decl.action)?,
                    description: decl.description.clone(),
                    show: decl.show,
                })
            })
            .collect()
    }

    fn action(&self, text: &str) -> Result<Action> {
        let action: Action = text.parse()?;

        if let Action::PushScreen(class) = &action {
            if self.document.find_screen(class).is_none() {
                return Err(Error::InvalidApp {
                    message: format!("Screen '{class}' is not declared"),
                });
            }
        }
        if let Some(selector) = action.selector() {
            selector.parse::<Selector>()?;
        }
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORM: &str = r#"
[[widget]]
class = "Counter"
base = "Static"
text = "0"

[[widget.bindings]]
key = "r"
action = "set_text('Counter', '0')"

[[app]]
class = "FormApp"
title = "Form"

[[app.bindings]]
key = "q"
action = "quit"
description = "Quit"

[[app.bindings]]
key = "h"
action = "push_screen(HelpScreen)"
description = "Help"

[[app.bindings]]
key = "plus"
action = "increment('#count')"
show = false

[[app.widgets]]
type = "Header"

[[app.widgets]]
type = "Input"
id = "name"
placeholder = "Your name"
on_submit = "set_text('#status', 'Submitted')"

[[app.widgets]]
type = "Checkbox"
id = "agree"
text = "I agree"

[[app.widgets]]
type = "Counter"
id = "count"

[[app.widgets]]
type = "Button"
id = "save"
text = "Save"
on_press = "notify('Saved')"

[[app.widgets]]
type = "Static"
id = "status"
text = "Ready"

[[app.widgets]]
type = "Footer"

[[screen]]
class = "HelpScreen"
modal = true

[[screen.bindings]]
key = "escape"
action = "dismiss"
description = "Close"

[[screen.widgets]]
type = "Static"
text = "Help text"
"#;

    fn load(source: &str) -> Result<App> {
        let document = AppDocument::parse(source)?;
        App::load(&document, &document.app[0], Size::default())
    }

    fn text(app: &App, selector: &str) -> String {
        app.query_one(selector).unwrap().text.clone()
    }

    #[test]
    fn test_initial_render() {
        let app = load(FORM).unwrap();
        assert_eq!(
            app.text_content().unwrap(),
            "Form\nYour name\n[ ] I agree\n0\nSave\nReady\nq Quit  h Help"
        );
    }

    #[test]
    fn test_first_focusable_widget_is_focused() {
        let app = load(FORM).unwrap();
        assert_eq!(app.focused().unwrap().id.as_deref(), Some("name"));
    }

    #[test]
    fn test_input_consumes_printable_keys() {
        let mut app = load(FORM).unwrap();
        for key in ["A", "d", "a", "space", "q", "backspace", "backspace"] {
            app.press(key).unwrap();
        }
        assert!(app.is_running());
        assert_eq!(app.query_one("#name").unwrap().value, "Ada");

        app.press("enter").unwrap();
        assert_eq!(text(&app, "#status"), "Submitted");
    }

    #[test]
    fn test_tab_moves_focus_and_space_toggles() {
        let mut app = load(FORM).unwrap();
        app.press("tab").unwrap();
        assert_eq!(app.focused().unwrap().id.as_deref(), Some("agree"));

        app.press("space").unwrap();
        assert!(app.query_one("#agree").unwrap().checked);

        app.press("shift+tab").unwrap();
        assert_eq!(app.focused().unwrap().id.as_deref(), Some("name"));
        app.press("shift+tab").unwrap();
        assert_eq!(app.focused().unwrap().id.as_deref(), Some("save"));
    }

    #[test]
    fn test_app_binding_and_quit() {
        let mut app = load(FORM).unwrap();
        app.click("#save").unwrap();
        assert_eq!(app.notifications(), ["Saved"]);

        app.press("plus").unwrap();
        app.press("plus").unwrap();
        assert_eq!(text(&app, "#count"), "2");

        app.press("q").unwrap();
        assert!(!app.is_running());

        app.press("plus").unwrap();
        assert_eq!(text(&app, "#count"), "2");
    }

    #[test]
    fn test_custom_widget_binding_applies_when_focus_inside() {
        let source = r#"
[[widget]]
class = "Stepper"
base = "Container"

[[widget.bindings]]
key = "up"
action = "increment('#value')"

[[widget.children]]
type = "Static"
id = "value"
text = "5"

[[widget.children]]
type = "Button"
id = "inner"
text = "Step"

[[app]]
class = "StepApp"

[[app.widgets]]
type = "Stepper"
"#;
        let mut app = load(source).unwrap();
        app.press("up").unwrap();
        assert_eq!(text(&app, "#value"), "6");
    }

    #[test]
    fn test_modal_screen_suspends_app_bindings() {
        let mut app = load(FORM).unwrap();
        app.click("#save").unwrap();
        app.press("h").unwrap();
        assert_eq!(app.screen().class(), "HelpScreen");
        assert_eq!(app.screen_depth(), 2);
        assert_eq!(app.text_content().unwrap(), "Help text\nSaved");

        app.press("q").unwrap();
        assert!(app.is_running());

        app.press("escape").unwrap();
        assert_eq!(app.screen().class(), "Screen");
    }

    #[test]
    fn test_pop_last_screen_fails() {
        let mut app = load(FORM).unwrap();
        let err = app.run_action(&Action::PopScreen).unwrap_err();
        assert!(err.to_string().contains("cannot pop the last screen"));
    }

    #[test]
    fn test_click_errors() {
        let mut app = load(FORM).unwrap();
        assert!(matches!(
            app.click("#missing").unwrap_err(),
            Error::NoMatches { .. }
        ));

        app.run_action(&Action::Hide("#save".to_string())).unwrap();
        let err = app.click("#save").unwrap_err();
        assert!(err.to_string().contains("not displayed"));
    }

    #[test]
    fn test_click_off_screen_fails() {
        let mut source = String::from("[[app]]\nclass = \"Tall\"\n");
        for i in 0..12 {
            source.push_str(&format!(
                "\n[[app.widgets]]\ntype = \"Button\"\nid = \"b{i}\"\ntext = \"{i}\"\n"
            ));
        }
        let mut app = load(&source).unwrap();
        app.click("#b0").unwrap();
        let err = app.click("#b11").unwrap_err();
        assert!(err.to_string().contains("outside the 80x24 terminal"));
    }

    #[test]
    fn test_hidden_widgets_not_captured() {
        let mut app = load(FORM).unwrap();
        app.run_action(&Action::Hide("#status".to_string())).unwrap();
        assert!(!app.text_content().unwrap().contains("Ready"));

        app.run_action(&Action::Show("#status".to_string())).unwrap();
        assert!(app.text_content().unwrap().contains("Ready"));
    }

    #[test]
    fn test_class_actions() {
        let mut app = load(FORM).unwrap();
        let add = "add_class('#status', 'error')".parse().unwrap();
        app.run_action(&add).unwrap();
        assert!(app.query_one("Static.error").is_ok());

        let toggle = "toggle_class('#status', 'error')".parse().unwrap();
        app.run_action(&toggle).unwrap();
        assert!(app.query_one("Static.error").is_err());
    }

    #[test]
    fn test_increment_non_numeric_fails() {
        let mut app = load(FORM).unwrap();
        let err = app
            .run_action(&Action::Increment("#status".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("'Ready' is not a number"));
    }

    #[test]
    fn test_toggle_dark_and_bell() {
        let mut app = load(FORM).unwrap();
        assert!(app.is_dark());
        app.run_action(&Action::ToggleDark).unwrap();
        app.run_action(&Action::Bell).unwrap();
        assert!(!app.is_dark());
        assert_eq!(app.bell_count(), 1);
    }

    #[test]
    fn test_unknown_widget_type_rejected() {
        let err = load("[[app]]\nclass = \"A\"\n\n[[app.widgets]]\ntype = \"DataGrid\"\n")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid application: Unknown widget type 'DataGrid'"
        );
    }

    #[test]
    fn test_recursive_widget_rejected() {
        let source = r#"
[[widget]]
class = "Loop"
base = "Container"

[[widget.children]]
type = "Loop"

[[app]]
class = "A"

[[app.widgets]]
type = "Loop"
"#;
        let err = load(source).unwrap_err();
        assert!(err.to_string().contains("composes itself"));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let source = r#"
[[app]]
class = "A"

[[app.widgets]]
type = "Static"
id = "x"

[[app.widgets]]
type = "Label"
id = "x"
"#;
        let err = load(source).unwrap_err();
        assert!(err.to_string().contains("Duplicate widget id 'x'"));
    }

    #[test]
    fn test_invalid_actions_rejected_on_load() {
        let bad_action = "[[app]]\nclass = \"A\"\n\n[[app.bindings]]\nkey = \"x\"\naction = \"explode\"\n";
        assert!(matches!(
            load(bad_action).unwrap_err(),
            Error::InvalidAction { .. }
        ));

        let bad_screen =
            "[[app]]\nclass = \"A\"\n\n[[app.bindings]]\nkey = \"x\"\naction = \"push_screen(Nope)\"\n";
        assert!(load(bad_screen).unwrap_err().to_string().contains("Nope"));

        let bad_selector = "[[app]]\nclass = \"A\"\n\n[[app.bindings]]\nkey = \"x\"\naction = \"hide('a > b')\"\n";
        assert!(load(bad_selector).unwrap_err().is_selector_error());
    }
}
