//! Action strings.
//!
//! Bindings and widget callbacks refer to behaviour with action strings in
//! the `name(arg, ...)` form, for example `quit`, `push_screen(HelpScreen)`
//! or `set_text('#status', 'Saved')`. An optional `app.` or `screen.`
//! namespace prefix is accepted and ignored.
//!
//! Actions are parsed when the application is loaded, so a misspelled
//! action fails the load instead of a later key press.

use std::fmt;
use std::str::FromStr;
use tui_core::Error;

/// A parsed action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Exit the application.
    Quit,
    /// Flip between dark and light themes.
    ToggleDark,
    /// Ring the terminal bell.
    Bell,
    /// Move focus forward along the focus chain.
    FocusNext,
    /// Move focus backward along the focus chain.
    FocusPrevious,
    /// Focus the widget matching the selector.
    Focus(String),
    /// Push an instance of the named screen class.
    PushScreen(String),
    /// Pop the active screen.
    PopScreen,
    /// Dismiss the active screen; same as [`Action::PopScreen`].
    Dismiss,
    /// Post a notification.
    Notify(String),
    /// Replace the text of matching widgets.
    SetText {
        /// Target selector
        selector: String,
        /// New text
        text: String,
    },
    /// Append to the text of matching widgets (a new line for `Log`).
    AppendText {
        /// Target selector
        selector: String,
        /// Text to append
        text: String,
    },
    /// Clear text, input value or log lines.
    Clear(String),
    /// Add one to a counter or progress bar.
    Increment(String),
    /// Subtract one from a counter or progress bar.
    Decrement(String),
    /// Flip a checkbox or switch.
    Toggle(String),
    /// Display matching widgets.
    Show(String),
    /// Hide matching widgets.
    Hide(String),
    /// Add a style class.
    AddClass {
        /// Target selector
        selector: String,
        /// Class name
        class: String,
    },
    /// Remove a style class.
    RemoveClass {
        /// Target selector
        selector: String,
        /// Class name
        class: String,
    },
    /// Add the class if absent, remove it otherwise.
    ToggleClass {
        /// Target selector
        selector: String,
        /// Class name
        class: String,
    },
}

impl Action {
    /// Action name as written in action strings.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Quit => "quit",
            Self::ToggleDark => "toggle_dark",
            Self::Bell => "bell",
            Self::FocusNext => "focus_next",
            Self::FocusPrevious => "focus_previous",
            Self::Focus(_) => "focus",
            Self::PushScreen(_) => "push_screen",
            Self::PopScreen => "pop_screen",
            Self::Dismiss => "dismiss",
            Self::Notify(_) => "notify",
            Self::SetText { .. } => "set_text",
            Self::AppendText { .. } => "append_text",
            Self::Clear(_) => "clear",
            Self::Increment(_) => "increment",
            Self::Decrement(_) => "decrement",
            Self::Toggle(_) => "toggle",
            Self::Show(_) => "show",
            Self::Hide(_) => "hide",
            Self::AddClass { .. } => "add_class",
            Self::RemoveClass { .. } => "remove_class",
            Self::ToggleClass { .. } => "toggle_class",
        }
    }

    /// Selector the action targets, if any.
    #[must_use]
    pub fn selector(&self) -> Option<&str> {
        match self {
            Self::Focus(s)
            | Self::Clear(s)
            | Self::Increment(s)
            | Self::Decrement(s)
            | Self::Toggle(s)
            | Self::Show(s)
            | Self::Hide(s)
            | Self::SetText { selector: s, .. }
            | Self::AppendText { selector: s, .. }
            | Self::AddClass { selector: s, .. }
            | Self::RemoveClass { selector: s, .. }
            | Self::ToggleClass { selector: s, .. } => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| Error::InvalidAction {
            action: s.to_string(),
            reason,
        };

        let text = s.trim();
        let text = text
            .strip_prefix("app.")
            .or_else(|| text.strip_prefix("screen."))
            .unwrap_or(text);

        let (name, args) = match text.find('(') {
            Some(open) => {
                let inner = text[open + 1..]
                    .strip_suffix(')')
                    .ok_or_else(|| invalid("missing closing parenthesis".to_string()))?;
                (&text[..open], split_args(inner).map_err(invalid)?)
            }
            None => (text, Vec::new()),
        };

        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid("malformed action name".to_string()));
        }

        let count = args.len();
        let arity = |expected: usize| -> Result<(), Error> {
            if count == expected {
                Ok(())
            } else {
                Err(invalid(format!(
                    "expected {expected} argument(s), got {count}"
                )))
            }
        };
        let mut args = args.into_iter();
        let mut next = || args.next().unwrap_or_default();

        let action = match name {
            "quit" => arity(0).map(|()| Self::Quit),
            "toggle_dark" => arity(0).map(|()| Self::ToggleDark),
            "bell" => arity(0).map(|()| Self::Bell),
            "focus_next" => arity(0).map(|()| Self::FocusNext),
            "focus_previous" => arity(0).map(|()| Self::FocusPrevious),
            "pop_screen" => arity(0).map(|()| Self::PopScreen),
            "dismiss" => arity(0).map(|()| Self::Dismiss),
            "focus" => arity(1).map(|()| Self::Focus(next())),
            "push_screen" => arity(1).map(|()| Self::PushScreen(next())),
            "notify" => arity(1).map(|()| Self::Notify(next())),
            "clear" => arity(1).map(|()| Self::Clear(next())),
            "increment" => arity(1).map(|()| Self::Increment(next())),
            "decrement" => arity(1).map(|()| Self::Decrement(next())),
            "toggle" => arity(1).map(|()| Self::Toggle(next())),
            "show" => arity(1).map(|()| Self::Show(next())),
            "hide" => arity(1).map(|()| Self::Hide(next())),
            "set_text" => arity(2).map(|()| Self::SetText {
                selector: next(),
                text: next(),
            }),
            "append_text" => arity(2).map(|()| Self::AppendText {
                selector: next(),
                text: next(),
            }),
            "add_class" => arity(2).map(|()| Self::AddClass {
                selector: next(),
                class: next(),
            }),
            "remove_class" => arity(2).map(|()| Self::RemoveClass {
                selector: next(),
                class: next(),
            }),
            "toggle_class" => arity(2).map(|()| Self::ToggleClass {
                selector: next(),
                class: next(),
            }),
            other => Err(invalid(format!("unknown action '{other}'"))),
        }?;

        Ok(action)
    }
}

/// Splits an argument list on top-level commas.
///
/// Arguments may be bare words or single/double quoted strings with `\`
/// escapes.
fn split_args(inner: &str) -> Result<Vec<String>, String> {
    let mut args = Vec::new();
    let mut chars = inner.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let Some(&first) = chars.peek() else {
            break;
        };

        let arg = if first == '\'' || first == '"' {
            chars.next();
            let mut value = String::new();
            let mut closed = false;
            while let Some(c) = chars.next() {
                match c {
                    '\\' => {
                        if let Some(escaped) = chars.next() {
                            value.push(escaped);
                        }
                    }
                    c if c == first => {
                        closed = true;
                        break;
                    }
                    c => value.push(c),
                }
            }
            if !closed {
                return Err("unterminated string argument".to_string());
            }
            value
        } else {
            let mut value = String::new();
            while let Some(c) = chars.next_if(|c| *c != ',') {
                value.push(c);
            }
            value.trim_end().to_string()
        };

        args.push(arg);

        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        match chars.next() {
            Some(',') => {}
            None => break,
            Some(c) => return Err(format!("unexpected '{c}' after argument")),
        }
    }

    Ok(args)
}
