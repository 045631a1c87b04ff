//! Widget tree.
//!
//! Widgets of one screen live in an arena ([`WidgetTree`]) addressed by
//! [`NodeId`]. The root node is the screen itself.

use crate::action::Action;
use crate::selector::Selector;
use std::fmt;
use tui_core::{Error, Result};

/// Built-in widget kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// Screen root
    Screen,
    /// Static text
    Static,
    /// Single line of text
    Label,
    /// Clickable button
    Button,
    /// Single line text input
    Input,
    /// Title bar docked at the top
    Header,
    /// Key binding bar docked at the bottom
    Footer,
    /// Labelled check box
    Checkbox,
    /// On/off switch
    Switch,
    /// Progress bar
    ProgressBar,
    /// Large digits
    Digits,
    /// Rendered Markdown
    Markdown,
    /// Append-only log
    Log,
    /// Horizontal rule
    Rule,
    /// Layout placeholder
    Placeholder,
    /// Vertical list of items
    ListView,
    /// Generic container
    Container,
    /// Children side by side
    Horizontal,
    /// Children stacked
    Vertical,
    /// Grid layout
    Grid,
    /// Centers children horizontally
    Center,
    /// Centers children vertically
    Middle,
    /// Scrolling container
    ScrollableContainer,
    /// Vertically scrolling container
    VerticalScroll,
    /// Horizontally scrolling container
    HorizontalScroll,
}

impl WidgetKind {
    /// Kinds that may appear in a composition tree.
    pub const COMPOSABLE: [Self; 24] = [
        Self::Static,
        Self::Label,
        Self::Button,
        Self::Input,
        Self::Header,
        Self::Footer,
        Self::Checkbox,
        Self::Switch,
        Self::ProgressBar,
        Self::Digits,
        Self::Markdown,
        Self::Log,
        Self::Rule,
        Self::Placeholder,
        Self::ListView,
        Self::Container,
        Self::Horizontal,
        Self::Vertical,
        Self::Grid,
        Self::Center,
        Self::Middle,
        Self::ScrollableContainer,
        Self::VerticalScroll,
        Self::HorizontalScroll,
    ];

    /// Type name used in documents and selectors.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Screen => "Screen",
            Self::Static => "Static",
            Self::Label => "Label",
            Self::Button => "Button",
            Self::Input => "Input",
            Self::Header => "Header",
            Self::Footer => "Footer",
            Self::Checkbox => "Checkbox",
            Self::Switch => "Switch",
            Self::ProgressBar => "ProgressBar",
            Self::Digits => "Digits",
            Self::Markdown => "Markdown",
            Self::Log => "Log",
            Self::Rule => "Rule",
            Self::Placeholder => "Placeholder",
            Self::ListView => "ListView",
            Self::Container => "Container",
            Self::Horizontal => "Horizontal",
            Self::Vertical => "Vertical",
            Self::Grid => "Grid",
            Self::Center => "Center",
            Self::Middle => "Middle",
            Self::ScrollableContainer => "ScrollableContainer",
            Self::VerticalScroll => "VerticalScroll",
            Self::HorizontalScroll => "HorizontalScroll",
        }
    }

    /// Looks up a composable kind by type name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::COMPOSABLE.into_iter().find(|k| k.name() == name)
    }

    /// Whether the kind only arranges children.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(
            self,
            Self::Screen
                | Self::Container
                | Self::Horizontal
                | Self::Vertical
                | Self::Grid
                | Self::Center
                | Self::Middle
                | Self::ScrollableContainer
                | Self::VerticalScroll
                | Self::HorizontalScroll
        )
    }

    /// Whether the kind can take keyboard focus.
    #[must_use]
    pub const fn is_focusable(self) -> bool {
        matches!(
            self,
            Self::Button | Self::Input | Self::Checkbox | Self::Switch | Self::ListView
        )
    }

    /// Whether `enter`, `space` and clicks activate the kind.
    #[must_use]
    pub const fn is_activatable(self) -> bool {
        matches!(self, Self::Button | Self::Checkbox | Self::Switch)
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A key binding with its parsed action.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// Key identifier
    pub key: String,
    /// Action run when the key is pressed
    pub action: Action,
    /// Label shown by `Footer`
    pub description: Option<String>,
    /// Whether `Footer` lists the binding
    pub show: bool,
}

/// Index of a widget in its [`WidgetTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// A live widget.
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    /// Built-in kind (the base kind for custom widgets)
    pub kind: WidgetKind,
    /// Type name: the custom class, or the kind name
    pub type_name: String,
    /// Unique id within the screen
    pub id: Option<String>,
    /// Style classes
    pub classes: Vec<String>,
    /// Text, label or title
    pub text: String,
    /// Input placeholder
    pub placeholder: Option<String>,
    /// Input value
    pub value: String,
    /// Toggle state
    pub checked: bool,
    /// Progress so far
    pub progress: f64,
    /// Progress total; indeterminate when `None`
    pub total: Option<f64>,
    /// List rows or log lines
    pub items: Vec<String>,
    /// Button variant
    pub variant: Option<String>,
    /// Not displayed, and takes no space
    pub hidden: bool,
    /// Ignores focus and activation
    pub disabled: bool,
    /// Action run on activation
    pub on_press: Option<Action>,
    /// Action run when an input is submitted
    pub on_submit: Option<Action>,
    /// Bindings active while focus is inside the widget
    pub bindings: Vec<Binding>,
    /// Columns of a `Grid`, from the `grid-size` style
    pub grid_columns: u16,
}

impl Widget {
    /// Creates an empty widget of the given kind.
    #[must_use]
    pub fn new(kind: WidgetKind) -> Self {
        Self {
            kind,
            type_name: kind.name().to_string(),
            id: None,
            classes: Vec::new(),
            text: String::new(),
            placeholder: None,
            value: String::new(),
            checked: false,
            progress: 0.0,
            total: None,
            items: Vec::new(),
            variant: None,
            hidden: false,
            disabled: false,
            on_press: None,
            on_submit: None,
            bindings: Vec::new(),
            grid_columns: 1,
        }
    }

    /// Whether the widget has the style class.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Whether the widget can take focus right now, ignoring ancestors.
    #[must_use]
    pub const fn can_focus(&self) -> bool {
        self.kind.is_focusable() && !self.disabled && !self.hidden
    }

    /// Text this widget contributes to a capture.
    ///
    /// `chrome` supplies the app-level state rendered by `Header` and
    /// `Footer`. Returns `None` for widgets that render no text.
    #[must_use]
    pub fn content(&self, chrome: &Chrome) -> Option<String> {
        let text = match self.kind {
            WidgetKind::Header => match &chrome.sub_title {
                Some(sub) => format!("{} - {sub}", chrome.title),
                None => chrome.title.clone(),
            },
            WidgetKind::Footer => chrome.footer.clone(),
            WidgetKind::Input if !self.value.is_empty() => self.value.clone(),
            WidgetKind::Input => self.placeholder.clone().unwrap_or_default(),
            WidgetKind::Checkbox => {
                let mark = if self.checked { 'X' } else { ' ' };
                format!("[{mark}] {}", self.text).trim_end().to_string()
            }
            WidgetKind::Switch => (if self.checked { "[ON]" } else { "[OFF]" }).to_string(),
            WidgetKind::ProgressBar => match self.total {
                Some(total) if total > 0.0 => {
                    let percent = (self.progress / total * 100.0).clamp(0.0, 100.0);
                    format!("{percent:.0}%")
                }
                _ => "--%".to_string(),
            },
            WidgetKind::Log | WidgetKind::ListView => self.items.join("\n"),
            WidgetKind::Placeholder if self.text.is_empty() => self
                .id
                .clone()
                .unwrap_or_else(|| WidgetKind::Placeholder.name().to_string()),
            WidgetKind::Rule => return None,
            kind if kind.is_container() => return None,
            _ => self.text.clone(),
        };

        (!text.is_empty()).then_some(text)
    }
}

/// App-level state rendered by `Header` and `Footer`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chrome {
    /// Application title
    pub title: String,
    /// Application subtitle
    pub sub_title: Option<String>,
    /// Bindings line
    pub footer: String,
}

#[derive(Debug, Clone, PartialEq)]
struct Node {
    widget: Widget,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena holding the widgets of one screen.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetTree {
    nodes: Vec<Node>,
}

impl WidgetTree {
    /// Creates a tree holding only `root`.
    #[must_use]
    pub fn new(root: Widget) -> Self {
        Self {
            nodes: vec![Node {
                widget: root,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// The root node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of widgets, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; a tree has at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Appends `widget` as the last child of `parent`.
    pub fn insert(&mut self, parent: NodeId, widget: Widget) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            widget,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Widget at `id`.
    #[must_use]
    pub fn get(&self, id: NodeId) -> &Widget {
        &self.nodes[id.0].widget
    }

    /// Mutable widget at `id`.
    pub fn get_mut(&mut self, id: NodeId) -> &mut Widget {
        &mut self.nodes[id.0].widget
    }

    /// Parent of `id`; `None` for the root.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Children of `id` in composition order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), |&node| self.parent(node))
    }

    /// All nodes in depth-first pre-order, root first.
    #[must_use]
    pub fn walk(&self) -> Vec<NodeId> {
        self.walk_filtered(|_| true)
    }

    /// Displayed nodes in depth-first pre-order; hidden subtrees are skipped.
    #[must_use]
    pub fn walk_displayed(&self) -> Vec<NodeId> {
        self.walk_filtered(|widget| !widget.hidden)
    }

    fn walk_filtered(&self, keep: impl Fn(&Widget) -> bool) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            if !keep(self.get(id)) {
                continue;
            }
            order.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        order
    }

    /// Whether `id` and all of its ancestors are displayed.
    #[must_use]
    pub fn is_displayed(&self, id: NodeId) -> bool {
        !self.get(id).hidden && self.ancestors(id).all(|a| !self.get(a).hidden)
    }

    /// Focusable widgets in focus-chain order.
    #[must_use]
    pub fn focus_chain(&self) -> Vec<NodeId> {
        self.walk_displayed()
            .into_iter()
            .filter(|&id| self.get(id).can_focus())
            .collect()
    }

    /// Every node matching `selector`, in depth-first order.
    #[must_use]
    pub fn query(&self, selector: &Selector) -> Vec<NodeId> {
        self.walk()
            .into_iter()
            .filter(|&id| selector.matches(self, id))
            .collect()
    }

    /// First node matching `selector`.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector is malformed or matches nothing.
    pub fn query_one(&self, selector: &str) -> Result<NodeId> {
        self.query_all(selector)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::NoMatches {
                selector: selector.to_string(),
            })
    }

    /// Every node matching the selector text; at least one.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector is malformed or matches nothing.
    pub fn query_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        let parsed: Selector = selector.parse()?;
        let found = self.query(&parsed);
        if found.is_empty() {
            return Err(Error::NoMatches {
                selector: selector.to_string(),
            });
        }
        Ok(found)
    }

    /// Looks up a widget by id.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.walk()
            .into_iter()
            .find(|&node| self.get(node).id.as_deref() == Some(id))
    }
}
