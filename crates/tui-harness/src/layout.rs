//! Placement of widgets on the virtual terminal.
//!
//! Layout is coarse: it only answers whether a widget is on screen and so
//! can be clicked. Children stack vertically except inside
//! `Horizontal` and `HorizontalScroll`, which split their width evenly, and
//! `Grid`, which fills rows of `grid-size` equal columns. A grid row is as
//! tall as its tallest cell. `Header` docks to the top and `Footer` to the
//! bottom of their parent. Hidden widgets take no space.

use crate::selector::Selector;
use crate::widget::{NodeId, WidgetKind, WidgetTree};
use std::collections::HashMap;
use std::fmt;

/// Terminal size in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Columns
    pub width: u16,
    /// Rows
    pub height: u16,
}

impl Size {
    /// Creates a size.
    #[must_use]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A rectangle in terminal cells. Coordinates may exceed the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    /// Left column
    pub x: u32,
    /// Top row
    pub y: u32,
    /// Width in columns
    pub width: u32,
    /// Height in rows
    pub height: u32,
}

impl Region {
    /// Whether any cell of the region is on the terminal.
    #[must_use]
    pub fn is_visible_in(&self, size: Size) -> bool {
        self.width > 0
            && self.height > 0
            && self.x < u32::from(size.width)
            && self.y < u32::from(size.height)
    }
}

/// A `grid-size` declaration from a stylesheet rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSize {
    /// Widgets the rule applies to
    pub selector: Selector,
    /// Number of columns
    pub columns: u16,
}

/// Collects the `grid-size` declarations of a stylesheet, in order.
///
/// Only the column count (the first value) is kept. Rules whose selector
/// the query engine does not support, such as pseudo-classes, are skipped.
///
/// # Examples
///
/// ```
/// use tui_harness::layout::grid_sizes;
///
/// let sizes = grid_sizes("Grid { grid-size: 4 2; }\n#keys, .pad { grid-size: 3; }");
/// let columns: Vec<u16> = sizes.iter().map(|s| s.columns).collect();
/// assert_eq!(columns, [4, 3, 3]);
/// assert_eq!(sizes[1].selector.to_string(), "#keys");
/// ```
#[must_use]
pub fn grid_sizes(css: &str) -> Vec<GridSize> {
    let mut sizes = Vec::new();
    for rule in css.split('}') {
        let Some((selectors, body)) = rule.split_once('{') else {
            continue;
        };
        let columns = body
            .split(';')
            .filter_map(|declaration| declaration.split_once(':'))
            .filter(|(property, _)| property.trim() == "grid-size")
            .filter_map(|(_, value)| value.split_whitespace().next()?.parse::<u16>().ok())
            .filter(|&columns| columns > 0)
            .next_back();
        let Some(columns) = columns else {
            continue;
        };
        sizes.extend(
            selectors
                .split(',')
                .filter_map(|selector| selector.trim().parse::<Selector>().ok())
                .map(|selector| GridSize { selector, columns }),
        );
    }
    sizes
}

/// Sets the column count of every `Grid` matched by a rule; later rules win.
pub fn apply_grid_sizes(tree: &mut WidgetTree, sizes: &[GridSize]) {
    for size in sizes {
        for node in tree.query(&size.selector) {
            let widget = tree.get_mut(node);
            if widget.kind == WidgetKind::Grid {
                widget.grid_columns = size.columns;
            }
        }
    }
}

/// Computes the region of every displayed widget.
#[must_use]
pub fn arrange(tree: &WidgetTree, size: Size) -> HashMap<NodeId, Region> {
    let mut regions = HashMap::new();
    let screen = Region {
        x: 0,
        y: 0,
        width: u32::from(size.width),
        height: u32::from(size.height),
    };
    place(tree, tree.root(), screen, &mut regions);
    regions
}

fn place(tree: &WidgetTree, node: NodeId, region: Region, regions: &mut HashMap<NodeId, Region>) {
    regions.insert(node, region);

    let children: Vec<NodeId> = displayed_children(tree, node).collect();
    if children.is_empty() {
        return;
    }

    let mut top = region.y;
    let mut bottom = region.y + region.height;
    let mut flow = Vec::with_capacity(children.len());

    for child in children {
        match tree.get(child).kind {
            WidgetKind::Header => {
                place(tree, child, Region { y: top, height: 1, ..region }, regions);
                top += 1;
            }
            WidgetKind::Footer => {
                bottom = bottom.saturating_sub(1).max(top);
                place(tree, child, Region { y: bottom, height: 1, ..region }, regions);
            }
            _ => flow.push(child),
        }
    }

    let parent = tree.get(node);
    if parent.kind == WidgetKind::Grid {
        let mut y = top;
        for row in flow.chunks(usize::from(parent.grid_columns.max(1))) {
            let height = row_height(tree, row);
            place_row(tree, row, Region { y, height, ..region }, regions);
            y += height;
        }
    } else if matches!(
        parent.kind,
        WidgetKind::Horizontal | WidgetKind::HorizontalScroll
    ) {
        place_row(tree, &flow, Region { y: top, ..region }, regions);
    } else {
        let mut y = top;
        for child in flow {
            let height = intrinsic_height(tree, child);
            place(tree, child, Region { y, height, ..region }, regions);
            y += height;
        }
    }
}

/// Splits `band` into equal columns, one child per column.
///
/// The last column takes the remainder. Each child is as tall as its content.
fn place_row(
    tree: &WidgetTree,
    row: &[NodeId],
    band: Region,
    regions: &mut HashMap<NodeId, Region>,
) {
    let count = u32::try_from(row.len()).unwrap_or(u32::MAX);
    let share = band.width / count.max(1);
    let mut x = band.x;
    for (i, &child) in row.iter().enumerate() {
        let width = if i + 1 == row.len() {
            band.x + band.width - x
        } else {
            share
        };
        let height = intrinsic_height(tree, child);
        place(tree, child, Region { x, y: band.y, width, height }, regions);
        x += width;
    }
}

fn row_height(tree: &WidgetTree, row: &[NodeId]) -> u32 {
    row.iter()
        .map(|&c| intrinsic_height(tree, c))
        .max()
        .unwrap_or(0)
}

/// Rows a widget needs for its content.
fn intrinsic_height(tree: &WidgetTree, node: NodeId) -> u32 {
    let widget = tree.get(node);
    let displayed = || displayed_children(tree, node);

    match widget.kind {
        WidgetKind::Button
        | WidgetKind::Input
        | WidgetKind::Checkbox
        | WidgetKind::Switch
        | WidgetKind::Digits => 3,
        WidgetKind::Header | WidgetKind::Footer | WidgetKind::Rule | WidgetKind::ProgressBar => 1,
        WidgetKind::Log | WidgetKind::ListView => line_count(widget.items.len()),
        WidgetKind::Horizontal | WidgetKind::HorizontalScroll => {
            row_height(tree, &displayed().collect::<Vec<_>>())
        }
        WidgetKind::Grid => displayed()
            .collect::<Vec<_>>()
            .chunks(usize::from(widget.grid_columns.max(1)))
            .map(|row| row_height(tree, row))
            .sum(),
        kind if kind.is_container() => displayed().map(|c| intrinsic_height(tree, c)).sum(),
        _ => {
            let own = line_count(widget.text.lines().count());
            own + displayed().map(|c| intrinsic_height(tree, c)).sum::<u32>()
        }
    }
}

fn displayed_children(tree: &WidgetTree, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    tree.children(node)
        .iter()
        .copied()
        .filter(move |&c| !tree.get(c).hidden)
}

fn line_count(lines: usize) -> u32 {
    u32::try_from(lines.max(1)).unwrap_or(u32::MAX)
}
