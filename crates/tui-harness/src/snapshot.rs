//! Text snapshot comparison.

use similar::TextDiff;
use tui_core::ComparisonResult;

/// Compares two captures exactly.
///
/// Equal texts match. Otherwise the result carries a line-level unified diff
/// from `expected` to `actual`. No whitespace or case normalisation is
/// applied.
///
/// # Examples
///
/// ```
/// use tui_harness::snapshot::compare_snapshots;
///
/// assert!(compare_snapshots("Hello", "Hello").matches);
///
/// let result = compare_snapshots("Count: 1\n", "Count: 2\n");
/// let diff = result.diff.unwrap();
/// assert!(diff.contains("-Count: 1"));
/// assert!(diff.contains("+Count: 2"));
/// ```
#[must_use]
pub fn compare_snapshots(expected: &str, actual: &str) -> ComparisonResult {
    if expected == actual {
        return ComparisonResult::matching();
    }

    let diff = TextDiff::from_lines(expected, actual)
        .unified_diff()
        .header("expected", "actual")
        .to_string();
    ComparisonResult::differing(diff)
}
