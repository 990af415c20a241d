//! Plain-text rendering of tree rows.

use checktree::{Row, SelectionState};

mod icons {
    pub const SELECTED: &str = "●";
    pub const UNSELECTED: &str = "○";
    pub const PARTIAL: &str = "◐";
    pub const EXPAND: &str = "▼";
    pub const COLLAPSE: &str = "▶";
}

mod icons_ascii {
    pub const SELECTED: &str = "[x]";
    pub const UNSELECTED: &str = "[ ]";
    pub const PARTIAL: &str = "[-]";
    pub const EXPAND: &str = "[v]";
    pub const COLLAPSE: &str = "[>]";
}

fn state_icon(state: SelectionState, supports_unicode: bool) -> &'static str {
    match (state, supports_unicode) {
        (SelectionState::Checked, true) => icons::SELECTED,
        (SelectionState::Checked, false) => icons_ascii::SELECTED,
        (SelectionState::Indeterminate, true) => icons::PARTIAL,
        (SelectionState::Indeterminate, false) => icons_ascii::PARTIAL,
        (SelectionState::Unchecked, true) => icons::UNSELECTED,
        (SelectionState::Unchecked, false) => icons_ascii::UNSELECTED,
    }
}

/// Render a single row
pub fn render_row(row: &Row, supports_unicode: bool) -> String {
    let indent = "  ".repeat(row.depth);

    let expand_icon = match (row.expandable, row.expanded, supports_unicode) {
        (false, _, true) => "  ".to_string(),
        (false, _, false) => "    ".to_string(),
        (true, true, true) => format!("{} ", icons::EXPAND),
        (true, true, false) => format!("{} ", icons_ascii::EXPAND),
        (true, false, true) => format!("{} ", icons::COLLAPSE),
        (true, false, false) => format!("{} ", icons_ascii::COLLAPSE),
    };

    let state = if row.selectable {
        state_icon(row.state, supports_unicode)
    } else if supports_unicode {
        " "
    } else {
        "   "
    };

    let mut suffix = String::new();
    if row.loading {
        suffix.push_str(" (loading)");
    }
    if row.relevant {
        suffix.push_str(" (match)");
    }

    format!("{indent}{expand_icon}{state} {}{suffix}", row.name)
}

/// Render all rows, one per line
pub fn render_rows(rows: &[Row], supports_unicode: bool) -> String {
    rows.iter()
        .map(|row| render_row(row, supports_unicode))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the status line with selection counts
pub fn render_status_bar(selected: usize, total: usize, supports_unicode: bool) -> String {
    format!(
        "Selected: {}/{} nodes\n\n{} = selected    {} = partial    {} = not selected",
        selected,
        total,
        state_icon(SelectionState::Checked, supports_unicode),
        state_icon(SelectionState::Indeterminate, supports_unicode),
        state_icon(SelectionState::Unchecked, supports_unicode),
    )
}
