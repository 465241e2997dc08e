//! Click/tap handling for the Pencilsmith screen.
//!
//! Pure logic (row lookup, pixel conversion, clickable line lists) lives here,
//! away from web_sys DOM access, so it can be unit tested.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::text::Line;

/// A screen row that acts as a key press when tapped.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickTarget {
    pub row: u16,
    pub key: char,
}

/// Shared state between the render loop and the click handler.
#[derive(Debug, Default)]
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_target(&mut self, row: u16, key: char) {
        self.targets.push(ClickTarget { row, key });
    }

    /// Key for a terminal row. The first registered target wins.
    pub fn find_target_key(&self, row: u16) -> Option<char> {
        self.targets.iter().find(|t| t.row == row).map(|t| t.key)
    }
}

/// Convert a pixel Y coordinate (relative to the grid's top edge) to a
/// terminal row. `None` outside the grid or for degenerate sizes.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    if grid_height <= 0.0 || terminal_rows == 0 || click_y < 0.0 {
        return None;
    }
    let row = (click_y / (grid_height / terminal_rows as f64)) as u16;
    (row < terminal_rows).then_some(row)
}

/// Stack panels vertically below this width.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 70
}

/// Lines for a panel, some of which are bound to keys.
///
/// Render the lines, then call [`register_targets`](ClickableList::register_targets)
/// so each clickable line becomes a tap target on whatever row it lands.
#[derive(Default)]
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, key)` pairs.
    keys: Vec<(u16, char)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plain line.
    #[cfg(test)]
    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// Add a line that triggers `key` when tapped.
    pub fn push_clickable(&mut self, line: Line<'a>, key: char) {
        self.keys.push((self.lines.len() as u16, key));
        self.lines.push(line);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register targets for a bordered, unwrapped panel drawn in `area`.
    /// Lines that fall below the bottom border are skipped.
    pub fn register_targets(&self, area: Rect, cs: &mut ClickState) {
        let first_row = area.y + 1;
        let end = area.y + area.height.saturating_sub(1);
        for &(idx, key) in &self.keys {
            let row = first_row + idx;
            if row < end {
                cs.add_target(row, key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_to_row_basic() {
        // 30 rows, grid 450px tall → 15px per row
        assert_eq!(pixel_y_to_row(0.0, 450.0, 30), Some(0));
        assert_eq!(pixel_y_to_row(14.0, 450.0, 30), Some(0));
        assert_eq!(pixel_y_to_row(15.0, 450.0, 30), Some(1));
        assert_eq!(pixel_y_to_row(449.0, 450.0, 30), Some(29));
    }

    #[test]
    fn pixel_to_row_outside_grid() {
        assert_eq!(pixel_y_to_row(450.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(-1.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(10.0, 0.0, 30), None);
        assert_eq!(pixel_y_to_row(10.0, 450.0, 0), None);
    }

    #[test]
    fn find_target_key_first_match_wins() {
        let mut cs = ClickState::new();
        cs.add_target(5, 'p');
        cs.add_target(5, 'x');
        cs.add_target(6, 'w');
        assert_eq!(cs.find_target_key(5), Some('p'));
        assert_eq!(cs.find_target_key(6), Some('w'));
        assert_eq!(cs.find_target_key(7), None);
        cs.clear_targets();
        assert_eq!(cs.find_target_key(5), None);
    }

    #[test]
    fn narrow_layout_threshold() {
        assert!(is_narrow_layout(40));
        assert!(is_narrow_layout(69));
        assert!(!is_narrow_layout(70));
    }

    #[test]
    fn clickable_list_registers_rows_inside_border() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("Stats"));
        cl.push_clickable(Line::from("[P] Make pencil"), 'p');
        cl.push(Line::from(""));
        cl.push_clickable(Line::from("[X] Sell"), 'x');
        assert_eq!(cl.len(), 4);

        let mut cs = ClickState::new();
        cl.register_targets(Rect::new(0, 10, 40, 6), &mut cs);
        assert_eq!(cs.find_target_key(12), Some('p'));
        assert_eq!(cs.find_target_key(14), Some('x'));
        assert_eq!(cs.find_target_key(11), None);
    }

    #[test]
    fn clickable_list_skips_clipped_lines() {
        let mut cl = ClickableList::new();
        cl.push_clickable(Line::from("[A]"), 'a');
        cl.push_clickable(Line::from("[B]"), 'b');
        let mut cs = ClickState::new();
        // Height 3: one content row between the borders.
        cl.register_targets(Rect::new(0, 0, 20, 3), &mut cs);
        assert_eq!(cs.targets, vec![ClickTarget { row: 1, key: 'a' }]);
    }

    #[test]
    fn pixel_click_resolves_to_key() {
        let mut cs = ClickState::new();
        cs.terminal_rows = 20;
        cs.add_target(3, 's');
        let row = pixel_y_to_row(3.5 * 16.0, 320.0, cs.terminal_rows).unwrap();
        assert_eq!(cs.find_target_key(row), Some('s'));
    }
}
