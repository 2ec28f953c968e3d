//! Card grid geometry.
//!
//! The first card is the lead story and fills row 0 on its own. Every later
//! row holds `columns` cards.

/// Minimum width of one card, borders included.
pub const CARD_MIN_WIDTH: u16 = 36;
/// Height of one card row, borders included.
pub const CARD_HEIGHT: u16 = 7;

pub fn columns_for_width(width: u16) -> usize {
    usize::from((width / CARD_MIN_WIDTH).max(1))
}

/// Number of rows needed for `len` cards.
pub fn row_count(len: usize, columns: usize) -> usize {
    match len {
        0 => 0,
        n => 1 + (n - 1).div_ceil(columns.max(1)),
    }
}

/// Index range of the cards in `row`.
pub fn row_range(row: usize, len: usize, columns: usize) -> std::ops::Range<usize> {
    let columns = columns.max(1);
    if row == 0 {
        return 0..len.min(1);
    }
    let start = (1 + (row - 1) * columns).min(len);
    let end = (start + columns).min(len);
    start..end
}

/// Row and column of card `index`.
pub fn position(index: usize, columns: usize) -> (usize, usize) {
    let columns = columns.max(1);
    if index == 0 {
        return (0, 0);
    }
    let offset = index - 1;
    (1 + offset / columns, offset % columns)
}

/// Index of the card one row above or below `index`, staying in the nearest column.
pub fn vertical_neighbor(index: usize, len: usize, columns: usize, down: bool) -> usize {
    if len == 0 {
        return 0;
    }
    let (row, col) = position(index, columns);
    let target_row = if down {
        row + 1
    } else if row == 0 {
        return index;
    } else {
        row - 1
    };

    let range = row_range(target_row, len, columns);
    if range.is_empty() {
        return index;
    }
    (range.start + col).min(range.end - 1)
}

/// First visible row so that `selected_row` is on screen.
pub fn scroll_for(selected_row: usize, current: usize, visible_rows: usize) -> usize {
    let visible_rows = visible_rows.max(1);
    if selected_row < current {
        selected_row
    } else if selected_row >= current + visible_rows {
        selected_row + 1 - visible_rows
    } else {
        current
    }
}
