use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};

/// Split an area into header, content and footer rows.
pub fn create_standard_layout(
    area: Rect,
    header_height: u16,
    footer_height: u16,
) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Min(0),
            Constraint::Length(footer_height),
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

/// A centered rectangle taking the given percentages of `area`.
pub fn center_popup(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

/// A horizontally centered column at most `max_width` wide.
///
/// Screens render like a phone: a narrow column in the middle of the terminal.
pub fn phone_column(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    column
}
