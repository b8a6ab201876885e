use crate::game::Grid;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

const EMPTY_SYMBOL: &str = "▯";

/// Foreground color for a tile value.
pub fn tile_color(value: u32) -> Color {
    match value {
        0 => Color::DarkGray,
        2 => Color::White,
        4 => Color::LightYellow,
        8 => Color::Yellow,
        16 => Color::LightRed,
        32 => Color::Red,
        64 => Color::Magenta,
        128 => Color::LightCyan,
        256 => Color::Cyan,
        512 => Color::LightBlue,
        1024 => Color::Blue,
        2048 => Color::LightGreen,
        _ => Color::Green,
    }
}

fn tile_style(value: u32) -> Style {
    let style = Style::default().fg(tile_color(value));
    if value >= 128 {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

/// One line per row. Each column is right-aligned to its widest value plus a
/// leading space, and rows end with a space before the frame.
pub fn board_lines(grid: &Grid) -> Vec<Line<'static>> {
    let widths = grid.column_widths();
    grid.rows()
        .map(|row| {
            let mut spans: Vec<Span<'static>> = row
                .iter()
                .zip(&widths)
                .map(|(&value, &width)| {
                    let text = if value == 0 {
                        EMPTY_SYMBOL.to_string()
                    } else {
                        value.to_string()
                    };
                    Span::styled(format!("{:>w$}", text, w = width + 1), tile_style(value))
                })
                .collect();
            spans.push(Span::raw(" "));
            Line::from(spans)
        })
        .collect()
}

/// Outer width of the framed board, borders included.
pub fn board_width(grid: &Grid) -> u16 {
    let inner: usize = grid.column_widths().iter().map(|w| w + 1).sum::<usize>() + 1;
    (inner + 2) as u16
}

/// Outer height of the framed board, borders included.
pub fn board_height(grid: &Grid) -> u16 {
    (grid.size() + 2) as u16
}

/// Render the grid inside a rounded frame filling `area`.
pub fn render_board(frame: &mut Frame, grid: &Grid, area: Rect) {
    let widget = Paragraph::new(board_lines(grid)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_board_lines_align_columns() {
        let grid = Grid::from_rows(&[[2u32, 1024], [0, 8]]).unwrap();
        let lines = board_lines(&grid);
        assert_eq!(line_text(&lines[0]), " 2 1024 ");
        assert_eq!(line_text(&lines[1]), " ▯    8 ");
    }

    #[test]
    fn test_zero_digits_inside_values_are_kept() {
        let grid = Grid::from_rows(&[[1024u32, 0], [0, 0]]).unwrap();
        assert_eq!(line_text(&board_lines(&grid)[0]), " 1024 ▯ ");
    }

    #[test]
    fn test_board_dimensions() {
        let grid = Grid::from_rows(&[[2u32, 1024], [0, 8]]).unwrap();
        // " 2 1024 " is 8 wide, plus two borders
        assert_eq!(board_width(&grid), 10);
        assert_eq!(board_height(&grid), 4);
    }

    #[test]
    fn test_tile_colors_distinguish_empty() {
        assert_eq!(tile_color(0), Color::DarkGray);
        assert_ne!(tile_color(2), tile_color(4));
        assert_eq!(tile_color(4096), Color::Green);
    }
}
