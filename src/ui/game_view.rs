use crate::game::BoardEngine;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::board_widget;
use super::intro::TITLE;

/// Everything the view needs besides the engine.
pub struct ViewState<'a> {
    pub title_rows: usize,
    pub hint: Option<&'a str>,
    pub message: Option<(&'a str, Color)>,
    pub prompt: bool,
}

pub fn render(frame: &mut Frame, engine: &BoardEngine, view: &ViewState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TITLE.len() as u16), // Title
            Constraint::Length(1),                  // Hint
            Constraint::Length(board_widget::board_height(engine.grid())),
            Constraint::Length(1), // Message
            Constraint::Length(2), // Score
            Constraint::Length(3), // Controls
            Constraint::Min(0),
        ])
        .split(frame.area());

    render_title(frame, view.title_rows, chunks[0]);
    render_hint(frame, view.hint, chunks[1]);

    let board_area = centered(chunks[2], board_widget::board_width(engine.grid()));
    board_widget::render_board(frame, engine.grid(), board_area);

    render_message(frame, view.message, chunks[3]);
    render_score(frame, engine, chunks[4]);
    render_controls(frame, view.prompt, chunks[5]);
}

/// A horizontally centered slice of `area`, `width` columns wide.
fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

fn render_title(frame: &mut Frame, rows: usize, area: Rect) {
    let lines: Vec<Line> = TITLE.iter().take(rows).map(|l| Line::from(*l)).collect();
    let title = Paragraph::new(lines)
        .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, area);
}

fn render_hint(frame: &mut Frame, hint: Option<&str>, area: Rect) {
    let widget = Paragraph::new(hint.unwrap_or(""))
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn render_message(frame: &mut Frame, message: Option<(&str, Color)>, area: Rect) {
    let (text, color) = message.unwrap_or(("", Color::Reset));
    let widget = Paragraph::new(text)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn render_score(frame: &mut Frame, engine: &BoardEngine, area: Rect) {
    let lines = vec![
        Line::from(format!("Score: {}", engine.score())),
        Line::from(format!("Best: {}", engine.best_score())),
    ];
    let widget = Paragraph::new(lines)
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, prompt: bool, area: Rect) {
    let (text, style) = if prompt {
        (
            "Play again? 'y' for yes.",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )
    } else {
        ("←↑↓→/hjkl: Move  |  U: Undo  |  Q: Quit", Style::default())
    };

    let controls = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
