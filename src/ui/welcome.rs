use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::state::AppState;

pub fn draw_welcome(f: &mut Frame, area: Rect, state: &AppState) {
    let engine = &state.engine;

    let mut lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            state.title.as_str(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for para in &state.preamble {
        lines.push(Line::from(para.as_str()));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        format!(
            "{} questions · {} seconds each",
            engine.total(),
            engine.duration()
        ),
        Style::default().fg(Color::Yellow),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Enter] Start quiz",
        Style::default().fg(Color::Green),
    )));
    lines.push(Line::from(Span::styled(
        "[q] Exit",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default().borders(Borders::ALL);
    let widget = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}
