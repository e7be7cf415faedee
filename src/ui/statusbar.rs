use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::state::AppState;
use crate::timer::format_seconds;

pub fn draw_statusbar(f: &mut Frame, area: Rect, state: &AppState) {
    let engine = &state.engine;
    let settled = engine.history().len();
    let timeouts = engine.history().iter().filter(|v| v.timed_out()).count();

    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled(
            format!("✓ {} correct", engine.score()),
            Style::default().fg(Color::Green),
        ),
        Span::raw("   "),
        Span::styled(
            format!("✗ {} wrong", settled - engine.score() - timeouts),
            Style::default().fg(Color::Red),
        ),
        Span::raw("   "),
        Span::styled(
            format!("⌛ {} timed out", timeouts),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("   "),
        Span::styled(
            format!("elapsed {}", format_seconds(engine.total_time_taken())),
            Style::default().fg(Color::White),
        ),
        Span::raw("   "),
        Span::styled("[?] help", Style::default().fg(Color::DarkGray)),
    ]);

    let widget = Paragraph::new(line).style(Style::default().bg(Color::Rgb(30, 30, 30)));
    f.render_widget(widget, area);
}
