use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::state::{AppState, Screen};

pub fn key_bindings(state: &AppState) -> Vec<(&'static str, &'static str)> {
    match state.screen {
        Screen::Welcome => vec![("Enter", "start"), ("?", "help"), ("q", "quit")],
        Screen::Quiz if state.engine.is_answered() => vec![
            ("Enter/n", "next question"),
            ("?", "help"),
            ("Ctrl+Q", "quit"),
        ],
        Screen::Quiz => vec![
            ("a-d", "answer"),
            ("↑/↓", "move"),
            ("Enter", "choose"),
            ("?", "help"),
            ("Ctrl+Q", "quit"),
        ],
        Screen::Results => vec![("r", "restart"), ("Enter/q", "quit")],
    }
}

pub fn draw_keybar(f: &mut Frame, area: Rect, state: &AppState) {
    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, (key, action)) in key_bindings(state).iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {}", action)));
    }

    let line = Line::from(spans);
    let widget = Paragraph::new(line).style(Style::default().bg(Color::Rgb(20, 20, 20)));
    f.render_widget(widget, area);
}
