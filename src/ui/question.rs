use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::engine::{FeedbackKind, OptionState};
use crate::model::option_label;
use crate::state::AppState;

fn option_style(state: OptionState, under_cursor: bool) -> Style {
    match state {
        OptionState::Neutral if under_cursor => Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        OptionState::Neutral => Style::default().fg(Color::White),
        OptionState::Correct => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        OptionState::Incorrect => Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD | Modifier::CROSSED_OUT),
        OptionState::Disabled => Style::default().fg(Color::DarkGray),
    }
}

fn option_marker(state: OptionState) -> &'static str {
    match state {
        OptionState::Neutral | OptionState::Disabled => " ",
        OptionState::Correct => "✓",
        OptionState::Incorrect => "✗",
    }
}

pub fn question_lines(state: &AppState) -> Vec<Line<'static>> {
    let engine = &state.engine;
    let Some(question) = engine.current_question() else {
        return Vec::new();
    };

    let mut lines: Vec<Line<'static>> = vec![
        Line::from(Span::styled(
            format!("Question {}", engine.display_number()),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            question.text.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (i, option) in question.options.iter().enumerate() {
        let opt_state = engine.option_state(i);
        let under_cursor = !engine.is_answered() && i == state.option_cursor;
        let style = option_style(opt_state, under_cursor);
        lines.push(Line::from(vec![
            Span::raw(format!("  {} ", option_marker(opt_state))),
            Span::styled(format!("[{}] {}", option_label(i), option), style),
        ]));
    }

    if let Some(feedback) = engine.feedback() {
        let color = match feedback.kind {
            FeedbackKind::Correct => Color::Green,
            FeedbackKind::Wrong => Color::Red,
            FeedbackKind::TimeUp => Color::Yellow,
        };
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            feedback.text,
            Style::default().fg(color),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            if engine.display_number() == engine.total() {
                "[Enter] See results"
            } else {
                "[Enter] Next question"
            },
            Style::default().fg(Color::Cyan),
        )));
    }

    lines
}

pub fn draw_question(f: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let widget = Paragraph::new(question_lines(state))
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}
