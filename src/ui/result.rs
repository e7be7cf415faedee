use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::engine::{QuizResults, ResultTier};
use crate::model::{option_label, QuestionSet};
use crate::state::AppState;
use crate::timer::format_seconds;

fn tier_color(tier: ResultTier) -> Color {
    match tier {
        ResultTier::Excellent => Color::Green,
        ResultTier::Good => Color::Cyan,
        ResultTier::NotBad => Color::Yellow,
        ResultTier::KeepPracticing => Color::Red,
    }
}

fn review_lines(results: &QuizResults, questions: &QuestionSet) -> Vec<Line<'static>> {
    results
        .history
        .iter()
        .zip(questions.iter())
        .enumerate()
        .map(|(i, (verdict, question))| {
            let (mark, color) = if verdict.is_correct {
                ("✓", Color::Green)
            } else if verdict.timed_out() {
                ("⌛", Color::Yellow)
            } else {
                ("✗", Color::Red)
            };
            let answer = match verdict.selected {
                Some(idx) => format!("you: {}", option_label(idx)),
                None => "no answer".to_string(),
            };
            Line::from(vec![
                Span::styled(format!("{} ", mark), Style::default().fg(color)),
                Span::raw(format!("{}. {} ", i + 1, question.text)),
                Span::styled(
                    format!(
                        "({}, correct: {})",
                        answer,
                        option_label(verdict.correct_index)
                    ),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect()
}

pub fn draw_results(f: &mut Frame, area: Rect, state: &AppState) {
    let Some(results) = state.results.as_ref() else {
        return;
    };

    let finished = state
        .finished_at
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "just now".to_string());

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Quiz Complete",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} / {}  ({}%)", results.score, results.total, results.percentage),
            Style::default()
                .fg(tier_color(results.tier))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "Correct: {}    Wrong: {}    Timed out: {}",
            results.score, results.wrong, results.timeouts
        )),
        Line::from(format!(
            "Time taken: {}    Finished at {}",
            format_seconds(results.total_time_taken),
            finished
        )),
        Line::from(""),
        Line::from(Span::styled(
            results.message(),
            Style::default().fg(tier_color(results.tier)),
        )),
        Line::from(""),
    ];

    let review = review_lines(results, state.engine.questions());

    lines.push(Line::from(Span::styled(
        "[r] Restart    [Enter] Exit",
        Style::default().fg(Color::DarkGray),
    )));

    let header_height = (lines.len() as u16 + 2).min(area.height);
    let header_area = Rect::new(area.x, area.y, area.width, header_height);
    let review_area = Rect::new(
        area.x,
        area.y + header_height,
        area.width,
        area.height.saturating_sub(header_height),
    );

    let block = Block::default().borders(Borders::ALL);
    let widget = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(widget, header_area);

    if review_area.height > 0 {
        let block = Block::default().borders(Borders::ALL).title(" Review ");
        let widget = Paragraph::new(review)
            .block(block)
            .wrap(Wrap { trim: true });
        f.render_widget(widget, review_area);
    }
}
