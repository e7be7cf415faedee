use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Gauge, Paragraph};
use ratatui::Frame;

use crate::state::{AppState, Screen};

pub fn draw_titlebar(f: &mut Frame, area: Rect, state: &AppState) {
    let engine = &state.engine;

    let timer_text = if state.screen == Screen::Quiz {
        let formatted = format!(" ⏱ {}s ", engine.time_remaining());
        if engine.is_warning() {
            Span::styled(
                formatted,
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(formatted, Style::default().fg(Color::Rgb(200, 200, 120)))
        }
    } else {
        Span::raw("")
    };

    let title_text = format!("[ {} ]", state.title);
    let title_len = title_text.chars().count();
    let timer_len = timer_text.content.chars().count();
    let title_span = Span::styled(
        title_text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    // Title centred on the full width, timer pushed to the right edge
    let available = area.width as usize;
    let center_pad = available.saturating_sub(title_len) / 2;
    let right_pad = available.saturating_sub(center_pad + title_len + timer_len);

    let line = Line::from(vec![
        Span::raw(" ".repeat(center_pad)),
        title_span,
        Span::raw(" ".repeat(right_pad)),
        timer_text,
    ]);

    let widget = Paragraph::new(line)
        .style(Style::default().bg(Color::DarkGray))
        .alignment(Alignment::Left);
    f.render_widget(widget, area);
}

pub fn draw_progress(f: &mut Frame, area: Rect, state: &AppState) {
    let engine = &state.engine;
    let percent = if state.screen == Screen::Results {
        100
    } else {
        engine.progress_percent()
    };
    let label = format!("Question {} of {}", engine.display_number(), engine.total());

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Rgb(30, 30, 30)))
        .percent(percent)
        .label(label);
    f.render_widget(gauge, area);
}
