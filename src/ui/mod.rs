pub mod dialog;
pub mod keybar;
pub mod layout;
pub mod question;
pub mod result;
pub mod statusbar;
pub mod titlebar;
pub mod welcome;

use ratatui::layout::Rect;
use ratatui::Frame;

use crate::state::{AppState, Screen};

pub fn draw(f: &mut Frame, state: &AppState) {
    let area = f.area();
    let layout = layout::compute_layout(area);

    titlebar::draw_titlebar(f, layout.titlebar, state);
    match state.screen {
        Screen::Welcome => {
            let body = Rect::new(
                layout.progress.x,
                layout.progress.y,
                layout.progress.width,
                layout.progress.height + layout.main.height + layout.statusbar.height,
            );
            welcome::draw_welcome(f, body, state);
        }
        Screen::Quiz => {
            titlebar::draw_progress(f, layout.progress, state);
            question::draw_question(f, layout.main, state);
            statusbar::draw_statusbar(f, layout.statusbar, state);
        }
        Screen::Results => {
            titlebar::draw_progress(f, layout.progress, state);
            result::draw_results(f, layout.main, state);
            statusbar::draw_statusbar(f, layout.statusbar, state);
        }
    }
    keybar::draw_keybar(f, layout.keybar, state);

    if state.has_dialog() {
        dialog::draw_dialog(f, area, state);
    }
}
