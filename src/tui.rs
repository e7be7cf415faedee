use std::io;
use std::time::Duration;

use anyhow::Context;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::CrosstermBackend;
use ratatui::Terminal;
use tracing::{debug, info};

use crate::state::*;
use crate::timer::Ticker;

pub fn run_tui(mut state: AppState) -> anyhow::Result<()> {
    enable_raw_mode().context("Cannot enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Cannot enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Cannot create terminal")?;

    let mut ticker = Ticker::per_second();
    let result = main_loop(&mut terminal, &mut state, &mut ticker);
    ticker.cancel();

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    info!(screen = ?state.screen, "Session closed");
    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    ticker: &mut Ticker,
) -> anyhow::Result<()> {
    loop {
        terminal
            .draw(|f| crate::ui::draw(f, state))
            .context("Draw error")?;

        if state.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(100)).context("Poll error")? {
            if let Event::Key(key) = event::read().context("Read error")? {
                if key.kind == KeyEventKind::Press {
                    let cmd = handle_key(key, state);
                    apply_timer(ticker, cmd);
                }
            }
        }

        // Re-check each tick: an earlier one may have settled the question.
        let pending: Vec<_> = ticker.try_iter().collect();
        for ev in pending {
            if ticker.accept(&ev) {
                let cmd = state.on_tick();
                apply_timer(ticker, cmd);
            }
        }
    }

    Ok(())
}

pub fn apply_timer(ticker: &mut Ticker, cmd: TimerCommand) {
    match cmd {
        TimerCommand::Keep => {}
        TimerCommand::Arm => {
            ticker.arm();
        }
        TimerCommand::Cancel => ticker.cancel(),
    }
}

pub fn handle_key(key: KeyEvent, state: &mut AppState) -> TimerCommand {
    if state.has_dialog() {
        return handle_dialog_key(key, state);
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c')) {
            state.push_dialog(Dialog::ConfirmQuit);
        }
        return TimerCommand::Keep;
    }

    if key.code == KeyCode::Char('?') {
        state.push_dialog(Dialog::Help);
        return TimerCommand::Keep;
    }

    match state.screen {
        Screen::Welcome => handle_welcome_key(key, state),
        Screen::Quiz => handle_quiz_key(key, state),
        Screen::Results => handle_results_key(key, state),
    }
}

fn handle_dialog_key(key: KeyEvent, state: &mut AppState) -> TimerCommand {
    match (state.top_dialog().copied(), key.code) {
        (Some(Dialog::ConfirmQuit), KeyCode::Enter | KeyCode::Char('y')) => {
            state.pop_dialog();
            state.quit()
        }
        (_, KeyCode::Esc | KeyCode::Char('n')) | (Some(Dialog::Help), _) => {
            state.pop_dialog();
            TimerCommand::Keep
        }
        _ => TimerCommand::Keep,
    }
}

fn handle_welcome_key(key: KeyEvent, state: &mut AppState) -> TimerCommand {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('s') => state.begin(),
        KeyCode::Char('q') | KeyCode::Esc => state.quit(),
        _ => TimerCommand::Keep,
    }
}

fn handle_quiz_key(key: KeyEvent, state: &mut AppState) -> TimerCommand {
    if state.engine.is_answered() {
        return match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('n') | KeyCode::Right => {
                state.next()
            }
            _ => TimerCommand::Keep,
        };
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            state.move_cursor(-1);
            TimerCommand::Keep
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.move_cursor(1);
            TimerCommand::Keep
        }
        KeyCode::Enter | KeyCode::Char(' ') => state.select_cursor(),
        KeyCode::Char(c) => match option_index_for_key(c) {
            Some(idx) => state.select(idx),
            None => {
                debug!(key = %c, "Unmapped key");
                TimerCommand::Keep
            }
        },
        _ => TimerCommand::Keep,
    }
}

fn handle_results_key(key: KeyEvent, state: &mut AppState) -> TimerCommand {
    match key.code {
        KeyCode::Char('r') => state.restart(),
        KeyCode::Enter | KeyCode::Char('q') | KeyCode::Esc => state.quit(),
        _ => TimerCommand::Keep,
    }
}

/// `a`..`z` and `1`..`9` pick an option directly. `j`/`k` are reserved
/// for cursor movement and only select when typed in upper case.
fn option_index_for_key(c: char) -> Option<usize> {
    match c {
        'j' | 'k' => None,
        'a'..='z' => Some((c as u8 - b'a') as usize),
        'A'..='Z' => Some((c as u8 - b'A') as usize),
        '1'..='9' => Some((c as u8 - b'1') as usize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::model::builtin::reference_quiz;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state() -> AppState {
        AppState::new(reference_quiz().unwrap(), &Settings::default())
    }

    #[test]
    fn letter_keys_answer_current_question() {
        let mut s = state();
        assert_eq!(handle_key(press(KeyCode::Enter), &mut s), TimerCommand::Arm);
        assert_eq!(handle_key(press(KeyCode::Char('c')), &mut s), TimerCommand::Cancel);
        assert_eq!(s.engine.score(), 1);
        // Further letters are ignored once answered.
        assert_eq!(handle_key(press(KeyCode::Char('a')), &mut s), TimerCommand::Keep);
        assert_eq!(handle_key(press(KeyCode::Char('n')), &mut s), TimerCommand::Arm);
        assert_eq!(s.engine.display_number(), 2);
    }

    #[test]
    fn out_of_range_key_is_ignored() {
        let mut s = state();
        handle_key(press(KeyCode::Enter), &mut s);
        assert_eq!(handle_key(press(KeyCode::Char('z')), &mut s), TimerCommand::Keep);
        assert!(!s.engine.is_answered());
    }

    #[test]
    fn quit_needs_confirmation() {
        let mut s = state();
        let ctrl_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        handle_key(ctrl_q, &mut s);
        assert_eq!(s.top_dialog(), Some(&Dialog::ConfirmQuit));
        handle_key(press(KeyCode::Esc), &mut s);
        assert!(!s.has_dialog());
        assert!(!s.should_quit);
        handle_key(ctrl_q, &mut s);
        assert_eq!(handle_key(press(KeyCode::Enter), &mut s), TimerCommand::Cancel);
        assert!(s.should_quit);
    }

    #[test]
    fn cursor_selection_and_restart() {
        let mut s = state();
        handle_key(press(KeyCode::Enter), &mut s);
        for _ in 0..5 {
            handle_key(press(KeyCode::Down), &mut s);
            handle_key(press(KeyCode::Down), &mut s);
            handle_key(press(KeyCode::Enter), &mut s);
            handle_key(press(KeyCode::Enter), &mut s);
        }
        assert_eq!(s.screen, Screen::Results);
        // Questions 1, 4 and 5 have their answer at index 2.
        assert_eq!(s.results.as_ref().unwrap().score, 3);
        assert_eq!(handle_key(press(KeyCode::Char('r')), &mut s), TimerCommand::Arm);
        assert_eq!(s.screen, Screen::Quiz);
    }

    #[test]
    fn key_mapping() {
        assert_eq!(option_index_for_key('a'), Some(0));
        assert_eq!(option_index_for_key('D'), Some(3));
        assert_eq!(option_index_for_key('1'), Some(0));
        assert_eq!(option_index_for_key('j'), None);
        assert_eq!(option_index_for_key('!'), None);
    }
}
