use chrono::{DateTime, Local};
use tracing::debug;

use crate::config::Settings;
use crate::engine::{Advance, QuizEngine, QuizResults, TickOutcome};
use crate::model::Quiz;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Quiz,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    ConfirmQuit,
    Help,
}

/// What the event loop must do with the countdown after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Keep,
    /// A question just became active; start a fresh countdown.
    Arm,
    /// The question on screen is settled, or the session is over.
    Cancel,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub title: String,
    pub preamble: Vec<String>,
    pub engine: QuizEngine,
    pub dialog_stack: Vec<Dialog>,
    pub option_cursor: usize,
    pub results: Option<QuizResults>,
    pub finished_at: Option<DateTime<Local>>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(quiz: Quiz, settings: &Settings) -> Self {
        Self {
            screen: Screen::Welcome,
            title: quiz.title,
            preamble: quiz.preamble,
            engine: QuizEngine::with_timing(quiz.questions, settings.duration, settings.warning),
            dialog_stack: Vec::new(),
            option_cursor: 0,
            results: None,
            finished_at: None,
            should_quit: false,
        }
    }

    pub fn begin(&mut self) -> TimerCommand {
        self.engine.start();
        self.enter_quiz()
    }

    pub fn restart(&mut self) -> TimerCommand {
        self.engine.restart();
        self.enter_quiz()
    }

    fn enter_quiz(&mut self) -> TimerCommand {
        self.screen = Screen::Quiz;
        self.option_cursor = 0;
        self.results = None;
        self.finished_at = None;
        TimerCommand::Arm
    }

    pub fn select(&mut self, idx: usize) -> TimerCommand {
        match self.engine.submit_answer(idx) {
            Ok(_) => {
                self.option_cursor = idx;
                TimerCommand::Cancel
            }
            Err(e) => {
                debug!(error = %e, "Answer ignored");
                TimerCommand::Keep
            }
        }
    }

    pub fn select_cursor(&mut self) -> TimerCommand {
        self.select(self.option_cursor)
    }

    pub fn next(&mut self) -> TimerCommand {
        match self.engine.advance() {
            Ok(Advance::Next { .. }) => {
                self.option_cursor = 0;
                TimerCommand::Arm
            }
            Ok(Advance::Finished) => self.finish(),
            Err(e) => {
                debug!(error = %e, "Advance ignored");
                TimerCommand::Keep
            }
        }
    }

    fn finish(&mut self) -> TimerCommand {
        match self.engine.results() {
            Ok(results) => {
                self.results = Some(results);
                self.finished_at = Some(Local::now());
                self.screen = Screen::Results;
            }
            Err(e) => debug!(error = %e, "Results unavailable"),
        }
        TimerCommand::Cancel
    }

    pub fn on_tick(&mut self) -> TimerCommand {
        match self.engine.tick() {
            TickOutcome::Running { .. } => TimerCommand::Keep,
            TickOutcome::TimedOut(_) | TickOutcome::Ignored => TimerCommand::Cancel,
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let Some(q) = self.engine.current_question() else {
            return;
        };
        if self.engine.is_answered() {
            return;
        }
        let len = q.options.len() as isize;
        self.option_cursor = (self.option_cursor as isize + delta).rem_euclid(len) as usize;
    }

    pub fn quit(&mut self) -> TimerCommand {
        self.should_quit = true;
        TimerCommand::Cancel
    }

    pub fn has_dialog(&self) -> bool {
        !self.dialog_stack.is_empty()
    }

    pub fn top_dialog(&self) -> Option<&Dialog> {
        self.dialog_stack.last()
    }

    pub fn push_dialog(&mut self, dialog: Dialog) {
        self.dialog_stack.push(dialog);
    }

    pub fn pop_dialog(&mut self) -> Option<Dialog> {
        self.dialog_stack.pop()
    }
}
