//! Quiz session state machine.
//!
//! The engine is driven entirely by its caller: the adapter calls
//! [`QuizEngine::tick`] once per elapsed second while a question is
//! active, and forwards user actions as [`QuizEngine::submit_answer`] and
//! [`QuizEngine::advance`]. Nothing here sleeps or renders.

use thiserror::Error;
use tracing::{debug, info};

use crate::model::{Question, QuestionSet};

pub const QUESTION_DURATION: u32 = 15;
pub const WARNING_THRESHOLD: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    /// A question is on screen and the countdown is running.
    Active,
    /// The current question was answered or timed out.
    Answered,
    Finished,
}

/// Rejected transitions. The engine state is unchanged whenever one of
/// these is returned.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("quiz has not been started")]
    NotStarted,
    #[error("current question is already answered")]
    AlreadyAnswered,
    #[error("current question has not been answered yet")]
    NotAnswered,
    #[error("option {index} does not exist (question has {options} options)")]
    OptionOutOfRange { index: usize, options: usize },
    #[error("quiz is already finished")]
    Finished,
    #[error("quiz is not finished yet")]
    NotFinished,
}

/// Outcome of one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    /// `None` when the countdown ran out.
    pub selected: Option<usize>,
    pub correct_index: usize,
    pub is_correct: bool,
}

impl Verdict {
    pub fn timed_out(&self) -> bool {
        self.selected.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No question is counting down.
    Ignored,
    Running { remaining: u32 },
    TimedOut(Verdict),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Next { index: usize },
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionState {
    Neutral,
    Correct,
    Incorrect,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Correct,
    Wrong,
    TimeUp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub text: String,
}

impl Feedback {
    pub fn is_correct(&self) -> bool {
        self.kind == FeedbackKind::Correct
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultTier {
    Excellent,
    Good,
    NotBad,
    KeepPracticing,
}

impl ResultTier {
    /// Inclusive lower bounds, checked from the top tier down.
    pub fn from_score(score: usize, total: usize) -> Self {
        let scaled = score * 100;
        if total == 0 {
            ResultTier::KeepPracticing
        } else if scaled >= 80 * total {
            ResultTier::Excellent
        } else if scaled >= 60 * total {
            ResultTier::Good
        } else if scaled >= 40 * total {
            ResultTier::NotBad
        } else {
            ResultTier::KeepPracticing
        }
    }

    pub fn from_percentage(percentage: u32) -> Self {
        Self::from_score(percentage as usize, 100)
    }

    pub fn message(&self) -> &'static str {
        match self {
            ResultTier::Excellent => "Excellent! You're a quiz master! 🌟",
            ResultTier::Good => "Good job! Keep learning! 👍",
            ResultTier::NotBad => "Not bad! Room for improvement. 📚",
            ResultTier::KeepPracticing => "Keep practicing! You can do better! 💪",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResults {
    pub score: usize,
    pub wrong: usize,
    pub total: usize,
    pub timeouts: usize,
    pub total_time_taken: u32,
    /// Rounded down.
    pub percentage: u32,
    pub tier: ResultTier,
    pub history: Vec<Verdict>,
}

impl QuizResults {
    pub fn message(&self) -> &'static str {
        self.tier.message()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizEngine {
    questions: QuestionSet,
    duration: u32,
    warning: u32,
    phase: Phase,
    current_index: usize,
    score: usize,
    time_remaining: u32,
    total_time_taken: u32,
    history: Vec<Verdict>,
}

impl QuizEngine {
    pub fn new(questions: QuestionSet) -> Self {
        Self::with_timing(questions, QUESTION_DURATION, WARNING_THRESHOLD)
    }

    /// `duration` is clamped to at least one second, `warning` to the duration.
    pub fn with_timing(questions: QuestionSet, duration: u32, warning: u32) -> Self {
        let duration = duration.max(1);
        Self {
            questions,
            duration,
            warning: warning.min(duration),
            phase: Phase::NotStarted,
            current_index: 0,
            score: 0,
            time_remaining: duration,
            total_time_taken: 0,
            history: Vec::new(),
        }
    }

    pub fn start(&mut self) {
        self.current_index = 0;
        self.score = 0;
        self.total_time_taken = 0;
        self.history.clear();
        self.enter_question();
        info!(
            questions = self.questions.len(),
            duration = self.duration,
            "Quiz started"
        );
    }

    pub fn restart(&mut self) {
        info!(score = self.score, phase = ?self.phase, "Quiz restarted");
        self.start();
    }

    fn enter_question(&mut self) {
        self.phase = Phase::Active;
        self.time_remaining = self.duration;
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Active {
            return TickOutcome::Ignored;
        }

        self.time_remaining = self.time_remaining.saturating_sub(1);
        self.total_time_taken += 1;

        if self.time_remaining > 0 {
            return TickOutcome::Running {
                remaining: self.time_remaining,
            };
        }

        let correct_index = self.current_correct_index();
        let verdict = Verdict {
            selected: None,
            correct_index,
            is_correct: false,
        };
        self.finalize(verdict);
        debug!(question = self.current_index + 1, "Question timed out");
        TickOutcome::TimedOut(verdict)
    }

    pub fn submit_answer(&mut self, selected: usize) -> Result<Verdict, EngineError> {
        match self.phase {
            Phase::NotStarted => return Err(EngineError::NotStarted),
            Phase::Answered => return Err(EngineError::AlreadyAnswered),
            Phase::Finished => return Err(EngineError::Finished),
            Phase::Active => {}
        }

        let options = self.current_question().map_or(0, |q| q.options.len());
        if selected >= options {
            return Err(EngineError::OptionOutOfRange {
                index: selected,
                options,
            });
        }

        let correct_index = self.current_correct_index();
        let is_correct = selected == correct_index;
        if is_correct {
            self.score += 1;
        }
        let verdict = Verdict {
            selected: Some(selected),
            correct_index,
            is_correct,
        };
        self.finalize(verdict);
        debug!(
            question = self.current_index + 1,
            selected,
            is_correct,
            score = self.score,
            "Answer submitted"
        );
        Ok(verdict)
    }

    fn finalize(&mut self, verdict: Verdict) {
        self.phase = Phase::Answered;
        self.history.push(verdict);
    }

    pub fn advance(&mut self) -> Result<Advance, EngineError> {
        match self.phase {
            Phase::NotStarted => return Err(EngineError::NotStarted),
            Phase::Active => return Err(EngineError::NotAnswered),
            Phase::Finished => return Err(EngineError::Finished),
            Phase::Answered => {}
        }

        self.current_index += 1;
        if self.current_index == self.questions.len() {
            self.phase = Phase::Finished;
            info!(
                score = self.score,
                total = self.questions.len(),
                seconds = self.total_time_taken,
                "Quiz finished"
            );
            return Ok(Advance::Finished);
        }

        self.enter_question();
        Ok(Advance::Next {
            index: self.current_index,
        })
    }

    pub fn results(&self) -> Result<QuizResults, EngineError> {
        if self.phase != Phase::Finished {
            return Err(EngineError::NotFinished);
        }

        let total = self.questions.len();
        Ok(QuizResults {
            score: self.score,
            wrong: total - self.score,
            total,
            timeouts: self.history.iter().filter(|v| v.timed_out()).count(),
            total_time_taken: self.total_time_taken,
            percentage: (self.score * 100 / total) as u32,
            tier: ResultTier::from_score(self.score, total),
            history: self.history.clone(),
        })
    }

    fn current_correct_index(&self) -> usize {
        self.current_question().map_or(0, |q| q.correct)
    }

    // Observable state for the presentation layer.

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn display_number(&self) -> usize {
        (self.current_index + 1).min(self.questions.len())
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            Phase::Active | Phase::Answered => self.questions.get(self.current_index),
            Phase::NotStarted | Phase::Finished => None,
        }
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn total_time_taken(&self) -> u32 {
        self.total_time_taken
    }

    pub fn is_answered(&self) -> bool {
        self.phase == Phase::Answered
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn is_warning(&self) -> bool {
        self.phase == Phase::Active && self.time_remaining <= self.warning
    }

    pub fn progress_percent(&self) -> u16 {
        let total = self.questions.len();
        if total == 0 {
            return 0;
        }
        (self.current_index.min(total) * 100 / total) as u16
    }

    pub fn history(&self) -> &[Verdict] {
        &self.history
    }

    /// Verdict for the question on screen, once it has been finalised.
    pub fn current_verdict(&self) -> Option<&Verdict> {
        if self.phase == Phase::Answered {
            self.history.last()
        } else {
            None
        }
    }

    pub fn option_state(&self, idx: usize) -> OptionState {
        let Some(verdict) = self.current_verdict() else {
            return OptionState::Neutral;
        };
        if idx == verdict.correct_index {
            OptionState::Correct
        } else if verdict.selected == Some(idx) {
            OptionState::Incorrect
        } else {
            OptionState::Disabled
        }
    }

    pub fn feedback(&self) -> Option<Feedback> {
        let verdict = self.current_verdict()?;
        let question = self.current_question()?;
        let (kind, prefix) = if verdict.timed_out() {
            (FeedbackKind::TimeUp, "Time's up!")
        } else if verdict.is_correct {
            (FeedbackKind::Correct, "Correct!")
        } else {
            (FeedbackKind::Wrong, "Wrong!")
        };
        Some(Feedback {
            kind,
            text: format!("{} {}", prefix, question.explanation),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::builtin::reference_questions;

    fn engine() -> QuizEngine {
        QuizEngine::new(QuestionSet::new(reference_questions()).unwrap())
    }

    fn assert_invariants(e: &QuizEngine) {
        assert!(e.current_index() <= e.total());
        assert!(e.score() <= e.current_index() + usize::from(e.is_answered()));
        assert!(e.time_remaining() <= e.duration());
        if e.phase() == Phase::Active {
            assert!(e.time_remaining() > 0);
        }
    }

    #[test]
    fn starts_in_not_started() {
        let mut e = engine();
        assert_eq!(e.phase(), Phase::NotStarted);
        assert!(e.current_question().is_none());
        assert_eq!(e.tick(), TickOutcome::Ignored);
        assert_eq!(e.total_time_taken(), 0);
        assert_eq!(e.submit_answer(0), Err(EngineError::NotStarted));
    }

    #[test]
    fn full_countdown_times_out() {
        let mut e = engine();
        e.start();
        for i in 1..QUESTION_DURATION {
            assert_eq!(
                e.tick(),
                TickOutcome::Running {
                    remaining: QUESTION_DURATION - i
                }
            );
            assert_invariants(&e);
        }
        let outcome = e.tick();
        assert_eq!(
            outcome,
            TickOutcome::TimedOut(Verdict {
                selected: None,
                correct_index: 2,
                is_correct: false
            })
        );
        assert!(e.is_answered());
        assert_eq!(e.score(), 0);
        assert_eq!(e.total_time_taken(), QUESTION_DURATION);
        assert_eq!(e.tick(), TickOutcome::Ignored);
        assert_eq!(e.total_time_taken(), QUESTION_DURATION);
        assert_eq!(e.feedback().unwrap().kind, FeedbackKind::TimeUp);
    }

    #[test]
    fn second_submission_is_rejected() {
        let mut e = engine();
        e.start();
        assert!(e.submit_answer(2).unwrap().is_correct);
        assert_eq!(e.submit_answer(2), Err(EngineError::AlreadyAnswered));
        assert_eq!(e.score(), 1);
        assert_eq!(e.history().len(), 1);
    }

    #[test]
    fn out_of_range_selection_leaves_state_untouched() {
        let mut e = engine();
        e.start();
        let before = e.clone();
        assert_eq!(
            e.submit_answer(4),
            Err(EngineError::OptionOutOfRange {
                index: 4,
                options: 4
            })
        );
        assert_eq!(e, before);
    }

    #[test]
    fn answer_after_timeout_is_ignored() {
        let mut e = QuizEngine::with_timing(
            QuestionSet::new(reference_questions()).unwrap(),
            1,
            0,
        );
        e.start();
        assert!(matches!(e.tick(), TickOutcome::TimedOut(_)));
        assert_eq!(e.submit_answer(2), Err(EngineError::AlreadyAnswered));
        assert_eq!(e.score(), 0);
    }

    #[test]
    fn advance_requires_answer() {
        let mut e = engine();
        assert_eq!(e.advance(), Err(EngineError::NotStarted));
        e.start();
        assert_eq!(e.advance(), Err(EngineError::NotAnswered));
        e.submit_answer(0).unwrap();
        assert_eq!(e.advance(), Ok(Advance::Next { index: 1 }));
        assert_eq!(e.time_remaining(), QUESTION_DURATION);
        assert_eq!(e.phase(), Phase::Active);
    }

    #[test]
    fn option_states_after_wrong_answer() {
        let mut e = engine();
        e.start();
        assert_eq!(e.option_state(0), OptionState::Neutral);
        e.submit_answer(0).unwrap();
        assert_eq!(e.option_state(0), OptionState::Incorrect);
        assert_eq!(e.option_state(1), OptionState::Disabled);
        assert_eq!(e.option_state(2), OptionState::Correct);
        let fb = e.feedback().unwrap();
        assert!(!fb.is_correct());
        assert_eq!(
            fb.text,
            "Wrong! Paris is the capital and largest city of France."
        );
    }

    #[test]
    fn results_only_when_finished() {
        let mut e = engine();
        e.start();
        assert_eq!(e.results(), Err(EngineError::NotFinished));
        for _ in 0..e.total() {
            e.submit_answer(0).unwrap();
            e.advance().unwrap();
        }
        let r = e.results().unwrap();
        assert_eq!(r.score + r.wrong, r.total);
        assert_eq!(e.advance(), Err(EngineError::Finished));
        assert_eq!(e.submit_answer(0), Err(EngineError::Finished));
    }

    #[test]
    fn restart_matches_fresh_start() {
        let mut fresh = engine();
        fresh.start();

        let mut e = engine();
        e.start();
        e.tick();
        e.submit_answer(2).unwrap();
        e.advance().unwrap();
        e.tick();
        e.restart();
        assert_eq!(e, fresh);
    }

    #[test]
    fn tier_boundaries_are_inclusive() {
        assert_eq!(ResultTier::from_score(4, 5), ResultTier::Excellent);
        assert_eq!(ResultTier::from_score(3, 5), ResultTier::Good);
        assert_eq!(ResultTier::from_score(2, 5), ResultTier::NotBad);
        assert_eq!(ResultTier::from_score(1, 5), ResultTier::KeepPracticing);
        assert_eq!(ResultTier::from_percentage(100), ResultTier::Excellent);
        assert_eq!(ResultTier::from_percentage(79), ResultTier::Good);
        assert_eq!(ResultTier::from_percentage(40), ResultTier::NotBad);
        assert_eq!(ResultTier::from_percentage(39), ResultTier::KeepPracticing);
    }

    #[test]
    fn warning_kicks_in_at_threshold() {
        let mut e = engine();
        e.start();
        for _ in 0..(QUESTION_DURATION - WARNING_THRESHOLD - 1) {
            e.tick();
        }
        assert!(!e.is_warning());
        e.tick();
        assert_eq!(e.time_remaining(), WARNING_THRESHOLD);
        assert!(e.is_warning());
    }
}
