use crate::cli::Cli;
use crate::engine::{QUESTION_DURATION, WARNING_THRESHOLD};
use crate::error::QuizError;
use crate::model::QuizConfig;

pub const MAX_DURATION: u32 = 3600;

/// Effective session settings. Command-line flags win over the quiz
/// file's frontmatter, which wins over the built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub duration: u32,
    pub warning: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            duration: QUESTION_DURATION,
            warning: WARNING_THRESHOLD,
        }
    }
}

impl Settings {
    pub fn resolve(cli: &Cli, quiz: &QuizConfig) -> Result<Self, QuizError> {
        let defaults = Self::default();

        let duration = cli
            .duration
            .or(quiz.duration)
            .unwrap_or(defaults.duration);
        if !(1..=MAX_DURATION).contains(&duration) {
            return Err(QuizError::InvalidDuration(duration));
        }

        let warning = cli
            .warning
            .or(quiz.warning)
            .unwrap_or(defaults.warning)
            .min(duration);

        Ok(Self { duration, warning })
    }
}
