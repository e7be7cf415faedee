use thiserror::Error;

/// Problems found while loading or configuring a quiz. All of them are
/// reported once, before the first question is shown.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("quiz has no questions")]
    Empty,

    #[error("question {question}: needs at least 2 options, found {count}")]
    TooFewOptions { question: usize, count: usize },

    #[error("question {question}: at most 26 options are supported, found {count}")]
    TooManyOptions { question: usize, count: usize },

    #[error("question {question}: correct option {correct} is out of range (0..{options})")]
    CorrectOutOfRange {
        question: usize,
        correct: usize,
        options: usize,
    },

    #[error("question {question}: question text is empty")]
    BlankText { question: usize },

    #[error("question {question}: exactly one option must be marked [x], found {marked}")]
    CorrectMarker { question: usize, marked: usize },

    #[error("question heading must be in format '## N. Question text', got: {0}")]
    Heading(String),

    #[error("no closing --- for frontmatter")]
    UnclosedFrontmatter,

    #[error("invalid frontmatter: {0}")]
    Frontmatter(String),

    #[error("question duration must be between 1 and 3600 seconds, got {0}")]
    InvalidDuration(u32),
}
