use serde::{Deserialize, Serialize};

use crate::error::QuizError;

pub const MAX_OPTIONS: usize = 26;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    pub title: Option<String>,
    /// Seconds allowed per question.
    pub duration: Option<u32>,
    /// Remaining seconds at which the countdown turns red.
    pub warning: Option<u32>,
}

/// A quiz loaded from disk, or the built-in one.
#[derive(Debug, Clone)]
pub struct Quiz {
    pub config: QuizConfig,
    pub title: String,
    pub preamble: Vec<String>,
    pub questions: QuestionSet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
    pub correct: usize,
    pub explanation: String,
}

impl Question {
    pub fn new(
        text: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        correct: usize,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct,
            explanation: explanation.into(),
        }
    }

    fn validate(&self, number: usize) -> Result<(), QuizError> {
        if self.text.trim().is_empty() {
            return Err(QuizError::BlankText { question: number });
        }
        let count = self.options.len();
        if count < 2 {
            return Err(QuizError::TooFewOptions {
                question: number,
                count,
            });
        }
        if count > MAX_OPTIONS {
            return Err(QuizError::TooManyOptions {
                question: number,
                count,
            });
        }
        if self.correct >= count {
            return Err(QuizError::CorrectOutOfRange {
                question: number,
                correct: self.correct,
                options: count,
            });
        }
        Ok(())
    }
}

/// Validated, immutable list of questions for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Empty);
        }
        for (i, q) in questions.iter().enumerate() {
            q.validate(i + 1)?;
        }
        Ok(Self { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Question> {
        self.questions.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    pub fn as_slice(&self) -> &[Question] {
        &self.questions
    }
}

/// Display label for an option: 0 -> 'A', 1 -> 'B', ...
pub fn option_label(idx: usize) -> char {
    if idx < MAX_OPTIONS {
        (b'A' + idx as u8) as char
    } else {
        '?'
    }
}

pub mod builtin {
    use super::{Question, QuestionSet, Quiz, QuizConfig};
    use crate::error::QuizError;

    pub const TITLE: &str = "General Knowledge Quiz";

    pub fn reference_questions() -> Vec<Question> {
        vec![
            Question::new(
                "What is the capital of France?",
                ["London", "Berlin", "Paris", "Madrid"],
                2,
                "Paris is the capital and largest city of France.",
            ),
            Question::new(
                "Which planet is known as the Red Planet?",
                ["Venus", "Mars", "Jupiter", "Saturn"],
                1,
                "Mars is often called the 'Red Planet' due to iron oxide (rust) on its surface.",
            ),
            Question::new(
                "What is the largest mammal in the world?",
                ["African Elephant", "Blue Whale", "Giraffe", "Polar Bear"],
                1,
                "The Blue Whale is the largest mammal known to have ever lived.",
            ),
            Question::new(
                "In which year did World War II end?",
                ["1943", "1944", "1945", "1946"],
                2,
                "World War II ended in 1945 with the surrender of Germany and Japan.",
            ),
            Question::new(
                "What is the chemical symbol for gold?",
                ["Go", "Gd", "Au", "Ag"],
                2,
                "Au comes from the Latin word 'aurum' meaning gold.",
            ),
        ]
    }

    pub fn reference_quiz() -> Result<Quiz, QuizError> {
        Ok(Quiz {
            config: QuizConfig::default(),
            title: TITLE.to_string(),
            preamble: vec![
                "Answer each question before the countdown runs out.".to_string(),
            ],
            questions: QuestionSet::new(reference_questions())?,
        })
    }
}
