use std::path::Path;

use anyhow::Context;
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use tracing::debug;

use crate::error::QuizError;
use crate::model::*;

pub fn load_quiz_file(path: &Path) -> anyhow::Result<Quiz> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read quiz file {}", path.display()))?;
    let quiz = parse_quiz(&content)
        .with_context(|| format!("Invalid quiz file {}", path.display()))?;
    debug!(path = %path.display(), questions = quiz.questions.len(), "Quiz file loaded");
    Ok(quiz)
}

pub fn parse_quiz(content: &str) -> Result<Quiz, QuizError> {
    let (config, body) = match split_frontmatter(content)? {
        Some((frontmatter, body)) => {
            let config: QuizConfig = if frontmatter.is_empty() {
                QuizConfig::default()
            } else {
                serde_yaml::from_str(&frontmatter)
                    .map_err(|e| QuizError::Frontmatter(e.to_string()))?
            };
            (config, body)
        }
        None => (QuizConfig::default(), content.to_string()),
    };

    let (heading, preamble, questions) = parse_body(&body)?;

    let title = config
        .title
        .clone()
        .or(heading)
        .unwrap_or_else(|| "Quiz".to_string());

    Ok(Quiz {
        config,
        title,
        preamble,
        questions: QuestionSet::new(questions)?,
    })
}

fn split_frontmatter(content: &str) -> Result<Option<(String, String)>, QuizError> {
    let trimmed = content.trim_start();
    let Some(after_first) = trimmed.strip_prefix("---") else {
        return Ok(None);
    };

    let end_pos = after_first
        .find("\n---")
        .ok_or(QuizError::UnclosedFrontmatter)?;

    let fm = after_first[..end_pos].trim().to_string();
    let body = after_first[end_pos + 4..].to_string();

    Ok(Some((fm, body)))
}

/// Question under construction between two `##` headings.
#[derive(Default)]
struct Draft {
    number: usize,
    text: String,
    options: Vec<String>,
    marked: Vec<usize>,
    explanation: Vec<String>,
}

impl Draft {
    fn finish(self) -> Result<Question, QuizError> {
        if self.marked.len() != 1 {
            return Err(QuizError::CorrectMarker {
                question: self.number,
                marked: self.marked.len(),
            });
        }
        Ok(Question {
            text: self.text,
            options: self.options,
            correct: self.marked[0],
            explanation: self.explanation.join(" "),
        })
    }
}

fn parse_body(body: &str) -> Result<(Option<String>, Vec<String>, Vec<Question>), QuizError> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TASKLISTS);
    opts.insert(Options::ENABLE_STRIKETHROUGH);

    let mut title: Option<String> = None;
    let mut preamble: Vec<String> = Vec::new();
    let mut questions: Vec<Question> = Vec::new();
    let mut draft: Option<Draft> = None;

    let mut in_h1 = false;
    let mut in_h2 = false;
    let mut heading_text = String::new();
    let mut in_blockquote = false;
    let mut in_item = false;
    let mut item_text = String::new();
    let mut task_checked: Option<bool> = None;
    let mut in_paragraph = false;
    let mut paragraph_text = String::new();

    for event in Parser::new_ext(body, opts) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => match level {
                HeadingLevel::H1 => {
                    in_h1 = true;
                    heading_text.clear();
                }
                HeadingLevel::H2 => {
                    if let Some(d) = draft.take() {
                        questions.push(d.finish()?);
                    }
                    in_h2 = true;
                    heading_text.clear();
                }
                _ => {}
            },
            Event::End(TagEnd::Heading(level)) => match level {
                HeadingLevel::H1 => {
                    in_h1 = false;
                    if title.is_none() {
                        title = Some(heading_text.trim().to_string());
                    }
                }
                HeadingLevel::H2 => {
                    in_h2 = false;
                    let (number, text) = parse_h2_title(&heading_text)?;
                    draft = Some(Draft {
                        number,
                        text,
                        ..Draft::default()
                    });
                }
                _ => {}
            },
            Event::Start(Tag::BlockQuote(_)) => in_blockquote = true,
            Event::End(TagEnd::BlockQuote(_)) => in_blockquote = false,
            Event::Start(Tag::Item) => {
                in_item = true;
                item_text.clear();
                task_checked = None;
            }
            Event::End(TagEnd::Item) => {
                in_item = false;
                if let (Some(d), Some(checked)) = (draft.as_mut(), task_checked) {
                    if checked {
                        d.marked.push(d.options.len());
                    }
                    d.options.push(item_text.trim().to_string());
                }
                task_checked = None;
            }
            Event::TaskListMarker(checked) => task_checked = Some(checked),
            Event::Start(Tag::Paragraph) => {
                in_paragraph = true;
                paragraph_text.clear();
            }
            Event::End(TagEnd::Paragraph) => {
                in_paragraph = false;
                let text = paragraph_text.trim().to_string();
                if text.is_empty() || in_item {
                    continue;
                }
                match draft.as_mut() {
                    Some(d) if in_blockquote => d.explanation.push(text),
                    Some(d) => {
                        if !d.text.is_empty() {
                            d.text.push(' ');
                        }
                        d.text.push_str(&text);
                    }
                    None => preamble.push(text),
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if in_h1 || in_h2 {
                    heading_text.push_str(&text);
                } else if in_item {
                    item_text.push_str(&text);
                } else if in_paragraph {
                    paragraph_text.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if in_item {
                    item_text.push(' ');
                } else if in_paragraph {
                    paragraph_text.push(' ');
                }
            }
            _ => {}
        }
    }

    if let Some(d) = draft.take() {
        questions.push(d.finish()?);
    }

    Ok((title, preamble, questions))
}

fn parse_h2_title(text: &str) -> Result<(usize, String), QuizError> {
    let trimmed = text.trim();
    // Expected format: "1. Question text"
    let (num_str, rest) = trimmed
        .split_once('.')
        .ok_or_else(|| QuizError::Heading(trimmed.to_string()))?;
    let number: usize = num_str
        .trim()
        .parse()
        .map_err(|_| QuizError::Heading(trimmed.to_string()))?;
    Ok((number, rest.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_needs_number() {
        assert_eq!(
            parse_h2_title("3. Why?").unwrap(),
            (3, "Why?".to_string())
        );
        assert!(matches!(
            parse_h2_title("Why?"),
            Err(QuizError::Heading(_))
        ));
        assert!(matches!(
            parse_h2_title("x. Why?"),
            Err(QuizError::Heading(_))
        ));
    }

    #[test]
    fn frontmatter_is_optional() {
        let quiz = parse_quiz("## 1. Pick one\n\n- [x] yes\n- [ ] no\n").unwrap();
        assert_eq!(quiz.title, "Quiz");
        assert_eq!(quiz.config, QuizConfig::default());
        assert_eq!(quiz.questions.len(), 1);
    }

    #[test]
    fn unclosed_frontmatter() {
        assert_eq!(
            parse_quiz("---\ntitle: x\n## 1. Q\n").unwrap_err(),
            QuizError::UnclosedFrontmatter
        );
    }
}
