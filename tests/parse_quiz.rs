use std::fs;

use timedquiz::error::QuizError;
use timedquiz::model::QuizConfig;

#[test]
fn test_parse_sample_quiz() {
    let content = fs::read_to_string("fixtures/sample_quiz.md").expect("Cannot read fixture");
    let quiz = timedquiz::parser::parse_quiz(&content).unwrap();

    assert_eq!(quiz.title, "Systems Warm-up");
    assert_eq!(quiz.questions.len(), 3);

    let q1 = quiz.questions.get(0).unwrap();
    assert_eq!(q1.text, "Which system call creates a new process on Unix?");
    assert_eq!(q1.options, vec!["exec", "fork", "wait", "kill"]);
    assert_eq!(q1.correct, 1);
    assert!(q1.explanation.starts_with("fork duplicates"));

    let q2 = quiz.questions.get(1).unwrap();
    assert_eq!(q2.correct, 2);
    assert_eq!(q2.explanation, "SIGKILL always terminates the target process.");

    // Paragraphs inside a question extend its text; two options are enough.
    let q3 = quiz.questions.get(2).unwrap();
    assert_eq!(
        q3.text,
        "What does ls -a show that plain ls hides? Think about file names."
    );
    assert_eq!(q3.options.len(), 2);
    assert_eq!(q3.correct, 0);
}

#[test]
fn test_frontmatter_parsing() {
    let content = fs::read_to_string("fixtures/sample_quiz.md").expect("Cannot read fixture");
    let quiz = timedquiz::parser::parse_quiz(&content).unwrap();

    assert_eq!(
        quiz.config,
        QuizConfig {
            title: Some("Systems Warm-up".to_string()),
            duration: Some(20),
            warning: Some(4),
        }
    );
}

#[test]
fn test_preamble_parsing() {
    let content = fs::read_to_string("fixtures/sample_quiz.md").expect("Cannot read fixture");
    let quiz = timedquiz::parser::parse_quiz(&content).unwrap();

    assert_eq!(quiz.preamble.len(), 1);
    assert!(quiz.preamble[0].contains("Read every question carefully"));
}

#[test]
fn test_two_marked_answers_rejected() {
    let content = fs::read_to_string("fixtures/two_answers.md").expect("Cannot read fixture");
    let err = timedquiz::parser::parse_quiz(&content).unwrap_err();
    assert_eq!(
        err,
        QuizError::CorrectMarker {
            question: 1,
            marked: 2
        }
    );
}

#[test]
fn test_invalid_frontmatter_rejected() {
    let content = fs::read_to_string("fixtures/bad_frontmatter.md").expect("Cannot read fixture");
    let err = timedquiz::parser::parse_quiz(&content).unwrap_err();
    assert!(matches!(err, QuizError::Frontmatter(_)));
}

#[test]
fn test_heading_title_used_without_frontmatter_title() {
    let content = "# Capitals\n\n## 1. Capital of Italy?\n\n- [ ] Milan\n- [x] Rome\n";
    let quiz = timedquiz::parser::parse_quiz(content).unwrap();
    assert_eq!(quiz.title, "Capitals");
    assert!(quiz.preamble.is_empty());
}

#[test]
fn test_load_quiz_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.md");
    fs::write(&path, "# Nothing here\n").unwrap();

    let err = timedquiz::parser::load_quiz_file(&path).unwrap_err();
    let msg = format!("{:#}", err);
    assert!(msg.contains("empty.md"), "{}", msg);
    assert!(msg.contains("quiz has no questions"), "{}", msg);

    assert!(timedquiz::parser::load_quiz_file(&dir.path().join("missing.md")).is_err());
}
