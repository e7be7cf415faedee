use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use timedquiz::cli::Cli;
use timedquiz::config::Settings;
use timedquiz::model::{builtin, option_label, Quiz};
use timedquiz::state::AppState;
use timedquiz::{logging, parser, tui};

fn main() {
    if let Err(e) = run() {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !cli.check {
        logging::init(cli.log_file.clone());
    }

    let quiz = match &cli.quiz {
        Some(path) => parser::load_quiz_file(path)?,
        None => builtin::reference_quiz().context("Built-in quiz is invalid")?,
    };

    let settings = Settings::resolve(&cli, &quiz.config)?;

    if cli.check {
        print_summary(&quiz, &settings);
        return Ok(());
    }

    info!(
        title = %quiz.title,
        questions = quiz.questions.len(),
        duration = settings.duration,
        warning = settings.warning,
        "Starting quiz"
    );

    let state = AppState::new(quiz, &settings);
    tui::run_tui(state)
}

fn print_summary(quiz: &Quiz, settings: &Settings) {
    println!("{}", quiz.title);
    println!(
        "{} questions, {}s per question (warning at {}s)",
        quiz.questions.len(),
        settings.duration,
        settings.warning
    );
    for (i, q) in quiz.questions.iter().enumerate() {
        println!(
            "  {}. {} [{} options, answer {}]",
            i + 1,
            q.text,
            q.options.len(),
            option_label(q.correct)
        );
    }
}
