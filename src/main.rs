use anyhow::{Context, Result};
use log::{error, info};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::env;
use std::io::{self, BufRead};
use std::sync::Arc;

use timed_quiz::bank;
use timed_quiz::clock::Ticker;
use timed_quiz::config::{Config, TICK_PERIOD_VAR};
use timed_quiz::input::{self, Command};
use timed_quiz::output::terminal::TerminalOutput;
use timed_quiz::quiz::definition::QuestionSet;
use timed_quiz::quiz::{Outcome, Quiz, QuizHandle};

fn run() -> Result<()> {
    let config = Config::from_args(env::args().skip(1), env::var(TICK_PERIOD_VAR).ok())?;

    let questions = match &config.questions_path {
        Some(path) => QuestionSet::open(path)?,
        None => bank::builtin().context("Built-in question bank is invalid")?,
    };

    let rng: Box<dyn RngCore + Send> = match config.seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(StdRng::from_entropy()),
    };

    info!(
        "Starting quiz with {} questions, one tick every {:?}",
        questions.len(),
        config.tick_period
    );
    let quiz: QuizHandle<TerminalOutput> = Arc::new(Mutex::new(Quiz::new(
        Arc::new(questions),
        rng,
        TerminalOutput::new(),
    )));
    let mut ticker = Ticker::start(quiz.clone(), config.tick_period)?;

    let stdin = io::stdin();
    let mut seen_generation = quiz.lock().generation();
    for line in stdin.lock().lines() {
        let line = line.context("Could not read from standard input")?;
        let mut quiz = quiz.lock();
        let command = input::parse(&line, quiz.current_question().ok());
        let outcome = match command {
            Ok(command)
                if input::is_stale(
                    &command,
                    seen_generation,
                    quiz.generation(),
                    quiz.question_is_fresh(),
                ) =>
            {
                println!("{}", input::STALE_HINT);
                None
            }
            Ok(Command::Answer(option)) => Some(quiz.submit_answer(Some(option))),
            Ok(Command::Skip) => Some(quiz.skip()),
            Ok(Command::Restart) => {
                quiz.restart();
                None
            }
            Ok(Command::Quit) => break,
            Err(e) => {
                println!("{}", e);
                None
            }
        };
        if outcome == Some(Outcome::Ignored) {
            println!("{}", input::FINISHED_HINT);
        }
        seen_generation = quiz.generation();
    }

    ticker.stop();
    info!("Goodbye");
    Ok(())
}

fn main() {
    pretty_env_logger::init();
    if let Err(e) = run() {
        error!("{:#}", e);
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
