use anyhow::{anyhow, Result};

use crate::quiz::definition::question::OPTION_COUNT;
use crate::quiz::definition::Question;


pub const FINISHED_HINT: &str = "The quiz is over. Type (r)estart to play again or (q)uit.";
pub const STALE_HINT: &str = "Time ran out on that question, answer the new one instead.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Answer(usize),
    Skip,
    Restart,
    Quit,
}

/// Reads one line typed by the player. Option text is only matched while a question is open.
pub fn parse(line: &str, question: Option<&Question>) -> Result<Command> {
    let line = line.trim();
    if line.is_empty() {
        return Err(anyhow!("Type an answer, (s)kip, (r)estart or (q)uit"));
    }

    match line.to_lowercase().as_str() {
        "s" | "skip" => return Ok(Command::Skip),
        "r" | "restart" => return Ok(Command::Restart),
        "q" | "quit" | "exit" => return Ok(Command::Quit),
        _ => (),
    };

    if let Ok(index) = line.parse::<usize>() {
        if index >= 1 && index <= OPTION_COUNT {
            return Ok(Command::Answer(index));
        }
        return Err(anyhow!("Pick an option between 1 and {}", OPTION_COUNT));
    }

    let question = question.ok_or_else(|| anyhow!("There is no active question"))?;
    if let Some(index) = question.find_option(line) {
        return Ok(Command::Answer(index));
    }

    let candidates = question.loose_matches(line);
    if candidates.len() > 1 {
        let candidates: Vec<String> = candidates.iter().map(|i| i.to_string()).collect();
        return Err(anyhow!(
            "\"{}\" could be options {}, type the exact text or the number",
            line,
            candidates.join(" or ")
        ));
    }
    Err(anyhow!("\"{}\" is not one of the options", line))
}

/// Whether a command was typed for a question that has since been replaced,
/// e.g. when the timer ran out while the player was typing. Once the new
/// question has been on screen for a tick, input is taken as meant for it.
pub fn is_stale(
    command: &Command,
    seen_generation: u64,
    current_generation: u64,
    question_is_fresh: bool,
) -> bool {
    match command {
        Command::Answer(_) | Command::Skip => {
            question_is_fresh && seen_generation != current_generation
        }
        Command::Restart | Command::Quit => false,
    }
}
