use std::io::{self, Write};

use crate::output::{Feedback, Message, SessionOutput};

const PROGRESS_BAR_WIDTH: usize = 20;

fn progress_bar(number: usize, total: usize) -> String {
    let filled = (number * PROGRESS_BAR_WIDTH) / total.max(1);
    format!(
        "[{}{}] {:.0}%",
        "#".repeat(filled),
        ".".repeat(PROGRESS_BAR_WIDTH - filled),
        number as f64 / total.max(1) as f64 * 100.0
    )
}

fn format_message(message: &Message) -> String {
    match message {
        Message::QuestionBegins {
            number,
            total,
            question,
            time_limit,
        } => {
            let mut text = format!(
                "\n{}\nQ{}. {}\n",
                progress_bar(*number, *total),
                number,
                question.prompt
            );
            for (index, option) in question.options().iter().enumerate() {
                text.push_str(&format!("  {}) {}\n", index + 1, option));
            }
            text.push_str(&format!(
                "Time left: {}s. Answer with 1-4 or the option text, (s)kip, (r)estart or (q)uit.",
                time_limit
            ));
            text
        }
        Message::TimeRemaining(seconds) => format!("Time left: {}s", seconds),
        Message::TimeUp => "Time's up!".to_owned(),
        Message::Answered(feedback) => feedback.to_string(),
        Message::ScoreUpdate(score) => format!("Score: {}", score),
        Message::Results(report) => format!(
            "\n== Quiz Results ==\n{}\nType (r)estart to play again or (q)uit to exit.",
            report
        ),
    }
}

/// Writes session messages to standard output.
#[derive(Clone, Debug, Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        TerminalOutput
    }
}

impl SessionOutput for TerminalOutput {
    fn say(&self, message: &Message) {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        if let Err(e) = writeln!(handle, "{}", format_message(message)) {
            log::error!("Could not write to terminal: {}", e);
        }
    }
}
