use std::fmt;

use crate::quiz::definition::Question;
use crate::quiz::report::FinalReport;

#[cfg(test)]
pub mod mock;
pub mod terminal;

#[derive(Clone, Debug, PartialEq)]
pub enum Feedback {
    Correct { points: i32 },
    Incorrect { penalty: i32, correct_answer: String },
    Skipped,
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Correct { points } => write!(f, "Correct! You've earned {} points.", points),
            Feedback::Incorrect { correct_answer, .. } => {
                write!(f, "Incorrect. The correct answer was: {}", correct_answer)
            }
            Feedback::Skipped => write!(f, "Question skipped."),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    Answered(Feedback),
    QuestionBegins {
        number: usize,
        total: usize,
        question: Question,
        time_limit: u32,
    },
    Results(FinalReport),
    ScoreUpdate(i32),
    TimeRemaining(u32),
    TimeUp,
}

/// Presentation side of a quiz session.
pub trait SessionOutput: Clone {
    fn say(&self, message: &Message);
}
