use log::debug;

use crate::output::{Feedback, Message, SessionOutput};
use crate::quiz::definition::Question;
use crate::quiz::settings::Settings;
use crate::quiz::State;


const TIME_WARNINGS: &[u32] = &[20, 10, 5];

#[derive(Clone, Debug, PartialEq)]
pub struct GuessResult {
    pub score_delta: i32,
    pub is_correct: bool,
    pub feedback: Feedback,
}

#[derive(Clone, Debug)]
pub struct QuestionState<O> {
    question: Question,
    number: usize,
    total: usize,
    time_limit: u32,
    time_remaining: u32,
    correct_points: i32,
    incorrect_penalty: i32,
    output: O,
}

impl<O: SessionOutput> QuestionState<O> {
    pub fn new(
        question: Question,
        number: usize,
        total: usize,
        settings: &Settings,
        output: O,
    ) -> Self {
        QuestionState {
            question,
            number,
            total,
            time_limit: settings.time_limit,
            time_remaining: settings.time_limit,
            correct_points: settings.correct_points,
            incorrect_penalty: settings.incorrect_penalty,
            output,
        }
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    /// Scores a selection. `None` stands for no answer at all.
    pub fn grade(&self, selected: Option<usize>) -> GuessResult {
        let is_correct = self.question.is_correct(selected);
        let guess_result = if is_correct {
            GuessResult {
                score_delta: self.correct_points,
                is_correct,
                feedback: Feedback::Correct {
                    points: self.correct_points,
                },
            }
        } else {
            GuessResult {
                score_delta: -self.incorrect_penalty,
                is_correct,
                feedback: Feedback::Incorrect {
                    penalty: self.incorrect_penalty,
                    correct_answer: self.question.correct_answer().to_owned(),
                },
            }
        };
        debug!(
            "Question {} answered with {:?}: {:+}",
            self.number, selected, guess_result.score_delta
        );
        self.output.say(&Message::Answered(guess_result.feedback.clone()));
        guess_result
    }

    pub fn skip(&self) -> Feedback {
        debug!("Question {} skipped", self.number);
        self.output.say(&Message::Answered(Feedback::Skipped));
        Feedback::Skipped
    }
}

impl<O: SessionOutput> State for QuestionState<O> {
    fn on_begin(&mut self) {
        self.output.say(&Message::QuestionBegins {
            number: self.number,
            total: self.total,
            question: self.question.clone(),
            time_limit: self.time_limit,
        });
    }

    fn on_tick(&mut self) {
        if self.time_remaining == 0 {
            return;
        }
        self.time_remaining -= 1;
        if self.time_remaining == 0 {
            self.output.say(&Message::TimeUp);
        } else if TIME_WARNINGS.contains(&self.time_remaining) {
            self.output
                .say(&Message::TimeRemaining(self.time_remaining));
        }
    }

    fn is_over(&self) -> bool {
        self.time_remaining == 0
    }
}
