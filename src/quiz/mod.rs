use log::{debug, info};
use parking_lot::Mutex;
use rand::RngCore;
use std::fmt;
use std::sync::Arc;

use self::definition::*;
use self::error::QuizError;
use self::phase::*;
use self::report::FinalReport;
use self::settings::Settings;
use crate::output::{Feedback, Message, SessionOutput};

pub mod definition;
pub mod error;
mod phase;
pub mod report;
pub mod settings;

#[cfg(test)]
mod tests;

trait State {
    fn on_begin(&mut self);
    fn on_tick(&mut self);
    fn is_over(&self) -> bool;
}

enum Phase<O> {
    Question(QuestionState<O>),
    Results(ResultsState<O>),
}

impl<O: SessionOutput> Phase<O> {
    fn get_state(&mut self) -> &mut dyn State {
        match self {
            Phase::Question(s) => s,
            Phase::Results(s) => s,
        }
    }
}

impl<O: SessionOutput> fmt::Debug for Phase<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Question(s) => write!(f, "Active({}s left)", s.time_remaining()),
            Phase::Results(_) => write!(f, "Finished"),
        }
    }
}

/// What a session operation did.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The session is finished and the event was dropped.
    Ignored,
    /// Time went down, the question is still open.
    Ticked(u32),
    /// Moved on to the next question, or to the results.
    Advanced,
    /// The current question was answered, timed out or skipped.
    Feedback(Feedback),
}

pub type QuizHandle<O> = Arc<Mutex<Quiz<O>>>;

/// A single run through a shuffled question sequence.
///
/// The session never measures time itself. It expects `on_tick` once per time unit while a
/// question is open, and `generation` lets the caller spot ticks meant for an earlier question.
pub struct Quiz<O: SessionOutput> {
    questions: Arc<QuestionSet>,
    rng: Box<dyn RngCore + Send>,
    settings: Settings,
    order: Vec<Question>,
    current_index: usize,
    score: i32,
    correct_count: u32,
    incorrect_count: u32,
    generation: u64,
    current_phase: Phase<O>,
    output: O,
}

impl<O: SessionOutput> Quiz<O> {
    pub fn new(questions: Arc<QuestionSet>, rng: Box<dyn RngCore + Send>, output: O) -> Quiz<O> {
        Quiz::with_settings(questions, rng, output, Default::default())
    }

    pub fn with_settings(
        questions: Arc<QuestionSet>,
        mut rng: Box<dyn RngCore + Send>,
        output: O,
        settings: Settings,
    ) -> Quiz<O> {
        let order = questions.shuffled_order(&mut *rng);
        let first_question = QuestionState::new(
            order[0].clone(),
            1,
            order.len(),
            &settings,
            output.clone(),
        );
        let mut quiz = Quiz {
            questions,
            rng,
            settings,
            order,
            current_index: 0,
            score: 0,
            correct_count: 0,
            incorrect_count: 0,
            generation: 0,
            current_phase: Phase::Question(first_question),
            output,
        };
        info!("Entering quiz phase: {:?}", quiz.current_phase);
        quiz.current_phase.get_state().on_begin();
        quiz
    }

    fn set_current_phase(&mut self, phase: Phase<O>) {
        info!("Entering quiz phase: {:?}", phase);
        self.current_phase = phase;
        self.current_phase.get_state().on_begin();
    }

    pub fn submit_answer(&mut self, selected: Option<usize>) -> Outcome {
        let guess_result = match &self.current_phase {
            Phase::Question(state) => state.grade(selected),
            Phase::Results(_) => {
                debug!("Ignoring answer {:?}, the quiz is finished", selected);
                return Outcome::Ignored;
            }
        };

        self.score += guess_result.score_delta;
        if guess_result.is_correct {
            self.correct_count += 1;
        } else {
            self.incorrect_count += 1;
        }
        self.output.say(&Message::ScoreUpdate(self.score));

        self.advance();
        Outcome::Feedback(guess_result.feedback)
    }

    pub fn skip(&mut self) -> Outcome {
        let feedback = match &self.current_phase {
            Phase::Question(state) => state.skip(),
            Phase::Results(_) => {
                debug!("Ignoring skip, the quiz is finished");
                return Outcome::Ignored;
            }
        };
        self.advance();
        Outcome::Feedback(feedback)
    }

    pub fn on_tick(&mut self) -> Outcome {
        let state = self.current_phase.get_state();
        state.on_tick();
        if state.is_over() {
            info!("Question {} timed out", self.current_index + 1);
            self.submit_answer(None)
        } else if self.is_finished() {
            Outcome::Ignored
        } else {
            Outcome::Ticked(self.time_remaining())
        }
    }

    pub fn advance(&mut self) -> Outcome {
        if self.is_finished() {
            debug!("Ignoring advance, the quiz is finished");
            return Outcome::Ignored;
        }

        self.current_index += 1;
        self.generation += 1;

        if self.current_index == self.order.len() {
            let report = FinalReport::new(
                self.score,
                self.order.len(),
                self.correct_count,
                self.incorrect_count,
                &self.settings,
            );
            let state = ResultsState::new(report, self.output.clone());
            self.set_current_phase(Phase::Results(state));
        } else {
            self.begin_question();
        }
        Outcome::Advanced
    }

    pub fn restart(&mut self) {
        info!("Restarting quiz");
        self.order = self.questions.shuffled_order(&mut *self.rng);
        self.current_index = 0;
        self.score = 0;
        self.correct_count = 0;
        self.incorrect_count = 0;
        self.generation += 1;
        self.begin_question();
    }

    fn begin_question(&mut self) {
        let state = QuestionState::new(
            self.order[self.current_index].clone(),
            self.current_index + 1,
            self.order.len(),
            &self.settings,
            self.output.clone(),
        );
        self.set_current_phase(Phase::Question(state));
    }

    pub fn current_question(&self) -> Result<&Question, QuizError> {
        match &self.current_phase {
            Phase::Question(state) => Ok(state.question()),
            Phase::Results(_) => Err(QuizError::OutOfRange),
        }
    }

    /// Share of the run reached with the current question, in `(0, 1]`.
    pub fn progress_fraction(&self) -> f64 {
        let reached = (self.current_index + 1).min(self.order.len());
        reached as f64 / self.order.len() as f64
    }

    pub fn final_report(&self) -> Result<&FinalReport, QuizError> {
        match &self.current_phase {
            Phase::Results(state) => Ok(state.report()),
            Phase::Question(_) => Err(QuizError::NotFinished),
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.current_phase, Phase::Results(_))
    }

    pub fn time_remaining(&self) -> u32 {
        match &self.current_phase {
            Phase::Question(state) => state.time_remaining(),
            Phase::Results(_) => self.settings.time_limit,
        }
    }

    /// True until the current question has received its first tick.
    pub fn question_is_fresh(&self) -> bool {
        match &self.current_phase {
            Phase::Question(state) => state.time_remaining() == self.settings.time_limit,
            Phase::Results(_) => false,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    pub fn incorrect_count(&self) -> u32 {
        self.incorrect_count
    }

    pub fn order(&self) -> &Vec<Question> {
        &self.order
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Bumped on every question change, so a tick scheduled for an earlier question can be told apart.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
