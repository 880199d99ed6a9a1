use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

use super::*;
use crate::output::mock::MockSessionOutput;

struct ContextBuilder {
    question_count: usize,
    settings: Settings,
    seed: u64,
}

impl ContextBuilder {
    fn new() -> Self {
        ContextBuilder {
            question_count: 10,
            settings: Default::default(),
            seed: 0,
        }
    }

    fn questions(mut self, question_count: usize) -> Self {
        self.question_count = question_count;
        self
    }

    fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    fn build(self) -> Context {
        let raw_questions = (0..self.question_count).map(|i| {
            RawQuestion::new(
                &format!("Question {}", i),
                &["first", "second", "third", "fourth"],
                (i % 4) as i64 + 1,
            )
        });
        let questions = Arc::new(QuestionSet::build(raw_questions).unwrap());
        let output = MockSessionOutput::new();
        let rng = Box::new(StdRng::seed_from_u64(self.seed));
        let quiz = Quiz::with_settings(questions, rng, output.clone(), self.settings);
        Context { quiz, output }
    }
}

struct Context {
    quiz: Quiz<MockSessionOutput>,
    output: MockSessionOutput,
}

impl Context {
    fn correct_option(&self) -> usize {
        self.quiz.current_question().unwrap().correct_option()
    }

    fn wrong_option(&self) -> usize {
        self.correct_option() % 4 + 1
    }

    fn answer_correctly(&mut self) -> Outcome {
        let option = self.correct_option();
        self.quiz.submit_answer(Some(option))
    }

    fn answer_wrongly(&mut self) -> Outcome {
        let option = self.wrong_option();
        self.quiz.submit_answer(Some(option))
    }

    fn assert_invariants(&self) {
        let quiz = &self.quiz;
        assert!(quiz.current_index() <= quiz.order().len());
        assert!(quiz.time_remaining() <= quiz.settings().time_limit);
        assert!(
            (quiz.correct_count() + quiz.incorrect_count()) as usize <= quiz.current_index()
        );
    }

    fn assert_initial_state(&self) {
        let quiz = &self.quiz;
        assert_eq!(quiz.current_index(), 0);
        assert_eq!(quiz.score(), 0);
        assert_eq!(quiz.correct_count(), 0);
        assert_eq!(quiz.incorrect_count(), 0);
        assert_eq!(quiz.time_remaining(), 30);
        assert!(!quiz.is_finished());
    }
}

#[test]
fn starts_in_initial_state() {
    let ctx = ContextBuilder::new().build();
    ctx.assert_initial_state();
    assert_eq!(ctx.quiz.order().len(), 10);
    assert!(ctx.quiz.current_question().is_ok());
    assert_eq!(ctx.quiz.final_report(), Err(QuizError::NotFinished));
}

#[test]
fn announces_first_question() {
    let ctx = ContextBuilder::new().build();
    let question = ctx.quiz.current_question().unwrap().clone();
    assert_eq!(
        ctx.output.flush(),
        [Message::QuestionBegins {
            number: 1,
            total: 10,
            question,
            time_limit: 30,
        }]
    );
}

#[test]
fn correct_answer_gives_points() {
    let mut ctx = ContextBuilder::new().build();
    let outcome = ctx.answer_correctly();
    assert_eq!(outcome, Outcome::Feedback(Feedback::Correct { points: 5 }));
    assert_eq!(ctx.quiz.score(), 5);
    assert_eq!(ctx.quiz.correct_count(), 1);
    assert_eq!(ctx.quiz.incorrect_count(), 0);
    assert_eq!(ctx.quiz.current_index(), 1);
}

#[test]
fn wrong_answer_deducts_points_and_reveals_answer() {
    let mut ctx = ContextBuilder::new().build();
    let correct_answer = ctx.quiz.current_question().unwrap().correct_answer().to_owned();
    let outcome = ctx.answer_wrongly();
    assert_eq!(
        outcome,
        Outcome::Feedback(Feedback::Incorrect {
            penalty: 2,
            correct_answer: correct_answer.clone(),
        })
    );
    assert_eq!(ctx.quiz.score(), -2);
    assert_eq!(ctx.quiz.correct_count(), 0);
    assert_eq!(ctx.quiz.incorrect_count(), 1);
    assert!(ctx.output.contains_message(&Message::Answered(Feedback::Incorrect {
        penalty: 2,
        correct_answer,
    })));
}

#[test]
fn no_answer_is_scored_as_wrong() {
    let mut ctx = ContextBuilder::new().build();
    ctx.quiz.submit_answer(None);
    assert_eq!(ctx.quiz.score(), -2);
    assert_eq!(ctx.quiz.incorrect_count(), 1);
}

#[test]
fn out_of_range_selection_is_scored_as_wrong() {
    let mut ctx = ContextBuilder::new().build();
    ctx.quiz.submit_answer(Some(9));
    assert_eq!(ctx.quiz.score(), -2);
    assert_eq!(ctx.quiz.incorrect_count(), 1);
}

#[test]
fn score_deltas_do_not_depend_on_sign() {
    let mut ctx = ContextBuilder::new().build();
    ctx.answer_wrongly();
    ctx.answer_wrongly();
    assert_eq!(ctx.quiz.score(), -4);
    ctx.answer_correctly();
    assert_eq!(ctx.quiz.score(), 1);
    ctx.answer_wrongly();
    assert_eq!(ctx.quiz.score(), -1);
    ctx.answer_correctly();
    assert_eq!(ctx.quiz.score(), 4);
}

#[test]
fn skip_is_neutral() {
    let mut ctx = ContextBuilder::new().build();
    ctx.answer_correctly();
    ctx.answer_wrongly();
    let outcome = ctx.quiz.skip();
    assert_eq!(outcome, Outcome::Feedback(Feedback::Skipped));
    assert_eq!(ctx.quiz.score(), 3);
    assert_eq!(ctx.quiz.correct_count(), 1);
    assert_eq!(ctx.quiz.incorrect_count(), 1);
    assert_eq!(ctx.quiz.current_index(), 3);
    assert_eq!(ctx.quiz.time_remaining(), 30);
    ctx.assert_invariants();
}

#[test]
fn ticks_count_down() {
    let mut ctx = ContextBuilder::new().build();
    assert_eq!(ctx.quiz.on_tick(), Outcome::Ticked(29));
    assert_eq!(ctx.quiz.on_tick(), Outcome::Ticked(28));
    assert_eq!(ctx.quiz.time_remaining(), 28);
    assert_eq!(ctx.quiz.current_index(), 0);
}

#[test]
fn warns_when_time_runs_low() {
    let mut ctx = ContextBuilder::new().build();
    ctx.output.flush();
    for _ in 0..20 {
        ctx.quiz.on_tick();
    }
    assert_eq!(
        ctx.output.flush(),
        [Message::TimeRemaining(20), Message::TimeRemaining(10)]
    );
}

#[test]
fn answering_resets_timer() {
    let mut ctx = ContextBuilder::new().build();
    for _ in 0..12 {
        ctx.quiz.on_tick();
    }
    ctx.answer_correctly();
    assert_eq!(ctx.quiz.time_remaining(), 30);
}

#[test]
fn timeout_is_scored_like_no_answer() {
    let mut timed_out = ContextBuilder::new().seed(3).build();
    let mut unanswered = ContextBuilder::new().seed(3).build();

    let mut outcomes = Vec::new();
    for _ in 0..30 {
        outcomes.push(timed_out.quiz.on_tick());
    }
    let outcome = unanswered.quiz.submit_answer(None);

    assert_eq!(outcomes.last(), Some(&outcome));
    assert!(outcomes[..29].iter().all(|o| matches!(o, Outcome::Ticked(_))));
    assert_eq!(timed_out.quiz.score(), unanswered.quiz.score());
    assert_eq!(timed_out.quiz.current_index(), unanswered.quiz.current_index());
    assert_eq!(timed_out.quiz.correct_count(), unanswered.quiz.correct_count());
    assert_eq!(
        timed_out.quiz.incorrect_count(),
        unanswered.quiz.incorrect_count()
    );
    assert_eq!(timed_out.quiz.time_remaining(), unanswered.quiz.time_remaining());
    assert_eq!(
        timed_out.quiz.current_question(),
        unanswered.quiz.current_question()
    );
    assert!(timed_out.output.contains_message(&Message::TimeUp));
}

#[test]
fn single_question_timeout_finishes_quiz() {
    let mut ctx = ContextBuilder::new().questions(1).build();
    for _ in 0..30 {
        ctx.quiz.on_tick();
    }
    assert!(ctx.quiz.is_finished());
    assert_eq!(ctx.quiz.score(), -2);
    assert_eq!(ctx.quiz.incorrect_count(), 1);
    assert_eq!(ctx.quiz.correct_count(), 0);
    let report = ctx.quiz.final_report().unwrap();
    assert_eq!(report.score, -2);
    assert_eq!(report.total_possible, 5);
    assert_eq!(report.percentage, -40.0);
    assert!(!report.passed);
}

#[test]
fn mixed_answers_fail() {
    let mut ctx = ContextBuilder::new().build();
    for _ in 0..6 {
        ctx.answer_correctly();
        ctx.assert_invariants();
    }
    for _ in 0..4 {
        ctx.answer_wrongly();
        ctx.assert_invariants();
    }
    assert!(ctx.quiz.is_finished());
    let report = ctx.quiz.final_report().unwrap();
    assert_eq!(report.score, 22);
    assert_eq!(report.total_possible, 50);
    assert_eq!(report.percentage, 44.0);
    assert_eq!(report.correct_count, 6);
    assert_eq!(report.incorrect_count, 4);
    assert!(!report.passed);
}

#[test]
fn all_correct_answers_pass() {
    let mut ctx = ContextBuilder::new().build();
    for _ in 0..10 {
        ctx.answer_correctly();
    }
    let report = ctx.quiz.final_report().unwrap().clone();
    assert_eq!(report.score, 50);
    assert_eq!(report.percentage, 100.0);
    assert!(report.passed);
    assert!(ctx.output.contains_message(&Message::Results(report)));
}

#[test]
fn exactly_sixty_percent_passes() {
    let mut ctx = ContextBuilder::new().questions(5).build();
    for _ in 0..3 {
        ctx.answer_correctly();
    }
    ctx.quiz.skip();
    ctx.quiz.skip();
    let report = ctx.quiz.final_report().unwrap();
    assert_eq!(report.percentage, 60.0);
    assert!(report.passed);
}

#[test]
fn finished_quiz_ignores_late_events() {
    let mut ctx = ContextBuilder::new().questions(2).build();
    ctx.answer_correctly();
    ctx.answer_wrongly();
    assert!(ctx.quiz.is_finished());
    let report = ctx.quiz.final_report().unwrap().clone();
    let generation = ctx.quiz.generation();
    ctx.output.flush();

    assert_eq!(ctx.quiz.submit_answer(Some(1)), Outcome::Ignored);
    assert_eq!(ctx.quiz.submit_answer(None), Outcome::Ignored);
    assert_eq!(ctx.quiz.skip(), Outcome::Ignored);
    assert_eq!(ctx.quiz.on_tick(), Outcome::Ignored);
    assert_eq!(ctx.quiz.advance(), Outcome::Ignored);
    assert_eq!(ctx.quiz.advance(), Outcome::Ignored);

    assert_eq!(ctx.quiz.score(), 3);
    assert_eq!(ctx.quiz.correct_count(), 1);
    assert_eq!(ctx.quiz.incorrect_count(), 1);
    assert_eq!(ctx.quiz.current_index(), 2);
    assert_eq!(ctx.quiz.generation(), generation);
    assert_eq!(ctx.quiz.final_report().unwrap(), &report);
    assert!(ctx.output.flush().is_empty());
    ctx.assert_invariants();
}

#[test]
fn results_are_announced_once() {
    let mut ctx = ContextBuilder::new().questions(1).build();
    ctx.answer_correctly();
    ctx.quiz.advance();
    ctx.quiz.on_tick();
    let results = ctx
        .output
        .flush()
        .into_iter()
        .filter(|m| matches!(m, Message::Results(_)))
        .count();
    assert_eq!(results, 1);
}

#[test]
fn no_current_question_once_finished() {
    let mut ctx = ContextBuilder::new().questions(1).build();
    ctx.quiz.skip();
    assert_eq!(ctx.quiz.current_question(), Err(QuizError::OutOfRange));
}

#[test]
fn restart_resets_finished_quiz() {
    let mut ctx = ContextBuilder::new().build();
    for _ in 0..10 {
        ctx.answer_wrongly();
    }
    assert!(ctx.quiz.is_finished());
    assert_eq!(ctx.quiz.score(), -20);

    ctx.quiz.restart();
    ctx.assert_initial_state();
    assert!(ctx.quiz.current_question().is_ok());
    assert_eq!(ctx.quiz.final_report(), Err(QuizError::NotFinished));
    assert_eq!(ctx.quiz.order().len(), 10);
}

#[test]
fn restart_resets_quiz_in_progress() {
    let mut ctx = ContextBuilder::new().build();
    ctx.answer_correctly();
    ctx.quiz.on_tick();
    ctx.quiz.restart();
    ctx.assert_initial_state();
}

#[test]
fn restart_reshuffles() {
    let mut ctx = ContextBuilder::new().questions(20).seed(11).build();
    let first_order = ctx.quiz.order().clone();
    let mut reshuffled = false;
    for _ in 0..5 {
        ctx.quiz.restart();
        reshuffled |= *ctx.quiz.order() != first_order;
    }
    assert!(reshuffled);
}

#[test]
fn advance_changes_generation() {
    let mut ctx = ContextBuilder::new().build();
    let generation = ctx.quiz.generation();
    ctx.quiz.on_tick();
    assert_eq!(ctx.quiz.generation(), generation);
    ctx.quiz.skip();
    assert!(ctx.quiz.generation() > generation);
    let generation = ctx.quiz.generation();
    ctx.quiz.restart();
    assert!(ctx.quiz.generation() > generation);
}

#[test]
fn progress_covers_current_question() {
    let mut ctx = ContextBuilder::new().questions(4).build();
    assert_eq!(ctx.quiz.progress_fraction(), 0.25);
    ctx.quiz.skip();
    assert_eq!(ctx.quiz.progress_fraction(), 0.5);
    ctx.quiz.skip();
    ctx.quiz.skip();
    assert_eq!(ctx.quiz.progress_fraction(), 1.0);
    ctx.quiz.skip();
    assert!(ctx.quiz.is_finished());
    assert_eq!(ctx.quiz.progress_fraction(), 1.0);
}

#[test]
fn sessions_are_independent() {
    let mut first = ContextBuilder::new().build();
    let second = ContextBuilder::new().build();
    first.answer_correctly();
    first.quiz.on_tick();
    assert_eq!(first.quiz.score(), 5);
    second.assert_initial_state();
}

#[test]
fn ticks_after_results_change_nothing() {
    let mut ctx = ContextBuilder::new().questions(1).build();
    ctx.answer_correctly();
    ctx.output.flush();
    for _ in 0..40 {
        assert_eq!(ctx.quiz.on_tick(), Outcome::Ignored);
    }
    assert!(ctx.quiz.is_finished());
    assert_eq!(ctx.quiz.score(), 5);
    assert_eq!(ctx.quiz.time_remaining(), 30);
    assert!(ctx.output.flush().is_empty());
}

#[test]
fn timed_out_question_is_replaced_by_a_fresh_one() {
    let mut ctx = ContextBuilder::new().questions(3).build();
    assert!(ctx.quiz.question_is_fresh());
    let generation = ctx.quiz.generation();
    for _ in 0..30 {
        ctx.quiz.on_tick();
    }
    assert_eq!(ctx.quiz.current_index(), 1);
    assert_ne!(ctx.quiz.generation(), generation);
    assert!(ctx.quiz.question_is_fresh());

    ctx.quiz.on_tick();
    assert!(!ctx.quiz.question_is_fresh());
}

#[test]
fn finished_quiz_has_no_fresh_question() {
    let mut ctx = ContextBuilder::new().questions(1).build();
    ctx.answer_correctly();
    assert!(!ctx.quiz.question_is_fresh());
}
