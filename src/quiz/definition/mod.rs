use anyhow::{Context, Result};
use log::info;
use rand::seq::SliceRandom;
use rand::Rng;
use std::convert::TryFrom;
use std::fs::File;
use std::path::Path;

use crate::quiz::error::QuizError;

pub mod question;

pub use question::{CsvRow, Question, RawQuestion};


#[derive(Clone, Debug)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    pub fn build<I>(raw_questions: I) -> std::result::Result<QuestionSet, QuizError>
    where
        I: IntoIterator<Item = RawQuestion>,
    {
        let mut questions = Vec::new();
        for (index, raw_question) in raw_questions.into_iter().enumerate() {
            let prompt = raw_question.prompt.clone();
            let question =
                Question::try_from(raw_question).map_err(|reason| QuizError::InvalidQuestion {
                    number: index + 1,
                    prompt,
                    reason,
                })?;
            questions.push(question);
        }

        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }

        Ok(QuestionSet { questions })
    }

    pub fn open(source: &Path) -> Result<QuestionSet> {
        let file = File::open(source)
            .with_context(|| format!("Could not open question bank {}", source.display()))?;
        let mut csv_reader = csv::Reader::from_reader(file);
        let mut raw_questions: Vec<RawQuestion> = Vec::new();
        for row in csv_reader.deserialize() {
            let row: CsvRow = row.with_context(|| {
                format!("Could not parse question bank {}", source.display())
            })?;
            raw_questions.push(row.into());
        }

        let question_set = QuestionSet::build(raw_questions)?;
        info!(
            "Loaded {} questions from {}",
            question_set.len(),
            source.display()
        );
        Ok(question_set)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn questions(&self) -> &Vec<Question> {
        &self.questions
    }

    /// Returns a uniformly shuffled copy of the questions. The set itself is left untouched.
    pub fn shuffled_order<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Question> {
        let mut order = self.questions.clone();
        order.shuffle(rng);
        order
    }

    pub fn correct_index_of(question: &Question) -> usize {
        question.correct_option()
    }

    pub fn option_text_of(
        question: &Question,
        index: usize,
    ) -> std::result::Result<&str, QuizError> {
        question.option_text(index)
    }
}
