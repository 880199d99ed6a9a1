use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::convert::TryFrom;
use unidecode::unidecode;

use crate::quiz::error::QuizError;

pub const OPTION_COUNT: usize = 4;

lazy_static! {
    static ref FORBIDDEN_GUESS_CHARACTERS_REGEX: Regex = Regex::new("[^a-z0-9]").unwrap();
}

pub fn sanitize(answer: &str) -> String {
    let answer = unidecode(answer);
    FORBIDDEN_GUESS_CHARACTERS_REGEX
        .replace_all(&answer.to_lowercase(), "")
        .into()
}

/// Unvalidated question, as authored in a question bank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_option: i64,
}

impl RawQuestion {
    pub fn new(prompt: &str, options: &[&str], correct_option: i64) -> Self {
        RawQuestion {
            prompt: prompt.to_owned(),
            options: options.iter().map(|o| (*o).to_owned()).collect(),
            correct_option,
        }
    }
}

/// One line of a CSV question bank.
#[derive(Deserialize)]
pub struct CsvRow {
    pub prompt: String,
    pub option_1: String,
    pub option_2: String,
    pub option_3: String,
    pub option_4: String,
    pub correct_option: i64,
}

impl From<CsvRow> for RawQuestion {
    fn from(row: CsvRow) -> Self {
        RawQuestion {
            prompt: row.prompt,
            options: vec![row.option_1, row.option_2, row.option_3, row.option_4],
            correct_option: row.correct_option,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Question {
    pub prompt: String,
    options: [String; OPTION_COUNT],
    correct_option: usize,
}

impl Question {
    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    /// 1-based index of the correct option.
    pub fn correct_option(&self) -> usize {
        self.correct_option
    }

    pub fn option_text(&self, index: usize) -> Result<&str, QuizError> {
        if index == 0 || index > OPTION_COUNT {
            return Err(QuizError::OptionOutOfRange {
                index,
                max: OPTION_COUNT,
            });
        }
        Ok(&self.options[index - 1])
    }

    pub fn correct_answer(&self) -> &str {
        &self.options[self.correct_option - 1]
    }

    pub fn is_correct(&self, selected: Option<usize>) -> bool {
        selected == Some(self.correct_option)
    }

    /// Finds the option whose text matches a free-form guess. An exact match (ignoring case and
    /// surrounding spaces) wins, otherwise the guess must loosely match exactly one option.
    pub fn find_option(&self, guess: &str) -> Option<usize> {
        let exact_guess = guess.trim().to_lowercase();
        let exact = self
            .options
            .iter()
            .position(|o| o.trim().to_lowercase() == exact_guess);
        if let Some(index) = exact {
            return Some(index + 1);
        }

        match self.loose_matches(guess)[..] {
            [index] => Some(index),
            _ => None,
        }
    }

    /// 1-based indices of the options matching a guess once case, accents and punctuation are ignored.
    pub fn loose_matches(&self, guess: &str) -> Vec<usize> {
        let sanitized_guess = sanitize(guess);
        if sanitized_guess.is_empty() {
            return Vec::new();
        }
        self.options
            .iter()
            .enumerate()
            .filter(|(_, o)| sanitize(o) == sanitized_guess)
            .map(|(i, _)| i + 1)
            .collect()
    }
}

impl TryFrom<RawQuestion> for Question {
    type Error = String;

    fn try_from(raw_question: RawQuestion) -> Result<Self, Self::Error> {
        if raw_question.prompt.trim().is_empty() {
            return Err("prompt is empty".to_owned());
        }

        let option_count = raw_question.options.len();
        if option_count != OPTION_COUNT {
            return Err(format!(
                "expected {} options, found {}",
                OPTION_COUNT, option_count
            ));
        }

        let correct_option = raw_question.correct_option;
        if correct_option < 1 || correct_option > OPTION_COUNT as i64 {
            return Err(format!(
                "correct option {} is not between 1 and {}",
                correct_option, OPTION_COUNT
            ));
        }

        let mut options = raw_question.options.into_iter();
        let mut next_option = || options.next().unwrap_or_default();
        let options = [next_option(), next_option(), next_option(), next_option()];

        Ok(Question {
            prompt: raw_question.prompt,
            options,
            correct_option: correct_option as usize,
        })
    }
}
