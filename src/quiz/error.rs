use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("Invalid question #{number} ({prompt:?}): {reason}")]
    InvalidQuestion {
        number: usize,
        prompt: String,
        reason: String,
    },
    #[error("A quiz needs at least one question")]
    NoQuestions,
    #[error("Option {index} is out of range, expected 1 to {max}")]
    OptionOutOfRange { index: usize, max: usize },
    #[error("There is no active question")]
    OutOfRange,
    #[error("The quiz is not finished yet")]
    NotFinished,
}
