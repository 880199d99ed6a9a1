use std::fmt;

use crate::quiz::settings::Settings;

#[derive(Clone, Debug, PartialEq)]
pub struct FinalReport {
    pub score: i32,
    pub total_possible: i32,
    pub percentage: f64,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub passed: bool,
}

impl FinalReport {
    pub fn new(
        score: i32,
        question_count: usize,
        correct_count: u32,
        incorrect_count: u32,
        settings: &Settings,
    ) -> Self {
        let total_possible = question_count as i32 * settings.correct_points;
        let percentage = if total_possible == 0 {
            0.0
        } else {
            score as f64 * 100.0 / total_possible as f64
        };
        FinalReport {
            score,
            total_possible,
            percentage,
            correct_count,
            incorrect_count,
            passed: percentage >= settings.pass_percentage,
        }
    }
}

impl fmt::Display for FinalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Final Score: {}/{}", self.score, self.total_possible)?;
        writeln!(f, "Percentage: {:.2}%", self.percentage)?;
        writeln!(f, "Correct Answers: {}", self.correct_count)?;
        writeln!(f, "Incorrect Answers: {}", self.incorrect_count)?;
        if self.passed {
            write!(f, "Congratulations! You passed the quiz.")
        } else {
            write!(f, "Sorry, you failed. Better luck next time!")
        }
    }
}
