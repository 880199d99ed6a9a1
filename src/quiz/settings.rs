#[derive(Clone, Debug)]
pub struct Settings {
    pub time_limit: u32,
    pub correct_points: i32,
    pub incorrect_penalty: i32,
    pub pass_percentage: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            time_limit: 30,
            correct_points: 5,
            incorrect_penalty: 2,
            pass_percentage: 60.0,
        }
    }
}
