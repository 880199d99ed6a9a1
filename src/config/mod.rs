use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use std::time::Duration;


pub const TICK_PERIOD_VAR: &str = "QUIZ_TICK_MS";

const USAGE: &str = "Usage: timed-quiz [QUESTIONS.csv] [--seed N] [--tick-ms N]";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub questions_path: Option<PathBuf>,
    pub seed: Option<u64>,
    pub tick_period: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            questions_path: None,
            seed: None,
            tick_period: Duration::from_secs(1),
        }
    }
}

fn parse_millis(value: &str) -> Result<Duration> {
    let millis: u64 = value
        .trim()
        .parse()
        .with_context(|| format!("Invalid tick period: {}", value))?;
    if millis == 0 {
        return Err(anyhow!("Tick period must be greater than zero"));
    }
    Ok(Duration::from_millis(millis))
}

impl Config {
    /// Builds the configuration from command line arguments (program name excluded)
    /// and the optional tick period variable.
    pub fn from_args<I>(args: I, tick_period_var: Option<String>) -> Result<Config>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config::default();
        if let Some(value) = tick_period_var {
            config.tick_period = parse_millis(&value)?;
        }

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => {
                    let value = args.next().context(USAGE)?;
                    let seed = value
                        .parse()
                        .with_context(|| format!("Invalid seed: {}", value))?;
                    config.seed = Some(seed);
                }
                "--tick-ms" => {
                    let value = args.next().context(USAGE)?;
                    config.tick_period = parse_millis(&value)?;
                }
                flag if flag.starts_with("--") => {
                    return Err(anyhow!("Unknown option {}\n{}", flag, USAGE));
                }
                path => {
                    if config.questions_path.is_some() {
                        return Err(anyhow!("Only one question bank can be used\n{}", USAGE));
                    }
                    config.questions_path = Some(PathBuf::from(path));
                }
            }
        }

        Ok(config)
    }
}
