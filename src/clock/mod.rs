use anyhow::{anyhow, Context, Result};
use log::{debug, error};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::output::SessionOutput;
use crate::quiz::{Outcome, Quiz, QuizHandle};


/// Delivers one tick to the session, unless it was scheduled for an earlier question
/// or the quiz is finished. Returns whether the tick reached the session.
pub fn deliver_tick<O: SessionOutput>(quiz: &Mutex<Quiz<O>>, generation: u64) -> bool {
    let mut quiz = quiz.lock();
    if quiz.generation() != generation {
        debug!(
            "Discarding stale tick for generation {} (now {})",
            generation,
            quiz.generation()
        );
        return false;
    }
    if quiz.is_finished() {
        return false;
    }
    !matches!(quiz.on_tick(), Outcome::Ignored)
}

/// Tracks when the next tick is due. The countdown restarts from the moment a new question
/// is seen, so an answer given mid-period does not shorten or delay the next question's first tick.
#[derive(Debug)]
pub struct TickSchedule {
    period: Duration,
    generation: u64,
    period_start: Instant,
}

impl TickSchedule {
    pub fn new(period: Duration, generation: u64, now: Instant) -> Self {
        TickSchedule {
            period,
            generation,
            period_start: now,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns whether a tick is due at `now` for the question identified by `generation`.
    pub fn is_due(&mut self, generation: u64, now: Instant) -> bool {
        if generation != self.generation {
            self.generation = generation;
            self.period_start = now;
            return false;
        }
        if now.saturating_duration_since(self.period_start) < self.period {
            return false;
        }
        self.period_start += self.period;
        true
    }
}

fn poll_interval(period: Duration) -> Duration {
    (period / 20).max(Duration::from_millis(1)).min(period)
}

/// Drives a quiz with one tick per period from a background thread.
pub struct Ticker {
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn start<O>(quiz: QuizHandle<O>, period: Duration) -> Result<Ticker>
    where
        O: SessionOutput + Send + 'static,
    {
        if period == Duration::default() {
            return Err(anyhow!("Tick period must be greater than zero"));
        }

        let running = Arc::new(AtomicBool::new(true));
        let thread_running = running.clone();
        let thread = thread::Builder::new()
            .name("quiz-ticker".to_owned())
            .spawn(move || {
                let poll = poll_interval(period);
                let generation = quiz.lock().generation();
                let mut schedule = TickSchedule::new(period, generation, Instant::now());
                while thread_running.load(Ordering::SeqCst) {
                    thread::sleep(poll);
                    if !thread_running.load(Ordering::SeqCst) {
                        break;
                    }
                    let generation = quiz.lock().generation();
                    if schedule.is_due(generation, Instant::now()) {
                        deliver_tick(&*quiz, schedule.generation());
                    }
                }
                debug!("Ticker stopped");
            })
            .context("Could not spawn ticker thread")?;

        Ok(Ticker {
            running,
            thread: Some(thread),
        })
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("Ticker thread panicked");
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
