use serde::{Deserialize, Serialize};

/// Average characters per "word" for WPM.
pub const CHARS_PER_WORD: f64 = 5.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_events: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub elapsed_secs: f64,
    pub wpm: f64,
    pub accuracy: f64,
}

impl SessionStats {
    pub fn compute(correct: usize, incorrect: usize, elapsed_secs: f64) -> Self {
        let total_events = correct + incorrect;
        let accuracy = if total_events > 0 {
            correct as f64 / total_events as f64 * 100.0
        } else {
            0.0
        };
        let wpm = if elapsed_secs > 0.0 {
            (correct as f64 / CHARS_PER_WORD) / (elapsed_secs / 60.0)
        } else {
            0.0
        };
        Self {
            total_events,
            correct,
            incorrect,
            elapsed_secs,
            wpm,
            accuracy,
        }
    }
}
