//! Rate and accuracy calculations.
//!
//! All functions are pure and safe to call at any elapsed time, including zero:
//! elapsed time is floored at one second and the attempted-word count at one.

use serde::Serialize;

// multiply first so an exact .5 quotient is not pushed below .5 by the division
fn per_minute(count: usize, elapsed_secs: u32) -> u32 {
    (count as f64 * 60.0 / elapsed_secs.max(1) as f64).round() as u32
}

/// Correct words per minute of elapsed time.
pub fn wpm(correct_words: usize, elapsed_secs: u32) -> u32 {
    per_minute(correct_words, elapsed_secs)
}

/// Correct letters (separator included) per minute of elapsed time.
pub fn lpm(correct_letters: usize, elapsed_secs: u32) -> u32 {
    per_minute(correct_letters, elapsed_secs)
}

/// Percentage of attempted words that were correct, in `0..=100`.
///
/// Computed as `correct * 100 / attempted` before rounding, so exact halves
/// round up instead of drifting below .5 through the intermediate fraction.
pub fn accuracy(correct_words: usize, words_attempted: usize) -> u32 {
    (correct_words as f64 * 100.0 / words_attempted.max(1) as f64).round() as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub wpm: u32,
    pub lpm: u32,
    pub accuracy: u32,
}

impl Metrics {
    pub fn compute(
        correct_words: usize,
        correct_letters: usize,
        words_attempted: usize,
        elapsed_secs: u32,
    ) -> Self {
        Self {
            wpm: wpm(correct_words, elapsed_secs),
            lpm: lpm(correct_letters, elapsed_secs),
            accuracy: accuracy(correct_words, words_attempted),
        }
    }
}

impl Default for Metrics {
    /// Neutral values shown before anything has been typed
    fn default() -> Self {
        Self {
            wpm: 0,
            lpm: 0,
            accuracy: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wpm() {
        assert_eq!(wpm(30, 60), 30);
        assert_eq!(wpm(10, 30), 20);
        assert_eq!(wpm(1, 7), 9); // 8.57
        assert_eq!(wpm(0, 60), 0);
    }

    #[test]
    fn test_zero_elapsed_is_floored() {
        assert_eq!(wpm(1, 0), 60);
        assert_eq!(lpm(5, 0), 300);
        assert_eq!(wpm(0, 0), 0);
    }

    #[test]
    fn test_lpm() {
        assert_eq!(lpm(150, 60), 150);
        assert_eq!(lpm(5, 2), 150);
        assert_eq!(lpm(7, 30), 14);
        assert_eq!(lpm(1, 40), 2); // 1.5 rounds up
    }

    #[test]
    fn test_accuracy() {
        assert_eq!(accuracy(1, 2), 50);
        assert_eq!(accuracy(2, 3), 67);
        assert_eq!(accuracy(1, 3), 33);
        assert_eq!(accuracy(0, 0), 0);
        assert_eq!(accuracy(5, 5), 100);
    }

    #[test]
    fn test_exact_halves_round_up() {
        assert_eq!(accuracy(23, 40), 58);
        assert_eq!(accuracy(1, 8), 13);
        assert_eq!(wpm(1, 8), 8); // 7.5
    }

    #[test]
    fn test_compute_and_default() {
        assert_eq!(
            Metrics::default(),
            Metrics {
                wpm: 0,
                lpm: 0,
                accuracy: 100
            }
        );
        assert_eq!(
            Metrics::compute(1, 5, 2, 60),
            Metrics {
                wpm: 1,
                lpm: 5,
                accuracy: 50
            }
        );
    }
}
