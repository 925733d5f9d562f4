//! Content-aware autosave throttle.
//!
//! # Responsibility
//! - Decide, per edit, whether content should be flushed immediately or
//!   deferred to the idle timer.
//!
//! # Invariants
//! - Pure decision logic; the caller owns the timer and the actual save.
//! - Immediate triggers: empty content, trailing newline, sentence-ending
//!   punctuation, every other completed word.
//!
//! The exact trigger set is a tuning choice bounding crash data loss, not
//! a correctness contract; callers may substitute a fixed debounce.

use std::time::Duration;

/// Deferred edits are flushed after this much keyboard idle time.
pub const IDLE_FLUSH: Duration = Duration::from_secs(1);

/// Per-surface autosave decision state.
///
/// One instance per editing surface; word progress is tracked between
/// flushes so "every other completed word" stays cheap to evaluate.
#[derive(Debug, Default)]
pub struct AutosavePolicy {
    words_at_last_flush: usize,
}

impl AutosavePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `content` should be saved now rather than on idle flush.
    ///
    /// A `true` return assumes the caller performs the save; internal word
    /// progress is advanced accordingly.
    pub fn should_save_now(&mut self, content: &str) -> bool {
        if self.is_immediate(content) {
            self.note_flushed(content);
            return true;
        }
        false
    }

    /// Records that the caller flushed `content` through another path
    /// (idle timer, surface close), resetting word progress.
    pub fn note_flushed(&mut self, content: &str) {
        self.words_at_last_flush = word_count(content);
    }

    fn is_immediate(&self, content: &str) -> bool {
        if content.is_empty() {
            return true;
        }
        if content.ends_with('\n') {
            return true;
        }
        let trimmed = content.trim_end();
        if trimmed.ends_with(['.', '!', '?']) {
            return true;
        }
        // A word just completed when the tail is whitespace; flush every
        // other one.
        if content.ends_with(char::is_whitespace) {
            let words = word_count(content);
            if words >= self.words_at_last_flush + 2 {
                return true;
            }
        }
        false
    }
}

fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::AutosavePolicy;

    #[test]
    fn empty_content_saves_immediately() {
        let mut policy = AutosavePolicy::new();
        assert!(policy.should_save_now(""));
    }

    #[test]
    fn trailing_newline_saves_immediately() {
        let mut policy = AutosavePolicy::new();
        assert!(policy.should_save_now("groceries\n"));
    }

    #[test]
    fn sentence_ending_punctuation_saves_immediately() {
        let mut policy = AutosavePolicy::new();
        assert!(policy.should_save_now("Buy milk."));
        assert!(policy.should_save_now("Really?"));
        assert!(policy.should_save_now("Now! "));
    }

    #[test]
    fn mid_word_typing_defers() {
        let mut policy = AutosavePolicy::new();
        assert!(!policy.should_save_now("b"));
        assert!(!policy.should_save_now("bu"));
        assert!(!policy.should_save_now("buy"));
    }

    #[test]
    fn every_other_completed_word_saves() {
        let mut policy = AutosavePolicy::new();
        assert!(!policy.should_save_now("one "));
        assert!(policy.should_save_now("one two "));
        assert!(!policy.should_save_now("one two three "));
        assert!(policy.should_save_now("one two three four "));
    }

    #[test]
    fn external_flush_resets_word_progress() {
        let mut policy = AutosavePolicy::new();
        assert!(!policy.should_save_now("one "));
        policy.note_flushed("one two three ");
        assert!(!policy.should_save_now("one two three four "));
        assert!(policy.should_save_now("one two three four five "));
    }
}
