//! Typewriter reveal for the wizard heading.

use std::time::Duration;

pub const TYPING_INTERVAL: Duration = Duration::from_millis(50);

/// The first `chars` characters of `full_text`.
#[must_use]
pub fn rendered_prefix(full_text: &str, chars: usize) -> &str {
    match full_text.char_indices().nth(chars) {
        Some((end, _)) => &full_text[..end],
        None => full_text,
    }
}

/// Reveals one character per [`TYPING_INTERVAL`] of elapsed time.
#[derive(Debug, Clone)]
pub struct TypingEffect {
    full_text: String,
    total_chars: usize,
    revealed: usize,
    interval: Duration,
    // elapsed time not yet turned into a character
    pending: Duration,
}

impl TypingEffect {
    #[must_use]
    pub fn new(full_text: impl Into<String>) -> Self {
        Self::with_interval(full_text, TYPING_INTERVAL)
    }

    #[must_use]
    pub fn with_interval(full_text: impl Into<String>, interval: Duration) -> Self {
        let full_text = full_text.into();
        let total_chars = full_text.chars().count();
        Self {
            full_text,
            total_chars,
            revealed: 0,
            interval,
            pending: Duration::ZERO,
        }
    }

    /// Feed elapsed time; returns the time left over once the text is complete.
    pub fn advance(&mut self, elapsed: Duration) -> Option<Duration> {
        if self.interval.is_zero() {
            self.revealed = self.total_chars;
            return Some(elapsed);
        }

        self.pending = self.pending.saturating_add(elapsed);
        while self.revealed < self.total_chars && self.pending >= self.interval {
            self.pending -= self.interval;
            self.revealed += 1;
        }

        if self.is_complete() {
            Some(std::mem::take(&mut self.pending))
        } else {
            None
        }
    }

    #[must_use]
    pub fn rendered(&self) -> &str {
        rendered_prefix(&self.full_text, self.revealed)
    }

    #[must_use]
    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.revealed >= self.total_chars
    }

    pub fn restart(&mut self) {
        self.revealed = 0;
        self.pending = Duration::ZERO;
    }
}
