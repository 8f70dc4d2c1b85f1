//! Debounced delayed task
//!
//! Every `schedule` call supersedes the previous one. The platform timer
//! carries the returned token and asks [`Debouncer::fire`] when it expires;
//! only the newest token runs.

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay_ms: u32,
    generation: u64,
    pending: bool,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            generation: 0,
            pending: false,
        }
    }

    /// Settle window for the timer
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Register a new event; returns the token for its timer
    pub fn schedule(&mut self) -> u64 {
        self.generation += 1;
        self.pending = true;
        self.generation
    }

    /// A timer expired; true if it belongs to the newest event
    pub fn fire(&mut self, token: u64) -> bool {
        if self.pending && token == self.generation {
            self.pending = false;
            true
        } else {
            false
        }
    }
}
