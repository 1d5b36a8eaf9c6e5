//! Bounded event log for on-screen diagnostics.
//!
//! Ring buffer of short text lines with no heap allocation and no time
//! dependencies, so it can run on the device and in the simulator alike.
//! The simulator shows the most recent entries next to the activity
//! legend.

use heapless::{Deque, String};

/// Maximum number of log lines kept.
pub const LOG_BUFFER_SIZE: usize = 8;

/// Maximum characters per line; longer messages are truncated.
pub const LOG_LINE_LENGTH: usize = 48;

/// Ring buffer of recent UI/control events.
pub struct EventLog {
    buffer: Deque<String<LOG_LINE_LENGTH>, LOG_BUFFER_SIZE>,
}

impl EventLog {
    pub const fn new() -> Self {
        Self {
            buffer: Deque::new(),
        }
    }

    /// Append a message, dropping the oldest line when full.
    pub fn push(&mut self, msg: &str) {
        if self.buffer.is_full() {
            self.buffer.pop_front();
        }

        let mut line: String<LOG_LINE_LENGTH> = String::new();
        for c in msg.chars() {
            if line.push(c).is_err() {
                break;
            }
        }
        // Capacity was freed above; this cannot fail.
        self.buffer.push_back(line).ok();
    }

    /// Iterate lines oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.buffer.iter().map(|line| line.as_str())
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
