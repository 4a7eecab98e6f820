//! Recent user input and explicit-termination detection

use std::collections::VecDeque;

/// Default number of trailing input bytes kept
pub const DEFAULT_RECENT_INPUT_CAPACITY: usize = 64;

/// Commands that end a Telnet session on purpose when typed by the user
pub const DEFAULT_TERMINATION_COMMANDS: &[&str] = &["close\r", "quit\r"];

/// Trailing slice of the raw bytes the user typed
///
/// Only used for suffix matching; input is never replayed.
#[derive(Debug, Clone)]
pub struct RecentInputTracker {
    buffer: VecDeque<u8>,
    capacity: usize,
}

impl Default for RecentInputTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl RecentInputTracker {
    /// Creates a tracker with the default capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_RECENT_INPUT_CAPACITY)
    }

    /// Creates a tracker keeping at most `capacity` bytes (at least one)
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends an input chunk, discarding the oldest bytes beyond capacity
    pub fn push(&mut self, data: &[u8]) {
        let skip = data.len().saturating_sub(self.capacity);
        self.buffer.extend(&data[skip..]);
        let excess = self.buffer.len().saturating_sub(self.capacity);
        self.buffer.drain(..excess);
    }

    /// Returns `true` if the retained input ends with `suffix`
    #[must_use]
    pub fn ends_with(&self, suffix: &[u8]) -> bool {
        suffix.len() <= self.buffer.len()
            && self
                .buffer
                .iter()
                .rev()
                .zip(suffix.iter().rev())
                .all(|(a, b)| a == b)
    }

    /// Returns the retained bytes, oldest first
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.buffer.iter().copied().collect()
    }

    /// Number of retained bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `true` if nothing is retained
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Maximum number of retained bytes
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Forgets all retained input
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

/// Decides whether recent input means the user ended the session on purpose
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminationMatcher {
    commands: Vec<Vec<u8>>,
}

impl Default for TerminationMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_TERMINATION_COMMANDS.iter().copied())
    }
}

impl TerminationMatcher {
    /// Creates a matcher for the given command suffixes; empty ones are ignored
    pub fn new<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        Self {
            commands: commands
                .into_iter()
                .map(|c| c.as_ref().to_vec())
                .filter(|c| !c.is_empty())
                .collect(),
        }
    }

    /// A matcher that never reports explicit termination
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Returns `true` if the recent input ends with one of the commands
    #[must_use]
    pub fn matches(&self, recent: &RecentInputTracker) -> bool {
        self.commands.iter().any(|c| recent.ends_with(c))
    }

    /// Longest command, useful to size a tracker
    #[must_use]
    pub fn longest_command(&self) -> usize {
        self.commands.iter().map(Vec::len).max().unwrap_or(0)
    }
}
