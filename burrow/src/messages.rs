//! Status message log shown under the board.

use std::fmt;

/// Style of a log entry, mapped to display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStyle {
    Normal,
    Error,
    Notable,
}

/// A single log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub text: String,
    pub style: LogStyle,
    pub dups: u32,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)?;
        if self.dups > 0 {
            write!(f, " ({}×)", self.dups + 1)?;
        }
        Ok(())
    }
}

const MAX_ENTRIES: usize = 256;

/// The game's message log. Consecutive identical messages are folded into
/// one entry with a repeat count.
#[derive(Debug, Default)]
pub struct MessageLog {
    entries: Vec<LogEntry>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message with a given style.
    pub fn log_styled(&mut self, text: &str, style: LogStyle) {
        if let Some(last) = self.entries.last_mut() {
            if last.text == text && last.style == style {
                last.dups += 1;
                return;
            }
        }
        self.entries.push(LogEntry {
            text: text.to_string(),
            style,
            dups: 0,
        });
        if self.entries.len() > MAX_ENTRIES {
            self.entries.drain(0..MAX_ENTRIES / 4);
        }
    }

    /// Add a normal-style message.
    pub fn log(&mut self, text: &str) {
        self.log_styled(text, LogStyle::Normal);
    }

    /// The newest entry.
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// Up to `n` newest entries, oldest first.
    pub fn recent(&self, n: usize) -> &[LogEntry] {
        &self.entries[self.entries.len().saturating_sub(n)..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
