//! Line/column accounting for consumed characters.
//!
//! The counters describe the position of the character just consumed,
//! not the token start: line starts at 1, column at 0; a newline bumps
//! the line and resets the column. Callers needing a token-start
//! position capture it before scanning begins.

/// Line/column counters with a one-deep snapshot for pushback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionTracker {
    line: u32,
    column: u32,
    prev_line: u32,
    prev_column: u32,
}

impl PositionTracker {
    pub fn new() -> Self {
        Self {
            line: 1,
            column: 0,
            prev_line: 1,
            prev_column: 0,
        }
    }

    /// Line of the character just consumed (1-based).
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Column of the character just consumed (0 right after a newline).
    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Account for one consumed byte, snapshotting the prior position so
    /// a single pushback can restore it.
    #[inline]
    pub fn consume(&mut self, byte: u8) {
        self.prev_line = self.line;
        self.prev_column = self.column;
        if byte == b'\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }

    /// Restore the position from before the most recent `consume`.
    /// Depth is exactly one, matching the buffer's pushback.
    #[inline]
    pub fn rewind(&mut self) {
        self.line = self.prev_line;
        self.column = self.prev_column;
    }

    /// Account for `n` consumed bytes known to contain no newline
    /// (the bulk comment-skip path). Saturates at the counter limit
    /// instead of overflowing.
    pub fn skip_columns(&mut self, n: u32) {
        self.prev_line = self.line;
        self.prev_column = self.column;
        self.column = self.column.saturating_add(n);
    }
}

impl Default for PositionTracker {
    fn default() -> Self {
        Self::new()
    }
}
