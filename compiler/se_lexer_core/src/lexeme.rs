//! Bounded capture of the token text being scanned.
//!
//! Bytes beyond [`MAX_LEXEME_LEN`] are dropped, and the truncation is
//! observable via [`LexemeAccumulator::truncated`] rather than silent.
//! A logical length counter runs independently of the stored bytes so
//! that [`pop`](LexemeAccumulator::pop) after truncation never removes
//! a byte that was actually kept.

/// Maximum number of bytes stored for a single lexeme.
pub const MAX_LEXEME_LEN: usize = 1024;

/// Accumulates the bytes of the token currently being scanned.
///
/// # Invariant
///
/// `buf.len() == min(len, MAX_LEXEME_LEN)` where `len` is the logical
/// number of bytes pushed minus bytes popped.
#[derive(Debug, Default)]
pub struct LexemeAccumulator {
    buf: Vec<u8>,
    len: usize,
}

impl LexemeAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all accumulated bytes. Uses the recorded length, never the
    /// content, to decide what to clear.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.len = 0;
    }

    /// Append one byte; bytes past the cap are dropped (truncation).
    #[inline]
    pub fn push(&mut self, byte: u8) {
        if self.buf.len() < MAX_LEXEME_LEN {
            self.buf.push(byte);
        }
        self.len += 1;
    }

    /// Remove the most recently pushed byte (the pushback path). Only
    /// touches stored bytes if the popped byte was actually kept.
    #[inline]
    pub fn pop(&mut self) {
        debug_assert!(self.len > 0, "pop on empty accumulator");
        self.len = self.len.saturating_sub(1);
        if self.buf.len() > self.len {
            self.buf.pop();
        }
    }

    /// Logical number of bytes in the current lexeme (including any
    /// that were dropped by truncation).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if any byte of the current lexeme was dropped.
    pub fn truncated(&self) -> bool {
        self.len > self.buf.len()
    }

    /// Stored bytes of the current lexeme.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Take the accumulated text, leaving the accumulator empty.
    /// Non-UTF-8 byte sequences are replaced lossily.
    pub fn take_text(&mut self) -> Box<str> {
        let bytes = std::mem::take(&mut self.buf);
        self.len = 0;
        match String::from_utf8(bytes) {
            Ok(s) => s.into_boxed_str(),
            Err(e) => String::from_utf8_lossy(e.as_bytes())
                .into_owned()
                .into_boxed_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_take() {
        let mut acc = LexemeAccumulator::new();
        for b in b"hello" {
            acc.push(*b);
        }
        assert_eq!(acc.len(), 5);
        assert!(!acc.truncated());
        assert_eq!(&*acc.take_text(), "hello");
        assert!(acc.is_empty());
    }

    #[test]
    fn pop_removes_last_byte() {
        let mut acc = LexemeAccumulator::new();
        acc.push(b'a');
        acc.push(b'b');
        acc.pop();
        assert_eq!(acc.as_bytes(), b"a");
        assert_eq!(acc.len(), 1);
    }

    #[test]
    fn bytes_past_cap_are_dropped() {
        let mut acc = LexemeAccumulator::new();
        for _ in 0..MAX_LEXEME_LEN + 10 {
            acc.push(b'x');
        }
        assert!(acc.truncated());
        assert_eq!(acc.as_bytes().len(), MAX_LEXEME_LEN);
        assert_eq!(acc.len(), MAX_LEXEME_LEN + 10);
    }

    #[test]
    fn pop_after_truncation_keeps_stored_bytes() {
        let mut acc = LexemeAccumulator::new();
        for _ in 0..MAX_LEXEME_LEN + 1 {
            acc.push(b'x');
        }
        // The popped byte was dropped, not stored; the store must stay intact.
        acc.pop();
        assert_eq!(acc.as_bytes().len(), MAX_LEXEME_LEN);
        assert!(!acc.truncated());
    }

    #[test]
    fn exactly_at_cap_is_not_truncated() {
        let mut acc = LexemeAccumulator::new();
        for _ in 0..MAX_LEXEME_LEN {
            acc.push(b'x');
        }
        assert!(!acc.truncated());
    }

    #[test]
    fn clear_resets_length_and_bytes() {
        let mut acc = LexemeAccumulator::new();
        acc.push(b'z');
        acc.clear();
        assert!(acc.is_empty());
        assert_eq!(acc.as_bytes(), b"");
    }
}
