//! Chunked, refillable source buffer with single-level pushback.
//!
//! The buffer owns the current chunk of source bytes and an index cursor
//! into it. When the cursor reaches the end of the chunk and the
//! underlying stream still has data, the next read refills the chunk
//! (up to [`CHUNK_LEN`] bytes) before any byte is returned. An in-memory
//! string source is pre-loaded as the one and only chunk; its refill
//! immediately signals exhaustion.
//!
//! Pushback decrements the index cursor, never a pointer. A refill can
//! only happen before a read, so the byte most recently advanced over is
//! always at `cursor - 1` of the *current* chunk and pushback is
//! well-defined regardless of refill history.
//!
//! # End-of-input sentinels
//!
//! Besides true end-of-stream, bytes in the configurable [`SentinelSet`]
//! (default NUL, EOT `0x04`, SUB `0x1A`) are treated as end-of-input
//! markers when they appear in the stream, for compatibility with
//! terminal-fed input. Sentinel bytes are never delivered as content;
//! encountering one flips the buffer into its terminal state.

use std::io;
use std::io::Read;

/// Maximum number of bytes read from the stream per refill.
pub const CHUNK_LEN: usize = 1024;

/// Set of byte values interpreted as end-of-input markers.
///
/// Holds at most three bytes so a single `memchr3` sweep covers the set
/// in the bulk-skip path. Duplicate entries are allowed (a smaller set
/// is expressed by repeating a byte).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SentinelSet {
    bytes: [u8; 3],
}

impl SentinelSet {
    /// NUL terminator byte.
    pub const NUL: u8 = 0x00;
    /// End-of-transmission (Ctrl-D).
    pub const EOT: u8 = 0x04;
    /// Substitute / legacy EOF marker (Ctrl-Z).
    pub const SUB: u8 = 0x1A;

    /// A sentinel set over exactly the given bytes.
    pub const fn new(bytes: [u8; 3]) -> Self {
        Self { bytes }
    }

    /// Returns `true` if `byte` signals end-of-input.
    #[inline]
    pub fn contains(self, byte: u8) -> bool {
        byte == self.bytes[0] || byte == self.bytes[1] || byte == self.bytes[2]
    }

    /// Offset of the first sentinel byte in `haystack`, if any.
    fn find_in(self, haystack: &[u8]) -> Option<usize> {
        memchr::memchr3(self.bytes[0], self.bytes[1], self.bytes[2], haystack)
    }
}

impl Default for SentinelSet {
    fn default() -> Self {
        Self::new([Self::NUL, Self::EOT, Self::SUB])
    }
}

/// Where the next chunk comes from.
enum ByteSource<'a> {
    /// A live stream; refills read from here.
    Stream(Box<dyn Read + 'a>),
    /// Nothing left to refill from: a string source, or a stream that
    /// already reported end-of-file.
    Drained,
}

impl std::fmt::Debug for ByteSource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stream(_) => f.write_str("Stream(..)"),
            Self::Drained => f.write_str("Drained"),
        }
    }
}

/// Chunked source reader exposing `peek` / `advance` / `pushback`.
///
/// # Invariant
///
/// `cursor <= chunk.len()` at all times. Once [`advance`](Self::advance)
/// has returned `Ok(None)` the buffer is terminal and every later read
/// also yields `Ok(None)`.
#[derive(Debug)]
pub struct SourceBuffer<'a> {
    /// Current chunk of source bytes.
    chunk: Vec<u8>,
    /// Read position within `chunk`.
    cursor: usize,
    /// Refill source for the next chunk.
    source: ByteSource<'a>,
    /// Terminal state: a sentinel was consumed or the source drained.
    done: bool,
    sentinels: SentinelSet,
}

impl<'a> SourceBuffer<'a> {
    /// Buffer over a byte stream; chunks are read on demand.
    pub fn from_reader(reader: impl Read + 'a) -> Self {
        Self {
            chunk: Vec::new(),
            cursor: 0,
            source: ByteSource::Stream(Box::new(reader)),
            done: false,
            sentinels: SentinelSet::default(),
        }
    }

    /// Buffer over an in-memory string; the whole string is the one chunk.
    pub fn from_str(source: &str) -> Self {
        Self {
            chunk: source.as_bytes().to_vec(),
            cursor: 0,
            source: ByteSource::Drained,
            done: false,
            sentinels: SentinelSet::default(),
        }
    }

    /// Replace the end-of-input sentinel set.
    pub fn with_sentinels(mut self, sentinels: SentinelSet) -> Self {
        self.sentinels = sentinels;
        self
    }

    /// Returns `true` once the buffer has reached its terminal state.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Make sure `cursor` points at an unread byte, refilling from the
    /// stream if the chunk is spent. Returns `false` when no more bytes
    /// exist. `ErrorKind::Interrupted` reads are retried; other read
    /// errors propagate.
    fn fill(&mut self) -> io::Result<bool> {
        if self.cursor < self.chunk.len() {
            return Ok(true);
        }
        let ByteSource::Stream(reader) = &mut self.source else {
            return Ok(false);
        };
        self.chunk.resize(CHUNK_LEN, 0);
        self.cursor = 0;
        let n = loop {
            match reader.read(&mut self.chunk) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.chunk.clear();
                    return Err(e);
                }
            }
        };
        if n == 0 {
            self.chunk.clear();
            self.source = ByteSource::Drained;
            return Ok(false);
        }
        self.chunk.truncate(n);
        Ok(true)
    }

    /// Next byte without consuming it. `Ok(None)` at end-of-input or
    /// when the next byte is a sentinel.
    pub fn peek(&mut self) -> io::Result<Option<u8>> {
        if self.done || !self.fill()? {
            return Ok(None);
        }
        let byte = self.chunk[self.cursor];
        if self.sentinels.contains(byte) {
            return Ok(None);
        }
        Ok(Some(byte))
    }

    /// Consume and return the next byte. A sentinel byte (or true
    /// end-of-stream) yields `Ok(None)` and makes the buffer terminal.
    pub fn advance(&mut self) -> io::Result<Option<u8>> {
        if self.done {
            return Ok(None);
        }
        if !self.fill()? {
            self.done = true;
            return Ok(None);
        }
        let byte = self.chunk[self.cursor];
        if self.sentinels.contains(byte) {
            self.done = true;
            return Ok(None);
        }
        self.cursor += 1;
        Ok(Some(byte))
    }

    /// Un-consume the single most recently advanced byte.
    ///
    /// # Contract
    ///
    /// Must follow a successful [`advance`](Self::advance) with no
    /// intervening reads; depth is exactly one. A refill only happens
    /// before a read, so the byte is always at `cursor - 1` of the
    /// current chunk.
    pub fn pushback(&mut self) {
        debug_assert!(self.cursor > 0, "pushback without a preceding advance");
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Consume bytes up to, but not including, the next `\n` or
    /// sentinel/end-of-input, refilling across chunks as needed.
    /// Returns the number of bytes skipped.
    ///
    /// The skipped span contains no newlines, so callers account for it
    /// as a pure column advance.
    pub fn skip_line_remainder(&mut self) -> io::Result<usize> {
        let mut skipped = 0;
        if self.done {
            return Ok(0);
        }
        loop {
            if !self.fill()? {
                self.done = true;
                return Ok(skipped);
            }
            let rest = &self.chunk[self.cursor..];
            let newline = memchr::memchr(b'\n', rest);
            let sentinel = self.sentinels.find_in(rest);
            match earliest_of(newline, sentinel) {
                Some(offset) => {
                    self.cursor += offset;
                    return Ok(skipped + offset);
                }
                None => {
                    skipped += rest.len();
                    self.cursor = self.chunk.len();
                }
            }
        }
    }
}

/// Returns the earliest (minimum) of two optional offsets.
fn earliest_of(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
