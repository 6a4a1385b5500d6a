//! Maximal-munch token classification over a buffered source.
//!
//! [`TokenScanner::next_token`] dispatches on the first byte of each
//! token and resolves multi-character operators with one byte of
//! lookahead plus pushback. Whitespace and `#`-comments never produce
//! tokens; end-of-input is sticky.
//!
//! Recoverable errors ([`ScanError::UnterminatedString`],
//! [`ScanError::UnrecognizedByte`]) are reported per token and scanning
//! continues on the next call, so one malformed token does not abort
//! the rest of the input. I/O failures are fatal and flip the scanner
//! into its terminal state.

use std::io;
use std::io::Read;

use thiserror::Error;

use crate::lexeme::{LexemeAccumulator, MAX_LEXEME_LEN};
use crate::position::PositionTracker;
use crate::source_buffer::SourceBuffer;
use crate::token::{Token, TokenKind};

/// Failure modes of a scan, with line/column context.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The source could not be read; fatal to the scan.
    #[error("source read failed: {0}")]
    Io(#[from] io::Error),

    /// End-of-input inside a quoted string. Reports the opening quote.
    #[error("{line}:{column}: unterminated string literal")]
    UnterminatedString { line: u32, column: u32 },

    /// A byte matched no classification rule. The byte is consumed;
    /// scanning resumes at the next character.
    #[error("{line}:{column}: unrecognized character 0x{byte:02x}")]
    UnrecognizedByte { byte: u8, line: u32, column: u32 },

    /// A lexeme exceeded the accumulator cap and was truncated. The
    /// token is still delivered; see [`TokenScanner::take_truncation`].
    #[error("{line}:{column}: lexeme longer than {limit} bytes, text truncated")]
    LexemeTooLong { line: u32, column: u32, limit: usize },
}

/// The token classification state machine.
///
/// One scanner is created per input source and discarded after
/// end-of-input; re-scanning requires a new scanner over a fresh
/// source. The scanner owns its reader; dropping it releases the
/// handle on every exit path.
pub struct TokenScanner<'a> {
    buffer: SourceBuffer<'a>,
    position: PositionTracker,
    lexeme: LexemeAccumulator,
    /// Pending truncation report for the most recent literal token.
    truncation: Option<ScanError>,
    /// Sticky end-of-input flag.
    done: bool,
}

impl<'a> TokenScanner<'a> {
    /// Scanner over an already-constructed buffer.
    pub fn new(buffer: SourceBuffer<'a>) -> Self {
        Self {
            buffer,
            position: PositionTracker::new(),
            lexeme: LexemeAccumulator::new(),
            truncation: None,
            done: false,
        }
    }

    /// Scanner over a byte stream (file, pipe, socket).
    pub fn from_reader(reader: impl Read + 'a) -> Self {
        Self::new(SourceBuffer::from_reader(reader))
    }

    /// Scanner over an in-memory string. Tokenization behavior is
    /// identical to [`from_reader`](Self::from_reader) for the same
    /// content.
    pub fn from_str(source: &str) -> Self {
        Self::new(SourceBuffer::from_str(source))
    }

    /// The truncation report for the most recently produced literal
    /// token, if its text overflowed [`MAX_LEXEME_LEN`]. Consumed on
    /// read.
    pub fn take_truncation(&mut self) -> Option<ScanError> {
        self.truncation.take()
    }

    /// Classify and return the next token.
    ///
    /// Once this yields [`TokenKind::Eof`], every subsequent call
    /// yields it again.
    pub fn next_token(&mut self) -> Result<Token, ScanError> {
        if self.done {
            return Ok(self.eof_token());
        }
        loop {
            self.lexeme.clear();
            let Some(byte) = self.advance()? else {
                self.done = true;
                return Ok(self.eof_token());
            };
            match byte {
                // Whitespace: space, tab, vertical tab, form feed,
                // carriage return, newline. Discard and restart.
                b' ' | b'\t' | 0x0b | 0x0c | b'\r' | b'\n' => {}

                b'#' => self.skip_comment()?,

                b'{' => return Ok(self.fixed(TokenKind::LeftBrace)),
                b'}' => return Ok(self.fixed(TokenKind::RightBrace)),
                b'(' => return Ok(self.fixed(TokenKind::LeftParen)),
                b')' => return Ok(self.fixed(TokenKind::RightParen)),
                b'[' => return Ok(self.fixed(TokenKind::LeftBracket)),
                b']' => return Ok(self.fixed(TokenKind::RightBracket)),
                b':' => return Ok(self.fixed(TokenKind::Colon)),
                b'?' => return Ok(self.fixed(TokenKind::Question)),
                b';' => return Ok(self.fixed(TokenKind::Semicolon)),
                b',' => return Ok(self.fixed(TokenKind::Comma)),
                b'.' => return Ok(self.fixed(TokenKind::Dot)),
                b'%' => return Ok(self.fixed(TokenKind::Percent)),

                b'!' => return self.bang(),
                b'=' => return self.equal(),
                b'+' => return self.plus(),
                b'-' => return self.minus(),
                b'*' => return self.star(),
                b'/' => return self.slash(),
                b'|' => return self.pipe(),
                b'&' => return self.ampersand(),
                b'<' => return self.less(),
                b'>' => return self.greater(),

                b'"' | b'\'' => return self.string(byte),

                b'A'..=b'Z' | b'a'..=b'z' | b'_' => return self.identifier(),
                b'0'..=b'9' => return self.number(),

                other => {
                    return Err(ScanError::UnrecognizedByte {
                        byte: other,
                        line: self.position.line(),
                        column: self.position.column(),
                    })
                }
            }
        }
    }

    // ─── Instrumented buffer access ──────────────────────────────────

    /// Consume one byte, updating position and lexeme as side effects.
    /// An I/O failure makes the scanner terminal before propagating.
    fn advance(&mut self) -> Result<Option<u8>, ScanError> {
        match self.buffer.advance() {
            Ok(Some(byte)) => {
                self.position.consume(byte);
                self.lexeme.push(byte);
                Ok(Some(byte))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                self.done = true;
                Err(e.into())
            }
        }
    }

    /// Un-consume the byte most recently advanced over, restoring the
    /// position snapshot and dropping it from the lexeme.
    fn pushback(&mut self) {
        self.buffer.pushback();
        self.position.rewind();
        self.lexeme.pop();
    }

    // ─── Token construction ──────────────────────────────────────────

    fn fixed(&self, kind: TokenKind) -> Token {
        Token {
            kind,
            text: None,
            line: self.position.line(),
            column: self.position.column(),
        }
    }

    fn literal(&mut self, kind: TokenKind) -> Token {
        if self.lexeme.truncated() {
            self.truncation = Some(ScanError::LexemeTooLong {
                line: self.position.line(),
                column: self.position.column(),
                limit: MAX_LEXEME_LEN,
            });
        }
        Token {
            kind,
            text: Some(self.lexeme.take_text()),
            line: self.position.line(),
            column: self.position.column(),
        }
    }

    fn eof_token(&self) -> Token {
        self.fixed(TokenKind::Eof)
    }

    // ─── Comments ────────────────────────────────────────────────────

    /// Skip up to and including the next newline, or stop at
    /// end-of-input. The skipped span is a pure column advance.
    fn skip_comment(&mut self) -> Result<(), ScanError> {
        let skipped = match self.buffer.skip_line_remainder() {
            Ok(n) => n,
            Err(e) => {
                self.done = true;
                return Err(e.into());
            }
        };
        self.position
            .skip_columns(u32::try_from(skipped).unwrap_or(u32::MAX));
        // Consume the newline itself; at end-of-input this is a no-op
        // and the main loop observes Eof on its next advance.
        self.advance()?;
        Ok(())
    }

    // ─── Operators (one byte of lookahead, maximal munch) ────────────

    fn bang(&mut self) -> Result<Token, ScanError> {
        match self.advance()? {
            Some(b'=') => Ok(self.fixed(TokenKind::BangEqual)),
            Some(_) => {
                self.pushback();
                Ok(self.fixed(TokenKind::Bang))
            }
            None => Ok(self.fixed(TokenKind::Bang)),
        }
    }

    fn equal(&mut self) -> Result<Token, ScanError> {
        match self.advance()? {
            Some(b'=') => Ok(self.fixed(TokenKind::EqualEqual)),
            Some(_) => {
                self.pushback();
                Ok(self.fixed(TokenKind::Equal))
            }
            None => Ok(self.fixed(TokenKind::Equal)),
        }
    }

    fn plus(&mut self) -> Result<Token, ScanError> {
        match self.advance()? {
            Some(b'+') => Ok(self.fixed(TokenKind::PlusPlus)),
            Some(b'=') => Ok(self.fixed(TokenKind::PlusEqual)),
            Some(_) => {
                self.pushback();
                Ok(self.fixed(TokenKind::Plus))
            }
            None => Ok(self.fixed(TokenKind::Plus)),
        }
    }

    fn minus(&mut self) -> Result<Token, ScanError> {
        match self.advance()? {
            Some(b'-') => Ok(self.fixed(TokenKind::MinusMinus)),
            Some(b'=') => Ok(self.fixed(TokenKind::MinusEqual)),
            Some(_) => {
                self.pushback();
                Ok(self.fixed(TokenKind::Minus))
            }
            None => Ok(self.fixed(TokenKind::Minus)),
        }
    }

    fn star(&mut self) -> Result<Token, ScanError> {
        match self.advance()? {
            Some(b'*') => Ok(self.fixed(TokenKind::StarStar)),
            Some(b'=') => Ok(self.fixed(TokenKind::StarEqual)),
            Some(_) => {
                self.pushback();
                Ok(self.fixed(TokenKind::Star))
            }
            None => Ok(self.fixed(TokenKind::Star)),
        }
    }

    fn slash(&mut self) -> Result<Token, ScanError> {
        match self.advance()? {
            Some(b'=') => Ok(self.fixed(TokenKind::SlashEqual)),
            Some(_) => {
                self.pushback();
                Ok(self.fixed(TokenKind::Slash))
            }
            None => Ok(self.fixed(TokenKind::Slash)),
        }
    }

    fn pipe(&mut self) -> Result<Token, ScanError> {
        match self.advance()? {
            Some(b'|') => match self.advance()? {
                Some(b'=') => Ok(self.fixed(TokenKind::PipePipeEqual)),
                Some(_) => {
                    self.pushback();
                    Ok(self.fixed(TokenKind::PipePipe))
                }
                None => Ok(self.fixed(TokenKind::PipePipe)),
            },
            Some(_) => {
                self.pushback();
                Ok(self.fixed(TokenKind::Pipe))
            }
            None => Ok(self.fixed(TokenKind::Pipe)),
        }
    }

    fn ampersand(&mut self) -> Result<Token, ScanError> {
        match self.advance()? {
            Some(b'&') => Ok(self.fixed(TokenKind::AmpersandAmpersand)),
            Some(_) => {
                self.pushback();
                Ok(self.fixed(TokenKind::Ampersand))
            }
            None => Ok(self.fixed(TokenKind::Ampersand)),
        }
    }

    fn less(&mut self) -> Result<Token, ScanError> {
        match self.advance()? {
            Some(b'=') => Ok(self.fixed(TokenKind::LessEqual)),
            Some(b'<') => Ok(self.fixed(TokenKind::Shl)),
            Some(_) => {
                self.pushback();
                Ok(self.fixed(TokenKind::Less))
            }
            None => Ok(self.fixed(TokenKind::Less)),
        }
    }

    fn greater(&mut self) -> Result<Token, ScanError> {
        match self.advance()? {
            Some(b'=') => Ok(self.fixed(TokenKind::GreaterEqual)),
            Some(b'>') => Ok(self.fixed(TokenKind::Shr)),
            Some(_) => {
                self.pushback();
                Ok(self.fixed(TokenKind::Greater))
            }
            None => Ok(self.fixed(TokenKind::Greater)),
        }
    }

    // ─── Literals ────────────────────────────────────────────────────

    /// String literal: consume up to and including the same quote that
    /// opened it. No escape processing; a backslash is an ordinary
    /// byte; newlines are legal content. End-of-input before the close
    /// is an error carrying the opening position, never an unbounded
    /// wait.
    fn string(&mut self, quote: u8) -> Result<Token, ScanError> {
        let open_line = self.position.line();
        let open_column = self.position.column();
        // The opening quote is not part of the text.
        self.lexeme.clear();
        loop {
            match self.advance()? {
                Some(b) if b == quote => {
                    // Drop the closing quote from the text.
                    self.lexeme.pop();
                    return Ok(self.literal(TokenKind::Str));
                }
                Some(_) => {}
                None => {
                    self.done = true;
                    return Err(ScanError::UnterminatedString {
                        line: open_line,
                        column: open_column,
                    });
                }
            }
        }
    }

    /// Identifier: `[A-Za-z_][A-Za-z0-9_]*`, ASCII only. The first
    /// disqualifying byte is pushed back.
    fn identifier(&mut self) -> Result<Token, ScanError> {
        loop {
            match self.advance()? {
                Some(b) if is_ident_continue(b) => {}
                Some(_) => {
                    self.pushback();
                    break;
                }
                None => break,
            }
        }
        Ok(self.literal(TokenKind::Ident))
    }

    /// Number: a plain digit run. No decimal points or exponents, so
    /// `1.5` scans as number, dot, number (known limitation, preserved
    /// rather than silently extended).
    fn number(&mut self) -> Result<Token, ScanError> {
        loop {
            match self.advance()? {
                Some(b) if b.is_ascii_digit() => {}
                Some(_) => {
                    self.pushback();
                    break;
                }
                None => break,
            }
        }
        Ok(self.literal(TokenKind::Number))
    }
}

#[inline]
fn is_ident_continue(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
