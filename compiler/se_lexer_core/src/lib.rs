//! Scanning engine for Selang source text.
//!
//! Converts raw bytes from a file stream or an in-memory string into a
//! sequence of classified [`Token`]s with line/column information. The
//! crate is standalone: a downstream parser consumes the token stream,
//! but nothing here depends on one.
//!
//! # Architecture
//!
//! - [`SourceBuffer`]: chunked, refillable byte reader with an
//!   index-based cursor and single-level pushback.
//! - [`PositionTracker`]: line/column counters, one snapshot deep so a
//!   pushback restores the previous position exactly.
//! - [`LexemeAccumulator`]: bounded capture of the token text being
//!   scanned, with an observable truncation policy.
//! - [`TokenScanner`]: the maximal-munch classification state machine
//!   driving the three components above.
//!
//! Both constructors ([`TokenScanner::from_reader`] and
//! [`TokenScanner::from_str`]) produce identical token sequences for
//! identical content.

pub mod lexeme;
pub mod position;
pub mod scanner;
pub mod source_buffer;
pub mod token;

pub use lexeme::{LexemeAccumulator, MAX_LEXEME_LEN};
pub use position::PositionTracker;
pub use scanner::{ScanError, TokenScanner};
pub use source_buffer::{SentinelSet, SourceBuffer, CHUNK_LEN};
pub use token::{Token, TokenKind};
