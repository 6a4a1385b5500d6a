//! Token values and the closed kind enumeration.
//!
//! Each kind has exactly one canonical rendering string, used for
//! diagnostics and as the lexeme text of fixed-form tokens. Literal
//! kinds (identifier, number, string) carry their text in the token
//! itself; everything else renders from the kind so the output never
//! depends on leftover accumulator bytes.

/// Closed set of token categories produced by the scanner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    Ident,
    Str,
    Number,

    // Punctuation
    LeftBrace,
    RightBrace,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Colon,
    Question,
    Semicolon,
    Comma,
    Dot,

    // Operators
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Plus,
    PlusPlus,
    PlusEqual,
    Minus,
    MinusMinus,
    MinusEqual,
    Star,
    StarStar,
    StarEqual,
    Slash,
    SlashEqual,
    Percent,
    Pipe,
    PipePipe,
    PipePipeEqual,
    Ampersand,
    AmpersandAmpersand,
    Less,
    LessEqual,
    Shl,
    Greater,
    GreaterEqual,
    Shr,

    // Control
    Eof,
}

impl TokenKind {
    /// The canonical rendering string for this kind.
    ///
    /// For fixed-form kinds this is the source glyph itself; literal
    /// kinds and end-of-input render as a class placeholder.
    pub fn canonical(self) -> &'static str {
        match self {
            Self::Ident => "<identifier>",
            Self::Str => "<string>",
            Self::Number => "<number>",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::Colon => ":",
            Self::Question => "?",
            Self::Semicolon => ";",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::Bang => "!",
            Self::BangEqual => "!=",
            Self::Equal => "=",
            Self::EqualEqual => "==",
            Self::Plus => "+",
            Self::PlusPlus => "++",
            Self::PlusEqual => "+=",
            Self::Minus => "-",
            Self::MinusMinus => "--",
            Self::MinusEqual => "-=",
            Self::Star => "*",
            Self::StarStar => "**",
            Self::StarEqual => "*=",
            Self::Slash => "/",
            Self::SlashEqual => "/=",
            Self::Percent => "%",
            Self::Pipe => "|",
            Self::PipePipe => "||",
            Self::PipePipeEqual => "||=",
            Self::Ampersand => "&",
            Self::AmpersandAmpersand => "&&",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Shl => "<<",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Shr => ">>",
            Self::Eof => "<EOF>",
        }
    }

    /// Returns `true` for kinds that carry variable lexeme text.
    pub fn is_literal(self) -> bool {
        matches!(self, Self::Ident | Self::Str | Self::Number)
    }
}

/// One classified unit of source text.
///
/// `line`/`column` are the position of the last character consumed for
/// the token, so tokens report where they end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Literal text; `Some` only for [`TokenKind::is_literal`] kinds.
    pub text: Option<Box<str>>,
    pub line: u32,
    pub column: u32,
}

impl Token {
    /// The lexeme text: the captured literal for literal kinds, the
    /// canonical string for everything else.
    pub fn lexeme(&self) -> &str {
        self.text.as_deref().unwrap_or_else(|| self.kind.canonical())
    }
}
