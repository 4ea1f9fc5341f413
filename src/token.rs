//! Token kinds and payloads.

/// A lexical token kind, with payload carried inline for the variants that
/// need it.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Punctuation / operators
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Semicolon,
    Assign,
    Plus,
    Minus,
    Star,
    Slash,
    Bang,
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,

    // Keywords
    Functie,
    Teruggave,
    Als,
    Waar,
    Onwaar,

    // Trivia
    Space,
    Newline,

    // Literals / names
    Name(String),
    Str(String),
    Number(i64),

    Unknown,
}

/// A payload-free tag for each [TokenKind] variant, used by the rule engine
/// to describe "match any token of this kind" without having to construct a
/// dummy payload value to compare against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenTag {
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Semicolon,
    Assign,
    Plus,
    Minus,
    Star,
    Slash,
    Bang,
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    Functie,
    Teruggave,
    Als,
    Waar,
    Onwaar,
    Space,
    Newline,
    Name,
    Str,
    Number,
    Unknown,
}

impl TokenKind {
    pub fn tag(&self) -> TokenTag {
        match self {
            TokenKind::LParen => TokenTag::LParen,
            TokenKind::RParen => TokenTag::RParen,
            TokenKind::LBrace => TokenTag::LBrace,
            TokenKind::RBrace => TokenTag::RBrace,
            TokenKind::Comma => TokenTag::Comma,
            TokenKind::Semicolon => TokenTag::Semicolon,
            TokenKind::Assign => TokenTag::Assign,
            TokenKind::Plus => TokenTag::Plus,
            TokenKind::Minus => TokenTag::Minus,
            TokenKind::Star => TokenTag::Star,
            TokenKind::Slash => TokenTag::Slash,
            TokenKind::Bang => TokenTag::Bang,
            TokenKind::Eq => TokenTag::Eq,
            TokenKind::Neq => TokenTag::Neq,
            TokenKind::Lt => TokenTag::Lt,
            TokenKind::Lte => TokenTag::Lte,
            TokenKind::Gt => TokenTag::Gt,
            TokenKind::Gte => TokenTag::Gte,
            TokenKind::Functie => TokenTag::Functie,
            TokenKind::Teruggave => TokenTag::Teruggave,
            TokenKind::Als => TokenTag::Als,
            TokenKind::Waar => TokenTag::Waar,
            TokenKind::Onwaar => TokenTag::Onwaar,
            TokenKind::Space => TokenTag::Space,
            TokenKind::Newline => TokenTag::Newline,
            TokenKind::Name(_) => TokenTag::Name,
            TokenKind::Str(_) => TokenTag::Str,
            TokenKind::Number(_) => TokenTag::Number,
            TokenKind::Unknown => TokenTag::Unknown,
        }
    }
}

/// A single token with its 1-based source line.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: u32,
}

impl Token {
    pub fn new(kind: TokenKind, line: u32) -> Self {
        Self { kind, line }
    }

    /// Trivia tokens are emitted by the lexer but skipped by the rule
    /// engine's driver.
    pub fn is_trivia(&self) -> bool {
        matches!(self.kind, TokenKind::Space | TokenKind::Newline)
    }
}
