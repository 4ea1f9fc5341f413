//! Single-pass lexer over a byte buffer, with two-byte operator lookahead
//! and the `als`/`waar`/`onwaar` keywords.

use crate::token::{Token, TokenKind};

const KEYWORDS: &[(&str, TokenKind)] = &[
    ("functie", TokenKind::Functie),
    ("teruggave", TokenKind::Teruggave),
    ("als", TokenKind::Als),
    ("waar", TokenKind::Waar),
    ("onwaar", TokenKind::Onwaar),
];

fn lookup_keyword(text: &str) -> Option<TokenKind> {
    KEYWORDS
        .iter()
        .find(|(kw, _)| *kw == text)
        .map(|(_, kind)| kind.clone())
}

fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

fn is_name_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

fn parse_number(text: &str) -> i64 {
    // A 0x/0X prefix selects hex, otherwise the digits are read as decimal.
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).unwrap_or(0)
    } else {
        text.parse::<i64>().unwrap_or(0)
    }
}

/// Lex a full source buffer into a token stream. Never fails: unrecognized
/// bytes become `Unknown` tokens for the parser to reject.
pub fn lex(source: &[u8]) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut line: u32 = 1;
    let mut i = 0usize;

    tokens.push(Token::new(TokenKind::Newline, line));

    while i < source.len() {
        let c = source[i];
        match c {
            b'"' => {
                let start = i + 1;
                let mut end = start;
                while end < source.len() && source[end] != b'"' {
                    end += 1;
                }
                let contents = String::from_utf8_lossy(&source[start..end]).into_owned();
                tokens.push(Token::new(TokenKind::Str(contents), line));
                i = if end < source.len() { end + 1 } else { end };
            }
            b'(' => {
                tokens.push(Token::new(TokenKind::LParen, line));
                i += 1;
            }
            b')' => {
                tokens.push(Token::new(TokenKind::RParen, line));
                i += 1;
            }
            b'{' => {
                tokens.push(Token::new(TokenKind::LBrace, line));
                i += 1;
            }
            b'}' => {
                tokens.push(Token::new(TokenKind::RBrace, line));
                i += 1;
            }
            b',' => {
                tokens.push(Token::new(TokenKind::Comma, line));
                i += 1;
            }
            b';' => {
                tokens.push(Token::new(TokenKind::Semicolon, line));
                i += 1;
            }
            b'+' => {
                tokens.push(Token::new(TokenKind::Plus, line));
                i += 1;
            }
            b'-' => {
                tokens.push(Token::new(TokenKind::Minus, line));
                i += 1;
            }
            b'*' => {
                tokens.push(Token::new(TokenKind::Star, line));
                i += 1;
            }
            b'/' => {
                tokens.push(Token::new(TokenKind::Slash, line));
                i += 1;
            }
            b'=' => {
                if source.get(i + 1) == Some(&b'=') {
                    tokens.push(Token::new(TokenKind::Eq, line));
                    i += 2;
                } else {
                    tokens.push(Token::new(TokenKind::Assign, line));
                    i += 1;
                }
            }
            b'!' => {
                if source.get(i + 1) == Some(&b'=') {
                    tokens.push(Token::new(TokenKind::Neq, line));
                    i += 2;
                } else {
                    tokens.push(Token::new(TokenKind::Bang, line));
                    i += 1;
                }
            }
            b'<' => {
                if source.get(i + 1) == Some(&b'=') {
                    tokens.push(Token::new(TokenKind::Lte, line));
                    i += 2;
                } else {
                    tokens.push(Token::new(TokenKind::Lt, line));
                    i += 1;
                }
            }
            b'>' => {
                if source.get(i + 1) == Some(&b'=') {
                    tokens.push(Token::new(TokenKind::Gte, line));
                    i += 2;
                } else {
                    tokens.push(Token::new(TokenKind::Gt, line));
                    i += 1;
                }
            }
            b' ' => {
                tokens.push(Token::new(TokenKind::Space, line));
                i += 1;
            }
            b'\n' => {
                line += 1;
                tokens.push(Token::new(TokenKind::Newline, line));
                i += 1;
            }
            _ if is_name_start(c) => {
                let start = i;
                let mut end = start;
                while end < source.len() && is_name_continue(source[end]) {
                    end += 1;
                }
                let text = String::from_utf8_lossy(&source[start..end]).into_owned();
                let kind = lookup_keyword(&text).unwrap_or(TokenKind::Name(text));
                tokens.push(Token::new(kind, line));
                i = end;
            }
            _ if c.is_ascii_digit() => {
                let start = i;
                let mut end = start + 1;
                if c == b'0' && matches!(source.get(end), Some(b'x') | Some(b'X')) {
                    end += 1;
                }
                while end < source.len() && source[end].is_ascii_hexdigit() {
                    end += 1;
                }
                let text = String::from_utf8_lossy(&source[start..end]).into_owned();
                tokens.push(Token::new(TokenKind::Number(parse_number(&text)), line));
                i = end;
            }
            _ => {
                tokens.push(Token::new(TokenKind::Unknown, line));
                i += 1;
            }
        }
    }

    tokens
}

/// Prints a token stream for debugging: every `Newline` (after the first)
/// starts a new line with a `<n>: ` prefix; every other token prints its
/// literal text, trivia included.
pub fn debug_print(tokens: &[Token]) {
    for token in tokens {
        match &token.kind {
            TokenKind::LParen => print!("("),
            TokenKind::RParen => print!(")"),
            TokenKind::LBrace => print!("{{"),
            TokenKind::RBrace => print!("}}"),
            TokenKind::Comma => print!(","),
            TokenKind::Semicolon => print!(";"),
            TokenKind::Assign => print!("="),
            TokenKind::Plus => print!("+"),
            TokenKind::Minus => print!("-"),
            TokenKind::Star => print!("*"),
            TokenKind::Slash => print!("/"),
            TokenKind::Bang => print!("!"),
            TokenKind::Eq => print!("=="),
            TokenKind::Neq => print!("!="),
            TokenKind::Lt => print!("<"),
            TokenKind::Lte => print!("<="),
            TokenKind::Gt => print!(">"),
            TokenKind::Gte => print!(">="),
            TokenKind::Functie => print!("functie"),
            TokenKind::Teruggave => print!("teruggave"),
            TokenKind::Als => print!("als"),
            TokenKind::Waar => print!("waar"),
            TokenKind::Onwaar => print!("onwaar"),
            TokenKind::Space => print!(" "),
            TokenKind::Newline => {
                if token.line != 1 {
                    println!();
                }
                print!("{}: ", token.line);
            }
            TokenKind::Name(name) => print!("{}", name),
            TokenKind::Str(s) => print!("\"{}\"", s),
            TokenKind::Number(n) => print!("{}", n),
            TokenKind::Unknown => print!("?"),
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source.as_bytes()).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn leading_newline_token_always_present() {
        let tokens = lex(b"");
        assert_eq!(tokens, vec![Token::new(TokenKind::Newline, 1)]);
    }

    #[test]
    fn simple_assignment() {
        assert_eq!(
            kinds("x = 1;"),
            vec![
                TokenKind::Newline,
                TokenKind::Name("x".into()),
                TokenKind::Space,
                TokenKind::Assign,
                TokenKind::Space,
                TokenKind::Number(1),
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn two_char_operators() {
        assert_eq!(
            kinds("a==b!=c<=d>=e"),
            vec![
                TokenKind::Newline,
                TokenKind::Name("a".into()),
                TokenKind::Eq,
                TokenKind::Name("b".into()),
                TokenKind::Neq,
                TokenKind::Name("c".into()),
                TokenKind::Lte,
                TokenKind::Name("d".into()),
                TokenKind::Gte,
                TokenKind::Name("e".into()),
            ]
        );
    }

    #[test]
    fn keywords_recognized() {
        assert_eq!(
            kinds("als waar onwaar functie teruggave"),
            vec![
                TokenKind::Newline,
                TokenKind::Als,
                TokenKind::Space,
                TokenKind::Waar,
                TokenKind::Space,
                TokenKind::Onwaar,
                TokenKind::Space,
                TokenKind::Functie,
                TokenKind::Space,
                TokenKind::Teruggave,
            ]
        );
    }

    #[test]
    fn string_literal() {
        assert_eq!(
            kinds(r#""hoi""#),
            vec![TokenKind::Newline, TokenKind::Str("hoi".into())]
        );
    }

    #[test]
    fn hex_number_literal() {
        assert_eq!(kinds("0x1A"), vec![TokenKind::Newline, TokenKind::Number(26)]);
    }

    #[test]
    fn unrecognized_byte_becomes_unknown() {
        assert_eq!(kinds("@"), vec![TokenKind::Newline, TokenKind::Unknown]);
    }

    #[test]
    fn line_numbers_increment_on_newline() {
        let tokens = lex(b"x\ny");
        let lines: Vec<u32> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 1, 2, 2]);
    }
}
