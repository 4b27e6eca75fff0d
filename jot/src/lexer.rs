//! Tokenizer for jot source text.
//!
//! Line breaks are significant (they separate statements), so the lexer
//! emits them as tokens instead of discarding them. Comments are stripped
//! here; a block comment swallows any newlines it spans, a line comment
//! does not consume the newline that ends it.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::JotError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    // Keywords
    Val,
    True,
    False,

    // Literals
    Ident(String),
    Int(i64),
    Float(f64),
    Str(String),

    // Symbols
    LParen,
    RParen,
    Comma,
    Dot,
    Eq,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Semi,

    /// Statement-separating line break.
    Newline,

    Eof,
}

impl TokenKind {
    /// Display name used in parse error messages.
    pub(crate) fn name(&self) -> &'static str {
        match self {
            TokenKind::Val => "'val'",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Int(_) => "integer literal",
            TokenKind::Float(_) => "float literal",
            TokenKind::Str(_) => "string literal",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Comma => "','",
            TokenKind::Dot => "'.'",
            TokenKind::Eq => "'='",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::Semi => "';'",
            TokenKind::Newline => "end of line",
            TokenKind::Eof => "end of input",
        }
    }
}

/// A token and the line it starts on (1-based).
#[derive(Debug, Clone)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

pub(crate) struct Lexer<'a> {
    chars: Peekable<CharIndices<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            line: 1,
        }
    }

    /// Consume the whole input. The returned vector always ends with an
    /// `Eof` token.
    pub(crate) fn tokenize(mut self) -> Result<Vec<Token>, JotError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn next_char(&mut self) -> Option<char> {
        let (_, c) = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn next_token(&mut self) -> Result<Token, JotError> {
        while let Some(c) = self.peek_char() {
            if c == ' ' || c == '\t' || c == '\r' {
                self.next_char();
            } else {
                break;
            }
        }

        let start_line = self.line;
        let Some(c) = self.next_char() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                line: start_line,
            });
        };

        let kind = match c {
            '\n' => TokenKind::Newline,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '=' => TokenKind::Eq,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '%' => TokenKind::Percent,
            ';' => TokenKind::Semi,
            '/' => match self.peek_char() {
                Some('/') => {
                    while let Some(c) = self.peek_char() {
                        if c == '\n' {
                            break;
                        }
                        self.next_char();
                    }
                    return self.next_token();
                }
                Some('*') => {
                    self.next_char();
                    self.skip_block_comment()?;
                    return self.next_token();
                }
                _ => TokenKind::Slash,
            },
            '"' => self.scan_string(start_line)?,
            c if c.is_ascii_digit() => self.scan_number(c, start_line)?,
            c if c.is_alphabetic() || c == '_' => self.scan_word(c),
            other => {
                return Err(JotError::parse(
                    format!("unexpected character '{}'", other),
                    start_line,
                ))
            }
        };

        Ok(Token {
            kind,
            line: start_line,
        })
    }

    /// Skips a `/* ... */` comment, honoring nesting. The opening `/*`
    /// has already been consumed.
    fn skip_block_comment(&mut self) -> Result<(), JotError> {
        let mut depth = 1usize;
        while let Some(c) = self.next_char() {
            match c {
                '*' if self.peek_char() == Some('/') => {
                    self.next_char();
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                '/' if self.peek_char() == Some('*') => {
                    self.next_char();
                    depth += 1;
                }
                _ => {}
            }
        }
        // Still open at end of input: a valid prefix of a longer program.
        Err(JotError::Incomplete)
    }

    /// String literals are single-line, so running into a newline or the
    /// end of input is a hard parse error rather than incompleteness.
    fn scan_string(&mut self, line: usize) -> Result<TokenKind, JotError> {
        let mut text = String::new();
        loop {
            match self.next_char() {
                None | Some('\n') => {
                    return Err(JotError::parse("unterminated string literal", line))
                }
                Some('"') => return Ok(TokenKind::Str(text)),
                Some('\\') => match self.next_char() {
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some('"') => text.push('"'),
                    Some('\\') => text.push('\\'),
                    Some(other) => {
                        return Err(JotError::parse(
                            format!("invalid escape sequence '\\{}'", other),
                            line,
                        ))
                    }
                    None => return Err(JotError::parse("unterminated string literal", line)),
                },
                Some(c) => text.push(c),
            }
        }
    }

    fn scan_number(&mut self, first: char, line: usize) -> Result<TokenKind, JotError> {
        let mut text = String::new();
        text.push(first);
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                text.push(c);
                self.next_char();
            } else {
                break;
            }
        }

        // A dot continues the literal only when a digit follows; otherwise
        // it is member access on the integer (`1.toString`).
        if self.peek_char() == Some('.') {
            let mut ahead = self.chars.clone();
            ahead.next();
            if ahead.peek().is_some_and(|(_, c)| c.is_ascii_digit()) {
                self.next_char();
                text.push('.');
                while let Some(c) = self.peek_char() {
                    if c.is_ascii_digit() {
                        text.push(c);
                        self.next_char();
                    } else {
                        break;
                    }
                }
                let value: f64 = text
                    .parse()
                    .map_err(|_| JotError::parse("invalid float literal", line))?;
                return Ok(TokenKind::Float(value));
            }
        }

        let value: i64 = text
            .parse()
            .map_err(|_| JotError::parse("integer literal out of range", line))?;
        Ok(TokenKind::Int(value))
    }

    fn scan_word(&mut self, first: char) -> TokenKind {
        let mut text = String::new();
        text.push(first);
        while let Some(c) = self.peek_char() {
            if c.is_alphanumeric() || c == '_' {
                text.push(c);
                self.next_char();
            } else {
                break;
            }
        }
        match text.as_str() {
            "val" => TokenKind::Val,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            _ => TokenKind::Ident(text),
        }
    }
}
