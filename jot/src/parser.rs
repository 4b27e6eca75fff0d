//! Parser for jot programs.
//!
//! Statements are separated by newlines or semicolons. A newline does not
//! end a statement when it falls where an operand is still required
//! (after an operator, `=`, `(`, `,` or `.`), or anywhere inside
//! parentheses. Running out of input where more is grammatically required
//! yields [`JotError::Incomplete`]; malformed input that no suffix can
//! repair yields [`JotError::Parse`].

use crate::ast::{BinOp, Expr, Stmt, UnaryOp};
use crate::error::JotError;
use crate::lexer::{Token, TokenKind};

/// Parse a token stream (as produced by the lexer, `Eof`-terminated)
/// into statements. Empty and comment-only input parses to an empty
/// vector.
pub(crate) fn parse(tokens: Vec<Token>) -> Result<Vec<Stmt>, JotError> {
    Parser::new(tokens).parse_program()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Open parenthesis depth; newlines are insignificant above zero.
    depth: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> &Token {
        // The lexer terminates every stream with Eof and bump() never
        // moves past it.
        &self.tokens[self.pos]
    }

    fn bump(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if !matches!(token.kind, TokenKind::Eof) {
            self.pos += 1;
        }
        token
    }

    fn skip_newlines(&mut self) {
        while matches!(self.peek().kind, TokenKind::Newline) {
            self.pos += 1;
        }
    }

    fn skip_separators(&mut self) {
        while matches!(self.peek().kind, TokenKind::Newline | TokenKind::Semi) {
            self.pos += 1;
        }
    }

    fn parse_program(&mut self) -> Result<Vec<Stmt>, JotError> {
        let mut stmts = Vec::new();
        loop {
            self.skip_separators();
            if matches!(self.peek().kind, TokenKind::Eof) {
                return Ok(stmts);
            }
            stmts.push(self.parse_stmt()?);
            match self.peek().kind {
                TokenKind::Newline | TokenKind::Semi | TokenKind::Eof => {}
                _ => {
                    let token = self.peek();
                    return Err(JotError::parse(
                        format!("expected end of statement, found {}", token.kind.name()),
                        token.line,
                    ));
                }
            }
        }
    }

    fn parse_stmt(&mut self) -> Result<Stmt, JotError> {
        if !matches!(self.peek().kind, TokenKind::Val) {
            return Ok(Stmt::Expr(self.parse_expr()?));
        }

        let line = self.peek().line;
        self.pos += 1;

        let name = match self.bump() {
            Token {
                kind: TokenKind::Ident(name),
                ..
            } => name,
            Token {
                kind: TokenKind::Eof,
                ..
            } => return Err(JotError::Incomplete),
            token => {
                return Err(JotError::parse(
                    format!("expected identifier after 'val', found {}", token.kind.name()),
                    token.line,
                ))
            }
        };

        match self.peek().kind {
            TokenKind::Eq => {
                self.pos += 1;
            }
            TokenKind::Eof => return Err(JotError::Incomplete),
            TokenKind::Newline => {
                // `val x` at the end of input may still grow a right-hand
                // side; anywhere else the `=` is simply missing.
                let mut ahead = self.pos;
                while matches!(self.tokens[ahead].kind, TokenKind::Newline) {
                    ahead += 1;
                }
                if matches!(self.tokens[ahead].kind, TokenKind::Eof) {
                    return Err(JotError::Incomplete);
                }
                let token = self.peek();
                return Err(JotError::parse(
                    "expected '=' after binding name",
                    token.line,
                ));
            }
            _ => {
                let token = self.peek();
                return Err(JotError::parse(
                    format!("expected '=', found {}", token.kind.name()),
                    token.line,
                ));
            }
        }

        self.skip_newlines();
        let expr = self.parse_expr()?;
        Ok(Stmt::Val { name, expr, line })
    }

    fn parse_expr(&mut self) -> Result<Expr, JotError> {
        self.parse_binary(0)
    }

    fn parse_binary(&mut self, min_prec: u8) -> Result<Expr, JotError> {
        let mut lhs = self.parse_unary()?;
        loop {
            if self.depth > 0 {
                self.skip_newlines();
            }
            let (op, prec) = match self.peek().kind {
                TokenKind::Plus => (BinOp::Add, 10),
                TokenKind::Minus => (BinOp::Sub, 10),
                TokenKind::Star => (BinOp::Mul, 20),
                TokenKind::Slash => (BinOp::Div, 20),
                TokenKind::Percent => (BinOp::Rem, 20),
                _ => break,
            };
            if prec < min_prec {
                break;
            }
            let line = self.peek().line;
            self.pos += 1;
            self.skip_newlines();
            let rhs = self.parse_binary(prec + 1)?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
                line,
            };
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr, JotError> {
        if matches!(self.peek().kind, TokenKind::Minus) {
            let line = self.peek().line;
            self.pos += 1;
            self.skip_newlines();
            let operand = self.parse_unary()?;
            return Ok(Expr::Unary {
                op: UnaryOp::Neg,
                operand: Box::new(operand),
                line,
            });
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<Expr, JotError> {
        let mut expr = self.parse_primary()?;
        while matches!(self.peek().kind, TokenKind::Dot) {
            let line = self.peek().line;
            self.pos += 1;
            self.skip_newlines();
            let name = match self.bump() {
                Token {
                    kind: TokenKind::Ident(name),
                    ..
                } => name,
                Token {
                    kind: TokenKind::Eof,
                    ..
                } => return Err(JotError::Incomplete),
                token => {
                    return Err(JotError::parse(
                        format!("expected member name after '.', found {}", token.kind.name()),
                        token.line,
                    ))
                }
            };
            expr = Expr::Member {
                recv: Box::new(expr),
                name,
                line,
            };
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr, JotError> {
        let token = self.bump();
        let line = token.line;
        match token.kind {
            TokenKind::Int(v) => Ok(Expr::Int(v, line)),
            TokenKind::Float(v) => Ok(Expr::Float(v, line)),
            TokenKind::Str(s) => Ok(Expr::Str(s, line)),
            TokenKind::True => Ok(Expr::Bool(true, line)),
            TokenKind::False => Ok(Expr::Bool(false, line)),
            TokenKind::Ident(name) => {
                if matches!(self.peek().kind, TokenKind::LParen) {
                    self.pos += 1;
                    let args = self.parse_args()?;
                    Ok(Expr::Call { target: name, args, line })
                } else {
                    Ok(Expr::Ident(name, line))
                }
            }
            TokenKind::LParen => {
                self.depth += 1;
                self.skip_newlines();
                let inner = self.parse_expr()?;
                self.skip_newlines();
                match self.bump() {
                    Token {
                        kind: TokenKind::RParen,
                        ..
                    } => {
                        self.depth -= 1;
                        Ok(inner)
                    }
                    Token {
                        kind: TokenKind::Eof,
                        ..
                    } => Err(JotError::Incomplete),
                    token => Err(JotError::parse(
                        format!("expected ')', found {}", token.kind.name()),
                        token.line,
                    )),
                }
            }
            TokenKind::Eof => Err(JotError::Incomplete),
            other => Err(JotError::parse(
                format!("expected expression, found {}", other.name()),
                line,
            )),
        }
    }

    /// Call arguments; the opening parenthesis has been consumed.
    fn parse_args(&mut self) -> Result<Vec<Expr>, JotError> {
        self.depth += 1;
        let mut args = Vec::new();
        self.skip_newlines();
        if matches!(self.peek().kind, TokenKind::RParen) {
            self.pos += 1;
            self.depth -= 1;
            return Ok(args);
        }
        loop {
            args.push(self.parse_expr()?);
            self.skip_newlines();
            match self.bump() {
                Token {
                    kind: TokenKind::Comma,
                    ..
                } => self.skip_newlines(),
                Token {
                    kind: TokenKind::RParen,
                    ..
                } => break,
                Token {
                    kind: TokenKind::Eof,
                    ..
                } => return Err(JotError::Incomplete),
                token => {
                    return Err(JotError::parse(
                        format!("expected ',' or ')', found {}", token.kind.name()),
                        token.line,
                    ))
                }
            }
        }
        self.depth -= 1;
        Ok(args)
    }
}
