//! Abstract syntax for jot statements.

/// A top-level statement: a `val` binding or a bare expression.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Stmt {
    Val {
        name: String,
        expr: Expr,
        line: usize,
    },
    Expr(Expr),
}

/// Expressions carry the source line they start on for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    Int(i64, usize),
    Float(f64, usize),
    Bool(bool, usize),
    Str(String, usize),
    Ident(String, usize),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        line: usize,
    },
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        line: usize,
    },
    /// A call to a named target, `println(x)` or `List(1, 2)`.
    Call {
        target: String,
        args: Vec<Expr>,
        line: usize,
    },
    /// Property-style member access, `xs.head` or `n.toString`.
    Member {
        recv: Box<Expr>,
        name: String,
        line: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnaryOp {
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinOp {
    pub(crate) fn symbol(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
        }
    }
}
