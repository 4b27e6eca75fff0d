//! Statement evaluation and the interpreter environment.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::PathBuf;

use tether_core::{OutputSink, Value};

use crate::ast::{BinOp, Expr, Stmt, UnaryOp};
use crate::error::EvalError;
use crate::lexer::Lexer;
use crate::parser;

const KEYWORDS: &[&str] = &["false", "true", "val"];
const BUILTINS: &[&str] = &["List", "load", "print", "println"];
const MEMBER_NAMES: &[&str] = &["head", "length", "size", "toString"];

/// The evaluation state behind a [`crate::JotInterpreter`]: named
/// bindings, the auto-naming counter for expression results, the output
/// sink, and the module load path.
pub(crate) struct Machine {
    env: BTreeMap<String, Value>,
    res_counter: usize,
    pub(crate) sink: Option<OutputSink>,
    pub(crate) work_dir: Option<PathBuf>,
    pub(crate) search_path: Vec<PathBuf>,
    /// Modules currently being loaded, for cycle detection.
    loading: Vec<PathBuf>,
}

impl Machine {
    pub(crate) fn new() -> Self {
        Self {
            env: BTreeMap::new(),
            res_counter: 0,
            sink: None,
            work_dir: None,
            search_path: Vec::new(),
            loading: Vec::new(),
        }
    }

    pub(crate) fn reset(&mut self) {
        self.env.clear();
        self.res_counter = 0;
        self.sink = None;
        self.work_dir = None;
        self.search_path.clear();
        self.loading.clear();
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<Value> {
        self.env.get(name).cloned()
    }

    pub(crate) fn insert(&mut self, name: &str, value: Value) {
        self.env.insert(name.to_string(), value);
    }

    pub(crate) fn eval_stmts(&mut self, stmts: &[Stmt]) -> Result<(), EvalError> {
        for stmt in stmts {
            match stmt {
                Stmt::Val { name, expr, .. } => {
                    let value = self.eval_expr(expr)?;
                    self.env.insert(name.clone(), value.clone());
                    self.render_binding(name, &value);
                }
                Stmt::Expr(expr) => {
                    let value = self.eval_expr(expr)?;
                    // Unit results are not bound and not rendered.
                    if !value.is_unit() {
                        let name = format!("res{}", self.res_counter);
                        self.res_counter += 1;
                        self.env.insert(name.clone(), value.clone());
                        self.render_binding(&name, &value);
                    }
                }
            }
        }
        Ok(())
    }

    /// Renderings start on a fresh line and add no trailing newline, so
    /// the sink holds exactly what printed output and renderings produced.
    fn render_binding(&self, name: &str, value: &Value) {
        if let Some(sink) = &self.sink {
            if !sink.is_empty() && !sink.ends_with_newline() {
                sink.append("\n");
            }
            sink.append(&format!("val {}: {} = {}", name, value.type_display(), value));
        }
    }

    fn emit(&self, text: &str) {
        if let Some(sink) = &self.sink {
            sink.append(text);
        }
    }

    fn eval_expr(&mut self, expr: &Expr) -> Result<Value, EvalError> {
        match expr {
            Expr::Int(v, _) => Ok(Value::Int(*v)),
            Expr::Float(v, _) => Ok(Value::Float(*v)),
            Expr::Bool(v, _) => Ok(Value::Bool(*v)),
            Expr::Str(s, _) => Ok(Value::Str(s.clone())),
            Expr::Ident(name, line) => self.env.get(name).cloned().ok_or_else(|| {
                EvalError::new("NameError", format!("not found: value {}", name), *line)
            }),
            Expr::Unary {
                op: UnaryOp::Neg,
                operand,
                line,
            } => match self.eval_expr(operand)? {
                Value::Int(v) => v
                    .checked_neg()
                    .map(Value::Int)
                    .ok_or_else(|| EvalError::new("ArithmeticError", "integer overflow", *line)),
                Value::Float(v) => Ok(Value::Float(-v)),
                other => Err(EvalError::new(
                    "TypeError",
                    format!("operator '-' cannot be applied to {}", other.type_name()),
                    *line,
                )),
            },
            Expr::Binary { op, lhs, rhs, line } => {
                let left = self.eval_expr(lhs)?;
                let right = self.eval_expr(rhs)?;
                eval_binary(*op, left, right, *line)
            }
            Expr::Call { target, args, line } => self.eval_call(target, args, *line),
            Expr::Member { recv, name, line } => {
                let value = self.eval_expr(recv)?;
                eval_member(value, name, *line)
            }
        }
    }

    fn eval_call(&mut self, target: &str, args: &[Expr], line: usize) -> Result<Value, EvalError> {
        match target {
            "println" | "print" => {
                if args.len() > 1 {
                    return Err(EvalError::new(
                        "TypeError",
                        format!("{} takes at most one argument", target),
                        line,
                    ));
                }
                let mut text = match args.first() {
                    Some(arg) => self.eval_expr(arg)?.to_string(),
                    None => String::new(),
                };
                if target == "println" {
                    text.push('\n');
                }
                self.emit(&text);
                Ok(Value::Unit)
            }
            "List" => {
                let mut items = Vec::with_capacity(args.len());
                for arg in args {
                    items.push(self.eval_expr(arg)?);
                }
                Ok(Value::Seq(items))
            }
            "load" => {
                if args.len() != 1 {
                    return Err(EvalError::new(
                        "TypeError",
                        "load takes exactly one argument",
                        line,
                    ));
                }
                let module = match self.eval_expr(&args[0])? {
                    Value::Str(name) => name,
                    other => {
                        return Err(EvalError::new(
                            "TypeError",
                            format!("load expects a module name, got {}", other.type_name()),
                            line,
                        ))
                    }
                };
                self.load_module(&module, line)
            }
            other => match self.env.get(other) {
                Some(value) => Err(EvalError::new(
                    "TypeError",
                    format!("value {} of type {} is not callable", other, value.type_name()),
                    line,
                )),
                None => Err(EvalError::new(
                    "NameError",
                    format!("not found: value {}", other),
                    line,
                )),
            },
        }
    }

    /// Evaluate a module by name: `<name>.jot` in the working directory
    /// first, then any load path entry whose file stem matches. The
    /// module's statements run in this environment exactly as if they
    /// had been typed, renderings and printed output included.
    fn load_module(&mut self, name: &str, line: usize) -> Result<Value, EvalError> {
        let path = self.resolve_module(name).ok_or_else(|| {
            EvalError::new(
                "LoadError",
                format!("module {} not found on the load path", name),
                line,
            )
        })?;
        let canonical = path.canonicalize().map_err(|e| {
            EvalError::new("LoadError", format!("cannot read module {}: {}", name, e), line)
        })?;
        if self.loading.contains(&canonical) {
            return Err(EvalError::new(
                "LoadError",
                format!("cyclic load of module {}", name),
                line,
            ));
        }
        let source = std::fs::read_to_string(&canonical).map_err(|e| {
            EvalError::new("LoadError", format!("cannot read module {}: {}", name, e), line)
        })?;
        let stmts = Lexer::new(&source)
            .tokenize()
            .and_then(parser::parse)
            .map_err(|e| {
                EvalError::new("LoadError", format!("error in module {}: {}", name, e), line)
            })?;

        self.loading.push(canonical);
        let result = self.eval_stmts(&stmts);
        self.loading.pop();
        result?;
        Ok(Value::Unit)
    }

    fn resolve_module(&self, name: &str) -> Option<PathBuf> {
        if let Some(dir) = &self.work_dir {
            let local = dir.join(format!("{}.jot", name));
            if local.is_file() {
                return Some(local);
            }
        }
        self.search_path
            .iter()
            .find(|entry| entry.is_file() && entry.file_stem() == Some(OsStr::new(name)))
            .cloned()
    }

    /// Completion candidates for the identifier fragment ending at
    /// `cursor` (a byte offset). After a `.` the candidates are member
    /// names; elsewhere they are keywords, builtins and bound names.
    pub(crate) fn complete(&self, code: &str, cursor: usize) -> Vec<String> {
        let upto = &code[..cursor];
        let mut start = cursor;
        for (i, c) in upto.char_indices().rev() {
            if c.is_alphanumeric() || c == '_' {
                start = i;
            } else {
                break;
            }
        }
        let prefix = &upto[start..];

        let mut candidates: Vec<String> = if upto[..start].ends_with('.') {
            MEMBER_NAMES.iter().map(|s| s.to_string()).collect()
        } else {
            KEYWORDS
                .iter()
                .chain(BUILTINS.iter())
                .map(|s| s.to_string())
                .chain(self.env.keys().cloned())
                .collect()
        };
        candidates.retain(|c| c.starts_with(prefix));
        candidates.sort();
        candidates
    }
}

fn eval_binary(op: BinOp, left: Value, right: Value, line: usize) -> Result<Value, EvalError> {
    // Either string operand turns + into concatenation.
    if op == BinOp::Add && (left.is_str() || right.is_str()) {
        return Ok(Value::Str(format!("{}{}", left, right)));
    }

    match (left, right) {
        (Value::Int(a), Value::Int(b)) => int_arith(op, a, b, line),
        (Value::Int(a), Value::Float(b)) => Ok(Value::Float(float_arith(op, a as f64, b))),
        (Value::Float(a), Value::Int(b)) => Ok(Value::Float(float_arith(op, a, b as f64))),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(float_arith(op, a, b))),
        (left, right) => Err(EvalError::new(
            "TypeError",
            format!(
                "operator '{}' cannot be applied to {} and {}",
                op.symbol(),
                left.type_name(),
                right.type_name()
            ),
            line,
        )),
    }
}

fn int_arith(op: BinOp, a: i64, b: i64, line: usize) -> Result<Value, EvalError> {
    if b == 0 && matches!(op, BinOp::Div | BinOp::Rem) {
        return Err(EvalError::new("ArithmeticError", "division by zero", line));
    }
    let result = match op {
        BinOp::Add => a.checked_add(b),
        BinOp::Sub => a.checked_sub(b),
        BinOp::Mul => a.checked_mul(b),
        BinOp::Div => a.checked_div(b),
        BinOp::Rem => a.checked_rem(b),
    };
    result
        .map(Value::Int)
        .ok_or_else(|| EvalError::new("ArithmeticError", "integer overflow", line))
}

fn float_arith(op: BinOp, a: f64, b: f64) -> f64 {
    match op {
        BinOp::Add => a + b,
        BinOp::Sub => a - b,
        BinOp::Mul => a * b,
        BinOp::Div => a / b,
        BinOp::Rem => a % b,
    }
}

fn eval_member(value: Value, name: &str, line: usize) -> Result<Value, EvalError> {
    match (value, name) {
        (value, "toString") => Ok(Value::Str(value.to_string())),
        (Value::Str(s), "length" | "size") => Ok(Value::Int(s.chars().count() as i64)),
        (Value::Seq(items), "length" | "size") => Ok(Value::Int(items.len() as i64)),
        (Value::Seq(items), "head") => items
            .into_iter()
            .next()
            .ok_or_else(|| EvalError::new("ValueError", "head of empty list", line)),
        (value, member) => Err(EvalError::new(
            "TypeError",
            format!("value of type {} has no member {}", value.type_name(), member),
            line,
        )),
    }
}
