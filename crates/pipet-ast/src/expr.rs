// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Expression AST nodes.

use crate::{NodeId, Span, SymbolId};

/// An expression in the AST.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expr {
    #[cfg_attr(feature = "serde", serde(default = "dummy_id"))]
    pub id: NodeId,
    pub kind: ExprKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: Span,
}

#[cfg(feature = "serde")]
fn dummy_id() -> NodeId {
    NodeId::DUMMY
}

/// The kind of expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ExprKind {
    /// Reference to a declared symbol. `symbol` is `None` when the parser
    /// could not bind the name.
    Symbol {
        name: String,
        symbol: Option<SymbolId>,
    },
    /// Quoted string literal
    Str(String),
    /// Bare path literal (`src/main.c`)
    File(String),
    /// Path literal containing a wildcard segment (`src/*.c`)
    Glob(String),
    /// Integer literal
    Int(i64),
    /// Boolean literal
    Bool(bool),
    /// `()`
    Unit,
    /// `[a, b, c]`
    List(Vec<Expr>),
    /// `(a, b, c)`
    Tuple(Vec<Expr>),
    /// Juxtaposition application: `a b f` or `a !f b`.
    /// Arguments are applied to `func` left to right.
    FnApp {
        func: Box<Expr>,
        args: Vec<Expr>,
    },
    /// Pipe application: `arg | func`
    PipeApp {
        arg: Box<Expr>,
        func: Box<Expr>,
    },
    /// Binary operator other than the pipe
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `let name = init`
    Let {
        symbol: Option<SymbolId>,
        init: Box<Expr>,
    },
    /// Placeholder left by parser error recovery
    Invalid,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BinOp {
    Write,
    And,
    Or,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Concat,
    Mul,
    Div,
    Mod,
}

impl BinOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOp::Write => "|>",
            BinOp::And => "&&",
            BinOp::Or => "||",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Concat => "++",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
        }
    }
}

impl ExprKind {
    /// Stable tag used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            ExprKind::Symbol { .. } => "symbol",
            ExprKind::Str(_) => "string literal",
            ExprKind::File(_) => "file literal",
            ExprKind::Glob(_) => "glob literal",
            ExprKind::Int(_) => "integer literal",
            ExprKind::Bool(_) => "boolean literal",
            ExprKind::Unit => "unit literal",
            ExprKind::List(_) => "list literal",
            ExprKind::Tuple(_) => "tuple literal",
            ExprKind::FnApp { .. } => "function application",
            ExprKind::PipeApp { .. } => "pipe application",
            ExprKind::Binary { .. } => "binary operator",
            ExprKind::Let { .. } => "let binding",
            ExprKind::Invalid => "invalid expression",
        }
    }
}

impl Expr {
    /// Create a node with a placeholder id. Call [`Expr::number`] on the
    /// root once the tree is complete.
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self {
            id: NodeId::DUMMY,
            kind,
            span,
        }
    }

    /// Assign ids in pre-order starting at `NodeId(0)`. Returns the number of
    /// nodes in the tree.
    pub fn number(&mut self) -> u32 {
        let mut next = 0;
        self.number_from(&mut next);
        next
    }

    fn number_from(&mut self, next: &mut u32) {
        self.id = NodeId(*next);
        *next += 1;
        for child in self.children_mut() {
            child.number_from(next);
        }
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<&Expr> {
        match &self.kind {
            ExprKind::List(items) | ExprKind::Tuple(items) => items.iter().collect(),
            ExprKind::FnApp { func, args } => {
                let mut out: Vec<&Expr> = args.iter().collect();
                out.push(func.as_ref());
                out
            }
            ExprKind::PipeApp { arg, func } => vec![arg.as_ref(), func.as_ref()],
            ExprKind::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            ExprKind::Let { init, .. } => vec![init.as_ref()],
            ExprKind::Symbol { .. }
            | ExprKind::Str(_)
            | ExprKind::File(_)
            | ExprKind::Glob(_)
            | ExprKind::Int(_)
            | ExprKind::Bool(_)
            | ExprKind::Unit
            | ExprKind::Invalid => Vec::new(),
        }
    }

    fn children_mut(&mut self) -> Vec<&mut Expr> {
        match &mut self.kind {
            ExprKind::List(items) | ExprKind::Tuple(items) => items.iter_mut().collect(),
            ExprKind::FnApp { func, args } => {
                let mut out: Vec<&mut Expr> = args.iter_mut().collect();
                out.push(func.as_mut());
                out
            }
            ExprKind::PipeApp { arg, func } => vec![arg.as_mut(), func.as_mut()],
            ExprKind::Binary { left, right, .. } => vec![left.as_mut(), right.as_mut()],
            ExprKind::Let { init, .. } => vec![init.as_mut()],
            _ => Vec::new(),
        }
    }

    /// Visit every node of the tree in pre-order.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Expr)) {
        f(self);
        for child in self.children() {
            child.walk(f);
        }
    }

    /// Like [`Expr::walk`], with mutable access to each node.
    pub fn walk_mut(&mut self, f: &mut impl FnMut(&mut Expr)) {
        f(self);
        for child in self.children_mut() {
            child.walk_mut(f);
        }
    }
}
