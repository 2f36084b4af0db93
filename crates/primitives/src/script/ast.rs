//! Syntax tree for update scripts

use docstore_core::Value;

/// Variable a path starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Root {
    /// `ctx._source`: the document being updated (read/write)
    Source,
    /// `params`: caller-supplied parameters (read-only)
    Params,
}

/// Field path such as `ctx._source.stock.warehouse` or `params['delta']`
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// Starting variable
    pub root: Root,
    /// Field names below the root
    pub fields: Vec<String>,
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.root {
            Root::Source => f.write_str("ctx._source")?,
            Root::Params => f.write_str("params")?,
        }
        for field in &self.fields {
            write!(f, ".{}", field)?;
        }
        Ok(())
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `!`
    Not,
    /// `-`
    Neg,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `&&`
    And,
    /// `||`
    Or,
}

impl BinaryOp {
    /// Operator as written in source
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal value
    Literal(Value),
    /// Field read
    Path(Path),
    /// Unary operation
    Unary {
        /// Operator
        op: UnaryOp,
        /// Operand
        expr: Box<Expr>,
    },
    /// Binary operation
    Binary {
        /// Operator
        op: BinaryOp,
        /// Left operand
        lhs: Box<Expr>,
        /// Right operand
        rhs: Box<Expr>,
    },
    /// `target = value` or compound `target op= value`
    Assign {
        /// Written field
        target: Path,
        /// `None` for plain `=`
        op: Option<BinaryOp>,
        /// Right-hand side
        value: Box<Expr>,
    },
    /// `++`/`--` in prefix or postfix position
    Step {
        /// Written field
        target: Path,
        /// +1 or -1
        delta: i64,
        /// Prefix form evaluates to the new value, postfix to the old one
        prefix: bool,
    },
}

/// Statements
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Expression evaluated for its effect
    Expr(Expr),
    /// Conditional
    If {
        /// Condition, must evaluate to a boolean
        cond: Expr,
        /// Statements run when true
        then: Vec<Stmt>,
        /// Statements run when false
        otherwise: Vec<Stmt>,
    },
}
