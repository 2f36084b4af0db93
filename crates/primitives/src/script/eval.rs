//! Tree-walking interpreter for update scripts
//!
//! Runs against a private copy of the document. The caller only sees the
//! copy if every statement succeeds, so a failing script never leaves a
//! half-applied update behind.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use docstore_core::{Document, Value};

use super::ast::{BinaryOp, Expr, Path, Root, Stmt, UnaryOp};
use super::ScriptError;

type EvalResult<T> = Result<T, ScriptError>;

/// Run a program, returning the transformed document
pub fn run(program: &[Stmt], source: &Document, params: &Document) -> EvalResult<Document> {
    let mut interpreter = Interpreter {
        source: source.clone().into_inner(),
        params,
    };
    interpreter.block(program)?;
    Ok(Document::from(interpreter.source))
}

struct Interpreter<'p> {
    source: BTreeMap<String, Value>,
    params: &'p Document,
}

impl Interpreter<'_> {
    fn block(&mut self, stmts: &[Stmt]) -> EvalResult<()> {
        for stmt in stmts {
            match stmt {
                Stmt::Expr(expr) => {
                    self.eval(expr)?;
                }
                Stmt::If {
                    cond,
                    then,
                    otherwise,
                } => {
                    let value = self.eval(cond)?;
                    let Some(taken) = value.as_bool() else {
                        return Err(ScriptError::runtime(format!(
                            "if condition must be a boolean, got {}",
                            value.type_name()
                        )));
                    };
                    if taken {
                        self.block(then)?;
                    } else {
                        self.block(otherwise)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Path(path) => self.read(path),
            Expr::Unary { op, expr } => {
                let value = self.eval(expr)?;
                unary(*op, value)
            }
            Expr::Binary {
                op: BinaryOp::And,
                lhs,
                rhs,
            } => {
                if !self.condition(lhs, BinaryOp::And)? {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(self.condition(rhs, BinaryOp::And)?))
            }
            Expr::Binary {
                op: BinaryOp::Or,
                lhs,
                rhs,
            } => {
                if self.condition(lhs, BinaryOp::Or)? {
                    return Ok(Value::Bool(true));
                }
                Ok(Value::Bool(self.condition(rhs, BinaryOp::Or)?))
            }
            Expr::Binary { op, lhs, rhs } => {
                let lhs = self.eval(lhs)?;
                let rhs = self.eval(rhs)?;
                binary(*op, lhs, rhs)
            }
            Expr::Assign { target, op, value } => {
                let rhs = self.eval(value)?;
                let next = match op {
                    None => rhs,
                    Some(op) => binary(*op, self.read(target)?, rhs)?,
                };
                self.write(target, next.clone())?;
                Ok(next)
            }
            Expr::Step {
                target,
                delta,
                prefix,
            } => {
                let current = self.read(target)?;
                if !current.is_number() {
                    return Err(ScriptError::runtime(format!(
                        "cannot {} {} value at {}",
                        if *delta > 0 { "increment" } else { "decrement" },
                        current.type_name(),
                        target
                    )));
                }
                let next = binary(BinaryOp::Add, current.clone(), Value::Int(*delta))?;
                self.write(target, next.clone())?;
                Ok(if *prefix { next } else { current })
            }
        }
    }

    fn condition(&mut self, expr: &Expr, op: BinaryOp) -> EvalResult<bool> {
        let value = self.eval(expr)?;
        value.as_bool().ok_or_else(|| {
            ScriptError::runtime(format!(
                "operator {} expects booleans, got {}",
                op.symbol(),
                value.type_name()
            ))
        })
    }

    /// Read a path; a missing leaf reads as null
    fn read(&self, path: &Path) -> EvalResult<Value> {
        let (first, rest) = match path.fields.split_first() {
            Some(split) => split,
            None => {
                return Ok(match path.root {
                    Root::Source => Value::Object(self.source.clone()),
                    Root::Params => Value::from(self.params.clone()),
                })
            }
        };

        let mut current = match path.root {
            Root::Source => self.source.get(first),
            Root::Params => self.params.get(first),
        };
        for field in rest {
            current = match current {
                Some(Value::Object(map)) => map.get(field),
                Some(other) => {
                    return Err(ScriptError::runtime(format!(
                        "cannot read field '{}' of {} in {}",
                        field,
                        other.type_name(),
                        path
                    )))
                }
                None => {
                    return Err(ScriptError::runtime(format!(
                        "cannot read field '{}' of null in {}",
                        field, path
                    )))
                }
            };
        }
        Ok(current.cloned().unwrap_or(Value::Null))
    }

    /// Write a source path, creating intermediate objects as needed
    fn write(&mut self, path: &Path, value: Value) -> EvalResult<()> {
        let Some((leaf, parents)) = path.fields.split_last() else {
            return Err(ScriptError::runtime("cannot replace ctx._source"));
        };

        let mut map = &mut self.source;
        for field in parents {
            let slot = map
                .entry(field.clone())
                .or_insert_with(|| Value::Object(BTreeMap::new()));
            if slot.is_null() {
                *slot = Value::Object(BTreeMap::new());
            }
            map = match slot {
                Value::Object(inner) => inner,
                other => {
                    return Err(ScriptError::runtime(format!(
                        "cannot write field below {} value '{}' in {}",
                        other.type_name(),
                        field,
                        path
                    )))
                }
            };
        }
        map.insert(leaf.clone(), value);
        Ok(())
    }
}

fn unary(op: UnaryOp, value: Value) -> EvalResult<Value> {
    match (op, value) {
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnaryOp::Neg, Value::Int(i)) => i
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| ScriptError::runtime("integer overflow")),
        (UnaryOp::Neg, Value::Float(f)) => Ok(Value::Float(-f)),
        (op, value) => Err(ScriptError::runtime(format!(
            "operator {} cannot be applied to {}",
            match op {
                UnaryOp::Not => "!",
                UnaryOp::Neg => "-",
            },
            value.type_name()
        ))),
    }
}

fn binary(op: BinaryOp, lhs: Value, rhs: Value) -> EvalResult<Value> {
    match op {
        BinaryOp::Eq => Ok(Value::Bool(equals(&lhs, &rhs))),
        BinaryOp::Ne => Ok(Value::Bool(!equals(&lhs, &rhs))),
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            let ordering = compare(op, &lhs, &rhs)?;
            Ok(Value::Bool(match (op, ordering) {
                (_, None) => false,
                (BinaryOp::Lt, Some(o)) => o == Ordering::Less,
                (BinaryOp::Le, Some(o)) => o != Ordering::Greater,
                (BinaryOp::Gt, Some(o)) => o == Ordering::Greater,
                (_, Some(o)) => o != Ordering::Less,
            }))
        }
        BinaryOp::Add if lhs.as_str().is_some() || rhs.as_str().is_some() => {
            Ok(Value::String(format!("{}{}", text(&lhs), text(&rhs))))
        }
        BinaryOp::And | BinaryOp::Or => Err(ScriptError::runtime(format!(
            "operator {} expects booleans",
            op.symbol()
        ))),
        _ => arithmetic(op, lhs, rhs),
    }
}

fn arithmetic(op: BinaryOp, lhs: Value, rhs: Value) -> EvalResult<Value> {
    match (&lhs, &rhs) {
        (Value::Int(a), Value::Int(b)) => {
            let (a, b) = (*a, *b);
            if matches!(op, BinaryOp::Div | BinaryOp::Rem) && b == 0 {
                return Err(ScriptError::runtime("division by zero"));
            }
            let result = match op {
                BinaryOp::Add => a.checked_add(b),
                BinaryOp::Sub => a.checked_sub(b),
                BinaryOp::Mul => a.checked_mul(b),
                BinaryOp::Div => a.checked_div(b),
                _ => a.checked_rem(b),
            };
            result
                .map(Value::Int)
                .ok_or_else(|| ScriptError::runtime("integer overflow"))
        }
        _ => match (lhs.as_f64(), rhs.as_f64()) {
            (Some(a), Some(b)) => {
                if matches!(op, BinaryOp::Div | BinaryOp::Rem) && b == 0.0 {
                    return Err(ScriptError::runtime("division by zero"));
                }
                Ok(Value::Float(match op {
                    BinaryOp::Add => a + b,
                    BinaryOp::Sub => a - b,
                    BinaryOp::Mul => a * b,
                    BinaryOp::Div => a / b,
                    _ => a % b,
                }))
            }
            _ => Err(ScriptError::runtime(format!(
                "operator {} cannot be applied to {} and {}",
                op.symbol(),
                lhs.type_name(),
                rhs.type_name()
            ))),
        },
    }
}

/// Equality with numeric widening: `1 == 1.0`
fn equals(lhs: &Value, rhs: &Value) -> bool {
    match (lhs, rhs) {
        (Value::Int(_), Value::Float(_)) | (Value::Float(_), Value::Int(_)) => {
            lhs.as_f64() == rhs.as_f64()
        }
        _ => lhs == rhs,
    }
}

fn compare(op: BinaryOp, lhs: &Value, rhs: &Value) -> EvalResult<Option<Ordering>> {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => Ok(Some(a.cmp(b))),
        (Value::String(a), Value::String(b)) => Ok(Some(a.cmp(b))),
        _ => match (lhs.as_f64(), rhs.as_f64()) {
            (Some(a), Some(b)) => Ok(a.partial_cmp(&b)),
            _ => Err(ScriptError::runtime(format!(
                "cannot compare {} {} {}",
                lhs.type_name(),
                op.symbol(),
                rhs.type_name()
            ))),
        },
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
