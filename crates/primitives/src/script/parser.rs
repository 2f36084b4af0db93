//! Recursive-descent parser for update scripts
//!
//! Grammar (lowest to highest precedence):
//!
//! ```text
//! program    := statement*
//! statement  := "if" "(" expr ")" branch ("else" (if | branch))?
//!             | "{" statement* "}"
//!             | expr (";" | end of block)
//!             | ";"
//! expr       := or (assign-op expr)?
//! or         := and ("||" and)*
//! and        := equality ("&&" equality)*
//! equality   := comparison (("==" | "!=") comparison)*
//! comparison := additive (("<" | "<=" | ">" | ">=") additive)*
//! additive   := term (("+" | "-") term)*
//! term       := unary (("*" | "/" | "%") unary)*
//! unary      := ("!" | "-" | "++" | "--") unary | postfix
//! postfix    := primary ("++" | "--")?
//! primary    := literal | path | "(" expr ")"
//! path       := ("ctx" "." "_source" | "params") ("." ident | "[" string "]")*
//! ```

use docstore_core::Value;

use super::ast::{BinaryOp, Expr, Path, Root, Stmt, UnaryOp};
use super::lexer::{tokenize, Spanned, Token};
use super::ScriptError;

/// Maximum nesting of blocks and parenthesised expressions
pub const MAX_NESTING: usize = 64;

/// Parse script source into statements
pub fn parse(source: &str) -> Result<Vec<Stmt>, ScriptError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        tokens,
        cursor: 0,
        depth: 0,
    };
    parser.program()
}

struct Parser {
    tokens: Vec<Spanned>,
    cursor: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.cursor.min(self.tokens.len() - 1)].token
    }

    fn pos(&self) -> usize {
        self.tokens[self.cursor.min(self.tokens.len() - 1)].pos
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.cursor < self.tokens.len() - 1 {
            self.cursor += 1;
        }
        token
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: Token, what: &str) -> Result<(), ScriptError> {
        if self.eat(&expected) {
            Ok(())
        } else {
            Err(self.unexpected(what))
        }
    }

    fn unexpected(&self, what: &str) -> ScriptError {
        ScriptError::parse(
            self.pos(),
            format!("expected {}, found {}", what, describe(self.peek())),
        )
    }

    fn enter(&mut self) -> Result<(), ScriptError> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(ScriptError::parse(self.pos(), "script nests too deeply"));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn program(&mut self) -> Result<Vec<Stmt>, ScriptError> {
        let mut stmts = Vec::new();
        while *self.peek() != Token::Eof {
            self.statement_into(&mut stmts)?;
        }
        Ok(stmts)
    }

    fn statement_into(&mut self, out: &mut Vec<Stmt>) -> Result<(), ScriptError> {
        match self.peek() {
            Token::Semi => {
                self.advance();
            }
            Token::LBrace => out.extend(self.block()?),
            Token::If => out.push(self.if_statement()?),
            _ => {
                let expr = self.expression()?;
                // The last statement of a block or script may omit its ';'
                if !matches!(self.peek(), Token::RBrace | Token::Eof) {
                    self.expect(Token::Semi, "';'")?;
                }
                out.push(Stmt::Expr(expr));
            }
        }
        Ok(())
    }

    fn block(&mut self) -> Result<Vec<Stmt>, ScriptError> {
        self.enter()?;
        self.expect(Token::LBrace, "'{'")?;
        let mut stmts = Vec::new();
        while !matches!(self.peek(), Token::RBrace | Token::Eof) {
            self.statement_into(&mut stmts)?;
        }
        self.expect(Token::RBrace, "'}'")?;
        self.leave();
        Ok(stmts)
    }

    fn branch(&mut self) -> Result<Vec<Stmt>, ScriptError> {
        let mut stmts = Vec::new();
        self.statement_into(&mut stmts)?;
        Ok(stmts)
    }

    fn if_statement(&mut self) -> Result<Stmt, ScriptError> {
        self.enter()?;
        self.expect(Token::If, "'if'")?;
        self.expect(Token::LParen, "'('")?;
        let cond = self.expression()?;
        self.expect(Token::RParen, "')'")?;
        let then = self.branch()?;
        let otherwise = if self.eat(&Token::Else) {
            self.branch()?
        } else {
            Vec::new()
        };
        self.leave();
        Ok(Stmt::If {
            cond,
            then,
            otherwise,
        })
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn expression(&mut self) -> Result<Expr, ScriptError> {
        self.enter()?;
        let start = self.pos();
        let lhs = self.binary_level(0)?;

        let op = match self.peek() {
            Token::Assign => Some(None),
            Token::PlusAssign => Some(Some(BinaryOp::Add)),
            Token::MinusAssign => Some(Some(BinaryOp::Sub)),
            Token::StarAssign => Some(Some(BinaryOp::Mul)),
            Token::SlashAssign => Some(Some(BinaryOp::Div)),
            _ => None,
        };

        let expr = match op {
            Some(op) => {
                let target = writable(lhs, start)?;
                self.advance();
                let value = self.expression()?;
                Expr::Assign {
                    target,
                    op,
                    value: Box::new(value),
                }
            }
            None => lhs,
        };
        self.leave();
        Ok(expr)
    }

    /// Precedence climbing over the binary operator table
    fn binary_level(&mut self, level: usize) -> Result<Expr, ScriptError> {
        const LEVELS: &[&[(Token, BinaryOp)]] = &[
            &[(Token::OrOr, BinaryOp::Or)],
            &[(Token::AndAnd, BinaryOp::And)],
            &[(Token::EqEq, BinaryOp::Eq), (Token::NotEq, BinaryOp::Ne)],
            &[
                (Token::Lt, BinaryOp::Lt),
                (Token::Le, BinaryOp::Le),
                (Token::Gt, BinaryOp::Gt),
                (Token::Ge, BinaryOp::Ge),
            ],
            &[(Token::Plus, BinaryOp::Add), (Token::Minus, BinaryOp::Sub)],
            &[
                (Token::Star, BinaryOp::Mul),
                (Token::Slash, BinaryOp::Div),
                (Token::Percent, BinaryOp::Rem),
            ],
        ];

        let Some(operators) = LEVELS.get(level) else {
            return self.unary();
        };

        let mut lhs = self.binary_level(level + 1)?;
        loop {
            let op = operators
                .iter()
                .find(|(token, _)| token == self.peek())
                .map(|(_, op)| *op);
            let Some(op) = op else { break };
            self.advance();
            let rhs = self.binary_level(level + 1)?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, ScriptError> {
        let start = self.pos();
        match self.peek() {
            Token::Bang | Token::Minus => {
                let op = if self.advance() == Token::Bang {
                    UnaryOp::Not
                } else {
                    UnaryOp::Neg
                };
                self.enter()?;
                let expr = self.unary()?;
                self.leave();
                Ok(Expr::Unary {
                    op,
                    expr: Box::new(expr),
                })
            }
            Token::PlusPlus | Token::MinusMinus => {
                let delta = if self.advance() == Token::PlusPlus { 1 } else { -1 };
                let operand = self.postfix()?;
                Ok(Expr::Step {
                    target: writable(operand, start)?,
                    delta,
                    prefix: true,
                })
            }
            _ => self.postfix(),
        }
    }

    fn postfix(&mut self) -> Result<Expr, ScriptError> {
        let start = self.pos();
        let expr = self.primary()?;
        let delta = match self.peek() {
            Token::PlusPlus => 1,
            Token::MinusMinus => -1,
            _ => return Ok(expr),
        };
        self.advance();
        Ok(Expr::Step {
            target: writable(expr, start)?,
            delta,
            prefix: false,
        })
    }

    fn primary(&mut self) -> Result<Expr, ScriptError> {
        let literal = match self.peek() {
            Token::Int(i) => Some(Value::Int(*i)),
            Token::Float(f) => Some(Value::Float(*f)),
            Token::Str(s) => Some(Value::String(s.clone())),
            Token::True => Some(Value::Bool(true)),
            Token::False => Some(Value::Bool(false)),
            Token::Null => Some(Value::Null),
            _ => None,
        };
        if let Some(value) = literal {
            self.advance();
            return Ok(Expr::Literal(value));
        }

        match self.peek() {
            Token::LParen => {
                self.advance();
                let expr = self.expression()?;
                self.expect(Token::RParen, "')'")?;
                Ok(expr)
            }
            Token::Ident(_) => self.path().map(Expr::Path),
            _ => Err(self.unexpected("an expression")),
        }
    }

    fn path(&mut self) -> Result<Path, ScriptError> {
        let start = self.pos();
        let root = match self.advance() {
            Token::Ident(name) if name == "ctx" => {
                self.expect(Token::Dot, "'.'")?;
                match self.advance() {
                    Token::Ident(name) if name == "_source" => Root::Source,
                    _ => {
                        return Err(ScriptError::parse(
                            start,
                            "only ctx._source is available to update scripts",
                        ))
                    }
                }
            }
            Token::Ident(name) if name == "params" => Root::Params,
            Token::Ident(name) => {
                return Err(ScriptError::parse(
                    start,
                    format!("unknown variable '{}'", name),
                ))
            }
            _ => return Err(ScriptError::parse(start, "expected a variable")),
        };

        let mut fields = Vec::new();
        loop {
            if self.eat(&Token::Dot) {
                let Token::Ident(field) = self.peek().clone() else {
                    return Err(self.unexpected("a field name"));
                };
                self.advance();
                fields.push(field);
            } else if self.eat(&Token::LBracket) {
                let Token::Str(field) = self.peek().clone() else {
                    return Err(self.unexpected("a quoted field name"));
                };
                self.advance();
                fields.push(field);
                self.expect(Token::RBracket, "']'")?;
            } else {
                break;
            }
        }
        Ok(Path { root, fields })
    }
}

/// Check that an expression can be written to
fn writable(expr: Expr, pos: usize) -> Result<Path, ScriptError> {
    match expr {
        Expr::Path(path) if path.root == Root::Source && !path.fields.is_empty() => Ok(path),
        Expr::Path(path) if path.root == Root::Params => {
            Err(ScriptError::parse(pos, "params are read-only"))
        }
        _ => Err(ScriptError::parse(pos, "invalid assignment target")),
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Ident(name) => format!("'{}'", name),
        Token::Int(i) => i.to_string(),
        Token::Float(f) => f.to_string(),
        Token::Str(s) => format!("string '{}'", s),
        Token::Eof => "end of script".to_string(),
        other => format!("{:?}", other),
    }
}
