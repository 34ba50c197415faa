//! Recursive-descent parser emitting postfix instructions directly.
//!
//! Precedence, loosest to tightest: `+ -`, `* /`, unary `- +`, `^`. All
//! binary operators associate left to right, including `^`, and unary minus
//! binds looser than `^` only through its operand position: `-x^2` is
//! `(-x)^2` because the power base is parsed after the sign is consumed.

use crate::error::ExprError;
use crate::program::{Instr, Program};
use crate::token::{tokenize, Token, TokenKind};
use crate::vars::VarTable;

/// Compile `src` against the variable table into a [`Program`].
///
/// Every identifier in `src` must resolve to a slot in `vars`; the whole
/// input must be consumed (trailing tokens are an error).
pub fn compile(src: &str, vars: &VarTable) -> Result<Program, ExprError> {
    let tokens = tokenize(src)?;
    let mut parser = Parser {
        tokens: &tokens,
        next: 0,
        vars,
        out: Vec::new(),
    };
    parser.expr()?;
    if let Some(token) = parser.peek() {
        return Err(ExprError::UnexpectedToken {
            found: token.kind.describe(),
            pos: token.pos,
        });
    }
    Ok(Program {
        instrs: parser.out,
        slot_count: vars.len(),
    })
}

struct Parser<'a> {
    tokens: &'a [Token],
    next: usize,
    vars: &'a VarTable,
    out: Vec<Instr>,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.next)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.next).cloned();
        if token.is_some() {
            self.next += 1;
        }
        token
    }

    /// expr := term (('+' | '-') term)*
    fn expr(&mut self) -> Result<(), ExprError> {
        self.term()?;
        while let Some(token) = self.peek() {
            let instr = match token.kind {
                TokenKind::Plus => Instr::Add,
                TokenKind::Minus => Instr::Sub,
                _ => break,
            };
            self.next += 1;
            self.term()?;
            self.out.push(instr);
        }
        Ok(())
    }

    /// term := power (('*' | '/') power)*
    fn term(&mut self) -> Result<(), ExprError> {
        self.power()?;
        while let Some(token) = self.peek() {
            let instr = match token.kind {
                TokenKind::Star => Instr::Mul,
                TokenKind::Slash => Instr::Div,
                _ => break,
            };
            self.next += 1;
            self.power()?;
            self.out.push(instr);
        }
        Ok(())
    }

    /// power := unary ('^' unary)*
    fn power(&mut self) -> Result<(), ExprError> {
        self.unary()?;
        while matches!(self.peek().map(|t| &t.kind), Some(TokenKind::Caret)) {
            self.next += 1;
            self.unary()?;
            self.out.push(Instr::Pow);
        }
        Ok(())
    }

    /// unary := ('-' | '+')* primary
    fn unary(&mut self) -> Result<(), ExprError> {
        let mut negate = false;
        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::Minus => negate = !negate,
                TokenKind::Plus => {}
                _ => break,
            }
            self.next += 1;
        }
        self.primary()?;
        if negate {
            self.out.push(Instr::Neg);
        }
        Ok(())
    }

    /// primary := NUMBER | IDENT | '(' expr ')'
    fn primary(&mut self) -> Result<(), ExprError> {
        let token = self.bump().ok_or(ExprError::UnexpectedEnd)?;
        match token.kind {
            TokenKind::Number(value) => {
                self.out.push(Instr::Literal(value));
                Ok(())
            }
            TokenKind::Ident(ref name) => {
                let slot = self
                    .vars
                    .slot(name)
                    .ok_or_else(|| ExprError::UnknownIdentifier {
                        name: name.clone(),
                        pos: token.pos,
                    })?;
                self.out.push(Instr::Var(slot));
                Ok(())
            }
            TokenKind::LParen => {
                self.expr()?;
                match self.bump() {
                    Some(token) if token.kind == TokenKind::RParen => Ok(()),
                    Some(token) => Err(ExprError::UnexpectedToken {
                        found: token.kind.describe(),
                        pos: token.pos,
                    }),
                    None => Err(ExprError::UnexpectedEnd),
                }
            }
            ref other => Err(ExprError::UnexpectedToken {
                found: other.describe(),
                pos: token.pos,
            }),
        }
    }
}
