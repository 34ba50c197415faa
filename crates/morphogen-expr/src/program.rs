//! The compiled postfix program and its evaluator.

use smallvec::SmallVec;

/// One postfix instruction.
///
/// Binary operators pop the right operand first (it was pushed last), apply,
/// and push the result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Instr {
    /// Push a literal constant.
    Literal(f64),
    /// Push the value of variable slot `n`.
    Var(usize),
    /// Pop two, push their sum.
    Add,
    /// Pop two, push left minus right.
    Sub,
    /// Pop two, push their product.
    Mul,
    /// Pop two, push left over right.
    Div,
    /// Pop two, push left raised to right.
    Pow,
    /// Pop one, push its negation.
    Neg,
}

/// A compiled expression: a flat postfix instruction sequence.
///
/// Produced by [`compile`](crate::compile), evaluated with [`eval`]. The
/// program is pure data; it holds no references, so it stays valid across
/// any change to the storage it will be evaluated against.
///
/// [`eval`]: Program::eval
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    pub(crate) instrs: Vec<Instr>,
    pub(crate) slot_count: usize,
}

impl Program {
    /// The instruction sequence, in evaluation order.
    pub fn instrs(&self) -> &[Instr] {
        &self.instrs
    }

    /// Number of variable slots the compiling table declared. `eval` expects
    /// a slot array at least this long.
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Evaluate against `slots`, where `slots[i]` is the current value of
    /// the `i`-th table variable.
    ///
    /// Numeric degeneracy (division by zero, overflow) follows IEEE 754 and
    /// propagates as non-finite values; evaluation never fails or panics on
    /// a well-formed program.
    pub fn eval(&self, slots: &[f64]) -> f64 {
        debug_assert!(slots.len() >= self.slot_count);

        let mut stack: SmallVec<[f64; 16]> = SmallVec::new();
        for instr in &self.instrs {
            match *instr {
                Instr::Literal(v) => stack.push(v),
                Instr::Var(slot) => stack.push(slots[slot]),
                Instr::Neg => {
                    let v = stack.pop().unwrap_or(f64::NAN);
                    stack.push(-v);
                }
                Instr::Add | Instr::Sub | Instr::Mul | Instr::Div | Instr::Pow => {
                    let rhs = stack.pop().unwrap_or(f64::NAN);
                    let lhs = stack.pop().unwrap_or(f64::NAN);
                    stack.push(match *instr {
                        Instr::Add => lhs + rhs,
                        Instr::Sub => lhs - rhs,
                        Instr::Mul => lhs * rhs,
                        Instr::Div => lhs / rhs,
                        Instr::Pow => lhs.powf(rhs),
                        _ => unreachable!(),
                    });
                }
            }
        }
        stack.pop().unwrap_or(f64::NAN)
    }
}
