//! Runtime arithmetic-expression compiler for morphogen reaction terms.
//!
//! Turns user text such as `-x*y*y+b-b*x` into a flat postfix [`Program`]
//! that is evaluated millions of times per simulation step without
//! re-parsing. Identifiers are resolved at compile time against a
//! [`VarTable`] into stable slot indices; evaluation reads a caller-owned
//! slot array, so a compiled program can never dangle even when the
//! parameter set that produced it is rebuilt.
//!
//! Grammar: infix `+ - * / ^` with conventional precedence, unary minus,
//! decimal literals, parentheses, and identifiers. `^` associates left to
//! right and `-x^2` parses as `(-x)^2`. No functions, no control flow.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod error;
mod parser;
mod program;
mod token;
mod vars;

pub use error::ExprError;
pub use parser::compile;
pub use program::{Instr, Program};
pub use vars::VarTable;
