//! Rule-file parsing: tokens, expressions, and whole problems

pub mod expr;
pub mod input;
pub mod lexer;

pub use expr::parse_expr;
pub use input::{parse_problem, parse_problem_file, Problem};
pub use lexer::{tokenize, Token};
