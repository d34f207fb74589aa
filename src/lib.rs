// Declare modules
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod pretty_print;
pub mod source;
pub mod types;

// Re-export key types for easier use
pub use evaluator::{EvalError, EvalResult};
pub use lexer::{Token, TokenKind, TokenType, tokenize};
pub use parser::{ParseError, Parser, parse_str};
pub use source::Span;
pub use types::{Direction, Expr, Operator};
