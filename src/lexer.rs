use logos::Logos;
use std::fmt;

use crate::Span;
use crate::types::{Direction, Operator};

#[derive(Logos, Debug, Copy, Clone, PartialEq)]
#[logos(skip r"[ \t]+")] // Skip spaces and tabs; nothing else is ignorable
pub enum TokenKind {
    // A digit run with an optional fraction. "3." is fine (empty fraction),
    // ".5" is not a number at all.
    #[regex(r"[0-9]+(\.[0-9]*)?", number)]
    Number(f64),
    #[token("+", |_| Operator::Plus)]
    #[token("-", |_| Operator::Minus)]
    #[token("*", |_| Operator::Multiply)]
    #[token("/", |_| Operator::Divide)]
    #[token("^", |_| Operator::Power)]
    Operator(Operator),
    #[token("(", |_| Direction::Left)]
    #[token(")", |_| Direction::Right)]
    Parenthesis(Direction),
    #[regex(r"[a-zA-Z]", variable)]
    Variable(char),
    // The scanner itself never yields these two. `tokenize` turns every
    // unmatched character into an `Invalid` token and terminates the stream
    // with a zero-width `Eof`.
    Invalid,
    Eof,
}

// Cannot fail for anything the pattern matches, "3." included
fn number(lex: &logos::Lexer<TokenKind>) -> Option<f64> {
    lex.slice().parse().ok()
}

// A letter only names a variable when it stands alone. Two letters in a row
// look like a function or word, which this grammar does not have, so the
// first letter is rejected and lexing resumes at the second.
fn variable(lex: &logos::Lexer<TokenKind>) -> Option<char> {
    match lex.remainder().chars().next() {
        Some(next) if next.is_ascii_alphabetic() => None,
        _ => lex.slice().chars().next(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String, // The exact source text, kept for error reporting
    pub span: Span,
}

impl Token {
    pub fn eof(position: usize) -> Self {
        Token {
            kind: TokenKind::Eof,
            literal: String::new(),
            span: Span::new(position, position),
        }
    }
}

/// Token category without its payload. Diagnostics talk about categories
/// ("expected Number or Parenthesis"), not concrete values.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TokenType {
    Number,
    Operator,
    Parenthesis,
    Variable,
    Invalid,
    EndOfInput,
}

impl TokenKind {
    pub fn token_type(&self) -> TokenType {
        match self {
            TokenKind::Number(_) => TokenType::Number,
            TokenKind::Operator(_) => TokenType::Operator,
            TokenKind::Parenthesis(_) => TokenType::Parenthesis,
            TokenKind::Variable(_) => TokenType::Variable,
            TokenKind::Invalid => TokenType::Invalid,
            TokenKind::Eof => TokenType::EndOfInput,
        }
    }
}

// Implement Display for use in error messages
impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenType::Number => "Number",
            TokenType::Operator => "Operator",
            TokenType::Parenthesis => "Parenthesis",
            TokenType::Variable => "Variable",
            TokenType::Invalid => "Invalid",
            TokenType::EndOfInput => "EndOfInput",
        };
        write!(f, "{}", name)
    }
}

/// Runs the scanner over the whole input.
///
/// Lexing is total: characters no rule matches come back as `Invalid`
/// tokens rather than stopping the scan, and the stream always ends with a
/// zero-width `Eof` at the end of the input. Deciding what to do about an
/// `Invalid` token is the parser's job.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = TokenKind::lexer(input)
        .spanned() // Yields (Result<TokenKind, ()>, Range<usize>)
        .map(|(result, range)| Token {
            kind: result.unwrap_or(TokenKind::Invalid),
            literal: input[range.start..range.end].to_string(),
            span: Span::new(range.start, range.end - 1),
        })
        .collect();
    tokens.push(Token::eof(input.len()));
    tokens
}
