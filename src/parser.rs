use crate::Span;
use crate::lexer::{Token, TokenKind, TokenType, tokenize};
use crate::types::{Direction, Expr, Operator};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    // The lexer marked this stretch of input as unrecognizable
    InvalidToken { literal: String, span: Span },
    // The token stream does not fit the grammar
    Syntax {
        expected: Vec<TokenType>,
        found: TokenType,
        span: Span,
    },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::InvalidToken { span, .. } | ParseError::Syntax { span, .. } => *span,
        }
    }
}

// "Number, Parenthesis or Variable"
pub(crate) fn describe_expected(expected: &[TokenType]) -> String {
    let mut list = String::new();
    for (position, token_type) in expected.iter().enumerate() {
        if position > 0 {
            list.push_str(if position + 1 == expected.len() {
                " or "
            } else {
                ", "
            });
        }
        list.push_str(&token_type.to_string());
    }
    list
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidToken { span, .. } => {
                write!(f, "Invalid token at character {}", span.start)?;
                if span.end > span.start {
                    write!(f, " to {}", span.end)?;
                }
                Ok(())
            }
            ParseError::Syntax {
                expected,
                found,
                span,
            } => {
                write!(
                    f,
                    "Syntax error: Expected {}, got {} at character {}",
                    describe_expected(expected),
                    found,
                    span.start
                )?;
                if span.end > span.start {
                    write!(f, " to {}", span.end)?;
                }
                Ok(())
            }
        }
    }
}

// Allow ParseError to be treated as a standard Error
impl std::error::Error for ParseError {}

// Result type alias for convenience
type ParseResult<T> = Result<T, ParseError>;

/// Precedence-climbing parser over a lexed token stream.
///
/// The parser keeps the tokens it was given and only moves a cursor over
/// them, so `parse` can be called again and returns the same result.
pub struct Parser {
    tokens: Vec<Token>,
    index: usize,
    paren_level: usize, // Open parentheses the cursor is currently inside
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        // `current` and `peek` index freely, so the stream must end with an
        // Eof token. `tokenize` always supplies one; token vectors built by
        // hand may not.
        if !tokens
            .last()
            .is_some_and(|token| token.kind == TokenKind::Eof)
        {
            let position = tokens.last().map_or(0, |token| token.span.end + 1);
            tokens.push(Token::eof(position));
        }
        Parser {
            tokens,
            index: 0,
            paren_level: 0,
        }
    }

    /// Parses the token stream into an expression tree.
    ///
    /// The cursor is reset first, so calling this twice on the same parser
    /// re-parses the same tokens and returns the same result.
    pub fn parse(&mut self) -> ParseResult<Expr> {
        self.index = 0;
        self.paren_level = 0;
        self.check_invalid()?;

        let first = self.parse_primary()?;
        let result = self.parse_infix(first, 0, 0)?;

        // Everything consumed? An open group or a leftover token after the
        // expression is an error at the position just past the last token
        // the expression used.
        if self.paren_level > 0 {
            let position = self.current().span.end + 1;
            return Err(ParseError::Syntax {
                expected: vec![TokenType::Parenthesis],
                found: TokenType::EndOfInput,
                span: Span::new(position, position),
            });
        }
        if self.index + 2 < self.tokens.len() {
            let position = self.current().span.end + 1;
            return Err(ParseError::Syntax {
                expected: vec![TokenType::EndOfInput],
                found: self.tokens[self.index + 1].kind.token_type(),
                span: Span::new(position, position),
            });
        }
        Ok(result)
    }

    fn current(&self) -> &Token {
        &self.tokens[self.index]
    }

    // Lookahead clamps to the final Eof instead of running off the end
    fn peek(&self) -> &Token {
        &self.tokens[(self.index + 1).min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> ParseResult<()> {
        self.index = (self.index + 1).min(self.tokens.len() - 1);
        self.check_invalid()
    }

    // Refuses to stand on or next to an Invalid token. Checking the
    // lookahead as well stops the parse before an Invalid token can become
    // part of a node.
    fn check_invalid(&self) -> ParseResult<()> {
        for token in [self.current(), self.peek()] {
            if token.kind == TokenKind::Invalid {
                return Err(ParseError::InvalidToken {
                    literal: token.literal.clone(),
                    span: token.span,
                });
            }
        }
        Ok(())
    }

    fn syntax_error(expected: Vec<TokenType>, token: &Token) -> ParseError {
        ParseError::Syntax {
            expected,
            found: token.kind.token_type(),
            span: token.span,
        }
    }

    // A '-' in operand position negates, unless an operator other than
    // another '-' follows it ("2*-5" negates, "2*-/5" does not).
    fn negates(&self) -> bool {
        match self.peek().kind {
            TokenKind::Operator(op) => op == Operator::Minus,
            _ => true,
        }
    }

    /// Parses a single operand: a number, a variable, a negation or a
    /// parenthesized group. Leaves the cursor on the operand's last token.
    fn parse_primary(&mut self) -> ParseResult<Expr> {
        match self.current().kind {
            TokenKind::Number(value) => Ok(Expr::Number(value)),
            TokenKind::Variable(name) => Ok(Expr::Variable(name)),
            TokenKind::Operator(Operator::Minus) if self.negates() => {
                self.advance()?;
                let operand = self.parse_primary()?;
                Ok(Expr::infix(Expr::Number(-1.0), Operator::Multiply, operand))
            }
            TokenKind::Parenthesis(Direction::Left) => {
                self.advance()?;
                self.paren_level += 1;
                let inner = self.parse_primary()?;
                let level = self.paren_level;
                self.parse_infix(inner, 0, level)
            }
            _ => Err(Self::syntax_error(
                vec![TokenType::Number, TokenType::Parenthesis, TokenType::Variable],
                self.current(),
            )),
        }
    }

    /// Climbs operators to the right of `lhs` while their precedence stays
    /// at or above `min_precedence`.
    ///
    /// `level` is the nesting depth this call parses for. A call whose
    /// group has been closed by a deeper recursive call (`level` above the
    /// live `paren_level`) hands the rest of the stream back to its caller.
    fn parse_infix(
        &mut self,
        mut lhs: Expr,
        min_precedence: u8,
        level: usize,
    ) -> ParseResult<Expr> {
        while self.climb_continues(min_precedence) {
            if level > 0 && self.peek().kind == TokenKind::Parenthesis(Direction::Right) {
                self.advance()?;
                self.paren_level = self.paren_level.saturating_sub(1);
                break;
            }
            if level > self.paren_level {
                break;
            }
            let op = match self.peek().kind {
                TokenKind::Operator(op) => op,
                _ => return Err(Self::syntax_error(vec![TokenType::Operator], self.peek())),
            };
            // Step onto the operator, then onto the first token of its
            // right-hand operand.
            self.advance()?;
            self.advance()?;
            let mut rhs = self.parse_primary()?;

            // Let anything binding tighter than `op` (or equally tight but
            // right-associative) take the operand first.
            while let TokenKind::Operator(next) = self.peek().kind {
                if level > self.paren_level {
                    break;
                }
                let climbs = next.precedence() > op.precedence()
                    || (next.precedence() == op.precedence()
                        && next.associativity() == Direction::Right);
                if !climbs {
                    break;
                }
                let raised = op.precedence() + u8::from(next.precedence() > op.precedence());
                rhs = self.parse_infix(rhs, raised, level)?;
            }
            lhs = Expr::infix(lhs, op, rhs);
        }
        Ok(lhs)
    }

    // The climb goes on while an operator of sufficient precedence follows,
    // and close parentheses are always looked at (they may end this group)
    fn climb_continues(&self, min_precedence: u8) -> bool {
        match self.peek().kind {
            TokenKind::Parenthesis(_) => true,
            TokenKind::Operator(op) => op.precedence() >= min_precedence,
            _ => false,
        }
    }
}

// Helper function to lex and parse a string directly (useful for tests and
// callers that do not care about the token stream)
pub fn parse_str(input: &str) -> ParseResult<Expr> {
    Parser::new(tokenize(input)).parse()
}
