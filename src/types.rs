use std::fmt; // For custom display formatting

/// Binary operator of the expression grammar.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operator {
    Plus,
    Minus,
    Multiply,
    Divide,
    Power,
}

impl Operator {
    /// Binding strength used by the precedence climb. Higher binds tighter.
    pub const fn precedence(self) -> u8 {
        match self {
            Operator::Plus | Operator::Minus => 1,
            Operator::Multiply | Operator::Divide => 2,
            Operator::Power => 3,
        }
    }

    /// `Power` chains to the right, everything else to the left.
    pub const fn associativity(self) -> Direction {
        match self {
            Operator::Power => Direction::Right,
            _ => Direction::Left,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let glyph = match self {
            Operator::Plus => '+',
            Operator::Minus => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Power => '^',
        };
        write!(f, "{}", glyph)
    }
}

/// Which way something points. Doubles as the side of a parenthesis and as
/// operator associativity.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Parsed expression tree.
///
/// Evaluation never mutates it, so one parsed expression can be sampled at
/// many points or shared between threads.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable(char),
    Infix {
        lhs: Box<Expr>,
        op: Operator,
        rhs: Box<Expr>,
    },
}

impl Expr {
    pub fn infix(lhs: Expr, op: Operator, rhs: Expr) -> Self {
        Expr::Infix {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        }
    }

    /// Every variable occurrence, left to right. Duplicates are kept so the
    /// caller can tell how often a name is used.
    pub fn variables(&self) -> Vec<char> {
        let mut names = Vec::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables(&self, names: &mut Vec<char>) {
        match self {
            Expr::Number(_) => {}
            Expr::Variable(name) => names.push(*name),
            Expr::Infix { lhs, rhs, .. } => {
                lhs.collect_variables(names);
                rhs.collect_variables(names);
            }
        }
    }
}

// Fully parenthesized, so the printed form never depends on precedence
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(value) => write!(f, "{}", value),
            Expr::Variable(name) => write!(f, "{}", name),
            Expr::Infix { lhs, op, rhs } => write!(f, "({} {} {})", lhs, op, rhs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_table() {
        assert!(Operator::Power.precedence() > Operator::Multiply.precedence());
        assert!(Operator::Multiply.precedence() > Operator::Plus.precedence());
        assert_eq!(Operator::Plus.precedence(), Operator::Minus.precedence());
        assert_eq!(Operator::Multiply.precedence(), Operator::Divide.precedence());
        assert_eq!(Operator::Power.associativity(), Direction::Right);
        assert_eq!(Operator::Plus.associativity(), Direction::Left);
    }

    #[test]
    fn test_variables_in_order_with_duplicates() {
        let expression = Expr::infix(
            Expr::Variable('x'),
            Operator::Plus,
            Expr::infix(Expr::Variable('x'), Operator::Multiply, Expr::Variable('y')),
        );
        assert_eq!(expression.variables(), vec!['x', 'x', 'y']);
        assert_eq!(Expr::Number(1.0).variables(), Vec::<char>::new());
    }

    #[test]
    fn test_display_is_fully_parenthesized() {
        let expression = Expr::infix(
            Expr::Number(2.0),
            Operator::Plus,
            Expr::infix(Expr::Number(3.0), Operator::Multiply, Expr::Number(4.0)),
        );
        assert_eq!(expression.to_string(), "(2 + (3 * 4))");
        assert_eq!(Expr::Number(2.5).to_string(), "2.5");
        assert_eq!(Expr::Variable('x').to_string(), "x");

        let negated = Expr::infix(Expr::Number(-1.0), Operator::Multiply, Expr::Number(5.0));
        assert_eq!(negated.to_string(), "(-1 * 5)");
    }
}
