use crate::types::{Expr, Operator};
use std::collections::HashMap;
use thiserror::Error;

// --- Evaluation Error ---
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    // The expression refers to a variable the bindings do not contain
    #[error("Unbound variable: '{0}'")]
    UnboundVariable(char),
}

// Result type alias for convenience
pub type EvalResult<T = f64> = Result<T, EvalError>;

impl Expr {
    /// Evaluates the tree against the given variable bindings.
    ///
    /// Arithmetic follows IEEE semantics throughout: dividing by zero gives
    /// an infinity rather than an error, so the only way evaluation fails
    /// is a variable without a binding. Evaluation borrows the tree, which
    /// is what lets a plotting sweep sample one parsed expression hundreds
    /// of times with different values for `x`.
    pub fn eval(&self, vars: &HashMap<char, f64>) -> EvalResult {
        match self {
            Expr::Number(value) => Ok(*value),
            Expr::Variable(name) => vars
                .get(name)
                .copied()
                .ok_or(EvalError::UnboundVariable(*name)),
            Expr::Infix { lhs, op, rhs } => Ok(op.apply(lhs.eval(vars)?, rhs.eval(vars)?)),
        }
    }
}

impl Operator {
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Operator::Plus => lhs + rhs,
            Operator::Minus => lhs - rhs,
            Operator::Multiply => lhs * rhs,
            Operator::Divide => lhs / rhs,
            Operator::Power => lhs.powf(rhs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;

    // Helper: parse and evaluate with no variables bound
    fn assert_eval(input: &str, expected: f64) {
        let expression = parse_str(input)
            .unwrap_or_else(|e| panic!("Parsing failed for input '{}': {}", input, e));
        match expression.eval(&HashMap::new()) {
            Ok(value) => assert_eq!(value, expected, "Input: '{}'", input),
            Err(e) => panic!("Evaluation failed for input '{}': {}", input, e),
        }
    }

    // Helper: parse and evaluate with the given bindings
    fn assert_eval_with(input: &str, vars: &[(char, f64)], expected: f64) {
        let expression = parse_str(input)
            .unwrap_or_else(|e| panic!("Parsing failed for input '{}': {}", input, e));
        let vars: HashMap<char, f64> = vars.iter().copied().collect();
        match expression.eval(&vars) {
            Ok(value) => assert_eq!(value, expected, "Input: '{}'", input),
            Err(e) => panic!("Evaluation failed for input '{}': {}", input, e),
        }
    }

    #[test]
    fn test_precedence() {
        assert_eval("2+3*4", 14.0);
        assert_eval("2*3+4", 10.0);
        assert_eval("10-2*3", 4.0);
        assert_eval("2+3^2*4", 38.0);
    }

    #[test]
    fn test_associativity() {
        assert_eval("8-3-2", 3.0);
        assert_eval("16/4/2", 2.0);
        assert_eval("2^3^2", 512.0);
        assert_eval("(2^3)^2", 64.0);
    }

    #[test]
    fn test_grouping() {
        assert_eval("(2+3)*4", 20.0);
        assert_eval("2*(3+4)", 14.0);
        assert_eval("((2+3^2))*4", 44.0);
    }

    #[test]
    fn test_unary_minus() {
        assert_eval("-5", -5.0);
        assert_eval("--5", 5.0);
        assert_eval("2*-5", -10.0);
        assert_eval("2--5", 7.0);
        assert_eval("-(2+3)", -5.0);
        // The negation is the base of the power, not applied to its result
        assert_eval("-2^2", 4.0);
    }

    #[test]
    fn test_number_formats() {
        assert_eval("100", 100.0);
        assert_eval("0.25", 0.25);
        assert_eval("3.", 3.0);
    }

    #[test]
    fn test_division() {
        assert_eval("10/4", 2.5);
        // Division by zero is an infinity, not an error
        let value = parse_str("1/0").unwrap().eval(&HashMap::new()).unwrap();
        assert!(value.is_infinite() && value.is_sign_positive());
        let value = parse_str("-1/0").unwrap().eval(&HashMap::new()).unwrap();
        assert!(value.is_infinite() && value.is_sign_negative());
    }

    #[test]
    fn test_variables() {
        assert_eval_with("x+1", &[('x', 4.0)], 5.0);
        assert_eval_with("x*y+x", &[('x', 2.0), ('y', 3.0)], 8.0);
        assert_eval_with("x^2-x", &[('x', 3.0)], 6.0);
    }

    #[test]
    fn test_unbound_variables() {
        let expression = parse_str("x+1").unwrap();
        assert_eq!(
            expression.eval(&HashMap::new()),
            Err(EvalError::UnboundVariable('x'))
        );
        assert_eq!(
            EvalError::UnboundVariable('x').to_string(),
            "Unbound variable: 'x'"
        );
        // The leftmost unbound variable is the one reported
        let expression = parse_str("a+b").unwrap();
        assert_eq!(
            expression.eval(&HashMap::from([('b', 1.0)])),
            Err(EvalError::UnboundVariable('a'))
        );
    }

    #[test]
    fn test_repeated_evaluation_over_a_sweep() {
        // One parse, many samples, the way a plot is drawn
        let expression = parse_str("x*x+1").unwrap();
        let mut vars = HashMap::new();
        for step in -50..=50 {
            let x = f64::from(step) / 10.0;
            vars.insert('x', x);
            assert_eq!(expression.eval(&vars), Ok(x * x + 1.0), "x = {}", x);
        }
    }

    #[test]
    fn test_evaluation_is_shareable_across_threads() {
        let expression = std::sync::Arc::new(parse_str("x*x+1").unwrap());
        let handles: Vec<_> = (0..4)
            .map(|sample| {
                let expression = expression.clone();
                std::thread::spawn(move || {
                    let vars = HashMap::from([('x', f64::from(sample))]);
                    expression.eval(&vars)
                })
            })
            .collect();
        for (sample, handle) in handles.into_iter().enumerate() {
            let x = sample as f64;
            assert_eq!(handle.join().unwrap(), Ok(x * x + 1.0));
        }
    }
}
