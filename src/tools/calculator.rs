//! Minimal arithmetic evaluator backing the `calculate` tool.
//!
//! Deliberately tiny: one binary operator, two operands. Operators are tried
//! in the fixed order `+`, `-`, `*`, `/`; the first one present splits the
//! expression at its first occurrence. `"1+2+3"` therefore fails (the right
//! operand `"2+3"` is not a number) rather than silently dropping the trailing
//! `+3`, and `"2+3*4"` splits on `+`. This is the documented contract of the
//! tool, not a general-purpose parser.

use serde_json::Value;

const OPERATORS: [char; 4] = ['+', '-', '*', '/'];

/// Why an expression could not be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// An operand was empty (e.g. `"5+"` or a leading `-`).
    #[error("missing operand")]
    MissingOperand,

    /// An operand was not a floating-point literal.
    #[error("'{0}' is not a valid number")]
    NotANumber(String),
}

/// Evaluate `expression` under the single-operator policy.
///
/// Only space characters are stripped. Division by zero yields infinity or
/// NaN.
pub fn evaluate(expression: &str) -> Result<f64, EvalError> {
    let compact: String = expression.chars().filter(|c| *c != ' ').collect();

    for op in OPERATORS {
        if let Some((lhs, rhs)) = compact.split_once(op) {
            let (a, b) = (parse_operand(lhs)?, parse_operand(rhs)?);
            return Ok(match op {
                '+' => a + b,
                '-' => a - b,
                '*' => a * b,
                _ => a / b,
            });
        }
    }

    parse_operand(&compact)
}

fn parse_operand(raw: &str) -> Result<f64, EvalError> {
    if raw.is_empty() {
        return Err(EvalError::MissingOperand);
    }
    raw.parse::<f64>()
        .map_err(|_| EvalError::NotANumber(raw.to_string()))
}

/// Render a result as JSON.
///
/// Integral values within the exactly-representable range become JSON
/// integers; non-finite values become `"Infinity"`, `"-Infinity"` or `"NaN"`.
pub fn number_to_json(n: f64) -> Value {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0; // 2^53

    if n.is_nan() {
        Value::String("NaN".to_string())
    } else if n.is_infinite() {
        let name = if n > 0.0 { "Infinity" } else { "-Infinity" };
        Value::String(name.to_string())
    } else if n.fract() == 0.0 && n.abs() <= MAX_EXACT {
        Value::from(n as i64)
    } else {
        Value::from(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_single_operations() {
        assert_eq!(evaluate("2+2"), Ok(4.0));
        assert_eq!(evaluate("10/2"), Ok(5.0));
        assert_eq!(evaluate("7-10"), Ok(-3.0));
        assert_eq!(evaluate("1.5*4"), Ok(6.0));
    }

    #[test]
    fn test_spaces_are_ignored() {
        assert_eq!(evaluate(" 3 *  4 "), Ok(12.0));
    }

    #[test]
    fn test_plain_number() {
        assert_eq!(evaluate("42"), Ok(42.0));
        assert_eq!(evaluate("0"), Ok(0.0));
    }

    #[test]
    fn test_operator_priority_splits_on_plus_first() {
        // 2 + "3*4" → right operand is not a number
        assert_eq!(
            evaluate("2+3*4"),
            Err(EvalError::NotANumber("3*4".to_string()))
        );
        // No '+', so '-' wins over '*'
        assert_eq!(
            evaluate("8*2-1"),
            Err(EvalError::NotANumber("8*2".to_string()))
        );
    }

    #[test]
    fn test_multi_operator_splits_at_first_occurrence() {
        assert_eq!(
            evaluate("1+2+3"),
            Err(EvalError::NotANumber("2+3".to_string()))
        );
    }

    #[test]
    fn test_negative_operand_after_plus() {
        assert_eq!(evaluate("2+-3"), Ok(-1.0));
    }

    #[test]
    fn test_leading_minus_is_missing_operand() {
        assert_eq!(evaluate("-5"), Err(EvalError::MissingOperand));
        assert_eq!(evaluate("5+"), Err(EvalError::MissingOperand));
        assert_eq!(evaluate(""), Err(EvalError::MissingOperand));
    }

    #[test]
    fn test_garbage_rejected() {
        let err = evaluate("bogus").unwrap_err();
        assert_eq!(err.to_string(), "'bogus' is not a valid number");
    }

    #[test]
    fn test_eval_error_is_std_error() {
        let err: Box<dyn std::error::Error + Send + Sync> = Box::new(EvalError::MissingOperand);
        assert_eq!(err.to_string(), "missing operand");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_division_by_zero_is_ieee() {
        assert!(evaluate("1/0").unwrap().is_infinite());
        assert!(evaluate("0/0").unwrap().is_nan());
    }

    #[test]
    fn test_number_to_json() {
        assert_eq!(number_to_json(4.0), serde_json::json!(4));
        assert_eq!(number_to_json(2.5), serde_json::json!(2.5));
        assert_eq!(number_to_json(-3.0), serde_json::json!(-3));
        assert_eq!(number_to_json(f64::INFINITY), serde_json::json!("Infinity"));
        assert_eq!(number_to_json(f64::NEG_INFINITY), serde_json::json!("-Infinity"));
        assert_eq!(number_to_json(f64::NAN), serde_json::json!("NaN"));
        assert_eq!(number_to_json(1e300), serde_json::json!(1e300));
    }

    proptest! {
        #[test]
        fn prop_two_operand_addition(a in 0u32..1_000_000, b in 0u32..1_000_000) {
            let expr = format!("{} + {}", a, b);
            prop_assert_eq!(evaluate(&expr), Ok(f64::from(a) + f64::from(b)));
        }

        #[test]
        fn prop_two_operand_multiplication(a in 0u32..10_000, b in 0u32..10_000) {
            let expr = format!("{}*{}", a, b);
            prop_assert_eq!(evaluate(&expr), Ok(f64::from(a) * f64::from(b)));
        }

        #[test]
        fn prop_never_panics(s in "\\PC{0,16}") {
            let _ = evaluate(&s);
        }
    }
}
