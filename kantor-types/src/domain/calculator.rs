//! Four-function arithmetic dispatcher.

use std::fmt;

use crate::error::DomainError;

/// Arithmetic operation, written on the wire as its symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "*",
            Operation::Divide => "/",
        }
    }

    /// Applies the operation. Division by zero is an error, not infinity.
    pub fn apply(&self, a: f64, b: f64) -> Result<f64, DomainError> {
        match self {
            Operation::Add => Ok(a + b),
            Operation::Subtract => Ok(a - b),
            Operation::Multiply => Ok(a * b),
            Operation::Divide if b == 0.0 => Err(DomainError::DivisionByZero),
            Operation::Divide => Ok(a / b),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl std::str::FromStr for Operation {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Operation::Add),
            "-" => Ok(Operation::Subtract),
            "*" => Ok(Operation::Multiply),
            "/" => Ok(Operation::Divide),
            _ => Err(DomainError::InvalidOperation(s.to_string())),
        }
    }
}

/// Parses `op` and applies it to `a` and `b`.
pub fn calculate(a: f64, b: f64, op: &str) -> Result<f64, DomainError> {
    op.parse::<Operation>()?.apply(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addition() {
        assert_eq!(calculate(5.0, 3.0, "+").unwrap(), 8.0);
        assert!((calculate(5.5, 3.2, "+").unwrap() - 8.7).abs() < 1e-4);
    }

    #[test]
    fn test_subtraction() {
        assert_eq!(calculate(10.0, 4.0, "-").unwrap(), 6.0);
        assert_eq!(calculate(3.0, 7.0, "-").unwrap(), -4.0);
    }

    #[test]
    fn test_multiplication() {
        assert_eq!(calculate(6.0, 7.0, "*").unwrap(), 42.0);
        assert_eq!(calculate(5.0, 0.0, "*").unwrap(), 0.0);
    }

    #[test]
    fn test_division() {
        assert_eq!(calculate(15.0, 3.0, "/").unwrap(), 5.0);
        assert_eq!(calculate(10.0, 4.0, "/").unwrap(), 2.5);
    }

    #[test]
    fn test_division_by_zero() {
        assert!(matches!(
            calculate(10.0, 0.0, "/"),
            Err(DomainError::DivisionByZero)
        ));
        assert!(matches!(
            calculate(10.0, -0.0, "/"),
            Err(DomainError::DivisionByZero)
        ));
    }

    #[test]
    fn test_invalid_operation() {
        for op in ["%", "^", "", "plus", "//"] {
            assert!(matches!(
                calculate(5.0, 3.0, op),
                Err(DomainError::InvalidOperation(ref s)) if s == op
            ));
        }
    }

    #[test]
    fn test_operation_symbol_roundtrip() {
        for op in [
            Operation::Add,
            Operation::Subtract,
            Operation::Multiply,
            Operation::Divide,
        ] {
            assert_eq!(op.symbol().parse::<Operation>().unwrap(), op);
        }
    }
}
