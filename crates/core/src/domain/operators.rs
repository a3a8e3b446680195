use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Binary arithmetic operators available to the solver
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
}

impl Operator {
    /// Canonical iteration order used by the search
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// Returns operator name
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Add => "add",
            Operator::Subtract => "subtract",
            Operator::Multiply => "multiply",
            Operator::Divide => "divide",
        }
    }

    /// Returns the infix symbol used when rendering expressions
    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    /// Checks if swapping the operands leaves the result unchanged
    pub fn is_commutative(&self) -> bool {
        matches!(self, Operator::Add | Operator::Multiply)
    }

    /// Parses an operator from a single symbol
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Operator::Add),
            '-' | '−' => Some(Operator::Subtract),
            '*' | 'x' | '×' => Some(Operator::Multiply),
            '/' | '÷' => Some(Operator::Divide),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Operator {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(op) = Operator::from_symbol(c) {
                return Ok(op);
            }
        }

        match trimmed.to_lowercase().as_str() {
            "add" | "plus" => Ok(Operator::Add),
            "subtract" | "sub" | "minus" => Ok(Operator::Subtract),
            "multiply" | "mul" | "times" => Ok(Operator::Multiply),
            "divide" | "div" => Ok(Operator::Divide),
            _ => Err(crate::Error::InvalidInput(format!(
                "Unknown operator: '{}'. Valid options: + - * /",
                s
            ))),
        }
    }
}
