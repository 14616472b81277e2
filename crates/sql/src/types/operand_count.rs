//! How many operands an operator accepts

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operand count accepted by an operator or checker.
///
/// Immutable once built. A non-zero floor with no ceiling is expressed as
/// `Range { min, max: None }`; `Variadic` accepts any count including zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperandCountRange {
    Exact(usize),
    Range { min: usize, max: Option<usize> },
    Variadic,
}

impl OperandCountRange {
    pub const fn exact(n: usize) -> Self {
        OperandCountRange::Exact(n)
    }

    /// Inclusive `[min, max]` range.
    pub fn between(min: usize, max: usize) -> Result<Self> {
        if max < min {
            return Err(Error::InvalidOperandCountRange { min, max });
        }
        Ok(OperandCountRange::Range {
            min,
            max: Some(max),
        })
    }

    /// `min` or more operands
    pub const fn at_least(min: usize) -> Self {
        OperandCountRange::Range { min, max: None }
    }

    pub const fn variadic() -> Self {
        OperandCountRange::Variadic
    }

    /// Whether a call with `count` operands is within range
    pub fn is_valid_count(&self, count: usize) -> bool {
        match *self {
            OperandCountRange::Exact(n) => count == n,
            OperandCountRange::Range { min, max } => {
                count >= min && max.is_none_or(|max| count <= max)
            }
            OperandCountRange::Variadic => true,
        }
    }

    pub fn min(&self) -> usize {
        match *self {
            OperandCountRange::Exact(n) => n,
            OperandCountRange::Range { min, .. } => min,
            OperandCountRange::Variadic => 0,
        }
    }

    /// Upper bound, or `None` when unbounded
    pub fn max(&self) -> Option<usize> {
        match *self {
            OperandCountRange::Exact(n) => Some(n),
            OperandCountRange::Range { max, .. } => max,
            OperandCountRange::Variadic => None,
        }
    }

    pub fn is_variadic(&self) -> bool {
        self.max().is_none()
    }
}

impl fmt::Display for OperandCountRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            OperandCountRange::Exact(n) => write!(f, "{}", n),
            OperandCountRange::Range {
                min,
                max: Some(max),
            } if min == max => write!(f, "{}", min),
            OperandCountRange::Range {
                min,
                max: Some(max),
            } => write!(f, "{} to {}", min, max),
            OperandCountRange::Range { min, max: None } => write!(f, "at least {}", min),
            OperandCountRange::Variadic => write!(f, "any number of"),
        }
    }
}
