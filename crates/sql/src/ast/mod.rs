//! Expression tree handed to the validator by the parser
//!
//! Only the shapes the type-checking layer inspects are modelled here: call
//! sites with per-operand source spans, literals (including chains of
//! adjacent fragments), casts and column references.

pub mod expressions;
pub mod span;

pub use expressions::{Call, Expression, Literal, LiteralClass, Operand, Quantifier};
pub use span::{Position, Span};
