//! SQL expressions, call sites and literals

use super::span::Span;
use crate::types::data_type::DataType;
use rust_decimal::Decimal;

/// SQL expressions, e.g. `CAST(a AS INT) = 7`. Can be nested.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    /// A literal value.
    Literal(Literal),
    /// Adjacent literal fragments the grammar joins into one value, e.g.
    /// `'abc' 'def'`.
    LiteralChain(Vec<Literal>),
    /// An explicit `CAST(expr AS target)`.
    Cast {
        expr: Box<Expression>,
        target: DataType,
    },
    /// A column reference, optionally qualified with a table name.
    Column(Option<String>, String),
    /// An operator, function or aggregate call.
    Call(Call),
}

/// Set quantifier on an aggregate call: `COUNT(DISTINCT x)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quantifier {
    Distinct,
    All,
}

/// A call site. Infix and prefix operators are calls named by their symbol.
#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    /// Operator or function name as written
    pub name: String,
    /// Operands in source order
    pub operands: Vec<Operand>,
    /// DISTINCT/ALL, if written
    pub quantifier: Option<Quantifier>,
    /// Span of the whole call
    pub span: Span,
}

impl Call {
    pub fn new(name: impl Into<String>, operands: Vec<Operand>, span: Span) -> Self {
        Self {
            name: name.into(),
            operands,
            quantifier: None,
            span,
        }
    }

    pub fn with_quantifier(mut self, quantifier: Quantifier) -> Self {
        self.quantifier = Some(quantifier);
        self
    }

    pub fn operand_count(&self) -> usize {
        self.operands.len()
    }
}

/// One argument of a call, with the source span diagnostics point at.
#[derive(Clone, Debug, PartialEq)]
pub struct Operand {
    pub expr: Expression,
    pub span: Span,
}

impl Operand {
    pub fn new(expr: impl Into<Expression>, span: Span) -> Self {
        Self {
            expr: expr.into(),
            span,
        }
    }
}

/// Expression literal values.
#[derive(Clone, Debug)]
pub enum Literal {
    Null,
    Boolean(bool),
    Integer(i128),
    Float(f64),
    Decimal(Decimal),
    String(String),
    Bytea(Vec<u8>),
    Date(chrono::NaiveDate),
    Time(chrono::NaiveTime),
    Timestamp(chrono::NaiveDateTime),
}

/// Equality by value, including Null and f64::NAN. SQL semantics for NULL
/// and NaN are not applied here.
impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Boolean(l), Self::Boolean(r)) => l == r,
            (Self::Integer(l), Self::Integer(r)) => l == r,
            (Self::Float(l), Self::Float(r)) => l.to_bits() == r.to_bits(),
            (Self::Decimal(l), Self::Decimal(r)) => l == r,
            (Self::String(l), Self::String(r)) => l == r,
            (Self::Bytea(l), Self::Bytea(r)) => l == r,
            (Self::Date(l), Self::Date(r)) => l == r,
            (Self::Time(l), Self::Time(r)) => l == r,
            (Self::Timestamp(l), Self::Timestamp(r)) => l == r,
            (_, _) => false,
        }
    }
}

impl Literal {
    /// Type of the literal as written
    pub fn data_type(&self) -> DataType {
        match self {
            Literal::Null => DataType::Null,
            Literal::Boolean(_) => DataType::Bool,
            Literal::Integer(_) => DataType::I64,
            Literal::Float(_) => DataType::F64,
            Literal::Decimal(d) => DataType::Decimal(None, Some(d.scale())),
            Literal::String(_) => DataType::Text,
            Literal::Bytea(_) => DataType::Bytea,
            Literal::Date(_) => DataType::Date,
            Literal::Time(_) => DataType::Time,
            Literal::Timestamp(_) => DataType::Timestamp,
        }
    }
}

/// How an operand node looks to checkers that require constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LiteralClass {
    /// `NULL`, or `CAST(NULL AS t)` with exactly one cast
    NullLiteral,
    /// Any other single literal
    Literal,
    /// Adjacent literal fragments
    LiteralChain,
    /// Anything else, including `CAST(CAST(NULL AS a) AS b)`
    NonLiteral,
}

impl From<Literal> for Expression {
    fn from(literal: Literal) -> Self {
        Expression::Literal(literal)
    }
}

impl From<Call> for Expression {
    fn from(call: Call) -> Self {
        Expression::Call(call)
    }
}

impl Expression {
    /// Whether this node is the NULL literal.
    ///
    /// With `allow_cast`, a NULL wrapped in exactly one CAST also counts.
    /// Two nested casts never count.
    pub fn is_null_literal(&self, allow_cast: bool) -> bool {
        match self {
            Expression::Literal(Literal::Null) => true,
            Expression::Cast { expr, .. } if allow_cast => {
                matches!(**expr, Expression::Literal(Literal::Null))
            }
            _ => false,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Expression::Literal(_))
    }

    pub fn is_literal_chain(&self) -> bool {
        matches!(self, Expression::LiteralChain(_))
    }

    /// Classifies the node into exactly one [`LiteralClass`]
    pub fn literal_class(&self) -> LiteralClass {
        if self.is_null_literal(true) {
            LiteralClass::NullLiteral
        } else if self.is_literal() {
            LiteralClass::Literal
        } else if self.is_literal_chain() {
            LiteralClass::LiteralChain
        } else {
            LiteralClass::NonLiteral
        }
    }

    /// Returns the call if this node is one
    pub fn as_call(&self) -> Option<&Call> {
        match self {
            Expression::Call(call) => Some(call),
            _ => None,
        }
    }

    /// Walks the tree depth-first and returns the first node matching the
    /// predicate.
    pub fn find(&self, predicate: &impl Fn(&Expression) -> bool) -> Option<&Expression> {
        if predicate(self) {
            return Some(self);
        }

        match self {
            Self::Cast { expr, .. } => expr.find(predicate),
            Self::Call(call) => call.operands.iter().find_map(|op| op.expr.find(predicate)),
            Self::Literal(_) | Self::LiteralChain(_) | Self::Column(_, _) => None,
        }
    }
}
