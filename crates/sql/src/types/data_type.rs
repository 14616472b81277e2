//! SQL data types and the type families used to decide comparability

use serde::{Deserialize, Serialize};
use std::fmt;

/// SQL data types
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    // Boolean
    Bool,
    // Integer types
    I8,
    I16,
    I32,
    I64,
    I128,
    U8,
    U16,
    U32,
    U64,
    U128,
    // Float types
    F32,
    F64,
    // Decimal with precision and scale
    Decimal(Option<u32>, Option<u32>),
    // String types
    Str,
    Text,
    // Date/Time types
    Date,
    Time,
    Timestamp,
    Interval,
    // Special types
    Uuid,
    Bytea,
    // Collection types
    Array(Box<DataType>, Option<usize>), // Fixed-size array (e.g., INTEGER[3])
    List(Box<DataType>),                 // Variable-size list (e.g., INTEGER[])
    Map(Box<DataType>, Box<DataType>),   // Key-value pairs
    Struct(Vec<(String, DataType)>),     // Named fields like records
    Json,
    // Null handling
    Nullable(Box<DataType>),
    // Type of the NULL literal
    Null,
}

/// Groups of types whose values can be compared with each other directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeFamily {
    Boolean,
    Numeric,
    Character,
    Binary,
    Date,
    Time,
    Timestamp,
    Interval,
    Uuid,
    Json,
    Collection,
    Map,
    Struct,
    Null,
    /// Matches every type. Only appears in checker configuration.
    Any,
}

impl TypeFamily {
    /// Whether a value of type `ty` belongs to this family.
    pub fn contains(self, ty: &DataType) -> bool {
        match self {
            TypeFamily::Any => true,
            family => ty.family() == family,
        }
    }
}

impl fmt::Display for TypeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeFamily::Boolean => "BOOLEAN",
            TypeFamily::Numeric => "NUMERIC",
            TypeFamily::Character => "CHARACTER",
            TypeFamily::Binary => "BINARY",
            TypeFamily::Date => "DATE",
            TypeFamily::Time => "TIME",
            TypeFamily::Timestamp => "TIMESTAMP",
            TypeFamily::Interval => "INTERVAL",
            TypeFamily::Uuid => "UUID",
            TypeFamily::Json => "JSON",
            TypeFamily::Collection => "COLLECTION",
            TypeFamily::Map => "MAP",
            TypeFamily::Struct => "STRUCT",
            TypeFamily::Null => "NULL",
            TypeFamily::Any => "ANY",
        };
        f.write_str(name)
    }
}

impl DataType {
    pub fn base_type(&self) -> &DataType {
        match self {
            DataType::Nullable(inner) => inner.base_type(),
            _ => self,
        }
    }

    /// Whether values of this type may be NULL
    pub fn is_nullable(&self) -> bool {
        matches!(self, DataType::Nullable(_) | DataType::Null)
    }

    /// Nullable version of this type
    pub fn nullable(self) -> DataType {
        match self {
            DataType::Nullable(_) | DataType::Null => self,
            other => DataType::Nullable(Box::new(other)),
        }
    }

    /// Family of the underlying (non-nullable) type
    pub fn family(&self) -> TypeFamily {
        match self {
            DataType::Nullable(inner) => inner.family(),
            DataType::Bool => TypeFamily::Boolean,
            DataType::I8
            | DataType::I16
            | DataType::I32
            | DataType::I64
            | DataType::I128
            | DataType::U8
            | DataType::U16
            | DataType::U32
            | DataType::U64
            | DataType::U128
            | DataType::F32
            | DataType::F64
            | DataType::Decimal(_, _) => TypeFamily::Numeric,
            DataType::Str | DataType::Text => TypeFamily::Character,
            DataType::Bytea => TypeFamily::Binary,
            DataType::Date => TypeFamily::Date,
            DataType::Time => TypeFamily::Time,
            DataType::Timestamp => TypeFamily::Timestamp,
            DataType::Interval => TypeFamily::Interval,
            DataType::Uuid => TypeFamily::Uuid,
            DataType::Json => TypeFamily::Json,
            DataType::Array(_, _) | DataType::List(_) => TypeFamily::Collection,
            DataType::Map(_, _) => TypeFamily::Map,
            DataType::Struct(_) => TypeFamily::Struct,
            DataType::Null => TypeFamily::Null,
        }
    }

    /// Whether values of the two types can be compared directly.
    ///
    /// Symmetric. Nullability is ignored. The NULL type compares with
    /// everything, so the relation is only transitive over non-NULL types.
    pub fn is_comparable_with(&self, other: &DataType) -> bool {
        let (left, right) = (self.base_type(), other.base_type());
        match (left, right) {
            (DataType::Null, _) | (_, DataType::Null) => true,
            (
                DataType::Array(l, _) | DataType::List(l),
                DataType::Array(r, _) | DataType::List(r),
            ) => l.is_comparable_with(r),
            (DataType::Map(lk, lv), DataType::Map(rk, rv)) => {
                lk.is_comparable_with(rk) && lv.is_comparable_with(rv)
            }
            (DataType::Struct(l), DataType::Struct(r)) => {
                l.len() == r.len()
                    && l.iter()
                        .zip(r)
                        .all(|((_, lt), (_, rt))| lt.is_comparable_with(rt))
            }
            _ => left.family() == right.family(),
        }
    }

    /// Check if this type is numeric (integer, float, or decimal)
    pub fn is_numeric(&self) -> bool {
        self.family() == TypeFamily::Numeric
    }}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Bool => write!(f, "BOOLEAN"),
            DataType::I8 => write!(f, "TINYINT"),
            DataType::I16 => write!(f, "SMALLINT"),
            DataType::I32 => write!(f, "INT"),
            DataType::I64 => write!(f, "BIGINT"),
            DataType::I128 => write!(f, "HUGEINT"),
            DataType::U8 => write!(f, "TINYINT UNSIGNED"),
            DataType::U16 => write!(f, "SMALLINT UNSIGNED"),
            DataType::U32 => write!(f, "INT UNSIGNED"),
            DataType::U64 => write!(f, "BIGINT UNSIGNED"),
            DataType::U128 => write!(f, "HUGEINT UNSIGNED"),
            DataType::F32 => write!(f, "REAL"),
            DataType::F64 => write!(f, "DOUBLE PRECISION"),
            DataType::Decimal(p, s) => match (p, s) {
                (Some(p), Some(s)) => write!(f, "DECIMAL({}, {})", p, s),
                (Some(p), None) => write!(f, "DECIMAL({})", p),
                _ => write!(f, "DECIMAL"),
            },
            DataType::Str | DataType::Text => write!(f, "VARCHAR"),
            DataType::Date => write!(f, "DATE"),
            DataType::Time => write!(f, "TIME"),
            DataType::Timestamp => write!(f, "TIMESTAMP"),
            DataType::Interval => write!(f, "INTERVAL"),
            DataType::Uuid => write!(f, "UUID"),
            DataType::Bytea => write!(f, "BYTEA"),
            DataType::Array(inner, Some(size)) => write!(f, "{}[{}]", inner, size),
            DataType::Array(inner, None) => write!(f, "{}[]", inner),
            DataType::List(inner) => write!(f, "{}[]", inner),
            DataType::Map(key, value) => write!(f, "MAP({}, {})", key, value),
            DataType::Struct(fields) => {
                let field_strs: Vec<String> = fields
                    .iter()
                    .map(|(name, dtype)| format!("{} {}", name, dtype))
                    .collect();
                write!(f, "STRUCT({})", field_strs.join(", "))
            }
            DataType::Json => write!(f, "JSON"),
            DataType::Nullable(inner) => write!(f, "{} NULL", inner),
            DataType::Null => write!(f, "NULL"),
        }
    }
}
