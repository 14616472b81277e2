//! Table and column schemas visible to validation scopes

use super::data_type::DataType;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A table schema as seen by the validator.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Table {
    /// The table name. Can't be empty.
    pub name: String,
    /// The table's columns, in declaration order.
    pub columns: Vec<Column>,
}

impl Table {
    /// Creates a new table schema.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidValue("Table name cannot be empty".into()));
        }

        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name == column.name) {
                return Err(Error::InvalidValue(format!(
                    "Duplicate column {} in table {}",
                    column.name, name
                )));
            }
        }

        Ok(Table { name, columns })
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// A table column.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Column {
    /// Column name. Can't be empty.
    pub name: String,
    /// Column datatype.
    pub datatype: DataType,
    /// Whether the column allows null values.
    pub nullable: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, datatype: DataType) -> Self {
        Self {
            name: name.into(),
            datatype,
            nullable: false,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Type of a reference to this column
    pub fn resolved_type(&self) -> DataType {
        if self.nullable {
            self.datatype.clone().nullable()
        } else {
            self.datatype.clone()
        }
    }
}
