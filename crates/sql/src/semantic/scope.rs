//! Validation scopes: where operand types come from and which
//! aggregate-context rules apply

use crate::ast::{Call, Span};
use crate::error::{Error, Result};
use crate::types::data_type::DataType;
use crate::types::schema::Table;

/// Clause of a query the expression being validated appears in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Clause {
    #[default]
    Select,
    Where,
    GroupBy,
    Having,
    OrderBy,
}

/// Context the validator resolves operand types against.
///
/// A scope is owned by the compilation of one statement and is never shared
/// across threads.
pub trait ValidatorScope {
    /// Type of a column reference, optionally qualified with a table name
    fn resolve_column(&self, table: Option<&str>, column: &str, span: Span) -> Result<DataType>;

    /// Aggregate-context rules of this scope. Called only after the
    /// aggregate call itself passed operand checking.
    fn validate_aggregate(&self, call: &Call) -> Result<()> {
        let _ = call;
        Ok(())
    }
}

/// Information about a table in the current scope
#[derive(Debug, Clone)]
pub struct TableInfo {
    /// The actual table name in the schema
    pub name: String,
    /// Optional alias for this table
    pub alias: Option<String>,
    /// Schema information
    pub schema: Table,
}

/// Scope over the tables of a FROM clause.
#[derive(Debug, Clone, Default)]
pub struct SchemaScope {
    tables: Vec<TableInfo>,
    clause: Clause,
}

impl SchemaScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table to the scope
    pub fn add_table(&mut self, schema: Table, alias: Option<String>) -> Result<()> {
        let visible = alias.as_deref().unwrap_or(&schema.name);
        if self
            .tables
            .iter()
            .any(|t| t.alias.as_deref().unwrap_or(&t.name) == visible)
        {
            return Err(Error::InvalidValue(format!(
                "Duplicate table name or alias in scope: {}",
                visible
            )));
        }

        self.tables.push(TableInfo {
            name: schema.name.clone(),
            alias,
            schema,
        });
        Ok(())
    }

    /// Builder form of [`SchemaScope::add_table`]
    pub fn with_table(mut self, schema: Table, alias: Option<String>) -> Result<Self> {
        self.add_table(schema, alias)?;
        Ok(self)
    }

    /// The same tables, seen from another clause
    pub fn in_clause(&self, clause: Clause) -> Self {
        Self {
            tables: self.tables.clone(),
            clause,
        }
    }

    pub fn clause(&self) -> Clause {
        self.clause
    }

    pub fn tables(&self) -> &[TableInfo] {
        &self.tables
    }
}

impl ValidatorScope for SchemaScope {
    fn resolve_column(
        &self,
        table_ref: Option<&str>,
        column: &str,
        span: Span,
    ) -> Result<DataType> {
        let not_found = || Error::ColumnNotFound {
            column: match table_ref {
                Some(t) => format!("{}.{}", t, column),
                None => column.to_string(),
            },
            span,
        };

        if let Some(table_ref) = table_ref {
            if let Some(table) = self
                .tables
                .iter()
                .find(|t| t.name == table_ref || t.alias.as_deref() == Some(table_ref))
            {
                return table
                    .schema
                    .column(column)
                    .map(|c| c.resolved_type())
                    .ok_or_else(not_found);
            }

            // "details.name" where details is a STRUCT column
            for table in &self.tables {
                if let Some(struct_column) = table.schema.column(table_ref)
                    && let DataType::Struct(fields) = struct_column.datatype.base_type()
                    && let Some((_, field_type)) = fields.iter().find(|(name, _)| name == column)
                {
                    // If the struct column is nullable, field access is also nullable
                    return Ok(if struct_column.nullable {
                        field_type.clone().nullable()
                    } else {
                        field_type.clone()
                    });
                }
            }

            return Err(not_found());
        }

        let mut found = None;
        for table in &self.tables {
            if let Some(c) = table.schema.column(column) {
                if found.is_some() {
                    return Err(Error::AmbiguousColumn {
                        column: column.to_string(),
                        span,
                    });
                }
                found = Some(c.resolved_type());
            }
        }
        found.ok_or_else(not_found)
    }

    fn validate_aggregate(&self, call: &Call) -> Result<()> {
        match self.clause {
            Clause::Where => Err(Error::AggregateIllegalInWhere {
                operator: call.name.to_uppercase(),
                span: call.span,
            }),
            Clause::GroupBy => Err(Error::AggregateIllegalInGroupBy {
                operator: call.name.to_uppercase(),
                span: call.span,
            }),
            Clause::Select | Clause::Having | Clause::OrderBy => Ok(()),
        }
    }
}
