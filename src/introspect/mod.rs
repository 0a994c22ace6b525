//! Database introspection
//!
//! This module defines the reader contract for extracting table and column
//! metadata from a database. Each supported backend has its own feature-gated
//! submodule with one concrete reader; the binary picks one by driver name at
//! startup.

use std::collections::HashSet;

use crate::error::RowgenError;
use crate::schema::Tables;

/// Allow-list of table names, parsed from a comma-separated string.
///
/// An absent or empty filter admits every table. Filtering is a membership
/// test only; it never changes discovery order.
#[derive(Debug, Default, Clone)]
pub struct TableFilter {
    names: Option<HashSet<String>>,
}

impl TableFilter {
    /// Parse the `--tables` argument. Names are split on commas and matched
    /// verbatim, no trimming or case folding.
    pub fn parse(arg: Option<&str>) -> Self {
        let names = match arg {
            Some(s) if !s.is_empty() => {
                Some(s.split(',').map(str::to_string).collect::<HashSet<_>>())
            }
            _ => None,
        };
        Self { names }
    }

    /// Check if a table should be included.
    pub fn should_include(&self, table_name: &str) -> bool {
        match &self.names {
            Some(names) => names.contains(table_name),
            None => true,
        }
    }
}

/// Trait for backend-specific schema readers.
///
/// One call opens one connection, reads everything, and releases the
/// connection before returning, on the error path included. The first error
/// from any step aborts the call; partial results are discarded.
pub trait SchemaReader {
    /// Read the ordered set of tables (with typed columns) for `database`,
    /// optionally restricted to the comma-separated names in `tables`.
    fn read_tables_schema(
        &mut self,
        database: &str,
        tables: Option<&str>,
    ) -> Result<Tables, RowgenError>;
}

// Feature-gated backend implementations
#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::PostgresSchemaReader;

#[cfg(feature = "mysql")]
mod mysql;

#[cfg(feature = "mysql")]
pub use mysql::MysqlSchemaReader;
