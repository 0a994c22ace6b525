//! # rowgen
//!
//! Generate typed Go row-scanning code from database schemas
//!
//! This crate provides a CLI tool and library for introspecting a database's
//! tables and emitting one Go record type per table together with functions
//! that scan query results into it.

pub mod codegen;
pub mod config;
pub mod error;
pub mod introspect;
pub mod schema;
pub mod typemap;

pub mod prelude {
    pub use crate::codegen::{CodeGenerator, GenOptions, GoGenerator};
    pub use crate::config::DbConfig;
    pub use crate::error::RowgenError;
    pub use crate::introspect::{SchemaReader, TableFilter};
    pub use crate::schema::{Column, RowType, Table, Tables};
}

#[cfg(feature = "postgres")]
pub use introspect::PostgresSchemaReader;

#[cfg(feature = "mysql")]
pub use introspect::MysqlSchemaReader;
