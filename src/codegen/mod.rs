//! Code generation
//!
//! Turns the introspected table model into Go source text. Rendering is an
//! explicit string-building pass over the ordered model, so identical
//! options and tables always produce byte-identical output.

use std::io;

use crate::error::RowgenError;
use crate::schema::{RowType, Table};

mod golang;

pub use golang::GoGenerator;

/// Options controlling the emitted source.
#[derive(Debug, Clone)]
pub struct GenOptions {
    /// Package name for the emitted file's `package` declaration.
    pub package: String,
    /// Capitalize the first letter of emitted field and type names.
    pub export_fields: bool,
    /// Emit the `Rows`/`DB` interface pair and reference it instead of the
    /// concrete driver cursor, so generated code can run against a test
    /// double.
    pub generate_interface: bool,
}

impl GenOptions {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            export_fields: true,
            generate_interface: false,
        }
    }

    pub fn with_export_fields(mut self, export_fields: bool) -> Self {
        self.export_fields = export_fields;
        self
    }

    pub fn with_interface(mut self, generate_interface: bool) -> Self {
        self.generate_interface = generate_interface;
        self
    }

    /// The row-cursor tag tables built under these options should carry.
    pub fn row_type(&self) -> RowType {
        if self.generate_interface {
            RowType::Interface
        } else {
            RowType::Concrete
        }
    }
}

/// Trait for target-language code generators.
pub trait CodeGenerator {
    /// Render the given tables, in order, into `out`.
    fn generate(
        &self,
        tables: &[Table],
        opts: &GenOptions,
        out: &mut dyn io::Write,
    ) -> Result<(), RowgenError>;
}
