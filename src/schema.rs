//! Schema data structures
//!
//! These types represent introspected table metadata and form the contract
//! between the schema readers (produce) and the code generator (consumes).
//! They are built once per run and never mutated afterwards.

/// A table column with its mapped target type.
///
/// `go_type` is the Go type chosen by the type mapper, not the native
/// database type. `name` is stored in its final emitted form: when field
/// exporting is enabled the readers capitalize the first character before
/// constructing the column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub go_type: String,
}

/// Which row-cursor type the generated scan functions take.
///
/// Selected once per run from the generate-interface option and stamped on
/// every table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowType {
    /// The driver's concrete cursor, `*sql.Rows`.
    Concrete,
    /// The generated `Rows` interface, for exercising scan code against a
    /// test double instead of a live database.
    Interface,
}

impl RowType {
    /// Go spelling of the cursor type in generated signatures.
    pub fn as_go(&self) -> &'static str {
        match self {
            RowType::Concrete => "*sql.Rows",
            RowType::Interface => "Rows",
        }
    }
}

/// Database table: name, columns in the backend's natural order, and the
/// run-wide row-cursor tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    pub row_type: RowType,
}

/// Tables in discovery order: the order the table-listing query returned
/// them, after filtering. Never re-sorted.
pub type Tables = Vec<Table>;

/// Capitalize only the first character, leaving the rest unchanged.
///
/// `user_id` becomes `User_id`, not `UserId`; emitted identifiers track the
/// source schema's spelling apart from the exported first letter.
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
