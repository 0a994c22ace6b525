//! Go code generator
//!
//! Emits one record struct, a single-row scan function, and a slice-scan
//! function per table, preceded by a file header and, optionally, the
//! `Rows`/`DB` abstraction pair. No attempt is made to validate that the
//! produced text is well-formed Go; identifiers flow through as stored.

use std::io::Write;

use tracing::{debug, info};

use crate::codegen::{CodeGenerator, GenOptions};
use crate::error::RowgenError;
use crate::schema::{upper_first, Table};

/// Go code generator.
pub struct GoGenerator;

impl CodeGenerator for GoGenerator {
    fn generate(
        &self,
        tables: &[Table],
        opts: &GenOptions,
        out: &mut dyn Write,
    ) -> Result<(), RowgenError> {
        info!(
            package = ?opts.package,
            tables = tables.len(),
            interface = opts.generate_interface,
            "Generating Go code"
        );

        render_header(out, opts)?;
        if opts.generate_interface {
            render_interfaces(out)?;
        }
        for table in tables {
            debug!(table = ?table.name, "Rendering table");
            render_table(out, table, opts)?;
        }

        Ok(())
    }
}

/// File header: generation disclaimer, package declaration, imports.
///
/// The import list depends only on the interface option: scan signatures
/// either name the concrete `*sql.Rows` cursor or the generated `Rows`
/// interface. `time` is always imported for timestamp-typed fields.
fn render_header(out: &mut dyn Write, opts: &GenOptions) -> Result<(), RowgenError> {
    writeln!(out, "// Code generated by rowgen. DO NOT EDIT.")?;
    writeln!(out)?;
    writeln!(out, "package {}", opts.package)?;
    writeln!(out)?;
    writeln!(out, "import (")?;
    if !opts.generate_interface {
        writeln!(out, "\t\"database/sql\"")?;
    }
    writeln!(out, "\t\"time\"")?;
    writeln!(out, ")")?;
    writeln!(out)?;
    Ok(())
}

/// The testability abstraction: the subset of a driver's cursor and handle
/// the generated code touches.
fn render_interfaces(out: &mut dyn Write) -> Result<(), RowgenError> {
    writeln!(out, "// Rows is a query result cursor.")?;
    writeln!(out, "type Rows interface {{")?;
    writeln!(out, "\tClose() error")?;
    writeln!(out, "\tColumns() ([]string, error)")?;
    writeln!(out, "\tErr() error")?;
    writeln!(out, "\tNext() bool")?;
    writeln!(out, "\tScan(dest ...interface{{}}) error")?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "// DB is a database handle that can run queries.")?;
    writeln!(out, "type DB interface {{")?;
    writeln!(out, "\tClose() error")?;
    writeln!(out, "\tQuery(query string, args ...interface{{}}) (Rows, error)")?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    Ok(())
}

/// Record struct, single-row scan, slice type, and slice scan for one table.
fn render_table(out: &mut dyn Write, table: &Table, opts: &GenOptions) -> Result<(), RowgenError> {
    let type_prefix = if opts.export_fields {
        upper_first(&table.name)
    } else {
        table.name.clone()
    };
    let rows_type = table.row_type.as_go();

    writeln!(
        out,
        "// {}Row represents one row from table {}.",
        type_prefix, table.name
    )?;
    writeln!(out, "type {}Row struct {{", type_prefix)?;
    for col in &table.columns {
        writeln!(out, "\t{} {}", col.name, col.go_type)?;
    }
    writeln!(out, "}}")?;
    writeln!(out)?;

    let scan_dests = table
        .columns
        .iter()
        .map(|col| format!("&r.{}", col.name))
        .collect::<Vec<_>>()
        .join(", ");

    writeln!(
        out,
        "// scan{}Row scans and returns one {}Row.",
        type_prefix, type_prefix
    )?;
    writeln!(
        out,
        "func scan{}Row(rows {}) (*{}Row, error) {{",
        type_prefix, rows_type, type_prefix
    )?;
    writeln!(out, "\tr := &{}Row{{}}", type_prefix)?;
    writeln!(out, "\tif err := rows.Scan({}); err != nil {{", scan_dests)?;
    writeln!(out, "\t\treturn nil, err")?;
    writeln!(out, "\t}}")?;
    writeln!(out, "\treturn r, nil")?;
    writeln!(out, "}}")?;
    writeln!(out)?;

    writeln!(
        out,
        "// {}Rows is an array of rows from table {}.",
        type_prefix, table.name
    )?;
    writeln!(out, "type {}Rows []*{}Row", type_prefix, type_prefix)?;
    writeln!(out)?;

    writeln!(
        out,
        "// scan{}Rows scans all rows and returns an array.",
        type_prefix
    )?;
    writeln!(
        out,
        "func scan{}Rows(rows {}) ({}Rows, error) {{",
        type_prefix, rows_type, type_prefix
    )?;
    writeln!(out, "\trs := make({}Rows, 0)", type_prefix)?;
    writeln!(out, "\tfor rows.Next() {{")?;
    writeln!(out, "\t\trow, err := scan{}Row(rows)", type_prefix)?;
    writeln!(out, "\t\tif err != nil {{")?;
    writeln!(out, "\t\t\treturn nil, err")?;
    writeln!(out, "\t\t}}")?;
    writeln!(out, "\t\trs = append(rs, row)")?;
    writeln!(out, "\t}}")?;
    writeln!(out, "\treturn rs, nil")?;
    writeln!(out, "}}")?;
    writeln!(out)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Column, RowType};

    fn users_table(row_type: RowType, exported: bool) -> Table {
        let (id, name) = if exported {
            ("Id", "Name")
        } else {
            ("id", "name")
        };
        Table {
            name: "users".to_string(),
            columns: vec![
                Column {
                    name: id.to_string(),
                    go_type: "int".to_string(),
                },
                Column {
                    name: name.to_string(),
                    go_type: "string".to_string(),
                },
            ],
            row_type,
        }
    }

    fn render(tables: &[Table], opts: &GenOptions) -> String {
        let mut buf = Vec::new();
        GoGenerator.generate(tables, opts, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_users_scenario() {
        let tables = vec![users_table(RowType::Concrete, true)];
        let opts = GenOptions::new("models");
        let code = render(&tables, &opts);

        assert!(code.contains("// Code generated by rowgen. DO NOT EDIT."));
        assert!(code.contains("package models"));
        assert!(code.contains("\"database/sql\""));
        assert!(code.contains("\"time\""));
        assert!(code.contains("type UsersRow struct {"));
        assert!(code.contains("\tId int\n"));
        assert!(code.contains("\tName string\n"));
        assert!(code.contains("func scanUsersRow(rows *sql.Rows) (*UsersRow, error) {"));
        assert!(code.contains("rows.Scan(&r.Id, &r.Name)"));
        assert!(code.contains("type UsersRows []*UsersRow"));
        assert!(code.contains("func scanUsersRows(rows *sql.Rows) (UsersRows, error) {"));
    }

    #[test]
    fn test_interface_mode() {
        let tables = vec![users_table(RowType::Interface, true)];
        let opts = GenOptions::new("models").with_interface(true);
        let code = render(&tables, &opts);

        assert!(!code.contains("database/sql"));
        assert!(code.contains("\"time\""));
        assert!(code.contains("type Rows interface {"));
        assert!(code.contains("\tScan(dest ...interface{}) error"));
        assert!(code.contains("type DB interface {"));
        assert!(code.contains("Query(query string, args ...interface{}) (Rows, error)"));
        assert!(code.contains("func scanUsersRow(rows Rows) (*UsersRow, error) {"));
    }

    #[test]
    fn test_unexported_names_verbatim() {
        let tables = vec![users_table(RowType::Concrete, false)];
        let opts = GenOptions::new("models").with_export_fields(false);
        let code = render(&tables, &opts);

        assert!(code.contains("type usersRow struct {"));
        assert!(code.contains("\tid int\n"));
        assert!(code.contains("\tname string\n"));
        assert!(code.contains("func scanusersRow(rows *sql.Rows) (*usersRow, error) {"));
    }

    #[test]
    fn test_tables_rendered_in_input_order() {
        let mut orders = users_table(RowType::Concrete, true);
        orders.name = "orders".to_string();
        let tables = vec![users_table(RowType::Concrete, true), orders];
        let opts = GenOptions::new("models");
        let code = render(&tables, &opts);

        let users_at = code.find("type UsersRow struct").unwrap();
        let orders_at = code.find("type OrdersRow struct").unwrap();
        assert!(users_at < orders_at);
        assert!(!code.contains("type LogsRow"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let tables = vec![users_table(RowType::Concrete, true)];
        let opts = GenOptions::new("models");
        assert_eq!(render(&tables, &opts), render(&tables, &opts));
    }

    #[test]
    fn test_empty_column_list_still_renders() {
        let table = Table {
            name: "empty".to_string(),
            columns: vec![],
            row_type: RowType::Concrete,
        };
        let opts = GenOptions::new("models");
        let code = render(&[table], &opts);

        assert!(code.contains("type EmptyRow struct {"));
        assert!(code.contains("rows.Scan()"));
    }
}
