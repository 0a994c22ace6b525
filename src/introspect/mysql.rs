use mysql::prelude::Queryable;
use mysql::{from_row_opt, Conn, Opts, Row};
use tracing::{debug, info, trace};

use super::{SchemaReader, TableFilter};
use crate::error::RowgenError;
use crate::schema::{upper_first, Column, RowType, Table, Tables};
use crate::typemap;

/// MySQL schema reader.
///
/// Lists tables with `SHOW TABLES` against the connection's active database
/// and applies the table filter as an in-process membership test, then reads
/// columns with `DESCRIBE` per table.
pub struct MysqlSchemaReader {
    conn: String,
    export_fields: bool,
    row_type: RowType,
}

impl MysqlSchemaReader {
    pub fn new(conn: String, export_fields: bool, row_type: RowType) -> Self {
        Self {
            conn,
            export_fields,
            row_type,
        }
    }
}

impl SchemaReader for MysqlSchemaReader {
    fn read_tables_schema(
        &mut self,
        database: &str,
        tables: Option<&str>,
    ) -> Result<Tables, RowgenError> {
        // SHOW TABLES lists the connection's active database; the database
        // name selects nothing here beyond what the connection URL already
        // did.
        info!(database = ?database, "Reading schema from MySQL");

        let opts = Opts::from_url(&self.conn)
            .map_err(|e| RowgenError::Connection(e.to_string()))?;
        let mut conn = Conn::new(opts).map_err(|e| RowgenError::Connection(e.to_string()))?;

        let filter = TableFilter::parse(tables);

        let qry = "SHOW TABLES";
        let rows: Vec<Row> = conn.query(qry).map_err(|e| RowgenError::Query {
            query: qry.to_string(),
            message: e.to_string(),
        })?;

        let mut tt = Tables::new();
        for row in rows {
            let name: String =
                from_row_opt(row).map_err(|e| RowgenError::Decode(e.to_string()))?;

            if !filter.should_include(&name) {
                trace!(table = ?name, "Skipping filtered table");
                continue;
            }

            debug!(table = ?name, "Reading columns");
            let columns = read_columns(&mut conn, &name, self.export_fields)?;
            trace!(table = ?name, columns = columns.len(), "Columns read");

            tt.push(Table {
                name,
                columns,
                row_type: self.row_type,
            });
        }

        info!(tables = tt.len(), "Schema read complete");
        Ok(tt)
    }
}

/// Read one table's columns via `DESCRIBE`, in the order the server lists
/// them.
fn read_columns(
    conn: &mut Conn,
    table: &str,
    export_fields: bool,
) -> Result<Vec<Column>, RowgenError> {
    let qry = format!("DESCRIBE {}", table);
    trace!(query = ?qry, "Describing table");

    let rows: Vec<Row> = conn.query(&qry).map_err(|e| RowgenError::Query {
        query: qry.clone(),
        message: e.to_string(),
    })?;

    let mut cc = Vec::with_capacity(rows.len());
    for row in rows {
        // DESCRIBE yields field, type, null, key, default, extra; only the
        // first two matter here.
        let (field, native, _null, _key, _default, _extra): (
            String,
            String,
            String,
            String,
            Option<String>,
            String,
        ) = from_row_opt(row).map_err(|e| RowgenError::Decode(e.to_string()))?;

        let go_type = typemap::go_type(&native, &field, table)?;
        trace!(column = ?field, native = ?native, mapped = ?go_type, "Mapped column");

        let name = if export_fields {
            upper_first(&field)
        } else {
            field
        };
        cc.push(Column {
            name,
            go_type: go_type.to_string(),
        });
    }

    Ok(cc)
}
