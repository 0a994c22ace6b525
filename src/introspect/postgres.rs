use postgres::{Client, NoTls};
use tracing::{debug, info, trace};

use super::SchemaReader;
use crate::error::RowgenError;
use crate::schema::{upper_first, Column, RowType, Table, Tables};
use crate::typemap;

/// PostgreSQL schema reader.
///
/// Lists tables through the standard information-schema views. A supplied
/// table filter is pushed into the listing query as a quoted `IN (...)`
/// clause. The names are interpolated into the query text verbatim, not
/// bound as parameters, so the filter must come from a trusted caller.
pub struct PostgresSchemaReader {
    conn: String,
    export_fields: bool,
    row_type: RowType,
}

impl PostgresSchemaReader {
    pub fn new(conn: String, export_fields: bool, row_type: RowType) -> Self {
        Self {
            conn,
            export_fields,
            row_type,
        }
    }
}

impl SchemaReader for PostgresSchemaReader {
    fn read_tables_schema(
        &mut self,
        database: &str,
        tables: Option<&str>,
    ) -> Result<Tables, RowgenError> {
        info!(database = ?database, "Reading schema from PostgreSQL");

        // Connection is scoped to this call; dropped on every return path.
        let mut client = Client::connect(&self.conn, NoTls)
            .map_err(|e| RowgenError::Connection(e.to_string()))?;

        let table_names = list_tables(&mut client, database, tables)?;
        debug!(count = table_names.len(), "Found tables");

        let mut tt = Tables::with_capacity(table_names.len());
        for name in table_names {
            debug!(table = ?name, "Reading columns");
            let columns = read_columns(&mut client, database, &name, self.export_fields)?;
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

/// List table names for the given catalog, in the order the server returns
/// them.
fn list_tables(
    client: &mut Client,
    database: &str,
    tables: Option<&str>,
) -> Result<Vec<String>, RowgenError> {
    let mut qry = format!(
        "SELECT table_name FROM information_schema.tables \
         WHERE table_catalog = '{}' AND table_schema = 'public'",
        database
    );
    if let Some(filter) = tables {
        if !filter.is_empty() {
            let quoted = format!("'{}'", filter.split(',').collect::<Vec<_>>().join("','"));
            qry = format!("{} AND table_name IN ({})", qry, quoted);
        }
    }
    trace!(query = ?qry, "Listing tables");

    let rows = client.query(qry.as_str(), &[]).map_err(|e| RowgenError::Query {
        query: qry.clone(),
        message: e.to_string(),
    })?;

    let mut names = Vec::with_capacity(rows.len());
    for row in &rows {
        let name: String = row
            .try_get(0)
            .map_err(|e| RowgenError::Decode(e.to_string()))?;
        names.push(name);
    }
    Ok(names)
}

/// Read one table's columns in ordinal position order, mapping each native
/// type as it comes in.
fn read_columns(
    client: &mut Client,
    database: &str,
    table: &str,
    export_fields: bool,
) -> Result<Vec<Column>, RowgenError> {
    let qry = format!(
        "SELECT column_name, data_type FROM information_schema.columns \
         WHERE table_catalog = '{}' AND table_name = '{}' \
         ORDER BY ordinal_position",
        database, table
    );
    trace!(query = ?qry, "Describing table");

    let rows = client.query(qry.as_str(), &[]).map_err(|e| RowgenError::Query {
        query: qry.clone(),
        message: e.to_string(),
    })?;

    let mut cc = Vec::with_capacity(rows.len());
    for row in &rows {
        let name: String = row
            .try_get(0)
            .map_err(|e| RowgenError::Decode(e.to_string()))?;
        let native: String = row
            .try_get(1)
            .map_err(|e| RowgenError::Decode(e.to_string()))?;

        let go_type = typemap::go_type(&native, &name, table)?;
        trace!(column = ?name, native = ?native, mapped = ?go_type, "Mapped column");

        let name = if export_fields { upper_first(&name) } else { name };
        cc.push(Column {
            name,
            go_type: go_type.to_string(),
        });
    }

    Ok(cc)
}
