use thiserror::Error;

/// rowgen errors
///
/// Every variant is fatal: errors unwind to `main`, get printed, and the
/// process exits non-zero. There is no retry or partial-output path.
#[derive(Error, Debug)]
pub enum RowgenError {
    #[error("failed to connect to database: {0}")]
    Connection(String),

    #[error("query failed: {query}: {message}")]
    Query { query: String, message: String },

    #[error("failed to decode row: {0}")]
    Decode(String),

    #[error("don't know how to convert type: {native} [{table}.{column}]")]
    UnsupportedType {
        native: String,
        table: String,
        column: String,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_type_names_context() {
        let err = RowgenError::UnsupportedType {
            native: "money".to_string(),
            table: "orders".to_string(),
            column: "total".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("money"));
        assert!(msg.contains("orders"));
        assert!(msg.contains("total"));
    }

    #[test]
    fn test_query_error_carries_query_text() {
        let err = RowgenError::Query {
            query: "SHOW TABLES".to_string(),
            message: "server has gone away".to_string(),
        };

        assert!(err.to_string().contains("SHOW TABLES"));
    }
}
