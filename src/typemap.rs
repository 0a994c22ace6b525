//! Native type mapping
//!
//! Maps a backend's native column type name to the Go type the generated
//! record fields use. The table is fixed and case-sensitive; anything not in
//! it is a hard error carrying the table and column for diagnostics.
//! Nullability is deliberately ignored: every mapped type is emitted
//! non-nullable regardless of the source column's constraint.

use crate::error::RowgenError;

/// Map a native column type to its Go type.
///
/// A parenthesized length/precision suffix is stripped before matching, so
/// `varchar(50)` maps like `varchar` and `int(11)` like `int`. Everything
/// from the first `(` on is dropped, matching how sized types are written by
/// both supported backends.
pub fn go_type(native: &str, column: &str, table: &str) -> Result<&'static str, RowgenError> {
    let base = match native.find('(') {
        Some(idx) => native[..idx].trim_end(),
        None => native,
    };

    match base {
        "int" | "integer" | "bigint" | "smallint" => Ok("int"),
        "bit" | "bool" | "boolean" => Ok("bool"),
        "char" | "nchar" | "varchar" | "nvarchar" | "text" | "character"
        | "character varying" => Ok("string"),
        "datetime" | "date" | "timestamp" | "timestamp without time zone"
        | "timestamp with time zone" => Ok("time.Time"),
        _ => Err(RowgenError::UnsupportedType {
            native: native.to_string(),
            table: table.to_string(),
            column: column.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_types() {
        assert_eq!(go_type("int", "id", "users").unwrap(), "int");
        assert_eq!(go_type("integer", "id", "users").unwrap(), "int");
        assert_eq!(go_type("bigint", "id", "users").unwrap(), "int");
        assert_eq!(go_type("smallint", "age", "users").unwrap(), "int");
    }

    #[test]
    fn test_boolean_types() {
        assert_eq!(go_type("bit", "active", "users").unwrap(), "bool");
        assert_eq!(go_type("bool", "active", "users").unwrap(), "bool");
        assert_eq!(go_type("boolean", "active", "users").unwrap(), "bool");
    }

    #[test]
    fn test_string_types() {
        for native in [
            "char",
            "nchar",
            "varchar",
            "nvarchar",
            "text",
            "character",
            "character varying",
        ] {
            assert_eq!(go_type(native, "name", "users").unwrap(), "string");
        }
    }

    #[test]
    fn test_time_types() {
        for native in [
            "datetime",
            "date",
            "timestamp",
            "timestamp without time zone",
            "timestamp with time zone",
        ] {
            assert_eq!(go_type(native, "created_at", "users").unwrap(), "time.Time");
        }
    }

    #[test]
    fn test_sized_suffix_maps_like_base() {
        assert_eq!(
            go_type("varchar(50)", "name", "users").unwrap(),
            go_type("varchar", "name", "users").unwrap()
        );
        assert_eq!(
            go_type("int(11)", "id", "users").unwrap(),
            go_type("int", "id", "users").unwrap()
        );
        assert_eq!(
            go_type("character varying(255)", "name", "users").unwrap(),
            "string"
        );
    }

    #[test]
    fn test_case_sensitive() {
        assert!(go_type("VARCHAR", "name", "users").is_err());
        assert!(go_type("Int", "id", "users").is_err());
    }

    #[test]
    fn test_unmapped_type_names_offender() {
        let err = go_type("money", "total", "orders").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("money"));
        assert!(msg.contains("orders"));
        assert!(msg.contains("total"));
    }
}
