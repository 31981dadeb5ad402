//! Column type mapping for the three generated artifact contexts.
//!
//! The storage struct, the query-layer struct and the schema-description
//! text each spell the same column differently; the three mappings below
//! must stay mutually consistent so a value round-trips losslessly across
//! the generated layers.

/// Maps logical column types ("int", "varchar", ...) to Go and
/// schema-description types.
pub struct GoTypeMapper;

impl GoTypeMapper {
    /// Field type in the storage struct: "int" -> `uint`, anything else
    /// (including "varchar") -> `string`.
    pub fn storage_type(&self, column_type: &str) -> &'static str {
        match column_type {
            "int" => "uint",
            _ => "string",
        }
    }

    /// Field type in the query-layer struct. A column named "id" is always
    /// the opaque external identifier, regardless of its declared type.
    pub fn query_type(&self, column_type: &str, is_identifier: bool) -> &'static str {
        if is_identifier {
            return "graphql.ID";
        }
        match column_type {
            "int" => "int32",
            _ => "string",
        }
    }

    /// Field type in the schema-description text, with the same
    /// identifier-column override.
    pub fn schema_type(&self, column_type: &str, is_identifier: bool) -> &'static str {
        if is_identifier {
            return "ID";
        }
        match column_type {
            "int" => "Int",
            _ => "String",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_mapping() {
        let mapper = GoTypeMapper;
        assert_eq!(mapper.storage_type("int"), "uint");
        assert_eq!(mapper.query_type("int", false), "int32");
        assert_eq!(mapper.schema_type("int", false), "Int");
    }

    #[test]
    fn test_varchar_mapping() {
        let mapper = GoTypeMapper;
        assert_eq!(mapper.storage_type("varchar"), "string");
        assert_eq!(mapper.query_type("varchar", false), "string");
        assert_eq!(mapper.schema_type("varchar", false), "String");
    }

    #[test]
    fn test_unrecognized_type_defaults_to_string() {
        let mapper = GoTypeMapper;
        assert_eq!(mapper.storage_type("timestamp"), "string");
        assert_eq!(mapper.query_type("timestamp", false), "string");
        assert_eq!(mapper.schema_type("timestamp", false), "String");
    }

    #[test]
    fn test_identifier_column_overrides_declared_type() {
        let mapper = GoTypeMapper;
        // the storage layer keeps the declared type, the query and schema
        // layers always see the opaque identifier
        assert_eq!(mapper.storage_type("int"), "uint");
        assert_eq!(mapper.query_type("int", true), "graphql.ID");
        assert_eq!(mapper.schema_type("int", true), "ID");
        assert_eq!(mapper.query_type("varchar", true), "graphql.ID");
        assert_eq!(mapper.schema_type("varchar", true), "ID");
    }
}
