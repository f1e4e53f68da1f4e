//! Catalog queries for schema and table listings.

use serde::Serialize;

use super::{QueryResult, Value};

/// User schemas, excluding PostgreSQL's own.
pub const LIST_SCHEMAS_SQL: &str = "\
SELECT schema_name
FROM information_schema.schemata
WHERE schema_name NOT IN ('information_schema', 'pg_catalog', 'pg_toast')
ORDER BY schema_name";

/// Base tables and views of schema `$1`, with their comments.
pub const LIST_TABLES_SQL: &str = "\
SELECT
    t.table_name,
    t.table_type,
    obj_description(c.oid, 'pg_class') AS table_comment
FROM information_schema.tables t
LEFT JOIN pg_namespace n ON n.nspname = t.table_schema
LEFT JOIN pg_class c ON c.relname = t.table_name AND c.relnamespace = n.oid
WHERE t.table_schema = $1
AND t.table_type IN ('BASE TABLE', 'VIEW')
ORDER BY t.table_name";

/// A table or view in a schema listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub table_type: String,
    pub comment: Option<String>,
}

/// Schema names from a [`LIST_SCHEMAS_SQL`] result.
pub(crate) fn schema_names(result: QueryResult) -> Vec<String> {
    result
        .rows
        .into_iter()
        .filter_map(|row| row.into_iter().next().and_then(Value::into_string))
        .collect()
}

/// Table entries from a [`LIST_TABLES_SQL`] result.
pub(crate) fn table_infos(result: QueryResult) -> Vec<TableInfo> {
    result
        .into_rows()
        .into_iter()
        .map(|row| {
            let text = |column: &str| row.get(column).cloned().and_then(Value::into_string);
            TableInfo {
                name: text("table_name").unwrap_or_default(),
                table_type: text("table_type").unwrap_or_default(),
                comment: text("table_comment"),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_schemas_query_excludes_system_schemas() {
        assert!(LIST_SCHEMAS_SQL.contains("information_schema.schemata"));
        assert!(LIST_SCHEMAS_SQL.contains("'information_schema', 'pg_catalog', 'pg_toast'"));
        assert!(LIST_SCHEMAS_SQL.ends_with("ORDER BY schema_name"));
    }

    #[rstest]
    fn test_tables_query_filters_types_and_binds_schema() {
        assert!(LIST_TABLES_SQL.contains("t.table_type IN ('BASE TABLE', 'VIEW')"));
        assert!(LIST_TABLES_SQL.contains("t.table_schema = $1"));
        assert!(LIST_TABLES_SQL.ends_with("ORDER BY t.table_name"));
    }

    #[rstest]
    fn test_schema_names() {
        let result = QueryResult {
            headers: vec!["schema_name".to_string()],
            rows: vec![vec![Value::from("analytics")], vec![Value::from("public")]],
        };
        assert_eq!(schema_names(result), vec!["analytics", "public"]);
    }

    #[rstest]
    fn test_table_infos() {
        let result = QueryResult {
            headers: vec![
                "table_name".to_string(),
                "table_type".to_string(),
                "table_comment".to_string(),
            ],
            rows: vec![
                vec![Value::from("orders"), Value::from("BASE TABLE"), Value::from("All orders")],
                vec![Value::from("recent_orders"), Value::from("VIEW"), Value::Null],
            ],
        };
        let tables = table_infos(result);
        assert_eq!(
            tables,
            vec![
                TableInfo {
                    name: "orders".to_string(),
                    table_type: "BASE TABLE".to_string(),
                    comment: Some("All orders".to_string()),
                },
                TableInfo {
                    name: "recent_orders".to_string(),
                    table_type: "VIEW".to_string(),
                    comment: None,
                },
            ]
        );
    }

    #[rstest]
    fn test_table_info_serializes_type_field() {
        let info = TableInfo {
            name: "orders".to_string(),
            table_type: "VIEW".to_string(),
            comment: None,
        };
        assert_eq!(
            serde_json::to_string(&info).unwrap(),
            r#"{"name":"orders","type":"VIEW","comment":null}"#
        );
    }
}
