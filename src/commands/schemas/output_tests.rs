//! Output formatting tests for schemas command.

#[cfg(test)]
mod tests {
    use super::super::execute::SchemasResult;
    use rstest::{fixture, rstest};

    // =========================================================================
    // Expected outputs
    // =========================================================================

    const EMPTY_TABLE: &str = "\
Schemas (0):
  No schemas found.";

    const SCHEMAS_TABLE: &str = "\
Schemas (2):
  inventory
  public";

    const SCHEMAS_JSON: &str = r#"{
  "schemas": [
    "inventory",
    "public"
  ]
}"#;

    // =========================================================================
    // Fixtures
    // =========================================================================

    #[fixture]
    fn empty_result() -> SchemasResult {
        SchemasResult::default()
    }

    #[fixture]
    fn schemas_result() -> SchemasResult {
        SchemasResult {
            schemas: vec!["inventory".to_string(), "public".to_string()],
        }
    }

    // =========================================================================
    // Tests
    // =========================================================================

    crate::output_test! {
        test_name: test_to_table_empty,
        fixture: empty_result: SchemasResult,
        format: Table,
        equals: EMPTY_TABLE,
    }

    crate::output_test! {
        test_name: test_to_table_schemas,
        fixture: schemas_result: SchemasResult,
        format: Table,
        equals: SCHEMAS_TABLE,
    }

    crate::output_test! {
        test_name: test_format_json,
        fixture: schemas_result: SchemasResult,
        format: Json,
        equals: SCHEMAS_JSON,
    }

    crate::output_test! {
        test_name: test_format_toon,
        fixture: schemas_result: SchemasResult,
        format: Toon,
        contains: ["schemas", "inventory", "public"],
    }
}
