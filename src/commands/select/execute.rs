use std::error::Error;

use super::SelectCmd;
use crate::commands::query::RowsResult;
use crate::commands::Execute;
use crate::db::{build_select, ConnectionParameters, Connector, SelectRequest};
use crate::gateway::Gateway;

impl SelectCmd {
    fn request(self) -> Result<SelectRequest, Box<dyn Error>> {
        let request = SelectRequest::new(
            self.table,
            self.schema,
            self.conditions,
            self.order_by,
            self.limit,
        )?;
        Ok(request)
    }
}

impl Execute for SelectCmd {
    type Output = RowsResult;

    fn execute<C: Connector>(self, gateway: &Gateway<C>) -> Result<Self::Output, Box<dyn Error>> {
        let request = self.request()?;
        let rows = gateway.select(ConnectionParameters::default(), &request)?;
        Ok(RowsResult::new(build_select(&request), rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{DbError, ValidationError, Value};
    use crate::test_utils::{query_result, recording_gateway};
    use rstest::{fixture, rstest};

    #[fixture]
    fn cmd() -> SelectCmd {
        SelectCmd {
            table: "users".to_string(),
            schema: None,
            conditions: None,
            order_by: None,
            limit: None,
        }
    }

    #[rstest]
    fn test_execute_builds_statement(cmd: SelectCmd) {
        let gateway = recording_gateway();
        gateway
            .connector()
            .respond_with(query_result(&["id"], vec![vec![Value::Int(7)]]));

        let result = SelectCmd {
            schema: Some("sales".to_string()),
            conditions: Some("age > 21".to_string()),
            order_by: Some("name".to_string()),
            limit: Some(10),
            ..cmd
        }
        .execute(&gateway)
        .unwrap();

        let expected = r#"SELECT * FROM sales."users" WHERE age > 21 ORDER BY name LIMIT 10"#;
        assert_eq!(result.query, expected);
        assert_eq!(result.row_count, 1);
        assert_eq!(gateway.connector().executed(), vec![expected]);
    }

    #[rstest]
    fn test_execute_quotes_table_name(cmd: SelectCmd) {
        let gateway = recording_gateway();

        let result = SelectCmd {
            table: r#"O"Brien"#.to_string(),
            ..cmd
        }
        .execute(&gateway)
        .unwrap();

        assert_eq!(result.query, r#"SELECT * FROM public."O""Brien""#);
    }

    #[rstest]
    #[case(0)]
    #[case(-5)]
    fn test_execute_rejects_non_positive_limit(cmd: SelectCmd, #[case] limit: i64) {
        let gateway = recording_gateway();

        let err = SelectCmd {
            limit: Some(limit),
            ..cmd
        }
        .execute(&gateway)
        .unwrap_err();

        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::NonPositiveLimit(limit))
        );
        assert_eq!(gateway.connector().open_count(), 0);
    }

    #[rstest]
    fn test_execute_rejects_blank_table(cmd: SelectCmd) {
        let gateway = recording_gateway();

        let err = SelectCmd {
            table: "   ".to_string(),
            ..cmd
        }
        .execute(&gateway)
        .unwrap_err();

        assert_eq!(err.to_string(), "Table name cannot be null or empty");
        assert_eq!(gateway.connector().open_count(), 0);
    }

    #[rstest]
    fn test_execute_query_failure(cmd: SelectCmd) {
        let gateway = recording_gateway();
        gateway
            .connector()
            .fail_queries_with("relation \"public.users\" does not exist");

        let err = cmd.execute(&gateway).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<DbError>(),
            Some(DbError::QueryExecution { .. })
        ));
    }
}
