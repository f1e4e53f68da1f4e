//! CLI parsing tests for schemas command using the test DSL.

#[cfg(test)]
mod tests {
    use crate::commands::Command;
    use crate::test_macros::parse_command_line;
    use rstest::rstest;

    crate::cli_reject_test! {
        test_name: test_schemas_rejects_positional,
        args: ["schemas", "public"],
    }

    #[rstest]
    #[case(&["schemas"])]
    #[case(&["-o", "toon", "schemas"])]
    #[case(&["schemas", "--host", "db.internal"])]
    fn test_schemas_parses(#[case] line: &[&str]) {
        let args = parse_command_line(line).unwrap();
        assert!(matches!(args.command, Command::Schemas(_)));
    }
}
