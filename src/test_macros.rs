//! Declarative macros for the command test suites.
//!
//! Every command module carries two test files: `cli_tests.rs` checks how a
//! `pg_gateway` command line parses into the command struct, and
//! `output_tests.rs` checks how a result renders in each [`OutputFormat`].
//! The macros here generate those tests from a short table of cases.
//!
//! [`OutputFormat`]: crate::output::OutputFormat

use clap::Parser;

use crate::cli::Args;

/// Parse a `pg_gateway` command line given without the binary name.
pub fn parse_command_line(args: &[&str]) -> Result<Args, clap::Error> {
    Args::try_parse_from(std::iter::once("pg_gateway").chain(args.iter().copied()))
}

/// Parse a command line and check fields of the resulting command.
///
/// Omitted options show up as their defaults, so the same macro covers
/// default values and explicit flags.
///
/// # Example
///
/// ```ignore
/// cli_parse_test! {
///     test_name: test_select_with_where,
///     args: ["select", "--table", "users", "--where", "age > 21"],
///     variant: Select,
///     fields: {
///         table: "users",
///         conditions: Some("age > 21".to_string()),
///     },
/// }
/// ```
#[macro_export]
macro_rules! cli_parse_test {
    (
        test_name: $test_name:ident,
        args: [$($arg:expr),+ $(,)?],
        variant: $variant:ident,
        fields: { $($field:ident : $expected:expr),+ $(,)? } $(,)?
    ) => {
        #[rstest]
        fn $test_name() {
            let line = [$($arg),+];
            let args = $crate::test_macros::parse_command_line(&line)
                .unwrap_or_else(|e| panic!("{:?} should parse: {}", line, e));
            let $crate::commands::Command::$variant(cmd) = args.command else {
                panic!("{:?} did not parse as {}", line, stringify!($variant));
            };
            $(
                assert_eq!(cmd.$field, $expected, "{} after {:?}", stringify!($field), line);
            )+
        }
    };
}

/// Check that a command line is rejected by the parser.
///
/// With `mentions`, the usage error must name that argument, which is how
/// missing required arguments are reported.
///
/// # Example
///
/// ```ignore
/// cli_reject_test! {
///     test_name: test_select_requires_table,
///     args: ["select"],
///     mentions: "--table",
/// }
/// ```
#[macro_export]
macro_rules! cli_reject_test {
    (
        test_name: $test_name:ident,
        args: [$($arg:expr),+ $(,)?]
        $(, mentions: $needle:literal)? $(,)?
    ) => {
        #[rstest]
        fn $test_name() {
            let line = [$($arg),+];
            let result = $crate::test_macros::parse_command_line(&line);
            assert!(result.is_err(), "{:?} should be rejected", line);
            $(
                let err = result.unwrap_err().to_string();
                assert!(err.contains($needle), "usage error should name {}: {}", $needle, err);
            )?
        }
    };
}

/// Render a result fixture and check the output.
///
/// Three forms:
/// - `format: .., equals: ..` compares the whole rendering;
/// - `format: .., contains: [..]` looks for fragments;
/// - `json_fields: { .. }` parses the JSON rendering and compares top-level fields.
///
/// # Example
///
/// ```ignore
/// output_test! {
///     test_name: test_to_table_tables,
///     fixture: tables_result: TablesResult,
///     format: Table,
///     equals: TABLES_TABLE,
/// }
///
/// output_test! {
///     test_name: test_format_json_fields,
///     fixture: empty_result: TablesResult,
///     json_fields: { "schema": "audit" },
/// }
/// ```
#[macro_export]
macro_rules! output_test {
    (
        test_name: $test_name:ident,
        fixture: $fixture:ident : $fixture_type:ty,
        format: $format:ident,
        equals: $expected:expr $(,)?
    ) => {
        #[rstest]
        fn $test_name($fixture: $fixture_type) {
            use $crate::output::{OutputFormat, Outputable};
            assert_eq!($fixture.format(OutputFormat::$format), $expected);
        }
    };
    (
        test_name: $test_name:ident,
        fixture: $fixture:ident : $fixture_type:ty,
        format: $format:ident,
        contains: [$($needle:literal),+ $(,)?] $(,)?
    ) => {
        #[rstest]
        fn $test_name($fixture: $fixture_type) {
            use $crate::output::{OutputFormat, Outputable};
            let output = $fixture.format(OutputFormat::$format);
            $(
                assert!(output.contains($needle), "missing {:?} in:\n{}", $needle, output);
            )+
        }
    };
    (
        test_name: $test_name:ident,
        fixture: $fixture:ident : $fixture_type:ty,
        json_fields: { $($field:literal : $expected:expr),+ $(,)? } $(,)?
    ) => {
        #[rstest]
        fn $test_name($fixture: $fixture_type) {
            use $crate::output::{OutputFormat, Outputable};
            let output = $fixture.format(OutputFormat::Json);
            let parsed: serde_json::Value = serde_json::from_str(&output)
                .unwrap_or_else(|e| panic!("invalid JSON ({}):\n{}", e, output));
            $(
                assert_eq!(parsed[$field], $expected, "JSON field {}", $field);
            )+
        }
    };
}
