//! `%table` directive integration tests.
//!
//! These tests script whole sessions to cover:
//! - Table payload shape (headers from the first row, data verbatim)
//! - Payload tagging when directives and code mix in one block
//! - Conversion errors (non-sequence, ragged, scalar rows)
//! - Unknown directives

use tether_tests::prelude::*;

mod payload {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("payload")
            .step(
                "bind_rows",
                "val tbl = List(List(1, \"a\"), List(2, \"b\"))",
                |a| a.text_contains("val tbl"),
            )
            .step("table_of_rows", "%table tbl", |a| {
                a.table(json!({
                    "headers": [
                        { "name": "0", "type": "integer" },
                        { "name": "1", "type": "string" },
                    ],
                    "data": [[1, "a"], [2, "b"]],
                }))
            })
            .step("bind_empty", "val none = List()", |a| a.text_contains("none"))
            .step("empty_table", "%table none", |a| {
                a.table(json!({ "headers": [], "data": [] }))
            })
            .step("whitespace_around_name", "%table   tbl  ", |a| a.data_rows(2))
    }

    #[test]
    fn test_table_payload_shape() {
        scenario().run().unwrap();
    }
}

mod tagging {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("tagging")
            .step("bind_rows", "val tbl = List(List(1))", |a| a.text_contains("tbl"))
            .step("directive_then_code", "%table tbl\n40 + 2", |a| {
                a.no_table().text("val res0: Int = 42")
            })
            .step("code_then_directive", "val more = List(List(9))\n%table more", |a| {
                a.headers(&[("0", "integer")]).data_rows(1)
            })
            .step(
                "last_directive_wins",
                "%table tbl\n%table more",
                |a| a.table(json!({
                    "headers": [{ "name": "0", "type": "integer" }],
                    "data": [[9]],
                })),
            )
            .step("text_is_still_captured", "println(\"x\")\n%table tbl", |a| {
                a.text("x\n").data_rows(1)
            })
    }

    #[test]
    fn test_payload_tagging_across_segments() {
        scenario().run().unwrap();
    }
}

mod mixed_columns {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("mixed_columns")
            .step(
                "bind_mixed",
                "val mixed = List(List(1, \"x\"), List(\"two\", \"y\"))",
                |a| a.text_contains("mixed"),
            )
            .step("first_row_fixes_the_kinds", "%table mixed", |a| {
                a.headers(&[("0", "integer"), ("1", "string")]).data_rows(2)
            })
    }

    #[test]
    fn test_int_first_column_stays_integer() {
        scenario().run().unwrap();
    }
}

mod directive_errors {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("directive_errors")
            .step("unknown_target", "%table missing", |a| {
                a.error("NameError").error_contains("not found: value missing")
            })
            .step("missing_expression", "%table", |a| {
                a.error("MagicError").error_contains("missing expression")
            })
            .step("bind_scalar", "val n = 7", |a| a.text("val n: Int = 7"))
            .step("not_a_sequence", "%table n", |a| {
                a.error("TableError").error_contains("sequence")
            })
            .step("bind_flat", "val flat = List(1, 2, 3)", |a| a.text_contains("flat"))
            .step("scalar_rows", "%table flat", |a| a.error("TableError"))
            .step("bind_ragged", "val ragged = List(List(1, 2), List(3))", |a| {
                a.text_contains("ragged")
            })
            .step("ragged_rows", "%table ragged", |a| {
                a.error("TableError").error_contains("expected 2")
            })
            .step("unknown_directive", "%csv tbl", |a| {
                a.error("MagicError").error_contains("%csv")
            })
            .step("double_percent_is_code", "50 % 3", |a| a.text("val res0: Int = 2"))
    }

    #[test]
    fn test_directive_error_classification() {
        scenario().run().unwrap();
    }
}
