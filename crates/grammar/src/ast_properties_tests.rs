// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Property-based tests for parser invariants.

use crate::ast::parse;
use proptest::prelude::*;

fn command_word_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,10}".prop_map(String::from)
}

fn param_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        command_word_strategy(),
        (command_word_strategy(), command_word_strategy())
            .prop_map(|(k, v)| format!("{k}={v}")),
    ]
}

fn command_line_strategy() -> impl Strategy<Value = String> {
    (
        command_word_strategy(),
        prop::collection::vec(param_strategy(), 0..5),
    )
        .prop_map(|(command, params)| {
            if params.is_empty() {
                command
            } else {
                format!("{} {}", command, params.join(" "))
            }
        })
}

proptest! {
    #[test]
    fn parse_is_pure(input in command_line_strategy()) {
        let a = parse(&input);
        let b = parse(&input);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn well_formed_command_line_fully_parses(input in command_line_strategy()) {
        let parsed = parse(&input);
        prop_assert!(parsed.unparsed_offset.is_none());
        prop_assert!(parsed.command.is_some());
    }

    #[test]
    fn whitespace_only_yields_no_tokens(ws in "[ \t]*") {
        let parsed = parse(&ws);
        prop_assert!(parsed.tokens.is_empty());
    }
}
