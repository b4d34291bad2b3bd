// SPDX-License-Identifier: MIT

//! Property-based tests for parser invariants.

use proptest::prelude::*;

use super::*;

/// Strategy for plain unquoted words.
fn word_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_./-]{0,8}".prop_map(String::from)
}

/// Strategy for words in any quoting style.
fn quoted_word_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        word_strategy(),
        "[a-z ]{1,6}".prop_map(|s| format!("'{s}'")),
        "[a-z ]{1,6}".prop_map(|s| format!("\"{s}\"")),
        "[a-z]".prop_map(|s| format!("\\{s}")),
    ]
}

/// Strategy for one simple command.
fn simple_command_strategy() -> impl Strategy<Value = String> {
    (word_strategy(), prop::collection::vec(quoted_word_strategy(), 0..4))
        .prop_map(|(name, args)| {
            if args.is_empty() {
                name
            } else {
                format!("{} {}", name, args.join(" "))
            }
        })
}

/// Strategy for full lines: commands joined by `;`, `|`, with optional `&`.
fn line_strategy() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(simple_command_strategy(), 1..4),
        prop::sample::select(vec!["; ", " | "]),
        prop::bool::ANY,
    )
        .prop_map(|(cmds, sep, bg)| {
            let mut line = cmds.join(sep);
            if bg {
                line.push_str(" &");
            }
            line
        })
}

proptest! {
    /// Valid lines parse.
    #[test]
    fn parses_generated_lines(input in line_strategy()) {
        prop_assert!(Parser::parse(&input).is_ok(), "failed to parse: {:?}", input);
    }

    /// Round-trip: rejoining the token stream with single spaces and
    /// re-parsing yields an equivalent stream (same kinds, same texts).
    #[test]
    fn rejoin_roundtrip(input in line_strategy()) {
        let first = Parser::parse(&input).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let rejoined = first.rejoin();
        let second = Parser::parse(&rejoined).map_err(|e| TestCaseError::fail(e.to_string()))?;

        let stream = |p: &ParsedLine| -> Vec<(TokenKind, String)> {
            p.tokens.iter().map(|t| (t.kind, t.text.clone())).collect()
        };
        prop_assert_eq!(stream(&first), stream(&second));
        prop_assert_eq!(first.sequences.len(), second.sequences.len());
    }

    /// Token start positions never decrease across the stream.
    #[test]
    fn token_positions_monotonic(input in line_strategy()) {
        if let Ok(parsed) = Parser::parse(&input) {
            let starts: Vec<usize> = parsed.tokens.iter().map(|t| t.span.start).collect();
            for pair in starts.windows(2) {
                prop_assert!(pair[0] <= pair[1]);
            }
        }
    }

    /// N `;`-separated commands produce N pipe sequences.
    #[test]
    fn semicolons_make_sequences(cmds in prop::collection::vec(word_strategy(), 1..5)) {
        let line = cmds.join("; ");
        let parsed = Parser::parse(&line).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(parsed.sequences.len(), cmds.len());
    }

    /// Whitespace-only input parses to nothing.
    #[test]
    fn blank_input_is_empty(ws in "[ \t]{0,10}") {
        let parsed = Parser::parse(&ws).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert!(parsed.sequences.is_empty());
        prop_assert!(parsed.tokens.is_empty());
    }
}
