// SPDX-License-Identifier: MIT

//! Test macros for lexer tests.

/// Generate tokenization success tests comparing `(kind, text)` pairs.
///
/// ```ignore
/// lex_tests! {
///     single_word: "echo" => [(TokenKind::Word, "echo")],
/// }
/// ```
macro_rules! lex_tests {
    ($($name:ident: $input:expr => [$(($kind:expr, $text:expr)),* $(,)?]),* $(,)?) => {
        $(
            #[test]
            fn $name() {
                let tokens = Lexer::tokenize($input)
                    .expect(concat!("failed to tokenize: ", $input));
                let expected: Vec<(TokenKind, &str)> = vec![$(($kind, $text)),*];
                let actual: Vec<_> =
                    tokens.iter().map(|t| (t.kind, t.text.as_str())).collect();
                assert_eq!(actual, expected, "input: {:?}", $input);
            }
        )*
    };
}

/// Generate tests over the parts of a single-word input.
///
/// ```ignore
/// part_tests! {
///     mixed: "a'b'" => [(TokenKind::UnquotedWord, "a"), (TokenKind::SingleQuotedWord, "'b'")],
/// }
/// ```
macro_rules! part_tests {
    ($($name:ident: $input:expr => [$(($kind:expr, $text:expr)),* $(,)?]),* $(,)?) => {
        $(
            #[test]
            fn $name() {
                let tokens = Lexer::tokenize($input)
                    .expect(concat!("failed to tokenize: ", $input));
                assert_eq!(tokens.len(), 1, "expected one word for input {:?}", $input);
                let expected: Vec<(TokenKind, &str)> = vec![$(($kind, $text)),*];
                let actual: Vec<_> =
                    tokens[0].parts.iter().map(|p| (p.kind, p.text.as_str())).collect();
                assert_eq!(actual, expected, "input: {:?}", $input);
            }
        )*
    };
}

/// Generate tokenization error tests.
macro_rules! lex_error_tests {
    ($($name:ident: $input:expr => $error:pat),* $(,)?) => {
        $(
            #[test]
            fn $name() {
                let result = Lexer::tokenize($input);
                assert!(
                    matches!(result, Err($error)),
                    "expected error {:?} for input {:?}, got {:?}",
                    stringify!($error), $input, result
                );
            }
        )*
    };
}

/// Generate span accuracy tests.
macro_rules! span_tests {
    ($($name:ident: $input:expr => [$(($start:expr, $end:expr)),* $(,)?]),* $(,)?) => {
        $(
            #[test]
            fn $name() {
                let tokens = Lexer::tokenize($input)
                    .expect(concat!("failed to tokenize: ", $input));
                let expected: Vec<(usize, usize)> = vec![$(($start, $end)),*];
                let actual: Vec<_> =
                    tokens.iter().map(|t| (t.span.start, t.span.end)).collect();
                assert_eq!(actual, expected, "input: {:?}", $input);
            }
        )*
    };
}
