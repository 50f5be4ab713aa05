use crate::tokenizer::{tokenize_complete, TokenKind};

/// Multiplication glyphs that are accepted in place of `*`.
const MULTIPLICATION_GLYPHS: [char; 4] = ['⋅', '∗', '×', '·'];

/// Prepares raw user input for the parser.
///
/// Multiplication glyphs are replaced with `*`, all whitespace is removed, and the natural
/// logarithm `ln` is renamed to `log`. Identifiers that merely contain `ln` (such as `lnx`) are
/// left alone.
///
/// Spans reported by the parser and the differentiation engine refer to the normalized text.
pub fn normalize(input: &str) -> String {
    let replaced = input
        .chars()
        .map(|c| if MULTIPLICATION_GLYPHS.contains(&c) { '*' } else { c })
        .collect::<String>();

    tokenize_complete(&replaced)
        .iter()
        .filter(|token| !token.is_whitespace())
        .map(|token| match (token.kind, token.lexeme) {
            (TokenKind::Name, "ln") => "log",
            (_, lexeme) => lexeme,
        })
        .collect()
}
