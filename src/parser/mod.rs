//! Tokenizer for dialogue text with inline glyph placeholders.
//!
//! This module provides pure functions splitting raw dialogue text into
//! text runs and `{name}` glyph references. Nothing here can fail: malformed
//! placeholder syntax is kept as literal text.

use crate::model::token::{GLYPH_CLOSE, GLYPH_OPEN};
use crate::model::Token;

/// Split raw dialogue text into text runs and glyph references.
///
/// Every `{name}` span becomes [`Token::GlyphRef`]; every run of characters
/// between spans becomes one [`Token::TextRun`]. Empty runs are never emitted.
///
/// # Edge cases
/// - `{}` yields `GlyphRef("")`.
/// - A `{` with no `}` later in the string is literal text up to the end.
/// - A `{` followed by another `{` before any `}` is literal; scanning resumes
///   at the second `{`.
///
/// # Examples
/// ```
/// use magic_words::model::Token;
/// use magic_words::parser::tokenize;
///
/// assert_eq!(
///     tokenize("Hi {smile} there"),
///     vec![Token::text("Hi "), Token::glyph("smile"), Token::text(" there")]
/// );
/// ```
pub fn tokenize(raw: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut rest = raw;

    while let Some(open) = rest.find(GLYPH_OPEN) {
        let after_open = &rest[open + GLYPH_OPEN.len_utf8()..];
        let Some(end) = after_open.find(|c| c == GLYPH_OPEN || c == GLYPH_CLOSE) else {
            // Unterminated placeholder: the remainder is literal.
            break;
        };

        if after_open[end..].starts_with(GLYPH_CLOSE) {
            text.push_str(&rest[..open]);
            flush_text(&mut text, &mut tokens);
            tokens.push(Token::GlyphRef(after_open[..end].to_string()));
            rest = &after_open[end + GLYPH_CLOSE.len_utf8()..];
        } else {
            // Nested open brace: keep everything before it as text.
            let literal_len = open + GLYPH_OPEN.len_utf8() + end;
            text.push_str(&rest[..literal_len]);
            rest = &rest[literal_len..];
        }
    }

    text.push_str(rest);
    flush_text(&mut text, &mut tokens);
    tokens
}

fn flush_text(text: &mut String, tokens: &mut Vec<Token>) {
    if !text.is_empty() {
        tokens.push(Token::TextRun(std::mem::take(text)));
    }
}

/// Split a text run into alternating word and whitespace pieces.
///
/// Each maximal run of whitespace and each maximal run of non-whitespace
/// becomes its own `TextRun`, so a layout can break between words while
/// keeping exact spacing elsewhere.
pub fn split_words(text: &str) -> Vec<Token> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut in_whitespace: Option<bool> = None;

    for (idx, ch) in text.char_indices() {
        let is_ws = ch.is_whitespace();
        if let Some(prev) = in_whitespace {
            if prev != is_ws {
                pieces.push(Token::TextRun(text[start..idx].to_string()));
                start = idx;
            }
        }
        in_whitespace = Some(is_ws);
    }

    if start < text.len() {
        pieces.push(Token::TextRun(text[start..].to_string()));
    }

    pieces
}

/// Apply [`split_words`] to every text run in a token stream.
///
/// Glyph references pass through unchanged. Already-split streams are
/// returned as-is, so this is idempotent.
pub fn split_runs(tokens: &[Token]) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    for token in tokens {
        match token {
            Token::TextRun(content) => out.extend(split_words(content)),
            Token::GlyphRef(_) => out.push(token.clone()),
        }
    }
    out
}

/// Tokenize and split text runs at whitespace boundaries in one pass.
pub fn tokenize_words(raw: &str) -> Vec<Token> {
    split_runs(&tokenize(raw))
}
