//! Dialogue text tokens.

/// Opening delimiter of an inline glyph placeholder.
pub const GLYPH_OPEN: char = '{';

/// Closing delimiter of an inline glyph placeholder.
pub const GLYPH_CLOSE: char = '}';

/// Smallest unit of tokenized dialogue text.
///
/// # Invariants
/// Concatenating [`Token::source_text`] of every token produced from a raw
/// string reproduces that string exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// Literal text. May be a whole run between glyphs, a single word, or a
    /// single whitespace run depending on the producer.
    TextRun(String),
    /// Reference to a named glyph, written `{name}` in the raw text.
    /// The name may be empty (`{}`), which never resolves.
    GlyphRef(String),
}

impl Token {
    /// Convenience constructor for a text run.
    pub fn text(content: impl Into<String>) -> Self {
        Self::TextRun(content.into())
    }

    /// Convenience constructor for a glyph reference.
    pub fn glyph(name: impl Into<String>) -> Self {
        Self::GlyphRef(name.into())
    }

    /// The exact substring of the raw text this token was produced from.
    pub fn source_text(&self) -> String {
        match self {
            Token::TextRun(content) => content.clone(),
            Token::GlyphRef(name) => format!("{GLYPH_OPEN}{name}{GLYPH_CLOSE}"),
        }
    }

    /// True for text runs made only of whitespace.
    pub fn is_whitespace(&self) -> bool {
        match self {
            Token::TextRun(content) => {
                !content.is_empty() && content.chars().all(char::is_whitespace)
            }
            Token::GlyphRef(_) => false,
        }
    }

    /// True for glyph references.
    pub fn is_glyph(&self) -> bool {
        matches!(self, Token::GlyphRef(_))
    }
}

/// Rebuild raw text from a token sequence.
pub fn detokenize(tokens: &[Token]) -> String {
    tokens.iter().map(Token::source_text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_source_text_includes_braces() {
        assert_eq!(Token::glyph("smile").source_text(), "{smile}");
        assert_eq!(Token::glyph("").source_text(), "{}");
    }

    #[test]
    fn text_source_text_is_content() {
        assert_eq!(Token::text("Hi ").source_text(), "Hi ");
    }

    #[test]
    fn whitespace_detection() {
        assert!(Token::text("  \t").is_whitespace());
        assert!(!Token::text("a b").is_whitespace());
        assert!(!Token::text("").is_whitespace());
        assert!(!Token::glyph(" ").is_whitespace());
    }

    #[test]
    fn detokenize_concatenates_sources() {
        let tokens = vec![
            Token::text("Hi "),
            Token::glyph("smile"),
            Token::text(" there"),
        ];
        assert_eq!(detokenize(&tokens), "Hi {smile} there");
    }
}
