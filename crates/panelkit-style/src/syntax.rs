#![forbid(unsafe_code)]

//! Tokenization of rendered content for highlighting.
//!
//! Content reaching the stylize stage is already laid out in lines, so
//! tokenizers work one line at a time and keep no state between lines.
//! A string literal left open at the end of a line simply ends there.

use std::ops::Range;

use panelkit_core::SyntaxLanguage;

// ---------------------------------------------------------------------------
// Token kinds
// ---------------------------------------------------------------------------

/// Semantic token categories.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Anything without a more specific category.
    Text,
    Whitespace,
    /// Built-in constants such as `None`, `true` or `null`.
    Constant,
    Identifier,
    String,
    Number,
    /// Brackets, separators and operators.
    Punctuation,
    Comment,
}

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

/// A token with a kind and a byte range within its line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub range: Range<usize>,
}

impl Token {
    /// Create a token. Panics in debug builds if the range is inverted.
    pub fn new(kind: TokenKind, range: Range<usize>) -> Self {
        debug_assert!(range.start <= range.end, "token range must be ordered");
        Self { kind, range }
    }

    pub fn len(&self) -> usize {
        self.range.end.saturating_sub(self.range.start)
    }

    pub fn is_empty(&self) -> bool {
        self.range.start >= self.range.end
    }

    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range.clone()]
    }
}

// ---------------------------------------------------------------------------
// Tokenizer trait
// ---------------------------------------------------------------------------

/// Line tokenizer.
///
/// Implementors must cover the whole line with non-overlapping tokens in
/// order, so that concatenating the token texts yields the line.
pub trait Tokenizer: Send + Sync {
    /// Human-readable name (e.g. "Python").
    fn name(&self) -> &'static str;

    fn tokenize_line(&self, line: &str) -> Vec<Token>;
}

// ---------------------------------------------------------------------------
// LiteralTokenizer
// ---------------------------------------------------------------------------

/// Configuration for a [`LiteralTokenizer`].
pub struct LiteralTokenizerConfig {
    pub name: &'static str,
    pub constants: &'static [&'static str],
    pub quotes: &'static [u8],
    /// Line comment marker, empty if the syntax has none.
    pub line_comment: &'static str,
}

/// Tokenizer for data literal syntaxes: strings, numbers, named constants
/// and punctuation.
pub struct LiteralTokenizer {
    config: LiteralTokenizerConfig,
}

impl LiteralTokenizer {
    pub const fn new(config: LiteralTokenizerConfig) -> Self {
        Self { config }
    }

    fn scan_word(&self, bytes: &[u8], pos: usize) -> (TokenKind, usize) {
        let mut end = pos;
        while end < bytes.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_') {
            end += 1;
        }
        let word = std::str::from_utf8(&bytes[pos..end]).unwrap_or("");
        let kind = if self.config.constants.contains(&word) {
            TokenKind::Constant
        } else {
            TokenKind::Identifier
        };
        (kind, end)
    }

    /// Decimal number with optional fraction and exponent.
    fn scan_number(&self, bytes: &[u8], pos: usize) -> usize {
        let mut end = pos;
        if bytes[end] == b'-' {
            end += 1;
        }
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end + 1 < bytes.len() && bytes[end] == b'.' && bytes[end + 1].is_ascii_digit() {
            end += 1;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
        }
        if end < bytes.len() && (bytes[end] | 0x20) == b'e' {
            let mut exp = end + 1;
            if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
                exp += 1;
            }
            if exp < bytes.len() && bytes[exp].is_ascii_digit() {
                end = exp;
                while end < bytes.len() && bytes[end].is_ascii_digit() {
                    end += 1;
                }
            }
        }
        end
    }

    /// String literal starting at the opening quote at `pos`.
    fn scan_string(&self, bytes: &[u8], pos: usize) -> usize {
        let quote = bytes[pos];
        let mut end = pos + 1;
        while end < bytes.len() {
            if bytes[end] == b'\\' {
                end = (end + 2).min(bytes.len());
            } else if bytes[end] == quote {
                return end + 1;
            } else {
                end += 1;
            }
        }
        end
    }
}

impl Tokenizer for LiteralTokenizer {
    fn name(&self) -> &'static str {
        self.config.name
    }

    fn tokenize_line(&self, line: &str) -> Vec<Token> {
        let bytes = line.as_bytes();
        let mut tokens = Vec::new();
        let mut pos = 0;

        while pos < bytes.len() {
            let b = bytes[pos];
            let comment = self.config.line_comment;
            let (kind, end) = if !comment.is_empty() && line[pos..].starts_with(comment) {
                (TokenKind::Comment, bytes.len())
            } else if b == b' ' || b == b'\t' {
                let mut end = pos + 1;
                while end < bytes.len() && (bytes[end] == b' ' || bytes[end] == b'\t') {
                    end += 1;
                }
                (TokenKind::Whitespace, end)
            } else if self.config.quotes.contains(&b) {
                (TokenKind::String, self.scan_string(bytes, pos))
            } else if b.is_ascii_digit()
                || (b == b'-' && bytes.get(pos + 1).is_some_and(u8::is_ascii_digit))
            {
                (TokenKind::Number, self.scan_number(bytes, pos))
            } else if b.is_ascii_alphabetic() || b == b'_' {
                self.scan_word(bytes, pos)
            } else if b.is_ascii_punctuation() {
                (TokenKind::Punctuation, pos + 1)
            } else {
                // Non-ASCII: take the whole char so ranges stay on boundaries.
                let len = line[pos..].chars().next().map_or(1, char::len_utf8);
                (TokenKind::Text, pos + len)
            };
            push_merged(&mut tokens, kind, pos..end);
            pos = end;
        }

        tokens
    }
}

/// Append a token, extending the previous one if it has the same kind.
/// Punctuation is never merged.
fn push_merged(tokens: &mut Vec<Token>, kind: TokenKind, range: Range<usize>) {
    if kind != TokenKind::Punctuation
        && let Some(last) = tokens.last_mut()
        && last.kind == kind
        && last.range.end == range.start
    {
        last.range.end = range.end;
        return;
    }
    tokens.push(Token::new(kind, range));
}

// ---------------------------------------------------------------------------
// PlainTokenizer (trivial fallback)
// ---------------------------------------------------------------------------

/// Tokenizer that treats each line as a single `Text` token.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTokenizer;

impl Tokenizer for PlainTokenizer {
    fn name(&self) -> &'static str {
        "Text"
    }

    fn tokenize_line(&self, line: &str) -> Vec<Token> {
        if line.is_empty() {
            return Vec::new();
        }
        vec![Token::new(TokenKind::Text, 0..line.len())]
    }
}

// ---------------------------------------------------------------------------
// Built-in configurations
// ---------------------------------------------------------------------------

pub fn python_tokenizer() -> LiteralTokenizer {
    LiteralTokenizer::new(LiteralTokenizerConfig {
        name: "Python",
        constants: &["None", "True", "False", "inf", "nan"],
        quotes: b"'\"",
        line_comment: "#",
    })
}

pub fn json_tokenizer() -> LiteralTokenizer {
    LiteralTokenizer::new(LiteralTokenizerConfig {
        name: "JSON",
        constants: &["null", "true", "false"],
        quotes: b"\"",
        line_comment: "",
    })
}

/// Tokenizer for a configured syntax language.
pub fn tokenizer_for(language: SyntaxLanguage) -> Box<dyn Tokenizer> {
    match language {
        SyntaxLanguage::Text => Box::new(PlainTokenizer),
        SyntaxLanguage::Python => Box::new(python_tokenizer()),
        SyntaxLanguage::Json => Box::new(json_tokenizer()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
