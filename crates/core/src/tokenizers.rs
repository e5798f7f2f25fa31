//! Text tokenizers
//!
//! Provides the `Tokenizer` trait and the whitespace-preserving word tokenizer
//! the redline engine diffs with. Every byte of the input lands in exactly one
//! token, so concatenating token texts in order reconstructs the input.

use crate::span::CharSpan;
use crate::substitute::placeholder_len;

/// Represents a single token with metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token text
    pub text: String,

    /// Byte span in the tokenized input
    pub span: CharSpan,

    /// Token index in the sequence
    pub index: usize,

    /// What kind of run this token covers
    pub kind: TokenKind,
}

/// Kind of run a token covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A maximal run of non-whitespace characters (punctuation stays attached)
    Word,
    /// A maximal run of whitespace characters
    Whitespace,
}

impl Token {
    /// Create a new token
    pub fn new(text: String, span: CharSpan, index: usize, kind: TokenKind) -> Self {
        Self {
            text,
            span,
            index,
            kind,
        }
    }
}

/// Trait for tokenizers that split text into tokens
pub trait Tokenizer: Send + Sync {
    /// Split `text` into tokens.
    ///
    /// Implementations must be lossless: the token texts, concatenated in
    /// order, equal `text`.
    fn tokenize(&self, text: &str) -> Vec<Token>;

    /// Get the name of this tokenizer
    fn name(&self) -> &str;

    /// Clone this tokenizer into a Box
    fn clone_box(&self) -> Box<dyn Tokenizer>;
}

// Implement Clone for Box<dyn Tokenizer>
impl Clone for Box<dyn Tokenizer> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl std::fmt::Debug for Box<dyn Tokenizer> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Tokenizer").field(&self.name()).finish()
    }
}

/// Word tokenizer that keeps whitespace runs as their own tokens.
///
/// `"Hello  brave world."` becomes `["Hello", "  ", "brave", " ", "world."]`.
///
/// A well-formed placeholder such as `{{ company_name }}` is part of a word
/// run even with spaces inside its braces, so a diff never splits it.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut current_start = 0;
        let mut current_kind: Option<TokenKind> = None;
        let mut pos = 0;

        while let Some(ch) = text[pos..].chars().next() {
            let (kind, len) = match placeholder_len(&text[pos..]) {
                Some(len) => (TokenKind::Word, len),
                None => (classify_char(ch), ch.len_utf8()),
            };

            match current_kind {
                None => {
                    current_start = pos;
                    current_kind = Some(kind);
                }
                Some(prev) if prev == kind => {}
                Some(prev) => {
                    tokens.push(create_token(text, current_start, pos, tokens.len(), prev));
                    current_start = pos;
                    current_kind = Some(kind);
                }
            }
            pos += len;
        }

        if let Some(kind) = current_kind {
            tokens.push(create_token(
                text,
                current_start,
                text.len(),
                tokens.len(),
                kind,
            ));
        }

        tokens
    }

    fn name(&self) -> &str {
        "whitespace"
    }

    fn clone_box(&self) -> Box<dyn Tokenizer> {
        Box::new(*self)
    }
}

fn classify_char(ch: char) -> TokenKind {
    if ch.is_whitespace() {
        TokenKind::Whitespace
    } else {
        TokenKind::Word
    }
}

fn create_token(text: &str, start: usize, end: usize, index: usize, kind: TokenKind) -> Token {
    Token::new(
        text[start..end].to_string(),
        CharSpan::new(start, end),
        index,
        kind,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_whitespace_runs_are_tokens() {
        let tokens = WhitespaceTokenizer.tokenize("Hello  brave\tworld.");

        assert_eq!(texts(&tokens), vec!["Hello", "  ", "brave", "\t", "world."]);
        assert_eq!(tokens[1].kind, TokenKind::Whitespace);
        assert_eq!(tokens[4].kind, TokenKind::Word);
        assert_eq!(tokens[4].span, CharSpan::new(13, 19));
        assert_eq!(tokens[4].index, 4);
    }

    #[test]
    fn test_leading_and_trailing_whitespace() {
        let tokens = WhitespaceTokenizer.tokenize(" a ");
        assert_eq!(texts(&tokens), vec![" ", "a", " "]);
    }

    #[test]
    fn test_empty_input() {
        assert!(WhitespaceTokenizer.tokenize("").is_empty());
    }

    #[test]
    fn test_placeholder_is_one_word() {
        let tokens = WhitespaceTokenizer.tokenize("Adopted by {{ company_name }}. Signed");

        assert_eq!(
            texts(&tokens),
            vec!["Adopted", " ", "by", " ", "{{ company_name }}.", " ", "Signed"]
        );
        assert_eq!(tokens[4].kind, TokenKind::Word);
        assert_eq!(tokens[4].span, CharSpan::new(11, 30));
    }

    #[test]
    fn test_malformed_placeholder_splits_on_whitespace() {
        let tokens = WhitespaceTokenizer.tokenize("{{ not a name }}");
        assert_eq!(
            texts(&tokens),
            vec!["{{", " ", "not", " ", "a", " ", "name", " ", "}}"]
        );
    }

    #[test]
    fn test_lossless_on_multibyte_text() {
        let input = "eligible employees (“Employees”) a variety\n of choices";
        let tokens = WhitespaceTokenizer.tokenize(input);
        let rebuilt: String = tokens.iter().map(|t| t.text.as_str()).collect();

        assert_eq!(rebuilt, input);
        assert!(tokens.iter().any(|t| t.text == "(“Employees”)"));
    }
}
