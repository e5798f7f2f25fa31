//! Diff algorithms implementation
//!
//! Computes an edit script between two token sequences. Algorithms emit one
//! operation per token; coalescing into runs and semantic cleanup happen
//! afterwards in [`crate::cleanup`].
pub mod myers;

pub use myers::MyersAlgorithm;

use crate::diff::DiffOperation;
use crate::tokenizers::Token;

/// Trait for diff algorithms
pub trait DiffAlgorithm: Send + Sync {
    /// Compute diff between two token sequences
    ///
    /// The result must be lossless: its Equal and Delete operations spell out
    /// `original`, its Equal and Insert operations spell out `modified`.
    fn compute(&self, original: &[Token], modified: &[Token]) -> Vec<DiffOperation>;
}

#[cfg(test)]
mod tests {
    use crate::tokenizers::{Token, Tokenizer, WhitespaceTokenizer};

    pub fn create_tokens(text: &str) -> Vec<Token> {
        WhitespaceTokenizer.tokenize(text)
    }
}
