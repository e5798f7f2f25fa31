//! Main diff engine that orchestrates the word diff

use tracing::trace;

use crate::algorithm::{DiffAlgorithm, MyersAlgorithm};
use crate::cleanup;
use crate::config::DiffConfig;
use crate::diff::{DiffOperation, DiffResult};
use crate::tokenizers::{Tokenizer, WhitespaceTokenizer};

/// The word diff engine
pub struct DiffEngine {
    config: DiffConfig,
    tokenizer: Box<dyn Tokenizer>,
}

impl DiffEngine {
    /// Create a new diff engine with the given configuration
    pub fn new(config: DiffConfig) -> Self {
        Self {
            config,
            tokenizer: Box::new(WhitespaceTokenizer),
        }
    }

    /// Create a diff engine with the default configuration
    pub fn default_config() -> Self {
        Self::new(DiffConfig::default())
    }

    /// Replace the tokenizer
    pub fn with_tokenizer(mut self, tokenizer: Box<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Compute the diff between two strings
    ///
    /// 1. Identical or one-sided inputs short-circuit to a single operation
    /// 2. Tokenize both sides, keeping whitespace runs as tokens
    /// 3. Run Myers over the token sequences
    /// 4. Coalesce into runs, then apply semantic cleanup if enabled
    pub fn diff(&self, original: &str, modified: &str) -> DiffResult {
        let mut result = DiffResult::new(original.to_string(), modified.to_string());

        for op in self.operations(original, modified) {
            result.add_operation(op);
        }

        result.finalize();
        result
    }

    /// Compute only the operation sequence
    pub fn operations(&self, original: &str, modified: &str) -> Vec<DiffOperation> {
        if original == modified {
            return vec![DiffOperation::equal(original)];
        }
        if original.is_empty() {
            return vec![DiffOperation::insert(modified)];
        }
        if modified.is_empty() {
            return vec![DiffOperation::delete(original)];
        }

        let original_tokens = self.tokenizer.tokenize(original);
        let modified_tokens = self.tokenizer.tokenize(modified);

        let raw = MyersAlgorithm::new().compute(&original_tokens, &modified_tokens);
        let merged = cleanup::merge(raw);
        let operations = if self.config.semantic_cleanup {
            cleanup::semantic(merged)
        } else {
            merged
        };

        trace!(
            tokenizer = self.tokenizer.name(),
            original_tokens = original_tokens.len(),
            modified_tokens = modified_tokens.len(),
            operations = operations.len(),
            "word diff computed"
        );

        operations
    }
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::default_config()
    }
}

impl std::fmt::Debug for DiffEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiffEngine")
            .field("config", &self.config)
            .field("tokenizer", &self.tokenizer.name())
            .finish()
    }
}
