//! Diff result types and structures

use std::fmt;

/// Type of edit operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditType {
    /// Content remained unchanged
    Equal,
    /// Content was inserted
    Insert,
    /// Content was deleted
    Delete,
}

/// A single diff operation: a run of text and what happened to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOperation {
    /// Type of operation
    pub edit_type: EditType,

    /// The text covered by this operation
    pub text: String,
}

impl DiffOperation {
    pub fn new(edit_type: EditType, text: impl Into<String>) -> Self {
        Self {
            edit_type,
            text: text.into(),
        }
    }

    pub fn equal(text: impl Into<String>) -> Self {
        Self::new(EditType::Equal, text)
    }

    pub fn insert(text: impl Into<String>) -> Self {
        Self::new(EditType::Insert, text)
    }

    pub fn delete(text: impl Into<String>) -> Self {
        Self::new(EditType::Delete, text)
    }

    pub fn is_change(&self) -> bool {
        self.edit_type != EditType::Equal
    }

    /// Length of the covered text in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Get a human-readable description of this operation
    pub fn description(&self) -> String {
        match self.edit_type {
            EditType::Insert => format!("Insert: \"{}\"", self.text),
            EditType::Delete => format!("Delete: \"{}\"", self.text),
            EditType::Equal => format!("Equal: \"{}\"", self.text),
        }
    }
}

/// Concatenate the old side (Equal + Delete) of an op sequence.
pub fn reconstruct_original(operations: &[DiffOperation]) -> String {
    operations
        .iter()
        .filter(|op| op.edit_type != EditType::Insert)
        .map(|op| op.text.as_str())
        .collect()
}

/// Concatenate the new side (Equal + Insert) of an op sequence.
pub fn reconstruct_modified(operations: &[DiffOperation]) -> String {
    operations
        .iter()
        .filter(|op| op.edit_type != EditType::Delete)
        .map(|op| op.text.as_str())
        .collect()
}

/// Statistics about the diff
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiffStatistics {
    /// Total characters in original
    pub original_length: usize,

    /// Total characters in modified
    pub modified_length: usize,

    /// Number of insert operations
    pub insertions: usize,

    /// Number of delete operations
    pub deletions: usize,

    /// Characters covered by insert operations
    pub inserted_chars: usize,

    /// Characters covered by delete operations
    pub deleted_chars: usize,

    /// Characters covered by equal operations
    pub unchanged_chars: usize,

    /// Share of text changed (0.0 to 1.0)
    pub change_percentage: f64,
}

impl DiffStatistics {
    pub fn new(original_length: usize, modified_length: usize) -> Self {
        Self {
            original_length,
            modified_length,
            ..Default::default()
        }
    }

    fn record(&mut self, op: &DiffOperation) {
        let len = op.char_len();
        match op.edit_type {
            EditType::Insert => {
                self.insertions += 1;
                self.inserted_chars += len;
            }
            EditType::Delete => {
                self.deletions += 1;
                self.deleted_chars += len;
            }
            EditType::Equal => self.unchanged_chars += len,
        }
    }

    /// Calculate the change percentage
    pub fn calculate_change_percentage(&mut self) {
        let total_changes = self.inserted_chars + self.deleted_chars;
        let max_length = self.original_length.max(self.modified_length);

        self.change_percentage = if max_length > 0 {
            (total_changes as f64 / max_length as f64).min(1.0)
        } else {
            0.0
        };
    }
}

/// Complete diff result
#[derive(Debug, Clone)]
pub struct DiffResult {
    /// Ordered diff operations, left to right in document order
    pub operations: Vec<DiffOperation>,

    /// Statistics about the diff
    pub statistics: DiffStatistics,

    /// Original text
    pub original_text: String,

    /// Modified text
    pub modified_text: String,
}

impl DiffResult {
    pub fn new(original_text: String, modified_text: String) -> Self {
        let stats = DiffStatistics::new(
            original_text.chars().count(),
            modified_text.chars().count(),
        );

        Self {
            operations: Vec::new(),
            statistics: stats,
            original_text,
            modified_text,
        }
    }

    /// Add an operation to the diff
    pub fn add_operation(&mut self, op: DiffOperation) {
        self.statistics.record(&op);
        self.operations.push(op);
    }

    /// Finalize the diff result (calculate derived values)
    pub fn finalize(&mut self) {
        self.statistics.calculate_change_percentage();
    }

    /// Get a summary of the diff
    pub fn summary(&self) -> String {
        format!(
            "Diff Summary: {} insertions ({} chars), {} deletions ({} chars). Change: {:.1}%",
            self.statistics.insertions,
            self.statistics.inserted_chars,
            self.statistics.deletions,
            self.statistics.deleted_chars,
            self.statistics.change_percentage * 100.0,
        )
    }

    /// Check whether the two sides are identical (no insert or delete ops)
    pub fn is_unchanged(&self) -> bool {
        self.operations.iter().all(|op| !op.is_change())
    }

    /// Get only the changed operations (exclude Equal)
    pub fn changed_operations(&self) -> Vec<&DiffOperation> {
        self.operations.iter().filter(|op| op.is_change()).collect()
    }

    pub fn reconstruct_original(&self) -> String {
        reconstruct_original(&self.operations)
    }

    pub fn reconstruct_modified(&self) -> String {
        reconstruct_modified(&self.operations)
    }
}

impl fmt::Display for DiffResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Diff Result ===")?;
        writeln!(f, "{}", self.summary())?;
        writeln!(f, "\nOperations:")?;

        for (i, op) in self.operations.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, op.description())?;
        }

        Ok(())
    }
}
