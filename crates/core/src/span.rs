//! Byte spans into fragment and token text.

/// A half-open byte range into a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CharSpan {
    /// Start position (inclusive)
    pub start: usize,
    /// End position (exclusive)
    pub end: usize,
}

impl CharSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Slice `text` with this span.
    ///
    /// Returns `None` when the span is out of bounds or does not fall on
    /// character boundaries.
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_respects_char_boundaries() {
        let text = "“Employees”";
        assert_eq!(CharSpan::new(0, 3).slice(text), Some("“"));
        assert_eq!(CharSpan::new(0, 1).slice(text), None);
        assert_eq!(CharSpan::new(0, 99).slice(text), None);
    }
}
