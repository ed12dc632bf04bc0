use std::ops::{Index, Range};

/// Represents an area within source text.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Region {
    /// The beginning of the range, inclusive.
    pub begin: usize,
    /// The ending of the range, exclusive.
    pub end: usize,
}

impl Region {
    /// Create a new Region from the given range.
    pub fn new(position: Range<usize>) -> Self {
        Self {
            begin: position.start,
            end: position.end,
        }
    }

    /// Access the literal value of a [`Region`].
    ///
    /// # Panics
    ///
    /// Panics if the `Region` is out of bounds in the given source text, or does
    /// not fall on character boundaries.
    pub fn literal<'source>(&self, source: &'source str) -> &'source str {
        &source[*self]
    }

    /// Return true if the given text outside of this [`Region`] is blank,
    /// meaning the `Region` spans the whole source once it is trimmed.
    pub fn spans_trimmed(&self, source: &str) -> bool {
        source[..self.begin].trim().is_empty() && source[self.end..].trim().is_empty()
    }
}

impl Index<Region> for str {
    type Output = str;

    fn index(&self, region: Region) -> &Self::Output {
        let Region { begin, end } = region;

        &self[begin..end]
    }
}

impl From<Range<usize>> for Region {
    fn from(value: Range<usize>) -> Self {
        Self {
            begin: value.start,
            end: value.end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal() {
        let source = "Hello, {{name}}!";
        let region = Region::new(9..13);

        assert_eq!(region.literal(source), "name");
    }

    #[test]
    fn test_spans_trimmed() {
        let source = "  {{name}}\n";

        assert!(Region::new(2..10).spans_trimmed(source));
        assert!(!Region::new(4..8).spans_trimmed(source));
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds_literal() {
        let source = "Hello, Taylor!";
        let region = Region::new(7..15);

        region.literal(source);
    }
}
