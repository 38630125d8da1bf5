//! Aligned-string assembly during traceback.
//!
//! Traceback walks from the terminal cell towards the origin, so columns
//! arrive last-to-first. The builder appends them in that order and reverses
//! both strings once at the end.

use super::types::{Alignment, GAP_SYMBOL};

#[derive(Debug, Default)]
pub struct AlignedPairBuilder {
    query: Vec<u8>,
    target: Vec<u8>,
}

impl AlignedPairBuilder {
    /// Builder with room for `capacity` columns on each side
    pub fn with_capacity(capacity: usize) -> Self {
        AlignedPairBuilder {
            query: Vec::with_capacity(capacity),
            target: Vec::with_capacity(capacity),
        }
    }

    /// Match/mismatch column
    #[inline(always)]
    pub fn diag(&mut self, q: u8, t: u8) {
        self.query.push(q);
        self.target.push(t);
    }

    /// Query symbol against a gap in the target
    #[inline(always)]
    pub fn up(&mut self, q: u8) {
        self.query.push(q);
        self.target.push(GAP_SYMBOL);
    }

    /// Target symbol against a gap in the query
    #[inline(always)]
    pub fn left(&mut self, t: u8) {
        self.query.push(GAP_SYMBOL);
        self.target.push(t);
    }

    pub fn columns(&self) -> usize {
        self.query.len()
    }

    /// Reverse the collected columns into a forward-orientation alignment
    pub fn finish(mut self, score: i32) -> Alignment {
        self.query.reverse();
        self.target.reverse();
        Alignment {
            score,
            aligned_query: self.query,
            aligned_target: self.target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_reverses_columns() {
        let mut b = AlignedPairBuilder::with_capacity(4);
        // Walk of "AC-" / "A-G" seen backwards
        b.left(b'G');
        b.up(b'C');
        b.diag(b'A', b'A');
        assert_eq!(b.columns(), 3);

        let aln = b.finish(-4);
        assert_eq!(aln.score, -4);
        assert_eq!(aln.aligned_query, b"AC-");
        assert_eq!(aln.aligned_target, b"A-G");
    }

    #[test]
    fn test_empty_builder() {
        let aln = AlignedPairBuilder::default().finish(0);
        assert!(aln.is_empty());
        assert_eq!(aln.aligned_target.len(), 0);
    }
}
