//! Substitution and gap scoring shared by every alignment variant.
//!
//! The defaults are the fixed constants the reference outputs were produced
//! with. Overriding them is supported for experimentation, but golden
//! outputs only hold for `Scoring::default()`.

/// Score for two identical symbols
pub const MATCH: i32 = 3;
/// Score for two differing symbols
pub const MISMATCH: i32 = -3;
/// Linear gap penalty, charged per gap symbol
pub const GAP: i32 = -2;
/// Affine gap-open penalty, charged once for the first symbol of a gap run
pub const GAP_OPEN: i32 = -5;
/// Affine gap-extend penalty, charged for every further symbol of a run
pub const GAP_EXT: i32 = -1;

/// Largest accepted magnitude for any single scoring value on the command line
pub const MAX_SCORE_MAGNITUDE: i32 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scoring {
    pub match_score: i32,
    pub mismatch_score: i32,
    /// Linear-gap variants only
    pub gap: i32,
    /// Affine-gap variants only
    pub gap_open: i32,
    /// Affine-gap variants only
    pub gap_extend: i32,
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            match_score: MATCH,
            mismatch_score: MISMATCH,
            gap: GAP,
            gap_open: GAP_OPEN,
            gap_extend: GAP_EXT,
        }
    }
}

impl Scoring {
    pub fn new(match_score: i32, mismatch_score: i32, gap: i32, gap_open: i32, gap_extend: i32) -> Self {
        Self {
            match_score,
            mismatch_score,
            gap,
            gap_open,
            gap_extend,
        }
    }

    /// Reject values whose magnitude exceeds `MAX_SCORE_MAGNITUDE`.
    ///
    /// The kernels saturate instead of overflowing for any value, but scores
    /// pinned at the `i32` range no longer rank alignments meaningfully.
    pub fn check_magnitude(&self) -> Result<(), String> {
        let values = [
            ("match score", self.match_score),
            ("mismatch score", self.mismatch_score),
            ("gap score", self.gap),
            ("gap open", self.gap_open),
            ("gap extend", self.gap_extend),
        ];
        for (name, value) in values {
            if value.unsigned_abs() > MAX_SCORE_MAGNITUDE as u32 {
                return Err(format!(
                    "{} {} out of range (|value| <= {})",
                    name, value, MAX_SCORE_MAGNITUDE
                ));
            }
        }
        Ok(())
    }

    /// Substitution score for aligning `a` against `b`.
    ///
    /// Symbols are compared literally; case folding is the caller's job.
    #[inline(always)]
    pub fn score(&self, a: u8, b: u8) -> i32 {
        if a == b {
            self.match_score
        } else {
            self.mismatch_score
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let sc = Scoring::default();
        assert_eq!(sc.match_score, 3);
        assert_eq!(sc.mismatch_score, -3);
        assert_eq!(sc.gap, -2);
        assert_eq!(sc.gap_open, -5);
        assert_eq!(sc.gap_extend, -1);
    }

    #[test]
    fn test_score_is_literal() {
        let sc = Scoring::default();
        assert_eq!(sc.score(b'A', b'A'), MATCH);
        assert_eq!(sc.score(b'A', b'C'), MISMATCH);
        // No case folding
        assert_eq!(sc.score(b'a', b'A'), MISMATCH);
        assert_eq!(sc.score(b'*', b'*'), MATCH);
    }

    #[test]
    fn test_custom_scoring() {
        let sc = Scoring::new(1, -4, -3, -6, -1);
        assert_eq!(sc.score(b'G', b'G'), 1);
        assert_eq!(sc.score(b'G', b'T'), -4);
        assert_eq!(sc.gap_open, -6);
    }

    #[test]
    fn test_check_magnitude() {
        assert!(Scoring::default().check_magnitude().is_ok());
        assert!(Scoring::new(MAX_SCORE_MAGNITUDE, -MAX_SCORE_MAGNITUDE, 0, 0, 0)
            .check_magnitude()
            .is_ok());

        let err = Scoring::new(3, -3, -2, -1_700_000_000, -1)
            .check_magnitude()
            .unwrap_err();
        assert_eq!(err, "gap open -1700000000 out of range (|value| <= 1000000)");
        assert!(Scoring::new(3, i32::MIN, -2, -5, -1).check_magnitude().is_err());
    }
}
