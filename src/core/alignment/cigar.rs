//! CIGAR view of an aligned pair.
//!
//! The aligners return two gapped strings; this module derives the compact
//! run-length form from them. A column with a gap in the target consumes a
//! query symbol only (`I`), a column with a gap in the query consumes a target
//! symbol only (`D`), everything else consumes both (`M`, or `=`/`X`).

use std::fmt::Write;

use super::types::GAP_SYMBOL;

/// CIGAR operation, stored as its SAM byte
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum CigarOp {
    M = b'M',  // Match/mismatch
    I = b'I',  // Query symbol against a target gap
    D = b'D',  // Target symbol against a query gap
    X = b'X',  // Sequence mismatch
    Eq = b'=', // Sequence match
}

impl CigarOp {
    #[inline(always)]
    pub const fn to_byte(self) -> u8 {
        self as u8
    }

    /// Returns true if this operation consumes query symbols
    #[inline(always)]
    pub const fn consumes_query(self) -> bool {
        matches!(self, Self::M | Self::I | Self::Eq | Self::X)
    }

    /// Returns true if this operation consumes target symbols
    #[inline(always)]
    pub const fn consumes_target(self) -> bool {
        matches!(self, Self::M | Self::D | Self::Eq | Self::X)
    }
}

/// Derive a normalized CIGAR from two equal-length aligned strings.
///
/// With `extended` set, aligned columns are split into `=` and `X` instead
/// of `M`. A column where both sides are gaps never comes out of the
/// aligners and is skipped.
pub fn cigar_from_aligned(
    aligned_query: &[u8],
    aligned_target: &[u8],
    extended: bool,
) -> Vec<(CigarOp, u32)> {
    debug_assert_eq!(aligned_query.len(), aligned_target.len());

    let mut cigar: Vec<(CigarOp, u32)> = aligned_query
        .iter()
        .zip(aligned_target)
        .filter_map(|(&q, &t)| {
            let op = match (q == GAP_SYMBOL, t == GAP_SYMBOL) {
                (false, false) if extended && q == t => CigarOp::Eq,
                (false, false) if extended => CigarOp::X,
                (false, false) => CigarOp::M,
                (false, true) => CigarOp::I,
                (true, false) => CigarOp::D,
                (true, true) => return None,
            };
            Some((op, 1))
        })
        .collect();
    merge_runs(&mut cigar);
    cigar
}

/// Fold each run of equal operations into its first element, e.g.
/// `2M 3M 1I` becomes `5M 1I`.
pub fn merge_runs(cigar: &mut Vec<(CigarOp, u32)>) {
    cigar.dedup_by(|next, kept| {
        if next.0 != kept.0 {
            return false;
        }
        kept.1 += next.1;
        true
    });
}

/// Number of query symbols covered by a CIGAR
#[inline]
pub fn query_length(cigar: &[(CigarOp, u32)]) -> u32 {
    cigar
        .iter()
        .filter(|(op, _)| op.consumes_query())
        .map(|&(_, len)| len)
        .sum()
}

/// Number of target symbols covered by a CIGAR
#[inline]
pub fn target_length(cigar: &[(CigarOp, u32)]) -> u32 {
    cigar
        .iter()
        .filter(|(op, _)| op.consumes_target())
        .map(|&(_, len)| len)
        .sum()
}

/// Render a CIGAR (e.g., "3M1D4M"); `*` when empty
#[inline]
pub fn to_string(cigar: &[(CigarOp, u32)]) -> String {
    if cigar.is_empty() {
        return "*".to_string();
    }

    let mut result = String::with_capacity(cigar.len() * 4);
    for &(op, len) in cigar {
        // Writing into a String cannot fail
        let _ = write!(&mut result, "{}{}", len, op.to_byte() as char);
    }
    result
}
