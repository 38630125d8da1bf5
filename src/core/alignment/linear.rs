//! Linear-gap alignment: Needleman-Wunsch (global) and Smith-Waterman (local).
//!
//! Both variants fill one score matrix and one backpointer matrix with
//!
//! ```text
//! H(i,j) = max(
//!     H(i-1, j-1) + score(q[i], t[j]),   // Diag
//!     H(i-1, j)   + gap,                 // Up: gap in target
//!     H(i, j-1)   + gap,                 // Left: gap in query
//!     0                                  // local only
//! )
//! ```
//!
//! Ties always resolve diag > up > left (a later candidate must be strictly
//! greater). For local alignment 0 is the running best the candidates must
//! beat, so a cell that cannot improve on 0 becomes a restart (`Stop`).
//!
//! Additions saturate at the `i32` range, so extreme scoring values clamp
//! scores instead of overflowing.

use super::matrix::DpMatrix;
use super::scoring::Scoring;
use super::traceback::AlignedPairBuilder;
use super::types::{Alignment, LinearMove};

/// Global alignment with a linear gap penalty and the default scoring.
///
/// # Example
/// ```
/// use pairwise_align::core::alignment::global_align_linear;
///
/// let aln = global_align_linear(b"AC", b"AG");
/// assert_eq!(aln.score, 0);
/// assert_eq!(aln.aligned_query, b"AC");
/// assert_eq!(aln.aligned_target, b"AG");
/// ```
pub fn global_align_linear(query: &[u8], target: &[u8]) -> Alignment {
    global_align_linear_with(query, target, &Scoring::default())
}

/// Needleman-Wunsch with explicit scoring.
///
/// Boundary: `H(i,0) = i*gap`, `H(0,j) = j*gap`. Traceback runs from `(n,m)`
/// to `(0,0)`, so every query and target symbol appears exactly once.
pub fn global_align_linear_with(query: &[u8], target: &[u8], scoring: &Scoring) -> Alignment {
    let n = query.len();
    let m = target.len();
    let gap = scoring.gap;

    let mut h = DpMatrix::for_lengths(n, m, 0i32);
    let mut ptr = DpMatrix::for_lengths(n, m, LinearMove::Stop);

    for i in 1..=n {
        h[(i, 0)] = gap.saturating_mul(i as i32);
        ptr[(i, 0)] = LinearMove::Up;
    }
    for j in 1..=m {
        h[(0, j)] = gap.saturating_mul(j as i32);
        ptr[(0, j)] = LinearMove::Left;
    }

    for i in 1..=n {
        let qi = query[i - 1];
        for j in 1..=m {
            let diag = h[(i - 1, j - 1)].saturating_add(scoring.score(qi, target[j - 1]));
            let up = h[(i - 1, j)].saturating_add(gap);
            let left = h[(i, j - 1)].saturating_add(gap);

            let (best, mv) = LinearMove::choose(diag, up, left);
            h[(i, j)] = best;
            ptr[(i, j)] = mv;
        }
    }

    let score = h[(n, m)];
    log::trace!("global-linear: {}x{} matrix, score {}", n + 1, m + 1, score);

    let mut builder = AlignedPairBuilder::with_capacity(n + m);
    let (mut i, mut j) = (n, m);
    while i > 0 || j > 0 {
        match ptr[(i, j)] {
            LinearMove::Diag => {
                builder.diag(query[i - 1], target[j - 1]);
                i -= 1;
                j -= 1;
            }
            LinearMove::Up => {
                builder.up(query[i - 1]);
                i -= 1;
            }
            LinearMove::Left => {
                builder.left(target[j - 1]);
                j -= 1;
            }
            LinearMove::Stop => break,
        }
    }

    builder.finish(score)
}

/// Local alignment with a linear gap penalty and the default scoring.
///
/// # Example
/// ```
/// use pairwise_align::core::alignment::local_align_linear;
///
/// let aln = local_align_linear(b"TTTACGTAAA", b"GGACGTGG");
/// assert_eq!(aln.score, 12);
/// assert_eq!(aln.aligned_query, b"ACGT");
/// ```
pub fn local_align_linear(query: &[u8], target: &[u8]) -> Alignment {
    local_align_linear_with(query, target, &Scoring::default())
}

/// Smith-Waterman with explicit scoring.
///
/// The traceback start is the first cell, in row-major order, holding the
/// global maximum. Traceback stops at the first visited cell whose score is
/// 0. A best score of 0 yields an empty alignment.
pub fn local_align_linear_with(query: &[u8], target: &[u8], scoring: &Scoring) -> Alignment {
    let n = query.len();
    let m = target.len();
    let gap = scoring.gap;

    // Row 0 and column 0 stay 0 / Stop
    let mut h = DpMatrix::for_lengths(n, m, 0i32);
    let mut ptr = DpMatrix::for_lengths(n, m, LinearMove::Stop);

    let mut best_score = 0;
    let (mut best_i, mut best_j) = (0usize, 0usize);

    for i in 1..=n {
        let qi = query[i - 1];
        for j in 1..=m {
            let diag = h[(i - 1, j - 1)].saturating_add(scoring.score(qi, target[j - 1]));
            let up = h[(i - 1, j)].saturating_add(gap);
            let left = h[(i, j - 1)].saturating_add(gap);

            let (s, mv) = LinearMove::choose_local(diag, up, left);
            h[(i, j)] = s;
            ptr[(i, j)] = mv;

            // Strict: keep the first occurrence of the maximum
            if s > best_score {
                best_score = s;
                best_i = i;
                best_j = j;
            }
        }
    }

    log::trace!(
        "local-linear: {}x{} matrix, best {} at ({}, {})",
        n + 1,
        m + 1,
        best_score,
        best_i,
        best_j
    );

    let mut builder = AlignedPairBuilder::with_capacity(best_i + best_j);
    let (mut i, mut j) = (best_i, best_j);
    while i > 0 && j > 0 {
        if h[(i, j)] == 0 {
            break;
        }
        match ptr[(i, j)] {
            LinearMove::Diag => {
                builder.diag(query[i - 1], target[j - 1]);
                i -= 1;
                j -= 1;
            }
            LinearMove::Up => {
                builder.up(query[i - 1]);
                i -= 1;
            }
            LinearMove::Left => {
                builder.left(target[j - 1]);
                j -= 1;
            }
            LinearMove::Stop => break,
        }
    }

    builder.finish(best_score)
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod linear_test;
