//! Affine-gap alignment (Gotoh): global and fitting (semi-global).
//!
//! Three score matrices track the state of the last column:
//!
//! - **M**: match/mismatch, entered diagonally from any state
//! - **X**: query symbol against a target gap (up move)
//! - **Y**: target symbol against a query gap (left move)
//!
//! ```text
//! M(i,j) = max(M, X, Y)(i-1, j-1) + score(q[i], t[j])     ties M > X > Y
//! X(i,j) = max(M(i-1,j) + gap_open, X(i-1,j) + gap_extend) ties open
//! Y(i,j) = max(M(i,j-1) + gap_open, Y(i,j-1) + gap_extend) ties open
//! ```
//!
//! A gap can only be opened from M and extended from its own state, so each
//! maximal gap run pays `gap_open` exactly once. Every addition saturates, so
//! sentinel cells and extreme penalties never overflow `i32`.

use super::matrix::DpMatrix;
use super::scoring::Scoring;
use super::traceback::AlignedPairBuilder;
use super::types::{Alignment, GapOrigin, State, NEG_INF};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AffineMode {
    /// Both sequences consumed end to end
    Global,
    /// Whole query against a free-floating target window
    Fitting,
}

/// Filled score and backpointer matrices of one affine call
struct AffineMatrices {
    m: DpMatrix<i32>,
    x: DpMatrix<i32>,
    y: DpMatrix<i32>,
    /// State of (i-1, j-1) that M(i, j) came from
    ptr_m: DpMatrix<State>,
    ptr_x: DpMatrix<GapOrigin>,
    ptr_y: DpMatrix<GapOrigin>,
}

impl AffineMatrices {
    fn fill(query: &[u8], target: &[u8], scoring: &Scoring, mode: AffineMode) -> Self {
        let n = query.len();
        let m_len = target.len();
        let (open, extend) = (scoring.gap_open, scoring.gap_extend);

        let mut mm = AffineMatrices {
            m: DpMatrix::for_lengths(n, m_len, NEG_INF),
            x: DpMatrix::for_lengths(n, m_len, NEG_INF),
            y: DpMatrix::for_lengths(n, m_len, NEG_INF),
            ptr_m: DpMatrix::for_lengths(n, m_len, State::Match),
            ptr_x: DpMatrix::for_lengths(n, m_len, GapOrigin::Unset),
            ptr_y: DpMatrix::for_lengths(n, m_len, GapOrigin::Unset),
        };

        mm.m[(0, 0)] = 0;

        // Leading query symbols with no target consumed pay ordinary gap costs
        for i in 1..=n {
            let (score, origin) =
                GapOrigin::choose(
                mm.m[(i - 1, 0)].saturating_add(open),
                mm.x[(i - 1, 0)].saturating_add(extend),
            );
            mm.x[(i, 0)] = score;
            mm.ptr_x[(i, 0)] = origin;
        }

        match mode {
            AffineMode::Global => {
                for j in 1..=m_len {
                    let (score, origin) = GapOrigin::choose(
                        mm.m[(0, j - 1)].saturating_add(open),
                        mm.y[(0, j - 1)].saturating_add(extend),
                    );
                    mm.y[(0, j)] = score;
                    mm.ptr_y[(0, j)] = origin;
                }
            }
            AffineMode::Fitting => {
                // The alignment may enter the target at any offset for free
                for j in 1..=m_len {
                    mm.m[(0, j)] = 0;
                }
            }
        }

        for i in 1..=n {
            let qi = query[i - 1];
            for j in 1..=m_len {
                let s = scoring.score(qi, target[j - 1]);

                let (best, from) = State::choose(
                    mm.m[(i - 1, j - 1)],
                    mm.x[(i - 1, j - 1)],
                    mm.y[(i - 1, j - 1)],
                );
                mm.m[(i, j)] = best.saturating_add(s);
                mm.ptr_m[(i, j)] = from;

                let (score, origin) = GapOrigin::choose(
                    mm.m[(i - 1, j)].saturating_add(open),
                    mm.x[(i - 1, j)].saturating_add(extend),
                );
                mm.x[(i, j)] = score;
                mm.ptr_x[(i, j)] = origin;

                let (score, origin) = GapOrigin::choose(
                    mm.m[(i, j - 1)].saturating_add(open),
                    mm.y[(i, j - 1)].saturating_add(extend),
                );
                mm.y[(i, j)] = score;
                mm.ptr_y[(i, j)] = origin;
            }
        }

        mm
    }

    /// Best state at one cell, ties M > X > Y
    #[inline]
    fn best_at(&self, i: usize, j: usize) -> (i32, State) {
        State::choose(self.m[(i, j)], self.x[(i, j)], self.y[(i, j)])
    }

    /// Emit the column for `state` at `(i, j)`, step to the predecessor cell
    /// and return the state active there.
    #[inline]
    fn step(
        &self,
        state: State,
        query: &[u8],
        target: &[u8],
        i: &mut usize,
        j: &mut usize,
        builder: &mut AlignedPairBuilder,
    ) -> State {
        match state {
            State::Match => {
                let from = self.ptr_m[(*i, *j)];
                builder.diag(query[*i - 1], target[*j - 1]);
                *i -= 1;
                *j -= 1;
                from
            }
            State::GapInTarget => {
                let origin = self.ptr_x[(*i, *j)];
                builder.up(query[*i - 1]);
                *i -= 1;
                origin.previous_state(State::GapInTarget)
            }
            State::GapInQuery => {
                let origin = self.ptr_y[(*i, *j)];
                builder.left(target[*j - 1]);
                *j -= 1;
                origin.previous_state(State::GapInQuery)
            }
        }
    }
}

/// Global alignment with affine gaps and the default scoring.
///
/// # Example
/// ```
/// use pairwise_align::core::alignment::global_align_affine;
///
/// // One deleted symbol costs exactly one gap open
/// let aln = global_align_affine(b"AC", b"A");
/// assert_eq!(aln.score, 3 - 5);
/// assert_eq!(aln.aligned_target, b"A-");
/// ```
pub fn global_align_affine(query: &[u8], target: &[u8]) -> Alignment {
    global_align_affine_with(query, target, &Scoring::default())
}

/// Gotoh global alignment with explicit scoring.
///
/// The terminal state at `(n, m)` is chosen M > X > Y. During traceback the
/// first row forces Y and the first column forces X, whatever the stored
/// pointer says.
pub fn global_align_affine_with(query: &[u8], target: &[u8], scoring: &Scoring) -> Alignment {
    let n = query.len();
    let m = target.len();
    let mats = AffineMatrices::fill(query, target, scoring, AffineMode::Global);

    let (score, mut state) = mats.best_at(n, m);
    log::trace!(
        "global-affine: {}x{} matrices, score {} in state {:?}",
        n + 1,
        m + 1,
        score,
        state
    );

    let mut builder = AlignedPairBuilder::with_capacity(n + m);
    let (mut i, mut j) = (n, m);
    while i > 0 || j > 0 {
        if i == 0 {
            state = State::GapInQuery;
        } else if j == 0 {
            state = State::GapInTarget;
        }
        state = mats.step(state, query, target, &mut i, &mut j, &mut builder);
    }

    builder.finish(score)
}

/// Fitting alignment with affine gaps and the default scoring.
///
/// # Example
/// ```
/// use pairwise_align::core::alignment::fitting_align_affine;
///
/// let aln = fitting_align_affine(b"CT", b"AAACTAAA");
/// assert_eq!(aln.score, 6);
/// assert_eq!(aln.aligned_target, b"CT");
/// ```
pub fn fitting_align_affine(query: &[u8], target: &[u8]) -> Alignment {
    fitting_align_affine_with(query, target, &Scoring::default())
}

/// Fitting (semi-global) alignment with explicit scoring.
///
/// The whole query is aligned; the target may begin and end anywhere at no
/// cost. The terminal cell is the best of the last row, first `j` winning
/// ties, and its state is chosen M > X > Y. Target symbols outside the
/// aligned window are not part of the output.
pub fn fitting_align_affine_with(query: &[u8], target: &[u8], scoring: &Scoring) -> Alignment {
    let n = query.len();
    let m = target.len();
    let mats = AffineMatrices::fill(query, target, scoring, AffineMode::Fitting);

    // Seeded from column 0 so a fully saturated last row still yields a cell
    let (mut best_score, mut best_state) = mats.best_at(n, 0);
    let mut best_j = 0usize;
    for j in 1..=m {
        let (s, state) = mats.best_at(n, j);
        if s > best_score {
            best_score = s;
            best_state = state;
            best_j = j;
        }
    }
    log::trace!(
        "fitting-affine: {}x{} matrices, score {} at column {} in state {:?}",
        n + 1,
        m + 1,
        best_score,
        best_j,
        best_state
    );

    let mut builder = AlignedPairBuilder::with_capacity(n + best_j);
    let (mut i, mut j) = (n, best_j);
    let mut state = best_state;
    while i > 0 {
        // No target symbol left to consume: a left move becomes an up move
        if j == 0 && state == State::GapInQuery {
            state = State::GapInTarget;
        }
        if j == 0 && state == State::Match {
            log::debug!("fitting-affine: diagonal pointer at column 0, row {}", i);
            break;
        }
        state = mats.step(state, query, target, &mut i, &mut j, &mut builder);
    }

    builder.finish(best_score)
}
