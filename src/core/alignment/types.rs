//! Result and backpointer types shared by the linear and affine engines.

use super::cigar::{cigar_from_aligned, CigarOp};

/// Gap symbol used in aligned output
pub const GAP_SYMBOL: u8 = b'-';

/// "Unreachable" score for affine matrices.
///
/// Kept well above `i32::MIN` so the few gap penalties added to a sentinel
/// cell before it loses a comparison cannot overflow.
pub const NEG_INF: i32 = i32::MIN / 4;

/// An alignment of `query` against `target`.
///
/// Both aligned strings always have the same length. Removing `GAP_SYMBOL`
/// from `aligned_query` yields the consumed part of the query (all of it for
/// global and fitting alignment), likewise for the target.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Alignment {
    pub score: i32,
    pub aligned_query: Vec<u8>,
    pub aligned_target: Vec<u8>,
}

impl Alignment {
    /// Empty alignment with the given score
    pub fn empty(score: i32) -> Self {
        Alignment {
            score,
            aligned_query: Vec::new(),
            aligned_target: Vec::new(),
        }
    }

    /// Number of alignment columns
    pub fn len(&self) -> usize {
        self.aligned_query.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aligned_query.is_empty()
    }

    pub fn aligned_query_str(&self) -> String {
        String::from_utf8_lossy(&self.aligned_query).into_owned()
    }

    pub fn aligned_target_str(&self) -> String {
        String::from_utf8_lossy(&self.aligned_target).into_owned()
    }

    /// Query symbols consumed by the alignment, gaps removed
    pub fn ungapped_query(&self) -> Vec<u8> {
        strip_gaps(&self.aligned_query)
    }

    /// Target symbols consumed by the alignment, gaps removed
    pub fn ungapped_target(&self) -> Vec<u8> {
        strip_gaps(&self.aligned_target)
    }

    /// Run-length CIGAR of the alignment; `=`/`X` instead of `M` when `extended`
    pub fn cigar(&self, extended: bool) -> Vec<(CigarOp, u32)> {
        cigar_from_aligned(&self.aligned_query, &self.aligned_target, extended)
    }

    /// Fraction of columns that are identical symbols (0.0 when empty)
    pub fn identity(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let matches = self
            .aligned_query
            .iter()
            .zip(&self.aligned_target)
            .filter(|(q, t)| q == t && **q != GAP_SYMBOL)
            .count();
        matches as f64 / self.len() as f64
    }
}

fn strip_gaps(aligned: &[u8]) -> Vec<u8> {
    aligned.iter().copied().filter(|&c| c != GAP_SYMBOL).collect()
}

/// Backpointer of a linear-gap DP cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinearMove {
    /// Match/mismatch, from (i-1, j-1)
    Diag,
    /// Gap in target, from (i-1, j)
    Up,
    /// Gap in query, from (i, j-1)
    Left,
    /// Origin, or a local-alignment restart
    Stop,
}

impl LinearMove {
    /// Best of the three predecessors. Later candidates must be strictly
    /// greater to win, so ties resolve diag > up > left.
    #[inline(always)]
    pub fn choose(diag: i32, up: i32, left: i32) -> (i32, LinearMove) {
        let (mut best, mut mv) = (diag, LinearMove::Diag);
        if up > best {
            best = up;
            mv = LinearMove::Up;
        }
        if left > best {
            best = left;
            mv = LinearMove::Left;
        }
        (best, mv)
    }

    /// Local-alignment variant: the running best starts at 0 with `Stop`,
    /// and a predecessor only replaces it when strictly greater.
    #[inline(always)]
    pub fn choose_local(diag: i32, up: i32, left: i32) -> (i32, LinearMove) {
        let (mut best, mut mv) = (0, LinearMove::Stop);
        for (score, candidate) in [
            (diag, LinearMove::Diag),
            (up, LinearMove::Up),
            (left, LinearMove::Left),
        ] {
            if score > best {
                best = score;
                mv = candidate;
            }
        }
        (best, mv)
    }
}

/// State of the three-state affine-gap automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    /// M: column is a match/mismatch (diagonal move)
    #[default]
    Match,
    /// X: query symbol against a gap (up move)
    GapInTarget,
    /// Y: target symbol against a gap (left move)
    GapInQuery,
}

impl State {
    /// Best of the M, X and Y scores with ties resolved M > X > Y.
    #[inline(always)]
    pub fn choose(m: i32, x: i32, y: i32) -> (i32, State) {
        let (mut best, mut state) = (m, State::Match);
        if x > best {
            best = x;
            state = State::GapInTarget;
        }
        if y > best {
            best = y;
            state = State::GapInQuery;
        }
        (best, state)
    }
}

/// Backpointer of an X or Y cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapOrigin {
    /// Gap opened from M
    Open,
    /// Gap extended from the same gap state
    Extend,
    /// Cell never filled
    Unset,
}

impl GapOrigin {
    /// Opening wins ties against extending.
    #[inline(always)]
    pub fn choose(open: i32, extend: i32) -> (i32, GapOrigin) {
        if open >= extend {
            (open, GapOrigin::Open)
        } else {
            (extend, GapOrigin::Extend)
        }
    }

    /// State active before this gap column, given the gap's own state.
    #[inline(always)]
    pub fn previous_state(self, gap_state: State) -> State {
        match self {
            GapOrigin::Extend => gap_state,
            GapOrigin::Open | GapOrigin::Unset => State::Match,
        }
    }
}
