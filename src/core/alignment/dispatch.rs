//! Method selection and batch alignment.
//!
//! Every call owns its matrices, so independent pairs align in parallel
//! without any synchronization. `align_batch` spreads pairs over the rayon
//! pool and returns results in input order.

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;

use super::affine::{fitting_align_affine_with, global_align_affine_with};
use super::linear::{global_align_linear_with, local_align_linear_with};
use super::scoring::Scoring;
use super::types::Alignment;

/// The four supported alignment semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Needleman-Wunsch, linear gap
    GlobalLinear,
    /// Smith-Waterman, linear gap
    LocalLinear,
    /// Gotoh, affine gap
    GlobalAffine,
    /// Whole query against a free target window, affine gap
    FittingAffine,
}

impl Method {
    pub const ALL: [Method; 4] = [
        Method::GlobalLinear,
        Method::LocalLinear,
        Method::GlobalAffine,
        Method::FittingAffine,
    ];

    /// Driver name, e.g. `global-linear`
    pub const fn name(self) -> &'static str {
        match self {
            Method::GlobalLinear => "global-linear",
            Method::LocalLinear => "local-linear",
            Method::GlobalAffine => "global-affine",
            Method::FittingAffine => "fitting-affine",
        }
    }

    /// True for the variants that use gap open/extend instead of the linear gap
    pub const fn is_affine(self) -> bool {
        matches!(self, Method::GlobalAffine | Method::FittingAffine)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .iter()
            .copied()
            .find(|m| m.name() == s)
            .ok_or_else(|| {
                format!(
                    "Unknown method '{}' (expected one of: global-linear, local-linear, fitting-affine, global-affine)",
                    s
                )
            })
    }
}

/// Align one pair with the selected method.
pub fn align(method: Method, query: &[u8], target: &[u8], scoring: &Scoring) -> Alignment {
    log::debug!(
        "{}: query {} symbols, target {} symbols",
        method,
        query.len(),
        target.len()
    );
    match method {
        Method::GlobalLinear => global_align_linear_with(query, target, scoring),
        Method::LocalLinear => local_align_linear_with(query, target, scoring),
        Method::GlobalAffine => global_align_affine_with(query, target, scoring),
        Method::FittingAffine => fitting_align_affine_with(query, target, scoring),
    }
}

/// Align many independent pairs in parallel; output order matches input order.
pub fn align_batch<Q, T>(method: Method, pairs: &[(Q, T)], scoring: &Scoring) -> Vec<Alignment>
where
    Q: AsRef<[u8]> + Sync,
    T: AsRef<[u8]> + Sync,
{
    log::debug!(
        "{}: aligning {} pairs on {} threads",
        method,
        pairs.len(),
        rayon::current_num_threads()
    );
    pairs
        .par_iter()
        .map(|(q, t)| align(method, q.as_ref(), t.as_ref(), scoring))
        .collect()
}
