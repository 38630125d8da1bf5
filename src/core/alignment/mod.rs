//! Pairwise alignment kernels.
//!
//! Four semantics share one scorer and one traceback builder:
//! global and local alignment with a linear gap penalty (`linear`), and
//! global and fitting alignment with an affine gap penalty (`affine`).
//! Every call allocates and drops its own full DP matrices.

pub mod affine;
pub mod cigar;
pub mod dispatch;
pub mod linear;
pub mod matrix;
pub mod scoring;
pub mod traceback;
pub mod types;

pub use affine::{
    fitting_align_affine, fitting_align_affine_with, global_align_affine,
    global_align_affine_with,
};
pub use dispatch::{align, align_batch, Method};
pub use linear::{
    global_align_linear, global_align_linear_with, local_align_linear, local_align_linear_with,
};
pub use scoring::Scoring;
pub use types::{Alignment, GAP_SYMBOL};
