pub mod align_opt; // Run configuration (clap surface + validated options)
pub mod core; // Alignment kernels and their I/O
pub mod pairwise; // Load → align → report driver

pub use crate::core::alignment::{
    fitting_align_affine, global_align_affine, global_align_linear, local_align_linear, Alignment,
    Method, Scoring,
};
