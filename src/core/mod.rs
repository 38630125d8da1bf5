//! Core reusable components: alignment kernels and their I/O.
//!
//! The kernels in `alignment` never touch files; `io` loads and windows the
//! input sequences and writes the text report.

pub mod alignment;
pub mod io;
