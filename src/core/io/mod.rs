//! Input loading and result reporting around the alignment kernels.

pub mod fasta_reader;
pub mod report_output;
pub mod selection;
