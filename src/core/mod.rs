//! Core building blocks
//!
//! Error types, chromosome naming rules and compression-aware I/O.

mod chrom;
mod error;
pub mod io;

pub use chrom::{chroms_equivalent, fasta_file_candidates, normalize_chrom, FASTA_EXTENSION};
pub use error::{
    InputError, InputResult, ReferenceError, ReferenceResult, Result, SnpRefAltError,
};
pub use io::{detect_compression, CompressionFormat, LineIterator, DEFAULT_BUFFER_SIZE};
