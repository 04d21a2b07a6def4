//! Error types for snp-refalt
//!
//! Defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for snp-refalt operations
#[derive(Debug, Error)]
pub enum SnpRefAltError {
    /// Input file and header errors
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Reference genome errors
    #[error("Reference error: {0}")]
    Reference(#[from] ReferenceError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while opening or parsing the SNP input.
///
/// All of these abort the run.
#[derive(Debug, Error)]
pub enum InputError {
    /// Input file does not exist
    #[error("Input file not found: {0}")]
    FileNotFound(PathBuf),

    /// Reference directory does not exist
    #[error("Reference genome directory not found: {0}")]
    ReferenceDirNotFound(PathBuf),

    /// Reference path exists but is not a directory
    #[error("Reference genome path is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Input has no header line at all
    #[error("Input file is empty, expected header #CHROM POS ID allele1 allele2")]
    MissingHeader,

    /// First line does not start with #CHROM
    #[error("Malformed header '{found}', expected #CHROM POS ID allele1 allele2")]
    MalformedHeader { found: String },

    /// Data line with the wrong shape
    #[error("Invalid SNP record at line {line}: {message}")]
    InvalidRecord { line: usize, message: String },

    /// I/O error while reading input
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by a reference lookup.
///
/// None of these abort the run; the caller falls back to pass-through.
#[derive(Debug, Error)]
pub enum ReferenceError {
    /// No FASTA file for the chromosome in the reference directory
    #[error("Reference FASTA for chromosome {chrom} not found: {}", .path.display())]
    FastaNotFound { chrom: String, path: PathBuf },

    /// FASTA file exists but holds no matching sequence
    #[error("Chromosome {chrom} not present in {}", .path.display())]
    ContigNotFound { chrom: String, path: PathBuf },

    /// Position is 0 or beyond the sequence end
    #[error("Position {chrom}:{pos} outside sequence of length {length}")]
    PositionOutOfRange { chrom: String, pos: u64, length: u64 },

    /// Failed to index the FASTA file
    #[error("Failed to index {}: {message}", .path.display())]
    Index { path: PathBuf, message: String },

    /// Indexed query failed
    #[error("Failed to fetch {chrom}:{pos}: {source}")]
    Query {
        chrom: String,
        pos: u64,
        #[source]
        source: std::io::Error,
    },

    /// Query succeeded but returned no bases
    #[error("Empty sequence returned for {chrom}:{pos}")]
    EmptySequence { chrom: String, pos: u64 },
}

/// Result type alias for snp-refalt operations
pub type Result<T> = std::result::Result<T, SnpRefAltError>;

/// Result type alias for input parsing
pub type InputResult<T> = std::result::Result<T, InputError>;

/// Result type alias for reference lookups
pub type ReferenceResult<T> = std::result::Result<T, ReferenceError>;
