//! snp-refalt - REF/ALT assignment for SNP tables
//!
//! Reads records of the form `CHROM POS ID allele1 allele2`, looks up the
//! reference base at each position in a directory of per-chromosome FASTA
//! files, and writes `CHROM POS ID REF ALT`.
//!
//! # Example
//!
//! ```ignore
//! use snp_refalt::{ReferenceGenome, SnpRecord, resolve_alleles};
//!
//! let mut genome = ReferenceGenome::open("hg38/")?;
//! let record = SnpRecord::parse("chr1 100 rs1 A G", 2)?;
//! let (resolved, _) = resolve_alleles(&mut genome, record);
//! println!("{}", resolved);
//! ```

pub mod core;
pub mod formats;
pub mod reference;

// Re-export commonly used types
pub use core::{InputError, ReferenceError, Result, SnpRefAltError};
pub use formats::snp::{
    compare_alleles, convert_snps, resolve_alleles, ConversionStats, FallbackReason, Resolution,
    ResolvedRecord, SnpRecord,
};
pub use reference::{ChromFasta, ReferenceGenome};
