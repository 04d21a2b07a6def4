//! Reference genome access
//!
//! Per-chromosome FASTA files indexed with `noodles`.

mod fasta;
mod genome;

pub use fasta::{ChromFasta, ContigInfo};
pub use genome::ReferenceGenome;
