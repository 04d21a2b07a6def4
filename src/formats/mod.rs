//! File format adapters

pub mod snp;

pub use snp::{
    compare_alleles, convert_snps, resolve_alleles, validate_header, ConversionStats,
    FallbackReason, Resolution, ResolvedRecord, SnpRecord, INPUT_HEADER_PREFIX, OUTPUT_HEADER,
};
