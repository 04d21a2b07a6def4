//! Chromosome naming helpers
//!
//! Maps an input chromosome name onto the per-chromosome FASTA file that
//! should hold it, and compares names across `chr`-prefixed and bare styles.

use std::path::{Path, PathBuf};

/// File extension of per-chromosome reference files
pub const FASTA_EXTENSION: &str = "fa";

/// Strip a case-insensitive `chr` prefix, if any
fn strip_chr_prefix(chrom: &str) -> &str {
    if chrom.len() > 3 && chrom.get(..3).is_some_and(|p| p.eq_ignore_ascii_case("chr")) {
        &chrom[3..]
    } else {
        chrom
    }
}

/// Candidate FASTA paths for a chromosome, most likely first.
///
/// A name already starting with `chr` maps to `<chrom>.fa`, anything else to
/// `chr<chrom>.fa`. The other spelling follows as a secondary candidate.
///
/// # Examples
/// ```
/// use snp_refalt::core::fasta_file_candidates;
/// use std::path::Path;
///
/// let c = fasta_file_candidates(Path::new("ref"), "1");
/// assert_eq!(c[0], Path::new("ref/chr1.fa"));
/// assert_eq!(c[1], Path::new("ref/1.fa"));
///
/// let c = fasta_file_candidates(Path::new("ref"), "chrX");
/// assert_eq!(c[0], Path::new("ref/chrX.fa"));
/// ```
pub fn fasta_file_candidates(dir: &Path, chrom: &str) -> Vec<PathBuf> {
    let (primary, secondary) = if chrom.starts_with("chr") {
        (chrom.to_string(), strip_chr_prefix(chrom).to_string())
    } else {
        (format!("chr{}", chrom), chrom.to_string())
    };

    let mut candidates = vec![dir.join(format!("{}.{}", primary, FASTA_EXTENSION))];
    if !secondary.is_empty() && secondary != primary {
        candidates.push(dir.join(format!("{}.{}", secondary, FASTA_EXTENSION)));
    }
    candidates
}

/// Normalize chromosome name for lookup (handles chr1/1/CHR1 variants)
///
/// # Examples
/// ```
/// use snp_refalt::core::normalize_chrom;
///
/// assert_eq!(normalize_chrom("chr1"), normalize_chrom("1"));
/// assert_eq!(normalize_chrom("Chr1"), normalize_chrom("1"));
/// assert_eq!(normalize_chrom("chrM"), normalize_chrom("MT"));
/// ```
pub fn normalize_chrom(chrom: &str) -> String {
    let upper = strip_chr_prefix(chrom).to_uppercase();
    if upper == "M" {
        "MT".to_string()
    } else {
        upper
    }
}

/// Check if two chromosome names are equivalent
///
/// # Examples
/// ```
/// use snp_refalt::core::chroms_equivalent;
///
/// assert!(chroms_equivalent("chr1", "1"));
/// assert!(chroms_equivalent("chrM", "MT"));
/// assert!(!chroms_equivalent("chr1", "chr2"));
/// ```
pub fn chroms_equivalent(chrom1: &str, chrom2: &str) -> bool {
    normalize_chrom(chrom1) == normalize_chrom(chrom2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_unprefixed() {
        let c = fasta_file_candidates(Path::new("/ref"), "2");
        assert_eq!(c, vec![PathBuf::from("/ref/chr2.fa"), PathBuf::from("/ref/2.fa")]);
    }

    #[test]
    fn test_candidates_prefixed() {
        let c = fasta_file_candidates(Path::new("/ref"), "chr2");
        assert_eq!(c, vec![PathBuf::from("/ref/chr2.fa"), PathBuf::from("/ref/2.fa")]);
    }

    #[test]
    fn test_candidates_bare_chr_has_no_secondary() {
        // "chr" alone keeps its name; stripping would leave nothing
        let c = fasta_file_candidates(Path::new("/ref"), "chr");
        assert_eq!(c, vec![PathBuf::from("/ref/chr.fa")]);
    }

    #[test]
    fn test_candidates_uppercase_prefix_is_not_prefixed() {
        // Only a lowercase "chr" counts as already prefixed for file naming
        let c = fasta_file_candidates(Path::new("/ref"), "CHR5");
        assert_eq!(c[0], PathBuf::from("/ref/chrCHR5.fa"));
        assert_eq!(c[1], PathBuf::from("/ref/CHR5.fa"));
    }

    #[test]
    fn test_normalize_chrom() {
        assert_eq!(normalize_chrom("chrX"), "X");
        assert_eq!(normalize_chrom("x"), "X");
        assert_eq!(normalize_chrom("M"), "MT");
        assert_eq!(normalize_chrom("chrMT"), "MT");
    }

    #[test]
    fn test_non_ascii_names() {
        // Byte 3 falls inside a multi-byte character
        assert_eq!(normalize_chrom("a€x"), "A€X");
        assert!(!chroms_equivalent("a€x", "other"));
        assert!(chroms_equivalent("chr€", "€"));

        let c = fasta_file_candidates(Path::new("/ref"), "a€x");
        assert_eq!(c[0], PathBuf::from("/ref/chra€x.fa"));
    }

    #[test]
    fn test_chroms_equivalent() {
        assert!(chroms_equivalent("CHR1", "chr1"));
        assert!(chroms_equivalent("chrX", "X"));
        assert!(!chroms_equivalent("chrX", "chrY"));
    }
}
