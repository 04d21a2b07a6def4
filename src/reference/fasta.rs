//! Single-chromosome FASTA handle
//!
//! Wraps a `noodles` indexed reader. The index is built in memory when the
//! file is opened, so no `.fai` sidecar is needed or written.

use crate::core::{chroms_equivalent, ReferenceError, ReferenceResult};
use log::debug;
use noodles::core::{Position, Region};
use noodles::fasta::{self, fai};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// One sequence entry from the FASTA index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContigInfo {
    pub name: String,
    pub length: u64,
}

/// An open, indexed FASTA file
pub struct ChromFasta {
    path: PathBuf,
    contigs: Vec<ContigInfo>,
    reader: fasta::io::IndexedReader<BufReader<File>>,
}

impl std::fmt::Debug for ChromFasta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChromFasta")
            .field("path", &self.path)
            .field("contigs", &self.contigs)
            .finish()
    }
}

impl ChromFasta {
    /// Index and open a FASTA file
    pub fn open(path: &Path) -> ReferenceResult<Self> {
        let index_error = |e: std::io::Error| ReferenceError::Index {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        let index = fasta::index(path).map_err(index_error)?;
        let contigs = contigs_from_index(&index);
        debug!("Indexed {} ({} sequences)", path.display(), contigs.len());

        let file = File::open(path).map_err(index_error)?;
        let reader = fasta::io::IndexedReader::new(BufReader::new(file), index);

        Ok(Self {
            path: path.to_path_buf(),
            contigs,
            reader,
        })
    }

    /// Path of the underlying FASTA file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sequences in file order
    pub fn contigs(&self) -> &[ContigInfo] {
        &self.contigs
    }

    /// Find the sequence holding `chrom`: exact name first, then an
    /// equivalent spelling (`chr1` / `1`, `chrM` / `MT`).
    pub fn resolve_contig(&self, chrom: &str) -> Option<&ContigInfo> {
        self.contigs
            .iter()
            .find(|c| c.name == chrom)
            .or_else(|| self.contigs.iter().find(|c| chroms_equivalent(&c.name, chrom)))
    }

    /// Length of the sequence holding `chrom`
    pub fn length(&self, chrom: &str) -> Option<u64> {
        self.resolve_contig(chrom).map(|c| c.length)
    }

    /// Fetch the upper-cased base at a 1-based position
    pub fn fetch_base(&mut self, chrom: &str, pos: u64) -> ReferenceResult<u8> {
        let contig = self
            .resolve_contig(chrom)
            .ok_or_else(|| ReferenceError::ContigNotFound {
                chrom: chrom.to_string(),
                path: self.path.clone(),
            })?
            .clone();

        if pos == 0 || pos > contig.length {
            return Err(ReferenceError::PositionOutOfRange {
                chrom: chrom.to_string(),
                pos,
                length: contig.length,
            });
        }

        let position = usize::try_from(pos)
            .ok()
            .and_then(Position::new)
            .ok_or(ReferenceError::PositionOutOfRange {
                chrom: chrom.to_string(),
                pos,
                length: contig.length,
            })?;

        let region = Region::new(contig.name.as_str(), position..=position);
        let record = self
            .reader
            .query(&region)
            .map_err(|source| ReferenceError::Query {
                chrom: chrom.to_string(),
                pos,
                source,
            })?;

        let sequence: &[u8] = record.sequence().as_ref();
        sequence
            .first()
            .map(u8::to_ascii_uppercase)
            .ok_or(ReferenceError::EmptySequence {
                chrom: chrom.to_string(),
                pos,
            })
    }
}

fn contigs_from_index(index: &fai::Index) -> Vec<ContigInfo> {
    let records: &[fai::Record] = index.as_ref();
    records
        .iter()
        .map(|record| {
            let name: &[u8] = record.name().as_ref();
            ContigInfo {
                name: String::from_utf8_lossy(name).into_owned(),
                length: record.length(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fasta(dir: &Path, file: &str, contents: &str) -> PathBuf {
        let path = dir.join(file);
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_open_lists_contigs() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fasta(dir.path(), "chr1.fa", ">chr1 description\nACGTACGTAC\nGTAC\n");

        let fasta = ChromFasta::open(&path).unwrap();
        assert_eq!(
            fasta.contigs(),
            &[ContigInfo { name: "chr1".to_string(), length: 14 }]
        );
        assert_eq!(fasta.length("chr1"), Some(14));
        assert_eq!(fasta.path(), path.as_path());
    }

    #[test]
    fn test_fetch_base_across_line_wrap() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fasta(dir.path(), "chr1.fa", ">chr1\nACGT\nacgt\nNN\n");

        let mut fasta = ChromFasta::open(&path).unwrap();
        assert_eq!(fasta.fetch_base("chr1", 1).unwrap(), b'A');
        assert_eq!(fasta.fetch_base("chr1", 4).unwrap(), b'T');
        // Soft-masked bases come back upper-cased
        assert_eq!(fasta.fetch_base("chr1", 5).unwrap(), b'A');
        assert_eq!(fasta.fetch_base("chr1", 7).unwrap(), b'G');
        assert_eq!(fasta.fetch_base("chr1", 10).unwrap(), b'N');
    }

    #[test]
    fn test_fetch_base_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fasta(dir.path(), "chr1.fa", ">chr1\nACGT\n");

        let mut fasta = ChromFasta::open(&path).unwrap();
        assert!(matches!(
            fasta.fetch_base("chr1", 5),
            Err(ReferenceError::PositionOutOfRange { length: 4, .. })
        ));
        assert!(matches!(
            fasta.fetch_base("chr1", 0),
            Err(ReferenceError::PositionOutOfRange { pos: 0, .. })
        ));
    }

    #[test]
    fn test_fetch_base_equivalent_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fasta(dir.path(), "chr7.fa", ">7\nTTGCA\n");

        let mut fasta = ChromFasta::open(&path).unwrap();
        assert_eq!(fasta.fetch_base("chr7", 3).unwrap(), b'G');
    }

    #[test]
    fn test_fetch_base_unknown_contig() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fasta(dir.path(), "chr7.fa", ">chr8\nTTGCA\n");

        let mut fasta = ChromFasta::open(&path).unwrap();
        assert!(matches!(
            fasta.fetch_base("chr7", 1),
            Err(ReferenceError::ContigNotFound { .. })
        ));
    }

    #[test]
    fn test_open_missing_file_is_index_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ChromFasta::open(&dir.path().join("nope.fa"));
        assert!(matches!(result, Err(ReferenceError::Index { .. })));
    }
}
