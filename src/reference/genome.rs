//! Reference genome directory
//!
//! A directory of per-chromosome FASTA files. Files are opened the first
//! time a chromosome is queried and kept open for the rest of the run.

use super::fasta::ChromFasta;
use crate::core::{fasta_file_candidates, InputError, InputResult, ReferenceError, ReferenceResult};
use log::debug;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Cached outcome of locating a chromosome's FASTA file
#[derive(Debug)]
enum ChromEntry {
    /// File found and indexed
    Loaded(ChromFasta),
    /// No candidate file exists; holds the primary candidate path
    Missing(PathBuf),
    /// File exists but could not be indexed
    Broken { path: PathBuf, message: String },
}

/// Per-chromosome reference genome backed by a directory of FASTA files
#[derive(Debug)]
pub struct ReferenceGenome {
    dir: PathBuf,
    chroms: HashMap<String, ChromEntry>,
}

impl ReferenceGenome {
    /// Open a reference directory
    pub fn open<P: AsRef<Path>>(dir: P) -> InputResult<Self> {
        let dir = dir.as_ref();
        if !dir.exists() {
            return Err(InputError::ReferenceDirNotFound(dir.to_path_buf()));
        }
        if !dir.is_dir() {
            return Err(InputError::NotADirectory(dir.to_path_buf()));
        }

        Ok(Self {
            dir: dir.to_path_buf(),
            chroms: HashMap::new(),
        })
    }

    /// Reference directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Chromosomes whose FASTA file has been opened so far
    pub fn loaded_chromosomes(&self) -> Vec<&str> {
        let mut loaded: Vec<&str> = self
            .chroms
            .iter()
            .filter(|(_, entry)| matches!(entry, ChromEntry::Loaded(_)))
            .map(|(chrom, _)| chrom.as_str())
            .collect();
        loaded.sort_unstable();
        loaded
    }

    fn entry(&mut self, chrom: &str) -> &mut ChromEntry {
        let dir = &self.dir;
        self.chroms
            .entry(chrom.to_string())
            .or_insert_with(|| Self::locate(dir, chrom))
    }

    fn locate(dir: &Path, chrom: &str) -> ChromEntry {
        let candidates = fasta_file_candidates(dir, chrom);
        let Some(path) = candidates.iter().find(|p| p.is_file()) else {
            return ChromEntry::Missing(candidates[0].clone());
        };

        match ChromFasta::open(path) {
            Ok(fasta) => {
                debug!("Opened reference for {}: {}", chrom, path.display());
                ChromEntry::Loaded(fasta)
            }
            Err(e) => ChromEntry::Broken {
                path: path.clone(),
                message: match e {
                    ReferenceError::Index { message, .. } => message,
                    other => other.to_string(),
                },
            },
        }
    }

    /// Fetch the upper-cased base at a 1-based position on `chrom`
    pub fn fetch_base(&mut self, chrom: &str, pos: u64) -> ReferenceResult<u8> {
        match self.entry(chrom) {
            ChromEntry::Loaded(fasta) => fasta.fetch_base(chrom, pos),
            ChromEntry::Missing(path) => Err(ReferenceError::FastaNotFound {
                chrom: chrom.to_string(),
                path: path.clone(),
            }),
            ChromEntry::Broken { path, message } => Err(ReferenceError::Index {
                path: path.clone(),
                message: message.clone(),
            }),
        }
    }

    /// Length of `chrom` in its FASTA file, if the file exists and holds it
    pub fn length(&mut self, chrom: &str) -> Option<u64> {
        match self.entry(chrom) {
            ChromEntry::Loaded(fasta) => fasta.length(chrom),
            _ => None,
        }
    }
}
