//! I/O helpers
//!
//! Compression-aware input and output streams plus a line iterator that
//! reuses its buffer.

use flate2::write::GzEncoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Default buffer size for readers and writers (128KB)
pub const DEFAULT_BUFFER_SIZE: usize = 128 * 1024;

/// Compression format of an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    /// Plain text (uncompressed)
    Plain,
    /// Gzip compressed (.gz)
    Gzip,
    /// Bzip2 compressed (.bz2)
    Bzip2,
}

/// Detect compression format from file path and/or content
///
/// Extension wins; otherwise gzip magic (1f 8b) or bzip2 magic ("BZh").
pub fn detect_compression(path: &Path) -> io::Result<CompressionFormat> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    if extension == "gz" {
        return Ok(CompressionFormat::Gzip);
    }
    if extension == "bz2" {
        return Ok(CompressionFormat::Bzip2);
    }

    let mut file = File::open(path)?;
    let mut magic = [0u8; 3];
    let bytes_read = file.read(&mut magic)?;

    if bytes_read >= 2 && magic[0] == 0x1f && magic[1] == 0x8b {
        return Ok(CompressionFormat::Gzip);
    }
    if bytes_read >= 3 && magic[0] == 0x42 && magic[1] == 0x5a && magic[2] == 0x68 {
        return Ok(CompressionFormat::Bzip2);
    }

    Ok(CompressionFormat::Plain)
}

/// Open an input file, decompressing on the fly when needed
pub fn open_input(path: &Path) -> io::Result<Box<dyn BufRead>> {
    let format = detect_compression(path)?;
    let file = File::open(path)?;

    let reader: Box<dyn BufRead> = match format {
        CompressionFormat::Gzip => {
            let decoder = flate2::read::MultiGzDecoder::new(file);
            Box::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, decoder))
        }
        CompressionFormat::Bzip2 => {
            let decoder = bzip2::read::MultiBzDecoder::new(file);
            Box::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, decoder))
        }
        CompressionFormat::Plain => Box::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file)),
    };

    Ok(reader)
}

/// Create an output file; a `.gz` path gets gzip compression
pub fn create_output(path: &Path) -> io::Result<Box<dyn Write>> {
    let file = File::create(path)?;
    let is_gz = path.extension().and_then(|e| e.to_str()) == Some("gz");

    let writer: Box<dyn Write> = if is_gz {
        let encoder = GzEncoder::new(file, flate2::Compression::default());
        Box::new(BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, encoder))
    } else {
        Box::new(BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file))
    };

    Ok(writer)
}

/// Line iterator that reuses a buffer to avoid allocations
pub struct LineIterator<R: BufRead> {
    reader: R,
    buffer: String,
    line_number: usize,
}

impl<R: BufRead> LineIterator<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::with_capacity(1024),
            line_number: 0,
        }
    }

    /// Read the next line into the internal buffer
    /// Returns None at EOF, Some(Ok(&str)) on success, Some(Err) on error
    pub fn next_line(&mut self) -> Option<io::Result<&str>> {
        self.buffer.clear();
        match self.reader.read_line(&mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                self.line_number += 1;
                if self.buffer.ends_with('\n') {
                    self.buffer.pop();
                    if self.buffer.ends_with('\r') {
                        self.buffer.pop();
                    }
                }
                Some(Ok(&self.buffer))
            }
            Err(e) => Some(Err(e)),
        }
    }

    /// 1-based number of the line last returned (0 before the first read)
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_detect_plain() -> io::Result<()> {
        let mut temp = NamedTempFile::new()?;
        writeln!(temp, "#CHROM\tPOS")?;
        temp.flush()?;
        assert_eq!(detect_compression(temp.path())?, CompressionFormat::Plain);
        Ok(())
    }

    #[test]
    fn test_detect_gzip_by_magic() -> io::Result<()> {
        let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(b"#CHROM\n")?;
        let bytes = encoder.finish()?;

        let mut temp = NamedTempFile::new()?;
        temp.write_all(&bytes)?;
        temp.flush()?;
        assert_eq!(detect_compression(temp.path())?, CompressionFormat::Gzip);
        Ok(())
    }

    #[test]
    fn test_open_input_gzip_roundtrip() -> io::Result<()> {
        let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(b"line1\nline2\n")?;
        let bytes = encoder.finish()?;

        let mut temp = tempfile::Builder::new().suffix(".gz").tempfile()?;
        temp.write_all(&bytes)?;
        temp.flush()?;

        let mut iter = LineIterator::new(open_input(temp.path())?);
        assert_eq!(iter.next_line().unwrap()?, "line1");
        assert_eq!(iter.next_line().unwrap()?, "line2");
        assert!(iter.next_line().is_none());
        Ok(())
    }

    #[test]
    fn test_open_input_bzip2_by_magic() -> io::Result<()> {
        let mut encoder = bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
        encoder.write_all(b"#CHROM\tPOS\nchr1\t10\n")?;
        let bytes = encoder.finish()?;

        let mut temp = NamedTempFile::new()?;
        temp.write_all(&bytes)?;
        temp.flush()?;

        assert_eq!(detect_compression(temp.path())?, CompressionFormat::Bzip2);
        let mut iter = LineIterator::new(open_input(temp.path())?);
        assert_eq!(iter.next_line().unwrap()?, "#CHROM\tPOS");
        assert_eq!(iter.next_line().unwrap()?, "chr1\t10");
        assert!(iter.next_line().is_none());
        Ok(())
    }

    #[test]
    fn test_create_output_gz() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.tsv.gz");
        {
            let mut out = create_output(&path)?;
            writeln!(out, "hello")?;
            out.flush()?;
        }
        let mut iter = LineIterator::new(open_input(&path)?);
        assert_eq!(iter.next_line().unwrap()?, "hello");
        Ok(())
    }

    #[test]
    fn test_line_iterator_crlf_and_numbers() -> io::Result<()> {
        let data: &[u8] = b"a\r\nb\nc";
        let mut iter = LineIterator::new(data);

        assert_eq!(iter.line_number(), 0);
        assert_eq!(iter.next_line().unwrap()?, "a");
        assert_eq!(iter.next_line().unwrap()?, "b");
        assert_eq!(iter.next_line().unwrap()?, "c");
        assert_eq!(iter.line_number(), 3);
        assert!(iter.next_line().is_none());
        Ok(())
    }
}
