//! Plaintext and gzip-compressed file input and output.
//!
//! Genetic maps are often distributed gzip-compressed, and the per-chromosome
//! rate maps can optionally be written compressed too. [`InputFile`] and
//! [`OutputFile`] hide the difference behind a common reader/writer.
//!
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{self, BufWriter};
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileError {
    #[error("IO error: {0}")]
    IOError(#[from] io::Error),
}

/// Check if a file is gzipped by looking for the magic numbers.
///
/// Files shorter than two bytes cannot be gzipped.
fn is_gzipped_file(file_path: &Path) -> io::Result<bool> {
    let mut file = File::open(file_path)?;
    let mut buffer = [0; 2];
    match file.read_exact(&mut buffer) {
        Ok(()) => Ok(buffer == [0x1f, 0x8b]),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e),
    }
}

/// A possibly gzip-compressed input file.
pub struct InputFile {
    pub filepath: PathBuf,
}

impl InputFile {
    /// Constructs a new `InputFile`. Compression is detected from the file
    /// contents, not the extension.
    pub fn new(filepath: impl AsRef<Path>) -> Self {
        Self {
            filepath: filepath.as_ref().to_path_buf(),
        }
    }

    /// Opens the file and returns a buffered reader.
    ///
    /// If the file starts with the gzip magic number, this method will
    /// decompress it on the fly, whatever the extension.
    ///
    /// # Returns
    ///
    /// A result containing a `BufReader<Box<dyn Read>>` on success, or a
    /// `FileError` if the file cannot be opened.
    pub fn reader(&self) -> Result<BufReader<Box<dyn Read>>, FileError> {
        let file = File::open(&self.filepath)?;
        let reader: Box<dyn Read> = if is_gzipped_file(&self.filepath)? {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        };
        Ok(BufReader::new(reader))
    }
}

/// An output file, gzip-compressed when the path ends in `.gz`.
pub struct OutputFile {
    pub filepath: PathBuf,
}

impl OutputFile {
    pub fn new(filepath: impl AsRef<Path>) -> Self {
        Self {
            filepath: filepath.as_ref().to_path_buf(),
        }
    }

    fn is_gzip(&self) -> bool {
        self.filepath
            .extension()
            .map_or(false, |ext| ext == "gz")
    }

    /// Creates the file and returns a buffered writer.
    ///
    /// An existing file is truncated. If the path ends with `.gz`, everything
    /// written is gzip-compressed; the gzip stream is finished when the writer
    /// is dropped.
    ///
    /// # Returns
    ///
    /// A result containing a `Box<dyn Write>` on success, or a `FileError` if
    /// the file cannot be created.
    pub fn writer(&self) -> Result<Box<dyn Write>, FileError> {
        let file = File::create(&self.filepath)?;
        let writer: Box<dyn Write> = if self.is_gzip() {
            Box::new(BufWriter::new(GzEncoder::new(file, Compression::default())))
        } else {
            Box::new(BufWriter::new(file))
        };
        Ok(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_gzip_roundtrip_detected_by_magic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("map.tsv.gz");
        {
            let mut writer = OutputFile::new(&path).writer().unwrap();
            writeln!(writer, "chr\tpos").unwrap();
            writeln!(writer, "1\t10").unwrap();
        }
        let mut magic = [0u8; 2];
        File::open(&path).unwrap().read_exact(&mut magic).unwrap();
        assert_eq!(magic, [0x1f, 0x8b]);

        let input = InputFile::new(&path);
        let mut contents = String::new();
        input.reader().unwrap().read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "chr\tpos\n1\t10\n");
    }

    #[test]
    fn test_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.tsv");
        File::create(&path).unwrap();
        assert!(!is_gzipped_file(&path).unwrap());

        let mut contents = String::new();
        InputFile::new(&path)
            .reader()
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert!(contents.is_empty());
    }
}
