/// Whole-file loading into NUL-terminated buffers
///
/// The native correlation library takes C strings, so every corpus carries a
/// trailing NUL byte after the file contents. The contents themselves are
/// never interpreted here.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use libc::c_char;
use log::debug;

use crate::error::{Result, SentimentError};

/// Full contents of one input file, owned until the correlation call returns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    /// Source file of the buffer
    path: PathBuf,
    /// File bytes followed by a single NUL terminator
    bytes: Vec<u8>,
}

impl Corpus {
    /// Wrap already loaded bytes, appending the terminator
    pub fn from_bytes(path: impl Into<PathBuf>, contents: &[u8]) -> Self {
        let mut bytes = Vec::with_capacity(contents.len() + 1);
        bytes.extend_from_slice(contents);
        bytes.push(0);
        Self { path: path.into(), bytes }
    }

    /// The file contents, without the terminator
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.bytes.len() - 1]
    }

    /// Pointer to the NUL-terminated contents for the foreign call
    pub fn as_c_ptr(&self) -> *const c_char {
        self.bytes.as_ptr() as *const c_char
    }

    /// Number of file bytes held
    pub fn len(&self) -> usize {
        self.bytes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Read a file completely into a new corpus buffer.
///
/// # Arguments
///
/// * `path` - Path to the file
///
/// # Returns
///
/// The corpus, or `FileNotFound`, `Io`, `OutOfMemory` or `TruncatedRead`
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Corpus> {
    let path = path.as_ref();

    // Dropped on every return below
    let file = File::open(path).map_err(|e| SentimentError::from_io(path, e))?;

    let metadata = file.metadata().map_err(|e| SentimentError::from_io(path, e))?;
    if metadata.is_dir() {
        return Err(SentimentError::Io {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::Other, "is a directory"),
        });
    }

    let corpus = read_corpus(file, path, metadata.len())?;
    debug!("Loaded {} ({} bytes)", path.display(), corpus.len());

    Ok(corpus)
}

/// Read exactly `expected` bytes from `reader` into a NUL-terminated buffer.
///
/// Zero bytes expected means no read at all. Fewer bytes than expected is a
/// `TruncatedRead`; a length that cannot be allocated is `OutOfMemory`.
pub fn read_corpus<R: Read>(reader: R, path: &Path, expected: u64) -> Result<Corpus> {
    let out_of_memory = || SentimentError::OutOfMemory {
        path: path.to_path_buf(),
        requested: expected.saturating_add(1),
    };
    let capacity = usize::try_from(expected)
        .ok()
        .and_then(|len| len.checked_add(1))
        .ok_or_else(out_of_memory)?;

    let mut bytes = Vec::new();
    bytes.try_reserve_exact(capacity).map_err(|_| out_of_memory())?;

    if expected > 0 {
        let actual = reader
            .take(expected)
            .read_to_end(&mut bytes)
            .map_err(|e| SentimentError::from_io(path, e))? as u64;

        if actual < expected {
            return Err(SentimentError::TruncatedRead {
                path: path.to_path_buf(),
                expected,
                actual,
            });
        }
    }

    bytes.push(0);

    Ok(Corpus {
        path: path.to_path_buf(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    #[test]
    fn test_load_matches_file_bytes() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("ether-tweets");
        let contents = b"{\"text\":\"eth to the moon\",\"time\":1514764800000}\n\xff\x00binary";
        std::fs::write(&path, contents).expect("Failed to write file");

        let corpus = load_corpus(&path).expect("Failed to load corpus");
        assert_eq!(corpus.len(), contents.len());
        assert_eq!(corpus.as_bytes(), &contents[..]);
        assert_eq!(corpus.path(), path.as_path());
    }

    #[test]
    fn test_buffer_is_nul_terminated() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("eth-price.csv");
        std::fs::write(&path, "time,usd\n").expect("Failed to write file");

        let corpus = load_corpus(&path).expect("Failed to load corpus");
        let c_str = unsafe { CStr::from_ptr(corpus.as_c_ptr()) };
        assert_eq!(c_str.to_bytes(), b"time,usd\n");
    }

    #[test]
    fn test_empty_file_yields_empty_corpus() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("empty");
        std::fs::write(&path, "").expect("Failed to write file");

        let corpus = load_corpus(&path).expect("Empty file should load");
        assert!(corpus.is_empty());
        assert_eq!(corpus.as_bytes(), b"");
        let c_str = unsafe { CStr::from_ptr(corpus.as_c_ptr()) };
        assert!(c_str.to_bytes().is_empty());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let err = load_corpus(dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, SentimentError::FileNotFound { .. }));
    }

    #[test]
    fn test_short_reader_is_truncated_read() {
        let err = read_corpus(&b"abc"[..], Path::new("short"), 10).unwrap_err();
        match err {
            SentimentError::TruncatedRead { expected, actual, .. } => {
                assert_eq!(expected, 10);
                assert_eq!(actual, 3);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_reader_longer_than_expected_is_cut() {
        let corpus = read_corpus(&b"abcdef"[..], Path::new("long"), 4).expect("Read should succeed");
        assert_eq!(corpus.as_bytes(), b"abcd");
    }

    #[test]
    fn test_unallocatable_length_is_out_of_memory() {
        let err = read_corpus(io::empty(), Path::new("huge"), u64::MAX).unwrap_err();
        assert!(matches!(err, SentimentError::OutOfMemory { .. }));
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn test_zero_length_skips_read() {
        struct FailingReader;
        impl Read for FailingReader {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "read attempted"))
            }
        }

        let corpus = read_corpus(FailingReader, Path::new("empty"), 0).expect("No read expected");
        assert!(corpus.is_empty());
    }

    #[test]
    fn test_read_error_is_io() {
        struct FailingReader;
        impl Read for FailingReader {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "device gone"))
            }
        }

        let err = read_corpus(FailingReader, Path::new("flaky"), 8).unwrap_err();
        assert!(matches!(err, SentimentError::Io { .. }));
    }

    #[test]
    fn test_directory_is_io_error() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let err = load_corpus(dir.path()).unwrap_err();
        assert!(matches!(err, SentimentError::Io { .. }), "unexpected error: {}", err);
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_from_bytes_appends_terminator() {
        let corpus = Corpus::from_bytes("mem", b"abc");
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.as_bytes(), b"abc");
    }
}
