/// Descriptor accounting for the loader
///
/// Kept in its own test binary with a single test so no other test opens
/// files while descriptors are being counted.

#[cfg(target_os = "linux")]
fn open_descriptors() -> usize {
    std::fs::read_dir("/proc/self/fd")
        .expect("Failed to list /proc/self/fd")
        .count()
}

#[cfg(target_os = "linux")]
#[test]
fn test_loader_releases_descriptors_on_every_path() {
    use sentiments::{load_corpus, SentimentError};

    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let present = temp_dir.path().join("present");
    let empty = temp_dir.path().join("empty");
    std::fs::write(&present, "some bytes").expect("Failed to write file");
    std::fs::write(&empty, "").expect("Failed to write file");

    let before = open_descriptors();

    let err = load_corpus(temp_dir.path().join("missing")).unwrap_err();
    assert!(matches!(err, SentimentError::FileNotFound { .. }));
    assert_eq!(open_descriptors(), before);

    let err = load_corpus(temp_dir.path()).unwrap_err();
    assert!(matches!(err, SentimentError::Io { .. }));
    assert_eq!(open_descriptors(), before);

    let corpus = load_corpus(&present).expect("File should load");
    assert_eq!(corpus.as_bytes(), b"some bytes");
    assert_eq!(open_descriptors(), before);

    let corpus = load_corpus(&empty).expect("Empty file should load");
    assert!(corpus.is_empty());
    assert_eq!(open_descriptors(), before);
}
