//! Loading the indexer from `textindex.toml`

use crate::common::*;
use tempfile::TempDir;
use textindex::CONFIG_FILE_NAME;

#[test]
fn test_indexer_from_default_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    IndexerConfig::write_default_if_missing(&path).unwrap();

    let config = IndexerConfig::from_file(&path).unwrap();
    let indexer = InMemoryIndexer::with_config(config).unwrap();
    assert_eq!(indexer.config(), &IndexerConfig::default());
}

#[test]
fn test_document_limit_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "batch_size = 2\nmax_documents = 3\n").unwrap();

    let indexer = InMemoryIndexer::with_config(IndexerConfig::from_file(&path).unwrap()).unwrap();
    let ids: Vec<LinkId> = (0..3)
        .map(|i| index(&indexer, page(&format!("p{}", i), "limited", 0.0)))
        .collect();

    let err = indexer.index(&mut page("overflow", "limited", 0.0)).unwrap_err();
    assert!(matches!(err, Error::Backend { op: "index", .. }));

    // Existing documents can still be re-indexed and re-scored
    let mut again = Document::new(ids[0]).with_content("limited again");
    indexer.index(&mut again).unwrap();
    indexer.update_score(ids[1], 1.0).unwrap();
    assert_eq!(indexer.len(), 3);

    // A placeholder for an unseen link counts against the limit too
    assert!(indexer.update_score(LinkId::new(), 1.0).is_err());
}

#[test]
fn test_invalid_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "[scoring]\nb = 2.0\n").unwrap();

    let err = IndexerConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
}
