use motorwatch::{Error, NewsStore};
use tempfile::TempDir;

#[test]
fn missing_file_is_a_store_read_error() {
    let dir = TempDir::new().unwrap();
    let store = NewsStore::new(dir.path().join("absent.csv"));
    assert!(matches!(store.load_all(), Err(Error::StoreRead(_))));
}

#[test]
fn wrong_header_is_a_store_read_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("news.csv");
    std::fs::write(&path, "title,when,text\nfoo,2025-05-01,bar\n").unwrap();

    let store = NewsStore::new(&path);
    assert!(matches!(store.load_all(), Err(Error::StoreRead(_))));
}

#[test]
fn appending_onto_a_wrong_header_is_refused() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("news.csv");
    std::fs::write(&path, "title,when,text\n").unwrap();

    let store = NewsStore::new(&path);
    let result = store.append(&[]);
    assert!(matches!(result, Err(Error::StoreRead(_))));
    // The original file is untouched.
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "title,when,text\n"
    );
}

#[test]
fn malformed_rows_are_skipped_and_the_rest_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("news.csv");
    std::fs::write(
        &path,
        "headline,published_at,body,source_url,matched_tickers\n\
         Good row,2025-05-01,Body text,https://example.com/a,TSLA\n\
         Short row,2025-05-02,missing-columns\n\
         Bad date,not-a-date,Body,https://example.com/b,F\n\
         Another good row,2025-05-03,More body,https://example.com/c,\n",
    )
    .unwrap();

    let store = NewsStore::new(&path);
    let loaded = store.load_all().unwrap();

    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].article.headline, "Good row");
    assert_eq!(loaded[0].tickers, vec!["TSLA".to_string()]);
    assert_eq!(loaded[1].article.headline, "Another good row");
    assert!(loaded[1].tickers.is_empty());
}
