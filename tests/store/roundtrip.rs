use std::collections::HashSet;

use motorwatch::{Article, NewsStore, TaggedArticle};
use tempfile::TempDir;

fn tagged(headline: &str, day: u32, tickers: &[&str]) -> TaggedArticle {
    TaggedArticle {
        article: Article {
            headline: headline.to_string(),
            published_at: crate::common::date(2025, 5, day),
            body: format!("{headline}, in detail."),
            source_url: format!("https://example.com/news-releases/{day}-{headline}.html"),
        },
        tickers: tickers.iter().map(|t| t.to_string()).collect(),
    }
}

#[test]
fn append_then_load_reproduces_rows() {
    let dir = TempDir::new().unwrap();
    let store = NewsStore::new(dir.path().join("news.csv"));

    let rows = vec![
        tagged("Tesla ramps up", 1, &["TSLA"]),
        tagged("Ford and GM announce venture", 2, &["GM", "F"]),
        tagged("Supplier news, no tickers", 3, &[]),
    ];
    store.append(&rows).unwrap();

    let loaded = store.load_all().unwrap();
    assert_eq!(loaded.len(), 3);

    // Order-insensitive comparison on the identifying tuple.
    let expect: HashSet<_> = rows
        .iter()
        .map(|t| {
            (
                t.article.headline.clone(),
                t.article.published_at,
                t.tickers.join(","),
            )
        })
        .collect();
    let got: HashSet<_> = loaded
        .iter()
        .map(|t| {
            (
                t.article.headline.clone(),
                t.article.published_at,
                t.tickers.join(","),
            )
        })
        .collect();
    assert_eq!(expect, got);
}

#[test]
fn second_append_preserves_earlier_rows() {
    let dir = TempDir::new().unwrap();
    let store = NewsStore::new(dir.path().join("news.csv"));

    store.append(&[tagged("First batch", 1, &["F"])]).unwrap();
    store.append(&[tagged("Second batch", 2, &["TSLA"])]).unwrap();

    let loaded = store.load_all().unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].article.headline, "First batch");
    assert_eq!(loaded[1].article.headline, "Second batch");
}

#[test]
fn fields_with_commas_and_newlines_survive() {
    let dir = TempDir::new().unwrap();
    let store = NewsStore::new(dir.path().join("news.csv"));

    let mut row = tagged("Tricky, \"quoted\" headline", 4, &["GM", "F"]);
    row.article.body = "line one\nline two, with comma".to_string();
    store.append(std::slice::from_ref(&row)).unwrap();

    let loaded = store.load_all().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].article.headline, row.article.headline);
    assert_eq!(loaded[0].article.body, row.article.body);
    assert_eq!(loaded[0].tickers, vec!["GM".to_string(), "F".to_string()]);
}

#[test]
fn no_temp_file_is_left_behind() {
    let dir = TempDir::new().unwrap();
    let store = NewsStore::new(dir.path().join("news.csv"));
    store.append(&[tagged("Only row", 5, &[])]).unwrap();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["news.csv".to_string()]);
}
