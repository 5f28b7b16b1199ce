//! Flat-file news store.
//!
//! The store is the hand-off artifact between the scrape phase and the
//! analysis phase: one CSV with a fixed header, one row per article, the
//! matched tickers comma-joined in the last column.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::core::Error;
use crate::news::Article;

/// An article plus the tickers its text mentions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedArticle {
    /// The underlying article record.
    pub article: Article,
    /// Matched tickers in symbol-table order; may be empty.
    pub tickers: Vec<String>,
}

const HEADER: [&str; 5] = [
    "headline",
    "published_at",
    "body",
    "source_url",
    "matched_tickers",
];

/// CSV-backed article store with atomic appends.
#[derive(Debug, Clone)]
pub struct NewsStore {
    path: PathBuf,
}

impl NewsStore {
    /// Creates a store handle for `path`. The file is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends rows to the store without corrupting existing ones.
    ///
    /// Existing file content is copied verbatim to a sibling temp file, the
    /// new rows are serialized after it, and the temp file is renamed over the
    /// store. An interrupted append leaves the previous file intact.
    ///
    /// # Errors
    ///
    /// Returns `Error::StoreRead` when an existing file carries the wrong
    /// header (appending to it would mix schemas), or an I/O/CSV error when
    /// writing fails.
    pub fn append(&self, articles: &[TaggedArticle]) -> Result<(), Error> {
        let mut out = String::new();

        if self.path.exists() {
            let existing = std::fs::read_to_string(&self.path)?;
            let first_line = existing.lines().next().unwrap_or("");
            if first_line != HEADER.join(",") {
                return Err(Error::StoreRead(format!(
                    "unexpected header in {}: `{first_line}`",
                    self.path.display()
                )));
            }
            out.push_str(existing.trim_end_matches('\n'));
            out.push('\n');
        } else {
            out.push_str(&HEADER.join(","));
            out.push('\n');
        }

        out.push_str(&serialize_rows(articles)?);

        let tmp = self.path.with_extension("csv.tmp");
        std::fs::write(&tmp, &out)?;
        std::fs::rename(&tmp, &self.path)?;

        info!(rows = articles.len(), path = %self.path.display(), "appended to news store");
        Ok(())
    }

    /// Loads every stored article.
    ///
    /// A malformed row (wrong column count, unparsable date) is skipped with a
    /// warning; the rest of the file still loads.
    ///
    /// # Errors
    ///
    /// Returns `Error::StoreRead` when the file is missing or the header does
    /// not match the store schema.
    pub fn load_all(&self) -> Result<Vec<TaggedArticle>, Error> {
        if !self.path.exists() {
            return Err(Error::StoreRead(format!(
                "{} does not exist",
                self.path.display()
            )));
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)?;

        let headers = reader.headers()?.clone();
        if headers.iter().collect::<Vec<_>>() != HEADER {
            return Err(Error::StoreRead(format!(
                "unexpected header in {}",
                self.path.display()
            )));
        }

        let mut rows = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let line = idx + 2; // 1-based, after the header
            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    warn!(line, error = %e, "skipping unreadable store row");
                    continue;
                }
            };
            if record.len() != HEADER.len() {
                warn!(line, fields = record.len(), "skipping row with wrong column count");
                continue;
            }
            let published_at = match NaiveDate::parse_from_str(&record[1], "%Y-%m-%d") {
                Ok(d) => d,
                Err(e) => {
                    warn!(line, value = &record[1], error = %e, "skipping row with bad date");
                    continue;
                }
            };

            rows.push(TaggedArticle {
                article: Article {
                    headline: record[0].to_string(),
                    published_at,
                    body: record[2].to_string(),
                    source_url: record[3].to_string(),
                },
                tickers: record[4]
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect(),
            });
        }
        Ok(rows)
    }
}

fn serialize_rows(articles: &[TaggedArticle]) -> Result<String, Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    for tagged in articles {
        let published_at = tagged.article.published_at.format("%Y-%m-%d").to_string();
        let tickers = tagged.tickers.join(",");
        wtr.write_record([
            tagged.article.headline.as_str(),
            published_at.as_str(),
            tagged.article.body.as_str(),
            tagged.article.source_url.as_str(),
            tickers.as_str(),
        ])?;
    }
    wtr.flush()?;
    let buf = wtr
        .into_inner()
        .map_err(|e| Error::Io(std::io::Error::other(e.to_string())))?;
    String::from_utf8(buf).map_err(|e| Error::StoreRead(format!("non-UTF-8 store row: {e}")))
}
