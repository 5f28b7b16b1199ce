//! Ticker/alias table and the alias matcher.
//!
//! The table is explicit configuration passed into the matcher and the
//! pipeline; nothing here is global, so tests can swap the ticker set freely.

use regex::Regex;

use crate::core::Error;

/// One ticker and the text aliases that count as a mention of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    /// Exchange symbol, e.g. `TSLA`.
    pub ticker: String,
    /// Aliases matched against article text.
    pub aliases: Vec<String>,
}

/// Ordered ticker → aliases table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    entries: Vec<SymbolEntry>,
}

impl SymbolTable {
    /// Builds a table from explicit entries.
    pub fn new(entries: Vec<SymbolEntry>) -> Self {
        Self { entries }
    }

    /// The default automotive set: TSLA, GM and F with their common aliases.
    pub fn automotive() -> Self {
        Self::new(vec![
            SymbolEntry {
                ticker: "TSLA".into(),
                aliases: vec![
                    "TSLA".into(),
                    "Tesla".into(),
                    "NYSE: TSLA".into(),
                    "Nasdaq: TSLA".into(),
                ],
            },
            SymbolEntry {
                ticker: "GM".into(),
                aliases: vec!["GM".into(), "General Motors".into(), "NYSE: GM".into()],
            },
            SymbolEntry {
                ticker: "F".into(),
                aliases: vec!["F".into(), "Ford".into(), "NYSE: F".into()],
            },
        ])
    }

    /// Builds a table for an arbitrary ticker list. Tickers present in the
    /// default automotive set keep their aliases; others match on the bare
    /// symbol only.
    pub fn from_tickers<I, S>(tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let defaults = Self::automotive();
        let entries = tickers
            .into_iter()
            .map(|t| {
                let ticker = t.as_ref().trim().to_uppercase();
                defaults
                    .entries
                    .iter()
                    .find(|e| e.ticker == ticker)
                    .cloned()
                    .unwrap_or_else(|| SymbolEntry {
                        aliases: vec![ticker.clone()],
                        ticker,
                    })
            })
            .filter(|e| !e.ticker.is_empty())
            .collect();
        Self::new(entries)
    }

    /// Tickers in table order.
    pub fn tickers(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.ticker.clone()).collect()
    }

    pub(crate) fn entries(&self) -> &[SymbolEntry] {
        &self.entries
    }

    /// Number of tickers in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no tickers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Matches article text against a [`SymbolTable`].
///
/// Each alias compiles to a case-insensitive, word-bounded pattern, so the
/// alias `GM` fires on "GM recalls…" but not inside "flagman" or
/// "Generally Motivated".
pub struct SymbolMatcher {
    compiled: Vec<(String, Vec<Regex>)>,
}

impl SymbolMatcher {
    /// Precompiles the alias patterns for a table.
    pub fn new(table: &SymbolTable) -> Result<Self, Error> {
        let mut compiled = Vec::with_capacity(table.len());
        for entry in table.entries() {
            let mut patterns = Vec::with_capacity(entry.aliases.len());
            for alias in &entry.aliases {
                let pattern = format!(r"(?i)\b{}\b", regex::escape(alias));
                patterns.push(Regex::new(&pattern)?);
            }
            compiled.push((entry.ticker.clone(), patterns));
        }
        Ok(Self { compiled })
    }

    /// Tickers whose aliases appear in `text`, in table order, deduplicated.
    pub fn matches(&self, text: &str) -> Vec<String> {
        self.compiled
            .iter()
            .filter(|(_, patterns)| patterns.iter().any(|p| p.is_match(text)))
            .map(|(ticker, _)| ticker.clone())
            .collect()
    }

    /// Matches the concatenation of an article's headline and body.
    pub fn match_article(&self, article: &crate::news::Article) -> Vec<String> {
        let text = format!("{}\n{}", article.headline, article.body);
        self.matches(&text)
    }
}
