//! Articles × tickers mention table.

use std::fmt;

use chrono::NaiveDate;

use crate::store::TaggedArticle;
use crate::symbols::SymbolTable;

/// One matrix row: an article and its per-ticker mention flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRow {
    /// Article headline.
    pub headline: String,
    /// Article publication date.
    pub published_at: NaiveDate,
    /// One flag per ticker, in the matrix's ticker order.
    pub cells: Vec<bool>,
}

/// A boolean table of article mentions, one row per article and one column
/// per configured ticker.
///
/// Building it is a pure function of its inputs: identical articles and
/// tickers produce an identical table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionMatrix {
    tickers: Vec<String>,
    rows: Vec<MatrixRow>,
}

impl MentionMatrix {
    /// Builds the table from stored articles and the ticker set.
    pub fn build(articles: &[TaggedArticle], symbols: &SymbolTable) -> Self {
        let tickers = symbols.tickers();
        let rows = articles
            .iter()
            .map(|tagged| MatrixRow {
                headline: tagged.article.headline.clone(),
                published_at: tagged.article.published_at,
                cells: tickers
                    .iter()
                    .map(|t| tagged.tickers.iter().any(|m| m == t))
                    .collect(),
            })
            .collect();
        Self { tickers, rows }
    }

    /// Column headers, in order.
    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    /// Table rows, in article order.
    pub fn rows(&self) -> &[MatrixRow] {
        &self.rows
    }

    /// How many articles mention `ticker`.
    pub fn mention_count(&self, ticker: &str) -> usize {
        let Some(col) = self.tickers.iter().position(|t| t == ticker) else {
            return 0;
        };
        self.rows.iter().filter(|r| r.cells[col]).count()
    }
}

impl fmt::Display for MentionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = 48usize;

        write!(f, "{:<10}  {:<w$}", "date", "headline")?;
        for t in &self.tickers {
            write!(f, "  {t:>5}")?;
        }
        writeln!(f)?;

        for row in &self.rows {
            let mut headline = row.headline.clone();
            if headline.chars().count() > w {
                headline = headline.chars().take(w - 1).collect();
                headline.push('…');
            }
            let date = row.published_at.format("%Y-%m-%d").to_string();
            write!(f, "{date:<10}  {headline:<w$}")?;
            for &cell in &row.cells {
                write!(f, "  {:>5}", if cell { "x" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
