//! HTML extraction for the news listing and article pages.
//!
//! The listing is parsed from its card grid; when the grid is missing
//! (layout drift) we fall back to scanning release anchors before giving up.

use chrono::NaiveDate;
use scraper::{Html, Selector};
use url::Url;

use crate::core::Error;

/// One card scraped off the listing page, before date filtering.
#[derive(Debug, Clone)]
pub(crate) struct ListingItem {
    pub headline: String,
    pub published_at: Option<NaiveDate>,
    pub url: String,
}

fn selector(css: &str) -> Result<Selector, Error> {
    Selector::parse(css).map_err(|e| Error::Parse(format!("selector `{css}`: {e}")))
}

/// Parse the listing page into article candidates.
///
/// Returns `Error::Parse` when neither the card grid nor any release anchor is
/// present, which indicates the page format changed. An empty card grid is a
/// valid, empty result.
pub(crate) fn parse_listing(html: &str, base: &Url) -> Result<Vec<ListingItem>, Error> {
    let doc = Html::parse_document(html);

    let container_sel = selector("div.row.newsCards")?;
    let card_sel = selector("div.row.newsCards div.card.col-view")?;
    let anchor_sel = selector("a[href*='/news-releases/']")?;
    let h3_sel = selector("h3")?;
    let small_sel = selector("small")?;
    let a_sel = selector("a[href]")?;

    let mut items = Vec::new();
    let mut seen = std::collections::HashSet::new();

    if doc.select(&container_sel).next().is_some() {
        for card in doc.select(&card_sel) {
            let Some(a) = card.select(&a_sel).next() else {
                continue;
            };
            let Some(href) = a.value().attr("href") else {
                continue;
            };
            let Ok(url) = base.join(href.trim()) else {
                continue;
            };

            // Headline lives in the <h3>; its <small> child carries the date.
            let (headline, date_text) = match card.select(&h3_sel).next() {
                Some(h3) => {
                    let full = collapse_ws(&h3.text().collect::<Vec<_>>().join(" "));
                    let small = h3
                        .select(&small_sel)
                        .next()
                        .map(|s| collapse_ws(&s.text().collect::<Vec<_>>().join(" ")));
                    match small {
                        Some(s) if !s.is_empty() => {
                            (collapse_ws(&full.replace(&s, "")), Some(s))
                        }
                        _ => (full, None),
                    }
                }
                None => (
                    collapse_ws(&a.text().collect::<Vec<_>>().join(" ")),
                    None,
                ),
            };

            if headline.is_empty() || !seen.insert(url.to_string()) {
                continue;
            }
            items.push(ListingItem {
                headline,
                published_at: date_text.as_deref().and_then(parse_listing_date),
                url: url.to_string(),
            });
        }
        return Ok(items);
    }

    // Fallback: the grid is gone; treat every release link as a headline-only card.
    for a in doc.select(&anchor_sel) {
        let Some(href) = a.value().attr("href") else {
            continue;
        };
        let Ok(url) = base.join(href.trim()) else {
            continue;
        };
        let headline = collapse_ws(&a.text().collect::<Vec<_>>().join(" "));
        if headline.is_empty() || !seen.insert(url.to_string()) {
            continue;
        }
        items.push(ListingItem {
            headline,
            published_at: None,
            url: url.to_string(),
        });
    }

    if items.is_empty() {
        return Err(Error::Parse(
            "no article blocks found on listing page".into(),
        ));
    }
    Ok(items)
}

/// Extract body text from an article page.
///
/// Tries the known release containers in order, joining their paragraphs;
/// falls back to the container's own text, then the whole document.
pub(crate) fn parse_article_body(html: &str) -> Result<String, Error> {
    let doc = Html::parse_document(html);
    let p_sel = selector("p")?;

    for css in [
        "div.release-body",
        "div.article-body",
        "div.release-content",
        "article",
    ] {
        let container_sel = selector(css)?;
        if let Some(container) = doc.select(&container_sel).next() {
            let paragraphs: Vec<String> = container
                .select(&p_sel)
                .map(|p| collapse_ws(&p.text().collect::<Vec<_>>().join(" ")))
                .filter(|t| !t.is_empty())
                .collect();
            if !paragraphs.is_empty() {
                return Ok(paragraphs.join("\n"));
            }
            let text = collapse_ws(&container.text().collect::<Vec<_>>().join(" "));
            if !text.is_empty() {
                return Ok(text);
            }
        }
    }

    Ok(collapse_ws(
        &doc.root_element().text().collect::<Vec<_>>().join(" "),
    ))
}

/// Parse a listing timestamp such as `May 6, 2025` or `05/06/2025`.
///
/// Same-day items carry a clock time instead of a date; those return `None`
/// and the caller substitutes the run date.
pub(crate) fn parse_listing_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%B %d, %Y")
        .or_else(|_| NaiveDate::parse_from_str(text, "%m/%d/%Y"))
        .ok()
}

fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
