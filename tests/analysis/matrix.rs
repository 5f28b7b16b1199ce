use motorwatch::{Article, MentionMatrix, SymbolTable, TaggedArticle};

fn tagged(headline: &str, tickers: &[&str]) -> TaggedArticle {
    TaggedArticle {
        article: Article {
            headline: headline.to_string(),
            published_at: crate::common::date(2025, 5, 1),
            body: String::new(),
            source_url: format!("https://example.com/{headline}"),
        },
        tickers: tickers.iter().map(|t| t.to_string()).collect(),
    }
}

#[test]
fn one_row_per_article_one_column_per_ticker() {
    let symbols = SymbolTable::automotive();
    let articles = vec![
        tagged("Tesla piece", &["TSLA"]),
        tagged("Joint venture", &["GM", "F"]),
        tagged("Nothing relevant", &[]),
    ];

    let matrix = MentionMatrix::build(&articles, &symbols);

    assert_eq!(matrix.tickers(), ["TSLA", "GM", "F"]);
    assert_eq!(matrix.rows().len(), 3);
    assert_eq!(matrix.rows()[0].cells, vec![true, false, false]);
    assert_eq!(matrix.rows()[1].cells, vec![false, true, true]);
    assert_eq!(matrix.rows()[2].cells, vec![false, false, false]);

    assert_eq!(matrix.mention_count("TSLA"), 1);
    assert_eq!(matrix.mention_count("GM"), 1);
    assert_eq!(matrix.mention_count("F"), 1);
    assert_eq!(matrix.mention_count("UNKNOWN"), 0);
}

#[test]
fn building_twice_is_deterministic() {
    let symbols = SymbolTable::automotive();
    let articles = vec![
        tagged("Tesla piece", &["TSLA"]),
        tagged("Joint venture", &["GM", "F"]),
    ];

    let a = MentionMatrix::build(&articles, &symbols);
    let b = MentionMatrix::build(&articles, &symbols);
    assert_eq!(a, b);
    assert_eq!(a.to_string(), b.to_string());
}

#[test]
fn display_renders_one_line_per_article() {
    let symbols = SymbolTable::automotive();
    let articles = vec![tagged("Tesla piece", &["TSLA"])];
    let rendered = MentionMatrix::build(&articles, &symbols).to_string();

    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 2); // header + one row
    assert!(lines[0].contains("TSLA"));
    assert!(lines[1].contains("Tesla piece"));
    assert!(lines[1].contains('x'));
}
