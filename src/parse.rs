//! The parse module turns fetched HTML into a [`Document`] holding readable text.

use anyhow::Result;
use dom_smoothie::{CandidateSelectMode, Config, Readability, TextMode};
use scraper::{Html, Selector as ScraperSelector};
use url::Url;

use crate::{TextBy, document::Document};

/// Extracts a document from the given HTML content.
///
/// # Arguments
///
/// * `url` - The URL the HTML was loaded from
/// * `html` - The HTML content of the webpage
/// * `text_by` - The method to use for text extraction (dom_smoothie or fast_html2md)
/// * `selector` - An optional CSS selector to limit the HTML subset from which content is extracted
///
/// # Errors
///
/// Returns an error if the readability extractor fails to parse the HTML.
pub fn extract_document(
    url: &Url,
    html: &str,
    text_by: &TextBy,
    selector: Option<&ScraperSelector>,
) -> Result<Document> {
    let selected = selector.map(|sel| select_html(html, sel));
    let source = selected.as_deref().unwrap_or(html);

    let (article_title, text) = match text_by {
        TextBy::DomSmoothie => {
            let config = Config {
                text_mode: TextMode::Markdown,
                candidate_select_mode: CandidateSelectMode::DomSmoothie,
                ..Default::default()
            };

            let mut readability = Readability::new(source, Some(url.as_str()), Some(config))?;
            let article = readability.parse()?;
            let title = Some(article.title.trim().to_owned()).filter(|title| !title.is_empty());

            (title, article.text_content.to_string())
        }
        TextBy::FastHtml2Md => (None, html2md::parse_html(source, false)),
    };

    let title = article_title.or_else(|| parse_title(html));
    Ok(Document::new(url.clone(), title, text))
}

/// Joins the outer HTML of every element matching `selector`.
fn select_html(html: &str, selector: &ScraperSelector) -> String {
    Html::parse_document(html)
        .select(selector)
        .map(|element| element.html())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Finds a title in `<title>`, falling back to the first heading.
fn parse_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    ["title", "h1", "h2"].into_iter().find_map(|tag| {
        let selector = ScraperSelector::parse(tag).ok()?;
        let element = document.select(&selector).next()?;
        let text = element
            .text()
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();
        Some(text).filter(|text| !text.is_empty())
    })
}
