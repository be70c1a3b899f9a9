use scraper::{Html, Selector};

use crate::core::SearchError;

/// Organic results on the text-mode markup are redirect-wrapper hrefs with
/// this prefix; navigation, settings, and ad anchors are not.
pub const RESULT_LINK_PREFIX: &str = "/url?q=https://";

/// Harvest the ranked result links from a results page, in document order.
///
/// Duplicates are preserved — the same domain at several ranks (sitelinks)
/// is real ranking data. A document with no anchors at all is a parse or
/// bot-challenge failure and surfaces as [`SearchError::EmptyResultSet`];
/// anchors present but none matching the wrapper prefix is a valid empty
/// ranked list.
pub fn extract_result_links(html: &str) -> Result<Vec<String>, SearchError> {
    let doc = Html::parse_document(html);
    let anchor_sel = Selector::parse("a[href]").unwrap();

    let mut anchors = 0usize;
    let mut links = Vec::new();
    for anchor in doc.select(&anchor_sel) {
        anchors += 1;
        let href = anchor.value().attr("href").unwrap_or("");
        if href.starts_with(RESULT_LINK_PREFIX) {
            links.push(href.to_string());
        }
    }

    if anchors == 0 {
        return Err(SearchError::EmptyResultSet);
    }
    Ok(links)
}
