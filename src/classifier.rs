use scraper::{Html, Selector};
use crate::models::CompanyStatus;

const BOT_CHALLENGE_MARKER: &str = "verify you are human";

const NOT_FOUND_TITLES: &[&str] = &["404", "page not found", "not found"];

const NOT_FOUND_PHRASES: &[&str] = &["company not found", "we can't find this company"];

const NO_RESULTS_PHRASES: &[&str] = &[
    "no jobs",
    "no job",
    "no open jobs",
    "no openings",
    "no results",
    "did not match any jobs",
    "we couldn't find any jobs",
    "this company doesn't have any jobs",
    "currently, there are no jobs",
];

pub fn is_bot_challenge(html: &str) -> bool {
    html.to_lowercase().contains(BOT_CHALLENGE_MARKER)
}

/// Text of the first `<title>` element, empty when absent.
pub fn page_title(document: &Html) -> String {
    let selector = Selector::parse("title").unwrap();
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default()
}

/// Every text node under `<body>`, joined by spaces.
pub fn body_text(document: &Html) -> String {
    let selector = Selector::parse("body").unwrap();
    document
        .select(&selector)
        .flat_map(|body| body.text())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Explains why a first page came back without job cards. `None` means the
/// page gave no recognizable hint.
pub fn classify_empty_page(html: &str, title_text: &str) -> Option<CompanyStatus> {
    let title = title_text.to_lowercase();
    let body = body_text(&Html::parse_document(html)).to_lowercase();

    if NOT_FOUND_TITLES.iter().any(|t| title.contains(t))
        || NOT_FOUND_PHRASES.iter().any(|p| body.contains(p))
    {
        return Some(CompanyStatus::NotFound);
    }

    if NO_RESULTS_PHRASES.iter().any(|p| body.contains(p)) {
        return Some(CompanyStatus::NoJobs);
    }

    None
}
