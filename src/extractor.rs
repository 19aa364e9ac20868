use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;
use crate::models::JobRecord;

#[derive(Debug, Clone, Copy)]
enum Pick {
    /// Text nodes directly under the matched element.
    OwnText,
    Attr(&'static str),
}

// Every card selector contributes matches; duplicates fall out by URL.
const CARD_SELECTORS: &[&str] = &[
    "li[data-testid='cmpJobListItem']",
    "div.job_seen_beacon",
    "div[data-testid='jobCard']",
    "a.tapItem",
];

// Ordered most specific first; the first non-empty value wins.
const TITLE_RULES: &[(&str, Pick)] = &[
    ("[data-testid='jobTitle']", Pick::OwnText),
    ("h2.jobTitle span", Pick::OwnText),
    ("a[aria-label]", Pick::Attr("aria-label")),
    ("a[title]", Pick::Attr("title")),
];

const HREF_RULES: &[(&str, Pick)] = &[
    ("a[href*='/viewjob']", Pick::Attr("href")),
    ("a.tapItem", Pick::Attr("href")),
    ("a", Pick::Attr("href")),
];

const LOCATION_RULES: &[(&str, Pick)] = &[
    ("[data-testid='text-location']", Pick::OwnText),
    ("div.companyLocation", Pick::OwnText),
];

const NEXT_PAGE_RULES: &[(&str, Pick)] = &[
    ("a[aria-label='Next']", Pick::Attr("href")),
    ("a[data-testid='pagination-page-next']", Pick::Attr("href")),
];

struct Rule {
    selector: Selector,
    pick: Pick,
}

impl Rule {
    /// First non-empty value among the element itself and its descendants.
    fn first_value(&self, scope: ElementRef) -> Option<String> {
        let own = Some(scope).filter(|el| self.selector.matches(el));
        own.into_iter()
            .chain(scope.select(&self.selector))
            .filter_map(|el| self.value_of(el))
            .next()
    }

    fn value_of(&self, el: ElementRef) -> Option<String> {
        let raw = match self.pick {
            Pick::OwnText => el
                .children()
                .filter_map(|node| node.value().as_text().map(|t| String::from(&**t)))
                .collect::<String>(),
            Pick::Attr(name) => el.value().attr(name)?.to_string(),
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

fn compile(rules: &[(&str, Pick)]) -> Vec<Rule> {
    rules
        .iter()
        .map(|(css, pick)| Rule {
            selector: Selector::parse(css).unwrap(),
            pick: *pick,
        })
        .collect()
}

fn first_match(rules: &[Rule], scope: ElementRef) -> Option<String> {
    rules.iter().find_map(|rule| rule.first_value(scope))
}

/// Resolves `href` against `base`, the way a browser would for a link on
/// that page. Falls back to `href` itself when it is already absolute.
pub fn resolve_href(base: &str, href: &str) -> Option<String> {
    match Url::parse(base) {
        Ok(base_url) => base_url.join(href).ok().map(|u| u.to_string()),
        Err(_) => Url::parse(href).ok().map(|u| u.to_string()),
    }
}

/// Pulls job cards out of company listing pages.
pub struct Extractor {
    cards: Vec<Selector>,
    titles: Vec<Rule>,
    hrefs: Vec<Rule>,
    locations: Vec<Rule>,
    next_page: Vec<Rule>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor {
    pub fn new() -> Self {
        Extractor {
            cards: CARD_SELECTORS
                .iter()
                .map(|css| Selector::parse(css).unwrap())
                .collect(),
            titles: compile(TITLE_RULES),
            hrefs: compile(HREF_RULES),
            locations: compile(LOCATION_RULES),
            next_page: compile(NEXT_PAGE_RULES),
        }
    }

    pub fn extract(&self, html: &str, base_url: &str) -> Vec<JobRecord> {
        let document = Html::parse_document(html);
        self.extract_document(&document, base_url)
    }

    /// Cards from every card selector are concatenated in selector order;
    /// a card is kept only with a title and a resolvable href not seen
    /// earlier in this document.
    pub fn extract_document(&self, document: &Html, base_url: &str) -> Vec<JobRecord> {
        let mut jobs = Vec::new();
        let mut seen = HashSet::new();

        let cards = self.cards.iter().flat_map(|sel| document.select(sel));
        for card in cards {
            let title = match first_match(&self.titles, card) {
                Some(t) => t,
                None => continue,
            };
            let url = match first_match(&self.hrefs, card).and_then(|h| resolve_href(base_url, &h)) {
                Some(u) => u,
                None => continue,
            };
            let location = first_match(&self.locations, card).unwrap_or_default();

            if seen.insert(url.clone()) {
                jobs.push(JobRecord { title, url, location });
            }
        }
        jobs
    }

    /// Absolute URL of the pagination "next" link, if the page has one.
    pub fn next_page_url(&self, document: &Html, page_url: &str) -> Option<String> {
        first_match(&self.next_page, document.root_element())
            .and_then(|href| resolve_href(page_url, &href))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://uk.indeed.com/cmp/Acme/jobs";

    #[test]
    fn test_extracts_company_list_items() {
        let html = r#"<html><body><ul>
            <li data-testid="cmpJobListItem">
                <a href="/viewjob?jk=111"><span data-testid="jobTitle"> Senior Engineer </span></a>
                <span data-testid="text-location">London</span>
            </li>
            <li data-testid="cmpJobListItem">
                <a href="/viewjob?jk=222"><span data-testid="jobTitle">Data Analyst</span></a>
            </li>
        </ul></body></html>"#;
        let jobs = Extractor::new().extract(html, BASE);
        assert_eq!(
            jobs,
            vec![
                JobRecord {
                    title: "Senior Engineer".to_string(),
                    url: "https://uk.indeed.com/viewjob?jk=111".to_string(),
                    location: "London".to_string(),
                },
                JobRecord {
                    title: "Data Analyst".to_string(),
                    url: "https://uk.indeed.com/viewjob?jk=222".to_string(),
                    location: String::new(),
                },
            ]
        );
    }

    #[test]
    fn test_duplicate_href_keeps_first_card() {
        let html = r#"<html><body>
            <div class="job_seen_beacon">
                <h2 class="jobTitle"><span>First Title</span></h2>
                <a href="/viewjob?jk=abc">view</a>
                <div class="companyLocation">Leeds</div>
            </div>
            <div class="job_seen_beacon">
                <h2 class="jobTitle"><span>Second Title</span></h2>
                <a href="https://uk.indeed.com/viewjob?jk=abc">view</a>
                <div class="companyLocation">York</div>
            </div>
        </body></html>"#;
        let jobs = Extractor::new().extract(html, BASE);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "First Title");
        assert_eq!(jobs[0].location, "Leeds");
    }

    #[test]
    fn test_card_matching_two_patterns_yields_one_job() {
        let html = r#"<html><body>
            <div class="job_seen_beacon" data-testid="jobCard">
                <a href="/viewjob?jk=1" title="Porter">Porter</a>
            </div>
        </body></html>"#;
        let jobs = Extractor::new().extract(html, BASE);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Porter");
    }

    #[test]
    fn test_cards_missing_title_or_href_are_skipped() {
        let html = r#"<html><body>
            <div data-testid="jobCard"><a href="/viewjob?jk=notitle">&nbsp;</a></div>
            <div data-testid="jobCard"><span data-testid="jobTitle">No Link</span></div>
            <div data-testid="jobCard">
                <span data-testid="jobTitle">Kept</span><a href="/viewjob?jk=ok"></a>
            </div>
        </body></html>"#;
        let jobs = Extractor::new().extract(html, BASE);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Kept");
        assert_eq!(jobs[0].url, "https://uk.indeed.com/viewjob?jk=ok");
    }

    #[test]
    fn test_tap_item_card_reads_its_own_attributes() {
        let html = r#"<html><body>
            <a class="tapItem" href="/rc/clk?jk=9" aria-label="full details of Chef">
                <div class="companyLocation">Bristol</div>
            </a>
        </body></html>"#;
        let jobs = Extractor::new().extract(html, BASE);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "full details of Chef");
        assert_eq!(jobs[0].url, "https://uk.indeed.com/rc/clk?jk=9");
        assert_eq!(jobs[0].location, "Bristol");
    }

    #[test]
    fn test_viewjob_link_preferred_over_first_anchor() {
        let html = r#"<html><body>
            <div data-testid="jobCard">
                <a href="/cmp/Acme">Acme</a>
                <a href="/viewjob?jk=77"><span data-testid="jobTitle">Welder</span></a>
            </div>
        </body></html>"#;
        let jobs = Extractor::new().extract(html, BASE);
        assert_eq!(jobs[0].url, "https://uk.indeed.com/viewjob?jk=77");
    }

    #[test]
    fn test_no_cards() {
        let html = "<html><body><p>Nothing here</p></body></html>";
        assert!(Extractor::new().extract(html, BASE).is_empty());
    }

    #[test]
    fn test_next_page_url() {
        let extractor = Extractor::new();
        let with_label = Html::parse_document(
            r#"<nav><a aria-label="Next" href="/cmp/Acme/jobs?start=20">›</a></nav>"#,
        );
        assert_eq!(
            extractor.next_page_url(&with_label, BASE).as_deref(),
            Some("https://uk.indeed.com/cmp/Acme/jobs?start=20")
        );

        let with_testid = Html::parse_document(
            r#"<nav><a data-testid="pagination-page-next" href="?start=40">Next</a></nav>"#,
        );
        assert_eq!(
            extractor.next_page_url(&with_testid, BASE).as_deref(),
            Some("https://uk.indeed.com/cmp/Acme/jobs?start=40")
        );

        let none = Html::parse_document(r#"<nav><a aria-label="Previous" href="/x">‹</a></nav>"#);
        assert_eq!(extractor.next_page_url(&none, BASE), None);
    }

    #[test]
    fn test_resolve_href() {
        assert_eq!(
            resolve_href("https://uk.indeed.com/cmp/Acme/jobs", "../viewjob?jk=1").as_deref(),
            Some("https://uk.indeed.com/cmp/viewjob?jk=1")
        );
        assert_eq!(
            resolve_href("not a url", "https://uk.indeed.com/viewjob?jk=2").as_deref(),
            Some("https://uk.indeed.com/viewjob?jk=2")
        );
        assert_eq!(resolve_href("not a url", "/viewjob?jk=3"), None);
    }
}
