use scraper::Html;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use log::{info, warn, error};
use url::Url;
use crate::classifier;
use crate::config::Config;
use crate::delay_manager::{self, DelayRange};
use crate::extractor::Extractor;
use crate::models::{CompanyResult, CompanyStatus, CompanyTask, FetchResult};
use crate::proxy_client::PageFetcher;

/// Rewrites a company URL to its `/jobs` listing path. Query and fragment
/// are preserved; applying it twice changes nothing.
pub fn normalize_jobs_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            let path = jobs_path(parsed.path());
            parsed.set_path(&path);
            parsed.to_string()
        }
        Err(_) => {
            let split_at = url.find(&['?', '#'][..]).unwrap_or(url.len());
            let (path, rest) = url.split_at(split_at);
            format!("{}{}", jobs_path(path), rest)
        }
    }
}

fn jobs_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.ends_with("/jobs") {
        trimmed.to_string()
    } else {
        format!("{}/jobs", trimmed)
    }
}

/// Crawls one company's paginated job listing through a `PageFetcher`.
pub struct Crawler<F: PageFetcher> {
    fetcher: F,
    extractor: Extractor,
    session_name: String,
    max_pages: usize,
    page_delay: DelayRange,
    debug_html_dir: Option<PathBuf>,
}

impl<F: PageFetcher> Crawler<F> {
    pub fn new(fetcher: F, config: &Config) -> Self {
        Crawler {
            fetcher,
            extractor: Extractor::new(),
            session_name: config.session_name.clone(),
            max_pages: config.max_pages,
            page_delay: config.page_delay,
            debug_html_dir: config.debug_html_dir.clone(),
        }
    }

    pub fn scrape_company(&self, task: &CompanyTask) -> CompanyResult {
        let mut result = CompanyResult::new(task);
        let mut seen_urls = HashSet::new();
        let mut page_url = Some(normalize_jobs_url(&task.seed_url));
        let mut pages_crawled = 0;

        while let Some(url_str) = page_url.take() {
            if pages_crawled >= self.max_pages {
                warn!(
                    "Page cap of {} reached for '{}', stopping before {}",
                    self.max_pages, task.name, url_str
                );
                break;
            }

            info!("Visiting: {}", url_str);
            let res = self.fetcher.fetch(&url_str, &self.session_name);
            pages_crawled += 1;

            if !res.ok || res.status_code != 200 {
                warn!(
                    "Fetch failed for {} (status {}): {}",
                    url_str,
                    res.status_code,
                    res.error.as_deref().unwrap_or("unexpected status")
                );
                result.status = CompanyStatus::Error;
                break;
            }

            self.save_debug_html(task, pages_crawled, &res);

            if classifier::is_bot_challenge(&res.html) {
                warn!("Blocked at {}: bot challenge served", res.url);
                result.status = CompanyStatus::Blocked;
                break;
            }

            let document = Html::parse_document(&res.html);
            let page_jobs = self.extractor.extract_document(&document, &res.url);
            let found = page_jobs.len();
            let mut added = 0;
            for job in page_jobs {
                if seen_urls.insert(job.url.clone()) {
                    result.jobs.push(job);
                    added += 1;
                }
            }
            info!("Page {}: {} jobs found, {} new", pages_crawled, found, added);

            if found == 0 && pages_crawled == 1 {
                let title = classifier::page_title(&document);
                let flag = classifier::classify_empty_page(&res.html, &title);
                result.status = flag.unwrap_or(CompanyStatus::NoJobs);
                info!("No job cards on first page; classified as {}", result.status);
                break;
            }

            page_url = self.extractor.next_page_url(&document, &res.url);
            if page_url.is_some() {
                delay_manager::random_page_delay(&self.page_delay);
            }
        }

        result.finalize();
        result
    }

    fn save_debug_html(&self, task: &CompanyTask, page: usize, res: &FetchResult) {
        let dir = match &self.debug_html_dir {
            Some(d) => d,
            None => return,
        };
        let path = dir.join(format!("{}_p{}.html", slug(&task.name), page));
        if let Err(e) = fs::create_dir_all(dir).and_then(|_| fs::write(&path, &res.html)) {
            error!("Failed to save debug HTML to {:?}: {}", path, e);
        }
    }
}

fn slug(name: &str) -> String {
    let slug: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    let slug = slug.trim_matches('_').to_string();
    if slug.is_empty() {
        "company".to_string()
    } else {
        slug
    }
}
