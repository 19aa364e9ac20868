use std::collections::BTreeMap;
use log::info;
use crate::crawler::Crawler;
use crate::delay_manager::{self, DelayRange};
use crate::models::{CompanyResult, CompanyStatus, CompanyTask};
use crate::proxy_client::PageFetcher;

/// Crawls every company in order, one at a time, pausing between companies.
pub fn run_batch<F: PageFetcher>(
    crawler: &Crawler<F>,
    tasks: &[CompanyTask],
    company_delay: &DelayRange,
) -> Vec<CompanyResult> {
    let total = tasks.len();
    let mut results = Vec::with_capacity(total);

    for (i, task) in tasks.iter().enumerate() {
        // DELAY between companies
        if i > 0 {
            delay_manager::random_site_delay(company_delay);
        }

        info!("[{}/{}] {} -> {}", i + 1, total, task.name, task.seed_url);
        let result = crawler.scrape_company(task);
        info!("{}: {} ({} jobs)", task.name, result.status, result.jobs_count);
        results.push(result);
    }

    results
}

pub fn summarize(results: &[CompanyResult]) -> BTreeMap<CompanyStatus, usize> {
    let mut counts = BTreeMap::new();
    for result in results {
        *counts.entry(result.status).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::FetchResult;
    use std::cell::RefCell;

    /// Answers by company path so the test can check ordering.
    struct ByCompany {
        requested: RefCell<Vec<String>>,
    }

    impl PageFetcher for ByCompany {
        fn fetch(&self, url: &str, _session: &str) -> FetchResult {
            self.requested.borrow_mut().push(url.to_string());
            let html = if url.contains("/cmp/Good/") {
                r#"<html><body><li data-testid="cmpJobListItem"><a href="/viewjob?jk=1"><span data-testid="jobTitle">Cook</span></a></li></body></html>"#
            } else {
                "<html><head><title>Page Not Found</title></head><body></body></html>"
            };
            FetchResult {
                ok: !url.contains("/cmp/Down/"),
                url: url.to_string(),
                status_code: 200,
                html: html.to_string(),
                error: None,
            }
        }
    }

    fn task(name: &str) -> CompanyTask {
        CompanyTask {
            name: name.to_string(),
            seed_url: format!("https://uk.indeed.com/cmp/{}", name),
        }
    }

    #[test]
    fn test_batch_keeps_input_order() {
        let fetcher = ByCompany { requested: RefCell::new(Vec::new()) };
        let config = Config {
            page_delay: DelayRange::none(),
            ..Config::default()
        };
        let crawler = Crawler::new(&fetcher, &config);
        let tasks = vec![task("Good"), task("Gone"), task("Down")];

        let results = run_batch(&crawler, &tasks, &DelayRange::none());

        let statuses: Vec<_> = results.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![CompanyStatus::Ok, CompanyStatus::NotFound, CompanyStatus::Error]
        );
        assert_eq!(results[0].company_name, "Good");
        assert_eq!(results[0].company_url, "https://uk.indeed.com/cmp/Good");
        assert_eq!(results[0].jobs_count, 1);
        assert_eq!(fetcher.requested.borrow().len(), 3);

        let summary = summarize(&results);
        assert_eq!(summary.get(&CompanyStatus::Ok), Some(&1));
        assert_eq!(summary.get(&CompanyStatus::NotFound), Some(&1));
        assert_eq!(summary.get(&CompanyStatus::Error), Some(&1));
        assert_eq!(summary.get(&CompanyStatus::Blocked), None);
    }

    #[test]
    fn test_empty_batch() {
        let fetcher = ByCompany { requested: RefCell::new(Vec::new()) };
        let crawler = Crawler::new(&fetcher, &Config::default());
        assert!(run_batch(&crawler, &[], &DelayRange::none()).is_empty());
    }
}
