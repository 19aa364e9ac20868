use jobs_scraper_lib::{batch, input_loader, logger, output_writer};
use jobs_scraper_lib::{Config, Crawler, ProxyClient};

use std::error::Error;
use log::info;

fn main() -> Result<(), Box<dyn Error>> {
    logger::init();
    info!("Starting company jobs scraper...");

    let config = Config::default();

    // 1. Load companies; a missing column aborts before any request is sent
    let tasks = input_loader::load_tasks(&config.excel_path, &config.name_col, &config.url_col)?;
    let tasks = input_loader::apply_row_limit(tasks, config.limit_rows);

    // 2. Initialize proxy client and crawler
    let proxy = ProxyClient::new(&config)?;
    let crawler = Crawler::new(proxy, &config);

    // 3. Crawl sequentially
    let results = batch::run_batch(&crawler, &tasks, &config.sleep_between);

    // 4. Write everything at once
    output_writer::write_results(&config.output_path, &results)?;

    for (status, count) in batch::summarize(&results) {
        info!("  {}: {}", status, count);
    }
    info!("Scraping Completed. Saved to {:?}", config.output_path);
    Ok(())
}
