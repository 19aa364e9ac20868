use std::path::PathBuf;
use std::time::Duration;
use crate::delay_manager::DelayRange;

pub const FS_URL: &str = "http://localhost:8191/v1";
pub const EXCEL_PATH: &str = "Indeed_UK_Jobs_Links 1.xlsx";
pub const NAME_COL: &str = "Company Names";
pub const URL_COL: &str = "Indeed UK Jobs Link";
pub const SESSION_NAME: &str = "indeed_uk_session";
pub const OUTPUT_PATH: &str = "out.json";
pub const MAX_TIMEOUT_MS: u64 = 90_000;
pub const MAX_PAGES: usize = 20;
pub const ACCEPT_LANGUAGE: &str = "en-GB,en;q=0.9";

/// Run-wide settings, built once in `main` and lent to every component.
#[derive(Debug, Clone)]
pub struct Config {
    pub fs_url: String,
    pub excel_path: PathBuf,
    pub name_col: String,
    pub url_col: String,
    pub session_name: String,
    pub max_timeout_ms: u64,
    pub accept_language: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub page_delay: DelayRange,
    pub sleep_between: DelayRange,
    pub max_pages: usize,
    /// `None` processes every row.
    pub limit_rows: Option<usize>,
    pub output_path: PathBuf,
    pub debug_html_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            fs_url: FS_URL.to_string(),
            excel_path: PathBuf::from(EXCEL_PATH),
            name_col: NAME_COL.to_string(),
            url_col: URL_COL.to_string(),
            session_name: SESSION_NAME.to_string(),
            max_timeout_ms: MAX_TIMEOUT_MS,
            accept_language: ACCEPT_LANGUAGE.to_string(),
            connect_timeout: Duration::from_secs(30),
            // Must outlive the proxy's own maxTimeout.
            request_timeout: Duration::from_secs(180),
            page_delay: DelayRange::from_millis(1000, 2500),
            sleep_between: DelayRange::from_millis(1500, 3200),
            max_pages: MAX_PAGES,
            limit_rows: None,
            output_path: PathBuf::from(OUTPUT_PATH),
            debug_html_dir: None,
        }
    }
}
