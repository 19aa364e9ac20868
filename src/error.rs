use thiserror::Error;

/// Failures that abort the whole run. Per-company problems are recorded as
/// a `CompanyStatus` instead and never surface here.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("http client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("input must contain columns '{name_col}' and '{url_col}'")]
    MissingColumns { name_col: String, url_col: String },
    #[error("input file {0} has no worksheet or header row")]
    EmptyInput(String),
}
