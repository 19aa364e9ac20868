use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyTask {
    pub name: String,
    pub seed_url: String,
}

/// Outcome of a single proxy round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    pub ok: bool,
    pub url: String,
    pub status_code: u16,
    pub html: String,
    pub error: Option<String>,
}

impl FetchResult {
    pub fn failed(url: &str, error: impl Into<String>) -> Self {
        FetchResult {
            ok: false,
            url: url.to_string(),
            status_code: 0,
            html: String::new(),
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub url: String,
    pub location: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyStatus {
    Ok,
    NoJobs,
    NotFound,
    Blocked,
    Error,
}

impl CompanyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyStatus::Ok => "ok",
            CompanyStatus::NoJobs => "no_jobs",
            CompanyStatus::NotFound => "not_found",
            CompanyStatus::Blocked => "blocked",
            CompanyStatus::Error => "error",
        }
    }
}

impl fmt::Display for CompanyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyResult {
    pub company_name: String,
    pub company_url: String,
    pub status: CompanyStatus,
    pub jobs: Vec<JobRecord>,
    pub jobs_count: usize,
}

impl CompanyResult {
    pub fn new(task: &CompanyTask) -> Self {
        CompanyResult {
            company_name: task.name.clone(),
            company_url: task.seed_url.clone(),
            status: CompanyStatus::Ok,
            jobs: Vec::new(),
            jobs_count: 0,
        }
    }

    /// Syncs `jobs_count` with the job list and downgrades an empty `ok`
    /// result to `no_jobs`.
    pub fn finalize(&mut self) {
        self.jobs_count = self.jobs.len();
        if self.jobs_count == 0 && self.status == CompanyStatus::Ok {
            self.status = CompanyStatus::NoJobs;
        }
    }
}
