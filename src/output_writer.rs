use std::fs;
use std::path::Path;
use log::info;
use crate::error::ScrapeError;
use crate::models::CompanyResult;

/// Writes the whole batch as one pretty-printed JSON array, replacing any
/// previous file.
pub fn write_results<P: AsRef<Path>>(path: P, results: &[CompanyResult]) -> Result<(), ScrapeError> {
    let json = serde_json::to_string_pretty(results)?;
    fs::write(path.as_ref(), json)?;
    info!("Saved {} companies to {:?}", results.len(), path.as_ref());
    Ok(())
}

pub fn read_results<P: AsRef<Path>>(path: P) -> Result<Vec<CompanyResult>, ScrapeError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
