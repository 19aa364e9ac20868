use std::fs::File;
use std::path::Path;
use log::{info, warn};
use calamine::{open_workbook_auto, Reader};
use crate::error::ScrapeError;
use crate::models::CompanyTask;

/// Reads company rows from a spreadsheet (xlsx/xlsm/xls/ods) or CSV file.
///
/// Both `name_col` and `url_col` must be present in the header row; rows
/// without a URL are skipped. Output order follows the input.
pub fn load_tasks<P: AsRef<Path>>(
    filename: P,
    name_col: &str,
    url_col: &str,
) -> Result<Vec<CompanyTask>, ScrapeError> {
    let path_ref = filename.as_ref();

    let is_spreadsheet = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| {
            matches!(ext.to_lowercase().as_str(), "xlsx" | "xlsm" | "xls" | "ods")
        });

    let rows = if is_spreadsheet {
        read_spreadsheet_rows(path_ref)?
    } else {
        read_csv_rows(path_ref)?
    };

    if rows.is_empty() {
        return Err(ScrapeError::EmptyInput(path_ref.display().to_string()));
    }

    let tasks = rows_to_tasks(rows, name_col, url_col)?;
    info!("Loaded {} companies from {:?}", tasks.len(), path_ref);
    Ok(tasks)
}

/// Keeps the first `limit` tasks when a row cap is configured.
pub fn apply_row_limit(mut tasks: Vec<CompanyTask>, limit: Option<usize>) -> Vec<CompanyTask> {
    if let Some(n) = limit {
        if tasks.len() > n {
            info!("Row limit active: keeping first {} of {} companies", n, tasks.len());
            tasks.truncate(n);
        }
    }
    tasks
}

fn read_csv_rows(path: &Path) -> Result<Vec<Vec<String>>, ScrapeError> {
    let file = File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }
    Ok(rows)
}

fn read_spreadsheet_rows(path: &Path) -> Result<Vec<Vec<String>>, ScrapeError> {
    let mut workbook = open_workbook_auto(path)?;

    let worksheets = workbook.worksheets();
    let (sheet_name, range) = worksheets
        .into_iter()
        .next()
        .ok_or_else(|| ScrapeError::EmptyInput(path.display().to_string()))?;
    info!("Reading worksheet '{}'", sheet_name);

    Ok(range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect())
}

fn rows_to_tasks(
    rows: Vec<Vec<String>>,
    name_col: &str,
    url_col: &str,
) -> Result<Vec<CompanyTask>, ScrapeError> {
    let mut rows = rows.into_iter();
    let header = rows.next().unwrap_or_default();

    let find = |col: &str| header.iter().position(|h| h.trim() == col);
    let (name_idx, url_idx) = match (find(name_col), find(url_col)) {
        (Some(n), Some(u)) => (n, u),
        _ => {
            return Err(ScrapeError::MissingColumns {
                name_col: name_col.to_string(),
                url_col: url_col.to_string(),
            })
        }
    };

    let mut tasks = Vec::new();
    let mut skipped = 0;
    for row in rows {
        let seed_url = row.get(url_idx).map(|s| s.trim()).unwrap_or_default();
        if seed_url.is_empty() {
            skipped += 1;
            continue;
        }
        let name = row.get(name_idx).map(|s| s.trim()).unwrap_or_default();
        tasks.push(CompanyTask {
            name: name.to_string(),
            seed_url: seed_url.to_string(),
        });
    }

    if skipped > 0 {
        warn!("Skipped {} rows without a URL", skipped);
    }
    Ok(tasks)
}
