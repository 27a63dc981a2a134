//! CSV rendering and file output for repository records

use crate::error::{Error, Result};
use crate::types::RepositoryRecord;
use std::path::Path;

/// Column order of the export file
pub const CSV_HEADERS: [&str; 9] = [
    "name",
    "description",
    "url",
    "size",
    "stars",
    "forks",
    "issues",
    "language",
    "license",
];

/// Render records as CSV bytes, header first
///
/// Absent optional values are written as empty fields.
pub fn render_csv(records: &[RepositoryRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;

    for record in records {
        let size = record.size.to_string();
        let stars = record.stars.to_string();
        let forks = record.forks.to_string();
        let issues = record.open_issues.to_string();

        writer.write_record([
            record.name.as_str(),
            record.description.as_deref().unwrap_or(""),
            record.url.as_str(),
            size.as_str(),
            stars.as_str(),
            forks.as_str(),
            issues.as_str(),
            record.language.as_deref().unwrap_or(""),
            record.license.as_deref().unwrap_or(""),
        ])?;
    }

    writer.into_inner().map_err(|e| Error::Io(e.into_error()))
}

/// Write records to `path`, creating parent directories and replacing any
/// existing file
pub async fn write_csv(path: &Path, records: &[RepositoryRecord]) -> Result<()> {
    let contents = render_csv(records)?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, contents).await?;

    Ok(())
}
