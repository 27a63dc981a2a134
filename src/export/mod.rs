//! Search-and-export orchestration
//!
//! Runs a filtered search through a [`SearchBackend`] and writes the records
//! to `<output_dir>/repositories_<language>_<limit>_<offset>.csv`.

use crate::error::Result;
use crate::github::{SearchBackend, build_query, search_repositories};
use crate::types::{ExportOutcome, FetchWindow, SearchFilter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub mod writer;

pub use writer::{CSV_HEADERS, render_csv, write_csv};

/// Export file name for a search
///
/// Characters that would escape the output directory are replaced with `_`.
pub fn filename_for(language: &str, limit: usize, offset: usize) -> String {
    let language: String = language
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect();
    format!("repositories_{language}_{limit}_{offset}.csv")
}

/// Runs searches and persists their results as CSV
///
/// Cloning shares the backend.
#[derive(Clone)]
pub struct SearchExporter {
    backend: Arc<dyn SearchBackend>,
    output_dir: PathBuf,
}

impl SearchExporter {
    /// Create an exporter writing into `output_dir`
    pub fn new(backend: Arc<dyn SearchBackend>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            output_dir: output_dir.into(),
        }
    }

    /// Directory export files are written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Search for repositories matching `filter` and write the window to CSV
    ///
    /// The filter is validated first. Upstream errors propagate unchanged and
    /// no file is written. A prior file with the same name is overwritten.
    pub async fn search_and_export(
        &self,
        filter: &SearchFilter,
        window: FetchWindow,
    ) -> Result<ExportOutcome> {
        filter.validate()?;

        let query = build_query(filter);
        let repositories = search_repositories(
            self.backend.as_ref(),
            &query,
            filter.sort,
            filter.order,
            window,
        )
        .await?;

        let filename = filename_for(&filter.language, window.limit(), window.offset());
        let filepath = self.output_dir.join(&filename);

        write_csv(&filepath, &repositories).await?;

        tracing::info!(
            path = %filepath.display(),
            count = repositories.len(),
            query = %query,
            "Exported repositories to CSV"
        );

        Ok(ExportOutcome {
            count: repositories.len(),
            filename,
            filepath,
            repositories,
        })
    }
}

impl std::fmt::Debug for SearchExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchExporter")
            .field("output_dir", &self.output_dir)
            .finish_non_exhaustive()
    }
}
