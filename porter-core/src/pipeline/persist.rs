//! Writes generated artifacts under the output root

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::synthesis::GeneratedFile;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs as async_fs;
use tracing::{debug, warn};

/// Files that reached disk, plus a diagnostic for each that did not
#[derive(Debug, Default)]
pub struct PersistReport {
    pub written: Vec<GeneratedFile>,
    pub diagnostics: Diagnostics,
}

async fn write_file(root: &Path, file: &GeneratedFile) -> Result<()> {
    let target = root.join(&file.relative_path);
    if let Some(parent) = target.parent() {
        async_fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    async_fs::write(&target, &file.content)
        .await
        .with_context(|| format!("Failed to write {}", target.display()))?;
    Ok(())
}

/// Write every file to `root`, overwriting whatever is there. A failed
/// write does not stop the remaining ones.
pub async fn persist(root: &Path, files: Vec<GeneratedFile>) -> PersistReport {
    let mut report = PersistReport::default();

    for file in files {
        match write_file(root, &file).await {
            Ok(()) => {
                debug!("Wrote {}", file.display_path());
                report.written.push(file);
            }
            Err(e) => {
                warn!("{:#}", e);
                report.diagnostics.record(DiagnosticKind::GenerationError, format!("{:#}", e));
            }
        }
    }

    report
}
