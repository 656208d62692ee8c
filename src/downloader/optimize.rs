//! Optimize phase: rewrite written files through the optimizer.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::join_all;

use super::settle;
use crate::error::{OptimizeError, Result};
use crate::optimizer::SvgOptimizer;
use crate::types::{Event, ProgressFn};

/// Optimize every file in `paths` in place, all at once.
///
/// Empty files are rejected. Per-file failures do not stop the others; the
/// first failure is returned once every file has settled.
pub async fn optimize_all(
    paths: &[PathBuf],
    optimizer: &dyn SvgOptimizer,
    on_progress: Option<&ProgressFn>,
) -> Result<()> {
    let total = paths.len();
    let completed = AtomicUsize::new(0);
    tracing::info!(files = total, optimizer = optimizer.name(), "optimizing");

    let outcomes = join_all(paths.iter().map(|path| {
        let completed = &completed;
        async move {
            optimize_file(path, optimizer).await?;
            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(report) = on_progress {
                report(&Event::Optimized {
                    path: path.clone(),
                    completed: done,
                    total,
                });
            }
            Ok(())
        }
    }))
    .await;

    settle("optimize", outcomes).map(|_| ())
}

async fn optimize_file(path: &Path, optimizer: &dyn SvgOptimizer) -> Result<()> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| OptimizeError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    if content.trim().is_empty() {
        return Err(OptimizeError::EmptyFile {
            path: path.to_path_buf(),
        }
        .into());
    }

    let optimized = optimizer
        .optimize(&content)
        .await
        .map_err(|e| OptimizeError::Transform {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    if optimized.trim().is_empty() {
        return Err(OptimizeError::Transform {
            path: path.to_path_buf(),
            reason: "optimizer produced empty output".to_string(),
        }
        .into());
    }

    tokio::fs::write(path, optimized.as_bytes())
        .await
        .map_err(|e| OptimizeError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    tracing::debug!(
        path = %path.display(),
        before = content.len(),
        after = optimized.len(),
        "file optimized"
    );
    Ok(())
}
