//! Download phase: output directory preparation and concurrent fetch + write.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::join_all;

use super::paths::{Destination, plan_destinations};
use super::settle;
use crate::error::{DownloadError, Result};
use crate::naming::NamingStrategy;
use crate::types::{Event, ProgressFn, RenderResults};

/// Parameters for the download phase
pub struct DownloadParams<'a> {
    /// Directory the files are written to
    pub output_dir: &'a Path,
    /// Remove the directory and its contents first
    pub clear_output_dir: bool,
    /// Casing strategy for file names
    pub naming: NamingStrategy,
    /// Called after each file is written
    pub on_progress: Option<&'a ProgressFn>,
}

/// Download every render result into the output directory.
///
/// Phases:
/// 1. Clear the output directory (only when requested)
/// 2. Create the output directory
/// 3. Plan destination paths, rejecting name collisions
/// 4. Fetch and write every file concurrently, reporting progress per file
///
/// Returns the absolute paths of the written files, in render-result order.
pub async fn download_all(
    http: &reqwest::Client,
    results: &RenderResults,
    params: DownloadParams<'_>,
) -> Result<Vec<PathBuf>> {
    let DownloadParams {
        output_dir,
        clear_output_dir,
        naming,
        on_progress,
    } = params;

    // Phase 1: clear
    if clear_output_dir {
        clear_dir(output_dir).await?;
    }

    // Phase 2: create
    let output_dir = prepare_dir(output_dir).await?;

    // Phase 3: plan
    let destinations = plan_destinations(results, &output_dir, naming)?;
    let total = destinations.len();
    tracing::info!(files = total, dir = %output_dir.display(), "downloading");

    // Phase 4: fetch + write
    let completed = AtomicUsize::new(0);
    let outcomes = join_all(destinations.iter().map(|dest| {
        let completed = &completed;
        async move {
            fetch_and_write(http, dest).await?;
            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(report) = on_progress {
                report(&Event::Downloaded {
                    path: dest.path.clone(),
                    completed: done,
                    total,
                });
            }
            Ok(dest.path.clone())
        }
    }))
    .await;

    settle("download", outcomes)
}

async fn clear_dir(dir: &Path) -> Result<()> {
    match tokio::fs::remove_dir_all(dir).await {
        Ok(()) => {
            tracing::info!(dir = %dir.display(), "cleared output directory");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(DownloadError::ClearDir {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        }
        .into()),
    }
}

async fn prepare_dir(dir: &Path) -> Result<PathBuf> {
    let create_error = |e: std::io::Error| DownloadError::CreateDir {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    };
    tokio::fs::create_dir_all(dir).await.map_err(create_error)?;
    let absolute = tokio::fs::canonicalize(dir).await.map_err(create_error)?;
    Ok(absolute)
}

async fn fetch_and_write(http: &reqwest::Client, dest: &Destination) -> Result<()> {
    let request_error = |e: reqwest::Error| DownloadError::Request {
        url: dest.url.clone(),
        message: e.to_string(),
    };

    let response = http.get(&dest.url).send().await.map_err(request_error)?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(name = %dest.name, url = %dest.url, status = status.as_u16(), "download failed");
        return Err(DownloadError::Http {
            url: dest.url.clone(),
            status: status.as_u16(),
            body,
        }
        .into());
    }

    let bytes = response.bytes().await.map_err(request_error)?;

    tokio::fs::write(&dest.path, &bytes)
        .await
        .map_err(|e| DownloadError::Write {
            path: dest.path.clone(),
            reason: e.to_string(),
        })?;

    tracing::debug!(name = %dest.name, path = %dest.path.display(), bytes = bytes.len(), "file written");
    Ok(())
}
