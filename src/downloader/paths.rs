//! Destination paths for downloaded files

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{DownloadError, Result};
use crate::naming::NamingStrategy;
use crate::types::RenderResults;

/// File extension of every written file
pub const SVG_EXTENSION: &str = "svg";

/// One file to download
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Destination {
    /// Export name the file was rendered for
    pub name: String,
    /// Render URL
    pub url: String,
    /// Where the file is written
    pub path: PathBuf,
}

/// Compute `output_dir/<naming(name)>.svg` for every render result.
///
/// Fails if a name cases to an empty stem, or if two distinct names case to the
/// same file, before anything is downloaded.
pub fn plan_destinations(
    results: &RenderResults,
    output_dir: &Path,
    naming: NamingStrategy,
) -> Result<Vec<Destination>> {
    let mut seen: HashMap<PathBuf, &str> = HashMap::with_capacity(results.len());
    let mut destinations = Vec::with_capacity(results.len());

    for (name, url) in results {
        let stem = naming.apply(name);
        if stem.is_empty() {
            return Err(DownloadError::EmptyFileName { name: name.clone() }.into());
        }

        let path = output_dir.join(format!("{stem}.{SVG_EXTENSION}"));
        if let Some(first) = seen.insert(path.clone(), name) {
            return Err(DownloadError::NameCollision {
                first: first.to_string(),
                second: name.clone(),
                path,
            }
            .into());
        }

        destinations.push(Destination {
            name: name.clone(),
            url: url.clone(),
            path,
        });
    }

    Ok(destinations)
}
