//! Render URL requests
//!
//! Turns export candidates into render URLs: identifiers are batched, every batch
//! is requested at once, and the merged response is checked so that each
//! requested node has exactly one non-empty URL. Any failed batch fails the whole
//! operation; partial results are discarded. Results are keyed by export name, so
//! two candidates sharing a name are rejected before anything is requested.

use std::collections::{HashMap, HashSet};

use futures::future::join_all;

use crate::batching::plan;
use crate::client::FigmaClient;
use crate::config::Config;
use crate::error::{FetchError, RenderError, Result};
use crate::types::{ExportCandidates, RenderResults};

/// Request render URLs for every candidate, keyed by export name
pub async fn request_render_urls(
    client: &FigmaClient,
    candidates: &ExportCandidates,
    config: &Config,
) -> Result<RenderResults> {
    let mut ids: Vec<String> = candidates.keys().cloned().collect();
    ids.sort();
    ensure_unique_names(&ids, candidates)?;
    let batches = plan(&ids, config.batch_size);

    tracing::info!(
        nodes = ids.len(),
        batches = batches.len(),
        "requesting render urls"
    );

    let responses = join_all(batches.iter().enumerate().map(|(index, batch)| async move {
        let response = client
            .get_image_urls(&config.file_id, batch, &config.render)
            .await;
        if let Err(e) = &response {
            tracing::warn!(batch = index, error = %e, "render batch failed");
        }
        response
    }))
    .await;

    let mut results = RenderResults::with_capacity(candidates.len());
    let mut resolved = HashSet::with_capacity(candidates.len());

    for response in responses {
        let response = response?;
        if let Some(message) = response.err {
            return Err(FetchError::Service {
                operation: "render images".to_string(),
                message,
            }
            .into());
        }

        for (node_id, url) in response.images {
            let Some(name) = candidates.get(&node_id) else {
                return Err(RenderError::UnknownNode { node_id }.into());
            };
            let url = match url {
                Some(url) if !url.trim().is_empty() => url,
                _ => {
                    return Err(RenderError::EmptyUrl {
                        node_id,
                        name: name.clone(),
                    }
                    .into());
                }
            };
            results.insert(name.clone(), url);
            resolved.insert(node_id);
        }
    }

    if let Some(node_id) = ids.iter().find(|id| !resolved.contains(*id)) {
        return Err(RenderError::MissingUrl {
            node_id: node_id.clone(),
            name: candidates[node_id].clone(),
        }
        .into());
    }

    tracing::debug!(urls = results.len(), "render urls resolved");
    Ok(results)
}

/// Reject candidates that would overwrite each other in the results
fn ensure_unique_names(ids: &[String], candidates: &ExportCandidates) -> Result<()> {
    let mut owners: HashMap<&str, &str> = HashMap::with_capacity(ids.len());
    for id in ids {
        let Some(name) = candidates.get(id) else {
            continue;
        };
        if let Some(first) = owners.insert(name.as_str(), id.as_str()) {
            return Err(RenderError::DuplicateName {
                name: name.clone(),
                first: first.to_string(),
                second: id.clone(),
            }
            .into());
        }
    }
    Ok(())
}
