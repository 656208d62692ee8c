//! # figma-svg-dl
//!
//! Export vector components from a remote design file as SVG files.
//!
//! ## Pipeline
//!
//! One call to [`export_components`] runs the whole export:
//! 1. **Validate** the [`Config`] (no I/O happens before this succeeds)
//! 2. **Load** the optimizer, if one is configured
//! 3. **Fetch** the document tree
//! 4. **Scan** it for visible components that declare an SVG export
//! 5. **Render**: request render URLs in batches of [`DEFAULT_BATCH_SIZE`] ids
//! 6. **Download** every URL at once into the output directory
//! 7. **Optimize** the written files in place
//!
//! ## Quick Start
//!
//! ```no_run
//! use figma_svg_dl::{Config, NamingStrategy, export_components};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config {
//!         access_token: "figd_...".to_string(),
//!         file_id: "AbCdEf123".to_string(),
//!         output_dir: "icons".into(),
//!         naming: NamingStrategy::Pascal,
//!         ..Default::default()
//!     };
//!
//!     let progress = |event: &figma_svg_dl::Event| println!("{event:?}");
//!     let summary = export_components(config, Some(&progress)).await?;
//!     println!("{} files written", summary.written.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Batch planning for render requests
pub mod batching;
/// Remote API client
pub mod client;
/// Configuration types
pub mod config;
/// Download and optimize orchestration
pub mod downloader;
/// Error types
pub mod error;
/// File-name casing strategies
pub mod naming;
/// SVG optimization
pub mod optimizer;
/// Render URL requests
pub mod render;
/// Document tree scanning
pub mod scanner;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use batching::DEFAULT_BATCH_SIZE;
pub use client::FigmaClient;
pub use config::{Config, RenderOptions};
pub use downloader::{DownloadParams, download_all, optimize_all};
pub use error::{DownloadError, Error, FetchError, OptimizeError, RenderError, Result};
pub use naming::NamingStrategy;
pub use optimizer::{
    BuiltinOptimizer, CommandOptimizer, OptimizerConfig, OptimizerSource, SvgOptimizer,
};
pub use types::{
    DocumentNode, Event, ExportCandidates, ExportSummary, ProgressFn, RenderResults,
};

/// Run a complete export.
///
/// Returns an empty summary (and writes nothing) when the document has no
/// exportable components. Progress is reported through `on_progress` once per
/// downloaded file and once per optimized file.
///
/// # Errors
///
/// The first failure of any stage. Configuration and optimizer-config errors are
/// raised before anything is fetched or written. Download and optimize failures
/// are reported after every file of the phase has settled, so files that
/// succeeded remain on disk.
pub async fn export_components(
    config: Config,
    on_progress: Option<&ProgressFn>,
) -> Result<ExportSummary> {
    let config = config.validate()?;

    let optimizer = match &config.optimizer {
        Some(source) => Some(optimizer::load_optimizer(source, &config.working_dir()).await?),
        None => None,
    };

    let client = FigmaClient::new(&config)?;
    let file = client
        .get_document(&config.file_id, &config.node_ids)
        .await?;
    tracing::info!(file_id = %config.file_id, name = %file.name, "document fetched");

    let candidates = scanner::scan(&file.document.children);
    if candidates.is_empty() {
        tracing::info!(file_id = %config.file_id, "no exportable components found");
        return Ok(ExportSummary::default());
    }
    tracing::info!(components = candidates.len(), "exportable components found");

    let results = render::request_render_urls(&client, &candidates, &config).await?;

    let written = download_all(
        client.http(),
        &results,
        DownloadParams {
            output_dir: &config.output_dir,
            clear_output_dir: config.clear_output_dir,
            naming: config.naming,
            on_progress,
        },
    )
    .await?;

    let optimized = match optimizer {
        Some(optimizer) => {
            optimize_all(&written, optimizer.as_ref(), on_progress).await?;
            true
        }
        None => false,
    };

    tracing::info!(files = written.len(), optimized, "export finished");
    Ok(ExportSummary {
        components: candidates.len(),
        written,
        optimized,
    })
}
