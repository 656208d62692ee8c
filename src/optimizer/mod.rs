//! SVG optimization
//!
//! Downloaded SVGs can be post-processed before the run finishes. The optimizer
//! is described by an [`OptimizerConfig`], given inline or as a JSON file whose
//! path is resolved against the working directory. Loading happens before any
//! file is touched, so a malformed or unreadable config aborts the run early.
//!
//! ## Architecture
//!
//! The core abstraction is the [`SvgOptimizer`] trait. Two implementations are
//! provided:
//!
//! - [`BuiltinOptimizer`]: in-process rewrite of the parsed XML event stream,
//!   used by default
//! - [`CommandOptimizer`]: pipes each file through an external `svgo`-compatible
//!   binary, used when the config has a `command` section
//!
//! ## Config file
//!
//! ```json
//! {
//!   "removeTitle": true,
//!   "precision": 3,
//!   "command": { "program": "svgo", "args": ["--multipass", "-i", "-", "-o", "-"] }
//! }
//! ```

mod builtin;
mod cli;
mod traits;

pub use builtin::BuiltinOptimizer;
pub use cli::CommandOptimizer;
pub use traits::SvgOptimizer;

use crate::error::{OptimizeError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where the optimizer configuration comes from
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptimizerSource {
    /// JSON file, relative paths resolved against the working directory
    Path(PathBuf),
    /// Configuration given inline
    Inline(OptimizerConfig),
}

/// External optimizer command
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommandConfig {
    /// Binary to run (default: `svgo` from PATH)
    pub program: Option<PathBuf>,
    /// Arguments (default: `--input - --output -`)
    pub args: Vec<String>,
}

/// Optimizer configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct OptimizerConfig {
    /// Remove the `<?xml ...?>` prologue (default: true)
    pub remove_xml_declaration: bool,
    /// Remove `<!DOCTYPE ...>` (default: true)
    pub remove_doctype: bool,
    /// Remove `<!-- ... -->` comments (default: true)
    pub remove_comments: bool,
    /// Remove `<metadata>` elements (default: true)
    pub remove_metadata: bool,
    /// Remove `<title>` elements (default: false)
    pub remove_title: bool,
    /// Remove `<desc>` elements (default: false)
    pub remove_desc: bool,
    /// Remove Inkscape/Sodipodi/Sketch namespaces, elements and attributes (default: true)
    pub remove_editor_data: bool,
    /// Remove whitespace between tags (default: true)
    pub collapse_whitespace: bool,
    /// Round decimals in attribute values to this many digits (default: off)
    pub precision: Option<u8>,
    /// Run an external binary instead of the built-in passes
    pub command: Option<CommandConfig>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            remove_xml_declaration: true,
            remove_doctype: true,
            remove_comments: true,
            remove_metadata: true,
            remove_title: false,
            remove_desc: false,
            remove_editor_data: true,
            collapse_whitespace: true,
            precision: None,
            command: None,
        }
    }
}

impl OptimizerSource {
    /// Resolve the source into a configuration
    ///
    /// # Errors
    ///
    /// [`OptimizeError::ConfigLoad`] when the file cannot be read or parsed.
    pub async fn load(&self, working_dir: &Path) -> Result<OptimizerConfig> {
        match self {
            OptimizerSource::Inline(config) => Ok(config.clone()),
            OptimizerSource::Path(path) => {
                let path = if path.is_absolute() {
                    path.clone()
                } else {
                    working_dir.join(path)
                };
                let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
                    OptimizeError::ConfigLoad {
                        path: path.clone(),
                        reason: e.to_string(),
                    }
                })?;
                serde_json::from_str(&content).map_err(|e| {
                    OptimizeError::ConfigLoad {
                        path: path.clone(),
                        reason: e.to_string(),
                    }
                    .into()
                })
            }
        }
    }
}

/// Build the optimizer described by `config`
pub fn build_optimizer(config: &OptimizerConfig) -> Result<Arc<dyn SvgOptimizer>> {
    match &config.command {
        Some(command) => Ok(Arc::new(CommandOptimizer::from_config(command)?)),
        None => Ok(Arc::new(BuiltinOptimizer::new(config))),
    }
}

/// Load a configuration and build its optimizer
pub async fn load_optimizer(
    source: &OptimizerSource,
    working_dir: &Path,
) -> Result<Arc<dyn SvgOptimizer>> {
    let config = source.load(working_dir).await?;
    let optimizer = build_optimizer(&config)?;
    tracing::debug!(optimizer = optimizer.name(), "optimizer loaded");
    Ok(optimizer)
}
