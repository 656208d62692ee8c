//! Command-line interface definitions.

use clap::Parser;
use figma_svg_dl::{Config, NamingStrategy, OptimizerSource, Result};
use std::path::PathBuf;

/// Export SVG components from a Figma file
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Personal access token
    #[arg(long, env = "FIGMA_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Key of the design file
    #[arg(long, env = "FIGMA_FILE_ID")]
    pub file_id: Option<String>,

    /// Output directory for the SVG files
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Remove the output directory before writing
    #[arg(short, long)]
    pub clear_output: bool,

    /// Only fetch these nodes (comma-separated, `1:2` or `1-2`)
    #[arg(long, value_delimiter = ',', value_name = "IDS")]
    pub ids: Vec<String>,

    /// Casing strategy for file names [default: kebab]
    #[arg(long, value_enum)]
    pub naming: Option<NamingStrategy>,

    /// Optimizer config file (JSON); enables optimization
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub svgo_config: Option<PathBuf>,

    /// Render scale, between 0.01 and 4
    #[arg(long)]
    pub scale: Option<f64>,

    /// Render text as outlines
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub outline_text: Option<bool>,

    /// Include layer names as `id` attributes
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub include_id: Option<bool>,

    /// Include node identifiers as `data-node-id` attributes
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub include_node_id: Option<bool>,

    /// Simplify inside and outside strokes
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub simplify_stroke: Option<bool>,

    /// Exclude content overlapping the node
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub contents_only: Option<bool>,

    /// Use the full node dimensions, ignoring cropping
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub absolute_bounds: Option<bool>,

    /// Config file (JSON); command-line flags take precedence
    #[arg(short = 'C', long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Base URL of the remote API
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Node identifiers per render request
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// More log output (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Build the export configuration: config file first, then flags on top.
    pub fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(token) = self.token {
            config.access_token = token;
        }
        if let Some(file_id) = self.file_id {
            config.file_id = file_id;
        }
        if let Some(output) = self.output {
            config.output_dir = output;
        }
        if self.clear_output {
            config.clear_output_dir = true;
        }
        if !self.ids.is_empty() {
            config.node_ids = self.ids;
        }
        if let Some(naming) = self.naming {
            config.naming = naming;
        }
        if let Some(path) = self.svgo_config {
            config.optimizer = Some(OptimizerSource::Path(path));
        }
        if let Some(url) = self.api_url {
            config.api_base_url = url;
        }
        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }

        let render = &mut config.render;
        render.scale = self.scale.or(render.scale);
        render.outline_text = self.outline_text.or(render.outline_text);
        render.include_id = self.include_id.or(render.include_id);
        render.include_node_id = self.include_node_id.or(render.include_node_id);
        render.simplify_stroke = self.simplify_stroke.or(render.simplify_stroke);
        render.contents_only = self.contents_only.or(render.contents_only);
        render.use_absolute_bounds = self.absolute_bounds.or(render.use_absolute_bounds);

        Ok(config)
    }

    /// Default log filter when `RUST_LOG` is not set
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn,figma_svg_dl=info",
            1 => "info,figma_svg_dl=debug",
            _ => "debug,figma_svg_dl=trace",
        }
    }
}
