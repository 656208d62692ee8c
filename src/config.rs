//! Configuration types for figma-svg-dl
//!
//! [`Config`] is assembled from a JSON config file, environment variables and
//! command-line flags, then checked once with [`Config::validate`]. The validated
//! value is passed explicitly through every pipeline stage and never mutated.

use crate::error::{Error, Result};
use crate::naming::NamingStrategy;
use crate::optimizer::OptimizerSource;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default remote API endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://api.figma.com/v1";

/// Maximum number of node identifiers sent in one render request
pub const DEFAULT_BATCH_SIZE: usize = 300;

/// Scale the render service applies when none is given
pub const DEFAULT_SCALE: f64 = 1.0;

/// Smallest scale accepted by the render service
pub const MIN_SCALE: f64 = 0.01;

/// Largest scale accepted by the render service
pub const MAX_SCALE: f64 = 4.0;

/// Remote rendering options
///
/// Every option is optional; unset options are not sent and the service default
/// applies.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    /// Image scale factor, between 0.01 and 4 (service default: 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,

    /// Render text as outlines instead of `<text>` elements (service default: true)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline_text: Option<bool>,

    /// Include layer names as `id` attributes (service default: false)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_id: Option<bool>,

    /// Include node identifiers as `data-node-id` attributes (service default: false)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_node_id: Option<bool>,

    /// Simplify inside/outside strokes to center strokes (service default: true)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simplify_stroke: Option<bool>,

    /// Exclude overlapping content from the render (service default: true)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents_only: Option<bool>,

    /// Use the node's full dimensions regardless of cropping (service default: false)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_absolute_bounds: Option<bool>,
}

impl RenderOptions {
    /// Query parameters for the options that are set, in a fixed order
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(scale) = self.scale {
            pairs.push(("scale", scale.to_string()));
        }
        let flags = [
            ("svg_outline_text", self.outline_text),
            ("svg_include_id", self.include_id),
            ("svg_include_node_id", self.include_node_id),
            ("svg_simplify_stroke", self.simplify_stroke),
            ("contents_only", self.contents_only),
            ("use_absolute_bounds", self.use_absolute_bounds),
        ];
        for (key, value) in flags {
            if let Some(value) = value {
                pairs.push((key, value.to_string()));
            }
        }
        pairs
    }
}

/// Main configuration for an export run
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Personal access token sent as `X-Figma-Token`
    #[serde(default)]
    pub access_token: String,

    /// Key of the design file (the part after `/file/` in its URL)
    #[serde(default)]
    pub file_id: String,

    /// Restrict the document fetch to these nodes (empty = whole file)
    #[serde(default)]
    pub node_ids: Vec<String>,

    /// Directory the SVG files are written to
    #[serde(default)]
    pub output_dir: PathBuf,

    /// Remove the output directory before writing (default: false)
    #[serde(default)]
    pub clear_output_dir: bool,

    /// Casing strategy for file names (default: kebab)
    #[serde(default)]
    pub naming: NamingStrategy,

    /// Optimizer configuration, inline or a path to a JSON file
    #[serde(default, rename = "svgoConfig", skip_serializing_if = "Option::is_none")]
    pub optimizer: Option<OptimizerSource>,

    /// Remote rendering options
    #[serde(default)]
    pub render: RenderOptions,

    /// Base URL of the remote API (default: "https://api.figma.com/v1")
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Node identifiers per render request (default: 300)
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Base directory for relative optimizer config paths (default: current directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            file_id: String::new(),
            node_ids: Vec::new(),
            output_dir: PathBuf::new(),
            clear_output_dir: false,
            naming: NamingStrategy::default(),
            optimizer: None,
            render: RenderOptions::default(),
            api_base_url: default_api_base_url(),
            batch_size: default_batch_size(),
            working_dir: None,
        }
    }
}

impl Config {
    /// Load a configuration from a JSON file
    ///
    /// Missing keys take their defaults; the result still has to be validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("cannot read config file {}: {}", path.display(), e),
            key: None,
        })?;
        serde_json::from_str(&content).map_err(|e| Error::Config {
            message: format!("invalid config file {}: {}", path.display(), e),
            key: None,
        })
    }

    /// Normalize and validate the configuration
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// 1. node identifiers are normalized (never fails)
    /// 2. output directory is present
    /// 3. access token is present
    /// 4. file identifier is present
    /// 5. scale, when set to something other than the default, is within range
    /// 6. batch size is positive and the API base URL is absolute
    pub fn validate(mut self) -> Result<Self> {
        self.node_ids = normalize_node_ids(&self.node_ids);

        if self.output_dir.as_os_str().is_empty() {
            return Err(Error::config("outputDir", "output directory is required"));
        }

        self.access_token = self.access_token.trim().to_string();
        if self.access_token.is_empty() {
            return Err(Error::config("accessToken", "access token is required"));
        }

        self.file_id = self.file_id.trim().to_string();
        if self.file_id.is_empty() {
            return Err(Error::config("fileId", "file id is required"));
        }

        if let Some(scale) = self.render.scale
            && scale != DEFAULT_SCALE
            && !(MIN_SCALE..=MAX_SCALE).contains(&scale)
        {
            return Err(Error::config(
                "scale",
                format!("scale must be between {MIN_SCALE} and {MAX_SCALE}, got {scale}"),
            ));
        }

        if self.batch_size == 0 {
            return Err(Error::config("batchSize", "batch size must be at least 1"));
        }

        match url::Url::parse(&self.api_base_url) {
            Ok(url) if !url.cannot_be_a_base() => {}
            Ok(_) => {
                return Err(Error::config(
                    "apiBaseUrl",
                    format!("API base URL {} is not a base URL", self.api_base_url),
                ));
            }
            Err(e) => {
                return Err(Error::config(
                    "apiBaseUrl",
                    format!("invalid API base URL {}: {}", self.api_base_url, e),
                ));
            }
        }

        Ok(self)
    }

    /// Directory relative optimizer config paths are resolved against
    pub fn working_dir(&self) -> PathBuf {
        self.working_dir
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_default()
    }
}

/// Normalize node identifiers to the service's `a:b` form.
///
/// Entries are trimmed, dashes (as they appear in browser URLs) become colons, and
/// empty entries are dropped, so a list of blanks collapses to "no filter".
pub fn normalize_node_ids<S: AsRef<str>>(ids: &[S]) -> Vec<String> {
    ids.iter()
        .map(|id| id.as_ref().trim().replace('-', ":"))
        .filter(|id| !id.is_empty())
        .collect()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            access_token: "figd_token".into(),
            file_id: "AbC123".into(),
            output_dir: PathBuf::from("icons"),
            ..Default::default()
        }
    }

    fn config_key(err: Error) -> Option<String> {
        match err {
            Error::Config { key, .. } => key,
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn valid_config_passes() {
        let config = valid_config().validate().unwrap();
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn empty_access_token_is_rejected() {
        let err = Config {
            access_token: String::new(),
            ..valid_config()
        }
        .validate()
        .unwrap_err();
        assert_eq!(config_key(err).as_deref(), Some("accessToken"));
    }

    #[test]
    fn whitespace_access_token_is_rejected() {
        let err = Config {
            access_token: "   ".into(),
            ..valid_config()
        }
        .validate()
        .unwrap_err();
        assert_eq!(config_key(err).as_deref(), Some("accessToken"));
    }

    #[test]
    fn scale_out_of_range_is_rejected() {
        let mut config = valid_config();
        config.render.scale = Some(5.0);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("scale"));
        assert_eq!(config_key(err).as_deref(), Some("scale"));

        let mut config = valid_config();
        config.render.scale = Some(0.001);
        assert!(config.validate().is_err());
    }

    #[test]
    fn scale_bounds_and_default_are_accepted() {
        for scale in [MIN_SCALE, DEFAULT_SCALE, MAX_SCALE, 2.5] {
            let mut config = valid_config();
            config.render.scale = Some(scale);
            assert!(config.validate().is_ok(), "scale {scale} should be valid");
        }
    }

    #[test]
    fn node_ids_are_normalized() {
        let config = Config {
            node_ids: vec!["5432-1234".into(), " 1234:9876 ".into()],
            ..valid_config()
        }
        .validate()
        .unwrap();
        assert_eq!(config.node_ids, vec!["5432:1234", "1234:9876"]);
    }

    #[test]
    fn blank_node_ids_collapse_to_no_filter() {
        let config = Config {
            node_ids: vec!["".into(), "   ".into()],
            ..valid_config()
        }
        .validate()
        .unwrap();
        assert!(config.node_ids.is_empty());
    }

    #[test]
    fn checks_run_in_order() {
        // Everything is missing: the output directory is reported first.
        let err = Config::default().validate().unwrap_err();
        assert_eq!(config_key(err).as_deref(), Some("outputDir"));

        let err = Config {
            output_dir: PathBuf::from("out"),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(config_key(err).as_deref(), Some("accessToken"));

        let err = Config {
            output_dir: PathBuf::from("out"),
            access_token: "t".into(),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(config_key(err).as_deref(), Some("fileId"));
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let err = Config {
            batch_size: 0,
            ..valid_config()
        }
        .validate()
        .unwrap_err();
        assert_eq!(config_key(err).as_deref(), Some("batchSize"));
    }

    #[test]
    fn relative_api_url_is_rejected() {
        let err = Config {
            api_base_url: "api.figma.com".into(),
            ..valid_config()
        }
        .validate()
        .unwrap_err();
        assert_eq!(config_key(err).as_deref(), Some("apiBaseUrl"));
    }

    #[test]
    fn render_options_only_emit_set_values() {
        let options = RenderOptions {
            scale: Some(2.0),
            outline_text: Some(false),
            use_absolute_bounds: Some(true),
            ..Default::default()
        };
        assert_eq!(
            options.query_pairs(),
            vec![
                ("scale", "2".to_string()),
                ("svg_outline_text", "false".to_string()),
                ("use_absolute_bounds", "true".to_string()),
            ]
        );
        assert!(RenderOptions::default().query_pairs().is_empty());
    }

    #[test]
    fn config_file_uses_camel_case_and_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figma-export.json");
        std::fs::write(
            &path,
            r#"{
                "fileId": "KEY",
                "outputDir": "./icons",
                "naming": "pascalSnake",
                "nodeIds": ["1-2"],
                "render": { "scale": 2, "outlineText": true },
                "svgoConfig": "svgo.json"
            }"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.file_id, "KEY");
        assert_eq!(config.naming, NamingStrategy::PascalSnake);
        assert_eq!(config.render.scale, Some(2.0));
        assert_eq!(config.render.outline_text, Some(true));
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
        assert!(matches!(
            config.optimizer,
            Some(OptimizerSource::Path(ref p)) if p == Path::new("svgo.json")
        ));
    }

    #[test]
    fn unreadable_config_file_is_a_config_error() {
        let err = Config::from_file(Path::new("/nonexistent/figma-export.json")).unwrap_err();
        assert!(err.is_config());
    }
}
