//! Error types for figma-svg-dl
//!
//! This module provides the error taxonomy for the export pipeline:
//! - Configuration errors, raised before any network or disk I/O
//! - Fetch errors for the document and image-render endpoints
//! - Render errors for contract violations in render responses
//! - Download and optimize errors, aggregated per phase
//!
//! Every variant carries the operation and the offending identifier, URL or path
//! so the top level can report a useful message without further context.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for figma-svg-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for figma-svg-dl
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "accessToken")
        key: Option<String>,
    },

    /// Document or render request failed
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Render response violated the expected contract
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Download phase failed
    #[error("download error: {0}")]
    Download(#[from] DownloadError),

    /// Optimize phase failed
    #[error("optimize error: {0}")]
    Optimize(#[from] OptimizeError),

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl Error {
    /// Build a configuration error for a specific key
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }
}

/// Errors from the document and image-render endpoints
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, TLS, body read)
    #[error("{operation} failed: {message}")]
    Request {
        /// The operation being performed (e.g., "fetch document")
        operation: String,
        /// Transport error message
        message: String,
    },

    /// The service answered with a non-success status
    #[error("{operation} returned HTTP {status}: {body}")]
    Http {
        /// The operation being performed
        operation: String,
        /// HTTP status code
        status: u16,
        /// Response body, as returned by the service
        body: String,
    },

    /// The service reported an error in its response body
    #[error("{operation} reported an error: {message}")]
    Service {
        /// The operation being performed
        operation: String,
        /// The `err` field of the response
        message: String,
    },

    /// The response body could not be decoded
    #[error("{operation} returned an unreadable response: {message}")]
    Decode {
        /// The operation being performed
        operation: String,
        /// Decoder error message
        message: String,
    },
}

/// Contract violations in image-render responses
#[derive(Debug, Error)]
pub enum RenderError {
    /// The service returned a URL for a node that was never requested
    #[error("render response contains unrequested node {node_id}")]
    UnknownNode {
        /// The unexpected node identifier
        node_id: String,
    },

    /// The service returned an empty or null URL
    #[error("no image was rendered for node {node_id} ({name})")]
    EmptyUrl {
        /// The node identifier with an empty URL
        node_id: String,
        /// Export name of the node
        name: String,
    },

    /// A requested node is absent from every render response
    #[error("render response is missing node {node_id} ({name})")]
    MissingUrl {
        /// The missing node identifier
        node_id: String,
        /// Export name of the node
        name: String,
    },

    /// Two candidates would be rendered under the same export name
    #[error("nodes {first} and {second} share the export name {name:?}")]
    DuplicateName {
        /// The shared export name
        name: String,
        /// Node that claimed the name first
        first: String,
        /// Node that claimed it again
        second: String,
    },
}

/// Download phase errors
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Clearing the output directory failed
    #[error("failed to clear output directory {path}: {reason}")]
    ClearDir {
        /// The output directory
        path: PathBuf,
        /// The underlying failure
        reason: String,
    },

    /// Creating the output directory failed
    #[error("failed to create output directory {path}: {reason}")]
    CreateDir {
        /// The output directory
        path: PathBuf,
        /// The underlying failure
        reason: String,
    },

    /// Two export names map to the same file
    #[error("export names {first:?} and {second:?} both map to {path}")]
    NameCollision {
        /// The first export name
        first: String,
        /// The second export name
        second: String,
        /// The shared destination path
        path: PathBuf,
    },

    /// An export name has no characters usable in a file name
    #[error("export name {name:?} produces an empty file name")]
    EmptyFileName {
        /// The export name
        name: String,
    },

    /// Fetching a render URL failed before a response arrived
    #[error("failed to fetch {url}: {message}")]
    Request {
        /// The URL being downloaded
        url: String,
        /// Transport error message
        message: String,
    },

    /// A render URL answered with a non-success status
    #[error("fetching {url} returned HTTP {status}: {body}")]
    Http {
        /// The URL being downloaded
        url: String,
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Writing a downloaded file failed
    #[error("failed to write {path}: {reason}")]
    Write {
        /// The destination path
        path: PathBuf,
        /// The underlying failure
        reason: String,
    },
}

/// Optimize phase errors
#[derive(Debug, Error)]
pub enum OptimizeError {
    /// The optimizer configuration could not be loaded
    #[error("failed to load optimizer config {path}: {reason}")]
    ConfigLoad {
        /// Path of the config file
        path: PathBuf,
        /// The underlying failure
        reason: String,
    },

    /// The external optimizer binary could not be found
    #[error("optimizer binary {program} not found")]
    ToolNotFound {
        /// Name or path of the binary
        program: String,
    },

    /// The external optimizer ran but failed
    #[error("{program} failed: {reason}")]
    Tool {
        /// Name or path of the binary
        program: String,
        /// Exit status and stderr, or the spawn failure
        reason: String,
    },

    /// Reading a written file failed
    #[error("failed to read {path}: {reason}")]
    Read {
        /// The file being optimized
        path: PathBuf,
        /// The underlying failure
        reason: String,
    },

    /// A written file has no content
    #[error("{path} is empty")]
    EmptyFile {
        /// The empty file
        path: PathBuf,
    },

    /// The built-in optimizer could not parse or re-serialize the document
    #[error("not a well-formed SVG document: {reason}")]
    InvalidSvg {
        /// Parser or writer failure
        reason: String,
    },

    /// The optimizer rejected the input
    #[error("failed to optimize {path}: {reason}")]
    Transform {
        /// The file being optimized
        path: PathBuf,
        /// The optimizer's failure
        reason: String,
    },

    /// Writing the optimized result failed
    #[error("failed to write {path}: {reason}")]
    Write {
        /// The file being optimized
        path: PathBuf,
        /// The underlying failure
        reason: String,
    },
}

impl Error {
    /// Machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Config { .. } => "config_error",
            Error::Fetch(e) => match e {
                FetchError::Request { .. } => "request_failed",
                FetchError::Http { .. } => "http_error",
                FetchError::Service { .. } => "service_error",
                FetchError::Decode { .. } => "decode_error",
            },
            Error::Render(e) => match e {
                RenderError::UnknownNode { .. } => "unknown_node",
                RenderError::EmptyUrl { .. } => "empty_render_url",
                RenderError::MissingUrl { .. } => "missing_render_url",
                RenderError::DuplicateName { .. } => "duplicate_export_name",
            },
            Error::Download(e) => match e {
                DownloadError::ClearDir { .. } => "clear_dir_failed",
                DownloadError::CreateDir { .. } => "create_dir_failed",
                DownloadError::NameCollision { .. } => "name_collision",
                DownloadError::EmptyFileName { .. } => "empty_file_name",
                DownloadError::Request { .. } => "download_failed",
                DownloadError::Http { .. } => "download_http_error",
                DownloadError::Write { .. } => "write_failed",
            },
            Error::Optimize(e) => match e {
                OptimizeError::ConfigLoad { .. } => "optimizer_config_error",
                OptimizeError::ToolNotFound { .. } => "optimizer_not_found",
                OptimizeError::Tool { .. } => "optimizer_tool_failed",
                OptimizeError::Read { .. } => "read_failed",
                OptimizeError::EmptyFile { .. } => "empty_file",
                OptimizeError::InvalidSvg { .. } => "invalid_svg",
                OptimizeError::Transform { .. } => "optimize_failed",
                OptimizeError::Write { .. } => "write_failed",
            },
            Error::Network(_) => "network_error",
        }
    }

    /// Process exit status for this error
    ///
    /// Every pipeline failure maps to 1; 0 is reserved for success and "nothing to export".
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// Whether the failure happened before any network or disk I/O
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config { .. })
    }
}
