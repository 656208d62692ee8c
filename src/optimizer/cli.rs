//! External optimizer using an `svgo`-compatible binary

use super::CommandConfig;
use super::traits::SvgOptimizer;
use crate::error::{OptimizeError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Default binary looked up in PATH when no program is configured
const DEFAULT_PROGRAM: &str = "svgo";

/// Arguments that make svgo read from stdin and write to stdout
const DEFAULT_ARGS: [&str; 4] = ["--input", "-", "--output", "-"];

/// Optimizer that pipes each SVG through an external binary
///
/// The SVG is written to the child's stdin and the optimized document is read
/// from its stdout. A non-zero exit status fails the file.
///
/// # Examples
///
/// ```no_run
/// use figma_svg_dl::optimizer::{CommandConfig, CommandOptimizer, SvgOptimizer};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // Looks up `svgo` in PATH
/// let optimizer = CommandOptimizer::from_config(&CommandConfig::default())?;
/// let svg = optimizer.optimize("<svg>\n</svg>").await?;
/// # Ok(())
/// # }
/// ```
pub struct CommandOptimizer {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandOptimizer {
    /// Create an optimizer with an explicit binary and arguments
    pub fn new(program: PathBuf, args: Vec<String>) -> Self {
        let args = if args.is_empty() {
            DEFAULT_ARGS.iter().map(|a| a.to_string()).collect()
        } else {
            args
        };
        Self { program, args }
    }

    /// Build from a command configuration
    ///
    /// Bare program names are looked up in PATH; paths are used as given.
    pub fn from_config(config: &CommandConfig) -> Result<Self> {
        let requested = config
            .program
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROGRAM));

        let program = if is_bare_name(&requested) {
            which::which(&requested).map_err(|_| OptimizeError::ToolNotFound {
                program: requested.display().to_string(),
            })?
        } else if requested.exists() {
            requested
        } else {
            return Err(OptimizeError::ToolNotFound {
                program: requested.display().to_string(),
            }
            .into());
        };

        Ok(Self::new(program, config.args.clone()))
    }

    fn tool_error(&self, reason: String) -> crate::Error {
        OptimizeError::Tool {
            program: self.program.display().to_string(),
            reason,
        }
        .into()
    }
}

fn is_bare_name(program: &Path) -> bool {
    program.components().count() == 1 && !program.is_absolute()
}

#[async_trait]
impl SvgOptimizer for CommandOptimizer {
    async fn optimize(&self, svg: &str) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.tool_error(format!("failed to execute: {e}")))?;

        let stdin = child.stdin.take();
        let feed = async move {
            match stdin {
                // Dropping stdin after the write closes the pipe so the child sees EOF
                Some(mut stdin) => stdin.write_all(svg.as_bytes()).await,
                None => Ok(()),
            }
        };

        // Feed and drain together so a child that streams output cannot block on a full pipe
        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        let output = output.map_err(|e| self.tool_error(format!("failed to wait: {e}")))?;

        if !output.status.success() {
            return Err(self.tool_error(format!(
                "exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        fed.map_err(|e| self.tool_error(format!("failed to write stdin: {e}")))?;

        String::from_utf8(output.stdout)
            .map_err(|e| self.tool_error(format!("produced invalid UTF-8: {e}")))
    }

    fn name(&self) -> &'static str {
        "command"
    }
}
