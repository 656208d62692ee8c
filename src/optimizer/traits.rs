//! Trait for SVG optimizers

use async_trait::async_trait;

/// Trait for SVG optimization passes
///
/// An optimizer is a pure transform from SVG text to SVG text. Implementations
/// may run in-process or delegate to an external binary; the orchestrator reads
/// each written file, calls [`optimize`](SvgOptimizer::optimize) and writes the
/// result back.
///
/// # Examples
///
/// ```
/// use figma_svg_dl::optimizer::{BuiltinOptimizer, OptimizerConfig, SvgOptimizer};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let optimizer = BuiltinOptimizer::new(&OptimizerConfig::default());
/// let svg = optimizer
///     .optimize("<!-- exported --><svg>\n  <path d=\"M0 0\"/>\n</svg>")
///     .await?;
/// assert_eq!(svg, "<svg><path d=\"M0 0\"/></svg>");
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait SvgOptimizer: Send + Sync {
    /// Optimize one SVG document
    ///
    /// # Errors
    ///
    /// Returns an error if the transform cannot be applied (for example when an
    /// external optimizer exits with a failure status).
    async fn optimize(&self, svg: &str) -> crate::Result<String>;

    /// Short name of the implementation, for logging
    fn name(&self) -> &'static str;
}
