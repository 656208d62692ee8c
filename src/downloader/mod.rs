//! Download and optimize orchestration
//!
//! Takes the render results (export name → URL) and turns them into files:
//! - [`download_all`] - prepares the output directory, downloads every URL at
//!   once and writes each file as soon as its body arrives
//! - [`optimize_all`] - rewrites every written file through an [`SvgOptimizer`]
//!
//! Both phases launch all items together and wait for all of them. A failed item
//! does not stop the others; once everything has settled, the first failure is
//! returned. Files that were written successfully stay on disk.
//!
//! [`SvgOptimizer`]: crate::optimizer::SvgOptimizer

mod download;
mod optimize;
mod paths;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

pub use download::{DownloadParams, download_all};
pub use optimize::optimize_all;
pub use paths::{Destination, plan_destinations};

use crate::error::{Error, Result};

/// Settle a set of per-item results, keeping successes in order.
///
/// Returns the first error (in item order) if any item failed.
fn settle<T>(phase: &'static str, results: Vec<Result<T>>) -> Result<Vec<T>> {
    let total = results.len();
    let mut values = Vec::with_capacity(total);
    let mut first_error: Option<Error> = None;
    let mut failed = 0usize;

    for result in results {
        match result {
            Ok(value) => values.push(value),
            Err(e) => {
                failed += 1;
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    match first_error {
        Some(e) => {
            tracing::error!(phase, failed, total, error = %e, "some items failed");
            Err(e)
        }
        None => Ok(values),
    }
}
