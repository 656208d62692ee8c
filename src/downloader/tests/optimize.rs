use crate::downloader::optimize_all;
use crate::downloader::test_helpers::{SAMPLE_SVG, recorder};
use crate::error::{Error, OptimizeError};
use crate::optimizer::{BuiltinOptimizer, OptimizerConfig, SvgOptimizer};
use crate::types::{Event, ProgressFn};
use async_trait::async_trait;
use tempfile::tempdir;

struct FailingOptimizer;

#[async_trait]
impl SvgOptimizer for FailingOptimizer {
    async fn optimize(&self, _svg: &str) -> crate::Result<String> {
        Err(OptimizeError::Tool {
            program: "svgo".into(),
            reason: "exit status 1: invalid plugin".into(),
        }
        .into())
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

struct BlankOptimizer;

#[async_trait]
impl SvgOptimizer for BlankOptimizer {
    async fn optimize(&self, _svg: &str) -> crate::Result<String> {
        Ok("  \n".into())
    }

    fn name(&self) -> &'static str {
        "blank"
    }
}

fn builtin() -> BuiltinOptimizer {
    BuiltinOptimizer::new(&OptimizerConfig::default())
}

#[tokio::test]
async fn test_optimize_all_rewrites_every_file_in_place() {
    let temp_dir = tempdir().unwrap();
    let paths = vec![
        temp_dir.path().join("icon-home.svg"),
        temp_dir.path().join("icon-search.svg"),
    ];
    for path in &paths {
        std::fs::write(path, SAMPLE_SVG).unwrap();
    }

    let (events, record) = recorder();
    optimize_all(&paths, &builtin(), Some(&record as &ProgressFn))
        .await
        .unwrap();

    for path in &paths {
        let content = std::fs::read_to_string(path).unwrap();
        assert!(!content.contains("<?xml"), "prologue removed from {path:?}");
        assert!(!content.contains("<!--"), "comment removed from {path:?}");
        assert!(content.starts_with("<svg"));
    }

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|event| matches!(
        event,
        Event::Optimized { total: 2, .. }
    )));
}

#[tokio::test]
async fn test_optimize_all_rejects_empty_file_but_optimizes_the_rest() {
    let temp_dir = tempdir().unwrap();
    let empty = temp_dir.path().join("empty.svg");
    let good = temp_dir.path().join("good.svg");
    std::fs::write(&empty, "").unwrap();
    std::fs::write(&good, SAMPLE_SVG).unwrap();

    let err = optimize_all(&[empty.clone(), good.clone()], &builtin(), None)
        .await
        .unwrap_err();

    match err {
        Error::Optimize(OptimizeError::EmptyFile { path }) => assert_eq!(path, empty),
        other => panic!("expected EmptyFile, got {other:?}"),
    }
    assert!(!std::fs::read_to_string(&good).unwrap().contains("<?xml"));
}

#[tokio::test]
async fn test_optimize_all_wraps_optimizer_failure_with_path() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("icon.svg");
    std::fs::write(&path, SAMPLE_SVG).unwrap();

    let err = optimize_all(std::slice::from_ref(&path), &FailingOptimizer, None)
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "optimize_failed");
    let message = err.to_string();
    assert!(message.contains("icon.svg"));
    assert!(message.contains("invalid plugin"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), SAMPLE_SVG, "file untouched");
}

#[tokio::test]
async fn test_optimize_all_leaves_malformed_svg_untouched() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("broken.svg");
    let broken = "<svg><g></svg>";
    std::fs::write(&path, broken).unwrap();

    let err = optimize_all(std::slice::from_ref(&path), &builtin(), None)
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "optimize_failed");
    let message = err.to_string();
    assert!(message.contains("broken.svg"));
    assert!(message.contains("not a well-formed SVG document"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), broken);
}

#[tokio::test]
async fn test_optimize_all_rejects_blank_optimizer_output() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("icon.svg");
    std::fs::write(&path, SAMPLE_SVG).unwrap();

    let err = optimize_all(std::slice::from_ref(&path), &BlankOptimizer, None)
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "optimize_failed");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), SAMPLE_SVG);
}

#[tokio::test]
async fn test_optimize_all_reports_missing_file_as_read_error() {
    let temp_dir = tempdir().unwrap();
    let missing = temp_dir.path().join("missing.svg");

    let err = optimize_all(&[missing], &builtin(), None)
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "read_failed");
}

#[tokio::test]
async fn test_optimize_all_with_no_files_is_a_no_op() {
    let (events, record) = recorder();
    optimize_all(&[], &builtin(), Some(&record as &ProgressFn))
        .await
        .unwrap();
    assert!(events.lock().unwrap().is_empty());
}
