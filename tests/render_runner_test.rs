//! Renderer orchestration integration tests
//!
//! These exercise `SceneRunner` against stub renderer executables that
//! imitate manim's observable contract: argument order, output layout,
//! exit codes, and (mis)behavior under timeouts.

#![cfg(unix)]

mod support;

use sketchmotion::render::{Quality, RenderConfig, RenderError, SceneRunner};
use std::path::Path;
use std::time::{Duration, Instant};
use support::{invoked_script_path, stub_renderer, StubBehavior, SIMPLE_CIRCLE_SOURCE};
use tempfile::TempDir;

fn runner_with(behavior: StubBehavior, work_dir: &Path, timeout: Duration) -> SceneRunner {
    let program = stub_renderer(work_dir, behavior);
    SceneRunner::new(RenderConfig {
        program,
        work_dir: work_dir.to_path_buf(),
        quality: Quality::Low,
        timeout,
    })
}

#[tokio::test]
async fn test_successful_render_returns_expected_path() {
    let tmp = TempDir::new().unwrap();
    let runner = runner_with(StubBehavior::Succeed, tmp.path(), Duration::from_secs(30));

    let video = runner
        .render(SIMPLE_CIRCLE_SOURCE, "SimpleCircle")
        .await
        .expect("stub render should succeed");

    assert_eq!(video.scene_name, "SimpleCircle");
    assert!(video.video_path.is_file());

    // The path must follow media/videos/<stem>/480p15/<scene>.mp4 exactly.
    let script = invoked_script_path(tmp.path());
    let stem = script.file_stem().unwrap().to_str().unwrap();
    assert_eq!(
        video.video_path,
        tmp.path()
            .join("media")
            .join("videos")
            .join(stem)
            .join("480p15")
            .join("SimpleCircle.mp4")
    );
}

#[tokio::test]
async fn test_temp_script_removed_after_success() {
    let tmp = TempDir::new().unwrap();
    let runner = runner_with(StubBehavior::Succeed, tmp.path(), Duration::from_secs(30));

    runner
        .render(SIMPLE_CIRCLE_SOURCE, "SimpleCircle")
        .await
        .unwrap();

    let script = invoked_script_path(tmp.path());
    assert!(
        !script.exists(),
        "temporary script {} should have been removed",
        script.display()
    );
}

#[tokio::test]
async fn test_failed_render_carries_stderr() {
    let tmp = TempDir::new().unwrap();
    let runner = runner_with(StubBehavior::Fail, tmp.path(), Duration::from_secs(30));

    let err = runner
        .render(SIMPLE_CIRCLE_SOURCE, "SimpleCircle")
        .await
        .unwrap_err();

    match err {
        RenderError::RenderFailed {
            status,
            stdout,
            stderr,
        } => {
            assert_eq!(status.code(), Some(1));
            assert!(stdout.contains("Example render progress"));
            assert!(stderr.contains("SyntaxError: invalid manim scene"));
        }
        other => panic!("expected RenderFailed, got {:?}", other),
    }

    // Cleanup holds on the failure path too.
    assert!(!invoked_script_path(tmp.path()).exists());
}

#[tokio::test]
async fn test_timeout_kills_the_renderer() {
    let tmp = TempDir::new().unwrap();
    let runner = runner_with(StubBehavior::Hang, tmp.path(), Duration::from_secs(1));

    let start = Instant::now();
    let err = runner
        .render(SIMPLE_CIRCLE_SOURCE, "SimpleCircle")
        .await
        .unwrap_err();
    let elapsed = start.elapsed();

    // Timeout, not RenderFailed, and within the bound plus a small grace.
    assert!(matches!(err, RenderError::Timeout { .. }));
    assert!(
        elapsed < Duration::from_secs(6),
        "timeout took {:?}, expected ~1s + grace",
        elapsed
    );

    // The stub recorded its own pid before sleeping; it must be dead now.
    let pid = std::fs::read_to_string(tmp.path().join("renderer-pid.txt"))
        .expect("stub should have recorded its pid");
    let alive = std::process::Command::new("kill")
        .args(["-0", pid.trim()])
        .status()
        .map(|status| status.success())
        .unwrap_or(false);
    assert!(!alive, "renderer process {} still running", pid.trim());

    assert!(!invoked_script_path(tmp.path()).exists());
}

#[tokio::test]
async fn test_artifact_missing_lists_output_directory() {
    let tmp = TempDir::new().unwrap();
    let runner = runner_with(
        StubBehavior::WrongFolder,
        tmp.path(),
        Duration::from_secs(30),
    );

    let err = runner
        .render(SIMPLE_CIRCLE_SOURCE, "SimpleCircle")
        .await
        .unwrap_err();

    match err {
        RenderError::ArtifactMissing {
            expected, siblings, ..
        } => {
            assert!(expected.to_string_lossy().contains("480p15"));
            assert!(
                siblings.iter().any(|name| name.contains("720p30")),
                "siblings should reveal where the renderer actually wrote: {:?}",
                siblings
            );
        }
        other => panic!("expected ArtifactMissing, got {:?}", other),
    }

    assert!(!invoked_script_path(tmp.path()).exists());
}

#[tokio::test]
async fn test_missing_renderer_is_a_configuration_error() {
    let tmp = TempDir::new().unwrap();
    let runner = SceneRunner::new(RenderConfig {
        program: tmp.path().join("no-such-renderer"),
        work_dir: tmp.path().to_path_buf(),
        quality: Quality::Low,
        timeout: Duration::from_secs(5),
    });

    let err = runner
        .render(SIMPLE_CIRCLE_SOURCE, "SimpleCircle")
        .await
        .unwrap_err();

    assert!(matches!(err, RenderError::RendererNotFound { .. }));
}

#[tokio::test]
async fn test_stale_output_is_removed_before_rendering() {
    // Two consecutive renders in the same work dir use different script
    // stems, so the first render's output must survive the second run.
    let tmp = TempDir::new().unwrap();
    let runner = runner_with(StubBehavior::Succeed, tmp.path(), Duration::from_secs(30));

    let first = runner
        .render(SIMPLE_CIRCLE_SOURCE, "SimpleCircle")
        .await
        .unwrap();
    let second = runner
        .render(SIMPLE_CIRCLE_SOURCE, "SimpleCircle")
        .await
        .unwrap();

    assert_ne!(first.video_path, second.video_path);
    assert!(first.video_path.is_file());
    assert!(second.video_path.is_file());
}
