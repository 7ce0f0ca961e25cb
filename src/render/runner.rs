//! Renderer subprocess orchestration
//!
//! This module owns the lifecycle of one render: persist the generated code
//! to a uniquely named temporary script, clear stale output for that stem,
//! invoke `manim` as a child process with a bounded wait, and classify the
//! outcome. The temporary script is removed on every exit path; the child
//! never outlives the request (timeout force-kills it).

use super::paths::{clean_stale_media, expected_video_path, script_media_dir};
use super::quality::Quality;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Bound on post-kill output draining
const DRAIN_GRACE: Duration = Duration::from_secs(2);

/// Configuration for renderer invocation
///
/// Passed into [`SceneRunner::new`] explicitly so tests can substitute a
/// stub renderer and an isolated working directory per test case.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Renderer executable (name on PATH or absolute path)
    pub program: PathBuf,
    /// Working directory for the child; media output lands beneath it
    pub work_dir: PathBuf,
    /// Quality profile for this process
    pub quality: Quality,
    /// Bound on how long one render may take
    pub timeout: Duration,
}

impl RenderConfig {
    /// Root of the renderer's media output tree
    pub fn media_root(&self) -> PathBuf {
        self.work_dir.join("media")
    }
}

/// A successfully rendered video artifact
#[derive(Debug, Clone, Serialize)]
pub struct RenderedVideo {
    /// Path to the produced video file
    pub video_path: PathBuf,
    /// Scene that was rendered
    pub scene_name: String,
    /// Wall-clock time the render took
    pub render_time: Duration,
}

/// Classified render failures
#[derive(Debug, Error)]
pub enum RenderError {
    /// Renderer executable missing from the environment
    #[error("renderer '{program}' not found. Ensure Manim is installed and on your PATH")]
    RendererNotFound { program: String },

    /// Child process exited non-zero
    #[error("renderer execution failed ({status})")]
    RenderFailed {
        status: ExitStatus,
        stdout: String,
        stderr: String,
    },

    /// Child exited zero but the expected file is absent; indicates a
    /// mismatch between the path convention here and actual renderer
    /// behavior, or a renderer version change
    #[error("renderer reported success, but no video was found at {}", .expected.display())]
    ArtifactMissing {
        expected: PathBuf,
        stdout: String,
        stderr: String,
        /// Best-effort listing of the script's output directory
        siblings: Vec<String>,
    },

    /// Bounded wait exceeded; the child was force-killed
    #[error("rendering timed out after {} seconds; the animation may be too complex", .limit.as_secs())]
    Timeout {
        limit: Duration,
        stdout: String,
        stderr: String,
    },

    /// Spawn or wait failed at the OS level
    #[error("failed to run renderer: {0}")]
    Io(#[from] io::Error),
}

impl RenderError {
    /// Captured renderer output for diagnostics, where the variant has any
    pub fn captured_output(&self) -> Option<(&str, &str)> {
        match self {
            RenderError::RenderFailed { stdout, stderr, .. }
            | RenderError::ArtifactMissing { stdout, stderr, .. }
            | RenderError::Timeout { stdout, stderr, .. } => Some((stdout, stderr)),
            _ => None,
        }
    }
}

/// Uniquely named on-disk script holding generated code for one render
///
/// Removal is guaranteed on all exit paths: explicit [`TempScript::remove`]
/// on the normal path, `Drop` as the backstop for early returns and panics.
/// Removal failures are logged, never escalated.
struct TempScript {
    path: PathBuf,
    removed: bool,
}

impl TempScript {
    fn create(source: &str) -> io::Result<Self> {
        let path = std::env::temp_dir().join(format!("sketchmotion-{}.py", Uuid::new_v4().simple()));
        std::fs::write(&path, source)?;
        debug!(script = %path.display(), "wrote temporary scene script");
        Ok(Self {
            path,
            removed: false,
        })
    }

    fn path(&self) -> &Path {
        &self.path
    }

    /// Script file name without the `.py` extension; doubles as the media
    /// output directory name
    fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "sketchmotion-script".to_string())
    }

    fn remove(mut self) {
        self.remove_now();
    }

    fn remove_now(&mut self) {
        if self.removed {
            return;
        }
        self.removed = true;
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!(
                    script = %self.path.display(),
                    error = %e,
                    "could not remove temporary scene script"
                );
            }
        }
    }
}

impl Drop for TempScript {
    fn drop(&mut self) {
        self.remove_now();
    }
}

/// Runs the external renderer for one scene at a time
///
/// Each call spawns exactly one child process and creates exactly one
/// temporary script; neither survives the call.
#[derive(Debug)]
pub struct SceneRunner {
    config: RenderConfig,
}

impl SceneRunner {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Renders `scene_name` from `source`, returning the artifact path or a
    /// classified failure
    pub async fn render(
        &self,
        source: &str,
        scene_name: &str,
    ) -> Result<RenderedVideo, RenderError> {
        let script = TempScript::create(source)?;
        let result = self.render_script(script.path(), &script.stem(), scene_name).await;
        script.remove();
        result
    }

    async fn render_script(
        &self,
        script_path: &Path,
        script_stem: &str,
        scene_name: &str,
    ) -> Result<RenderedVideo, RenderError> {
        let media_root = self.config.media_root();

        std::fs::create_dir_all(&self.config.work_dir)?;
        clean_stale_media(&media_root, script_stem);

        let expected =
            expected_video_path(&media_root, script_stem, scene_name, self.config.quality);

        let mut cmd = Command::new(&self.config.program);
        cmd.arg(self.config.quality.cli_flag())
            .arg(script_path)
            .arg(scene_name)
            .current_dir(&self.config.work_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(windows)]
        cmd.creation_flags(CREATE_NO_WINDOW);

        debug!(
            program = %self.config.program.display(),
            scene = scene_name,
            quality = %self.config.quality,
            "spawning renderer"
        );

        let start = Instant::now();
        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                RenderError::RendererNotFound {
                    program: self.config.program.display().to_string(),
                }
            } else {
                RenderError::Io(e)
            }
        })?;

        // Drain both pipes concurrently with the wait, otherwise a chatty
        // renderer can fill the pipe buffer and deadlock against us.
        let stdout_task = drain_pipe(child.stdout.take());
        let stderr_task = drain_pipe(child.stderr.take());

        let status = match tokio::time::timeout(self.config.timeout, child.wait()).await {
            Ok(wait_result) => wait_result?,
            Err(_) => {
                warn!(
                    timeout_secs = self.config.timeout.as_secs(),
                    scene = scene_name,
                    "renderer exceeded timeout, killing child"
                );
                if let Err(e) = child.start_kill() {
                    warn!(error = %e, "could not signal renderer child");
                }
                // Reap the child so the kill is observed before returning,
                // then drain whatever output it managed to produce. The
                // drain is bounded: a grandchild that survived the kill can
                // hold the pipe open indefinitely.
                let _ = child.wait().await;
                let stdout = collect_within(stdout_task, DRAIN_GRACE).await;
                let stderr = collect_within(stderr_task, DRAIN_GRACE).await;
                return Err(RenderError::Timeout {
                    limit: self.config.timeout,
                    stdout,
                    stderr,
                });
            }
        };

        let stdout = stdout_task.await.unwrap_or_default();
        let stderr = stderr_task.await.unwrap_or_default();
        let render_time = start.elapsed();

        if !status.success() {
            return Err(RenderError::RenderFailed {
                status,
                stdout,
                stderr,
            });
        }

        if !expected.is_file() {
            let siblings = list_dir_names(&script_media_dir(&media_root, script_stem));
            return Err(RenderError::ArtifactMissing {
                expected,
                stdout,
                stderr,
                siblings,
            });
        }

        info!(
            video = %expected.display(),
            elapsed_secs = render_time.as_secs_f64(),
            "render complete"
        );

        Ok(RenderedVideo {
            video_path: expected,
            scene_name: scene_name.to_string(),
            render_time,
        })
    }
}

/// Awaits a drain task for at most `grace`, then gives up on the output
async fn collect_within(mut task: JoinHandle<String>, grace: Duration) -> String {
    match tokio::time::timeout(grace, &mut task).await {
        Ok(Ok(output)) => output,
        Ok(Err(_)) => String::new(),
        Err(_) => {
            task.abort();
            String::new()
        }
    }
}

/// Reads a child pipe to EOF on a background task, lossily as UTF-8
fn drain_pipe<R>(pipe: Option<R>) -> JoinHandle<String>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf).await;
        }
        String::from_utf8_lossy(&buf).into_owned()
    })
}

/// Best-effort recursive listing of an output directory for diagnostics
fn list_dir_names(dir: &Path) -> Vec<String> {
    let mut names = Vec::new();
    let Ok(entries) = std::fs::read_dir(dir) else {
        return names;
    };
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.path().is_dir() {
            for nested in list_dir_names(&entry.path()) {
                names.push(format!("{}/{}", name, nested));
            }
        }
        names.push(name);
    }
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_script_is_unique_and_removed() {
        let a = TempScript::create("x = 1").unwrap();
        let b = TempScript::create("x = 2").unwrap();
        assert_ne!(a.path(), b.path());

        let a_path = a.path().to_path_buf();
        assert!(a_path.exists());
        a.remove();
        assert!(!a_path.exists());

        let b_path = b.path().to_path_buf();
        drop(b);
        assert!(!b_path.exists());
    }

    #[test]
    fn test_temp_script_stem_matches_file_name() {
        let script = TempScript::create("pass").unwrap();
        let stem = script.stem();
        assert!(stem.starts_with("sketchmotion-"));
        assert!(script
            .path()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with(&stem));
    }

    #[test]
    fn test_media_root_is_under_work_dir() {
        let config = RenderConfig {
            program: PathBuf::from("manim"),
            work_dir: PathBuf::from("/tmp/render"),
            quality: Quality::Low,
            timeout: Duration::from_secs(120),
        };
        assert_eq!(config.media_root(), PathBuf::from("/tmp/render/media"));
    }

    #[test]
    fn test_list_dir_names_missing_dir_is_empty() {
        assert!(list_dir_names(Path::new("/definitely/not/here")).is_empty());
    }

    #[tokio::test]
    async fn test_renderer_not_found_is_classified() {
        let runner = SceneRunner::new(RenderConfig {
            program: PathBuf::from("definitely-not-a-renderer-binary"),
            work_dir: std::env::temp_dir().join("sketchmotion-test-missing"),
            quality: Quality::Low,
            timeout: Duration::from_secs(5),
        });

        let result = runner.render("class Foo(Scene): pass", "Foo").await;
        assert!(matches!(
            result,
            Err(RenderError::RendererNotFound { .. })
        ));
    }
}
