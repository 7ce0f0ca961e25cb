//! Output path resolution and stale-output cleanup
//!
//! Manim writes rendered videos under
//! `<media-root>/videos/<script-stem>/<quality-folder>/<SceneName>.mp4`
//! relative to the directory it runs in. The functions here reproduce that
//! convention so the runner can locate an artifact without parsing renderer
//! output, and clear leftovers from a previous run of the same script stem
//! so an old video can never be mistaken for a fresh one.

use super::quality::Quality;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File extension of rendered video artifacts
pub const VIDEO_EXT: &str = "mp4";

/// Media directory for one script stem: `<media-root>/videos/<stem>`
pub fn script_media_dir(media_root: &Path, script_stem: &str) -> PathBuf {
    media_root.join("videos").join(script_stem)
}

/// Resolves the path Manim is expected to write the rendered video to
pub fn expected_video_path(
    media_root: &Path,
    script_stem: &str,
    scene_name: &str,
    quality: Quality,
) -> PathBuf {
    script_media_dir(media_root, script_stem)
        .join(quality.folder())
        .join(format!("{}.{}", scene_name, VIDEO_EXT))
}

/// Removes any previous output directory for this script stem
///
/// Possible only through stem reuse or a prior partial run. Deletion
/// failure is downgraded to a warning; the render proceeds and accepts the
/// (small) risk of a stale-artifact false positive.
pub fn clean_stale_media(media_root: &Path, script_stem: &str) {
    let dir = script_media_dir(media_root, script_stem);
    if !dir.exists() {
        return;
    }

    debug!(dir = %dir.display(), "removing stale media directory");
    if let Err(e) = fs::remove_dir_all(&dir) {
        warn!(
            dir = %dir.display(),
            error = %e,
            "could not clean up old media; continuing"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_expected_path_shape() {
        let path = expected_video_path(
            Path::new("media"),
            "sketchmotion-abc123",
            "SimpleCircle",
            Quality::Low,
        );
        assert_eq!(
            path,
            PathBuf::from("media/videos/sketchmotion-abc123/480p15/SimpleCircle.mp4")
        );
    }

    #[test]
    fn test_expected_path_tracks_quality_folder() {
        for (quality, folder) in [
            (Quality::Low, "480p15"),
            (Quality::Medium, "720p30"),
            (Quality::High, "1080p60"),
            (Quality::Ultra, "2160p60"),
        ] {
            let path = expected_video_path(Path::new("media"), "stem", "Scene", quality);
            assert!(path.to_string_lossy().contains(folder));
        }
    }

    #[test]
    fn test_clean_removes_existing_dir() {
        let tmp = TempDir::new().unwrap();
        let media_root = tmp.path().join("media");
        let stale = script_media_dir(&media_root, "old-script").join("480p15");
        fs::create_dir_all(&stale).unwrap();
        fs::write(stale.join("OldScene.mp4"), b"stale").unwrap();

        clean_stale_media(&media_root, "old-script");

        assert!(!script_media_dir(&media_root, "old-script").exists());
    }

    #[test]
    fn test_clean_is_a_noop_without_dir() {
        let tmp = TempDir::new().unwrap();
        // Must not panic or create anything.
        clean_stale_media(&tmp.path().join("media"), "never-rendered");
        assert!(!tmp.path().join("media").exists());
    }

    #[test]
    fn test_clean_only_touches_its_own_stem() {
        let tmp = TempDir::new().unwrap();
        let media_root = tmp.path().join("media");
        let other = script_media_dir(&media_root, "other-script");
        fs::create_dir_all(&other).unwrap();

        clean_stale_media(&media_root, "my-script");

        assert!(other.exists());
    }
}
