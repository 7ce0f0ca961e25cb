//! Quality-to-output-folder contract tests
//!
//! The folder names are an external contract with Manim's own output
//! discovery, so the full table is pinned here explicitly.

use sketchmotion::render::{expected_video_path, Quality};
use std::path::Path;
use yare::parameterized;

#[parameterized(
    low = { Quality::Low, "-ql", "480p15" },
    medium = { Quality::Medium, "-qm", "720p30" },
    high = { Quality::High, "-qh", "1080p60" },
    ultra = { Quality::Ultra, "-qk", "2160p60" },
)]
fn quality_matches_manim_conventions(quality: Quality, flag: &str, folder: &str) {
    assert_eq!(quality.cli_flag(), flag);
    assert_eq!(quality.folder(), folder);

    let path = expected_video_path(Path::new("media"), "scene-script", "MyScene", quality);
    assert_eq!(
        path,
        Path::new("media")
            .join("videos")
            .join("scene-script")
            .join(folder)
            .join("MyScene.mp4")
    );
}

#[parameterized(
    low = { "low", Quality::Low },
    medium = { "medium", Quality::Medium },
    high = { "high", Quality::High },
    ultra = { "ultra", Quality::Ultra },
)]
fn quality_names_parse(name: &str, expected: Quality) {
    assert_eq!(name.parse::<Quality>().unwrap(), expected);
}

#[test]
fn unknown_quality_name_is_rejected() {
    assert!("4k".parse::<Quality>().is_err());
    assert!("".parse::<Quality>().is_err());
    assert!("-ql".parse::<Quality>().is_err());
}
