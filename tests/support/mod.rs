//! Shared helpers for integration tests
//!
//! Provides stub renderer executables that imitate `manim`'s observable
//! behavior (argument order, output layout, exit codes) without rendering
//! anything.

#![cfg(unix)]
#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// How a stub renderer invocation should behave
pub enum StubBehavior {
    /// Exit 0 and write the video where Manim would
    Succeed,
    /// Write to stderr and exit 1
    Fail,
    /// Record the child pid, then sleep far past any test timeout
    Hang,
    /// Exit 0 but write the video into the wrong quality folder
    WrongFolder,
}

/// Writes an executable stub renderer script into `dir` and returns its path
///
/// The stub receives the same argv as `manim <qualityFlag> <script> <scene>`
/// and always records the script path it was given to `invoked-script.txt`
/// in its working directory, so tests can verify temp-script cleanup.
pub fn stub_renderer(dir: &Path, behavior: StubBehavior) -> PathBuf {
    let body = match behavior {
        StubBehavior::Succeed => {
            r#"#!/bin/sh
script="$2"
scene="$3"
echo "$script" > invoked-script.txt
base=$(basename "$script" .py)
mkdir -p "media/videos/$base/480p15"
printf 'video-bytes' > "media/videos/$base/480p15/$scene.mp4"
echo "Rendered $scene"
exit 0
"#
        }
        StubBehavior::Fail => {
            r#"#!/bin/sh
echo "$2" > invoked-script.txt
echo "Example render progress"
echo "SyntaxError: invalid manim scene" >&2
exit 1
"#
        }
        StubBehavior::Hang => {
            r#"#!/bin/sh
echo "$2" > invoked-script.txt
echo "$$" > renderer-pid.txt
sleep 30
exit 0
"#
        }
        StubBehavior::WrongFolder => {
            r#"#!/bin/sh
script="$2"
scene="$3"
echo "$script" > invoked-script.txt
base=$(basename "$script" .py)
mkdir -p "media/videos/$base/720p30"
printf 'video-bytes' > "media/videos/$base/720p30/$scene.mp4"
exit 0
"#
        }
    };

    let path = dir.join("stub-manim");
    fs::write(&path, body).expect("write stub renderer");
    let mut perms = fs::metadata(&path).expect("stub metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("make stub executable");
    path
}

/// Reads the script path the stub renderer was invoked with
pub fn invoked_script_path(work_dir: &Path) -> PathBuf {
    let recorded = fs::read_to_string(work_dir.join("invoked-script.txt"))
        .expect("stub renderer did not record its script argument");
    PathBuf::from(recorded.trim())
}

/// A minimal generated scene, the shape the pipeline expects from the LLM
pub const SIMPLE_CIRCLE_SOURCE: &str = r#"from manim import *

class SimpleCircle(Scene):
    def construct(self):
        circle = Circle()
        self.play(Create(circle), run_time=0.25)
        self.play(FadeOut(circle), run_time=0.25)
"#;
