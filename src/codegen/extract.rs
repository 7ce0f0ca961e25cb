//! Scene-name extraction from generated Manim code
//!
//! Generated code must define exactly one class inheriting from Manim's
//! `Scene` base; the class name doubles as the render target passed to the
//! `manim` CLI and as the stem of the output video file. A regex match is a
//! deliberately lightweight contract here: anything beyond "one declaration
//! of the expected shape" is validated by Manim itself at render time.

use regex::Regex;
use thiserror::Error;

/// Errors from inspecting generated source
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// No `class <name>(Scene):` declaration was found
    #[error(
        "could not find a Scene class in the generated code; \
         the model may have produced an invalid Manim script"
    )]
    SceneNotFound,
}

/// Extracts the Manim scene class name from generated code
///
/// Returns the first identifier declared as `class <name>(Scene):`.
/// Uniqueness of the declaration is not enforced.
pub fn extract_scene_name(source: &str) -> Result<String, ExtractError> {
    let scene_re = Regex::new(r"class\s+(\w+)\s*\(\s*Scene\s*\)\s*:").expect("valid regex");

    scene_re
        .captures(source)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or(ExtractError::SceneNotFound)
}
