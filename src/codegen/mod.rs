//! Manim code generation support
//!
//! Prompt templating for the LLM request and lightweight inspection of the
//! generated Python source.

mod extract;
mod prompt;

pub use extract::{extract_scene_name, ExtractError};
pub use prompt::{render_prompt, strip_code_fences, RENDER_PROMPT_TEMPLATE};
