//! Prompt templating for Manim code generation
//!
//! The template instructs the model to emit a single short Manim scene as
//! raw Python, with one substitution slot for the user's request. Models
//! frequently ignore the "no markdown fences" instruction, so responses are
//! passed through [`strip_code_fences`] before use.

/// Code-generation prompt with a single `{user_prompt}` slot
pub const RENDER_PROMPT_TEMPLATE: &str = r#"You are an expert Manim programmer specializing in creating concise and precise mathematical animations.
Your task is to generate Python code for a Manim animation based on the user's request.

Follow these strict instructions:
1.  The animation should be a high-quality mathematical visualization.
2.  The generated Manim code **must** produce an animation that is very short, ideally resulting in approximately 20 to 25 frames. To achieve this, use very short `run_time` values for your `self.play()` calls (e.g., `run_time=0.25` or `run_time=0.5`). The total sum of `run_time`s for all animations in the `construct` method should not exceed 1.0 to 1.5 seconds. Avoid long `self.wait()` calls.
3.  **Only output the Python code block.** Do NOT include any explanations, introductory text, "Here's the code:", or markdown code fences (like ```python ... ```). Just the raw Python code.
4.  The code must start with `from manim import *` and any other necessary imports (like `import numpy as np`).
5.  The code must define a single Manim `Scene` class. The class name should be descriptive of the animation (e.g., `class CircleAnimation(Scene):`).
6.  The scene must contain a `construct(self)` method where all animation logic resides.
7.  Ensure the code is complete, runnable, and will produce a video file when executed with Manim.
8.  Focus on clarity, precision, and mathematical correctness.
9.  If the user asks for something non-mathematical, too complex for a very short animation (20-25 frames), or potentially unsafe, politely generate a very simple default animation (e.g., a circle appearing and disappearing quickly) and do not attempt the complex request.

User Request: {user_prompt}

Generated Manim Code:
"#;

/// Substitutes the user's request into the code-generation template
pub fn render_prompt(user_prompt: &str) -> String {
    RENDER_PROMPT_TEMPLATE.replace("{user_prompt}", user_prompt)
}

/// Strips a surrounding markdown code fence from generated text
///
/// Handles both ```` ```python ```` and bare ```` ``` ```` opening fences.
/// Text without fences is returned trimmed but otherwise untouched.
pub fn strip_code_fences(text: &str) -> String {
    let mut stripped = text.trim();

    if let Some(rest) = stripped.strip_prefix("```python") {
        stripped = rest.trim_start();
    } else if let Some(rest) = stripped.strip_prefix("```") {
        stripped = rest.trim_start();
    }

    if let Some(rest) = stripped.strip_suffix("```") {
        stripped = rest.trim_end();
    }

    stripped.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_prompt_substitutes_user_request() {
        let prompt = render_prompt("a circle transforming into a square");
        assert!(prompt.contains("User Request: a circle transforming into a square"));
        assert!(!prompt.contains("{user_prompt}"));
    }

    #[test]
    fn test_strip_python_fence() {
        let text = "```python\nfrom manim import *\n```";
        assert_eq!(strip_code_fences(text), "from manim import *");
    }

    #[test]
    fn test_strip_bare_fence() {
        let text = "```\nfrom manim import *\n```";
        assert_eq!(strip_code_fences(text), "from manim import *");
    }

    #[test]
    fn test_unfenced_text_passes_through() {
        let text = "from manim import *\n\nclass Foo(Scene):\n    pass";
        assert_eq!(strip_code_fences(text), text);
    }

    #[test]
    fn test_whitespace_around_fences_is_tolerated() {
        let text = "\n\n```python\nx = 1\n```\n\n";
        assert_eq!(strip_code_fences(text), "x = 1");
    }
}
