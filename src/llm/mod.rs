//! LLM client abstraction layer
//!
//! This module provides a trait-based abstraction for LLM text generation,
//! allowing different backends (GenAI, Mock) to be used interchangeably.

mod client;
mod error;
mod genai;
mod mock;
mod types;

pub use client::LLMClient;
pub use error::LlmError;
pub use genai::GenAIClient;
pub use mock::{MockLLMClient, MockReply};
pub use types::{ChatMessage, GenerationRequest, GenerationResponse, MessageRole};
