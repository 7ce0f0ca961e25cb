use super::client::LLMClient;
use super::error::LlmError;
use super::types::{GenerationRequest, GenerationResponse};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

pub struct MockLLMClient {
    replies: Mutex<VecDeque<MockReply>>,
    name: String,
}

#[derive(Debug, Clone)]
pub struct MockReply {
    pub content: String,
    pub error: Option<LlmError>,
}

impl MockReply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            error: None,
        }
    }

    pub fn error(error: LlmError) -> Self {
        Self {
            content: String::new(),
            error: Some(error),
        }
    }

    /// A reply wrapped in a markdown code fence, the way chat models
    /// often return code despite being told not to.
    pub fn fenced(content: impl Into<String>) -> Self {
        Self {
            content: format!("```python\n{}\n```", content.into()),
            error: None,
        }
    }
}

impl MockLLMClient {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            name: "MockLLM".to_string(),
        }
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            name: name.into(),
        }
    }

    /// Convenience constructor for the common single-reply case
    pub fn with_reply(reply: MockReply) -> Self {
        let client = Self::new();
        client.add_reply(reply);
        client
    }

    pub fn add_reply(&self, reply: MockReply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn add_replies(&self, replies: impl IntoIterator<Item = MockReply>) {
        let mut queue = self.replies.lock().unwrap();
        for reply in replies {
            queue.push_back(reply);
        }
    }

    pub fn remaining_replies(&self) -> usize {
        self.replies.lock().unwrap().len()
    }
}

impl Default for MockLLMClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn generate(&self, _request: GenerationRequest) -> Result<GenerationResponse, LlmError> {
        let reply = self.replies.lock().unwrap().pop_front();

        match reply {
            Some(MockReply {
                error: Some(error), ..
            }) => Err(error),
            Some(MockReply { content, .. }) => {
                Ok(GenerationResponse::text(content, Duration::from_millis(1)))
            }
            None => Err(LlmError::Other {
                message: "MockLLMClient has no queued replies".to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replies_are_consumed_in_order() {
        let client = MockLLMClient::new();
        client.add_replies([MockReply::text("first"), MockReply::text("second")]);

        let request = GenerationRequest::from_prompt("anything");
        assert_eq!(
            client.generate(request.clone()).await.unwrap().content,
            "first"
        );
        assert_eq!(client.generate(request).await.unwrap().content, "second");
        assert_eq!(client.remaining_replies(), 0);
    }

    #[tokio::test]
    async fn test_queued_error_is_returned() {
        let client = MockLLMClient::with_reply(MockReply::error(LlmError::NetworkError {
            message: "connection refused".to_string(),
        }));

        let result = client
            .generate(GenerationRequest::from_prompt("anything"))
            .await;
        assert!(matches!(result, Err(LlmError::NetworkError { .. })));
    }

    #[tokio::test]
    async fn test_empty_queue_is_an_error() {
        let client = MockLLMClient::new();
        let result = client
            .generate(GenerationRequest::from_prompt("anything"))
            .await;
        assert!(matches!(result, Err(LlmError::Other { .. })));
    }

    #[test]
    fn test_fenced_reply_wraps_content() {
        let reply = MockReply::fenced("from manim import *");
        assert!(reply.content.starts_with("```python\n"));
        assert!(reply.content.ends_with("\n```"));
    }
}
