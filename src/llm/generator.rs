//! Blocking text-generation boundary
//!
//! The session calls the AI synchronously on the thread processing the
//! current command. [`TextGenerator`] is that single request/response shape;
//! [`HttpGenerator`] adapts the async [`LlmClient`] to it with a bounded
//! timeout.

use crate::core::config::AppConfig;
use crate::core::error::{DeckError, Result};
use crate::llm::client::{GenerationSettings, LlmClient};
use crate::llm::prompts::SYSTEM_PROMPT;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};

/// Anything that turns a prompt into text
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// [`LlmClient`] driven from a private single-threaded runtime
pub struct HttpGenerator {
    client: LlmClient,
    runtime: Runtime,
    timeout: Duration,
}

impl HttpGenerator {
    pub fn new(client: LlmClient, timeout: Duration) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self {
            client,
            runtime,
            timeout,
        })
    }

    /// Build from LLM_* environment variables and the AI settings in `config`
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = LlmClient::from_env()?.with_settings(GenerationSettings {
            temperature: config.ai_temperature,
            max_tokens: config.ai_max_tokens,
        });
        tracing::info!("AI generator ready ({:?} API)", client.api_format());
        Self::new(client, config.ai_timeout())
    }
}

impl TextGenerator for HttpGenerator {
    fn generate(&self, prompt: &str) -> Result<String> {
        let request = self.client.complete(SYSTEM_PROMPT, prompt);
        match self
            .runtime
            .block_on(async { tokio::time::timeout(self.timeout, request).await })
        {
            Ok(result) => result,
            Err(_) => Err(DeckError::LlmTimeout(self.timeout.as_secs())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::time::Instant;

    #[test]
    fn test_unreachable_endpoint_fails() {
        let client = LlmClient::new(
            "test-key".into(),
            "http://127.0.0.1:9/v1/chat/completions".into(),
            "test-model".into(),
        );
        let generator = HttpGenerator::new(client, Duration::from_secs(2)).unwrap();
        assert!(generator.generate("hello").is_err());
    }

    #[test]
    fn test_silent_endpoint_times_out() {
        // accepts connections and never answers
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let mut held = Vec::new();
            for stream in listener.incoming().flatten() {
                held.push(stream);
            }
        });

        let client = LlmClient::new(
            "test-key".into(),
            format!("http://{}/v1/chat/completions", addr),
            "test-model".into(),
        );
        let generator = HttpGenerator::new(client, Duration::from_secs(1)).unwrap();

        let started = Instant::now();
        let result = generator.generate("hello");
        assert!(matches!(result, Err(DeckError::LlmTimeout(1))));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
