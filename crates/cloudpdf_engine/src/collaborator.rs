use std::time::Duration;

use thiserror::Error;

/// Instruction sent with every summarize request.
pub const SUMMARIZE_INSTRUCTIONS: &str = "Produce a professional, concise summary of the \
     following PDF content. Focus on key findings and essential takeaways.";

/// Builds the per-request instruction that pins a chat reply to the
/// extracted document context.
pub fn chat_instructions(context: &str) -> String {
    format!(
        "You are a helpful PDF assistant. You have access to the following context extracted \
         from a PDF: {context}. Answer the user's questions strictly based on this context. \
         If you don't know the answer, say you don't know."
    )
}

#[derive(Debug, Clone)]
pub struct CollaboratorSettings {
    /// Endpoint of the text-generation relay.
    pub endpoint: String,
    /// Model identifier forwarded verbatim in every request.
    pub model: String,
    /// Bearer token; `None` sends the request unauthenticated.
    pub api_key: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for CollaboratorSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://ai.cloudpdf.app/v1/generate".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            api_key: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Any transport or status failure; callers treat every case uniformly as
/// "collaborator unavailable".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("collaborator unavailable: {0}")]
pub struct CollaboratorError(pub String);

/// Bridge to an external generative-text service. One request, one plain-text
/// response; no retries, no caching, no session state.
#[async_trait::async_trait]
pub trait TextCollaborator: Send + Sync {
    async fn generate(&self, instructions: &str, text: &str) -> Result<String, CollaboratorError>;

    /// Narrative summary of the extracted document text.
    async fn summarize(&self, text: &str) -> Result<String, CollaboratorError> {
        self.generate(SUMMARIZE_INSTRUCTIONS, text).await
    }

    /// Reply to one chat message. Stateless per call: the full context is
    /// sent every time and prior turns are never threaded in.
    async fn chat(&self, context: &str, message: &str) -> Result<String, CollaboratorError> {
        let instructions = chat_instructions(context);
        self.generate(&instructions, message).await
    }
}

#[derive(Debug, Clone)]
pub struct HttpCollaborator {
    settings: CollaboratorSettings,
}

impl HttpCollaborator {
    pub fn new(settings: CollaboratorSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, CollaboratorError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| CollaboratorError(err.to_string()))
    }
}

#[async_trait::async_trait]
impl TextCollaborator for HttpCollaborator {
    async fn generate(&self, instructions: &str, text: &str) -> Result<String, CollaboratorError> {
        let client = self.build_client()?;
        let body = serde_json::json!({
            "model": self.settings.model,
            "instructions": instructions,
            "text": text,
        });

        let mut request = client.post(&self.settings.endpoint).json(&body);
        if let Some(key) = self.settings.api_key.as_deref() {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|err| CollaboratorError(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CollaboratorError(format!("http status {status}")));
        }

        // The relay answers with the generated text as a plain body,
        // returned verbatim.
        response
            .text()
            .await
            .map_err(|err| CollaboratorError(err.to_string()))
    }
}
