//! Routes and handlers.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use docrag_chat::{ChatService, PromptTemplate};
use docrag_retrieve::ContextRetriever;

/// Number of context chunks retrieved per question.
const CONTEXT_K: usize = 3;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    retriever: Arc<ContextRetriever>,
    chat: Arc<dyn ChatService>,
    template: PromptTemplate,
    context_k: usize,
}

impl AppState {
    /// Create state over a built corpus and a chat backend.
    #[must_use]
    pub fn new(retriever: Arc<ContextRetriever>, chat: Arc<dyn ChatService>) -> Self {
        Self {
            retriever,
            chat,
            template: PromptTemplate::default(),
            context_k: CONTEXT_K,
        }
    }

    /// Use a custom prompt template.
    #[must_use]
    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }
}

/// Incoming form body for `/chat`.
#[derive(Deserialize)]
pub struct ChatForm {
    user_input: String,
}

/// JSON reply for `/chat`.
///
/// `metadata` maps each source file of the retrieved chunks to its page
/// number (`null` for unpaginated formats).
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub generated_response: String,
    pub metadata: BTreeMap<String, Option<u32>>,
}

/// Handler errors, all surfaced as 500s.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("retrieval failed: {0}")]
    Retrieve(#[from] docrag_core::Error),

    #[error("chat failed: {0}")]
    Chat(#[from] docrag_chat::ChatError),

    #[error("worker failed: {0}")]
    Worker(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("{self}");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/chat", post(chat))
        .with_state(state)
}

/// Bind and run the server until the connection is closed.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {addr}");
    axum::serve(listener, router(state)).await
}

async fn home() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn chat(
    State(state): State<AppState>,
    Form(form): Form<ChatForm>,
) -> Result<Json<ChatReply>, AppError> {
    let reply = answer(&state, &form.user_input).await?;
    Ok(Json(reply))
}

/// Retrieve context for `question`, ask the chat service, and assemble the
/// reply.
pub async fn answer(state: &AppState, question: &str) -> Result<ChatReply, AppError> {
    let retriever = Arc::clone(&state.retriever);
    let query = question.to_string();
    let k = state.context_k;

    // The retriever is synchronous; keep it off the async workers.
    let hits = tokio::task::spawn_blocking(move || retriever.get_context(&query, k))
        .await
        .map_err(|e| AppError::Worker(e.to_string()))??;

    let texts: Vec<&str> = hits.iter().map(|h| h.text.as_str()).collect();
    let prompt = state.template.render(question, &texts);
    let generated_response = state.chat.generate(&prompt).await?;

    let mut metadata = BTreeMap::new();
    for hit in &hits {
        metadata.insert(hit.metadata.file_name.clone(), hit.metadata.page);
    }

    Ok(ChatReply {
        generated_response,
        metadata,
    })
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><title>docrag</title></head>
<body>
  <h1>Ask your documents</h1>
  <form method="post" action="/chat">
    <input type="text" name="user_input" size="60" autofocus>
    <button type="submit">Ask</button>
  </form>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use docrag_chat::ChatError;
    use docrag_core::ChunkConfig;
    use docrag_embed::HashedEncoder;
    use docrag_retrieve::RetrieverConfig;
    use tempfile::tempdir;

    /// Chat backend that echoes the prompt it was given.
    struct EchoChat;

    #[async_trait]
    impl ChatService for EchoChat {
        async fn generate(&self, prompt: &str) -> Result<String, ChatError> {
            Ok(format!("echo: {prompt}"))
        }
    }

    fn state_over(dir: &std::path::Path) -> AppState {
        let retriever = ContextRetriever::build(
            dir,
            Arc::new(HashedEncoder::new()),
            RetrieverConfig {
                chunking: ChunkConfig::default(),
            },
        )
        .unwrap();
        AppState::new(Arc::new(retriever), Arc::new(EchoChat))
    }

    #[tokio::test]
    async fn test_answer_reply_shape() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("facts.txt"), "the sky is blue").unwrap();

        let state = state_over(dir.path());
        let reply = answer(&state, "what color is the sky?").await.unwrap();

        assert!(reply.generated_response.starts_with("echo:"));
        assert!(reply.generated_response.contains("the sky is blue"));
        assert_eq!(reply.metadata.get("facts.txt"), Some(&None));

        let json = serde_json::to_value(&reply).unwrap();
        assert!(json.get("generated_response").is_some());
        assert_eq!(json["metadata"]["facts.txt"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_answer_over_empty_corpus() {
        let dir = tempdir().unwrap();

        let state = state_over(dir.path());
        let reply = answer(&state, "anything").await.unwrap();

        // No context to cite, but the chat service still answers.
        assert!(reply.metadata.is_empty());
        assert!(reply.generated_response.starts_with("echo:"));
    }

    #[tokio::test]
    async fn test_prompt_contains_question_and_context() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "rust is memory safe").unwrap();

        let state = state_over(dir.path());
        let reply = answer(&state, "is rust memory safe?").await.unwrap();

        assert!(reply.generated_response.contains("is rust memory safe?"));
        assert!(reply.generated_response.contains("rust is memory safe"));
    }

    #[test]
    fn test_index_page_has_the_form_field() {
        assert!(INDEX_HTML.contains("name=\"user_input\""));
        assert!(INDEX_HTML.contains("action=\"/chat\""));
    }
}
