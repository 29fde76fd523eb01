//! # docrag-chat
//!
//! The chat-completion collaborator for docrag.
//!
//! The retrieval core treats answer generation as an opaque text-in/text-out
//! function: a prompt goes in, free-form generated text comes out. This
//! crate provides that function.
//!
//! - [`ChatService`]: the seam; any backend that turns a prompt into text
//! - [`GeminiClient`]: implementation over the Gemini `generateContent` REST
//!   API
//! - [`PromptTemplate`]: substitutes retrieved context and the user question
//!   into a fixed template
//!
//! Nothing here inspects or validates the generated text; shaping the answer
//! is the model's job, not the pipeline's.

pub mod gemini;
pub mod prompt;

pub use gemini::{ChatError, ChatService, GeminiClient};
pub use prompt::PromptTemplate;
