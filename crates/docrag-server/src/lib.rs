//! # docrag-server
//!
//! Minimal web front end for docrag.
//!
//! Two routes: `GET /` serves a bare HTML question form, and `POST /chat`
//! accepts the form's `user_input` field, retrieves context for it, asks the
//! chat service for an answer, and responds with JSON:
//!
//! ```json
//! {
//!   "generated_response": "...",
//!   "metadata": { "report.pdf": 3, "notes.txt": null }
//! }
//! ```
//!
//! The server owns nothing clever: retrieval and generation both live behind
//! their crates, and handlers hop to a blocking thread for the synchronous
//! retriever. The transport format is this crate's concern alone; the core
//! knows nothing about it.

pub mod app;

pub use app::{router, serve, AppState, ChatReply};
