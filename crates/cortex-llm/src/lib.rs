//! Model-backed collaborators for the Cortex engine.
//!
//! [`OllamaClient`] talks to an Ollama-compatible `/api/generate` endpoint and
//! implements [`cortex_core::collab::ContentGenerator`] and
//! [`cortex_core::collab::SubtopicSuggester`]. [`GlossaryResolver`] expands
//! exam acronyms from a local table and implements
//! [`cortex_core::collab::ContextResolver`].

pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod glossary;
pub mod prompt;

pub use client::OllamaClient;
pub use config::GeneratorConfig;
pub use error::{Error, Result};
pub use glossary::GlossaryResolver;
