//! Acronym expansion from a local glossary.
//!
//! Exam syllabi name many topics by acronym. A hit yields the expanded title
//! and a short grounding line; a miss is an error, which the engine turns
//! into generic context.

use std::collections::HashMap;

use cortex_core::collab::{ContextResolver, ResolvedContext};

use crate::{Error, Result, config::GlossaryConfig};

mod builtin;

use builtin::BUILTIN;

/// Upper-cased with whitespace collapsed.
fn full_key(topic: &str) -> String {
  topic.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase()
}

/// The text before any parenthesis, as a [`full_key`].
fn short_key(topic: &str) -> String { full_key(topic.split('(').next().unwrap_or_default()) }

#[derive(Debug, Clone)]
pub struct GlossaryResolver {
  entries: HashMap<String, String>,
}

impl Default for GlossaryResolver {
  fn default() -> Self { Self::new(&GlossaryConfig::new()) }
}

impl GlossaryResolver {
  /// The built-in table with `extra` merged over it.
  pub fn new(extra: &GlossaryConfig) -> Self {
    let builtin = BUILTIN.iter().map(|(k, v)| (full_key(k), v.to_string()));
    let extra = extra.iter().map(|(k, v)| (full_key(k), v.clone()));
    Self { entries: builtin.chain(extra).collect() }
  }

  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }

  /// Match the whole title first, then the text before any parenthesis.
  pub fn lookup(&self, topic: &str) -> Result<ResolvedContext> {
    let full_title = self
      .entries
      .get(&full_key(topic))
      .or_else(|| self.entries.get(&short_key(topic)))
      .ok_or_else(|| Error::UnknownTopic(topic.to_owned()))?;
    Ok(ResolvedContext {
      full_title: full_title.clone(),
      context:    format!("Key concept: {full_title}. Follow evidence-based guidelines."),
    })
  }
}

impl ContextResolver for GlossaryResolver {
  type Error = Error;

  async fn resolve_context(&self, topic: &str) -> Result<ResolvedContext> { self.lookup(topic) }
}
