//! Pull structured data out of free-form model output.
//!
//! Models wrap JSON in code fences, prose, or both. Extraction looks inside a
//! fenced block first and otherwise takes the outermost `{ ... }` span.

use cortex_core::challenge::Content;
use serde::Deserialize;

use crate::{Error, Result};

/// Content as models actually write it. Accepts the Spanish key names the
/// exam prompts historically used.
#[derive(Debug, Deserialize)]
struct RawContent {
  #[serde(alias = "enunciado", alias = "question", alias = "content")]
  body:           String,
  #[serde(alias = "opciones", default)]
  options:        Vec<String>,
  #[serde(alias = "correcta", alias = "answer", alias = "correct_answer")]
  correct_option: String,
  #[serde(alias = "retroalimentacion", alias = "feedback", default)]
  explanation:    String,
}

/// The body of the first fenced code block, if any.
fn fenced(text: &str) -> Option<&str> {
  let start = text.find("```")?;
  let rest = &text[start + 3..];
  // Skip an info string such as `json`.
  let body_start = rest.find('\n').map_or(0, |i| i + 1);
  let rest = &rest[body_start..];
  let end = rest.find("```")?;
  Some(rest[..end].trim())
}

/// The outermost `{ ... }` span of `text`.
pub fn json_object(text: &str) -> Result<&str> {
  let text = fenced(text).filter(|f| f.contains('{')).unwrap_or(text);
  let start = text.find('{').ok_or(Error::NoJson)?;
  let end = text.rfind('}').ok_or(Error::NoJson)?;
  if end < start {
    return Err(Error::NoJson);
  }
  Ok(&text[start..=end])
}

/// Parse challenge content from a model reply. Shape checks are left to
/// [`Content::validate`].
pub fn parse_content(reply: &str) -> Result<Content> {
  if reply.trim().is_empty() {
    return Err(Error::EmptyResponse);
  }
  let raw: RawContent = serde_json::from_str(json_object(reply)?)?;
  Ok(Content {
    body:           raw.body.trim().to_owned(),
    options:        raw.options.into_iter().map(|o| o.trim().to_owned()).collect(),
    correct_option: raw.correct_option.trim().to_owned(),
    explanation:    raw.explanation.trim().to_owned(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  const OBJECT: &str = r#"{"body":"Caso","options":["A) 1","B) 2","C) 3","D) 4"],"correct_option":"b","explanation":"Porque"}"#;

  #[test]
  fn bare_object() {
    let content = parse_content(OBJECT).unwrap();
    assert_eq!(content.body, "Caso");
    assert_eq!(content.options.len(), 4);
    assert_eq!(content.correct_option, "b");
  }

  #[test]
  fn fenced_object_with_prose() {
    let reply = format!("Here is your case:\n```json\n{OBJECT}\n```\nGood luck!");
    assert_eq!(parse_content(&reply).unwrap().explanation, "Porque");
  }

  #[test]
  fn braces_inside_prose() {
    let reply = format!("Sure. {OBJECT} Let me know.");
    assert_eq!(json_object(&reply).unwrap(), OBJECT);
  }

  #[test]
  fn spanish_keys() {
    let reply = r#"{"enunciado":"Paciente de 40 años","opciones":["A","B","C","D"],"correcta":"C","retroalimentacion":"..."}"#;
    let content = parse_content(reply).unwrap();
    assert_eq!(content.body, "Paciente de 40 años");
    assert_eq!(content.correct_option, "C");
  }

  #[test]
  fn content_and_correct_answer_keys() {
    let reply = r#"{"content":"Mujer de 30 años","options":["A","B","C","D"],"correct_answer":"D","explanation":"..."}"#;
    let content = parse_content(reply).unwrap();
    assert_eq!(content.body, "Mujer de 30 años");
    assert_eq!(content.correct_option, "D");
  }

  #[test]
  fn missing_object_is_an_error() {
    assert!(matches!(parse_content("no json here"), Err(Error::NoJson)));
    assert!(matches!(parse_content("   "), Err(Error::EmptyResponse)));
    assert!(matches!(json_object("} {"), Err(Error::NoJson)));
  }

  #[test]
  fn missing_required_key_is_malformed() {
    assert!(matches!(parse_content(r#"{"options":[]}"#), Err(Error::Json(_))));
  }
}
