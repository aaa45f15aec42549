//! Extraction of sub-topic names from a free-text suggester reply.

/// Label written on edges from a parent node to the sub-topics derived from
/// it.
pub const DERIVATION_EDGE_LABEL: &str = "Derivation";

/// Most sub-topics kept from one reply.
pub const MAX_SUBTOPICS: usize = 2;

/// Longest sub-topic name kept, in characters.
pub const MAX_SUBTOPIC_CHARS: usize = 25;

/// Names of generic card sections that small models tend to echo back as if
/// they were topics. Matched case-insensitively against whole words.
const GENERIC_SECTION_WORDS: &[&str] = &[
  "trampa", "ciencia", "árbol", "llaves", "perlas", "check", "punto", "base",
  "decisión", "caso", "pregunta", "objetivo", "trap", "science", "tree",
  "keys", "pearls", "point", "decision", "case", "question", "objective",
];

/// Pull at most [`MAX_SUBTOPICS`] clean sub-topic names out of `reply`.
///
/// A JSON array of strings anywhere in the reply wins. Otherwise lines shaped
/// like `1. name` or `- name` are used. Markdown emphasis is stripped, names
/// are cut at the first `:` or `(`, and generic section names or names of
/// four characters or fewer are dropped.
pub fn parse_subtopics(reply: &str) -> Vec<String> {
  let candidates = json_array(reply).unwrap_or_else(|| list_items(reply));

  let mut out: Vec<String> = Vec::new();
  for raw in candidates {
    let Some(name) = clean_name(&raw) else { continue };
    if !out.contains(&name) {
      out.push(name);
    }
    if out.len() == MAX_SUBTOPICS {
      break;
    }
  }
  out
}

fn json_array(reply: &str) -> Option<Vec<String>> {
  let start = reply.find('[')?;
  let end = reply.rfind(']')?;
  if end <= start {
    return None;
  }
  serde_json::from_str(&reply[start..=end]).ok()
}

fn list_items(reply: &str) -> Vec<String> {
  reply
    .lines()
    .filter_map(|line| {
      let line = line.trim();
      if let Some(rest) = line.strip_prefix("- ") {
        return Some(rest.trim().to_owned());
      }
      let mut chars = line.chars();
      match (chars.next(), chars.next()) {
        (Some(d), Some('.')) if d.is_ascii_digit() => Some(chars.as_str().trim().to_owned()),
        _ => None,
      }
    })
    .collect()
}

fn clean_name(raw: &str) -> Option<String> {
  let stripped: String = raw.chars().filter(|c| !matches!(c, '*' | '_')).collect();
  let cut = stripped
    .split([':', '('])
    .next()
    .unwrap_or_default()
    .trim();

  if cut.chars().count() <= 4 {
    return None;
  }
  if is_generic(cut) {
    return None;
  }
  Some(cut.chars().take(MAX_SUBTOPIC_CHARS).collect::<String>().trim_end().to_owned())
}

/// Whether any word of `name` is a generic section word.
fn is_generic(name: &str) -> bool {
  name
    .to_lowercase()
    .split(|c: char| !c.is_alphanumeric())
    .any(|word| GENERIC_SECTION_WORDS.contains(&word))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn numbered_list_is_cleaned() {
    let reply = "Aquí tienes:\n1. **Clasificación TNM**: estadios\n2. Manejo en Shock (adultos)\n3. Diferencial con sepsis";
    assert_eq!(parse_subtopics(reply), vec!["Clasificación TNM", "Manejo en Shock"]);
  }

  #[test]
  fn bullet_list_is_accepted() {
    let reply = "- Dengue grave\n- Signos de alarma";
    assert_eq!(parse_subtopics(reply), vec!["Dengue grave", "Signos de alarma"]);
  }

  #[test]
  fn json_array_wins() {
    let reply = "Sure: [\"Crisis asmática\", \"Asma en embarazo\", \"Otro tema\"]\n1. Ignored entry";
    assert_eq!(parse_subtopics(reply), vec!["Crisis asmática", "Asma en embarazo"]);
  }

  #[test]
  fn malformed_json_falls_back_to_lines() {
    let reply = "[not json]\n1. Hipertensión portal";
    assert_eq!(parse_subtopics(reply), vec!["Hipertensión portal"]);
  }

  #[test]
  fn generic_and_short_names_are_dropped() {
    let reply = "1. La Trampa del examen\n2. Caso clínico\n3. EPOC\n4. Key Pearls\n5. Anemia ferropénica";
    assert_eq!(parse_subtopics(reply), vec!["Anemia ferropénica"]);
  }

  #[test]
  fn duplicates_and_long_names() {
    let reply = "1. Insuficiencia cardiaca congestiva descompensada\n2. Insuficiencia cardiaca congestiva descompensada";
    let got = parse_subtopics(reply);
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].chars().count(), MAX_SUBTOPIC_CHARS);
  }

  #[test]
  fn section_words_match_whole_words_only() {
    let reply = "1. Insuficiencia renal\n2. Ciencia de base";
    assert_eq!(parse_subtopics(reply), vec!["Insuficiencia renal"]);
    assert!(is_generic("Árbol de decisión"));
    assert!(!is_generic("Casos de tuberculosis"));
  }

  #[test]
  fn prose_yields_nothing() {
    assert!(parse_subtopics("I cannot help with that.").is_empty());
  }
}
