//! Label normalization.
//!
//! Graph labels are often wrapped for display (`"Dengue\n(INS 2024)"`), while
//! topic titles are stored on one line. Every label is reduced to a key at
//! write time so lookups are plain equality.

/// Reduce a display label to its lookup key: trim, and collapse every run of
/// whitespace (embedded newlines included) to a single space.
pub fn normalize_label(label: &str) -> String {
  label.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn collapses_wrapped_labels() {
    assert_eq!(normalize_label("Dengue\n(INS 2024)"), "Dengue (INS 2024)");
    assert_eq!(normalize_label("  Asma (MART)\r\n"), "Asma (MART)");
    assert_eq!(normalize_label("TEP \n\n  (diagnóstico)"), "TEP (diagnóstico)");
  }

  #[test]
  fn leaves_clean_labels_alone() {
    assert_eq!(normalize_label("Migraña"), "Migraña");
    assert_eq!(normalize_label(""), "");
  }
}
