//! Prompt text sent to the model.

use cortex_core::{
  branching::MAX_SUBTOPICS,
  collab::{ChallengeRequest, ResolvedContext},
  mastery::StudyAngle,
};

fn angle_focus(angle: StudyAngle) -> &'static str {
  match angle {
    StudyAngle::Diagnosis => {
      "diagnosis: the key finding, criterion or test that confirms the condition"
    }
    StudyAngle::Treatment => "treatment: first-line management and its contraindications",
    StudyAngle::Trap => {
      "the classic exam trap: a distractor that looks right but breaks a guideline"
    }
  }
}

/// Prompt for one multiple-choice challenge, answered as a JSON object.
pub fn challenge(request: &ChallengeRequest) -> String {
  format!(
    "You are an exam-preparation tutor writing one hard clinical case.\n\
     TOPIC: {full_title} ({topic})\n\
     CONTEXT: {context}\n\
     FOCUS: {focus}\n\n\
     Rules:\n\
     - The case is at most 4 lines and justifies the findings.\n\
     - Exactly 4 options labelled A) to D), one of them correct.\n\
     - Write in the language of the topic.\n\n\
     Reply ONLY with a JSON object:\n\
     {{\"body\": \"...\", \"options\": [\"A) ...\", \"B) ...\", \"C) ...\", \"D) ...\"], \
     \"correct_option\": \"A\", \"explanation\": \"why the answer is right and the others are not\"}}",
    full_title = request.full_title,
    topic = request.topic,
    context = request.context,
    focus = angle_focus(request.angle),
  )
}

/// Prompt asking for high-yield sub-topics, answered as a JSON array.
pub fn subtopics(topic: &str, context: &ResolvedContext) -> String {
  format!(
    "For the exam topic {full_title} ({topic}), name the {MAX_SUBTOPICS} most \
     frequently examined specific sub-topics.\n\
     CONTEXT: {context}\n\
     Use concrete clinical names, not section headings such as \"diagnosis\" or \
     \"treatment\". Keep each name under 25 characters.\n\
     Reply ONLY with a JSON array of strings.",
    full_title = context.full_title,
    context = context.context,
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn challenge_prompt_carries_request() {
    let request = ChallengeRequest {
      topic:      "AKI".into(),
      full_title: "Acute Kidney Injury".into(),
      context:    "KDIGO".into(),
      angle:      StudyAngle::Trap,
    };
    let prompt = challenge(&request);
    assert!(prompt.contains("TOPIC: Acute Kidney Injury (AKI)"));
    assert!(prompt.contains("CONTEXT: KDIGO"));
    assert!(prompt.contains("exam trap"));
    assert!(prompt.contains("\"correct_option\""));
  }

  #[test]
  fn subtopic_prompt_asks_for_an_array() {
    let context = ResolvedContext::fallback("Asma");
    let prompt = subtopics("Asma", &context);
    assert!(prompt.contains("name the 2 most"));
    assert!(prompt.contains("JSON array"));
  }
}
