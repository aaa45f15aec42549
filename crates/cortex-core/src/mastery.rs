//! The curriculum graph and its mastery state machine.
//!
//! Nodes move `locked → active → mastered`. At most one node is active at a
//! time; the graph tracks it in a single `active` slot rather than scanning
//! node groups. An easy rating against the active node raises its mastery
//! level by one; at [`MASTERY_TARGET`] the node is frozen as mastered and the
//! next locked node in curriculum order takes its place.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::{Error, Result, label::normalize_label, progress::Rating};

/// Mastery level at which a node is considered mastered.
pub const MASTERY_TARGET: u8 = 3;

// ─── Groups and angles ───────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NodeGroup {
  Locked,
  Active,
  Mastered,
}

/// The lens a challenge is written through.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
)]
pub enum StudyAngle {
  Diagnosis,
  Treatment,
  Trap,
}

/// Angle presented at each mastery level. The last entry repeats until the
/// node is mastered.
pub const ANGLE_ROTATION: [StudyAngle; 3] =
  [StudyAngle::Diagnosis, StudyAngle::Treatment, StudyAngle::Trap];

impl StudyAngle {
  pub fn for_level(mastery_level: u8) -> Self {
    let index = usize::from(mastery_level).min(ANGLE_ROTATION.len() - 1);
    ANGLE_ROTATION[index]
  }
}

// ─── Nodes ───────────────────────────────────────────────────────────────────

/// A topic's place in the curriculum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
  /// Curriculum order; promotion walks nodes by ascending position.
  pub position:      i64,
  pub label:         String,
  pub label_key:     String,
  pub group:         NodeGroup,
  pub mastery_level: u8,
}

impl GraphNode {
  /// A fresh locked node.
  pub fn locked(position: i64, label: impl Into<String>) -> Self {
    let label = label.into();
    Self {
      position,
      label_key: normalize_label(&label),
      label,
      group: NodeGroup::Locked,
      mastery_level: 0,
    }
  }

  pub fn angle(&self) -> StudyAngle { StudyAngle::for_level(self.mastery_level) }
}

/// A derivation edge between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
  pub from_position: i64,
  pub to_position:   i64,
  pub label:         String,
}

// ─── Outcomes ────────────────────────────────────────────────────────────────

/// Where the graph stands after [`MasteryGraph::ensure_active`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphState<'a> {
  Active(&'a GraphNode),
  /// Every node is mastered (or the graph is empty).
  Completed,
}

/// What a rating did to the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasteryOutcome {
  pub label_key:      String,
  /// `false` when the label did not name the active node; nothing changed.
  pub matched_active: bool,
  pub mastery_level:  u8,
  pub mastered:       bool,
  /// Label of the node promoted to active as a consequence, if any.
  pub promoted:       Option<String>,
  pub completed:      bool,
}

// ─── Graph ───────────────────────────────────────────────────────────────────

/// The curriculum as an ordered list of nodes plus the single active slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MasteryGraph {
  nodes:  Vec<GraphNode>,
  active: Option<usize>,
}

impl MasteryGraph {
  /// Assemble a graph from stored nodes and the stored active position,
  /// rejecting any state that breaks the single-active invariant.
  pub fn from_parts(
    mut nodes: Vec<GraphNode>,
    active_position: Option<i64>,
  ) -> Result<Self> {
    nodes.sort_by_key(|n| n.position);

    let flagged: Vec<i64> = nodes
      .iter()
      .filter(|n| n.group == NodeGroup::Active)
      .map(|n| n.position)
      .collect();
    if flagged.len() > 1 {
      return Err(Error::InvariantViolation(format!(
        "{} active nodes at positions {flagged:?}",
        flagged.len()
      )));
    }
    if flagged.first().copied() != active_position {
      return Err(Error::InvariantViolation(format!(
        "active slot {active_position:?} disagrees with node groups {flagged:?}"
      )));
    }
    if let Some(n) = nodes.iter().find(|n| n.mastery_level > MASTERY_TARGET) {
      return Err(Error::InvariantViolation(format!(
        "node {:?} has mastery level {}",
        n.label, n.mastery_level
      )));
    }
    if let Some(pair) = nodes.windows(2).find(|w| w[0].position == w[1].position) {
      return Err(Error::InvariantViolation(format!(
        "duplicate node position {}",
        pair[0].position
      )));
    }

    let active = active_position
      .and_then(|pos| nodes.iter().position(|n| n.position == pos));
    Ok(Self { nodes, active })
  }

  pub fn nodes(&self) -> &[GraphNode] { &self.nodes }

  pub fn len(&self) -> usize { self.nodes.len() }

  pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

  pub fn active(&self) -> Option<&GraphNode> { self.active.map(|i| &self.nodes[i]) }

  pub fn active_position(&self) -> Option<i64> { self.active().map(|n| n.position) }

  /// Look a node up by display label or key.
  pub fn find(&self, label: &str) -> Option<&GraphNode> {
    let key = normalize_label(label);
    self.nodes.iter().find(|n| n.label_key == key)
  }

  /// Sum of all mastery levels.
  pub fn total_mastery(&self) -> u32 {
    self.nodes.iter().map(|n| u32::from(n.mastery_level)).sum()
  }

  /// Make sure a node is active if any can be: freeze an active node that has
  /// already reached the target, then promote the first locked node.
  pub fn ensure_active(&mut self) -> GraphState<'_> {
    if let Some(i) = self.active
      && self.nodes[i].mastery_level >= MASTERY_TARGET
    {
      self.freeze(i);
    }
    if self.active.is_none() {
      self.promote_next();
    }
    match self.active {
      Some(i) => GraphState::Active(&self.nodes[i]),
      None => GraphState::Completed,
    }
  }

  /// Apply a rating given against the node labelled `label`.
  ///
  /// Only the active node reacts, and only an easy rating advances it. Other
  /// ratings leave the level untouched; the level never decreases.
  pub fn apply_rating(&mut self, label: &str, rating: Rating) -> MasteryOutcome {
    let label_key = normalize_label(label);

    let Some(i) = self.active.filter(|&i| self.nodes[i].label_key == label_key)
    else {
      let mastery_level = self.find(&label_key).map_or(0, |n| n.mastery_level);
      return MasteryOutcome {
        label_key,
        matched_active: false,
        mastery_level,
        mastered: false,
        promoted: None,
        completed: false,
      };
    };

    if rating.advances_mastery() && self.nodes[i].mastery_level < MASTERY_TARGET {
      self.nodes[i].mastery_level += 1;
    }
    let mastery_level = self.nodes[i].mastery_level;

    let mut outcome = MasteryOutcome {
      label_key,
      matched_active: true,
      mastery_level,
      mastered: false,
      promoted: None,
      completed: false,
    };

    if mastery_level >= MASTERY_TARGET {
      self.freeze(i);
      outcome.mastered = true;
      match self.promote_next() {
        Some(j) => outcome.promoted = Some(self.nodes[j].label.clone()),
        None => outcome.completed = true,
      }
    }
    outcome
  }

  fn freeze(&mut self, i: usize) {
    self.nodes[i].group = NodeGroup::Mastered;
    if self.active == Some(i) {
      self.active = None;
    }
  }

  fn promote_next(&mut self) -> Option<usize> {
    let j = self.nodes.iter().position(|n| n.group == NodeGroup::Locked)?;
    self.nodes[j].group = NodeGroup::Active;
    self.nodes[j].mastery_level = 0;
    self.active = Some(j);
    Some(j)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn graph(labels: &[&str]) -> MasteryGraph {
    let nodes = labels
      .iter()
      .enumerate()
      .map(|(i, l)| GraphNode::locked(i as i64 + 1, *l))
      .collect();
    MasteryGraph::from_parts(nodes, None).unwrap()
  }

  fn active_label(g: &mut MasteryGraph) -> Option<String> {
    match g.ensure_active() {
      GraphState::Active(n) => Some(n.label.clone()),
      GraphState::Completed => None,
    }
  }

  #[test]
  fn angle_rotation_clamps_at_last_angle() {
    assert_eq!(StudyAngle::for_level(0), StudyAngle::Diagnosis);
    assert_eq!(StudyAngle::for_level(1), StudyAngle::Treatment);
    assert_eq!(StudyAngle::for_level(2), StudyAngle::Trap);
    assert_eq!(StudyAngle::for_level(3), StudyAngle::Trap);
    assert_eq!(StudyAngle::for_level(9), StudyAngle::Trap);
  }

  #[test]
  fn cold_start_promotes_first_locked() {
    let mut g = graph(&["Dengue", "Asma"]);
    assert!(g.active().is_none());
    assert_eq!(active_label(&mut g).as_deref(), Some("Dengue"));
    assert_eq!(g.active_position(), Some(1));
    assert_eq!(g.active().unwrap().mastery_level, 0);
  }

  #[test]
  fn three_easy_ratings_master_a_node() {
    let mut g = graph(&["Dengue"]);
    let mut angles = Vec::new();
    let mut levels = vec![];

    for _ in 0..3 {
      match g.ensure_active() {
        GraphState::Active(n) => {
          angles.push(n.angle());
          levels.push(n.mastery_level);
        }
        GraphState::Completed => panic!("completed too early"),
      }
      g.apply_rating("Dengue", Rating::Easy);
    }

    assert_eq!(angles, ANGLE_ROTATION.to_vec());
    assert_eq!(levels, vec![0, 1, 2]);
    let node = g.find("Dengue").unwrap();
    assert_eq!(node.group, NodeGroup::Mastered);
    assert_eq!(node.mastery_level, 3);
    assert_eq!(g.ensure_active(), GraphState::Completed);
  }

  #[test]
  fn mastering_promotes_next_in_order() {
    let mut g = graph(&["A1", "B2", "C3"]);
    g.ensure_active();
    g.apply_rating("A1", Rating::Easy);
    g.apply_rating("A1", Rating::Easy);
    let out = g.apply_rating("A1", Rating::Easy);
    assert!(out.mastered);
    assert_eq!(out.promoted.as_deref(), Some("B2"));
    assert!(!out.completed);
    assert_eq!(g.active().unwrap().label, "B2");
    assert_eq!(g.active().unwrap().mastery_level, 0);
  }

  #[test]
  fn last_node_mastered_reports_completed() {
    let mut g = graph(&["Solo"]);
    g.ensure_active();
    for _ in 0..2 {
      assert!(!g.apply_rating("Solo", Rating::Easy).completed);
    }
    let out = g.apply_rating("Solo", Rating::Easy);
    assert!(out.mastered && out.completed);
    assert!(g.active().is_none());
  }

  #[test]
  fn non_easy_ratings_never_move_level() {
    let mut g = graph(&["Gota"]);
    g.ensure_active();
    g.apply_rating("Gota", Rating::Easy);
    for rating in [Rating::Again, Rating::Hard, Rating::Good] {
      let out = g.apply_rating("Gota", rating);
      assert!(out.matched_active);
      assert_eq!(out.mastery_level, 1);
    }
  }

  #[test]
  fn rating_against_inactive_node_is_ignored() {
    let mut g = graph(&["Active One", "Locked One"]);
    g.ensure_active();
    let out = g.apply_rating("Locked One", Rating::Easy);
    assert!(!out.matched_active);
    assert_eq!(g.find("Locked One").unwrap().mastery_level, 0);
    assert_eq!(g.active().unwrap().mastery_level, 0);
  }

  #[test]
  fn wrapped_labels_match_active_node() {
    let mut g = graph(&["Dengue\n(INS 2024)"]);
    g.ensure_active();
    let out = g.apply_rating("Dengue (INS 2024)", Rating::Easy);
    assert!(out.matched_active);
    assert_eq!(out.mastery_level, 1);
  }

  #[test]
  fn stale_mastered_active_node_is_frozen_on_ensure() {
    let mut nodes = vec![GraphNode::locked(1, "Old"), GraphNode::locked(2, "Next")];
    nodes[0].group = NodeGroup::Active;
    nodes[0].mastery_level = 3;
    let mut g = MasteryGraph::from_parts(nodes, Some(1)).unwrap();
    assert_eq!(active_label(&mut g).as_deref(), Some("Next"));
    assert_eq!(g.find("Old").unwrap().group, NodeGroup::Mastered);
  }

  #[test]
  fn two_active_nodes_are_rejected() {
    let mut nodes = vec![GraphNode::locked(1, "A"), GraphNode::locked(2, "B")];
    nodes[0].group = NodeGroup::Active;
    nodes[1].group = NodeGroup::Active;
    let err = MasteryGraph::from_parts(nodes, Some(1)).unwrap_err();
    assert!(matches!(err, Error::InvariantViolation(_)));
  }

  #[test]
  fn active_slot_must_agree_with_groups() {
    let nodes = vec![GraphNode::locked(1, "A")];
    assert!(MasteryGraph::from_parts(nodes, Some(1)).is_err());
  }

  #[test]
  fn total_mastery_sums_levels() {
    let mut g = graph(&["A", "B"]);
    g.ensure_active();
    g.apply_rating("A", Rating::Easy);
    g.apply_rating("A", Rating::Easy);
    assert_eq!(g.total_mastery(), 2);
  }
}
