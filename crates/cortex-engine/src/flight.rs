//! Single-flight cache for the pending challenge.
//!
//! Holds at most one entry, keyed by [`ChallengeKey`]. Callers asking for the
//! same key share one [`OnceCell`], so only the first runs the generator and
//! the rest await its result. A failed or abandoned initialisation leaves the
//! cell empty. Every invalidation bumps an epoch; a generation that finishes
//! under an older epoch must not be persisted.

use std::sync::{Arc, Mutex, PoisonError};

use cortex_core::challenge::{Challenge, ChallengeKey};
use tokio::sync::OnceCell;

pub type ChallengeCell = Arc<OnceCell<Challenge>>;

#[derive(Default)]
struct Slot {
  epoch: u64,
  entry: Option<(ChallengeKey, ChallengeCell)>,
}

#[derive(Default)]
pub struct ChallengeCache {
  slot: Mutex<Slot>,
}

impl ChallengeCache {
  pub fn new() -> Self { Self::default() }

  /// The shared cell for `key` and the epoch it belongs to. A different key
  /// replaces the entry.
  pub fn cell_for(&self, key: &ChallengeKey) -> (u64, ChallengeCell) {
    let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
    let epoch = slot.epoch;
    if let Some((k, cell)) = &slot.entry
      && k == key
    {
      return (epoch, Arc::clone(cell));
    }
    let cell = ChallengeCell::default();
    slot.entry = Some((key.clone(), Arc::clone(&cell)));
    (epoch, cell)
  }

  /// Drop the entry, whatever its key, and start a new epoch.
  pub fn invalidate(&self) {
    let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
    slot.epoch = slot.epoch.wrapping_add(1);
    slot.entry = None;
  }

  /// Whether a result generated for `key` under `epoch` may still be
  /// persisted.
  pub fn is_current(&self, epoch: u64, key: &ChallengeKey) -> bool {
    let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
    slot.epoch == epoch && slot.entry.as_ref().is_some_and(|(k, _)| k == key)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn key(topic: &str, level: u8) -> ChallengeKey {
    ChallengeKey { topic_key: topic.into(), mastery_level: level }
  }

  #[test]
  fn same_key_shares_a_cell() {
    let cache = ChallengeCache::new();
    let (e1, a) = cache.cell_for(&key("Dengue", 0));
    let (e2, b) = cache.cell_for(&key("Dengue", 0));
    assert_eq!(e1, e2);
    assert!(Arc::ptr_eq(&a, &b));
  }

  #[test]
  fn new_key_replaces_entry() {
    let cache = ChallengeCache::new();
    let (epoch, a) = cache.cell_for(&key("Dengue", 0));
    let (_, b) = cache.cell_for(&key("Dengue", 1));
    assert!(!Arc::ptr_eq(&a, &b));
    assert!(!cache.is_current(epoch, &key("Dengue", 0)));
    assert!(cache.is_current(epoch, &key("Dengue", 1)));
  }

  #[test]
  fn invalidate_drops_same_key_too() {
    let cache = ChallengeCache::new();
    let (epoch, a) = cache.cell_for(&key("Asma", 2));
    cache.invalidate();
    assert!(!cache.is_current(epoch, &key("Asma", 2)));
    let (next, b) = cache.cell_for(&key("Asma", 2));
    assert_ne!(epoch, next);
    assert!(!Arc::ptr_eq(&a, &b));
  }
}
