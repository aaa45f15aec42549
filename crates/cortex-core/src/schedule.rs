//! The spaced-repetition update rule.
//!
//! A variant of SM-2 with four grades. Intervals are whole days; ease changes
//! are additive and the result is always clamped to
//! [`MIN_EASE`]..=[`MAX_EASE`].

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::progress::{MAX_EASE, MIN_EASE, Progress, ProgressStatus, Rating};

/// Multiplier applied to the interval on a hard recall.
const HARD_GROWTH: f64 = 1.2;
/// Extra multiplier applied on top of the ease on an easy recall.
const EASY_BONUS: f64 = 1.3;
const AGAIN_EASE_PENALTY: f64 = 0.2;
const HARD_EASE_PENALTY: f64 = 0.15;
const EASY_EASE_BONUS: f64 = 0.15;

/// The new scheduling tuple produced by [`schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
  pub interval:    u32,
  pub ease_factor: f64,
  pub status:      ProgressStatus,
}

/// Compute the next interval, ease and status for an angle rated `rating`.
pub fn schedule(rating: Rating, current_interval: u32, current_ease: f64) -> Schedule {
  let ease = clamp_ease(current_ease);
  let (interval, ease_factor, status) = match rating {
    Rating::Again => (0, ease - AGAIN_EASE_PENALTY, ProgressStatus::Learning),
    Rating::Hard => {
      let interval = match current_interval {
        0 => 1,
        i => grow(i, HARD_GROWTH),
      };
      (interval, ease - HARD_EASE_PENALTY, ProgressStatus::Review)
    }
    Rating::Good => {
      let interval = match current_interval {
        0 => 1,
        1 => 3,
        i => grow(i, ease),
      };
      (interval, ease, ProgressStatus::Review)
    }
    Rating::Easy => {
      let interval = match current_interval {
        0 => 2,
        1 => 4,
        i => grow(i, ease * EASY_BONUS),
      };
      (interval, ease + EASY_EASE_BONUS, ProgressStatus::Review)
    }
  };

  Schedule { interval, ease_factor: clamp_ease(ease_factor), status }
}

/// When an angle with `interval` should next be shown. A zero interval still
/// lands on the following day so a failed item is not presented again
/// immediately.
pub fn next_review(now: DateTime<Utc>, interval: u32) -> DateTime<Utc> {
  now + Duration::days(i64::from(interval.max(1)))
}

pub fn clamp_ease(ease: f64) -> f64 { ease.clamp(MIN_EASE, MAX_EASE) }

fn grow(interval: u32, factor: f64) -> u32 {
  let grown = (f64::from(interval) * factor).floor();
  if grown >= f64::from(u32::MAX) { u32::MAX } else { grown as u32 }
}

impl Schedule {
  /// Materialise the progress row written for a rating recorded at `now`.
  pub fn into_progress(self, now: DateTime<Utc>) -> Progress {
    Progress {
      status:        self.status,
      interval:      self.interval,
      ease_factor:   self.ease_factor,
      next_review:   Some(next_review(now, self.interval)),
      last_reviewed: Some(now),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const RATINGS: [Rating; 4] = [Rating::Again, Rating::Hard, Rating::Good, Rating::Easy];

  fn approx(a: f64, b: f64) -> bool { (a - b).abs() < 1e-9 }

  #[test]
  fn ease_stays_within_bounds() {
    let eases = [MIN_EASE, 1.4, 2.0, 2.5, 2.9, MAX_EASE];
    for rating in RATINGS {
      for ease in eases {
        for interval in [0, 1, 2, 10, 365] {
          let s = schedule(rating, interval, ease);
          assert!(
            (MIN_EASE..=MAX_EASE).contains(&s.ease_factor),
            "{rating} i={interval} e={ease} -> {}",
            s.ease_factor
          );
        }
      }
    }
  }

  #[test]
  fn again_always_resets_interval() {
    for interval in [0, 1, 7, 400] {
      for ease in [MIN_EASE, 2.5, MAX_EASE] {
        let s = schedule(Rating::Again, interval, ease);
        assert_eq!(s.interval, 0);
        assert_eq!(s.status, ProgressStatus::Learning);
      }
    }
    assert!(approx(schedule(Rating::Again, 5, 2.5).ease_factor, 2.3));
    assert!(approx(schedule(Rating::Again, 5, 1.4).ease_factor, MIN_EASE));
  }

  #[test]
  fn good_first_steps() {
    assert_eq!(
      schedule(Rating::Good, 0, 2.2),
      Schedule { interval: 1, ease_factor: 2.2, status: ProgressStatus::Review }
    );
    assert_eq!(
      schedule(Rating::Good, 1, 2.2),
      Schedule { interval: 3, ease_factor: 2.2, status: ProgressStatus::Review }
    );
  }

  #[test]
  fn good_multiplies_by_ease() {
    let s = schedule(Rating::Good, 10, 2.5);
    assert_eq!(s.interval, 25);
    assert!(approx(s.ease_factor, 2.5));
    assert_eq!(s.status, ProgressStatus::Review);
  }

  #[test]
  fn easy_from_new() {
    let s = schedule(Rating::Easy, 0, 2.0);
    assert_eq!(s.interval, 2);
    assert!(approx(s.ease_factor, 2.15));
    assert_eq!(schedule(Rating::Easy, 1, 2.0).interval, 4);
  }

  #[test]
  fn easy_applies_bonus_and_caps_ease() {
    // floor(10 * 2.5 * 1.3) = floor(32.5)
    let s = schedule(Rating::Easy, 10, 2.5);
    assert_eq!(s.interval, 32);
    assert!(approx(s.ease_factor, 2.65));
    assert!(approx(schedule(Rating::Easy, 10, 2.95).ease_factor, MAX_EASE));
  }

  #[test]
  fn hard_grows_slowly() {
    let s = schedule(Rating::Hard, 0, 2.5);
    assert_eq!(s.interval, 1);
    assert!(approx(s.ease_factor, 2.35));
    assert_eq!(schedule(Rating::Hard, 10, 2.5).interval, 12);
    // floor(1 * 1.2) keeps a one-day item at one day.
    assert_eq!(schedule(Rating::Hard, 1, 2.5).interval, 1);
    assert!(approx(schedule(Rating::Hard, 3, 1.35).ease_factor, MIN_EASE));
  }

  #[test]
  fn zero_interval_is_due_tomorrow() {
    let now = Utc::now();
    assert_eq!(next_review(now, 0), now + Duration::days(1));
    assert_eq!(next_review(now, 1), now + Duration::days(1));
    assert_eq!(next_review(now, 25), now + Duration::days(25));
  }

  #[test]
  fn into_progress_stamps_dates() {
    let now = Utc::now();
    let p = schedule(Rating::Again, 4, 2.5).into_progress(now);
    assert_eq!(p.last_reviewed, Some(now));
    assert_eq!(p.next_review, Some(now + Duration::days(1)));
    assert!(p.validate().is_ok());
  }
}
