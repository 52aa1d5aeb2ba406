//! Updater registry - the per-step scheduler
//!
//! Updaters run once per step in descending priority; ties keep registration
//! order. Each targets the dormant cells of one regrowth kind (or of all
//! kinds) and may gate every candidate behind a Bernoulli trial.

use rand::Rng;

use crate::core::KindId;

/// Bucket recomputation. Must run before sampling in the same step.
pub const REFRESH_PRIORITY: i32 = 200;
pub const REGROW_PRIORITY: i32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdaterKind {
    /// Re-bucket dormant cells from their current neighbor count.
    RefreshBucket,
    /// Turn dormant cells alive.
    Regrow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateProbability {
    /// Every candidate fires; blocking rules still apply.
    Always,
    /// Looked up from the kind's table by the candidate's current bucket.
    PerBucket,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Updater {
    pub kind: UpdaterKind,
    pub priority: i32,
    /// Regrowth kind filter; `None` targets every kind.
    pub group: Option<KindId>,
    pub probability: UpdateProbability,
}

impl Updater {
    pub fn refresh(group: KindId) -> Self {
        Self {
            kind: UpdaterKind::RefreshBucket,
            priority: REFRESH_PRIORITY,
            group: Some(group),
            probability: UpdateProbability::Always,
        }
    }

    pub fn regrow(group: KindId) -> Self {
        Self {
            kind: UpdaterKind::Regrow,
            priority: REGROW_PRIORITY,
            group: Some(group),
            probability: UpdateProbability::PerBucket,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct UpdaterRegistry {
    updaters: Vec<Updater>,
}

impl UpdaterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, updater: Updater) {
        let at = self
            .updaters
            .iter()
            .position(|u| u.priority < updater.priority)
            .unwrap_or(self.updaters.len());
        self.updaters.insert(at, updater);
    }

    /// Updaters in execution order.
    pub fn updaters(&self) -> &[Updater] {
        &self.updaters
    }

    pub fn len(&self) -> usize {
        self.updaters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updaters.is_empty()
    }

    pub fn clear(&mut self) {
        self.updaters.clear();
    }
}

/// One Bernoulli trial. Certain outcomes draw nothing from `rng`.
#[inline]
pub fn bernoulli<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    if p <= 0.0 {
        false
    } else if p >= 1.0 {
        true
    } else {
        rng.gen::<f64>() < p
    }
}
