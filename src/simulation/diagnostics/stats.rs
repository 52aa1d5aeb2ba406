use serde::Serialize;

use crate::systems::CellPhase;

use super::WorldCore;

/// Population of one regrowth kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KindStats {
    pub kind: String,
    pub alive: usize,
    /// Dormant cells per bucket, indexed like the probability table.
    pub dormant_by_bucket: Vec<usize>,
    /// Cells currently in a state outside the kind's family.
    pub other: usize,
}

impl KindStats {
    pub fn dormant(&self) -> usize {
        self.dormant_by_bucket.iter().sum()
    }
}

pub(super) fn regrow_stats(world: &WorldCore) -> Vec<KindStats> {
    world
        .level
        .kinds
        .iter()
        .map(|kind| {
            let mut stats = KindStats {
                kind: kind.name().to_string(),
                alive: 0,
                dormant_by_bucket: vec![0; kind.bucket_count()],
                other: 0,
            };
            for &piece in world.members(kind.id()) {
                match world.pieces.state(piece).map(|s| kind.phase(s)) {
                    Some(CellPhase::Alive) => stats.alive += 1,
                    Some(CellPhase::Dormant(bucket)) => stats.dormant_by_bucket[bucket] += 1,
                    _ => stats.other += 1,
                }
            }
            stats
        })
        .collect()
}

pub(super) fn alive_count(world: &WorldCore, kind: &str) -> Option<usize> {
    let kind = world.kind_by_name(kind)?;
    let alive = world
        .members(kind.id())
        .iter()
        .filter(|&&piece| world.pieces.state(piece) == Some(kind.live_state()))
        .count();
    Some(alive)
}
