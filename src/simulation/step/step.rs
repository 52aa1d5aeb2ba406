use crate::domain::WorldError;
use crate::systems::UpdaterKind;

use super::{refresh, regrow, PerfTimer, WorldCore};

pub(super) fn step(world: &mut WorldCore) -> Result<(), WorldError> {
    world.ensure_running()?;

    let perf_on = world.perf_enabled;
    if perf_on {
        world.perf_stats.reset();
        world.perf_stats.piece_count = world.pieces.len() as u32;
        world.perf_stats.grid_size = world.grid.size() as u32;
    }
    let step_timer = PerfTimer::start_if(perf_on);

    // Registration can't change mid-step; iterate a copy so passes may borrow
    // the world mutably.
    let updaters = world.updaters.updaters().to_vec();
    for updater in updaters {
        let timer = PerfTimer::start_if(perf_on);
        let total_ms = match updater.kind {
            UpdaterKind::RefreshBucket => {
                refresh::refresh_buckets(world, updater.group)?;
                &mut world.perf_stats.refresh_ms
            }
            UpdaterKind::Regrow => {
                regrow::regrow(world, updater.group, updater.probability)?;
                &mut world.perf_stats.regrow_ms
            }
        };
        if let Some(timer) = timer {
            timer.add_to(total_ms);
        }
    }

    if let Some(timer) = step_timer {
        world.perf_stats.step_ms = timer.elapsed_ms();
    }
    world.frame += 1;
    Ok(())
}
