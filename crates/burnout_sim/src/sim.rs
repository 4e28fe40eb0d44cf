//! Fixed-step simulation loop

use crate::hud::HudMirror;
use crate::scenario::{ResolvedStep, Scenario};
use burnout_inventory::InventoryStore;

/// Outcome of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Frames simulated
    pub ticks: u64,
    /// Steps the store accepted
    pub applied: usize,
    /// Steps the store rejected
    pub rejected: usize,
    /// Steps scheduled after the end of the run
    pub skipped: usize,
}

/// Replay `steps` against `store`, one `tick` per frame.
///
/// Each frame first applies every step that is due, then advances timers,
/// then lets the HUD catch up on notifications.
pub fn run(
    scenario: &Scenario,
    steps: &[ResolvedStep],
    store: &mut InventoryStore,
    hud: &mut HudMirror,
) -> RunReport {
    let dt = scenario.dt;
    let total_ticks = (scenario.duration / dt).ceil() as u64;
    let mut report = RunReport::default();
    let mut next = 0;

    for tick in 0..total_ticks {
        let now = tick as f32 * dt;

        while let Some(step) = steps.get(next).filter(|step| step.at <= now) {
            if step.apply(store) {
                report.applied += 1;
            } else {
                report.rejected += 1;
            }
            next += 1;
        }

        store.tick(dt);
        hud.pump();
        report.ticks += 1;
    }

    report.skipped = steps.len() - next;
    if report.skipped > 0 {
        log::warn!("{} step(s) scheduled after the end of the run", report.skipped);
    }

    report
}
