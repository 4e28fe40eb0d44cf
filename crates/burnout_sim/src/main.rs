//! Burnout inventory simulator
//!
//! Headless game loop that owns an inventory store, replays a scripted
//! scenario at a fixed step, and keeps a HUD mirror in sync from
//! notifications.
//!
//! Run with: cargo run -p burnout_sim -- [ASSET_DIR]
//!
//! The asset directory must contain `items.toml` and `scenario.toml`;
//! `inventory.toml` is optional.

mod hud;
mod scenario;
mod sim;

use burnout_inventory::{InventoryConfig, InventoryStore, ItemCatalog};
use hud::HudMirror;
use scenario::Scenario;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let asset_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("assets"));

    match run(&asset_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(asset_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&asset_dir.join("inventory.toml"))?;
    let catalog = ItemCatalog::load(asset_dir.join("items.toml"))?;
    let scenario = Scenario::load(asset_dir.join("scenario.toml"))?;
    let steps = scenario.resolve(&catalog)?;

    let mut store = InventoryStore::new(&config);
    let mut hud = HudMirror::new(store.subscribe_channel(), store.capacity());

    let report = sim::run(&scenario, &steps, &mut store, &mut hud);

    log::info!(
        "Simulated {} ticks: {} steps applied, {} rejected, {} skipped",
        report.ticks,
        report.applied,
        report.rejected,
        report.skipped
    );
    let counters = hud.counters();
    log::info!(
        "Notifications: {} added, {} removed, {} used, {} slot updates; {} key(s) shown",
        counters.added,
        counters.removed,
        counters.used,
        counters.slot_updates,
        hud.key_count()
    );

    println!("{}", hud.render());
    Ok(())
}

/// Inventory config is optional; a missing file means defaults
fn load_config(path: &Path) -> Result<InventoryConfig, Box<dyn std::error::Error>> {
    if !path.exists() {
        log::info!(
            "No inventory config at {}, using defaults",
            path.display()
        );
        return Ok(InventoryConfig::default());
    }
    Ok(InventoryConfig::load(path)?)
}
