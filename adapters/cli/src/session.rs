//! Headless driver that plays a scenario at a fixed frame rate.

use std::collections::VecDeque;

use log::{info, warn};
use shadow_gate_core::{Command, Event};
use shadow_gate_system_analytics::{Analytics, SessionReport};
use shadow_gate_world::{apply, query, World};

use crate::scenario::BuildOrder;

/// Bounds on how long a session keeps running.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Limits {
    pub(crate) waves: u32,
    pub(crate) fps: u32,
    pub(crate) max_seconds: f32,
}

/// Plays waves until `limits.waves` have been cleared, the lives run out or
/// the simulated time budget is spent.
///
/// Build orders are attempted front to back as soon as the treasury can pay
/// for them; orders the world rejects for any other reason are dropped.
pub(crate) fn run(world: &mut World, build: &[BuildOrder], limits: Limits) -> SessionReport {
    let dt = 1.0 / limits.fps as f32;
    let mut analytics = Analytics::new();
    let mut events = Vec::new();
    let mut orders: VecDeque<BuildOrder> = build.iter().copied().collect();
    let mut elapsed = 0.0_f32;

    while !query::is_game_over(world) && elapsed < limits.max_seconds {
        place_affordable(world, &mut orders, &mut events);

        if !query::is_wave_running(world) {
            if query::level(world) >= limits.waves {
                break;
            }
            apply(world, Command::StartWave, &mut events);
        }

        apply(world, Command::Tick { dt }, &mut events);
        elapsed += dt;

        analytics.handle(&events);
        events.clear();
    }

    if elapsed >= limits.max_seconds {
        info!("stopping after {elapsed:.1}s of simulated time");
    }
    analytics.handle(&events);
    analytics.into_report()
}

fn place_affordable(
    world: &mut World,
    orders: &mut VecDeque<BuildOrder>,
    events: &mut Vec<Event>,
) {
    while let Some(order) = orders.front().copied() {
        if query::mana(world) < order.kind.cost() {
            return;
        }

        let _ = orders.pop_front();
        if let Err(reason) = world.place_defender(order.slot_id(), order.kind, events) {
            warn!("dropping build order for slot {}: {reason}", order.slot);
        }
    }
}
