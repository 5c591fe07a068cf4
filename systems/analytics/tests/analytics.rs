use shadow_gate_core::{Command, DefenderKind, Event, SlotId};
use shadow_gate_system_analytics::{Analytics, SessionReport};
use shadow_gate_world::{apply, query, World};

const FRAME: f32 = 1.0 / 60.0;

fn play_first_wave() -> (World, SessionReport) {
    let mut world = World::new();
    let mut analytics = Analytics::new();
    let mut events = Vec::new();

    for command in [
        Command::PlaceDefender {
            slot: SlotId::new(0),
            kind: DefenderKind::Melee,
        },
        Command::PlaceDefender {
            slot: SlotId::new(1),
            kind: DefenderKind::Ranged,
        },
        Command::StartWave,
    ] {
        apply(&mut world, command, &mut events);
    }
    analytics.handle(&events);

    let mut frames = 0;
    while query::is_wave_running(&world) {
        events.clear();
        apply(&mut world, Command::Tick { dt: FRAME }, &mut events);
        analytics.handle(&events);
        frames += 1;
        assert!(frames < 60 * 120, "wave never finished");
    }

    (world, analytics.into_report())
}

#[test]
fn every_spawned_enemy_is_resolved_exactly_once() {
    let (world, report) = play_first_wave();

    assert_eq!(report.waves_started, 1);
    assert_eq!(report.waves_cleared, 1);
    assert_eq!(report.enemies_spawned, 10);
    assert_eq!(report.enemies_resolved(), report.enemies_spawned);
    assert_eq!(
        report.enemies_escaped,
        20 - query::lives(&world),
        "escapes match lost lives"
    );
}

#[test]
fn report_accounts_for_defender_activity() {
    let (_, report) = play_first_wave();

    assert_eq!(report.defenders_placed, 1);
    assert_eq!(report.placements_rejected, 1);
    assert!(report.melee_strikes > 0);
    assert!(report.projectiles_launched >= report.projectile_hits + report.projectiles_expired);
    assert_eq!(report.game_over_level, None);
    assert_eq!(
        report.mana_earned,
        report.enemies_defeated as f32 * 12.0,
        "level one kills are worth twelve mana"
    );
}

#[test]
fn replaying_a_session_yields_the_same_report() {
    let (_, first) = play_first_wave();
    let (_, second) = play_first_wave();

    assert_eq!(first, second);
    assert!(first.simulated_seconds > 0.0);
    assert_eq!(first.ticks_skipped, 0);
}

#[test]
fn events_without_a_world_are_folded_directly() {
    let mut analytics = Analytics::new();
    analytics.handle(&[
        Event::TickSkipped { dt: f32::NAN },
        Event::TimeAdvanced { dt: 0.05 },
        Event::GameOver { level: 3 },
    ]);

    let report = analytics.report();
    assert_eq!(report.ticks_skipped, 1);
    assert_eq!(report.ticks_simulated, 1);
    assert_eq!(report.game_over_level, Some(3));
}
