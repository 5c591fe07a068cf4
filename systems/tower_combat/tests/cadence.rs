use shadow_gate_core::{DefenderKind, EnemyId};
use shadow_gate_system_tower_combat::{engage, Attack, CooldownTimer};

fn attacks_over(kind: DefenderKind, seconds: u32, dt: f32) -> usize {
    let mut timer = CooldownTimer::ready(kind.cooldown());
    let ticks = (seconds as f32 / dt).round() as usize;
    (0..ticks)
        .filter(|_| engage(kind, &mut timer, dt, || Some(EnemyId::new(0))).is_some())
        .count()
}

#[test]
fn attack_rate_follows_the_cooldown() {
    let melee = attacks_over(DefenderKind::Melee, 8, 0.0625);
    let ranged = attacks_over(DefenderKind::Ranged, 12, 0.0625);

    // Ready on placement, then one attack per elapsed cooldown.
    assert!((10..=11).contains(&melee), "melee attacked {melee} times");
    assert!((10..=11).contains(&ranged), "ranged attacked {ranged} times");
}

#[test]
fn damage_matches_the_kind_table() {
    for kind in [DefenderKind::Melee, DefenderKind::Ranged] {
        let mut timer = CooldownTimer::ready(kind.cooldown());
        let attack = engage(kind, &mut timer, 0.0, || Some(EnemyId::new(5))).expect("ready");
        assert_eq!(attack.damage(), kind.damage());
        assert_eq!(
            matches!(attack, Attack::Launch { .. }),
            kind.fires_projectiles()
        );
    }
}
