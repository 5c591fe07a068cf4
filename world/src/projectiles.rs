//! Projectiles committed to a single enemy.

use shadow_gate_core::{
    balance::{PROJECTILE_HIT_RADIUS, PROJECTILE_SPEED},
    geometry, EnemyId, ProjectileId, ProjectileSnapshot, Vec2,
};

use crate::enemies::{self, Enemy};

/// Outcome of advancing a projectile for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Flight {
    InFlight,
    Hit { enemy: EnemyId, damage: f32 },
    Expired,
}

#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    id: ProjectileId,
    position: Vec2,
    target: EnemyId,
    damage: f32,
    speed: f32,
}

impl Projectile {
    pub(crate) fn launch(id: ProjectileId, origin: Vec2, target: EnemyId, damage: f32) -> Self {
        Self {
            id,
            position: origin,
            target,
            damage,
            speed: PROJECTILE_SPEED,
        }
    }

    pub(crate) fn id(&self) -> ProjectileId {
        self.id
    }

    /// Homes on the target's current position.
    ///
    /// A projectile whose target is gone or no longer active expires without
    /// effect. The hit test runs before moving, so a projectile that closes in
    /// this tick lands on the next one.
    pub(crate) fn advance(&mut self, dt: f32, enemies: &[Enemy]) -> Flight {
        let Some(target) = enemies::find(enemies, self.target).filter(|enemy| enemy.is_active())
        else {
            return Flight::Expired;
        };

        let aim = target.candidate().position;
        if geometry::distance(self.position, aim) < PROJECTILE_HIT_RADIUS {
            return Flight::Hit {
                enemy: self.target,
                damage: self.damage,
            };
        }

        self.position += geometry::step_toward(self.position, aim, self.speed * dt);
        Flight::InFlight
    }

    pub(crate) fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: self.id,
            position: self.position,
            target: self.target,
            damage: self.damage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shadow_gate_core::WaveStats;
    use shadow_gate_system_movement::Movement;

    fn enemy_at(id: u32, position: Vec2) -> Enemy {
        Enemy::spawn(
            EnemyId::new(id),
            position,
            WaveStats {
                hp: 60.0,
                speed: 85.0,
                count: 1,
                reward: 12.0,
            },
        )
    }

    fn launch_at(target: EnemyId) -> Projectile {
        Projectile::launch(ProjectileId::new(0), Vec2::ZERO, target, 20.0)
    }

    #[test]
    fn closes_distance_at_projectile_speed() {
        let enemies = [enemy_at(0, Vec2::new(300.0, 50.0))];
        let mut projectile = Projectile::launch(
            ProjectileId::new(0),
            Vec2::new(100.0, 50.0),
            EnemyId::new(0),
            20.0,
        );

        assert_eq!(projectile.advance(0.1, &enemies), Flight::InFlight);
        let position = projectile.snapshot().position;
        assert!((position.x - 140.0).abs() < 1e-4);
        assert!((position.y - 50.0).abs() < 1e-4);
    }

    #[test]
    fn homes_on_a_moving_target_from_its_launch_point() {
        let path = [Vec2::new(100.0, 0.0), Vec2::new(1000.0, 0.0)];
        let movement = Movement::default();
        let mut enemies = [enemy_at(0, path[0])];
        let mut projectile = Projectile::launch(
            ProjectileId::new(0),
            Vec2::new(500.0, 300.0),
            EnemyId::new(0),
            20.0,
        );

        let mut gap = projectile.snapshot().position.distance(path[0]);
        for _ in 0..200 {
            enemies[0].advance(0.016, &path, &movement);
            match projectile.advance(0.016, &enemies) {
                Flight::Hit { enemy, damage } => {
                    assert_eq!(enemy, EnemyId::new(0));
                    assert_eq!(damage, 20.0);
                    assert!(enemies[0].snapshot().position.x > path[0].x);
                    return;
                }
                Flight::Expired => panic!("target is still active"),
                Flight::InFlight => {}
            }

            let now = projectile
                .snapshot()
                .position
                .distance(enemies[0].snapshot().position);
            assert!(now < gap, "projectile fell behind its target");
            gap = now;
        }
        panic!("projectile never reached its target");
    }

    #[test]
    fn hits_inside_radius() {
        let enemies = [enemy_at(0, Vec2::new(9.0, 0.0))];
        let mut projectile = launch_at(EnemyId::new(0));

        assert_eq!(
            projectile.advance(0.016, &enemies),
            Flight::Hit {
                enemy: EnemyId::new(0),
                damage: 20.0
            }
        );
    }

    #[test]
    fn expires_when_target_is_gone() {
        let mut projectile = launch_at(EnemyId::new(3));
        assert_eq!(projectile.advance(0.016, &[]), Flight::Expired);
    }

    #[test]
    fn expires_when_target_is_defeated() {
        let mut target = enemy_at(3, Vec2::new(5.0, 0.0));
        target.take_damage(100.0);
        let mut projectile = launch_at(EnemyId::new(3));

        assert_eq!(projectile.advance(0.016, &[target]), Flight::Expired);
    }
}
