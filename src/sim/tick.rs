//! Fixed-tick simulation step
//!
//! Advances the whole session by one discrete tick in a strict order:
//! input, background, wave bookkeeping, spawn timers, entity updates,
//! collision resolution, score bookkeeping. Nothing suspends mid-tick and
//! no collection is touched by more than one phase at a time.

use glam::Vec2;
use rand::Rng;

use super::collision::resolve_collisions;
use super::state::{Enemy, EnemyKind, GameState, PowerUp, PowerUpKind};
use crate::consts::*;

/// Input snapshot for a single tick. Directional keys and fire are
/// level-sensed (held); pause and restart are edge-triggered and must be
/// delivered at most once per key-down.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
    /// Pause toggle (ignored during game over)
    pub pause: bool,
    pub restart: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.restart {
        state.restart();
        return;
    }
    if input.pause && !state.game_over {
        state.paused = !state.paused;
    }
    if state.paused {
        return;
    }
    if state.game_over {
        // Everything freezes except explosion fallout
        state.particles.retain_mut(|p| {
            p.update();
            p.alive()
        });
        return;
    }

    // Input application
    let dx = (input.right as i32 - input.left as i32) as f32;
    let dy = (input.down as i32 - input.up as i32) as f32;
    if dx != 0.0 || dy != 0.0 {
        state.fighter.move_by(dx, dy);
    }
    if input.fire {
        state.fighter.shoot();
    }

    state.starfield.update(&mut state.rng);

    advance_wave(state);
    run_spawn_timers(state);

    state.fighter.update();

    for enemy in state.enemies.iter_mut() {
        enemy.update(&mut state.rng);
    }
    // Off-bottom enemies leave without scoring
    state.enemies.retain(|e| e.pos.y <= PLAYFIELD_H);

    for power_up in state.power_ups.iter_mut() {
        power_up.update();
    }
    state.power_ups.retain(|p| p.pos.y <= PLAYFIELD_H);

    state.particles.retain_mut(|p| {
        p.update();
        p.alive()
    });

    resolve_collisions(state);

    state.high_score = state.high_score.max(state.score);
}

/// A wave completes once the kill quota is met and the field is clear
fn advance_wave(state: &mut GameState) {
    if state.enemies_killed_this_wave >= state.enemies_per_wave && state.enemies.is_empty() {
        state.wave += 1;
        state.enemies_killed_this_wave = 0;
        state.enemies_per_wave += WAVE_QUOTA_STEP;
        state.score += WAVE_CLEAR_BONUS;
        log::info!(
            "wave {} cleared, next quota {} enemies",
            state.wave - 1,
            state.enemies_per_wave
        );
    }
}

/// Ticks between enemy spawns; waves accelerate down to a floor of 30
pub fn enemy_spawn_interval(wave: u32) -> u32 {
    (90i64 - wave as i64 * 5).max(30) as u32
}

fn run_spawn_timers(state: &mut GameState) {
    // Enemy spawns stop once the quota is reached so the field can clear
    state.enemy_spawn_timer += 1;
    if state.enemy_spawn_timer > enemy_spawn_interval(state.wave)
        && state.enemies_killed_this_wave < state.enemies_per_wave
    {
        spawn_enemy(state);
        state.enemy_spawn_timer = 0;
    }

    // Power-ups are a timed 50/50 roll; the timer resets either way
    state.powerup_spawn_timer += 1;
    if state.powerup_spawn_timer > POWERUP_SPAWN_INTERVAL {
        if state.rng.random_bool(POWERUP_SPAWN_CHANCE) {
            spawn_powerup(state);
        }
        state.powerup_spawn_timer = 0;
    }
}

/// Weighted, wave-gated kind selection from a single roll. Tank is checked
/// first so it takes precedence when both thresholds qualify.
pub fn roll_enemy_kind(wave: u32, rng: &mut impl Rng) -> EnemyKind {
    let roll: f32 = rng.random();
    if wave >= 3 && roll < 0.2 {
        EnemyKind::Tank
    } else if wave >= 2 && roll < 0.4 {
        EnemyKind::Fast
    } else {
        EnemyKind::Basic
    }
}

fn spawn_enemy(state: &mut GameState) {
    let kind = roll_enemy_kind(state.wave, &mut state.rng);
    let x = state.rng.random_range(0.0..PLAYFIELD_W - 20.0);
    state
        .enemies
        .push(Enemy::new(Vec2::new(x, ENEMY_SPAWN_Y), kind, &mut state.rng));
}

fn spawn_powerup(state: &mut GameState) {
    let x = state.rng.random_range(20.0..PLAYFIELD_W - 20.0);
    let kind = match state.rng.random_range(0..3) {
        0 => PowerUpKind::Health,
        1 => PowerUpKind::RapidFire,
        _ => PowerUpKind::Shield,
    };
    state
        .power_ups
        .push(PowerUp::new(Vec2::new(x, -POWERUP_SIZE), kind));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Bullet, BulletOwner, Particle};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    /// An enemy parked mid-field, clear of the fighter
    fn field_enemy(rng: &mut Pcg32) -> Enemy {
        Enemy::new(Vec2::new(300.0, 100.0), EnemyKind::Basic, rng)
    }

    #[test]
    fn test_spawn_interval_scales_with_wave() {
        assert_eq!(enemy_spawn_interval(1), 85);
        assert_eq!(enemy_spawn_interval(5), 65);
        assert_eq!(enemy_spawn_interval(12), 30);
        // Floor holds for arbitrarily late waves
        assert_eq!(enemy_spawn_interval(100), 30);
    }

    #[test]
    fn test_wave_one_spawns_only_basic() {
        let mut rng = rng();
        for _ in 0..1000 {
            assert_eq!(roll_enemy_kind(1, &mut rng), EnemyKind::Basic);
        }
    }

    #[test]
    fn test_wave_five_kind_split() {
        let mut rng = rng();
        let n = 20_000;
        let mut tanks = 0u32;
        let mut fasts = 0u32;
        for _ in 0..n {
            match roll_enemy_kind(5, &mut rng) {
                EnemyKind::Tank => tanks += 1,
                EnemyKind::Fast => fasts += 1,
                EnemyKind::Basic => {}
            }
        }
        // Expected split: 20% tank, 20% fast (roll in [0.2, 0.4)), 60% basic
        let tank_share = tanks as f32 / n as f32;
        let fast_share = fasts as f32 / n as f32;
        assert!((0.17..0.23).contains(&tank_share), "tank {tank_share}");
        assert!((0.17..0.23).contains(&fast_share), "fast {fast_share}");
    }

    #[test]
    fn test_wave_completion_increments_exactly() {
        let mut state = GameState::new(1);
        state.enemies_killed_this_wave = 10;
        let score_before = state.score;

        tick(&mut state, &TickInput::default());

        assert_eq!(state.wave, 2);
        assert_eq!(state.enemies_per_wave, 15);
        assert_eq!(state.enemies_killed_this_wave, 0);
        assert_eq!(state.score, score_before + WAVE_CLEAR_BONUS);
    }

    #[test]
    fn test_wave_waits_for_field_to_clear() {
        let mut state = GameState::new(1);
        state.enemies_killed_this_wave = 10;
        let mut rng = rng();
        state.enemies.push(field_enemy(&mut rng));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.wave, 1);
        assert_eq!(state.enemies_per_wave, 10);
    }

    #[test]
    fn test_enemy_spawns_once_timer_passes_interval() {
        let mut state = GameState::new(1);
        state.enemy_spawn_timer = enemy_spawn_interval(1);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemy_spawn_timer, 0);
        assert_eq!(state.enemies[0].kind, EnemyKind::Basic);
        assert_eq!(state.enemies[0].pos.y, ENEMY_SPAWN_Y + 2.0); // fell one tick
    }

    #[test]
    fn test_no_spawns_once_quota_reached() {
        let mut state = GameState::new(1);
        state.enemy_spawn_timer = 1000;
        state.enemies_killed_this_wave = 10;
        // A live enemy blocks wave completion, isolating the spawn gate
        let mut rng = rng();
        state.enemies.push(field_enemy(&mut rng));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.enemies.len(), 1);
        assert!(state.enemy_spawn_timer > 1000);
    }

    #[test]
    fn test_powerup_timer_resets_regardless_of_roll() {
        let mut state = GameState::new(1);
        state.powerup_spawn_timer = POWERUP_SPAWN_INTERVAL;

        tick(&mut state, &TickInput::default());

        assert_eq!(state.powerup_spawn_timer, 0);
        assert!(state.power_ups.len() <= 1);
    }

    #[test]
    fn test_kill_quota_scenario_scores_150() {
        let mut state = GameState::new(1);
        let mut rng = rng();

        // Kill ten basics with point-blank bullets, one per tick
        for _ in 0..10 {
            state.enemies.push(field_enemy(&mut rng));
            state.fighter.bullets.push(Bullet::new(
                Vec2::new(305.0, 105.0),
                Vec2::ZERO,
                BulletOwner::Player,
            ));
            super::resolve_collisions(&mut state);
        }
        assert_eq!(state.score, 100);
        assert_eq!(state.enemies_killed_this_wave, 10);
        assert!(state.enemies.is_empty());

        // Next tick closes the wave
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 150);
        assert_eq!(state.wave, 2);
        assert_eq!(state.enemies_per_wave, 15);
        assert_eq!(state.high_score, 150);
    }

    #[test]
    fn test_movement_and_fire_input() {
        let mut state = GameState::new(1);
        let start = state.fighter.pos;
        let input = TickInput {
            right: true,
            up: true,
            fire: true,
            ..Default::default()
        };

        tick(&mut state, &input);

        assert_eq!(state.fighter.pos.x, start.x + FIGHTER_SPEED);
        assert_eq!(state.fighter.pos.y, start.y - FIGHTER_SPEED);
        assert_eq!(state.fighter.bullets.len(), 1);
        // Cooldown already ticked down once by fighter.update()
        assert_eq!(state.fighter.shoot_cooldown, SHOOT_COOLDOWN_TICKS - 1);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut state = GameState::new(1);
        let mut rng = rng();
        state.enemies.push(field_enemy(&mut rng));

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause);
        assert!(state.paused);

        let enemy_y = state.enemies[0].pos.y;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemies[0].pos.y, enemy_y);

        // Toggling again resumes in the same tick
        tick(&mut state, &pause);
        assert!(!state.paused);
        assert!(state.enemies[0].pos.y > enemy_y);
    }

    #[test]
    fn test_game_over_freezes_all_but_particles() {
        let mut state = GameState::new(1);
        state.game_over = true;
        let mut rng = rng();
        state.enemies.push(field_enemy(&mut rng));
        state
            .particles
            .push(Particle::new(Vec2::new(50.0, 50.0), CGA_CYAN, &mut rng));

        tick(&mut state, &TickInput::default());

        assert!(state.game_over);
        assert_eq!(state.enemies[0].pos.y, 100.0);
        assert_eq!(state.particles[0].life, PARTICLE_LIFE_TICKS - 1);
    }

    #[test]
    fn test_game_over_sticks_until_restart() {
        let mut state = GameState::new(1);
        state.game_over = true;
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
            assert!(state.game_over);
        }

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart);
        assert!(!state.game_over);
        assert_eq!(state.wave, 1);
    }

    #[test]
    fn test_restart_round_trip_keeps_high_score() {
        let mut state = GameState::new(1);
        state.score = 300;
        state.high_score = 300;
        state.wave = 3;
        state.enemies_per_wave = 20;
        state.game_over = true;

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart);

        assert_eq!(state.score, 0);
        assert_eq!(state.wave, 1);
        assert_eq!(state.enemies_killed_this_wave, 0);
        assert_eq!(state.enemies_per_wave, BASE_ENEMIES_PER_WAVE);
        assert!(!state.game_over);
        assert!(!state.paused);
        assert_eq!(state.high_score, 300);
    }

    #[test]
    fn test_high_score_tracks_score() {
        let mut state = GameState::new(1);
        state.score = 75;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.high_score, 75);

        state.high_score = 500;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.high_score, 500);
    }

    #[test]
    fn test_determinism() {
        // Two states with the same seed and inputs stay identical
        let mut a = GameState::new(99999);
        let mut b = GameState::new(99999);
        let inputs = [
            TickInput {
                left: true,
                fire: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                down: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for i in 0..600 {
            let input = &inputs[i % inputs.len()];
            tick(&mut a, input);
            tick(&mut b, input);
        }

        assert_eq!(a.score, b.score);
        assert_eq!(a.enemies.len(), b.enemies.len());
        assert_eq!(a.power_ups.len(), b.power_ups.len());
        assert_eq!(a.fighter.pos, b.fighter.pos);
        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(ea.pos, eb.pos);
            assert_eq!(ea.kind, eb.kind);
        }
    }
}
