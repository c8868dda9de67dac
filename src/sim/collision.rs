//! Collision detection and response
//!
//! One resolution pass runs per tick, in a fixed order so scoring stays
//! consistent. Removal is two-phase (mark, then compact) so no collection is
//! mutated while it is being iterated, and an enemy killed by a bullet can
//! never be resolved a second time by the body-contact pass in the same tick.

use glam::Vec2;

use super::state::{GameState, spawn_explosion};
use crate::consts::*;

/// Axis-aligned bounding box with strict-inequality overlap
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Run the full collision pass for one tick:
/// 1. player bullets vs enemies
/// 2. enemy bullets vs fighter
/// 3. enemy bodies vs fighter
/// 4. power-ups vs fighter
pub fn resolve_collisions(state: &mut GameState) {
    let GameState {
        fighter,
        enemies,
        power_ups,
        particles,
        rng,
        score,
        enemies_killed_this_wave,
        game_over,
        wave,
        ..
    } = state;

    let was_over = *game_over;

    // 1. Player bullets vs enemies. Each bullet is consumed by its first
    // hit; `dead` keeps a destroyed enemy from soaking further bullets.
    let mut dead = vec![false; enemies.len()];
    fighter.bullets.retain(|bullet| {
        let bullet_box = bullet.aabb();
        for (i, enemy) in enemies.iter_mut().enumerate() {
            if dead[i] || !bullet_box.overlaps(&enemy.aabb()) {
                continue;
            }
            if enemy.take_damage() {
                dead[i] = true;
                *score += enemy.kind.score();
                *enemies_killed_this_wave += 1;
                spawn_explosion(particles, rng, enemy.center(), CGA_MAGENTA);
            }
            return false;
        }
        true
    });
    let mut idx = 0;
    enemies.retain(|_| {
        let keep = !dead[idx];
        idx += 1;
        keep
    });

    // 2. Enemy bullets vs fighter. The bullet is consumed whether or not
    // the damage lands; feedback only on an applied hit.
    for enemy in enemies.iter_mut() {
        enemy.bullets.retain(|bullet| {
            if !bullet.aabb().overlaps(&fighter.aabb()) {
                return true;
            }
            if fighter.take_damage(ENEMY_BULLET_DAMAGE) {
                spawn_explosion(particles, rng, fighter.center(), CGA_CYAN);
            }
            false
        });
    }
    if fighter.health <= 0 {
        *game_over = true;
    }

    // 3. Enemy bodies vs fighter: the enemy is destroyed outright, no score.
    enemies.retain(|enemy| {
        if !enemy.aabb().overlaps(&fighter.aabb()) {
            return true;
        }
        if fighter.take_damage(ENEMY_CONTACT_DAMAGE) {
            spawn_explosion(particles, rng, enemy.center(), CGA_MAGENTA);
        }
        false
    });
    if fighter.health <= 0 {
        *game_over = true;
    }

    // 4. Power-up collection
    power_ups.retain(|power_up| {
        if !power_up.aabb().overlaps(&fighter.aabb()) {
            return true;
        }
        fighter.activate_power_up(power_up.kind);
        *score += POWERUP_SCORE;
        false
    });

    if *game_over && !was_over {
        log::info!("fighter destroyed on wave {}, final score {}", wave, score);
    }
}
