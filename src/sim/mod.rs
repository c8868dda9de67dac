//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only, one discrete step per frame
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Aabb, resolve_collisions};
pub use state::{
    Bullet, BulletOwner, Enemy, EnemyKind, EnemyStats, Fighter, GameState, Particle, PowerUp,
    PowerUpKind, Star, StarField,
};
pub use tick::{TickInput, enemy_spawn_interval, roll_enemy_kind, tick};
