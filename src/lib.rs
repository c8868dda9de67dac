//! CGA Fighter - a fixed-tick arcade wave shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, waves, collisions, game state)
//! - `renderer`: Software framebuffer renderer (CGA palette)

pub mod renderer;
pub mod sim;

pub use sim::{GameState, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Logical playfield size in pixels (also the window size)
    pub const SCREEN_W: usize = 640;
    pub const SCREEN_H: usize = 480;
    pub const PLAYFIELD_W: f32 = SCREEN_W as f32;
    pub const PLAYFIELD_H: f32 = SCREEN_H as f32;

    /// Fixed simulation rate (one tick per frame)
    pub const TARGET_FPS: usize = 60;

    /// Fighter dimensions and movement
    pub const FIGHTER_W: f32 = 20.0;
    pub const FIGHTER_H: f32 = 16.0;
    pub const FIGHTER_SPEED: f32 = 5.0;
    pub const FIGHTER_MAX_HEALTH: i32 = 100;
    /// Vertical offset of the fighter start position from the bottom edge
    pub const FIGHTER_START_MARGIN: f32 = 50.0;

    /// Ticks between shots (halved while rapid fire is active)
    pub const SHOOT_COOLDOWN_TICKS: u32 = 10;
    pub const RAPID_SHOOT_COOLDOWN_TICKS: u32 = 5;

    /// Power-up effect durations and heal amount
    pub const RAPID_FIRE_TICKS: u32 = 300;
    pub const SHIELD_TICKS: u32 = 180;
    /// Post-hit invincibility window
    pub const INVINCIBLE_TICKS: u32 = 30;
    pub const HEAL_AMOUNT: i32 = 30;

    /// Bullet dimensions and speeds
    pub const PLAYER_BULLET_W: f32 = 2.0;
    pub const PLAYER_BULLET_H: f32 = 4.0;
    pub const PLAYER_BULLET_SPEED: f32 = 8.0;
    /// Horizontal velocity of the angled rapid-fire side shots
    pub const SIDE_SHOT_VX: f32 = 2.0;
    pub const ENEMY_BULLET_W: f32 = 2.0;
    pub const ENEMY_BULLET_H: f32 = 6.0;
    pub const ENEMY_BULLET_SPEED: f32 = 6.0;
    /// Component speed of the tank's 3-way spread
    pub const TANK_SPREAD_SPEED: f32 = 5.0;
    /// Bullets are culled this far past the top/bottom edge
    pub const BULLET_MARGIN: f32 = 10.0;

    /// Damage values
    pub const ENEMY_BULLET_DAMAGE: i32 = 15;
    pub const ENEMY_CONTACT_DAMAGE: i32 = 25;

    /// Enemy behavior
    pub const ENEMY_SPAWN_Y: f32 = -20.0;
    /// Ticks between horizontal drift nudges
    pub const ENEMY_DRIFT_INTERVAL: u32 = 30;
    /// Chance to actually fire once the shoot timer expires
    pub const ENEMY_SHOOT_CHANCE: f64 = 0.3;

    /// Wave progression
    pub const BASE_ENEMIES_PER_WAVE: u32 = 10;
    pub const WAVE_QUOTA_STEP: u32 = 5;
    pub const WAVE_CLEAR_BONUS: u32 = 50;

    /// Power-up spawning
    pub const POWERUP_SIZE: f32 = 12.0;
    pub const POWERUP_FALL_SPEED: f32 = 2.0;
    pub const POWERUP_SPAWN_INTERVAL: u32 = 600;
    pub const POWERUP_SPAWN_CHANCE: f64 = 0.5;
    pub const POWERUP_SCORE: u32 = 5;

    /// Explosion particles
    pub const EXPLOSION_PARTICLES: usize = 15;
    pub const PARTICLE_LIFE_TICKS: u32 = 30;
    pub const PARTICLE_GRAVITY: f32 = 0.1;

    /// Decorative background
    pub const STAR_COUNT: usize = 50;

    /// CGA palette (0x00RRGGBB)
    pub const CGA_BLACK: u32 = 0x0000_0000;
    pub const CGA_WHITE: u32 = 0x00FF_FFFF;
    pub const CGA_MAGENTA: u32 = 0x00FF_55FF;
    pub const CGA_CYAN: u32 = 0x0055_FFFF;
}
