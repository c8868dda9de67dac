//! Game state and core simulation types
//!
//! All state that drives a run lives here; a seed fully determines a run.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Aabb;
use crate::consts::*;

/// Who fired a bullet (decides size, direction of travel and cull edge)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

/// A projectile, owned by the bullet collection of the entity that fired it
#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub width: f32,
    pub height: f32,
    pub owner: BulletOwner,
}

impl Bullet {
    pub fn new(pos: Vec2, vel: Vec2, owner: BulletOwner) -> Self {
        let (width, height) = match owner {
            BulletOwner::Player => (PLAYER_BULLET_W, PLAYER_BULLET_H),
            BulletOwner::Enemy => (ENEMY_BULLET_W, ENEMY_BULLET_H),
        };
        Self {
            pos,
            vel,
            width,
            height,
            owner,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(self.width, self.height))
    }
}

/// An explosion fragment. Purely visual, never affects gameplay.
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining ticks to live
    pub life: u32,
    pub color: u32,
    pub size: f32,
}

impl Particle {
    pub fn new(pos: Vec2, color: u32, rng: &mut impl Rng) -> Self {
        Self {
            pos,
            vel: Vec2::new(rng.random_range(-3.0..3.0), rng.random_range(-3.0..3.0)),
            life: PARTICLE_LIFE_TICKS,
            color,
            size: rng.random_range(2..=4) as f32,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y += PARTICLE_GRAVITY;
        self.life = self.life.saturating_sub(1);
    }

    pub fn alive(&self) -> bool {
        self.life > 0
    }
}

/// Push one 15-particle burst at `center`
pub fn spawn_explosion(
    particles: &mut Vec<Particle>,
    rng: &mut impl Rng,
    center: Vec2,
    color: u32,
) {
    for _ in 0..EXPLOSION_PARTICLES {
        particles.push(Particle::new(center, color, rng));
    }
}

/// Power-up kinds (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    Health,
    RapidFire,
    Shield,
}

/// A falling collectible
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub pos: Vec2,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self { pos, kind }
    }

    pub fn update(&mut self) {
        self.pos.y += POWERUP_FALL_SPEED;
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(POWERUP_SIZE))
    }
}

/// Enemy kinds (closed set); each kind fixes every stat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Basic,
    Fast,
    Tank,
}

/// Per-kind constant stats
#[derive(Debug, Clone, Copy)]
pub struct EnemyStats {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub health: i32,
    pub shoot_delay: u32,
}

impl EnemyKind {
    pub const fn stats(self) -> EnemyStats {
        match self {
            EnemyKind::Basic => EnemyStats {
                width: 16.0,
                height: 12.0,
                speed: 2.0,
                health: 1,
                shoot_delay: 60,
            },
            EnemyKind::Fast => EnemyStats {
                width: 12.0,
                height: 10.0,
                speed: 3.5,
                health: 1,
                shoot_delay: 80,
            },
            EnemyKind::Tank => EnemyStats {
                width: 20.0,
                height: 16.0,
                speed: 1.0,
                health: 3,
                shoot_delay: 40,
            },
        }
    }

    /// Score awarded when an enemy of this kind is destroyed by a bullet
    pub const fn score(self) -> u32 {
        match self {
            EnemyKind::Basic => 10,
            EnemyKind::Fast => 15,
            EnemyKind::Tank => 25,
        }
    }
}

/// A descending enemy craft with its own bullets and timers
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub kind: EnemyKind,
    pub health: i32,
    pub bullets: Vec<Bullet>,
    /// Horizontal drift direction, -1 or +1
    pub direction: f32,
    pub move_timer: u32,
    pub shoot_timer: u32,
}

impl Enemy {
    pub fn new(pos: Vec2, kind: EnemyKind, rng: &mut impl Rng) -> Self {
        Self {
            pos,
            kind,
            health: kind.stats().health,
            bullets: Vec::new(),
            direction: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
            move_timer: 0,
            shoot_timer: 0,
        }
    }

    pub fn size(&self) -> Vec2 {
        let stats = self.kind.stats();
        Vec2::new(stats.width, stats.height)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size() / 2.0
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size())
    }

    /// Advance one tick: fall, drift, maybe fire, move own bullets
    pub fn update(&mut self, rng: &mut impl Rng) {
        let stats = self.kind.stats();
        self.pos.y += stats.speed;

        self.move_timer += 1;
        if self.move_timer >= ENEMY_DRIFT_INTERVAL {
            self.pos.x += self.direction;
            if self.pos.x <= 0.0 || self.pos.x >= PLAYFIELD_W - stats.width {
                self.direction = -self.direction;
            }
            self.move_timer = 0;
        }

        self.shoot_timer += 1;
        if self.shoot_timer > stats.shoot_delay {
            if rng.random_bool(ENEMY_SHOOT_CHANCE) {
                self.shoot();
            }
            self.shoot_timer = 0;
        }

        self.bullets.retain_mut(|b| {
            b.update();
            b.pos.y <= PLAYFIELD_H + BULLET_MARGIN
        });
    }

    /// Tanks fire a 3-way spread, everything else a single straight shot
    pub fn shoot(&mut self) {
        let size = self.size();
        let muzzle = Vec2::new(self.pos.x + size.x / 2.0, self.pos.y + size.y);
        match self.kind {
            EnemyKind::Tank => {
                for angle in [-0.3f32, 0.0, 0.3] {
                    let vel = Vec2::new(angle.sin() * TANK_SPREAD_SPEED, TANK_SPREAD_SPEED);
                    self.bullets.push(Bullet::new(muzzle, vel, BulletOwner::Enemy));
                }
            }
            _ => {
                let vel = Vec2::new(0.0, ENEMY_BULLET_SPEED);
                self.bullets.push(Bullet::new(muzzle, vel, BulletOwner::Enemy));
            }
        }
    }

    /// Returns true when the hit destroyed the enemy
    pub fn take_damage(&mut self) -> bool {
        self.health -= 1;
        self.health <= 0
    }
}

/// The player craft
#[derive(Debug, Clone)]
pub struct Fighter {
    pub pos: Vec2,
    pub health: i32,
    pub max_health: i32,
    pub bullets: Vec<Bullet>,
    pub shoot_cooldown: u32,
    pub rapid_fire_timer: u32,
    pub shield_timer: u32,
    pub invincible_timer: u32,
}

impl Fighter {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(
                PLAYFIELD_W / 2.0,
                PLAYFIELD_H - FIGHTER_START_MARGIN,
            ),
            health: FIGHTER_MAX_HEALTH,
            max_health: FIGHTER_MAX_HEALTH,
            bullets: Vec::new(),
            shoot_cooldown: 0,
            rapid_fire_timer: 0,
            shield_timer: 0,
            invincible_timer: 0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(FIGHTER_W, FIGHTER_H) / 2.0
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(FIGHTER_W, FIGHTER_H))
    }

    /// Apply a unit direction scaled by the fixed speed, clamped so the
    /// bounding box stays fully on-screen
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.pos.x = (self.pos.x + dx * FIGHTER_SPEED).clamp(0.0, PLAYFIELD_W - FIGHTER_W);
        self.pos.y = (self.pos.y + dy * FIGHTER_SPEED).clamp(0.0, PLAYFIELD_H - FIGHTER_H);
    }

    /// Fire upward from center-top; rapid fire adds two angled side shots
    /// and halves the cooldown
    pub fn shoot(&mut self) {
        if self.shoot_cooldown > 0 {
            return;
        }
        let muzzle = Vec2::new(self.pos.x + FIGHTER_W / 2.0 - 1.0, self.pos.y);
        self.bullets.push(Bullet::new(
            muzzle,
            Vec2::new(0.0, -PLAYER_BULLET_SPEED),
            BulletOwner::Player,
        ));

        if self.rapid_fire_timer > 0 {
            self.bullets.push(Bullet::new(
                Vec2::new(self.pos.x + 2.0, self.pos.y + 4.0),
                Vec2::new(-SIDE_SHOT_VX, -PLAYER_BULLET_SPEED),
                BulletOwner::Player,
            ));
            self.bullets.push(Bullet::new(
                Vec2::new(self.pos.x + FIGHTER_W - 4.0, self.pos.y + 4.0),
                Vec2::new(SIDE_SHOT_VX, -PLAYER_BULLET_SPEED),
                BulletOwner::Player,
            ));
            self.shoot_cooldown = RAPID_SHOOT_COOLDOWN_TICKS;
        } else {
            self.shoot_cooldown = SHOOT_COOLDOWN_TICKS;
        }
    }

    /// Timers reset to full duration on reapplication, they never stack
    pub fn activate_power_up(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Health => {
                self.health = (self.health + HEAL_AMOUNT).min(self.max_health);
            }
            PowerUpKind::RapidFire => self.rapid_fire_timer = RAPID_FIRE_TICKS,
            PowerUpKind::Shield => self.shield_timer = SHIELD_TICKS,
        }
    }

    /// Sole damage entry point. Returns false (no effect) while a shield or
    /// the post-hit invincibility window is active; callers use the return
    /// to decide whether to trigger explosion feedback.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if self.shield_timer > 0 || self.invincible_timer > 0 {
            return false;
        }
        self.health -= amount;
        self.invincible_timer = INVINCIBLE_TICKS;
        true
    }

    /// Decrement timers and advance own bullets
    pub fn update(&mut self) {
        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
        self.rapid_fire_timer = self.rapid_fire_timer.saturating_sub(1);
        self.shield_timer = self.shield_timer.saturating_sub(1);
        self.invincible_timer = self.invincible_timer.saturating_sub(1);

        self.bullets.retain_mut(|b| {
            b.update();
            b.pos.y >= -BULLET_MARGIN
        });
    }
}

impl Default for Fighter {
    fn default() -> Self {
        Self::new()
    }
}

/// One background star
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub speed: f32,
}

/// Scrolling star background, independent of gameplay
#[derive(Debug, Clone)]
pub struct StarField {
    pub stars: Vec<Star>,
}

impl StarField {
    pub fn new(rng: &mut impl Rng) -> Self {
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random_range(0.0..PLAYFIELD_W),
                    rng.random_range(0.0..PLAYFIELD_H),
                ),
                speed: [1.0, 2.0, 3.0][rng.random_range(0..3)],
            })
            .collect();
        Self { stars }
    }

    pub fn update(&mut self, rng: &mut impl Rng) {
        for star in &mut self.stars {
            star.pos.y += star.speed;
            if star.pos.y > PLAYFIELD_H {
                star.pos.y = 0.0;
                star.pos.x = rng.random_range(0.0..PLAYFIELD_W);
            }
        }
    }
}

/// Complete game state. The session owns every entity collection; nothing
/// outside `tick()` and the collision pass mutates it.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,

    pub fighter: Fighter,
    pub enemies: Vec<Enemy>,
    pub power_ups: Vec<PowerUp>,
    /// Decoupled from the entities that spawned them, which may be gone
    pub particles: Vec<Particle>,
    pub starfield: StarField,

    pub enemy_spawn_timer: u32,
    pub powerup_spawn_timer: u32,

    pub score: u32,
    /// Highest score seen this process; survives restarts
    pub high_score: u32,
    pub wave: u32,
    pub enemies_killed_this_wave: u32,
    pub enemies_per_wave: u32,

    pub game_over: bool,
    pub paused: bool,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let starfield = StarField::new(&mut rng);
        Self {
            seed,
            rng,
            fighter: Fighter::new(),
            enemies: Vec::new(),
            power_ups: Vec::new(),
            particles: Vec::new(),
            starfield,
            enemy_spawn_timer: 0,
            powerup_spawn_timer: 0,
            score: 0,
            high_score: 0,
            wave: 1,
            enemies_killed_this_wave: 0,
            enemies_per_wave: BASE_ENEMIES_PER_WAVE,
            game_over: false,
            paused: false,
        }
    }

    /// Reset every piece of mutable state except the high score and the
    /// RNG stream. The fighter is recreated wholesale.
    pub fn restart(&mut self) {
        self.fighter = Fighter::new();
        self.enemies.clear();
        self.power_ups.clear();
        self.particles.clear();
        self.enemy_spawn_timer = 0;
        self.powerup_spawn_timer = 0;
        self.score = 0;
        self.wave = 1;
        self.enemies_killed_this_wave = 0;
        self.enemies_per_wave = BASE_ENEMIES_PER_WAVE;
        self.game_over = false;
        self.paused = false;
    }
}
