//! Software framebuffer renderer
//!
//! Draws the simulation state into a 640x480 `u32` pixel buffer in the
//! four-color CGA palette. Pure read-side plumbing: nothing here mutates
//! game state, and the sim never calls into this module.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{EnemyKind, GameState, PowerUpKind};

/// 3x5 bitmap glyphs, one row per byte, low 3 bits used
fn glyph(c: char) -> Option<[u8; 5]> {
    let rows = match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'R' => [0b111, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        _ => return None,
    };
    Some(rows)
}

/// Pixel width of a string drawn by `draw_text` at the given scale
fn text_width(text: &str, scale: i32) -> i32 {
    text.chars().count() as i32 * 4 * scale - scale
}

pub struct Renderer {
    buffer: Vec<u32>,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            buffer: vec![CGA_BLACK; SCREEN_W * SCREEN_H],
        }
    }

    pub fn buffer(&self) -> &[u32] {
        &self.buffer
    }

    /// Render one frame of the session into the pixel buffer
    pub fn draw(&mut self, state: &GameState) {
        self.buffer.fill(CGA_BLACK);

        self.draw_starfield(state);
        self.draw_particles(state);

        if state.game_over {
            self.draw_game_over_screen(state);
            return;
        }

        self.draw_fighter(state);
        for enemy in &state.enemies {
            self.draw_enemy(enemy);
        }
        for power_up in &state.power_ups {
            self.draw_power_up(power_up);
        }
        self.draw_hud(state);

        if state.paused {
            let text = "PAUSED";
            let x = (SCREEN_W as i32 - text_width(text, 3)) / 2;
            self.draw_text(x, SCREEN_H as i32 / 2, 3, CGA_WHITE, text);
        }
    }

    // Primitive helpers ----------------------------------------------------

    fn px(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < SCREEN_W && (y as usize) < SCREEN_H {
            self.buffer[y as usize * SCREEN_W + x as usize] = color;
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        for yy in y..y + h {
            for xx in x..x + w {
                self.px(xx, yy, color);
            }
        }
    }

    fn rect_outline(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        self.fill_rect(x, y, w, 1, color);
        self.fill_rect(x, y + h - 1, w, 1, color);
        self.fill_rect(x, y, 1, h, color);
        self.fill_rect(x + w - 1, y, 1, h, color);
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, color: u32) {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.px(cx + dx, cy + dy, color);
                }
            }
        }
    }

    fn circle_outline(&mut self, cx: i32, cy: i32, r: i32, color: u32) {
        let inner = (r - 2).max(0);
        for dy in -r..=r {
            for dx in -r..=r {
                let d2 = dx * dx + dy * dy;
                if d2 <= r * r && d2 >= inner * inner {
                    self.px(cx + dx, cy + dy, color);
                }
            }
        }
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        // Bresenham
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);
        loop {
            self.px(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn fill_triangle(&mut self, a: (i32, i32), b: (i32, i32), c: (i32, i32), color: u32) {
        let edge = |p: (i32, i32), q: (i32, i32), r: (i32, i32)| {
            (q.0 - p.0) * (r.1 - p.1) - (q.1 - p.1) * (r.0 - p.0)
        };
        let min_x = a.0.min(b.0).min(c.0);
        let max_x = a.0.max(b.0).max(c.0);
        let min_y = a.1.min(b.1).min(c.1);
        let max_y = a.1.max(b.1).max(c.1);
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x, y);
                let e0 = edge(a, b, p);
                let e1 = edge(b, c, p);
                let e2 = edge(c, a, p);
                if (e0 >= 0 && e1 >= 0 && e2 >= 0) || (e0 <= 0 && e1 <= 0 && e2 <= 0) {
                    self.px(x, y, color);
                }
            }
        }
    }

    fn draw_text(&mut self, x: i32, y: i32, scale: i32, color: u32, text: &str) {
        let mut cursor = x;
        for c in text.chars() {
            if let Some(rows) = glyph(c) {
                for (row, bits) in rows.iter().enumerate() {
                    for col in 0..3 {
                        if bits & (0b100 >> col) != 0 {
                            self.fill_rect(
                                cursor + col * scale,
                                y + row as i32 * scale,
                                scale,
                                scale,
                                color,
                            );
                        }
                    }
                }
            }
            cursor += 4 * scale;
        }
    }

    // Entity drawing -------------------------------------------------------

    fn draw_starfield(&mut self, state: &GameState) {
        for star in &state.starfield.stars {
            let (size, color) = if star.speed > 1.0 {
                (2, CGA_WHITE)
            } else {
                (1, CGA_CYAN)
            };
            self.fill_circle(star.pos.x as i32, star.pos.y as i32, size, color);
        }
    }

    fn draw_particles(&mut self, state: &GameState) {
        for p in &state.particles {
            let fade = p.life as f32 / PARTICLE_LIFE_TICKS as f32;
            let size = ((p.size * fade) as i32).max(1);
            self.fill_circle(p.pos.x as i32, p.pos.y as i32, size, p.color);
        }
    }

    fn draw_fighter(&mut self, state: &GameState) {
        let f = &state.fighter;
        let (x, y) = (f.pos.x as i32, f.pos.y as i32);
        let center = f.center();

        if f.shield_timer > 0 {
            let color = if (f.shield_timer / 5) % 2 == 0 {
                CGA_CYAN
            } else {
                CGA_WHITE
            };
            self.circle_outline(center.x as i32, center.y as i32, 15, color);
        }

        // Sprite blinks during the post-hit invincibility window; bullets
        // stay visible
        let visible = f.invincible_timer == 0 || f.invincible_timer % 4 >= 2;
        if visible {
            // Body
            self.fill_rect(x + 6, y + 4, 8, 12, CGA_WHITE);
            // Wings tint cyan while rapid fire is active
            let wing_color = if f.rapid_fire_timer > 0 {
                CGA_CYAN
            } else {
                CGA_WHITE
            };
            self.fill_rect(x, y + 8, 20, 4, wing_color);
            // Cockpit
            self.fill_rect(x + 8, y, 4, 8, CGA_MAGENTA);
        }

        for bullet in &f.bullets {
            self.draw_bullet(bullet.pos, bullet.width, bullet.height, CGA_CYAN);
        }
    }

    fn draw_enemy(&mut self, enemy: &crate::sim::Enemy) {
        let (x, y) = (enemy.pos.x as i32, enemy.pos.y as i32);
        let size = enemy.size();
        let (w, h) = (size.x as i32, size.y as i32);
        match enemy.kind {
            EnemyKind::Fast => {
                self.fill_triangle((x + w / 2, y), (x, y + h), (x + w, y + h), CGA_CYAN);
            }
            EnemyKind::Tank => {
                self.rect_outline(x, y, w, h, CGA_WHITE);
                self.fill_rect(x + 4, y + 4, w - 8, h - 8, CGA_MAGENTA);
            }
            EnemyKind::Basic => {
                self.fill_rect(x + 4, y, 8, 12, CGA_MAGENTA);
                self.fill_rect(x, y + 4, 16, 4, CGA_WHITE);
            }
        }

        for bullet in &enemy.bullets {
            self.draw_bullet(bullet.pos, bullet.width, bullet.height, CGA_MAGENTA);
        }
    }

    fn draw_bullet(&mut self, pos: Vec2, w: f32, h: f32, color: u32) {
        self.fill_rect(pos.x as i32, pos.y as i32, w as i32, h as i32, color);
    }

    fn draw_power_up(&mut self, power_up: &crate::sim::PowerUp) {
        let color = match power_up.kind {
            PowerUpKind::Health => CGA_MAGENTA,
            PowerUpKind::RapidFire => CGA_CYAN,
            PowerUpKind::Shield => CGA_WHITE,
        };
        let (x, y) = (power_up.pos.x as i32, power_up.pos.y as i32);
        let s = POWERUP_SIZE as i32;
        // Diamond outline with an inner cross
        self.draw_line(x + s / 2, y, x + s, y + s / 2, color);
        self.draw_line(x + s, y + s / 2, x + s / 2, y + s, color);
        self.draw_line(x + s / 2, y + s, x, y + s / 2, color);
        self.draw_line(x, y + s / 2, x + s / 2, y, color);
        self.draw_line(x + s / 2, y + 3, x + s / 2, y + s - 3, color);
        self.draw_line(x + 3, y + s / 2, x + s - 3, y + s / 2, color);
    }

    // HUD ------------------------------------------------------------------

    fn draw_hud(&mut self, state: &GameState) {
        self.draw_text(10, 10, 2, CGA_WHITE, &format!("SCORE {}", state.score));
        self.draw_text(10, 35, 2, CGA_CYAN, &format!("WAVE {}", state.wave));

        // Health bar, magenta when running low
        let (bar_w, bar_h) = (100, 10);
        self.rect_outline(10, 60, bar_w, bar_h, CGA_WHITE);
        let health = state.fighter.health.max(0);
        let fill = health * (bar_w - 2) / state.fighter.max_health;
        if fill > 0 {
            let color = if state.fighter.health < 30 {
                CGA_MAGENTA
            } else {
                CGA_CYAN
            };
            self.fill_rect(11, 61, fill, bar_h - 2, color);
        }

        // Wave progress
        let progress = state
            .enemies_killed_this_wave
            .min(state.enemies_per_wave);
        self.draw_text(
            10,
            80,
            2,
            CGA_WHITE,
            &format!("{}/{}", progress, state.enemies_per_wave),
        );

        if state.fighter.rapid_fire_timer > 0 {
            self.draw_text(SCREEN_W as i32 - 130, 10, 2, CGA_CYAN, "RAPID FIRE");
        }
        if state.fighter.shield_timer > 0 {
            self.draw_text(SCREEN_W as i32 - 90, 35, 2, CGA_WHITE, "SHIELD");
        }
    }

    fn draw_game_over_screen(&mut self, state: &GameState) {
        let cx = SCREEN_W as i32 / 2;
        let cy = SCREEN_H as i32 / 2;
        let center = |text: &str, scale: i32| cx - text_width(text, scale) / 2;

        let title = "GAME OVER";
        self.draw_text(center(title, 4), cy - 80, 4, CGA_MAGENTA, title);

        let score = format!("SCORE {}", state.score);
        self.draw_text(center(&score, 3), cy - 30, 3, CGA_WHITE, &score);

        let wave = format!("WAVE {}", state.wave);
        self.draw_text(center(&wave, 2), cy, 2, CGA_CYAN, &wave);

        let high = format!("HI {}", state.high_score);
        self.draw_text(center(&high, 2), cy + 25, 2, CGA_CYAN, &high);

        let prompt = "PRESS R TO RESTART OR Q TO QUIT";
        self.draw_text(center(prompt, 2), cy + 60, 2, CGA_WHITE, prompt);
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
