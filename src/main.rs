//! CGA Fighter entry point
//!
//! Thin platform layer: window creation, per-frame keyboard snapshots, and
//! presenting the software framebuffer at a fixed 60 FPS cadence. All game
//! rules live in the `sim` module.

use std::time::{SystemTime, UNIX_EPOCH};

use minifb::{Key, KeyRepeat, Window, WindowOptions};

use cga_fighter::consts::*;
use cga_fighter::renderer::Renderer;
use cga_fighter::sim::{GameState, TickInput, tick};

fn main() {
    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("CGA Fighter starting, seed {seed}");

    let mut window = Window::new(
        "CGA Fighter",
        SCREEN_W,
        SCREEN_H,
        WindowOptions::default(),
    )
    .expect("could not create window");
    window.set_target_fps(TARGET_FPS);

    let mut state = GameState::new(seed);
    let mut renderer = Renderer::new();
    let mut last_wave = state.wave;

    while window.is_open() {
        if window.is_key_pressed(Key::Q, KeyRepeat::No) {
            break;
        }

        let input = TickInput {
            left: window.is_key_down(Key::Left) || window.is_key_down(Key::A),
            right: window.is_key_down(Key::Right) || window.is_key_down(Key::D),
            up: window.is_key_down(Key::Up) || window.is_key_down(Key::W),
            down: window.is_key_down(Key::Down) || window.is_key_down(Key::S),
            fire: window.is_key_down(Key::Space),
            pause: window.is_key_pressed(Key::P, KeyRepeat::No)
                || window.is_key_pressed(Key::Escape, KeyRepeat::No),
            restart: window.is_key_pressed(Key::R, KeyRepeat::No),
        };

        tick(&mut state, &input);

        if state.wave != last_wave {
            log::info!("entering wave {}", state.wave);
            last_wave = state.wave;
        }
        renderer.draw(&state);
        if let Err(e) = window.update_with_buffer(renderer.buffer(), SCREEN_W, SCREEN_H) {
            log::warn!("failed to present frame: {e}");
        }
    }

    log::info!(
        "exiting after wave {}, high score {}",
        state.wave,
        state.high_score
    );
}
