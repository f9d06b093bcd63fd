#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Two-Tone.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! The backend owns the window and the frame pump. Each rendered frame it
//! samples the keyboard and mouse into a [`FrameInput`], runs the fixed ticks
//! the [`twotone_rendering::TickClock`] hands out, and lets the game draw
//! itself into the letterboxed logical screen.

mod renderer;
mod sprites;

use std::{collections::HashSet, path::PathBuf, sync::mpsc, time::Duration};

use anyhow::{Context, Result};
use glam::Vec2;
use macroquad::{
    color::BLACK,
    input::{
        is_key_down, is_key_pressed, is_mouse_button_pressed, mouse_position, KeyCode,
        MouseButton,
    },
};
use tracing::info;
use twotone_core::{FrameInput, Key, KeySet, SheetId};
use twotone_rendering::{FrameControl, Game, Letterbox, Presentation, RenderingBackend};

use self::{renderer::MacroquadRenderer, sprites::SpriteAtlas};

/// Physical keys feeding each logical key.
const KEY_BINDINGS: [(KeyCode, Key); 10] = [
    (KeyCode::A, Key::Left),
    (KeyCode::Left, Key::Left),
    (KeyCode::D, Key::Right),
    (KeyCode::Right, Key::Right),
    (KeyCode::W, Key::Jump),
    (KeyCode::Space, Key::Jump),
    (KeyCode::R, Key::Respawn),
    (KeyCode::C, Key::CycleTheme),
    (KeyCode::I, Key::ToggleDebug),
    (KeyCode::Escape, Key::Quit),
];

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    sheets: Vec<(SheetId, PathBuf)>,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Registers the spritesheets loaded once the window exists.
    #[must_use]
    pub fn with_sheets(mut self, sheets: Vec<(SheetId, PathBuf)>) -> Self {
        self.sheets = sheets;
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<G>(self, presentation: Presentation, mut game: G) -> Result<()>
    where
        G: Game + 'static,
    {
        let Self {
            swap_interval,
            sheets,
        } = self;

        let window_size = presentation.window_size();
        let mut config = macroquad::window::Conf {
            window_title: presentation.window_title.clone(),
            window_width: window_size.x as i32,
            window_height: window_size.y as i32,
            window_resizable: true,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        let (atlas_init_sender, atlas_init_receiver) = mpsc::channel::<Result<()>>();

        macroquad::Window::from_config(config, async move {
            // Textures can only be created once the GL context exists.
            let atlas = match SpriteAtlas::load(&sheets).context("failed to initialise sprite atlas")
            {
                Ok(atlas) => atlas,
                Err(error) => {
                    let _ = atlas_init_sender.send(Err(error));
                    return;
                }
            };
            let _ = atlas_init_sender.send(Ok(()));
            info!(sheets = atlas.texture_count(), "spritesheets_loaded");

            let mut clock = presentation.tick_clock();
            let mut pending_edges = KeySet::EMPTY;
            let mut missing_sheets = HashSet::new();

            loop {
                let window = Vec2::new(
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                let (logical_width, logical_height) = game.layout(window.x, window.y);
                let logical_size = Vec2::new(logical_width, logical_height);
                let letterbox = Letterbox::fit(window, logical_size);

                let mut frame_input = gather_frame_input(&letterbox);
                pending_edges = pending_edges.union(frame_input.pressed);
                frame_input.pressed = pending_edges;

                let dt_seconds = macroquad::time::get_frame_time();
                let ticks = clock.advance(Duration::from_secs_f32(dt_seconds.max(0.0)));
                if ticks > 0 {
                    pending_edges = KeySet::EMPTY;
                }

                if run_ticks(&mut game, frame_input, ticks) == FrameControl::Exit {
                    info!("frame_pump_stopped");
                    break;
                }

                macroquad::window::clear_background(BLACK);
                let mut renderer =
                    MacroquadRenderer::new(&atlas, letterbox, logical_size, &mut missing_sheets);
                game.draw(&mut renderer);

                macroquad::window::next_frame().await;
            }
        });

        atlas_init_receiver.recv().unwrap_or_else(|_| Ok(()))?;

        Ok(())
    }
}

/// Runs one frame's worth of ticks; press edges only reach the first tick.
fn run_ticks<G>(game: &mut G, frame_input: FrameInput, ticks: u32) -> FrameControl
where
    G: Game + ?Sized,
{
    for tick in 0..ticks {
        let input = if tick == 0 {
            frame_input
        } else {
            frame_input.without_edges()
        };
        if game.update(&input) == FrameControl::Exit {
            return FrameControl::Exit;
        }
    }
    FrameControl::Continue
}

fn gather_frame_input(letterbox: &Letterbox) -> FrameInput {
    let held = KEY_BINDINGS
        .iter()
        .filter(|(code, _)| is_key_down(*code))
        .map(|(_, key)| *key);
    let pressed = KEY_BINDINGS
        .iter()
        .filter(|(code, _)| is_key_pressed(*code))
        .map(|(_, key)| *key);
    let (cursor_x, cursor_y) = mouse_position();

    gather_frame_input_from_observations(
        held,
        pressed,
        is_mouse_button_pressed(MouseButton::Left),
        Vec2::new(cursor_x, cursor_y),
        letterbox,
    )
}

fn gather_frame_input_from_observations(
    held: impl IntoIterator<Item = Key>,
    pressed: impl IntoIterator<Item = Key>,
    inspect_click: bool,
    cursor_window: Vec2,
    letterbox: &Letterbox,
) -> FrameInput {
    let mut input = FrameInput {
        held: held.into_iter().collect(),
        pressed: pressed.into_iter().collect(),
        cursor: letterbox.to_logical(cursor_window),
    };
    if inspect_click {
        input.held.insert(Key::Inspect);
        input.pressed.insert(Key::Inspect);
    }
    input
}

fn to_macroquad_color(color: twotone_rendering::Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
