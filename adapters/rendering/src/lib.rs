#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Two-Tone adapters.
//!
//! A [`Game`] is pumped by a [`RenderingBackend`]: the backend gathers a
//! [`FrameInput`] snapshot, runs as many fixed ticks as the [`TickClock`]
//! allows, and then asks the game to draw itself through a [`Renderer`] in
//! logical screen units. Backends letterbox the logical screen into the
//! window using [`Letterbox`].

use std::{error::Error, fmt, time::Duration};

use anyhow::Result as AnyResult;
use glam::Vec2;
use tracing::warn;
use twotone_core::{FrameInput, Rect, SpriteRegion};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque red used for collision outlines.
    pub const RED: Self = Self::from_rgb_u8(255, 0, 0);
    /// Opaque blue used for the inspected tile.
    pub const BLUE: Self = Self::from_rgb_u8(0, 0, 255);
    /// Opaque white used for overlay text.
    pub const WHITE: Self = Self::from_rgb_u8(255, 255, 255);

    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Drawing surface handed to [`Game::draw`].
///
/// Every coordinate is expressed in logical screen units with the origin at
/// the top-left corner; backends scale them into the window.
pub trait Renderer {
    /// Fills the whole logical screen with a solid color.
    fn clear(&mut self, color: Color);

    /// Draws a spritesheet region with its top-left corner at `position`.
    ///
    /// When `flip_horizontal` is set the region is mirrored around its
    /// vertical centre line while keeping the same footprint.
    fn draw_sprite(&mut self, region: SpriteRegion, position: Vec2, flip_horizontal: bool);

    /// Outlines a rectangle.
    fn stroke_rect(&mut self, rect: Rect, thickness: f32, color: Color);

    /// Prints a line of text with its top-left corner at `position`.
    fn draw_text(&mut self, text: &str, position: Vec2, color: Color);
}

/// Decision returned by [`Game::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// Keep pumping frames.
    Continue,
    /// Stop the frame pump after the current frame.
    Exit,
}

/// Simulation driven by a rendering backend.
pub trait Game {
    /// Runs one fixed simulation tick.
    fn update(&mut self, input: &FrameInput) -> FrameControl;

    /// Draws the current state.
    fn draw(&self, renderer: &mut dyn Renderer);

    /// Logical resolution for a window of the provided size.
    ///
    /// Games render at a fixed resolution and ignore the window size.
    fn layout(&self, window_width: f32, window_height: f32) -> (f32, f32);
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Logical resolution the game draws at.
    pub logical_size: Vec2,
    /// Integer factor between the logical resolution and the initial window.
    pub window_scale: u32,
    /// Simulation ticks per second.
    pub tick_rate: u32,
    /// Upper bound of ticks run for a single rendered frame.
    pub max_ticks_per_frame: u32,
}

impl Presentation {
    /// Default simulation rate.
    pub const DEFAULT_TICK_RATE: u32 = 60;
    /// Default catch-up limit.
    pub const DEFAULT_MAX_TICKS_PER_FRAME: u32 = 5;

    /// Constructs a new presentation descriptor.
    ///
    /// Fails when the logical resolution is not strictly positive.
    pub fn new<T>(window_title: T, logical_size: Vec2) -> Result<Self, RenderingError>
    where
        T: Into<String>,
    {
        if !(logical_size.x > 0.0 && logical_size.y > 0.0) {
            return Err(RenderingError::InvalidLogicalSize {
                width: logical_size.x,
                height: logical_size.y,
            });
        }

        Ok(Self {
            window_title: window_title.into(),
            logical_size,
            window_scale: 1,
            tick_rate: Self::DEFAULT_TICK_RATE,
            max_ticks_per_frame: Self::DEFAULT_MAX_TICKS_PER_FRAME,
        })
    }

    /// Returns the presentation with a different window scale factor.
    #[must_use]
    pub fn with_window_scale(mut self, window_scale: u32) -> Self {
        self.window_scale = window_scale.max(1);
        self
    }

    /// Initial window size in physical pixels.
    #[must_use]
    pub fn window_size(&self) -> Vec2 {
        self.logical_size * self.window_scale as f32
    }

    /// Clock pacing the simulation of this presentation.
    #[must_use]
    pub fn tick_clock(&self) -> TickClock {
        TickClock::new(self.tick_rate, self.max_ticks_per_frame)
    }
}

/// Rendering backend capable of pumping a [`Game`].
pub trait RenderingBackend {
    /// Runs the game until it asks to exit or the window is closed.
    fn run<G>(self, presentation: Presentation, game: G) -> AnyResult<()>
    where
        G: Game + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// The logical resolution must be strictly positive.
    InvalidLogicalSize {
        /// Requested logical width.
        width: f32,
        /// Requested logical height.
        height: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLogicalSize { width, height } => {
                write!(
                    f,
                    "logical size must be positive (received {width}x{height})"
                )
            }
        }
    }
}

impl Error for RenderingError {}

/// Uniform scale and offset fitting the logical screen into a window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Letterbox {
    /// Window pixels per logical unit.
    pub scale: f32,
    /// Window position of the logical origin.
    pub offset: Vec2,
}

impl Letterbox {
    /// Largest uniform scale that fits `logical` inside `window`, centred.
    #[must_use]
    pub fn fit(window: Vec2, logical: Vec2) -> Self {
        if logical.x <= 0.0 || logical.y <= 0.0 || window.x <= 0.0 || window.y <= 0.0 {
            return Self {
                scale: 1.0,
                offset: Vec2::ZERO,
            };
        }

        let scale = (window.x / logical.x).min(window.y / logical.y);
        let offset = (window - logical * scale) * 0.5;
        Self { scale, offset }
    }

    /// Converts a logical position into window pixels.
    #[must_use]
    pub fn to_window(&self, logical: Vec2) -> Vec2 {
        self.offset + logical * self.scale
    }

    /// Converts a window pixel position into logical units.
    #[must_use]
    pub fn to_logical(&self, window: Vec2) -> Vec2 {
        (window - self.offset) / self.scale
    }
}

/// Fixed timestep accumulator.
///
/// Frame time is accumulated and drained in whole ticks. At most
/// `max_ticks_per_frame` ticks run per frame; any backlog beyond that is
/// dropped instead of being carried into later frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickClock {
    fixed_dt: Duration,
    max_ticks_per_frame: u32,
    accumulator: Duration,
}

impl TickClock {
    /// Creates a clock ticking `tick_rate` times per second.
    #[must_use]
    pub fn new(tick_rate: u32, max_ticks_per_frame: u32) -> Self {
        Self {
            fixed_dt: Duration::from_secs_f64(1.0 / f64::from(tick_rate.max(1))),
            max_ticks_per_frame: max_ticks_per_frame.max(1),
            accumulator: Duration::ZERO,
        }
    }

    /// Adds a rendered frame's duration and returns how many ticks to run.
    pub fn advance(&mut self, frame_dt: Duration) -> u32 {
        self.accumulator = self.accumulator.saturating_add(frame_dt);

        let mut ticks = 0u32;
        while self.accumulator >= self.fixed_dt && ticks < self.max_ticks_per_frame {
            self.accumulator = self.accumulator.saturating_sub(self.fixed_dt);
            ticks += 1;
        }

        if self.accumulator >= self.fixed_dt {
            warn!(
                dropped_backlog_ms = self.accumulator.as_millis() as u64,
                max_ticks_per_frame = self.max_ticks_per_frame,
                "sim_clamp_triggered"
            );
            self.accumulator = Duration::ZERO;
        }
        ticks
    }
}
