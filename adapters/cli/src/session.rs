//! Frame orchestration: input dispatch, camera, theme switching and drawing.

use glam::Vec2;
use tracing::{debug, info};
use twotone_core::{FrameInput, GameConfig, InputOracle, Key, Rect};
use twotone_rendering::{Color, FrameControl, Game, Renderer};
use twotone_system_player::Player;
use twotone_world::{Tile, TileGrid};

use crate::{manifest::GameAssets, themes::ThemeCycle};

/// Outline thickness of debug boxes, in logical units.
const DEBUG_STROKE: f32 = 1.0;
/// Vertical spacing of the two debug text lines drawn above a box.
const DEBUG_LINE_HEIGHT: f32 = 10.0;

/// Owns the level and the player and runs them one tick at a time.
#[derive(Debug)]
pub(crate) struct Session {
    config: GameConfig,
    grid: TileGrid,
    player: Player,
    spawn: Vec2,
    themes: ThemeCycle,
    scroll: Vec2,
    debug: bool,
    inspected: Option<(usize, usize)>,
}

impl Session {
    pub(crate) fn new(assets: GameAssets, debug: bool) -> Self {
        let GameAssets {
            config,
            mut grid,
            themes,
            spawn,
            player,
            ..
        } = assets;
        themes.apply(&mut grid);

        let mut session = Self {
            config,
            grid,
            player,
            spawn,
            themes,
            scroll: Vec2::ZERO,
            debug,
            inspected: None,
        };
        session.follow_player();
        session
    }

    /// Runs one tick.
    pub(crate) fn tick<I>(&mut self, input: &I) -> FrameControl
    where
        I: InputOracle + ?Sized,
    {
        if input.was_pressed(Key::Quit) {
            return FrameControl::Exit;
        }

        if input.was_pressed(Key::Respawn) {
            self.player.respawn(self.spawn);
            info!(x = self.spawn.x, y = self.spawn.y, "player_respawned");
        }

        if input.was_pressed(Key::CycleTheme) {
            self.themes.advance();
            self.themes.apply(&mut self.grid);
            info!(theme = %self.themes.current().name, "theme_changed");
        }

        if input.was_pressed(Key::ToggleDebug) {
            self.debug = !self.debug;
            debug!(enabled = self.debug, "debug_overlay_toggled");
        }

        self.player.update(&self.grid, input, &self.config.physics);
        self.follow_player();

        if self.debug && input.was_pressed(Key::Inspect) {
            self.inspect(input.cursor_position());
        }

        FrameControl::Continue
    }

    /// Draws the visible level, the player and, when enabled, the debug overlay.
    pub(crate) fn render(&self, renderer: &mut dyn Renderer) {
        renderer.clear(self.themes.current().background);

        let visible = self.grid.visible(self.viewport());
        for tile in &visible {
            if let Some(region) = tile.drawable {
                renderer.draw_sprite(region, tile.sprite_rect.position() - self.scroll, false);
            }
        }

        let sprite = self.player.sprite_rect();
        renderer.draw_sprite(
            self.player.current_frame(),
            sprite.position() - self.scroll,
            self.player.facing_flipped(),
        );

        if self.debug {
            self.render_overlay(renderer, &visible);
        }
    }

    fn render_overlay(&self, renderer: &mut dyn Renderer, visible: &[&Tile]) {
        for tile in visible {
            renderer.stroke_rect(self.on_screen(tile.bounding_box), DEBUG_STROKE, Color::RED);
        }
        renderer.stroke_rect(
            self.on_screen(self.player.bounding_box()),
            DEBUG_STROKE,
            Color::RED,
        );

        if let Some(tile) = self.inspected_tile() {
            let bounds = self.on_screen(tile.bounding_box);
            renderer.stroke_rect(bounds, DEBUG_STROKE, Color::BLUE);
            label(renderer, bounds.position(), tile.bounding_box.position());
        }

        let sprite = self.player.sprite_rect();
        label(renderer, sprite.position() - self.scroll, sprite.position());
    }

    fn follow_player(&mut self) {
        let target = self.player.bounding_box().center() - self.config.screen.center();
        self.scroll += target - self.scroll;
    }

    fn inspect(&mut self, cursor: Vec2) {
        self.inspected = self
            .grid
            .tile_at(cursor + self.scroll)
            .filter(|tile| tile.is_present())
            .map(|tile| (tile.column, tile.row));
        if let Some((column, row)) = self.inspected {
            debug!(column, row, "tile_inspected");
        }
    }

    fn viewport(&self) -> Rect {
        Rect::new(
            self.scroll.x,
            self.scroll.y,
            self.config.screen.width,
            self.config.screen.height,
        )
    }

    fn on_screen(&self, rect: Rect) -> Rect {
        rect.translated(-self.scroll)
    }

    fn inspected_tile(&self) -> Option<&Tile> {
        let (column, row) = self.inspected?;
        self.grid.tile(column, row)
    }
}

/// Prints `value` as two lines just above `anchor`.
fn label(renderer: &mut dyn Renderer, anchor: Vec2, value: Vec2) {
    renderer.draw_text(
        &format!("{:.2}", value.x),
        anchor - Vec2::new(0.0, 2.0 * DEBUG_LINE_HEIGHT),
        Color::WHITE,
    );
    renderer.draw_text(
        &format!("{:.2}", value.y),
        anchor - Vec2::new(0.0, DEBUG_LINE_HEIGHT),
        Color::WHITE,
    );
}

impl Game for Session {
    fn update(&mut self, input: &FrameInput) -> FrameControl {
        self.tick(input)
    }

    fn draw(&self, renderer: &mut dyn Renderer) {
        self.render(renderer);
    }

    fn layout(&self, _window_width: f32, _window_height: f32) -> (f32, f32) {
        (self.config.screen.width, self.config.screen.height)
    }
}
