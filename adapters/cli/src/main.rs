#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Two-Tone platformer.

mod manifest;
mod session;
mod themes;

use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use twotone_rendering::{Presentation, RenderingBackend};
use twotone_rendering_macroquad::MacroquadBackend;

use self::{manifest::GameAssets, session::Session};

/// Two-colour tile platformer.
#[derive(Debug, Parser)]
#[command(name = "twotone", version, about)]
struct Cli {
    /// Game manifest listing spritesheets, level layers, themes and the player.
    #[arg(long, default_value = "assets/game.toml")]
    manifest: PathBuf,
    /// Start with the collision debug overlay enabled.
    #[arg(long)]
    debug: bool,
    /// Render as fast as possible instead of waiting for vertical sync.
    #[arg(long)]
    no_vsync: bool,
    /// Initial window size as a multiple of the logical resolution.
    #[arg(long, default_value_t = 3)]
    window_scale: u32,
}

/// Entry point for the Two-Tone command-line interface.
fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{err:#}"), "startup_failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    info!(manifest = %cli.manifest.display(), "loading_game");
    let assets = GameAssets::load(&cli.manifest)?;

    let screen = assets.config.screen;
    let presentation = Presentation::new(assets.title.clone(), Vec2::new(screen.width, screen.height))
        .context("invalid screen configuration")?
        .with_window_scale(cli.window_scale);
    let backend = MacroquadBackend::new()
        .with_vsync(!cli.no_vsync)
        .with_sheets(assets.sheets.clone());

    let session = Session::new(assets, cli.debug);
    backend.run(presentation, session)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
