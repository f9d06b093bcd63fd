#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tick-driven frame animation for the player sprite.
//!
//! An [`Animation`] cycles through a fixed list of sheet regions, holding each
//! one for a constant number of ticks. The [`AnimationSet`] keeps one track per
//! [`AnimationKey`] and remembers which one is active.

use thiserror::Error;
use twotone_core::SpriteRegion;

/// Errors raised while assembling animation tracks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnimationError {
    /// A track was built without frames.
    #[error("animation track has no frames")]
    NoFrames,
    /// A track was built with a zero frame duration.
    #[error("animation frame duration must be at least one tick")]
    ZeroDuration,
}

/// Looping sequence of sprite frames.
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    frames: Vec<SpriteRegion>,
    frame_duration_ticks: u32,
    current_frame_index: usize,
    elapsed_ticks: u32,
}

impl Animation {
    /// Creates a track positioned on its first frame.
    pub fn new(
        frames: Vec<SpriteRegion>,
        frame_duration_ticks: u32,
    ) -> Result<Self, AnimationError> {
        if frames.is_empty() {
            return Err(AnimationError::NoFrames);
        }
        if frame_duration_ticks == 0 {
            return Err(AnimationError::ZeroDuration);
        }

        Ok(Self {
            frames,
            frame_duration_ticks,
            current_frame_index: 0,
            elapsed_ticks: 0,
        })
    }

    /// Counts one tick and moves to the next frame once the current one expired.
    pub fn advance(&mut self) {
        self.elapsed_ticks += 1;
        if self.elapsed_ticks >= self.frame_duration_ticks {
            self.current_frame_index = (self.current_frame_index + 1) % self.frames.len();
            self.elapsed_ticks = 0;
        }
    }

    /// Rewinds the track to its first frame.
    pub fn reset(&mut self) {
        self.current_frame_index = 0;
        self.elapsed_ticks = 0;
    }

    /// Frame that should be drawn this tick.
    #[must_use]
    pub fn current_frame(&self) -> SpriteRegion {
        self.frames[self.current_frame_index]
    }

    /// Index of the frame that should be drawn this tick.
    #[must_use]
    pub const fn current_frame_index(&self) -> usize {
        self.current_frame_index
    }

    /// Ticks spent on the current frame so far.
    #[must_use]
    pub const fn elapsed_ticks(&self) -> u32 {
        self.elapsed_ticks
    }

    /// Number of frames in the track.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

/// Named tracks a player can switch between.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationKey {
    /// Standing still on the ground.
    Idle,
    /// Walking on the ground.
    Run,
    /// Rising or falling.
    Jump,
    /// Killed by a hazard.
    Death,
}

impl AnimationKey {
    const fn index(self) -> usize {
        match self {
            Self::Idle => 0,
            Self::Run => 1,
            Self::Jump => 2,
            Self::Death => 3,
        }
    }
}

/// One track per [`AnimationKey`] plus the currently active key.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationSet {
    tracks: [Animation; 4],
    current: AnimationKey,
}

impl AnimationSet {
    /// Creates a set that starts on the idle track.
    #[must_use]
    pub fn new(idle: Animation, run: Animation, jump: Animation, death: Animation) -> Self {
        Self {
            tracks: [idle, run, jump, death],
            current: AnimationKey::Idle,
        }
    }

    /// Activates the requested track.
    ///
    /// Switching to a different track restarts it from its first frame;
    /// requesting the active track leaves it untouched.
    pub fn switch_to(&mut self, key: AnimationKey) {
        if self.current == key {
            return;
        }
        self.current = key;
        self.tracks[key.index()].reset();
    }

    /// Advances the active track by one tick.
    pub fn advance(&mut self) {
        self.tracks[self.current.index()].advance();
    }

    /// Key of the active track.
    #[must_use]
    pub const fn current_key(&self) -> AnimationKey {
        self.current
    }

    /// Active track.
    #[must_use]
    pub fn current(&self) -> &Animation {
        &self.tracks[self.current.index()]
    }

    /// Frame of the active track that should be drawn this tick.
    #[must_use]
    pub fn current_frame(&self) -> SpriteRegion {
        self.current().current_frame()
    }

    /// Track registered for the provided key.
    #[must_use]
    pub fn track(&self, key: AnimationKey) -> &Animation {
        &self.tracks[key.index()]
    }
}
