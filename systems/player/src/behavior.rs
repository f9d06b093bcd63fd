//! Per-tick behaviors the player switches between.

use tracing::info;
use twotone_core::{InputOracle, Key, PhysicsConfig, Vec2};
use twotone_system_animation::AnimationKey;
use twotone_world::TileGrid;

use crate::Player;

/// Active behavior of the player.
///
/// `Normal` moves to `Death` when a spike is touched. Nothing leads back;
/// only [`Player::respawn`] restores `Normal`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Behavior {
    /// Controlled by the player's input.
    #[default]
    Normal,
    /// Killed by a hazard; the corpse stays where it fell.
    Death,
}

impl Behavior {
    /// Runs one tick of this behavior against the player.
    pub fn update<I>(self, player: &mut Player, grid: &TileGrid, input: &I, physics: &PhysicsConfig)
    where
        I: InputOracle + ?Sized,
    {
        match self {
            Self::Normal => update_normal(player, grid, input, physics),
            Self::Death => update_death(player, grid),
        }
    }
}

fn update_normal<I>(player: &mut Player, grid: &TileGrid, input: &I, physics: &PhysicsConfig)
where
    I: InputOracle + ?Sized,
{
    // Contacts still describe the previous tick at this point.
    let grounded = player.flags.grounded();

    if input.is_held(Key::Left) {
        player.velocity.x = -physics.run_speed;
        player.facing_flipped = true;
    } else if input.is_held(Key::Right) {
        player.velocity.x = physics.run_speed;
        player.facing_flipped = false;
    } else {
        player.velocity.x = 0.0;
    }

    if grounded {
        let key = if player.velocity.x == 0.0 {
            AnimationKey::Idle
        } else {
            AnimationKey::Run
        };
        player.animations.switch_to(key);
    }

    if input.was_pressed(Key::Jump) && player.can_jump {
        player.velocity.y = physics.jump_impulse;
        player.can_jump = false;
        player.animations.switch_to(AnimationKey::Jump);
    }

    let contacts = player.resolve_movement(grid);

    player.velocity.y = physics
        .terminal_velocity
        .min(player.velocity.y + physics.gravity);
    if player.velocity.y > physics.airborne_fall_speed {
        player.animations.switch_to(AnimationKey::Jump);
        player.can_jump = false;
    }

    if player.flags.vertical() {
        player.velocity.y = 0.0;
    }
    if player.flags.grounded() {
        player.can_jump = true;
    }

    if contacts.touched_spike {
        player.behavior = Behavior::Death;
        let position = player.sprite_rect.position();
        info!(x = position.x, y = position.y, "player_died");
    }

    player.animations.advance();
}

fn update_death(player: &mut Player, grid: &TileGrid) {
    player.animations.switch_to(AnimationKey::Death);
    player.velocity = Vec2::ZERO;
    let _ = player.resolve_movement(grid);
}

#[cfg(test)]
mod tests {
    use super::*;
    use twotone_core::{FrameInput, Rect, SheetId, SpriteRegion, WorldConfig};
    use twotone_system_animation::{Animation, AnimationSet};
    use twotone_world::TileLayout;

    fn floor() -> TileGrid {
        let layout = TileLayout::parse("-1,-1,-1,-1\n-1,-1,-1,-1\n1,1,1,1\n").expect("layout");
        TileGrid::load(WorldConfig::default(), &layout, SheetId::new(0))
    }

    fn standing_player() -> Player {
        let track = |count| {
            let frames = SpriteRegion::horizontal_strip(SheetId::new(0), 16, 16, count, 0, 0, 1);
            Animation::new(frames, 10).expect("valid track")
        };
        let mut player = Player::new(
            Rect::new(16.0, 16.0, 16.0, 16.0),
            Rect::new(2.0, 4.0, 12.0, 12.0),
            AnimationSet::new(track(1), track(3), track(1), track(1)),
        );
        player.flags.bottom = true;
        player.can_jump = true;
        player
    }

    #[test]
    fn held_direction_sets_speed_and_facing() {
        let grid = floor();
        let physics = PhysicsConfig::default();
        let mut player = standing_player();

        player.update(&grid, &FrameInput::default().with_held(Key::Left), &physics);

        assert_eq!(player.velocity().x, -physics.run_speed);
        assert!(player.facing_flipped());
        assert_eq!(player.animations().current_key(), AnimationKey::Run);
        assert!((player.sprite_rect().x - (16.0 - physics.run_speed)).abs() < 1e-5);
    }

    #[test]
    fn releasing_direction_stops_and_idles_when_grounded() {
        let grid = floor();
        let physics = PhysicsConfig::default();
        let mut player = standing_player();
        player.animations.switch_to(AnimationKey::Run);
        player.velocity.x = physics.run_speed;

        player.update(&grid, &FrameInput::default(), &physics);

        assert_eq!(player.velocity().x, 0.0);
        assert_eq!(player.animations().current_key(), AnimationKey::Idle);
    }

    #[test]
    fn jump_edge_launches_only_when_allowed() {
        let grid = floor();
        let physics = PhysicsConfig::default();
        let jump = FrameInput::default().with_pressed(Key::Jump);

        let mut player = standing_player();
        player.update(&grid, &jump, &physics);
        assert_eq!(player.velocity().y, physics.jump_impulse + physics.gravity);
        assert!(!player.can_jump());
        assert_eq!(player.animations().current_key(), AnimationKey::Jump);

        let mut grounded_but_blocked = standing_player();
        grounded_but_blocked.can_jump = false;
        grounded_but_blocked.update(&grid, &jump, &physics);
        assert_eq!(grounded_but_blocked.velocity().y, physics.gravity);
    }

    #[test]
    fn holding_jump_does_not_relaunch() {
        let grid = floor();
        let physics = PhysicsConfig::default();
        let mut player = standing_player();

        player.update(&grid, &FrameInput::default().with_held(Key::Jump), &physics);

        assert_eq!(player.velocity().y, physics.gravity);
    }

    #[test]
    fn fast_fall_marks_the_player_airborne() {
        let grid = floor();
        let physics = PhysicsConfig::default();
        let mut player = standing_player().with_velocity(Vec2::new(0.0, 1.6));
        player.sprite_rect.y = 0.0;
        player.bounding_box.y = 4.0;

        player.update(&grid, &FrameInput::default(), &physics);

        assert!(player.velocity().y > physics.airborne_fall_speed);
        assert!(!player.can_jump());
        assert_eq!(player.animations().current_key(), AnimationKey::Jump);
    }

    #[test]
    fn death_switches_track_and_freezes_velocity() {
        let grid = floor();
        let physics = PhysicsConfig::default();
        let mut player = standing_player().with_velocity(Vec2::new(1.4, 3.0));
        player.behavior = Behavior::Death;

        player.update(&grid, &FrameInput::default().with_pressed(Key::Jump), &physics);

        assert_eq!(player.velocity(), Vec2::ZERO);
        assert_eq!(player.behavior(), Behavior::Death);
        assert_eq!(player.animations().current_key(), AnimationKey::Death);
        assert_eq!(player.sprite_rect().position(), Vec2::new(16.0, 16.0));
    }
}
