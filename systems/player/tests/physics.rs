use twotone_core::{FrameInput, Key, PhysicsConfig, Rect, SheetId, SpriteRegion, Vec2, WorldConfig};
use twotone_system_animation::{Animation, AnimationKey, AnimationSet};
use twotone_system_player::{Behavior, Player};
use twotone_world::{TileGrid, TileLayout};

fn animations() -> AnimationSet {
    let track = |start_x, count| {
        let frames = SpriteRegion::horizontal_strip(SheetId::new(0), 16, 16, count, start_x, 204, 1);
        Animation::new(frames, 10).expect("valid track")
    };
    AnimationSet::new(track(0, 1), track(17, 3), track(68, 1), track(102, 1))
}

fn grid(text: &str, tile_size: u32) -> TileGrid {
    let config = WorldConfig {
        tile_size,
        ..WorldConfig::default()
    };
    let layout = TileLayout::parse(text).expect("layout parses");
    TileGrid::load(config, &layout, SheetId::new(0))
}

fn player(sprite: Rect, hitbox: Rect) -> Player {
    Player::new(sprite, hitbox, animations())
}

#[test]
fn falling_player_lands_and_may_jump_again() {
    let level = grid(
        "-1,-1,-1\n-1,-1,-1\n-1,-1,-1\n-1,-1,-1\n1,1,1\n",
        16,
    );
    let physics = PhysicsConfig::default();
    let mut player = player(
        Rect::new(16.0, 0.0, 12.0, 12.0),
        Rect::new(0.0, 0.0, 12.0, 12.0),
    );

    let mut landed = false;
    for _ in 0..120 {
        player.update(&level, &FrameInput::default(), &physics);
        if player.flags().bottom {
            landed = true;
            break;
        }
    }

    assert!(landed, "player never reached the floor");
    assert_eq!(player.bounding_box().bottom(), 64.0);
    assert_eq!(player.velocity().y, 0.0);
    assert!(player.can_jump());
}

#[test]
fn single_tick_landing_on_a_diagonal_pair() {
    let level = grid("0,-1\n-1,0\n", 20);
    let physics = PhysicsConfig::default();
    let mut player = player(
        Rect::new(20.0, 0.0, 20.0, 20.0),
        Rect::new(0.0, 0.0, 20.0, 20.0),
    )
    .with_velocity(Vec2::new(0.0, 1.0));

    player.update(&level, &FrameInput::default(), &physics);

    assert_eq!(player.bounding_box().y, 0.0);
    assert_eq!(player.bounding_box().bottom(), 20.0);
    assert!(player.flags().bottom);
    assert!(!player.flags().left && !player.flags().right);
    assert_eq!(player.velocity().y, 0.0);
    assert!(player.can_jump());
}

#[test]
fn free_fall_converges_to_terminal_velocity() {
    let level = TileGrid::new(WorldConfig::default(), 4, 4);
    let physics = PhysicsConfig::default();
    let mut player = player(
        Rect::new(0.0, 0.0, 16.0, 16.0),
        Rect::new(2.0, 4.0, 12.0, 12.0),
    );

    for _ in 0..40 {
        player.update(&level, &FrameInput::default(), &physics);
        assert!(player.velocity().y <= physics.terminal_velocity);
    }

    assert_eq!(player.velocity().y, 5.0);
    assert_eq!(player.animations().current_key(), AnimationKey::Jump);
    assert!(!player.can_jump());
}

#[test]
fn brushing_a_spike_sideways_kills_in_the_same_tick() {
    let level = grid("-1,-1,-1\n-1,-1,183\n", 16);
    let physics = PhysicsConfig::default();
    let mut player = player(
        Rect::new(20.0, 16.0, 16.0, 16.0),
        Rect::new(2.0, 4.0, 12.0, 12.0),
    );

    player.update(&level, &FrameInput::default().with_held(Key::Right), &physics);

    assert_eq!(player.behavior(), Behavior::Death);
    assert!(player.flags().right);
    assert!(!player.flags().bottom && !player.flags().top);
    assert_eq!(player.bounding_box().right(), 35.0);
}

#[test]
fn stacked_tiles_last_tile_in_row_major_order_wins() {
    let level = grid("-1,-1,-1\n-1,-1,183\n-1,-1,1\n", 16);
    let mut player = player(
        Rect::new(20.0, 26.0, 12.0, 12.0),
        Rect::new(0.0, 0.0, 12.0, 12.0),
    )
    .with_velocity(Vec2::new(4.0, 0.0));

    let contacts = player.resolve_movement(&level);

    assert!(contacts.touched_spike);
    assert!(player.flags().right);
    assert_eq!(player.bounding_box().x, 20.0);
    assert_eq!(player.sprite_rect().x, 20.0);
}

#[test]
fn falling_onto_a_spike_kills_in_the_same_tick() {
    let level = grid("-1\n183\n", 16);
    let physics = PhysicsConfig::default();
    let mut player = player(
        Rect::new(3.0, 8.0, 10.0, 12.0),
        Rect::new(0.0, 0.0, 10.0, 12.0),
    )
    .with_velocity(Vec2::new(0.0, 4.0));

    player.update(&level, &FrameInput::default(), &physics);

    assert_eq!(player.behavior(), Behavior::Death);
    assert!(player.flags().bottom, "contact came from the vertical pass");
    assert!(!player.flags().left && !player.flags().right);
    assert_eq!(player.bounding_box().y, 11.0);
    assert_eq!(player.velocity().y, 0.0);
}

#[test]
fn bumping_a_ceiling_cancels_the_rise() {
    let level = grid("1\n-1\n-1\n", 16);
    let physics = PhysicsConfig::default();
    let mut player = player(
        Rect::new(2.0, 18.0, 12.0, 12.0),
        Rect::new(0.0, 0.0, 12.0, 12.0),
    )
    .with_velocity(Vec2::new(0.0, physics.jump_impulse));

    player.update(&level, &FrameInput::default(), &physics);

    assert!(player.flags().top);
    assert!(!player.flags().bottom);
    assert_eq!(player.bounding_box().y, 16.0);
    assert_eq!(player.velocity().y, 0.0);
    assert_eq!(player.behavior(), Behavior::Normal);
}

#[test]
fn corpse_stays_put() {
    let level = TileGrid::new(WorldConfig::default(), 4, 4);
    let physics = PhysicsConfig::default();
    let mut player = player(
        Rect::new(16.0, 16.0, 16.0, 16.0),
        Rect::new(2.0, 4.0, 12.0, 12.0),
    );

    let spike = grid("-1,-1\n-1,183\n", 16);
    player.update(&spike, &FrameInput::default().with_held(Key::Left), &physics);
    assert_eq!(player.behavior(), Behavior::Death);
    let resting = player.sprite_rect();

    for _ in 0..30 {
        player.update(&level, &FrameInput::default().with_pressed(Key::Jump), &physics);
    }

    assert_eq!(player.sprite_rect(), resting);
    assert_eq!(player.velocity(), Vec2::ZERO);
    assert_eq!(player.animations().current_key(), AnimationKey::Death);
}

#[test]
fn pass_through_tiles_do_not_stop_a_fall() {
    let mut level = grid("-1,-1\n1,1\n", 16);
    level.set_collidable(|_| false);
    let physics = PhysicsConfig::default();
    let mut player = player(
        Rect::new(0.0, 0.0, 12.0, 12.0),
        Rect::new(0.0, 0.0, 12.0, 12.0),
    )
    .with_velocity(Vec2::new(0.0, 5.0));

    for _ in 0..4 {
        player.update(&level, &FrameInput::default(), &physics);
    }

    assert!(!player.flags().bottom);
    assert!(player.bounding_box().y > 16.0);
}

#[test]
fn respawn_revives_a_dead_player() {
    let spike = grid("-1,-1\n-1,183\n", 16);
    let physics = PhysicsConfig::default();
    let mut player = player(
        Rect::new(16.0, 16.0, 16.0, 16.0),
        Rect::new(2.0, 4.0, 12.0, 12.0),
    );
    player.update(&spike, &FrameInput::default(), &physics);
    assert_eq!(player.behavior(), Behavior::Death);

    player.respawn(Vec2::new(20.0, 120.0));

    assert_eq!(player.behavior(), Behavior::Normal);
    assert_eq!(player.sprite_rect().position(), Vec2::new(20.0, 120.0));
    assert_eq!(player.animations().current_key(), AnimationKey::Idle);
}
