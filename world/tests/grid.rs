use twotone_core::{Rect, SheetId, TileKind, Vec2, WorldConfig};
use twotone_world::{Layer, TileGrid, TileLayout};

fn config_with_tile_size(tile_size: u32) -> WorldConfig {
    WorldConfig {
        tile_size,
        ..WorldConfig::default()
    }
}

#[test]
fn collision_boxes_stay_inside_their_cells() {
    for tile_size in [4, 8, 16, 20, 32] {
        let config = config_with_tile_size(tile_size);
        let codes: Vec<Option<u32>> = (0..200).map(Some).collect();
        let layout = TileLayout::from_rows(vec![codes]);
        let grid = TileGrid::load(config, &layout, SheetId::new(0));

        for tile in grid.iter().filter(|tile| tile.is_present()) {
            assert!(
                tile.sprite_rect.contains_rect(&tile.bounding_box),
                "tile {} at size {tile_size} escapes its cell",
                tile.column
            );
            assert!(tile.bounding_box.w >= 0.0 && tile.bounding_box.h >= 0.0);
        }
    }
}

#[test]
fn special_codes_follow_the_configuration() {
    let config = WorldConfig {
        ledge_code: 7,
        spike_code: 9,
        ..WorldConfig::default()
    };
    let layout = TileLayout::parse("7,9,116,183").expect("layout parses");
    let grid = TileGrid::load(config, &layout, SheetId::new(0));

    let kinds: Vec<_> = grid.iter().map(|tile| tile.kind).collect();
    assert_eq!(
        kinds,
        vec![TileKind::Ledge, TileKind::Spike, TileKind::Plain, TileKind::Plain]
    );
}

#[test]
fn neighbors_near_the_origin_are_clipped() {
    let layout = TileLayout::parse("1,1,1\n1,1,1\n1,1,1\n").expect("layout parses");
    let grid = TileGrid::load(WorldConfig::default(), &layout, SheetId::new(0));

    assert_eq!(grid.neighbors(0.0, 0.0).len(), 4);
    assert_eq!(grid.neighbors(47.0, 47.0).len(), 4);
    assert_eq!(grid.neighbors(16.0, 0.0).len(), 6);
    assert!(grid.neighbors(1000.0, 1000.0).is_empty());
}

#[test]
fn neighbors_at_extreme_coordinates_are_empty() {
    let layout = TileLayout::parse("1,1,1\n1,1,1\n1,1,1\n").expect("layout parses");
    let grid = TileGrid::load(WorldConfig::default(), &layout, SheetId::new(0));

    let extremes = [
        (f32::MAX, f32::MAX),
        (f32::MIN, f32::MIN),
        (f32::INFINITY, 0.0),
        (f32::NEG_INFINITY, 0.0),
        (0.0, f32::NEG_INFINITY),
        (1e30, -1e30),
        (-1e30, 1e30),
    ];
    for (x, y) in extremes {
        assert!(
            grid.neighbors(x, y).is_empty(),
            "({x}, {y}) reached into the grid"
        );
    }
}

#[test]
fn later_layers_overwrite_earlier_ones_and_widen_the_grid() {
    let grey = TileLayout::parse("1,1\n1,1\n").expect("grey parses");
    let blue = TileLayout::parse("-1,2,2\n").expect("blue parses");
    let grid = TileGrid::from_layers(
        WorldConfig::default(),
        &[
            Layer::new(grey, SheetId::new(0)).with_colour("grey"),
            Layer::new(blue, SheetId::new(1)).with_colour("blue"),
        ],
    );

    assert_eq!((grid.width(), grid.height()), (3, 2));

    let kept = grid.tile(0, 0).expect("cell exists");
    assert_eq!(kept.colour.as_deref(), Some("grey"));

    let replaced = grid.tile(1, 0).expect("cell exists");
    assert_eq!(replaced.colour.as_deref(), Some("blue"));
    assert_eq!(replaced.drawable.map(|region| region.sheet), Some(SheetId::new(1)));

    let widened = grid.tile(2, 1).expect("cell exists");
    assert!(!widened.is_present());
}

#[test]
fn theme_gating_removes_matching_tiles_from_collision() {
    let grey = TileLayout::parse("1,-1\n").expect("grey parses");
    let blue = TileLayout::parse("-1,2\n").expect("blue parses");
    let mut grid = TileGrid::from_layers(
        WorldConfig::default(),
        &[
            Layer::new(grey, SheetId::new(0)).with_colour("grey"),
            Layer::new(blue, SheetId::new(1)).with_colour("blue"),
        ],
    );

    grid.set_collidable(|tile| tile.colour.as_deref() != Some("blue"));
    let solid: Vec<_> = grid.neighbors(0.0, 0.0).iter().map(|tile| tile.column).collect();
    assert_eq!(solid, vec![0]);

    grid.set_collidable(|_| true);
    assert_eq!(grid.neighbors(0.0, 0.0).len(), 2);
}

#[test]
fn visible_follows_a_scrolling_viewport() {
    let row: Vec<Option<u32>> = (0..40).map(Some).collect();
    let grid = TileGrid::load(
        WorldConfig::default(),
        &TileLayout::from_rows(vec![row]),
        SheetId::new(0),
    );

    let viewport = Rect::new(100.0, -20.0, 64.0, 40.0);
    let columns: Vec<_> = grid.visible(viewport).iter().map(|tile| tile.column).collect();

    assert_eq!(columns, vec![6, 7, 8, 9, 10]);
    let inspected = grid.tile_at(Vec2::new(100.0, 3.0)).expect("inside grid");
    assert_eq!(inspected.column, 6);
}
