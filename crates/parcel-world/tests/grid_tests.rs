use parcel_blocks::MaterialCatalog;
use parcel_world::options::GeneratorOptions;
use parcel_world::{LayoutError, ParcelGrid, ParcelId, WorldId};

fn options(parcel_size: i32, path_width: i32) -> GeneratorOptions {
    GeneratorOptions {
        parcel_size,
        path_width,
        floor_height: 64,
        max_height: 128,
        ..GeneratorOptions::default()
    }
}

fn full_catalog(options: &GeneratorOptions) -> MaterialCatalog {
    let mut catalog = MaterialCatalog::new();
    for key in options.materials.iter() {
        catalog.intern(key);
    }
    catalog
}

fn make_grid(parcel_size: i32, path_width: i32) -> ParcelGrid {
    let opts = options(parcel_size, path_width);
    let catalog = full_catalog(&opts);
    ParcelGrid::new(&opts, &catalog, WorldId(0)).unwrap()
}

#[test]
fn derived_constants_for_eight_by_three() {
    let grid = make_grid(8, 3);
    let l = grid.layout();
    assert_eq!(l.section_size, 11);
    assert_eq!(l.path_offset, 2);
    assert!(l.make_path_main);
    assert!(!l.make_path_alt);
}

#[test]
fn locate_at_computed_bottom_corner_is_origin_parcel() {
    let grid = make_grid(8, 3);
    let id = ParcelId::new(WorldId(0), 0, 0);
    let corner = grid.bottom_corner(id);
    assert_eq!((corner.x, corner.z), (2, 2));
    assert_eq!(grid.locate(corner.x, corner.z), Some(id));
}

#[test]
fn border_ring_classifies_as_wall_one_above_floor() {
    let grid = make_grid(8, 3);
    let corner = grid.bottom_corner(ParcelId::new(WorldId(0), 0, 0));
    // One unit outside the interior on every side.
    let probes = [
        (corner.x - 1, corner.z - 1),
        (corner.x - 1, corner.z + 4),
        (corner.x + 8, corner.z + 8),
        (corner.x + 4, corner.z + 8),
    ];
    for (wx, wz) in probes {
        let profile = grid.classify_world_column(wx, wz);
        assert_eq!(profile.surface, grid.palette().wall, "at ({wx},{wz})");
        assert_eq!(profile.surface_y, 65, "at ({wx},{wz})");
        assert_eq!(grid.locate(wx, wz), None, "at ({wx},{wz})");
    }
}

#[test]
fn corridor_columns_resolve_to_no_parcel() {
    let grid = make_grid(8, 3);
    // Two units outside the interior sits on the main path for width 3.
    let profile = grid.classify_world_column(0, 0);
    assert_eq!(profile.surface, grid.palette().path_main);
    assert_eq!(profile.surface_y, 64);
    assert_eq!(grid.locate(0, 0), None);
}

#[test]
fn wide_corridor_gets_alt_ring() {
    let grid = make_grid(8, 6);
    let l = grid.layout();
    assert_eq!(l.path_offset, 4);
    assert!(l.make_path_main);
    assert!(l.make_path_alt);
    let corner = grid.bottom_corner(ParcelId::new(WorldId(0), 0, 0));
    // Two units out: alt ring at floor level.
    let alt = grid.classify_world_column(corner.x - 2, corner.z + 3);
    assert_eq!(alt.surface, grid.palette().path_alt);
    assert_eq!(alt.surface_y, 64);
    // Three units out: main path.
    let main = grid.classify_world_column(corner.x - 3, corner.z + 3);
    assert_eq!(main.surface, grid.palette().path_main);
}

#[test]
fn narrow_corridor_falls_back_to_wall() {
    // Width 2 materializes neither corridor ring; everything outside the
    // border still classifies, as raised wall.
    let grid = make_grid(8, 2);
    let l = grid.layout();
    assert!(!l.make_path_main);
    assert!(!l.make_path_alt);
    let corner = grid.bottom_corner(ParcelId::new(WorldId(0), 0, 0));
    let profile = grid.classify_world_column(corner.x - 2, corner.z + 3);
    assert_eq!(profile.surface, grid.palette().wall);
    assert_eq!(profile.surface_y, 65);
}

#[test]
fn zero_width_corridor_shares_borders_between_plots() {
    // With no corridor the section equals the parcel, so every column lands
    // in some plot's footprint while the generator still paints a shared
    // wall line. locate keeps reporting the footprint owner.
    let grid = make_grid(8, 0);
    let corner = grid.bottom_corner(ParcelId::new(WorldId(0), 0, 0));
    let wall_col = (corner.x - 1, corner.z);
    let profile = grid.classify_world_column(wall_col.0, wall_col.1);
    assert_eq!(profile.surface, grid.palette().wall);
    assert!(grid.locate(wall_col.0, wall_col.1).is_some());
}

#[test]
fn locate_is_exact_for_negative_coordinates() {
    let grid = make_grid(8, 3);
    let id = ParcelId::new(WorldId(0), -3, -7);
    let corner = grid.bottom_corner(id);
    assert!(corner.x < 0 && corner.z < 0);
    assert_eq!(grid.locate(corner.x, corner.z), Some(id));
    assert_eq!(grid.locate(corner.x + 7, corner.z + 7), Some(id));
    // One step off the interior crosses onto the wall ring.
    assert_eq!(grid.locate(corner.x - 1, corner.z), None);
    assert_eq!(grid.locate(corner.x, corner.z + 8), None);
}

#[test]
fn parcel_ids_in_different_worlds_differ() {
    assert_ne!(
        ParcelId::new(WorldId(1), 2, 3),
        ParcelId::new(WorldId(2), 2, 3)
    );
}

#[test]
fn fixed_spawn_point_offsets_only_even_sizes() {
    let even = make_grid(8, 3);
    assert_eq!(even.fixed_spawn_point(), (0.5, 65.0, 0.5));

    let odd = make_grid(9, 3);
    assert_eq!(odd.fixed_spawn_point(), (0.0, 65.0, 0.0));
}

#[test]
fn home_location_centers_along_z() {
    let grid = make_grid(8, 3);
    let home = grid.home_location(ParcelId::new(WorldId(0), 0, 0));
    assert_eq!(home.x, 2.0);
    assert_eq!(home.y, 65.0);
    assert_eq!(home.z, 2.0 + 3.5);
    assert_eq!(home.yaw, -90.0);
    assert_eq!(home.pitch, 0.0);
}

#[test]
fn construction_fails_fast_on_bad_options() {
    let opts = options(0, 3);
    let catalog = full_catalog(&opts);
    assert_eq!(
        ParcelGrid::new(&opts, &catalog, WorldId(0)).unwrap_err(),
        LayoutError::NonPositiveParcelSize(0)
    );

    let opts = options(8, -1);
    let catalog = full_catalog(&opts);
    assert_eq!(
        ParcelGrid::new(&opts, &catalog, WorldId(0)).unwrap_err(),
        LayoutError::NegativePathWidth(-1)
    );

    let mut opts = options(8, 3);
    opts.max_height = 10;
    let catalog = full_catalog(&opts);
    assert!(matches!(
        ParcelGrid::new(&opts, &catalog, WorldId(0)),
        Err(LayoutError::InvalidHeightRange { .. })
    ));
}

#[test]
fn construction_fails_fast_on_unknown_material() {
    let opts = options(8, 3);
    // Catalog missing everything but air.
    let catalog = MaterialCatalog::new();
    assert!(matches!(
        ParcelGrid::new(&opts, &catalog, WorldId(0)),
        Err(LayoutError::UnknownMaterial(_))
    ));
}

#[test]
fn options_parse_from_toml_with_defaults() {
    let opts = GeneratorOptions::from_toml_str(
        r#"
parcel_size = 12
path_width = 5

[materials]
floor = "polished_granite"
"#,
    )
    .unwrap();
    assert_eq!(opts.parcel_size, 12);
    assert_eq!(opts.path_width, 5);
    assert_eq!(opts.floor_height, 64);
    assert_eq!(opts.materials.floor, "polished_granite");
    assert_eq!(opts.materials.fill, "stone");
}
