use parcel_blocks::MaterialCatalog;
use parcel_chunk::{ChunkCache, generate_chunk_buffer};
use parcel_world::options::GeneratorOptions;
use parcel_world::{CHUNK_SIZE, ParcelGrid, WorldId};

fn make_grid() -> ParcelGrid {
    let options = GeneratorOptions {
        parcel_size: 8,
        path_width: 3,
        floor_height: 64,
        max_height: 96,
        ..GeneratorOptions::default()
    };
    let mut catalog = MaterialCatalog::new();
    for key in options.materials.iter() {
        catalog.intern(key);
    }
    ParcelGrid::new(&options, &catalog, WorldId(0)).unwrap()
}

#[test]
fn generated_columns_match_the_classifier() {
    let grid = make_grid();
    for (chunk_x, chunk_z) in [(0, 0), (3, -2), (-1, -1)] {
        let buf = generate_chunk_buffer(&grid, chunk_x, chunk_z);
        assert_eq!(buf.sy, 97);
        for cx in 0..CHUNK_SIZE {
            for cz in 0..CHUNK_SIZE {
                let wx = chunk_x * CHUNK_SIZE as i32 + cx as i32;
                let wz = chunk_z * CHUNK_SIZE as i32 + cz as i32;
                let profile = grid.classify_world_column(wx, wz);
                let surface_y = profile.surface_y as usize;
                assert_eq!(
                    buf.get_local(cx, surface_y, cz),
                    profile.surface,
                    "surface at ({wx},{wz})"
                );
                for y in 0..surface_y {
                    assert_eq!(
                        buf.get_local(cx, y, cz),
                        grid.palette().fill,
                        "fill at ({wx},{y},{wz})"
                    );
                }
                for y in (surface_y + 1)..buf.sy {
                    assert!(
                        buf.get_local(cx, y, cz).is_air(),
                        "air expected at ({wx},{y},{wz})"
                    );
                }
            }
        }
    }
}

#[test]
fn generation_is_independent_per_chunk() {
    // The same world column produces the same blocks whether its chunk is
    // generated alone or alongside others.
    let grid = make_grid();
    let a = generate_chunk_buffer(&grid, 2, 5);
    let b = generate_chunk_buffer(&grid, 2, 5);
    assert_eq!(a.blocks, b.blocks);
}

#[test]
fn cache_hits_and_evicts_in_touch_order() {
    let grid = make_grid();
    let mut cache = ChunkCache::new(2);

    let first = cache.get_or_generate(&grid, 0, 0);
    cache.get_or_generate(&grid, 1, 0);
    assert_eq!(cache.stats().entries, 2);
    assert_eq!(cache.stats().misses, 2);

    // Touch (0,0) so (1,0) becomes the eviction victim.
    assert!(cache.get(0, 0).is_some());
    cache.get_or_generate(&grid, 2, 0);
    assert_eq!(cache.stats().entries, 2);
    assert_eq!(cache.stats().evictions, 1);
    assert!(cache.get(1, 0).is_none());

    let again = cache.get_or_generate(&grid, 0, 0);
    assert_eq!(again.blocks, first.blocks);
}
