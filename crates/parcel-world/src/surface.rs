use parcel_blocks::Block;

use crate::layout::GridLayout;

/// Materials for the five roles the generator places, resolved once at
/// grid construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub floor: Block,
    pub wall: Block,
    pub path_main: Block,
    pub path_alt: Block,
    pub fill: Block,
}

/// What a single column gets: one surface block at `surface_y`, fill below
/// it down to the world floor, nothing above.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnProfile {
    pub surface: Block,
    pub surface_y: i32,
}

/// Classify one column from its section-relative offsets, with the parcel
/// interior occupying `[0, parcel_size)` on both axes.
///
/// Pure per-column rule: no neighbor is consulted, so a 16x16 batch can be
/// classified column by column in any order.
pub fn classify_column(layout: &GridLayout, palette: &Palette, x: i32, z: i32) -> ColumnProfile {
    let ps = layout.parcel_size;
    let mut surface_y = layout.floor_height;
    let surface = if (0..ps).contains(&x) && (0..ps).contains(&z) {
        palette.floor
    } else if (-1..=ps).contains(&x) && (-1..=ps).contains(&z) {
        surface_y += 1;
        palette.wall
    } else if layout.make_path_alt && (-2..ps + 2).contains(&x) && (-2..ps + 2).contains(&z) {
        palette.path_alt
    } else if layout.make_path_main {
        palette.path_main
    } else {
        // Neither corridor ring materializes: keep every section-periodic
        // position classified by falling back to the raised wall fill.
        surface_y += 1;
        palette.wall
    };
    ColumnProfile { surface, surface_y }
}
