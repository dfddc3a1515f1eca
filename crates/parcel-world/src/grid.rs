use parcel_blocks::{Block, MaterialCatalog};
use parcel_geom::Vec2i;

use crate::CHUNK_SIZE;
use crate::layout::{GridLayout, LayoutError};
use crate::options::GeneratorOptions;
use crate::surface::{ColumnProfile, Palette, classify_column};

/// Identifies the world/grid instance a parcel belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WorldId(pub u32);

/// One plot in the infinite grid. Equal only when the world instance and
/// both indices match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParcelId {
    pub world: WorldId,
    pub x: i32,
    pub z: i32,
}

impl ParcelId {
    #[inline]
    pub const fn new(world: WorldId, x: i32, z: i32) -> Self {
        Self { world, x, z }
    }
}

/// Teleport/spawn anchor for a parcel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HomeLocation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
}

/// The grid of one world: layout constants plus the resolved palette.
///
/// Constructed with its world handle and materials resolved up front, so an
/// invalid configuration fails here and never at first use.
#[derive(Clone, Debug)]
pub struct ParcelGrid {
    layout: GridLayout,
    palette: Palette,
    world: WorldId,
    max_height: i32,
}

impl ParcelGrid {
    pub fn new(
        options: &GeneratorOptions,
        catalog: &MaterialCatalog,
        world: WorldId,
    ) -> Result<Self, LayoutError> {
        let layout = GridLayout::new(options)?;
        let resolve = |key: &str| -> Result<Block, LayoutError> {
            catalog
                .get_id(key)
                .map(Block::from)
                .ok_or_else(|| LayoutError::UnknownMaterial(key.to_string()))
        };
        let palette = Palette {
            floor: resolve(&options.materials.floor)?,
            wall: resolve(&options.materials.wall)?,
            path_main: resolve(&options.materials.path_main)?,
            path_alt: resolve(&options.materials.path_alt)?,
            fill: resolve(&options.materials.fill)?,
        };
        Ok(Self {
            layout,
            palette,
            world,
            max_height: options.max_height,
        })
    }

    #[inline]
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[inline]
    pub fn world(&self) -> WorldId {
        self.world
    }

    #[inline]
    pub fn max_height(&self) -> i32 {
        self.max_height
    }

    /// World coordinate of the parcel's (min-x, min-z) reference corner.
    #[inline]
    pub fn bottom_corner(&self, parcel: ParcelId) -> Vec2i {
        let l = &self.layout;
        Vec2i::new(
            l.section_size * parcel.x + l.path_offset + l.offset_x,
            l.section_size * parcel.z + l.path_offset + l.offset_z,
        )
    }

    /// Inverse of [`Self::bottom_corner`]: the parcel whose interior contains the
    /// column, or `None` when the column lies on a corridor or wall.
    ///
    /// Reduction uses floor-mod so negative world coordinates stay exact.
    pub fn locate(&self, wx: i32, wz: i32) -> Option<ParcelId> {
        let l = &self.layout;
        let abs_x = wx - l.offset_x - l.path_offset;
        let abs_z = wz - l.offset_z - l.path_offset;
        let mod_x = abs_x.rem_euclid(l.section_size);
        let mod_z = abs_z.rem_euclid(l.section_size);
        if (0..l.parcel_size).contains(&mod_x) && (0..l.parcel_size).contains(&mod_z) {
            Some(ParcelId::new(
                self.world,
                (abs_x - mod_x) / l.section_size,
                (abs_z - mod_z) / l.section_size,
            ))
        } else {
            None
        }
    }

    /// Spawn anchor just above the floor at the parcel's corner, centered
    /// along z and looking across the plot.
    pub fn home_location(&self, parcel: ParcelId) -> HomeLocation {
        let bottom = self.bottom_corner(parcel);
        HomeLocation {
            x: f64::from(bottom.x),
            y: f64::from(self.layout.floor_height) + 1.0,
            z: f64::from(bottom.z) + f64::from(self.layout.parcel_size - 1) / 2.0,
            yaw: -90.0,
            pitch: 0.0,
        }
    }

    /// Grid-global spawn point, nudged half a block onto the block boundary
    /// when the parcel size is even.
    pub fn fixed_spawn_point(&self) -> (f64, f64, f64) {
        let fix = if self.layout.parcel_size % 2 == 0 {
            0.5
        } else {
            0.0
        };
        (
            f64::from(self.layout.offset_x) + fix,
            f64::from(self.layout.floor_height) + 1.0,
            f64::from(self.layout.offset_z) + fix,
        )
    }

    /// Fold a world column into one tiling period and classify it.
    pub fn classify_world_column(&self, wx: i32, wz: i32) -> ColumnProfile {
        let l = &self.layout;
        let x = (wx - l.offset_x).rem_euclid(l.section_size) - l.path_offset;
        let z = (wz - l.offset_z).rem_euclid(l.section_size) - l.path_offset;
        classify_column(l, &self.palette, x, z)
    }

    /// Populate one 16x16 batch of columns through the host's setter.
    ///
    /// Each column gets fill from the world floor up to its surface height,
    /// then exactly one surface block; heights above stay untouched.
    pub fn generate_chunk<F>(&self, chunk_x: i32, chunk_z: i32, mut set: F)
    where
        F: FnMut(usize, i32, usize, Block),
    {
        let l = &self.layout;
        // Section-relative offset of the batch's corner; floor-mod keeps it
        // non-negative for chunks at negative world coordinates.
        let pbx = ((chunk_x << 4) - l.offset_x).rem_euclid(l.section_size);
        let pbz = ((chunk_z << 4) - l.offset_z).rem_euclid(l.section_size);

        for cx in 0..CHUNK_SIZE {
            for cz in 0..CHUNK_SIZE {
                let x = (pbx + cx as i32) % l.section_size - l.path_offset;
                let z = (pbz + cz as i32) % l.section_size - l.path_offset;
                let profile = classify_column(l, &self.palette, x, z);
                for y in 0..profile.surface_y {
                    set(cx, y, cz, self.palette.fill);
                }
                set(cx, profile.surface_y, cz, profile.surface);
            }
        }
    }
}
