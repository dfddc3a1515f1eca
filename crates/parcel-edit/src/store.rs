use std::collections::HashMap;

use parcel_blocks::Block;
use parcel_geom::Vec3i;

/// Write interface to the host's world storage.
///
/// The 3D block store and the per-column surface covering are separate
/// layers; painting a surface never collides with block writes.
pub trait BlockSink: Send {
    fn set_block(&mut self, pos: Vec3i, block: Block);
    fn set_surface(&mut self, wx: i32, wz: i32, material: Block);
}

/// Keyed in-memory world storage, enough for tests and tooling. Absent keys
/// read as air / no covering.
#[derive(Default, Debug, Clone)]
pub struct EditMap {
    blocks: HashMap<(i32, i32, i32), Block>,
    surfaces: HashMap<(i32, i32), Block>,
}

impl EditMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, wx: i32, wy: i32, wz: i32) -> Block {
        self.blocks
            .get(&(wx, wy, wz))
            .copied()
            .unwrap_or(Block::AIR)
    }

    pub fn surface_at(&self, wx: i32, wz: i32) -> Option<Block> {
        self.surfaces.get(&(wx, wz)).copied()
    }

    /// Number of positions ever written (air writes included).
    pub fn block_writes(&self) -> usize {
        self.blocks.len()
    }

    pub fn surface_writes(&self) -> usize {
        self.surfaces.len()
    }

    pub fn positions(&self) -> impl Iterator<Item = &(i32, i32, i32)> {
        self.blocks.keys()
    }
}

impl BlockSink for EditMap {
    fn set_block(&mut self, pos: Vec3i, block: Block) {
        self.blocks.insert((pos.x, pos.y, pos.z), block);
    }

    fn set_surface(&mut self, wx: i32, wz: i32, material: Block) {
        self.surfaces.insert((wx, wz), material);
    }
}
