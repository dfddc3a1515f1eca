//! Chunk buffers and batch generation for the parcel grid.
#![forbid(unsafe_code)]

use std::collections::VecDeque;
use std::sync::Arc;

use hashbrown::HashMap;
use parcel_blocks::Block;
use parcel_world::{CHUNK_SIZE, ParcelGrid};

#[derive(Clone, Debug)]
pub struct ChunkBuf {
    pub chunk_x: i32,
    pub chunk_z: i32,
    pub sx: usize,
    pub sy: usize,
    pub sz: usize,
    pub blocks: Vec<Block>,
}

impl ChunkBuf {
    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        (y * self.sz + z) * self.sx + x
    }

    #[inline]
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> Block {
        self.blocks[self.idx(x, y, z)]
    }

    pub fn from_blocks_local(
        chunk_x: i32,
        chunk_z: i32,
        sx: usize,
        sy: usize,
        sz: usize,
        blocks: Vec<Block>,
    ) -> Self {
        let mut b = blocks;
        let expect = sx * sy * sz;
        if b.len() != expect {
            b.resize(expect, Block::AIR);
        }
        ChunkBuf {
            chunk_x,
            chunk_z,
            sx,
            sy,
            sz,
            blocks: b,
        }
    }

    #[inline]
    pub fn has_non_air(&self) -> bool {
        self.blocks.iter().any(|b| !b.is_air())
    }
}

/// Generate one 16x16 chunk of the plot world into a fresh buffer.
///
/// Columns above their classified surface stay air, matching the host
/// default for untouched heights.
pub fn generate_chunk_buffer(grid: &ParcelGrid, chunk_x: i32, chunk_z: i32) -> ChunkBuf {
    let sx = CHUNK_SIZE;
    let sz = CHUNK_SIZE;
    let sy = (grid.max_height() + 1) as usize;
    let mut blocks = vec![Block::AIR; sx * sy * sz];
    grid.generate_chunk(chunk_x, chunk_z, |x, y, z, block| {
        if y >= 0 && (y as usize) < sy {
            blocks[(y as usize * sz + z) * sx + x] = block;
        }
    });
    ChunkBuf {
        chunk_x,
        chunk_z,
        sx,
        sy,
        sz,
        blocks,
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ChunkCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub entries: usize,
}

/// Capacity-bounded cache of generated chunks, evicting the least recently
/// touched entry first.
pub struct ChunkCache {
    entries: HashMap<(i32, i32), Arc<ChunkBuf>>,
    order: VecDeque<(i32, i32)>,
    capacity: usize,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl ChunkCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    pub fn get(&mut self, chunk_x: i32, chunk_z: i32) -> Option<Arc<ChunkBuf>> {
        let key = (chunk_x, chunk_z);
        if let Some(buf) = self.entries.get(&key).cloned() {
            self.hits += 1;
            self.touch(key);
            return Some(buf);
        }
        self.misses += 1;
        None
    }

    /// Fetch a chunk, generating and caching it on a miss.
    pub fn get_or_generate(&mut self, grid: &ParcelGrid, chunk_x: i32, chunk_z: i32) -> Arc<ChunkBuf> {
        if let Some(buf) = self.get(chunk_x, chunk_z) {
            return buf;
        }
        let buf = Arc::new(generate_chunk_buffer(grid, chunk_x, chunk_z));
        self.insert(Arc::clone(&buf));
        buf
    }

    pub fn insert(&mut self, buf: Arc<ChunkBuf>) {
        let key = (buf.chunk_x, buf.chunk_z);
        self.entries.insert(key, buf);
        self.remove_from_order(key);
        self.order.push_back(key);
        self.enforce_capacity();
    }

    pub fn clear(&mut self) {
        self.evictions += self.entries.len() as u64;
        self.entries.clear();
        self.order.clear();
    }

    pub fn stats(&self) -> ChunkCacheStats {
        ChunkCacheStats {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            entries: self.entries.len(),
        }
    }

    fn touch(&mut self, key: (i32, i32)) {
        self.remove_from_order(key);
        self.order.push_back(key);
    }

    fn remove_from_order(&mut self, key: (i32, i32)) {
        if let Some(pos) = self.order.iter().position(|k| *k == key) {
            self.order.remove(pos);
        }
    }

    fn enforce_capacity(&mut self) {
        while self.order.len() > self.capacity {
            if let Some(old) = self.order.pop_front() {
                if self.entries.remove(&old).is_some() {
                    self.evictions += 1;
                }
            }
        }
    }
}
