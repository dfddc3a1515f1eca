//! Integer geometry for the parcel grid: vectors, regions, traversal orders.
#![forbid(unsafe_code)]

use core::ops::{Add, AddAssign, Sub, SubAssign};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vec2i {
    pub x: i32,
    pub z: i32,
}

impl Vec2i {
    pub const ZERO: Vec2i = Vec2i { x: 0, z: 0 };

    #[inline]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

impl Add for Vec2i {
    type Output = Vec2i;
    #[inline]
    fn add(self, rhs: Vec2i) -> Vec2i {
        Vec2i::new(self.x + rhs.x, self.z + rhs.z)
    }
}

impl Sub for Vec2i {
    type Output = Vec2i;
    #[inline]
    fn sub(self, rhs: Vec2i) -> Vec2i {
        Vec2i::new(self.x - rhs.x, self.z - rhs.z)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vec3i {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Vec3i {
    pub const ZERO: Vec3i = Vec3i { x: 0, y: 0, z: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

impl Add for Vec3i {
    type Output = Vec3i;
    #[inline]
    fn add(self, rhs: Vec3i) -> Vec3i {
        Vec3i::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3i {
    #[inline]
    fn add_assign(&mut self, rhs: Vec3i) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vec3i {
    type Output = Vec3i;
    #[inline]
    fn sub(self, rhs: Vec3i) -> Vec3i {
        Vec3i::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vec3i {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec3i) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

/// Axis-aligned box of unit positions: a corner plus a non-negative size per axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Region {
    pub origin: Vec3i,
    pub size: Vec3i,
}

impl Region {
    #[inline]
    pub const fn new(origin: Vec3i, size: Vec3i) -> Self {
        Self { origin, size }
    }

    /// Total unit positions inside the region. Wide arithmetic so tall
    /// world-height columns (e.g. 16 x 384 x 16) cannot overflow.
    #[inline]
    pub fn block_count(&self) -> u64 {
        let sx = self.size.x.max(0) as u64;
        let sy = self.size.y.max(0) as u64;
        let sz = self.size.z.max(0) as u64;
        sx * sy * sz
    }

    #[inline]
    pub fn contains(&self, p: Vec3i) -> bool {
        p.x >= self.origin.x
            && p.x < self.origin.x + self.size.x.max(0)
            && p.y >= self.origin.y
            && p.y < self.origin.y + self.size.y.max(0)
            && p.z >= self.origin.z
            && p.z < self.origin.z + self.size.z.max(0)
    }
}

/// Vertical order in which a region's y-layers are visited.
///
/// `Downward` serves operations that must remove upper blocks before their
/// support; `Upward` is the plain bottom-up order for general passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraversalOrder {
    Upward,
    Downward,
}

impl TraversalOrder {
    /// Lazy iterator over every position in `region`, each exactly once.
    /// Calling this twice yields two independent sequences.
    #[inline]
    pub fn iter(self, region: Region) -> RegionIter {
        RegionIter {
            region,
            order: self,
            next: 0,
            total: region.block_count(),
        }
    }

    /// Position the iterator would yield at `index`, without iterating.
    ///
    /// Parked tasks resume from a saved cursor index through this mapping
    /// instead of re-running any prefix of the sequence.
    pub fn position_at(self, region: Region, index: u64) -> Option<Vec3i> {
        if index >= region.block_count() {
            return None;
        }
        let sx = region.size.x as u64;
        let sz = region.size.z as u64;
        let layer_area = sx * sz;
        let layer = (index / layer_area) as i32;
        let rem = index % layer_area;
        let y = match self {
            TraversalOrder::Upward => region.origin.y + layer,
            TraversalOrder::Downward => region.origin.y + region.size.y - 1 - layer,
        };
        let x = region.origin.x + (rem % sx) as i32;
        let z = region.origin.z + (rem / sx) as i32;
        Some(Vec3i::new(x, y, z))
    }
}

pub struct RegionIter {
    region: Region,
    order: TraversalOrder,
    next: u64,
    total: u64,
}

impl Iterator for RegionIter {
    type Item = Vec3i;

    fn next(&mut self) -> Option<Vec3i> {
        if self.next >= self.total {
            return None;
        }
        let pos = self.order.position_at(self.region, self.next);
        self.next += 1;
        pos
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.total - self.next).min(usize::MAX as u64) as usize;
        (left, Some(left))
    }
}
