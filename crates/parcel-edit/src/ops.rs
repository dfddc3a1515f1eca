use std::sync::{Arc, Mutex};

use parcel_blocks::Block;
use parcel_geom::{Region, TraversalOrder, Vec3i};
use parcel_runtime::{Scheduler, TaskError, UnitTask, Worker};
use parcel_world::{ParcelGrid, ParcelId};

use crate::store::BlockSink;

/// Blocks drawn at the three marker positions of an owned parcel. What they
/// look like is the caller's policy; this layer only places them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OwnerMarker {
    pub post: Block,
    pub plate: Block,
    pub head: Block,
}

/// Builds the bulk mutation tasks for single parcels and submits them to a
/// scheduler. Every operation derives its footprint from the same
/// bottom-corner mapping the locator uses, so a task for a parcel touches
/// exactly that parcel's columns.
pub struct ParcelOps<S: BlockSink> {
    grid: Arc<ParcelGrid>,
    sink: Arc<Mutex<S>>,
}

impl<S: BlockSink + 'static> ParcelOps<S> {
    pub fn new(grid: Arc<ParcelGrid>, sink: Arc<Mutex<S>>) -> Self {
        Self { grid, sink }
    }

    #[inline]
    pub fn grid(&self) -> &Arc<ParcelGrid> {
        &self.grid
    }

    /// The parcel's footprint from the world floor to the maximum height.
    pub fn footprint(&self, parcel: ParcelId) -> Region {
        let bottom = self.grid.bottom_corner(parcel);
        let ps = self.grid.layout().parcel_size;
        Region::new(
            Vec3i::new(bottom.x, 0, bottom.z),
            Vec3i::new(ps, self.grid.max_height() + 1, ps),
        )
    }

    /// Reset a parcel to its generated state: air above the floor, floor
    /// material at floor height, fill below.
    ///
    /// Traversed top-down so no block loses its support before it is
    /// removed.
    pub fn clear(&self, scheduler: &mut Scheduler, parcel: ParcelId) -> Worker {
        let palette = self.grid.palette();
        scheduler.submit(ClearTask {
            sink: Arc::clone(&self.sink),
            region: self.footprint(parcel),
            floor_height: self.grid.layout().floor_height,
            floor: palette.floor,
            fill: palette.fill,
        })
    }

    /// Repaint the surface covering of every column in the parcel.
    pub fn paint_surface(
        &self,
        scheduler: &mut Scheduler,
        parcel: ParcelId,
        material: Block,
    ) -> Worker {
        let bottom = self.grid.bottom_corner(parcel);
        scheduler.submit(PaintSurfaceTask {
            sink: Arc::clone(&self.sink),
            corner_x: bottom.x,
            corner_z: bottom.z,
            parcel_size: self.grid.layout().parcel_size,
            material,
        })
    }

    /// Run an arbitrary per-position operation over the parcel's volume in
    /// the caller's chosen vertical order.
    pub fn run_operation<F>(
        &self,
        scheduler: &mut Scheduler,
        parcel: ParcelId,
        order: TraversalOrder,
        op: F,
    ) -> Worker
    where
        F: FnMut(Vec3i, &mut S) -> Result<(), TaskError> + Send + 'static,
    {
        scheduler.submit(OperationTask {
            sink: Arc::clone(&self.sink),
            region: self.footprint(parcel),
            order,
            op,
        })
    }

    /// Draw or erase the three-position ownership marker next to the
    /// parcel's bottom corner. Three writes, applied directly rather than
    /// through the scheduler.
    pub fn set_owner_marker(
        &self,
        parcel: ParcelId,
        marker: Option<&OwnerMarker>,
    ) -> Result<(), TaskError> {
        let bottom = self.grid.bottom_corner(parcel);
        let fh = self.grid.layout().floor_height;
        let post = Vec3i::new(bottom.x - 1, fh + 1, bottom.z - 1);
        let plate = Vec3i::new(bottom.x - 2, fh + 1, bottom.z - 1);
        let head = Vec3i::new(bottom.x - 1, fh + 2, bottom.z - 1);

        let mut sink = lock_sink(&self.sink)?;
        match marker {
            Some(m) => {
                sink.set_block(post, m.post);
                sink.set_block(plate, m.plate);
                sink.set_block(head, m.head);
            }
            None => {
                sink.set_block(post, self.grid.palette().wall);
                sink.set_block(plate, Block::AIR);
                sink.set_block(head, Block::AIR);
            }
        }
        Ok(())
    }
}

fn lock_sink<S>(sink: &Arc<Mutex<S>>) -> Result<std::sync::MutexGuard<'_, S>, TaskError> {
    sink.lock()
        .map_err(|_| TaskError::new("world storage lock poisoned"))
}

struct ClearTask<S: BlockSink> {
    sink: Arc<Mutex<S>>,
    region: Region,
    floor_height: i32,
    floor: Block,
    fill: Block,
}

impl<S: BlockSink> UnitTask for ClearTask<S> {
    fn unit_count(&self) -> u64 {
        self.region.block_count()
    }

    fn run_unit(&mut self, index: u64) -> Result<(), TaskError> {
        let pos = TraversalOrder::Downward
            .position_at(self.region, index)
            .ok_or_else(|| TaskError::new("traversal cursor out of range"))?;
        let block = if pos.y > self.floor_height {
            Block::AIR
        } else if pos.y == self.floor_height {
            self.floor
        } else {
            self.fill
        };
        lock_sink(&self.sink)?.set_block(pos, block);
        Ok(())
    }
}

struct PaintSurfaceTask<S: BlockSink> {
    sink: Arc<Mutex<S>>,
    corner_x: i32,
    corner_z: i32,
    parcel_size: i32,
    material: Block,
}

impl<S: BlockSink> UnitTask for PaintSurfaceTask<S> {
    fn unit_count(&self) -> u64 {
        let ps = self.parcel_size as u64;
        ps * ps
    }

    fn run_unit(&mut self, index: u64) -> Result<(), TaskError> {
        let ps = self.parcel_size as u64;
        let wx = self.corner_x + (index % ps) as i32;
        let wz = self.corner_z + (index / ps) as i32;
        lock_sink(&self.sink)?.set_surface(wx, wz, self.material);
        Ok(())
    }
}

struct OperationTask<S: BlockSink, F> {
    sink: Arc<Mutex<S>>,
    region: Region,
    order: TraversalOrder,
    op: F,
}

impl<S, F> UnitTask for OperationTask<S, F>
where
    S: BlockSink,
    F: FnMut(Vec3i, &mut S) -> Result<(), TaskError> + Send,
{
    fn unit_count(&self) -> u64 {
        self.region.block_count()
    }

    fn run_unit(&mut self, index: u64) -> Result<(), TaskError> {
        let pos = self
            .order
            .position_at(self.region, index)
            .ok_or_else(|| TaskError::new("traversal cursor out of range"))?;
        let mut sink = lock_sink(&self.sink)?;
        (self.op)(pos, &mut sink)
    }
}
