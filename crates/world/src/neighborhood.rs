//! 3×3 horizontal block neighbourhood around a clicked block.

use crate::block::BlockState;
use autoharvest_core::BlockPos;
use serde::{Deserialize, Serialize};

/// Offsets `(dx, dz)` in processing order: `dx` outer, `dz` inner.
pub const OFFSETS: [(i32, i32); 9] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 0),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Snapshot of the 9 blocks on the clicked block's layer.
///
/// Cells are stored row-major in the same order as [`OFFSETS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighborhood {
    center: BlockPos,
    cells: [BlockState; 9],
}

fn index(dx: i32, dz: i32) -> Option<usize> {
    if !(-1..=1).contains(&dx) || !(-1..=1).contains(&dz) {
        return None;
    }
    usize::try_from((dx + 1) * 3 + (dz + 1)).ok()
}

impl Neighborhood {
    /// Neighbourhood of air around `center`.
    pub fn new(center: BlockPos) -> Self {
        Self {
            center,
            cells: [BlockState::AIR; 9],
        }
    }

    /// Build from cells already in [`OFFSETS`] order.
    pub fn from_cells(center: BlockPos, cells: [BlockState; 9]) -> Self {
        Self { center, cells }
    }

    /// Position of the clicked block.
    pub fn center(&self) -> BlockPos {
        self.center
    }

    /// State of the clicked block.
    pub fn center_state(&self) -> &BlockState {
        &self.cells[4]
    }

    /// State at `(dx, dz)`, or `None` outside the 3×3 area.
    pub fn get(&self, dx: i32, dz: i32) -> Option<&BlockState> {
        self.cells.get(index(dx, dz)?)
    }

    /// Replace the state at `(dx, dz)`. Returns false outside the 3×3 area.
    pub fn set(&mut self, dx: i32, dz: i32, state: BlockState) -> bool {
        match index(dx, dz).and_then(|i| self.cells.get_mut(i)) {
            Some(cell) => {
                *cell = state;
                true
            }
            None => false,
        }
    }

    /// World position of the cell at `(dx, dz)`.
    pub fn position(&self, dx: i32, dz: i32) -> BlockPos {
        self.center.offset(dx, 0, dz)
    }

    /// Cells with their offsets, in processing order.
    pub fn iter(&self) -> impl Iterator<Item = ((i32, i32), &BlockState)> {
        OFFSETS.into_iter().zip(self.cells.iter())
    }

    /// Cells in processing order.
    pub fn cells(&self) -> &[BlockState; 9] {
        &self.cells
    }
}
