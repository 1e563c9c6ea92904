//! Mock obstacle worlds for testing.
//!
//! Provides lightweight [`ObstacleQuery`] implementations that can be used in
//! any crate's test suite or installed into an
//! [`ObstacleMap`](wyrm_follow::plugin::ObstacleMap).

use wyrm_follow::obstacle::{BlockPos, ObstacleQuery};

// ---------------------------------------------------------------------------
// SolidBelow
// ---------------------------------------------------------------------------

/// Flat ground: every cell with `y < floor_y` is solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolidBelow {
    pub floor_y: i32,
}

impl SolidBelow {
    pub const fn new(floor_y: i32) -> Self {
        Self { floor_y }
    }
}

impl ObstacleQuery for SolidBelow {
    fn is_solid(&self, cell: BlockPos) -> bool {
        cell.y < self.floor_y
    }
}

// ---------------------------------------------------------------------------
// SolidEverywhere
// ---------------------------------------------------------------------------

/// Every cell is solid, so no joint can ever escape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolidEverywhere;

impl ObstacleQuery for SolidEverywhere {
    fn is_solid(&self, _cell: BlockPos) -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// Wall
// ---------------------------------------------------------------------------

/// Infinite slab of solid cells with `x` in `min_x..=max_x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wall {
    pub min_x: i32,
    pub max_x: i32,
}

impl Wall {
    pub const fn new(min_x: i32, max_x: i32) -> Self {
        Self { min_x, max_x }
    }
}

impl ObstacleQuery for Wall {
    fn is_solid(&self, cell: BlockPos) -> bool {
        (self.min_x..=self.max_x).contains(&cell.x)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
