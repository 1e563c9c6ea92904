//! Block-granular obstacle queries and single-step escape.
//!
//! The solver never sees the host's world representation. It only asks an
//! [`ObstacleQuery`] whether a unit cell is solid, and [`adjust`] moves a
//! joint that landed inside a solid cell into the first open face
//! neighbour, checked in the fixed [`Face::ALL`] order.

use std::collections::HashSet;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Distance from the neighbour's centre back towards the blocked cell.
///
/// Leaves the escaped point just inside the shared face rather than on it.
pub const ESCAPE_INSET: f64 = 0.49;

// ---------------------------------------------------------------------------
// BlockPos
// ---------------------------------------------------------------------------

/// Integer coordinates of a unit cell. Cell `(x, y, z)` spans
/// `[x, x+1) × [y, y+1) × [z, z+1)`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Cell containing `p` (component-wise floor).
    #[allow(clippy::cast_possible_truncation)]
    pub fn containing(p: &Vector3<f64>) -> Self {
        Self {
            x: p.x.floor() as i32,
            y: p.y.floor() as i32,
            z: p.z.floor() as i32,
        }
    }

    /// Neighbouring cell across `face`.
    #[must_use]
    pub const fn offset(self, face: Face) -> Self {
        let [dx, dy, dz] = face.offset();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            z: self.z.saturating_add(dz),
        }
    }

    /// World-space centre of the cell.
    pub fn center(self) -> Vector3<f64> {
        Vector3::new(
            f64::from(self.x) + 0.5,
            f64::from(self.y) + 0.5,
            f64::from(self.z) + 0.5,
        )
    }
}

// ---------------------------------------------------------------------------
// Face
// ---------------------------------------------------------------------------

/// One of the six axis-aligned neighbours of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Face {
    /// -Y
    Down,
    /// +Y
    Up,
    /// -Z
    North,
    /// +Z
    South,
    /// -X
    West,
    /// +X
    East,
}

impl Face {
    /// Search order used by [`adjust`]. Fixed so every peer resolves the
    /// same escape.
    pub const ALL: [Self; 6] = [
        Self::Down,
        Self::Up,
        Self::North,
        Self::South,
        Self::West,
        Self::East,
    ];

    /// Unit step towards the neighbour.
    pub const fn offset(self) -> [i32; 3] {
        match self {
            Self::Down => [0, -1, 0],
            Self::Up => [0, 1, 0],
            Self::North => [0, 0, -1],
            Self::South => [0, 0, 1],
            Self::West => [-1, 0, 0],
            Self::East => [1, 0, 0],
        }
    }

    pub fn vector(self) -> Vector3<f64> {
        let [x, y, z] = self.offset();
        Vector3::new(f64::from(x), f64::from(y), f64::from(z))
    }
}

// ---------------------------------------------------------------------------
// ObstacleQuery
// ---------------------------------------------------------------------------

/// Read-only view of which cells are solid.
///
/// Implementations must answer within the tick and must be deterministic
/// for a given world snapshot.
pub trait ObstacleQuery {
    /// Whether `cell` blocks chain joints.
    fn is_solid(&self, cell: BlockPos) -> bool;

    /// First face (in [`Face::ALL`] order) whose neighbour is open.
    fn first_open_neighbor(&self, cell: BlockPos) -> Option<Face> {
        Face::ALL
            .into_iter()
            .find(|&face| !self.is_solid(cell.offset(face)))
    }
}

impl<F> ObstacleQuery for F
where
    F: Fn(BlockPos) -> bool,
{
    fn is_solid(&self, cell: BlockPos) -> bool {
        self(cell)
    }
}

/// Move `point` out of a solid cell, best effort.
///
/// Returns `point` unchanged if its cell is open or if all six neighbours
/// are solid. Otherwise returns the centre of the first open neighbour,
/// pulled [`ESCAPE_INSET`] back towards the blocked cell.
pub fn adjust<Q>(point: Vector3<f64>, query: &Q) -> Vector3<f64>
where
    Q: ObstacleQuery + ?Sized,
{
    let cell = BlockPos::containing(&point);
    if !query.is_solid(cell) {
        return point;
    }
    match query.first_open_neighbor(cell) {
        Some(face) => cell.offset(face).center() - face.vector() * ESCAPE_INSET,
        None => point,
    }
}

// ---------------------------------------------------------------------------
// Adapters
// ---------------------------------------------------------------------------

/// Empty world: nothing is ever solid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoObstacles;

impl ObstacleQuery for NoObstacles {
    fn is_solid(&self, _cell: BlockPos) -> bool {
        false
    }
}

/// Sparse set of solid cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockSet {
    solid: HashSet<BlockPos>,
}

impl BlockSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `cell` solid. Returns `false` if it already was.
    pub fn insert(&mut self, cell: BlockPos) -> bool {
        self.solid.insert(cell)
    }

    /// Clear `cell`. Returns `false` if it was not solid.
    pub fn remove(&mut self, cell: BlockPos) -> bool {
        self.solid.remove(&cell)
    }

    /// Mark every cell in the inclusive box `min..=max` solid.
    pub fn fill(&mut self, min: BlockPos, max: BlockPos) {
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    self.solid.insert(BlockPos::new(x, y, z));
                }
            }
        }
    }

    pub fn contains(&self, cell: BlockPos) -> bool {
        self.solid.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.solid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solid.is_empty()
    }
}

impl FromIterator<BlockPos> for BlockSet {
    fn from_iter<I: IntoIterator<Item = BlockPos>>(iter: I) -> Self {
        Self {
            solid: iter.into_iter().collect(),
        }
    }
}

impl ObstacleQuery for BlockSet {
    fn is_solid(&self, cell: BlockPos) -> bool {
        self.solid.contains(&cell)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use approx::assert_relative_eq;

    use super::*;

    /// Cell (0,0,0) and every neighbour solid except `open`.
    fn pocket(open: Face) -> BlockSet {
        let origin = BlockPos::default();
        let mut set = BlockSet::new();
        set.insert(origin);
        for face in Face::ALL {
            if face != open {
                set.insert(origin.offset(face));
            }
        }
        set
    }

    #[test]
    fn containing_floors_negative_coordinates() {
        let p = Vector3::new(-0.5, 1.999, -3.0);
        assert_eq!(BlockPos::containing(&p), BlockPos::new(-1, 1, -3));
    }

    #[test]
    fn center_is_half_offset() {
        let c = BlockPos::new(2, -1, 0).center();
        assert_relative_eq!(c.x, 2.5);
        assert_relative_eq!(c.y, -0.5);
        assert_relative_eq!(c.z, 0.5);
    }

    #[test]
    fn face_offsets_are_unit_and_opposed() {
        let mut sum = [0; 3];
        for face in Face::ALL {
            let o = face.offset();
            assert_eq!(o.iter().map(|c| c.abs()).sum::<i32>(), 1);
            for (s, c) in sum.iter_mut().zip(o) {
                *s += c;
            }
        }
        assert_eq!(sum, [0, 0, 0]);
    }

    #[test]
    fn open_point_is_unchanged() {
        let p = Vector3::new(0.3, 0.7, 0.1);
        assert_eq!(adjust(p, &NoObstacles), p);
    }

    #[test]
    fn escapes_through_only_open_face() {
        let p = Vector3::new(0.25, 0.5, 0.75);
        for open in Face::ALL {
            let q = adjust(p, &pocket(open));
            let target = BlockPos::default().offset(open);
            assert_eq!(BlockPos::containing(&q), target, "open face {open:?}");
            let expected = target.center() - open.vector() * ESCAPE_INSET;
            assert_relative_eq!(q.x, expected.x, epsilon = 1e-12);
            assert_relative_eq!(q.y, expected.y, epsilon = 1e-12);
            assert_relative_eq!(q.z, expected.z, epsilon = 1e-12);
        }
    }

    #[test]
    fn escape_sits_just_inside_shared_face() {
        let q = adjust(Vector3::new(0.5, 0.5, 0.5), &pocket(Face::Up));
        assert_relative_eq!(q.y, 1.01, epsilon = 1e-12);
        assert_relative_eq!(q.x, 0.5);
        assert_relative_eq!(q.z, 0.5);
    }

    #[test]
    fn first_face_in_order_wins() {
        // Only the blocked cell is solid: Down is checked first.
        let set: BlockSet = [BlockPos::default()].into_iter().collect();
        assert_eq!(set.first_open_neighbor(BlockPos::default()), Some(Face::Down));
        let q = adjust(Vector3::new(0.5, 0.5, 0.5), &set);
        assert_eq!(BlockPos::containing(&q), BlockPos::new(0, -1, 0));
    }

    #[test]
    fn enclosed_point_is_unchanged() {
        let mut set = BlockSet::new();
        set.fill(BlockPos::new(-1, -1, -1), BlockPos::new(1, 1, 1));
        assert_eq!(set.len(), 27);
        let p = Vector3::new(0.5, 0.5, 0.5);
        assert_eq!(adjust(p, &set), p);
    }

    #[test]
    fn closure_adapter() {
        let below_zero = |cell: BlockPos| cell.y < 0;
        let q = adjust(Vector3::new(0.5, -0.5, 0.5), &below_zero);
        assert_eq!(BlockPos::containing(&q), BlockPos::new(0, 0, 0));
    }

    #[test]
    fn dyn_query_is_accepted() {
        let set = pocket(Face::East);
        let query: &dyn ObstacleQuery = &set;
        let q = adjust(Vector3::new(0.5, 0.5, 0.5), query);
        assert_eq!(BlockPos::containing(&q), BlockPos::new(1, 0, 0));
    }

    #[test]
    fn at_most_seven_queries_per_adjust() {
        let calls = Cell::new(0_u32);
        let all_solid = |_cell: BlockPos| {
            calls.set(calls.get() + 1);
            true
        };
        let _ = adjust(Vector3::new(0.5, 0.5, 0.5), &all_solid);
        assert_eq!(calls.get(), 7);
    }

    #[test]
    fn block_set_insert_remove() {
        let mut set = BlockSet::new();
        assert!(set.is_empty());
        assert!(set.insert(BlockPos::new(1, 2, 3)));
        assert!(!set.insert(BlockPos::new(1, 2, 3)));
        assert!(set.contains(BlockPos::new(1, 2, 3)));
        assert!(set.remove(BlockPos::new(1, 2, 3)));
        assert!(!set.remove(BlockPos::new(1, 2, 3)));
    }
}
