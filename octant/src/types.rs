//! Strongly-typed axes and octant corners
//!
//! Octree children are numbered by their corner, with one bit per axis; a set
//! bit selects the upper half of the parent along that axis.

/// A single axis, represented as a `u8` with one of its low 3 bits set
///
/// The only values are the [`X`], [`Y`], and [`Z`] constants.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Axis(u8);

impl Axis {
    /// Converts from a bitmask to an index
    pub fn index(self) -> usize {
        self.0.trailing_zeros() as usize
    }

    /// Returns all three axes, in `X, Y, Z` order
    pub const fn array() -> [Axis; 3] {
        [X, Y, Z]
    }
}

/// The X axis, i.e. `[1, 0, 0]`
pub const X: Axis = Axis(1);
/// The Y axis, i.e. `[0, 1, 0]`
pub const Y: Axis = Axis(2);
/// The Z axis, i.e. `[0, 0, 1]`
pub const Z: Axis = Axis(4);

impl std::ops::Mul<bool> for Axis {
    type Output = Corner;
    fn mul(self, rhs: bool) -> Corner {
        if rhs { Corner(self.0) } else { Corner(0) }
    }
}

impl std::ops::BitAnd<Corner> for Axis {
    type Output = bool;
    fn bitand(self, rhs: Corner) -> bool {
        (self.0 & rhs.0) != 0
    }
}

impl std::ops::BitOr<Axis> for Axis {
    type Output = Corner;
    fn bitor(self, rhs: Axis) -> Corner {
        Corner(self.0 | rhs.0)
    }
}

impl std::ops::BitOr<Corner> for Axis {
    type Output = Corner;
    fn bitor(self, rhs: Corner) -> Corner {
        Corner(self.0 | rhs.0)
    }
}

impl From<Axis> for Corner {
    fn from(a: Axis) -> Self {
        Corner(a.0)
    }
}

/// Strongly-typed cell corner (and child octant), in the `[0, 8)` range
///
/// Corners are numbered as follows:
///
/// ```text
///         6 -------- 7
///        /          /       Z
///       / |        / |      ^  _ Y
///      4----------5  |      | /
///      |  |       |  |      |/
///      |  2-------|--3      ---> X
///      | /        | /
///      |/         |/
///      0----------1
/// ```
///
/// The 8 children of a cell are numbered equivalently, based on the corner of
/// the parent that they touch.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Corner(u8);

impl Corner {
    /// Builds a new corner
    ///
    /// # Panics
    /// If `i >= 8`, which is not a valid corner index
    pub const fn new(i: u8) -> Self {
        assert!(i < 8);
        Self(i)
    }
    /// Returns the value of this corner as an index
    pub fn index(self) -> usize {
        self.0 as usize
    }
    /// Iterates over all 8 corners
    pub fn iter() -> impl Iterator<Item = Self> {
        (0..8).map(Corner)
    }
}

impl std::ops::BitAnd<Axis> for Corner {
    type Output = bool;
    fn bitand(self, rhs: Axis) -> bool {
        (self.0 & rhs.0) != 0
    }
}

impl std::ops::BitOr<Corner> for Corner {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Corner(self.0 | rhs.0)
    }
}

impl std::ops::BitOr<Axis> for Corner {
    type Output = Self;
    fn bitor(self, rhs: Axis) -> Self {
        Corner(self.0 | rhs.0)
    }
}
