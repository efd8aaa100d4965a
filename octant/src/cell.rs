//! Octree cells
use crate::{
    Interval,
    types::{Axis, Corner, X, Y, Z},
};
use nalgebra::Vector3;

/// Contiguous range of point slots owned by a cell
///
/// Offsets point into the octree's permuted index buffer, not directly into
/// the [`PointSet`](crate::PointSet).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }
    /// Number of points in the span
    pub fn len(&self) -> usize {
        self.end - self.start
    }
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// Stored cell data
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Cell {
    /// Placeholder for a cell slot which has been allocated but not built
    Invalid,
    /// Unsplit cell
    Leaf(Span),
    /// Split cell, whose 8 children are stored contiguously starting at
    /// `index`, in [`Corner`] order
    Branch { index: usize, span: Span },
}

impl Cell {
    /// Returns the points owned by this cell (including its descendants)
    pub fn span(&self) -> Span {
        match self {
            Cell::Leaf(span) | Cell::Branch { span, .. } => *span,
            Cell::Invalid => Span::default(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Axis-aligned box, stored as one [`Interval`] per axis
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CellBounds {
    pub bounds: [Interval; 3],
}

impl std::ops::Index<Axis> for CellBounds {
    type Output = Interval;

    fn index(&self, axis: Axis) -> &Self::Output {
        &self.bounds[axis.index()]
    }
}

impl CellBounds {
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        Self { bounds: [x, y, z] }
    }

    /// Builds a zero-volume box located at the given point
    pub fn point(p: Vector3<f32>) -> Self {
        Self::new(p.x.into(), p.y.into(), p.z.into())
    }

    /// Builds the smallest box containing the two corners
    pub fn from_corners(a: Vector3<f32>, b: Vector3<f32>) -> Self {
        let lo = a.inf(&b);
        let hi = a.sup(&b);
        Self::new(
            Interval::new(lo.x, hi.x),
            Interval::new(lo.y, hi.y),
            Interval::new(lo.z, hi.z),
        )
    }

    /// Lower corner of the box
    pub fn min(&self) -> Vector3<f32> {
        Vector3::new(self[X].lower(), self[Y].lower(), self[Z].lower())
    }

    /// Upper corner of the box
    pub fn max(&self) -> Vector3<f32> {
        Vector3::new(self[X].upper(), self[Y].upper(), self[Z].upper())
    }

    pub fn center(&self) -> Vector3<f32> {
        Vector3::new(self[X].midpoint(), self[Y].midpoint(), self[Z].midpoint())
    }

    pub fn volume(&self) -> f32 {
        self.bounds.iter().map(|i| i.width()).product()
    }

    /// Checks whether the given position is within the (closed) box
    pub fn contains(&self, p: &Vector3<f32>) -> bool {
        Axis::array()
            .into_iter()
            .all(|axis| self[axis].contains(p[axis.index()]))
    }

    /// Grows the box into a cube with the same center
    ///
    /// The cube's edge is the longest edge of the original box, clamped to the
    /// finite `f32` range.
    pub fn cubic(self) -> Self {
        let h = self
            .bounds
            .iter()
            .map(|i| i.half_width())
            .fold(0.0, f32::max);
        Self {
            bounds: self.bounds.map(|i| i.grow(h)),
        }
    }

    /// Returns the bounds of the given child
    pub fn child(&self, corner: Corner) -> Self {
        let bounds = Axis::array().map(|axis| {
            let (lo, hi) = self[axis].split();
            if corner & axis { hi } else { lo }
        });
        Self { bounds }
    }

    /// Returns the position of the given corner
    pub fn corner(&self, corner: Corner) -> Vector3<f32> {
        let [x, y, z] = Axis::array().map(|axis| {
            if corner & axis {
                self[axis].upper()
            } else {
                self[axis].lower()
            }
        });
        Vector3::new(x, y, z)
    }

    /// Returns the child octant which owns the given position
    ///
    /// A coordinate that lies exactly on the midpoint belongs to the upper
    /// half along that axis, so every point has exactly one owner.
    pub fn octant(&self, p: &Vector3<f32>) -> Corner {
        Axis::array()
            .into_iter()
            .fold(Corner::new(0), |acc, axis| {
                acc | axis * (p[axis.index()] >= self[axis].midpoint())
            })
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Cell index used during iteration
///
/// Instead of storing the cell bounds in the cell itself, we build them when
/// descending the tree.
///
/// `index` points to where this cell is stored in the octree's cell array
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CellIndex {
    pub index: usize,
    pub depth: usize,
    pub bounds: CellBounds,
}

impl CellIndex {
    /// Builds the root cell index for the given bounds
    pub fn root(bounds: CellBounds) -> Self {
        Self {
            index: 0,
            depth: 0,
            bounds,
        }
    }

    /// Returns a child cell for the given corner, rooted at the given index
    pub fn child(&self, index: usize, i: Corner) -> Self {
        let bounds = self.bounds.child(i);
        CellIndex {
            index: index + i.index(),
            bounds,
            depth: self.depth + 1,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    fn unit() -> CellBounds {
        CellBounds::new(
            Interval::new(0.0, 2.0),
            Interval::new(0.0, 2.0),
            Interval::new(0.0, 2.0),
        )
    }

    #[test]
    fn test_octant_tie_break() {
        let b = unit();
        let c = b.octant(&Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(c.index(), 7);
        let c = b.octant(&Vector3::new(0.999, 1.0, 0.0));
        assert_eq!(c, Y.into());
        let c = b.octant(&Vector3::new(2.0, 0.0, 2.0));
        assert_eq!(c, X | Z);
    }

    #[test]
    fn test_child_owns_octant() {
        let b = unit();
        for i in Corner::iter() {
            let child = b.child(i);
            assert_eq!(b.octant(&child.center()), i);
            assert_relative_eq!(child.volume(), b.volume() / 8.0);
        }
    }

    #[test]
    fn test_cell_corner() {
        let b = unit();
        assert_eq!(b.corner(Corner::new(0)), Vector3::zeros());
        assert_eq!(b.corner(Corner::new(7)), Vector3::new(2.0, 2.0, 2.0));
        assert_eq!(b.corner(X | Z), Vector3::new(2.0, 0.0, 2.0));
    }

    #[test]
    fn test_cubic() {
        let b = CellBounds::new(
            Interval::new(0.0, 4.0),
            Interval::new(1.0, 2.0),
            Interval::from(-1.0),
        )
        .cubic();
        assert_eq!(b[X], Interval::new(0.0, 4.0));
        assert_eq!(b[Y], Interval::new(-0.5, 3.5));
        assert_eq!(b[Z], Interval::new(-3.0, 1.0));

        let p = CellBounds::point(Vector3::new(1.0, 2.0, 3.0)).cubic();
        assert_eq!(p.volume(), 0.0);
    }

    #[test]
    fn test_span() {
        let s = Span::new(3, 7);
        assert_eq!(s.len(), 4);
        assert!(!s.is_empty());
        assert_eq!(Cell::Leaf(s).span(), s);
        assert!(Cell::Invalid.span().is_empty());
    }
}
