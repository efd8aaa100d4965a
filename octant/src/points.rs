//! Immutable point sets
use crate::{Error, cell::CellBounds};
use nalgebra::Vector3;

/// An immutable collection of 3D points, with a precomputed bounding box
///
/// Points are identified by their index, which is stable for the lifetime of
/// the set.
#[derive(Clone, Debug)]
pub struct PointSet {
    points: Vec<Vector3<f32>>,
    bounds: CellBounds,
}

impl PointSet {
    /// Builds a new point set, computing its bounding box
    ///
    /// An empty input is allowed, and has a degenerate box at the origin.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if any coordinate is not finite
    pub fn new(points: Vec<Vector3<f32>>) -> Result<Self, Error> {
        if points.iter().any(|p| p.iter().any(|v| !v.is_finite())) {
            return Err(Error::InvalidArgument(
                "point coordinates must be finite",
            ));
        }
        let bounds = match points.split_first() {
            None => CellBounds::point(Vector3::zeros()),
            Some((first, rest)) => {
                let (lo, hi) =
                    rest.iter().fold((*first, *first), |(lo, hi), p| {
                        (lo.inf(p), hi.sup(p))
                    });
                CellBounds::from_corners(lo, hi)
            }
        };
        Ok(Self { points, bounds })
    }

    /// Returns the number of points in the set
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the tight bounding box of every point in the set
    pub fn bounds(&self) -> CellBounds {
        self.bounds
    }

    pub fn points(&self) -> &[Vector3<f32>] {
        &self.points
    }

    /// Rejects an empty point set
    ///
    /// Building an octree from an empty set is valid; this is for callers
    /// which would rather treat it as an error.
    pub fn require_non_empty(self) -> Result<Self, Error> {
        if self.is_empty() {
            Err(Error::EmptyInput)
        } else {
            Ok(self)
        }
    }
}

impl std::ops::Index<usize> for PointSet {
    type Output = Vector3<f32>;
    fn index(&self, i: usize) -> &Self::Output {
        &self.points[i]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        Interval,
        types::{X, Y, Z},
    };

    #[test]
    fn test_bounds() {
        let pts = PointSet::new(vec![
            Vector3::new(1.0, -2.0, 0.5),
            Vector3::new(-1.0, 3.0, 0.0),
            Vector3::new(0.0, 0.0, 4.0),
        ])
        .unwrap();
        let b = pts.bounds();
        assert_eq!(b[X], Interval::new(-1.0, 1.0));
        assert_eq!(b[Y], Interval::new(-2.0, 3.0));
        assert_eq!(b[Z], Interval::new(0.0, 4.0));
        for p in pts.points() {
            assert!(b.contains(p));
        }
        assert_eq!(pts.len(), 3);
        assert_eq!(pts[2], Vector3::new(0.0, 0.0, 4.0));
    }

    #[test]
    fn test_empty() {
        let pts = PointSet::new(vec![]).unwrap();
        assert!(pts.is_empty());
        assert_eq!(pts.bounds().volume(), 0.0);
        assert!(matches!(pts.require_non_empty(), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_non_finite() {
        let r = PointSet::new(vec![Vector3::new(0.0, f32::NAN, 0.0)]);
        assert!(matches!(r, Err(Error::InvalidArgument(..))));
        let r = PointSet::new(vec![Vector3::new(f32::INFINITY, 0.0, 0.0)]);
        assert!(matches!(r, Err(Error::InvalidArgument(..))));
    }
}
