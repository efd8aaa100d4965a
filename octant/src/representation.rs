//! Level-of-detail representations of an octree
use crate::{
    Octree,
    cell::{CellBounds, CellIndex},
    types::{Axis, Corner},
};
use log::debug;
use nalgebra::Vector3;

/// Boxes for every cell exposed when cutting an octree at a given depth
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Representation {
    /// Level of the cut, clamped to the octree's maximum depth
    pub level: usize,
    /// Bounds of each exposed cell, in depth-first order
    pub boxes: Vec<CellBounds>,
    /// Number of points within each exposed cell
    pub counts: Vec<usize>,
}

impl Representation {
    /// Returns the number of boxes
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Converts the boxes into line segments
    ///
    /// Each box contributes 8 vertices (in [`Corner`] order) and the 12 edges
    /// of its cube.
    pub fn wireframe(&self) -> Wireframe {
        let mut out = Wireframe {
            vertices: Vec::with_capacity(self.boxes.len() * 8),
            lines: Vec::with_capacity(self.boxes.len() * 12),
        };
        for b in &self.boxes {
            let base = out.vertices.len();
            out.vertices.extend(Corner::iter().map(|c| b.corner(c)));
            for c in Corner::iter() {
                for axis in Axis::array() {
                    if !(c & axis) {
                        let a = base + c.index();
                        out.lines.push([a, base + (c | axis).index()]);
                    }
                }
            }
        }
        out
    }
}

/// A set of line segments, stored as indexed vertices
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Wireframe {
    /// Vertex positions
    pub vertices: Vec<Vector3<f32>>,
    /// Line segments, as pairs of indexes into
    /// [`self.vertices`](Self::vertices)
    pub lines: Vec<[usize; 2]>,
}

impl Octree {
    /// Builds the representation of this tree at the given level
    ///
    /// Every cell at depth `level` is exposed, along with every leaf above
    /// that depth.  Levels past [`Octree::max_depth`] expose all leafs, and
    /// level 0 is the root cell alone.
    pub fn representation(&self, level: usize) -> Representation {
        let mut out = Representation {
            level: level.min(self.max_depth()),
            ..Default::default()
        };
        self.collect(self.root(), level, &mut out);
        debug!(
            "generated {} boxes at level {} (requested {level})",
            out.len(),
            out.level
        );
        out
    }

    fn collect(
        &self,
        cell: CellIndex,
        level: usize,
        out: &mut Representation,
    ) {
        match self.children(cell) {
            Some(children) if cell.depth < level => {
                for c in children {
                    self.collect(c, level, out);
                }
            }
            _ => {
                out.boxes.push(cell.bounds);
                out.counts.push(self.points(cell).len());
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{PointSet, Settings};
    use rand::{Rng, SeedableRng};

    fn octree(n: usize, max_points: usize) -> (PointSet, Octree) {
        let mut rng = rand::rngs::StdRng::seed_from_u64(n as u64);
        let pts = PointSet::new(
            (0..n)
                .map(|_| {
                    Vector3::new(
                        rng.gen_range(0.0..10.0),
                        rng.gen_range(0.0..10.0),
                        rng.r#gen::<f32>().powi(3),
                    )
                })
                .collect(),
        )
        .unwrap();
        let settings = Settings {
            max_points,
            ..Default::default()
        };
        let o = Octree::build(&pts, settings).unwrap();
        (pts, o)
    }

    #[test]
    fn test_level_zero_is_root() {
        for n in [0, 1, 10, 1000] {
            let (_pts, o) = octree(n, 5);
            let r = o.representation(0);
            assert_eq!(r.boxes, vec![o.bounds()]);
            assert_eq!(r.counts, vec![n]);
            assert_eq!(r.level, 0);
        }
    }

    #[test]
    fn test_deep_levels_clamp() {
        let (_pts, o) = octree(2000, 3);
        let max = o.max_depth();
        assert!(max > 2);
        let full = o.representation(max);
        assert_eq!(full.len(), o.leaf_count());
        for level in [max + 1, max + 5, usize::MAX] {
            assert_eq!(o.representation(level), full);
        }
    }

    #[test]
    fn test_counts_cover_points() {
        let (pts, o) = octree(1500, 4);
        for level in 0..=o.max_depth() {
            let r = o.representation(level);
            assert_eq!(r.counts.iter().sum::<usize>(), pts.len());

            // Boxes are distinct cells, and tile the root
            let volume: f32 = r.boxes.iter().map(|b| b.volume()).sum();
            approx::assert_relative_eq!(
                volume,
                o.bounds().volume(),
                max_relative = 1e-4
            );
            let expected = o
                .iter()
                .filter(|c| {
                    c.depth == level || (c.depth < level && o.is_leaf(*c))
                })
                .count();
            assert_eq!(r.len(), expected);
        }
    }

    #[test]
    fn test_idempotent() {
        let (_pts, o) = octree(700, 2);
        for level in 0..=o.max_depth() + 1 {
            assert_eq!(o.representation(level), o.representation(level));
        }
    }

    #[test]
    fn test_empty_tree() {
        let (_pts, o) = octree(0, 5);
        for level in [0, 1, 10] {
            let r = o.representation(level);
            assert_eq!(r.len(), 1);
            assert_eq!(r.boxes[0].volume(), 0.0);
        }
    }

    #[test]
    fn test_wireframe() {
        let (_pts, o) = octree(100, 10);
        let r = o.representation(1);
        let w = r.wireframe();
        assert_eq!(w.vertices.len(), 8 * r.len());
        assert_eq!(w.lines.len(), 12 * r.len());

        // Every edge is axis-aligned and spans its box
        for (i, [a, b]) in w.lines.iter().enumerate() {
            let bounds = r.boxes[i / 12];
            let d = w.vertices[*b] - w.vertices[*a];
            let nonzero = d.iter().filter(|v| **v != 0.0).count();
            assert!(nonzero <= 1);
            assert!(d.iter().all(|v| *v >= 0.0));
            assert!(bounds.contains(&w.vertices[*a]));
            assert!(bounds.contains(&w.vertices[*b]));
        }
    }
}
