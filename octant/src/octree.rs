//! A point-region octree over an immutable [`PointSet`]

use crate::{
    Error, PointSet,
    cell::{Cell, CellBounds, CellIndex, Span},
    types::Corner,
};
use log::debug;

/// Settings when building an octree
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Settings {
    /// Maximum number of points in an unsplit cell
    ///
    /// Cells holding more points than this are split, unless they are already
    /// at [`max_depth`](Self::max_depth).  Must be at least 1.
    pub max_points: usize,

    /// Maximum depth of the tree (the root is at depth 0)
    ///
    /// This bounds splitting when many points are clustered or duplicated.
    /// Must be no larger than [`Octree::MAX_DEPTH`].
    pub max_depth: u8,

    /// Expand the root cell into a cube around the point set's bounds
    ///
    /// Otherwise, the root cell is the tight bounding box of the points.
    pub cubic: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_points: 100,
            max_depth: 20,
            cubic: true,
        }
    }
}

impl Settings {
    /// Checks that these settings can be used to build an octree
    pub fn validate(&self) -> Result<(), Error> {
        if self.max_points == 0 {
            Err(Error::InvalidArgument("max_points must be at least 1"))
        } else if self.max_depth > Octree::MAX_DEPTH {
            Err(Error::InvalidArgument("max_depth exceeds Octree::MAX_DEPTH"))
        } else {
            Ok(())
        }
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Octree partitioning a point set into axis-aligned cells
///
/// Cells are stored in a flat array; the 8 children of a branch are
/// contiguous.  Each cell owns a contiguous range of a permuted index buffer,
/// so a branch's points are exactly the union of its children's points.
#[derive(Debug)]
pub struct Octree {
    cells: Vec<Cell>,

    /// Point indices, permuted so that every cell owns a contiguous range
    indices: Vec<usize>,

    /// Bounds of the root cell
    bounds: CellBounds,

    /// Deepest cell in the tree
    depth: usize,

    settings: Settings,
}

impl Octree {
    /// Hard limit on [`Settings::max_depth`]
    ///
    /// Beyond this depth, bisecting an `f32` interval stops producing distinct
    /// midpoints for typical coordinate ranges.
    pub const MAX_DEPTH: u8 = 24;

    /// Builds an octree over the given points
    ///
    /// An empty point set produces a single unsplit root with a degenerate
    /// box.
    ///
    /// ```
    /// use octant::{Octree, PointSet, Settings};
    /// use nalgebra::Vector3;
    ///
    /// let points = PointSet::new(
    ///     (0..64)
    ///         .map(|i| Vector3::new(i as f32, (i % 8) as f32, 0.0))
    ///         .collect(),
    /// )?;
    /// let settings = Settings { max_points: 4, ..Default::default() };
    /// let octree = Octree::build(&points, settings)?;
    /// assert_eq!(octree.point_count(), 64);
    /// assert!(octree.max_depth() > 0);
    /// # Ok::<(), octant::Error>(())
    /// ```
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if the settings are invalid; no
    /// cells are built in that case.
    pub fn build(points: &PointSet, settings: Settings) -> Result<Self, Error> {
        settings.validate()?;

        let bounds = if settings.cubic {
            points.bounds().cubic()
        } else {
            points.bounds()
        };
        let mut out = OctreeBuilder::new(points, bounds, settings);
        out.recurse(CellIndex::root(bounds), Span::new(0, points.len()));
        let out = Octree::from(out);

        debug!(
            "built octree over {} points: {} cells, {} leafs, depth {}",
            out.point_count(),
            out.cell_count(),
            out.leaf_count(),
            out.depth,
        );
        Ok(out)
    }

    /// Returns the root cell
    pub fn root(&self) -> CellIndex {
        CellIndex::root(self.bounds)
    }

    /// Returns the bounds of the root cell
    pub fn bounds(&self) -> CellBounds {
        self.bounds
    }

    /// Returns the depth of the deepest cell in the tree
    pub fn max_depth(&self) -> usize {
        self.depth
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Returns the total number of cells (branches and leafs)
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c, Cell::Leaf(..)))
            .count()
    }

    /// Returns the number of points stored in the tree
    pub fn point_count(&self) -> usize {
        self.indices.len()
    }

    pub fn is_leaf(&self, cell: CellIndex) -> bool {
        !matches!(self.cells[cell.index], Cell::Branch { .. })
    }

    /// Looks up the given child of a cell.
    ///
    /// If the cell is a leaf node, returns that cell instead.
    pub fn child<C: Into<Corner>>(
        &self,
        cell: CellIndex,
        child: C,
    ) -> CellIndex {
        match self.cells[cell.index] {
            Cell::Branch { index, .. } => cell.child(index, child.into()),
            Cell::Leaf(..) | Cell::Invalid => cell,
        }
    }

    /// Returns all 8 children of a cell, or `None` if it's a leaf
    pub fn children(&self, cell: CellIndex) -> Option<[CellIndex; 8]> {
        match self.cells[cell.index] {
            Cell::Branch { index, .. } => Some(std::array::from_fn(|i| {
                cell.child(index, Corner::new(i as u8))
            })),
            Cell::Leaf(..) | Cell::Invalid => None,
        }
    }

    /// Returns indices (into the source [`PointSet`]) of every point within
    /// the given cell, including points held by its descendants
    pub fn points(&self, cell: CellIndex) -> &[usize] {
        &self.indices[self.cells[cell.index].span().range()]
    }

    /// Iterates over every cell in the tree, depth-first
    ///
    /// Children are visited in [`Corner`] order.
    pub fn iter(&self) -> impl Iterator<Item = CellIndex> + '_ {
        let mut stack = vec![self.root()];
        std::iter::from_fn(move || {
            let cell = stack.pop()?;
            if let Some(children) = self.children(cell) {
                stack.extend(children.into_iter().rev());
            }
            Some(cell)
        })
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Data structure for an under-construction octree
struct OctreeBuilder<'a> {
    o: Octree,
    points: &'a PointSet,

    /// Scratch buffer of octant assignments, reused between cells
    octants: Vec<Corner>,
    /// Scratch buffer for reordering indices
    scratch: Vec<usize>,
}

impl<'a> From<OctreeBuilder<'a>> for Octree {
    fn from(b: OctreeBuilder<'a>) -> Self {
        debug_assert!(!b.o.cells.contains(&Cell::Invalid));
        b.o
    }
}

impl<'a> OctreeBuilder<'a> {
    /// Builds a new octree, which allocates data for the root cell
    fn new(
        points: &'a PointSet,
        bounds: CellBounds,
        settings: Settings,
    ) -> Self {
        Self {
            o: Octree {
                cells: vec![Cell::Invalid],
                indices: (0..points.len()).collect(),
                bounds,
                depth: 0,
                settings,
            },
            points,
            octants: vec![],
            scratch: vec![],
        }
    }

    /// Records the given cell into the provided index
    ///
    /// The index must be valid already; this does not modify the cells vector.
    fn record(&mut self, cell: CellIndex, data: Cell) {
        debug_assert_eq!(self.o.cells[cell.index], Cell::Invalid);
        self.o.cells[cell.index] = data;
        self.o.depth = self.o.depth.max(cell.depth);
    }

    /// Recurse down the octree, building the given cell
    fn recurse(&mut self, cell: CellIndex, span: Span) {
        let settings = self.o.settings;
        if span.len() <= settings.max_points
            || cell.depth >= settings.max_depth as usize
        {
            self.record(cell, Cell::Leaf(span));
            return;
        }

        let index = self.o.cells.len();
        for _ in Corner::iter() {
            self.o.cells.push(Cell::Invalid);
        }
        self.record(cell, Cell::Branch { index, span });

        let spans = self.partition(cell.bounds, span);
        for i in Corner::iter() {
            let child = cell.child(index, i);
            let s = spans[i.index()];
            if s.is_empty() {
                // Empty children are kept so that siblings tile the parent
                self.record(child, Cell::Leaf(s));
            } else {
                self.recurse(child, s);
            }
        }
    }

    /// Reorders the indices within `span` by octant, returning per-octant
    /// sub-spans (in [`Corner`] order)
    fn partition(&mut self, bounds: CellBounds, span: Span) -> [Span; 8] {
        let indices = &mut self.o.indices[span.range()];

        let mut counts = [0usize; 8];
        self.octants.clear();
        for &i in indices.iter() {
            let c = bounds.octant(&self.points[i]);
            counts[c.index()] += 1;
            self.octants.push(c);
        }

        let mut next = [0usize; 8];
        let mut spans = [Span::default(); 8];
        let mut start = span.start;
        for (i, n) in counts.iter().enumerate() {
            next[i] = start - span.start;
            spans[i] = Span::new(start, start + n);
            start += n;
        }
        debug_assert_eq!(start, span.end);

        self.scratch.clear();
        self.scratch.resize(indices.len(), 0);
        for (&i, c) in indices.iter().zip(&self.octants) {
            self.scratch[next[c.index()]] = i;
            next[c.index()] += 1;
        }
        indices.copy_from_slice(&self.scratch);
        spans
    }
}

////////////////////////////////////////////////////////////////////////////////
