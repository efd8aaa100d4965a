//! Interactive level-of-detail control
//!
//! A [`LodController`] sits between a level selector (e.g. a slider widget)
//! and whatever draws the octree.  Each level-change event regenerates the
//! [`Representation`] for that level and asks the [`Redraw`] collaborator to
//! display it.
//!
//! ```
//! use octant::{Octree, PointSet, Settings, lod::LodController};
//! use nalgebra::Vector3;
//!
//! let points = PointSet::new(
//!     (0..100).map(|i| Vector3::new(i as f32, 0.0, (i % 7) as f32)).collect(),
//! )?;
//! let settings = Settings { max_points: 5, ..Default::default() };
//! let octree = Octree::build(&points, settings)?;
//!
//! let mut drawn = vec![];
//! let redraw = |r: &octant::Representation, _: &PointSet| {
//!     drawn.push(r.len());
//!     Ok::<(), std::convert::Infallible>(())
//! };
//! let mut lod = LodController::new(&octree, &points, redraw).unwrap();
//! lod.on_level_changed(1.4).unwrap();
//! assert_eq!(lod.level(), 1);
//! drop(lod);
//! assert_eq!(drawn.len(), 2); // initial draw, then one per event
//! # Ok::<(), octant::Error>(())
//! ```
use crate::{Octree, PointSet, Representation};
use log::debug;

/// Collaborator which displays a representation
pub trait Redraw {
    /// Error type returned by a failed redraw
    type Error;

    /// Replaces the displayed geometry with `rep`
    ///
    /// `points` is the source point set, for consumers which also draw the
    /// raw points (e.g. as clusters within each box).
    fn redraw(
        &mut self,
        rep: &Representation,
        points: &PointSet,
    ) -> Result<(), Self::Error>;
}

impl<F, E> Redraw for F
where
    F: FnMut(&Representation, &PointSet) -> Result<(), E>,
{
    type Error = E;
    fn redraw(
        &mut self,
        rep: &Representation,
        points: &PointSet,
    ) -> Result<(), E> {
        self(rep, points)
    }
}

/// Translates level selections into redrawn octree representations
///
/// Events are handled synchronously, in the order that they're received.
pub struct LodController<'a, R> {
    octree: &'a Octree,
    points: &'a PointSet,
    redraw: R,

    /// Currently displayed representation
    current: Representation,
}

impl<'a, R: Redraw> LodController<'a, R> {
    /// Builds a new controller, drawing the level-0 representation
    pub fn new(
        octree: &'a Octree,
        points: &'a PointSet,
        mut redraw: R,
    ) -> Result<Self, R::Error> {
        let current = octree.representation(0);
        redraw.redraw(&current, points)?;
        Ok(Self {
            octree,
            points,
            redraw,
            current,
        })
    }

    /// Converts a raw level selection into a valid level for this octree
    ///
    /// The value is rounded to the nearest integer (halfway cases away from
    /// zero), then clamped to `[0, max_depth]`.  `NaN` maps to level 0.
    pub fn clamp_level(&self, level: f64) -> usize {
        let max = self.octree.max_depth();
        if level.is_nan() {
            0
        } else {
            level.round().clamp(0.0, max as f64) as usize
        }
    }

    /// Handles a level-change event
    ///
    /// Regenerates the representation if the level differs from the one on
    /// display, then requests exactly one redraw.  Returns the applied level.
    ///
    /// # Errors
    /// Errors from the redraw collaborator are returned unchanged
    pub fn on_level_changed(
        &mut self,
        level: f64,
    ) -> Result<usize, R::Error> {
        let level = self.clamp_level(level);
        if level != self.current.level {
            self.current = self.octree.representation(level);
        } else {
            debug!("level {level} unchanged; reusing representation");
        }
        self.redraw.redraw(&self.current, self.points)?;
        Ok(level)
    }

    /// Returns the currently displayed level
    pub fn level(&self) -> usize {
        self.current.level
    }

    pub fn representation(&self) -> &Representation {
        &self.current
    }

    /// Unwraps the redraw collaborator
    pub fn into_inner(self) -> R {
        self.redraw
    }
}
