//! Octant is a point-region octree for 3D point sets, with level-of-detail
//! export of the octree's cells.
//!
//! An octree is built once over an immutable [`PointSet`].  Any cell holding
//! more than [`Settings::max_points`] points (and above
//! [`Settings::max_depth`]) is split into eight equal children, recursively.
//! The tree is then **cut** at a chosen depth to produce a
//! [`Representation`]: the boxes of every cell at that depth, plus every leaf
//! above it.
//!
//! ```
//! use octant::{Octree, PointSet, Settings};
//! use nalgebra::Vector3;
//!
//! let mut pts = vec![];
//! for i in 0..8 {
//!     pts.push(Vector3::new(
//!         (i & 1) as f32,
//!         ((i >> 1) & 1) as f32,
//!         ((i >> 2) & 1) as f32,
//!     ));
//! }
//! pts.push(Vector3::new(4.0, 4.0, 4.0));
//! let points = PointSet::new(pts)?;
//!
//! let settings = Settings { max_points: 5, ..Default::default() };
//! let octree = Octree::build(&points, settings)?;
//! assert_eq!(octree.max_depth(), 2);
//!
//! let rep = octree.representation(1);
//! assert_eq!(rep.len(), 8);
//! assert_eq!(rep.counts.iter().sum::<usize>(), 9);
//! # Ok::<(), octant::Error>(())
//! ```
//!
//! Representations are turned into line segments with
//! [`Representation::wireframe`], which can be saved as an OBJ file with
//! [`Wireframe::write_obj`].
//!
//! For interactive use, the [`lod`] module translates a stream of level
//! selections into redraw requests.
pub mod cell;
pub mod io;
pub mod lod;
pub mod types;

mod error;
mod interval;
mod octree;
mod output;
mod points;
mod representation;

pub use error::Error;
pub use interval::Interval;
pub use octree::{Octree, Settings};
pub use points::PointSet;
pub use representation::{Representation, Wireframe};
