//! Point set loaders
//!
//! The reader is selected by file suffix:
//! - `.xyz` / `.txt`: one point per line, as whitespace-separated `x y z`
//!   (extra columns such as normals or colors are ignored).  Blank lines and
//!   `#` comments are skipped.
//! - `.obj`: vertex positions of a Wavefront OBJ file, as loaded by [`tobj`]
//! - `.ply`: the `x`, `y`, `z` properties of each `vertex` element, ASCII or
//!   binary
//! - `.stl`: the unique triangle vertices of an ASCII or binary STL file
//!
//! Mesh formats only contribute their vertices; faces are ignored.
use crate::{Error, PointSet};
use log::debug;
use nalgebra::Vector3;
use std::{
    io::{BufRead, Read},
    path::{Path, PathBuf},
};

/// Point file formats with a reader
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Format {
    Xyz,
    Obj,
    Ply,
    Stl,
}

impl Format {
    /// Picks a format based on a file's suffix (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "xyz" | "txt" => Ok(Format::Xyz),
            "obj" => Ok(Format::Obj),
            "ply" => Ok(Format::Ply),
            "stl" => Ok(Format::Stl),
            _ => Err(Error::UnknownFormat(ext)),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Format::Xyz => "XYZ",
            Format::Obj => "OBJ",
            Format::Ply => "PLY",
            Format::Stl => "STL",
        }
    }
}

/// Loads a point set from a file, picking a reader by suffix
///
/// The suffix is checked before the file is opened.
pub fn load<P: Into<PathBuf>>(path: P) -> Result<PointSet, Error> {
    let path = path.into();
    let format = Format::from_path(&path)?;
    let f = std::io::BufReader::new(std::fs::File::open(&path)?);
    let out = read(f, format)?;
    debug!("read {} points from {path:?}", out.len());
    Ok(out)
}

/// Reads a point set in the given format
///
/// # Errors
/// Syntax errors in `.xyz` files are reported as [`Error::Parse`] with a line
/// number; failures in the other readers are reported as [`Error::Load`].
/// Non-finite coordinates are rejected in every format.
pub fn read<R: BufRead>(mut r: R, format: Format) -> Result<PointSet, Error> {
    let points = match format {
        Format::Xyz => read_xyz(r)?,
        Format::Obj => read_obj(&mut r)?,
        Format::Ply => read_ply(&mut r)?,
        Format::Stl => read_stl(&mut r)?,
    };
    PointSet::new(points)
}

fn load_error<E: std::fmt::Display>(format: Format, e: E) -> Error {
    Error::Load {
        format: format.name(),
        msg: e.to_string(),
    }
}

fn read_xyz<R: BufRead>(r: R) -> Result<Vec<Vector3<f32>>, Error> {
    let mut points = vec![];
    for (i, line) in r.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        points.push(parse_xyz(line.split_whitespace(), i + 1)?);
    }
    Ok(points)
}

fn parse_xyz<'a, I: Iterator<Item = &'a str>>(
    mut words: I,
    line: usize,
) -> Result<Vector3<f32>, Error> {
    let mut v = Vector3::zeros();
    for (axis, name) in ["x", "y", "z"].into_iter().enumerate() {
        let w = words.next().ok_or_else(|| Error::Parse {
            line,
            msg: format!("missing {name} coordinate"),
        })?;
        let f = w.parse::<f32>().map_err(|e| Error::Parse {
            line,
            msg: format!("bad {name} coordinate {w:?}: {e}"),
        })?;
        if !f.is_finite() {
            return Err(Error::Parse {
                line,
                msg: format!("{name} coordinate is not finite"),
            });
        }
        v[axis] = f;
    }
    Ok(v)
}

fn read_obj<R: BufRead>(r: &mut R) -> Result<Vec<Vector3<f32>>, Error> {
    // Materials are never used, so `mtllib` references are not followed
    let (models, _materials) = tobj::load_obj_buf(
        r,
        &tobj::LoadOptions::default(),
        |_| Err(tobj::LoadError::OpenFileFailed),
    )
    .map_err(|e| load_error(Format::Obj, e))?;

    let mut out = vec![];
    for model in &models {
        let positions = &model.mesh.positions;
        debug!("OBJ model {:?}: {} vertices", model.name, positions.len() / 3);
        out.extend(
            positions
                .chunks_exact(3)
                .map(|c| Vector3::new(c[0], c[1], c[2])),
        );
    }
    Ok(out)
}

fn read_ply<R: BufRead>(r: &mut R) -> Result<Vec<Vector3<f32>>, Error> {
    use ply_rs::{
        parser::Parser,
        ply::{DefaultElement, Property},
    };

    fn scalar(p: Option<&Property>) -> Option<f32> {
        match p? {
            Property::Float(v) => Some(*v),
            Property::Double(v) => Some(*v as f32),
            Property::Int(v) => Some(*v as f32),
            Property::UInt(v) => Some(*v as f32),
            Property::Short(v) => Some(*v as f32),
            Property::UShort(v) => Some(*v as f32),
            Property::Char(v) => Some(*v as f32),
            Property::UChar(v) => Some(*v as f32),
            _ => None,
        }
    }

    let ply = Parser::<DefaultElement>::new()
        .read_ply(r)
        .map_err(|e| load_error(Format::Ply, e))?;
    let Some(vertices) = ply.payload.get("vertex") else {
        return Ok(vec![]);
    };
    vertices
        .iter()
        .map(|e| -> Result<Vector3<f32>, Error> {
            let mut v = Vector3::zeros();
            for (axis, name) in ["x", "y", "z"].into_iter().enumerate() {
                v[axis] = scalar(e.get(name)).ok_or_else(|| Error::Load {
                    format: Format::Ply.name(),
                    msg: format!("vertex has no scalar {name} property"),
                })?;
            }
            Ok(v)
        })
        .collect()
}

fn read_stl<R: BufRead>(r: &mut R) -> Result<Vec<Vector3<f32>>, Error> {
    // `stl_io` seeks to tell binary files from ASCII ones
    let mut buf = vec![];
    r.read_to_end(&mut buf)?;
    let stl = stl_io::read_stl(&mut std::io::Cursor::new(buf))
        .map_err(|e| load_error(Format::Stl, e))?;
    debug!(
        "STL contains {} vertices, {} triangles",
        stl.vertices.len(),
        stl.faces.len()
    );
    Ok(stl
        .vertices
        .iter()
        .map(|v| Vector3::new(v.0[0], v.0[1], v.0[2]))
        .collect())
}
