//! Wireframe output implementation
use crate::{Error, representation::Wireframe};
use std::io::{BufWriter, Write};

impl Wireframe {
    /// Writes the wireframe as a Wavefront OBJ file of line elements
    pub fn write_obj<F: std::io::Write>(
        &self,
        out: &mut F,
    ) -> Result<(), Error> {
        // We're going to do many small writes and will typically be writing to
        // a file, so using a `BufWriter` saves excessive syscalls.
        let mut out = BufWriter::new(out);
        writeln!(out, "# Octree wireframe exported by octant")?;
        writeln!(
            out,
            "# {} vertices, {} lines",
            self.vertices.len(),
            self.lines.len()
        )?;
        for v in &self.vertices {
            writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
        }
        // OBJ indices are 1-based
        for [a, b] in &self.lines {
            writeln!(out, "l {} {}", a + 1, b + 1)?;
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::{Octree, PointSet, Settings};
    use nalgebra::Vector3;

    #[test]
    fn test_write_obj() {
        let pts = PointSet::new(
            (0..20).map(|i| Vector3::new(i as f32, 0.0, 0.0)).collect(),
        )
        .unwrap();
        let settings = Settings {
            max_points: 4,
            ..Default::default()
        };
        let o = Octree::build(&pts, settings).unwrap();
        let r = o.representation(1);
        let mut buf = vec![];
        r.wireframe().write_obj(&mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let verts = text.lines().filter(|l| l.starts_with("v ")).count();
        let lines: Vec<_> =
            text.lines().filter(|l| l.starts_with("l ")).collect();
        assert_eq!(verts, 8 * r.len());
        assert_eq!(lines.len(), 12 * r.len());
        assert_eq!(lines[0], "l 1 2");
        for l in lines {
            for i in l.split_whitespace().skip(1) {
                let i: usize = i.parse().unwrap();
                assert!(i >= 1 && i <= verts);
            }
        }
    }
}
