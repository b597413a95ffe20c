use crate::{element::VH, error::Error, mesh::PolyMesh};
use glam::{DVec3, dvec3};

impl PolyMesh {
    /// Makes a box with the following topology, spanning from the min point to
    /// the max point.
    ///
    ///  ```text
    ///       7-----------6
    ///      /|          /|
    ///     / |         / |
    ///    4-----------5  |
    ///    |  |        |  |
    ///    |  3--------|--2
    ///    | /         | /
    ///    |/          |/
    ///    0-----------1
    ///  ```
    pub fn quad_box(min: DVec3, max: DVec3) -> Result<Self, Error> {
        const BOX_POS: [(bool, bool, bool); 8] = [
            (false, false, false),
            (true, false, false),
            (true, true, false),
            (false, true, false),
            (false, false, true),
            (true, false, true),
            (true, true, true),
            (false, true, true),
        ];
        const BOX_IDX: [[u32; 4]; 6] = [
            [0, 3, 2, 1],
            [0, 1, 5, 4],
            [1, 2, 6, 5],
            [2, 3, 7, 6],
            [3, 0, 4, 7],
            [4, 5, 6, 7],
        ];
        let mut qbox = Self::with_capacity(8, 12, 6);
        for (xf, yf, zf) in BOX_POS {
            qbox.add_vertex(dvec3(
                if xf { max.x } else { min.x },
                if yf { max.y } else { min.y },
                if zf { max.z } else { min.z },
            ));
        }
        for fvi in BOX_IDX {
            qbox.add_face(&fvi.map(VH::from))?;
        }
        Ok(qbox)
    }

    pub fn unit_box() -> Result<Self, Error> {
        Self::quad_box(DVec3::ZERO, DVec3::ONE)
    }

    /// A flat grid of `nx` by `ny` quads in the XY plane, with the given
    /// spacing between vertices.
    ///
    /// Vertex `(i, j)` has index `j * (nx + 1) + i`, so rows of vertices along
    /// X are contiguous.
    /// ```text
    ///   8---9---10--11
    ///   |   |   |   |
    ///   4---5---6---7
    ///   |   |   |   |
    ///   0---1---2---3      nx = 3, ny = 2
    /// ```
    pub fn quad_grid(nx: u32, ny: u32, spacing: f64) -> Result<Self, Error> {
        let stride = nx + 1;
        let mut grid = Self::with_capacity(
            ((nx + 1) * (ny + 1)) as usize,
            (nx * (ny + 1) + ny * (nx + 1)) as usize,
            (nx * ny) as usize,
        );
        for j in 0..=ny {
            for i in 0..=nx {
                grid.add_vertex(dvec3(i as f64 * spacing, j as f64 * spacing, 0.0));
            }
        }
        for j in 0..ny {
            for i in 0..nx {
                let v0 = j * stride + i;
                grid.add_quad_face(
                    v0.into(),
                    (v0 + 1).into(),
                    (v0 + 1 + stride).into(),
                    (v0 + stride).into(),
                )?;
            }
        }
        Ok(grid)
    }

    /// A closed ring of `n` quads around the Z axis, `rows` quads tall.
    ///
    /// The edge rings running around the cylinder are closed, which makes
    /// this handy for exercising loop walking.
    pub fn quad_cylinder(n: u32, rows: u32, radius: f64, height: f64) -> Result<Self, Error> {
        let mut mesh = Self::with_capacity(
            (n * (rows + 1)) as usize,
            (n * (2 * rows + 1)) as usize,
            (n * rows) as usize,
        );
        for j in 0..=rows {
            let z = height * j as f64 / rows as f64;
            for i in 0..n {
                let angle = std::f64::consts::TAU * i as f64 / n as f64;
                mesh.add_vertex(dvec3(radius * angle.cos(), radius * angle.sin(), z));
            }
        }
        for j in 0..rows {
            for i in 0..n {
                let (a, b) = (j * n + i, j * n + (i + 1) % n);
                mesh.add_quad_face(a.into(), b.into(), (b + n).into(), (a + n).into())?;
            }
        }
        Ok(mesh)
    }

    /// A single regular hexagon in the XY plane. Vertex `i` sits at angle
    /// `i * 60` degrees.
    pub fn hexagon(radius: f64) -> Result<Self, Error> {
        let mut mesh = Self::with_capacity(6, 6, 1);
        let verts: Vec<VH> = (0..6)
            .map(|i| {
                let angle = std::f64::consts::FRAC_PI_3 * i as f64;
                mesh.add_vertex(dvec3(radius * angle.cos(), radius * angle.sin(), 0.0))
            })
            .collect();
        mesh.add_face(&verts)?;
        Ok(mesh)
    }
}
