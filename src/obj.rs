use crate::{element::VH, error::Error, mesh::PolyMesh};
use glam::dvec3;
use std::path::Path;
use tracing::debug;

impl PolyMesh {
    /// Load all models of a Wavefront OBJ file into a single mesh.
    ///
    /// Polygonal faces are kept as they are, so quads stay quads.
    pub fn load_obj(path: &Path) -> Result<Self, Error> {
        let options = tobj::LoadOptions {
            triangulate: false,
            single_index: false,
            ..Default::default()
        };
        let (models, _) = tobj::load_obj(path, &options).map_err(|e| Error::ObjLoadFailed {
            path: path.to_path_buf(),
            message: format!("{}", e),
        })?;
        let (nverts, nfaces) = models
            .iter()
            .fold((0usize, 0usize), |(nverts, nfaces), model| {
                let msh = &model.mesh;
                let faces = if msh.face_arities.is_empty() {
                    msh.indices.len() / 3
                } else {
                    msh.face_arities.len()
                };
                (nverts + (msh.positions.len() / 3), nfaces + faces)
            });
        let nedges = nfaces * 2; // Estimate for quad meshes.
        let mut outmesh = PolyMesh::with_capacity(nverts, nedges, nfaces);
        let mut voffset = 0u32;
        let mut fvs: Vec<VH> = Vec::new();
        for model in models {
            let mesh = model.mesh;
            if mesh.positions.len() % 3 != 0 {
                return Err(Error::IncorrectNumberOfCoordinates(mesh.positions.len()));
            }
            let nverts = (mesh.positions.len() / 3) as u32;
            for triplet in mesh.positions.chunks(3) {
                outmesh.add_vertex(dvec3(triplet[0], triplet[1], triplet[2]));
            }
            // tobj leaves the arities empty when every face is a triangle.
            let arities: Vec<usize> = if mesh.face_arities.is_empty() {
                vec![3; mesh.indices.len() / 3]
            } else {
                mesh.face_arities.iter().map(|a| *a as usize).collect()
            };
            let mut start = 0usize;
            for size in arities {
                fvs.clear();
                fvs.extend(
                    mesh.indices[start..(start + size)]
                        .iter()
                        .map(|i| VH::from(i + voffset)),
                );
                start += size;
                outmesh.add_face(&fvs)?;
            }
            voffset += nverts;
        }
        debug!(
            vertices = outmesh.num_vertices(),
            faces = outmesh.num_faces(),
            "Loaded {}",
            path.display()
        );
        Ok(outmesh)
    }
}

#[cfg(test)]
mod test {
    use crate::{error::Error, mesh::PolyMesh};
    use glam::dvec3;
    use std::io::Write;

    const TWO_QUADS: &str = "\
o strip
v 0 0 0
v 1 0 0
v 2 0 0
v 0 1 0
v 1 1 0
v 2 1 0
f 1 2 5 4
f 2 3 6 5
";

    #[test]
    fn t_load_quad_strip() {
        let mut file = tempfile::Builder::new()
            .suffix(".obj")
            .tempfile()
            .expect("Cannot create temporary file");
        file.write_all(TWO_QUADS.as_bytes())
            .expect("Cannot write obj file");
        let mesh = PolyMesh::load_obj(file.path()).expect("Cannot load obj file");
        assert_eq!(mesh.num_vertices(), 6);
        assert_eq!(mesh.num_faces(), 2);
        assert_eq!(mesh.num_edges(), 7);
        assert!(mesh.faces().all(|f| mesh.face_valence(f) == 4));
        assert_eq!(mesh.point(5.into()), dvec3(2.0, 1.0, 0.0));
        mesh.check_topology().expect("Loaded topology is broken");
    }

    #[test]
    fn t_missing_file() {
        let dir = tempfile::tempdir().expect("Cannot create temporary directory");
        let path = dir.path().join("nothing.obj");
        assert!(matches!(
            PolyMesh::load_obj(&path),
            Err(Error::ObjLoadFailed { .. })
        ));
    }
}
