/*!
Tools that add quads to a mesh so edge loops can end or turn.

Both tools read the selection to decide what to build:

+ [`build_end`] bridges two parallel chains of edges with a strip of quads, or
  fills a hexagon with 4 quads so that a loop ends at the selected edge.

+ [`build_corner`] closes an open corner on the boundary with one quad, or
  fills a hexagon with 3 quads so that a loop turns around the vertex between
  the two selected vertices.
*/

mod corner;
mod end;

pub use corner::build_corner;
pub use end::build_end;

use crate::{
    element::{FH, VH},
    error::Error,
    mesh::PolyMesh,
};

const HEXAGON: usize = 6;

/// A six sided face and its vertices in loop order.
struct Hexagon {
    face: FH,
    verts: [VH; HEXAGON],
}

impl Hexagon {
    /// Find the hexagon that contains both `a` and `b`.
    fn containing(mesh: &PolyMesh, a: VH, b: VH) -> Result<Self, Error> {
        let mut hexagons = mesh
            .faces()
            .filter(|f| mesh.face_valence(*f) == HEXAGON)
            .peekable();
        if hexagons.peek().is_none() {
            return Err(Error::selection("mesh doesn't contain any hexagon"));
        }
        hexagons
            .find_map(|f| {
                let verts: [VH; HEXAGON] = mesh.face_vertices(f).try_into().ok()?;
                (verts.contains(&a) && verts.contains(&b)).then_some(Hexagon { face: f, verts })
            })
            .ok_or_else(|| Error::selection("the 2 selected vertices are not on the same hexagon"))
    }

    fn position(&self, v: VH) -> Option<usize> {
        self.verts.iter().position(|x| *x == v)
    }

    /// Vertex at `i` steps along the loop, wrapping around.
    fn at(&self, i: usize) -> VH {
        self.verts[i % HEXAGON]
    }
}

/// Both vertices that are selected, when exactly two are.
fn selected_pair(verts: &[VH]) -> Result<(VH, VH), Error> {
    match verts {
        [a, b] => Ok((*a, *b)),
        _ => Err(Error::selection("exactly 2 vertices must be selected")),
    }
}

#[cfg(test)]
mod test {
    use super::{Hexagon, selected_pair};
    use crate::{error::Error, mesh::PolyMesh};

    #[test]
    fn t_find_hexagon() {
        let hex = PolyMesh::hexagon(1.0).expect("Cannot build hexagon");
        let found = Hexagon::containing(&hex, 1.into(), 4.into()).expect("Cannot find hexagon");
        assert_eq!(found.face, 0.into());
        assert_eq!(found.position(4.into()), Some(4));
        assert_eq!(found.at(7), 1.into());
        let grid = PolyMesh::quad_grid(2, 2, 1.0).expect("Cannot build grid");
        assert!(matches!(
            Hexagon::containing(&grid, 0.into(), 1.into()),
            Err(Error::InvalidSelection(msg)) if msg.contains("any hexagon")
        ));
    }

    #[test]
    fn t_selected_pair() {
        assert!(selected_pair(&[1.into(), 2.into()]).is_ok());
        assert!(selected_pair(&[1.into()]).is_err());
        assert!(selected_pair(&[1.into(), 2.into(), 3.into()]).is_err());
    }
}
