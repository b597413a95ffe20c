use super::{Hexagon, selected_pair};
use crate::{
    element::{FH, VH},
    error::Error,
    mesh::PolyMesh,
    selection::Selection,
};
use tracing::debug;

/// Build quads so that an edge loop can turn a corner.
///
/// With three vertices `a`, `m`, `b` selected, where `m` shares a boundary
/// edge with both others, the open corner is closed with the quad
/// `(a, m, b, p)`. The new vertex `p` moves from the midpoint of `a` and `b`
/// towards the point that completes the parallelogram as `slide_vertex` goes
/// from 0 to 1.
///
/// With two vertices selected that are separated by one vertex on a hexagon,
/// the hexagon is split into 3 quads. The vertex created in the middle of the
/// hexagon is slid towards the vertex opposite the corner by `slide_vertex`.
///
/// If anything fails, the mesh is left as it was.
pub fn build_corner(mesh: &mut PolyMesh, slide_vertex: f64) -> Result<Vec<FH>, Error> {
    let selection = Selection::from_mesh(mesh);
    mesh.transaction(|mesh| match selection.vertices.as_slice() {
        [x, y, z] => quad_corner(mesh, [*x, *y, *z], slide_vertex),
        verts => hexagon_corner(mesh, verts, slide_vertex),
    })
}

/// The corner quad for three selected vertices, in loop order, without the
/// new vertex.
fn plan_quad_corner(mesh: &PolyMesh, [x, y, z]: [VH; 3]) -> Result<[VH; 3], Error> {
    let (m, a, b) = [(x, y, z), (y, z, x), (z, x, y)]
        .into_iter()
        .find(|(m, a, b)| mesh.find_edge(*m, *a).is_some() && mesh.find_edge(*m, *b).is_some())
        .ok_or_else(|| Error::selection("the 3 selected vertices do not form a corner"))?;
    if mesh.find_edge(a, b).is_some() {
        return Err(Error::selection(
            "the outer vertices of the corner are already connected",
        ));
    }
    let free = |from: VH, to: VH| {
        mesh.find_halfedge(from, to)
            .is_some_and(|h| h.is_boundary(mesh))
    };
    if free(a, m) && free(m, b) {
        Ok([a, m, b])
    } else if free(b, m) && free(m, a) {
        Ok([b, m, a])
    } else {
        Err(Error::selection(
            "the edges of the corner are not open on the same side",
        ))
    }
}

fn quad_corner(mesh: &mut PolyMesh, selected: [VH; 3], slide_vertex: f64) -> Result<Vec<FH>, Error> {
    let [a, m, b] = plan_quad_corner(mesh, selected)?;
    let (pa, pm, pb) = (mesh.point(a), mesh.point(m), mesh.point(b));
    let mid = pa.lerp(pb, 0.5);
    let p = mesh.add_vertex(mid.lerp(pa + pb - pm, slide_vertex));
    let f = mesh.add_quad_face(a, m, b, p)?;
    debug!("Closed the corner at vertex {} with face {}", m, f);
    Ok(vec![f])
}

fn hexagon_corner(mesh: &mut PolyMesh, selected: &[VH], slide_vertex: f64) -> Result<Vec<FH>, Error> {
    let (a, b) = selected_pair(selected)?;
    let hex = Hexagon::containing(mesh, a, b)?;
    let (pa, pb) = match (hex.position(a), hex.position(b)) {
        (Some(pa), Some(pb)) => (pa, pb),
        _ => return Err(Error::selection("the 2 selected vertices are not on the same hexagon")),
    };
    let mid = if hex.at(pa + 2) == b {
        pa + 1
    } else if hex.at(pb + 2) == a {
        pb + 1
    } else {
        return Err(Error::selection(
            "the 2 selected vertices are not separated by 1 vertex",
        ));
    };
    let (before, after, opposite) = (hex.at(mid + 5), hex.at(mid + 1), hex.at(mid + 3));
    // Cut off the corner with a triangle, then split the cut and connect it to
    // the far side of the hexagon.
    let f = hex.face;
    let (e, g) = mesh.split_face(f, after, before)?;
    let (c, _) = mesh.split_edge_mid(e);
    let (_, h) = mesh.split_face(g, c, opposite)?;
    mesh.scale_about(&[c], mesh.point(opposite), slide_vertex);
    debug!("Split hexagon {} into 3 quads around vertex {}", f, hex.at(mid));
    Ok(vec![f, g, h])
}
