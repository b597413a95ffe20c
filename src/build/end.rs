use super::{Hexagon, selected_pair};
use crate::{
    element::{FH, VH},
    error::Error,
    mesh::PolyMesh,
    selection::Selection,
};
use tracing::debug;

/// Build quads so that edge loops end at the selection.
///
/// With exactly two vertices selected, the hexagon they share an edge of is
/// split into 4 quads. The two vertices created in the middle of the hexagon
/// are pulled towards each other by `slide_edge`, in `[0, 1]`.
///
/// Otherwise the selected edges must form two parallel chains with the same
/// number of vertices, and the chains are bridged with a strip of quads. The
/// new quads become the selection.
///
/// Returns the faces that make up the built region. If anything fails, the
/// mesh is left as it was.
pub fn build_end(mesh: &mut PolyMesh, slide_edge: f64) -> Result<Vec<FH>, Error> {
    let selection = Selection::from_mesh(mesh);
    mesh.transaction(|mesh| {
        if selection.vertices.len() <= 2 {
            hexagon_end(mesh, &selection.vertices, slide_edge)
        } else {
            bridge(mesh, &selection)
        }
    })
}

fn hexagon_end(mesh: &mut PolyMesh, selected: &[VH], slide_edge: f64) -> Result<Vec<FH>, Error> {
    let (a, b) = selected_pair(selected)?;
    let hex = Hexagon::containing(mesh, a, b)?;
    let (pa, pb) = match (hex.position(a), hex.position(b)) {
        (Some(pa), Some(pb)) => (pa, pb),
        _ => return Err(Error::selection("the 2 selected vertices are not on the same hexagon")),
    };
    // Index of the selected vertex that comes first along the loop.
    let first = if hex.at(pa + 1) == b {
        pa
    } else if hex.at(pb + 1) == a {
        pb
    } else {
        return Err(Error::selection(
            "the 2 selected vertices do not share the same edge",
        ));
    };
    let (s0, s1) = (hex.at(first), hex.at(first + 1));
    let (t0, t1) = (hex.at(first + 4), hex.at(first + 3));
    // Cut off the two ends with diagonals, split both diagonals and join the
    // new vertices through the middle.
    let f = hex.face;
    let (e0, g) = mesh.split_face(f, s0, t0)?;
    let (e1, h) = mesh.split_face(g, s1, t1)?;
    let (m0, _) = mesh.split_edge_mid(e0);
    let (m1, _) = mesh.split_edge_mid(e1);
    let (_, k) = mesh.split_face(g, m0, m1)?;
    let center = mesh.point(m0).lerp(mesh.point(m1), 0.5);
    mesh.scale_about(&[m0, m1], center, slide_edge);
    debug!("Split hexagon {} into 4 quads", f);
    Ok(vec![f, g, h, k])
}

/// Work out the quads that bridge the two selected chains, without writing
/// anything to the mesh.
fn plan_bridge(mesh: &PolyMesh, selection: &Selection) -> Result<Vec<[VH; 4]>, Error> {
    let chains = selection.chains(mesh)?;
    debug!("Found {} chains in the selection", chains.len());
    // Chains are connected components, so they never share a vertex.
    let (a, mut b) = match <[Vec<VH>; 2]>::try_from(chains) {
        Ok([a, b]) => (a, b),
        Err(chains) => {
            return Err(Error::selection(format!(
                "expected 2 chains of edges, found {}",
                chains.len()
            )));
        }
    };
    if a.len() != b.len() {
        return Err(Error::selection(format!(
            "the 2 chains must have the same number of vertices, found {} and {}",
            a.len(),
            b.len()
        )));
    }
    if a.len() < 2 {
        return Err(Error::selection("each chain needs at least 2 vertices"));
    }
    if a
        .iter()
        .chain(b.iter())
        .any(|v| !mesh.topol.is_boundary_vertex(*v))
    {
        return Err(Error::selection(
            "the selected chains must be on the boundary",
        ));
    }
    let n = a.len();
    let dist = |x: VH, y: VH| mesh.point(x).distance(mesh.point(y));
    if dist(a[0], b[n - 1]) + dist(a[n - 1], b[0]) < dist(a[0], b[0]) + dist(a[n - 1], b[n - 1]) {
        b.reverse();
    }
    let is_free = |quad: &[VH; 4]| {
        (0..4).all(|i| {
            mesh.find_halfedge(quad[i], quad[(i + 1) % 4])
                .is_none_or(|h| h.is_boundary(mesh))
        })
    };
    let quads: Vec<[VH; 4]> = (0..(n - 1))
        .map(|i| [a[i], a[i + 1], b[i + 1], b[i]])
        .collect();
    if quads.iter().all(is_free) {
        return Ok(quads);
    }
    let flipped: Vec<[VH; 4]> = quads.iter().map(|q| [q[1], q[0], q[3], q[2]]).collect();
    if flipped.iter().all(is_free) {
        Ok(flipped)
    } else {
        Err(Error::selection("the selected chains are not parallel"))
    }
}

fn bridge(mesh: &mut PolyMesh, selection: &Selection) -> Result<Vec<FH>, Error> {
    let quads = plan_bridge(mesh, selection)?;
    let faces = quads
        .iter()
        .map(|q| mesh.add_face(q))
        .collect::<Result<Vec<FH>, Error>>()?;
    mesh.clear_selection();
    for f in &faces {
        mesh.select_face(*f, true);
    }
    debug!("Bridged 2 chains with {} quads", faces.len());
    Ok(faces)
}
