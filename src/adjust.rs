/*!
Tools that slide edge loops without changing the topology.

Both tools take an adjustment factor and scale by `2^factor`, so a factor of
zero leaves the mesh as it is, positive factors push vertices apart and
negative factors pull them together. Applying a factor and then its negation
puts every vertex back where it was.
*/

use crate::{
    element::{EH, HH, Handle, VH},
    error::Error,
    mesh::PolyMesh,
    selection::Selection,
    walker::{EdgeRing, opposite_in_quad, ring},
};
use glam::DVec3;
use tracing::debug;

/// Mark the selected edges in a lookup table indexed by edge.
fn edge_mask(mesh: &PolyMesh, edges: &[EH]) -> Vec<bool> {
    let mut mask = vec![false; mesh.num_edges()];
    for e in edges {
        mask[e.index() as usize] = true;
    }
    mask
}

/// Vertices a tool has already decided to move or keep fixed.
struct Claims(Vec<bool>);

impl Claims {
    fn new(mesh: &PolyMesh) -> Self {
        Claims(vec![false; mesh.num_vertices()])
    }

    /// Returns false if `v` was already claimed.
    fn claim(&mut self, v: VH) -> bool {
        !std::mem::replace(&mut self.0[v.index() as usize], true)
    }
}

/// Split the edges of `ring` into maximal runs of consecutive selected edges.
fn split_ring(ring: &EdgeRing, mask: &[bool], runs: &mut Vec<Vec<HH>>) {
    let hs = &ring.halfedges;
    let is_selected = |h: &HH| mask[h.edge().index() as usize];
    // A closed ring is read starting after an unselected edge, so that a run
    // across the seam is not cut in two.
    let start = if ring.is_closed() {
        match hs.iter().position(|h| !is_selected(h)) {
            Some(i) => i + 1,
            None => {
                runs.push(hs.clone());
                return;
            }
        }
    } else {
        0
    };
    let mut run = Vec::new();
    for i in 0..hs.len() {
        let h = hs[(start + i) % hs.len()];
        if is_selected(&h) {
            run.push(h);
        } else if !run.is_empty() {
            runs.push(std::mem::take(&mut run));
        }
    }
    if !run.is_empty() {
        runs.push(run);
    }
}

/// Runs of at least two consecutive parallel selected edges. The halfedges of
/// a run all point the same way, so their tails form one side of the run and
/// their heads the other.
fn find_runs(mesh: &PolyMesh, edges: &[EH]) -> Result<Vec<Vec<HH>>, Error> {
    if edges.len() < 2 {
        return Err(Error::selection("at least 2 edges must be selected"));
    }
    let mask = edge_mask(mesh, edges);
    let mut visited = vec![false; mesh.num_edges()];
    let mut runs = Vec::new();
    for e in edges {
        if visited[e.index() as usize] {
            continue;
        }
        visited[e.index() as usize] = true;
        let edge_ring = ring(mesh, *e);
        for re in edge_ring.edges() {
            visited[re.index() as usize] = true;
        }
        split_ring(&edge_ring, &mask, &mut runs);
    }
    let nsingle = runs.iter().filter(|run| run.len() < 2).count();
    runs.retain(|run| run.len() > 1);
    if runs.is_empty() {
        return Err(Error::selection("at least 1 edge pair must be selected"));
    }
    debug!(
        "Found {} runs of parallel edges, ignored {} lone edges",
        runs.len(),
        nsingle
    );
    Ok(runs)
}

/// Change the distance between parallel loops.
///
/// The selected edges are grouped into runs of consecutive parallel edges
/// along their edge rings. Each side of a run is scaled about its centre by
/// `2^factor`, so every selected loop moves away from or towards the others
/// and evenly spaced loops stay evenly spaced. All targets are computed from
/// the positions before the call. A vertex on more than one run goes to the
/// mean of its targets. Returns the vertices that were moved.
pub fn adjust_loops(mesh: &mut PolyMesh, factor: f64) -> Result<Vec<VH>, Error> {
    let selection = Selection::from_mesh(mesh);
    let runs = find_runs(mesh, &selection.edges)?;
    let scale = factor.exp2();
    let mut targets = vec![(DVec3::ZERO, 0usize); mesh.num_vertices()];
    let mut moved = Vec::new();
    for run in &runs {
        let tails: Vec<VH> = run.iter().map(|h| h.tail(mesh)).collect();
        let heads: Vec<VH> = run.iter().map(|h| h.head(mesh)).collect();
        for side in [tails, heads] {
            let center =
                side.iter().map(|v| mesh.point(*v)).sum::<DVec3>() / side.len() as f64;
            for v in side {
                let (sum, count) = &mut targets[v.index() as usize];
                if *count == 0 {
                    moved.push(v);
                }
                *sum += center + (mesh.point(v) - center) * scale;
                *count += 1;
            }
        }
    }
    for v in &moved {
        let (sum, count) = targets[v.index() as usize];
        mesh.set_point(*v, sum / count as f64);
    }
    Ok(moved)
}

/// Moves of neighbouring vertices, each one relative to a fixed pivot.
fn find_neighbours(mesh: &PolyMesh, edges: &[EH]) -> Result<Vec<(VH, VH)>, Error> {
    if edges.is_empty() {
        return Err(Error::selection("at least 1 edge must be selected"));
    }
    let mut claims = Claims::new(mesh);
    for e in edges {
        let (a, b) = e.vertices(mesh);
        claims.claim(a);
        claims.claim(b);
    }
    let mut moves = Vec::new();
    let mut nused = 0usize;
    for e in edges {
        let (h, oh) = e.halfedges();
        let sides: Vec<(HH, HH)> = [h, oh]
            .into_iter()
            .filter_map(|h| opposite_in_quad(mesh, h).map(|o| (h, o)))
            .collect();
        if sides.is_empty() {
            continue;
        }
        nused += 1;
        for (h, o) in sides {
            // h runs p -> q and o runs r -> s, with r across from q.
            for (pivot, nb) in [(h.head(mesh), o.tail(mesh)), (h.tail(mesh), o.head(mesh))] {
                if claims.claim(nb) {
                    moves.push((pivot, nb));
                }
            }
        }
    }
    if nused == 0 {
        return Err(Error::selection("no selected edge borders a quad face"));
    }
    debug!(
        "Moving {} neighbours of {} edges, dropped {} edges",
        moves.len(),
        nused,
        edges.len() - nused
    );
    Ok(moves)
}

/// Slide the loops on either side of the selected edges.
///
/// For every selected edge, the parallel edges across its incident quads are
/// scaled about the selected edge by `2^factor`. Each vertex is scaled about
/// the vertex of the selected edge it is connected to. The selected edges
/// themselves don't move. On the boundary only the side that has a quad is
/// adjusted. Returns the vertices that were moved.
pub fn adjust_adjacent_loops(mesh: &mut PolyMesh, factor: f64) -> Result<Vec<VH>, Error> {
    let selection = Selection::from_mesh(mesh);
    let moves = find_neighbours(mesh, &selection.edges)?;
    let scale = factor.exp2();
    // Pivots never move, so the order of the moves doesn't matter.
    let targets: Vec<(VH, DVec3)> = moves
        .iter()
        .map(|(pivot, nb)| {
            let center = mesh.point(*pivot);
            (*nb, center + (mesh.point(*nb) - center) * scale)
        })
        .collect();
    for (v, pos) in &targets {
        mesh.set_point(*v, *pos);
    }
    Ok(targets.into_iter().map(|(v, _)| v).collect())
}

#[cfg(test)]
mod test {
    use super::{adjust_adjacent_loops, adjust_loops};
    use crate::{
        error::Error,
        macros::{assert_f64_eq, assert_point_eq},
        mesh::PolyMesh,
    };
    use glam::dvec3;

    fn select_edges(mesh: &mut PolyMesh, pairs: &[(u32, u32)]) {
        for (a, b) in pairs {
            let e = mesh
                .find_edge((*a).into(), (*b).into())
                .expect("Cannot find edge");
            mesh.select_edge(e, true);
        }
    }

    /// 3 x 1 grid with the two inner vertical edges selected.
    ///
    /// ```text
    ///   4---5---6---7
    ///   |   #   #   |
    ///   0---1---2---3
    /// ```
    fn grid_with_pair() -> PolyMesh {
        let mut grid = PolyMesh::quad_grid(3, 1, 1.0).expect("Cannot build grid");
        select_edges(&mut grid, &[(1, 5), (2, 6)]);
        grid
    }

    #[test]
    fn t_adjust_loops_spreads_pair() {
        let mut grid = grid_with_pair();
        let moved = adjust_loops(&mut grid, 1.0).expect("Cannot adjust loops");
        assert_eq!(moved.len(), 4);
        // The rungs 1-2 and 5-6 double in length about x = 1.5.
        assert_point_eq!(grid.point(1.into()), dvec3(0.5, 0.0, 0.0));
        assert_point_eq!(grid.point(2.into()), dvec3(2.5, 0.0, 0.0));
        assert_point_eq!(grid.point(6.into()), dvec3(2.5, 1.0, 0.0));
        // Unselected loops stay put.
        assert_point_eq!(grid.point(0.into()), dvec3(0.0, 0.0, 0.0));
        assert_point_eq!(grid.point(7.into()), dvec3(3.0, 1.0, 0.0));
    }

    #[test]
    fn t_adjust_loops_zero_and_inverse() {
        let mut grid = grid_with_pair();
        let before = grid.points().to_vec();
        adjust_loops(&mut grid, 0.0).expect("Cannot adjust loops");
        assert_eq!(grid.points(), before.as_slice());
        adjust_loops(&mut grid, 0.7).expect("Cannot adjust loops");
        assert!(grid.points() != before.as_slice());
        adjust_loops(&mut grid, -0.7).expect("Cannot adjust loops");
        for (p, q) in grid.points().iter().zip(before.iter()) {
            assert_point_eq!(*p, *q, 1e-12);
        }
    }

    #[test]
    fn t_adjust_loops_spreads_consecutive_loops() {
        let mut grid = PolyMesh::quad_grid(3, 1, 1.0).expect("Cannot build grid");
        select_edges(&mut grid, &[(0, 4), (1, 5), (2, 6), (3, 7)]);
        let moved = adjust_loops(&mut grid, 1.0).expect("Cannot adjust loops");
        assert_eq!(moved.len(), 8);
        // Both rows double in length about x = 1.5, so the quads stay evenly
        // spaced and none of them collapses.
        for (row, y) in [([0u32, 1, 2, 3], 0.0), ([4, 5, 6, 7], 1.0)] {
            let xs: Vec<f64> = row.iter().map(|v| grid.point((*v).into()).x).collect();
            for (x, expected) in xs.iter().zip([-1.5, 0.5, 2.5, 4.5]) {
                assert_f64_eq!(*x, expected, 1e-12);
            }
            for w in xs.windows(2) {
                assert_f64_eq!(w[1] - w[0], 2.0, 1e-12);
            }
            for v in row {
                assert_f64_eq!(grid.point(v.into()).y, y, 1e-12);
            }
        }
    }

    #[test]
    fn t_adjust_loops_separate_runs() {
        // Two pairs on the same ring with an unselected loop between them.
        let mut grid = PolyMesh::quad_grid(4, 1, 1.0).expect("Cannot build grid");
        select_edges(&mut grid, &[(0, 5), (1, 6), (3, 8), (4, 9)]);
        let moved = adjust_loops(&mut grid, 1.0).expect("Cannot adjust loops");
        assert_eq!(moved.len(), 8);
        assert_point_eq!(grid.point(0.into()), dvec3(-0.5, 0.0, 0.0));
        assert_point_eq!(grid.point(1.into()), dvec3(1.5, 0.0, 0.0));
        assert_point_eq!(grid.point(3.into()), dvec3(2.5, 0.0, 0.0));
        assert_point_eq!(grid.point(9.into()), dvec3(4.5, 1.0, 0.0));
        assert_point_eq!(grid.point(2.into()), dvec3(2.0, 0.0, 0.0));
    }

    #[test]
    fn t_adjust_loops_closed_ring() {
        let mut cyl = PolyMesh::quad_cylinder(8, 1, 1.0, 1.0).expect("Cannot build cylinder");
        let edges: Vec<(u32, u32)> = (0..8).map(|i| (i, i + 8)).collect();
        select_edges(&mut cyl, &edges);
        let before = cyl.points().to_vec();
        let moved = adjust_loops(&mut cyl, 1.0).expect("Cannot adjust loops");
        assert_eq!(moved.len(), 16);
        // Every loop moves outwards, the radius doubles.
        for (p, q) in cyl.points().iter().zip(before.iter()) {
            assert_f64_eq!(p.truncate().length(), 2.0, 1e-12);
            assert_f64_eq!(p.z, q.z, 1e-12);
        }
        adjust_loops(&mut cyl, -1.0).expect("Cannot adjust loops");
        for (p, q) in cyl.points().iter().zip(before.iter()) {
            assert_point_eq!(*p, *q, 1e-12);
        }
    }

    #[test]
    fn t_adjust_loops_errors() {
        let mut grid = PolyMesh::quad_grid(3, 1, 1.0).expect("Cannot build grid");
        select_edges(&mut grid, &[(1, 5)]);
        assert!(matches!(
            adjust_loops(&mut grid, 1.0),
            Err(Error::InvalidSelection(msg)) if msg.contains("at least 2 edges")
        ));
        // Two adjacent edges of the same quad are not a pair.
        grid.clear_selection();
        select_edges(&mut grid, &[(1, 5), (0, 1)]);
        assert!(matches!(
            adjust_loops(&mut grid, 1.0),
            Err(Error::InvalidSelection(msg)) if msg.contains("edge pair")
        ));
    }

    #[test]
    fn t_adjust_adjacent_loops_both_sides() {
        let mut grid = PolyMesh::quad_grid(4, 1, 1.0).expect("Cannot build grid");
        select_edges(&mut grid, &[(2, 7)]);
        let moved = adjust_adjacent_loops(&mut grid, -1.0).expect("Cannot adjust loops");
        assert_eq!(moved.len(), 4);
        // Neighbours at x = 1 and x = 3 move halfway towards x = 2.
        assert_point_eq!(grid.point(1.into()), dvec3(1.5, 0.0, 0.0));
        assert_point_eq!(grid.point(6.into()), dvec3(1.5, 1.0, 0.0));
        assert_point_eq!(grid.point(3.into()), dvec3(2.5, 0.0, 0.0));
        assert_point_eq!(grid.point(8.into()), dvec3(2.5, 1.0, 0.0));
        // The selected edge is the pivot.
        assert_point_eq!(grid.point(2.into()), dvec3(2.0, 0.0, 0.0));
        assert_point_eq!(grid.point(7.into()), dvec3(2.0, 1.0, 0.0));
    }

    #[test]
    fn t_adjust_adjacent_loops_on_boundary() {
        let mut grid = PolyMesh::quad_grid(2, 1, 1.0).expect("Cannot build grid");
        select_edges(&mut grid, &[(0, 3)]);
        let before = grid.points().to_vec();
        let moved = adjust_adjacent_loops(&mut grid, 1.0).expect("Cannot adjust loops");
        assert_eq!(moved.len(), 2);
        assert_point_eq!(grid.point(1.into()), dvec3(2.0, 0.0, 0.0));
        assert_point_eq!(grid.point(4.into()), dvec3(2.0, 1.0, 0.0));
        for v in [0u32, 2, 3, 5] {
            assert_eq!(grid.point(v.into()), before[v as usize]);
        }
        adjust_adjacent_loops(&mut grid, -1.0).expect("Cannot adjust loops");
        for (p, q) in grid.points().iter().zip(before.iter()) {
            assert_f64_eq!(p.distance(*q), 0.0, 1e-12);
        }
    }

    #[test]
    fn t_adjust_adjacent_loops_errors() {
        let mut grid = PolyMesh::quad_grid(2, 1, 1.0).expect("Cannot build grid");
        assert!(matches!(
            adjust_adjacent_loops(&mut grid, 1.0),
            Err(Error::InvalidSelection(msg)) if msg.contains("at least 1 edge")
        ));
        // An edge of a lone triangle has no quad on either side.
        let verts = grid.add_vertices(&[
            dvec3(5.0, 0.0, 0.0),
            dvec3(6.0, 0.0, 0.0),
            dvec3(5.0, 1.0, 0.0),
        ]);
        grid.add_face(&verts).expect("Cannot add triangle");
        select_edges(&mut grid, &[(6, 7)]);
        let before = grid.points().to_vec();
        assert!(matches!(
            adjust_adjacent_loops(&mut grid, 1.0),
            Err(Error::InvalidSelection(msg)) if msg.contains("borders a quad")
        ));
        assert_eq!(grid.points(), before.as_slice());
    }
}
