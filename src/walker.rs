/*!
Walking edge rings.

Two edges are parallel when they are opposite edges of the same quad. Starting
from one edge and repeatedly hopping to the opposite edge of the next quad
produces a chain of parallel edges, which the loop tools treat as a loop.

```text
    +-----+-----+-----+
    |     |     |     |
    e0    e1    e2    e3     e0..e3 are parallel
    |     |     |     |
    +-----+-----+-----+
```
*/

use crate::{
    element::{EH, FH, HH, HasTopology},
    iterator,
};

const QUAD: usize = 4;

/// Why a walk stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// There is no face on the far side of the last edge.
    Boundary,
    /// The next face is not a quad.
    Pole(FH),
    /// The walk came back to the edge it started from.
    Closed,
    /// The seed was not part of a quad.
    InvalidSeed,
}

/// An ordered sequence of parallel edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRing {
    /// Halfedges in walking order. Each one is oriented so that the face the
    /// walk crosses next is on its left, except the last one which points into
    /// the face the walk stopped at (or no face).
    pub halfedges: Vec<HH>,
    pub termination: Termination,
}

impl EdgeRing {
    pub fn edges(&self) -> impl Iterator<Item = EH> + use<'_> {
        self.halfedges.iter().map(|h| h.edge())
    }

    pub fn len(&self) -> usize {
        self.halfedges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.halfedges.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.termination == Termination::Closed
    }
}

fn is_quad(mesh: &impl HasTopology, f: FH) -> bool {
    iterator::fh_ccw_iter(mesh.topology(), f).take(QUAD + 1).count() == QUAD
}

/// The halfedge opposite to `h` in the quad incident on `h`.
///
/// The result is oriented along the face loop, i.e. it runs anti-parallel to
/// `h`. Returns `None` if `h` is a boundary halfedge or its face is not a quad.
pub fn opposite_in_quad(mesh: &impl HasTopology, h: HH) -> Option<HH> {
    let f = h.face(mesh)?;
    if !is_quad(mesh, f) {
        return None;
    }
    Some(h.next(mesh).next(mesh))
}

/// Walk across the face incident on `h`, from parallel edge to parallel edge.
///
/// The ring starts with `h`. An empty ring with [`Termination::InvalidSeed`]
/// is returned if `h` has no face or its face is not a quad.
pub fn walk(mesh: &impl HasTopology, h: HH) -> EdgeRing {
    let seed = h.edge();
    let mut halfedges = Vec::new();
    let mut current = h;
    let termination = loop {
        let f = match current.face(mesh) {
            Some(f) => f,
            None if halfedges.is_empty() => break Termination::InvalidSeed,
            None => {
                halfedges.push(current);
                break Termination::Boundary;
            }
        };
        if !is_quad(mesh, f) {
            if halfedges.is_empty() {
                break Termination::InvalidSeed;
            }
            halfedges.push(current);
            break Termination::Pole(f);
        }
        halfedges.push(current);
        // Hop over the quad, then step into the face on the far side.
        let across = current.next(mesh).next(mesh);
        if across.edge() == seed {
            break Termination::Closed;
        }
        current = across.opposite();
    };
    if termination == Termination::InvalidSeed {
        halfedges.clear();
    }
    EdgeRing {
        halfedges,
        termination,
    }
}

/// The full ring through `e`, walking away from it in both directions.
///
/// The returned ring runs from one end to the other. If the ring is closed it
/// starts at `e`. The termination reported is that of the forward walk, except
/// that a ring is only reported closed if it really loops around.
pub fn ring(mesh: &impl HasTopology, e: EH) -> EdgeRing {
    let (h, oh) = e.halfedges();
    let forward = walk(mesh, h);
    if forward.is_closed() {
        return forward;
    }
    let backward = walk(mesh, oh);
    match (forward.is_empty(), backward.is_empty()) {
        (true, true) => forward,
        (true, false) => backward,
        (false, true) => forward,
        (false, false) => {
            // Backward walk, reversed, minus the shared seed, then forward.
            let mut halfedges: Vec<HH> = backward
                .halfedges
                .iter()
                .skip(1)
                .rev()
                .map(|h| h.opposite())
                .collect();
            halfedges.extend_from_slice(&forward.halfedges);
            EdgeRing {
                halfedges,
                termination: forward.termination,
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Termination, opposite_in_quad, ring, walk};
    use crate::{element::Handle, mesh::PolyMesh};

    #[test]
    fn t_walk_across_grid_row() {
        // 4 x 1 grid: vertices 0..=4 on the bottom row, 5..=9 on top.
        let grid = PolyMesh::quad_grid(4, 1, 1.0).expect("Cannot build grid");
        let h = grid
            .find_halfedge(5.into(), 0.into())
            .expect("Cannot find halfedge");
        let ring = walk(&grid, h);
        assert_eq!(ring.termination, Termination::Boundary);
        let mut edges: Vec<_> = ring
            .edges()
            .map(|e| {
                let (a, b) = e.vertices(&grid);
                (a.index().min(b.index()), a.index().max(b.index()))
            })
            .collect();
        assert_eq!(edges.len(), 5);
        edges.dedup();
        assert_eq!(edges, [(0, 5), (1, 6), (2, 7), (3, 8), (4, 9)]);
    }

    #[test]
    fn t_walk_from_boundary_side_is_empty() {
        let grid = PolyMesh::quad_grid(4, 1, 1.0).expect("Cannot build grid");
        // 0 -> 5 has the face on its right, so this halfedge is the boundary.
        let h = grid
            .find_halfedge(0.into(), 5.into())
            .expect("Cannot find halfedge");
        let ring = walk(&grid, h);
        assert!(ring.is_empty());
        assert_eq!(ring.termination, Termination::InvalidSeed);
    }

    #[test]
    fn t_ring_from_middle() {
        let grid = PolyMesh::quad_grid(4, 1, 1.0).expect("Cannot build grid");
        let e = grid
            .find_edge(2.into(), 7.into())
            .expect("Cannot find edge");
        let ring = ring(&grid, e);
        assert_eq!(ring.len(), 5);
        assert!(!ring.is_closed());
        let ends: Vec<u32> = [ring.halfedges[0], ring.halfedges[4]]
            .iter()
            .map(|h| h.edge().vertices(&grid))
            .map(|(a, b)| a.index().min(b.index()))
            .collect();
        let mut sorted = ends.clone();
        sorted.sort();
        assert_eq!(sorted, [0, 4]);
        // Consecutive edges are opposite sides of a quad.
        for pair in ring.halfedges.windows(2) {
            assert_eq!(opposite_in_quad(&grid, pair[0]), Some(pair[1].opposite()));
        }
    }

    #[test]
    fn t_closed_ring_around_cylinder() {
        let cyl = PolyMesh::quad_cylinder(6, 1, 1.0, 1.0).expect("Cannot build cylinder");
        // Vertical edge between vertex 0 and vertex 6.
        let e = cyl.find_edge(0.into(), 6.into()).expect("Cannot find edge");
        let ring = ring(&cyl, e);
        assert!(ring.is_closed());
        assert_eq!(ring.len(), 6);
        assert_eq!(ring.halfedges[0].edge(), e);
    }

    #[test]
    fn t_walk_stops_at_pole() {
        // A quad strip that ends in a triangle.
        let mut mesh = PolyMesh::quad_grid(2, 1, 1.0).expect("Cannot build grid");
        let tip = mesh.add_vertex(glam::dvec3(3.0, 0.5, 0.0));
        let tri = mesh
            .add_tri_face(2.into(), tip, 5.into())
            .expect("Cannot add triangle");
        let h = mesh
            .find_halfedge(3.into(), 0.into())
            .expect("Cannot find halfedge");
        let ring = walk(&mesh, h);
        assert_eq!(ring.termination, Termination::Pole(tri));
        assert_eq!(ring.len(), 3);
        assert_eq!(opposite_in_quad(&mesh, ring.halfedges[2]), None);
    }
}
