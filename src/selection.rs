use crate::{
    element::{EH, VH},
    error::Error,
    mesh::PolyMesh,
};
use std::collections::BTreeMap;

/// The selection of a mesh, captured when an operator starts.
///
/// Operators never look at the live selection flags after taking this
/// snapshot, so writes they make cannot change what they are working on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub vertices: Vec<VH>,
    pub edges: Vec<EH>,
}

impl Selection {
    /// Read the selection of `mesh`.
    ///
    /// If no edge is selected, every edge with both its vertices selected is
    /// treated as selected. This matches editing in vertex select mode.
    pub fn from_mesh(mesh: &PolyMesh) -> Self {
        let vertices: Vec<VH> = mesh.selected_vertices().collect();
        let mut edges: Vec<EH> = mesh.selected_edges().collect();
        if edges.is_empty() {
            edges.extend(mesh.edges().filter(|e| {
                let (a, b) = e.vertices(mesh);
                mesh.is_vertex_selected(a) && mesh.is_vertex_selected(b)
            }));
        }
        Selection { vertices, edges }
    }

    /// Group the selected edges into chains of vertices.
    ///
    /// Every chain is a simple open path. Selected vertices that are not on any
    /// selected edge come out as chains of one vertex. Chains are sorted by
    /// their smallest vertex, and each chain starts at its endpoint with the
    /// smaller index.
    pub fn chains(&self, mesh: &PolyMesh) -> Result<Vec<Vec<VH>>, Error> {
        let mut adjacency: BTreeMap<VH, Vec<VH>> = BTreeMap::new();
        for v in &self.vertices {
            adjacency.entry(*v).or_default();
        }
        for e in &self.edges {
            let (a, b) = e.vertices(mesh);
            adjacency.entry(a).or_default().push(b);
            adjacency.entry(b).or_default().push(a);
        }
        if let Some((v, _)) = adjacency.iter().find(|(_, nbs)| nbs.len() > 2) {
            return Err(Error::selection(format!(
                "the selection branches at vertex {}",
                v
            )));
        }
        let mut visited: BTreeMap<VH, bool> = adjacency.keys().map(|v| (*v, false)).collect();
        let mut chains = Vec::new();
        // Start from endpoints, so every open chain is walked from one end.
        let starts: Vec<VH> = adjacency
            .iter()
            .filter(|(_, nbs)| nbs.len() < 2)
            .map(|(v, _)| *v)
            .collect();
        for start in starts {
            if visited[&start] {
                continue;
            }
            let mut chain = vec![start];
            visited.insert(start, true);
            let mut prev = None;
            let mut current = start;
            while let Some(next) = adjacency[&current]
                .iter()
                .copied()
                .find(|n| Some(*n) != prev)
            {
                chain.push(next);
                visited.insert(next, true);
                prev = Some(current);
                current = next;
            }
            chains.push(chain);
        }
        if let Some((v, _)) = visited.iter().find(|(_, seen)| !**seen) {
            // Anything left over has degree two everywhere, i.e. a closed loop.
            return Err(Error::selection(format!(
                "the selection contains a closed loop through vertex {}",
                v
            )));
        }
        chains.sort_by_key(|chain| chain.iter().min().copied());
        Ok(chains)
    }
}

#[cfg(test)]
mod test {
    use super::Selection;
    use crate::{element::Handle, error::Error, mesh::PolyMesh};

    fn indices(chain: &[crate::element::VH]) -> Vec<u32> {
        chain.iter().map(|v| v.index()).collect()
    }

    #[test]
    fn t_vertex_mode_induces_edges() {
        let mut grid = PolyMesh::quad_grid(3, 2, 1.0).expect("Cannot build grid");
        for v in [0u32, 1, 2, 3] {
            grid.select_vertex(v.into(), true);
        }
        let sel = Selection::from_mesh(&grid);
        assert_eq!(sel.vertices.len(), 4);
        assert_eq!(sel.edges.len(), 3);
        let chains = sel.chains(&grid).expect("Cannot build chains");
        assert_eq!(chains.len(), 1);
        assert_eq!(indices(&chains[0]), [0, 1, 2, 3]);
    }

    #[test]
    fn t_two_chains_in_order() {
        let mut grid = PolyMesh::quad_grid(3, 2, 1.0).expect("Cannot build grid");
        for (a, b) in [(9u32, 10u32), (1, 2), (8, 9), (0, 1)] {
            let e = grid.find_edge(a.into(), b.into()).expect("Cannot find edge");
            grid.select_edge(e, true);
        }
        let chains = Selection::from_mesh(&grid)
            .chains(&grid)
            .expect("Cannot build chains");
        assert_eq!(chains.len(), 2);
        assert_eq!(indices(&chains[0]), [0, 1, 2]);
        assert_eq!(indices(&chains[1]), [8, 9, 10]);
    }

    #[test]
    fn t_lone_vertex_is_its_own_chain() {
        let mut grid = PolyMesh::quad_grid(3, 2, 1.0).expect("Cannot build grid");
        grid.select_vertex(5.into(), true);
        let chains = Selection::from_mesh(&grid)
            .chains(&grid)
            .expect("Cannot build chains");
        assert_eq!(chains, vec![vec![5.into()]]);
    }

    #[test]
    fn t_branching_and_closed_selections_fail() {
        let mut grid = PolyMesh::quad_grid(3, 2, 1.0).expect("Cannot build grid");
        // A T junction at vertex 5.
        for (a, b) in [(4u32, 5u32), (5, 6), (5, 9)] {
            let e = grid.find_edge(a.into(), b.into()).expect("Cannot find edge");
            grid.select_edge(e, true);
        }
        assert!(matches!(
            Selection::from_mesh(&grid).chains(&grid),
            Err(Error::InvalidSelection(_))
        ));
        grid.clear_selection();
        // The boundary of the first quad.
        grid.select_face(0.into(), true);
        assert!(matches!(
            Selection::from_mesh(&grid).chains(&grid),
            Err(Error::InvalidSelection(_))
        ));
    }
}
