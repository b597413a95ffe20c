use crate::{
    element::{EH, FH, HH, Handle, HasTopology, VH},
    error::Error,
    iterator,
    topol::{TopolCache, Topology},
};
use glam::DVec3;

/// A polygon mesh with 64 bit vertex positions and per element selection
/// flags.
///
/// This is the mesh the operators edit. It can be cloned cheaply enough to
/// serve as an undo snapshot for a single operator call.
#[derive(Clone, Default)]
pub struct PolyMesh {
    pub(crate) topol: Topology,
    cache: TopolCache,
    points: Vec<DVec3>,
}

impl HasTopology for PolyMesh {
    fn topology(&self) -> &Topology {
        &self.topol
    }
}

impl PolyMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nverts: usize, nedges: usize, nfaces: usize) -> Self {
        PolyMesh {
            topol: Topology::with_capacity(nverts, nedges, nfaces),
            cache: TopolCache::default(),
            points: Vec::with_capacity(nverts),
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.topol.num_vertices()
    }

    pub fn num_edges(&self) -> usize {
        self.topol.num_edges()
    }

    pub fn num_halfedges(&self) -> usize {
        self.topol.num_halfedges()
    }

    pub fn num_faces(&self) -> usize {
        self.topol.num_faces()
    }

    pub fn vertices(&self) -> impl Iterator<Item = VH> + use<> {
        self.topol.vertices()
    }

    pub fn edges(&self) -> impl Iterator<Item = EH> + use<> {
        self.topol.edges()
    }

    pub fn faces(&self) -> impl Iterator<Item = FH> + use<> {
        self.topol.faces()
    }

    pub fn face_valence(&self, f: FH) -> usize {
        self.topol.face_valence(f)
    }

    pub fn face_vertices(&self, f: FH) -> Vec<VH> {
        self.topol.face_vertices(f)
    }

    pub fn find_halfedge(&self, from: VH, to: VH) -> Option<HH> {
        self.topol.find_halfedge(from, to)
    }

    pub fn find_edge(&self, a: VH, b: VH) -> Option<EH> {
        self.topol.find_edge(a, b)
    }

    pub fn fv_ccw_iter(&self, f: FH) -> impl Iterator<Item = VH> + use<'_> {
        iterator::fv_ccw_iter(&self.topol, f)
    }

    pub fn vf_ccw_iter(&self, v: VH) -> impl Iterator<Item = FH> + use<'_> {
        iterator::vf_ccw_iter(&self.topol, v)
    }

    pub fn vv_ccw_iter(&self, v: VH) -> impl Iterator<Item = VH> + use<'_> {
        iterator::vv_ccw_iter(&self.topol, v)
    }

    // Geometry.

    pub fn point(&self, v: VH) -> DVec3 {
        self.points[v.index() as usize]
    }

    pub fn set_point(&mut self, v: VH, pos: DVec3) {
        self.points[v.index() as usize] = pos;
    }

    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// Scale the given vertices about `center`.
    pub fn scale_about(&mut self, verts: &[VH], center: DVec3, scale: f64) {
        for v in verts {
            let p = self.point(*v);
            self.set_point(*v, center + (p - center) * scale);
        }
    }

    /// Run `edit` on the mesh, restoring the mesh if it returns an error.
    pub fn transaction<T>(
        &mut self,
        edit: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let snapshot = self.clone();
        edit(self).inspect_err(|_| *self = snapshot)
    }

    pub fn calc_face_centroid(&self, f: FH) -> DVec3 {
        let (sum, count) = self
            .fv_ccw_iter(f)
            .fold((DVec3::ZERO, 0usize), |(sum, count), v| {
                (sum + self.point(v), count + 1)
            });
        sum / count as f64
    }

    // Creation.

    pub fn add_vertex(&mut self, pos: DVec3) -> VH {
        let v = self.topol.add_vertex();
        self.points.push(pos);
        v
    }

    pub fn add_vertices(&mut self, positions: &[DVec3]) -> Vec<VH> {
        positions.iter().map(|p| self.add_vertex(*p)).collect()
    }

    pub fn add_face(&mut self, verts: &[VH]) -> Result<FH, Error> {
        self.topol.add_face(verts, &mut self.cache)
    }

    pub fn add_tri_face(&mut self, v0: VH, v1: VH, v2: VH) -> Result<FH, Error> {
        self.add_face(&[v0, v1, v2])
    }

    pub fn add_quad_face(&mut self, v0: VH, v1: VH, v2: VH, v3: VH) -> Result<FH, Error> {
        self.add_face(&[v0, v1, v2, v3])
    }

    // Selection.

    pub fn is_vertex_selected(&self, v: VH) -> bool {
        self.topol.vstatus[v.index() as usize].selected()
    }

    pub fn is_edge_selected(&self, e: EH) -> bool {
        self.topol.estatus[e.index() as usize].selected()
    }

    pub fn is_face_selected(&self, f: FH) -> bool {
        self.topol.fstatus[f.index() as usize].selected()
    }

    pub fn select_vertex(&mut self, v: VH, flag: bool) {
        self.topol.vstatus[v.index() as usize].set_selected(flag);
    }

    /// Selecting an edge also selects its vertices, the way an editor does.
    pub fn select_edge(&mut self, e: EH, flag: bool) {
        self.topol.estatus[e.index() as usize].set_selected(flag);
        if flag {
            let (a, b) = e.vertices(self);
            self.select_vertex(a, true);
            self.select_vertex(b, true);
        }
    }

    /// Selecting a face also selects its edges and vertices.
    pub fn select_face(&mut self, f: FH, flag: bool) {
        self.topol.fstatus[f.index() as usize].set_selected(flag);
        if flag {
            let edges: Vec<EH> = iterator::fh_ccw_iter(&self.topol, f)
                .map(|h| h.edge())
                .collect();
            for e in edges {
                self.select_edge(e, true);
            }
        }
    }

    pub fn clear_selection(&mut self) {
        let topol = &mut self.topol;
        for s in topol
            .vstatus
            .iter_mut()
            .chain(topol.estatus.iter_mut())
            .chain(topol.fstatus.iter_mut())
        {
            s.set_selected(false);
        }
    }

    pub fn selected_vertices(&self) -> impl Iterator<Item = VH> + use<'_> {
        self.vertices().filter(|v| self.is_vertex_selected(*v))
    }

    pub fn selected_edges(&self) -> impl Iterator<Item = EH> + use<'_> {
        self.edges().filter(|e| self.is_edge_selected(*e))
    }

    pub fn selected_faces(&self) -> impl Iterator<Item = FH> + use<'_> {
        self.faces().filter(|f| self.is_face_selected(*f))
    }

    /// Check the topology of the mesh.
    ///
    /// This function will return an error if any errors are found in the
    /// topolgy.
    pub fn check_topology(&self) -> Result<(), Error> {
        self.topol.check()
    }
}
