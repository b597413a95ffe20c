use crate::{
    element::{Edge, Face, Halfedge, Handle, Vertex, EH, FH, HH, VH},
    error::Error,
    iterator,
    status::Status,
};

/// Scratch buffers reused across calls to [`Topology::add_face`].
#[derive(Default, Clone)]
pub(crate) struct TopolCache {
    loop_halfedges: Vec<Option<HH>>,
    needs_adjust: Vec<bool>,
    next_cache: Vec<(HH, HH)>,
}

impl TopolCache {
    fn clear(&mut self) {
        self.loop_halfedges.clear();
        self.needs_adjust.clear();
        self.next_cache.clear();
    }
}

/// Halfedge connectivity of a polygon mesh, together with the selection state
/// of every element.
#[derive(Clone, Default)]
pub struct Topology {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    faces: Vec<Face>,
    pub(crate) vstatus: Vec<Status>,
    pub(crate) estatus: Vec<Status>,
    pub(crate) fstatus: Vec<Status>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nverts: usize, nedges: usize, nfaces: usize) -> Self {
        Topology {
            vertices: Vec::with_capacity(nverts),
            edges: Vec::with_capacity(nedges),
            faces: Vec::with_capacity(nfaces),
            vstatus: Vec::with_capacity(nverts),
            estatus: Vec::with_capacity(nedges),
            fstatus: Vec::with_capacity(nfaces),
        }
    }

    fn vertex(&self, v: VH) -> &Vertex {
        &self.vertices[v.index() as usize]
    }

    pub(crate) fn halfedge(&self, h: HH) -> &Halfedge {
        &self.edges[(h.index() >> 1) as usize].halfedges[(h.index() & 1) as usize]
    }

    pub(crate) fn halfedge_mut(&mut self, h: HH) -> &mut Halfedge {
        &mut self.edges[(h.index() >> 1) as usize].halfedges[(h.index() & 1) as usize]
    }

    pub(crate) fn face_mut(&mut self, f: FH) -> &mut Face {
        &mut self.faces[f.index() as usize]
    }

    pub fn vertex_halfedge(&self, v: VH) -> Option<HH> {
        self.vertex(v).halfedge
    }

    pub fn to_vertex(&self, h: HH) -> VH {
        self.halfedge(h).vertex
    }

    pub fn from_vertex(&self, h: HH) -> VH {
        self.halfedge(h.opposite()).vertex
    }

    pub fn prev_halfedge(&self, h: HH) -> HH {
        self.halfedge(h).prev
    }

    pub fn next_halfedge(&self, h: HH) -> HH {
        self.halfedge(h).next
    }

    pub fn halfedge_face(&self, h: HH) -> Option<FH> {
        self.halfedge(h).face
    }

    pub fn face_halfedge(&self, f: FH) -> HH {
        self.faces[f.index() as usize].halfedge
    }

    pub fn is_boundary_halfedge(&self, h: HH) -> bool {
        self.halfedge(h).face.is_none()
    }

    pub fn is_boundary_edge(&self, e: EH) -> bool {
        let (h, oh) = e.halfedges();
        self.is_boundary_halfedge(h) || self.is_boundary_halfedge(oh)
    }

    pub fn is_boundary_vertex(&self, v: VH) -> bool {
        match self.vertex(v).halfedge {
            Some(h) => self.is_boundary_halfedge(h),
            None => true,
        }
    }

    pub fn is_valid_halfedge(&self, h: HH) -> bool {
        (h.index() as usize) < self.num_halfedges()
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn num_halfedges(&self) -> usize {
        self.num_edges() * 2
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    pub fn vertices(&self) -> impl Iterator<Item = VH> + use<> {
        (0..(self.num_vertices() as u32)).map(|i| i.into())
    }

    pub fn halfedges(&self) -> impl Iterator<Item = HH> + use<> {
        (0..(self.num_halfedges() as u32)).map(|i| i.into())
    }

    pub fn edges(&self) -> impl Iterator<Item = EH> + use<> {
        (0..(self.num_edges() as u32)).map(|i| i.into())
    }

    pub fn faces(&self) -> impl Iterator<Item = FH> + use<> {
        (0..(self.num_faces() as u32)).map(|i| i.into())
    }

    pub fn find_halfedge(&self, from: VH, to: VH) -> Option<HH> {
        iterator::voh_ccw_iter(self, from).find(|h| self.to_vertex(*h) == to)
    }

    pub fn find_edge(&self, a: VH, b: VH) -> Option<EH> {
        self.find_halfedge(a, b).map(|h| h.edge())
    }

    pub fn vertex_valence(&self, v: VH) -> usize {
        iterator::voh_ccw_iter(self, v).count()
    }

    pub fn face_valence(&self, f: FH) -> usize {
        iterator::fh_ccw_iter(self, f).count()
    }

    /// Vertices of the face in counter clockwise order.
    pub fn face_vertices(&self, f: FH) -> Vec<VH> {
        iterator::fv_ccw_iter(self, f).collect()
    }

    pub fn is_manifold_vertex(&self, v: VH) -> bool {
        /* The first outgoing halfedge is the boundary one if there is any. Any
         * other boundary halfedge around the vertex means there is more than
         * one gap, so we skip the first halfedge and check the rest. */
        iterator::voh_ccw_iter(self, v)
            .skip(1)
            .all(|h| !self.is_boundary_halfedge(h))
    }

    pub(crate) fn set_vertex_halfedge(&mut self, v: VH, h: HH) {
        self.vertices[v.index() as usize].halfedge = Some(h);
    }

    /// Makes sure the outgoing halfedge of `v` is a boundary halfedge, if it
    /// has any.
    pub(crate) fn adjust_outgoing_halfedge(&mut self, v: VH) {
        let h = iterator::voh_ccw_iter(self, v).find(|h| self.is_boundary_halfedge(*h));
        if let Some(h) = h {
            self.set_vertex_halfedge(v, h)
        }
    }

    pub(crate) fn link_halfedges(&mut self, prev: HH, next: HH) {
        self.halfedge_mut(prev).next = next;
        self.halfedge_mut(next).prev = prev;
    }

    pub fn add_vertex(&mut self) -> VH {
        let vi = self.vertices.len() as u32;
        self.vertices.push(Vertex { halfedge: None });
        self.vstatus.push(Status::default());
        vi.into()
    }

    /// Create an edge from `from` to `to`. The links of both halfedges point
    /// back to themselves, the caller is responsible for wiring them.
    pub(crate) fn new_edge(&mut self, from: VH, to: VH) -> EH {
        let ei = self.edges.len() as u32;
        let (h, oh) = EH::from(ei).halfedges();
        self.edges.push(Edge {
            halfedges: [
                Halfedge {
                    face: None,
                    vertex: to,
                    next: h,
                    prev: h,
                },
                Halfedge {
                    face: None,
                    vertex: from,
                    next: oh,
                    prev: oh,
                },
            ],
        });
        self.estatus.push(Status::default());
        ei.into()
    }

    pub(crate) fn new_face(&mut self, halfedge: HH) -> FH {
        let fi = self.faces.len() as u32;
        self.faces.push(Face { halfedge });
        self.fstatus.push(Status::default());
        fi.into()
    }

    /// Add a face with the given vertices, in counter clockwise order.
    ///
    /// Existing boundary edges are reused, missing edges are created. Nothing
    /// is modified if the face cannot be added without making the mesh
    /// non-manifold.
    pub(crate) fn add_face(&mut self, verts: &[VH], cache: &mut TopolCache) -> Result<FH, Error> {
        let n = verts.len();
        if n < 3 {
            return Err(Error::DegenerateFace(n));
        }
        cache.clear();
        // Check for topological errors.
        for i in 0..n {
            if !self.is_boundary_vertex(verts[i]) {
                return Err(Error::ComplexVertex(verts[i]));
            }
            let h = self.find_halfedge(verts[i], verts[(i + 1) % n]);
            if let Some(h) = h {
                if !self.is_boundary_halfedge(h) {
                    return Err(Error::ComplexHalfedge(h));
                }
            }
            cache.loop_halfedges.push(h);
            cache.needs_adjust.push(false);
        }
        // Consecutive existing halfedges that are not linked to each other
        // mean a patch has to be moved out of the way.
        for i in 0..n {
            let (inner_prev, inner_next) = match (
                cache.loop_halfedges[i],
                cache.loop_halfedges[(i + 1) % n],
            ) {
                (Some(prev), Some(next)) if self.next_halfedge(prev) != next => (prev, next),
                _ => continue,
            };
            // Find a free gap around the shared vertex.
            let mut boundary_prev = inner_next.opposite();
            loop {
                boundary_prev = self.next_halfedge(boundary_prev).opposite();
                if self.is_boundary_halfedge(boundary_prev) {
                    break;
                }
            }
            if boundary_prev == inner_prev {
                return Err(Error::PatchRelinkingFailed);
            }
            let boundary_next = self.next_halfedge(boundary_prev);
            let patch_start = self.next_halfedge(inner_prev);
            let patch_end = self.prev_halfedge(inner_next);
            cache.next_cache.extend_from_slice(&[
                (boundary_prev, patch_start),
                (patch_end, boundary_next),
                (inner_prev, inner_next),
            ]);
        }
        // No more errors from this point on. Create the missing edges.
        let halfedges: Vec<HH> = (0..n)
            .map(|i| match cache.loop_halfedges[i] {
                Some(h) => h,
                None => self.new_edge(verts[i], verts[(i + 1) % n]).halfedge(false),
            })
            .collect();
        let fnew = self.new_face(halfedges[n - 1]);
        // Wire the halfedges around each corner of the new face.
        for i in 0..n {
            let ii = (i + 1) % n;
            let v = verts[ii];
            let inner_prev = halfedges[i];
            let inner_next = halfedges[ii];
            let prev_is_new = cache.loop_halfedges[i].is_none();
            let next_is_new = cache.loop_halfedges[ii].is_none();
            if prev_is_new || next_is_new {
                let outer_prev = inner_next.opposite();
                let outer_next = inner_prev.opposite();
                match (prev_is_new, next_is_new) {
                    (true, false) => {
                        let boundary_prev = self.prev_halfedge(inner_next);
                        cache.next_cache.push((boundary_prev, outer_next));
                        self.set_vertex_halfedge(v, outer_next);
                    }
                    (false, true) => {
                        let boundary_next = self.next_halfedge(inner_prev);
                        cache.next_cache.push((outer_prev, boundary_next));
                        self.set_vertex_halfedge(v, boundary_next);
                    }
                    _ => match self.vertex_halfedge(v) {
                        None => {
                            self.set_vertex_halfedge(v, outer_next);
                            cache.next_cache.push((outer_prev, outer_next));
                        }
                        Some(boundary_next) => {
                            let boundary_prev = self.prev_halfedge(boundary_next);
                            cache.next_cache.push((boundary_prev, outer_next));
                            cache.next_cache.push((outer_prev, boundary_next));
                        }
                    },
                }
                cache.next_cache.push((inner_prev, inner_next));
            } else {
                cache.needs_adjust[ii] = self.vertex_halfedge(v) == Some(inner_next);
            }
            self.halfedge_mut(inner_prev).face = Some(fnew);
        }
        for (prev, next) in cache.next_cache.drain(..) {
            self.link_halfedges(prev, next);
        }
        for i in 0..n {
            if cache.needs_adjust[i] {
                self.adjust_outgoing_halfedge(verts[i]);
            }
        }
        Ok(fnew)
    }
}
