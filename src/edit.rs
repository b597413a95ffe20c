use crate::{
    element::{EH, FH, HH, VH},
    error::Error,
    iterator,
    mesh::PolyMesh,
    topol::Topology,
};
use glam::DVec3;

impl Topology {
    /// The halfedge inside face `f` that points to `v`.
    fn face_halfedge_to(&self, f: FH, v: VH) -> Option<HH> {
        iterator::fh_ccw_iter(self, f).find(|h| self.to_vertex(*h) == v)
    }

    /// Split an edge by inserting the isolated vertex `v` in the middle of
    /// it. The halfedge that used to point from the tail to the head now
    /// starts at `v`, and the returned new edge connects the old tail to `v`.
    pub fn split_edge(&mut self, e: EH, v: VH) -> EH {
        let (h0, h1) = e.halfedges();
        let vfrom = self.from_vertex(h0);
        let (ph0, nh1) = (self.prev_halfedge(h0), self.next_halfedge(h1));
        let (f0, f1) = (self.halfedge_face(h0), self.halfedge_face(h1));
        let enew = self.new_edge(vfrom, v);
        let (hnew, ohnew) = enew.halfedges();
        // Rewire halfedge -> vertex.
        self.halfedge_mut(h1).vertex = v;
        // Rewire halfedge -> halfedge.
        self.link_halfedges(hnew, h0);
        self.link_halfedges(h1, ohnew);
        self.link_halfedges(ph0, hnew);
        self.link_halfedges(ohnew, nh1);
        // Rewire halfedge -> face.
        self.halfedge_mut(hnew).face = f0;
        self.halfedge_mut(ohnew).face = f1;
        // Rewire vertex -> halfedge.
        self.set_vertex_halfedge(v, h0);
        self.adjust_outgoing_halfedge(v);
        if self.vertex_halfedge(vfrom) == Some(h0) {
            self.set_vertex_halfedge(vfrom, hnew);
            self.adjust_outgoing_halfedge(vfrom);
        }
        enew
    }

    /// Split face `f` in two by connecting vertices `a` and `b`.
    ///
    /// `f` keeps the part that starts at `a` and goes to `b` along the new
    /// edge. The other part becomes the returned new face. The two vertices
    /// must belong to `f` and must not already be neighbours on it.
    pub fn split_face(&mut self, f: FH, a: VH, b: VH) -> Result<(EH, FH), Error> {
        let (ha, hb) = match (self.face_halfedge_to(f, a), self.face_halfedge_to(f, b)) {
            (Some(ha), Some(hb)) => (ha, hb),
            _ => return Err(Error::CannotSplitFace(a, b, f)),
        };
        if a == b || self.next_halfedge(ha) == hb || self.next_halfedge(hb) == ha {
            return Err(Error::CannotSplitFace(a, b, f));
        }
        let (an, bn) = (self.next_halfedge(ha), self.next_halfedge(hb));
        let enew = self.new_edge(a, b);
        let (hab, hba) = enew.halfedges();
        self.link_halfedges(ha, hab);
        self.link_halfedges(hab, bn);
        self.link_halfedges(hb, hba);
        self.link_halfedges(hba, an);
        self.halfedge_mut(hab).face = Some(f);
        self.face_mut(f).halfedge = hab;
        let fnew = self.new_face(hba);
        let mut h = hba;
        loop {
            self.halfedge_mut(h).face = Some(fnew);
            h = self.next_halfedge(h);
            if h == hba {
                break;
            }
        }
        Ok((enew, fnew))
    }
}

impl PolyMesh {
    /// Split an edge with a new vertex at the given position.
    ///
    /// If successful, a tuple containing the new vertex and the new edge is
    /// returned.
    pub fn split_edge(&mut self, e: EH, pos: DVec3) -> (VH, EH) {
        let v = self.add_vertex(pos);
        let enew = self.topol.split_edge(e, v);
        (v, enew)
    }

    /// Split an edge at its midpoint.
    pub fn split_edge_mid(&mut self, e: EH) -> (VH, EH) {
        let (a, b) = e.vertices(self);
        let mid = self.point(a).lerp(self.point(b), 0.5);
        self.split_edge(e, mid)
    }

    /// Connect two vertices of a face with a new edge, splitting the face.
    pub fn split_face(&mut self, f: FH, a: VH, b: VH) -> Result<(EH, FH), Error> {
        self.topol.split_face(f, a, b)
    }
}

#[cfg(test)]
mod test {
    use crate::{
        element::{HasTopology, Handle},
        iterator,
        mesh::PolyMesh,
        topol::test::quad_box,
    };
    use glam::dvec3;

    #[test]
    fn t_box_split_edge() {
        let mut qbox = quad_box();
        let e = qbox
            .find_edge(4.into(), 5.into())
            .expect("Cannot find edge");
        let (h, oh) = e.halfedges();
        let v = qbox.add_vertex();
        let enew = qbox.split_edge(e, v);
        let (hnew, ohnew) = enew.halfedges();
        assert_eq!(qbox.to_vertex(oh), v);
        assert_eq!(qbox.from_vertex(ohnew), v);
        assert_eq!(qbox.to_vertex(hnew), qbox.from_vertex(h));
        assert_eq!(qbox.prev_halfedge(h), hnew);
        assert_eq!(qbox.next_halfedge(oh), ohnew);
        assert_eq!(qbox.halfedge_face(h), qbox.halfedge_face(hnew));
        assert_eq!(qbox.halfedge_face(oh), qbox.halfedge_face(ohnew));
        assert_eq!(qbox.vertex_valence(v), 2);
        let mut valences: Vec<_> = qbox.faces().map(|f| qbox.face_valence(f)).collect();
        valences.sort();
        assert_eq!(valences, [4, 4, 4, 4, 5, 5]);
    }

    #[test]
    fn t_box_split_face() {
        let mut qbox = quad_box();
        let f = iterator::vf_ccw_iter(&qbox, 4.into())
            .find(|f| iterator::fv_ccw_iter(&qbox, *f).any(|v| v.index() == 6))
            .expect("No face contains both vertices");
        let (e, fnew) = qbox
            .split_face(f, 4.into(), 6.into())
            .expect("Cannot split face");
        assert_eq!(qbox.num_faces(), 7);
        assert_eq!(qbox.face_valence(f), 3);
        assert_eq!(qbox.face_valence(fnew), 3);
        assert!(!qbox.is_boundary_edge(e));
        let (a, b) = e.vertices(&qbox);
        assert_eq!((a.index(), b.index()), (4, 6));
        // Neighbours can't be connected again.
        assert!(qbox.split_face(f, 4.into(), 6.into()).is_err());
    }

    #[test]
    fn t_split_edge_on_boundary_quad() {
        let mut mesh = PolyMesh::new();
        let verts = mesh.add_vertices(&[
            dvec3(0.0, 0.0, 0.0),
            dvec3(1.0, 0.0, 0.0),
            dvec3(1.0, 1.0, 0.0),
            dvec3(0.0, 1.0, 0.0),
        ]);
        mesh.add_face(&verts).expect("Cannot add face");
        let e = mesh
            .topology()
            .find_edge(verts[0], verts[1])
            .expect("Cannot find edge");
        let (v, _) = mesh.split_edge_mid(e);
        assert_eq!(mesh.point(v), dvec3(0.5, 0.0, 0.0));
        assert!(mesh.topology().is_boundary_vertex(v));
        assert_eq!(mesh.face_valence(0.into()), 5);
        mesh.check_topology().expect("Topology is broken");
    }
}
