use crate::{
    element::Handle,
    error::Error,
    iterator,
    topol::Topology,
};

fn check_vertices(mesh: &Topology, hvisited: &mut [bool]) -> Result<(), Error> {
    hvisited.fill(false);
    for v in mesh.vertices() {
        if let Some(h) = v.halfedge(mesh) {
            if !mesh.is_valid_halfedge(h) || h.tail(mesh) != v {
                return Err(Error::InvalidOutgoingHalfedges(v));
            }
            // The outgoing halfedge must be a boundary halfedge, or none of the
            // halfedges are boundary.
            if !h.is_boundary(mesh)
                && iterator::voh_ccw_iter(mesh, v).any(|h| h.is_boundary(mesh))
            {
                return Err(Error::OutgoingHalfedgeNotBoundary(v));
            }
        }
        // The ccw and cw circulators must visit the same halfedges.
        for h in iterator::voh_ccw_iter(mesh, v) {
            if std::mem::replace(&mut hvisited[h.index() as usize], true) {
                return Err(Error::InvalidOutgoingHalfedges(v));
            }
        }
        for h in iterator::voh_cw_iter(mesh, v) {
            if !std::mem::replace(&mut hvisited[h.index() as usize], false) {
                return Err(Error::InvalidOutgoingHalfedges(v));
            }
        }
    }
    Ok(())
}

fn check_edges(mesh: &Topology, hflags: &mut [bool]) -> Result<(), Error> {
    for h in mesh.halfedges() {
        let (head, tail) = (h.head(mesh), h.tail(mesh));
        if head == tail {
            return Err(Error::DegenerateHalfedge(h));
        }
        let (prev, next) = (h.prev(mesh), h.next(mesh));
        if prev.next(mesh) != h
            || next.prev(mesh) != h
            || head != next.tail(mesh)
            || tail != prev.head(mesh)
        {
            return Err(Error::InvalidHalfedgeLink(h));
        }
        if !iterator::voh_ccw_iter(mesh, tail).any(|hh| hh == h)
            || !iterator::vih_ccw_iter(mesh, head).any(|hh| hh == h)
        {
            return Err(Error::InvalidHalfedgeVertexLink(h));
        }
    }
    // Every halfedge belongs to exactly one loop, and the whole loop agrees on
    // the face.
    hflags.fill(false);
    for h in mesh.halfedges() {
        if hflags[h.index() as usize] {
            continue;
        }
        let f = h.face(mesh);
        for lh in iterator::loop_ccw_iter(mesh, h) {
            if std::mem::replace(&mut hflags[lh.index() as usize], true) {
                return Err(Error::InvalidLoopTopology(lh));
            }
            if lh.face(mesh) != f {
                return Err(Error::InconsistentFaceInLoop(lh));
            }
        }
    }
    Ok(())
}

fn check_faces(mesh: &Topology) -> Result<(), Error> {
    for f in mesh.faces() {
        let h = f.halfedge(mesh);
        if h.face(mesh) != Some(f) {
            return Err(Error::InvalidFaceHalfedgeLink(f, h));
        }
    }
    Ok(())
}

impl Topology {
    pub fn check(&self) -> Result<(), Error> {
        let mut hvisited = vec![false; self.num_halfedges()].into_boxed_slice();
        check_vertices(self, &mut hvisited)?;
        check_edges(self, &mut hvisited)?;
        check_faces(self)?;
        Ok(())
    }
}
