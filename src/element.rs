use crate::topol::Topology;
use std::fmt::{Debug, Display};

/// All elements of the mesh implement this trait. They are identified by their
/// index.
pub trait Handle {
    /// The index of the element.
    fn index(&self) -> u32;
}

macro_rules! element_handle {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name {
            idx: u32,
        }

        impl Handle for $name {
            fn index(&self) -> u32 {
                self.idx
            }
        }

        impl From<u32> for $name {
            fn from(idx: u32) -> Self {
                $name { idx }
            }
        }

        impl From<&u32> for $name {
            fn from(idx: &u32) -> Self {
                $name { idx: *idx }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.idx)
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.idx)
            }
        }
    };
}

element_handle!(VH, "Vertex handle.");
element_handle!(HH, "Halfedge handle.");
element_handle!(EH, "Edge handle.");
element_handle!(FH, "Face handle.");

/// Anything that can lend out the halfedge connectivity of a mesh.
pub trait HasTopology {
    fn topology(&self) -> &Topology;
}

impl HasTopology for Topology {
    fn topology(&self) -> &Topology {
        self
    }
}

impl VH {
    pub fn halfedge(self, mesh: &impl HasTopology) -> Option<HH> {
        mesh.topology().vertex_halfedge(self)
    }

    /// Check if this vertex is on the boundary of the `mesh`.
    ///
    /// Isolated vertices count as boundary vertices.
    pub fn is_boundary(self, mesh: &impl HasTopology) -> bool {
        mesh.topology().is_boundary_vertex(self)
    }

    /// The number of edges incident on this vertex.
    pub fn valence(self, mesh: &impl HasTopology) -> usize {
        mesh.topology().vertex_valence(self)
    }
}

impl HH {
    /// The vertex this halfedge points to.
    pub fn head(self, mesh: &impl HasTopology) -> VH {
        mesh.topology().to_vertex(self)
    }

    /// The vertex this halfedge starts from.
    pub fn tail(self, mesh: &impl HasTopology) -> VH {
        mesh.topology().from_vertex(self)
    }

    pub fn opposite(self) -> HH {
        (self.idx ^ 1).into()
    }

    pub fn edge(self) -> EH {
        (self.idx >> 1).into()
    }

    pub fn prev(self, mesh: &impl HasTopology) -> HH {
        mesh.topology().prev_halfedge(self)
    }

    pub fn next(self, mesh: &impl HasTopology) -> HH {
        mesh.topology().next_halfedge(self)
    }

    pub fn face(self, mesh: &impl HasTopology) -> Option<FH> {
        mesh.topology().halfedge_face(self)
    }

    /// A halfedge is on the boundary if no face is incident on it.
    pub fn is_boundary(self, mesh: &impl HasTopology) -> bool {
        mesh.topology().is_boundary_halfedge(self)
    }
}

impl EH {
    pub fn halfedges(self) -> (HH, HH) {
        let hi = self.idx << 1;
        (hi.into(), (hi | 1).into())
    }

    pub fn halfedge(self, flag: bool) -> HH {
        ((self.idx << 1) | if flag { 1 } else { 0 }).into()
    }

    /// The two vertices of this edge, in the direction of the first halfedge.
    pub fn vertices(self, mesh: &impl HasTopology) -> (VH, VH) {
        let h = self.halfedge(false);
        (h.tail(mesh), h.head(mesh))
    }

    /// An edge is on the boundary if either of its halfedges is.
    pub fn is_boundary(self, mesh: &impl HasTopology) -> bool {
        let (h, oh) = self.halfedges();
        h.is_boundary(mesh) || oh.is_boundary(mesh)
    }
}

impl FH {
    pub fn halfedge(self, mesh: &impl HasTopology) -> HH {
        mesh.topology().face_halfedge(self)
    }

    /// Number of vertices (and edges) around this face.
    pub fn valence(self, mesh: &impl HasTopology) -> usize {
        mesh.topology().face_valence(self)
    }
}

#[derive(Debug, Copy, Clone)]
pub(crate) struct Vertex {
    pub(crate) halfedge: Option<HH>,
}

#[derive(Debug, Copy, Clone)]
pub(crate) struct Halfedge {
    pub(crate) face: Option<FH>,
    pub(crate) vertex: VH,
    pub(crate) next: HH,
    pub(crate) prev: HH,
}

#[derive(Debug, Copy, Clone)]
pub(crate) struct Edge {
    pub(crate) halfedges: [Halfedge; 2],
}

#[derive(Debug, Copy, Clone)]
pub(crate) struct Face {
    pub(crate) halfedge: HH,
}

#[cfg(test)]
mod test {
    use super::{Handle, EH, HH};

    #[test]
    fn t_edge_halfedge_pairing() {
        let e: EH = 7.into();
        let (h, oh) = e.halfedges();
        assert_eq!((h.index(), oh.index()), (14, 15));
        assert_eq!(h.opposite(), oh);
        assert_eq!(oh.opposite(), h);
        assert_eq!(h.edge(), e);
        assert_eq!(oh.edge(), e);
        assert_eq!(e.halfedge(true), oh);
    }

    #[test]
    fn t_handle_display() {
        let h: HH = 3.into();
        assert_eq!(format!("{}", h), "HH(3)");
        assert_eq!(format!("{:?}", h), "HH(3)");
    }
}
