use crate::element::{FH, HH, VH};
#[cfg(feature = "obj")]
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Selection.
    /// The live selection does not have the shape an operator expects. This is
    /// the error reported back to the user; the mesh is left untouched.
    #[error("invalid selection: {0}")]
    InvalidSelection(String),
    // Topology.
    #[error("vertex {0} is not on the boundary, a face cannot be attached to it")]
    ComplexVertex(VH),
    #[error("halfedge {0} already has a face")]
    ComplexHalfedge(HH),
    #[error("failed to relink the patch around a new face")]
    PatchRelinkingFailed,
    #[error("a face needs at least 3 vertices, got {0}")]
    DegenerateFace(usize),
    #[error("vertices {0} and {1} cannot be connected inside face {2}")]
    CannotSplitFace(VH, VH, FH),
    // Consistency checks.
    #[error("halfedge {0} starts and ends at the same vertex")]
    DegenerateHalfedge(HH),
    #[error("halfedge {0} has broken next / prev links")]
    InvalidHalfedgeLink(HH),
    #[error("halfedge {0} is missing from the circulators of its vertices")]
    InvalidHalfedgeVertexLink(HH),
    #[error("outgoing halfedges of vertex {0} are inconsistent")]
    InvalidOutgoingHalfedges(VH),
    #[error("vertex {0} is on the boundary but its outgoing halfedge is not")]
    OutgoingHalfedgeNotBoundary(VH),
    #[error("halfedge {0} is visited twice while walking loops")]
    InvalidLoopTopology(HH),
    #[error("halfedge {0} disagrees with its loop about the incident face")]
    InconsistentFaceInLoop(HH),
    #[error("face {0} points to halfedge {1} which does not belong to it")]
    InvalidFaceHalfedgeLink(FH, HH),
    // Obj.
    #[cfg(feature = "obj")]
    #[error("failed to load {}: {message}", path.display())]
    ObjLoadFailed { path: PathBuf, message: String },
    #[cfg(feature = "obj")]
    #[error("expected a multiple of 3 coordinates, got {0}")]
    IncorrectNumberOfCoordinates(usize),
}

impl Error {
    pub(crate) fn selection(msg: impl Into<String>) -> Self {
        Error::InvalidSelection(msg.into())
    }
}
