/*!
Loop tools for quad dominant polygon meshes.

This crate contains a small halfedge polygon mesh, in the style of
[OpenMesh](https://www.graphics.rwth-aachen.de/software/openmesh/), and a set of
tools that work on the edge loops of such meshes.

# Overview

+ [`PolyMesh`] holds the topology of the mesh as a halfedge datastructure,
  the 64 bit position of every vertex, and selection flags for vertices, edges
  and faces. The tools read the selection to decide what to work on, the way
  tools in a modelling application do.

+ The [`walker`] module walks edge rings, i.e. chains of edges that are
  opposite sides of quads. A ring stops at the boundary, at a face that is not
  a quad, or when it comes back to where it started.

+ [`build::build_end`] and [`build::build_corner`] add quads so that loops can
  end or turn a corner. [`adjust::adjust_loops`] and
  [`adjust::adjust_adjacent_loops`] slide loops towards or away from each
  other without changing the topology.

+ The [`operator`] module wraps every tool as a named operator with a single
  parameter, and runs operators as transactions: a failed operator leaves the
  mesh exactly as it was.

Meshes can be built with the functions in [`PolyMesh`], from the primitives
like [`PolyMesh::quad_grid`], or loaded from OBJ files when the `obj` feature
is enabled.

# Logging

The crate logs through [`tracing`](https://crates.io/crates/tracing). It
never installs a subscriber, that is up to the application.
*/

pub mod adjust;
pub mod build;
mod check;
mod edit;
mod element;
mod error;
mod iterator;
mod macros;
mod mesh;
#[cfg(feature = "obj")]
mod obj;
pub mod operator;
mod primitive;
pub mod selection;
mod status;
mod topol;
pub mod walker;

pub use element::{EH, FH, HH, Handle, HasTopology, VH};
pub use error::Error;
pub use mesh::PolyMesh;
pub use operator::{MeshOperator, Report};
pub use selection::Selection;
pub use topol::Topology;
