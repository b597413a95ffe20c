/*!
The tools wrapped as named operators, the way an editor exposes them.

Every operator has an id, a label for menus, a one line description and a
single float parameter. [`run`] executes an operator on a mesh as a single
transaction: if the operator fails, the mesh is restored to the state it was
in before the call.

```
use niche_loops::{PolyMesh, operator::{self, AdjustLoops}};

let mut grid = PolyMesh::quad_grid(3, 1, 1.0).unwrap();
for (a, b) in [(1u32, 5u32), (2, 6)] {
    let e = grid.find_edge(a.into(), b.into()).unwrap();
    grid.select_edge(e, true);
}
let report = operator::run(&AdjustLoops::default().with_factor(0.5), &mut grid).unwrap();
assert_eq!(report.vertices_moved, 4);
```
*/

use crate::{adjust, build, error::Error, mesh::PolyMesh};
use tracing::{info, warn};

/// The one tunable parameter of an operator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatParam {
    pub name: &'static str,
    pub default: f64,
    pub min: f64,
    pub max: f64,
}

impl FloatParam {
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

pub trait MeshOperator {
    /// Unique identifier, used to look the operator up.
    fn id(&self) -> &'static str;

    fn label(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn param(&self) -> FloatParam;

    /// Current value of the parameter.
    fn factor(&self) -> f64;

    /// Set the parameter, clamped to its range.
    fn set_factor(&mut self, value: f64);

    /// Apply the operator to the selection of `mesh`.
    ///
    /// This does not roll back on failure. Use [`run`] for that.
    fn execute(&self, mesh: &mut PolyMesh) -> Result<(), Error>;
}

macro_rules! mesh_operator {
    ($(#[$meta:meta])* $name:ident {
        id: $id:literal,
        label: $label:literal,
        description: $description:literal,
        param: $param:literal in $min:literal ..= $max:literal, default $default:literal,
        execute: $exec:path $(,)?
    }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $name {
            factor: f64,
        }

        impl $name {
            pub const PARAM: FloatParam = FloatParam {
                name: $param,
                default: $default,
                min: $min,
                max: $max,
            };

            pub fn with_factor(mut self, factor: f64) -> Self {
                self.set_factor(factor);
                self
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name {
                    factor: Self::PARAM.default,
                }
            }
        }

        impl MeshOperator for $name {
            fn id(&self) -> &'static str {
                $id
            }

            fn label(&self) -> &'static str {
                $label
            }

            fn description(&self) -> &'static str {
                $description
            }

            fn param(&self) -> FloatParam {
                Self::PARAM
            }

            fn factor(&self) -> f64 {
                self.factor
            }

            fn set_factor(&mut self, value: f64) {
                self.factor = Self::PARAM.clamp(value);
            }

            fn execute(&self, mesh: &mut PolyMesh) -> Result<(), Error> {
                $exec(mesh, self.factor).map(|_| ())
            }
        }
    };
}

mesh_operator!(
    /// Wraps [`build::build_end`].
    BuildEnd {
        id: "mesh.nicheloops_build_end",
        label: "Build End",
        description: "Builds a quad ending to two parallel loops based on the vertex or edge selection",
        param: "slide_edge" in 0.0..=1.0, default 0.5,
        execute: build::build_end,
    }
);

mesh_operator!(
    /// Wraps [`build::build_corner`].
    BuildCorner {
        id: "mesh.nicheloops_build_corner",
        label: "Build Corner",
        description: "Builds a quad corner based on the vertex selection to make an edge loop turn",
        param: "slide_vertex" in 0.0..=1.0, default 0.5,
        execute: build::build_corner,
    }
);

mesh_operator!(
    /// Wraps [`adjust::adjust_loops`].
    AdjustLoops {
        id: "mesh.nicheloops_adjust_loops",
        label: "Adjust Loops",
        description: "Select two or more parallel edges and adjust the value to change the distance between them",
        param: "adjustment" in -1.0..=1.0, default 0.0,
        execute: adjust::adjust_loops,
    }
);

mesh_operator!(
    /// Wraps [`adjust::adjust_adjacent_loops`].
    AdjustAdjacentLoops {
        id: "mesh.nicheloops_adjust_adjacent_loops",
        label: "Adjust Adjacent Loops",
        description: "Select one or more edges and adjust the value to change the positions of the edges on either side of the selected loop",
        param: "adjustment" in -1.0..=1.0, default 0.0,
        execute: adjust::adjust_adjacent_loops,
    }
);

/// What a successful operator call changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Report {
    pub faces_added: usize,
    pub vertices_added: usize,
    /// Vertices that existed before the call and are now somewhere else.
    pub vertices_moved: usize,
}

impl Report {
    fn compare(before: &PolyMesh, after: &PolyMesh) -> Self {
        Report {
            faces_added: after.num_faces() - before.num_faces(),
            vertices_added: after.num_vertices() - before.num_vertices(),
            vertices_moved: before
                .points()
                .iter()
                .zip(after.points())
                .filter(|(p, q)| p != q)
                .count(),
        }
    }
}

/// Execute `op` on `mesh`, restoring the mesh if the operator fails.
pub fn run(op: &dyn MeshOperator, mesh: &mut PolyMesh) -> Result<Report, Error> {
    let snapshot = mesh.clone();
    match op.execute(mesh) {
        Ok(()) => {
            let report = Report::compare(&snapshot, mesh);
            info!(
                "{} finished: {} faces added, {} vertices moved",
                op.label(),
                report.faces_added,
                report.vertices_moved
            );
            Ok(report)
        }
        Err(e) => {
            *mesh = snapshot;
            warn!("{} cancelled: {}", op.label(), e);
            Err(e)
        }
    }
}

/// All operators, with their parameters at the default values.
pub fn registry() -> Vec<Box<dyn MeshOperator>> {
    vec![
        Box::new(BuildEnd::default()),
        Box::new(BuildCorner::default()),
        Box::new(AdjustLoops::default()),
        Box::new(AdjustAdjacentLoops::default()),
    ]
}

pub fn find(id: &str) -> Option<Box<dyn MeshOperator>> {
    registry().into_iter().find(|op| op.id() == id)
}
