//! **Heterogeneous lattice generation**: tile a 3D grid with unit cells (BCC, FCC,
//! diamond, truncated polyhedra, gyroid, Schwarz P/D, ...) whose strut radius, node
//! diameter, surface thickness or truncation ratio vary smoothly across the grid, then
//! union every cell into one solid.
//!
//! The pipeline is Grid → Params → Build → Place → Union:
//! - [`grid`] generates placement points in `(i, j, k)` order,
//! - [`interpolate`] and [`params`] turn min/max bounds and a rule into one
//!   [`params::CellParameters`] per point,
//! - a [`builder::CellBuilder`] (usually a [`topology::Topology`]) builds one cell in local
//!   coordinates through a [`kernel::Kernel`],
//! - the [`dispatch::Dispatcher`] places each cell and unions the results.
//!
//! Geometry comes from the [`kernel::Kernel`] trait. The bundled
//! [`mesh::kernel::MeshKernel`] builds polygon meshes and unions them with BSP trees.
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon to build cells and union them concurrently

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod builder;
pub mod dispatch;
pub mod errors;
pub mod float_types;
pub mod grid;
pub mod interpolate;
pub mod kernel;
pub mod lattice;
pub mod mesh;
pub mod params;
pub mod topology;
pub mod traits;

#[cfg(any(
    all(feature = "f64", feature = "f32"),
    not(any(feature = "f64", feature = "f32"))
))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use builder::CellBuilder;
pub use dispatch::{CancelToken, Dispatcher, ParameterSet, ToPlacement};
pub use errors::{GeometryError, LatticeError};
pub use grid::{Axis, GridSpec, PlacementPoint, generate_grid};
pub use interpolate::{Interpolation, InterpolationRule, interpolate};
pub use kernel::{Kernel, SketchPlane, Wire};
pub use lattice::HeterogeneousLattice;
pub use params::{CellField, CellParameters, NodeShape, ParameterPlan};
pub use topology::Topology;
pub use traits::SolidOps;

/// Everything needed to describe and generate a lattice.
pub mod prelude {
    pub use crate::builder::CellBuilder;
    pub use crate::dispatch::{CancelToken, Dispatcher, ParameterSet, ToPlacement};
    pub use crate::errors::{GeometryError, LatticeError};
    pub use crate::float_types::Real;
    pub use crate::grid::{Axis, GridSpec, PlacementPoint, generate_grid};
    pub use crate::interpolate::{Interpolation, InterpolationRule, interpolate};
    pub use crate::kernel::{Kernel, SketchPlane, Wire};
    pub use crate::lattice::{
        ConformalCylinder, HeterogeneousLattice, martensite, martensite_plan, support_plate,
        transition_layer,
    };
    pub use crate::mesh::{Mesh, kernel::MeshKernel};
    pub use crate::params::{CellField, CellParameters, NodeShape, ParameterPlan};
    pub use crate::topology::Topology;
    pub use crate::traits::{MirrorPlane, SolidOps};
}
