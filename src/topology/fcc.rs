//! Face-centred cubic cells and the face/body-centred hybrids

use crate::errors::LatticeError;
use crate::float_types::Real;
use crate::kernel::Kernel;
use crate::params::CellParameters;
use crate::topology::bcc::add_diagonals;
use crate::topology::struts::{CellParts, Face, check_strut_radius, cube_corners, cube_edges};
use nalgebra::Point3;

/// Cube edges plus both diagonals of every face, with nodes on the corners and face centres.
pub fn fcc<K: Kernel>(
    kernel: &K,
    a: Real,
    params: &CellParameters,
) -> Result<K::Solid, LatticeError> {
    check_strut_radius(params.strut_radius, a)?;
    let mut parts = CellParts::new(kernel, params);
    parts.struts(cube_edges(a, &[0, 1, 2]))?;
    parts.struts(Face::ALL.iter().flat_map(|face| face.diagonals(a)))?;
    parts.nodes(cube_corners(a))?;
    parts.nodes(Face::ALL.iter().map(|face| face.center(a)))?;
    Ok(parts.finish())
}

/// Members of the face/body-centred family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FbccVariant {
    /// Side crosses plus top and bottom crosses
    Fbcc,
    /// Side crosses only
    Sfbcc,
    /// Side crosses plus vertical edges
    Sfbccz,
}

/// Body diagonals with crossed side faces; the variant decides the rest.
pub fn fbcc<K: Kernel>(
    kernel: &K,
    a: Real,
    params: &CellParameters,
    variant: FbccVariant,
) -> Result<K::Solid, LatticeError> {
    check_strut_radius(params.strut_radius, a)?;
    let mut parts = CellParts::new(kernel, params);
    add_diagonals(&mut parts, a)?;
    parts.struts(Face::SIDES.iter().flat_map(|face| face.diagonals(a)))?;

    match variant {
        FbccVariant::Fbcc => {
            parts.struts(Face::CAPS.iter().flat_map(|face| face.diagonals(a)))?;
            parts.nodes(Face::ALL.iter().map(|face| face.center(a)))?;
        },
        FbccVariant::Sfbcc => {
            parts.nodes(Face::SIDES.iter().map(|face| face.center(a)))?;
        },
        FbccVariant::Sfbccz => {
            parts.struts(cube_edges(a, &[2]))?;
            parts.nodes(Face::SIDES.iter().map(|face| face.center(a)))?;
        },
    }

    parts.nodes(cube_corners(a))?;
    parts.node(Point3::new(a, a, a) * 0.5)?;
    Ok(parts.finish())
}
