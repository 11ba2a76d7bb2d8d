//! Simple cubic and body-centred cubic cells

use crate::errors::LatticeError;
use crate::float_types::{Real, SQRT_3};
use crate::kernel::Kernel;
use crate::params::CellParameters;
use crate::topology::struts::{CellParts, check_strut_radius, cube_corners, cube_edges};
use nalgebra::Point3;

/// Angle between a body diagonal and the cube's bottom face diagonal, in degrees.
pub const ANGLE_C1AD: Real = 35.264_389_682_754_654;

/// Bottom corners (in cell units) and workplane angles of the four body diagonals.
const DIAGONALS: [([Real; 2], Real, Real); 4] = [
    ([0.0, 0.0], -45.0, ANGLE_C1AD),
    ([1.0, 0.0], -45.0, -ANGLE_C1AD),
    ([1.0, 1.0], 45.0, -ANGLE_C1AD),
    ([0.0, 1.0], 45.0, ANGLE_C1AD),
];

/// The four body diagonals, each rising from a bottom corner to the opposite top corner.
pub fn add_diagonals<K: Kernel>(parts: &mut CellParts<'_, K>, a: Real) -> Result<(), LatticeError> {
    for ([x, y], angle_x, angle_y) in DIAGONALS {
        parts.angled_strut(Point3::new(x * a, y * a, 0.0), angle_x, angle_y, SQRT_3 * a)?;
    }
    Ok(())
}

/// Cube edges with a node on every corner.
pub fn simple_cubic<K: Kernel>(
    kernel: &K,
    a: Real,
    params: &CellParameters,
) -> Result<K::Solid, LatticeError> {
    check_strut_radius(params.strut_radius, a)?;
    let mut parts = CellParts::new(kernel, params);
    parts.struts(cube_edges(a, &[0, 1, 2]))?;
    parts.nodes(cube_corners(a))?;
    Ok(parts.finish())
}

/// Body diagonals and cube edges, with nodes on the corners and the body centre.
pub fn bcc<K: Kernel>(
    kernel: &K,
    a: Real,
    params: &CellParameters,
) -> Result<K::Solid, LatticeError> {
    check_strut_radius(params.strut_radius, a)?;
    let mut parts = CellParts::new(kernel, params);
    add_diagonals(&mut parts, a)?;
    parts.struts(cube_edges(a, &[0, 1, 2]))?;
    parts.nodes(cube_corners(a))?;
    parts.node(Point3::new(a, a, a) * 0.5)?;
    Ok(parts.finish())
}
