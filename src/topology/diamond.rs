//! Diamond cubic cell

use crate::errors::LatticeError;
use crate::float_types::Real;
use crate::kernel::Kernel;
use crate::params::CellParameters;
use crate::topology::bcc::ANGLE_C1AD;
use crate::topology::struts::{CellParts, check_strut_radius};
use nalgebra::{Point3, Vector3};

const C: Real = ANGLE_C1AD;

/// Strut origins (in cell units) and workplane angles, four struts per quarter level.
const STRUTS: [([Real; 3], Real, Real); 16] = [
    ([1.0, 0.0, 0.0], -45.0, -C),
    ([0.5, 0.5, 0.0], -45.0, -C),
    ([0.5, 0.5, 0.0], 45.0, C),
    ([0.0, 1.0, 0.0], 45.0, C),
    ([0.75, 0.25, 0.25], -45.0, C),
    ([0.75, 0.25, 0.25], 45.0, -C),
    ([0.25, 0.75, 0.25], -45.0, C),
    ([0.25, 0.75, 0.25], 45.0, -C),
    ([0.5, 0.0, 0.5], -45.0, -C),
    ([1.0, 0.5, 0.5], -45.0, -C),
    ([0.5, 1.0, 0.5], 45.0, C),
    ([0.0, 0.5, 0.5], 45.0, C),
    ([0.25, 0.25, 0.75], 45.0, -C),
    ([0.25, 0.25, 0.75], -45.0, C),
    ([0.75, 0.75, 0.75], 45.0, -C),
    ([0.75, 0.75, 0.75], -45.0, C),
];

/// Node positions (x, y in cell units) on the levels z = 0, 1/4, 1/2, 3/4, 1.
const NODE_LEVELS: [&[[Real; 2]]; 5] = [
    &[[1.0, 0.0], [0.5, 0.5], [0.0, 1.0]],
    &[[0.75, 0.25], [0.25, 0.75]],
    &[[0.5, 0.0], [1.0, 0.5], [0.5, 1.0], [0.0, 0.5]],
    &[[0.25, 0.25], [0.75, 0.75]],
    &[[0.0, 0.0], [0.5, 0.5], [1.0, 1.0]],
];

pub fn diamond<K: Kernel>(
    kernel: &K,
    a: Real,
    params: &CellParameters,
) -> Result<K::Solid, LatticeError> {
    check_strut_radius(params.strut_radius, a)?;
    let length = Vector3::new(0.25, 0.25, 0.25).norm() * a;
    let mut parts = CellParts::new(kernel, params);
    for (origin, angle_x, angle_y) in STRUTS {
        parts.angled_strut(Point3::from(origin) * a, angle_x, angle_y, length)?;
    }
    for (level, points) in NODE_LEVELS.iter().enumerate() {
        let z = level as Real * 0.25 * a;
        parts.nodes(points.iter().map(|[x, y]| Point3::new(x * a, y * a, z)))?;
    }
    Ok(parts.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::struts::strut_direction;

    #[test]
    fn every_strut_joins_two_nodes() {
        let nodes: Vec<Point3<Real>> = NODE_LEVELS
            .iter()
            .enumerate()
            .flat_map(|(level, points)| {
                points
                    .iter()
                    .map(move |[x, y]| Point3::new(*x, *y, level as Real * 0.25))
            })
            .collect();
        let is_node = |p: &Point3<Real>| nodes.iter().any(|n| (n - p).norm() < 1e-9);
        let length = Vector3::new(0.25, 0.25, 0.25).norm();
        for (origin, ax, ay) in STRUTS {
            let start = Point3::from(origin);
            let end = start + strut_direction(ax, ay) * length;
            assert!(is_node(&start), "start {start} is not a node");
            assert!(is_node(&end), "end {end} is not a node");
        }
    }
}
