//! Gyroid to Schwarz P transition cell

use crate::errors::LatticeError;
use crate::float_types::{Real, SQRT_2};
use crate::kernel::{Kernel, SketchPlane, Wire};
use crate::params::CellParameters;
use crate::topology::tpms::{check_thickness, plate};
use crate::traits::SolidOps;
use nalgebra::{Point3, Vector3};

/// One of the four plates: which way its gyroid-side edges bend and which way its
/// Schwarz-side arc turns.
struct TransitionPlate {
    /// `+1` bends the gyroid spline up, `-1` down
    gyroid_side: Real,
    /// `+1` curves the arc towards `+z`, `-1` towards `-z`
    arc_side: Real,
    /// Octant the plate is moved to, in octant units
    octant: [Real; 3],
}

const PLATES: [TransitionPlate; 4] = [
    TransitionPlate { gyroid_side: 1.0, arc_side: -1.0, octant: [0.0, 0.0, 0.0] },
    TransitionPlate { gyroid_side: -1.0, arc_side: -1.0, octant: [0.0, 1.0, 0.0] },
    TransitionPlate { gyroid_side: 1.0, arc_side: 1.0, octant: [0.0, 0.0, 1.0] },
    TransitionPlate { gyroid_side: -1.0, arc_side: 1.0, octant: [0.0, 1.0, 1.0] },
];

impl TransitionPlate {
    /// Boundary around the origin: a gyroid spline on the `x = -s/2` face, a blending
    /// spline across the `y = ∓s/2` face, a Schwarz P arc on the `x = s/2` face, and the
    /// straight closing segment.
    fn wire(&self, s: Real) -> Wire {
        let half = 0.5 * s;
        let quarter = 0.25 * s;
        let dr = half - half / SQRT_2;
        let g = self.gyroid_side;
        let z = self.arc_side;

        Wire::new()
            .spline_on(SketchPlane::YZ, -half, &[
                [g * half, g * half],
                [0.0, g * quarter],
                [-g * half, g * half],
            ])
            .spline_on(SketchPlane::XZ, g * half, &[
                [-half, g * half],
                [0.0, g * quarter],
                [half, 0.0],
            ])
            .three_point_arc(
                Point3::new(half, -g * half, 0.0),
                Point3::new(half, -g * dr, z * dr),
                Point3::new(half, 0.0, z * half),
            )
            .close()
    }
}

/// Transition cell of conceptual size `2s`, blending a gyroid face into a Schwarz P face.
pub fn tpms_transition<K: Kernel>(
    kernel: &K,
    s: Real,
    params: &CellParameters,
) -> Result<K::Solid, LatticeError> {
    check_thickness(params.thickness)?;
    let plates = PLATES
        .iter()
        .map(|spec| {
            let solid = plate(kernel, &spec.wire(s), &[Point3::origin()], params.thickness)?;
            Ok(solid.translate_vector(Vector3::from(spec.octant) * s))
        })
        .collect::<Result<Vec<_>, LatticeError>>()?;
    Ok(SolidOps::union_all(plates))
}
