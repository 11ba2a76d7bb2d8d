//! Triply periodic minimal surface cells: gyroid, Schwarz P and Schwarz D
//!
//! Gyroid and Schwarz P cells are assembled from eight mirrored octant plates; the size
//! handed to their builders is the octant size, half the conceptual cell. Schwarz D
//! is built from four rotated plates at full cell size.

use crate::errors::{GeometryError, LatticeError};
use crate::float_types::{Real, SQRT_2, SURFACE_DELTA, tolerance};
use crate::kernel::{Kernel, SketchPlane, Wire};
use crate::params::CellParameters;
use crate::traits::{MirrorPlane, SolidOps};
use nalgebra::{Point3, Vector3};

/// Sketch plane, offset and three points (all in octant units) of each gyroid boundary edge.
const GYROID_EDGES: [(SketchPlane, Real, [[Real; 2]; 3]); 6] = [
    (SketchPlane::XZ, 0.5, [[0.5, 0.5], [0.25, 0.0], [0.5, -0.5]]),
    (SketchPlane::XY, -0.5, [[-0.5, -0.5], [0.0, -0.25], [0.5, -0.5]]),
    (SketchPlane::YZ, -0.5, [[-0.5, -0.5], [0.0, -0.25], [0.5, -0.5]]),
    (SketchPlane::XZ, -0.5, [[-0.5, -0.5], [-0.25, 0.0], [-0.5, 0.5]]),
    (SketchPlane::YZ, 0.5, [[0.5, 0.5], [0.0, 0.25], [-0.5, 0.5]]),
    (SketchPlane::XY, 0.5, [[0.5, 0.5], [0.0, 0.25], [-0.5, 0.5]]),
];

const SCHWARZ_P_PLANES: [(SketchPlane, Real); 6] = [
    (SketchPlane::XZ, 0.5),
    (SketchPlane::XY, 0.5),
    (SketchPlane::YZ, -0.5),
    (SketchPlane::XZ, -0.5),
    (SketchPlane::XY, -0.5),
    (SketchPlane::YZ, 0.5),
];

pub(crate) fn check_thickness(thickness: Real) -> Result<(), GeometryError> {
    if thickness.is_finite() && thickness > tolerance() {
        Ok(())
    } else {
        Err(GeometryError::DegenerateSurface(format!(
            "surface thickness {thickness} must be positive"
        )))
    }
}

/// Surface through `boundary` thickened by half of `thickness` to each side.
pub(crate) fn plate<K: Kernel>(
    kernel: &K,
    boundary: &Wire,
    interior: &[Point3<Real>],
    thickness: Real,
) -> Result<K::Solid, LatticeError> {
    let upper = kernel.interpolate_surface(boundary, interior, 0.5 * thickness)?;
    let lower = kernel.interpolate_surface(boundary, interior, -0.5 * thickness)?;
    Ok(upper.union(&lower))
}

/// Boundary of one gyroid octant plate centred on the origin.
pub fn gyroid_wire(s: Real) -> Wire {
    GYROID_EDGES
        .iter()
        .fold(Wire::new(), |wire, (plane, offset, points)| {
            wire.spline_on(*plane, offset * s, &points.map(|[u, v]| [u * s, v * s]))
        })
}

/// Boundary of one Schwarz P octant plate centred on the origin: six quarter circles
/// alternately bulging towards and away from the octant centre.
pub fn schwarz_p_wire(s: Real) -> Wire {
    let dr = 0.5 - 0.5 / SQRT_2;
    let convex = [[0.0, 0.5], [dr, dr], [0.5, 0.0]];
    let nonconvex = [[-0.5, 0.0], [-dr, -dr], [0.0, -0.5]];
    SCHWARZ_P_PLANES
        .iter()
        .enumerate()
        .fold(Wire::new(), |wire, (n, (plane, offset))| {
            let points = if n % 2 == 0 { convex } else { nonconvex };
            wire.arc_on(*plane, offset * s, points.map(|[u, v]| [u * s, v * s]))
        })
}

/// Plate bounded by `wire` moved into the octant `[0, s]³`.
fn octant_plate<K: Kernel>(
    kernel: &K,
    wire: Wire,
    s: Real,
    thickness: Real,
) -> Result<K::Solid, LatticeError> {
    let center = Point3::new(s, s, s) * 0.5;
    plate(kernel, &wire.translated(&center.coords), &[center], thickness)
}

/// Gyroid cell of conceptual size `2s`.
pub fn gyroid<K: Kernel>(
    kernel: &K,
    s: Real,
    params: &CellParameters,
) -> Result<K::Solid, LatticeError> {
    check_thickness(params.thickness)?;
    let g_000 = octant_plate(kernel, gyroid_wire(s), s, params.thickness)?;

    let g_100 = g_000
        .mirror_about(MirrorPlane::YZ, Point3::new(s, 0.0, 0.0))
        .mirror_about(MirrorPlane::XZ, Point3::new(0.0, 0.5 * s, 0.0));
    let g_110 = g_000
        .mirror_about(MirrorPlane::XZ, Point3::new(0.0, s, 0.0))
        .translate(s, 0.0, 0.0);
    let g_010 = g_110
        .mirror_about(MirrorPlane::YZ, Point3::new(s, 0.0, 0.0))
        .mirror_about(MirrorPlane::XZ, Point3::new(0.0, 1.5 * s, 0.0));
    let g_001 = g_110.translate(-s, -s, s);
    let g_101 = g_010.translate(s, -s, s);

    // the top octants are pushed off their neighbours so touching faces stay apart
    let d = (1.0 + SURFACE_DELTA) * s;
    let g_011 = g_100.translate(-d, d, d);
    let g_111 = g_000.translate(d, d, d);

    Ok(SolidOps::union_all(vec![
        g_000, g_100, g_110, g_010, g_001, g_101, g_011, g_111,
    ]))
}

/// Schwarz P cell of conceptual size `2s`: four mirrored octants at the bottom, and the
/// bottom mirrored to the top.
pub fn schwarz_p<K: Kernel>(
    kernel: &K,
    s: Real,
    params: &CellParameters,
) -> Result<K::Solid, LatticeError> {
    check_thickness(params.thickness)?;
    let s_000 = octant_plate(kernel, schwarz_p_wire(s), s, params.thickness)?;
    let s_100 = s_000.mirror_about(MirrorPlane::YZ, Point3::new(s, 0.0, 0.0));
    let s_110 = s_100.mirror_about(MirrorPlane::XZ, Point3::new(0.0, s, 0.0));
    let s_010 = s_000.mirror_about(MirrorPlane::XZ, Point3::new(0.0, s, 0.0));

    let bottom = SolidOps::union_all(vec![s_000, s_100, s_110, s_010]);
    let top = bottom.mirror_about(MirrorPlane::XY, Point3::new(0.0, 0.0, s));
    Ok(bottom.union(&top))
}

/// Schwarz D cell of size `a`.
pub fn schwarz_d<K: Kernel>(
    kernel: &K,
    a: Real,
    params: &CellParameters,
) -> Result<K::Solid, LatticeError> {
    check_thickness(params.thickness)?;
    let h = 0.5 * a;
    let boundary = Wire::new().polyline(&[
        Point3::new(0.0, h, 0.0),
        Point3::new(h, h, 0.0),
        Point3::new(h, 0.0, 0.0),
        Point3::new(h, 0.0, h),
        Point3::new(0.0, 0.0, h),
        Point3::new(0.0, h, h),
        Point3::new(0.0, h, 0.0),
    ]);
    let base = plate(kernel, &boundary, &[Point3::new(h, h, h) * 0.5], params.thickness)?;

    let mid = Vector3::new(h, h, h);
    let parts = vec![
        base.rotate(0.0, 0.0, 180.0).translate(a, a, 0.0),
        base.rotate(0.0, 0.0, 270.0).translate_vector(mid),
        base.rotate(0.0, 0.0, 90.0).translate_vector(mid),
        base,
    ];
    Ok(SolidOps::union_all(parts))
}
