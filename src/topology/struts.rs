//! Struts, nodes and cube bookkeeping shared by the strut-based recipes

use crate::errors::{GeometryError, LatticeError};
use crate::float_types::{NODE_DELTA, Real, tolerance};
use crate::kernel::Kernel;
use crate::params::{CellParameters, NodeShape};
use nalgebra::{Point3, Vector3};

/// Unit direction of a strut extruded from a workplane rotated by `angle_x` about X and
/// then `angle_y` about the rotated Y (degrees).
pub fn strut_direction(angle_x: Real, angle_y: Real) -> Vector3<Real> {
    let (sx, cx) = angle_x.to_radians().sin_cos();
    let (sy, cy) = angle_y.to_radians().sin_cos();
    Vector3::new(sy, -sx * cy, cx * cy)
}

/// Reject strut radii that leave no room inside the cell.
pub fn check_strut_radius(radius: Real, unit_cell_size: Real) -> Result<(), GeometryError> {
    let limit = unit_cell_size * 0.5;
    if radius >= limit {
        return Err(GeometryError::StrutTooThick { radius, limit });
    }
    Ok(())
}

/// Collects the parts of one cell and unions them at the end.
pub struct CellParts<'k, K: Kernel> {
    kernel: &'k K,
    params: CellParameters,
    parts: Vec<K::Solid>,
}

impl<'k, K: Kernel> CellParts<'k, K> {
    pub fn new(kernel: &'k K, params: &CellParameters) -> Self {
        CellParts {
            kernel,
            params: *params,
            parts: Vec::new(),
        }
    }

    /// Strut of the cell's radius from `a` to `b`.
    pub fn strut(&mut self, a: Point3<Real>, b: Point3<Real>) -> Result<&mut Self, LatticeError> {
        let solid = self.kernel.cylinder_between(&a, &b, self.params.strut_radius)?;
        self.parts.push(solid);
        Ok(self)
    }

    /// Strut of `length` leaving `start` in the direction given by workplane angles.
    pub fn angled_strut(
        &mut self,
        start: Point3<Real>,
        angle_x: Real,
        angle_y: Real,
        length: Real,
    ) -> Result<&mut Self, LatticeError> {
        let end = start + strut_direction(angle_x, angle_y) * length;
        self.strut(start, end)
    }

    pub fn struts<I>(&mut self, pairs: I) -> Result<&mut Self, LatticeError>
    where
        I: IntoIterator<Item = (Point3<Real>, Point3<Real>)>,
    {
        for (a, b) in pairs {
            self.strut(a, b)?;
        }
        Ok(self)
    }

    /// Node centred on `center`, shaped per the cell parameters.
    pub fn node(&mut self, center: Point3<Real>) -> Result<&mut Self, LatticeError> {
        let d = self.params.node_diameter;
        if !(d > tolerance()) {
            return Err(GeometryError::DegenerateRadius(d * 0.5).into());
        }
        let solid = match self.params.node_shape {
            NodeShape::FilletedBox => {
                let side = d + NODE_DELTA;
                self.kernel.filleted_box(
                    center,
                    Vector3::new(side, side, side),
                    self.params.node_fillet(),
                )?
            },
            NodeShape::Sphere => self.kernel.sphere(&center, d * 0.5)?,
        };
        self.parts.push(solid);
        Ok(self)
    }

    pub fn nodes<I>(&mut self, centers: I) -> Result<&mut Self, LatticeError>
    where
        I: IntoIterator<Item = Point3<Real>>,
    {
        for center in centers {
            self.node(center)?;
        }
        Ok(self)
    }

    pub fn push(&mut self, solid: K::Solid) -> &mut Self {
        self.parts.push(solid);
        self
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn finish(self) -> K::Solid {
        crate::traits::SolidOps::union_all(self.parts)
    }
}

/// The eight corners of a cube of side `a` at the origin.
pub fn cube_corners(a: Real) -> [Point3<Real>; 8] {
    let mut corners = [Point3::origin(); 8];
    for (n, corner) in corners.iter_mut().enumerate() {
        *corner = Point3::new(
            (n & 1) as Real * a,
            ((n >> 1) & 1) as Real * a,
            ((n >> 2) & 1) as Real * a,
        );
    }
    corners
}

/// The twelve cube edges, or only those parallel to the axes in `axes` (0 = X).
pub fn cube_edges(a: Real, axes: &[usize]) -> Vec<(Point3<Real>, Point3<Real>)> {
    let corners = cube_corners(a);
    let mut edges = Vec::with_capacity(12);
    for (n, start) in corners.iter().enumerate() {
        for &axis in axes {
            let bit = 1 << axis;
            if n & bit == 0 {
                edges.push((*start, corners[n | bit]));
            }
        }
    }
    edges
}

/// A face of the unit cube, named by its normal axis and side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub axis: usize,
    pub high: bool,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face { axis: 0, high: false },
        Face { axis: 0, high: true },
        Face { axis: 1, high: false },
        Face { axis: 1, high: true },
        Face { axis: 2, high: false },
        Face { axis: 2, high: true },
    ];

    /// The four faces parallel to Z.
    pub const SIDES: [Face; 4] = [Face::ALL[0], Face::ALL[1], Face::ALL[2], Face::ALL[3]];

    /// Bottom and top.
    pub const CAPS: [Face; 2] = [Face::ALL[4], Face::ALL[5]];

    fn point(&self, a: Real, u: Real, v: Real) -> Point3<Real> {
        let (ua, va) = ((self.axis + 1) % 3, (self.axis + 2) % 3);
        let mut p = Point3::origin();
        p[self.axis] = if self.high { a } else { 0.0 };
        p[ua] = u;
        p[va] = v;
        p
    }

    pub fn center(&self, a: Real) -> Point3<Real> {
        self.point(a, a * 0.5, a * 0.5)
    }

    /// The two crossing diagonals of the face.
    pub fn diagonals(&self, a: Real) -> [(Point3<Real>, Point3<Real>); 2] {
        [
            (self.point(a, 0.0, 0.0), self.point(a, a, a)),
            (self.point(a, a, 0.0), self.point(a, 0.0, a)),
        ]
    }
}
