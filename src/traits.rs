//! Solid operations shared by every kernel's solid type

use crate::float_types::parry3d::bounding_volume::Aabb;
use crate::float_types::Real;
use crate::mesh::plane::Plane;
use nalgebra::{Matrix3, Matrix4, Point3, Rotation3, Translation3, Vector3};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Axis-aligned mirror planes, named by the two axes they contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorPlane {
    /// Contains X and Y, flips Z
    XY,
    /// Contains Y and Z, flips X
    YZ,
    /// Contains X and Z, flips Y
    XZ,
}

impl MirrorPlane {
    pub fn normal(self) -> Vector3<Real> {
        match self {
            MirrorPlane::XY => Vector3::z(),
            MirrorPlane::YZ => Vector3::x(),
            MirrorPlane::XZ => Vector3::y(),
        }
    }
}

/// Boolean union + rigid transformations on an opaque solid.
///
/// Solids are never mutated in place by lattice code; every operation returns a new value.
pub trait SolidOps: Sized + Clone {
    /// Returns a new empty solid
    fn new() -> Self;
    fn union(&self, other: &Self) -> Self;
    fn transform(&self, matrix: &Matrix4<Real>) -> Self;
    fn bounding_box(&self) -> Aabb;
    fn invalidate_bounding_box(&mut self);
    /// Flip inside and outside
    fn inverse(&self) -> Self;
    fn is_empty(&self) -> bool;

    /// Returns a new Self translated by vector.
    fn translate_vector(&self, vector: Vector3<Real>) -> Self {
        self.transform(&Translation3::from(vector).to_homogeneous())
    }

    /// Returns a new Self translated by x, y, and z.
    fn translate(&self, x: Real, y: Real, z: Real) -> Self {
        self.translate_vector(Vector3::new(x, y, z))
    }

    /// Rotates by x_degrees, y_degrees, z_degrees about the origin (X first, then Y, then Z).
    fn rotate(&self, x_deg: Real, y_deg: Real, z_deg: Real) -> Self {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), x_deg.to_radians());
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), y_deg.to_radians());
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), z_deg.to_radians());
        let rot = rz * ry * rx;
        self.transform(&rot.to_homogeneous())
    }

    /// Reflect (mirror) about an arbitrary plane.
    ///
    /// The plane is specified by:
    ///   `plane.normal` = the plane’s normal vector,
    ///   `plane.w`      = the dot-product with that normal for points on the plane (offset).
    fn mirror(&self, plane: Plane) -> Self {
        if plane.is_degenerate() {
            return self.clone();
        }
        let n = plane.normal();
        let offset = n * plane.offset();

        // R = I - 2 n n^T about the origin, wrapped in a shift to the plane
        let t1 = Translation3::from(-offset).to_homogeneous();
        let mut reflect_4 = Matrix4::identity();
        let reflect_3 = Matrix3::identity() - 2.0 * n * n.transpose();
        reflect_4.fixed_view_mut::<3, 3>(0, 0).copy_from(&reflect_3);
        let t2 = Translation3::from(offset).to_homogeneous();

        // a reflection turns the winding inside out, flip it back
        self.transform(&(t2 * reflect_4 * t1)).inverse()
    }

    /// Mirror about an axis-aligned plane passing through `base_point`.
    fn mirror_about(&self, plane: MirrorPlane, base_point: Point3<Real>) -> Self {
        let normal = plane.normal();
        self.mirror(Plane::from_normal(normal, normal.dot(&base_point.coords)))
    }

    /// Union any number of solids by pairwise tree reduction.
    ///
    /// Returns an empty solid for an empty input.
    fn union_all(solids: Vec<Self>) -> Self
    where
        Self: Send + Sync,
    {
        let mut layer = solids;
        while layer.len() > 1 {
            #[cfg(feature = "parallel")]
            let chunks = layer.par_chunks(2);
            #[cfg(not(feature = "parallel"))]
            let chunks = layer.chunks(2);

            layer = chunks
                .map(|pair| match pair {
                    [a, b] => a.union(b),
                    [a] => a.clone(),
                    _ => Self::new(),
                })
                .collect();
        }
        layer.pop().unwrap_or_else(Self::new)
    }
}
