//! [`Kernel`] implementation producing polygon meshes

use crate::errors::GeometryError;
use crate::float_types::{Real, tolerance};
use crate::kernel::{Kernel, Wire};
use crate::mesh::Mesh;
use nalgebra::{Isometry3, Point2, Point3, Unit, Vector3};

/// Polygon-mesh kernel with BSP-tree booleans.
///
/// `segments` controls how many facets approximate a full circle; `edge_samples` controls
/// how finely each wire edge is sampled before a surface is fitted to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshKernel {
    segments: usize,
    edge_samples: usize,
}

impl Default for MeshKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshKernel {
    pub const fn new() -> Self {
        MeshKernel {
            segments: 16,
            edge_samples: 8,
        }
    }

    pub fn with_segments(mut self, segments: usize) -> Self {
        self.segments = segments.max(3);
        self
    }

    pub fn with_edge_samples(mut self, samples: usize) -> Self {
        self.edge_samples = samples.max(1);
        self
    }

    pub const fn segments(&self) -> usize {
        self.segments
    }

    pub const fn edge_samples(&self) -> usize {
        self.edge_samples
    }
}

fn check_radius(radius: Real) -> Result<(), GeometryError> {
    if radius.is_finite() && radius > tolerance() {
        Ok(())
    } else {
        Err(GeometryError::DegenerateRadius(radius))
    }
}

fn check_size(size: &Vector3<Real>) -> Result<(), GeometryError> {
    if size.iter().all(|s| s.is_finite() && *s > tolerance()) {
        Ok(())
    } else {
        Err(GeometryError::DegenerateBox(size.x, size.y, size.z))
    }
}

impl Kernel for MeshKernel {
    type Solid = Mesh;

    fn extrude_circle(
        &self,
        frame: &Isometry3<Real>,
        radius: Real,
        length: Real,
    ) -> Result<Mesh, GeometryError> {
        check_radius(radius)?;
        if !length.is_finite() || length.abs() <= tolerance() {
            return Err(GeometryError::DegenerateLength(length));
        }
        let start = frame * Point3::origin();
        let end = frame * Point3::new(0.0, 0.0, length);
        let u = frame.rotation * Vector3::x();
        let v = frame.rotation * Vector3::y();
        Ok(Mesh::cylinder(start, end, u, v, radius, self.segments))
    }

    fn cuboid(&self, min: Point3<Real>, size: Vector3<Real>) -> Result<Mesh, GeometryError> {
        check_size(&size)?;
        Ok(Mesh::cuboid(min, size))
    }

    fn filleted_box(
        &self,
        center: Point3<Real>,
        size: Vector3<Real>,
        radius: Real,
    ) -> Result<Mesh, GeometryError> {
        check_size(&size)?;
        if radius < 0.0 || !radius.is_finite() {
            return Err(GeometryError::DegenerateRadius(radius));
        }
        if radius <= tolerance() {
            return Ok(Mesh::cuboid(center - size * 0.5, size));
        }
        let limit = size.min() * 0.5;
        if radius > limit + tolerance() {
            return Err(GeometryError::FilletTooLarge { radius, limit });
        }
        Ok(Mesh::rounded_cuboid(center, size, radius.min(limit), self.segments))
    }

    fn revolve(
        &self,
        profile: &[Point2<Real>],
        axis: Unit<Vector3<Real>>,
    ) -> Result<Mesh, GeometryError> {
        Mesh::revolve(profile, axis, self.segments)
    }

    fn interpolate_surface(
        &self,
        boundary: &Wire,
        interior: &[Point3<Real>],
        thickness: Real,
    ) -> Result<Mesh, GeometryError> {
        let loop_points = boundary.loop_points(self.edge_samples)?;
        Mesh::thick_patch(&loop_points, interior, thickness)
    }

    fn profile_samples(&self) -> usize {
        (self.segments / 2).max(4)
    }
}
