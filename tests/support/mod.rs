//! Test support library
//! Provides bounding-box helpers and a kernel wrapper that counts primitive calls.
#![allow(dead_code)]

use hetlattice::{
    errors::GeometryError,
    float_types::{Real, TAU},
    kernel::{Kernel, Wire},
    mesh::{Mesh, kernel::MeshKernel},
    traits::SolidOps,
};
use nalgebra::{Isometry3, Point2, Point3, Unit, Vector3};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Coarse mesh kernel that keeps test meshes small.
pub fn coarse_kernel() -> MeshKernel {
    MeshKernel::new().with_segments(6).with_edge_samples(2)
}

/// `[min_x, min_y, min_z, max_x, max_y, max_z]` of a solid.
pub fn bounds<S: SolidOps>(solid: &S) -> [Real; 6] {
    let bb = solid.bounding_box();
    [
        bb.mins.x, bb.mins.y, bb.mins.z, bb.maxs.x, bb.maxs.y, bb.maxs.z,
    ]
}

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// True when the bounding box of `solid` lies within `[min - slack, max + slack]`.
pub fn within<S: SolidOps>(solid: &S, min: [Real; 3], max: [Real; 3], slack: Real) -> bool {
    let b = bounds(solid);
    (0..3).all(|i| b[i] >= min[i] - slack && b[i + 3] <= max[i] + slack)
}

/// Number of mesh vertices within `radius` of `center`.
pub fn vertices_near(mesh: &Mesh, center: &Point3<Real>, radius: Real) -> usize {
    mesh.vertices()
        .iter()
        .filter(|v| (v.pos - center).norm() <= radius)
        .count()
}

/// Wraps [`MeshKernel`] and counts every primitive request.
#[derive(Debug, Default)]
pub struct CountingKernel {
    inner: MeshKernel,
    calls: AtomicUsize,
}

impl CountingKernel {
    pub fn new(inner: MeshKernel) -> Self {
        CountingKernel {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn count(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl Kernel for CountingKernel {
    type Solid = Mesh;

    fn extrude_circle(
        &self,
        frame: &Isometry3<Real>,
        radius: Real,
        length: Real,
    ) -> Result<Mesh, GeometryError> {
        self.count();
        self.inner.extrude_circle(frame, radius, length)
    }

    fn cuboid(&self, min: Point3<Real>, size: Vector3<Real>) -> Result<Mesh, GeometryError> {
        self.count();
        self.inner.cuboid(min, size)
    }

    fn filleted_box(
        &self,
        center: Point3<Real>,
        size: Vector3<Real>,
        radius: Real,
    ) -> Result<Mesh, GeometryError> {
        self.count();
        self.inner.filleted_box(center, size, radius)
    }

    fn revolve(
        &self,
        profile: &[Point2<Real>],
        axis: Unit<Vector3<Real>>,
    ) -> Result<Mesh, GeometryError> {
        self.count();
        self.inner.revolve(profile, axis)
    }

    fn interpolate_surface(
        &self,
        boundary: &Wire,
        interior: &[Point3<Real>],
        thickness: Real,
    ) -> Result<Mesh, GeometryError> {
        self.count();
        self.inner.interpolate_surface(boundary, interior, thickness)
    }

    fn profile_samples(&self) -> usize {
        self.inner.profile_samples()
    }
}

/// Enclosed volume of a closed, outward-facing mesh by the divergence theorem.
pub fn volume(mesh: &Mesh) -> Real {
    mesh.polygons
        .iter()
        .map(|polygon| {
            let v = &polygon.vertices;
            (1..v.len().saturating_sub(1))
                .map(|i| v[0].pos.coords.dot(&v[i].pos.coords.cross(&v[i + 1].pos.coords)))
                .sum::<Real>()
        })
        .sum::<Real>()
        / 6.0
}

/// Area of the regular `segments`-gon inscribed in a circle of `radius`.
pub fn polygon_area(radius: Real, segments: usize) -> Real {
    let n = segments as Real;
    0.5 * n * radius * radius * (TAU / n).sin()
}
