//! The primitive-construction boundary every lattice builder talks to.
//!
//! A [`Kernel`] turns construction requests (extrude a circle, build a filleted box,
//! revolve a profile, fit a thickened surface to a boundary wire) into opaque solids.
//! Combining solids afterwards goes through [`SolidOps`]. Lattice code never inspects
//! what a solid is made of, so any geometry engine that can satisfy this trait can
//! drive the generator; [`crate::mesh::kernel::MeshKernel`] is the bundled one.

use crate::errors::GeometryError;
use crate::float_types::{PI, Real, tolerance};
use crate::traits::SolidOps;
use nalgebra::{Isometry3, Point2, Point3, Translation3, Unit, UnitQuaternion, Vector3};
use std::fmt::Debug;

/// Primitive construction capability.
///
/// Implementations must be reentrant: builders may call them from several threads at once
/// when the `parallel` feature is enabled. A kernel wrapping a library that forbids
/// concurrent access has to serialise internally.
pub trait Kernel: Send + Sync {
    type Solid: SolidOps + Send + Sync + Debug;

    /// Extrude a circle of `radius` lying in the XY plane of `frame` along the frame's +Z
    /// by `length`.
    fn extrude_circle(
        &self,
        frame: &Isometry3<Real>,
        radius: Real,
        length: Real,
    ) -> Result<Self::Solid, GeometryError>;

    /// Axis aligned box with its minimum corner at `min`.
    fn cuboid(&self, min: Point3<Real>, size: Vector3<Real>) -> Result<Self::Solid, GeometryError>;

    /// Box centred on `center` with every edge filleted by `radius`.
    fn filleted_box(
        &self,
        center: Point3<Real>,
        size: Vector3<Real>,
        radius: Real,
    ) -> Result<Self::Solid, GeometryError>;

    /// Full revolution of a closed profile about `axis` through the origin.
    ///
    /// Profile points are `(r, h)`: distance from the axis and height along it.
    fn revolve(
        &self,
        profile: &[Point2<Real>],
        axis: Unit<Vector3<Real>>,
    ) -> Result<Self::Solid, GeometryError>;

    /// Fit a surface to a closed boundary wire passing near `interior` points, then
    /// thicken it by `thickness` along its normal (negative thickens the other side).
    fn interpolate_surface(
        &self,
        boundary: &Wire,
        interior: &[Point3<Real>],
        thickness: Real,
    ) -> Result<Self::Solid, GeometryError>;

    /// Number of samples used for curved profiles built on top of the primitives.
    fn profile_samples(&self) -> usize {
        16
    }

    /// Cylinder whose axis runs from `start` to `end`.
    fn cylinder_between(
        &self,
        start: &Point3<Real>,
        end: &Point3<Real>,
        radius: Real,
    ) -> Result<Self::Solid, GeometryError> {
        let axis = end - start;
        let length = axis.norm();
        if length <= tolerance() {
            return Err(GeometryError::DegenerateLength(length));
        }
        let rotation = UnitQuaternion::rotation_between(&Vector3::z(), &axis)
            .unwrap_or_else(|| UnitQuaternion::from_axis_angle(&Vector3::x_axis(), PI));
        let frame = Isometry3::from_parts(Translation3::from(start.coords), rotation);
        self.extrude_circle(&frame, radius, length)
    }

    /// Sphere built by revolving a semicircle about the vertical axis through `center`.
    fn sphere(&self, center: &Point3<Real>, radius: Real) -> Result<Self::Solid, GeometryError> {
        if radius <= tolerance() {
            return Err(GeometryError::DegenerateRadius(radius));
        }
        let n = self.profile_samples().max(4);
        let profile: Vec<Point2<Real>> = (0..=n)
            .map(|i| {
                let phi = PI * i as Real / n as Real;
                Point2::new(radius * phi.sin(), -radius * phi.cos())
            })
            .collect();
        Ok(self
            .revolve(&profile, Vector3::z_axis())?
            .translate_vector(center.coords))
    }
}

/// Named sketch planes. A 2D point `(u, v)` on a plane, shifted by `offset` along the
/// plane normal, maps to world coordinates as follows:
///
/// | plane | normal | world point        |
/// |-------|--------|--------------------|
/// | XY    | +Z     | `(u, v, offset)`   |
/// | YZ    | +X     | `(offset, u, v)`   |
/// | XZ    | -Y     | `(u, -offset, v)`  |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SketchPlane {
    XY,
    YZ,
    XZ,
}

impl SketchPlane {
    pub fn to_world(self, u: Real, v: Real, offset: Real) -> Point3<Real> {
        match self {
            SketchPlane::XY => Point3::new(u, v, offset),
            SketchPlane::YZ => Point3::new(offset, u, v),
            SketchPlane::XZ => Point3::new(u, -offset, v),
        }
    }
}

/// One curve of a boundary wire.
#[derive(Debug, Clone, PartialEq)]
pub enum Edge {
    /// Interpolating spline through the control points
    Spline(Vec<Point3<Real>>),
    /// Circular arc from the first point through the second to the third
    Arc([Point3<Real>; 3]),
    /// Straight segments through the points
    Polyline(Vec<Point3<Real>>),
}

impl Edge {
    pub fn start(&self) -> Option<Point3<Real>> {
        match self {
            Edge::Spline(points) | Edge::Polyline(points) => points.first().copied(),
            Edge::Arc([start, _, _]) => Some(*start),
        }
    }

    pub fn end(&self) -> Option<Point3<Real>> {
        match self {
            Edge::Spline(points) | Edge::Polyline(points) => points.last().copied(),
            Edge::Arc([_, _, end]) => Some(*end),
        }
    }

    /// Discretise the edge, `samples` points per span, endpoints included.
    pub fn sample(&self, samples: usize) -> Vec<Point3<Real>> {
        let samples = samples.max(1);
        match self {
            Edge::Polyline(points) => points.clone(),
            Edge::Spline(points) => sample_catmull_rom(points, samples),
            Edge::Arc([start, mid, end]) => sample_arc(start, mid, end, samples * 2),
        }
    }
}

/// Uniform Catmull-Rom spline through `points`, end tangents from reflected neighbours.
fn sample_catmull_rom(points: &[Point3<Real>], samples: usize) -> Vec<Point3<Real>> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let n = points.len();
    let at = |i: isize| -> Point3<Real> {
        if i < 0 {
            points[0] + (points[0] - points[1])
        } else if i as usize >= n {
            points[n - 1] + (points[n - 1] - points[n - 2])
        } else {
            points[i as usize]
        }
    };

    let mut out = Vec::with_capacity((n - 1) * samples + 1);
    for span in 0..n - 1 {
        let i = span as isize;
        let (p0, p1, p2, p3) = (at(i - 1).coords, at(i).coords, at(i + 1).coords, at(i + 2).coords);
        for s in 0..samples {
            let t = s as Real / samples as Real;
            let (t2, t3) = (t * t, t * t * t);
            let c = (p1 * 2.0
                + (p2 - p0) * t
                + (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * t2
                + (-p0 + p1 * 3.0 - p2 * 3.0 + p3) * t3)
                * 0.5;
            out.push(Point3::from(c));
        }
    }
    out.push(points[n - 1]);
    out
}

/// Circle through three points, sampled from `start` via `mid` to `end`.
/// Collinear input degrades to the straight polyline.
fn sample_arc(
    start: &Point3<Real>,
    mid: &Point3<Real>,
    end: &Point3<Real>,
    samples: usize,
) -> Vec<Point3<Real>> {
    let a = mid - start;
    let b = end - start;
    let axb = a.cross(&b);
    let denom = 2.0 * axb.norm_squared();
    if denom <= Real::EPSILON {
        return vec![*start, *mid, *end];
    }
    let center = start + (b * a.norm_squared() - a * b.norm_squared()).cross(&axb) / denom;
    let normal = axb.normalize();
    let radial = start - center;
    let radius = radial.norm();
    let e1 = radial / radius;
    let e2 = normal.cross(&e1);

    let to_end = end - center;
    let mut sweep = to_end.dot(&e2).atan2(to_end.dot(&e1));
    if sweep <= 0.0 {
        sweep += 2.0 * PI;
    }

    (0..=samples)
        .map(|s| {
            let theta = sweep * s as Real / samples as Real;
            center + (e1 * theta.cos() + e2 * theta.sin()) * radius
        })
        .collect()
}

/// A closed boundary assembled from edges in any order and direction, the way a CAD
/// wire is assembled from loose curves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wire {
    edges: Vec<Edge>,
    closed: bool,
}

impl Wire {
    pub fn new() -> Self {
        Wire::default()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn push(mut self, edge: Edge) -> Self {
        self.edges.push(edge);
        self
    }

    /// Spline through 3D control points
    pub fn spline(self, points: &[Point3<Real>]) -> Self {
        self.push(Edge::Spline(points.to_vec()))
    }

    /// Spline through 2D points sketched on `plane` at `offset`
    pub fn spline_on(self, plane: SketchPlane, offset: Real, points: &[[Real; 2]]) -> Self {
        let points = points.iter().map(|[u, v]| plane.to_world(*u, *v, offset)).collect();
        self.push(Edge::Spline(points))
    }

    pub fn three_point_arc(self, start: Point3<Real>, mid: Point3<Real>, end: Point3<Real>) -> Self {
        self.push(Edge::Arc([start, mid, end]))
    }

    /// Arc through three 2D points sketched on `plane` at `offset`
    pub fn arc_on(self, plane: SketchPlane, offset: Real, points: [[Real; 2]; 3]) -> Self {
        let [s, m, e] = points.map(|[u, v]| plane.to_world(u, v, offset));
        self.three_point_arc(s, m, e)
    }

    pub fn polyline(self, points: &[Point3<Real>]) -> Self {
        self.push(Edge::Polyline(points.to_vec()))
    }

    /// Allow a straight closing segment between the chain's free ends.
    pub fn close(mut self) -> Self {
        self.closed = true;
        self
    }

    /// Translate every edge.
    pub fn translated(&self, offset: &Vector3<Real>) -> Self {
        let shift = |p: &Point3<Real>| p + offset;
        let edges = self
            .edges
            .iter()
            .map(|edge| match edge {
                Edge::Spline(points) => Edge::Spline(points.iter().map(shift).collect()),
                Edge::Polyline(points) => Edge::Polyline(points.iter().map(shift).collect()),
                Edge::Arc(points) => Edge::Arc(points.map(|p| shift(&p))),
            })
            .collect();
        Wire { edges, closed: self.closed }
    }

    /// Chain the sampled edges into one closed loop (last point not repeated).
    ///
    /// Edges are matched end to end regardless of their order or direction. Fails when an
    /// edge does not connect, or when the chain stays open and [`Wire::close`] was not called.
    pub fn loop_points(&self, samples_per_edge: usize) -> Result<Vec<Point3<Real>>, GeometryError> {
        let mut pending: Vec<Vec<Point3<Real>>> = self
            .edges
            .iter()
            .map(|edge| edge.sample(samples_per_edge))
            .filter(|points| !points.is_empty())
            .collect();
        if pending.is_empty() {
            return Err(GeometryError::TooFewPoints { expected: 3, got: 0 });
        }

        let extent = pending
            .iter()
            .flatten()
            .fold(0.0 as Real, |acc, p| acc.max(p.coords.amax()));
        let join = tolerance() * (1.0 + extent) * 10.0;
        let near = |a: &Point3<Real>, b: &Point3<Real>| (a - b).norm() <= join;

        let mut chain = pending.remove(0);
        while !pending.is_empty() {
            let (head, tail) = (chain[0], chain[chain.len() - 1]);
            let found = pending.iter().enumerate().find_map(|(idx, points)| {
                let (first, last) = (points[0], points[points.len() - 1]);
                if near(&first, &tail) {
                    Some((idx, true, false))
                } else if near(&last, &tail) {
                    Some((idx, true, true))
                } else if near(&last, &head) {
                    Some((idx, false, false))
                } else if near(&first, &head) {
                    Some((idx, false, true))
                } else {
                    None
                }
            });
            let Some((idx, append, reverse)) = found else {
                return Err(GeometryError::DegenerateSurface(
                    "boundary wire edges do not connect".to_string(),
                ));
            };
            let mut points = pending.remove(idx);
            if reverse {
                points.reverse();
            }
            if append {
                chain.extend(points.into_iter().skip(1));
            } else {
                points.pop();
                points.extend(chain);
                chain = points;
            }
        }

        let closes = chain.len() > 1 && near(&chain[0], &chain[chain.len() - 1]);
        if closes {
            chain.pop();
        } else if !self.closed {
            return Err(GeometryError::DegenerateSurface(
                "boundary wire is open".to_string(),
            ));
        }
        if chain.len() < 3 {
            return Err(GeometryError::TooFewPoints { expected: 3, got: chain.len() });
        }
        Ok(chain)
    }
}
