//! Oriented planes and polygon splitting for the BSP tree

use crate::float_types::{Real, tolerance};
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};

// Plane classification bits. A polygon is SPANNING when it has vertices
// on both sides, hence FRONT | BACK.
pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = 3;

/// A plane `normal · p = w` with a unit normal.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    normal: Vector3<Real>,
    w: Real,
}

/// Result of [`Plane::split_polygon`]: coplanar-front, coplanar-back, front and back pieces.
pub type SplitResult = (Vec<Polygon>, Vec<Polygon>, Vec<Polygon>, Vec<Polygon>);

impl Plane {
    /// Build a plane from a normal (normalised here) and an offset along it.
    pub fn from_normal(normal: Vector3<Real>, offset: Real) -> Self {
        let len = normal.norm();
        if len <= Real::EPSILON {
            return Plane { normal: Vector3::zeros(), w: 0.0 };
        }
        Plane { normal: normal / len, w: offset / len }
    }

    /// Plane through three points, oriented counter-clockwise.
    pub fn from_points(a: &Point3<Real>, b: &Point3<Real>, c: &Point3<Real>) -> Self {
        let n = (b - a).cross(&(c - a));
        let plane = Plane::from_normal(n, 0.0);
        Plane { w: plane.normal.dot(&a.coords), ..plane }
    }

    /// Best-fit plane through a polygon's vertices using Newell's method, so
    /// slightly non-planar faces still get a stable orientation.
    pub fn from_vertices(vertices: &[Vertex]) -> Self {
        let n = vertices.len();
        if n < 3 {
            return Plane { normal: Vector3::zeros(), w: 0.0 };
        }
        let mut normal = Vector3::<Real>::zeros();
        let mut centroid = Vector3::<Real>::zeros();
        for i in 0..n {
            let current = &vertices[i].pos;
            let next = &vertices[(i + 1) % n].pos;
            normal.x += (current.y - next.y) * (current.z + next.z);
            normal.y += (current.z - next.z) * (current.x + next.x);
            normal.z += (current.x - next.x) * (current.y + next.y);
            centroid += current.coords;
        }
        centroid /= n as Real;
        let len = normal.norm();
        if len <= Real::EPSILON {
            return Plane { normal: Vector3::zeros(), w: 0.0 };
        }
        let normal = normal / len;
        Plane { normal, w: normal.dot(&centroid) }
    }

    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    pub const fn offset(&self) -> Real {
        self.w
    }

    /// True when the normal collapsed (zero-area input).
    pub fn is_degenerate(&self) -> bool {
        self.normal.norm_squared() <= Real::EPSILON
    }

    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Classify a point as FRONT, BACK or COPLANAR within [`tolerance`].
    pub fn orient_point(&self, point: &Point3<Real>) -> i8 {
        let t = self.normal.dot(&point.coords) - self.w;
        if t < -tolerance() {
            BACK
        } else if t > tolerance() {
            FRONT
        } else {
            COPLANAR
        }
    }

    /// OR of the classifications of every vertex.
    pub fn classify_polygon(&self, polygon: &Polygon) -> i8 {
        polygon
            .vertices
            .iter()
            .fold(COPLANAR, |acc, v| acc | self.orient_point(&v.pos))
    }

    /// Split `polygon` by this plane.
    ///
    /// Coplanar polygons go to the coplanar-front list when they face the same
    /// way as the plane and to coplanar-back otherwise. Spanning polygons are cut
    /// along the plane and each half keeps the parent's plane.
    pub fn split_polygon(&self, polygon: &Polygon) -> SplitResult {
        let mut coplanar_front = Vec::new();
        let mut coplanar_back = Vec::new();
        let mut front = Vec::new();
        let mut back = Vec::new();

        let types: Vec<i8> = polygon
            .vertices
            .iter()
            .map(|v| self.orient_point(&v.pos))
            .collect();
        let polygon_type = types.iter().fold(COPLANAR, |acc, t| acc | t);

        match polygon_type {
            COPLANAR => {
                if self.normal.dot(&polygon.plane.normal()) > 0.0 {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            },
            FRONT => front.push(polygon.clone()),
            BACK => back.push(polygon.clone()),
            _ => {
                let n = polygon.vertices.len();
                let mut f: Vec<Vertex> = Vec::with_capacity(n + 1);
                let mut b: Vec<Vertex> = Vec::with_capacity(n + 1);
                for i in 0..n {
                    let j = (i + 1) % n;
                    let (ti, tj) = (types[i], types[j]);
                    let (vi, vj) = (&polygon.vertices[i], &polygon.vertices[j]);

                    if ti != BACK {
                        f.push(vi.clone());
                    }
                    if ti != FRONT {
                        b.push(vi.clone());
                    }
                    if (ti | tj) == SPANNING {
                        let denom = self.normal.dot(&(vj.pos - vi.pos));
                        if denom.abs() > Real::EPSILON {
                            let t = (self.w - self.normal.dot(&vi.pos.coords)) / denom;
                            let v = vi.interpolate(vj, t);
                            f.push(v.clone());
                            b.push(v);
                        }
                    }
                }
                if f.len() >= 3 {
                    front.push(Polygon::with_plane(f, polygon.plane.clone()));
                }
                if b.len() >= 3 {
                    back.push(Polygon::with_plane(b, polygon.plane.clone()));
                }
            },
        }

        (coplanar_front, coplanar_back, front, back)
    }
}
