//! Convex planar polygons

use crate::float_types::parry3d::bounding_volume::Aabb;
use crate::float_types::{Real, tolerance};
use crate::mesh::plane::Plane;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};

/// A convex, planar polygon with a cached supporting plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Vertex>,
    pub plane: Plane,
}

impl Polygon {
    /// Create a polygon and compute its plane from the vertices.
    pub fn new(vertices: Vec<Vertex>) -> Self {
        let plane = Plane::from_vertices(&vertices);
        Polygon { vertices, plane }
    }

    /// Create a polygon that keeps a known plane, as produced by a split.
    pub const fn with_plane(vertices: Vec<Vertex>, plane: Plane) -> Self {
        Polygon { vertices, plane }
    }

    /// Build a flat-shaded polygon from positions.
    ///
    /// Consecutive duplicates (including last/first) are collapsed; returns `None`
    /// when fewer than three distinct corners remain or the face has no area.
    pub fn from_positions(points: &[Point3<Real>]) -> Option<Self> {
        let eps = tolerance();
        let mut distinct: Vec<Point3<Real>> = Vec::with_capacity(points.len());
        for p in points {
            if distinct.last().is_none_or(|last| (last - p).norm() > eps) {
                distinct.push(*p);
            }
        }
        while distinct.len() > 1 {
            let (first, last) = (distinct[0], distinct[distinct.len() - 1]);
            if (first - last).norm() > eps {
                break;
            }
            distinct.pop();
        }
        if distinct.len() < 3 {
            return None;
        }

        let vertices: Vec<Vertex> = distinct
            .iter()
            .map(|p| Vertex::new(*p, Vector3::zeros()))
            .collect();
        let plane = Plane::from_vertices(&vertices);
        if plane.is_degenerate() {
            return None;
        }
        let normal = plane.normal();
        let vertices = vertices
            .into_iter()
            .map(|v| Vertex::new(v.pos, normal))
            .collect();
        Some(Polygon { vertices, plane })
    }

    /// Like [`Polygon::from_positions`] but flips the winding when the face
    /// would point towards `interior`. Only meaningful for convex solids.
    pub fn facing_away(points: &[Point3<Real>], interior: &Point3<Real>) -> Option<Self> {
        let mut polygon = Polygon::from_positions(points)?;
        let centroid = polygon.centroid();
        if polygon.plane.normal().dot(&(centroid - interior)) < 0.0 {
            polygon.flip();
        }
        Some(polygon)
    }

    /// Reverse winding order, flip vertex normals and the plane
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for v in &mut self.vertices {
            v.flip();
        }
        self.plane.flip();
    }

    pub fn centroid(&self) -> Point3<Real> {
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.pos.coords);
        Point3::from(sum / self.vertices.len().max(1) as Real)
    }

    /// Axis aligned bounds of the vertices.
    pub fn bounding_box(&self) -> Aabb {
        let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
        let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
        for v in &self.vertices {
            mins = mins.inf(&v.pos);
            maxs = maxs.sup(&v.pos);
        }
        Aabb::new(mins, maxs)
    }
}
