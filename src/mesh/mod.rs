//! `Mesh` struct and implementations of the `SolidOps` trait for `Mesh`

use crate::float_types::{
    Real,
    parry3d::bounding_volume::{Aabb, BoundingVolume},
};
use crate::mesh::{bsp::Node, plane::Plane, polygon::Polygon, vertex::Vertex};
use crate::traits::SolidOps;
use nalgebra::{Matrix4, Point3};
use std::sync::OnceLock;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub mod bsp;
pub mod kernel;
pub mod plane;
pub mod polygon;
pub mod shapes;
pub mod vertex;

/// A closed polygon mesh: the solid representation of [`kernel::MeshKernel`].
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    /// 3D polygons for volumetric shapes
    pub polygons: Vec<Polygon>,

    /// Lazily calculated AABB that spans `polygons`.
    pub bounding_box: OnceLock<Aabb>,
}

impl Mesh {
    /// Build a Mesh from an existing polygon list
    pub fn from_polygons(polygons: &[Polygon]) -> Self {
        Mesh {
            polygons: polygons.to_vec(),
            bounding_box: OnceLock::new(),
        }
    }

    /// Polygons whose bounds reach into `reach`, and the rest.
    ///
    /// Lattice cells only touch their neighbours, so most polygons of a union operand
    /// never meet the other operand and can skip the BSP clip entirely.
    fn split_by_reach(polygons: &[Polygon], reach: &Aabb) -> (Vec<Polygon>, Vec<Polygon>) {
        polygons
            .iter()
            .cloned()
            .partition(|polygon| polygon.bounding_box().intersects(reach))
    }

    /// Helper to collect all vertices.
    #[cfg(not(feature = "parallel"))]
    pub fn vertices(&self) -> Vec<Vertex> {
        self.polygons
            .iter()
            .flat_map(|p| p.vertices.clone())
            .collect()
    }

    /// Parallel helper to collect all vertices.
    #[cfg(feature = "parallel")]
    pub fn vertices(&self) -> Vec<Vertex> {
        self.polygons
            .par_iter()
            .flat_map(|p| p.vertices.clone())
            .collect()
    }

    /// Center of the bounding box.
    pub fn center(&self) -> Point3<Real> {
        self.bounding_box().center()
    }
}

impl SolidOps for Mesh {
    fn new() -> Self {
        Mesh::default()
    }

    /// Boolean union through a pair of BSP trees.
    ///
    /// Polygons whose bounds reach the other operand are clipped against a tree of that
    /// whole operand. Faces shared by both operands are kept once, from `self`.
    fn union(&self, other: &Mesh) -> Mesh {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }

        let (near_a, far_a) = Self::split_by_reach(&self.polygons, &other.bounding_box());
        let (near_b, far_b) = Self::split_by_reach(&other.polygons, &self.bounding_box());

        let mut polygons = Vec::with_capacity(self.polygons.len() + other.polygons.len());
        if near_a.is_empty() || near_b.is_empty() {
            polygons.extend(near_a);
            polygons.extend(near_b);
        } else {
            let tree_a = Node::from_polygons(&self.polygons);
            let tree_b = Node::from_polygons(&other.polygons);
            polygons.extend(tree_b.clip_polygons(&near_a));

            // flipped, b's faces lying on a's surface fall behind it and are dropped
            let mut kept_b = tree_a.clip_polygons(&near_b);
            kept_b.iter_mut().for_each(Polygon::flip);
            let mut kept_b = tree_a.clip_polygons(&kept_b);
            kept_b.iter_mut().for_each(Polygon::flip);
            polygons.extend(kept_b);
        }
        polygons.extend(far_a);
        polygons.extend(far_b);
        Mesh::from_polygons(&polygons)
    }

    /// Apply an arbitrary 3D transform (as a 4x4 matrix) to the mesh.
    ///
    /// Normals use the inverse transpose; a singular matrix leaves them untouched.
    fn transform(&self, mat: &Matrix4<Real>) -> Mesh {
        let mat_inv_transpose = mat
            .try_inverse()
            .map(|inv| inv.transpose())
            .unwrap_or_else(Matrix4::identity);
        let mut mesh = self.clone();

        for poly in &mut mesh.polygons {
            for vert in &mut poly.vertices {
                vert.pos = mat.transform_point(&vert.pos);
                let normal = mat_inv_transpose.transform_vector(&vert.normal);
                vert.normal = normal.try_normalize(Real::EPSILON).unwrap_or(normal);
            }
            // keep the cached plane consistent with the new vertex positions
            poly.plane = Plane::from_vertices(&poly.vertices);
        }

        mesh.bounding_box = OnceLock::new();
        mesh
    }

    /// Returns a [`parry3d::bounding_volume::Aabb`] indicating the 3D bounds of all `polygons`.
    fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
            let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
            for poly in &self.polygons {
                for v in &poly.vertices {
                    mins = mins.inf(&v.pos);
                    maxs = maxs.sup(&v.pos);
                }
            }

            // no polygons, return a trivial AABB at origin
            if mins.x > maxs.x {
                return Aabb::new(Point3::origin(), Point3::origin());
            }
            Aabb::new(mins, maxs)
        })
    }

    fn invalidate_bounding_box(&mut self) {
        self.bounding_box = OnceLock::new();
    }

    fn inverse(&self) -> Mesh {
        let mut mesh = self.clone();
        for p in &mut mesh.polygons {
            p.flip();
        }
        mesh
    }

    fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}
