//! Primitive solids as polygon meshes

use crate::errors::GeometryError;
use crate::float_types::{FRAC_PI_2, PI, Real, TAU, tolerance};
use crate::mesh::{Mesh, polygon::Polygon};
use nalgebra::{Point2, Point3, Unit, UnitQuaternion, Vector3};

impl Mesh {
    /// Axis aligned box from its minimum corner and size.
    pub fn cuboid(min: Point3<Real>, size: Vector3<Real>) -> Mesh {
        let corner = |x: usize, y: usize, z: usize| {
            min + Vector3::new(x as Real * size.x, y as Real * size.y, z as Real * size.z)
        };
        let center = min + size * 0.5;
        let faces = [
            [corner(0, 0, 0), corner(1, 0, 0), corner(1, 1, 0), corner(0, 1, 0)],
            [corner(0, 0, 1), corner(1, 0, 1), corner(1, 1, 1), corner(0, 1, 1)],
            [corner(0, 0, 0), corner(1, 0, 0), corner(1, 0, 1), corner(0, 0, 1)],
            [corner(0, 1, 0), corner(1, 1, 0), corner(1, 1, 1), corner(0, 1, 1)],
            [corner(0, 0, 0), corner(0, 1, 0), corner(0, 1, 1), corner(0, 0, 1)],
            [corner(1, 0, 0), corner(1, 1, 0), corner(1, 1, 1), corner(1, 0, 1)],
        ];
        let polygons: Vec<Polygon> = faces
            .iter()
            .filter_map(|face| Polygon::facing_away(face, &center))
            .collect();
        Mesh::from_polygons(&polygons)
    }

    /// Prism approximating a cylinder from `start` to `end`.
    ///
    /// `u` and `v` span the cross-section plane and must be orthonormal to the axis.
    pub fn cylinder(
        start: Point3<Real>,
        end: Point3<Real>,
        u: Vector3<Real>,
        v: Vector3<Real>,
        radius: Real,
        segments: usize,
    ) -> Mesh {
        let segments = segments.max(3);
        let center = nalgebra::center(&start, &end);
        let ring = |base: &Point3<Real>| -> Vec<Point3<Real>> {
            (0..segments)
                .map(|i| {
                    let a = TAU * i as Real / segments as Real;
                    base + (u * a.cos() + v * a.sin()) * radius
                })
                .collect()
        };
        let bottom = ring(&start);
        let top = ring(&end);

        let mut polygons = Vec::with_capacity(segments + 2);
        polygons.extend(Polygon::facing_away(&bottom, &center));
        polygons.extend(Polygon::facing_away(&top, &center));
        for i in 0..segments {
            let j = (i + 1) % segments;
            polygons.extend(Polygon::facing_away(
                &[bottom[i], bottom[j], top[j], top[i]],
                &center,
            ));
        }
        Mesh::from_polygons(&polygons)
    }

    /// Box with all twelve edges rounded by `radius`.
    ///
    /// Built as a sphere split into octants, each octant pushed out to its box corner, so
    /// the flat faces and edge strips appear between duplicated rings. A radius of half the
    /// smallest side collapses the flat faces away.
    pub fn rounded_cuboid(
        center: Point3<Real>,
        size: Vector3<Real>,
        radius: Real,
        segments: usize,
    ) -> Mesh {
        const QUADRANTS: [(Real, Real); 4] = [(1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0), (1.0, -1.0)];

        let core = (size * 0.5).map(|h| (h - radius).max(0.0));
        let steps = (segments / 4).max(1);
        let quarter = FRAC_PI_2 / steps as Real;

        let longitudes: Vec<(Real, Real, Real)> = QUADRANTS
            .iter()
            .enumerate()
            .flat_map(|(q, &(sx, sy))| {
                (0..=steps).map(move |s| (q as Real * FRAC_PI_2 + s as Real * quarter, sx, sy))
            })
            .collect();
        let latitudes: Vec<(Real, Real)> = [(0.0, 1.0), (FRAC_PI_2, -1.0)]
            .iter()
            .flat_map(|&(start, sz)| (0..=steps).map(move |s| (start + s as Real * quarter, sz)))
            .collect();

        let vertex = |&(phi, sz): &(Real, Real), &(theta, sx, sy): &(Real, Real, Real)| {
            center
                + Vector3::new(
                    sx * core.x + radius * phi.sin() * theta.cos(),
                    sy * core.y + radius * phi.sin() * theta.sin(),
                    sz * core.z + radius * phi.cos(),
                )
        };

        let mut polygons = Vec::new();
        for l in 0..latitudes.len() - 1 {
            for m in 0..longitudes.len() {
                let m2 = (m + 1) % longitudes.len();
                let quad = [
                    vertex(&latitudes[l], &longitudes[m]),
                    vertex(&latitudes[l + 1], &longitudes[m]),
                    vertex(&latitudes[l + 1], &longitudes[m2]),
                    vertex(&latitudes[l], &longitudes[m2]),
                ];
                polygons.extend(Polygon::facing_away(&quad, &center));
            }
        }
        // flat top and bottom between the four pole copies
        for sz in [1.0, -1.0] {
            let z = sz * (core.z + radius);
            let cap: Vec<Point3<Real>> = QUADRANTS
                .iter()
                .map(|(sx, sy)| center + Vector3::new(sx * core.x, sy * core.y, z))
                .collect();
            polygons.extend(Polygon::facing_away(&cap, &center));
        }
        Mesh::from_polygons(&polygons)
    }

    /// Full revolution of a closed `(r, h)` profile about `axis` through the origin.
    pub fn revolve(
        profile: &[Point2<Real>],
        axis: Unit<Vector3<Real>>,
        segments: usize,
    ) -> Result<Mesh, GeometryError> {
        if profile.len() < 3 {
            return Err(GeometryError::TooFewPoints { expected: 3, got: profile.len() });
        }
        if profile.iter().any(|p| p.x < -tolerance()) {
            return Err(GeometryError::DegenerateProfile(
                "profile crosses the revolve axis".to_string(),
            ));
        }
        let n = profile.len();
        let twice_area: Real = (0..n)
            .map(|i| {
                let (a, b) = (profile[i], profile[(i + 1) % n]);
                a.x * b.y - b.x * a.y
            })
            .sum();
        if twice_area.abs() <= tolerance() * tolerance() {
            return Err(GeometryError::DegenerateProfile(
                "profile encloses no area".to_string(),
            ));
        }
        // counter-clockwise in (r, h) gives outward faces below
        let mut ccw = profile.to_vec();
        if twice_area < 0.0 {
            ccw.reverse();
        }

        let rotation = UnitQuaternion::rotation_between(&Vector3::z(), &axis)
            .unwrap_or_else(|| UnitQuaternion::from_axis_angle(&Vector3::x_axis(), PI));
        let segments = segments.max(3);
        let at = |p: &Point2<Real>, s: usize| {
            let theta = TAU * s as Real / segments as Real;
            let r = p.x.max(0.0);
            rotation * Point3::new(r * theta.cos(), r * theta.sin(), p.y)
        };

        let mut polygons = Vec::with_capacity(n * segments);
        for i in 0..n {
            let (a, b) = (&ccw[i], &ccw[(i + 1) % n]);
            for s in 0..segments {
                let s1 = (s + 1) % segments;
                polygons.extend(Polygon::from_positions(&[at(a, s), at(a, s1), at(b, s1), at(b, s)]));
            }
        }
        Ok(Mesh::from_polygons(&polygons))
    }

    /// Thickened fan surface spanning a closed boundary loop.
    ///
    /// The apex sits at the centroid of `interior` (or of the boundary when no interior
    /// point is given); each vertex is offset by `thickness` along its averaged normal.
    pub fn thick_patch(
        boundary: &[Point3<Real>],
        interior: &[Point3<Real>],
        thickness: Real,
    ) -> Result<Mesh, GeometryError> {
        let n = boundary.len();
        if n < 3 {
            return Err(GeometryError::TooFewPoints { expected: 3, got: n });
        }
        if thickness.abs() <= tolerance() {
            return Err(GeometryError::DegenerateSurface(format!(
                "thickness {thickness} is too small"
            )));
        }
        let centroid = |points: &[Point3<Real>]| {
            Point3::from(
                points.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords) / points.len() as Real,
            )
        };
        let apex = if interior.is_empty() {
            centroid(boundary)
        } else {
            centroid(interior)
        };

        let fan: Vec<Vector3<Real>> = (0..n)
            .map(|i| (boundary[i] - apex).cross(&(boundary[(i + 1) % n] - apex)))
            .collect();
        let apex_normal = fan
            .iter()
            .sum::<Vector3<Real>>()
            .try_normalize(Real::EPSILON)
            .ok_or_else(|| GeometryError::DegenerateSurface("surface patch has no extent".to_string()))?;
        let rim_normals: Vec<Vector3<Real>> = (0..n)
            .map(|i| {
                (fan[(i + n - 1) % n] + fan[i])
                    .try_normalize(Real::EPSILON)
                    .unwrap_or(apex_normal)
            })
            .collect();

        let lifted_apex = apex + apex_normal * thickness;
        let lifted: Vec<Point3<Real>> = boundary
            .iter()
            .zip(&rim_normals)
            .map(|(p, normal)| p + normal * thickness)
            .collect();

        let mut polygons = Vec::with_capacity(4 * n);
        for i in 0..n {
            let j = (i + 1) % n;
            let faces = [
                [apex, boundary[j], boundary[i]],
                [lifted_apex, lifted[i], lifted[j]],
                [boundary[i], boundary[j], lifted[j]],
                [boundary[i], lifted[j], lifted[i]],
            ];
            for face in &faces {
                if let Some(mut polygon) = Polygon::from_positions(face) {
                    if thickness < 0.0 {
                        polygon.flip();
                    }
                    polygons.push(polygon);
                }
            }
        }
        Ok(Mesh::from_polygons(&polygons))
    }
}
