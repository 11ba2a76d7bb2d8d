//! Truncated polyhedral cells: rhombicuboctahedron (RCO), truncated cuboctahedron (TCO)
//! and the truncated cube
//!
//! Both are driven by the truncation ratio `t` in `[0, 1]`. At the ends of that range
//! several vertices coincide and some struts collapse; collapsed struts are skipped and
//! coincident vertices get a single node.

use crate::errors::LatticeError;
use crate::float_types::{Real, SQRT_2, tolerance};
use crate::kernel::Kernel;
use crate::params::CellParameters;
use crate::topology::struts::{CellParts, check_strut_radius};
use hashbrown::HashSet;
use nalgebra::{Point3, Vector3};

type Strut = (Point3<Real>, Point3<Real>);

/// Fails with [`LatticeError::InvalidTruncationRatio`] unless `t` lies in `[0, 1]`.
pub fn check_truncation(t: Real) -> Result<(), LatticeError> {
    if (0.0..=1.0).contains(&t) {
        Ok(())
    } else {
        Err(LatticeError::InvalidTruncationRatio(t))
    }
}

/// Grid key for a point, fine enough to tell vertices of one cell apart.
fn point_key(p: &Point3<Real>, a: Real) -> [i64; 3] {
    let scale = 1e6 / a;
    [
        (p.x * scale).round() as i64,
        (p.y * scale).round() as i64,
        (p.z * scale).round() as i64,
    ]
}

fn unique_points(points: Vec<Point3<Real>>, a: Real) -> Vec<Point3<Real>> {
    let mut seen = HashSet::with_capacity(points.len());
    points
        .into_iter()
        .filter(|p| seen.insert(point_key(p, a)))
        .collect()
}

/// Drop collapsed struts and struts already present in either direction.
fn unique_struts(struts: Vec<Strut>, a: Real) -> Vec<Strut> {
    let min_length = tolerance() * a.max(1.0);
    let mut seen = HashSet::with_capacity(struts.len());
    struts
        .into_iter()
        .filter(|(p, q)| (q - p).norm() > min_length)
        .filter(|(p, q)| {
            let (kp, kq) = (point_key(p, a), point_key(q, a));
            seen.insert(if kp <= kq { (kp, kq) } else { (kq, kp) })
        })
        .collect()
}

/// RCO vertex on the face normal to `axis` at side `high`, with the other two
/// coordinates picked from `{td, a - td}` by `su`, `sv`.
fn rco_vertex(a: Real, td: Real, axis: usize, high: bool, su: bool, sv: bool) -> Point3<Real> {
    let pick = |far: bool| if far { a - td } else { td };
    let mut p = Point3::origin();
    p[axis] = if high { a } else { 0.0 };
    p[(axis + 1) % 3] = pick(su);
    p[(axis + 2) % 3] = pick(sv);
    p
}

/// Vertices and struts of an RCO cell of size `a` and truncation ratio `t`.
pub fn rco_skeleton(a: Real, t: Real) -> (Vec<Point3<Real>>, Vec<Strut>) {
    let td = t * a * 0.5;
    let mut vertices = Vec::with_capacity(24);
    let mut struts = Vec::with_capacity(48);

    for axis in 0..3 {
        for high in [false, true] {
            let v = |su, sv| rco_vertex(a, td, axis, high, su, sv);
            let square = [v(false, false), v(true, false), v(true, true), v(false, true)];
            vertices.extend(square);
            for n in 0..4 {
                struts.push((square[n], square[(n + 1) % 4]));
            }
        }
    }

    // each cube corner is cut by a triangle joining the nearest vertex of its three faces
    for corner in 0..8usize {
        let side = |axis: usize| (corner >> axis) & 1 == 1;
        let triangle: Vec<Point3<Real>> = (0..3)
            .map(|axis| {
                rco_vertex(a, td, axis, side(axis), side((axis + 1) % 3), side((axis + 2) % 3))
            })
            .collect();
        for n in 0..3 {
            struts.push((triangle[n], triangle[(n + 1) % 3]));
        }
    }

    (unique_points(vertices, a), unique_struts(struts, a))
}

/// Vertices and struts of a TCO cell of size `a` and truncation ratio `t`.
///
/// Every face carries an octagon at `(±p, ±q)` / `(±q, ±p)` around its centre with
/// `q = h(1 - t)` and `p = q(√2 - 1)`, `h = a/2`; neighbouring octagons are joined by
/// the edges of square faces. `t ≈ 0.3694` gives the uniform solid.
pub fn tco_skeleton(a: Real, t: Real) -> (Vec<Point3<Real>>, Vec<Strut>) {
    let h = a * 0.5;
    let q = h * (1.0 - t);
    let p = q * (SQRT_2 - 1.0);
    let center = Point3::new(h, h, h);

    // (face axis, face sign, first in-plane offset, second in-plane offset)
    let at = |axis: usize, sign: Real, u: Real, v: Real| {
        let mut offset = Vector3::<Real>::zeros();
        offset[axis] = sign * h;
        offset[(axis + 1) % 3] = u;
        offset[(axis + 2) % 3] = v;
        center + offset
    };

    let octagon = [(q, p), (p, q), (-p, q), (-q, p), (-q, -p), (-p, -q), (p, -q), (q, -p)];
    let mut vertices = Vec::with_capacity(48);
    let mut struts = Vec::with_capacity(72);
    for axis in 0..3 {
        for sign in [-1.0, 1.0] {
            let ring: Vec<Point3<Real>> =
                octagon.iter().map(|&(u, v)| at(axis, sign, u, v)).collect();
            for n in 0..8 {
                struts.push((ring[n], ring[(n + 1) % 8]));
            }
            vertices.extend(ring);
        }
    }

    // connector from the octagon on face `k` to the one on face `j`, both leaning on `i`
    for i in 0..3 {
        let (j, k) = ((i + 1) % 3, (i + 2) % 3);
        for si in [-1.0, 1.0] {
            for sj in [-1.0, 1.0] {
                for sk in [-1.0, 1.0] {
                    let mut from = center;
                    from[i] += si * p;
                    from[j] += sj * q;
                    from[k] += sk * h;
                    let mut to = center;
                    to[i] += si * p;
                    to[j] += sj * h;
                    to[k] += sk * q;
                    struts.push((from, to));
                }
            }
        }
    }

    (unique_points(vertices, a), unique_struts(struts, a))
}

/// Vertices and struts of a cube of size `a` with every corner cut at `t·a/2`.
///
/// Each corner leaves a triangle of three cut points on the edges meeting there; the
/// shortened cube edges join triangles of neighbouring corners. At `t = 1` the edge
/// struts vanish and the triangles meet at the edge midpoints.
pub fn truncated_cubic_skeleton(a: Real, t: Real) -> (Vec<Point3<Real>>, Vec<Strut>) {
    let cut = t * a * 0.5;
    let mut vertices = Vec::with_capacity(24);
    let mut struts = Vec::with_capacity(36);

    for corner in 0..8usize {
        let side = |axis: usize| (corner >> axis) & 1 == 1;
        let apex = Point3::new(
            if side(0) { a } else { 0.0 },
            if side(1) { a } else { 0.0 },
            if side(2) { a } else { 0.0 },
        );
        // cut point on the edge leaving the corner along `axis`
        let triangle: Vec<Point3<Real>> = (0..3)
            .map(|axis| {
                let mut p = apex;
                p[axis] += if side(axis) { -cut } else { cut };
                p
            })
            .collect();
        for n in 0..3 {
            struts.push((triangle[n], triangle[(n + 1) % 3]));
            // the far end of this edge is cut the same way, so only low corners add it
            if !side(n) {
                let mut far = triangle[n];
                far[n] = a - cut;
                struts.push((triangle[n], far));
            }
        }
        vertices.extend(triangle);
    }

    (unique_points(vertices, a), unique_struts(struts, a))
}

fn build_skeleton<K: Kernel>(
    kernel: &K,
    params: &CellParameters,
    (vertices, struts): (Vec<Point3<Real>>, Vec<Strut>),
) -> Result<K::Solid, LatticeError> {
    let mut parts = CellParts::new(kernel, params);
    parts.struts(struts)?;
    parts.nodes(vertices)?;
    Ok(parts.finish())
}

pub fn rco<K: Kernel>(
    kernel: &K,
    a: Real,
    params: &CellParameters,
) -> Result<K::Solid, LatticeError> {
    check_truncation(params.truncation)?;
    check_strut_radius(params.strut_radius, a)?;
    build_skeleton(kernel, params, rco_skeleton(a, params.truncation))
}

pub fn tco<K: Kernel>(
    kernel: &K,
    a: Real,
    params: &CellParameters,
) -> Result<K::Solid, LatticeError> {
    check_truncation(params.truncation)?;
    check_strut_radius(params.strut_radius, a)?;
    build_skeleton(kernel, params, tco_skeleton(a, params.truncation))
}

pub fn truncated_cubic<K: Kernel>(
    kernel: &K,
    a: Real,
    params: &CellParameters,
) -> Result<K::Solid, LatticeError> {
    check_truncation(params.truncation)?;
    check_strut_radius(params.strut_radius, a)?;
    build_skeleton(kernel, params, truncated_cubic_skeleton(a, params.truncation))
}
