mod support;

use approx::assert_relative_eq;
use hetlattice::mesh::{plane::Plane, polygon::Polygon};
use hetlattice::prelude::*;
use nalgebra::{Point2, Point3, Vector3};
use support::{approx_eq, bounds, coarse_kernel, polygon_area, volume};

fn cube(min: [Real; 3], side: Real) -> Mesh {
    Mesh::cuboid(Point3::from(min), Vector3::new(side, side, side))
}

#[test]
fn union_of_overlapping_cubes_spans_both() {
    let a = cube([0.0, 0.0, 0.0], 2.0);
    let b = cube([1.0, 1.0, 1.0], 2.0);
    let c = a.union(&b);
    assert_eq!(bounds(&c), [0.0, 0.0, 0.0, 3.0, 3.0, 3.0]);
    // faces swallowed by the other cube are clipped away
    let strictly_inside = |p: &Point3<Real>, lo: Real, hi: Real| {
        let eps = 1e-9;
        p.iter().all(|&x| x > lo + eps && x < hi - eps)
    };
    for polygon in &c.polygons {
        let center = polygon.centroid();
        assert!(!strictly_inside(&center, 0.0, 2.0), "{center:?} inside a");
        assert!(!strictly_inside(&center, 1.0, 3.0), "{center:?} inside b");
    }
}

#[test]
fn union_of_disjoint_cubes_keeps_every_face() {
    let a = cube([0.0, 0.0, 0.0], 1.0);
    let b = cube([5.0, 0.0, 0.0], 1.0);
    let c = a.union(&b);
    assert_eq!(c.polygons.len(), 12);
    assert_eq!(bounds(&c), [0.0, 0.0, 0.0, 6.0, 1.0, 1.0]);
}

#[test]
fn union_of_overlapping_cubes_has_the_expected_volume() {
    let c = cube([0.0, 0.0, 0.0], 2.0).union(&cube([1.0, 1.0, 1.0], 2.0));
    assert_relative_eq!(volume(&c), 15.0, max_relative = 1e-9);
}

#[test]
fn crossing_struts_union_to_two_prisms_less_their_overlap() {
    let (r, half, segments) = (1.0, 3.0, 32);
    let kernel = MeshKernel::new().with_segments(segments);
    let along_x = kernel
        .cylinder_between(&Point3::new(-half, 0.0, 0.0), &Point3::new(half, 0.0, 0.0), r)
        .expect("x strut");
    let along_y = kernel
        .cylinder_between(&Point3::new(0.0, -half, 0.0), &Point3::new(0.0, half, 0.0), r)
        .expect("y strut");
    let prism = polygon_area(r, segments) * 2.0 * half;
    assert_relative_eq!(volume(&along_x), prism, max_relative = 1e-9);

    // Steinmetz bicylinder: 16 r^3 / 3
    let expected = 2.0 * prism - 16.0 / 3.0 * r * r * r;
    let joined = along_x.union(&along_y);
    assert_relative_eq!(volume(&joined), expected, max_relative = 0.02);
    assert_relative_eq!(volume(&along_y.union(&along_x)), expected, max_relative = 0.02);
}

#[test]
fn strut_into_a_box_adds_only_its_outside_part() {
    let segments = 16;
    let kernel = MeshKernel::new().with_segments(segments);
    let block = cube([-1.0, -1.0, -1.0], 2.0);
    let strut = kernel
        .cylinder_between(&Point3::new(0.0, 0.0, 0.0), &Point3::new(4.0, 0.0, 0.0), 0.5)
        .expect("strut");
    // three of the strut's four units stick out of the box
    let expected = 8.0 + 3.0 * polygon_area(0.5, segments);
    assert_relative_eq!(volume(&block.union(&strut)), expected, max_relative = 1e-6);
    assert_relative_eq!(volume(&strut.union(&block)), expected, max_relative = 1e-6);
}

#[test]
fn union_all_of_nothing_is_empty() {
    let empty = <Mesh as SolidOps>::union_all(Vec::new());
    assert!(empty.is_empty());
    let one = <Mesh as SolidOps>::union_all(vec![cube([0.0; 3], 1.0)]);
    assert_eq!(one.polygons.len(), 6);
}

#[test]
fn mirror_about_reflects_through_the_base_point() {
    let a = cube([1.0, 0.0, 0.0], 1.0);
    let m = a.mirror_about(MirrorPlane::YZ, Point3::new(3.0, 0.0, 0.0));
    let b = bounds(&m);
    assert!(approx_eq(b[0], 4.0, 1e-9) && approx_eq(b[3], 5.0, 1e-9), "{b:?}");
    // reflected faces still point outwards
    for polygon in &m.polygons {
        let outward = polygon.centroid() - Point3::new(4.5, 0.5, 0.5);
        assert!(polygon.plane.normal().dot(&outward) > 0.0);
    }
}

#[test]
fn splitting_plane_cuts_a_cube_face_in_two() {
    let face = Polygon::from_positions(&[
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(2.0, 0.0, 0.0),
        Point3::new(2.0, 2.0, 0.0),
        Point3::new(0.0, 2.0, 0.0),
    ])
    .expect("square");
    let plane = Plane::from_normal(Vector3::x(), 1.0);
    let (coplanar_front, coplanar_back, front, back) = plane.split_polygon(&face);
    assert!(coplanar_front.is_empty() && coplanar_back.is_empty());
    assert_eq!((front.len(), back.len()), (1, 1));
    assert!(front[0].vertices.iter().all(|v| v.pos.x >= 1.0 - 1e-12));
    assert!(back[0].vertices.iter().all(|v| v.pos.x <= 1.0 + 1e-12));
}

#[test]
fn cylinder_between_runs_along_any_direction() {
    let kernel = MeshKernel::new().with_segments(8);
    let mesh = kernel
        .cylinder_between(&Point3::new(0.0, 0.0, 0.0), &Point3::new(4.0, 0.0, 0.0), 0.5)
        .expect("cylinder");
    let b = bounds(&mesh);
    assert!(approx_eq(b[0], 0.0, 1e-9) && approx_eq(b[3], 4.0, 1e-9), "{b:?}");
    assert!(approx_eq(b[4], 0.5, 1e-9) && approx_eq(b[5], 0.5, 1e-9), "{b:?}");
}

#[test]
fn coincident_endpoints_are_a_degenerate_strut() {
    let p = Point3::new(1.0, 1.0, 1.0);
    assert!(matches!(
        coarse_kernel().cylinder_between(&p, &p, 0.5),
        Err(GeometryError::DegenerateLength(_))
    ));
}

#[test]
fn revolve_rejects_profiles_across_the_axis() {
    let profile = [Point2::new(-1.0, 0.0), Point2::new(1.0, 0.0), Point2::new(1.0, 1.0)];
    assert!(matches!(
        coarse_kernel().revolve(&profile, Vector3::z_axis()),
        Err(GeometryError::DegenerateProfile(_))
    ));
}

#[test]
fn filleted_box_keeps_its_size() {
    let mesh = coarse_kernel()
        .filleted_box(Point3::origin(), Vector3::new(2.0, 2.0, 2.0), 0.5)
        .expect("rounded box");
    let b = bounds(&mesh);
    for n in 0..3 {
        assert!(approx_eq(b[n], -1.0, 1e-9) && approx_eq(b[n + 3], 1.0, 1e-9), "{b:?}");
    }
}

#[test]
fn surface_through_a_closed_wire_has_thickness() {
    let wire = Wire::new()
        .polyline(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ])
        .close();
    let mesh = coarse_kernel()
        .interpolate_surface(&wire, &[Point3::new(0.5, 0.5, 0.0)], 0.25)
        .expect("patch");
    let b = bounds(&mesh);
    assert!(approx_eq(b[5] - b[2], 0.25, 1e-9), "{b:?}");
}

#[test]
fn open_wire_without_close_is_rejected() {
    let wire = Wire::new().polyline(&[
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
    ]);
    assert!(wire.loop_points(2).is_err());
    assert_eq!(wire.close().loop_points(2).expect("closed").len(), 3);
}
