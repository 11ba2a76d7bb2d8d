mod support;

use approx::assert_relative_eq;
use hetlattice::prelude::*;
use nalgebra::{Isometry3, Point3};
use support::{CountingKernel, bounds, coarse_kernel, vertices_near, within};

#[test]
fn strut_gradient_runs_along_z() {
    let grid = GridSpec::new(10.0, 2, 1, 3).expect("valid grid");
    let lattice = HeterogeneousLattice::struts(
        Topology::Bcc,
        grid,
        (0.8, 2.0),
        (1.2, 2.4),
        Interpolation::Linear,
    );
    let cells = lattice.cells().expect("cells");
    assert_eq!(cells.len(), 6);
    for (point, params) in &cells {
        let k = point.index[2] as Real;
        assert_relative_eq!(params.strut_diameter(), 0.8 + 0.6 * k, epsilon = 1e-12);
        assert_relative_eq!(params.node_diameter, 1.2 + 0.6 * k, epsilon = 1e-12);
    }
}

#[test]
fn base_values_fill_fields_without_rules() {
    let grid = GridSpec::cubic(5.0, 1).expect("valid grid");
    let lattice = HeterogeneousLattice::new(Topology::Rco, grid)
        .with_base_value(CellField::Truncation, 0.25)
        .with_node_shape(NodeShape::Sphere);
    let (_, params) = lattice.cells().expect("cells").remove(0);
    assert_eq!(params.truncation, 0.25);
    assert_eq!(params.node_shape, NodeShape::Sphere);
}

#[test]
fn surface_thickness_follows_the_chosen_axis() {
    let grid = GridSpec::new(10.0, 3, 2, 1).expect("valid grid");
    let lattice = HeterogeneousLattice::surfaces(
        Topology::Gyroid,
        grid,
        (0.2, 0.6),
        Interpolation::Linear,
        Axis::X,
    );
    for (point, params) in lattice.cells().expect("cells") {
        assert_relative_eq!(params.thickness, 0.2 + 0.2 * point.index[0] as Real, epsilon = 1e-12);
    }
}

#[test]
fn lattice_with_support_plate_sits_on_it() {
    let kernel = coarse_kernel();
    let grid = GridSpec::new(10.0, 2, 1, 1).expect("valid grid");
    let solid = HeterogeneousLattice::new(Topology::SimpleCubic, grid)
        .with_support_plate(2.0, 1.0)
        .generate(&kernel)
        .expect("lattice");
    let b = bounds(&solid);
    assert_relative_eq!(b[2], -2.0);
    assert_relative_eq!(b[0], -1.0);
    assert_relative_eq!(b[3], 21.0);
    assert!(b[5] > 10.0);
}

#[test]
fn lattice_frame_moves_cells_and_plate_together() {
    let kernel = coarse_kernel();
    let grid = GridSpec::cubic(10.0, 1).expect("valid grid");
    let solid = HeterogeneousLattice::new(Topology::SimpleCubic, grid)
        .with_support_plate(1.0, 0.0)
        .with_frame(Isometry3::translation(0.0, 0.0, 50.0))
        .generate(&kernel)
        .expect("lattice");
    let b = bounds(&solid);
    assert_relative_eq!(b[2], 49.0);
    assert!(within(&solid, [0.0, 0.0, 49.0], [10.0, 10.0, 60.0], 0.7));
}

#[test]
fn cancelled_lattice_is_not_generated() {
    let token = CancelToken::new();
    token.cancel();
    let grid = GridSpec::cubic(10.0, 1).expect("valid grid");
    let err = HeterogeneousLattice::new(Topology::Bcc, grid)
        .with_cancel_token(token)
        .generate(&coarse_kernel())
        .expect_err("cancelled");
    assert!(matches!(err, LatticeError::Cancelled { completed: 0, total: 1 }));
}

#[test]
fn martensite_break_must_be_positive() {
    let plan = martensite_plan((0.8, 1.0), (1.2, 1.4), Interpolation::Linear);
    let err = martensite(&coarse_kernel(), 10.0, 1, 2, 0, &plan).expect_err("break 0");
    assert_eq!(err, LatticeError::InvalidTransitionBreak(0));
}

#[test]
fn martensite_keeps_the_staircase_below_the_diagonal() {
    let plan = martensite_plan((0.8, 1.0), (1.2, 1.4), Interpolation::Linear);
    // nz = 1, break 2: two columns, only i = 1 has k < i
    let solid = martensite(&coarse_kernel(), 10.0, 1, 1, 2, &plan).expect("staircase");
    let b = bounds(&solid);
    assert!(b[0] > 9.0 && b[0] < 10.0, "{b:?}");
    assert!(within(&solid, [10.0, 0.0, 0.0], [20.0, 10.0, 10.0], 0.7));
}

#[test]
fn transition_layer_builds_one_column() {
    let solid = transition_layer(&coarse_kernel(), 10.0, 1, 1, 0.5).expect("layer");
    assert!(!solid.polygons.is_empty());
    assert!(within(&solid, [-2.5, -2.5, -2.5], [2.5, 7.5, 7.5], 0.5));
}

#[test]
fn support_plate_covers_the_footprint() {
    let grid = GridSpec::new(5.0, 2, 3, 4).expect("valid grid");
    let plate = support_plate(&coarse_kernel(), &grid, 1.5, 0.5).expect("plate");
    assert_eq!(bounds(&plate), [-0.5, -0.5, -1.5, 10.5, 15.5, 0.0]);
}

#[test]
fn cylinder_strut_radii_grow_outwards() {
    let cylinder =
        ConformalCylinder::new(10.0, 20.0, 2).with_strut_radii(0.5, 1.5, Interpolation::Linear);
    let levels = cylinder.levels().expect("levels");
    assert_eq!(levels.len(), 3);
    let expected = [(10.0, 0.5), (15.0, 1.0), (20.0, 1.5)];
    for ((r, t), (want_r, want_t)) in levels.into_iter().zip(expected) {
        assert_relative_eq!(r, want_r, epsilon = 1e-12);
        assert_relative_eq!(t, want_t, epsilon = 1e-12);
    }
}

#[test]
fn cylinder_has_rings_spokes_and_posts() {
    let kernel = CountingKernel::new(coarse_kernel());
    let cylinder = ConformalCylinder::new(10.0, 20.0, 2)
        .with_angular_cells(4)
        .with_axial_cells(1, 10.0)
        .with_strut_radii(0.5, 1.5, Interpolation::Linear);
    let mesh = cylinder.generate(&kernel).expect("cylinder");

    // 3 radii x 2 layers of rings, 2 x 2 x 4 spokes, 3 x 4 posts
    assert_eq!(kernel.calls(), 6 + 16 + 12);
    let b = bounds(&mesh);
    assert_relative_eq!(b[3], 21.5, epsilon = 1e-6);
    assert!(within(&mesh, [-21.5, -21.5, -1.5], [21.5, 21.5, 11.5], 1e-6), "{b:?}");
    // the bore stays open
    assert_eq!(vertices_near(&mesh, &Point3::new(0.0, 0.0, 5.0), 9.0), 0);
}

#[test]
fn cylinder_rejects_a_bad_radial_range_before_any_geometry() {
    let kernel = CountingKernel::new(coarse_kernel());
    for (inner, outer) in [(0.0, 10.0), (10.0, 10.0), (12.0, 10.0)] {
        let err = ConformalCylinder::new(inner, outer, 2)
            .generate(&kernel)
            .expect_err("bad range");
        assert_eq!(err, LatticeError::InvalidRadialRange { inner, outer });
    }
    let err = ConformalCylinder::new(5.0, 10.0, 0)
        .generate(&kernel)
        .expect_err("no radial cells");
    assert_eq!(err, LatticeError::InvalidGridSize { axis: 'r', count: 0 });
    assert_eq!(kernel.calls(), 0);
}
