mod support;

use hetlattice::prelude::*;
use nalgebra::{Isometry3, Point3, Vector3};
use std::sync::atomic::{AtomicUsize, Ordering};
use support::{approx_eq, bounds, vertices_near};

fn unit_cube(
    kernel: &MeshKernel,
    _placement: &PlacementPoint,
    _size: Real,
    _params: &CellParameters,
) -> Result<Mesh, LatticeError> {
    Ok(kernel.cuboid(Point3::origin(), Vector3::new(1.0, 1.0, 1.0))?)
}

fn unit_sphere(
    kernel: &MeshKernel,
    _placement: &PlacementPoint,
    _size: Real,
    _params: &CellParameters,
) -> Result<Mesh, LatticeError> {
    Ok(kernel.sphere(&Point3::origin(), 1.0)?)
}

#[test]
fn eight_spheres_fill_a_two_by_two_grid() {
    // 8 segments so the sampled sphere reaches its radius along every axis
    let kernel = MeshKernel::new().with_segments(8);
    let grid = GridSpec::cubic(10.0, 2).expect("valid grid");
    let points = generate_grid(&grid);

    let mesh = Dispatcher::new(&kernel)
        .dispatch(&points, 10.0, CellParameters::default(), &unit_sphere)
        .expect("spheres");

    let b = bounds(&mesh);
    for (n, expected) in [-1.0, -1.0, -1.0, 11.0, 11.0, 11.0].into_iter().enumerate() {
        assert!(approx_eq(b[n], expected, 1e-6), "bound {n} is {}", b[n]);
    }
    for p in &points {
        assert!(vertices_near(&mesh, &p.position, 1.0 + 1e-6) > 0);
    }
}

#[test]
fn builder_runs_once_per_point_with_its_own_parameters() {
    let kernel = MeshKernel::new();
    let points = [[0.0, 0.0, 0.0], [5.0, 0.0, 0.0], [10.0, 0.0, 0.0]];
    let params: Vec<CellParameters> = (1..=3)
        .map(|n| CellParameters::default().with_thickness(n as Real))
        .collect();
    let calls = AtomicUsize::new(0);

    let builder = |kernel: &MeshKernel,
                   placement: &PlacementPoint,
                   _size: Real,
                   params: &CellParameters|
     -> Result<Mesh, LatticeError> {
        calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(params.thickness, placement.index[0] as Real + 1.0);
        Ok(kernel.cuboid(Point3::origin(), Vector3::new(1.0, 1.0, 1.0))?)
    };

    Dispatcher::new(&kernel)
        .dispatch(&points, 5.0, &params, &builder)
        .expect("three cells");
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn empty_point_list_places_one_cell_at_the_origin() {
    let kernel = MeshKernel::new();
    let calls = AtomicUsize::new(0);
    let builder = |kernel: &MeshKernel,
                   placement: &PlacementPoint,
                   size: Real,
                   params: &CellParameters|
     -> Result<Mesh, LatticeError> {
        calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(placement.index, [0, 0, 0]);
        unit_cube(kernel, placement, size, params)
    };

    let none: Vec<Point3<Real>> = Vec::new();
    let mesh = Dispatcher::new(&kernel)
        .dispatch(&none, 1.0, CellParameters::default(), &builder)
        .expect("origin cell");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(bounds(&mesh), [0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
}

#[test]
fn too_few_parameter_sets_fail_before_building() {
    let kernel = MeshKernel::new();
    let calls = AtomicUsize::new(0);
    let builder = |kernel: &MeshKernel,
                   placement: &PlacementPoint,
                   size: Real,
                   params: &CellParameters|
     -> Result<Mesh, LatticeError> {
        calls.fetch_add(1, Ordering::SeqCst);
        unit_cube(kernel, placement, size, params)
    };
    let grid = GridSpec::new(2.0, 3, 1, 1).expect("valid grid");
    let params = vec![CellParameters::default(); 2];

    let err = Dispatcher::new(&kernel)
        .dispatch(&generate_grid(&grid), 2.0, &params, &builder)
        .expect_err("two sets for three points");
    assert_eq!(err, LatticeError::ParameterCountMismatch { points: 3, params: 2 });
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn repeated_sweeps_give_the_same_solid() {
    let kernel = MeshKernel::new().with_segments(6);
    let points = [[0.0, 0.0, 0.0], [1.5, 0.0, 0.0]];
    let dispatcher = Dispatcher::new(&kernel);

    let first = dispatcher
        .dispatch(&points, 2.0, CellParameters::default(), &unit_sphere)
        .expect("first sweep");
    let second = dispatcher
        .dispatch(&points, 2.0, CellParameters::default(), &unit_sphere)
        .expect("second sweep");

    assert_eq!(bounds(&first), bounds(&second));
    assert_eq!(first.polygons.len(), second.polygons.len());
}

#[test]
fn frame_applies_only_with_local_coordinates() {
    let kernel = MeshKernel::new();
    let frame = Isometry3::translation(100.0, 0.0, 0.0);
    let points = [Point3::new(1.0, 0.0, 0.0)];

    let local = Dispatcher::new(&kernel)
        .with_frame(frame)
        .dispatch(&points, 1.0, CellParameters::default(), &unit_cube)
        .expect("local");
    assert_eq!(bounds(&local), [101.0, 0.0, 0.0, 102.0, 1.0, 1.0]);

    let global = Dispatcher::new(&kernel)
        .with_frame(frame)
        .use_local_coords(false)
        .dispatch(&points, 1.0, CellParameters::default(), &unit_cube)
        .expect("global");
    assert_eq!(bounds(&global), [1.0, 0.0, 0.0, 2.0, 1.0, 1.0]);
}

#[test]
fn meshes_place_cells_at_their_centers() {
    let kernel = MeshKernel::new();
    let marker = Mesh::cuboid(Point3::new(4.0, 4.0, 4.0), Vector3::new(2.0, 2.0, 2.0));
    let mesh = Dispatcher::new(&kernel)
        .dispatch(&[marker], 1.0, CellParameters::default(), &unit_cube)
        .expect("one cell");
    assert_eq!(bounds(&mesh), [5.0, 5.0, 5.0, 6.0, 6.0, 6.0]);
}

#[test]
fn failing_cell_reports_where_it_failed() {
    let kernel = MeshKernel::new();
    let grid = GridSpec::new(1.0, 3, 1, 1).expect("valid grid");
    let builder = |kernel: &MeshKernel,
                   placement: &PlacementPoint,
                   size: Real,
                   params: &CellParameters|
     -> Result<Mesh, LatticeError> {
        if placement.index == [1, 0, 0] {
            return Err(GeometryError::DegenerateRadius(0.0).into());
        }
        unit_cube(kernel, placement, size, params)
    };
    let params = CellParameters::default().with_strut_radius(0.25);

    let err = Dispatcher::new(&kernel)
        .dispatch(&generate_grid(&grid), 1.0, params, &builder)
        .expect_err("middle cell fails");
    match &err {
        LatticeError::CellFailed {
            index,
            position,
            params: failed_params,
            ..
        } => {
            assert_eq!(*index, [1, 0, 0]);
            assert_eq!(*position, [1.0, 0.0, 0.0]);
            assert_eq!(failed_params.strut_radius, 0.25);
        },
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(
        err.root_cause(),
        &LatticeError::GeometryConstruction(GeometryError::DegenerateRadius(0.0))
    );
}

#[cfg(not(feature = "parallel"))]
#[test]
fn cancelled_sweep_reports_progress() {
    let kernel = MeshKernel::new();
    let token = CancelToken::new();
    let grid = GridSpec::new(1.0, 4, 1, 1).expect("valid grid");

    let trigger = token.clone();
    let builder = move |kernel: &MeshKernel,
                        placement: &PlacementPoint,
                        size: Real,
                        params: &CellParameters|
          -> Result<Mesh, LatticeError> {
        trigger.cancel();
        unit_cube(kernel, placement, size, params)
    };

    let err = Dispatcher::new(&kernel)
        .with_cancel_token(token.clone())
        .dispatch(&generate_grid(&grid), 1.0, CellParameters::default(), &builder)
        .expect_err("cancelled after the first cell");
    // the token is checked before each cell, so only the first one completes
    match err {
        LatticeError::Cancelled { completed, total } => {
            assert_eq!(total, 4);
            assert_eq!(completed, 1);
        },
        other => panic!("unexpected error {other:?}"),
    }
    assert!(token.is_cancelled());
}
