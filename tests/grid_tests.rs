use hetlattice::float_types::Real;
use hetlattice::grid::generate_grid_where;
use hetlattice::prelude::*;

#[test]
fn grid_has_one_point_per_cell() {
    for (nx, ny, nz) in [(1, 1, 1), (2, 3, 4), (5, 1, 2)] {
        let spec = GridSpec::new(2.5, nx, ny, nz).expect("valid grid");
        let points = generate_grid(&spec);
        assert_eq!(points.len(), nx * ny * nz);
        assert_eq!(spec.len(), points.len());
        for p in &points {
            let [i, j, k] = p.index;
            assert_eq!(p.position.x, i as Real * 2.5);
            assert_eq!(p.position.y, j as Real * 2.5);
            assert_eq!(p.position.z, k as Real * 2.5);
        }
    }
}

#[test]
fn z_varies_fastest_then_y_then_x() {
    let spec = GridSpec::new(1.0, 2, 2, 2).expect("valid grid");
    let order: Vec<[usize; 3]> = generate_grid(&spec).iter().map(|p| p.index).collect();
    let mut expected = Vec::new();
    for i in 0..2 {
        for j in 0..2 {
            for k in 0..2 {
                expected.push([i, j, k]);
            }
        }
    }
    assert_eq!(order, expected);
}

#[test]
fn invalid_grids_are_rejected() {
    assert_eq!(
        GridSpec::new(1.0, 0, 1, 1),
        Err(LatticeError::InvalidGridSize { axis: 'x', count: 0 })
    );
    assert_eq!(
        GridSpec::new(1.0, 1, 1, 0),
        Err(LatticeError::InvalidGridSize { axis: 'z', count: 0 })
    );
    assert!(matches!(
        GridSpec::new(0.0, 1, 1, 1),
        Err(LatticeError::InvalidUnitCellSize(_))
    ));
    assert!(matches!(
        GridSpec::new(Real::NAN, 1, 1, 1),
        Err(LatticeError::InvalidUnitCellSize(_))
    ));
}

#[test]
fn filtered_grid_keeps_order() {
    let spec = GridSpec::new(1.0, 3, 1, 2).expect("valid grid");
    let points = generate_grid_where(&spec, |[i, _, k]| k < i);
    let kept: Vec<[usize; 3]> = points.iter().map(|p| p.index).collect();
    assert_eq!(kept, vec![[1, 0, 0], [2, 0, 0], [2, 0, 1]]);
}

#[test]
fn extent_covers_every_cell() {
    let spec = GridSpec::new(10.0, 2, 3, 4).expect("valid grid");
    let extent = spec.extent();
    assert_eq!((extent.x, extent.y, extent.z), (20.0, 30.0, 40.0));
}
