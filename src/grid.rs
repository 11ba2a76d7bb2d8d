//! Grid specification and placement point generation

use crate::errors::LatticeError;
use crate::float_types::Real;
use core::str::FromStr;
use nalgebra::{Point3, Vector3};

/// A grid axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Position of this axis in an `(i, j, k)` index triple.
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub const fn name(self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        }
    }
}

impl FromStr for Axis {
    type Err = LatticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            _ => Err(LatticeError::InvalidAxis(s.to_string())),
        }
    }
}

/// Number of cells along each axis and the size of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    unit_cell_size: Real,
    counts: [usize; 3],
}

impl GridSpec {
    /// Validate and build a grid. Every count must be at least 1 and the cell size
    /// finite and positive.
    pub fn new(unit_cell_size: Real, nx: usize, ny: usize, nz: usize) -> Result<Self, LatticeError> {
        if !unit_cell_size.is_finite() || unit_cell_size <= 0.0 {
            return Err(LatticeError::InvalidUnitCellSize(unit_cell_size));
        }
        for (axis, count) in Axis::ALL.iter().zip([nx, ny, nz]) {
            if count < 1 {
                return Err(LatticeError::InvalidGridSize { axis: axis.name(), count });
            }
        }
        Ok(GridSpec {
            unit_cell_size,
            counts: [nx, ny, nz],
        })
    }

    /// `n × n × n` cube of cells.
    pub fn cubic(unit_cell_size: Real, n: usize) -> Result<Self, LatticeError> {
        Self::new(unit_cell_size, n, n, n)
    }

    pub const fn unit_cell_size(&self) -> Real {
        self.unit_cell_size
    }

    pub const fn count(&self, axis: Axis) -> usize {
        self.counts[axis.index()]
    }

    pub const fn counts(&self) -> [usize; 3] {
        self.counts
    }

    /// Total number of cells, which bounds the number of builder invocations.
    pub const fn len(&self) -> usize {
        self.counts[0] * self.counts[1] * self.counts[2]
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Overall extent of the lattice.
    pub fn extent(&self) -> Vector3<Real> {
        Vector3::new(
            self.counts[0] as Real,
            self.counts[1] as Real,
            self.counts[2] as Real,
        ) * self.unit_cell_size
    }
}

/// Where one cell goes: its grid index and the local-frame position of its origin corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementPoint {
    pub index: [usize; 3],
    pub position: Point3<Real>,
}

impl PlacementPoint {
    pub const fn new(index: [usize; 3], position: Point3<Real>) -> Self {
        PlacementPoint { index, position }
    }

    /// The single placement used when there is nothing to iterate over.
    pub fn origin() -> Self {
        PlacementPoint::new([0, 0, 0], Point3::origin())
    }

    pub const fn index_along(&self, axis: Axis) -> usize {
        self.index[axis.index()]
    }
}

/// All placement points of `spec` in `(i, j, k)` order with `k` varying fastest.
///
/// Parameter sequences are indexed by these same counters, so the order must not change.
pub fn generate_grid(spec: &GridSpec) -> Vec<PlacementPoint> {
    generate_grid_where(spec, |_| true)
}

/// Like [`generate_grid`] but keeps only the indices accepted by `keep`.
pub fn generate_grid_where<F>(spec: &GridSpec, keep: F) -> Vec<PlacementPoint>
where
    F: Fn([usize; 3]) -> bool,
{
    let [nx, ny, nz] = spec.counts;
    let a = spec.unit_cell_size;
    let mut points = Vec::with_capacity(spec.len());
    for i in 0..nx {
        for j in 0..ny {
            for k in 0..nz {
                let index = [i, j, k];
                if keep(index) {
                    points.push(PlacementPoint::new(
                        index,
                        Point3::new(i as Real * a, j as Real * a, k as Real * a),
                    ));
                }
            }
        }
    }
    points
}
