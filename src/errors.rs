//! Error types for lattice generation and kernel primitives

use crate::float_types::Real;
use crate::params::CellParameters;

/// Failures raised by a kernel while constructing a primitive.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum GeometryError {
    /// (DegenerateRadius) A circle, sphere or fillet radius is at or below tolerance
    #[error("(DegenerateRadius) radius {0} is too small to build a solid")]
    DegenerateRadius(Real),
    /// (DegenerateLength) An extrusion or strut has no length
    #[error("(DegenerateLength) length {0} is too small to build a solid")]
    DegenerateLength(Real),
    /// (DegenerateBox) A box side is at or below tolerance
    #[error("(DegenerateBox) box size [{0}, {1}, {2}] has a collapsed side")]
    DegenerateBox(Real, Real, Real),
    /// (FilletTooLarge) Neighbouring fillets on a box would overlap
    #[error("(FilletTooLarge) fillet radius {radius} exceeds half of the smallest box side {limit}")]
    FilletTooLarge { radius: Real, limit: Real },
    /// (StrutTooThick) Struts this thick would swallow the cell and self-intersect
    #[error("(StrutTooThick) strut radius {radius} must stay below half the cell size {limit}")]
    StrutTooThick { radius: Real, limit: Real },
    /// (TooFewPoints) A profile, wire or spline has fewer than the minimal number of points
    #[error("(TooFewPoints) expected at least {expected} points, got {got}")]
    TooFewPoints { expected: usize, got: usize },
    /// (DegenerateProfile) A revolve profile encloses no area or crosses the axis
    #[error("(DegenerateProfile) {0}")]
    DegenerateProfile(String),
    /// (DegenerateSurface) An interpolated surface has no thickness or no extent
    #[error("(DegenerateSurface) {0}")]
    DegenerateSurface(String),
}

/// All the ways a lattice sweep can fail.
///
/// Every variant aborts the whole sweep: a lattice with missing cells is not a usable result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum LatticeError {
    /// A grid axis or interpolation sequence was asked for fewer than one sample
    #[error("grid count along {axis} must be at least 1, got {count}")]
    InvalidGridSize { axis: char, count: usize },

    /// The unit cell size is not a finite positive number
    #[error("unit cell size must be finite and positive, got {0}")]
    InvalidUnitCellSize(Real),

    /// Fewer parameter sets were supplied than there are placement points
    #[error("{params} parameter sets supplied for {points} placement points")]
    ParameterCountMismatch { points: usize, params: usize },

    /// A topology tag did not name any known builder
    #[error("unknown topology type '{name}', expected one of: {}", .valid.join(", "))]
    UnknownTopologyType { name: String, valid: Vec<&'static str> },

    /// An interpolation rule name was not one of `linear`, `sin`, `parabola`
    #[error("unknown interpolation rule '{0}', expected one of: linear, sin, parabola")]
    UnknownInterpolationRule(String),

    /// An axis name was not one of `x`, `y`, `z`
    #[error("unknown axis '{0}', expected one of: x, y, z")]
    InvalidAxis(String),

    /// Truncation ratios are fractions of the cell and must lie in `[0, 1]`
    #[error("truncation ratio must lie in [0, 1], got {0}")]
    InvalidTruncationRatio(Real),

    /// The martensite staircase needs its break at the first cell or later
    #[error("martensite transition break must be at least 1, got {0}")]
    InvalidTransitionBreak(usize),

    /// A cylindrical lattice needs `0 < inner < outer`
    #[error("radial range must satisfy 0 < inner < outer, got inner {inner} and outer {outer}")]
    InvalidRadialRange { inner: Real, outer: Real },

    /// The kernel rejected a degenerate primitive
    #[error("geometry construction failed: {0}")]
    GeometryConstruction(#[from] GeometryError),

    /// A builder failed for one grid point
    #[error("cell {index:?} at {position:?} with {params:?} failed: {source}")]
    CellFailed {
        index: [usize; 3],
        position: [Real; 3],
        params: CellParameters,
        source: Box<LatticeError>,
    },

    /// The sweep was cancelled through its token
    #[error("lattice generation cancelled after {completed} of {total} cells")]
    Cancelled { completed: usize, total: usize },
}

impl LatticeError {
    /// Strip any [`LatticeError::CellFailed`] context and return the error that caused it.
    pub fn root_cause(&self) -> &LatticeError {
        let mut current = self;
        while let LatticeError::CellFailed { source, .. } = current {
            current = source;
        }
        current
    }
}
