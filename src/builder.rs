//! The contract every per-cell geometry recipe satisfies

use crate::errors::LatticeError;
use crate::float_types::Real;
use crate::grid::PlacementPoint;
use crate::kernel::Kernel;
use crate::params::CellParameters;

/// Builds the solid of one cell.
///
/// Output is expressed in cell-local coordinates with the cell's origin corner at the
/// origin; the dispatcher moves it to `placement`. Implementations are stateless and may
/// run concurrently. They validate their own parameters and fail before touching the
/// kernel when a value is out of range; nothing is clamped.
pub trait CellBuilder<K: Kernel>: Send + Sync {
    fn build(
        &self,
        kernel: &K,
        placement: &PlacementPoint,
        unit_cell_size: Real,
        params: &CellParameters,
    ) -> Result<K::Solid, LatticeError>;
}

impl<K, F> CellBuilder<K> for F
where
    K: Kernel,
    F: Fn(&K, &PlacementPoint, Real, &CellParameters) -> Result<K::Solid, LatticeError>
        + Send
        + Sync,
{
    fn build(
        &self,
        kernel: &K,
        placement: &PlacementPoint,
        unit_cell_size: Real,
        params: &CellParameters,
    ) -> Result<K::Solid, LatticeError> {
        self(kernel, placement, unit_cell_size, params)
    }
}
