//! Invoke a cell builder once per placement point and union the results.

use crate::builder::CellBuilder;
use crate::errors::LatticeError;
use crate::float_types::Real;
use crate::grid::PlacementPoint;
use crate::kernel::Kernel;
use crate::mesh::Mesh;
use crate::params::CellParameters;
use crate::traits::SolidOps;
use nalgebra::{Isometry3, Point3, Translation3, Vector3};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::{debug, info, trace, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Anything that can tell the dispatcher where a cell goes.
///
/// `ordinal` is the position of the value in the input list; sources without a grid
/// index of their own use it as the first index component.
pub trait ToPlacement {
    fn to_placement(&self, ordinal: usize) -> PlacementPoint;
}

impl ToPlacement for PlacementPoint {
    fn to_placement(&self, _ordinal: usize) -> PlacementPoint {
        *self
    }
}

impl ToPlacement for Point3<Real> {
    fn to_placement(&self, ordinal: usize) -> PlacementPoint {
        PlacementPoint::new([ordinal, 0, 0], *self)
    }
}

impl ToPlacement for Vector3<Real> {
    fn to_placement(&self, ordinal: usize) -> PlacementPoint {
        PlacementPoint::new([ordinal, 0, 0], Point3::from(*self))
    }
}

impl ToPlacement for [Real; 3] {
    fn to_placement(&self, ordinal: usize) -> PlacementPoint {
        PlacementPoint::new([ordinal, 0, 0], Point3::from(*self))
    }
}

/// A mesh places a cell at the center of its bounding box.
impl ToPlacement for Mesh {
    fn to_placement(&self, ordinal: usize) -> PlacementPoint {
        PlacementPoint::new([ordinal, 0, 0], self.center())
    }
}

/// Parameters for a sweep: one set for every cell, or one per point in point order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterSet<'a> {
    Shared(CellParameters),
    PerPoint(&'a [CellParameters]),
}

impl ParameterSet<'_> {
    fn get(&self, n: usize) -> Option<&CellParameters> {
        match self {
            ParameterSet::Shared(params) => Some(params),
            ParameterSet::PerPoint(list) => list.get(n),
        }
    }

    fn check(&self, points: usize) -> Result<(), LatticeError> {
        match self {
            ParameterSet::PerPoint(list) if list.len() < points => {
                Err(LatticeError::ParameterCountMismatch {
                    points,
                    params: list.len(),
                })
            },
            _ => Ok(()),
        }
    }
}

impl From<CellParameters> for ParameterSet<'_> {
    fn from(params: CellParameters) -> Self {
        ParameterSet::Shared(params)
    }
}

impl<'a> From<&'a [CellParameters]> for ParameterSet<'a> {
    fn from(list: &'a [CellParameters]) -> Self {
        ParameterSet::PerPoint(list)
    }
}

impl<'a> From<&'a Vec<CellParameters>> for ParameterSet<'a> {
    fn from(list: &'a Vec<CellParameters>) -> Self {
        ParameterSet::PerPoint(list.as_slice())
    }
}

/// Shared flag that stops a running sweep at the next grid point.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Grid → parameters → build → place → union.
///
/// A dispatcher holds no state between sweeps. Any cell failure aborts the whole sweep
/// and is reported with the cell's index, position and parameters.
#[derive(Debug, Clone)]
pub struct Dispatcher<'k, K: Kernel> {
    kernel: &'k K,
    frame: Isometry3<Real>,
    use_local_coords: bool,
    cancel: Option<CancelToken>,
}

impl<'k, K: Kernel> Dispatcher<'k, K> {
    pub fn new(kernel: &'k K) -> Self {
        Dispatcher {
            kernel,
            frame: Isometry3::identity(),
            use_local_coords: true,
            cancel: None,
        }
    }

    /// Workplane frame applied to every placed cell while local coordinates are in use.
    pub fn with_frame(mut self, frame: Isometry3<Real>) -> Self {
        self.frame = frame;
        self
    }

    /// When `false` placement points are taken as global and the frame is ignored.
    pub fn use_local_coords(mut self, local: bool) -> Self {
        self.use_local_coords = local;
        self
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn kernel(&self) -> &'k K {
        self.kernel
    }

    fn placement_matrix(&self, position: &Point3<Real>) -> nalgebra::Matrix4<Real> {
        let shift = Translation3::from(position.coords).to_homogeneous();
        if self.use_local_coords {
            self.frame.to_homogeneous() * shift
        } else {
            shift
        }
    }

    fn build_cell<B>(
        &self,
        builder: &B,
        placement: &PlacementPoint,
        unit_cell_size: Real,
        params: &CellParameters,
        progress: &AtomicUsize,
        total: usize,
    ) -> Result<K::Solid, LatticeError>
    where
        B: CellBuilder<K> + ?Sized,
    {
        if let Some(token) = &self.cancel {
            if token.is_cancelled() {
                return Err(LatticeError::Cancelled {
                    completed: progress.load(Ordering::SeqCst),
                    total,
                });
            }
        }

        trace!(index = ?placement.index, ?params, "building cell");
        let local = builder
            .build(self.kernel, placement, unit_cell_size, params)
            .map_err(|err| match err {
                LatticeError::Cancelled { .. } => err,
                other => LatticeError::CellFailed {
                    index: placement.index,
                    position: [placement.position.x, placement.position.y, placement.position.z],
                    params: *params,
                    source: Box::new(other),
                },
            })?;
        progress.fetch_add(1, Ordering::SeqCst);
        Ok(local.transform(&self.placement_matrix(&placement.position)))
    }

    /// Build one cell per point and union them.
    ///
    /// An empty `points` list builds a single cell at the local origin.
    pub fn dispatch<'p, P, B>(
        &self,
        points: &[P],
        unit_cell_size: Real,
        params: impl Into<ParameterSet<'p>>,
        builder: &B,
    ) -> Result<K::Solid, LatticeError>
    where
        P: ToPlacement,
        B: CellBuilder<K> + ?Sized,
    {
        let params = params.into();
        let placements: Vec<PlacementPoint> = if points.is_empty() {
            vec![PlacementPoint::origin()]
        } else {
            points
                .iter()
                .enumerate()
                .map(|(n, p)| p.to_placement(n))
                .collect()
        };
        params.check(placements.len())?;

        let total = placements.len();
        debug!(
            points = total,
            shared_params = matches!(params, ParameterSet::Shared(_)),
            parallel = cfg!(feature = "parallel"),
            local_coords = self.use_local_coords,
            "dispatching lattice cells"
        );

        let progress = AtomicUsize::new(0);

        #[cfg(feature = "parallel")]
        let iter = placements.par_iter().enumerate();
        #[cfg(not(feature = "parallel"))]
        let iter = placements.iter().enumerate();

        let solids = iter
            .map(|(n, placement)| {
                let cell_params = params.get(n).ok_or(LatticeError::ParameterCountMismatch {
                    points: total,
                    params: n,
                })?;
                self.build_cell(builder, placement, unit_cell_size, cell_params, &progress, total)
            })
            .collect::<Result<Vec<_>, LatticeError>>();

        let solids = match solids {
            Ok(solids) => solids,
            Err(err) => {
                if let LatticeError::Cancelled { completed, total } = &err {
                    warn!(completed, total, "lattice sweep cancelled");
                }
                return Err(err);
            },
        };

        let result = <K::Solid as SolidOps>::union_all(solids);
        info!(cells = total, "lattice sweep complete");
        Ok(result)
    }
}
