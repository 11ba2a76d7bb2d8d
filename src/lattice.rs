//! Whole-lattice arrangements built on top of the dispatcher

use crate::dispatch::{CancelToken, Dispatcher, ParameterSet};
use crate::errors::LatticeError;
use crate::float_types::{Real, TAU, tolerance};
use crate::grid::{Axis, GridSpec, PlacementPoint, generate_grid, generate_grid_where};
use crate::interpolate::{Interpolation, InterpolationRule, interpolate};
use crate::kernel::Kernel;
use crate::params::{CellField, CellParameters, NodeShape, ParameterPlan};
use crate::topology::Topology;
use crate::traits::SolidOps;
use nalgebra::{Isometry3, Point2, Point3, Vector3};
use tracing::info;

/// Flat plate under the lattice footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupportPlate {
    pub thickness: Real,
    /// How far the plate reaches past the lattice on each side
    pub margin: Real,
}

/// A grid of cells of one topology whose parameters vary across the grid.
///
/// ```no_run
/// use hetlattice::prelude::*;
///
/// let grid = GridSpec::new(10.0, 3, 3, 5)?;
/// let lattice = HeterogeneousLattice::struts(
///     Topology::Bcc,
///     grid,
///     (0.8, 2.0),
///     (1.2, 2.4),
///     Interpolation::Linear,
/// );
/// let solid = lattice.generate(&MeshKernel::new())?;
/// # Ok::<(), LatticeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct HeterogeneousLattice {
    topology: Topology,
    grid: GridSpec,
    plan: ParameterPlan,
    support: Option<SupportPlate>,
    frame: Isometry3<Real>,
    cancel: Option<CancelToken>,
}

impl HeterogeneousLattice {
    pub fn new(topology: Topology, grid: GridSpec) -> Self {
        HeterogeneousLattice {
            topology,
            grid,
            plan: ParameterPlan::default(),
            support: None,
            frame: Isometry3::identity(),
            cancel: None,
        }
    }

    /// Strut lattice with strut and node diameters graded along Z.
    pub fn struts(
        topology: Topology,
        grid: GridSpec,
        strut_diameters: (Real, Real),
        node_diameters: (Real, Real),
        rule: Interpolation,
    ) -> Self {
        Self::new(topology, grid).with_plan(ParameterPlan::strut_gradient(
            Axis::Z,
            strut_diameters,
            node_diameters,
            rule,
        ))
    }

    /// Surface lattice with its thickness graded along `axis`.
    pub fn surfaces(
        topology: Topology,
        grid: GridSpec,
        thicknesses: (Real, Real),
        rule: Interpolation,
        axis: Axis,
    ) -> Self {
        let (min, max) = thicknesses;
        Self::new(topology, grid).with_rule(
            CellField::Thickness,
            InterpolationRule::new(rule, min, max, axis),
        )
    }

    pub fn with_plan(mut self, plan: ParameterPlan) -> Self {
        self.plan = plan;
        self
    }

    pub fn with_rule(mut self, field: CellField, rule: InterpolationRule) -> Self {
        self.plan = self.plan.with_rule(field, rule);
        self
    }

    /// Value used for `field` wherever no rule drives it.
    pub fn with_base_value(mut self, field: CellField, value: Real) -> Self {
        self.plan.base_mut().set(field, value);
        self
    }

    pub fn with_node_shape(mut self, shape: NodeShape) -> Self {
        self.plan.base_mut().node_shape = shape;
        self
    }

    pub fn with_support_plate(mut self, thickness: Real, margin: Real) -> Self {
        self.support = Some(SupportPlate { thickness, margin });
        self
    }

    /// Place the whole lattice, support plate included, in `frame`.
    pub fn with_frame(mut self, frame: Isometry3<Real>) -> Self {
        self.frame = frame;
        self
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub const fn topology(&self) -> Topology {
        self.topology
    }

    pub const fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn plan(&self) -> &ParameterPlan {
        &self.plan
    }

    /// Placement points with their resolved parameters, in build order.
    pub fn cells(&self) -> Result<Vec<(PlacementPoint, CellParameters)>, LatticeError> {
        let points = generate_grid(&self.grid);
        let params = self.plan.resolve(&self.grid, &points)?;
        Ok(points.into_iter().zip(params).collect())
    }

    fn dispatcher<'k, K: Kernel>(&self, kernel: &'k K) -> Dispatcher<'k, K> {
        let dispatcher = Dispatcher::new(kernel).with_frame(self.frame);
        match &self.cancel {
            Some(token) => dispatcher.with_cancel_token(token.clone()),
            None => dispatcher,
        }
    }

    /// Build every cell and union them, with the support plate if one is configured.
    pub fn generate<K: Kernel>(&self, kernel: &K) -> Result<K::Solid, LatticeError> {
        let points = generate_grid(&self.grid);
        let params = self.plan.resolve(&self.grid, &points)?;
        let cell_size = self.topology.cell_size_for(self.grid.unit_cell_size());

        let mut solid = self.dispatcher(kernel).dispatch(
            &points,
            cell_size,
            ParameterSet::PerPoint(&params),
            &self.topology,
        )?;

        if let Some(plate) = self.support {
            let base = support_plate(kernel, &self.grid, plate.thickness, plate.margin)?;
            solid = solid.union(&base.transform(&self.frame.to_homogeneous()));
        }

        info!(
            topology = %self.topology,
            cells = points.len(),
            support = self.support.is_some(),
            "heterogeneous lattice generated"
        );
        Ok(solid)
    }
}

/// Staircase of FCC cells on `Nx = nz + break_at - 1` columns, keeping cells with `k < i`.
///
/// Parameters come from `plan`; rules built with [`martensite_plan`] index along Y.
pub fn martensite<K: Kernel>(
    kernel: &K,
    unit_cell_size: Real,
    ny: usize,
    nz: usize,
    break_at: usize,
    plan: &ParameterPlan,
) -> Result<K::Solid, LatticeError> {
    if break_at < 1 {
        return Err(LatticeError::InvalidTransitionBreak(break_at));
    }
    let nx = nz + break_at - 1;
    let grid = GridSpec::new(unit_cell_size, nx, ny, nz)?;
    let points = generate_grid_where(&grid, |[i, _, k]| k < i);
    let params = plan.resolve(&grid, &points)?;

    info!(nx, ny, nz, cells = points.len(), "building martensite staircase");
    Dispatcher::new(kernel).dispatch(
        &points,
        unit_cell_size,
        ParameterSet::PerPoint(&params),
        &Topology::Fcc,
    )
}

/// Martensite parameters: strut and node diameters graded along Y.
pub fn martensite_plan(
    strut_diameters: (Real, Real),
    node_diameters: (Real, Real),
    rule: Interpolation,
) -> ParameterPlan {
    ParameterPlan::strut_gradient(Axis::Y, strut_diameters, node_diameters, rule)
}

/// One column of gyroid-to-Schwarz-P transition cells in the plane `x = 0`, `ny` cells
/// along Y and `nz` along Z.
pub fn transition_layer<K: Kernel>(
    kernel: &K,
    unit_cell_size: Real,
    ny: usize,
    nz: usize,
    thickness: Real,
) -> Result<K::Solid, LatticeError> {
    let grid = GridSpec::new(unit_cell_size, 1, ny, nz)?;
    let points = generate_grid(&grid);
    let topology = Topology::TpmsTransition;
    let params = CellParameters::default().with_thickness(thickness);
    Dispatcher::new(kernel).dispatch(
        &points,
        topology.cell_size_for(unit_cell_size),
        params,
        &topology,
    )
}

/// Box spanning the lattice footprint plus `margin`, directly under `z = 0`.
pub fn support_plate<K: Kernel>(
    kernel: &K,
    grid: &GridSpec,
    thickness: Real,
    margin: Real,
) -> Result<K::Solid, LatticeError> {
    let extent = grid.extent();
    let min = Point3::new(-margin, -margin, -thickness);
    let size = Vector3::new(extent.x + 2.0 * margin, extent.y + 2.0 * margin, thickness);
    Ok(kernel.cuboid(min, size)?)
}

/// Lattice conforming to a hollow cylinder around the Z axis.
///
/// Cells are bounded by `radial_cells + 1` radii between `inner_radius` and
/// `outer_radius`, `angular_cells` equal sectors and `axial_cells` layers of height
/// `axial_cell_size`. Every radius carries a full ring on each layer boundary and a post
/// along the whole height at each sector boundary; spokes join neighbouring radii. Strut
/// radii follow `rule` from `strut_radii.0` at the inner radius to `strut_radii.1` at the
/// outer one, and a spoke takes the radius of its inner end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConformalCylinder {
    pub inner_radius: Real,
    pub outer_radius: Real,
    pub radial_cells: usize,
    pub angular_cells: usize,
    pub axial_cells: usize,
    pub axial_cell_size: Real,
    pub strut_radii: (Real, Real),
    pub rule: Interpolation,
}

impl ConformalCylinder {
    pub fn new(inner_radius: Real, outer_radius: Real, radial_cells: usize) -> Self {
        ConformalCylinder {
            inner_radius,
            outer_radius,
            radial_cells,
            angular_cells: 12,
            axial_cells: 1,
            axial_cell_size: 10.0,
            strut_radii: (0.5, 0.5),
            rule: Interpolation::Linear,
        }
    }

    pub fn with_angular_cells(mut self, cells: usize) -> Self {
        self.angular_cells = cells;
        self
    }

    pub fn with_axial_cells(mut self, cells: usize, cell_size: Real) -> Self {
        self.axial_cells = cells;
        self.axial_cell_size = cell_size;
        self
    }

    pub fn with_strut_radii(mut self, inner: Real, outer: Real, rule: Interpolation) -> Self {
        self.strut_radii = (inner, outer);
        self.rule = rule;
        self
    }

    fn validate(&self) -> Result<(), LatticeError> {
        let (inner, outer) = (self.inner_radius, self.outer_radius);
        if !(inner.is_finite() && outer.is_finite() && inner > 0.0 && outer - inner > tolerance())
        {
            return Err(LatticeError::InvalidRadialRange { inner, outer });
        }
        let counts = [
            ('r', self.radial_cells),
            ('θ', self.angular_cells),
            ('z', self.axial_cells),
        ];
        for (axis, count) in counts {
            if count < 1 {
                return Err(LatticeError::InvalidGridSize { axis, count });
            }
        }
        if !(self.axial_cell_size.is_finite() && self.axial_cell_size > 0.0) {
            return Err(LatticeError::InvalidUnitCellSize(self.axial_cell_size));
        }
        Ok(())
    }

    /// Radius of every ring level paired with the strut radius used there, inside out.
    pub fn levels(&self) -> Result<Vec<(Real, Real)>, LatticeError> {
        self.validate()?;
        let count = self.radial_cells + 1;
        let step = (self.outer_radius - self.inner_radius) / self.radial_cells as Real;
        let thickness = interpolate(self.rule, self.strut_radii.0, self.strut_radii.1, count)?;
        Ok(thickness
            .into_iter()
            .enumerate()
            .map(|(n, t)| (self.inner_radius + step * n as Real, t))
            .collect())
    }

    pub fn generate<K: Kernel>(&self, kernel: &K) -> Result<K::Solid, LatticeError> {
        let levels = self.levels()?;
        let height = self.axial_cells as Real * self.axial_cell_size;
        let at = |r: Real, sector: usize, z: Real| {
            let phi = TAU * sector as Real / self.angular_cells as Real;
            Point3::new(r * phi.cos(), r * phi.sin(), z)
        };
        let samples = kernel.profile_samples().max(4);

        let mut parts = Vec::new();
        for (n, &(r, t)) in levels.iter().enumerate() {
            for layer in 0..=self.axial_cells {
                let z = layer as Real * self.axial_cell_size;
                let section: Vec<Point2<Real>> = (0..samples)
                    .map(|s| {
                        let a = TAU * s as Real / samples as Real;
                        Point2::new(r + t * a.cos(), z + t * a.sin())
                    })
                    .collect();
                parts.push(kernel.revolve(&section, Vector3::z_axis())?);

                if let Some(&(outer, _)) = levels.get(n + 1) {
                    for sector in 0..self.angular_cells {
                        let spoke = (at(r, sector, z), at(outer, sector, z));
                        parts.push(kernel.cylinder_between(&spoke.0, &spoke.1, t)?);
                    }
                }
            }
            for sector in 0..self.angular_cells {
                let post = (at(r, sector, 0.0), at(r, sector, height));
                parts.push(kernel.cylinder_between(&post.0, &post.1, t)?);
            }
        }

        info!(
            levels = levels.len(),
            sectors = self.angular_cells,
            layers = self.axial_cells,
            parts = parts.len(),
            "building conformal cylinder"
        );
        Ok(<K::Solid as SolidOps>::union_all(parts))
    }
}
