//! Per-cell parameters and how they vary over the grid

use crate::errors::LatticeError;
use crate::float_types::Real;
use crate::grid::{Axis, GridSpec, PlacementPoint};
use crate::interpolate::{Interpolation, InterpolationRule};

/// Reinforcement placed where struts meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeShape {
    /// Box of side `node_diameter + NODE_DELTA` with every edge filleted
    #[default]
    FilletedBox,
    /// Sphere of diameter `node_diameter`
    Sphere,
}

/// The scalars one cell is built from. Each topology reads only the fields it needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellParameters {
    pub strut_radius: Real,
    pub node_diameter: Real,
    /// Surface thickness of TPMS plates
    pub thickness: Real,
    /// Fraction of the cell removed at truncated corners, in `[0, 1]`
    pub truncation: Real,
    /// Node fillet; `None` means half the node diameter
    pub fillet_radius: Option<Real>,
    pub node_shape: NodeShape,
}

impl Default for CellParameters {
    fn default() -> Self {
        CellParameters {
            strut_radius: 0.5,
            node_diameter: 1.2,
            thickness: 0.5,
            truncation: 0.5,
            fillet_radius: None,
            node_shape: NodeShape::FilletedBox,
        }
    }
}

impl CellParameters {
    pub fn with_strut_radius(mut self, radius: Real) -> Self {
        self.strut_radius = radius;
        self
    }

    pub fn with_node_diameter(mut self, diameter: Real) -> Self {
        self.node_diameter = diameter;
        self
    }

    pub fn with_thickness(mut self, thickness: Real) -> Self {
        self.thickness = thickness;
        self
    }

    pub fn with_truncation(mut self, truncation: Real) -> Self {
        self.truncation = truncation;
        self
    }

    pub fn with_fillet_radius(mut self, radius: Real) -> Self {
        self.fillet_radius = Some(radius);
        self
    }

    pub fn with_node_shape(mut self, shape: NodeShape) -> Self {
        self.node_shape = shape;
        self
    }

    pub fn strut_diameter(&self) -> Real {
        self.strut_radius * 2.0
    }

    /// Fillet applied to box nodes.
    pub fn node_fillet(&self) -> Real {
        self.fillet_radius.unwrap_or(self.node_diameter * 0.5)
    }

    pub fn get(&self, field: CellField) -> Real {
        match field {
            CellField::StrutRadius => self.strut_radius,
            CellField::StrutDiameter => self.strut_diameter(),
            CellField::NodeDiameter => self.node_diameter,
            CellField::Thickness => self.thickness,
            CellField::Truncation => self.truncation,
            CellField::FilletRadius => self.node_fillet(),
        }
    }

    pub fn set(&mut self, field: CellField, value: Real) {
        match field {
            CellField::StrutRadius => self.strut_radius = value,
            CellField::StrutDiameter => self.strut_radius = value * 0.5,
            CellField::NodeDiameter => self.node_diameter = value,
            CellField::Thickness => self.thickness = value,
            CellField::Truncation => self.truncation = value,
            CellField::FilletRadius => self.fillet_radius = Some(value),
        }
    }
}

/// Names a scalar of [`CellParameters`] so a rule can drive it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellField {
    StrutRadius,
    /// Writes half the value into `strut_radius`
    StrutDiameter,
    NodeDiameter,
    Thickness,
    Truncation,
    FilletRadius,
}

/// Base parameters plus the rules that vary some of them across the grid.
///
/// Later rules win when two of them drive the same field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterPlan {
    base: CellParameters,
    rules: Vec<(CellField, InterpolationRule)>,
}

impl ParameterPlan {
    pub fn new(base: CellParameters) -> Self {
        ParameterPlan {
            base,
            rules: Vec::new(),
        }
    }

    /// Strut and node diameters both graded along `axis`, the way the strut lattice
    /// scripts grade them.
    pub fn strut_gradient(
        axis: Axis,
        strut_diameters: (Real, Real),
        node_diameters: (Real, Real),
        kind: Interpolation,
    ) -> Self {
        let (strut_min, strut_max) = strut_diameters;
        let (node_min, node_max) = node_diameters;
        Self::default()
            .with_rule(
                CellField::StrutDiameter,
                InterpolationRule::new(kind, strut_min, strut_max, axis),
            )
            .with_rule(
                CellField::NodeDiameter,
                InterpolationRule::new(kind, node_min, node_max, axis),
            )
    }

    pub fn with_rule(mut self, field: CellField, rule: InterpolationRule) -> Self {
        self.rules.push((field, rule));
        self
    }

    pub fn with_base(mut self, base: CellParameters) -> Self {
        self.base = base;
        self
    }

    pub fn base_mut(&mut self) -> &mut CellParameters {
        &mut self.base
    }

    pub fn base(&self) -> &CellParameters {
        &self.base
    }

    pub fn rules(&self) -> &[(CellField, InterpolationRule)] {
        &self.rules
    }

    /// One parameter set per point, in the order of `points`.
    ///
    /// Each rule is sampled once per cell count of its axis and indexed with the point's
    /// counter on that axis.
    pub fn resolve(
        &self,
        grid: &GridSpec,
        points: &[PlacementPoint],
    ) -> Result<Vec<CellParameters>, LatticeError> {
        let sequences = self
            .rules
            .iter()
            .map(|(field, rule)| Ok((*field, rule.axis, rule.values(grid.count(rule.axis))?)))
            .collect::<Result<Vec<_>, LatticeError>>()?;

        points
            .iter()
            .map(|point| {
                let mut params = self.base;
                for (field, axis, values) in &sequences {
                    let n = point.index_along(*axis);
                    let value = values.get(n).ok_or(LatticeError::ParameterCountMismatch {
                        points: n + 1,
                        params: values.len(),
                    })?;
                    params.set(*field, *value);
                }
                Ok(params)
            })
            .collect()
    }
}
