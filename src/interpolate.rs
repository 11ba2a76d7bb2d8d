//! Parameter sequences along one grid axis.
//!
//! The three rules reproduce the formulas the lattice scripts have always used, including
//! their quirks: `Sinusoidal` oscillates with the sample index rather than with physical
//! length, and `Parabolic` peaks at `max + min`. Neither is clamped to `[min, max]`.

use crate::errors::LatticeError;
use crate::float_types::Real;
use crate::grid::Axis;
use core::fmt;
use core::str::FromStr;

/// How a scalar varies from cell to cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Interpolation {
    /// Evenly spaced from `min` to `max` inclusive
    #[default]
    Linear,
    /// `0.5·sin(s_n)·(max − min) + (min + max)/2` with `s` spaced over `[0, count]`
    Sinusoidal,
    /// `−4·max·(x_n − 0.5)² + max + min` with `x` spaced over `[0, 1]`
    Parabolic,
}

impl Interpolation {
    pub const NAMES: [&'static str; 3] = ["linear", "sin", "parabola"];

    pub const fn name(self) -> &'static str {
        match self {
            Interpolation::Linear => "linear",
            Interpolation::Sinusoidal => "sin",
            Interpolation::Parabolic => "parabola",
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Interpolation {
    type Err = LatticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(Interpolation::Linear),
            "sin" | "sinusoidal" => Ok(Interpolation::Sinusoidal),
            "parabola" | "parabolic" => Ok(Interpolation::Parabolic),
            _ => Err(LatticeError::UnknownInterpolationRule(s.to_string())),
        }
    }
}

/// `count` evenly spaced samples over `[start, end]`, both ends included.
fn linspace(start: Real, end: Real, count: usize) -> impl Iterator<Item = Real> {
    let step = if count > 1 {
        (end - start) / (count - 1) as Real
    } else {
        0.0
    };
    (0..count).map(move |n| start + step * n as Real)
}

/// Produce `count` parameter values from `min` to `max` following `kind`.
///
/// ```
/// use hetlattice::interpolate::{interpolate, Interpolation};
///
/// let values = interpolate(Interpolation::Linear, 1.0, 2.0, 3).unwrap();
/// assert_eq!(values, vec![1.0, 1.5, 2.0]);
/// ```
pub fn interpolate(
    kind: Interpolation,
    min: Real,
    max: Real,
    count: usize,
) -> Result<Vec<Real>, LatticeError> {
    if count < 1 {
        return Err(LatticeError::InvalidGridSize { axis: '-', count });
    }
    let values = match kind {
        Interpolation::Linear => linspace(min, max, count).collect(),
        Interpolation::Sinusoidal => {
            let avg = (min + max) * 0.5;
            linspace(0.0, count as Real, count)
                .map(|s| 0.5 * s.sin() * (max - min) + avg)
                .collect()
        },
        Interpolation::Parabolic => linspace(0.0, 1.0, count)
            .map(|x| -4.0 * max * (x - 0.5).powi(2) + max + min)
            .collect(),
    };
    Ok(values)
}

/// One interpolated field: a rule, its bounds and the grid axis whose index selects the
/// sample for each cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolationRule {
    pub kind: Interpolation,
    pub min: Real,
    pub max: Real,
    pub axis: Axis,
}

impl InterpolationRule {
    pub const fn new(kind: Interpolation, min: Real, max: Real, axis: Axis) -> Self {
        InterpolationRule { kind, min, max, axis }
    }

    pub const fn linear(min: Real, max: Real, axis: Axis) -> Self {
        Self::new(Interpolation::Linear, min, max, axis)
    }

    /// A rule that yields `value` everywhere.
    pub const fn constant(value: Real) -> Self {
        Self::linear(value, value, Axis::Z)
    }

    /// Sample the rule `count` times; `count` is the number of cells along `self.axis`.
    pub fn values(&self, count: usize) -> Result<Vec<Real>, LatticeError> {
        interpolate(self.kind, self.min, self.max, count).map_err(|err| match err {
            LatticeError::InvalidGridSize { count, .. } => LatticeError::InvalidGridSize {
                axis: self.axis.name(),
                count,
            },
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linear_hits_both_ends() {
        let values = interpolate(Interpolation::Linear, 0.5, 1.5, 5).expect("linear");
        assert_eq!(values.len(), 5);
        assert_relative_eq!(values[0], 0.5);
        assert_relative_eq!(values[4], 1.5);
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn single_sample_is_min() {
        for kind in [Interpolation::Linear, Interpolation::Parabolic] {
            let values = interpolate(kind, 2.0, 3.0, 1).expect("one sample");
            assert_eq!(values.len(), 1);
        }
        assert_eq!(interpolate(Interpolation::Linear, 2.0, 3.0, 1).ok(), Some(vec![2.0]));
    }

    #[test]
    fn sinusoidal_follows_index_not_length() {
        let values = interpolate(Interpolation::Sinusoidal, 1.0, 3.0, 3).expect("sin");
        // samples at s = 0, 1.5, 3
        assert_relative_eq!(values[0], 2.0);
        assert_relative_eq!(values[1], 0.5 * (1.5 as Real).sin() * 2.0 + 2.0);
        assert_relative_eq!(values[2], 0.5 * (3.0 as Real).sin() * 2.0 + 2.0);
    }

    #[test]
    fn zero_count_is_rejected() {
        assert!(matches!(
            interpolate(Interpolation::Linear, 0.0, 1.0, 0),
            Err(LatticeError::InvalidGridSize { count: 0, .. })
        ));
        let rule = InterpolationRule::linear(0.0, 1.0, Axis::Y);
        assert_eq!(
            rule.values(0),
            Err(LatticeError::InvalidGridSize { axis: 'y', count: 0 })
        );
    }

    #[test]
    fn rule_names_parse() {
        assert_eq!("sin".parse::<Interpolation>(), Ok(Interpolation::Sinusoidal));
        assert_eq!("parabola".parse::<Interpolation>(), Ok(Interpolation::Parabolic));
        assert!(matches!(
            "cubic".parse::<Interpolation>(),
            Err(LatticeError::UnknownInterpolationRule(_))
        ));
    }
}
