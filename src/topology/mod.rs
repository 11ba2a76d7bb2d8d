//! Per-cell geometry recipes, keyed by [`Topology`].
//!
//! Every recipe builds one cell in cell-local coordinates with its origin corner at the
//! origin. Strut recipes read `strut_radius`, `node_diameter` and the node shape;
//! truncated recipes add `truncation`; surface recipes read `thickness` only.

use crate::builder::CellBuilder;
use crate::errors::LatticeError;
use crate::float_types::Real;
use crate::grid::PlacementPoint;
use crate::kernel::Kernel;
use crate::params::CellParameters;
use core::fmt;
use core::str::FromStr;

pub mod bcc;
pub mod diamond;
pub mod fcc;
pub mod struts;
pub mod tpms;
pub mod transition;
pub mod truncated;

pub use fcc::FbccVariant;

/// Lattice topology tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    SimpleCubic,
    Bcc,
    Fcc,
    Fbcc,
    Sfbcc,
    Sfbccz,
    Diamond,
    Rco,
    Tco,
    TruncatedCubic,
    Gyroid,
    SchwarzP,
    SchwarzD,
    TpmsTransition,
}

impl Topology {
    pub const ALL: [Topology; 14] = [
        Topology::SimpleCubic,
        Topology::Bcc,
        Topology::Fcc,
        Topology::Fbcc,
        Topology::Sfbcc,
        Topology::Sfbccz,
        Topology::Diamond,
        Topology::Rco,
        Topology::Tco,
        Topology::TruncatedCubic,
        Topology::Gyroid,
        Topology::SchwarzP,
        Topology::SchwarzD,
        Topology::TpmsTransition,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Topology::SimpleCubic => "simple_cubic",
            Topology::Bcc => "bcc",
            Topology::Fcc => "fcc",
            Topology::Fbcc => "fbcc",
            Topology::Sfbcc => "sfbcc",
            Topology::Sfbccz => "sfbccz",
            Topology::Diamond => "diamond",
            Topology::Rco => "rco",
            Topology::Tco => "tco",
            Topology::TruncatedCubic => "truncated_cubic",
            Topology::Gyroid => "gyroid",
            Topology::SchwarzP => "schwarz_p",
            Topology::SchwarzD => "schwarz_d",
            Topology::TpmsTransition => "tpms_transition",
        }
    }

    /// Every valid topology name, in declaration order.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|t| t.name()).collect()
    }

    /// Cells assembled from eight mirrored octants of half the cell size.
    pub const fn is_octant_mirrored(self) -> bool {
        matches!(
            self,
            Topology::Gyroid | Topology::SchwarzP | Topology::TpmsTransition
        )
    }

    /// Surface-based cells, parameterised by thickness rather than struts and nodes.
    pub const fn is_surface(self) -> bool {
        matches!(
            self,
            Topology::Gyroid | Topology::SchwarzP | Topology::SchwarzD | Topology::TpmsTransition
        )
    }

    /// Size handed to the builder for a cell occupying `unit_cell_size` in the grid.
    pub fn cell_size_for(self, unit_cell_size: Real) -> Real {
        if self.is_octant_mirrored() {
            unit_cell_size * 0.5
        } else {
            unit_cell_size
        }
    }

    /// Build one cell of this topology in cell-local coordinates.
    pub fn build_cell<K: Kernel>(
        self,
        kernel: &K,
        size: Real,
        params: &CellParameters,
    ) -> Result<K::Solid, LatticeError> {
        match self {
            Topology::SimpleCubic => bcc::simple_cubic(kernel, size, params),
            Topology::Bcc => bcc::bcc(kernel, size, params),
            Topology::Fcc => fcc::fcc(kernel, size, params),
            Topology::Fbcc => fcc::fbcc(kernel, size, params, FbccVariant::Fbcc),
            Topology::Sfbcc => fcc::fbcc(kernel, size, params, FbccVariant::Sfbcc),
            Topology::Sfbccz => fcc::fbcc(kernel, size, params, FbccVariant::Sfbccz),
            Topology::Diamond => diamond::diamond(kernel, size, params),
            Topology::Rco => truncated::rco(kernel, size, params),
            Topology::Tco => truncated::tco(kernel, size, params),
            Topology::TruncatedCubic => truncated::truncated_cubic(kernel, size, params),
            Topology::Gyroid => tpms::gyroid(kernel, size, params),
            Topology::SchwarzP => tpms::schwarz_p(kernel, size, params),
            Topology::SchwarzD => tpms::schwarz_d(kernel, size, params),
            Topology::TpmsTransition => transition::tpms_transition(kernel, size, params),
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Topology {
    type Err = LatticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name() == wanted)
            .ok_or_else(|| LatticeError::UnknownTopologyType {
                name: s.to_string(),
                valid: Self::names(),
            })
    }
}

impl<K: Kernel> CellBuilder<K> for Topology {
    fn build(
        &self,
        kernel: &K,
        _placement: &PlacementPoint,
        unit_cell_size: Real,
        params: &CellParameters,
    ) -> Result<K::Solid, LatticeError> {
        self.build_cell(kernel, unit_cell_size, params)
    }
}
