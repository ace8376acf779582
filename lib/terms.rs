//! Sums over on-site precession terms and pairwise couplings.
//!
//! For a system of `N` spins, the precession family along axis `a` is
//! ```math
//! \sum_{i = 1}^N h_i \sigma_i^a
//! ```
//! and the coupling family along `a` is
//! ```math
//! \sum_{j = 1}^N \sum_{k = j + 1}^N J_{jk} \sigma_j^a \sigma_k^a
//! ```
//! Only the strict upper triangle of a coupling matrix is read; diagonal and
//! lower-triangle entries are ignored regardless of their values.

use itertools::Itertools;
use ndarray as nd;
use num_complex::Complex64 as C64;
use tracing::trace;
use crate::{
    embed::{ hilbert_dim, place, SpinIndex },
    error::{ HOpError, HOpResult },
    pauli::{ sigma_x, sigma_y, sigma_z },
};

/// A spin axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All three axes, in order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Return the Pauli matrix for this axis.
    pub fn pauli(self) -> nd::Array2<C64> {
        match self {
            Self::X => sigma_x(),
            Self::Y => sigma_y(),
            Self::Z => sigma_z(),
        }
    }
}

fn check_coefs(spins: usize, axis: Axis, coefs: &nd::Array1<C64>)
    -> HOpResult<()>
{
    if coefs.len() == spins {
        Ok(())
    } else {
        Err(HOpError::CoefficientLength {
            axis,
            expected: spins,
            got: coefs.len(),
        })
    }
}

fn check_couplings(spins: usize, axis: Axis, J: &nd::Array2<C64>)
    -> HOpResult<()>
{
    if J.dim() == (spins, spins) {
        Ok(())
    } else {
        Err(HOpError::CouplingShape {
            axis,
            expected: (spins, spins),
            got: J.dim(),
        })
    }
}

fn add_precession(
    H: &mut nd::Array2<C64>,
    spins: usize,
    axis: Axis,
    coefs: &nd::Array1<C64>,
) -> HOpResult<()>
{
    let op = axis.pauli();
    for (i, &h) in coefs.iter().enumerate() {
        let term = place(spins, [(SpinIndex::new(i + 1), &op)])?;
        H.scaled_add(h, &term);
    }
    Ok(())
}

fn add_coupling(
    H: &mut nd::Array2<C64>,
    spins: usize,
    axis: Axis,
    J: &nd::Array2<C64>,
) -> HOpResult<()>
{
    let op = axis.pauli();
    for (j, k) in (0..spins).tuple_combinations() {
        let term
            = place(
                spins,
                [(SpinIndex::new(j + 1), &op), (SpinIndex::new(k + 1), &op)],
            )?;
        H.scaled_add(J[[j, k]], &term);
    }
    Ok(())
}

/// Sum single-spin terms along `axis` over a system of `spins` spins, with
/// `coefs[i]` multiplying the term on spin `i + 1`.
pub fn precession(spins: usize, axis: Axis, coefs: &nd::Array1<C64>)
    -> HOpResult<nd::Array2<C64>>
{
    let dim = hilbert_dim(spins)?;
    check_coefs(spins, axis, coefs)?;
    let mut H: nd::Array2<C64> = nd::Array2::zeros((dim, dim));
    add_precession(&mut H, spins, axis, coefs)?;
    Ok(H)
}

/// Sum two-spin terms along `axis` over all pairs `j < k` in a system of
/// `spins` spins, with `J[[j - 1, k - 1]]` multiplying the term on spins `j`
/// and `k`.
pub fn coupling(spins: usize, axis: Axis, J: &nd::Array2<C64>)
    -> HOpResult<nd::Array2<C64>>
{
    let dim = hilbert_dim(spins)?;
    check_couplings(spins, axis, J)?;
    let mut H: nd::Array2<C64> = nd::Array2::zeros((dim, dim));
    add_coupling(&mut H, spins, axis, J)?;
    Ok(H)
}

/// A collection of precession and coupling families, any subset of which may
/// be present.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldTerms {
    pub precession_x: Option<nd::Array1<C64>>,
    pub precession_y: Option<nd::Array1<C64>>,
    pub precession_z: Option<nd::Array1<C64>>,
    pub coupling_xx: Option<nd::Array2<C64>>,
    pub coupling_yy: Option<nd::Array2<C64>>,
    pub coupling_zz: Option<nd::Array2<C64>>,
}

impl FieldTerms {
    /// Create a new, empty `FieldTerms`.
    pub fn new() -> Self { Self::default() }

    /// Set the precession coefficients along `axis`, replacing any already
    /// present.
    ///
    /// Coefficients may be real or complex.
    pub fn with_precession<C, T>(mut self, axis: Axis, coefs: C) -> Self
    where
        C: IntoIterator<Item = T>,
        T: Into<C64>,
    {
        *self.precession_mut(axis)
            = Some(coefs.into_iter().map(Into::into).collect());
        self
    }

    /// Set the coupling matrix along `axis`, replacing any already present.
    ///
    /// Coefficients may be real or complex.
    pub fn with_coupling<T>(mut self, axis: Axis, J: nd::Array2<T>) -> Self
    where T: Clone + Into<C64>
    {
        *self.coupling_mut(axis) = Some(J.mapv(Into::into));
        self
    }

    /// Return the precession coefficients along `axis`, if present.
    pub fn precession(&self, axis: Axis) -> Option<&nd::Array1<C64>> {
        match axis {
            Axis::X => self.precession_x.as_ref(),
            Axis::Y => self.precession_y.as_ref(),
            Axis::Z => self.precession_z.as_ref(),
        }
    }

    pub(crate) fn precession_mut(&mut self, axis: Axis)
        -> &mut Option<nd::Array1<C64>>
    {
        match axis {
            Axis::X => &mut self.precession_x,
            Axis::Y => &mut self.precession_y,
            Axis::Z => &mut self.precession_z,
        }
    }

    /// Return the coupling matrix along `axis`, if present.
    pub fn coupling(&self, axis: Axis) -> Option<&nd::Array2<C64>> {
        match axis {
            Axis::X => self.coupling_xx.as_ref(),
            Axis::Y => self.coupling_yy.as_ref(),
            Axis::Z => self.coupling_zz.as_ref(),
        }
    }

    pub(crate) fn coupling_mut(&mut self, axis: Axis)
        -> &mut Option<nd::Array2<C64>>
    {
        match axis {
            Axis::X => &mut self.coupling_xx,
            Axis::Y => &mut self.coupling_yy,
            Axis::Z => &mut self.coupling_zz,
        }
    }

    /// Return `true` if no family is present.
    pub fn is_empty(&self) -> bool {
        Axis::ALL.iter()
            .all(|&a| self.precession(a).is_none() && self.coupling(a).is_none())
    }

    /// Check that every present family fits a system of `spins` spins.
    pub fn validate(&self, spins: usize) -> HOpResult<()> {
        hilbert_dim(spins)?;
        for axis in Axis::ALL {
            if let Some(coefs) = self.precession(axis) {
                check_coefs(spins, axis, coefs)?;
            }
            if let Some(J) = self.coupling(axis) {
                check_couplings(spins, axis, J)?;
            }
        }
        Ok(())
    }

    /// Sum all present families over a system of `spins` spins.
    ///
    /// Absent families contribute nothing, so an empty `FieldTerms` gives the
    /// zero matrix.
    pub fn build(&self, spins: usize) -> HOpResult<nd::Array2<C64>> {
        self.validate(spins)?;
        let dim = hilbert_dim(spins)?;
        let mut H: nd::Array2<C64> = nd::Array2::zeros((dim, dim));
        for axis in Axis::ALL {
            if let Some(coefs) = self.precession(axis) {
                trace!(?axis, spins, "adding precession terms");
                add_precession(&mut H, spins, axis, coefs)?;
            }
        }
        for axis in Axis::ALL {
            if let Some(J) = self.coupling(axis) {
                trace!(?axis, spins, "adding coupling terms");
                add_coupling(&mut H, spins, axis, J)?;
            }
        }
        Ok(H)
    }
}
