//! Placement of single-spin operators into tensor slots of a many-spin system.
//!
//! A system of `N` spins is represented by the ordered product
//! `M_1 ⊗ M_2 ⊗ ... ⊗ M_N`, where spin `i` (1-based) occupies slot `i - 1`.
//! All term families share this ordering.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    error::{ HOpError, HOpResult },
    pauli::{ identity, kron_all },
};

/// A 1-based spin label.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpinIndex(usize);

impl SpinIndex {
    /// Create a new spin index.
    pub fn new(index: usize) -> Self { Self(index) }

    /// Return the 1-based label.
    pub fn get(self) -> usize { self.0 }

    /// Return the 0-based tensor slot, if `self` is a valid label in a system
    /// of `spins` spins.
    pub fn slot(self, spins: usize) -> HOpResult<usize> {
        (1..=spins).contains(&self.0)
            .then(|| self.0 - 1)
            .ok_or(HOpError::SpinIndexOutOfRange { index: self.0, spins })
    }
}

/// Return the Hilbert-space dimension `2^spins` of a system of `spins` spins.
///
/// Fails if there are no spins, or if a `dim × dim` matrix could not be
/// indexed.
pub fn hilbert_dim(spins: usize) -> HOpResult<usize> {
    if spins == 0 { return Err(HOpError::ZeroSpins); }
    u32::try_from(spins).ok()
        .and_then(|s| 1_usize.checked_shl(s))
        .filter(|&d| {
            d.checked_mul(d).is_some_and(|n| n <= isize::MAX as usize)
        })
        .ok_or(HOpError::TooManySpins(spins))
}

/// Check that a matrix is a single-spin (2 × 2) operator.
pub(crate) fn check_single_spin(op: &nd::Array2<C64>) -> HOpResult<()> {
    if op.dim() == (2, 2) {
        Ok(())
    } else {
        Err(HOpError::MalformedOperator { expected: (2, 2), got: op.dim() })
    }
}

/// Build the `spins`-slot sequence of single-spin operators with `overrides`
/// at their indices and the identity everywhere else.
///
/// A fresh sequence is allocated on every call.
pub fn embed<'a, I>(spins: usize, overrides: I) -> HOpResult<Vec<nd::Array2<C64>>>
where I: IntoIterator<Item = (SpinIndex, &'a nd::Array2<C64>)>
{
    hilbert_dim(spins)?;
    let mut slots: Vec<Option<nd::Array2<C64>>> = vec![None; spins];
    for (index, op) in overrides.into_iter() {
        check_single_spin(op)?;
        let slot = index.slot(spins)?;
        if slots[slot].is_some() {
            return Err(HOpError::RepeatedSpinIndex(index.get()));
        }
        slots[slot] = Some(op.clone());
    }
    Ok(
        slots.into_iter()
            .map(|maybe_op| maybe_op.unwrap_or_else(|| identity(2)))
            .collect()
    )
}

/// Reduce an ordered slot sequence to a single matrix via the Kronecker
/// product, left to right.
pub fn reduce(slots: &[nd::Array2<C64>]) -> nd::Array2<C64> {
    kron_all(slots)
}

/// [Embed][embed] and [reduce] in one step.
pub fn place<'a, I>(spins: usize, overrides: I) -> HOpResult<nd::Array2<C64>>
where I: IntoIterator<Item = (SpinIndex, &'a nd::Array2<C64>)>
{
    embed(spins, overrides).map(|slots| reduce(&slots))
}
