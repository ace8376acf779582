//! Elementary single-spin operators and the tensor-product primitives used to
//! lift them onto many-spin Hilbert spaces.

use ndarray as nd;
use num_complex::Complex64 as C64;
use num_traits::{ Zero, One };

/// Return the `dim × dim` identity matrix.
pub fn identity(dim: usize) -> nd::Array2<C64> { nd::Array2::eye(dim) }

/// Return the Pauli σ<sub>*x*</sub> matrix.
pub fn sigma_x() -> nd::Array2<C64> {
    nd::array![
        [C64::zero(), C64::one() ],
        [C64::one(),  C64::zero()],
    ]
}

/// Return the Pauli σ<sub>*y*</sub> matrix.
pub fn sigma_y() -> nd::Array2<C64> {
    nd::array![
        [C64::zero(), -C64::i()   ],
        [C64::i(),     C64::zero()],
    ]
}

/// Return the Pauli σ<sub>*z*</sub> matrix.
pub fn sigma_z() -> nd::Array2<C64> {
    nd::array![
        [C64::one(),   C64::zero()],
        [C64::zero(), -C64::one() ],
    ]
}

/// Return `true` if a matrix has equal row and column counts.
pub fn is_square<S>(matrix: &nd::ArrayBase<S, nd::Ix2>) -> bool
where S: nd::Data
{
    let (r, c) = matrix.dim();
    r == c
}

/// Compute the Kronecker product `a ⊗ b`.
///
/// The result is block-structured so that
/// ```text
/// (a ⊗ b)[[i * p + k, j * q + l]] = a[[i, j]] * b[[k, l]]
/// ```
/// where `b` has shape `(p, q)`.
pub fn kron<Sa, Sb>(
    a: &nd::ArrayBase<Sa, nd::Ix2>,
    b: &nd::ArrayBase<Sb, nd::Ix2>,
) -> nd::Array2<C64>
where
    Sa: nd::Data<Elem = C64>,
    Sb: nd::Data<Elem = C64>,
{
    let (m, n) = a.dim();
    let (p, q) = b.dim();
    nd::Array2::from_shape_fn(
        (m * p, n * q),
        |(r, c)| a[[r / p, c / q]] * b[[r % p, c % q]],
    )
}

/// Reduce a sequence of matrices to their iterated Kronecker product, composed
/// left to right.
///
/// An empty sequence gives the 1 × 1 identity.
pub fn kron_all<'a, I>(matrices: I) -> nd::Array2<C64>
where I: IntoIterator<Item = &'a nd::Array2<C64>>
{
    matrices.into_iter()
        .fold(identity(1), |acc, m| kron(&acc, m))
}

#[cfg(test)]
mod test {
    use super::*;

    fn dagger(m: &nd::Array2<C64>) -> nd::Array2<C64> {
        m.t().mapv(|a| a.conj())
    }

    #[test]
    fn paulis_are_hermitian_involutions() {
        for s in [sigma_x(), sigma_y(), sigma_z()] {
            assert_eq!(dagger(&s), s);
            assert_eq!(s.dot(&s), identity(2));
            assert_eq!(s.diag().sum(), C64::zero());
        }
    }

    #[test]
    fn pauli_algebra() {
        let xy = sigma_x().dot(&sigma_y());
        assert_eq!(xy, sigma_z().mapv(|a| C64::i() * a));
    }

    #[test]
    fn kron_block_structure() {
        let a: nd::Array2<C64>
            = nd::array![[1.0, 2.0], [3.0, 4.0]].mapv(C64::from);
        let b: nd::Array2<C64>
            = nd::array![[0.0, 5.0], [6.0, 7.0]].mapv(C64::from);
        let ab = kron(&a, &b);
        assert_eq!(ab.dim(), (4, 4));
        for (i, j, k, l) in itertools::iproduct!(0..2, 0..2, 0..2, 0..2) {
            assert_eq!(ab[[i * 2 + k, j * 2 + l]], a[[i, j]] * b[[k, l]]);
        }
    }

    #[test]
    fn kron_all_order() {
        let xz = kron_all(&[sigma_x(), sigma_z()]);
        let zx = kron_all(&[sigma_z(), sigma_x()]);
        assert_ne!(xz, zx);
        assert_eq!(xz, kron(&sigma_x(), &sigma_z()));
        assert_eq!(kron_all(&[]), identity(1));
        assert_eq!(kron_all(&[identity(2), identity(2), identity(2)]), identity(8));
    }

    #[test]
    fn squareness() {
        assert!(is_square(&sigma_y()));
        assert!(!is_square(&nd::Array2::<C64>::zeros((2, 3))));
    }
}
