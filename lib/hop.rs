//! Construction of constant Hamiltonian operators.
//!
//! An [`HOp`] can describe a single spin, a single spin embedded in a larger
//! system, a product of operators on several spins, or a sum of precession and
//! coupling families over a whole system. Which of these is built is selected
//! by the variant of [`HOpArgs`].
//!
//! One spin, `H = σx`:
//! ```
//! # use spin_hop::{ hop::HOp, pauli::sigma_x };
//! let H = HOp::from_matrix(sigma_x()).unwrap();
//! assert!(H.is_hermitian());
//! ```
//! Two spins, `H = σx ⊗ I`:
//! ```
//! # use spin_hop::{ hop::HOp, pauli::sigma_x };
//! let H = HOp::single(2, 1, sigma_x()).unwrap();
//! assert_eq!(H.dim(), 4);
//! ```
//! Two spins interacting, `H = σx ⊗ σy`:
//! ```
//! # use spin_hop::{ hop::HOp, pauli::{ sigma_x, sigma_y } };
//! let H = HOp::placed(2, [(1, sigma_x()), (2, sigma_y())]).unwrap();
//! assert_eq!(H.num_spins(), Some(2));
//! ```

use std::ops::{ Add, Sub, Mul };
use indexmap::IndexMap;
use ndarray as nd;
use num_complex::Complex64 as C64;
use tracing::debug;
use crate::{
    embed::{ check_single_spin, place, SpinIndex },
    error::{ HOpError, HOpResult },
    pauli::is_square,
    terms::{ Axis, FieldTerms },
};

/* Construction arguments *****************************************************/

/// The four ways of specifying an operator.
#[derive(Clone, Debug, PartialEq)]
pub enum HOpArgs {
    /// An already-assembled square matrix, used as-is.
    DirectMatrix(nd::Array2<C64>),
    /// A sum of precession and coupling families over `spins` spins.
    FieldSum { spins: usize, terms: FieldTerms },
    /// A product of single-spin operators at the given indices, with the
    /// identity on every other spin.
    ExplicitPlacement {
        spins: usize,
        placements: Vec<(SpinIndex, nd::Array2<C64>)>,
    },
    /// A single-spin operator at `index` in a system of `spins` spins.
    SingleSpin { spins: usize, index: SpinIndex, op: nd::Array2<C64> },
}

/// A loosely typed positional argument, for callers that describe operators
/// with untyped argument lists.
#[derive(Clone, Debug, PartialEq)]
pub enum Arg {
    Int(usize),
    Matrix(nd::Array2<C64>),
    Placement(usize, nd::Array2<C64>),
}

/// A loosely typed keyword value.
#[derive(Clone, Debug, PartialEq)]
pub enum OptionValue {
    Coefficients(nd::Array1<C64>),
    Couplings(nd::Array2<C64>),
}

impl OptionValue {
    /// Create a coefficient list from real or complex values.
    pub fn coefficients<C, T>(coefs: C) -> Self
    where
        C: IntoIterator<Item = T>,
        T: Into<C64>,
    {
        Self::Coefficients(coefs.into_iter().map(Into::into).collect())
    }

    /// Create a coupling matrix from real or complex values.
    pub fn couplings<T>(J: nd::Array2<T>) -> Self
    where T: Clone + Into<C64>
    {
        Self::Couplings(J.mapv(Into::into))
    }
}

/// Keyword options, in the order they were given.
pub type Options = IndexMap<String, OptionValue>;

fn precession_axis(key: &str) -> Option<Axis> {
    match key {
        "precession_X" => Some(Axis::X),
        "precession_Y" => Some(Axis::Y),
        "precession_Z" => Some(Axis::Z),
        _ => None,
    }
}

fn coupling_axis(key: &str) -> Option<Axis> {
    match key {
        "coupling_matrix_XX" => Some(Axis::X),
        "coupling_matrix_YY" => Some(Axis::Y),
        "coupling_matrix_ZZ" => Some(Axis::Z),
        _ => None,
    }
}

fn parse_options(options: &Options) -> HOpResult<FieldTerms> {
    let mut terms = FieldTerms::new();
    for (key, value) in options.iter() {
        match (precession_axis(key), coupling_axis(key), value) {
            (Some(axis), _, OptionValue::Coefficients(coefs)) => {
                *terms.precession_mut(axis) = Some(coefs.clone());
            },
            (_, Some(axis), OptionValue::Couplings(J)) => {
                *terms.coupling_mut(axis) = Some(J.clone());
            },
            _ => { return Err(HOpError::UnrecognizedOption(key.clone())); },
        }
    }
    Ok(terms)
}

impl HOpArgs {
    /// Select a construction mode from a positional argument list and keyword
    /// options.
    ///
    /// Modes are tried in order and the first match wins:
    /// 1. a single integer `N` with at least one option: [`Self::FieldSum`];
    /// 2. a single square matrix with no options: [`Self::DirectMatrix`];
    /// 3. an integer `N` followed by one or more placements, with no options:
    ///    [`Self::ExplicitPlacement`];
    /// 4. integers `N ≥ i` followed by a square matrix, with no options:
    ///    [`Self::SingleSpin`].
    ///
    /// Recognized options are `precession_{X,Y,Z}` (coefficients) and
    /// `coupling_matrix_{XX,YY,ZZ}` (couplings). Unrecognized keys are
    /// rejected.
    pub fn parse(args: &[Arg], options: &Options) -> HOpResult<Self> {
        if args.is_empty() && options.is_empty() {
            return Err(HOpError::EmptyInput);
        }
        match args {
            [Arg::Int(n)] if !options.is_empty() => {
                let terms = parse_options(options)?;
                Ok(Self::FieldSum { spins: *n, terms })
            },
            [Arg::Matrix(m)] if is_square(m) && options.is_empty() => {
                Ok(Self::DirectMatrix(m.clone()))
            },
            [Arg::Int(n), rest @ ..]
                if !rest.is_empty()
                    && rest.iter().all(|a| matches!(a, Arg::Placement(..)))
                    && options.is_empty()
            => {
                let placements: Vec<(SpinIndex, nd::Array2<C64>)>
                    = rest.iter()
                    .filter_map(|a| match a {
                        Arg::Placement(i, op) => Some((SpinIndex::new(*i), op.clone())),
                        _ => None,
                    })
                    .collect();
                Ok(Self::ExplicitPlacement { spins: *n, placements })
            },
            [Arg::Int(n), Arg::Int(i), Arg::Matrix(op)]
                if n >= i && is_square(op) && options.is_empty()
            => {
                Ok(Self::SingleSpin {
                    spins: *n,
                    index: SpinIndex::new(*i),
                    op: op.clone(),
                })
            },
            _ => Err(HOpError::InvalidShape(describe(args, options))),
        }
    }
}

fn describe(args: &[Arg], options: &Options) -> String {
    let args: Vec<String>
        = args.iter()
        .map(|a| match a {
            Arg::Int(n) => format!("{}", n),
            Arg::Matrix(m) => format!("matrix{:?}", m.dim()),
            Arg::Placement(i, m) => format!("({}, matrix{:?})", i, m.dim()),
        })
        .collect();
    let keys: Vec<&str> = options.keys().map(|k| k.as_str()).collect();
    format!("arguments [{}] with options [{}]", args.join(", "), keys.join(", "))
}

/* Operators ******************************************************************/

/// A constant Hamiltonian operator, stored as a dense matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct HOp {
    data: nd::Array2<C64>,
}

impl HOp {
    /// Assemble an operator.
    ///
    /// All inputs are validated before any matrix is built; on error, nothing
    /// is returned.
    pub fn new(args: HOpArgs) -> HOpResult<Self> {
        let data
            = match args {
                HOpArgs::DirectMatrix(m) => {
                    debug!(dim = ?m.dim(), "direct matrix");
                    if !is_square(&m) {
                        return Err(HOpError::MalformedOperator {
                            expected: (m.nrows(), m.nrows()),
                            got: m.dim(),
                        });
                    }
                    m
                },
                HOpArgs::FieldSum { spins, terms } => {
                    debug!(spins, "field sum");
                    terms.build(spins)?
                },
                HOpArgs::ExplicitPlacement { spins, placements } => {
                    debug!(spins, n = placements.len(), "explicit placement");
                    place(spins, placements.iter().map(|(i, op)| (*i, op)))?
                },
                HOpArgs::SingleSpin { spins, index, op } => {
                    debug!(spins, index = index.get(), "single spin");
                    check_single_spin(&op)?;
                    place(spins, [(index, &op)])?
                },
            };
        Ok(Self { data })
    }

    /// [Parse][HOpArgs::parse] a loose argument list and assemble the
    /// resulting operator.
    pub fn from_args(args: &[Arg], options: &Options) -> HOpResult<Self> {
        Self::new(HOpArgs::parse(args, options)?)
    }

    /// Use a square matrix directly as an operator.
    pub fn from_matrix(matrix: nd::Array2<C64>) -> HOpResult<Self> {
        Self::new(HOpArgs::DirectMatrix(matrix))
    }

    /// Sum precession and coupling families over `spins` spins.
    pub fn field_sum(spins: usize, terms: FieldTerms) -> HOpResult<Self> {
        Self::new(HOpArgs::FieldSum { spins, terms })
    }

    /// Place single-spin operators at 1-based spin indices in a system of
    /// `spins` spins.
    pub fn placed<I>(spins: usize, placements: I) -> HOpResult<Self>
    where I: IntoIterator<Item = (usize, nd::Array2<C64>)>
    {
        let placements: Vec<(SpinIndex, nd::Array2<C64>)>
            = placements.into_iter()
            .map(|(i, op)| (SpinIndex::new(i), op))
            .collect();
        Self::new(HOpArgs::ExplicitPlacement { spins, placements })
    }

    /// Place a single-spin operator at a 1-based spin index in a system of
    /// `spins` spins.
    pub fn single(spins: usize, index: usize, op: nd::Array2<C64>)
        -> HOpResult<Self>
    {
        Self::new(HOpArgs::SingleSpin { spins, index: SpinIndex::new(index), op })
    }

    /// Return a reference to the underlying matrix.
    pub fn data(&self) -> &nd::Array2<C64> { &self.data }

    /// Return the underlying matrix, consuming `self`.
    pub fn into_data(self) -> nd::Array2<C64> { self.data }

    /// Return the dimension of the space `self` acts on.
    pub fn dim(&self) -> usize { self.data.nrows() }

    /// Return the number of spins `self` acts on, if its dimension is a power
    /// of 2.
    pub fn num_spins(&self) -> Option<usize> {
        let d = self.dim();
        d.is_power_of_two().then(|| d.trailing_zeros() as usize)
    }

    /// Return `true` if `self` is exactly equal to its conjugate transpose.
    pub fn is_hermitian(&self) -> bool {
        self.data.indexed_iter()
            .all(|((i, j), a)| *a == self.data[[j, i]].conj())
    }

    fn combine<F>(self, rhs: Self, f: F) -> HOpResult<Self>
    where F: FnOnce(nd::Array2<C64>, nd::Array2<C64>) -> nd::Array2<C64>
    {
        if self.dim() != rhs.dim() {
            return Err(HOpError::DimensionMismatch(self.dim(), rhs.dim()));
        }
        Ok(Self { data: f(self.data, rhs.data) })
    }
}

impl From<HOp> for nd::Array2<C64> {
    fn from(op: HOp) -> Self { op.data }
}

impl AsRef<nd::Array2<C64>> for HOp {
    fn as_ref(&self) -> &nd::Array2<C64> { &self.data }
}

impl Add for HOp {
    type Output = HOpResult<HOp>;

    fn add(self, rhs: Self) -> Self::Output {
        self.combine(rhs, |a, b| a + b)
    }
}

impl Sub for HOp {
    type Output = HOpResult<HOp>;

    fn sub(self, rhs: Self) -> Self::Output {
        self.combine(rhs, |a, b| a - b)
    }
}

impl Mul<C64> for HOp {
    type Output = HOp;

    fn mul(self, rhs: C64) -> Self::Output {
        Self { data: self.data * rhs }
    }
}

impl Mul<f64> for HOp {
    type Output = HOp;

    fn mul(self, rhs: f64) -> Self::Output { self * C64::from(rhs) }
}
