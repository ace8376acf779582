//! TOML descriptions of field-sum systems.
//!
//! ```toml
//! spins = 3
//! precession_Z = [1.0, 1.0, 1.0]
//! coupling_matrix_XX = [
//!     [0.0, 1.0, 0.0],
//!     [0.0, 0.0, 1.0],
//!     [0.0, 0.0, 0.0],
//! ]
//! ```

use ndarray as nd;
use serde::Deserialize;
use crate::{
    error::{ HOpError, HOpResult },
    hop::{ HOp, HOpArgs },
    terms::{ Axis, FieldTerms },
};

/// Deserialized form of a field-sum system.
///
/// Keys are spelled as the options accepted by [`HOpArgs::parse`]. Unknown
/// keys are rejected at parse time. Coefficients are real.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSumConfig {
    pub spins: usize,
    #[serde(rename = "precession_X")]
    pub precession_x: Option<Vec<f64>>,
    #[serde(rename = "precession_Y")]
    pub precession_y: Option<Vec<f64>>,
    #[serde(rename = "precession_Z")]
    pub precession_z: Option<Vec<f64>>,
    #[serde(rename = "coupling_matrix_XX")]
    pub coupling_matrix_xx: Option<Vec<Vec<f64>>>,
    #[serde(rename = "coupling_matrix_YY")]
    pub coupling_matrix_yy: Option<Vec<Vec<f64>>>,
    #[serde(rename = "coupling_matrix_ZZ")]
    pub coupling_matrix_zz: Option<Vec<Vec<f64>>>,
}

fn to_matrix(axis: Axis, rows: Vec<Vec<f64>>) -> HOpResult<nd::Array2<f64>> {
    let nrows = rows.len();
    let ncols = rows.first().map(|r| r.len()).unwrap_or(0);
    if let Some(bad) = rows.iter().position(|r| r.len() != ncols) {
        return Err(HOpError::MalformedConfig(format!(
            "row {} of coupling_matrix_{:?}{:?} has length {}, expected {}",
            bad, axis, axis, rows[bad].len(), ncols,
        )));
    }
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    nd::Array2::from_shape_vec((nrows, ncols), flat)
        .map_err(|err| HOpError::MalformedConfig(err.to_string()))
}

impl FieldSumConfig {
    /// Parse a configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> HOpResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Convert to [`FieldTerms`].
    pub fn terms(&self) -> HOpResult<FieldTerms> {
        let precessions = [
            (Axis::X, &self.precession_x),
            (Axis::Y, &self.precession_y),
            (Axis::Z, &self.precession_z),
        ];
        let couplings = [
            (Axis::X, &self.coupling_matrix_xx),
            (Axis::Y, &self.coupling_matrix_yy),
            (Axis::Z, &self.coupling_matrix_zz),
        ];
        let mut terms = FieldTerms::new();
        for (axis, maybe_coefs) in precessions {
            if let Some(coefs) = maybe_coefs {
                terms = terms.with_precession(axis, coefs.clone());
            }
        }
        for (axis, maybe_rows) in couplings {
            if let Some(rows) = maybe_rows {
                terms = terms.with_coupling(axis, to_matrix(axis, rows.clone())?);
            }
        }
        Ok(terms)
    }

    /// Convert to construction arguments.
    pub fn into_args(self) -> HOpResult<HOpArgs> {
        let terms = self.terms()?;
        Ok(HOpArgs::FieldSum { spins: self.spins, terms })
    }

    /// Assemble the described operator.
    pub fn build(self) -> HOpResult<HOp> { HOp::new(self.into_args()?) }
}

#[cfg(test)]
mod test {
    use super::*;
    use num_complex::Complex64 as C64;
    use crate::{
        hop::{ Arg, OptionValue, Options },
        pauli::{ identity, sigma_x, sigma_z },
    };

    #[test]
    fn parse_and_build() {
        let conf = FieldSumConfig::from_toml_str(r#"
            spins = 2
            precession_X = [1.0, 0.0]
            coupling_matrix_ZZ = [[0.0, 2.0], [5.0, 0.0]]
        "#).unwrap();
        assert_eq!(conf.spins, 2);
        assert_eq!(conf.precession_y, None);
        let H = conf.build().unwrap();
        let expected
            = (
                HOp::placed(2, [(1, sigma_x()), (2, identity(2))]).unwrap()
                + HOp::placed(2, [(1, sigma_z()), (2, sigma_z())]).unwrap() * 2.0
            ).unwrap();
        assert_eq!(H, expected);
        assert!(H.is_hermitian());
    }

    #[test]
    fn spins_only_is_zero() {
        let H = FieldSumConfig::from_toml_str("spins = 1").unwrap()
            .build().unwrap();
        assert_eq!(H.data(), &nd::Array2::<C64>::zeros((2, 2)));
    }

    #[test]
    fn unknown_keys_rejected() {
        let res = FieldSumConfig::from_toml_str(r#"
            spins = 2
            precesion_X = [1.0, 0.0]
        "#);
        assert!(matches!(res, Err(HOpError::Toml(_))));
    }

    #[test]
    fn ragged_couplings_rejected() {
        let conf = FieldSumConfig::from_toml_str(r#"
            spins = 2
            coupling_matrix_YY = [[0.0, 1.0], [0.0]]
        "#).unwrap();
        assert!(matches!(conf.into_args(), Err(HOpError::MalformedConfig(_))));
    }

    #[test]
    fn shape_checked_at_build() {
        let conf = FieldSumConfig::from_toml_str(r#"
            spins = 3
            precession_Z = [1.0, 1.0]
        "#).unwrap();
        assert!(matches!(
            conf.build(),
            Err(HOpError::CoefficientLength { axis: Axis::Z, expected: 3, got: 2 }),
        ));
    }

    #[test]
    fn keys_match_option_names() {
        let lower = FieldSumConfig::from_toml_str(r#"
            spins = 2
            precession_x = [1.0, 0.0]
        "#);
        assert!(matches!(lower, Err(HOpError::Toml(_))));

        let conf = FieldSumConfig::from_toml_str(r#"
            spins = 2
            precession_Y = [0.5, 0.0]
            coupling_matrix_XX = [[0.0, 1.0], [0.0, 0.0]]
        "#).unwrap();
        let options: Options
            = [
                ("precession_Y".to_string(), OptionValue::coefficients([0.5, 0.0])),
                (
                    "coupling_matrix_XX".to_string(),
                    OptionValue::couplings(nd::array![[0.0, 1.0], [0.0, 0.0]]),
                ),
            ]
            .into_iter()
            .collect();
        let from_options = HOp::from_args(&[Arg::Int(2)], &options).unwrap();
        assert_eq!(conf.build().unwrap(), from_options);
    }
}
