#![allow(non_snake_case)]

//! Dense matrix representations of Hamiltonians for systems of spin-1/2
//! particles.

pub mod error;
pub mod pauli;
pub mod embed;
pub mod terms;
pub mod hop;
pub mod config;

pub use error::{ HOpError, HOpResult };
pub use embed::SpinIndex;
pub use terms::{ Axis, FieldTerms };
pub use hop::{ Arg, HOp, HOpArgs, OptionValue, Options };
pub use config::FieldSumConfig;
