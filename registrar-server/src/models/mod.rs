//! Domain models with validation at construction
//!
//! User input that carries an invariant is validated when the type is
//! created. Invalid input returns ValidationError, not panic.

pub mod aadhar;
pub mod validation;

pub use aadhar::AadharNumber;
pub use validation::ValidationError;
