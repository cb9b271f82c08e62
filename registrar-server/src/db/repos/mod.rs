//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - One struct per table, borrowing the pool
//! - INSERT/UPDATE/DELETE use RETURNING (no read-back query)
//! - Constraint violations surface as typed errors, not generic failures

pub mod memberships;
pub mod professors;
pub mod students;

pub use memberships::{LibraryMembership, MembershipRepo};
pub use professors::{Professor, ProfessorRepo};
pub use students::{Student, StudentRepo, StudentWithProctor};

use sqlx::error::ErrorKind;

/// Database error type
///
/// Unique and foreign-key violations are split out so handlers can map
/// them to distinct responses instead of a catch-all failure.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("duplicate value for '{constraint}'")]
    Conflict { constraint: String },

    #[error("'{constraint}' references a missing row")]
    ForeignKey { constraint: String },
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db) = e {
            let constraint = db.constraint().unwrap_or("constraint").to_owned();
            match db.kind() {
                ErrorKind::UniqueViolation => return Self::Conflict { constraint },
                ErrorKind::ForeignKeyViolation => return Self::ForeignKey { constraint },
                _ => {}
            }
        }
        Self::Sqlx(e)
    }
}
