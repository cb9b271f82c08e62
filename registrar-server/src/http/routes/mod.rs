//! Route modules, one per resource

pub mod health;
pub mod memberships;
pub mod proctorships;
pub mod professors;
pub mod students;
