//! registrar-server: HTTP server for the student/professor registry
//!
//! Students and professors are keyed by UUID and carry a unique Aadhar
//! number each. A professor proctors many students; each student can hold
//! one library membership.

pub mod db;
pub mod http;
pub mod models;
