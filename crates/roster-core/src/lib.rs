//! roster-core — In-memory student roster store.
//!
//! This crate defines the student data model, the store that owns it and
//! enforces its invariants, and the helpers that feed it: raw input
//! parsing, seed files, configuration, and user-facing notices.

pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod notice;
pub mod seed;
pub mod store;

pub use error::{RosterError, ValidationError};
pub use model::{Average, Form, NewStudent, PerformanceRecord, Scores, Student, Subject};
pub use store::{RosterStore, StudentDetail, SubmitOutcome};
