//! SQLite data access for flight and airline records.
//!
//! # Intention
//!
//! - Provide parameterized flight lookups over a flights/airlines SQLite
//!   database behind a single repository type.
//! - Encapsulate SQLite-specific binding, row materialization, and error
//!   handling.
//!
//! # Architectural Boundaries
//!
//! - Only read-side flight/airline query code belongs here.
//! - No schema management, no presentation logic or unrelated utilities.

pub mod error;
pub mod flights;
pub mod sqlite;

pub use error::{Error, Result};
pub use flights::FlightRepository;
pub use sqlite::{Params, Record, Value};
