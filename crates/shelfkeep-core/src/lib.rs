//! Core data-access layer for shelfkeep.
//!
//! This crate defines the library and product catalog model, the SQLite
//! schema, a generic predicate-driven [`Repository`] with eager
//! relationship hydration, and the services that resolve natural keys
//! (author names, genre names, ...) into foreign-key references.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod model;
pub mod repo;
pub mod schema;
pub mod service;

pub use error::{Error, Result};
pub use repo::{Entity, Repository};
pub use schema::Database;
pub use service::{BookService, CustomerService, LoanService, ProductService};
