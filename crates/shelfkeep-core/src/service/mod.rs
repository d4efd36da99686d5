//! Services composing repositories into domain operations.
//!
//! Compound writes resolve each natural-key reference (author name, genre
//! name, ...) independently with [`find_or_create`] before writing the
//! entity that refers to them. Like the repositories, services answer
//! `None` for not-found, rejected and failed operations alike.
//!
//! The existence check and the insert are separate statements. Concurrent
//! writers racing on the same natural key are settled by the store's unique
//! constraints: the loser's insert is rejected and surfaces as `None`.

pub mod book;
pub mod customer;
pub mod loan;
pub mod product;

use crate::repo::{Entity, Repository};

pub use book::BookService;
pub use customer::CustomerService;
pub use loan::LoanService;
pub use product::ProductService;

/// Return the first entity matching `predicate`, creating it with `make` when
/// none exists.
pub(crate) fn find_or_create<T, P, F>(repo: &Repository<'_, T>, predicate: P, make: F) -> Option<T>
where
    T: Entity,
    P: Fn(&T) -> bool,
    F: FnOnce() -> T,
{
    if repo.exists(&predicate) {
        repo.read(&predicate)
    } else {
        repo.create(make())
    }
}
