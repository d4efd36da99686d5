//! Repositories over the shelfkeep collections.
//!
//! [`Repository`] is generic over any [`Entity`]; the per-collection modules
//! only describe how an entity maps onto its table and which related rows a
//! read attaches.

pub mod base;
pub mod book;
pub mod catalog;
pub mod customer;
pub mod loan;
pub mod reference;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, Value, ValueRef};

use crate::model::{
    ArticleNumber, AuthorId, BookId, CategoryId, CustomerId, GenreId, LanguageId, LoanId,
    ManufacturerId, Price, PublisherId,
};

pub use base::{Entity, Repository};
pub use book::BookRepository;
pub use catalog::{CategoryRepository, ManufacturerRepository, ProductRepository};
pub use customer::CustomerRepository;
pub use loan::LoanRepository;
pub use reference::{AuthorRepository, GenreRepository, LanguageRepository, PublisherRepository};

macro_rules! sql_id {
    ($($name:ident),+ $(,)?) => {
        $(
            impl FromSql for $name {
                fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                    i64::column_result(value).map(Self::new)
                }
            }

            impl From<$name> for Value {
                fn from(id: $name) -> Self {
                    Self::Integer(id.get())
                }
            }
        )+
    };
}

sql_id!(
    AuthorId,
    PublisherId,
    GenreId,
    LanguageId,
    BookId,
    CustomerId,
    LoanId,
    CategoryId,
    ManufacturerId,
    ArticleNumber,
);

impl FromSql for Price {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let cents = i64::column_result(value)?;
        u64::try_from(cents)
            .ok()
            .and_then(|cents| Price::try_from_cents(cents).ok())
            .ok_or(FromSqlError::OutOfRange(cents))
    }
}

impl From<Price> for Value {
    fn from(price: Price) -> Self {
        Self::Integer(price.as_i64())
    }
}
