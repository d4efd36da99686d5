use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::{AuthorId, BookId, CustomerId, GenreId, LanguageId, LoanId, PublisherId};

/// A book author, identified in practice by first and last name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    #[must_use]
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: AuthorId::UNASSIGNED,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Returns `true` when this author has exactly the given name.
    #[must_use]
    pub fn is_named(&self, first_name: &str, last_name: &str) -> bool {
        self.first_name == first_name && self.last_name == last_name
    }
}

macro_rules! define_named {
    ($name:ident, $id:ident, $doc:expr) => {
        #[doc = $doc]
        ///
        /// The name is unique across the collection.
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            pub id: $id,
            pub name: String,
        }

        impl $name {
            #[must_use]
            pub fn new(name: impl Into<String>) -> Self {
                Self {
                    id: $id::UNASSIGNED,
                    name: name.into(),
                }
            }
        }
    };
}

define_named!(Publisher, PublisherId, "A book publisher.");
define_named!(Genre, GenreId, "A literary genre.");
define_named!(Language, LanguageId, "The language a book is written in.");

/// Whether a book is on the shelf or lent out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LendingState {
    Available,
    OnLoan,
}

/// A book in the library.
///
/// The `*_id` fields are the stored foreign keys. The `Option` fields hold
/// the related rows attached by the book repository on read and are never
/// written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author_id: AuthorId,
    pub publisher_id: PublisherId,
    pub genre_id: GenreId,
    pub language_id: LanguageId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<Publisher>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<Genre>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,

    /// The active loan, if the book is lent out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan: Option<Loan>,
}

impl Book {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        author_id: AuthorId,
        publisher_id: PublisherId,
        genre_id: GenreId,
        language_id: LanguageId,
    ) -> Self {
        Self {
            id: BookId::UNASSIGNED,
            title: title.into(),
            author_id,
            publisher_id,
            genre_id,
            language_id,
            author: None,
            publisher: None,
            genre: None,
            language: None,
            loan: None,
        }
    }

    /// Lending state as of the last read.
    #[must_use]
    pub fn lending_state(&self) -> LendingState {
        if self.loan.is_some() {
            LendingState::OnLoan
        } else {
            LendingState::Available
        }
    }
}

/// A library customer. Email addresses are unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub loans: Vec<Loan>,
}

impl Customer {
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: CustomerId::UNASSIGNED,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            loans: Vec::new(),
        }
    }
}

/// A book lent to a customer. At most one loan references a given book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub loan_number: LoanId,
    pub book_id: BookId,
    pub customer_id: CustomerId,
    pub loaned_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book: Option<Box<Book>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
}

impl Loan {
    #[must_use]
    pub fn new(book_id: BookId, customer_id: CustomerId) -> Self {
        Self {
            loan_number: LoanId::UNASSIGNED,
            book_id,
            customer_id,
            loaned_at: Utc::now(),
            book: None,
            customer: None,
        }
    }

    #[must_use]
    pub fn with_loaned_at(mut self, loaned_at: DateTime<Utc>) -> Self {
        self.loaned_at = loaned_at;
        self
    }

    #[must_use]
    pub fn with_loan_number(mut self, loan_number: LoanId) -> Self {
        self.loan_number = loan_number;
        self
    }
}
