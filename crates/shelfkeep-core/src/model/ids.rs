use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        ///
        /// Values are assigned by the store on first insertion; a value of
        /// `0` marks an entity that has not been persisted yet.
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// The identifier of an entity that has not been inserted.
            pub const UNASSIGNED: Self = Self(0);

            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }

            #[must_use]
            pub const fn is_assigned(self) -> bool {
                self.0 != 0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

define_id!(AuthorId, "Store-assigned identifier of an author.");
define_id!(PublisherId, "Store-assigned identifier of a publisher.");
define_id!(GenreId, "Store-assigned identifier of a genre.");
define_id!(LanguageId, "Store-assigned identifier of a language.");
define_id!(BookId, "Store-assigned identifier of a book.");
define_id!(CustomerId, "Store-assigned identifier of a library customer.");
define_id!(LoanId, "Loan number, assigned when a book is lent out.");
define_id!(CategoryId, "Store-assigned identifier of a product category.");
define_id!(
    ManufacturerId,
    "Store-assigned identifier of a product manufacturer."
);
define_id!(ArticleNumber, "Article number of a catalog product.");
