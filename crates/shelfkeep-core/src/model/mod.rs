pub mod catalog;
pub mod ids;
pub mod library;
pub mod price;

pub use catalog::{Category, Manufacturer, Product};
pub use ids::{
    ArticleNumber, AuthorId, BookId, CategoryId, CustomerId, GenreId, LanguageId, LoanId,
    ManufacturerId, PublisherId,
};
pub use library::{Author, Book, Customer, Genre, Language, LendingState, Loan, Publisher};
pub use price::{Price, PriceError};
