//! Loans. A read attaches the lent book (with its author) and the customer.

use chrono::{DateTime, Utc};
use rusqlite::types::{Type, Value};
use rusqlite::{Connection, Row};

use crate::model::{Author, Book, Customer, Loan};

use super::base::{fetch_first, Entity, Repository};

pub type LoanRepository<'conn> = Repository<'conn, Loan>;

impl Entity for Loan {
    const NAME: &'static str = "loan";
    const TABLE: &'static str = "loans";
    const KEY: &'static str = "loan_number";
    const COLUMNS: &'static [&'static str] = &["book_id", "customer_id", "loaned_at"];

    fn key(&self) -> i64 {
        self.loan_number.get()
    }

    fn assign_key(&mut self, key: i64) {
        self.loan_number = key.into();
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let loaned_at: String = row.get(3)?;
        let loaned_at = DateTime::parse_from_rfc3339(&loaned_at)
            .map_err(|err| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(err)))?
            .with_timezone(&Utc);

        Ok(Self::new(row.get(1)?, row.get(2)?)
            .with_loaned_at(loaned_at)
            .with_loan_number(row.get(0)?))
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.book_id),
            Value::from(self.customer_id),
            Value::from(self.loaned_at.to_rfc3339()),
        ]
    }

    fn hydrate(&mut self, conn: &Connection) -> rusqlite::Result<()> {
        self.book = book_with_author(conn, self)?.map(Box::new);
        self.customer = fetch_first::<Customer>(conn, Customer::KEY, self.customer_id.get())?;
        Ok(())
    }
}

/// The book a loan refers to, with only its author attached.
pub(crate) fn book_with_author(conn: &Connection, loan: &Loan) -> rusqlite::Result<Option<Book>> {
    let Some(mut book) = fetch_first::<Book>(conn, Book::KEY, loan.book_id.get())? else {
        return Ok(None);
    };
    book.author = fetch_first::<Author>(conn, Author::KEY, book.author_id.get())?;
    Ok(Some(book))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        AuthorId, BookId, CustomerId, Genre, GenreId, Language, LanguageId, LoanId, Publisher,
        PublisherId,
    };
    use crate::repo::{
        AuthorRepository, BookRepository, CustomerRepository, GenreRepository,
        LanguageRepository, PublisherRepository,
    };
    use crate::error::Error;
    use crate::schema::Database;

    fn seed(conn: &Connection) {
        AuthorRepository::new(conn)
            .create(Author::new("Authorfirstname", "Authorlastname"))
            .unwrap();
        PublisherRepository::new(conn)
            .create(Publisher::new("Testpublisher"))
            .unwrap();
        GenreRepository::new(conn)
            .create(Genre::new("Testgenre"))
            .unwrap();
        LanguageRepository::new(conn)
            .create(Language::new("Swedish"))
            .unwrap();
        BookRepository::new(conn)
            .create(Book::new(
                "Booktitle",
                AuthorId::new(1),
                PublisherId::new(1),
                GenreId::new(1),
                LanguageId::new(1),
            ))
            .unwrap();
        CustomerRepository::new(conn)
            .create(Customer::new(
                "Customerfirstname",
                "Customerlastname",
                "test@test.com",
            ))
            .unwrap();
    }

    #[test]
    fn test_create_returns_loan_with_book_and_customer() {
        let db = Database::open_in_memory().unwrap();
        seed(db.conn());
        let repo = LoanRepository::new(db.conn());

        let loan = repo
            .create(Loan::new(BookId::new(1), CustomerId::new(1)))
            .unwrap();

        assert_eq!(loan.loan_number, LoanId::new(1));
        assert_eq!(loan.book_id, BookId::new(1));
        let book = loan.book.unwrap();
        assert_eq!(book.title, "Booktitle");
        assert_eq!(book.author.unwrap().last_name, "Authorlastname");
        assert_eq!(loan.customer.unwrap().first_name, "Customerfirstname");
    }

    #[test]
    fn test_read_by_related_fields() {
        let db = Database::open_in_memory().unwrap();
        seed(db.conn());
        let repo = LoanRepository::new(db.conn());
        repo.create(Loan::new(BookId::new(1), CustomerId::new(1)))
            .unwrap();

        let by_number = repo.read(|l| l.loan_number == LoanId::new(1)).unwrap();
        assert_eq!(by_number.book.unwrap().title, "Booktitle");

        let by_names = repo
            .read(|l| {
                l.book.as_ref().is_some_and(|b| b.title == "Booktitle")
                    && l.customer.as_ref().is_some_and(|c| {
                        c.first_name == "Customerfirstname" && c.last_name == "Customerlastname"
                    })
            })
            .unwrap();
        assert_eq!(by_names.loan_number, LoanId::new(1));
    }

    #[test]
    fn test_second_loan_of_same_book_is_rejected_by_store() {
        let db = Database::open_in_memory().unwrap();
        seed(db.conn());
        CustomerRepository::new(db.conn())
            .create(Customer::new("Other", "Customer", "other@test.com"))
            .unwrap();
        let repo = LoanRepository::new(db.conn());

        repo.create(Loan::new(BookId::new(1), CustomerId::new(1)))
            .unwrap();
        let err = repo
            .try_create(Loan::new(BookId::new(1), CustomerId::new(2)))
            .unwrap_err();

        assert!(err.is_conflict());
        assert_eq!(repo.read_all().len(), 1);
    }

    #[test]
    fn test_loaned_at_survives_round_trip() {
        let db = Database::open_in_memory().unwrap();
        seed(db.conn());
        let repo = LoanRepository::new(db.conn());

        let created = repo
            .create(Loan::new(BookId::new(1), CustomerId::new(1)))
            .unwrap();
        let read = repo.read(|l| l.book_id == BookId::new(1)).unwrap();

        assert_eq!(read.loaned_at, created.loaned_at);
        assert_eq!(read, created);
    }

    #[test]
    fn test_malformed_loaned_at_is_a_database_error() {
        let db = Database::open_in_memory().unwrap();
        seed(db.conn());
        let repo = LoanRepository::new(db.conn());
        repo.create(Loan::new(BookId::new(1), CustomerId::new(1)))
            .unwrap();
        db.conn()
            .execute("UPDATE loans SET loaned_at = 'yesterday'", [])
            .unwrap();

        assert!(matches!(repo.try_read_all(), Err(Error::Database(_))));
        assert!(repo.read_all().is_empty());
    }

    #[test]
    fn test_read_all_on_empty_database() {
        let db = Database::open_in_memory().unwrap();
        let repo = LoanRepository::new(db.conn());
        assert!(repo.read_all().is_empty());
    }
}
