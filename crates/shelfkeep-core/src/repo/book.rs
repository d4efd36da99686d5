//! Books. A read attaches the author, publisher, genre and language, plus the
//! active loan with its customer when the book is lent out.

use rusqlite::types::Value;
use rusqlite::{Connection, Row};

use crate::model::{Author, Book, Customer, Genre, Language, Loan, Publisher};

use super::base::{fetch_first, Entity, Repository};

pub type BookRepository<'conn> = Repository<'conn, Book>;

impl Entity for Book {
    const NAME: &'static str = "book";
    const TABLE: &'static str = "books";
    const KEY: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "author_id",
        "publisher_id",
        "genre_id",
        "language_id",
    ];

    fn key(&self) -> i64 {
        self.id.get()
    }

    fn assign_key(&mut self, key: i64) {
        self.id = key.into();
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let mut book = Self::new(
            row.get::<_, String>(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
            row.get(5)?,
        );
        book.id = row.get(0)?;
        Ok(book)
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.title.clone()),
            Value::from(self.author_id),
            Value::from(self.publisher_id),
            Value::from(self.genre_id),
            Value::from(self.language_id),
        ]
    }

    fn hydrate(&mut self, conn: &Connection) -> rusqlite::Result<()> {
        self.author = fetch_first::<Author>(conn, Author::KEY, self.author_id.get())?;
        self.publisher = fetch_first::<Publisher>(conn, Publisher::KEY, self.publisher_id.get())?;
        self.genre = fetch_first::<Genre>(conn, Genre::KEY, self.genre_id.get())?;
        self.language = fetch_first::<Language>(conn, Language::KEY, self.language_id.get())?;

        self.loan = match fetch_first::<Loan>(conn, "book_id", self.id.get())? {
            Some(mut loan) => {
                loan.customer =
                    fetch_first::<Customer>(conn, Customer::KEY, loan.customer_id.get())?;
                Some(loan)
            }
            None => None,
        };
        Ok(())
    }
}
