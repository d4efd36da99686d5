//! Customers. A read attaches the customer's loans, each with the lent book
//! and its author.

use rusqlite::types::Value;
use rusqlite::{Connection, Row};

use crate::model::{Customer, Loan};

use super::base::{fetch_where, Entity, Repository};
use super::loan::book_with_author;

pub type CustomerRepository<'conn> = Repository<'conn, Customer>;

impl Entity for Customer {
    const NAME: &'static str = "customer";
    const TABLE: &'static str = "customers";
    const KEY: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &["first_name", "last_name", "email"];

    fn key(&self) -> i64 {
        self.id.get()
    }

    fn assign_key(&mut self, key: i64) {
        self.id = key.into();
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            email: row.get(3)?,
            loans: Vec::new(),
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.first_name.clone()),
            Value::from(self.last_name.clone()),
            Value::from(self.email.clone()),
        ]
    }

    fn hydrate(&mut self, conn: &Connection) -> rusqlite::Result<()> {
        let mut loans = fetch_where::<Loan>(conn, "customer_id", self.id.get())?;
        for loan in &mut loans {
            loan.book = book_with_author(conn, loan)?.map(Box::new);
        }
        self.loans = loans;
        Ok(())
    }
}
