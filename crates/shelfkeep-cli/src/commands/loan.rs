use anyhow::{bail, Result};
use clap::Subcommand;
use shelfkeep_core::model::{BookId, CustomerId, Loan};
use shelfkeep_core::{Database, LoanService};

use super::emit;

#[derive(Debug, Subcommand)]
pub enum LoanCommand {
    /// Lend a book to a customer
    Create {
        #[arg(long)]
        book: i64,
        #[arg(long)]
        customer: i64,
    },
    /// Return a lent book
    Return { book: i64 },
    /// Show the loan of a book
    Show { book: i64 },
    /// List every active loan
    List,
}

pub fn run(command: LoanCommand, db: &Database, json: bool) -> Result<()> {
    let service = LoanService::new(db);

    match command {
        LoanCommand::Create { book, customer } => {
            let Some(loan) = service.create_loan(BookId::new(book), CustomerId::new(customer))
            else {
                bail!("Book {book} could not be lent (already on loan, or unknown book or customer)");
            };
            emit(json, &loan, |l| println!("✓ Lent {}", summary(l)))
        }
        LoanCommand::Return { book } => {
            let Some(loan) = service.delete_loan(BookId::new(book)) else {
                bail!("Book {book} is not on loan");
            };
            emit(json, &loan, |l| println!("✓ Returned book {}", l.book_id))
        }
        LoanCommand::Show { book } => {
            let Some(loan) = service.get_loan(BookId::new(book)) else {
                bail!("Book {book} is not on loan");
            };
            emit(json, &loan, |l| println!("{}", summary(l)))
        }
        LoanCommand::List => {
            let loans = service.get_all_loans();
            emit(json, &loans, |loans| {
                if loans.is_empty() {
                    println!("No active loans.");
                }
                for loan in loans {
                    println!("{}", summary(loan));
                }
            })
        }
    }
}

fn summary(loan: &Loan) -> String {
    let title = loan.book.as_ref().map_or("?", |b| b.title.as_str());
    let borrower = loan.customer.as_ref().map_or("?", |c| c.email.as_str());
    format!(
        "#{}: book {} \"{title}\" to {borrower} since {}",
        loan.loan_number,
        loan.book_id,
        loan.loaned_at.format("%Y-%m-%d %H:%M")
    )
}
