use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use shelfkeep_core::model::{Book, BookId, LendingState};
use shelfkeep_core::{BookService, Database};

use super::emit;

#[derive(Debug, Subcommand)]
pub enum BookCommand {
    /// Add a book
    Add(BookArgs),
    /// Show one book with its author, publisher, genre, language and loan
    Show { id: i64 },
    /// List every book
    List,
    /// Replace a book's title and references
    Update {
        id: i64,
        #[command(flatten)]
        book: BookArgs,
    },
    /// Delete a book, ending its loan if it is lent out
    Delete { id: i64 },
}

#[derive(Debug, Args)]
pub struct BookArgs {
    /// Book title
    pub title: String,
    /// Author's first name
    #[arg(long)]
    pub first_name: String,
    /// Author's last name
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub publisher: String,
    #[arg(long)]
    pub genre: String,
    #[arg(long)]
    pub language: String,
}

pub fn run(command: BookCommand, db: &Database, json: bool) -> Result<()> {
    let service = BookService::new(db);

    match command {
        BookCommand::Add(args) => {
            let Some(book) = service.create_book(
                &args.title,
                &args.first_name,
                &args.last_name,
                &args.publisher,
                &args.genre,
                &args.language,
            ) else {
                bail!("Book \"{}\" was rejected", args.title);
            };
            emit(json, &book, |b| println!("✓ Added {}", summary(b)))
        }
        BookCommand::Show { id } => {
            let Some(book) = service.get_book(BookId::new(id)) else {
                bail!("Book {id} not found");
            };
            emit(json, &book, print_details)
        }
        BookCommand::List => {
            let books = service.get_all_books();
            emit(json, &books, |books| {
                if books.is_empty() {
                    println!("No books.");
                }
                for book in books {
                    println!("{}", summary(book));
                }
            })
        }
        BookCommand::Update { id, book: args } => {
            let Some(mut book) = service.get_book(BookId::new(id)) else {
                bail!("Book {id} not found");
            };
            if service
                .update_book(
                    &mut book,
                    &args.title,
                    &args.first_name,
                    &args.last_name,
                    &args.publisher,
                    &args.genre,
                    &args.language,
                )
                .is_none()
            {
                bail!("Update of book {id} was rejected");
            }
            emit(json, &book, |b| println!("✓ Updated {}", summary(b)))
        }
        BookCommand::Delete { id } => {
            let Some(book) = service.delete_book(BookId::new(id)) else {
                bail!("Book {id} not found");
            };
            emit(json, &book, |b| println!("✓ Deleted {}", summary(b)))
        }
    }
}

fn summary(book: &Book) -> String {
    let author = book
        .author
        .as_ref()
        .map(|a| format!("{} {}", a.first_name, a.last_name))
        .unwrap_or_default();
    let state = match book.lending_state() {
        LendingState::Available => "available",
        LendingState::OnLoan => "on loan",
    };
    format!("#{} {} by {author} ({state})", book.id, book.title)
}

fn print_details(book: &Book) {
    println!("{}", summary(book));
    if let Some(publisher) = &book.publisher {
        println!("  Publisher: {}", publisher.name);
    }
    if let Some(genre) = &book.genre {
        println!("  Genre:     {}", genre.name);
    }
    if let Some(language) = &book.language {
        println!("  Language:  {}", language.name);
    }
    if let Some(loan) = &book.loan {
        let borrower = loan
            .customer
            .as_ref()
            .map(|c| format!("{} {} <{}>", c.first_name, c.last_name, c.email))
            .unwrap_or_else(|| loan.customer_id.to_string());
        println!(
            "  Loan:      #{} to {borrower} since {}",
            loan.loan_number,
            loan.loaned_at.format("%Y-%m-%d")
        );
    }
}
