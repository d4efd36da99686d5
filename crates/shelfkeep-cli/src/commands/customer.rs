use anyhow::{bail, Result};
use clap::Subcommand;
use shelfkeep_core::model::{Customer, CustomerId};
use shelfkeep_core::{CustomerService, Database};

use super::emit;

#[derive(Debug, Subcommand)]
pub enum CustomerCommand {
    /// Register a customer (email addresses must be unique)
    Add {
        first_name: String,
        last_name: String,
        email: String,
    },
    /// Show one customer with their loans
    Show { id: i64 },
    /// List every customer
    List,
    /// Change a customer's name or email
    Update {
        id: i64,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Delete a customer and end their loans
    Delete { id: i64 },
}

pub fn run(command: CustomerCommand, db: &Database, json: bool) -> Result<()> {
    let service = CustomerService::new(db);

    match command {
        CustomerCommand::Add {
            first_name,
            last_name,
            email,
        } => {
            let Some(customer) =
                service.create_customer(Customer::new(first_name, last_name, email.clone()))
            else {
                bail!("A customer with email {email} already exists");
            };
            emit(json, &customer, |c| println!("✓ Added {}", summary(c)))
        }
        CustomerCommand::Show { id } => {
            let Some(customer) = service.get_customer(CustomerId::new(id)) else {
                bail!("Customer {id} not found");
            };
            emit(json, &customer, print_details)
        }
        CustomerCommand::List => {
            let customers = service.get_all_customers();
            emit(json, &customers, |customers| {
                if customers.is_empty() {
                    println!("No customers.");
                }
                for customer in customers {
                    println!("{}", summary(customer));
                }
            })
        }
        CustomerCommand::Update {
            id,
            first_name,
            last_name,
            email,
        } => {
            let Some(mut customer) = service.get_customer(CustomerId::new(id)) else {
                bail!("Customer {id} not found");
            };
            if let Some(first_name) = first_name {
                customer.first_name = first_name;
            }
            if let Some(last_name) = last_name {
                customer.last_name = last_name;
            }
            if let Some(email) = email {
                customer.email = email;
            }
            let Some(updated) = service.update_customer(&customer) else {
                bail!("Update of customer {id} was rejected");
            };
            emit(json, &updated, |c| println!("✓ Updated {}", summary(c)))
        }
        CustomerCommand::Delete { id } => {
            let Some(customer) = service.delete_customer(CustomerId::new(id)) else {
                bail!("Customer {id} not found");
            };
            emit(json, &customer, |c| println!("✓ Deleted {}", summary(c)))
        }
    }
}

fn summary(customer: &Customer) -> String {
    format!(
        "#{} {} {} <{}>",
        customer.id, customer.first_name, customer.last_name, customer.email
    )
}

fn print_details(customer: &Customer) {
    println!("{}", summary(customer));
    if customer.loans.is_empty() {
        println!("  No loans.");
    }
    for loan in &customer.loans {
        let title = loan.book.as_ref().map_or("?", |b| b.title.as_str());
        println!(
            "  Loan #{}: book {} \"{title}\" since {}",
            loan.loan_number,
            loan.book_id,
            loan.loaned_at.format("%Y-%m-%d")
        );
    }
}
