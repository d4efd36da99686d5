use crate::model::{Customer, CustomerId};
use crate::repo::CustomerRepository;
use crate::schema::Database;

/// Customer registration. Email addresses identify customers and are unique.
#[derive(Debug, Clone, Copy)]
pub struct CustomerService<'conn> {
    customers: CustomerRepository<'conn>,
}

impl<'conn> CustomerService<'conn> {
    #[must_use]
    pub fn new(db: &'conn Database) -> Self {
        Self {
            customers: CustomerRepository::new(db.conn()),
        }
    }

    /// Register `customer`; `None` if the email address is already taken.
    pub fn create_customer(&self, customer: Customer) -> Option<Customer> {
        if self.customers.exists(|c| c.email == customer.email) {
            log::info!("A customer with email {} already exists", customer.email);
            return None;
        }
        self.customers.create(customer)
    }

    pub fn get_customer(&self, customer_id: CustomerId) -> Option<Customer> {
        self.customers.read(|c| c.id == customer_id)
    }

    pub fn get_all_customers(&self) -> Vec<Customer> {
        self.customers.read_all()
    }

    /// Persist `customer` over the stored customer with the same id.
    pub fn update_customer(&self, customer: &Customer) -> Option<Customer> {
        self.customers.update(|c| c.id == customer.id, customer)
    }

    /// Remove a customer together with their loans.
    pub fn delete_customer(&self, customer_id: CustomerId) -> Option<Customer> {
        self.customers.delete(|c| c.id == customer_id)
    }
}
