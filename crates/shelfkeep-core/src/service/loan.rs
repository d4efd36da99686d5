use crate::model::{BookId, CustomerId, Loan};
use crate::repo::LoanRepository;
use crate::schema::Database;

/// Lending desk. Loans are looked up by the lent book; a book has at most one
/// active loan.
#[derive(Debug, Clone, Copy)]
pub struct LoanService<'conn> {
    loans: LoanRepository<'conn>,
}

impl<'conn> LoanService<'conn> {
    #[must_use]
    pub fn new(db: &'conn Database) -> Self {
        Self {
            loans: LoanRepository::new(db.conn()),
        }
    }

    /// Lend `book_id` to `customer_id`, stamped with the current time.
    ///
    /// `None` if the book is already on loan or either side does not exist.
    pub fn create_loan(&self, book_id: BookId, customer_id: CustomerId) -> Option<Loan> {
        if self.loans.exists(|l| l.book_id == book_id) {
            log::info!("Book {book_id} is already on loan");
            return None;
        }
        let loan = self.loans.create(Loan::new(book_id, customer_id));
        if let Some(loan) = &loan {
            log::info!(
                "Loan {} created: book {book_id} to customer {customer_id}",
                loan.loan_number
            );
        }
        loan
    }

    /// Return the book, ending its loan.
    pub fn delete_loan(&self, book_id: BookId) -> Option<Loan> {
        self.loans.delete(|l| l.book_id == book_id)
    }

    pub fn get_loan(&self, book_id: BookId) -> Option<Loan> {
        self.loans.read(|l| l.book_id == book_id)
    }

    pub fn get_all_loans(&self) -> Vec<Loan> {
        self.loans.read_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Customer, LoanId};
    use crate::service::{BookService, CustomerService};

    fn seed(db: &Database) {
        let books = BookService::new(db);
        for title in ["One", "Two", "Three", "Four", "Five"] {
            books
                .create_book(title, "Stephen", "King", "Viking", "Horror", "English")
                .unwrap();
        }
        let customers = CustomerService::new(db);
        customers
            .create_customer(Customer::new("Test", "Test", "test@test.com"))
            .unwrap();
        customers
            .create_customer(Customer::new("Other", "Reader", "other@test.com"))
            .unwrap();
    }

    #[test]
    fn test_create_loan_attaches_book_author_and_customer() {
        let db = Database::open_in_memory().unwrap();
        seed(&db);
        let service = LoanService::new(&db);

        let loan = service
            .create_loan(BookId::new(1), CustomerId::new(1))
            .unwrap();

        assert_eq!(loan.loan_number, LoanId::new(1));
        let book = loan.book.unwrap();
        assert_eq!(book.title, "One");
        assert_eq!(book.author.unwrap().last_name, "King");
        assert_eq!(loan.customer.unwrap().email, "test@test.com");
    }

    #[test]
    fn test_book_cannot_be_lent_twice() {
        let db = Database::open_in_memory().unwrap();
        seed(&db);
        let service = LoanService::new(&db);

        assert!(service
            .create_loan(BookId::new(5), CustomerId::new(1))
            .is_some());
        assert!(service
            .create_loan(BookId::new(5), CustomerId::new(2))
            .is_none());
        assert_eq!(service.get_all_loans().len(), 1);
        assert_eq!(
            service.get_loan(BookId::new(5)).unwrap().customer_id,
            CustomerId::new(1)
        );
    }

    #[test]
    fn test_loan_for_missing_book_or_customer_is_rejected() {
        let db = Database::open_in_memory().unwrap();
        seed(&db);
        let service = LoanService::new(&db);

        assert!(service
            .create_loan(BookId::new(42), CustomerId::new(1))
            .is_none());
        assert!(service
            .create_loan(BookId::new(1), CustomerId::new(42))
            .is_none());
        assert!(service.get_all_loans().is_empty());
    }

    #[test]
    fn test_returned_book_can_be_lent_again() {
        let db = Database::open_in_memory().unwrap();
        seed(&db);
        let service = LoanService::new(&db);
        service
            .create_loan(BookId::new(2), CustomerId::new(1))
            .unwrap();

        let returned = service.delete_loan(BookId::new(2)).unwrap();
        assert_eq!(returned.customer_id, CustomerId::new(1));
        assert!(service.get_loan(BookId::new(2)).is_none());
        assert!(service.delete_loan(BookId::new(2)).is_none());

        let again = service
            .create_loan(BookId::new(2), CustomerId::new(2))
            .unwrap();
        assert_eq!(again.loan_number, LoanId::new(2));
    }
}
