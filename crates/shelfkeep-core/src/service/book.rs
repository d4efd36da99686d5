use crate::model::{
    Author, AuthorId, Book, BookId, Genre, GenreId, Language, LanguageId, Publisher, PublisherId,
};
use crate::repo::{
    AuthorRepository, BookRepository, GenreRepository, LanguageRepository, PublisherRepository,
};
use crate::schema::Database;

use super::find_or_create;

/// Book catalogue operations.
///
/// Authors are resolved by exact first and last name; publishers, genres and
/// languages by exact name. Missing references are created on the fly.
#[derive(Debug, Clone, Copy)]
pub struct BookService<'conn> {
    authors: AuthorRepository<'conn>,
    books: BookRepository<'conn>,
    genres: GenreRepository<'conn>,
    languages: LanguageRepository<'conn>,
    publishers: PublisherRepository<'conn>,
}

/// Ids of the rows a book refers to.
struct References {
    author_id: AuthorId,
    publisher_id: PublisherId,
    genre_id: GenreId,
    language_id: LanguageId,
}

impl<'conn> BookService<'conn> {
    #[must_use]
    pub fn new(db: &'conn Database) -> Self {
        let conn = db.conn();
        Self {
            authors: AuthorRepository::new(conn),
            books: BookRepository::new(conn),
            genres: GenreRepository::new(conn),
            languages: LanguageRepository::new(conn),
            publishers: PublisherRepository::new(conn),
        }
    }

    /// Create a book, resolving author, publisher, genre and language in that
    /// order.
    ///
    /// Returns `None` if any reference or the book itself cannot be written.
    pub fn create_book(
        &self,
        title: &str,
        author_first_name: &str,
        author_last_name: &str,
        publisher: &str,
        genre: &str,
        language: &str,
    ) -> Option<Book> {
        let refs = self.resolve(author_first_name, author_last_name, publisher, genre, language)?;

        let book = self.books.create(Book::new(
            title,
            refs.author_id,
            refs.publisher_id,
            refs.genre_id,
            refs.language_id,
        ));
        if let Some(book) = &book {
            log::info!("Added book {} ({})", book.id, book.title);
        }
        book
    }

    pub fn get_book(&self, book_id: BookId) -> Option<Book> {
        self.books.read(|b| b.id == book_id)
    }

    pub fn get_all_books(&self) -> Vec<Book> {
        self.books.read_all()
    }

    /// Re-resolve the references, rewrite `book` in place and persist it.
    ///
    /// On success `book` is replaced by the stored state, related rows
    /// included.
    #[allow(clippy::too_many_arguments)]
    pub fn update_book(
        &self,
        book: &mut Book,
        title: &str,
        author_first_name: &str,
        author_last_name: &str,
        publisher: &str,
        genre: &str,
        language: &str,
    ) -> Option<Book> {
        let refs = self.resolve(author_first_name, author_last_name, publisher, genre, language)?;

        book.title = title.to_string();
        book.author_id = refs.author_id;
        book.publisher_id = refs.publisher_id;
        book.genre_id = refs.genre_id;
        book.language_id = refs.language_id;

        let book_id = book.id;
        let updated = self.books.update(|b| b.id == book_id, book)?;
        *book = updated.clone();
        Some(updated)
    }

    pub fn delete_book(&self, book_id: BookId) -> Option<Book> {
        self.books.delete(|b| b.id == book_id)
    }

    fn resolve(
        &self,
        author_first_name: &str,
        author_last_name: &str,
        publisher: &str,
        genre: &str,
        language: &str,
    ) -> Option<References> {
        let author = find_or_create(
            &self.authors,
            |a| a.is_named(author_first_name, author_last_name),
            || Author::new(author_first_name, author_last_name),
        );
        let publisher = find_or_create(
            &self.publishers,
            |p| p.name == publisher,
            || Publisher::new(publisher),
        );
        let genre = find_or_create(&self.genres, |g| g.name == genre, || Genre::new(genre));
        let language = find_or_create(
            &self.languages,
            |l| l.name == language,
            || Language::new(language),
        );

        match (author, publisher, genre, language) {
            (Some(author), Some(publisher), Some(genre), Some(language)) => Some(References {
                author_id: author.id,
                publisher_id: publisher.id,
                genre_id: genre.id,
                language_id: language.id,
            }),
            _ => {
                log::warn!("Could not resolve book references");
                None
            }
        }
    }
}
