//! Reference collections resolved by natural key: authors, publishers,
//! genres and languages. Reads attach nothing.

use rusqlite::types::Value;
use rusqlite::Row;

use crate::model::{Author, Genre, Language, Publisher};

use super::base::{Entity, Repository};

pub type AuthorRepository<'conn> = Repository<'conn, Author>;
pub type PublisherRepository<'conn> = Repository<'conn, Publisher>;
pub type GenreRepository<'conn> = Repository<'conn, Genre>;
pub type LanguageRepository<'conn> = Repository<'conn, Language>;

impl Entity for Author {
    const NAME: &'static str = "author";
    const TABLE: &'static str = "authors";
    const KEY: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &["first_name", "last_name"];

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
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.first_name.clone()),
            Value::from(self.last_name.clone()),
        ]
    }
}

macro_rules! named_entity {
    ($ty:ident, $name:literal, $table:literal) => {
        impl Entity for $ty {
            const NAME: &'static str = $name;
            const TABLE: &'static str = $table;
            const KEY: &'static str = "id";
            const COLUMNS: &'static [&'static str] = &["name"];

            fn key(&self) -> i64 {
                self.id.get()
            }

            fn assign_key(&mut self, key: i64) {
                self.id = key.into();
            }

            fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
                Ok(Self {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            }

            fn values(&self) -> Vec<Value> {
                vec![Value::from(self.name.clone())]
            }
        }
    };
}

named_entity!(Publisher, "publisher", "publishers");
named_entity!(Genre, "genre", "genres");
named_entity!(Language, "language", "languages");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Database;

    #[test]
    fn test_create_assigns_increasing_ids() {
        let db = Database::open_in_memory().unwrap();
        let repo = GenreRepository::new(db.conn());

        let first = repo.create(Genre::new("Test genre 1")).unwrap();
        let second = repo.create(Genre::new("Test genre 2")).unwrap();

        assert_eq!(first.id.get(), 1);
        assert_eq!(first.name, "Test genre 1");
        assert_eq!(second.id.get(), 2);
        assert_eq!(second.name, "Test genre 2");
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let db = Database::open_in_memory().unwrap();
        let repo = PublisherRepository::new(db.conn());

        assert!(repo.create(Publisher::new("Bonnier")).is_some());
        assert!(repo.create(Publisher::new("Bonnier")).is_none());
        assert_eq!(repo.read_all().len(), 1);
    }

    #[test]
    fn test_duplicate_genre_name_is_rejected() {
        let db = Database::open_in_memory().unwrap();
        let repo = GenreRepository::new(db.conn());

        assert!(repo.create(Genre::new("Horror")).is_some());
        assert!(repo.create(Genre::new("Horror")).is_none());
        assert_eq!(repo.read_all().len(), 1);
    }

    #[test]
    fn test_duplicate_name_is_a_conflict() {
        let db = Database::open_in_memory().unwrap();
        let repo = LanguageRepository::new(db.conn());

        repo.try_create(Language::new("English")).unwrap();
        let err = repo.try_create(Language::new("English")).unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn test_recreating_persisted_author_is_rejected() {
        let db = Database::open_in_memory().unwrap();
        let repo = AuthorRepository::new(db.conn());

        let author = repo.create(Author::new("Astrid", "Lindgren")).unwrap();
        assert!(repo.create(author).is_none());
        assert_eq!(repo.read_all().len(), 1);
    }

    #[test]
    fn test_authors_may_share_a_name() {
        let db = Database::open_in_memory().unwrap();
        let repo = AuthorRepository::new(db.conn());

        assert!(repo.create(Author::new("John", "Smith")).is_some());
        assert!(repo.create(Author::new("John", "Smith")).is_some());
        assert_eq!(repo.read_all().len(), 2);
    }
}
