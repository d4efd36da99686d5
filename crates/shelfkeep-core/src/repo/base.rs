//! Generic predicate-driven CRUD over one collection.
//!
//! Every operation comes in two flavours:
//!
//! - `try_*` returns [`crate::Result`], keeping not-found (`Ok(None)`),
//!   constraint violations ([`Error::Conflict`]) and storage faults
//!   ([`Error::Database`]) apart.
//! - the plain form (`create`, `read`, ...) logs any error and collapses it
//!   into `None` (or an empty `Vec` for `read_all`). Services build on this
//!   form.
//!
//! Predicates are ordinary closures evaluated against fully hydrated
//! entities in key order, so they may look at related rows
//! (`|loan: &Loan| loan.customer.as_ref().is_some_and(...)`).

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};
use std::fmt;
use std::marker::PhantomData;

use crate::error::{Error, Result};

/// Mapping between an entity type and its table.
pub trait Entity: Sized {
    /// Collection name used in logs and errors.
    const NAME: &'static str;
    const TABLE: &'static str;
    /// Store-assigned integer key column.
    const KEY: &'static str;
    /// Mutable scalar columns, in the order returned by [`Entity::values`].
    const COLUMNS: &'static [&'static str];

    /// Raw key, `0` when not yet persisted.
    fn key(&self) -> i64;

    fn assign_key(&mut self, key: i64);

    /// Build an entity without related rows from `KEY, COLUMNS...`.
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    fn values(&self) -> Vec<Value>;

    /// Attach related rows. The default loads nothing.
    fn hydrate(&mut self, _conn: &Connection) -> rusqlite::Result<()> {
        Ok(())
    }
}

fn select_sql<T: Entity>() -> String {
    format!(
        "SELECT {}, {} FROM {}",
        T::KEY,
        T::COLUMNS.join(", "),
        T::TABLE
    )
}

fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// All rows of `T` in key order, without related rows.
fn fetch_all<T: Entity>(conn: &Connection) -> rusqlite::Result<Vec<T>> {
    let sql = format!("{} ORDER BY {}", select_sql::<T>(), T::KEY);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], |row| T::from_row(row))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// Rows of `T` whose `column` equals `value`, in key order, without related
/// rows. Building block for [`Entity::hydrate`] implementations.
pub(crate) fn fetch_where<T: Entity>(
    conn: &Connection,
    column: &str,
    value: i64,
) -> rusqlite::Result<Vec<T>> {
    let sql = format!(
        "{} WHERE {column} = ?1 ORDER BY {}",
        select_sql::<T>(),
        T::KEY
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([value], |row| T::from_row(row))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// First row of `T` whose `column` equals `value`, without related rows.
pub(crate) fn fetch_first<T: Entity>(
    conn: &Connection,
    column: &str,
    value: i64,
) -> rusqlite::Result<Option<T>> {
    Ok(fetch_where(conn, column, value)?.into_iter().next())
}

/// Repository over the collection of `T`, borrowing the store handle.
pub struct Repository<'conn, T> {
    conn: &'conn Connection,
    entity: PhantomData<fn() -> T>,
}

impl<T> fmt::Debug for Repository<'_, T>
where
    T: Entity,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("entity", &T::NAME)
            .finish_non_exhaustive()
    }
}

impl<T> Clone for Repository<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Repository<'_, T> {}

impl<'conn, T: Entity> Repository<'conn, T> {
    #[must_use]
    pub const fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            entity: PhantomData,
        }
    }

    /// Insert `entity` and return it with its key assigned and related rows
    /// attached.
    ///
    /// An entity that already carries a key is inserted under that key, so
    /// inserting a persisted entity a second time is a conflict.
    pub fn try_create(&self, mut entity: T) -> Result<T> {
        let tx = self.conn.unchecked_transaction()?;

        let mut values = entity.values();
        let explicit_key = entity.key() != 0;
        let sql = if explicit_key {
            values.insert(0, Value::Integer(entity.key()));
            format!(
                "INSERT INTO {} ({}, {}) VALUES ({})",
                T::TABLE,
                T::KEY,
                T::COLUMNS.join(", "),
                placeholders(values.len())
            )
        } else {
            format!(
                "INSERT INTO {} ({}) VALUES ({})",
                T::TABLE,
                T::COLUMNS.join(", "),
                placeholders(values.len())
            )
        };

        tx.execute(&sql, params_from_iter(values))
            .map_err(|err| Error::from_write(T::NAME, err))?;
        if !explicit_key {
            entity.assign_key(tx.last_insert_rowid());
        }
        entity.hydrate(&tx)?;
        tx.commit()?;

        log::debug!("Created {} {}", T::NAME, entity.key());
        Ok(entity)
    }

    /// First entity in key order matching `predicate`.
    pub fn try_read<P>(&self, predicate: P) -> Result<Option<T>>
    where
        P: Fn(&T) -> bool,
    {
        for mut entity in fetch_all::<T>(self.conn)? {
            entity.hydrate(self.conn)?;
            if predicate(&entity) {
                return Ok(Some(entity));
            }
        }
        Ok(None)
    }

    /// Every entity in key order.
    pub fn try_read_all(&self) -> Result<Vec<T>> {
        let mut entities = fetch_all::<T>(self.conn)?;
        for entity in &mut entities {
            entity.hydrate(self.conn)?;
        }
        Ok(entities)
    }

    /// Overwrite the mutable scalar columns of the first match with those of
    /// `new_values` and return the post-write state.
    pub fn try_update<P>(&self, predicate: P, new_values: &T) -> Result<Option<T>>
    where
        P: Fn(&T) -> bool,
    {
        let tx = self.conn.unchecked_transaction()?;

        let Some(current) = self.try_read(predicate)? else {
            return Ok(None);
        };
        let key = current.key();

        let mut values = new_values.values();
        values.push(Value::Integer(key));
        let assignments = T::COLUMNS
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{column} = ?{}", i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {assignments} WHERE {} = ?{}",
            T::TABLE,
            T::KEY,
            T::COLUMNS.len() + 1
        );
        tx.execute(&sql, params_from_iter(values))
            .map_err(|err| Error::from_write(T::NAME, err))?;

        let mut updated = fetch_first::<T>(&tx, T::KEY, key)?;
        if let Some(entity) = &mut updated {
            entity.hydrate(&tx)?;
        }
        tx.commit()?;

        log::debug!("Updated {} {key}", T::NAME);
        Ok(updated)
    }

    /// Remove the first match and return its last known state.
    pub fn try_delete<P>(&self, predicate: P) -> Result<Option<T>>
    where
        P: Fn(&T) -> bool,
    {
        let tx = self.conn.unchecked_transaction()?;

        let Some(entity) = self.try_read(predicate)? else {
            return Ok(None);
        };

        let sql = format!("DELETE FROM {} WHERE {} = ?1", T::TABLE, T::KEY);
        tx.execute(&sql, [entity.key()])
            .map_err(|err| Error::from_write(T::NAME, err))?;
        tx.commit()?;

        log::debug!("Deleted {} {}", T::NAME, entity.key());
        Ok(Some(entity))
    }

    /// Insert `entity`; `None` if the store rejects it.
    pub fn create(&self, entity: T) -> Option<T> {
        self.try_create(entity)
            .map_err(|err| report::<T>("create", &err))
            .ok()
    }

    /// First entity matching `predicate`; `None` if absent or on error.
    pub fn read<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.try_read(predicate)
            .map_err(|err| report::<T>("read", &err))
            .ok()
            .flatten()
    }

    /// Every entity; empty on error.
    pub fn read_all(&self) -> Vec<T> {
        self.try_read_all().unwrap_or_else(|err| {
            report::<T>("read_all", &err);
            Vec::new()
        })
    }

    /// Update the first match; `None` if absent or rejected.
    pub fn update<P>(&self, predicate: P, new_values: &T) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.try_update(predicate, new_values)
            .map_err(|err| report::<T>("update", &err))
            .ok()
            .flatten()
    }

    /// Delete the first match; `None` if absent or rejected.
    pub fn delete<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.try_delete(predicate)
            .map_err(|err| report::<T>("delete", &err))
            .ok()
            .flatten()
    }

    /// Whether any entity matches `predicate`.
    pub fn exists<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.read(predicate).is_some()
    }
}

fn report<T: Entity>(operation: &str, err: &Error) {
    if err.is_conflict() {
        log::warn!("{} {operation} rejected: {err}", T::NAME);
    } else {
        log::error!("{} {operation} failed: {err}", T::NAME);
    }
}
