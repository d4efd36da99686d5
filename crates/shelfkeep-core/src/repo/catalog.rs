//! Product catalog. A product read attaches its category and manufacturer; a
//! category or manufacturer read attaches its products, each carrying the
//! other reference.

use rusqlite::types::Value;
use rusqlite::{Connection, Row};

use crate::model::{Category, Manufacturer, Product};

use super::base::{fetch_first, fetch_where, Entity, Repository};

pub type ProductRepository<'conn> = Repository<'conn, Product>;
pub type CategoryRepository<'conn> = Repository<'conn, Category>;
pub type ManufacturerRepository<'conn> = Repository<'conn, Manufacturer>;

impl Entity for Product {
    const NAME: &'static str = "product";
    const TABLE: &'static str = "products";
    const KEY: &'static str = "article_number";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "description",
        "price",
        "category_id",
        "manufacturer_id",
    ];

    fn key(&self) -> i64 {
        self.article_number.get()
    }

    fn assign_key(&mut self, key: i64) {
        self.article_number = key.into();
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            article_number: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            price: row.get(3)?,
            category_id: row.get(4)?,
            manufacturer_id: row.get(5)?,
            category: None,
            manufacturer: None,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.title.clone()),
            Value::from(self.description.clone()),
            Value::from(self.price),
            Value::from(self.category_id),
            Value::from(self.manufacturer_id),
        ]
    }

    fn hydrate(&mut self, conn: &Connection) -> rusqlite::Result<()> {
        self.category = fetch_first::<Category>(conn, Category::KEY, self.category_id.get())?;
        self.manufacturer =
            fetch_first::<Manufacturer>(conn, Manufacturer::KEY, self.manufacturer_id.get())?;
        Ok(())
    }
}

impl Entity for Category {
    const NAME: &'static str = "category";
    const TABLE: &'static str = "categories";
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
            products: Vec::new(),
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![Value::from(self.name.clone())]
    }

    fn hydrate(&mut self, conn: &Connection) -> rusqlite::Result<()> {
        let mut products = fetch_where::<Product>(conn, "category_id", self.id.get())?;
        for product in &mut products {
            product.manufacturer =
                fetch_first::<Manufacturer>(conn, Manufacturer::KEY, product.manufacturer_id.get())?;
        }
        self.products = products;
        Ok(())
    }
}

impl Entity for Manufacturer {
    const NAME: &'static str = "manufacturer";
    const TABLE: &'static str = "manufacturers";
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
            products: Vec::new(),
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![Value::from(self.name.clone())]
    }

    fn hydrate(&mut self, conn: &Connection) -> rusqlite::Result<()> {
        let mut products = fetch_where::<Product>(conn, "manufacturer_id", self.id.get())?;
        for product in &mut products {
            product.category =
                fetch_first::<Category>(conn, Category::KEY, product.category_id.get())?;
        }
        self.products = products;
        Ok(())
    }
}
