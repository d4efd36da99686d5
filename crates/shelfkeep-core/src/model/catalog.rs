use serde::{Deserialize, Serialize};

use crate::model::ids::{ArticleNumber, CategoryId, ManufacturerId};
use crate::model::price::Price;

/// A product category. Names are unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,

    /// Products in this category, each with its manufacturer attached.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<Product>,
}

impl Category {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::UNASSIGNED,
            name: name.into(),
            products: Vec::new(),
        }
    }
}

/// A product manufacturer. Names are unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manufacturer {
    pub id: ManufacturerId,
    pub name: String,

    /// Products made by this manufacturer, each with its category attached.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<Product>,
}

impl Manufacturer {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ManufacturerId::UNASSIGNED,
            name: name.into(),
            products: Vec::new(),
        }
    }
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub article_number: ArticleNumber,
    pub title: String,
    pub description: Option<String>,
    pub price: Price,
    pub category_id: CategoryId,
    pub manufacturer_id: ManufacturerId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<Manufacturer>,
}

impl Product {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        price: Price,
        category_id: CategoryId,
        manufacturer_id: ManufacturerId,
    ) -> Self {
        Self {
            article_number: ArticleNumber::UNASSIGNED,
            title: title.into(),
            description: None,
            price,
            category_id,
            manufacturer_id,
            category: None,
            manufacturer: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
