use crate::model::{ArticleNumber, Category, Manufacturer, Price, Product};
use crate::repo::{CategoryRepository, ManufacturerRepository, ProductRepository};
use crate::schema::Database;

use super::find_or_create;

/// Product catalogue operations.
///
/// Categories and manufacturers are resolved by exact name on writes and
/// looked up case-insensitively by the `view_*` operations.
#[derive(Debug, Clone, Copy)]
pub struct ProductService<'conn> {
    categories: CategoryRepository<'conn>,
    manufacturers: ManufacturerRepository<'conn>,
    products: ProductRepository<'conn>,
}

impl<'conn> ProductService<'conn> {
    #[must_use]
    pub fn new(db: &'conn Database) -> Self {
        let conn = db.conn();
        Self {
            categories: CategoryRepository::new(conn),
            manufacturers: ManufacturerRepository::new(conn),
            products: ProductRepository::new(conn),
        }
    }

    /// Create a product, resolving category then manufacturer.
    pub fn create_product(
        &self,
        title: &str,
        description: Option<&str>,
        price: Price,
        category: &str,
        manufacturer: &str,
    ) -> Option<Product> {
        let (category, manufacturer) = self.resolve(category, manufacturer)?;

        let mut product = Product::new(title, price, category.id, manufacturer.id);
        product.description = description.map(str::to_string);

        let product = self.products.create(product);
        if let Some(product) = &product {
            log::info!(
                "Added product {} ({})",
                product.article_number,
                product.title
            );
        }
        product
    }

    pub fn get_product(&self, article_number: ArticleNumber) -> Option<Product> {
        self.products.read(|p| p.article_number == article_number)
    }

    pub fn get_all_products(&self) -> Vec<Product> {
        self.products.read_all()
    }

    /// Re-resolve the references, rewrite `product` in place and persist it.
    pub fn update_product(
        &self,
        product: &mut Product,
        title: &str,
        description: Option<&str>,
        price: Price,
        category: &str,
        manufacturer: &str,
    ) -> Option<Product> {
        let (category, manufacturer) = self.resolve(category, manufacturer)?;

        product.title = title.to_string();
        product.description = description.map(str::to_string);
        product.price = price;
        product.category_id = category.id;
        product.manufacturer_id = manufacturer.id;

        let article_number = product.article_number;
        let updated = self
            .products
            .update(|p| p.article_number == article_number, product)?;
        *product = updated.clone();
        Some(updated)
    }

    pub fn delete_product(&self, article_number: ArticleNumber) -> Option<Product> {
        self.products.delete(|p| p.article_number == article_number)
    }

    /// Category named `name`, ignoring case, with its products.
    pub fn view_category(&self, name: &str) -> Option<Category> {
        let name = name.to_lowercase();
        self.categories.read(|c| c.name.to_lowercase() == name)
    }

    /// Manufacturer named `name`, ignoring case, with its products.
    pub fn view_manufacturer(&self, name: &str) -> Option<Manufacturer> {
        let name = name.to_lowercase();
        self.manufacturers.read(|m| m.name.to_lowercase() == name)
    }

    fn resolve(&self, category: &str, manufacturer: &str) -> Option<(Category, Manufacturer)> {
        let category = find_or_create(
            &self.categories,
            |c| c.name == category,
            || Category::new(category),
        );
        let manufacturer = find_or_create(
            &self.manufacturers,
            |m| m.name == manufacturer,
            || Manufacturer::new(manufacturer),
        );

        if let (Some(category), Some(manufacturer)) = (category, manufacturer) {
            Some((category, manufacturer))
        } else {
            log::warn!("Could not resolve product references");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CategoryId, ManufacturerId};

    fn price() -> Price {
        "111.00".parse().unwrap()
    }

    #[test]
    fn test_create_product_creates_references() {
        let db = Database::open_in_memory().unwrap();
        let service = ProductService::new(&db);

        let product = service
            .create_product(
                "titletest",
                Some("descriptiontest"),
                price(),
                "categorytest",
                "manufacturertest",
            )
            .unwrap();

        assert_eq!(product.article_number, ArticleNumber::new(1));
        assert_eq!(product.price, Price::from_cents(11_100));
        assert_eq!(product.category.unwrap().name, "categorytest");
        assert_eq!(product.manufacturer.unwrap().name, "manufacturertest");
    }

    #[test]
    fn test_largest_price_is_stored_exactly() {
        let db = Database::open_in_memory().unwrap();
        let service = ProductService::new(&db);

        let created = service
            .create_product("p", None, "92233720368547758.07".parse().unwrap(), "c", "m")
            .unwrap();
        let read = service.get_product(created.article_number).unwrap();

        assert_eq!(read.price, Price::MAX);
        assert_eq!(created, read);
        assert!("100000000000000000.00".parse::<Price>().is_err());
    }

    #[test]
    fn test_update_product_switches_category() {
        let db = Database::open_in_memory().unwrap();
        let service = ProductService::new(&db);
        let mut product = service
            .create_product("titletest", None, price(), "categorytest", "manufacturertest")
            .unwrap();

        service
            .update_product(
                &mut product,
                "titletest",
                Some("now described"),
                Price::from_cents(999),
                "categorytest2",
                "manufacturertest",
            )
            .unwrap();

        assert_eq!(product.category_id, CategoryId::new(2));
        assert_eq!(product.manufacturer_id, ManufacturerId::new(1));
        let stored = service.get_product(product.article_number).unwrap();
        assert_eq!(stored.description.as_deref(), Some("now described"));
        assert_eq!(stored.price, Price::from_cents(999));
    }

    #[test]
    fn test_view_category_ignores_case() {
        let db = Database::open_in_memory().unwrap();
        let service = ProductService::new(&db);
        service
            .create_product("first", None, price(), "Tools", "Acme")
            .unwrap();
        service
            .create_product("second", None, price(), "Tools", "Acme")
            .unwrap();

        let category = service.view_category("tOOLS").unwrap();
        assert_eq!(category.name, "Tools");
        assert_eq!(category.products.len(), 2);
        assert!(service.view_category("garden").is_none());
    }

    #[test]
    fn test_view_manufacturer_ignores_case() {
        let db = Database::open_in_memory().unwrap();
        let service = ProductService::new(&db);
        service
            .create_product("first", None, price(), "Tools", "Acme")
            .unwrap();

        let manufacturer = service.view_manufacturer("ACME").unwrap();
        assert_eq!(manufacturer.products.len(), 1);
        assert_eq!(
            manufacturer.products[0].category.as_ref().unwrap().name,
            "Tools"
        );
    }

    #[test]
    fn test_delete_product() {
        let db = Database::open_in_memory().unwrap();
        let service = ProductService::new(&db);
        service
            .create_product("first", None, price(), "Tools", "Acme")
            .unwrap();

        assert!(service.delete_product(ArticleNumber::new(1)).is_some());
        assert!(service.get_all_products().is_empty());
        assert!(service.delete_product(ArticleNumber::new(1)).is_none());
    }
}
