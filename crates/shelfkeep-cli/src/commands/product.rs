use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use shelfkeep_core::model::{ArticleNumber, Price, Product};
use shelfkeep_core::{Database, ProductService};

use super::emit;

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    /// Add a product
    Add(ProductArgs),
    /// Show one product with its category and manufacturer
    Show { article_number: i64 },
    /// List every product
    List,
    /// Replace a product's fields and references
    Update {
        article_number: i64,
        #[command(flatten)]
        product: ProductArgs,
    },
    /// Delete a product
    Delete { article_number: i64 },
}

#[derive(Debug, Args)]
pub struct ProductArgs {
    pub title: String,
    /// Price with at most two decimals, e.g. 19.99
    #[arg(long)]
    pub price: Price,
    #[arg(long)]
    pub category: String,
    #[arg(long)]
    pub manufacturer: String,
    #[arg(long)]
    pub description: Option<String>,
}

pub fn run(command: ProductCommand, db: &Database, json: bool) -> Result<()> {
    let service = ProductService::new(db);

    match command {
        ProductCommand::Add(args) => {
            let Some(product) = service.create_product(
                &args.title,
                args.description.as_deref(),
                args.price,
                &args.category,
                &args.manufacturer,
            ) else {
                bail!("Product \"{}\" was rejected", args.title);
            };
            emit(json, &product, |p| println!("✓ Added {}", summary(p)))
        }
        ProductCommand::Show { article_number } => {
            let Some(product) = service.get_product(ArticleNumber::new(article_number)) else {
                bail!("Product {article_number} not found");
            };
            emit(json, &product, print_details)
        }
        ProductCommand::List => {
            let products = service.get_all_products();
            emit(json, &products, |products| {
                if products.is_empty() {
                    println!("No products.");
                }
                for product in products {
                    println!("{}", summary(product));
                }
            })
        }
        ProductCommand::Update {
            article_number,
            product: args,
        } => {
            let Some(mut product) = service.get_product(ArticleNumber::new(article_number)) else {
                bail!("Product {article_number} not found");
            };
            if service
                .update_product(
                    &mut product,
                    &args.title,
                    args.description.as_deref(),
                    args.price,
                    &args.category,
                    &args.manufacturer,
                )
                .is_none()
            {
                bail!("Update of product {article_number} was rejected");
            }
            emit(json, &product, |p| println!("✓ Updated {}", summary(p)))
        }
        ProductCommand::Delete { article_number } => {
            let Some(product) = service.delete_product(ArticleNumber::new(article_number)) else {
                bail!("Product {article_number} not found");
            };
            emit(json, &product, |p| println!("✓ Deleted {}", summary(p)))
        }
    }
}

pub fn show_category(name: &str, db: &Database, json: bool) -> Result<()> {
    let Some(category) = ProductService::new(db).view_category(name) else {
        bail!("Category \"{name}\" not found");
    };
    emit(json, &category, |c| {
        println!("{} ({} products)", c.name, c.products.len());
        for product in &c.products {
            let maker = product.manufacturer.as_ref().map_or("?", |m| m.name.as_str());
            println!("  #{} {} by {maker}, {}", product.article_number, product.title, product.price);
        }
    })
}

pub fn show_manufacturer(name: &str, db: &Database, json: bool) -> Result<()> {
    let Some(manufacturer) = ProductService::new(db).view_manufacturer(name) else {
        bail!("Manufacturer \"{name}\" not found");
    };
    emit(json, &manufacturer, |m| {
        println!("{} ({} products)", m.name, m.products.len());
        for product in &m.products {
            let category = product.category.as_ref().map_or("?", |c| c.name.as_str());
            println!("  #{} {} in {category}, {}", product.article_number, product.title, product.price);
        }
    })
}

fn summary(product: &Product) -> String {
    format!(
        "#{} {} ({})",
        product.article_number, product.title, product.price
    )
}

fn print_details(product: &Product) {
    println!("{}", summary(product));
    if let Some(description) = &product.description {
        println!("  {description}");
    }
    if let Some(category) = &product.category {
        println!("  Category:     {}", category.name);
    }
    if let Some(manufacturer) = &product.manufacturer {
        println!("  Manufacturer: {}", manufacturer.name);
    }
}
