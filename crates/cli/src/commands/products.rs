//! Catalog commands.

use clap::Subcommand;
use rust_decimal::Decimal;
use shopfront_client::AppState;
use shopfront_core::{Category, ProductCreate, ProductFilter, ProductId, ProductUpdate};

use super::{CommandResult, print_json};

#[derive(Debug, Subcommand)]
pub enum ProductsAction {
    /// List one page of the catalog
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        size: Option<u32>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        min_price: Option<Decimal>,
        #[arg(long)]
        max_price: Option<Decimal>,
        /// Only products that are (or are not) in stock
        #[arg(long)]
        available: Option<bool>,
    },
    /// Show a single product
    Show { id: ProductId },
    /// Create a product (vendor/admin only)
    Create {
        #[arg(short, long)]
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(short, long)]
        price: Decimal,
        #[arg(short, long)]
        stock: u32,
        #[arg(short, long)]
        category: Category,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Update the given fields of a product
    Update {
        id: ProductId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Option<Decimal>,
        #[arg(long)]
        stock: Option<u32>,
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Delete a product
    Delete { id: ProductId },
}

pub async fn run(state: &AppState, action: ProductsAction) -> CommandResult {
    let products = state.api().products();

    match action {
        ProductsAction::List {
            page,
            size,
            category,
            min_price,
            max_price,
            available,
        } => {
            let filter = ProductFilter {
                page,
                size,
                category,
                min_price,
                max_price,
                availability: available,
            };
            print_json(&products.list(&filter).await?.products)
        }
        ProductsAction::Show { id } => print_json(&products.get(id).await?),
        ProductsAction::Create {
            name,
            description,
            price,
            stock,
            category,
            image_url,
        } => {
            let data = ProductCreate {
                name,
                description,
                price,
                stock,
                category,
                image_url,
            };
            print_json(&products.create(&data).await?)
        }
        ProductsAction::Update {
            id,
            name,
            description,
            price,
            stock,
            category,
            image_url,
        } => {
            let data = ProductUpdate {
                name,
                description,
                price,
                stock,
                category,
                image_url,
            };
            if data.is_empty() {
                return Err("nothing to update".into());
            }
            print_json(&products.update(id, &data).await?)
        }
        ProductsAction::Delete { id } => Ok(products.delete(id).await?),
    }
}
