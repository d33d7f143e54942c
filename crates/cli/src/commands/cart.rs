//! Cart commands. Every command prints the cart as refetched afterwards.

use clap::Subcommand;
use serde_json::json;
use shopfront_client::AppState;
use shopfront_core::{CartItemCreate, CartItemId, ProductId};

use super::{CommandResult, print_json};

#[derive(Debug, Subcommand)]
pub enum CartAction {
    /// Show cart lines and totals
    List,
    /// Add a product to the cart
    Add {
        product_id: ProductId,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set the quantity of a cart line
    Update { id: CartItemId, quantity: u32 },
    /// Remove a cart line
    Remove { id: CartItemId },
}

pub async fn run(state: &AppState, action: CartAction) -> CommandResult {
    let cart = state.cart();

    match action {
        CartAction::List => cart.fetch_cart_items().await,
        CartAction::Add {
            product_id,
            quantity,
        } => {
            cart.add_to_cart(CartItemCreate {
                product_id,
                quantity,
            })
            .await?;
        }
        CartAction::Update { id, quantity } => {
            cart.update_cart_item(id, quantity).await?;
        }
        CartAction::Remove { id } => cart.remove_from_cart(id).await?,
    }

    print_json(&json!({
        "items": cart.items(),
        "total_items": cart.total_items(),
        "total_price": cart.total_price(),
    }))
}
