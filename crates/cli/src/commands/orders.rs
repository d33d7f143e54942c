//! Order history commands.

use clap::Subcommand;
use shopfront_client::AppState;
use shopfront_core::{OrderId, OrderStatus};

use super::{CommandResult, print_json};

#[derive(Debug, Subcommand)]
pub enum OrdersAction {
    /// List all orders
    List,
    /// Show a single order
    Show { id: OrderId },
    /// List orders in a status (`pending`, `paid`, `shipped`, `canceled`)
    Status { status: OrderStatus },
    /// Cancel a pending or paid order
    Cancel { id: OrderId },
}

pub async fn run(state: &AppState, action: OrdersAction) -> CommandResult {
    let orders = state.api().orders();

    match action {
        OrdersAction::List => print_json(&orders.list().await?),
        OrdersAction::Show { id } => print_json(&orders.get(id).await?),
        OrdersAction::Status { status } => print_json(&orders.by_status(status).await?),
        OrdersAction::Cancel { id } => {
            let order = orders.get(id).await?;
            if !order.is_cancelable() {
                let status = order.order_status;
                return Err(format!("order {id} is {status} and cannot be canceled").into());
            }
            orders.cancel(id).await?;
            print_json(&orders.get(id).await?)
        }
    }
}
