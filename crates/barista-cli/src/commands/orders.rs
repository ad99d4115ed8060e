//! Order history (display-only).

use anyhow::Result;
use colored::Colorize;

use barista_interaction::orders::OrdersClient;

use crate::render;

pub async fn run() -> Result<()> {
    let config = super::load_config()?;
    let storage = super::open_storage()?;

    let Some(token) = storage.load().token else {
        render::notice("log in first to see your orders");
        return Ok(());
    };

    let client = OrdersClient::new(&config)?;
    match client.my_orders(&token).await {
        Ok(orders) if orders.is_empty() => println!("no orders yet"),
        Ok(orders) => {
            for order in orders {
                let id = order
                    .id
                    .map(|id| format!("#{id}"))
                    .unwrap_or_else(|| "#?".to_string());
                let status = order.status.unwrap_or_else(|| "unknown".to_string());
                let total = order
                    .total
                    .map(|t| format!("${t:.2}"))
                    .unwrap_or_default();
                let when = order.created_at.unwrap_or_default();
                println!("{} {} {} {}", id.bold(), status, total.green(), when.dimmed());
            }
        }
        Err(err) => render::notice(&format!("could not fetch orders: {err}")),
    }

    Ok(())
}
