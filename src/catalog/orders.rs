use super::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OrderStatus {
    type Err = CatalogError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CatalogError::UnknownStatus(wanted.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    pub date: String,
    pub total: f64,
    pub status: OrderStatus,
    /// Number of line items.
    pub items: u32,
}

pub struct OrderBook {
    orders: Vec<Order>,
}

impl OrderBook {
    pub fn new(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    pub fn seeded() -> Self {
        Self::new(mock_orders())
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn get(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }

    /// `None` returns every order.
    pub fn filter(&self, status: Option<OrderStatus>) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|order| status.is_none_or(|wanted| order.status == wanted))
            .collect()
    }

    pub fn set_status(&mut self, id: &str, status: OrderStatus) -> Result<&Order, CatalogError> {
        let order = self
            .orders
            .iter_mut()
            .find(|order| order.id == id)
            .ok_or_else(|| CatalogError::UnknownOrder(id.to_string()))?;

        if order.status != status {
            tracing::info!(order = %order.id, from = %order.status, to = %status, "order status changed");
            order.status = status;
        }
        Ok(order)
    }
}

pub fn mock_orders() -> Vec<Order> {
    let order = |id: &str, customer: &str, date: &str, total: f64, status: OrderStatus, items: u32| Order {
        id: id.to_string(),
        customer_name: customer.to_string(),
        date: date.to_string(),
        total,
        status,
        items,
    };

    vec![
        order("1001", "Alex Johnson", "2023-10-24", 154.49, OrderStatus::Shipped, 2),
        order("1002", "Sarah Smith", "2023-10-25", 249.99, OrderStatus::Processing, 1),
        order("1003", "Michael Brown", "2023-10-25", 49.00, OrderStatus::Pending, 2),
        order("1004", "Emily Davis", "2023-10-23", 89.99, OrderStatus::Delivered, 1),
    ]
}
