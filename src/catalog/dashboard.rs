use super::inventory::Inventory;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SalesPoint {
    pub name: String,
    pub revenue: f64,
    pub orders: u32,
}

pub fn mock_sales() -> Vec<SalesPoint> {
    [
        ("Jan", 4000.0, 240),
        ("Feb", 3000.0, 198),
        ("Mar", 5000.0, 305),
        ("Apr", 4500.0, 275),
        ("May", 6000.0, 400),
        ("Jun", 7500.0, 480),
        ("Jul", 8000.0, 510),
    ]
    .into_iter()
    .map(|(name, revenue, orders)| SalesPoint {
        name: name.to_string(),
        revenue,
        orders,
    })
    .collect()
}

/// Headline figures for the dashboard stat cards.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardSummary {
    pub total_revenue: f64,
    pub total_orders: u64,
    pub inventory_units: u64,
    pub low_stock_products: usize,
    /// Revenue change of the latest period against the one before, in percent.
    pub growth_rate: Option<f64>,
}

impl DashboardSummary {
    pub fn from_catalog(sales: &[SalesPoint], inventory: &Inventory) -> Self {
        let growth_rate = match sales {
            [.., previous, latest] if previous.revenue > 0.0 => {
                Some((latest.revenue - previous.revenue) / previous.revenue * 100.0)
            }
            _ => None,
        };

        Self {
            total_revenue: sales.iter().map(|point| point.revenue).sum(),
            total_orders: sales.iter().map(|point| u64::from(point.orders)).sum(),
            inventory_units: inventory.total_units(),
            low_stock_products: inventory.low_stock().len(),
            growth_rate,
        }
    }
}
