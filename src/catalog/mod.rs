/// Catalog module for the vendor dashboard
///
/// In-memory inventory, order book and sales figures seeded from mock data,
/// plus AI-assisted product description drafting.
pub mod dashboard;
pub mod description;
pub mod inventory;
pub mod orders;

pub use dashboard::{DashboardSummary, SalesPoint, mock_sales};
pub use description::draft_product_description;
pub use inventory::{Inventory, Product, ProductDraft, StockLevel, mock_products};
pub use orders::{Order, OrderBook, OrderStatus, mock_orders};

/// Common error type for catalog operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Unknown order: {0}")]
    UnknownOrder(String),

    #[error("Unknown order status: '{0}'. Valid options: Pending, Processing, Shipped, Delivered, Cancelled")]
    UnknownStatus(String),
}
