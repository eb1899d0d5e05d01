use serde::{Deserialize, Serialize};

/// Products at or below this many units are flagged as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: u32,
    pub description: String,
    pub image_url: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StockLevel {
    InStock,
    LowStock,
}

impl Product {
    pub fn stock_level(&self) -> StockLevel {
        if self.stock > LOW_STOCK_THRESHOLD {
            StockLevel::InStock
        } else {
            StockLevel::LowStock
        }
    }
}

/// Fields a vendor fills in when adding a product.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: u32,
    pub description: String,
}

pub struct Inventory {
    products: Vec<Product>,
    next_id: u64,
}

impl Inventory {
    pub fn new(products: Vec<Product>) -> Self {
        let next_id = products
            .iter()
            .filter_map(|product| product.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        Self { products, next_id }
    }

    pub fn seeded() -> Self {
        Self::new(mock_products())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Case-insensitive match on name or category. A blank term matches all.
    pub fn search(&self, term: &str) -> Vec<&Product> {
        let needle = term.trim().to_lowercase();
        self.products
            .iter()
            .filter(|product| {
                needle.is_empty()
                    || product.name.to_lowercase().contains(&needle)
                    || product.category.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn add(&mut self, draft: ProductDraft) -> &Product {
        let id = self.next_id.to_string();
        self.next_id += 1;

        let name = non_blank(draft.name).unwrap_or_else(|| "New Product".to_string());
        let category = non_blank(draft.category).unwrap_or_else(|| "General".to_string());
        let price = if draft.price.is_finite() && draft.price > 0.0 {
            draft.price
        } else {
            0.0
        };

        self.products.push(Product {
            image_url: Some(format!("https://picsum.photos/200?random={id}")),
            id,
            name,
            category,
            price,
            stock: draft.stock,
            description: draft.description.trim().to_string(),
        });
        &self.products[self.products.len() - 1]
    }

    pub fn low_stock(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| product.stock_level() == StockLevel::LowStock)
            .collect()
    }

    pub fn total_units(&self) -> u64 {
        self.products.iter().map(|product| u64::from(product.stock)).sum()
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn mock_products() -> Vec<Product> {
    let product = |id: &str, name: &str, category: &str, price: f64, stock: u32, description: &str| {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            price,
            stock,
            description: description.to_string(),
            image_url: Some(format!("https://picsum.photos/200?random={id}")),
        }
    };

    vec![
        product(
            "1",
            "Premium Wireless Headset",
            "Electronics",
            129.99,
            45,
            "Noise cancelling, 20h battery life.",
        ),
        product(
            "2",
            "Ergonomic Office Chair",
            "Furniture",
            249.99,
            8,
            "Lumbar support with breathable mesh.",
        ),
        product(
            "3",
            "Mechanical Keyboard",
            "Electronics",
            89.99,
            120,
            "RGB backlit, blue switches.",
        ),
        product(
            "4",
            "Stainless Steel Water Bottle",
            "Accessories",
            24.50,
            200,
            "Insulated, keeps cold for 24h.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_matches_name_or_category() {
        let inventory = Inventory::seeded();

        let names: Vec<&str> = inventory
            .search("ELECTRONICS")
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Premium Wireless Headset", "Mechanical Keyboard"]);

        assert_eq!(inventory.search("chair").len(), 1);
        assert_eq!(inventory.search("   ").len(), 4);
        assert!(inventory.search("lamp").is_empty());
    }

    #[test]
    fn add_assigns_next_id_and_defaults() {
        let mut inventory = Inventory::seeded();
        let added = inventory.add(ProductDraft {
            stock: 3,
            price: f64::NAN,
            ..ProductDraft::default()
        });

        assert_eq!(added.id, "5");
        assert_eq!(added.name, "New Product");
        assert_eq!(added.category, "General");
        assert_eq!(added.price, 0.0);
        assert_eq!(inventory.products().len(), 5);
    }

    #[test]
    fn flags_low_stock() {
        let inventory = Inventory::seeded();
        let low: Vec<&str> = inventory.low_stock().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(low, vec!["2"]);
        assert_eq!(inventory.total_units(), 45 + 8 + 120 + 200);
    }
}
