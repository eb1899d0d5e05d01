//! Slash commands for the terminal dashboard.
//!
//! Lines starting with `/` drive the catalog views; anything else is a chat
//! message for the assistant.

use crate::catalog::{OrderStatus, ProductDraft};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// List products, optionally filtered by a search term.
    Inventory(Option<String>),
    AddProduct(ProductDraft),
    /// List orders, optionally filtered by status.
    Orders(Option<OrderStatus>),
    SetStatus { order_id: String, status: OrderStatus },
    Describe {
        name: String,
        category: String,
        features: String,
    },
    Stats,
    Help,
    Quit,
    Invalid(String),
}

/// Returns `None` when the line is a plain chat message.
pub fn parse_command(input: &str) -> Option<Command> {
    let input = input.trim();
    let rest = input.strip_prefix('/')?;

    let mut parts = rest.splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(str::trim).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "inventory" | "products" => Command::Inventory(argument.map(str::to_string)),
        "add" => parse_add_product(argument),
        "orders" => match argument.map(str::parse::<OrderStatus>) {
            None => Command::Orders(None),
            Some(Ok(status)) => Command::Orders(Some(status)),
            Some(Err(err)) => Command::Invalid(err.to_string()),
        },
        "status" => parse_set_status(argument),
        "describe" => parse_describe(argument),
        "stats" | "dashboard" => Command::Stats,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Invalid(format!("Unknown command: /{other}. Type /help for commands.")),
    };
    Some(result)
}

fn parse_set_status(argument: Option<&str>) -> Command {
    let usage = || Command::Invalid("/status requires <order-id> <status>".to_string());
    let Some(argument) = argument else {
        return usage();
    };
    let mut parts = argument.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(order_id), Some(status), None) => match status.parse::<OrderStatus>() {
            Ok(status) => Command::SetStatus {
                order_id: order_id.to_string(),
                status,
            },
            Err(err) => Command::Invalid(err.to_string()),
        },
        _ => usage(),
    }
}

fn parse_add_product(argument: Option<&str>) -> Command {
    let fields: Vec<&str> = argument
        .map(|raw| raw.splitn(5, '|').map(str::trim).collect())
        .unwrap_or_default();
    let [name, category, price, stock, rest @ ..] = fields.as_slice() else {
        return Command::Invalid(
            "/add requires <name> | <category> | <price> | <stock> [| <description>]".to_string(),
        );
    };
    let Ok(price) = price.parse::<f64>() else {
        return Command::Invalid(format!("Invalid price: '{price}'"));
    };
    let Ok(stock) = stock.parse::<u32>() else {
        return Command::Invalid(format!("Invalid stock: '{stock}'"));
    };
    Command::AddProduct(ProductDraft {
        name: name.to_string(),
        category: category.to_string(),
        price,
        stock,
        description: rest.first().copied().unwrap_or_default().to_string(),
    })
}

fn parse_describe(argument: Option<&str>) -> Command {
    let fields: Vec<&str> = argument
        .map(|raw| raw.splitn(3, '|').map(str::trim).collect())
        .unwrap_or_default();
    match fields.as_slice() {
        [name, category, rest @ ..] if !name.is_empty() && !category.is_empty() => {
            Command::Describe {
                name: name.to_string(),
                category: category.to_string(),
                features: rest.first().copied().unwrap_or_default().to_string(),
            }
        }
        _ => Command::Invalid(
            "/describe requires <name> | <category> | <features>".to_string(),
        ),
    }
}

pub fn help_text() -> &'static str {
    r#"Commands:
  /inventory [term]            List products, filtered by name or category
  /add <name> | <category> | <price> | <stock> [| <description>]
                               Add a product to the inventory
  /orders [status]             List orders, optionally by status
  /status <order-id> <status>  Change an order's status
  /describe <name> | <category> | <features>
                               Draft a product description with the assistant
  /stats                       Show dashboard figures
  /help                        Show this help
  /quit                        Exit

Anything else is sent to the business assistant."#
}
