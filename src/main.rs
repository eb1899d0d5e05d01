use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use vendorboard::ai::GeminiClient;
use vendorboard::catalog::{
    DashboardSummary, Inventory, OrderBook, OrderStatus, StockLevel, draft_product_description,
    mock_sales,
};
use vendorboard::commands::{Command, help_text, parse_command};
use vendorboard::config::AssistantConfig;
use vendorboard::types::{ChatMessage, Role};
use vendorboard::{ChatSession, SessionOptions, SkipReason, Submission};

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_messages(messages: &[ChatMessage]) {
    for msg in messages {
        let speaker = match msg.role() {
            Role::User => "You",
            Role::Assistant => "Coach",
        };
        println!("[{}] {speaker}: {}\n", msg.display_time(), msg.content());
    }
}

fn print_inventory(inventory: &Inventory, term: Option<&str>) {
    let products = inventory.search(term.unwrap_or_default());
    if products.is_empty() {
        println!("No products found.");
        return;
    }
    for product in products {
        let level = match product.stock_level() {
            StockLevel::InStock => "In Stock",
            StockLevel::LowStock => "Low Stock",
        };
        println!(
            "#{:<4} {:<30} {:<12} ${:>8.2} {:>5} units  {level}",
            product.id, product.name, product.category, product.price, product.stock
        );
    }
}

fn print_orders(orders: &OrderBook, status: Option<OrderStatus>) {
    let listed = orders.filter(status);
    if listed.is_empty() {
        println!("No orders found.");
        return;
    }
    for order in listed {
        println!(
            "#{:<6} {:<16} {}  {:>2} items  ${:>8.2}  {}",
            order.id, order.customer_name, order.date, order.items, order.total, order.status
        );
    }
}

fn print_summary(summary: &DashboardSummary) {
    println!("Total revenue:   ${:.2}", summary.total_revenue);
    println!("Total orders:    {}", summary.total_orders);
    println!("Inventory units: {}", summary.inventory_units);
    println!("Low stock:       {} products", summary.low_stock_products);
    if let Some(growth) = summary.growth_rate {
        println!("Growth rate:     {growth:+.1}%");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; plain environment variables work too
    let _ = dotenvy::dotenv();
    init_logging();

    let config = AssistantConfig::from_env().context("failed to configure the assistant")?;
    let client = GeminiClient::new(&config);
    println!("Vendor dashboard (model: {})", client.model());
    println!("Type /help for commands, /quit to exit\n");

    let session = ChatSession::with_options(
        client,
        SessionOptions {
            timeout: config.timeout,
            ..SessionOptions::default()
        },
    );
    let mut inventory = Inventory::seeded();
    let mut orders = OrderBook::seeded();
    let sales = mock_sales();

    print_messages(&session.transcript());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Some(Command::Quit) => break,
            Some(Command::Help) => println!("{}\n", help_text()),
            Some(Command::Invalid(message)) => println!("{message}\n"),
            Some(Command::Inventory(term)) => print_inventory(&inventory, term.as_deref()),
            Some(Command::AddProduct(draft)) => {
                let product = inventory.add(draft);
                println!("Added #{} {} ({}).\n", product.id, product.name, product.category);
            }
            Some(Command::Orders(status)) => print_orders(&orders, status),
            Some(Command::SetStatus { order_id, status }) => {
                match orders.set_status(&order_id, status) {
                    Ok(order) => println!("Order #{} is now {}.", order.id, order.status),
                    Err(err) => println!("{err}"),
                }
            }
            Some(Command::Describe {
                name,
                category,
                features,
            }) => {
                match draft_product_description(session.client(), &name, &category, &features)
                    .await
                {
                    Ok(description) => println!("{description}\n"),
                    Err(err) => println!("{err}\n"),
                }
            }
            Some(Command::Stats) => {
                print_summary(&DashboardSummary::from_catalog(&sales, &inventory));
            }
            None => {
                let offset = session.len();
                match session.submit(&line).await {
                    Submission::Ignored(SkipReason::EmptyInput) => {}
                    Submission::Ignored(SkipReason::RequestInFlight) => {
                        println!("Still waiting for the previous answer.\n");
                    }
                    Submission::Answered | Submission::Failed => {
                        // The user's own line is already on screen.
                        let fresh = session.transcript_since(offset);
                        let replies: Vec<ChatMessage> = fresh
                            .into_iter()
                            .filter(|msg| msg.role() == Role::Assistant)
                            .collect();
                        print_messages(&replies);
                    }
                }
            }
        }
    }

    Ok(())
}
