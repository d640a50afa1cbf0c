//! # Seed Data Generator
//!
//! Populates a database with demo data for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database file
//! cargo run -p lavka-db --bin seed
//!
//! # Specify database path
//! cargo run -p lavka-db --bin seed -- --db ./data/lavka.db
//! ```
//!
//! ## Generated Data
//! - Products across all five categories, with varied stock levels so the
//!   low-stock and out-of-stock views have something to show
//! - A few customers with different personal discounts
//! - A handful of sales and supplies recorded through the engine, so the
//!   logs, statistics and best-seller views are populated the same way a
//!   running application would populate them

use std::env;

use lavka_core::Money;
use lavka_db::engine::{NewCustomer, NewProduct};
use lavka_db::{Database, DbConfig};

/// Demo products: (name, category display name, price minor, quantity, min_stock)
const PRODUCTS: &[(&str, &str, i64, i64, i64)] = &[
    ("Ноутбук Lenovo IdeaPad", "Электроника", 4_599_900, 12, 3),
    ("Смартфон Galaxy A15", "Электроника", 1_899_900, 8, 5),
    ("Наушники беспроводные", "Электроника", 349_900, 25, 10),
    ("Футболка хлопковая", "Одежда", 99_900, 40, 15),
    ("Джинсы классические", "Одежда", 299_900, 18, 8),
    ("Куртка зимняя", "Одежда", 799_900, 4, 6),
    ("Кофе зерновой 1кг", "Продукты", 129_900, 30, 12),
    ("Шоколад тёмный", "Продукты", 15_900, 2, 20),
    ("Чай чёрный листовой", "Продукты", 45_900, 0, 10),
    ("Мастер и Маргарита", "Книги", 59_900, 15, 5),
    ("Преступление и наказание", "Книги", 49_900, 9, 5),
    ("Подарочный сертификат", "Другое", 100_000, 50, 10),
];

/// Demo customers: (name, phone, email, discount %)
const CUSTOMERS: &[(&str, &str, Option<&str>, f64)] = &[
    ("Иванов Иван", "+7 900 111-22-33", Some("ivanov@example.com"), 5.0),
    ("Петрова Анна", "+7 900 222-33-44", Some("petrova@example.com"), 10.0),
    ("Сидоров Павел", "+7 900 333-44-55", None, 0.0),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./lavka_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Lavka Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./lavka_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Lavka Seed Data Generator");
    println!("=========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected, migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let engine = db.engine();

    // Products
    let mut product_ids = Vec::new();
    for &(name, category, price, quantity, min_stock) in PRODUCTS {
        let product = engine
            .create_product(NewProduct::new(
                name,
                category,
                Money::from_minor(price),
                quantity,
                min_stock,
            ))
            .await?;
        product_ids.push(product.id);
    }
    println!("✓ Created {} products", product_ids.len());

    // Customers
    let mut customer_ids = Vec::new();
    for &(name, phone, email, discount) in CUSTOMERS {
        let mut input = NewCustomer::new(name, phone).discount_percentage(discount);
        if let Some(email) = email {
            input = input.email(email);
        }
        let customer = engine.create_customer(input).await?;
        customer_ids.push(customer.id);
    }
    println!("✓ Created {} customers", customer_ids.len());

    // Supplies replenish a couple of thin positions
    engine
        .record_supply("ООО Поставка", product_ids[7], 40, Money::from_minor(400_000))
        .await?;
    engine
        .record_supply("ООО Поставка", product_ids[8], 25, Money::from_minor(900_000))
        .await?;
    println!("✓ Recorded 2 supplies");

    // Sales: mix of guest sales and customer sales with discounts
    let sales = [
        (product_ids[0], 1, Some(customer_ids[0])),
        (product_ids[2], 3, None),
        (product_ids[3], 5, Some(customer_ids[1])),
        (product_ids[6], 2, None),
        (product_ids[9], 1, Some(customer_ids[2])),
        (product_ids[2], 2, Some(customer_ids[1])),
    ];
    for (product_id, quantity, customer_id) in sales {
        engine.record_sale(product_id, quantity, customer_id).await?;
    }
    println!("✓ Recorded {} sales", sales.len());

    // A quick look at the derived views
    let summary = db.reports().inventory_summary().await?;
    println!();
    println!("Inventory: {} products, value {}", summary.total_products, summary.total_value);
    println!(
        "  low stock: {}, out of stock: {}",
        summary.low_stock_count, summary.out_of_stock_count
    );

    let best = db.reports().best_sellers(3).await?;
    println!("Top sellers:");
    for row in best {
        println!(
            "  {}: {} pcs, revenue {}",
            row.product_name, row.total_quantity, row.revenue
        );
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
