//! # Seed Data Generator
//!
//! Populates the database with the Rev's Grill menu, ingredient stock, and
//! recipes for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p revpos-db --bin seed
//!
//! # Specify database path
//! cargo run -p revpos-db --bin seed -- --db ./data/revpos.db
//! ```
//!
//! ## Generated Data
//! - ~2 dozen ingredients with starting stock and restock thresholds
//! - The full grill menu across categories:
//!   Burgers, Dogs, Tenders, Sides, Shakes, Beverages, Seasonal
//! - Recipe rows linking each menu item to its per-unit ingredients
//!   (e.g. Classic Hamburger = bun + patty + cheese + lettuce + tomato +
//!   onion at $6.89)
//!
//! Seeding is skipped when the menu already has items, so re-running against
//! an existing database is safe.

use std::collections::HashMap;
use std::env;

use revpos_db::{Database, DbConfig};

/// Ingredient stock: (name, on_hand, unit, restock_level)
const INGREDIENTS: &[(&str, i64, &str, i64)] = &[
    ("Hamburger Bun", 200, "count", 50),
    ("Hot Dog Bun", 120, "count", 30),
    ("Beef Patty", 180, "count", 40),
    ("Hot Dog Frank", 100, "count", 25),
    ("Chicken Tender", 250, "count", 60),
    ("American Cheese", 160, "slice", 40),
    ("Lettuce", 90, "ounce", 20),
    ("Tomato", 80, "slice", 20),
    ("Onion", 70, "ounce", 15),
    ("Pickle", 110, "slice", 25),
    ("Bacon", 95, "strip", 20),
    ("Ketchup", 300, "ounce", 50),
    ("Mustard", 250, "ounce", 40),
    ("Mayonnaise", 220, "ounce", 40),
    ("Gig Em Sauce", 140, "ounce", 30),
    ("French Fry Basket", 170, "count", 40),
    ("Tater Tot Basket", 130, "count", 30),
    ("Cheese Sauce", 120, "ounce", 25),
    ("Chili", 75, "ounce", 15),
    ("Corn Dog", 85, "count", 20),
    ("Vanilla Ice Cream", 150, "scoop", 30),
    ("Chocolate Syrup", 100, "ounce", 20),
    ("Strawberry Syrup", 90, "ounce", 20),
    ("Peppermint Syrup", 40, "ounce", 10),
    ("Shake Cup", 180, "count", 40),
    ("Fountain Cup", 400, "count", 80),
    ("Coffee Grounds", 60, "ounce", 15),
];

/// Menu: (name, price_cents, category, recipe as (ingredient, per-unit qty))
const MENU: &[(&str, i64, &str, &[(&str, i64)])] = &[
    // Burgers
    (
        "Classic Hamburger",
        689,
        "Burgers",
        &[
            ("Hamburger Bun", 1),
            ("Beef Patty", 1),
            ("American Cheese", 1),
            ("Lettuce", 1),
            ("Tomato", 1),
            ("Onion", 1),
        ],
    ),
    (
        "Double Stack Burger",
        889,
        "Burgers",
        &[
            ("Hamburger Bun", 1),
            ("Beef Patty", 2),
            ("American Cheese", 2),
            ("Lettuce", 1),
            ("Tomato", 1),
            ("Onion", 1),
        ],
    ),
    (
        "Bacon Cheeseburger",
        849,
        "Burgers",
        &[
            ("Hamburger Bun", 1),
            ("Beef Patty", 1),
            ("American Cheese", 1),
            ("Bacon", 2),
            ("Lettuce", 1),
            ("Tomato", 1),
        ],
    ),
    (
        "Rev's Grill Burger",
        799,
        "Burgers",
        &[
            ("Hamburger Bun", 1),
            ("Beef Patty", 1),
            ("American Cheese", 1),
            ("Gig Em Sauce", 1),
            ("Pickle", 2),
            ("Onion", 1),
        ],
    ),
    // Dogs
    (
        "All-American Hot Dog",
        449,
        "Dogs",
        &[
            ("Hot Dog Bun", 1),
            ("Hot Dog Frank", 1),
            ("Ketchup", 1),
            ("Mustard", 1),
        ],
    ),
    (
        "Chili Cheese Dog",
        549,
        "Dogs",
        &[
            ("Hot Dog Bun", 1),
            ("Hot Dog Frank", 1),
            ("Chili", 2),
            ("Cheese Sauce", 1),
        ],
    ),
    ("Corn Dog Basket", 499, "Dogs", &[("Corn Dog", 2)]),
    // Tenders
    (
        "3 Tender Entree",
        749,
        "Tenders",
        &[("Chicken Tender", 3), ("Gig Em Sauce", 1)],
    ),
    (
        "5 Tender Entree",
        999,
        "Tenders",
        &[("Chicken Tender", 5), ("Gig Em Sauce", 2)],
    ),
    // Sides
    ("French Fries", 299, "Sides", &[("French Fry Basket", 1)]),
    (
        "Cheese Fries",
        399,
        "Sides",
        &[("French Fry Basket", 1), ("Cheese Sauce", 1)],
    ),
    ("Tater Tots", 329, "Sides", &[("Tater Tot Basket", 1)]),
    // Shakes
    (
        "Vanilla Shake",
        429,
        "Shakes",
        &[("Shake Cup", 1), ("Vanilla Ice Cream", 2)],
    ),
    (
        "Chocolate Shake",
        429,
        "Shakes",
        &[
            ("Shake Cup", 1),
            ("Vanilla Ice Cream", 2),
            ("Chocolate Syrup", 1),
        ],
    ),
    (
        "Strawberry Shake",
        429,
        "Shakes",
        &[
            ("Shake Cup", 1),
            ("Vanilla Ice Cream", 2),
            ("Strawberry Syrup", 1),
        ],
    ),
    // Beverages
    ("Fountain Drink", 219, "Beverages", &[("Fountain Cup", 1)]),
    (
        "Iced Coffee",
        349,
        "Beverages",
        &[("Fountain Cup", 1), ("Coffee Grounds", 1)],
    ),
    // No recipe: stock is tracked at the case level, not per bottle.
    ("Bottled Water", 189, "Beverages", &[]),
    // Seasonal
    (
        "Chili Frito Burger",
        829,
        "Seasonal",
        &[
            ("Hamburger Bun", 1),
            ("Beef Patty", 1),
            ("Chili", 2),
            ("American Cheese", 1),
            ("Onion", 1),
        ],
    ),
    (
        "Peppermint Shake",
        479,
        "Seasonal",
        &[
            ("Shake Cup", 1),
            ("Vanilla Ice Cream", 2),
            ("Peppermint Syrup", 1),
        ],
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./revpos_dev.db");

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
                println!("Rev's Grill Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./revpos_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Rev's Grill Seed Data Generator");
    println!("==================================");
    println!("Database: {}", db_path);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing data
    let existing = db.menu().list_all().await?.len();
    if existing > 0 {
        println!("⚠ Database already has {} menu items", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let start = std::time::Instant::now();

    // Seed ingredients, keeping name → id for recipe linking
    println!();
    println!("Seeding ingredients...");
    let mut ingredient_ids: HashMap<&str, String> = HashMap::new();
    for (name, on_hand, unit, restock_level) in INGREDIENTS {
        let ingredient = db
            .ingredients()
            .insert(name, *on_hand, unit, *restock_level)
            .await?;
        ingredient_ids.insert(name, ingredient.id);
    }
    println!("  {} ingredients", INGREDIENTS.len());

    // Seed menu items and their recipes
    println!("Seeding menu...");
    let mut recipe_rows = 0;
    for (name, price_cents, category, recipe) in MENU {
        let item = db.menu().insert(name, *price_cents, category).await?;

        for (ingredient_name, quantity) in *recipe {
            match ingredient_ids.get(ingredient_name) {
                Some(ingredient_id) => {
                    db.menu()
                        .set_requirement(&item.id, ingredient_id, *quantity)
                        .await?;
                    recipe_rows += 1;
                }
                None => {
                    eprintln!("  ⚠ {}: unknown ingredient '{}'", name, ingredient_name);
                }
            }
        }
    }
    println!("  {} menu items, {} recipe rows", MENU.len(), recipe_rows);

    let elapsed = start.elapsed();
    println!();
    println!("✓ Seeded in {:?}", elapsed);

    // Verify recipe linkage
    println!();
    println!("Verifying recipes...");
    if let Some(burger) = db.menu().get_by_name("Classic Hamburger").await? {
        let requirements = db.menu().requirements_for(&burger.id).await?;
        println!(
            "  Classic Hamburger: {} (${}.{:02}), {} ingredients",
            burger.id,
            burger.price_cents / 100,
            burger.price_cents % 100,
            requirements.len()
        );
    }

    let low = db.reports().restock_report().await?;
    println!("  Ingredients below restock level: {}", low.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
