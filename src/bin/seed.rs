use std::{env, time::Duration};

use abc_retail_api::{
    models::{Customer, Product},
    services::{FunctionsApi, FunctionsApiClient},
};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let base_url = env::var("FUNCTIONS_BASE_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:3000/api".to_string());
    let client = FunctionsApiClient::new(&base_url, Duration::from_secs(10))?;

    seed_customers(&client).await?;
    seed_products(&client).await?;

    println!("Seed completed against {base_url}");
    Ok(())
}

async fn seed_customers(api: &dyn FunctionsApi) -> anyhow::Result<()> {
    let customers = vec![
        ("Thandi", "Mokoena", "thandim", "thandi@example.com", "14 Long Street, Cape Town"),
        ("Pieter", "van Wyk", "pieterv", "pieter@example.com", "3 Church Road, Stellenbosch"),
    ];

    let existing = api.list_customers().await?.unwrap_or_default();
    for (name, surname, username, email, address) in customers {
        if let Some(found) = existing.iter().find(|c| c.username == username) {
            println!("Skipped customer {username}: already present ({})", found.id);
            continue;
        }
        let customer = Customer {
            id: String::new(),
            name: name.into(),
            surname: surname.into(),
            username: username.into(),
            email: email.into(),
            shipping_address: address.into(),
        };
        match api.create_customer(customer).await? {
            Some(created) => println!("Created customer {username} ({})", created.id),
            None => println!("Skipped customer {username}: rejected by service"),
        }
    }
    Ok(())
}

async fn seed_products(api: &dyn FunctionsApi) -> anyhow::Result<()> {
    let products = vec![
        ("Axum Hoodie", "Warm hoodie for Rustaceans", Decimal::new(54999, 2), 50),
        ("Ferris Mug", "Coffee tastes better with Ferris", Decimal::new(12000, 2), 100),
        ("Rust Sticker Pack", "Decorate your laptop", Decimal::new(4950, 2), 200),
        ("E-book: Async Rust", "Learn async Rust patterns", Decimal::new(25000, 2), 75),
    ];

    let existing = api.list_products().await?.unwrap_or_default();
    for (name, desc, price, stock) in products {
        if existing.iter().any(|p| p.product_name == name) {
            println!("Skipped product {name}: already present");
            continue;
        }
        let product = Product {
            id: String::new(),
            product_name: name.into(),
            description: desc.into(),
            price,
            stock_available: stock,
            image_url: None,
        };
        match api.create_product(product, None).await? {
            Some(created) => println!("Created product {name} ({})", created.id),
            None => println!("Skipped product {name}: rejected by service"),
        }
    }
    Ok(())
}
