//! Sample data loaded at startup on request

use rust_decimal::Decimal;

use crate::model::{Beer, Customer};
use crate::store::{Repository, StoreResult};

fn sample_beer(name: &str, price: Decimal, quantity_on_hand: i32) -> Beer {
    Beer {
        beer_name: Some(name.to_string()),
        beer_style: Some("IPA".to_string()),
        upc: Some("12121213".to_string()),
        quantity_on_hand: Some(quantity_on_hand),
        price: Some(price),
        ..Beer::default()
    }
}

fn sample_beers() -> Vec<Beer> {
    vec![
        sample_beer("Space Dust", Decimal::TEN, 12),
        sample_beer("Efes", Decimal::new(1099, 2), 132),
        sample_beer("Sunshine City", Decimal::new(1399, 2), 144),
    ]
}

fn sample_customers() -> Vec<Customer> {
    ["Ada Lovelace", "Grace Hopper"]
        .into_iter()
        .map(|name| Customer {
            name: Some(name.to_string()),
            ..Customer::default()
        })
        .collect()
}

/// Replace both collections with the sample data.
///
/// Clearing completes before any sample is written. Returns the number of
/// beers and customers saved.
pub async fn seed(
    beers: &Repository<Beer>,
    customers: &Repository<Customer>,
) -> StoreResult<(usize, usize)> {
    beers.delete_all().await?;
    customers.delete_all().await?;
    tracing::info!(
        beers = beers.collection(),
        customers = customers.collection(),
        "old data removed"
    );

    let mut beer_count = 0;
    for beer in sample_beers() {
        beers.save(beer).await?;
        beer_count += 1;
    }

    let mut customer_count = 0;
    for customer in sample_customers() {
        customers.save(customer).await?;
        customer_count += 1;
    }

    tracing::info!(beer_count, customer_count, "sample data loaded");
    Ok((beer_count, customer_count))
}
