//! Example demonstrating shipment creation against the carrier sandbox.
//!
//! Credentials come from the environment so this example can run against a
//! real sandbox account:
//!
//! Run with: `cargo run --example create_shipment`

use frachtwerk::{
    Address, AuthenticationStorage, Party, ShipmentDetails, ShipmentOrder, ShipmentService,
};
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("frachtwerk=info")
        .init();

    let auth = AuthenticationStorage::new(
        std::env::var("BCS_APP_ID")?,
        std::env::var("BCS_APP_TOKEN")?,
        std::env::var("BCS_USER")?,
        std::env::var("BCS_SIGNATURE")?,
    );

    let service = ShipmentService::builder()
        .sandbox(true)
        .credentials(auth)
        .timeout(Duration::from_secs(30))
        .build()?;

    let order = ShipmentOrder {
        sequence_number: "1".to_string(),
        shipment: ShipmentDetails {
            product: "V01PAK".to_string(),
            account_number: "22222222220101".to_string(),
            shipment_date: "2026-08-10".to_string(),
            customer_reference: Some("example-order-1".to_string()),
            weight_kg: 1.5,
        },
        shipper: Party {
            name: "Warehouse One".to_string(),
            address: Address {
                street_name: "Nonnenstraße".to_string(),
                street_number: "11d".to_string(),
                zip: "04229".to_string(),
                city: "Leipzig".to_string(),
                country_code: "DE".to_string(),
            },
        },
        receiver: Party {
            name: "Jane Doe".to_string(),
            address: Address {
                street_name: "Charles-de-Gaulle-Straße".to_string(),
                street_number: "20".to_string(),
                zip: "53113".to_string(),
                city: "Bonn".to_string(),
                country_code: "DE".to_string(),
            },
        },
    };

    let shipments = service.create_shipments(vec![order])?;
    for shipment in &shipments {
        println!(
            "created shipment {} for order {}",
            shipment.shipment_number, shipment.sequence_number
        );
        if let Some(label) = &shipment.shipment_label {
            println!("  label: {} bytes of base64 PDF", label.len());
        }
    }

    // clean up: cancel what we just created
    let numbers = shipments
        .iter()
        .map(|s| s.shipment_number.clone())
        .collect();
    let cancelled = service.cancel_shipments(numbers)?;
    println!("cancelled {} shipments again", cancelled.len());

    Ok(())
}
