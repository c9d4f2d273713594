//! Example demonstrating the error taxonomy.
//!
//! This example shows how to:
//! - Tell rejected credentials apart from carrier-side rejections
//! - Read the carrier's code and detail messages from a detailed error
//! - Inspect per-item validation outcomes without any error handling
//!
//! Run with: `cargo run --example handle_errors`

use frachtwerk::{
    Address, AuthenticationStorage, Error, Party, ShipmentDetails, ShipmentOrder, ShipmentService,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("frachtwerk=debug")
        .init();

    // deliberately bogus credentials
    let service = ShipmentService::builder()
        .sandbox(true)
        .credentials(AuthenticationStorage::new("nope", "nope", "nope", "nope"))
        .build()?;

    let order = ShipmentOrder {
        sequence_number: "1".to_string(),
        shipment: ShipmentDetails {
            product: "V01PAK".to_string(),
            account_number: "22222222220101".to_string(),
            // a date far in the past fails hard validation
            shipment_date: "2020-01-01".to_string(),
            customer_reference: None,
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

    match service.validate_shipments(vec![order]) {
        Ok(states) => {
            for state in states {
                println!(
                    "order {}: valid = {}, status = {}",
                    state.sequence_number,
                    state.is_valid(),
                    state.status.text
                );
            }
        }
        Err(Error::Authentication { message }) => {
            println!("authentication failed, as expected with bogus credentials:");
            println!("  {message}");
        }
        Err(Error::DetailedService {
            code,
            message,
            details,
        }) => {
            println!("the carrier rejected the whole request ({code}): {message}");
            for detail in details {
                println!("  - {detail}");
            }
        }
        Err(e) => {
            println!("unclassified failure (network, malformed response, ...):");
            println!("  {e}");
        }
    }

    Ok(())
}
