//! # Frachtwerk - a typed SOAP client for business customer shipping
//!
//! Frachtwerk talks to the DHL Paket business customer shipping (BCS) web
//! service: it builds the SOAP request documents, dispatches them over
//! HTTP(S) and maps the XML responses back into typed results, while
//! classifying every failure into a small, predictable error taxonomy.
//!
//! ## Quick Start
//!
//! ```no_run
//! use frachtwerk::{
//!     Address, AuthenticationStorage, Party, ShipmentDetails, ShipmentOrder, ShipmentService,
//! };
//!
//! fn main() -> frachtwerk::Result<()> {
//!     let service = ShipmentService::builder()
//!         .sandbox(true)
//!         .credentials(AuthenticationStorage::new(
//!             "my_app_id",
//!             "app_token",
//!             "2222222222_01",
//!             "pass",
//!         ))
//!         .build()?;
//!
//!     let order = ShipmentOrder {
//!         sequence_number: "1".to_string(),
//!         shipment: ShipmentDetails {
//!             product: "V01PAK".to_string(),
//!             account_number: "22222222220101".to_string(),
//!             shipment_date: "2026-08-10".to_string(),
//!             customer_reference: None,
//!             weight_kg: 1.5,
//!         },
//!         shipper: Party {
//!             name: "Warehouse One".to_string(),
//!             address: Address {
//!                 street_name: "Nonnenstraße".to_string(),
//!                 street_number: "11d".to_string(),
//!                 zip: "04229".to_string(),
//!                 city: "Leipzig".to_string(),
//!                 country_code: "DE".to_string(),
//!             },
//!         },
//!         receiver: Party {
//!             name: "Jane Doe".to_string(),
//!             address: Address {
//!                 street_name: "Charles-de-Gaulle-Straße".to_string(),
//!                 street_number: "20".to_string(),
//!                 zip: "53113".to_string(),
//!                 city: "Bonn".to_string(),
//!                 country_code: "DE".to_string(),
//!             },
//!         },
//!     };
//!
//!     let shipments = service.create_shipments(vec![order])?;
//!     for shipment in &shipments {
//!         println!(
//!             "created {} for order {}",
//!             shipment.shipment_number, shipment.sequence_number
//!         );
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Typed operations** - `create_shipments`, `cancel_shipments` and
//!   `validate_shipments` over plain Rust structs, no XML in sight
//! - **Partial failure in-band** - items the carrier rejects are dropped
//!   from (create/cancel) or flagged in (validate) the returned collection;
//!   an error is only raised when the whole call failed
//! - **Small error taxonomy** - authentication, detailed carrier error, or
//!   generic service failure, nothing else crosses the facade
//! - **Exchange logging** - every raw request/response pair is emitted
//!   exactly once through `tracing`, faults included
//! - **Composable client stack** - authentication, logging and error
//!   reclassification are decorators over one `ShipmentClient` trait, so a
//!   custom transport slots right in
//!
//! ## Error Handling
//!
//! ```no_run
//! use frachtwerk::{Error, ShipmentService};
//! # fn example(service: ShipmentService, orders: Vec<frachtwerk::ShipmentOrder>) {
//! match service.validate_shipments(orders) {
//!     Ok(states) => {
//!         for state in states {
//!             println!("order {}: valid = {}", state.sequence_number, state.is_valid());
//!         }
//!     }
//!     Err(Error::Authentication { message }) => {
//!         eprintln!("credentials rejected: {message}");
//!     }
//!     Err(Error::DetailedService { code, message, .. }) => {
//!         eprintln!("carrier said no ({code}): {message}");
//!     }
//!     Err(e) => eprintln!("call failed: {e}"),
//! }
//! # }
//! ```

mod auth;
mod error;
pub mod model;
mod service;
pub mod soap;

pub use auth::AuthenticationStorage;
pub use error::{Error, Result};
pub use model::{
    Address, LabelResponseType, Party, Shipment, ShipmentDetails, ShipmentOrder,
    StatusInformation, ValidationState, Version,
};
pub use service::{ShipmentService, ShipmentServiceBuilder};
